//! Writes a built corpus to disk for inspection and diffing between builds.
//! Nothing here is read back to serve queries.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::corpus::Corpus;
use crate::model::DocId;
use crate::similarity::DenseMatrix;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_docs: u32,
    pub num_terms: u32,
    pub strategy: String,
    pub created_at: String,
    pub version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub term: String,
    pub idf: f32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub id: DocId,
    pub title: String,
}

pub struct ExportPaths {
    pub root: PathBuf,
}

impl ExportPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
    pub fn vocabulary(&self) -> PathBuf { self.root.join("vocabulary.json") }
    pub fn documents(&self) -> PathBuf { self.root.join("documents.json") }
    pub fn matrix(&self) -> PathBuf { self.root.join("matrix.bin") }
}

fn write_json<T: Serialize>(path: PathBuf, value: &T) -> Result<()> {
    let mut f = File::create(path)?;
    let json = serde_json::to_string_pretty(value)?;
    f.write_all(json.as_bytes())?;
    Ok(())
}

/// Writes meta, vocabulary, documents and the dense matrix under `dir`.
pub fn export_corpus<P: AsRef<Path>>(corpus: &Corpus, dir: P) -> Result<ExportPaths> {
    let paths = ExportPaths::new(dir);
    create_dir_all(&paths.root)?;

    let vocab = corpus.vocabulary();
    let vocabulary: Vec<VocabularyEntry> = vocab
        .terms()
        .iter()
        .enumerate()
        .map(|(i, term)| VocabularyEntry { term: term.clone(), idf: vocab.idf(i as u32).unwrap_or(0.0) })
        .collect();
    write_json(paths.vocabulary(), &vocabulary)?;

    let documents: Vec<DocumentEntry> = corpus
        .documents()
        .iter()
        .map(|d| DocumentEntry { id: d.id, title: d.title.clone() })
        .collect();
    write_json(paths.documents(), &documents)?;

    // Lazy corpora are materialized here; export is an offline step.
    let matrix = DenseMatrix::from_source(&*corpus.similarity());
    let mut f = File::create(paths.matrix())?;
    f.write_all(&bincode::serialize(&matrix)?)?;

    let meta = MetaFile {
        num_docs: corpus.len() as u32,
        num_terms: vocab.len() as u32,
        strategy: corpus.config().strategy.as_str().to_string(),
        created_at: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "".into()),
        version: FORMAT_VERSION,
    };
    write_json(paths.meta(), &meta)?;

    tracing::info!(dir = %paths.root.display(), "corpus exported");
    Ok(paths)
}

pub fn read_meta<P: AsRef<Path>>(dir: P) -> Result<MetaFile> {
    let mut f = File::open(ExportPaths::new(dir).meta())?;
    let mut buf = String::new();
    f.read_to_string(&mut buf)?;
    let meta: MetaFile = serde_json::from_str(&buf)?;
    Ok(meta)
}

pub fn read_matrix<P: AsRef<Path>>(dir: P) -> Result<DenseMatrix> {
    let mut f = File::open(ExportPaths::new(dir).matrix())?;
    let mut buf = Vec::new();
    f.read_to_end(&mut buf)?;
    let matrix = bincode::deserialize(&buf)?;
    Ok(matrix)
}
