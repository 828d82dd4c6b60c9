//! Reading catalogs of titled descriptions from JSON / JSONL files.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{EngineError, Result};
use crate::model::NewDocument;

#[derive(Debug, Deserialize)]
struct CatalogRecord {
    title: String,
    #[serde(alias = "description", alias = "body")]
    text: String,
}

impl From<CatalogRecord> for NewDocument {
    fn from(r: CatalogRecord) -> Self { NewDocument { title: r.title, text: r.text } }
}

fn catalog_err(path: &Path, e: impl std::fmt::Display) -> EngineError {
    EngineError::Catalog(format!("{}: {e}", path.display()))
}

/// Loads documents from a `.json` file (array or single object), a `.jsonl`
/// file, or a directory of those (sorted path order, so ids are stable).
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<NewDocument>> {
    let path = path.as_ref();
    let mut files: Vec<PathBuf> = Vec::new();
    if path.is_dir() {
        for entry in WalkDir::new(path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "json" | "jsonl") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if path.is_file() {
        files.push(path.to_path_buf());
    } else {
        return Err(catalog_err(path, "no such file or directory"));
    }

    let mut docs = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    tracing::debug!(path = %path.display(), count = docs.len(), "catalog loaded");
    Ok(docs)
}

fn read_jsonl(file: &Path, out: &mut Vec<NewDocument>) -> Result<()> {
    let f = File::open(file).map_err(|e| catalog_err(file, e))?;
    for (lineno, line) in BufReader::new(f).lines().enumerate() {
        let line = line.map_err(|e| catalog_err(file, e))?;
        if line.trim().is_empty() { continue; }
        let rec: CatalogRecord = serde_json::from_str(&line)
            .map_err(|e| catalog_err(file, format!("line {}: {e}", lineno + 1)))?;
        out.push(rec.into());
    }
    Ok(())
}

fn read_json(file: &Path, out: &mut Vec<NewDocument>) -> Result<()> {
    let f = File::open(file).map_err(|e| catalog_err(file, e))?;
    let json: serde_json::Value = serde_json::from_reader(BufReader::new(f)).map_err(|e| catalog_err(file, e))?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                let rec: CatalogRecord = serde_json::from_value(v).map_err(|e| catalog_err(file, e))?;
                out.push(rec.into());
            }
        }
        serde_json::Value::Object(_) => {
            let rec: CatalogRecord = serde_json::from_value(json).map_err(|e| catalog_err(file, e))?;
            out.push(rec.into());
        }
        _ => return Err(catalog_err(file, "expected an object or an array of objects")),
    }
    Ok(())
}

/// The five-movie demo catalog.
pub fn sample_catalog() -> Vec<NewDocument> {
    vec![
        NewDocument::new("Inception", "A thief who enters the dreams of others to steal secrets."),
        NewDocument::new("Interstellar", "A team of explorers travel through a wormhole in space."),
        NewDocument::new("The Matrix", "A hacker discovers the nature of reality and his role in it."),
        NewDocument::new("The Dark Knight", "Batman faces the Joker, a criminal mastermind."),
        NewDocument::new("Avatar", "A marine on an alien planet gets caught in a conflict."),
    ]
}
