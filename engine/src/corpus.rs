use std::collections::HashMap;
use std::time::Instant;

use crate::config::{EngineConfig, SimilarityStrategy};
use crate::error::{EngineError, Result};
use crate::model::{DocId, Document, NewDocument, SparseVector, Vocabulary};
use crate::recommender::{rank_row, Recommendation};
use crate::similarity::{DenseMatrix, LazyRows, SimilaritySource};
use crate::tokenizer::Tokenizer;
use crate::vectorizer::Vectorizer;

/// Documents plus everything derived from them, built together and never
/// mutated afterwards. Rebuilding means constructing a new `Corpus`.
#[derive(Debug)]
pub struct Corpus {
    documents: Vec<Document>,
    by_title: HashMap<String, DocId>,
    vocabulary: Vocabulary,
    vectors: Vec<SparseVector>,
    // None under the lazy strategy
    matrix: Option<DenseMatrix>,
    config: EngineConfig,
}

impl Corpus {
    pub fn build(input: Vec<NewDocument>, config: &EngineConfig) -> Result<Self> {
        if input.is_empty() {
            tracing::warn!("rejecting empty corpus");
            return Err(EngineError::InvalidCorpus("corpus has no documents".into()));
        }
        let start = Instant::now();
        let mut by_title: HashMap<String, DocId> = HashMap::with_capacity(input.len());
        let mut documents = Vec::with_capacity(input.len());
        for (i, doc) in input.into_iter().enumerate() {
            let id = i as DocId;
            if by_title.insert(doc.title.clone(), id).is_some() {
                tracing::warn!(title = %doc.title, "rejecting corpus with duplicate title");
                return Err(EngineError::InvalidCorpus(format!("duplicate title: {}", doc.title)));
            }
            documents.push(Document { id, title: doc.title, text: doc.text });
        }

        let tokenizer = Tokenizer::new(config);
        let (vocabulary, vectors) = Vectorizer::new(&tokenizer).build(&documents);
        let matrix = match config.strategy {
            SimilarityStrategy::Dense => Some(DenseMatrix::build(&vectors)),
            SimilarityStrategy::Lazy => None,
        };

        tracing::info!(
            num_docs = documents.len(),
            num_terms = vocabulary.len(),
            strategy = config.strategy.as_str(),
            took_ms = start.elapsed().as_millis() as u64,
            "corpus built"
        );
        Ok(Self { documents, by_title, vocabulary, vectors, matrix, config: config.clone() })
    }

    pub fn len(&self) -> usize { self.documents.len() }

    pub fn is_empty(&self) -> bool { self.documents.is_empty() }

    pub fn documents(&self) -> &[Document] { &self.documents }

    pub fn vocabulary(&self) -> &Vocabulary { &self.vocabulary }

    pub fn vectors(&self) -> &[SparseVector] { &self.vectors }

    pub fn config(&self) -> &EngineConfig { &self.config }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.documents.iter().map(|d| d.title.as_str())
    }

    /// Exact, case-sensitive title lookup.
    pub fn id_of(&self, title: &str) -> Option<DocId> { self.by_title.get(title).copied() }

    pub fn similarity(&self) -> Box<dyn SimilaritySource + '_> {
        match &self.matrix {
            Some(m) => Box::new(m) as Box<dyn SimilaritySource + '_>,
            None => Box::new(LazyRows::new(&self.vectors)),
        }
    }

    pub fn recommend_scored(&self, title: &str, k: usize) -> Result<Vec<Recommendation>> {
        let id = self.id_of(title).ok_or_else(|| EngineError::NotFound(title.to_string()))?;
        let row = self.similarity().row(id);
        Ok(rank_row(&row, id, k)
            .into_iter()
            .map(|(j, score)| Recommendation { id: j, title: self.documents[j as usize].title.clone(), score })
            .collect())
    }

    pub fn recommend(&self, title: &str, k: usize) -> Result<Vec<String>> {
        Ok(self.recommend_scored(title, k)?.into_iter().map(|r| r.title).collect())
    }
}
