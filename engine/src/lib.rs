//! Content-similarity engine: TF-IDF vectors, pairwise cosine similarity and
//! top-K recommendation over a fixed catalog of titled descriptions.

pub mod catalog;
pub mod config;
pub mod corpus;
pub mod error;
pub mod export;
pub mod model;
pub mod recommender;
pub mod similarity;
pub mod snapshot;
pub mod tokenizer;
pub mod vectorizer;

pub use config::{EngineConfig, SimilarityStrategy, StopWords};
pub use corpus::Corpus;
pub use error::{EngineError, Result};
pub use model::{DocId, Document, NewDocument, SparseVector, TermId, Vocabulary};
pub use recommender::{build_corpus, recommend, recommend_scored, Recommendation, DEFAULT_K};
pub use similarity::{DenseMatrix, LazyRows, SimilaritySource};
pub use snapshot::{CorpusHandle, Snapshot};
