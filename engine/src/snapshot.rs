use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::EngineConfig;
use crate::corpus::Corpus;
use crate::error::Result;
use crate::model::NewDocument;

/// A published corpus and its generation number.
#[derive(Debug)]
pub struct Snapshot {
    pub generation: u64,
    pub corpus: Corpus,
}

/// Holds the live snapshot. Readers clone the `Arc` and query without the lock;
/// rebuilds construct a new corpus off to the side and swap the pointer.
#[derive(Debug)]
pub struct CorpusHandle {
    current: RwLock<Arc<Snapshot>>,
}

impl CorpusHandle {
    pub fn new(corpus: Corpus) -> Self {
        Self { current: RwLock::new(Arc::new(Snapshot { generation: 1, corpus })) }
    }

    pub fn build(documents: Vec<NewDocument>, config: &EngineConfig) -> Result<Self> {
        Ok(Self::new(Corpus::build(documents, config)?))
    }

    pub fn snapshot(&self) -> Arc<Snapshot> { self.current.read().clone() }

    pub fn generation(&self) -> u64 { self.current.read().generation }

    /// Publishes `corpus` and returns the new snapshot.
    pub fn replace(&self, corpus: Corpus) -> Arc<Snapshot> {
        let mut guard = self.current.write();
        let next = Arc::new(Snapshot { generation: guard.generation + 1, corpus });
        *guard = next.clone();
        tracing::info!(generation = next.generation, num_docs = next.corpus.len(), "corpus snapshot published");
        next
    }

    /// Builds first, then swaps. On error the live snapshot is untouched.
    pub fn rebuild(&self, documents: Vec<NewDocument>, config: &EngineConfig) -> Result<Arc<Snapshot>> {
        let corpus = Corpus::build(documents, config)?;
        Ok(self.replace(corpus))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docs(titles: &[&str]) -> Vec<NewDocument> {
        titles.iter().map(|t| NewDocument::new(*t, format!("{t} story"))).collect()
    }

    #[test]
    fn failed_rebuild_keeps_live_snapshot() {
        let handle = CorpusHandle::build(docs(&["a", "b"]), &EngineConfig::default()).unwrap();
        let before = handle.snapshot();
        assert!(handle.rebuild(vec![], &EngineConfig::default()).is_err());
        let after = handle.snapshot();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(after.generation, 1);
    }

    #[test]
    fn old_readers_keep_their_snapshot() {
        let handle = CorpusHandle::build(docs(&["a", "b"]), &EngineConfig::default()).unwrap();
        let old = handle.snapshot();
        handle.rebuild(docs(&["c", "d", "e"]), &EngineConfig::default()).unwrap();
        assert_eq!(old.corpus.len(), 2);
        assert_eq!(handle.snapshot().corpus.len(), 3);
        assert_eq!(handle.generation(), 2);
    }
}
