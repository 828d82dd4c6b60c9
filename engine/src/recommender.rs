use serde::Serialize;
use std::cmp::Ordering;

use crate::corpus::Corpus;
use crate::error::{EngineError, Result};
use crate::model::{DocId, NewDocument};
use crate::config::EngineConfig;

/// Default number of recommendations.
pub const DEFAULT_K: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: DocId,
    pub title: String,
    pub score: f32,
}

/// Ranks a similarity row: drops `query`, sorts by descending score with
/// ascending id as the tie-break, keeps the first `k`.
pub fn rank_row(row: &[f32], query: DocId, k: usize) -> Vec<(DocId, f32)> {
    let mut scored: Vec<(DocId, f32)> = row
        .iter()
        .enumerate()
        .filter(|(j, _)| *j as DocId != query)
        .map(|(j, s)| (j as DocId, *s))
        .collect();
    scored.sort_by(|a, b| match b.1.total_cmp(&a.1) {
        Ordering::Equal => a.0.cmp(&b.0),
        ord => ord,
    });
    scored.truncate(k);
    scored
}

/// Builds a corpus from titled documents. Fails on an empty list or duplicate titles.
pub fn build_corpus(documents: Vec<NewDocument>, config: &EngineConfig) -> Result<Corpus> {
    Corpus::build(documents, config)
}

/// Top-`k` titles most similar to `title`, excluding `title` itself.
///
/// `k` is signed because it usually arrives from an untyped request; a
/// negative value is rejected rather than clamped.
pub fn recommend(corpus: &Corpus, title: &str, k: i64) -> Result<Vec<String>> {
    let k = checked_k(k)?;
    corpus.recommend(title, k)
}

/// Same as [`recommend`], keeping ids and scores.
pub fn recommend_scored(corpus: &Corpus, title: &str, k: i64) -> Result<Vec<Recommendation>> {
    let k = checked_k(k)?;
    corpus.recommend_scored(title, k)
}

pub(crate) fn checked_k(k: i64) -> Result<usize> {
    usize::try_from(k).map_err(|_| EngineError::InvalidArgument(format!("k must be non-negative, got {k}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ties_break_by_ascending_id() {
        let row = [1.0, 0.5, 0.2, 0.5, 0.5];
        let ranked = rank_row(&row, 0, 3);
        assert_eq!(ranked.iter().map(|r| r.0).collect::<Vec<_>>(), vec![1, 3, 4]);
    }

    #[test]
    fn short_rows_return_what_is_available() {
        assert_eq!(rank_row(&[1.0, 0.3], 0, 5), vec![(1, 0.3)]);
        assert!(rank_row(&[1.0], 0, 3).is_empty());
        assert!(rank_row(&[1.0, 0.3], 0, 0).is_empty());
    }

    #[test]
    fn negative_k_is_invalid() {
        assert!(matches!(checked_k(-1), Err(EngineError::InvalidArgument(_))));
        assert_eq!(checked_k(4).unwrap(), 4);
    }
}
