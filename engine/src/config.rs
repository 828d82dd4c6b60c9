use serde::{Deserialize, Serialize};

/// Which stop-word set the tokenizer filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopWords {
    /// Built-in English list.
    English,
    None,
    Custom(Vec<String>),
}

impl Default for StopWords {
    fn default() -> Self { StopWords::English }
}

/// How pairwise similarities are served after a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityStrategy {
    /// Materialize the full N x N matrix once. O(N^2) memory.
    #[default]
    Dense,
    /// Keep only the document vectors and recompute a row per query.
    Lazy,
}

impl SimilarityStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SimilarityStrategy::Dense => "dense",
            SimilarityStrategy::Lazy => "lazy",
        }
    }
}

impl std::str::FromStr for SimilarityStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dense" => Ok(SimilarityStrategy::Dense),
            "lazy" => Ok(SimilarityStrategy::Lazy),
            other => Err(format!("unknown similarity strategy: {other}")),
        }
    }
}

/// Build-time settings for a corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Tokens shorter than this (in chars) are dropped.
    pub min_term_length: usize,
    pub stop_words: StopWords,
    /// Apply NFKC before lower-casing.
    pub normalize_unicode: bool,
    /// English Snowball stemming after stop-word removal.
    pub stem: bool,
    pub strategy: SimilarityStrategy,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_term_length: 1,
            stop_words: StopWords::English,
            normalize_unicode: true,
            stem: false,
            strategy: SimilarityStrategy::Dense,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_deserializes_with_defaults() {
        let cfg: EngineConfig = serde_json::from_str(r#"{"min_term_length": 2, "strategy": "lazy"}"#).unwrap();
        assert_eq!(cfg.min_term_length, 2);
        assert_eq!(cfg.strategy, SimilarityStrategy::Lazy);
        assert_eq!(cfg.stop_words, StopWords::English);
        assert!(cfg.normalize_unicode);
    }

    #[test]
    fn strategy_parses_case_insensitively() {
        assert_eq!("Dense".parse::<SimilarityStrategy>().unwrap(), SimilarityStrategy::Dense);
        assert!("sparse".parse::<SimilarityStrategy>().is_err());
    }
}
