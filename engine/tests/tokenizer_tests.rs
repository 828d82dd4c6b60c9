use engine::tokenizer::Tokenizer;
use engine::{EngineConfig, StopWords};

#[test]
fn it_lowercases_and_splits_on_non_alphanumerics() {
    let words = Tokenizer::default().tokenize("Batman faces the JOKER, a criminal-mastermind.");
    assert_eq!(words, vec!["batman", "faces", "joker", "criminal", "mastermind"]);
}

#[test]
fn it_filters_stopwords() {
    let words = Tokenizer::default().tokenize("The quick brown fox and the lazy dog");
    assert!(!words.contains(&"the".to_string()));
    assert!(!words.contains(&"and".to_string()));
    assert!(words.contains(&"fox".to_string()));
}

#[test]
fn it_honours_custom_stop_words_and_min_length() {
    let cfg = EngineConfig {
        stop_words: StopWords::Custom(vec!["Fox".into()]),
        min_term_length: 4,
        ..EngineConfig::default()
    };
    let words = Tokenizer::new(&cfg).tokenize("The quick brown fox jumps");
    assert_eq!(words, vec!["quick", "brown", "jumps"]);
}

#[test]
fn it_keeps_stop_words_when_disabled() {
    let cfg = EngineConfig { stop_words: StopWords::None, ..EngineConfig::default() };
    let words = Tokenizer::new(&cfg).tokenize("to be or not");
    assert_eq!(words, vec!["to", "be", "or", "not"]);
}

#[test]
fn it_normalizes_unicode_compatibility_forms() {
    // fullwidth letters fold to ASCII under NFKC
    let words = Tokenizer::default().tokenize("ＭＡＴＲＩＸ café");
    assert_eq!(words, vec!["matrix", "café"]);
}
