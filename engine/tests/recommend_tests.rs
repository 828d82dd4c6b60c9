use engine::catalog::sample_catalog;
use engine::{
    build_corpus, recommend, Corpus, CorpusHandle, EngineConfig, EngineError, NewDocument, SimilaritySource,
    SimilarityStrategy,
};
use std::sync::Arc;
use std::thread;

const EPS: f32 = 1e-5;

fn corpus_of(docs: &[(&str, &str)]) -> Corpus {
    let docs = docs.iter().map(|(t, d)| NewDocument::new(*t, *d)).collect();
    build_corpus(docs, &EngineConfig::default()).unwrap()
}

fn overlapping() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Heist", "A crew plans a heist in a bank vault."),
        ("Vault", "Thieves crack a bank vault during a storm."),
        ("Storm", "A storm strands sailors at sea."),
        ("Empty", "... !!! the of"),
        ("Sea", "Sailors lost at sea find an island."),
    ]
}

#[test]
fn sample_catalog_round_trip() {
    let corpus = build_corpus(sample_catalog(), &EngineConfig::default()).unwrap();
    let recs = recommend(&corpus, "Inception", 3).unwrap();
    assert_eq!(recs.len(), 3);
    assert!(!recs.contains(&"Inception".to_string()));
    // no shared terms with any other description, so every score ties at 0
    assert_eq!(recs, vec!["Interstellar", "The Matrix", "The Dark Knight"]);
}

#[test]
fn ranking_follows_shared_terms() {
    let corpus = corpus_of(&overlapping());
    let recs = corpus.recommend_scored("Heist", 4).unwrap();
    assert_eq!(recs[0].title, "Vault");
    assert!(recs[0].score > recs[1].score);
    for w in recs.windows(2) {
        assert!(w[0].score >= w[1].score);
        if w[0].score == w[1].score {
            assert!(w[0].id < w[1].id);
        }
    }
}

#[test]
fn building_twice_is_deterministic() {
    let a = corpus_of(&overlapping());
    let b = corpus_of(&overlapping());
    assert_eq!(a.vocabulary(), b.vocabulary());
    assert_eq!(a.vectors(), b.vectors());
    let (sa, sb) = (a.similarity(), b.similarity());
    for i in 0..a.len() as u32 {
        assert_eq!(sa.row(i), sb.row(i));
    }
}

#[test]
fn matrix_is_symmetric_with_unit_diagonal() {
    let corpus = corpus_of(&overlapping());
    let sim = corpus.similarity();
    let n = corpus.len() as u32;
    for i in 0..n {
        for j in 0..n {
            assert_eq!(sim.score(i, j), sim.score(j, i));
            assert!((0.0..=1.0 + EPS).contains(&sim.score(i, j)));
        }
    }
    for i in [0, 1, 2, 4] {
        assert!((sim.score(i, i) - 1.0).abs() < EPS);
    }
}

#[test]
fn zero_vector_document_is_similar_to_nothing() {
    let corpus = corpus_of(&overlapping());
    let empty = corpus.id_of("Empty").unwrap();
    assert!(corpus.vectors()[empty as usize].is_zero());
    let sim = corpus.similarity();
    assert_eq!(sim.score(empty, empty), 0.0);
    for j in 0..corpus.len() as u32 {
        assert_eq!(sim.score(empty, j), 0.0);
    }
    // its own query still succeeds; every candidate ties at 0 so order is by id
    let recs = corpus.recommend("Empty", 10).unwrap();
    assert_eq!(recs, vec!["Heist", "Vault", "Storm", "Sea"]);
}

#[test]
fn output_is_bounded_and_excludes_query() {
    let corpus = corpus_of(&overlapping());
    for doc in corpus.documents() {
        for k in 0..8 {
            let recs = recommend(&corpus, &doc.title, k).unwrap();
            assert!(recs.len() <= k as usize);
            assert!(recs.len() <= corpus.len() - 1);
            assert!(!recs.contains(&doc.title));
        }
    }
    let single = corpus_of(&[("Solo", "one lonely film")]);
    assert!(recommend(&single, "Solo", 3).unwrap().is_empty());
}

#[test]
fn lazy_strategy_matches_dense() {
    let docs: Vec<NewDocument> = overlapping().iter().map(|(t, d)| NewDocument::new(*t, *d)).collect();
    let dense = build_corpus(docs.clone(), &EngineConfig::default()).unwrap();
    let lazy_cfg = EngineConfig { strategy: SimilarityStrategy::Lazy, ..EngineConfig::default() };
    let lazy = build_corpus(docs, &lazy_cfg).unwrap();
    for doc in dense.documents() {
        assert_eq!(dense.recommend_scored(&doc.title, 4).unwrap(), lazy.recommend_scored(&doc.title, 4).unwrap());
    }
}

#[test]
fn unknown_title_is_not_found() {
    let corpus = build_corpus(sample_catalog(), &EngineConfig::default()).unwrap();
    assert!(matches!(recommend(&corpus, "Nonexistent Movie", 3), Err(EngineError::NotFound(_))));
    // lookup is case-sensitive
    assert!(matches!(recommend(&corpus, "inception", 3), Err(EngineError::NotFound(_))));
}

#[test]
fn negative_k_is_invalid_argument() {
    let corpus = build_corpus(sample_catalog(), &EngineConfig::default()).unwrap();
    assert!(matches!(recommend(&corpus, "Inception", -1), Err(EngineError::InvalidArgument(_))));
}

#[test]
fn empty_corpus_is_rejected() {
    assert!(matches!(build_corpus(vec![], &EngineConfig::default()), Err(EngineError::InvalidCorpus(_))));
}

#[test]
fn duplicate_titles_are_rejected() {
    let docs = vec![NewDocument::new("A", "x"), NewDocument::new("A", "y")];
    assert!(matches!(build_corpus(docs, &EngineConfig::default()), Err(EngineError::InvalidCorpus(_))));
}

#[test]
fn concurrent_readers_see_whole_snapshots() {
    let handle = Arc::new(CorpusHandle::build(sample_catalog(), &EngineConfig::default()).unwrap());
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let handle = handle.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let snap = handle.snapshot();
                    let recs = snap.corpus.recommend("Inception", 3).unwrap();
                    assert_eq!(recs.len(), 3);
                }
            })
        })
        .collect();
    let mut bigger = sample_catalog();
    bigger.push(NewDocument::new("Dreamscape", "A psychic enters dreams to steal secrets."));
    handle.rebuild(bigger, &EngineConfig::default()).unwrap();
    for r in readers {
        r.join().unwrap();
    }
    let recs = handle.snapshot().corpus.recommend("Inception", 1).unwrap();
    assert_eq!(recs, vec!["Dreamscape"]);
}
