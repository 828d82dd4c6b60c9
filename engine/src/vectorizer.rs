//! Corpus to TF-IDF vectors.
//!
//! Raw term counts are weighted by smoothed IDF and each document vector is
//! L2-normalized, so cosine similarity between two documents is a plain dot
//! product. Documents with no surviving terms keep a zero vector.

use std::collections::{BTreeMap, HashMap};

use crate::model::{Document, SparseVector, TermId, Vocabulary};
use crate::tokenizer::Tokenizer;

pub struct Vectorizer<'a> {
    tokenizer: &'a Tokenizer,
}

impl<'a> Vectorizer<'a> {
    pub fn new(tokenizer: &'a Tokenizer) -> Self { Self { tokenizer } }

    pub fn build(&self, documents: &[Document]) -> (Vocabulary, Vec<SparseVector>) {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| self.tokenizer.tokenize(&d.text)).collect();

        // Raw term counts per document, and document frequency per term.
        let mut df: BTreeMap<String, u32> = BTreeMap::new();
        let mut counts: Vec<HashMap<&str, u32>> = Vec::with_capacity(tokenized.len());
        for tokens in &tokenized {
            let mut tf: HashMap<&str, u32> = HashMap::new();
            for t in tokens {
                *tf.entry(t.as_str()).or_insert(0) += 1;
            }
            for term in tf.keys() {
                *df.entry((*term).to_string()).or_insert(0) += 1;
            }
            counts.push(tf);
        }

        let vocabulary = Vocabulary::from_document_frequencies(df, documents.len());

        let mut vectors = Vec::with_capacity(counts.len());
        for (doc, tf) in documents.iter().zip(counts) {
            let mut entries: Vec<(TermId, f32)> = tf
                .into_iter()
                .filter_map(|(term, count)| {
                    let tid = vocabulary.index_of(term)?;
                    let idf = vocabulary.idf(tid)?;
                    Some((tid, count as f32 * idf))
                })
                .collect();
            entries.sort_by_key(|e| e.0);
            let norm = entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt();
            if norm > 0.0 {
                for (_, w) in entries.iter_mut() { *w /= norm; }
            } else {
                tracing::debug!(doc_id = doc.id, title = %doc.title, "document has no extractable terms");
            }
            vectors.push(SparseVector::from_sorted(entries));
        }
        (vocabulary, vectors)
    }
}
