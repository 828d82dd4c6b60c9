use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub type TermId = u32;
pub type DocId = u32;

/// A catalog entry before it is assigned an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDocument {
    pub title: String,
    #[serde(alias = "description")]
    pub text: String,
}

impl NewDocument {
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self { title: title.into(), text: text.into() }
    }
}

/// A document inside a built corpus. `id` is its insertion position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocId,
    pub title: String,
    pub text: String,
}

/// Term to column mapping. Terms are indexed in sorted lexical order so the
/// layout is identical across builds of the same corpus.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    terms: Vec<String>,
    idf: Vec<f32>,
}

impl Vocabulary {
    /// `df` maps each term to its document frequency; `num_docs` is N.
    pub(crate) fn from_document_frequencies(df: BTreeMap<String, u32>, num_docs: usize) -> Self {
        let n = num_docs as f32;
        let mut terms = Vec::with_capacity(df.len());
        let mut idf = Vec::with_capacity(df.len());
        for (term, df_t) in df {
            // smoothed: ln((1 + N) / (1 + df)) + 1, always positive
            idf.push(((1.0 + n) / (1.0 + df_t as f32)).ln() + 1.0);
            terms.push(term);
        }
        Self { terms, idf }
    }

    pub fn len(&self) -> usize { self.terms.len() }

    pub fn is_empty(&self) -> bool { self.terms.is_empty() }

    /// Binary search over the sorted term list.
    pub fn index_of(&self, term: &str) -> Option<TermId> {
        self.terms.binary_search_by(|t| t.as_str().cmp(term)).ok().map(|i| i as TermId)
    }

    pub fn term(&self, id: TermId) -> Option<&str> {
        self.terms.get(id as usize).map(String::as_str)
    }

    pub fn idf(&self, id: TermId) -> Option<f32> {
        self.idf.get(id as usize).copied()
    }

    pub fn terms(&self) -> &[String] { &self.terms }
}

/// Sparse TF-IDF vector: (term id, weight) pairs sorted by term id, no zero weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    entries: Vec<(TermId, f32)>,
}

impl SparseVector {
    pub(crate) fn from_sorted(entries: Vec<(TermId, f32)>) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].0 < w[1].0));
        Self { entries }
    }

    pub fn entries(&self) -> &[(TermId, f32)] { &self.entries }

    pub fn nnz(&self) -> usize { self.entries.len() }

    pub fn is_zero(&self) -> bool { self.entries.is_empty() }

    pub fn get(&self, term: TermId) -> f32 {
        match self.entries.binary_search_by_key(&term, |e| e.0) {
            Ok(i) => self.entries[i].1,
            Err(_) => 0.0,
        }
    }

    pub fn norm(&self) -> f32 {
        self.entries.iter().map(|(_, w)| w * w).sum::<f32>().sqrt()
    }

    /// Merge-join dot product. Two zero vectors give 0.
    pub fn dot(&self, other: &SparseVector) -> f32 {
        let (a, b) = (&self.entries, &other.entries);
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0f32;
        while i < a.len() && j < b.len() {
            match a[i].0.cmp(&b[j].0) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a[i].1 * b[j].1;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}
