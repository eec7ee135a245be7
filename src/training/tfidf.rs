//! TF-IDF vectorizer over word n-grams.
//!
//! Tokens are runs of two or more word characters of the lowercased text.
//! Terms are n-grams of consecutive tokens joined by a single space. The
//! vocabulary keeps the `max_features` terms with the highest total count
//! (ties broken alphabetically) and indexes them in alphabetical order.
//! Weights use the smoothed IDF `ln((1 + n) / (1 + df)) + 1` and every row is
//! L2-normalized.

use std::collections::{BTreeMap, HashMap, HashSet};

use ndarray::ArrayView1;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{Error, TrainerConfig};

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\w\w+\b").unwrap());

/// Sparse row with strictly increasing `indices`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SparseVector {
    pub indices: Vec<usize>,
    pub values: Vec<f64>,
}

impl SparseVector {
    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.indices.iter().copied().zip(self.values.iter().copied())
    }

    pub fn dot(&self, dense: ArrayView1<f64>) -> f64 {
        self.iter().map(|(j, v)| dense[j] * v).sum()
    }

    pub fn norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    max_features: usize,
    ngram_range: (usize, usize),
    vocabulary: BTreeMap<String, usize>,
    idf: Vec<f64>,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize, ngram_range: (usize, usize)) -> Self {
        Self {
            max_features,
            ngram_range,
            vocabulary: BTreeMap::new(),
            idf: Vec::new(),
        }
    }

    pub fn from_config(config: &TrainerConfig) -> Self {
        Self::new(config.max_features, config.ngram_range)
    }

    /// Number of terms in the fitted vocabulary.
    pub fn len(&self) -> usize {
        self.idf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idf.is_empty()
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &[f64] {
        &self.idf
    }

    /// Split text into its n-gram terms, in document order.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let tokens: Vec<&str> = TOKEN_PATTERN.find_iter(&lower).map(|m| m.as_str()).collect();

        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n > tokens.len() {
                break;
            }
            terms.extend(tokens.windows(n).map(|w| w.join(" ")));
        }
        terms
    }

    /// Learn vocabulary and IDF weights from `texts`.
    pub fn fit<S: AsRef<str>>(&mut self, texts: &[S]) {
        let mut totals: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for text in texts {
            let terms = self.analyze(text.as_ref());
            let mut seen = HashSet::new();
            for term in terms {
                *totals.entry(term.clone()).or_default() += 1;
                if seen.insert(term.clone()) {
                    *doc_freq.entry(term).or_default() += 1;
                }
            }
        }

        let mut ranked: Vec<(String, usize)> = totals.into_iter().collect();
        ranked.sort_by(|(a_term, a_count), (b_term, b_count)| {
            b_count.cmp(a_count).then_with(|| a_term.cmp(b_term))
        });
        ranked.truncate(self.max_features);

        let mut kept: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        kept.sort();

        let n_docs = texts.len() as f64;
        self.idf = kept
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        self.vocabulary = kept
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term, idx))
            .collect();
    }

    /// Vectorize one text against the fitted vocabulary. Unknown terms are
    /// ignored; a text with no known terms is the empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.analyze(text) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_default() += 1.0;
            }
        }

        let mut row = SparseVector {
            indices: Vec::with_capacity(counts.len()),
            values: Vec::with_capacity(counts.len()),
        };
        for (idx, count) in counts {
            row.indices.push(idx);
            row.values.push(count * self.idf[idx]);
        }

        let norm = row.norm();
        if norm > 0.0 {
            row.values.iter_mut().for_each(|v| *v /= norm);
        }
        row
    }

    pub fn fit_transform<S: AsRef<str>>(&mut self, texts: &[S]) -> Vec<SparseVector> {
        self.fit(texts);
        texts.iter().map(|t| self.transform(t.as_ref())).collect()
    }

    /// Reject a vocabulary that does not line up with its IDF weights.
    pub fn check(&self) -> Result<(), Error> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(Error::Model(format!(
                "vocabulary has {} terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        let mut seen = vec![false; self.idf.len()];
        for (term, &idx) in &self.vocabulary {
            match seen.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => {
                    return Err(Error::Model(format!("duplicate index {idx} for term {term:?}")))
                }
                None => {
                    return Err(Error::Model(format!(
                        "term {term:?} has index {idx}, vocabulary size is {}",
                        self.idf.len()
                    )))
                }
            }
        }
        Ok(())
    }
}
