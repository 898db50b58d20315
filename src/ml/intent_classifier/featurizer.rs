//! Text featurizer: word and character n-grams weighted by TF-IDF.
//!
//! Each utterance is analyzed twice, once into lowercased words and word
//! n-grams and once into framed character n-grams. Terms are prefixed by
//! their kind so a word "bye" and a trigram "bye" stay distinct features.
//! The resulting term counts are weighted by smoothed IDF and L2 normalized.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::{Analyzer, CharNgramAnalyzer, WordAnalyzer};
use crate::error::{BotError, Result};

const WORD_PREFIX: &str = "w:";
const CHAR_PREFIX: &str = "c:";

/// Sparse feature vector with ascending, unique indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    /// Build from (index, value) pairs; duplicate indices are summed.
    pub fn from_pairs(mut pairs: Vec<(usize, f64)>) -> Self {
        pairs.sort_unstable_by_key(|(index, _)| *index);
        let mut entries: Vec<(usize, f64)> = Vec::with_capacity(pairs.len());
        for (index, value) in pairs {
            match entries.last_mut() {
                Some((last, sum)) if *last == index => *sum += value,
                _ => entries.push((index, value)),
            }
        }
        Self { entries }
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Largest index present, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.entries.last().map(|(index, _)| *index)
    }

    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.entries
            .iter()
            .map(|&(index, value)| dense.get(index).copied().unwrap_or(0.0) * value)
            .sum()
    }

    pub fn norm(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v * v).sum::<f64>().sqrt()
    }

    fn normalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            for (_, value) in &mut self.entries {
                *value /= norm;
            }
        }
    }
}

/// Serializable part of a fitted featurizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturizerState {
    /// Largest word n-gram size.
    pub word_ngram: usize,
    /// Character n-gram size.
    pub char_ngram: usize,
    /// Term -> feature index.
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index.
    pub idf: Vec<f64>,
    /// Number of documents seen while fitting.
    pub n_documents: usize,
}

/// TF-IDF featurizer over word and character n-grams.
pub struct TextFeaturizer {
    state: FeaturizerState,
    words: WordAnalyzer,
    chars: CharNgramAnalyzer,
}

impl std::fmt::Debug for TextFeaturizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextFeaturizer")
            .field("vocabulary_size", &self.state.vocabulary.len())
            .field("n_documents", &self.state.n_documents)
            .field("word_ngram", &self.state.word_ngram)
            .field("char_ngram", &self.state.char_ngram)
            .finish()
    }
}

impl TextFeaturizer {
    /// Create an unfitted featurizer.
    pub fn new(word_ngram: usize, char_ngram: usize) -> Result<Self> {
        Ok(Self {
            words: WordAnalyzer::new(word_ngram)?,
            chars: CharNgramAnalyzer::new(char_ngram)?,
            state: FeaturizerState {
                word_ngram,
                char_ngram,
                vocabulary: HashMap::new(),
                idf: Vec::new(),
                n_documents: 0,
            },
        })
    }

    /// Restore a fitted featurizer from its persisted state.
    pub fn from_state(state: FeaturizerState) -> Result<Self> {
        if state.idf.len() != state.vocabulary.len() {
            return Err(BotError::persistence(format!(
                "featurizer has {} terms but {} idf weights",
                state.vocabulary.len(),
                state.idf.len()
            )));
        }
        if state.vocabulary.values().any(|&index| index >= state.idf.len()) {
            return Err(BotError::persistence("featurizer term index out of range"));
        }

        let mut featurizer = Self::new(state.word_ngram, state.char_ngram)
            .map_err(|e| BotError::persistence(format!("invalid featurizer settings: {e}")))?;
        featurizer.state = state;
        Ok(featurizer)
    }

    /// Fit the vocabulary and IDF weights on training documents.
    pub fn fit(&mut self, documents: &[String]) -> Result<()> {
        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut document_frequency: Vec<usize> = Vec::new();

        for doc in documents {
            let mut seen = HashSet::new();
            for term in self.terms(doc)? {
                if !seen.insert(term.clone()) {
                    continue;
                }
                match vocabulary.get(&term) {
                    Some(&index) => document_frequency[index] += 1,
                    None => {
                        vocabulary.insert(term, document_frequency.len());
                        document_frequency.push(1);
                    }
                }
            }
        }

        // IDF = ln((N + 1) / (df + 1)) + 1
        let n = documents.len() as f64;
        let idf = document_frequency
            .iter()
            .map(|&df| ((n + 1.0) / (df as f64 + 1.0)).ln() + 1.0)
            .collect();

        self.state.vocabulary = vocabulary;
        self.state.idf = idf;
        self.state.n_documents = documents.len();

        Ok(())
    }

    /// Transform a document into an L2-normalized TF-IDF vector.
    ///
    /// Terms outside the fitted vocabulary are ignored; a document with no
    /// known terms yields an empty vector.
    pub fn transform(&self, document: &str) -> Result<SparseVector> {
        let pairs = self
            .terms(document)?
            .into_iter()
            .filter_map(|term| {
                self.state
                    .vocabulary
                    .get(&term)
                    .map(|&index| (index, self.state.idf[index]))
            })
            .collect();

        let mut vector = SparseVector::from_pairs(pairs);
        vector.normalize();
        Ok(vector)
    }

    fn terms(&self, text: &str) -> Result<Vec<String>> {
        let words = self
            .words
            .analyze(text)?
            .map(|token| format!("{WORD_PREFIX}{}", token.text));
        let chars = self
            .chars
            .analyze(text)?
            .map(|token| format!("{CHAR_PREFIX}{}", token.text));
        Ok(words.chain(chars).collect())
    }

    /// Get the size of the vocabulary.
    pub fn vocabulary_size(&self) -> usize {
        self.state.vocabulary.len()
    }

    pub fn state(&self) -> &FeaturizerState {
        &self.state
    }
}
