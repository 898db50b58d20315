//! Mapping between intent tags and class indices.

use std::collections::HashMap;

/// Bidirectional tag ↔ class index mapping, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelEncoder {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelEncoder {
    /// Assign indices to labels in the order they first appear.
    pub fn fit<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut encoder = Self::default();
        for label in labels {
            if !encoder.index.contains_key(label) {
                encoder.index.insert(label.to_string(), encoder.labels.len());
                encoder.labels.push(label.to_string());
            }
        }
        encoder
    }

    /// Rebuild an encoder from its ordered label list.
    pub fn from_labels(labels: Vec<String>) -> Self {
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        Self { labels, index }
    }

    pub fn encode(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn decode(&self, class: usize) -> Option<&str> {
        self.labels.get(class).map(String::as_str)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Whether every label is distinct, which `from_labels` does not check.
    pub fn is_consistent(&self) -> bool {
        self.index.len() == self.labels.len()
    }
}
