//! Training data preparation.

use crate::intent::IntentCatalog;
use crate::ml::intent_classifier::types::TrainingExample;

/// Expand a catalog into one training row per (intent, pattern) pair.
///
/// Rows follow catalog order, then pattern order. Intents without patterns
/// contribute nothing.
pub fn build_training_examples(catalog: &IntentCatalog) -> Vec<TrainingExample> {
    catalog
        .iter()
        .flat_map(|intent| {
            intent
                .patterns
                .iter()
                .map(move |pattern| TrainingExample::new(pattern.as_str(), intent.tag.as_str()))
        })
        .collect()
}
