//! Intent classifier trait definition.

use crate::error::Result;
use crate::ml::intent_classifier::types::Prediction;

/// Intent classifier trait.
///
/// Implementations are immutable once built, so a classifier can be shared
/// behind an `Arc` for the whole session.
pub trait IntentClassifier: Send + Sync {
    /// Predict the intent tag for a given utterance.
    ///
    /// # Arguments
    /// * `text` - The utterance to classify
    ///
    /// # Returns
    /// The winning tag and its probability, or an inference error when the
    /// model cannot make predictions.
    fn predict(&self, text: &str) -> Result<Prediction>;

    /// Tags this classifier can predict, in class order.
    fn labels(&self) -> &[String];

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &str;
}
