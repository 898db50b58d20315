//! Common types for intent classification.

use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};

/// One labeled training row: a pattern and the tag of the intent it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Utterance text.
    pub text: String,
    /// Intent tag.
    pub label: String,
}

impl TrainingExample {
    pub fn new<T: Into<String>, L: Into<String>>(text: T, label: L) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// Result of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Predicted intent tag.
    pub label: String,
    /// Softmax probability of the predicted tag.
    pub confidence: f64,
}

/// Hyperparameters for featurization and softmax-regression training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Gradient descent step size.
    pub learning_rate: f64,
    /// L2 regularization strength applied to the weights (not the bias).
    pub l2_penalty: f64,
    /// Maximum number of full passes over the training data.
    pub max_epochs: usize,
    /// Training stops once the loss improves by less than this.
    pub tolerance: f64,
    /// Character n-gram size.
    pub char_ngram: usize,
    /// Largest word n-gram size.
    pub word_ngram: usize,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            learning_rate: 1.0,
            l2_penalty: 1e-4,
            max_epochs: 300,
            tolerance: 1e-6,
            char_ngram: 3,
            word_ngram: 2,
        }
    }
}

impl TrainingParams {
    /// Reject settings the trainer cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(BotError::configuration(format!(
                "learning_rate must be a positive number, got {}",
                self.learning_rate
            )));
        }
        if !(self.l2_penalty >= 0.0 && self.l2_penalty.is_finite()) {
            return Err(BotError::configuration(format!(
                "l2_penalty must be non-negative, got {}",
                self.l2_penalty
            )));
        }
        if self.max_epochs == 0 {
            return Err(BotError::configuration("max_epochs must be at least 1"));
        }
        if self.char_ngram == 0 || self.word_ngram == 0 {
            return Err(BotError::configuration(
                "char_ngram and word_ngram must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Information recorded alongside a trained model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Training timestamp.
    pub trained_at: chrono::DateTime<chrono::Utc>,
    /// Number of training examples used.
    pub training_examples: usize,
    /// Number of distinct intent tags.
    pub classes: usize,
    /// Number of features the featurizer produces.
    pub vocabulary_size: usize,
    /// Epochs run before convergence or the epoch limit.
    pub epochs: usize,
    /// Regularized cross-entropy after the last epoch.
    pub final_loss: f64,
    /// Fingerprint of the catalog the model was trained from, if known.
    pub catalog_fingerprint: Option<u32>,
}
