//! Statistical intent classification.
//!
//! # Architecture
//!
//! - [`build_training_examples`]: expands an intent catalog into labeled rows
//! - [`LabelEncoder`]: maps intent tags to class indices and back
//! - [`TextFeaturizer`]: TF-IDF over word and character n-grams
//! - [`SoftmaxRegression`]: linear multiclass (maximum-entropy) model
//! - [`MaxEntIntentClassifier`]: the full pipeline plus persistence
//! - [`IntentClassifier`]: trait the rest of the bot depends on
//!
//! # Example
//!
//! ```rust
//! use intentbot::ml::intent_classifier::{
//!     IntentClassifier, MaxEntIntentClassifier, TrainingExample, TrainingParams,
//! };
//!
//! # fn main() -> intentbot::error::Result<()> {
//! let examples = vec![
//!     TrainingExample::new("hi", "greeting"),
//!     TrainingExample::new("hello", "greeting"),
//!     TrainingExample::new("bye", "farewell"),
//!     TrainingExample::new("goodbye", "farewell"),
//! ];
//!
//! let classifier = MaxEntIntentClassifier::train(&examples, &TrainingParams::default())?;
//! assert_eq!(classifier.predict("hello")?.label, "greeting");
//! # Ok(())
//! # }
//! ```

mod classifier;
mod dataset;
mod featurizer;
mod labels;
mod maxent;
mod softmax;
mod types;

pub use classifier::IntentClassifier;
pub use dataset::build_training_examples;
pub use featurizer::{FeaturizerState, SparseVector, TextFeaturizer};
pub use labels::LabelEncoder;
pub use maxent::{FORMAT_VERSION, MODEL_MAGIC, MaxEntIntentClassifier};
pub use softmax::{SoftmaxRegression, TrainingReport};
pub use types::{ModelMetadata, Prediction, TrainingExample, TrainingParams};
