//! Machine learning for intentbot: the intent classifier and the lifecycle
//! that trains or reloads it.

pub mod intent_classifier;
pub mod lifecycle;

pub use intent_classifier::*;
pub use lifecycle::{ModelLifecycle, ModelSource};
