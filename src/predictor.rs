//! Prediction service: single-utterance inference over a trained classifier.

use std::sync::Arc;

use log::debug;

use crate::error::Result;
use crate::ml::intent_classifier::{IntentClassifier, Prediction};

/// Wraps a trained classifier behind a `predict(text) -> label` call.
#[derive(Clone)]
pub struct PredictionService {
    classifier: Arc<dyn IntentClassifier>,
}

impl std::fmt::Debug for PredictionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PredictionService")
            .field("classifier", &self.classifier.name())
            .field("labels", &self.classifier.labels())
            .finish()
    }
}

impl PredictionService {
    pub fn new(classifier: Arc<dyn IntentClassifier>) -> Self {
        Self { classifier }
    }

    /// Predict the intent tag for `text`.
    pub fn predict(&self, text: &str) -> Result<String> {
        Ok(self.predict_scored(text)?.label)
    }

    /// Predict the intent tag for `text` along with its probability.
    pub fn predict_scored(&self, text: &str) -> Result<Prediction> {
        let prediction = self.classifier.predict(text)?;
        debug!(
            "Classified {:?} as '{}' ({:.3})",
            text, prediction.label, prediction.confidence
        );
        Ok(prediction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BotError;
    use crate::ml::intent_classifier::{MaxEntIntentClassifier, TrainingExample, TrainingParams};

    struct Uninitialized;

    impl IntentClassifier for Uninitialized {
        fn predict(&self, _text: &str) -> Result<Prediction> {
            Err(BotError::inference("model has no classes"))
        }

        fn labels(&self) -> &[String] {
            &[]
        }

        fn name(&self) -> &str {
            "uninitialized"
        }
    }

    #[test]
    fn test_predict_is_deterministic() {
        let examples = vec![
            TrainingExample::new("hi", "greeting"),
            TrainingExample::new("hello", "greeting"),
            TrainingExample::new("bye", "farewell"),
            TrainingExample::new("goodbye", "farewell"),
        ];
        let classifier = MaxEntIntentClassifier::train(&examples, &TrainingParams::default()).unwrap();
        let service = PredictionService::new(Arc::new(classifier));

        let first = service.predict_scored("hello there").unwrap();
        for _ in 0..5 {
            assert_eq!(service.predict_scored("hello there").unwrap(), first);
        }
        assert_eq!(service.predict("hello").unwrap(), "greeting");
    }

    #[test]
    fn test_uninitialized_model_reports_inference_error() {
        let service = PredictionService::new(Arc::new(Uninitialized));

        let err = service.predict("anything").unwrap_err();
        assert!(matches!(err, BotError::Inference(_)));
    }
}
