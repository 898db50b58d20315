//! Maximum-entropy intent classifier and its on-disk format.
//!
//! Pipeline: map tags to class indices, featurize text into TF-IDF vectors,
//! fit a softmax regression, and map the winning class back to its tag.
//!
//! The model file is the 8-byte magic [`MODEL_MAGIC`] followed by a
//! bincode-encoded [`PersistedModel`].

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::ml::intent_classifier::classifier::IntentClassifier;
use crate::ml::intent_classifier::featurizer::{FeaturizerState, TextFeaturizer};
use crate::ml::intent_classifier::labels::LabelEncoder;
use crate::ml::intent_classifier::softmax::SoftmaxRegression;
use crate::ml::intent_classifier::types::{
    ModelMetadata, Prediction, TrainingExample, TrainingParams,
};

/// File signature of a persisted model.
pub const MODEL_MAGIC: &[u8; 8] = b"INTENTBT";

/// Version of [`PersistedModel`]'s layout.
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct PersistedModel {
    format_version: u32,
    metadata: ModelMetadata,
    featurizer: FeaturizerState,
    labels: Vec<String>,
    model: SoftmaxRegression,
}

/// Trained intent classifier.
#[derive(Debug)]
pub struct MaxEntIntentClassifier {
    featurizer: TextFeaturizer,
    labels: LabelEncoder,
    model: SoftmaxRegression,
    metadata: ModelMetadata,
}

impl MaxEntIntentClassifier {
    /// Train a classifier on labeled examples.
    ///
    /// Fails with a training error when there are no examples or fewer than
    /// two distinct labels.
    pub fn train(examples: &[TrainingExample], params: &TrainingParams) -> Result<Self> {
        params.validate()?;
        if examples.is_empty() {
            return Err(BotError::training(
                "no training examples; every intent has an empty patterns list",
            ));
        }

        let labels = LabelEncoder::fit(examples.iter().map(|e| e.label.as_str()));
        if labels.len() < 2 {
            return Err(BotError::training(format!(
                "at least two intents with patterns are required, found {}",
                labels.len()
            )));
        }

        let documents: Vec<String> = examples.iter().map(|e| e.text.clone()).collect();
        let mut featurizer = TextFeaturizer::new(params.word_ngram, params.char_ngram)?;
        featurizer.fit(&documents)?;

        let features = documents
            .iter()
            .map(|doc| featurizer.transform(doc))
            .collect::<Result<Vec<_>>>()?;
        let targets: Vec<usize> = examples
            .iter()
            .filter_map(|e| labels.encode(&e.label))
            .collect();

        info!(
            "Training on {} examples, {} intents, {} features",
            examples.len(),
            labels.len(),
            featurizer.vocabulary_size()
        );

        let mut model = SoftmaxRegression::new(featurizer.vocabulary_size(), labels.len());
        let report = model.fit(&features, &targets, params)?;

        let metadata = ModelMetadata {
            trained_at: chrono::Utc::now(),
            training_examples: examples.len(),
            classes: labels.len(),
            vocabulary_size: featurizer.vocabulary_size(),
            epochs: report.epochs,
            final_loss: report.final_loss,
            catalog_fingerprint: None,
        };

        Ok(Self {
            featurizer,
            labels,
            model,
            metadata,
        })
    }

    /// Record the fingerprint of the catalog this model was trained from.
    pub fn with_catalog_fingerprint(mut self, fingerprint: u32) -> Self {
        self.metadata.catalog_fingerprint = Some(fingerprint);
        self
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Encode the model into its file representation.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let persisted = PersistedModel {
            format_version: FORMAT_VERSION,
            metadata: self.metadata.clone(),
            featurizer: self.featurizer.state().clone(),
            labels: self.labels.labels().to_vec(),
            model: self.model.clone(),
        };

        let mut bytes = MODEL_MAGIC.to_vec();
        bytes.extend(bincode::serialize(&persisted)?);
        Ok(bytes)
    }

    /// Decode a model from its file representation.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let body = bytes
            .strip_prefix(MODEL_MAGIC.as_slice())
            .ok_or_else(|| BotError::persistence("not an intentbot model file"))?;

        let persisted: PersistedModel = bincode::deserialize(body)
            .map_err(|e| BotError::persistence(format!("corrupt model data: {e}")))?;

        if persisted.format_version != FORMAT_VERSION {
            return Err(BotError::persistence(format!(
                "unsupported model format version {} (expected {FORMAT_VERSION})",
                persisted.format_version
            )));
        }

        let featurizer = TextFeaturizer::from_state(persisted.featurizer)?;
        let labels = LabelEncoder::from_labels(persisted.labels);
        let model = persisted.model;

        if !labels.is_consistent() || labels.len() != model.n_classes() {
            return Err(BotError::persistence(format!(
                "model has {} labels for {} classes",
                labels.len(),
                model.n_classes()
            )));
        }
        if featurizer.vocabulary_size() != model.n_features() {
            return Err(BotError::persistence(format!(
                "featurizer has {} terms but model expects {}",
                featurizer.vocabulary_size(),
                model.n_features()
            )));
        }
        model
            .validate()
            .map_err(|e| BotError::persistence(e.to_string()))?;

        Ok(Self {
            featurizer,
            labels,
            model,
            metadata: persisted.metadata,
        })
    }

    /// Write the model to `path`, creating parent directories.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let persistence_error =
            |e: std::io::Error| BotError::persistence(format!("cannot write {}: {e}", path.display()));

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(persistence_error)?;
        }
        fs::write(path, self.to_bytes()?).map_err(persistence_error)?;

        debug!("Model written to {}", path.display());
        Ok(())
    }

    /// Read a model from `path`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| {
            BotError::persistence(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_bytes(&bytes).map_err(|e| match e {
            BotError::Persistence(msg) => {
                BotError::persistence(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }
}

impl IntentClassifier for MaxEntIntentClassifier {
    fn predict(&self, text: &str) -> Result<Prediction> {
        let features = self.featurizer.transform(text)?;
        let (class, confidence) = self.model.predict(&features)?;
        let label = self.labels.decode(class).ok_or_else(|| {
            BotError::inference(format!("class {class} has no label"))
        })?;

        Ok(Prediction {
            label: label.to_string(),
            confidence,
        })
    }

    fn labels(&self) -> &[String] {
        self.labels.labels()
    }

    fn name(&self) -> &str {
        "maxent"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples() -> Vec<TrainingExample> {
        vec![
            TrainingExample::new("hi", "greeting"),
            TrainingExample::new("hello", "greeting"),
            TrainingExample::new("good morning", "greeting"),
            TrainingExample::new("bye", "farewell"),
            TrainingExample::new("goodbye", "farewell"),
            TrainingExample::new("see you later", "farewell"),
            TrainingExample::new("what time is it", "time"),
            TrainingExample::new("tell me the time", "time"),
        ]
    }

    #[test]
    fn test_predicts_training_patterns() {
        let classifier = MaxEntIntentClassifier::train(&examples(), &TrainingParams::default()).unwrap();

        for example in examples() {
            let prediction = classifier.predict(&example.text).unwrap();
            assert_eq!(prediction.label, example.label, "for {:?}", example.text);
        }
        assert_eq!(classifier.labels(), &["greeting", "farewell", "time"]);
        assert_eq!(classifier.name(), "maxent");
    }

    #[test]
    fn test_generalizes_to_close_variants() {
        let classifier = MaxEntIntentClassifier::train(&examples(), &TrainingParams::default()).unwrap();

        assert_eq!(classifier.predict("Hello!").unwrap().label, "greeting");
        assert_eq!(classifier.predict("what's the time").unwrap().label, "time");
    }

    #[test]
    fn test_confidence_is_probability() {
        let classifier = MaxEntIntentClassifier::train(&examples(), &TrainingParams::default()).unwrap();
        let prediction = classifier.predict("goodbye").unwrap();
        assert!(prediction.confidence > 1.0 / 3.0);
        assert!(prediction.confidence <= 1.0);
    }

    #[test]
    fn test_empty_training_set() {
        let err = MaxEntIntentClassifier::train(&[], &TrainingParams::default()).unwrap_err();
        assert!(matches!(err, BotError::Training(_)));
    }

    #[test]
    fn test_single_class_rejected() {
        let examples = vec![
            TrainingExample::new("hi", "greeting"),
            TrainingExample::new("hello", "greeting"),
        ];
        let err = MaxEntIntentClassifier::train(&examples, &TrainingParams::default()).unwrap_err();
        assert!(matches!(err, BotError::Training(_)));
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn test_bytes_roundtrip() {
        let classifier = MaxEntIntentClassifier::train(&examples(), &TrainingParams::default())
            .unwrap()
            .with_catalog_fingerprint(42);

        let restored = MaxEntIntentClassifier::from_bytes(&classifier.to_bytes().unwrap()).unwrap();

        assert_eq!(restored.metadata(), classifier.metadata());
        assert_eq!(restored.metadata().catalog_fingerprint, Some(42));
        assert_eq!(
            restored.predict("see you").unwrap(),
            classifier.predict("see you").unwrap()
        );
    }

    #[test]
    fn test_rejects_foreign_and_truncated_files() {
        let err = MaxEntIntentClassifier::from_bytes(b"PK\x03\x04 not a model").unwrap_err();
        assert!(matches!(err, BotError::Persistence(_)));

        let classifier = MaxEntIntentClassifier::train(&examples(), &TrainingParams::default()).unwrap();
        let bytes = classifier.to_bytes().unwrap();
        let err = MaxEntIntentClassifier::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, BotError::Persistence(_)));
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model").join("model.bin");
        let classifier = MaxEntIntentClassifier::train(&examples(), &TrainingParams::default()).unwrap();

        classifier.save(&path).unwrap();
        let loaded = MaxEntIntentClassifier::load(&path).unwrap();

        assert_eq!(loaded.labels(), classifier.labels());
    }
}
