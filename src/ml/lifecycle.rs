//! Train-or-load gate for the intent classifier.
//!
//! A model file that already exists is reused as-is. Otherwise the catalog is
//! expanded into training rows, a new classifier is trained, and the result
//! is written to the model path before it is returned.
//!
//! A reused model is not checked against the current catalog beyond a
//! fingerprint comparison that only warns; rerun with a forced retrain after
//! editing the intents.

use std::path::Path;

use log::{info, warn};

use crate::error::Result;
use crate::intent::IntentCatalog;
use crate::ml::intent_classifier::{
    MaxEntIntentClassifier, TrainingParams, build_training_examples,
};

/// Where the classifier returned by [`ModelLifecycle::obtain`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSource {
    /// Deserialized from an existing model file.
    Loaded,
    /// Trained from the catalog and written to the model file.
    Trained,
}

/// Decides between loading a persisted classifier and training a new one.
#[derive(Debug, Clone, Default)]
pub struct ModelLifecycle {
    params: TrainingParams,
    force_retrain: bool,
}

impl ModelLifecycle {
    pub fn new(params: TrainingParams) -> Self {
        Self {
            params,
            force_retrain: false,
        }
    }

    /// Ignore any existing model file and train a fresh one.
    pub fn force_retrain(mut self, force: bool) -> Self {
        self.force_retrain = force;
        self
    }

    /// Load the classifier at `model_path`, or train and persist one.
    pub fn obtain<P: AsRef<Path>>(
        &self,
        catalog: &IntentCatalog,
        model_path: P,
    ) -> Result<(MaxEntIntentClassifier, ModelSource)> {
        let model_path = model_path.as_ref();

        if model_path.exists() && !self.force_retrain {
            let classifier = MaxEntIntentClassifier::load(model_path)?;
            info!("Model loaded from {}", model_path.display());

            match classifier.metadata().catalog_fingerprint {
                Some(fingerprint) if fingerprint != catalog.fingerprint() => warn!(
                    "Model at {} was trained on a different intent catalog; \
                     rerun with --retrain to pick up the changes",
                    model_path.display()
                ),
                None => warn!(
                    "Model at {} does not record its training catalog",
                    model_path.display()
                ),
                _ => {}
            }

            return Ok((classifier, ModelSource::Loaded));
        }

        let classifier = self.train(catalog)?;
        classifier.save(model_path)?;
        info!("Model trained and saved to {}", model_path.display());

        Ok((classifier, ModelSource::Trained))
    }

    /// Train a classifier from the catalog without touching the filesystem.
    pub fn train(&self, catalog: &IntentCatalog) -> Result<MaxEntIntentClassifier> {
        let examples = build_training_examples(catalog);
        let classifier = MaxEntIntentClassifier::train(&examples, &self.params)?
            .with_catalog_fingerprint(catalog.fingerprint());
        Ok(classifier)
    }
}
