//! Multinomial logistic (softmax) regression, the maximum-entropy classifier.
//!
//! Training is full-batch gradient descent on the mean cross-entropy plus an
//! L2 penalty on the weights. Weights start at zero and examples are visited
//! in order, so training the same data twice gives the same model.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::{BotError, Result};
use crate::ml::intent_classifier::featurizer::SparseVector;
use crate::ml::intent_classifier::types::TrainingParams;

/// Summary of a training run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingReport {
    /// Epochs actually run.
    pub epochs: usize,
    /// Loss after the last epoch.
    pub final_loss: f64,
    /// Whether the loss change dropped below the tolerance.
    pub converged: bool,
}

/// Linear multiclass model: one weight row and one bias per class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftmaxRegression {
    n_features: usize,
    n_classes: usize,
    /// Row-major `n_classes x n_features` weight matrix.
    weights: Vec<f64>,
    bias: Vec<f64>,
}

impl SoftmaxRegression {
    /// Create a zero-initialized model.
    pub fn new(n_features: usize, n_classes: usize) -> Self {
        Self {
            n_features,
            n_classes,
            weights: vec![0.0; n_features * n_classes],
            bias: vec![0.0; n_classes],
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Check that the model can make predictions.
    pub fn validate(&self) -> Result<()> {
        if self.n_classes == 0 {
            return Err(BotError::inference("model has no classes"));
        }
        if self.weights.len() != self.n_features * self.n_classes
            || self.bias.len() != self.n_classes
        {
            return Err(BotError::inference(format!(
                "weight shape does not match {} classes x {} features",
                self.n_classes, self.n_features
            )));
        }
        Ok(())
    }

    fn row(&self, class: usize) -> &[f64] {
        &self.weights[class * self.n_features..(class + 1) * self.n_features]
    }

    fn scores(&self, x: &SparseVector) -> Vec<f64> {
        (0..self.n_classes)
            .map(|class| x.dot(self.row(class)) + self.bias[class])
            .collect()
    }

    /// Class probabilities for one feature vector.
    pub fn predict_proba(&self, x: &SparseVector) -> Result<Vec<f64>> {
        self.validate()?;
        if let Some(index) = x.max_index() {
            if index >= self.n_features {
                return Err(BotError::inference(format!(
                    "feature index {index} outside model with {} features",
                    self.n_features
                )));
            }
        }

        let mut scores = self.scores(x);
        softmax_in_place(&mut scores);
        Ok(scores)
    }

    /// Most probable class and its probability. Ties go to the lower index.
    pub fn predict(&self, x: &SparseVector) -> Result<(usize, f64)> {
        let probabilities = self.predict_proba(x)?;
        let mut best = (0, f64::NEG_INFINITY);
        for (class, &p) in probabilities.iter().enumerate() {
            if p > best.1 {
                best = (class, p);
            }
        }
        Ok(best)
    }

    /// Fit the model on encoded examples.
    pub fn fit(
        &mut self,
        features: &[SparseVector],
        labels: &[usize],
        params: &TrainingParams,
    ) -> Result<TrainingReport> {
        if features.len() != labels.len() {
            return Err(BotError::training(format!(
                "{} feature vectors for {} labels",
                features.len(),
                labels.len()
            )));
        }
        if features.is_empty() {
            return Err(BotError::training("no training examples"));
        }
        if let Some(&label) = labels.iter().find(|&&label| label >= self.n_classes) {
            return Err(BotError::training(format!(
                "label index {label} outside {} classes",
                self.n_classes
            )));
        }
        if features
            .iter()
            .filter_map(SparseVector::max_index)
            .any(|index| index >= self.n_features)
        {
            return Err(BotError::training("feature index outside model dimensions"));
        }

        let n = features.len() as f64;
        let mut weight_grad = vec![0.0; self.weights.len()];
        let mut bias_grad = vec![0.0; self.n_classes];
        let mut previous_loss = f64::INFINITY;
        let mut report = TrainingReport {
            epochs: 0,
            final_loss: f64::INFINITY,
            converged: false,
        };

        for epoch in 1..=params.max_epochs {
            weight_grad.iter_mut().for_each(|g| *g = 0.0);
            bias_grad.iter_mut().for_each(|g| *g = 0.0);
            let mut loss = 0.0;

            for (x, &label) in features.iter().zip(labels) {
                let mut probabilities = self.scores(x);
                softmax_in_place(&mut probabilities);
                loss -= probabilities[label].max(f64::MIN_POSITIVE).ln();

                for (class, p) in probabilities.iter().enumerate() {
                    let error = p - if class == label { 1.0 } else { 0.0 };
                    bias_grad[class] += error;
                    let offset = class * self.n_features;
                    for (index, value) in x.iter() {
                        weight_grad[offset + index] += error * value;
                    }
                }
            }

            let penalty: f64 = self.weights.iter().map(|w| w * w).sum();
            loss = loss / n + 0.5 * params.l2_penalty * penalty;

            for (w, g) in self.weights.iter_mut().zip(&weight_grad) {
                *w -= params.learning_rate * (g / n + params.l2_penalty * *w);
            }
            for (b, g) in self.bias.iter_mut().zip(&bias_grad) {
                *b -= params.learning_rate * g / n;
            }

            report.epochs = epoch;
            report.final_loss = loss;
            if (previous_loss - loss).abs() < params.tolerance {
                report.converged = true;
                break;
            }
            previous_loss = loss;
        }

        debug!(
            "Softmax regression: {} epochs, loss {:.6}, converged: {}",
            report.epochs, report.final_loss, report.converged
        );
        Ok(report)
    }
}

fn softmax_in_place(scores: &mut [f64]) {
    let max = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mut sum = 0.0;
    for score in scores.iter_mut() {
        *score = (*score - max).exp();
        sum += *score;
    }
    for score in scores.iter_mut() {
        *score /= sum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_hot(index: usize) -> SparseVector {
        SparseVector::from_pairs(vec![(index, 1.0)])
    }

    #[test]
    fn test_untrained_model_is_uniform() {
        let model = SoftmaxRegression::new(4, 2);
        let probabilities = model.predict_proba(&one_hot(1)).unwrap();
        assert_eq!(probabilities, vec![0.5, 0.5]);
    }

    #[test]
    fn test_learns_separable_data() {
        let features = vec![one_hot(0), one_hot(1), one_hot(2), one_hot(3)];
        let labels = vec![0, 0, 1, 1];
        let mut model = SoftmaxRegression::new(4, 2);

        let report = model
            .fit(&features, &labels, &TrainingParams::default())
            .unwrap();

        assert!(report.epochs > 0);
        assert!(report.final_loss < 0.5);
        for (x, &label) in features.iter().zip(&labels) {
            let (class, confidence) = model.predict(x).unwrap();
            assert_eq!(class, label);
            assert!(confidence > 0.5);
        }
    }

    #[test]
    fn test_training_is_deterministic() {
        let features = vec![one_hot(0), one_hot(1), one_hot(2)];
        let labels = vec![0, 1, 2];
        let params = TrainingParams::default();

        let mut a = SoftmaxRegression::new(3, 3);
        let mut b = SoftmaxRegression::new(3, 3);
        a.fit(&features, &labels, &params).unwrap();
        b.fit(&features, &labels, &params).unwrap();

        assert_eq!(a, b);
    }

    #[test]
    fn test_fit_rejects_bad_input() {
        let mut model = SoftmaxRegression::new(2, 2);
        let params = TrainingParams::default();

        assert!(matches!(
            model.fit(&[], &[], &params),
            Err(BotError::Training(_))
        ));
        assert!(model.fit(&[one_hot(0)], &[5], &params).is_err());
        assert!(model.fit(&[one_hot(9)], &[0], &params).is_err());
    }

    #[test]
    fn test_uninitialized_model_is_inference_error() {
        let model = SoftmaxRegression::new(0, 0);
        assert!(matches!(
            model.predict(&SparseVector::default()),
            Err(BotError::Inference(_))
        ));
    }

    #[test]
    fn test_out_of_range_feature_is_inference_error() {
        let model = SoftmaxRegression::new(2, 2);
        assert!(matches!(
            model.predict(&one_hot(7)),
            Err(BotError::Inference(_))
        ));
    }
}
