//! The noise-trained classifier carried over from the training demo variant.
//!
//! This whole path is a placeholder and is flagged as one: the features are
//! uniform noise and the labels are drawn independently of them, so the
//! fitted model carries no signal and its accuracy sits at chance level
//! (one over the label count). It exists because the original demo ships
//! it, not because it predicts anything.

use ndarray::{Array2, ArrayView1};
use rand::Rng;
use serde::Serialize;

use crate::error::SimError;
use crate::labels::LabelSet;

/// Edge length the demo resizes every image to before predicting.
pub const IMAGE_SIDE: usize = 48;

/// Flattened feature count for a resized image.
pub const FEATURE_COUNT: usize = IMAGE_SIDE * IMAGE_SIDE;

/// Dimensions of the synthetic dataset the placeholder is fitted on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSpec {
    /// Total number of synthetic samples to generate.
    pub samples: usize,
    /// Features per sample.
    pub features: usize,
    /// Fraction of samples held out for evaluation.
    pub test_fraction: f64,
}

impl Default for TrainingSpec {
    /// The 1000 x 2304 dataset with an 80/20 split the demo uses.
    fn default() -> Self {
        Self {
            samples: 1000,
            features: FEATURE_COUNT,
            test_fraction: 0.2,
        }
    }
}

impl TrainingSpec {
    /// Returns the held-out sample count, at least one on each side of
    /// the split.
    fn test_samples(&self) -> usize {
        let test = (self.samples as f64 * self.test_fraction).round() as usize;
        test.clamp(1, self.samples - 1)
    }

    fn validate(&self) -> Result<(), SimError> {
        if self.samples < 2 {
            return Err(SimError::InvalidConfiguration(format!(
                "training needs at least two samples, got {}",
                self.samples
            )));
        }
        if self.features == 0 {
            return Err(SimError::InvalidConfiguration(
                "training needs at least one feature".into(),
            ));
        }
        if !(self.test_fraction > 0.0 && self.test_fraction < 1.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "test fraction must lie in (0, 1), got {}",
                self.test_fraction
            )));
        }
        Ok(())
    }
}

/// Per-label evaluation metrics derived from the confusion matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelMetrics {
    /// Label name.
    pub label: String,
    /// Correct predictions over all predictions of this label.
    pub precision: f64,
    /// Correct predictions over all samples of this label.
    pub recall: f64,
    /// Harmonic mean of precision and recall.
    pub f1: f64,
    /// Held-out samples carrying this label.
    pub support: usize,
}

/// Evaluation artifacts of one placeholder fit.
///
/// Retained by the session so the analysis page can render them until the
/// next retrain; the accuracy is chance-level by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainReport {
    /// Fraction of held-out samples predicted correctly.
    pub accuracy: f64,
    /// Samples the centroids were fitted on.
    pub train_samples: usize,
    /// Held-out samples.
    pub test_samples: usize,
    /// `confusion[actual][predicted]` counts over the held-out split.
    pub confusion: Vec<Vec<usize>>,
    /// Per-label precision/recall/F1.
    pub per_label: Vec<LabelMetrics>,
    /// Held-out labels, cached for rendering.
    pub test_labels: Vec<usize>,
    /// Predictions on the held-out split, cached for rendering.
    pub test_predictions: Vec<usize>,
}

/// A nearest-centroid model fitted on noise.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceholderModel {
    // One row of centroid coordinates per label.
    centroids: Array2<f64>,
}

impl PlaceholderModel {
    /// Returns the number of features the model expects.
    pub fn feature_count(&self) -> usize {
        self.centroids.ncols()
    }

    /// Returns the number of labels the model scores.
    pub fn label_count(&self) -> usize {
        self.centroids.nrows()
    }

    /// Scores a feature vector against every label centroid.
    ///
    /// # Arguments
    /// * `features` - A flattened, normalized feature vector.
    ///
    /// # Returns
    /// The winning label index and pseudo-probabilities for every label,
    /// computed from normalized inverse centroid distances.
    ///
    /// # Errors
    /// Returns `SimError::ShapeMismatch` if `features` has the wrong length.
    pub fn predict(&self, features: &[f64]) -> Result<(usize, Vec<f64>), SimError> {
        if features.len() != self.feature_count() {
            return Err(SimError::ShapeMismatch {
                what: "features",
                got: features.len(),
                expected: self.feature_count(),
            });
        }

        let x = ArrayView1::from(features);
        let weights: Vec<f64> = self
            .centroids
            .rows()
            .into_iter()
            .map(|centroid| {
                let dist = (&x - &centroid).mapv(|d| d * d).sum().sqrt();
                1.0 / (dist + 1e-9)
            })
            .collect();

        let total: f64 = weights.iter().sum();
        let probabilities: Vec<f64> = weights.iter().map(|w| w / total).collect();

        let winner = probabilities
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(i, _)| i)
            .unwrap_or(0);

        Ok((winner, probabilities))
    }
}

/// Fits the placeholder model on freshly generated noise and evaluates it
/// on a held-out split.
///
/// # Arguments
/// * `labels` - The label set the model scores.
/// * `spec` - Dataset dimensions and split fraction.
/// * `rng` - The random number generator producing the synthetic dataset.
///
/// # Errors
/// Returns `SimError::InvalidConfiguration` for a degenerate spec.
pub fn fit<R: Rng>(
    labels: &LabelSet,
    spec: &TrainingSpec,
    rng: &mut R,
) -> Result<(PlaceholderModel, TrainReport), SimError> {
    spec.validate()?;

    let n_labels = labels.len();
    let test_samples = spec.test_samples();
    let train_samples = spec.samples - test_samples;

    // Uniform noise features and labels unrelated to them. The samples are
    // i.i.d., so splitting by position is as good as shuffling.
    let x = Array2::from_shape_fn((spec.samples, spec.features), |_| rng.random::<f64>());
    let y: Vec<usize> = (0..spec.samples)
        .map(|_| rng.random_range(0..n_labels))
        .collect();

    let mut centroids = Array2::zeros((n_labels, spec.features));
    let mut counts = vec![0usize; n_labels];
    for (row, &label) in x.rows().into_iter().take(train_samples).zip(&y) {
        let mut centroid = centroids.row_mut(label);
        centroid += &row;
        counts[label] += 1;
    }
    for (label, &count) in counts.iter().enumerate() {
        let mut centroid = centroids.row_mut(label);
        if count > 0 {
            centroid /= count as f64;
        } else {
            // A label the random draw never produced: park its centroid at
            // the noise mean so it stays a valid (if hopeless) candidate.
            centroid.fill(0.5);
        }
    }

    let model = PlaceholderModel { centroids };

    let test_labels: Vec<usize> = y[train_samples..].to_vec();
    let mut test_predictions = Vec::with_capacity(test_samples);
    for row in x.rows().into_iter().skip(train_samples) {
        let row = row.to_vec();
        let (winner, _) = model.predict(&row)?;
        test_predictions.push(winner);
    }

    let confusion = confusion_matrix(&test_labels, &test_predictions, n_labels);
    let report = TrainReport {
        accuracy: accuracy(&test_labels, &test_predictions),
        train_samples,
        test_samples,
        per_label: per_label_metrics(labels, &confusion),
        confusion,
        test_labels,
        test_predictions,
    };

    Ok((model, report))
}

/// Returns the fraction of predictions matching the true labels.
///
/// Empty inputs yield zero.
pub fn accuracy(truth: &[usize], predictions: &[usize]) -> f64 {
    if truth.is_empty() {
        return 0.0;
    }
    let correct = truth
        .iter()
        .zip(predictions)
        .filter(|(t, p)| t == p)
        .count();
    correct as f64 / truth.len() as f64
}

/// Builds an `n x n` confusion matrix indexed `[actual][predicted]`.
///
/// Out-of-range indices are ignored.
pub fn confusion_matrix(truth: &[usize], predictions: &[usize], n: usize) -> Vec<Vec<usize>> {
    let mut matrix = vec![vec![0usize; n]; n];
    for (&t, &p) in truth.iter().zip(predictions) {
        if t < n && p < n {
            matrix[t][p] += 1;
        }
    }
    matrix
}

fn per_label_metrics(labels: &LabelSet, confusion: &[Vec<usize>]) -> Vec<LabelMetrics> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let hits = confusion[i][i];
            let predicted: usize = confusion.iter().map(|row| row[i]).sum();
            let support: usize = confusion[i].iter().sum();

            let precision = ratio(hits, predicted);
            let recall = ratio(hits, support);
            let f1 = if precision + recall > 0.0 {
                2.0 * precision * recall / (precision + recall)
            } else {
                0.0
            };

            LabelMetrics {
                label: label.to_string(),
                precision,
                recall,
                f1,
                support,
            }
        })
        .collect()
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
