use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;

use crate::error::SimError;
use crate::labels::LabelSet;
use crate::placeholder::{TrainingSpec, FEATURE_COUNT};
use crate::simulator::ConfidenceInterval;

/// Demo configuration, loadable from a JSON file.
///
/// Every field is optional; absent fields fall back to the values the
/// original demos hard-coded.
#[derive(Debug, Clone, Deserialize)]
pub struct DemoConfig {
    /// Custom label names; empty means the built-in five-emotion set.
    #[serde(default)]
    pub labels: Vec<String>,

    /// Inclusive lower bound of the confidence interval.
    #[serde(default = "default_confidence_low")]
    pub confidence_low: f64,

    /// Inclusive upper bound of the confidence interval.
    #[serde(default = "default_confidence_high")]
    pub confidence_high: f64,

    /// RNG seed; `None` seeds from the OS.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Synthetic samples to fit the placeholder on.
    #[serde(default = "default_train_samples")]
    pub train_samples: usize,
}

fn default_confidence_low() -> f64 {
    0.6
}

fn default_confidence_high() -> f64 {
    0.85
}

fn default_train_samples() -> usize {
    1000
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            labels: Vec::new(),
            confidence_low: default_confidence_low(),
            confidence_high: default_confidence_high(),
            seed: None,
            train_samples: default_train_samples(),
        }
    }
}

impl DemoConfig {
    /// Loads a `DemoConfig` from a JSON file.
    ///
    /// # Errors
    /// Returns a human-readable string if the file cannot be read or parsed.
    pub fn load(path: &str) -> Result<Self, String> {
        let content =
            std::fs::read_to_string(path).map_err(|e| format!("cannot read '{path}': {e}"))?;
        serde_json::from_str(&content).map_err(|e| format!("invalid JSON in '{path}': {e}"))
    }

    /// Builds the label set this config describes.
    ///
    /// # Errors
    /// Returns `SimError::InvalidConfiguration` for invalid custom labels.
    pub fn label_set(&self) -> Result<LabelSet, SimError> {
        if self.labels.is_empty() {
            Ok(LabelSet::five_emotions())
        } else {
            LabelSet::new(self.labels.iter().cloned())
        }
    }

    /// Builds the confidence interval this config describes.
    ///
    /// # Errors
    /// Returns `SimError::InvalidConfiguration` for invalid bounds.
    pub fn interval(&self) -> Result<ConfidenceInterval, SimError> {
        ConfidenceInterval::new(self.confidence_low, self.confidence_high)
    }

    /// Builds the training spec for the placeholder fit.
    pub fn training_spec(&self) -> TrainingSpec {
        TrainingSpec {
            samples: self.train_samples,
            features: FEATURE_COUNT,
            test_fraction: 0.2,
        }
    }

    /// Builds the demo's random number generator, seeded if configured.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}
