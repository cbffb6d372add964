use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::error::SimError;
use crate::labels::LabelSet;
use crate::prediction::{Prediction, Scored};

/// A closed interval `[lo, hi]` the winning label's probability is drawn from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    lo: f64,
    hi: f64,
}

impl ConfidenceInterval {
    /// Creates a new `ConfidenceInterval`.
    ///
    /// # Arguments
    /// * `lo` - The inclusive lower bound.
    /// * `hi` - The inclusive upper bound.
    ///
    /// # Errors
    /// Returns `SimError::InvalidConfiguration` unless `0 < lo <= hi <= 1`
    /// and both bounds are finite.
    pub fn new(lo: f64, hi: f64) -> Result<Self, SimError> {
        if !lo.is_finite() || !hi.is_finite() {
            return Err(SimError::InvalidConfiguration(format!(
                "confidence interval bounds must be finite, got [{lo}, {hi}]"
            )));
        }
        if !(lo > 0.0 && lo <= hi && hi <= 1.0) {
            return Err(SimError::InvalidConfiguration(format!(
                "confidence interval must satisfy 0 < lo <= hi <= 1, got [{lo}, {hi}]"
            )));
        }
        Ok(Self { lo, hi })
    }

    /// Returns the inclusive lower bound.
    pub fn low(&self) -> f64 {
        self.lo
    }

    /// Returns the inclusive upper bound.
    pub fn high(&self) -> f64 {
        self.hi
    }

    /// Returns `true` if `value` lies within the interval.
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }
}

impl Default for ConfidenceInterval {
    /// The `[0.6, 0.85]` range the demo apps advertise.
    fn default() -> Self {
        Self { lo: 0.6, hi: 0.85 }
    }
}

/// Produces synthetic categorical distributions over a fixed label set.
///
/// Each call picks a winning label uniformly at random, gives it a
/// probability inside the configured confidence interval, and spreads the
/// remaining mass over the other labels so that the vector sums to one.
///
/// The output is fabricated from randomness alone; it carries no signal
/// about any input image.
#[derive(Debug, Clone)]
pub struct Simulator {
    labels: LabelSet,
    interval: ConfidenceInterval,
    confidence: Uniform<f64>,
}

impl Simulator {
    /// Creates a new `Simulator`.
    ///
    /// # Arguments
    /// * `labels` - The ordered label set to distribute probability over.
    /// * `interval` - The closed interval the winner's probability is drawn from.
    ///
    /// # Errors
    /// Returns `SimError::InvalidConfiguration` if the label set has fewer
    /// than two labels; with a single label the winner cannot both absorb
    /// all the mass and stay inside an interval below one.
    pub fn new(labels: LabelSet, interval: ConfidenceInterval) -> Result<Self, SimError> {
        if labels.len() < 2 {
            return Err(SimError::InvalidConfiguration(format!(
                "label set must contain at least two labels, got {}",
                labels.len()
            )));
        }

        let confidence = Uniform::new_inclusive(interval.low(), interval.high())
            .map_err(|e| SimError::InvalidConfiguration(format!("confidence interval: {e}")))?;

        Ok(Self {
            labels,
            interval,
            confidence,
        })
    }

    /// Returns the label set this simulator distributes probability over.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Returns the configured confidence interval.
    pub fn interval(&self) -> ConfidenceInterval {
        self.interval
    }

    /// Runs one simulated analysis.
    ///
    /// The winner is drawn uniformly from the label set and its probability
    /// uniformly from the confidence interval. The leftover mass is spread
    /// over the non-winning labels in set order: each but the last draws
    /// uniformly from `[0, remaining / labels_left]`, and the last absorbs
    /// whatever is left, so the vector sums to one and no entry is negative.
    ///
    /// # Arguments
    /// * `rng` - The random number generator to consume. Seeding it makes
    ///   the outcome reproducible.
    pub fn simulate<R: Rng>(&self, rng: &mut R) -> Prediction {
        let n = self.labels.len();
        let winner = rng.random_range(0..n);
        let confidence = self.confidence.sample(rng);

        let mut values = vec![0.0_f64; n];
        values[winner] = confidence;

        let mut remaining = 1.0 - confidence;
        let mut left = n - 1;
        for (i, value) in values.iter_mut().enumerate() {
            if i == winner {
                continue;
            }
            if left == 1 {
                *value = remaining.max(0.0);
            } else {
                let bound = remaining / left as f64;
                // The bound can reach zero once the mass is exhausted; a
                // degenerate range would make the draw invalid.
                let draw = if bound > 0.0 {
                    rng.random_range(0.0..=bound)
                } else {
                    0.0
                };
                *value = draw;
                remaining -= draw;
            }
            left -= 1;
        }

        let probabilities = self
            .labels
            .iter()
            .zip(&values)
            .map(|(label, &probability)| Scored {
                label: label.to_string(),
                probability,
            })
            .collect();

        Prediction {
            label: self.labels.get(winner).unwrap_or_default().to_string(),
            confidence,
            probabilities,
        }
    }
}
