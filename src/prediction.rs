use serde::Serialize;

use crate::labels;

/// One (label, probability) entry of a prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scored {
    /// Label name.
    pub label: String,
    /// Probability mass assigned to the label.
    pub probability: f64,
}

impl Scored {
    /// Formats the probability as a percentage with one decimal place.
    pub fn percent(&self) -> String {
        format_percent(self.probability)
    }

    /// Returns the emoji for the label, if it is a built-in one.
    pub fn emoji(&self) -> Option<&'static str> {
        labels::emoji(&self.label)
    }
}

/// Outcome of one simulated analysis.
///
/// Created fresh on every call and discarded once rendered; nothing in the
/// crate persists predictions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// The winning label name.
    pub label: String,
    /// Probability mass assigned to the winning label.
    pub confidence: f64,
    /// The full distribution, in label-set order. Sums to 1.
    pub probabilities: Vec<Scored>,
}

impl Prediction {
    /// Returns the probability entries sorted by descending probability.
    ///
    /// Ties keep the label-set order.
    pub fn ranked(&self) -> Vec<&Scored> {
        let mut rows: Vec<&Scored> = self.probabilities.iter().collect();
        rows.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rows
    }

    /// Formats the confidence as a percentage with one decimal place.
    pub fn confidence_percent(&self) -> String {
        format_percent(self.confidence)
    }

    /// Returns the emoji for the winning label, if it is a built-in one.
    pub fn emoji(&self) -> Option<&'static str> {
        labels::emoji(&self.label)
    }
}

/// Formats a probability in [0, 1] as a percentage with one decimal place.
pub fn format_percent(probability: f64) -> String {
    format!("{:.1}%", probability * 100.0)
}
