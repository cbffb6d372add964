use rand::Rng;
use serde::Serialize;

use crate::labels::LabelSet;

/// A simulated service-level snapshot.
///
/// Mirrors the stats card the original demo served: the prediction total is
/// drawn at random and the headline accuracy is a fixed marketing number,
/// matching the demo's fabricated "78.5%".
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceStats {
    /// Fabricated lifetime prediction count.
    pub total_predictions: u32,
    /// Fixed headline accuracy string.
    pub accuracy: &'static str,
    /// Fixed model version string.
    pub model_version: &'static str,
    /// Number of labels the demo can output.
    pub supported_emotions: usize,
}

impl ServiceStats {
    /// Samples a fresh snapshot.
    ///
    /// # Arguments
    /// * `labels` - The label set the demo advertises.
    /// * `rng` - The random number generator for the fabricated counter.
    pub fn sample<R: Rng>(labels: &LabelSet, rng: &mut R) -> Self {
        Self {
            total_predictions: rng.random_range(500..1500),
            accuracy: "78.5%",
            model_version: "v2.1.0",
            supported_emotions: labels.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn counter_stays_in_range() {
        let labels = LabelSet::five_emotions();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let stats = ServiceStats::sample(&labels, &mut rng);
            assert!((500..1500).contains(&stats.total_predictions));
            assert_eq!(stats.supported_emotions, 5);
        }
    }

    #[test]
    fn serializes_fixed_fields() {
        let labels = LabelSet::seven_emotions();
        let mut rng = StdRng::seed_from_u64(2);

        let json = serde_json::to_value(ServiceStats::sample(&labels, &mut rng)).unwrap();
        assert_eq!(json["accuracy"], "78.5%");
        assert_eq!(json["model_version"], "v2.1.0");
        assert_eq!(json["supported_emotions"], 7);
    }
}
