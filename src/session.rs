use std::collections::HashMap;

use rand::Rng;

use crate::error::SimError;
use crate::labels::LabelSet;
use crate::placeholder::{self, PlaceholderModel, TrainReport, TrainingSpec};
use crate::prediction::{Prediction, Scored};

/// Per-session state for the training demo variant.
///
/// Replaces the original's process-global session dictionary with an
/// explicit object the rendering layer owns: created untrained, populated
/// by [`train`](Self::train), wiped by [`reset`](Self::reset) when the user
/// asks to retrain, and dropped at session end.
#[derive(Debug, Clone)]
pub struct SessionContext {
    labels: LabelSet,
    model: Option<PlaceholderModel>,
    report: Option<TrainReport>,
}

impl SessionContext {
    /// Creates a new, untrained `SessionContext`.
    ///
    /// # Arguments
    /// * `labels` - The label set this session classifies against.
    pub fn new(labels: LabelSet) -> Self {
        Self {
            labels,
            model: None,
            report: None,
        }
    }

    /// Returns the session's label set.
    pub fn labels(&self) -> &LabelSet {
        &self.labels
    }

    /// Returns `true` once a model has been fitted and not yet reset.
    pub fn is_trained(&self) -> bool {
        self.model.is_some()
    }

    /// Returns the evaluation report of the last fit, if any.
    pub fn report(&self) -> Option<&TrainReport> {
        self.report.as_ref()
    }

    /// Fits the placeholder model and caches it with its evaluation report.
    ///
    /// Fitting again replaces the previous model and report.
    ///
    /// # Arguments
    /// * `spec` - Synthetic dataset dimensions.
    /// * `rng` - The random number generator producing the dataset.
    ///
    /// # Errors
    /// Returns `SimError::InvalidConfiguration` for a degenerate spec.
    pub fn train<R: Rng>(
        &mut self,
        spec: &TrainingSpec,
        rng: &mut R,
    ) -> Result<&TrainReport, SimError> {
        let (model, report) = placeholder::fit(&self.labels, spec, rng)?;
        log::info!(
            "placeholder model fitted: {} train / {} test samples, accuracy {:.3}",
            report.train_samples,
            report.test_samples,
            report.accuracy
        );
        self.model = Some(model);
        self.report = Some(report);
        // SAFETY: Set on the line above.
        Ok(self.report.as_ref().unwrap())
    }

    /// Clears the trained model and cached report (the "retrain" action).
    pub fn reset(&mut self) {
        self.model = None;
        self.report = None;
        log::info!("session reset; model and cached evaluation dropped");
    }

    /// Scores a preprocessed image against the trained model.
    ///
    /// # Arguments
    /// * `features` - The flattened, normalized image vector.
    ///
    /// # Errors
    /// Returns `SimError::NotTrained` before the first [`train`](Self::train)
    /// call or after a [`reset`](Self::reset), and `SimError::ShapeMismatch`
    /// for a wrong feature length.
    pub fn predict(&self, features: &[f64]) -> Result<Prediction, SimError> {
        let model = self.model.as_ref().ok_or(SimError::NotTrained)?;
        let (winner, probabilities) = model.predict(features)?;

        let probabilities: Vec<Scored> = self
            .labels
            .iter()
            .zip(probabilities)
            .map(|(label, probability)| Scored {
                label: label.to_string(),
                probability,
            })
            .collect();

        Ok(Prediction {
            label: self.labels.get(winner).unwrap_or_default().to_string(),
            confidence: probabilities[winner].probability,
            probabilities,
        })
    }
}

/// A keyed store of session contexts.
///
/// Contexts are created on first use per key and torn down when the owner
/// ends the session. Access is `&mut`-only; nothing in this system mutates
/// sessions concurrently.
#[derive(Debug)]
pub struct SessionStore {
    labels: LabelSet,
    sessions: HashMap<String, SessionContext>,
}

impl SessionStore {
    /// Creates an empty `SessionStore`.
    ///
    /// # Arguments
    /// * `labels` - The label set every created session classifies against.
    pub fn new(labels: LabelSet) -> Self {
        Self {
            labels,
            sessions: HashMap::new(),
        }
    }

    /// Returns the session for `key`, creating it on first use.
    pub fn session(&mut self, key: &str) -> &mut SessionContext {
        self.sessions
            .entry(key.to_string())
            .or_insert_with(|| SessionContext::new(self.labels.clone()))
    }

    /// Tears down the session for `key`, returning it if it existed.
    pub fn end(&mut self, key: &str) -> Option<SessionContext> {
        self.sessions.remove(key)
    }

    /// Returns the number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no sessions are live.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn small_spec() -> TrainingSpec {
        TrainingSpec {
            samples: 50,
            features: 8,
            test_fraction: 0.2,
        }
    }

    #[test]
    fn predict_before_train_fails() {
        let session = SessionContext::new(LabelSet::five_emotions());
        let err = session.predict(&[0.5; 8]).unwrap_err();
        assert!(matches!(err, SimError::NotTrained));
    }

    #[test]
    fn train_then_predict() {
        let mut session = SessionContext::new(LabelSet::five_emotions());
        let mut rng = StdRng::seed_from_u64(42);

        let report = session.train(&small_spec(), &mut rng).unwrap();
        assert_eq!(report.train_samples + report.test_samples, 50);
        assert!(session.is_trained());

        let prediction = session.predict(&[0.5; 8]).unwrap();
        assert_eq!(prediction.probabilities.len(), 5);
        let sum: f64 = prediction.probabilities.iter().map(|s| s.probability).sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn reset_clears_everything() {
        let mut session = SessionContext::new(LabelSet::five_emotions());
        let mut rng = StdRng::seed_from_u64(42);

        session.train(&small_spec(), &mut rng).unwrap();
        session.reset();

        assert!(!session.is_trained());
        assert!(session.report().is_none());
        assert!(matches!(
            session.predict(&[0.5; 8]),
            Err(SimError::NotTrained)
        ));
    }

    #[test]
    fn store_creates_on_first_use() {
        let mut store = SessionStore::new(LabelSet::five_emotions());
        assert!(store.is_empty());

        store.session("alice");
        store.session("alice");
        store.session("bob");
        assert_eq!(store.len(), 2);

        assert!(store.end("alice").is_some());
        assert!(store.end("alice").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn store_sessions_are_independent() {
        let mut store = SessionStore::new(LabelSet::five_emotions());
        let mut rng = StdRng::seed_from_u64(9);

        store.session("a").train(&small_spec(), &mut rng).unwrap();

        assert!(store.session("a").is_trained());
        assert!(!store.session("b").is_trained());
    }
}
