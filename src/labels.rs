use crate::error::SimError;

/// An ordered, immutable set of distinct emotion category names.
///
/// The set is fixed for the lifetime of a simulator or session; every
/// probability vector produced by the crate is aligned with its order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelSet {
    names: Vec<String>,
}

impl LabelSet {
    /// Creates a `LabelSet` from an ordered list of names.
    ///
    /// # Errors
    /// Returns `SimError::InvalidConfiguration` if the list is empty,
    /// contains an empty name, or contains duplicates.
    pub fn new<I, S>(names: I) -> Result<Self, SimError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        if names.is_empty() {
            return Err(SimError::InvalidConfiguration(
                "label set must not be empty".into(),
            ));
        }

        for (i, name) in names.iter().enumerate() {
            if name.is_empty() {
                return Err(SimError::InvalidConfiguration(format!(
                    "label {i} is empty"
                )));
            }
            if names[..i].contains(name) {
                return Err(SimError::InvalidConfiguration(format!(
                    "duplicate label: {name}"
                )));
            }
        }

        Ok(Self { names })
    }

    /// The five-emotion set used by the lightweight demo variants.
    pub fn five_emotions() -> Self {
        // SAFETY: The built-in names are non-empty and distinct.
        Self::new(["Happy", "Sad", "Angry", "Surprise", "Neutral"]).unwrap()
    }

    /// The seven-emotion set used by the training demo variant.
    pub fn seven_emotions() -> Self {
        // SAFETY: The built-in names are non-empty and distinct.
        Self::new(["Angry", "Disgust", "Fear", "Happy", "Sad", "Surprise", "Neutral"]).unwrap()
    }

    /// Returns the number of labels in the set.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns `true` if the set contains no labels.
    ///
    /// Always `false` for a constructed set; provided for API completeness.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the label name at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    /// Returns all label names in order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Iterates over the label names in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

/// Returns the emoji the rendering layer uses for a built-in label.
///
/// Custom labels have no emoji.
pub fn emoji(label: &str) -> Option<&'static str> {
    match label {
        "Happy" => Some("😊"),
        "Sad" => Some("😢"),
        "Angry" => Some("😠"),
        "Surprise" => Some("😲"),
        "Neutral" => Some("😐"),
        "Disgust" => Some("🤢"),
        "Fear" => Some("😨"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_sets() {
        assert_eq!(LabelSet::five_emotions().len(), 5);
        assert_eq!(LabelSet::seven_emotions().len(), 7);
        assert_eq!(LabelSet::five_emotions().get(0), Some("Happy"));
        assert_eq!(LabelSet::seven_emotions().get(6), Some("Neutral"));
    }

    #[test]
    fn rejects_empty_set() {
        let err = LabelSet::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }

    #[test]
    fn rejects_empty_name() {
        let err = LabelSet::new(["Happy", ""]).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }

    #[test]
    fn rejects_duplicates() {
        let err = LabelSet::new(["Happy", "Sad", "Happy"]).unwrap_err();
        assert!(matches!(err, SimError::InvalidConfiguration(_)));
    }

    #[test]
    fn preserves_order() {
        let set = LabelSet::new(["B", "A", "C"]).unwrap();
        let names: Vec<_> = set.iter().collect();
        assert_eq!(names, ["B", "A", "C"]);
    }

    #[test]
    fn emoji_lookup() {
        assert_eq!(emoji("Happy"), Some("😊"));
        assert_eq!(emoji("Fear"), Some("😨"));
        assert_eq!(emoji("Bored"), None);
    }
}
