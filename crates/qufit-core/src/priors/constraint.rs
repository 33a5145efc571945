use serde::{Deserialize, Serialize};

/// Bound on a derived quantity; never sampled directly.
///
/// The interval is open, so a derived value sitting exactly on either bound
/// rejects the sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintPrior {
    pub name: String,
    pub minimum: f64,
    pub maximum: f64,
    pub latex_label: String,
}

impl ConstraintPrior {
    pub fn new(
        name: impl Into<String>,
        minimum: f64,
        maximum: f64,
        latex_label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            minimum,
            maximum,
            latex_label: latex_label.into(),
        }
    }

    pub fn is_satisfied(&self, value: f64) -> bool {
        value > self.minimum && value < self.maximum
    }

    pub fn prob(&self, value: f64) -> f64 {
        if self.is_satisfied(value) { 1.0 } else { 0.0 }
    }
}
