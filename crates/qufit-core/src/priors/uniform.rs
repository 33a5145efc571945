use serde::{Deserialize, Serialize};

/// How a sampler should treat proposals that cross the prior bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Wrap around, for angle-like parameters.
    Periodic,
    Reflective,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UniformPrior {
    pub name: String,
    pub minimum: f64,
    pub maximum: f64,
    pub latex_label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,
}

impl UniformPrior {
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
            boundary: None,
        }
    }

    pub fn with_boundary(mut self, boundary: Boundary) -> Self {
        self.boundary = Some(boundary);
        self
    }

    pub fn periodic(self) -> Self {
        self.with_boundary(Boundary::Periodic)
    }

    pub fn is_periodic(&self) -> bool {
        self.boundary == Some(Boundary::Periodic)
    }

    pub fn width(&self) -> f64 {
        self.maximum - self.minimum
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.minimum..=self.maximum).contains(&value)
    }

    /// Map a unit-hypercube coordinate onto the prior support.
    pub fn rescale(&self, unit: f64) -> f64 {
        self.minimum + unit * self.width()
    }

    pub fn prob(&self, value: f64) -> f64 {
        if self.contains(value) {
            1.0 / self.width()
        } else {
            0.0
        }
    }

    pub fn ln_prob(&self, value: f64) -> f64 {
        if self.contains(value) {
            -self.width().ln()
        } else {
            f64::NEG_INFINITY
        }
    }

    /// Fold a periodic value back into `[minimum, maximum)`.
    ///
    /// Values of non-periodic priors are returned unchanged.
    pub fn wrap(&self, value: f64) -> f64 {
        if !self.is_periodic() || !value.is_finite() {
            return value;
        }
        // rem_euclid rounds tiny negative offsets up to a full width.
        let wrapped = self.minimum + (value - self.minimum).rem_euclid(self.width());
        if wrapped >= self.maximum {
            self.minimum
        } else {
            wrapped
        }
    }
}
