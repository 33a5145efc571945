use crate::numerics::{NumericTolerance, compare_with_tolerance};
use num_complex::Complex64;

/// Predicted fractional `Q + iU`, one sample per λ² grid point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum {
    values: Vec<Complex64>,
}

impl Spectrum {
    pub fn new(values: Vec<Complex64>) -> Self {
        Self { values }
    }

    /// Evaluate `sample` at every grid point, preserving grid order.
    pub fn from_grid(lam_sq_m2: &[f64], sample: impl Fn(f64) -> Complex64) -> Self {
        Self::new(lam_sq_m2.iter().copied().map(sample).collect())
    }

    pub fn values(&self) -> &[Complex64] {
        &self.values
    }

    pub fn into_vec(self) -> Vec<Complex64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn stokes_q(&self) -> Vec<f64> {
        self.values.iter().map(|value| value.re).collect()
    }

    pub fn stokes_u(&self) -> Vec<f64> {
        self.values.iter().map(|value| value.im).collect()
    }

    pub fn fractional_polarization(&self) -> Vec<f64> {
        self.values.iter().map(|value| value.norm()).collect()
    }

    /// Polarisation angle `½·arg(Q + iU)` in degrees, folded into `[0, 180)`.
    pub fn polarization_angle_deg(&self) -> Vec<f64> {
        self.values
            .iter()
            .map(|value| (0.5 * value.arg().to_degrees()).rem_euclid(180.0))
            .collect()
    }

    pub fn is_finite(&self) -> bool {
        self.first_non_finite().is_none()
    }

    pub fn first_non_finite(&self) -> Option<(usize, Complex64)> {
        self.values
            .iter()
            .copied()
            .enumerate()
            .find(|(_, value)| !value.is_finite())
    }

    /// Largest pointwise modulus difference, `None` when lengths differ.
    pub fn max_abs_difference(&self, other: &Spectrum) -> Option<f64> {
        if self.len() != other.len() {
            return None;
        }

        Some(
            self.values
                .iter()
                .zip(&other.values)
                .map(|(left, right)| (left - right).norm())
                .fold(0.0, f64::max),
        )
    }

    pub fn approx_eq(&self, other: &Spectrum, tolerance: NumericTolerance) -> bool {
        self.len() == other.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(baseline, actual)| {
                    compare_with_tolerance(*baseline, *actual, tolerance).passes
                })
    }
}

impl From<Vec<Complex64>> for Spectrum {
    fn from(values: Vec<Complex64>) -> Self {
        Self::new(values)
    }
}

impl AsRef<[Complex64]> for Spectrum {
    fn as_ref(&self) -> &[Complex64] {
        &self.values
    }
}
