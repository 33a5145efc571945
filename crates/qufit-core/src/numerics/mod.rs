//! Shared formula kernels for the QU models.
//!
//! Every model is an envelope times a Faraday phase term, optionally times a
//! depolarisation factor. The kernels here are evaluated per grid point and
//! never validate their inputs: degenerate values propagate as inf/NaN.

use crate::common::constants::{SPEED_OF_LIGHT_M_PER_S, SQRT_TWO};
use num_complex::Complex64;

/// `exp(2i·(ψ0 + φ·λ²))` with ψ0 given in degrees.
pub fn faraday_phase(psi0_deg: f64, rm_radm2: f64, lam_sq_m2: f64) -> Complex64 {
    Complex64::from_polar(1.0, 2.0 * (psi0_deg.to_radians() + rm_radm2 * lam_sq_m2))
}

/// Burn-slab attenuation `exp(-2σ²λ⁴)`.
pub fn burn_attenuation(sigma_rm_radm2: f64, lam_sq_m2: f64) -> f64 {
    (-2.0 * sigma_rm_radm2.powi(2) * lam_sq_m2.powi(2)).exp()
}

/// Tribble turbulent-cell envelope `N^(-1/2) / (σ·λ²·√2)`.
pub fn tribble_envelope(cell_count: f64, sigma_rm_radm2: f64, lam_sq_m2: f64) -> f64 {
    cell_count.powf(-0.5) / (sigma_rm_radm2 * lam_sq_m2 * SQRT_TWO)
}

/// Observing frequency for a λ² sample, `c / √λ²`.
pub fn frequency_from_lambda_sq(lam_sq_m2: f64) -> f64 {
    SPEED_OF_LIGHT_M_PER_S / lam_sq_m2.sqrt()
}

/// Inverse of [`frequency_from_lambda_sq`].
pub fn lambda_sq_from_frequency(frequency_hz: f64) -> f64 {
    (SPEED_OF_LIGHT_M_PER_S / frequency_hz).powi(2)
}

/// Power-law amplitude scaling `(f/f_ref)^α`.
pub fn spectral_index_scaling(frequency_hz: f64, reference_frequency_hz: f64, alpha: f64) -> f64 {
    (frequency_hz / reference_frequency_hz).powf(alpha)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericTolerance {
    pub abs_tol: f64,
    pub rel_tol: f64,
    pub relative_floor: f64,
}

impl NumericTolerance {
    pub const fn new(abs_tol: f64, rel_tol: f64, relative_floor: f64) -> Self {
        Self {
            abs_tol,
            rel_tol,
            relative_floor,
        }
    }
}

impl Default for NumericTolerance {
    fn default() -> Self {
        Self::new(1.0e-12, 1.0e-10, 1.0e-12)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToleranceComparison {
    pub abs_diff: f64,
    pub rel_diff: f64,
    pub passes: bool,
}

/// Compare two complex samples by the modulus of their difference.
pub fn compare_with_tolerance(
    baseline: Complex64,
    actual: Complex64,
    tolerance: NumericTolerance,
) -> ToleranceComparison {
    let abs_diff = (actual - baseline).norm();
    let rel_denominator = baseline.norm().max(tolerance.relative_floor);
    let rel_diff = abs_diff / rel_denominator;
    let passes = abs_diff <= tolerance.abs_tol || abs_diff <= tolerance.rel_tol * rel_denominator;

    ToleranceComparison {
        abs_diff,
        rel_diff,
        passes,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        NumericTolerance, burn_attenuation, compare_with_tolerance, faraday_phase,
        frequency_from_lambda_sq, lambda_sq_from_frequency, spectral_index_scaling,
        tribble_envelope,
    };
    use num_complex::Complex64;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn faraday_phase_is_unit_modulus_with_doubled_angle() {
        let phase = faraday_phase(45.0, 0.0, 0.3);
        assert!((phase.norm() - 1.0).abs() <= 1.0e-15);
        assert!((phase.arg() - FRAC_PI_2).abs() <= 1.0e-12);

        let rotated = faraday_phase(0.0, PI / 4.0, 1.0);
        assert!((rotated.arg() - FRAC_PI_2).abs() <= 1.0e-12);
    }

    #[test]
    fn faraday_phase_repeats_every_half_turn_of_psi() {
        let base = faraday_phase(12.5, 33.0, 0.07);
        let shifted = faraday_phase(192.5, 33.0, 0.07);
        assert!((base - shifted).norm() <= 1.0e-12);
    }

    #[test]
    fn burn_attenuation_is_one_at_zero_wavelength_and_decays() {
        assert_eq!(burn_attenuation(5.0, 0.0), 1.0);
        assert_eq!(burn_attenuation(0.0, 0.5), 1.0);
        let near = burn_attenuation(5.0, 0.01);
        let far = burn_attenuation(5.0, 0.05);
        assert!(near < 1.0);
        assert!(far < near);
        assert!((near - (-2.0_f64 * 25.0 * 1.0e-4).exp()).abs() <= 1.0e-15);
    }

    #[test]
    fn tribble_envelope_matches_closed_form_and_diverges_at_zero() {
        let value = tribble_envelope(4.0, 2.0, 0.1);
        let expected = 0.5 / (2.0 * 0.1 * 2.0_f64.sqrt());
        assert!((value - expected).abs() <= 1.0e-14);

        assert!(tribble_envelope(1.0, 1.0, 0.0).is_infinite());
        assert!(tribble_envelope(0.0, 1.0, 0.1).is_infinite());
    }

    #[test]
    fn frequency_conversion_round_trips_through_lambda_sq() {
        let frequency = frequency_from_lambda_sq(0.04);
        assert!((frequency - 1.5e9).abs() <= 1.0e-3);
        assert!((lambda_sq_from_frequency(frequency) - 0.04).abs() <= 1.0e-15);
    }

    #[test]
    fn spectral_index_scaling_is_unity_at_reference() {
        assert_eq!(spectral_index_scaling(22.8e9, 22.8e9, -0.7), 1.0);
        assert!((spectral_index_scaling(2.0, 1.0, 2.0) - 4.0).abs() <= 1.0e-15);
    }

    #[test]
    fn tolerance_comparison_accepts_either_bound() {
        let tolerance = NumericTolerance::new(1.0e-6, 1.0e-3, 1.0e-12);
        let within_rel = compare_with_tolerance(
            Complex64::new(100.0, 0.0),
            Complex64::new(100.05, 0.0),
            tolerance,
        );
        assert!(within_rel.passes);
        assert!((within_rel.rel_diff - 5.0e-4).abs() <= 1.0e-9);

        let outside = compare_with_tolerance(
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 0.01),
            tolerance,
        );
        assert!(!outside.passes);
        assert!((outside.abs_diff - 0.01).abs() <= 1.0e-12);
    }
}
