//! Physical constants and reference defaults shared by the QU models.
//!
//! The speed of light is the rounded value the Tribble models were calibrated
//! with; swapping in CODATA would shift every frequency-anchored spectrum.

pub const SPEED_OF_LIGHT_M_PER_S: f64 = 3.0e8;
pub const SQRT_TWO: f64 = std::f64::consts::SQRT_2;
pub const DEFAULT_REFERENCE_FRACTIONAL_POLARIZATION: f64 = 1.0;
pub const DEFAULT_REFERENCE_FREQUENCY_HZ: f64 = 22.8e9;

/// Optional per-run reference constants consumed by the Tribble models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceConstants {
    pub ref_p: f64,
    pub ref_freq_hz: f64,
}

impl ReferenceConstants {
    pub const fn new(ref_p: f64, ref_freq_hz: f64) -> Self {
        Self { ref_p, ref_freq_hz }
    }

    pub fn reference_wavelength_m(&self) -> f64 {
        SPEED_OF_LIGHT_M_PER_S / self.ref_freq_hz
    }
}

impl Default for ReferenceConstants {
    fn default() -> Self {
        Self::new(
            DEFAULT_REFERENCE_FRACTIONAL_POLARIZATION,
            DEFAULT_REFERENCE_FREQUENCY_HZ,
        )
    }
}
