//! Tribble turbulent-screen models.
//!
//! All variants share the `N^(-1/2) / (σ·λ²·√2)` envelope and therefore
//! diverge at λ² = 0; they differ only in how the intrinsic polarised
//! fraction is anchored.

mod anchored;
mod frac_pol;
mod spectral_index;
mod two_component;

pub use anchored::{TribbleAnchored, TribbleAnchoredParams};
pub use frac_pol::{TribbleFracPol, TribbleFracPolParams};
pub use spectral_index::{TribbleSpectralIndex, TribbleSpectralIndexParams};
pub use two_component::{
    DELTA_RM_KEY, SUM_P1_P2_KEY, TribbleTwoComponent, TribbleTwoComponentParams,
    delta_rm_conversion,
};

use crate::priors::UniformPrior;

pub(crate) fn psi_prior(name: &str, latex_label: &str) -> UniformPrior {
    UniformPrior::new(name, 0.0, 180.0, latex_label).periodic()
}

pub(crate) fn rm_prior(name: &str, latex_label: &str) -> UniformPrior {
    UniformPrior::new(name, -100.0, 100.0, latex_label)
}

pub(crate) fn sigma_rm_prior(minimum: f64, maximum: f64) -> UniformPrior {
    UniformPrior::new(
        "sigmaRM_radm2",
        minimum,
        maximum,
        r"$\sigma_{RM}$ (rad m$^{-2}$)",
    )
}

pub(crate) fn cell_count_prior() -> UniformPrior {
    UniformPrior::new("N", 0.0, 5.0, "N")
}
