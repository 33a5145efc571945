use super::{cell_count_prior, psi_prior, rm_prior, sigma_rm_prior};
use crate::common::constants::ReferenceConstants;
use crate::domain::{ModelId, ParameterSet};
use crate::models::{FaradayModel, impl_model_parameters};
use crate::numerics::{faraday_phase, tribble_envelope};
use crate::priors::{ConstraintPrior, PriorTable};
use crate::spectrum::Spectrum;

/// Derived key ordering the two components by rotation measure.
pub const DELTA_RM_KEY: &str = "delta_RM1_RM2_radm2";

/// Declared constraint with no producer: nothing derives this key yet, so
/// [`PriorTable::evaluate_constraints`] always skips it.
pub const SUM_P1_P2_KEY: &str = "sum_p1_p2";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TribbleTwoComponentParams {
    pub cell_count: f64,
    pub psi01_deg: f64,
    pub psi02_deg: f64,
    pub rm1_radm2: f64,
    pub rm2_radm2: f64,
    pub sigma_rm_radm2: f64,
}

impl_model_parameters!(TribbleTwoComponentParams {
    cell_count => "N",
    psi01_deg => "psi01_deg",
    psi02_deg => "psi02_deg",
    rm1_radm2 => "RM1_radm2",
    rm2_radm2 => "RM2_radm2",
    sigma_rm_radm2 => "sigmaRM_radm2",
});

/// Adds `delta_RM1_RM2_radm2 = RM1_radm2 - RM2_radm2` to a copy of the sample.
///
/// Samples missing either rotation measure are returned unchanged.
pub fn delta_rm_conversion(sample: &ParameterSet) -> ParameterSet {
    let mut converted = sample.clone();
    if let (Some(rm1), Some(rm2)) = (sample.get("RM1_radm2"), sample.get("RM2_radm2")) {
        converted.insert(DELTA_RM_KEY, rm1 - rm2);
    }
    converted
}

/// Two Faraday-thin components, each anchored at `ref_p`, behind one shared
/// Tribble screen. The components are otherwise symmetric, so the prior
/// table orders them with `RM1 > RM2`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TribbleTwoComponent {
    constants: ReferenceConstants,
}

impl TribbleTwoComponent {
    pub fn new(constants: ReferenceConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> ReferenceConstants {
        self.constants
    }
}

impl FaradayModel for TribbleTwoComponent {
    type Params = TribbleTwoComponentParams;

    fn id(&self) -> ModelId {
        ModelId::TribbleTwoComponent
    }

    fn priors(&self) -> PriorTable {
        let mut priors = PriorTable::with_conversion(delta_rm_conversion);
        priors.insert(cell_count_prior());
        priors.insert(psi_prior("psi01_deg", r"$\psi_{0,1}$ (deg)"));
        priors.insert(psi_prior("psi02_deg", r"$\psi_{0,2}$ (deg)"));
        priors.insert(rm_prior("RM1_radm2", r"$\phi_1$ (rad m$^{-2}$)"));
        priors.insert(rm_prior("RM2_radm2", r"$\phi_2$ (rad m$^{-2}$)"));
        priors.insert(ConstraintPrior::new(
            DELTA_RM_KEY,
            0.0,
            200.0,
            r"$\Delta\phi_{1,2}$ (rad m$^{-2}$)",
        ));
        priors.insert(sigma_rm_prior(0.0, 100.0));
        priors.insert(ConstraintPrior::new(SUM_P1_P2_KEY, 0.001, 1.0, r"$p_1+p_2$"));
        priors
    }

    fn evaluate(&self, params: &Self::Params, lam_sq_m2: &[f64]) -> Spectrum {
        let ref_p = self.constants.ref_p;
        Spectrum::from_grid(lam_sq_m2, |lam_sq| {
            let first = ref_p * faraday_phase(params.psi01_deg, params.rm1_radm2, lam_sq);
            let second = ref_p * faraday_phase(params.psi02_deg, params.rm2_radm2, lam_sq);
            (first + second) * tribble_envelope(params.cell_count, params.sigma_rm_radm2, lam_sq)
        })
    }
}
