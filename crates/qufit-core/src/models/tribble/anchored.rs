use super::{cell_count_prior, psi_prior, rm_prior, sigma_rm_prior};
use crate::common::constants::ReferenceConstants;
use crate::domain::ModelId;
use crate::models::{FaradayModel, impl_model_parameters};
use crate::numerics::{faraday_phase, tribble_envelope};
use crate::priors::{PriorEntry, PriorTable};
use crate::spectrum::Spectrum;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TribbleAnchoredParams {
    pub psi0_deg: f64,
    pub rm_radm2: f64,
    pub sigma_rm_radm2: f64,
    pub cell_count: f64,
}

impl_model_parameters!(TribbleAnchoredParams {
    psi0_deg => "psi0_deg",
    rm_radm2 => "RM_radm2",
    sigma_rm_radm2 => "sigmaRM_radm2",
    cell_count => "N",
});

/// Single Tribble component with the polarised fraction pinned to `ref_p`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TribbleAnchored {
    constants: ReferenceConstants,
}

impl TribbleAnchored {
    pub fn new(constants: ReferenceConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> ReferenceConstants {
        self.constants
    }
}

impl FaradayModel for TribbleAnchored {
    type Params = TribbleAnchoredParams;

    fn id(&self) -> ModelId {
        ModelId::TribbleAnchored
    }

    fn priors(&self) -> PriorTable {
        PriorTable::from_entries([
            PriorEntry::from(psi_prior("psi0_deg", r"$\psi_0$ (deg)")),
            rm_prior("RM_radm2", r"RM (rad m$^{-2}$)").into(),
            sigma_rm_prior(0.0, 20.0).into(),
            cell_count_prior().into(),
        ])
    }

    fn evaluate(&self, params: &Self::Params, lam_sq_m2: &[f64]) -> Spectrum {
        let ref_p = self.constants.ref_p;
        Spectrum::from_grid(lam_sq_m2, |lam_sq| {
            ref_p
                * tribble_envelope(params.cell_count, params.sigma_rm_radm2, lam_sq)
                * faraday_phase(params.psi0_deg, params.rm_radm2, lam_sq)
        })
    }
}
