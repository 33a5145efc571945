use super::{FaradayModel, impl_model_parameters};
use crate::domain::ModelId;
use crate::numerics::{burn_attenuation, faraday_phase};
use crate::priors::{PriorEntry, PriorTable, UniformPrior};
use crate::spectrum::Spectrum;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurnSlabParams {
    pub frac_pol: f64,
    pub psi0_deg: f64,
    pub rm_radm2: f64,
    pub sigma_rm_radm2: f64,
}

impl_model_parameters!(BurnSlabParams {
    frac_pol => "fracPol",
    psi0_deg => "psi0_deg",
    rm_radm2 => "RM_radm2",
    sigma_rm_radm2 => "sigmaRM_radm2",
});

/// Thin source behind a Burn (external Faraday dispersion) screen.
///
/// The amplitude falls as `exp(-2σ²λ⁴)`; with `RM_radm2 = psi0_deg = 0` this
/// reduces to the real-valued depolarisation curve.
#[derive(Debug, Clone, Copy, Default)]
pub struct BurnSlab;

impl FaradayModel for BurnSlab {
    type Params = BurnSlabParams;

    fn id(&self) -> ModelId {
        ModelId::BurnSlab
    }

    fn priors(&self) -> PriorTable {
        PriorTable::from_entries([
            PriorEntry::from(UniformPrior::new("fracPol", 0.001, 1.0, r"$p$")),
            UniformPrior::new("psi0_deg", 0.0, 180.0, r"$\psi_0$ (deg)")
                .periodic()
                .into(),
            UniformPrior::new("RM_radm2", -200.0, 200.0, r"RM (rad m$^{-2}$)").into(),
            UniformPrior::new(
                "sigmaRM_radm2",
                0.0,
                20.0,
                r"$\sigma_{RM}$ (rad m$^{-2}$)",
            )
            .into(),
        ])
    }

    fn evaluate(&self, params: &Self::Params, lam_sq_m2: &[f64]) -> Spectrum {
        Spectrum::from_grid(lam_sq_m2, |lam_sq| {
            params.frac_pol
                * burn_attenuation(params.sigma_rm_radm2, lam_sq)
                * faraday_phase(params.psi0_deg, params.rm_radm2, lam_sq)
        })
    }
}
