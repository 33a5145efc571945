use super::{cell_count_prior, psi_prior, rm_prior, sigma_rm_prior};
use crate::domain::ModelId;
use crate::models::{FaradayModel, impl_model_parameters};
use crate::numerics::{faraday_phase, tribble_envelope};
use crate::priors::{PriorEntry, PriorTable, UniformPrior};
use crate::spectrum::Spectrum;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TribbleFracPolParams {
    pub frac_pol: f64,
    pub psi0_deg: f64,
    pub rm_radm2: f64,
    pub sigma_rm_radm2: f64,
    pub cell_count: f64,
}

impl_model_parameters!(TribbleFracPolParams {
    frac_pol => "fracPol",
    psi0_deg => "psi0_deg",
    rm_radm2 => "RM_radm2",
    sigma_rm_radm2 => "sigmaRM_radm2",
    cell_count => "N",
});

/// Single Tribble component with a freely fitted polarised fraction.
#[derive(Debug, Clone, Copy, Default)]
pub struct TribbleFracPol;

impl FaradayModel for TribbleFracPol {
    type Params = TribbleFracPolParams;

    fn id(&self) -> ModelId {
        ModelId::TribbleFracPol
    }

    fn priors(&self) -> PriorTable {
        PriorTable::from_entries([
            PriorEntry::from(UniformPrior::new("fracPol", 0.001, 1.0, r"$p$")),
            psi_prior("psi0_deg", r"$\psi_0$ (deg)").into(),
            rm_prior("RM_radm2", r"RM (rad m$^{-2}$)").into(),
            sigma_rm_prior(0.0, 20.0).into(),
            cell_count_prior().into(),
        ])
    }

    fn evaluate(&self, params: &Self::Params, lam_sq_m2: &[f64]) -> Spectrum {
        Spectrum::from_grid(lam_sq_m2, |lam_sq| {
            params.frac_pol
                * tribble_envelope(params.cell_count, params.sigma_rm_radm2, lam_sq)
                * faraday_phase(params.psi0_deg, params.rm_radm2, lam_sq)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{TribbleFracPol, TribbleFracPolParams};
    use crate::common::constants::ReferenceConstants;
    use crate::models::tribble::{TribbleAnchored, TribbleAnchoredParams};
    use crate::models::{FaradayModel, ModelParameters};

    fn params(frac_pol: f64) -> TribbleFracPolParams {
        TribbleFracPolParams {
            frac_pol,
            psi0_deg: 135.0,
            rm_radm2: 12.0,
            sigma_rm_radm2: 1.5,
            cell_count: 4.0,
        }
    }

    #[test]
    fn frac_pol_plays_the_role_of_the_reference_fraction() {
        let grid = [0.02, 0.06, 0.1];
        let free = TribbleFracPol.evaluate(&params(0.3), &grid);
        let anchored = TribbleAnchored::new(ReferenceConstants::new(0.3, 22.8e9)).evaluate(
            &TribbleAnchoredParams {
                psi0_deg: 135.0,
                rm_radm2: 12.0,
                sigma_rm_radm2: 1.5,
                cell_count: 4.0,
            },
            &grid,
        );
        assert!(free.max_abs_difference(&anchored).expect("same length") <= 1.0e-14);
    }

    #[test]
    fn amplitude_matches_closed_form() {
        let spectrum = TribbleFracPol.evaluate(&params(0.3), &[0.05]);
        let expected = 0.3 * 0.5 / (1.5 * 0.05 * 2.0_f64.sqrt());
        assert!((spectrum.fractional_polarization()[0] - expected).abs() <= 1.0e-13);
    }

    #[test]
    fn zero_fractional_polarisation_gives_zero_spectrum() {
        let spectrum = TribbleFracPol.evaluate(&params(0.0), &[0.01, 0.2]);
        assert!(spectrum.values().iter().all(|value| value.norm() == 0.0));
    }

    #[test]
    fn half_turn_of_psi_reproduces_spectrum() {
        let grid = [0.015, 0.09];
        let shifted = TribbleFracPolParams {
            psi0_deg: 315.0,
            ..params(0.3)
        };
        let base = TribbleFracPol.evaluate(&params(0.3), &grid);
        let turned = TribbleFracPol.evaluate(&shifted, &grid);
        assert!(base.max_abs_difference(&turned).expect("same length") <= 1.0e-12);
    }

    #[test]
    fn prior_table_covers_every_parameter() {
        let priors = TribbleFracPol.priors();
        assert_eq!(priors.sampled_names(), TribbleFracPolParams::NAMES);
        assert_eq!(priors.periodic_names(), ["psi0_deg"]);
    }
}
