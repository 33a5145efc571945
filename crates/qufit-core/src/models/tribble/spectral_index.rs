use super::{cell_count_prior, psi_prior, rm_prior, sigma_rm_prior};
use crate::common::constants::ReferenceConstants;
use crate::domain::ModelId;
use crate::models::{FaradayModel, impl_model_parameters};
use crate::numerics::{
    faraday_phase, frequency_from_lambda_sq, spectral_index_scaling, tribble_envelope,
};
use crate::priors::{PriorEntry, PriorTable, UniformPrior};
use crate::spectrum::Spectrum;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TribbleSpectralIndexParams {
    pub psi0_deg: f64,
    pub rm_radm2: f64,
    pub cell_count: f64,
    pub sigma_rm_radm2: f64,
    pub alpha: f64,
}

impl_model_parameters!(TribbleSpectralIndexParams {
    psi0_deg => "psi0_deg",
    rm_radm2 => "RM_radm2",
    cell_count => "N",
    sigma_rm_radm2 => "sigmaRM_radm2",
    alpha => "alpha",
});

/// Single Tribble component whose polarised fraction follows a power law
/// `ref_p·(f/ref_freq)^alpha` anchored at the reference frequency.
#[derive(Debug, Clone, Copy, Default)]
pub struct TribbleSpectralIndex {
    constants: ReferenceConstants,
}

impl TribbleSpectralIndex {
    pub fn new(constants: ReferenceConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> ReferenceConstants {
        self.constants
    }
}

impl FaradayModel for TribbleSpectralIndex {
    type Params = TribbleSpectralIndexParams;

    fn id(&self) -> ModelId {
        ModelId::TribbleSpectralIndex
    }

    // sigmaRM spans [-100, 100]; a negative value flips the envelope sign,
    // which is indistinguishable from a 90 degree shift of psi0.
    fn priors(&self) -> PriorTable {
        PriorTable::from_entries([
            PriorEntry::from(psi_prior("psi0_deg", r"$\psi_0$ (deg)")),
            rm_prior("RM_radm2", r"RM (rad m$^{-2}$)").into(),
            cell_count_prior().into(),
            sigma_rm_prior(-100.0, 100.0).into(),
            UniformPrior::new("alpha", -10.0, 20.0, "alpha").into(),
        ])
    }

    fn evaluate(&self, params: &Self::Params, lam_sq_m2: &[f64]) -> Spectrum {
        let ReferenceConstants { ref_p, ref_freq_hz } = self.constants;
        Spectrum::from_grid(lam_sq_m2, |lam_sq| {
            let frequency_hz = frequency_from_lambda_sq(lam_sq);
            ref_p
                * spectral_index_scaling(frequency_hz, ref_freq_hz, params.alpha)
                * tribble_envelope(params.cell_count, params.sigma_rm_radm2, lam_sq)
                * faraday_phase(params.psi0_deg, params.rm_radm2, lam_sq)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{TribbleSpectralIndex, TribbleSpectralIndexParams};
    use crate::common::constants::ReferenceConstants;
    use crate::models::tribble::{TribbleAnchored, TribbleAnchoredParams};
    use crate::models::{FaradayModel, ModelParameters};
    use crate::numerics::lambda_sq_from_frequency;

    fn params(alpha: f64) -> TribbleSpectralIndexParams {
        TribbleSpectralIndexParams {
            psi0_deg: 10.0,
            rm_radm2: 70.0,
            cell_count: 3.0,
            sigma_rm_radm2: 5.0,
            alpha,
        }
    }

    #[test]
    fn flat_spectrum_matches_anchored_variant() {
        let grid = [0.005, 0.02, 0.08];
        let spectral = TribbleSpectralIndex::default().evaluate(&params(0.0), &grid);
        let anchored = TribbleAnchored::default().evaluate(
            &TribbleAnchoredParams {
                psi0_deg: 10.0,
                rm_radm2: 70.0,
                sigma_rm_radm2: 5.0,
                cell_count: 3.0,
            },
            &grid,
        );
        assert!(spectral.max_abs_difference(&anchored).expect("same length") <= 1.0e-14);
    }

    #[test]
    fn power_law_is_anchored_at_reference_frequency() {
        let constants = ReferenceConstants::default();
        let reference_lam_sq = lambda_sq_from_frequency(constants.ref_freq_hz);
        let model = TribbleSpectralIndex::new(constants);

        let steep = model.evaluate(&params(-2.5), &[reference_lam_sq]);
        let flat = model.evaluate(&params(0.0), &[reference_lam_sq]);
        assert!(steep.max_abs_difference(&flat).expect("same length") <= 1.0e-9);
    }

    #[test]
    fn power_law_scales_with_frequency_ratio() {
        let model = TribbleSpectralIndex::new(ReferenceConstants::new(1.0, 1.5e9));
        // λ² = 0.04 m² is 1.5 GHz, λ² = 0.16 m² is 0.75 GHz.
        let flat = model.evaluate(&params(0.0), &[0.04, 0.16]);
        let steep = model.evaluate(&params(2.0), &[0.04, 0.16]);

        let flat_amplitude = flat.fractional_polarization();
        let steep_amplitude = steep.fractional_polarization();
        assert!((steep_amplitude[0] / flat_amplitude[0] - 1.0).abs() <= 1.0e-12);
        assert!((steep_amplitude[1] / flat_amplitude[1] - 0.25).abs() <= 1.0e-12);
    }

    #[test]
    fn half_turn_of_psi_reproduces_spectrum() {
        let grid = [0.01, 0.05];
        let model = TribbleSpectralIndex::default();
        let shifted = TribbleSpectralIndexParams {
            psi0_deg: 190.0,
            ..params(-0.7)
        };
        let base = model.evaluate(&params(-0.7), &grid);
        let turned = model.evaluate(&shifted, &grid);
        assert!(base.max_abs_difference(&turned).expect("same length") <= 1.0e-10);
    }

    #[test]
    fn zero_reference_fraction_gives_zero_spectrum() {
        let model = TribbleSpectralIndex::new(ReferenceConstants::new(0.0, 22.8e9));
        let spectrum = model.evaluate(&params(1.0), &[0.01, 0.1]);
        assert!(spectrum.values().iter().all(|value| value.norm() == 0.0));
    }

    #[test]
    fn prior_table_covers_every_parameter() {
        let priors = TribbleSpectralIndex::default().priors();
        assert_eq!(priors.sampled_names(), TribbleSpectralIndexParams::NAMES);
        let sigma = priors
            .get("sigmaRM_radm2")
            .and_then(|entry| entry.as_uniform())
            .expect("sigma prior");
        assert_eq!((sigma.minimum, sigma.maximum), (-100.0, 100.0));
    }
}
