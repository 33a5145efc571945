use super::{FaradayModel, impl_model_parameters};
use crate::domain::ModelId;
use crate::numerics::faraday_phase;
use crate::priors::{PriorEntry, PriorTable, UniformPrior};
use crate::spectrum::Spectrum;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThinSourceParams {
    pub frac_pol: f64,
    pub psi0_deg: f64,
    pub rm_radm2: f64,
}

impl_model_parameters!(ThinSourceParams {
    frac_pol => "fracPol",
    psi0_deg => "psi0_deg",
    rm_radm2 => "RM_radm2",
});

/// Simple Faraday thin source: constant polarised fraction, no depolarisation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThinSource;

impl FaradayModel for ThinSource {
    type Params = ThinSourceParams;

    fn id(&self) -> ModelId {
        ModelId::ThinSource
    }

    fn priors(&self) -> PriorTable {
        PriorTable::from_entries([
            PriorEntry::from(UniformPrior::new("fracPol", 0.001, 1.0, r"$p$")),
            UniformPrior::new("psi0_deg", 0.0, 180.0, r"$\psi_0$ (deg)")
                .periodic()
                .into(),
            UniformPrior::new("RM_radm2", -200.0, 200.0, r"RM (rad m$^{-2}$)").into(),
        ])
    }

    fn evaluate(&self, params: &Self::Params, lam_sq_m2: &[f64]) -> Spectrum {
        Spectrum::from_grid(lam_sq_m2, |lam_sq| {
            params.frac_pol * faraday_phase(params.psi0_deg, params.rm_radm2, lam_sq)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ThinSource, ThinSourceParams};
    use crate::models::{FaradayModel, ModelParameters};
    use num_complex::Complex64;
    use std::f64::consts::{FRAC_PI_4, TAU};

    const GRID: [f64; 3] = [0.01, 0.04, 0.09];

    #[test]
    fn reference_scenario_matches_closed_form() {
        let params = ThinSourceParams {
            frac_pol: 0.5,
            psi0_deg: 45.0,
            rm_radm2: 10.0,
        };
        let spectrum = ThinSource.evaluate(&params, &GRID);
        assert_eq!(spectrum.len(), 3);

        for (value, lam_sq) in spectrum.values().iter().zip(GRID) {
            let expected =
                0.5 * (Complex64::new(0.0, 2.0) * (FRAC_PI_4 + 10.0 * lam_sq)).exp();
            assert!((value - expected).norm() <= 1.0e-14, "lam_sq={lam_sq}");
            assert!((value.norm() - 0.5).abs() <= 1.0e-14);
        }

        // Phase advances linearly: Δarg = 2·RM·Δλ².
        let phases: Vec<f64> = spectrum
            .values()
            .iter()
            .zip(GRID)
            .map(|(value, lam_sq)| {
                let expected = 2.0 * (FRAC_PI_4 + 10.0 * lam_sq);
                let wrapped = value.arg();
                wrapped + ((expected - wrapped) / TAU).round() * TAU
            })
            .collect();
        assert!(((phases[1] - phases[0]) - 2.0 * 10.0 * 0.03).abs() <= 1.0e-12);
        assert!(((phases[2] - phases[1]) - 2.0 * 10.0 * 0.05).abs() <= 1.0e-12);
    }

    #[test]
    fn amplitude_is_wavelength_independent() {
        let params = ThinSourceParams {
            frac_pol: 0.37,
            psi0_deg: 120.0,
            rm_radm2: -150.0,
        };
        let grid: Vec<f64> = (0..50).map(|index| index as f64 * 0.002).collect();
        for value in ThinSource.evaluate(&params, &grid).fractional_polarization() {
            assert!((value - 0.37).abs() <= 1.0e-14);
        }
    }

    #[test]
    fn zero_fractional_polarisation_gives_zero_spectrum() {
        let params = ThinSourceParams {
            frac_pol: 0.0,
            psi0_deg: 30.0,
            rm_radm2: 80.0,
        };
        let spectrum = ThinSource.evaluate(&params, &GRID);
        assert!(spectrum.values().iter().all(|value| value.norm() == 0.0));
    }

    #[test]
    fn half_turn_of_psi_reproduces_spectrum() {
        let params = ThinSourceParams {
            frac_pol: 0.8,
            psi0_deg: 17.0,
            rm_radm2: 42.0,
        };
        let shifted = ThinSourceParams {
            psi0_deg: params.psi0_deg + 180.0,
            ..params
        };
        let base = ThinSource.evaluate(&params, &GRID);
        let turned = ThinSource.evaluate(&shifted, &GRID);
        assert!(base.max_abs_difference(&turned).expect("same length") <= 1.0e-12);
    }

    #[test]
    fn prior_table_covers_every_parameter() {
        let priors = ThinSource.priors();
        assert_eq!(priors.sampled_names(), ThinSourceParams::NAMES);
        assert_eq!(priors.periodic_names(), ["psi0_deg"]);
        assert!(priors.constraint_names().is_empty());
    }

    #[test]
    fn empty_grid_gives_empty_spectrum() {
        let params = ThinSourceParams {
            frac_pol: 0.5,
            psi0_deg: 0.0,
            rm_radm2: 0.0,
        };
        assert!(ThinSource.evaluate(&params, &[]).is_empty());
    }
}
