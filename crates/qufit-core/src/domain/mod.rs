pub mod errors;

pub use errors::{QuFitError, QuFitErrorCategory, QuFitResult};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelId {
    ThinSource,
    BurnSlab,
    TribbleSpectralIndex,
    TribbleAnchored,
    TribbleTwoComponent,
    TribbleFracPol,
}

impl ModelId {
    pub const ALL: [ModelId; 6] = [
        Self::ThinSource,
        Self::BurnSlab,
        Self::TribbleSpectralIndex,
        Self::TribbleAnchored,
        Self::TribbleTwoComponent,
        Self::TribbleFracPol,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ThinSource => "thin_source",
            Self::BurnSlab => "burn_slab",
            Self::TribbleSpectralIndex => "tribble_spectral_index",
            Self::TribbleAnchored => "tribble_anchored",
            Self::TribbleTwoComponent => "tribble_two_component",
            Self::TribbleFracPol => "tribble_frac_pol",
        }
    }

    /// Model-file label used by existing fitting runs.
    ///
    /// The label resolves the model, not its parameter layout: `m22` parameter
    /// sets that carry only `fracPol` and `sigmaRM_radm2` also need
    /// `psi0_deg` and `RM_radm2`, since `burn_slab` includes the Faraday phase.
    pub const fn legacy_label(self) -> &'static str {
        match self {
            Self::ThinSource => "m14",
            Self::BurnSlab => "m22",
            Self::TribbleSpectralIndex => "m5-checkpoint",
            Self::TribbleAnchored => "m5",
            Self::TribbleTwoComponent => "m55",
            Self::TribbleFracPol => "m6",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::ThinSource => "Simple Faraday thin source",
            Self::BurnSlab => "Faraday thin source with Burn depolarisation",
            Self::TribbleSpectralIndex => {
                "Single Faraday component with Tribble depolarisation and spectral index"
            }
            Self::TribbleAnchored => {
                "Single Faraday component with Tribble depolarisation and anchored p0"
            }
            Self::TribbleTwoComponent => {
                "Two Faraday components with Tribble depolarisation and anchored p0"
            }
            Self::TribbleFracPol => {
                "Single Faraday component with Tribble depolarisation and free fractional polarisation"
            }
        }
    }

    /// Whether the model divides by λ² and therefore needs a strictly positive grid.
    pub const fn requires_positive_grid(self) -> bool {
        !matches!(self, Self::ThinSource | Self::BurnSlab)
    }

    /// Resolve either a model id or a legacy label, ignoring case and surrounding whitespace.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized = label.trim();
        if normalized.is_empty() {
            return None;
        }

        Self::ALL.into_iter().find(|id| {
            id.as_str().eq_ignore_ascii_case(normalized)
                || id.legacy_label().eq_ignore_ascii_case(normalized)
        })
    }
}

impl Display for ModelId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EvaluationMode {
    /// Degenerate inputs propagate into the spectrum as non-finite values.
    #[default]
    Permissive,
    /// Degenerate grids and non-finite spectra are reported as errors.
    Strict,
}

/// Named real-valued parameters for one model evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSet {
    values: BTreeMap<String, f64>,
}

impl ParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.values.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn require(&self, name: &str) -> QuFitResult<f64> {
        self.get(name).ok_or_else(|| {
            QuFitError::input_validation(
                "PARAMS.MISSING_KEY",
                format!("parameter '{name}' is missing from the parameter set"),
            )
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ParameterSet {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}
