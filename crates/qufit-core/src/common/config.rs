//! Prior-override configuration.
//!
//! A fitting run can narrow or relabel the built-in prior tables from a JSON
//! file without recompiling:
//!
//! ```json
//! {
//!   "version": "1",
//!   "models": {
//!     "thin_source": { "RM_radm2": { "minimum": -50.0, "maximum": 50.0 } }
//!   }
//! }
//! ```

use crate::domain::{ModelId, QuFitError};
use crate::priors::Boundary;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const PRIOR_OVERRIDES_VERSION: &str = "1";

pub type ModelPriorOverrides = BTreeMap<String, PriorEntryOverride>;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PriorOverrides {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub models: BTreeMap<ModelId, ModelPriorOverrides>,
}

impl Default for PriorOverrides {
    fn default() -> Self {
        Self {
            version: default_version(),
            models: BTreeMap::new(),
        }
    }
}

impl PriorOverrides {
    pub fn from_json_str(source: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(source)
    }

    pub fn for_model(&self, id: ModelId) -> Option<&ModelPriorOverrides> {
        self.models.get(&id)
    }
}

/// Fields left unset keep the built-in value.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PriorEntryOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latex_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary: Option<Boundary>,
}

#[derive(Debug, thiserror::Error)]
pub enum PriorConfigError {
    #[error("failed to read prior overrides '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse prior overrides '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(
        "unsupported prior overrides version '{found}', expected '{expected}'",
        expected = PRIOR_OVERRIDES_VERSION
    )]
    UnsupportedVersion { found: String },
    #[error("prior override names unknown entry '{name}'")]
    UnknownEntry { name: String },
    #[error("prior '{name}' has an empty or non-finite interval [{minimum}, {maximum}]")]
    InvalidBounds {
        name: String,
        minimum: f64,
        maximum: f64,
    },
    #[error("prior override for constraint '{name}' cannot set a boundary")]
    BoundaryOnConstraint { name: String },
}

impl From<PriorConfigError> for QuFitError {
    fn from(error: PriorConfigError) -> Self {
        QuFitError::configuration("CONFIG.PRIOR_OVERRIDES", error.to_string())
    }
}

pub fn load_prior_overrides(path: impl AsRef<Path>) -> Result<PriorOverrides, PriorConfigError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| PriorConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let overrides =
        PriorOverrides::from_json_str(&source).map_err(|source| PriorConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    if overrides.version != PRIOR_OVERRIDES_VERSION {
        return Err(PriorConfigError::UnsupportedVersion {
            found: overrides.version,
        });
    }

    tracing::debug!(
        path = %path.display(),
        models = overrides.models.len(),
        "loaded prior overrides"
    );
    Ok(overrides)
}

fn default_version() -> String {
    PRIOR_OVERRIDES_VERSION.to_string()
}

#[cfg(test)]
mod tests {
    use super::{PriorConfigError, PriorOverrides, load_prior_overrides};
    use crate::domain::{ModelId, QuFitError, QuFitErrorCategory};
    use crate::priors::Boundary;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn overrides_parse_with_defaults() {
        let overrides = PriorOverrides::from_json_str(
            r#"{ "models": { "m14": {}, "burn_slab": { "sigmaRM_radm2": { "maximum": 5.0 } } } }"#,
        );
        // Map keys use model ids, not legacy labels.
        assert!(overrides.is_err());

        let overrides = PriorOverrides::from_json_str(
            r#"{ "models": { "burn_slab": { "sigmaRM_radm2": { "maximum": 5.0, "boundary": "reflective" } } } }"#,
        )
        .expect("overrides should parse");
        assert_eq!(overrides.version, "1");

        let burn = overrides
            .for_model(ModelId::BurnSlab)
            .expect("burn overrides");
        let sigma = &burn["sigmaRM_radm2"];
        assert_eq!(sigma.minimum, None);
        assert_eq!(sigma.maximum, Some(5.0));
        assert_eq!(sigma.boundary, Some(Boundary::Reflective));
        assert!(overrides.for_model(ModelId::ThinSource).is_none());
    }

    #[test]
    fn unknown_override_fields_are_rejected() {
        let result = PriorOverrides::from_json_str(
            r#"{ "models": { "thin_source": { "RM_radm2": { "max": 5.0 } } } }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn load_reports_missing_and_malformed_files() {
        let temp = TempDir::new().expect("tempdir should be created");

        let missing = load_prior_overrides(temp.path().join("absent.json"))
            .expect_err("missing file should fail");
        assert!(matches!(missing, PriorConfigError::Read { .. }));

        let malformed_path = temp.path().join("malformed.json");
        fs::write(&malformed_path, "{ not json").expect("write fixture");
        let malformed =
            load_prior_overrides(&malformed_path).expect_err("malformed file should fail");
        assert!(matches!(malformed, PriorConfigError::Parse { .. }));
        assert!(malformed.to_string().contains("malformed.json"));

        let versioned_path = temp.path().join("versioned.json");
        fs::write(&versioned_path, r#"{ "version": "7" }"#).expect("write fixture");
        let versioned =
            load_prior_overrides(&versioned_path).expect_err("unknown version should fail");
        assert!(matches!(
            versioned,
            PriorConfigError::UnsupportedVersion { ref found } if found == "7"
        ));
    }

    #[test]
    fn config_errors_convert_to_configuration_category() {
        let error: QuFitError = PriorConfigError::UnknownEntry {
            name: "alpha".to_string(),
        }
        .into();
        assert_eq!(error.category(), QuFitErrorCategory::ConfigurationError);
        assert_eq!(error.placeholder(), "CONFIG.PRIOR_OVERRIDES");
        assert_eq!(error.message(), "prior override names unknown entry 'alpha'");
    }
}
