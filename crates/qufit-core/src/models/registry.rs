use super::traits::ParameterSetModel;
use super::{
    BurnSlab, ThinSource, TribbleAnchored, TribbleFracPol, TribbleSpectralIndex,
    TribbleTwoComponent,
};
use crate::common::config::{PRIOR_OVERRIDES_VERSION, PriorConfigError, PriorOverrides};
use crate::common::constants::ReferenceConstants;
use crate::domain::{EvaluationMode, ModelId, ParameterSet, QuFitError, QuFitResult};
use crate::priors::PriorTable;
use crate::spectrum::Spectrum;
use std::collections::BTreeMap;
use std::fmt::{Debug, Formatter};

struct RegisteredModel {
    model: Box<dyn ParameterSetModel>,
    priors: PriorTable,
}

/// Runtime lookup of models and their (possibly overridden) prior tables by id.
#[derive(Default)]
pub struct ModelRegistry {
    models: BTreeMap<ModelId, RegisteredModel>,
}

impl Debug for ModelRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelRegistry")
            .field("models", &self.ids())
            .finish()
    }
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All six model variants, the Tribble family sharing `constants`.
    pub fn standard(constants: ReferenceConstants) -> QuFitResult<Self> {
        let mut registry = Self::new();
        registry.register(ThinSource)?;
        registry.register(BurnSlab)?;
        registry.register(TribbleSpectralIndex::new(constants))?;
        registry.register(TribbleAnchored::new(constants))?;
        registry.register(TribbleTwoComponent::new(constants))?;
        registry.register(TribbleFracPol)?;

        tracing::debug!(
            models = registry.models.len(),
            ref_p = constants.ref_p,
            ref_freq_hz = constants.ref_freq_hz,
            "built standard model registry"
        );
        Ok(registry)
    }

    /// Registers a model under its own id, replacing any previous entry.
    pub fn register<M>(&mut self, model: M) -> QuFitResult<()>
    where
        M: ParameterSetModel + 'static,
    {
        let id = model.model_id();
        let priors = model.prior_table();
        check_prior_table(id, model.parameter_names(), &priors)?;

        let replaced = self
            .models
            .insert(
                id,
                RegisteredModel {
                    model: Box::new(model),
                    priors,
                },
            )
            .is_some();
        tracing::debug!(model = %id, replaced, "registered model");
        Ok(())
    }

    pub fn get(&self, id: ModelId) -> Option<&dyn ParameterSetModel> {
        self.models.get(&id).map(|entry| entry.model.as_ref())
    }

    pub fn contains(&self, id: ModelId) -> bool {
        self.models.contains_key(&id)
    }

    pub fn ids(&self) -> Vec<ModelId> {
        self.models.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn priors(&self, id: ModelId) -> QuFitResult<&PriorTable> {
        self.entry(id).map(|entry| &entry.priors)
    }

    pub fn evaluate(
        &self,
        id: ModelId,
        params: &ParameterSet,
        lam_sq_m2: &[f64],
        mode: EvaluationMode,
    ) -> QuFitResult<Spectrum> {
        let entry = self.entry(id)?;
        if mode == EvaluationMode::Strict {
            tracing::debug!(model = %id, samples = lam_sq_m2.len(), "strict evaluation");
        }
        entry.model.evaluate_parameter_set(params, lam_sq_m2, mode)
    }

    /// Re-checks every model's parameter names against its current prior
    /// table and reports constraints that no conversion ever resolves.
    pub fn validate(&self) -> QuFitResult<()> {
        for (id, entry) in &self.models {
            check_prior_table(*id, entry.model.parameter_names(), &entry.priors)?;

            let midpoint = vec![0.5; entry.priors.sampled_names().len()];
            let sample = entry.priors.rescale(&midpoint)?;
            for name in entry.priors.unresolved_constraints(&sample) {
                tracing::warn!(model = %id, constraint = name, "constraint is never resolved");
            }
        }
        Ok(())
    }

    /// Applies prior overrides to every named model. Either every override
    /// lands or no table changes.
    pub fn apply_overrides(&mut self, overrides: &PriorOverrides) -> QuFitResult<()> {
        if overrides.version != PRIOR_OVERRIDES_VERSION {
            return Err(PriorConfigError::UnsupportedVersion {
                found: overrides.version.clone(),
            }
            .into());
        }

        let mut updated = Vec::with_capacity(overrides.models.len());
        for (id, model_overrides) in &overrides.models {
            let mut priors = self.entry(*id)?.priors.clone();
            priors.apply_overrides(model_overrides).map_err(|error| {
                QuFitError::configuration(
                    "CONFIG.PRIOR_OVERRIDES",
                    format!("model '{id}': {error}"),
                )
            })?;
            updated.push((*id, priors));
        }

        for (id, priors) in updated {
            if let Some(entry) = self.models.get_mut(&id) {
                entry.priors = priors;
            }
        }
        tracing::debug!(models = overrides.models.len(), "applied prior overrides");
        Ok(())
    }

    fn entry(&self, id: ModelId) -> QuFitResult<&RegisteredModel> {
        self.models.get(&id).ok_or_else(|| {
            QuFitError::input_validation(
                "REGISTRY.UNKNOWN_MODEL",
                format!("model '{id}' is not registered"),
            )
        })
    }
}

fn check_prior_table(
    id: ModelId,
    parameter_names: &[&str],
    priors: &PriorTable,
) -> QuFitResult<()> {
    priors.check_bounds().map_err(|error| {
        QuFitError::configuration("REGISTRY.INVALID_PRIOR", format!("model '{id}': {error}"))
    })?;

    let sampled = priors.sampled_names();
    let missing: Vec<&str> = parameter_names
        .iter()
        .copied()
        .filter(|name| !sampled.contains(name))
        .collect();
    let unused: Vec<&str> = sampled
        .iter()
        .copied()
        .filter(|name| !parameter_names.contains(name))
        .collect();

    if missing.is_empty() && unused.is_empty() {
        return Ok(());
    }
    Err(QuFitError::configuration(
        "REGISTRY.PRIOR_MISMATCH",
        format!(
            "model '{id}': parameters without a prior [{}], priors without a parameter [{}]",
            missing.join(", "),
            unused.join(", ")
        ),
    ))
}
