use super::{ConstraintPrior, UniformPrior};
use crate::common::config::{ModelPriorOverrides, PriorConfigError};
use crate::domain::{ParameterSet, QuFitError, QuFitResult};
use serde::{Deserialize, Serialize};

/// Augments a sampled parameter set with derived quantities before
/// constraints are evaluated.
pub type ConversionFunction = fn(&ParameterSet) -> ParameterSet;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PriorEntry {
    Uniform(UniformPrior),
    Constraint(ConstraintPrior),
}

impl PriorEntry {
    pub fn name(&self) -> &str {
        match self {
            Self::Uniform(prior) => &prior.name,
            Self::Constraint(constraint) => &constraint.name,
        }
    }

    pub fn latex_label(&self) -> &str {
        match self {
            Self::Uniform(prior) => &prior.latex_label,
            Self::Constraint(constraint) => &constraint.latex_label,
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Self::Uniform(prior) => (prior.minimum, prior.maximum),
            Self::Constraint(constraint) => (constraint.minimum, constraint.maximum),
        }
    }

    pub fn as_uniform(&self) -> Option<&UniformPrior> {
        match self {
            Self::Uniform(prior) => Some(prior),
            Self::Constraint(_) => None,
        }
    }

    pub fn as_constraint(&self) -> Option<&ConstraintPrior> {
        match self {
            Self::Uniform(_) => None,
            Self::Constraint(constraint) => Some(constraint),
        }
    }

    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }
}

impl From<UniformPrior> for PriorEntry {
    fn from(prior: UniformPrior) -> Self {
        Self::Uniform(prior)
    }
}

impl From<ConstraintPrior> for PriorEntry {
    fn from(constraint: ConstraintPrior) -> Self {
        Self::Constraint(constraint)
    }
}

/// Parameter domain for one model: sampled uniform entries, derived
/// constraints, and the conversion that produces the derived keys.
///
/// Entries keep insertion order, which is also the order of unit-hypercube
/// coordinates accepted by [`PriorTable::rescale`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorTable {
    entries: Vec<PriorEntry>,
    #[serde(skip)]
    conversion: Option<ConversionFunction>,
}

impl PriorTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_conversion(conversion: ConversionFunction) -> Self {
        Self {
            entries: Vec::new(),
            conversion: Some(conversion),
        }
    }

    pub fn from_entries<I, E>(entries: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<PriorEntry>,
    {
        let mut table = Self::new();
        for entry in entries {
            table.insert(entry);
        }
        table
    }

    /// Add an entry, replacing any existing entry of the same name in place.
    pub fn insert(&mut self, entry: impl Into<PriorEntry>) -> Option<PriorEntry> {
        let entry = entry.into();
        match self
            .entries
            .iter_mut()
            .find(|existing| existing.name() == entry.name())
        {
            Some(existing) => Some(std::mem::replace(existing, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&PriorEntry> {
        self.entries.iter().find(|entry| entry.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PriorEntry] {
        &self.entries
    }

    pub fn conversion(&self) -> Option<ConversionFunction> {
        self.conversion
    }

    pub fn uniform_priors(&self) -> impl Iterator<Item = &UniformPrior> {
        self.entries.iter().filter_map(PriorEntry::as_uniform)
    }

    pub fn constraints(&self) -> impl Iterator<Item = &ConstraintPrior> {
        self.entries.iter().filter_map(PriorEntry::as_constraint)
    }

    pub fn sampled_names(&self) -> Vec<&str> {
        self.uniform_priors().map(|prior| prior.name.as_str()).collect()
    }

    pub fn constraint_names(&self) -> Vec<&str> {
        self.constraints()
            .map(|constraint| constraint.name.as_str())
            .collect()
    }

    pub fn periodic_names(&self) -> Vec<&str> {
        self.uniform_priors()
            .filter(|prior| prior.is_periodic())
            .map(|prior| prior.name.as_str())
            .collect()
    }

    pub fn labels(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .map(|entry| (entry.name(), entry.latex_label()))
            .collect()
    }

    /// Apply the conversion function, or copy the sample when there is none.
    pub fn convert(&self, sample: &ParameterSet) -> ParameterSet {
        match self.conversion {
            Some(conversion) => conversion(sample),
            None => sample.clone(),
        }
    }

    /// Constraints whose key is still absent after conversion.
    pub fn unresolved_constraints(&self, sample: &ParameterSet) -> Vec<&str> {
        let converted = self.convert(sample);
        self.constraints()
            .filter(|constraint| !converted.contains(&constraint.name))
            .map(|constraint| constraint.name.as_str())
            .collect()
    }

    /// True when every resolvable constraint holds for the converted sample.
    ///
    /// Constraints with no value after conversion are skipped.
    pub fn evaluate_constraints(&self, sample: &ParameterSet) -> bool {
        let converted = self.convert(sample);
        self.constraints()
            .all(|constraint| match converted.get(&constraint.name) {
                Some(value) => constraint.is_satisfied(value),
                None => {
                    tracing::trace!(
                        constraint = %constraint.name,
                        "constraint has no derived value; skipping"
                    );
                    true
                }
            })
    }

    /// Map unit-hypercube coordinates onto the sampled parameters, in entry order.
    pub fn rescale(&self, unit: &[f64]) -> QuFitResult<ParameterSet> {
        let sampled: Vec<&UniformPrior> = self.uniform_priors().collect();
        if sampled.len() != unit.len() {
            return Err(QuFitError::input_validation(
                "PRIORS.DIMENSION_MISMATCH",
                format!(
                    "expected {} unit-cube coordinates, got {}",
                    sampled.len(),
                    unit.len()
                ),
            ));
        }

        Ok(sampled
            .into_iter()
            .zip(unit)
            .map(|(prior, coordinate)| (prior.name.as_str(), prior.rescale(*coordinate)))
            .collect())
    }

    pub fn wrap_periodic(&self, sample: &mut ParameterSet) {
        for prior in self.uniform_priors().filter(|prior| prior.is_periodic()) {
            if let Some(value) = sample.get(&prior.name) {
                sample.insert(prior.name.as_str(), prior.wrap(value));
            }
        }
    }

    pub fn in_support(&self, sample: &ParameterSet) -> bool {
        self.uniform_priors().all(|prior| {
            sample
                .get(&prior.name)
                .is_some_and(|value| prior.contains(value))
        }) && self.evaluate_constraints(sample)
    }

    /// Joint log density of the uniform entries, `-inf` outside the support.
    pub fn ln_prob(&self, sample: &ParameterSet) -> f64 {
        if !self.in_support(sample) {
            return f64::NEG_INFINITY;
        }
        self.uniform_priors()
            .filter_map(|prior| sample.get(&prior.name).map(|value| prior.ln_prob(value)))
            .sum()
    }

    /// Rejects entries whose interval is empty, inverted or non-finite.
    pub fn check_bounds(&self) -> Result<(), PriorConfigError> {
        for entry in &self.entries {
            let (minimum, maximum) = entry.bounds();
            if !bounds_are_valid(minimum, maximum) {
                return Err(PriorConfigError::InvalidBounds {
                    name: entry.name().to_string(),
                    minimum,
                    maximum,
                });
            }
        }
        Ok(())
    }

    /// Apply configured overrides; the table is left untouched on error.
    pub fn apply_overrides(
        &mut self,
        overrides: &ModelPriorOverrides,
    ) -> Result<(), PriorConfigError> {
        let mut updated = self.entries.clone();

        for (name, entry_override) in overrides {
            let entry = updated
                .iter_mut()
                .find(|entry| entry.name() == name)
                .ok_or_else(|| PriorConfigError::UnknownEntry { name: name.clone() })?;

            let (current_minimum, current_maximum) = entry.bounds();
            let minimum = entry_override.minimum.unwrap_or(current_minimum);
            let maximum = entry_override.maximum.unwrap_or(current_maximum);
            if !bounds_are_valid(minimum, maximum) {
                return Err(PriorConfigError::InvalidBounds {
                    name: name.clone(),
                    minimum,
                    maximum,
                });
            }

            match entry {
                PriorEntry::Uniform(prior) => {
                    prior.minimum = minimum;
                    prior.maximum = maximum;
                    if let Some(label) = &entry_override.latex_label {
                        prior.latex_label = label.clone();
                    }
                    if let Some(boundary) = entry_override.boundary {
                        prior.boundary = Some(boundary);
                    }
                }
                PriorEntry::Constraint(constraint) => {
                    if entry_override.boundary.is_some() {
                        return Err(PriorConfigError::BoundaryOnConstraint { name: name.clone() });
                    }
                    constraint.minimum = minimum;
                    constraint.maximum = maximum;
                    if let Some(label) = &entry_override.latex_label {
                        constraint.latex_label = label.clone();
                    }
                }
            }

            tracing::debug!(entry = %name, minimum, maximum, "applied prior override");
        }

        self.entries = updated;
        Ok(())
    }
}

fn bounds_are_valid(minimum: f64, maximum: f64) -> bool {
    minimum.is_finite() && maximum.is_finite() && minimum < maximum
}
