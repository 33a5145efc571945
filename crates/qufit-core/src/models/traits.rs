use crate::domain::{EvaluationMode, ModelId, ParameterSet, QuFitError, QuFitResult};
use crate::priors::PriorTable;
use crate::spectrum::Spectrum;

/// Strongly-typed parameter record for one model.
pub trait ModelParameters: Sized {
    /// Parameter-set keys read by the model, in declaration order.
    const NAMES: &'static [&'static str];

    fn from_parameter_set(params: &ParameterSet) -> QuFitResult<Self>;

    fn to_parameter_set(&self) -> ParameterSet;
}

pub trait FaradayModel: Send + Sync {
    type Params: ModelParameters;

    fn id(&self) -> ModelId;

    fn priors(&self) -> PriorTable;

    /// Predicted fractional `Q + iU` at each λ² (m²). Pure; degenerate
    /// inputs yield non-finite samples rather than errors.
    fn evaluate(&self, params: &Self::Params, lam_sq_m2: &[f64]) -> Spectrum;

    fn evaluate_with_mode(
        &self,
        params: &Self::Params,
        lam_sq_m2: &[f64],
        mode: EvaluationMode,
    ) -> QuFitResult<Spectrum> {
        if mode == EvaluationMode::Strict {
            check_grid(self.id(), lam_sq_m2)?;
        }
        let spectrum = self.evaluate(params, lam_sq_m2);
        if mode == EvaluationMode::Strict {
            check_spectrum(self.id(), &spectrum)?;
        }
        Ok(spectrum)
    }
}

/// Name-keyed view of a [`FaradayModel`], used where models are selected at runtime.
pub trait ParameterSetModel: Send + Sync {
    fn model_id(&self) -> ModelId;

    fn parameter_names(&self) -> &'static [&'static str];

    fn prior_table(&self) -> PriorTable;

    fn evaluate_parameter_set(
        &self,
        params: &ParameterSet,
        lam_sq_m2: &[f64],
        mode: EvaluationMode,
    ) -> QuFitResult<Spectrum>;
}

impl<T> ParameterSetModel for T
where
    T: FaradayModel,
{
    fn model_id(&self) -> ModelId {
        self.id()
    }

    fn parameter_names(&self) -> &'static [&'static str] {
        T::Params::NAMES
    }

    fn prior_table(&self) -> PriorTable {
        self.priors()
    }

    fn evaluate_parameter_set(
        &self,
        params: &ParameterSet,
        lam_sq_m2: &[f64],
        mode: EvaluationMode,
    ) -> QuFitResult<Spectrum> {
        let typed = T::Params::from_parameter_set(params).map_err(|error| {
            QuFitError::new(
                error.category(),
                error.placeholder(),
                format!("model '{}': {}", self.id(), error.message()),
            )
        })?;
        self.evaluate_with_mode(&typed, lam_sq_m2, mode)
    }
}

/// Strict-mode grid validation: finite values, strictly positive when the
/// model divides by λ², non-negative otherwise.
pub fn check_grid(id: ModelId, lam_sq_m2: &[f64]) -> QuFitResult<()> {
    for (index, value) in lam_sq_m2.iter().copied().enumerate() {
        if !value.is_finite() {
            tracing::warn!(model = %id, index, value, "non-finite wavelength-squared sample");
            return Err(QuFitError::input_validation(
                "GRID.NON_FINITE",
                format!("model '{id}': lambda-squared at index {index} is not finite ({value})"),
            ));
        }

        let rejected = if id.requires_positive_grid() {
            value <= 0.0
        } else {
            value < 0.0
        };
        if rejected {
            tracing::warn!(model = %id, index, value, "degenerate wavelength-squared sample");
            return Err(QuFitError::input_validation(
                "GRID.NON_POSITIVE",
                format!(
                    "model '{id}': lambda-squared at index {index} must be {}, got {value}",
                    if id.requires_positive_grid() {
                        "> 0"
                    } else {
                        ">= 0"
                    }
                ),
            ));
        }
    }
    Ok(())
}

pub fn check_spectrum(id: ModelId, spectrum: &Spectrum) -> QuFitResult<()> {
    match spectrum.first_non_finite() {
        Some((index, value)) => {
            tracing::warn!(model = %id, index, %value, "model produced a non-finite sample");
            Err(QuFitError::computation(
                "SPECTRUM.NON_FINITE",
                format!("model '{id}': spectrum sample {index} is not finite ({value})"),
            ))
        }
        None => Ok(()),
    }
}

/// Implements [`ModelParameters`] for a record whose fields map one-to-one
/// onto parameter-set keys.
macro_rules! impl_model_parameters {
    ($params:ty { $($field:ident => $key:literal),+ $(,)? }) => {
        impl $crate::models::ModelParameters for $params {
            const NAMES: &'static [&'static str] = &[$($key),+];

            fn from_parameter_set(
                params: &$crate::domain::ParameterSet,
            ) -> $crate::domain::QuFitResult<Self> {
                Ok(Self {
                    $($field: params.require($key)?,)+
                })
            }

            fn to_parameter_set(&self) -> $crate::domain::ParameterSet {
                $crate::domain::ParameterSet::new()$(.with($key, self.$field))+
            }
        }
    };
}

pub(crate) use impl_model_parameters;
