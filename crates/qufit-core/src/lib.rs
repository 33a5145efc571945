//! Forward models and prior tables for Faraday-rotation QU fitting.
//!
//! Each model maps a named parameter set and a grid of λ² values (m²) to the
//! predicted fractional `Q + iU` spectrum. Samplers drive the models through
//! [`models::ModelRegistry`] and use the matching [`priors::PriorTable`] to
//! rescale, wrap and reject samples.

pub mod common;
pub mod domain;
pub mod models;
pub mod numerics;
pub mod priors;
pub mod spectrum;

pub use domain::{
    EvaluationMode, ModelId, ParameterSet, QuFitError, QuFitErrorCategory, QuFitResult,
};
pub use models::{FaradayModel, ModelParameters, ModelRegistry, ParameterSetModel};
pub use priors::PriorTable;
pub use spectrum::Spectrum;
