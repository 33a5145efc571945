//! Declarative parameter domains handed to an external sampler.
//!
//! Models never consult their priors; the sampler uses the table to map the
//! unit hypercube to physical values, wrap periodic angles and reject
//! samples that break a derived constraint.

mod constraint;
mod table;
mod uniform;

pub use constraint::ConstraintPrior;
pub use table::{ConversionFunction, PriorEntry, PriorTable};
pub use uniform::{Boundary, UniformPrior};
