pub mod burn_slab;
pub mod thin_source;
pub mod tribble;

mod registry;
mod traits;

pub use burn_slab::{BurnSlab, BurnSlabParams};
pub use registry::ModelRegistry;
pub use thin_source::{ThinSource, ThinSourceParams};
pub use traits::{FaradayModel, ModelParameters, ParameterSetModel, check_grid, check_spectrum};
pub use tribble::{
    TribbleAnchored, TribbleAnchoredParams, TribbleFracPol, TribbleFracPolParams,
    TribbleSpectralIndex, TribbleSpectralIndexParams, TribbleTwoComponent,
    TribbleTwoComponentParams,
};

pub(crate) use traits::impl_model_parameters;
