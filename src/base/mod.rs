//! Implements the base structures: parameters, configuration, and time-discretization data

mod calculate_strain;
mod config;
mod control;
mod dyn_coefficients;
mod idealization;
mod parameters;
mod sample_meshes;
pub(crate) use crate::base::calculate_strain::*;
pub use crate::base::config::*;
pub use crate::base::control::*;
pub use crate::base::dyn_coefficients::*;
pub use crate::base::idealization::*;
pub use crate::base::parameters::*;
pub use crate::base::sample_meshes::*;
