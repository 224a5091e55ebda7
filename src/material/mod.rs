//! Implements material models: liquid retention, porous media, and stress-strain relations

mod linear_elastic;
mod liquid_retention;
mod local_state;
mod local_state_porous;
mod model_brooks_corey;
mod model_conductivity;
mod model_linear_retention;
mod model_pedroso_zhang_ehlers;
mod model_porous;
mod model_real_density;
mod model_van_genuchten;
mod porous_driver;
mod retention_registry;
mod stress_strain;
mod von_mises;
pub use crate::material::linear_elastic::*;
pub use crate::material::liquid_retention::*;
pub use crate::material::local_state::*;
pub use crate::material::local_state_porous::*;
pub use crate::material::model_brooks_corey::*;
pub use crate::material::model_conductivity::*;
pub use crate::material::model_linear_retention::*;
pub use crate::material::model_pedroso_zhang_ehlers::*;
pub use crate::material::model_porous::*;
pub use crate::material::model_real_density::*;
pub use crate::material::model_van_genuchten::*;
pub use crate::material::porous_driver::*;
pub use crate::material::retention_registry::*;
pub use crate::material::stress_strain::*;
pub use crate::material::von_mises::*;
