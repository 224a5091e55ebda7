//! Makes available common structures needed to build porous media elements
//!
//! You may write `use pmsim_up::prelude::*` in your code and obtain
//! access to commonly used functionality.

pub use crate::base::{Config, Control, DynCoefficients, Idealization, SampleMeshes};
pub use crate::base::{
    ParamConductivity, ParamFluids, ParamLiquidRetention, ParamPorousSldLiq, ParamRealDensity, ParamStressStrain,
};
pub use crate::fem::{ElementTrait, ElementUp, FemState, GenericElement};
pub use crate::material::{allocate_liquid_retention, LiquidRetention, RetentionRegistry};
pub use crate::material::{LocalStatePorous, ModelPorous, PorousDriver};
