//! Coupled solid displacement and liquid pressure (u-p) finite elements for porous media
//!
//! The crate provides:
//!
//! * [material] -- liquid retention models with hysteresis, the porous constitutive model
//!   (integration-point state and its update), and a driver to verify the consistent moduli
//! * [fem] -- the displacement and pressure sub-elements and the coupled u-p element
//! * [base] -- parameters, configuration, time-integration coefficients, and sample meshes
//!
//! # References
//!
//! 1. Pedroso DM (2015) A consistent u-p formulation for porous media with hysteresis,
//!    Int. J. for Numerical Methods in Engineering, 101:606-634, DOI: 10.1002/nme.4808
//! 2. Pedroso DM, Zhang Y, Ehlers W (2017) Solution of liquid-gas-solid coupled
//!    equations for porous media considering dynamics and hysteretic behavior,
//!    ASCE Journal of Engineering Mechanics, 143:6(04017021), DOI: 10.1061/(ASCE)EM.1943-7889.0001208.

/// Defines a type alias for the error type as a static string
pub type StrError = &'static str;

pub mod base;
pub mod fem;
pub mod material;
pub mod prelude;
