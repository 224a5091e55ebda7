use serde::{Deserialize, Serialize};

/// Holds the time-discretization coefficients relating rates to the primary unknowns
///
/// With the star variables computed at the beginning of a time step,
///
/// ```text
/// a  = α1·u - ζ*       ζ* = α1·u⁰ + α2·v⁰ + α3·a⁰
/// v  = α4·u - χ*       χ* = α4·u⁰ + α5·v⁰ + α6·a⁰
/// dpl/dt = β1·pl - ψ*  ψ* = β1·pl⁰ + β2·dpl⁰/dt
/// ```
///
/// All coefficients are zero in a steady (static) analysis.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DynCoefficients {
    pub alpha1: f64,
    pub alpha2: f64,
    pub alpha3: f64,
    pub alpha4: f64,
    pub alpha5: f64,
    pub alpha6: f64,
    pub beta1: f64,
    pub beta2: f64,
}

impl DynCoefficients {
    /// Returns coefficients for a steady analysis (all zero)
    pub fn new_steady() -> Self {
        DynCoefficients {
            alpha1: 0.0,
            alpha2: 0.0,
            alpha3: 0.0,
            alpha4: 0.0,
            alpha5: 0.0,
            alpha6: 0.0,
            beta1: 0.0,
            beta2: 0.0,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
