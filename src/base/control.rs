use super::DynCoefficients;
use crate::StrError;

/// Defines the smallest allowed dt_min (Control)
pub const CONTROL_MIN_DT_MIN: f64 = 1e-10;

/// Defines the smallest allowed theta{1,2} (Control)
pub const CONTROL_MIN_THETA: f64 = 0.0001;

/// Holds the options to control the time discretization
#[derive(Clone, Copy, Debug)]
pub struct Control {
    /// Minimum allowed time increment min(Δt)
    pub dt_min: f64,

    /// Transient analysis (liquid storage terms, θ-method)
    pub transient: bool,

    /// Dynamic analysis (inertia terms, Newmark method)
    pub dynamics: bool,

    /// Coefficient θ for the θ-method; 0.0001 ≤ θ ≤ 1.0
    pub theta: f64,

    /// Coefficient θ1 = γ for the Newmark method; 0.0001 ≤ θ1 ≤ 1.0
    pub theta1: f64,

    /// Coefficient θ2 = 2·β for the Newmark method; 0.0001 ≤ θ2 ≤ 1.0
    pub theta2: f64,
}

impl Control {
    /// Allocates a new instance with default values
    pub fn new() -> Self {
        Control {
            dt_min: CONTROL_MIN_DT_MIN,
            transient: true,
            dynamics: false,
            theta: 0.5,
            theta1: 0.5,
            theta2: 0.5,
        }
    }

    /// Validates all data
    ///
    /// Returns a message with the inconsistent data, or returns None if everything is all right.
    pub fn validate(&self) -> Option<String> {
        if self.dt_min < CONTROL_MIN_DT_MIN {
            return Some(format!(
                "dt_min = {:?} is incorrect; it must be ≥ {:e}",
                self.dt_min, CONTROL_MIN_DT_MIN
            ));
        }
        if self.theta < CONTROL_MIN_THETA || self.theta > 1.0 {
            return Some(format!(
                "theta = {:?} is incorrect; it must be {:?} ≤ θ ≤ 1.0",
                self.theta, CONTROL_MIN_THETA
            ));
        }
        if self.theta1 < CONTROL_MIN_THETA || self.theta1 > 1.0 {
            return Some(format!(
                "theta1 = {:?} is incorrect; it must be {:?} ≤ θ₁ ≤ 1.0",
                self.theta1, CONTROL_MIN_THETA
            ));
        }
        if self.theta2 < CONTROL_MIN_THETA || self.theta2 > 1.0 {
            return Some(format!(
                "theta2 = {:?} is incorrect; it must be {:?} ≤ θ₂ ≤ 1.0",
                self.theta2, CONTROL_MIN_THETA
            ));
        }
        None // all good
    }

    /// Calculates the coefficients of the time discretization for a given Δt
    ///
    /// θ-method (liquid pressure):
    ///
    /// ```text
    /// β1 = 1/(θ·Δt)
    /// β2 = (1-θ)/θ
    /// ```
    ///
    /// Newmark method (displacements):
    ///
    /// ```text
    /// α1 = 2/(θ2·Δt²)      α4 = 2·θ1/(θ2·Δt)
    /// α2 = 2/(θ2·Δt)       α5 = 2·θ1/θ2 - 1
    /// α3 = 1/θ2 - 1        α6 = (θ1/θ2 - 1)·Δt
    /// ```
    pub fn dynamic_coefficients(&self, dt: f64) -> Result<DynCoefficients, StrError> {
        if let Some(message) = self.validate() {
            log::warn!("{}", message);
            return Err("control parameters are invalid");
        }
        if dt < self.dt_min {
            return Err("Δt is smaller than the allowed minimum");
        }
        let mut coefs = DynCoefficients::new_steady();
        if self.transient {
            coefs.beta1 = 1.0 / (self.theta * dt);
            coefs.beta2 = (1.0 - self.theta) / self.theta;
        }
        if self.dynamics {
            let (th1, th2) = (self.theta1, self.theta2);
            coefs.alpha1 = 2.0 / (th2 * dt * dt);
            coefs.alpha2 = 2.0 / (th2 * dt);
            coefs.alpha3 = 1.0 / th2 - 1.0;
            coefs.alpha4 = 2.0 * th1 / (th2 * dt);
            coefs.alpha5 = 2.0 * th1 / th2 - 1.0;
            coefs.alpha6 = (th1 / th2 - 1.0) * dt;
        }
        Ok(coefs)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
