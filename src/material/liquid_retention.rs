use super::{ModelBrooksCorey, ModelLinearRetention, ModelPedrosoZhangEhlers, ModelVanGenuchten};
use crate::base::ParamLiquidRetention;
use crate::StrError;
use russell_lab::Vector;
use russell_ode::{Method, OdeSolver, Params, System};
use russell_sparse::{CooMatrix, Sym};
use std::sync::Arc;

/// Holds the first and second derivatives of Cc = ∂sl/∂pc
///
/// ```text
/// L  = ∂Cc/∂pc     Lx = ∂²Cc/∂pc²
/// J  = ∂Cc/∂sl     Jx = ∂²Cc/(∂pc ∂sl)     Jy = ∂²Cc/∂sl²
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RetentionDerivs {
    pub l: f64,
    pub lx: f64,
    pub j: f64,
    pub jx: f64,
    pub jy: f64,
}

/// Specifies retention models computing the saturation directly from the capillary pressure
///
/// These are rate-independent models without hysteresis, i.e., `sl = sl(pc)`.
pub trait DirectSaturation {
    /// Calculates the liquid saturation sl(pc)
    fn calc_sl(&self, pc: f64) -> Result<f64, StrError>;
}

/// Specifies the essential functions for liquid retention models
///
/// The models are written in rate form `dsl/dpc = Cc(pc, sl, wetting)` where the `wetting`
/// flag selects the branch of hysteretic models. The models hold no per-call state and
/// thus can be shared by all integration points of a material.
pub trait LiquidRetention: Send + Sync {
    /// Returns the saturation limits (sl_min,sl_max)
    fn saturation_limits(&self) -> (f64, f64);

    /// Calculates Cc(pc,sl) = ∂sl/∂pc
    fn calc_cc(&self, pc: f64, sl: f64, wetting: bool) -> Result<f64, StrError>;

    /// Calculates all first and second derivatives of Cc
    fn calc_derivatives(&self, pc: f64, sl: f64, wetting: bool) -> Result<RetentionDerivs, StrError>;

    /// Returns the minimum saturation
    fn sl_min(&self) -> f64 {
        self.saturation_limits().0
    }

    /// Calculates L = ∂Cc/∂pc
    fn calc_dcc_dpc(&self, pc: f64, sl: f64, wetting: bool) -> Result<f64, StrError> {
        Ok(self.calc_derivatives(pc, sl, wetting)?.l)
    }

    /// Calculates J = ∂Cc/∂sl
    fn calc_dcc_dsl(&self, pc: f64, sl: f64, wetting: bool) -> Result<f64, StrError> {
        Ok(self.calc_derivatives(pc, sl, wetting)?.j)
    }

    /// Returns the capability to compute sl(pc) directly, if available
    fn direct_saturation(&self) -> Option<&dyn DirectSaturation> {
        None
    }
}

/// Returns the value if finite; otherwise, returns an error
pub(crate) fn finite(value: f64) -> Result<f64, StrError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err("retention model produced a non-finite value")
    }
}

/// Allocates a liquid retention model
pub fn allocate_liquid_retention(param: &ParamLiquidRetention) -> Result<Arc<dyn LiquidRetention>, StrError> {
    let model: Arc<dyn LiquidRetention> = match *param {
        ParamLiquidRetention::Linear {
            lambda,
            pc_ae,
            sl_min,
            sl_max,
        } => Arc::new(ModelLinearRetention::new(lambda, pc_ae, sl_min, sl_max)?),
        ParamLiquidRetention::BrooksCorey {
            lambda,
            pc_ae,
            sl_min,
            sl_max,
        } => Arc::new(ModelBrooksCorey::new(lambda, pc_ae, sl_min, sl_max)?),
        ParamLiquidRetention::VanGenuchten {
            alpha,
            m,
            n,
            sl_min,
            sl_max,
        } => Arc::new(ModelVanGenuchten::new(alpha, m, n, sl_min, sl_max)?),
        ParamLiquidRetention::PedrosoZhangEhlers {
            with_hysteresis,
            lambda_d,
            lambda_w,
            beta_d,
            beta_w,
            beta_1,
            beta_2,
            x_rd,
            x_rw,
            y_0,
            y_r,
        } => Arc::new(ModelPedrosoZhangEhlers::new(
            with_hysteresis,
            lambda_d,
            lambda_w,
            beta_d,
            beta_w,
            beta_1,
            beta_2,
            x_rd,
            x_rw,
            y_0,
            y_r,
        )?),
    };
    Ok(model)
}

/// Holds the arguments of the saturation ODE
struct ArgsForUpdate {
    /// Capillary pressure at the beginning of the increment
    pc0: f64,

    /// Increment of capillary pressure
    delta_pc: f64,

    /// Wetting flag (Δpc < 0)
    wetting: bool,
}

/// Updates the liquid saturation along a capillary pressure increment
///
/// The saturation is the solution at x = 1 of the initial value problem:
///
/// ```text
/// dsl/dx = Cc(pc(x), sl, wetting) · Δpc    with    pc(x) = pc₀ + x · Δpc
/// sl(0) = sl₀
/// ```
///
/// The problem is solved with Radau5, using the analytical Jacobian `J · Δpc`.
///
/// # Input
///
/// * `model` -- The liquid retention model
/// * `pc0` -- The capillary pressure at the beginning of the increment
/// * `sl0` -- The liquid saturation at the beginning of the increment
/// * `delta_pc` -- The capillary pressure increment (negative means wetting)
///
/// # Output
///
/// Returns the new saturation, within the saturation limits of the model
pub fn update_saturation(model: &dyn LiquidRetention, pc0: f64, sl0: f64, delta_pc: f64) -> Result<f64, StrError> {
    if delta_pc == 0.0 {
        return Ok(sl0);
    }

    // trial values of sl may slightly overshoot the limits within the Newton iterations
    let (sl_min, sl_max) = model.saturation_limits();
    let clamp = move |sl: f64| f64::min(f64::max(sl, sl_min), sl_max);

    // ODE system
    let mut system = System::new(1, |f: &mut Vector, x: f64, y: &Vector, args: &mut ArgsForUpdate| {
        let pc = args.pc0 + x * args.delta_pc;
        f[0] = model.calc_cc(pc, clamp(y[0]), args.wetting)? * args.delta_pc;
        Ok(())
    });
    system.set_jacobian(
        Some(1),
        Sym::No,
        |jj: &mut CooMatrix, alpha: f64, x: f64, y: &Vector, args: &mut ArgsForUpdate| {
            let pc = args.pc0 + x * args.delta_pc;
            let dcc_dsl = model.calc_dcc_dsl(pc, clamp(y[0]), args.wetting)?;
            jj.reset();
            jj.put(0, 0, alpha * dcc_dsl * args.delta_pc)?;
            Ok(())
        },
    )?;

    // solver
    let mut params = Params::new(Method::Radau5);
    params.set_tolerances(1e-10, 1e-7, None)?;
    let mut solver = OdeSolver::new(params, system)?;

    // solve
    let mut args = ArgsForUpdate {
        pc0,
        delta_pc,
        wetting: delta_pc < 0.0,
    };
    let mut y = Vector::from(&[sl0]);
    solver
        .solve(&mut y, 0.0, 1.0, None, &mut args)
        .map_err(|_| "Radau5 failed to update the liquid saturation")?;
    Ok(clamp(y[0]))
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
