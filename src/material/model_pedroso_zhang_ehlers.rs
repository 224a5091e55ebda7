use super::{finite, LiquidRetention, RetentionDerivs};
use crate::StrError;

/// Holds λ̄ and its derivatives with respect to x = ln(1 + pc) and y = sl
///
/// The rate equation reads `dsl/dpc = -λ̄(x, y) / (1 + pc)`
#[derive(Clone, Copy, Debug)]
struct LambdaBar {
    val: f64,
    dx: f64,
    dxx: f64,
    dy: f64,
    dyy: f64,
    dxy: f64,
}

/// Holds λ (the branch slope) and φ (the exponent of the distance-to-reference factor) with their derivatives
struct Branch {
    lambda: f64,
    lambda_y: f64,
    lambda_yy: f64,
    phi: f64,
    phi_x: f64,
    phi_xx: f64,
    phi_y: f64,
    phi_yy: f64,
    phi_xy: f64,
}

/// Implements the Pedroso-Zhang-Ehlers model for liquid retention with hysteresis
///
/// The model is written in terms of `x = ln(1 + pc)` and `y = sl`, with reference drying and
/// wetting curves `yd(x)` and `yw(x)`. The slope along a path is `λ̄ = λ exp(φ)` where φ depends
/// on the distance to the reference curve of the current branch (drying or wetting).
///
/// # References
///
/// 1. Pedroso DM, Zhang Y, Ehlers W (2017) Solution of liquid-gas-solid coupled
///    equations for porous media considering dynamics and hysteretic behavior,
///    ASCE Journal of Engineering Mechanics, 143:6(04017021), DOI: 10.1061/(ASCE)EM.1943-7889.0001208.
/// 2. Pedroso DM (2015) A consistent u-p formulation for porous media with hysteresis,
///    Int. J. for Numerical Methods in Engineering, 101:606-634, DOI: 10.1002/nme.4808
pub struct ModelPedrosoZhangEhlers {
    // params
    with_hysteresis: bool,
    lambda_d: f64,
    lambda_w: f64,
    beta_d: f64,
    beta_w: f64,
    beta_1: f64,
    beta_2: f64,
    y_0: f64,
    y_r: f64,

    // constants
    c1_d: f64,
    c2_d: f64,
    c3_d: f64,
    c1_w: f64,
    c2_w: f64,
    c3_w: f64,
}

impl ModelPedrosoZhangEhlers {
    /// Allocates a new instance
    pub fn new(
        with_hysteresis: bool,
        lambda_d: f64,
        lambda_w: f64,
        beta_d: f64,
        beta_w: f64,
        beta_1: f64,
        beta_2: f64,
        x_rd: f64,
        x_rw: f64,
        y_0: f64,
        y_r: f64,
    ) -> Result<Self, StrError> {
        // check saturation limits
        if y_0 <= 0.0 || y_0 > 1.0 {
            return Err("y_0 parameter for the Pedroso-Zhang-Ehlers retention model is invalid");
        }
        if y_r <= 0.0 || y_r >= y_0 {
            return Err("y_r parameter for the Pedroso-Zhang-Ehlers retention model is invalid");
        }
        // check parameters for the drying path
        if x_rd <= 0.0 {
            return Err("x_rd parameter for the Pedroso-Zhang-Ehlers retention model is invalid");
        }
        if lambda_d <= 0.0 {
            return Err("lambda_d parameter for the Pedroso-Zhang-Ehlers retention model is invalid");
        }
        if beta_d <= 0.0 {
            return Err("beta_d parameter for the Pedroso-Zhang-Ehlers retention model is invalid");
        }
        if beta_2 <= 0.0 {
            return Err("beta_2 parameter for the Pedroso-Zhang-Ehlers retention model is invalid");
        }
        // constants for the drying path
        let c1_d = beta_d * lambda_d;
        let c2_d = f64::exp(beta_d * y_r);
        let c3_d = f64::exp(beta_d * (y_0 + lambda_d * x_rd)) - c2_d * f64::exp(c1_d * x_rd);
        // handle hysteresis option
        let (c1_w, c2_w, c3_w) = if with_hysteresis {
            if lambda_w <= 0.0 {
                return Err("lambda_w parameter for the Pedroso-Zhang-Ehlers retention model is invalid");
            }
            if beta_w <= 0.0 {
                return Err("beta_w parameter for the Pedroso-Zhang-Ehlers retention model is invalid");
            }
            if beta_1 <= 0.0 {
                return Err("beta_1 parameter for the Pedroso-Zhang-Ehlers retention model is invalid");
            }
            if x_rw <= 0.0 {
                return Err("x_rw parameter for the Pedroso-Zhang-Ehlers retention model is invalid");
            }
            // constants for the wetting path
            let c1_w = -beta_w * lambda_w;
            let c2_w = f64::exp(-beta_w * y_0);
            let c3_w = f64::exp(-beta_w * lambda_w * x_rw) - c2_w * f64::exp(c1_w * x_rw);
            (c1_w, c2_w, c3_w)
        } else {
            (c1_d, c2_d, c3_d)
        };
        Ok(ModelPedrosoZhangEhlers {
            with_hysteresis,
            lambda_d,
            lambda_w,
            beta_d,
            beta_w,
            beta_1,
            beta_2,
            y_0,
            y_r,
            c1_d,
            c2_d,
            c3_d,
            c1_w,
            c2_w,
            c3_w,
        })
    }

    /// Returns the reference drying curve yd(x)
    pub fn reference_drying(&self, x: f64) -> f64 {
        -self.lambda_d * x + f64::ln(self.c3_d + self.c2_d * f64::exp(self.c1_d * x)) / self.beta_d
    }

    /// Returns the reference wetting curve yw(x)
    ///
    /// Without hysteresis, returns the reference drying curve.
    pub fn reference_wetting(&self, x: f64) -> f64 {
        if !self.with_hysteresis {
            return self.reference_drying(x);
        }
        -self.lambda_w * x - f64::ln(self.c3_w + self.c2_w * f64::exp(self.c1_w * x)) / self.beta_w
    }

    /// Calculates λ and φ along the drying path
    fn drying_path(&self, x: f64, y: f64) -> Branch {
        // λ = λd (1 - exp(-βd (y - yr)))
        let e = f64::exp(-self.beta_d * f64::max(y - self.y_r, 0.0));
        let lambda = (1.0 - e) * self.lambda_d;
        let lambda_y = self.beta_d * (self.lambda_d - lambda);
        let lambda_yy = -self.beta_d * lambda_y;
        // reference curve and its derivatives
        let q = self.c2_d * f64::exp(self.c1_d * x);
        let y_d = -self.lambda_d * x + f64::ln(self.c3_d + q) / self.beta_d;
        let dd = y_d - y;
        let mut branch = Branch {
            lambda,
            lambda_y,
            lambda_yy,
            phi: 0.0,
            phi_x: 0.0,
            phi_xx: 0.0,
            phi_y: 0.0,
            phi_yy: 0.0,
            phi_xy: 0.0,
        };
        if dd > 0.0 {
            let den = self.beta_d * (self.c3_d + q);
            let y_d_x = -self.lambda_d + self.c1_d * q / den;
            let y_d_xx = self.c1_d * self.c1_d * q * self.c3_d / (den * (self.c3_d + q));
            // β̄2 = β2 √y
            let b2 = self.beta_2 * f64::sqrt(y);
            let b2_y = 0.5 * self.beta_2 / f64::sqrt(y);
            let b2_yy = -0.25 * self.beta_2 / f64::powf(y, 1.5);
            branch.phi = -b2 * dd;
            branch.phi_y = -b2_y * dd + b2;
            branch.phi_yy = -b2_yy * dd + 2.0 * b2_y;
            branch.phi_x = -b2 * y_d_x;
            branch.phi_xx = -b2 * y_d_xx;
            branch.phi_xy = -b2_y * y_d_x;
        }
        branch
    }

    /// Calculates λ and φ along the wetting path
    fn wetting_path(&self, x: f64, y: f64) -> Branch {
        // λ = λw (1 - exp(-βw (y0 - y)))
        let e = f64::exp(-self.beta_w * f64::max(self.y_0 - y, 0.0));
        let lambda = (1.0 - e) * self.lambda_w;
        let lambda_y = self.beta_w * (lambda - self.lambda_w);
        let lambda_yy = self.beta_w * lambda_y;
        // reference curve and its derivatives
        let q = self.c2_w * f64::exp(self.c1_w * x);
        let y_w = -self.lambda_w * x - f64::ln(self.c3_w + q) / self.beta_w;
        let dd = y - y_w;
        let mut branch = Branch {
            lambda,
            lambda_y,
            lambda_yy,
            phi: 0.0,
            phi_x: 0.0,
            phi_xx: 0.0,
            phi_y: 0.0,
            phi_yy: 0.0,
            phi_xy: 0.0,
        };
        if dd > 0.0 {
            let den = self.beta_w * (self.c3_w + q);
            let y_w_x = -self.lambda_w - self.c1_w * q / den;
            let y_w_xx = -self.c1_w * self.c1_w * q * self.c3_w / (den * (self.c3_w + q));
            branch.phi = -self.beta_1 * dd;
            branch.phi_y = -self.beta_1;
            branch.phi_x = self.beta_1 * y_w_x;
            branch.phi_xx = self.beta_1 * y_w_xx;
        }
        branch
    }

    /// Calculates λ̄ = λ exp(φ) and its derivatives
    fn lambda_bar(&self, pc: f64, sl: f64, wetting: bool) -> Result<LambdaBar, StrError> {
        if sl < self.y_r {
            return Err("sl cannot be smaller than y_r");
        }
        if sl > self.y_0 {
            return Err("sl cannot be greater than y_0");
        }
        let x = f64::ln(1.0 + pc);
        let b = if wetting && self.with_hysteresis {
            self.wetting_path(x, sl)
        } else {
            self.drying_path(x, sl)
        };
        let e = f64::exp(b.phi);
        let lam = b.lambda;
        Ok(LambdaBar {
            val: lam * e,
            dx: lam * e * b.phi_x,
            dxx: lam * e * (b.phi_xx + b.phi_x * b.phi_x),
            dy: e * (b.lambda_y + lam * b.phi_y),
            dyy: e * (b.lambda_yy + 2.0 * b.lambda_y * b.phi_y + lam * (b.phi_yy + b.phi_y * b.phi_y)),
            dxy: e * (b.lambda_y * b.phi_x + lam * (b.phi_xy + b.phi_x * b.phi_y)),
        })
    }
}

impl LiquidRetention for ModelPedrosoZhangEhlers {
    fn saturation_limits(&self) -> (f64, f64) {
        (self.y_r, self.y_0)
    }

    fn calc_cc(&self, pc: f64, sl: f64, wetting: bool) -> Result<f64, StrError> {
        if pc <= 0.0 {
            return Ok(0.0);
        }
        let lb = self.lambda_bar(pc, sl, wetting)?;
        finite(-lb.val / (1.0 + pc))
    }

    fn calc_derivatives(&self, pc: f64, sl: f64, wetting: bool) -> Result<RetentionDerivs, StrError> {
        if pc <= 0.0 {
            return Ok(RetentionDerivs {
                l: 0.0,
                lx: 0.0,
                j: 0.0,
                jx: 0.0,
                jy: 0.0,
            });
        }
        // with Cc = -λ̄ / (1 + pc) and dx/dpc = 1 / (1 + pc)
        let lb = self.lambda_bar(pc, sl, wetting)?;
        let a = 1.0 + pc;
        Ok(RetentionDerivs {
            l: finite((lb.val - lb.dx) / (a * a))?,
            lx: finite((3.0 * lb.dx - lb.dxx - 2.0 * lb.val) / (a * a * a))?,
            j: finite(-lb.dy / a)?,
            jx: finite((lb.dy - lb.dxy) / (a * a))?,
            jy: finite(-lb.dyy / a)?,
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
