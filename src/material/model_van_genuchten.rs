use super::{finite, DirectSaturation, LiquidRetention, RetentionDerivs};
use crate::StrError;

/// Implements the van Genuchten model for liquid retention
///
/// ```text
/// sl = sl_min + Δsl · (1 + (α pc)ⁿ)⁻ᵐ     for pc > 0     (Δsl = sl_max - sl_min)
/// ```
///
/// # Reference
///
/// * van Genuchten MT (1980) A closed-form equation for predicting the hydraulic conductivity
///   of unsaturated soils, Soil Science Society of America Journal, 44:892-898
pub struct ModelVanGenuchten {
    alpha: f64,
    m: f64,
    n: f64,
    sl_min: f64,
    sl_max: f64,
}

impl ModelVanGenuchten {
    /// Allocates a new instance
    pub fn new(alpha: f64, m: f64, n: f64, sl_min: f64, sl_max: f64) -> Result<Self, StrError> {
        if alpha <= 0.0 {
            return Err("alpha parameter for the van Genuchten retention model is invalid");
        }
        if m <= 0.0 {
            return Err("m parameter for the van Genuchten retention model is invalid");
        }
        if n <= 1.0 {
            return Err("n parameter for the van Genuchten retention model is invalid");
        }
        if sl_min < 0.0 || sl_min >= sl_max {
            return Err("sl_min parameter for the van Genuchten retention model is invalid");
        }
        if sl_max > 1.0 {
            return Err("sl_max parameter for the van Genuchten retention model is invalid");
        }
        Ok(ModelVanGenuchten {
            alpha,
            m,
            n,
            sl_min,
            sl_max,
        })
    }

    /// Returns c = (α pc)ⁿ
    fn calc_c(&self, pc: f64) -> f64 {
        f64::powf(self.alpha * pc, self.n)
    }
}

impl LiquidRetention for ModelVanGenuchten {
    fn saturation_limits(&self) -> (f64, f64) {
        (self.sl_min, self.sl_max)
    }

    fn calc_cc(&self, pc: f64, _sl: f64, _wetting: bool) -> Result<f64, StrError> {
        if pc <= 0.0 {
            return Ok(0.0);
        }
        let del = self.sl_max - self.sl_min;
        let c = self.calc_c(pc);
        finite(-del * self.m * self.n * c * f64::powf(1.0 + c, -self.m - 1.0) / pc)
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
        // Cc = -Δsl m n c (1 + c)⁻ᵐ⁻¹ / pc  →  ∂Cc/∂pc = Cc h / pc
        let cc = self.calc_cc(pc, sl, wetting)?;
        let (m, n) = (self.m, self.n);
        let c = self.calc_c(pc);
        let h = n - 1.0 - (m + 1.0) * n * c / (1.0 + c);
        let dh_dpc = -(m + 1.0) * n * n * c / (pc * (1.0 + c) * (1.0 + c));
        let l = cc * h / pc;
        let lx = (l * (h - 1.0) + cc * dh_dpc) / pc;
        Ok(RetentionDerivs {
            l: finite(l)?,
            lx: finite(lx)?,
            j: 0.0,
            jx: 0.0,
            jy: 0.0,
        })
    }

    fn direct_saturation(&self) -> Option<&dyn DirectSaturation> {
        Some(self)
    }
}

impl DirectSaturation for ModelVanGenuchten {
    fn calc_sl(&self, pc: f64) -> Result<f64, StrError> {
        if pc <= 0.0 {
            return Ok(self.sl_max);
        }
        let del = self.sl_max - self.sl_min;
        finite(self.sl_min + del * f64::powf(1.0 + self.calc_c(pc), -self.m))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
