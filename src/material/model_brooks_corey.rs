use super::{finite, DirectSaturation, LiquidRetention, RetentionDerivs};
use crate::StrError;

/// Implements the Brooks-Corey model for liquid retention
///
/// ```text
///                     ⎛ pc_ae ⎞λ
/// sl = sl_min + Δsl · ⎜ ───── ⎟     for pc > pc_ae     (Δsl = sl_max - sl_min)
///                     ⎝  pc   ⎠
/// ```
///
/// # Reference
///
/// * Brooks RH, Corey AT (1964) Hydraulic properties of porous media, Hydrology Papers 3, Colorado State University
pub struct ModelBrooksCorey {
    lambda: f64,
    pc_ae: f64,
    sl_min: f64,
    sl_max: f64,
}

impl ModelBrooksCorey {
    /// Allocates a new instance
    pub fn new(lambda: f64, pc_ae: f64, sl_min: f64, sl_max: f64) -> Result<Self, StrError> {
        if lambda <= 0.0 {
            return Err("lambda parameter for the Brooks-Corey retention model is invalid");
        }
        if pc_ae <= 0.0 {
            return Err("pc_ae parameter for the Brooks-Corey retention model is invalid");
        }
        if sl_min <= 0.0 || sl_min >= sl_max {
            return Err("sl_min parameter for the Brooks-Corey retention model is invalid");
        }
        if sl_max > 1.0 {
            return Err("sl_max parameter for the Brooks-Corey retention model is invalid");
        }
        Ok(ModelBrooksCorey {
            lambda,
            pc_ae,
            sl_min,
            sl_max,
        })
    }
}

impl LiquidRetention for ModelBrooksCorey {
    fn saturation_limits(&self) -> (f64, f64) {
        (self.sl_min, self.sl_max)
    }

    fn calc_cc(&self, pc: f64, _sl: f64, _wetting: bool) -> Result<f64, StrError> {
        if pc <= self.pc_ae {
            return Ok(0.0);
        }
        let del = self.sl_max - self.sl_min;
        finite(-del * self.lambda * f64::powf(self.pc_ae / pc, self.lambda) / pc)
    }

    fn calc_derivatives(&self, pc: f64, sl: f64, wetting: bool) -> Result<RetentionDerivs, StrError> {
        let cc = self.calc_cc(pc, sl, wetting)?;
        let l = -cc * (self.lambda + 1.0) / pc;
        let lx = -l * (self.lambda + 2.0) / pc;
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

impl DirectSaturation for ModelBrooksCorey {
    fn calc_sl(&self, pc: f64) -> Result<f64, StrError> {
        if pc <= self.pc_ae {
            return Ok(self.sl_max);
        }
        let del = self.sl_max - self.sl_min;
        finite(self.sl_min + del * f64::powf(self.pc_ae / pc, self.lambda))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ModelBrooksCorey;
    use crate::material::LiquidRetention;
    use russell_lab::{approx_eq, deriv1_central5};

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            ModelBrooksCorey::new(0.8, 0.0, 0.1, 1.0).err(),
            Some("pc_ae parameter for the Brooks-Corey retention model is invalid")
        );
        assert_eq!(
            ModelBrooksCorey::new(0.8, 2.0, 0.0, 1.0).err(),
            Some("sl_min parameter for the Brooks-Corey retention model is invalid")
        );
        assert_eq!(
            ModelBrooksCorey::new(0.8, 2.0, 0.1, 1.5).err(),
            Some("sl_max parameter for the Brooks-Corey retention model is invalid")
        );
    }

    #[test]
    fn cc_is_the_derivative_of_sl() {
        let model = ModelBrooksCorey::new(0.8, 2.0, 0.1, 1.0).unwrap();
        let direct = model.direct_saturation().unwrap();
        assert_eq!(direct.calc_sl(1.0).unwrap(), 1.0);
        assert_eq!(model.calc_cc(1.0, 1.0, false).unwrap(), 0.0);
        approx_eq(direct.calc_sl(4.0).unwrap(), 0.1 + 0.9 * f64::powf(0.5, 0.8), 1e-15);
        struct Args {}
        let mut args = Args {};
        for pc in [3.0, 10.0, 30.0] {
            let num = deriv1_central5(pc, &mut args, |x, _| direct.calc_sl(x)).unwrap();
            approx_eq(model.calc_cc(pc, 0.5, false).unwrap(), num, 1e-10);
        }
    }
}
