use super::{finite, DirectSaturation, LiquidRetention, RetentionDerivs};
use crate::StrError;

/// Implements a linear relation between the liquid saturation and the capillary pressure
///
/// ```text
/// sl = sl_max - λ (pc - pc_ae)    for pc_ae < pc < pc_ae + (sl_max - sl_min) / λ
/// ```
///
/// The saturation equals sl_max below the air-entry pressure and sl_min beyond the residual pressure.
pub struct ModelLinearRetention {
    lambda: f64,
    pc_ae: f64,
    pc_res: f64,
    sl_min: f64,
    sl_max: f64,
}

impl ModelLinearRetention {
    /// Allocates a new instance
    pub fn new(lambda: f64, pc_ae: f64, sl_min: f64, sl_max: f64) -> Result<Self, StrError> {
        if lambda <= 0.0 {
            return Err("lambda parameter for the linear retention model is invalid");
        }
        if pc_ae < 0.0 {
            return Err("pc_ae parameter for the linear retention model is invalid");
        }
        if sl_min <= 0.0 || sl_min >= sl_max {
            return Err("sl_min parameter for the linear retention model is invalid");
        }
        if sl_max > 1.0 {
            return Err("sl_max parameter for the linear retention model is invalid");
        }
        Ok(ModelLinearRetention {
            lambda,
            pc_ae,
            pc_res: pc_ae + (sl_max - sl_min) / lambda,
            sl_min,
            sl_max,
        })
    }
}

impl LiquidRetention for ModelLinearRetention {
    fn saturation_limits(&self) -> (f64, f64) {
        (self.sl_min, self.sl_max)
    }

    fn calc_cc(&self, pc: f64, _sl: f64, _wetting: bool) -> Result<f64, StrError> {
        if pc > self.pc_ae && pc < self.pc_res {
            Ok(-self.lambda)
        } else {
            Ok(0.0)
        }
    }

    fn calc_derivatives(&self, _pc: f64, _sl: f64, _wetting: bool) -> Result<RetentionDerivs, StrError> {
        Ok(RetentionDerivs {
            l: 0.0,
            lx: 0.0,
            j: 0.0,
            jx: 0.0,
            jy: 0.0,
        })
    }

    fn direct_saturation(&self) -> Option<&dyn DirectSaturation> {
        Some(self)
    }
}

impl DirectSaturation for ModelLinearRetention {
    fn calc_sl(&self, pc: f64) -> Result<f64, StrError> {
        let sl = self.sl_max - self.lambda * (pc - self.pc_ae);
        finite(f64::min(f64::max(sl, self.sl_min), self.sl_max))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ModelLinearRetention;
    use crate::material::LiquidRetention;
    use russell_lab::approx_eq;

    #[test]
    fn new_captures_errors() {
        assert_eq!(
            ModelLinearRetention::new(0.0, 1.0, 0.1, 1.0).err(),
            Some("lambda parameter for the linear retention model is invalid")
        );
        assert_eq!(
            ModelLinearRetention::new(0.1, -1.0, 0.1, 1.0).err(),
            Some("pc_ae parameter for the linear retention model is invalid")
        );
        assert_eq!(
            ModelLinearRetention::new(0.1, 1.0, 1.0, 1.0).err(),
            Some("sl_min parameter for the linear retention model is invalid")
        );
        assert_eq!(
            ModelLinearRetention::new(0.1, 1.0, 0.1, 1.1).err(),
            Some("sl_max parameter for the linear retention model is invalid")
        );
    }

    #[test]
    fn calc_sl_and_cc_work() {
        let model = ModelLinearRetention::new(0.1, 1.0, 0.2, 1.0).unwrap();
        let direct = model.direct_saturation().unwrap();
        assert_eq!(direct.calc_sl(0.0).unwrap(), 1.0);
        assert_eq!(direct.calc_sl(1.0).unwrap(), 1.0);
        approx_eq(direct.calc_sl(5.0).unwrap(), 0.6, 1e-15);
        assert_eq!(direct.calc_sl(100.0).unwrap(), 0.2);
        assert_eq!(model.calc_cc(0.5, 1.0, false).unwrap(), 0.0);
        assert_eq!(model.calc_cc(5.0, 0.6, false).unwrap(), -0.1);
        assert_eq!(model.calc_cc(5.0, 0.6, true).unwrap(), -0.1);
        assert_eq!(model.calc_cc(9.5, 0.2, false).unwrap(), 0.0);
    }
}
