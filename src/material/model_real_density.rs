use crate::base::ParamRealDensity;
use crate::StrError;

/// Implements a linear model for the intrinsic (real) density of a compressible fluid
///
/// ```text
/// ρ = ρ₀ + C (p - p₀)
/// ```
#[derive(Clone, Copy, Debug)]
pub struct ModelRealDensity {
    /// Compressibility C = dρ/dp
    cc: f64,

    /// Reference pressure p₀
    p_ref: f64,

    /// Reference intrinsic density ρ₀
    rho_ref: f64,
}

impl ModelRealDensity {
    /// Allocates a new instance
    pub fn new(param: &ParamRealDensity) -> Result<Self, StrError> {
        if param.cc <= 0.0 {
            return Err("compressibility constant must be greater than zero");
        }
        if param.rho_ref <= 0.0 {
            return Err("reference intrinsic density must be greater than zero");
        }
        Ok(ModelRealDensity {
            cc: param.cc,
            p_ref: param.p_ref,
            rho_ref: param.rho_ref,
        })
    }

    /// Returns the compressibility C = dρ/dp
    pub fn compressibility(&self) -> f64 {
        self.cc
    }

    /// Returns the intrinsic (real) density for given pressure
    pub fn density(&self, pressure: f64) -> f64 {
        self.rho_ref + self.cc * (pressure - self.p_ref)
    }

    /// Returns the intrinsic (real) density at given elevation of a fluid column at rest
    ///
    /// The free surface (p = p₀) is at the elevation `height`.
    pub fn density_at_elevation(&self, elevation: f64, height: f64, gravity: f64) -> Result<f64, StrError> {
        if elevation < 0.0 || elevation > height {
            return Err("elevation must be in 0 ≤ elevation ≤ height");
        }
        Ok(self.rho_ref * f64::exp(gravity * self.cc * (height - elevation)))
    }

    /// Returns the pressure at given elevation of a fluid column at rest
    ///
    /// The expression is the exact solution of `dp/dz = -ρ(p) g` with `p(height) = p₀`.
    pub fn pressure_at_elevation(&self, elevation: f64, height: f64, gravity: f64) -> Result<f64, StrError> {
        if elevation < 0.0 || elevation > height {
            return Err("elevation must be in 0 ≤ elevation ≤ height");
        }
        let p = self.p_ref + (self.rho_ref / self.cc) * f64::exp_m1(gravity * self.cc * (height - elevation));
        Ok(p)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ModelRealDensity;
    use crate::base::ParamRealDensity;
    use russell_lab::{approx_eq, deriv1_central5};

    #[test]
    fn new_captures_errors() {
        let mut param = ParamRealDensity::sample_water();
        param.cc = 0.0;
        assert_eq!(
            ModelRealDensity::new(&param).err(),
            Some("compressibility constant must be greater than zero")
        );
        let mut param = ParamRealDensity::sample_water();
        param.rho_ref = 0.0;
        assert_eq!(
            ModelRealDensity::new(&param).err(),
            Some("reference intrinsic density must be greater than zero")
        );
    }

    #[test]
    fn elevation_functions_work() {
        let model = ModelRealDensity::new(&ParamRealDensity::sample_water()).unwrap();
        let (height, g) = (10.0, 10.0);
        assert_eq!(
            model.pressure_at_elevation(-1.0, height, g).err(),
            Some("elevation must be in 0 ≤ elevation ≤ height")
        );
        assert_eq!(
            model.density_at_elevation(11.0, height, g).err(),
            Some("elevation must be in 0 ≤ elevation ≤ height")
        );
        assert_eq!(model.pressure_at_elevation(height, height, g).unwrap(), 0.0);
        assert_eq!(model.density_at_elevation(height, height, g).unwrap(), 1.0);
        // nearly incompressible: p ≈ ρ₀ g (H - z)
        approx_eq(model.pressure_at_elevation(0.0, height, g).unwrap(), 100.0, 1e-2);
        // consistency: ρ(p(z)) = ρ(z) and dp/dz = -ρ g
        struct Args {}
        let mut args = Args {};
        for z in [1.0, 5.0, 9.0] {
            let p = model.pressure_at_elevation(z, height, g).unwrap();
            let rho = model.density_at_elevation(z, height, g).unwrap();
            approx_eq(model.density(p), rho, 1e-14);
            let dp_dz = deriv1_central5(z, &mut args, |x, _| model.pressure_at_elevation(x, height, g)).unwrap();
            approx_eq(dp_dz, -rho * g, 1e-8);
        }
    }
}
