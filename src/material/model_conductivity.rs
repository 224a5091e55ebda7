use crate::base::{Idealization, ParamConductivity};
use crate::StrError;
use russell_tensor::Tensor2;

/// Implements the liquid conductivity model
///
/// ```text
/// kl = klr(sl) · kl_sat
/// ```
///
/// where `kl_sat` is the (constant) saturated conductivity tensor and `klr` is the relative conductivity.
pub struct ModelConductivity {
    /// Indicates a 2D conductivity tensor
    two_dim: bool,

    /// Saturated conductivity: diagonal components
    kk_diag: [f64; 3],

    /// Saturated conductivity: off-diagonal components (xy, yz, xz)
    kk_off: [f64; 3],

    /// Power-law relative conductivity: λ0 parameter
    lambda_0: f64,

    /// Power-law relative conductivity: n exponent (zero means klr = 1)
    n: f64,
}

impl ModelConductivity {
    /// Allocates a new instance
    pub fn new(ideal: &Idealization, param: &ParamConductivity) -> Result<Self, StrError> {
        let (kk_diag, kk_off, lambda_0, n) = match *param {
            ParamConductivity::Constant { kx, ky, kz } => ([kx, ky, kz], [0.0, 0.0, 0.0], 1.0, 0.0),
            ParamConductivity::Anisotropic {
                kxx,
                kyy,
                kzz,
                kxy,
                kyz,
                kxz,
            } => ([kxx, kyy, kzz], [kxy, kyz, kxz], 1.0, 0.0),
            ParamConductivity::PowerLaw {
                kx,
                ky,
                kz,
                lambda_0,
                n,
            } => {
                if lambda_0 < 0.0 || lambda_0 >= 1.0 {
                    return Err("lambda_0 parameter for the conductivity model is invalid");
                }
                if n < 1.0 {
                    return Err("n parameter for the conductivity model is invalid");
                }
                ([kx, ky, kz], [0.0, 0.0, 0.0], lambda_0, n)
            }
        };
        let ndim = if ideal.two_dim { 2 } else { 3 };
        if kk_diag[0..ndim].iter().any(|k| *k <= 0.0) {
            return Err("the diagonal components of the conductivity tensor must be positive");
        }
        Ok(ModelConductivity {
            two_dim: ideal.two_dim,
            kk_diag,
            kk_off,
            lambda_0,
            n,
        })
    }

    /// Calculates the saturated conductivity tensor
    pub fn calc_kl_sat(&self, kk: &mut Tensor2) {
        kk.clear();
        kk.sym_set(0, 0, self.kk_diag[0]);
        kk.sym_set(1, 1, self.kk_diag[1]);
        kk.sym_set(0, 1, self.kk_off[0]);
        if !self.two_dim {
            kk.sym_set(2, 2, self.kk_diag[2]);
            kk.sym_set(1, 2, self.kk_off[1]);
            kk.sym_set(0, 2, self.kk_off[2]);
        }
    }

    /// Calculates the relative conductivity klr(sl)
    pub fn calc_klr(&self, sl: f64) -> f64 {
        if self.n == 0.0 {
            return 1.0;
        }
        self.lambda_0 + (1.0 - self.lambda_0) * f64::powf(sl, self.n)
    }

    /// Calculates dklr/dsl
    pub fn calc_dklr_dsl(&self, sl: f64) -> f64 {
        if self.n == 0.0 {
            return 0.0;
        }
        (1.0 - self.lambda_0) * self.n * f64::powf(sl, self.n - 1.0)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
