use super::{LocalState, StressStrainTrait};
use crate::base::Idealization;
use crate::StrError;
use russell_tensor::{t4_ddot_t2_update, LinElasticity, Mandel, Tensor2, Tensor4};
use russell_tensor::{IDENTITY2, P_SYMDEV, SQRT_2_BY_3};

/// Defines an alias to IDENTITY2
const I: &[f64; 9] = &IDENTITY2;

/// Defines an alias to P_SYMDEV
const PSD: &[[f64; 9]; 9] = &P_SYMDEV;

/// Holds the index of z internal variable (size of yield surface)
const Z0: usize = 0;

/// Implements the von Mises plasticity model for the effective stress
///
/// ```text
/// f = σd - z
/// ```
///
/// **Note:** This model works in 2D (plane-strain only) or 3D.
pub struct VonMises {
    /// Linear elasticity
    lin_elasticity: LinElasticity,

    /// Bulk modulus K
    kk: f64,

    /// Shear modulus G
    gg: f64,

    /// Hardening coefficient
    hh: f64,

    /// Initial size of the yield surface (von Mises stress)
    z0: f64,

    /// Deviatoric stress: s = dev(σ)
    s: Tensor2,
}

impl VonMises {
    /// Allocates a new instance
    pub fn new(ideal: &Idealization, young: f64, poisson: f64, z0: f64, hh: f64) -> Result<Self, StrError> {
        if ideal.plane_stress {
            return Err("von Mises model does not work in plane-stress");
        }
        if z0 <= 0.0 {
            return Err("z0 parameter for the von Mises model is invalid");
        }
        if hh < 0.0 {
            return Err("hh parameter for the von Mises model is invalid");
        }
        let lin_elasticity = LinElasticity::new(young, poisson, ideal.two_dim, false);
        let (kk, gg) = lin_elasticity.get_bulk_shear();
        let mandel = if ideal.two_dim {
            Mandel::Symmetric2D
        } else {
            Mandel::Symmetric
        };
        Ok(VonMises {
            lin_elasticity,
            kk,
            gg,
            hh,
            z0,
            s: Tensor2::new(mandel),
        })
    }

    /// Calculates the yield function f
    pub fn yield_function(&self, state: &LocalState) -> f64 {
        state.stress.invariant_sigma_d() - state.internal_values[Z0]
    }
}

impl StressStrainTrait for VonMises {
    /// Indicates that the stiffness matrix is symmetric
    fn symmetric_stiffness(&self) -> bool {
        true
    }

    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize {
        1 // [z]
    }

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), StrError> {
        state.internal_values[Z0] = self.z0;
        if self.yield_function(state) > 0.0 {
            return Err("stress is outside the yield surface");
        }
        Ok(())
    }

    /// Computes the consistent tangent stiffness
    fn stiffness(&mut self, dd: &mut Tensor4, state: &LocalState) -> Result<(), StrError> {
        // handle elastic case
        if !state.loading {
            dd.set_tensor(1.0, self.lin_elasticity.get_modulus()); // D ← Dₑ
            return Ok(());
        }

        // extract current state variables
        let sigma = &state.stress;
        let lambda = state.algo_lambda;
        sigma.deviator(&mut self.s); // s = dev(σ)

        // coefficients
        let (kk, gg, hh) = (self.kk, self.gg, self.hh);
        let sigma_d = sigma.invariant_sigma_d();
        let sigma_d_trial = sigma_d + lambda * 3.0 * gg;
        let norm_s = sigma_d * SQRT_2_BY_3;
        let d = 3.0 * gg + hh;
        let a = 2.0 * gg * (1.0 - lambda * 3.0 * gg / sigma_d_trial);
        let b = 6.0 * gg * gg * (lambda / sigma_d_trial - 1.0 / d) / (norm_s * norm_s);

        // consistent tangent modulus (Mandel representation)
        let nd = sigma.dim();
        let mat = dd.matrix_mut();
        let s = self.s.vector();
        for i in 0..nd {
            for j in 0..nd {
                mat.set(i, j, a * PSD[i][j] + b * s[i] * s[j] + kk * I[i] * I[j]);
            }
        }
        Ok(())
    }

    /// Updates the stress tensor given the strain increment tensor
    fn update_stress(&mut self, state: &mut LocalState, delta_strain: &Tensor2) -> Result<(), StrError> {
        // reset flags
        state.loading = false;
        state.algo_lambda = 0.0;

        // trial stress: σ ← σ_trial
        let dd = self.lin_elasticity.get_modulus();
        t4_ddot_t2_update(&mut state.stress, 1.0, dd, delta_strain, 1.0); // σ += D : Δε

        // elastic update
        let f_trial = self.yield_function(state);
        if f_trial <= 0.0 {
            return Ok(());
        }

        // coefficients
        let (gg, hh) = (self.gg, self.hh);
        let sigma_m_trial = state.stress.invariant_sigma_m();
        let sigma_d_trial = state.stress.invariant_sigma_d();
        let lambda = f_trial / (3.0 * gg + hh);
        let m = 1.0 - lambda * 3.0 * gg / sigma_d_trial;

        // s_trial = dev(σ_trial)
        state.stress.deviator(&mut self.s);

        // σ_new = m s_trial + σm_trial I
        let nd = state.stress.dim();
        let vec = state.stress.vector_mut();
        let s_trial = self.s.vector();
        for i in 0..nd {
            vec[i] = m * s_trial[i] + sigma_m_trial * I[i];
        }

        // elastoplastic update
        state.loading = true;
        state.algo_lambda = lambda;
        state.internal_values[Z0] = state.stress.invariant_sigma_d();
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
