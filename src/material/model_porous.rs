use super::{update_saturation, LiquidRetention, LocalStatePorous, ModelConductivity, ModelRealDensity};
use crate::base::{Idealization, ParamFluids, ParamPorousSldLiq};
use crate::StrError;
use russell_tensor::Tensor2;
use std::sync::Arc;

/// Defines the smallest capillary pressure increment triggering the saturation update
const DELTA_PC_MIN: f64 = 1e-13;

/// Holds the liquid-solid variables at an integration point
#[derive(Clone, Copy, Debug)]
pub struct LsVars {
    /// Partial density of liquid ρl = nf · sl · ρL
    pub rho_l: f64,

    /// Density of the mixture ρ = ρl + ns · ρS
    pub rho: f64,

    /// Averaged pore pressure p = sl · pl
    pub p: f64,

    /// Liquid storage coefficient Cpl = nf · (sl · Cl - ρL · Ccb)
    pub cpl: f64,

    /// Coupling coefficient Cvs = sl · ρL
    pub cvs: f64,

    /// Relative conductivity klr(sl)
    pub klr: f64,
}

/// Holds the derivatives of the liquid-solid variables
#[derive(Clone, Copy, Debug)]
pub struct LsDerivs {
    /// dρ/dpl
    pub drho_dpl: f64,

    /// dp/dpl
    pub dp_dpl: f64,

    /// dCpl/dpl
    pub dcpl_dpl: f64,

    /// dCvs/dpl
    pub dcvs_dpl: f64,

    /// dklr/dpl
    pub dklr_dpl: f64,

    /// dCpl/d(div us)
    pub dcpl_dus: f64,

    /// dρ/d(div us)
    pub drho_dus: f64,
}

/// Implements the constitutive model for porous media with solid and liquid constituents
///
/// The liquid saturation is updated along capillary pressure increments with the implicit
/// (backward) Euler method; the consistent moduli Ccb = dsl/dpc and Ccd = dCcb/dpc follow from
/// differentiating the resulting algebraic equation.
///
/// # Reference
///
/// * Pedroso DM (2015) A consistent u-p formulation for porous media with hysteresis,
///   Int. J. for Numerical Methods in Engineering, 101:606-634, DOI: 10.1002/nme.4808
pub struct ModelPorous {
    /// Liquid retention model
    pub retention: Arc<dyn LiquidRetention>,

    /// Intrinsic density of the liquid
    pub density: ModelRealDensity,

    /// Liquid conductivity
    pub conductivity: ModelConductivity,

    /// Initial porosity nf₀
    pub nf_ini: f64,

    /// Intrinsic density of solids ρS
    pub rho_ss: f64,

    /// Maximum number of iterations of the saturation update
    pub n_max_it: usize,

    /// Tolerance of the saturation update
    pub itol: f64,

    /// Uses the Modified-Euler method to compute the trial saturation
    pub modified_euler: bool,
}

impl ModelPorous {
    /// Allocates a new instance
    pub fn new(
        ideal: &Idealization,
        param: &ParamPorousSldLiq,
        fluids: &ParamFluids,
        retention: Arc<dyn LiquidRetention>,
    ) -> Result<Self, StrError> {
        if param.porosity_initial <= 0.0 || param.porosity_initial >= 1.0 {
            return Err("initial porosity must be in (0, 1)");
        }
        if param.density_solid <= 0.0 {
            return Err("intrinsic density of solids must be positive");
        }
        Ok(ModelPorous {
            retention,
            density: ModelRealDensity::new(&fluids.density_liquid)?,
            conductivity: ModelConductivity::new(ideal, &param.conductivity_liquid)?,
            nf_ini: param.porosity_initial,
            rho_ss: param.density_solid,
            n_max_it: 20,
            itol: 1e-12,
            modified_euler: true,
        })
    }

    /// Returns the liquid compressibility Cl = dρL/dpl
    pub fn cl(&self) -> f64 {
        self.density.compressibility()
    }

    /// Calculates the saturated conductivity tensor
    pub fn calc_kl_sat(&self, kk: &mut Tensor2) {
        self.conductivity.calc_kl_sat(kk);
    }

    /// Initializes the state at given pressures and volumetric strain
    ///
    /// The saturation follows the main drying path from sl_max.
    pub fn init_state(&self, pl: f64, pg: f64, divus: f64) -> Result<LocalStatePorous, StrError> {
        let pc = pg - pl;
        let (_, sl_max) = self.retention.saturation_limits();
        let sl = if pc <= 0.0 {
            sl_max
        } else {
            match self.retention.direct_saturation() {
                Some(direct) => direct.calc_sl(pc)?,
                None => update_saturation(self.retention.as_ref(), 0.0, sl_max, pc)?,
            }
        };
        let mut state = LocalStatePorous::new(1.0 - self.nf_ini, self.density.density(pl));
        state.liquid_pressure = pl;
        state.gas_pressure = pg;
        state.liquid_saturation = sl;
        state.divus = divus;
        Ok(state)
    }

    /// Updates the state given the pressure increments and the new volumetric strain
    pub fn update(&self, state: &mut LocalStatePorous, delta_pl: f64, delta_pg: f64, divus: f64) -> Result<(), StrError> {
        // pressures, density, and strain
        state.liquid_density += self.cl() * delta_pl;
        state.liquid_pressure += delta_pl;
        state.gas_pressure += delta_pg;
        state.divus = divus;

        // capillary pressure increment
        let delta_pc = delta_pg - delta_pl;
        state.delta_pc = delta_pc;
        if f64::abs(delta_pc) < DELTA_PC_MIN {
            return Ok(());
        }
        state.wetting = delta_pc < 0.0;
        let pc = state.capillary_pressure();

        // non-hysteretic models
        if let Some(direct) = self.retention.direct_saturation() {
            state.liquid_saturation = direct.calc_sl(pc)?;
            return Ok(());
        }

        // trial saturation
        let model = self.retention.as_ref();
        let (sl_min, sl_max) = model.saturation_limits();
        let wetting = state.wetting;
        let sl0 = state.liquid_saturation;
        let pc0 = pc - delta_pc;
        let k1 = model.calc_cc(pc0, sl0, wetting)?;
        let mut sl = f64::min(f64::max(sl0 + delta_pc * k1, sl_min), sl_max);
        if self.modified_euler {
            let k2 = model.calc_cc(pc, sl, wetting)?;
            sl = f64::min(f64::max(sl0 + delta_pc * (k1 + k2) / 2.0, sl_min), sl_max);
        }

        // backward-Euler: r = sl - sl0 - Δpc · Cc(pc, sl) = 0
        let mut converged = false;
        for _ in 0..self.n_max_it {
            let cc = model.calc_cc(pc, sl, wetting)?;
            let r = sl - sl0 - delta_pc * cc;
            if f64::abs(r) < self.itol {
                converged = true;
                break;
            }
            let j = model.calc_dcc_dsl(pc, sl, wetting)?;
            sl -= r / (1.0 - delta_pc * j);
            if sl < sl_min {
                return Err("saturation cannot be smaller than the minimum");
            }
            sl = f64::min(sl, sl_max);
        }
        if !converged {
            return Err("backward-Euler update of the liquid saturation did not converge");
        }
        state.liquid_saturation = sl;
        Ok(())
    }

    /// Calculates Ccb = dsl/dpc consistent with the saturation update
    pub fn calc_ccb(&self, state: &LocalStatePorous, pc: f64) -> Result<f64, StrError> {
        let (sl, wetting) = (state.liquid_saturation, state.wetting);
        let cc = self.retention.calc_cc(pc, sl, wetting)?;
        if self.retention.direct_saturation().is_some() {
            return Ok(cc);
        }
        let d = self.retention.calc_derivatives(pc, sl, wetting)?;
        let dpc = state.delta_pc;
        Ok((cc + dpc * d.l) / (1.0 - dpc * d.j))
    }

    /// Calculates Ccd = dCcb/dpc consistent with the saturation update
    pub fn calc_ccd(&self, state: &LocalStatePorous, pc: f64) -> Result<f64, StrError> {
        let (sl, wetting) = (state.liquid_saturation, state.wetting);
        let d = self.retention.calc_derivatives(pc, sl, wetting)?;
        if self.retention.direct_saturation().is_some() {
            return Ok(d.l);
        }
        let ccb = self.calc_ccb(state, pc)?;
        let dpc = state.delta_pc;
        let num = 2.0 * d.l + dpc * (d.lx + d.jx * ccb) + (2.0 * d.j + dpc * (d.jx + d.jy * ccb)) * ccb;
        Ok(num / (1.0 - dpc * d.j))
    }

    /// Calculates the liquid-solid variables
    pub fn ls_vars(&self, state: &LocalStatePorous) -> Result<LsVars, StrError> {
        let ns = (1.0 - state.divus) * state.partial_fraction_solids_ini;
        let nf = 1.0 - ns;
        let sl = state.liquid_saturation;
        let rho_ll = state.liquid_density;
        let ccb = self.calc_ccb(state, state.capillary_pressure())?;
        let rho_l = nf * sl * rho_ll;
        Ok(LsVars {
            rho_l,
            rho: rho_l + ns * self.rho_ss,
            p: sl * state.liquid_pressure,
            cpl: nf * (sl * self.cl() - rho_ll * ccb),
            cvs: sl * rho_ll,
            klr: self.conductivity.calc_klr(sl),
        })
    }

    /// Calculates the derivatives of the liquid-solid variables
    pub fn ls_derivs(&self, state: &LocalStatePorous) -> Result<LsDerivs, StrError> {
        let ns0 = state.partial_fraction_solids_ini;
        let nf = 1.0 - (1.0 - state.divus) * ns0;
        let sl = state.liquid_saturation;
        let rho_ll = state.liquid_density;
        let cl = self.cl();
        let pc = state.capillary_pressure();
        let ccb = self.calc_ccb(state, pc)?;
        let ccd = self.calc_ccd(state, pc)?;
        Ok(LsDerivs {
            drho_dpl: nf * (sl * cl - rho_ll * ccb),
            dp_dpl: sl - state.liquid_pressure * ccb,
            dcpl_dpl: nf * (rho_ll * ccd - 2.0 * cl * ccb),
            dcvs_dpl: sl * cl - rho_ll * ccb,
            dklr_dpl: -self.conductivity.calc_dklr_dsl(sl) * ccb,
            dcpl_dus: ns0 * (sl * cl - rho_ll * ccb),
            drho_dus: ns0 * (sl * rho_ll - self.rho_ss),
        })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
