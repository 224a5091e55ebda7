/// Holds parameters for stress-strain relations (effective stress)
#[derive(Clone, Copy, Debug)]
pub enum ParamStressStrain {
    /// Linear elastic model
    LinearElastic {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,
    },

    /// von Mises plasticity model
    VonMises {
        /// Young's modulus
        young: f64,

        /// Poisson's coefficient
        poisson: f64,

        /// Hardening coefficient
        hh: f64,

        /// Initial size of the yield surface
        ///
        /// This value corresponds to the von Mises stress:
        ///
        /// ```text
        /// f = σd - z
        /// ```
        z0: f64,
    },
}

/// Holds parameters for liquid-retention models
#[derive(Clone, Copy, Debug)]
pub enum ParamLiquidRetention {
    /// Linear relation between saturation and capillary pressure
    Linear {
        /// Slope coefficient: `sl = sl_max - λ (pc - pc_ae)`
        lambda: f64,

        /// Air-entry pressure
        pc_ae: f64,

        /// Residual (minimum) saturation
        sl_min: f64,

        /// Maximum saturation
        sl_max: f64,
    },
    BrooksCorey {
        /// Slope coefficient
        lambda: f64,

        /// Air-entry pressure
        pc_ae: f64,

        /// Residual (minimum) saturation
        sl_min: f64,

        /// Maximum saturation
        sl_max: f64,
    },
    VanGenuchten {
        /// α parameter
        alpha: f64,

        /// m parameter
        m: f64,

        /// n parameter
        n: f64,

        /// Minimum sl
        sl_min: f64,

        /// Maximum sl
        sl_max: f64,
    },
    PedrosoZhangEhlers {
        /// Allows the model to generate hysteresis loops and scanning curves
        with_hysteresis: bool,

        /// λd parameter
        lambda_d: f64,

        /// λw parameter
        lambda_w: f64,

        /// βd parameter
        beta_d: f64,

        /// βw parameter
        beta_w: f64,

        /// β1 parameter
        beta_1: f64,

        /// β2 parameter
        beta_2: f64,

        /// xrd parameter
        x_rd: f64,

        /// xrw parameter
        x_rw: f64,

        /// y0 parameter
        y_0: f64,

        /// yr parameter
        y_r: f64,
    },
}

/// Holds parameters for the liquid conductivity
///
/// The saturated conductivity tensor is `kl_sat`; the relative conductivity
/// `klr(sl)` reduces it for unsaturated states: `kl = klr · kl_sat`
#[derive(Clone, Copy, Debug)]
pub enum ParamConductivity {
    /// Constant diagonal tensor and `klr = 1`
    Constant {
        /// x-component of the conductivity tensor
        kx: f64,

        /// y-component of the conductivity tensor
        ky: f64,

        /// z-component of the conductivity tensor
        kz: f64,
    },

    /// Constant full (symmetric) tensor and `klr = 1`
    Anisotropic {
        /// xx-component of the conductivity tensor
        kxx: f64,

        /// yy-component of the conductivity tensor
        kyy: f64,

        /// zz-component of the conductivity tensor
        kzz: f64,

        /// xy-component of the conductivity tensor
        kxy: f64,

        /// yz-component of the conductivity tensor
        kyz: f64,

        /// xz-component of the conductivity tensor
        kxz: f64,
    },

    /// Diagonal tensor with power-law relative conductivity `klr = λ0 + (1 - λ0) slⁿ`
    PowerLaw {
        /// x-component of the conductivity tensor
        kx: f64,

        /// y-component of the conductivity tensor
        ky: f64,

        /// z-component of the conductivity tensor
        kz: f64,

        /// λ0 parameter (klr at zero saturation)
        lambda_0: f64,

        /// n exponent
        n: f64,
    },
}

/// Holds parameters for intrinsic (real) density
#[derive(Clone, Copy, Debug)]
pub struct ParamRealDensity {
    /// Compressibility C = dρReal/dp
    pub cc: f64,

    /// Reference pressure p₀
    pub p_ref: f64,

    /// Reference intrinsic density ρReal₀
    pub rho_ref: f64,
}

/// Holds parameters for the pore fluid
#[derive(Clone, Copy, Debug)]
pub struct ParamFluids {
    /// Density of liquid constituent
    pub density_liquid: ParamRealDensity,
}

/// Holds parameters for porous media mechanics simulations with solid and liquid
#[derive(Clone, Copy, Debug)]
pub struct ParamPorousSldLiq {
    /// Initial porosity: `nf_ini = nf₀`
    pub porosity_initial: f64,

    /// Intrinsic (real) density of solids: `rho_ss = ρS = ρS0` (constant/incompressible solids)
    pub density_solid: f64,

    /// Effective stress model
    pub stress_strain: ParamStressStrain,

    /// Liquid retention model: `Cc = dsl/dpc`
    pub retention_liquid: ParamLiquidRetention,

    /// Liquid conductivity: `kl`
    pub conductivity_liquid: ParamConductivity,
}

impl ParamLiquidRetention {
    /// Returns the short name of the model (used by the registry)
    pub fn name(&self) -> &'static str {
        match self {
            ParamLiquidRetention::Linear { .. } => "lin",
            ParamLiquidRetention::BrooksCorey { .. } => "bc",
            ParamLiquidRetention::VanGenuchten { .. } => "vg",
            ParamLiquidRetention::PedrosoZhangEhlers { .. } => "pze",
        }
    }

    /// Returns the saturation limits (sl_min, sl_max) defined by the parameters
    pub fn saturation_limits(&self) -> (f64, f64) {
        match *self {
            ParamLiquidRetention::Linear { sl_min, sl_max, .. } => (sl_min, sl_max),
            ParamLiquidRetention::BrooksCorey { sl_min, sl_max, .. } => (sl_min, sl_max),
            ParamLiquidRetention::VanGenuchten { sl_min, sl_max, .. } => (sl_min, sl_max),
            ParamLiquidRetention::PedrosoZhangEhlers { y_r, y_0, .. } => (y_r, y_0),
        }
    }

    /// Returns sample parameters for the linear model
    pub fn sample_linear() -> Self {
        ParamLiquidRetention::Linear {
            lambda: 0.01,
            pc_ae: 1.0,
            sl_min: 0.1,
            sl_max: 1.0,
        }
    }

    /// Returns sample parameters for the Brooks-Corey model
    pub fn sample_brooks_corey() -> Self {
        ParamLiquidRetention::BrooksCorey {
            lambda: 0.8,
            pc_ae: 2.0,
            sl_min: 0.1,
            sl_max: 1.0,
        }
    }

    /// Returns sample parameters for the van Genuchten model
    pub fn sample_van_genuchten() -> Self {
        ParamLiquidRetention::VanGenuchten {
            alpha: 0.08,
            m: 4.0,
            n: 1.5,
            sl_min: 0.05,
            sl_max: 1.0,
        }
    }

    /// Returns sample parameters for the Pedroso-Zhang-Ehlers model
    pub fn sample_pedroso_zhang_ehlers(with_hysteresis: bool) -> Self {
        ParamLiquidRetention::PedrosoZhangEhlers {
            with_hysteresis,
            lambda_d: 3.0,
            lambda_w: 3.0,
            beta_d: 6.0,
            beta_w: 6.0,
            beta_1: 6.0,
            beta_2: 6.0,
            x_rd: 2.0,
            x_rw: 2.0,
            y_0: 1.0,
            y_r: 0.005,
        }
    }
}

impl ParamConductivity {
    /// Returns sample parameters for a constant (isotropic) conductivity
    pub fn sample_constant() -> Self {
        ParamConductivity::Constant {
            kx: 2.2,
            ky: 2.2,
            kz: 2.2,
        }
    }
}

impl ParamRealDensity {
    /// Returns sample parameters for water (units: Mg, m, kPa)
    pub fn sample_water() -> Self {
        ParamRealDensity {
            cc: 4.53e-7,  // Mg/(m³ kPa)
            p_ref: 0.0,   // kPa
            rho_ref: 1.0, // Mg/m³
        }
    }
}

impl ParamFluids {
    /// Returns sample parameters for water (units: Mg, m, kPa)
    pub fn sample_water() -> Self {
        ParamFluids {
            density_liquid: ParamRealDensity::sample_water(),
        }
    }
}

impl ParamPorousSldLiq {
    /// Returns sample parameters with a given retention model, constant conductivity, and linear elasticity
    pub fn sample(retention_liquid: ParamLiquidRetention) -> Self {
        ParamPorousSldLiq {
            porosity_initial: 0.4,
            density_solid: 2.7, // Mg/m³
            stress_strain: ParamStressStrain::LinearElastic {
                young: 10_000.0, // kPa
                poisson: 0.2,    // [-]
            },
            retention_liquid,
            conductivity_liquid: ParamConductivity::sample_constant(),
        }
    }

    /// Returns sample parameters with the Brooks-Corey model, constant conductivity, and linear elasticity
    pub fn sample_brooks_corey_constant_elastic() -> Self {
        ParamPorousSldLiq::sample(ParamLiquidRetention::sample_brooks_corey())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::{
        ParamConductivity, ParamFluids, ParamLiquidRetention, ParamPorousSldLiq, ParamRealDensity, ParamStressStrain,
    };

    #[test]
    fn param_stress_strain_derive_works() {
        let p = ParamStressStrain::LinearElastic {
            young: 1000.0,
            poisson: 0.2,
        };
        let q = p.clone();
        let correct = "LinearElastic { young: 1000.0, poisson: 0.2 }";
        assert_eq!(format!("{:?}", q), correct);
    }

    #[test]
    fn param_liquid_retention_derive_works() {
        let p = ParamLiquidRetention::BrooksCorey {
            lambda: 1.0,
            pc_ae: 2.0,
            sl_min: 0.1,
            sl_max: 0.99,
        };
        let q = p.clone();
        let correct = "BrooksCorey { lambda: 1.0, pc_ae: 2.0, sl_min: 0.1, sl_max: 0.99 }";
        assert_eq!(format!("{:?}", q), correct);
    }

    #[test]
    fn param_liquid_retention_name_and_limits_work() {
        let p = ParamLiquidRetention::sample_linear();
        assert_eq!(p.name(), "lin");
        assert_eq!(p.saturation_limits(), (0.1, 1.0));
        let p = ParamLiquidRetention::sample_brooks_corey();
        assert_eq!(p.name(), "bc");
        let p = ParamLiquidRetention::sample_van_genuchten();
        assert_eq!(p.name(), "vg");
        assert_eq!(p.saturation_limits(), (0.05, 1.0));
        let p = ParamLiquidRetention::sample_pedroso_zhang_ehlers(true);
        assert_eq!(p.name(), "pze");
        assert_eq!(p.saturation_limits(), (0.005, 1.0));
    }

    #[test]
    fn param_conductivity_derive_works() {
        let p = ParamConductivity::Constant {
            kx: 1.0,
            ky: 2.0,
            kz: 3.0,
        };
        let q = p.clone();
        let correct = "Constant { kx: 1.0, ky: 2.0, kz: 3.0 }";
        assert_eq!(format!("{:?}", q), correct);
    }

    #[test]
    fn param_fluids_derive_works() {
        let p = ParamFluids {
            density_liquid: ParamRealDensity {
                cc: 1.0,
                p_ref: 2.0,
                rho_ref: 3.0,
            },
        };
        let q = p.clone();
        let correct = "ParamFluids { density_liquid: ParamRealDensity { cc: 1.0, p_ref: 2.0, rho_ref: 3.0 } }";
        assert_eq!(format!("{:?}", q), correct);
    }

    #[test]
    fn param_porous_sld_liq_samples_work() {
        let mut p = ParamPorousSldLiq::sample_brooks_corey_constant_elastic();
        let q = p.clone();
        p.porosity_initial = 0.1;
        assert_eq!(q.porosity_initial, 0.4);
        assert_eq!(q.retention_liquid.name(), "bc");
        let p = ParamPorousSldLiq::sample(ParamLiquidRetention::sample_pedroso_zhang_ehlers(false));
        assert_eq!(p.retention_liquid.name(), "pze");
        assert_eq!(p.density_solid, 2.7);
    }
}
