use super::{LocalStatePorous, ModelPorous};
use crate::StrError;
use plotpy::{Curve, Plot};
use russell_lab::deriv1_central5;
use std::ffi::OsStr;

/// Holds a disagreement between an analytical modulus and its numerical estimate
#[derive(Clone, Debug)]
pub struct TangentMismatch {
    /// Index of the step (1 ≤ step < pcs.len())
    pub step: usize,

    /// Capillary pressure at the end of the step
    pub pc: f64,

    /// Liquid saturation at the end of the step
    pub sl: f64,

    /// Analytical value
    pub analytical: f64,

    /// Numerical value
    pub numerical: f64,

    /// Name of the modulus ("Ccb" or "Ccd")
    pub which: &'static str,
}

/// Runs the porous model along a path of capillary pressures and checks the consistent moduli
pub struct PorousDriver {
    /// Porous model
    pub model: ModelPorous,

    /// Checks Ccb and Ccd against numerical derivatives of the update
    pub check_tangents: bool,

    /// Uses forward differences (instead of central differences) when checking the moduli
    pub use_forward_diff: bool,

    /// Tolerance to check Ccb
    pub tol_ccb: f64,

    /// Tolerance to check Ccd
    pub tol_ccd: f64,

    /// Prints the results of each step
    pub verbose: bool,

    /// Holds the states at each point of the path
    pub states: Vec<LocalStatePorous>,

    /// Holds the recorded disagreements
    pub mismatches: Vec<TangentMismatch>,
}

/// Holds auxiliary arguments for the numerical derivatives
struct ArgsForDriver {
    /// State at the beginning of the step
    state_old: LocalStatePorous,

    /// Capillary pressure at the beginning of the step
    pc_old: f64,
}

/// Computes the first derivative using the three-point forward difference formula
fn deriv1_forward3<F, A>(at_x: f64, args: &mut A, mut f: F) -> Result<f64, StrError>
where
    F: FnMut(f64, &mut A) -> Result<f64, StrError>,
{
    let h = 1e-5 * f64::max(1.0, f64::abs(at_x));
    let f0 = f(at_x, args)?;
    let f1 = f(at_x + h, args)?;
    let f2 = f(at_x + 2.0 * h, args)?;
    Ok((-3.0 * f0 + 4.0 * f1 - f2) / (2.0 * h))
}

impl PorousDriver {
    /// Allocates a new instance
    pub fn new(model: ModelPorous) -> Self {
        PorousDriver {
            model,
            check_tangents: true,
            use_forward_diff: false,
            tol_ccb: 1e-7,
            tol_ccd: 1e-7,
            verbose: false,
            states: Vec::new(),
            mismatches: Vec::new(),
        }
    }

    /// Runs the model along the capillary pressures path
    ///
    /// The initial state corresponds to `pl = -pcs[0]` and `pg = 0`.
    pub fn run(&mut self, pcs: &[f64]) -> Result<(), StrError> {
        if pcs.len() < 2 {
            return Err("the path must have at least two capillary pressures");
        }
        self.states.clear();
        self.mismatches.clear();
        let mut state = self.model.init_state(-pcs[0], 0.0, 0.0)?;
        self.states.push(state);
        if self.verbose {
            println!("{:>5} {:>13} {:>13} {:>8}", "step", "pc", "sl", "wetting");
            println!("{:>5} {:>13.6} {:>13.6} {:>8}", 0, pcs[0], state.liquid_saturation, state.wetting);
        }
        for i in 1..pcs.len() {
            let mut args = ArgsForDriver {
                state_old: state,
                pc_old: pcs[i - 1],
            };
            let pc_new = pcs[i];
            self.model.update(&mut state, -(pc_new - pcs[i - 1]), 0.0, 0.0)?;
            if self.verbose {
                println!("{:>5} {:>13.6} {:>13.6} {:>8}", i, pc_new, state.liquid_saturation, state.wetting);
            }
            if self.check_tangents {
                let model = &self.model;

                // Ccb = dsl/dpc
                let ccb = model.calc_ccb(&state, pc_new)?;
                let f_sl = |x: f64, a: &mut ArgsForDriver| -> Result<f64, StrError> {
                    let mut s = a.state_old;
                    model.update(&mut s, -(x - a.pc_old), 0.0, 0.0)?;
                    Ok(s.liquid_saturation)
                };
                let num = if self.use_forward_diff {
                    deriv1_forward3(pc_new, &mut args, f_sl)?
                } else {
                    deriv1_central5(pc_new, &mut args, f_sl)?
                };
                if f64::abs(ccb - num) > self.tol_ccb {
                    self.mismatches.push(mismatch(i, &state, pc_new, ccb, num, "Ccb"));
                }

                // Ccd = dCcb/dpc
                let ccd = model.calc_ccd(&state, pc_new)?;
                let f_ccb = |x: f64, a: &mut ArgsForDriver| -> Result<f64, StrError> {
                    let mut s = a.state_old;
                    model.update(&mut s, -(x - a.pc_old), 0.0, 0.0)?;
                    model.calc_ccb(&s, x)
                };
                let num = if self.use_forward_diff {
                    deriv1_forward3(pc_new, &mut args, f_ccb)?
                } else {
                    deriv1_central5(pc_new, &mut args, f_ccb)?
                };
                if f64::abs(ccd - num) > self.tol_ccd {
                    self.mismatches.push(mismatch(i, &state, pc_new, ccd, num, "Ccd"));
                }
            }
            self.states.push(state);
        }
        Ok(())
    }

    /// Saves a figure with the liquid saturation versus the capillary pressure
    pub fn plot_sl_pc<P>(&self, filepath: &P) -> Result<(), StrError>
    where
        P: AsRef<OsStr> + ?Sized,
    {
        if self.states.is_empty() {
            return Err("there are no results to plot");
        }
        let pc: Vec<_> = self.states.iter().map(|s| s.capillary_pressure()).collect();
        let sl: Vec<_> = self.states.iter().map(|s| s.liquid_saturation).collect();
        let mut curve = Curve::new();
        curve.set_line_color("#1a5dab").set_marker_style(".");
        curve.draw(&pc, &sl);
        let mut plot = Plot::new();
        plot.add(&curve)
            .grid_and_labels("$p_c$", "$s_\\ell$")
            .save(filepath)
    }
}

/// Logs and returns a mismatch record
fn mismatch(
    step: usize,
    state: &LocalStatePorous,
    pc: f64,
    analytical: f64,
    numerical: f64,
    which: &'static str,
) -> TangentMismatch {
    log::warn!(
        "{} @ step {} (pc = {:.3}, sl = {:.4}): analytical = {:e}, numerical = {:e}, diff = {:e}",
        which,
        step,
        pc,
        state.liquid_saturation,
        analytical,
        numerical,
        f64::abs(analytical - numerical)
    );
    TangentMismatch {
        step,
        pc,
        sl: state.liquid_saturation,
        analytical,
        numerical,
        which,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::PorousDriver;
    use crate::base::{Idealization, ParamFluids, ParamLiquidRetention, ParamPorousSldLiq};
    use crate::material::{allocate_liquid_retention, ModelPorous};
    use russell_lab::approx_eq;

    const SAVE_FIGURE: bool = false;

    fn new_driver(retention: ParamLiquidRetention) -> PorousDriver {
        let ideal = Idealization::new(2);
        let param = ParamPorousSldLiq::sample(retention);
        let fluids = ParamFluids::sample_water();
        let model = allocate_liquid_retention(&retention).unwrap();
        PorousDriver::new(ModelPorous::new(&ideal, &param, &fluids, model).unwrap())
    }

    fn drying_wetting_path() -> Vec<f64> {
        let mut pcs: Vec<_> = (0..11).map(|i| i as f64 + 0.25).collect();
        pcs.extend((0..10).rev().map(|i| i as f64 + 0.75));
        pcs
    }

    #[test]
    fn run_captures_errors() {
        let mut driver = new_driver(ParamLiquidRetention::sample_brooks_corey());
        assert_eq!(
            driver.run(&[1.0]).err(),
            Some("the path must have at least two capillary pressures")
        );
        assert_eq!(driver.plot_sl_pc("/tmp/pmsim/none.svg").err(), Some("there are no results to plot"));
    }

    #[test]
    fn run_works_with_hysteresis() {
        let mut driver = new_driver(ParamLiquidRetention::sample_pedroso_zhang_ehlers(true));
        let pcs = drying_wetting_path();
        driver.run(&pcs).unwrap();
        assert_eq!(driver.states.len(), pcs.len());
        assert_eq!(driver.mismatches.len(), 0);
        for (state, pc) in driver.states.iter().zip(pcs.iter()) {
            approx_eq(state.capillary_pressure(), *pc, 1e-14);
        }
        // the saturation decreases while drying and increases while wetting
        for i in 1..11 {
            assert!(driver.states[i].liquid_saturation <= driver.states[i - 1].liquid_saturation);
            assert_eq!(driver.states[i].wetting, false);
        }
        for i in 11..pcs.len() {
            assert!(driver.states[i].liquid_saturation >= driver.states[i - 1].liquid_saturation);
            assert_eq!(driver.states[i].wetting, true);
        }
        if SAVE_FIGURE {
            driver.plot_sl_pc("/tmp/pmsim/test_porous_driver_pze.svg").unwrap();
        }
    }

    #[test]
    fn run_works_with_direct_models() {
        for retention in [
            ParamLiquidRetention::sample_brooks_corey(),
            ParamLiquidRetention::sample_van_genuchten(),
            ParamLiquidRetention::sample_pedroso_zhang_ehlers(false),
        ] {
            let mut driver = new_driver(retention);
            driver.run(&drying_wetting_path()).unwrap();
            assert_eq!(driver.mismatches.len(), 0);
        }
    }

    #[test]
    fn forward_differences_and_mismatches_work() {
        let mut driver = new_driver(ParamLiquidRetention::sample_van_genuchten());
        driver.use_forward_diff = true;
        driver.tol_ccb = 1e-6;
        driver.tol_ccd = 1e-6;
        driver.run(&[1.0, 3.0, 5.0]).unwrap();
        assert_eq!(driver.mismatches.len(), 0);

        // impossible tolerances record all steps
        driver.tol_ccb = 0.0;
        driver.tol_ccd = 0.0;
        driver.run(&[1.0, 3.0, 5.0]).unwrap();
        assert_eq!(driver.mismatches.len(), 4);
        assert_eq!(driver.mismatches[0].which, "Ccb");
        assert_eq!(driver.mismatches[1].which, "Ccd");
        assert_eq!(driver.mismatches[3].step, 2);
    }
}
