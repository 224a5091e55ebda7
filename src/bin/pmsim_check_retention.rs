use pmsim_up::prelude::*;
use pmsim_up::StrError;
use structopt::StructOpt;

/// Command line options
#[derive(StructOpt, Debug)]
#[structopt(
    name = "pmsim_check_retention",
    about = "Runs a drying-wetting cycle with a sample retention model and checks the consistent moduli"
)]
struct Options {
    /// Retention model: lin, bc, vg, or pze
    model: String,

    /// Initial (and final) capillary pressure
    #[structopt(long, default_value = "0.25")]
    pc_ini: f64,

    /// Maximum capillary pressure
    #[structopt(long, default_value = "10.25")]
    pc_max: f64,

    /// Number of steps of each branch (drying and wetting)
    #[structopt(long, default_value = "20")]
    nstep: usize,

    /// Disables the hysteresis of the Pedroso-Zhang-Ehlers model
    #[structopt(long)]
    no_hysteresis: bool,

    /// Uses forward differences to check the moduli
    #[structopt(long)]
    forward_diff: bool,

    /// Prints the results of each step
    #[structopt(short, long)]
    verbose: bool,

    /// Saves a figure with the sl-pc path
    #[structopt(long)]
    figure: Option<String>,
}

/// Returns the sample parameters of a retention model
fn sample_param(model_name: &str, with_hysteresis: bool) -> Result<ParamLiquidRetention, StrError> {
    match model_name {
        "lin" => Ok(ParamLiquidRetention::sample_linear()),
        "bc" => Ok(ParamLiquidRetention::sample_brooks_corey()),
        "vg" => Ok(ParamLiquidRetention::sample_van_genuchten()),
        "pze" => Ok(ParamLiquidRetention::sample_pedroso_zhang_ehlers(with_hysteresis)),
        _ => Err("there are no sample parameters for the requested retention model"),
    }
}

fn main() -> Result<(), StrError> {
    // parse options
    let options = Options::from_args();
    if options.nstep < 1 {
        return Err("the number of steps must be ≥ 1");
    }
    if options.pc_max <= options.pc_ini {
        return Err("pc_max must be greater than pc_ini");
    }

    // allocate the model
    let retention = sample_param(&options.model, !options.no_hysteresis)?;
    let mut registry = RetentionRegistry::new();
    let model = registry
        .get_model("check", "sample", &options.model, &retention, false)?
        .ok_or("the retention model is not available in the registry")?;
    let param = ParamPorousSldLiq::sample(retention);
    let fluids = ParamFluids::sample_water();
    let porous = ModelPorous::new(&Idealization::new(2), &param, &fluids, model)?;

    // drying followed by wetting
    let n = options.nstep;
    let dpc = (options.pc_max - options.pc_ini) / (n as f64);
    let mut pcs: Vec<_> = (0..(n + 1)).map(|i| options.pc_ini + (i as f64) * dpc).collect();
    pcs.extend((1..(n + 1)).map(|i| options.pc_max - (i as f64) * dpc));

    // run
    let mut driver = PorousDriver::new(porous);
    driver.use_forward_diff = options.forward_diff;
    driver.verbose = options.verbose;
    driver.run(&pcs)?;
    if let Some(path) = &options.figure {
        driver.plot_sl_pc(path)?;
    }

    // message
    let thin_line = format!("{:─^1$}", "", 60);
    println!("\n{}", thin_line);
    println!("model = {}, number of states = {}", options.model, driver.states.len());
    if driver.mismatches.is_empty() {
        println!("the consistent moduli agree with the numerical derivatives");
    } else {
        for m in &driver.mismatches {
            println!(
                "{} @ step {:>3}: pc = {:>8.4}, sl = {:>8.6}, analytical = {:>13.6e}, numerical = {:>13.6e}",
                m.which, m.step, m.pc, m.sl, m.analytical, m.numerical
            );
        }
    }
    println!("{}\n", thin_line);
    Ok(())
}
