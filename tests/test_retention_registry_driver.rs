use pmsim_up::prelude::*;
use russell_lab::*;
use std::sync::Arc;

// Shared retention models and verification of the consistent moduli
//
// TEST GOAL
//
// Verifies that the registry shares one model instance per simulation and material
// and that the porous driver accepts models obtained from the registry.
//
// CONFIGURATION AND PARAMETERS
//
// * Two materials sharing the same retention parameters
// * Drying path followed by a wetting path with all built-in models

const SAVE_FIGURE: bool = false;

/// Returns a drying-wetting path avoiding the air-entry values of the samples
fn drying_wetting_path() -> Vec<f64> {
    let mut pcs: Vec<_> = (0..9).map(|i| 1.5 + i as f64).collect();
    pcs.extend((0..8).rev().map(|i| 2.25 + i as f64));
    pcs
}

#[test]
fn test_retention_registry_driver() -> Result<(), StrError> {
    let mut registry = RetentionRegistry::new();
    assert_eq!(registry.available(), &["bc", "lin", "pze", "vg"]);
    let fluids = ParamFluids::sample_water();
    let ideal = Idealization::new(2);

    // shared instances
    let retention = ParamLiquidRetention::sample_van_genuchten();
    let a = registry.get_model("sim", "clay", "vg", &retention, false)?.ok_or("vg")?;
    let b = registry.get_model("sim", "clay", "vg", &retention, false)?.ok_or("vg")?;
    let c = registry.get_model("sim", "sand", "vg", &retention, false)?.ok_or("vg")?;
    assert!(Arc::ptr_eq(&a, &b));
    assert!(!Arc::ptr_eq(&a, &c));
    assert!(registry.get_model("sim", "clay", "unknown", &retention, false)?.is_none());

    // fresh instances are not cached
    let d = registry.get_model("sim", "clay", "vg", &retention, true)?.ok_or("vg")?;
    let e = registry.get_model("sim", "clay", "vg", &retention, false)?.ok_or("vg")?;
    assert!(!Arc::ptr_eq(&a, &d));
    assert!(Arc::ptr_eq(&a, &e));

    // all models along the same path
    let pcs = drying_wetting_path();
    for retention in [
        ParamLiquidRetention::sample_linear(),
        ParamLiquidRetention::sample_brooks_corey(),
        ParamLiquidRetention::sample_van_genuchten(),
        ParamLiquidRetention::sample_pedroso_zhang_ehlers(false),
        ParamLiquidRetention::sample_pedroso_zhang_ehlers(true),
    ] {
        let model = registry
            .get_model("sim", "clay", retention.name(), &retention, true)?
            .ok_or("model is not available")?;
        let param = ParamPorousSldLiq::sample(retention);
        let porous = ModelPorous::new(&ideal, &param, &fluids, model)?;
        let mut driver = PorousDriver::new(porous);
        driver.run(&pcs)?;
        assert_eq!(driver.states.len(), pcs.len());
        assert_eq!(driver.mismatches.len(), 0);

        // the saturation remains within the limits and follows the loading direction
        let (sl_min, sl_max) = retention.saturation_limits();
        for (i, state) in driver.states.iter().enumerate() {
            approx_eq(state.capillary_pressure(), pcs[i], 1e-14);
            assert!(state.liquid_saturation >= sl_min && state.liquid_saturation <= sl_max);
            if i > 0 && i < 9 {
                assert!(state.liquid_saturation <= driver.states[i - 1].liquid_saturation);
            }
            if i >= 9 {
                assert!(state.liquid_saturation >= driver.states[i - 1].liquid_saturation);
            }
        }
        if SAVE_FIGURE {
            let path = format!("/tmp/pmsim/test_retention_registry_driver_{}.svg", retention.name());
            driver.plot_sl_pc(&path)?;
        }
    }
    assert_eq!(registry.allocated(), &["sim_clay_vg", "sim_sand_vg"]);
    Ok(())
}
