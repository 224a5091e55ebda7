use pmsim_up::prelude::*;
use russell_lab::*;

// Liquid column at rest
//
// TEST GOAL
//
// Verifies the liquid pressure interpolation, the initialization of the porous
// states, and the liquid mass balance of the u-p element under gravity.
//
// MESH
//
// Column of 10 Qua8 cells (1 m × 10 m) with the free surface at the top
//
//      pl = 0  o----o----o  y = 10
//              |         |
//              o         o
//              :         :
//              o         o
//              |         |
//              o----o----o  y = 0
//
// CONFIGURATION AND PARAMETERS
//
// * Equal-order (quadratic) interpolation of the liquid pressure
// * Gravity g = 10 m/s², compressible water
// * Nodal pressures given by the exact solution of dp/dy = -ρ(p) g
// * Steady analysis and zero displacements

const NCELL: usize = 10;
const HEIGHT: f64 = 10.0;
const GRAVITY: f64 = 10.0;

#[test]
fn test_hydrostatic_column() -> Result<(), StrError> {
    // mesh and configuration
    let mesh = SampleMeshes::column_qua8(NCELL, 1.0, HEIGHT)?;
    let mut config = Config::new(2);
    config.set_gravity(GRAVITY)?.set_lbb(false)?;

    // parameters and shared retention model
    let retention = ParamLiquidRetention::sample_brooks_corey();
    let param = ParamPorousSldLiq::sample(retention);
    let fluids = ParamFluids::sample_water();
    let mut registry = RetentionRegistry::new();
    let model = registry
        .get_model("column", "soil", retention.name(), &retention, false)?
        .ok_or("model is not available")?;

    // global equations: ux, uy, pl at every point
    let npoint = mesh.points.len();
    let neq = 3 * npoint;
    let mut state = FemState::new(neq)?;
    let mut elements = Vec::new();
    for cell in &mesh.cells {
        let mut elem = ElementUp::new(&mesh, cell, &config, &param, &fluids, model.clone())?;
        let eqs: Vec<Vec<usize>> = cell.points.iter().map(|id| vec![3 * id, 3 * id + 1, 3 * id + 2]).collect();
        elem.set_eqs(&eqs)?;
        for id in &cell.points {
            let y = mesh.points[*id].coords[1];
            state.uu[3 * id + 2] = elem.p.model.density.pressure_at_elevation(y, HEIGHT, GRAVITY)?;
        }
        elements.push(elem);
    }

    // check the integration points
    for (e, cell) in mesh.cells.iter().enumerate() {
        let elem = &mut elements[e];
        elem.initialize_internal_values(&state)?;
        for p in 0..elem.u.gauss.npoint() {
            elem.calc_ip_vars(p, &state)?;
            let mut y = 0.0;
            for m in 0..cell.points.len() {
                y += elem.u.pad.interp[m] * mesh.points[cell.points[m]].coords[1];
            }
            let exact = elem.p.model.density.pressure_at_elevation(y, HEIGHT, GRAVITY)?;
            let st = &elem.p.states.all[p];
            approx_eq(elem.p.pl, exact, 1e-10);
            approx_eq(st.liquid_pressure, exact, 1e-10);
            approx_eq(st.liquid_density, elem.p.model.density.density(exact), 1e-15);
            assert_eq!(st.liquid_saturation, 1.0);
            // ∇pl = -ρL g
            let rho_ll = elem.p.model.density.density_at_elevation(y, HEIGHT, GRAVITY)?;
            approx_eq(elem.p.gpl[0], 0.0, 1e-10);
            approx_eq(elem.p.gpl[1], -rho_ll * GRAVITY, 1e-9);
        }
    }

    // assemble the residual vector
    let mut fb = Vector::new(neq);
    for elem in elements {
        let mut generic = GenericElement::new(Box::new(elem));
        generic.calc_residual(&state)?;
        generic.add_to_rhs(&mut fb)?;
    }

    // the liquid mass balance is satisfied everywhere
    for id in 0..npoint {
        approx_eq(fb[3 * id + 2], 0.0, 1e-9);
    }

    // the pore pressure is self-equilibrated and the weight of the mixture points downwards
    let mut total_fx = 0.0;
    let mut total_fy = 0.0;
    for id in 0..npoint {
        total_fx += fb[3 * id];
        total_fy += fb[3 * id + 1];
    }
    approx_eq(total_fx, 0.0, 1e-10);
    assert!(total_fy < 0.0);
    Ok(())
}
