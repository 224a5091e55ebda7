use gemlab::mesh::{Mesh, Samples};
use pmsim_up::prelude::*;
use russell_lab::*;

// Consistent Jacobian of the u-p element
//
// TEST GOAL
//
// Verifies the analytical Jacobian matrix of the u-p element against the
// derivatives of the residual vector computed with finite differences.
//
// The perturbed residuals are computed after updating the secondary values
// (porous states and effective stresses), thus the numerical Jacobian also
// checks the consistent moduli Ccb and Ccd.
//
// The hysteretic retention model and the elastoplastic model are checked
// within an implicit time step: the secondary values are updated from the
// values at the beginning of the step with the accumulated increment ΔY.
//
// MESH
//
// Single Qua4, Qua8 (distorted), Tri6, or Hex8 cell
//
// CONFIGURATION AND PARAMETERS
//
// * Unsaturated state with pl ≈ -5 (the air-entry value of Brooks-Corey is 2)
// * Non-uniform displacements, velocities, and star variables
// * Dynamic and transient coefficients with Δt = 0.5
// * Gravity g = 10
// * Constant and anisotropic (full tensor) saturated conductivity
// * Pedroso-Zhang-Ehlers with hysteresis along a wetting path (Δpl ≈ 0.5)
// * von Mises plasticity under simple shear (γ = 0.1)

/// Returns the parameters with a given retention model and conductivity
fn parameters(retention: ParamLiquidRetention, conductivity: ParamConductivity) -> ParamPorousSldLiq {
    let mut param = ParamPorousSldLiq::sample(retention);
    param.conductivity_liquid = conductivity;
    param
}

/// Returns a full saturated conductivity tensor
fn anisotropic() -> ParamConductivity {
    ParamConductivity::Anisotropic {
        kxx: 2.2,
        kyy: 1.5,
        kzz: 1.8,
        kxy: 0.4,
        kyz: -0.2,
        kxz: 0.3,
    }
}

/// Allocates the element and the state with non-trivial primary and star variables
fn element_up_and_state(
    mesh: &Mesh,
    config: &Config,
    param: &ParamPorousSldLiq,
    dynamic: bool,
) -> Result<(ElementUp, FemState), StrError> {
    let cell = &mesh.cells[0];
    let fluids = ParamFluids::sample_water();
    let retention = allocate_liquid_retention(&param.retention_liquid)?;
    let mut elem = ElementUp::new(mesh, cell, config, param, &fluids, retention)?;
    let ndim = mesh.ndim;
    let mut state = FemState::new(elem.n_equation())?;
    if dynamic {
        let mut control = Control::new();
        control.dynamics = true;
        state.dt = 0.5;
        state.coefs = control.dynamic_coefficients(state.dt)?;
    }
    for m in 0..elem.u.nnode {
        let x = &mesh.points[cell.points[m]].coords;
        let z = if ndim == 3 { x[2] } else { 0.0 };
        for i in 0..ndim {
            let r = elem.u.umap[i + m * ndim];
            let f = (i + 1) as f64;
            state.uu[r] = 1e-3 * f * (x[0] + 0.5 * x[1] - 0.25 * z);
            state.uu_star[r] = 0.1 * f * (1.0 + x[1]);
            state.vv_star[r] = 0.02 * f * (x[0] - x[1] + z);
        }
        if m < elem.p.nnode {
            let r = elem.p.pmap[m];
            state.uu[r] = -5.0 - 0.5 * x[0] + 0.3 * x[1] + 0.2 * z;
            state.uu_star[r] = 0.5 * state.uu[r];
        }
    }
    elem.initialize_internal_values(&state)?;
    Ok((elem, state))
}

/// Allocates the generic element and the state with non-trivial primary and star variables
fn element_and_state(
    mesh: &Mesh,
    config: &Config,
    param: &ParamPorousSldLiq,
    dynamic: bool,
) -> Result<(GenericElement, FemState), StrError> {
    let (elem, state) = element_up_and_state(mesh, config, param, dynamic)?;
    Ok((GenericElement::new(Box::new(elem)), state))
}

/// Compares the analytical and numerical Jacobian matrices
fn check_jacobian(generic: &mut GenericElement, state: &mut FemState, tol: f64) -> Result<(), StrError> {
    generic.calc_jacobian(state)?;
    let jj_ana = generic.jacobian.clone();
    generic.numerical_jacobian(state)?;
    mat_approx_eq(&jj_ana, &generic.jacobian, tol);
    Ok(())
}

/// Compares the analytical and numerical Jacobian matrices within an implicit time step
///
/// The secondary values are updated from the beginning of the step with the accumulated
/// increment ΔY = delta. The perturbed residuals are computed after updating the secondary
/// values from the same backup with the perturbed ΔY, as in the iterations of the time step.
fn check_jacobian_after_increment(
    elem: &mut ElementUp,
    state: &mut FemState,
    delta: &Vector,
    tol: f64,
) -> Result<(), StrError> {
    let neq = elem.n_equation();
    elem.backup_secondary_values();
    for i in 0..neq {
        state.uu[i] += delta[i];
        state.duu[i] = delta[i];
    }
    elem.update_secondary_values(state)?;

    // analytical
    let mut jj_ana = Matrix::new(neq, neq);
    elem.calc_jacobian(&mut jj_ana, state)?;

    // numerical
    let mut jj_num = Matrix::new(neq, neq);
    let mut residual = Vector::new(neq);
    for j in 0..neq {
        let (uu_j, duu_j) = (state.uu[j], state.duu[j]);
        for i in 0..neq {
            let res = deriv1_central5(uu_j, &mut residual, |u, r| {
                state.uu[j] = u;
                state.duu[j] = duu_j + u - uu_j;
                elem.restore_secondary_values();
                let res = match elem.update_secondary_values(state) {
                    Ok(()) => elem.calc_residual(r, state),
                    Err(e) => Err(e),
                };
                state.uu[j] = uu_j;
                state.duu[j] = duu_j;
                res?;
                Ok(r[i])
            })?;
            jj_num.set(i, j, res);
        }
    }

    // back to the updated state
    elem.restore_secondary_values();
    elem.update_secondary_values(state)?;
    mat_approx_eq(&jj_ana, &jj_num, tol);
    Ok(())
}

#[test]
fn test_up_numerical_jacobian_qua8() -> Result<(), StrError> {
    let mesh = SampleMeshes::one_qua8_distorted();
    let mut config = Config::new(2);
    config.set_gravity(10.0)?;
    let retention = ParamLiquidRetention::sample_brooks_corey();

    // steady, isotropic conductivity
    let param = parameters(retention, ParamConductivity::sample_constant());
    let (mut generic, mut state) = element_and_state(&mesh, &config, &param, false)?;
    assert_eq!(generic.residual.dim(), 20);
    check_jacobian(&mut generic, &mut state, 1e-6)?;

    // dynamics, anisotropic conductivity
    let param = parameters(retention, anisotropic());
    let (mut generic, mut state) = element_and_state(&mesh, &config, &param, true)?;
    check_jacobian(&mut generic, &mut state, 1e-6)?;

    // the state is unchanged by the numerical differentiation
    let (_, original) = element_and_state(&mesh, &config, &param, true)?;
    vec_approx_eq(&state.uu, &original.uu, 1e-15);
    vec_approx_eq(&state.duu, &original.duu, 1e-15);
    Ok(())
}

#[test]
fn test_up_numerical_jacobian_qua4() -> Result<(), StrError> {
    let mesh = Samples::one_qua4();
    let mut config = Config::new(2);
    config.set_gravity(10.0)?.set_n_integ_point(9)?;
    let param = parameters(ParamLiquidRetention::sample_van_genuchten(), anisotropic());
    let (mut generic, mut state) = element_and_state(&mesh, &config, &param, true)?;
    assert_eq!(generic.residual.dim(), 12);
    check_jacobian(&mut generic, &mut state, 1e-6)
}

#[test]
fn test_up_numerical_jacobian_tri6() -> Result<(), StrError> {
    let mesh = SampleMeshes::one_tri6();
    let mut config = Config::new(2);
    config.set_gravity(10.0)?.set_extrapolation(true)?;
    let param = parameters(ParamLiquidRetention::sample_brooks_corey(), anisotropic());
    let (mut generic, mut state) = element_and_state(&mesh, &config, &param, true)?;
    assert_eq!(generic.residual.dim(), 15);
    check_jacobian(&mut generic, &mut state, 1e-6)
}

#[test]
fn test_up_numerical_jacobian_equal_order() -> Result<(), StrError> {
    let mesh = SampleMeshes::one_qua8_distorted();
    let mut config = Config::new(2);
    config.set_gravity(10.0)?.set_lbb(false)?;
    let param = parameters(ParamLiquidRetention::sample_linear(), ParamConductivity::sample_constant());
    let (mut generic, mut state) = element_and_state(&mesh, &config, &param, true)?;
    assert_eq!(generic.residual.dim(), 24);
    check_jacobian(&mut generic, &mut state, 1e-6)
}

#[test]
fn test_up_numerical_jacobian_hex8() -> Result<(), StrError> {
    let mesh = Samples::one_hex8();
    let mut config = Config::new(3);
    config.set_gravity(10.0)?;
    let param = parameters(ParamLiquidRetention::sample_brooks_corey(), anisotropic());
    let (mut generic, mut state) = element_and_state(&mesh, &config, &param, true)?;
    assert_eq!(generic.residual.dim(), 32);
    check_jacobian(&mut generic, &mut state, 1e-6)
}

#[test]
fn test_up_numerical_jacobian_pze_wetting() -> Result<(), StrError> {
    let mesh = SampleMeshes::one_qua8_distorted();
    let mut config = Config::new(2);
    config.set_gravity(10.0)?;
    let param = parameters(ParamLiquidRetention::sample_pedroso_zhang_ehlers(true), anisotropic());
    let (mut elem, mut state) = element_up_and_state(&mesh, &config, &param, true)?;
    assert_eq!(elem.n_equation(), 20);

    // the drying curve is followed initially
    for st in &elem.p.states.all {
        assert_eq!(st.wetting, false);
        assert_eq!(st.delta_pc, 0.0);
    }

    // increment: wetting with small displacements
    let neq = elem.n_equation();
    let mut delta = Vector::new(neq);
    for m in 0..elem.u.nnode {
        let x = &mesh.points[mesh.cells[0].points[m]].coords;
        delta[elem.u.umap[m * 2]] = 1e-4 * x[1];
        delta[elem.u.umap[1 + m * 2]] = -2e-4 * x[0];
    }
    for m in 0..elem.p.nnode {
        delta[elem.p.pmap[m]] = 0.5 + 0.1 * (m as f64);
    }
    check_jacobian_after_increment(&mut elem, &mut state, &delta, 1e-6)?;

    // the integration points are wetting from the beginning of the step
    for st in &elem.p.states.all {
        assert!(st.wetting);
        assert!(st.delta_pc < -0.4);
        assert!(st.liquid_saturation > 0.0 && st.liquid_saturation <= 1.0);
    }
    Ok(())
}

#[test]
fn test_up_numerical_jacobian_von_mises() -> Result<(), StrError> {
    let mesh = SampleMeshes::one_qua8_distorted();
    let mut config = Config::new(2);
    config.set_gravity(10.0)?;
    let mut param = parameters(ParamLiquidRetention::sample_brooks_corey(), anisotropic());
    param.stress_strain = ParamStressStrain::VonMises {
        young: 10_000.0,
        poisson: 0.2,
        hh: 800.0,
        z0: 10.0,
    };
    let (mut elem, mut state) = element_up_and_state(&mesh, &config, &param, true)?;
    for st in &elem.u.states.all {
        assert_eq!(st.internal_values[0], 10.0);
    }

    // increment: simple shear Δux = γ·y with a small drying of the liquid
    let neq = elem.n_equation();
    let mut delta = Vector::new(neq);
    for m in 0..elem.u.nnode {
        let y = mesh.points[mesh.cells[0].points[m]].coords[1];
        delta[elem.u.umap[m * 2]] = 0.1 * y;
    }
    for m in 0..elem.p.nnode {
        delta[elem.p.pmap[m]] = -0.2;
    }
    check_jacobian_after_increment(&mut elem, &mut state, &delta, 1e-5)?;

    // all integration points are on the (hardened) yield surface
    for st in &elem.u.states.all {
        assert!(st.loading);
        assert!(st.algo_lambda > 0.0);
        assert!(st.internal_values[0] > 10.0);
        approx_eq(st.stress.invariant_sigma_d(), st.internal_values[0], 1e-10);
    }
    Ok(())
}
