use super::{calc_extrap_matrix, Gauss};
use crate::base::{Config, ParamFluids, ParamPorousSldLiq};
use crate::material::{ArrLocalStatePorous, LiquidRetention, ModelPorous};
use crate::StrError;
use gemlab::mesh::{Cell, Mesh};
use gemlab::shapes::{GeoClass, GeoKind, Scratchpad};
use russell_lab::{Matrix, Vector};
use russell_tensor::Tensor2;
use std::sync::Arc;

/// Returns the basic (corner nodes) kind of a cell kind
///
/// The liquid pressure is interpolated with the basic kind to satisfy the LBB condition.
pub fn basic_kind(kind: GeoKind) -> Result<GeoKind, StrError> {
    match kind.class() {
        GeoClass::Tri => Ok(GeoKind::Tri3),
        GeoClass::Qua => Ok(GeoKind::Qua4),
        GeoClass::Tet => Ok(GeoKind::Tet4),
        GeoClass::Hex => Ok(GeoKind::Hex8),
        _ => Err("the porous media element requires a Tri, Qua, Tet, or Hex cell"),
    }
}

/// Implements the liquid pressure part of the porous media element
pub struct ElementP {
    /// Number of nodes of the pressure interpolation
    pub nnode: usize,

    /// Scratchpad to compute interpolation functions and gradients
    pub pad: Scratchpad,

    /// Porous media model
    pub model: ModelPorous,

    /// Porous media states at all integration points
    pub states: ArrLocalStatePorous,

    /// Maps the pressure node to the index of the local equation
    pub pmap: Vec<usize>,

    /// Saturated liquid conductivity tensor
    pub kl_sat: Tensor2,

    /// Extrapolation matrix from integration points to pressure nodes (nnode, ngauss)
    pub extrap: Option<Matrix>,

    /// Partial density of liquid extrapolated to the pressure nodes
    pub rho_l_ex: Vector,

    /// Derivative of the extrapolated partial density of liquid w.r.t. the nodal pressures
    pub drho_l_dpl_ex: Matrix,

    /// Gravity acceleration vector
    pub g: Vec<f64>,

    /// Liquid pressure at the current integration point
    pub pl: f64,

    /// Gradient of the liquid pressure at the current integration point
    pub gpl: Vec<f64>,

    /// Star variable ψl at the current integration point
    pub psi_l: f64,

    /// Relative flux of liquid ρl·wl at the current integration point
    pub rho_wl: Vec<f64>,

    /// Auxiliary vector
    pub tmp: Vec<f64>,
}

impl ElementP {
    /// Allocates a new instance
    pub fn new(
        mesh: &Mesh,
        cell: &Cell,
        config: &Config,
        gauss: &Gauss,
        param: &ParamPorousSldLiq,
        fluids: &ParamFluids,
        retention: Arc<dyn LiquidRetention>,
    ) -> Result<Self, StrError> {
        let ndim = mesh.ndim;
        let kind = if config.lbb { basic_kind(cell.kind)? } else { cell.kind };
        let nnode = kind.nnode();
        let mut pad = Scratchpad::new(ndim, kind)?;
        for m in 0..nnode {
            for j in 0..ndim {
                pad.set_xx(m, j, mesh.points[cell.points[m]].coords[j]);
            }
        }
        let model = ModelPorous::new(&config.ideal, param, fluids, retention)?;
        let mut kl_sat = Tensor2::new(config.ideal.mandel());
        model.calc_kl_sat(&mut kl_sat);
        let state = model.init_state(0.0, 0.0, 0.0)?;
        let states = ArrLocalStatePorous::new(vec![state; gauss.npoint()]);
        let extrap = if config.extrapolation {
            Some(calc_extrap_matrix(&mut pad, gauss)?)
        } else {
            None
        };
        Ok(ElementP {
            nnode,
            pad,
            model,
            states,
            pmap: (0..nnode).collect(),
            kl_sat,
            extrap,
            rho_l_ex: Vector::new(nnode),
            drho_l_dpl_ex: Matrix::new(nnode, nnode),
            g: config.gravity_vector(),
            pl: 0.0,
            gpl: vec![0.0; ndim],
            psi_l: 0.0,
            rho_wl: vec![0.0; ndim],
            tmp: vec![0.0; ndim],
        })
    }

    /// Calculates the interpolation functions and gradients at a natural coordinate
    pub fn calc_shape(&mut self, ksi: &[f64]) -> Result<(), StrError> {
        (self.pad.fn_interp)(&mut self.pad.interp, ksi);
        let det_jac = self.pad.calc_gradient(ksi)?;
        if det_jac <= 0.0 {
            return Err("det(Jacobian) must be positive");
        }
        Ok(())
    }

    /// Interpolates pl, ∇pl, and ψl at the current integration point
    ///
    /// **Note:** `calc_shape` must be called first
    pub fn interp_vars(&mut self, l2g: &[usize], uu: &Vector, uu_star: &Vector) {
        let ndim = self.gpl.len();
        self.pl = 0.0;
        self.psi_l = 0.0;
        self.gpl.iter_mut().for_each(|v| *v = 0.0);
        for m in 0..self.nnode {
            let r = l2g[self.pmap[m]];
            self.pl += self.pad.interp[m] * uu[r];
            self.psi_l += self.pad.interp[m] * uu_star[r];
            for i in 0..ndim {
                self.gpl[i] += self.pad.gradient.get(m, i) * uu[r];
            }
        }
    }

    /// Interpolates a nodal increment of liquid pressure at the current integration point
    ///
    /// **Note:** `calc_shape` must be called first
    pub fn interp_increment(&self, l2g: &[usize], duu: &Vector) -> f64 {
        let mut delta_pl = 0.0;
        for m in 0..self.nnode {
            delta_pl += self.pad.interp[m] * duu[l2g[self.pmap[m]]];
        }
        delta_pl
    }

    /// Clears the extrapolated values
    pub fn clear_extrapolation(&mut self) {
        self.rho_l_ex.fill(0.0);
        self.drho_l_dpl_ex.fill(0.0);
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
