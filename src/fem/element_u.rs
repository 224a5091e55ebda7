use super::Gauss;
use crate::base::{calculate_strain, Config, ParamStressStrain};
use crate::material::{ArrLocalState, StressStrain};
use crate::StrError;
use gemlab::mesh::{Cell, Mesh};
use gemlab::shapes::Scratchpad;
use russell_lab::{Matrix, Vector};
use russell_tensor::{Tensor2, Tensor4};

/// Implements the displacement (solid) part of the porous media element
///
/// The integration points of the displacement cell are shared with the pressure part.
pub struct ElementU {
    /// Space dimension
    pub ndim: usize,

    /// Number of nodes of the displacement cell
    pub nnode: usize,

    /// Scratchpad to compute interpolation functions and gradients
    pub pad: Scratchpad,

    /// Integration points
    pub gauss: Gauss,

    /// Effective stress-strain model
    pub model: StressStrain,

    /// Effective stress states at all integration points
    pub states: ArrLocalState,

    /// Maps the u-dof `i + m·ndim` to the index of the local equation
    pub umap: Vec<usize>,

    /// Consistent tangent modulus
    pub dd: Tensor4,

    /// Strain increment at an integration point
    pub delta_strain: Tensor2,

    /// Displacement at the current integration point
    pub us: Vec<f64>,

    /// Star variable ζs at the current integration point
    pub zeta_s: Vec<f64>,

    /// Divergence of the star variable χs at the current integration point
    pub div_chi_s: f64,
}

impl ElementU {
    /// Allocates a new instance
    pub fn new(mesh: &Mesh, cell: &Cell, config: &Config, param: &ParamStressStrain) -> Result<Self, StrError> {
        let ndim = mesh.ndim;
        let nnode = cell.points.len();
        let mut pad = Scratchpad::new(ndim, cell.kind)?;
        for m in 0..nnode {
            for j in 0..ndim {
                pad.set_xx(m, j, mesh.points[cell.points[m]].coords[j]);
            }
        }
        let gauss = Gauss::new_or_sized(cell.kind, config.n_integ_point)?;
        let model = StressStrain::new(&config.ideal, param)?;
        let mandel = config.ideal.mandel();
        let n_internal_values = model.actual.n_internal_values();
        let states = ArrLocalState::new(mandel, n_internal_values, gauss.npoint());
        Ok(ElementU {
            ndim,
            nnode,
            pad,
            gauss,
            model,
            states,
            umap: (0..ndim * nnode).collect(),
            dd: Tensor4::new(mandel),
            delta_strain: Tensor2::new(mandel),
            us: vec![0.0; ndim],
            zeta_s: vec![0.0; ndim],
            div_chi_s: 0.0,
        })
    }

    /// Returns the number of displacement equations
    pub fn n_equation(&self) -> usize {
        self.ndim * self.nnode
    }

    /// Calculates the interpolation functions and gradients at an integration point
    ///
    /// Returns the integration coefficient `det(J) · weight · thickness`
    pub fn calc_shape(&mut self, p: usize, thickness: f64) -> Result<f64, StrError> {
        let ksi = self.gauss.coords(p);
        (self.pad.fn_interp)(&mut self.pad.interp, ksi);
        let det_jac = self.pad.calc_gradient(ksi)?;
        if det_jac <= 0.0 {
            return Err("det(Jacobian) must be positive");
        }
        Ok(det_jac * self.gauss.weight(p) * thickness)
    }

    /// Interpolates us, ζs, and div(χs) at the current integration point
    ///
    /// **Note:** `calc_shape` must be called first
    pub fn interp_vars(&mut self, l2g: &[usize], uu: &Vector, uu_star: &Vector, vv_star: &Vector) {
        let (ndim, nnode) = (self.ndim, self.nnode);
        self.div_chi_s = 0.0;
        for i in 0..ndim {
            self.us[i] = 0.0;
            self.zeta_s[i] = 0.0;
            for m in 0..nnode {
                let r = l2g[self.umap[i + m * ndim]];
                self.us[i] += self.pad.interp[m] * uu[r];
                self.zeta_s[i] += self.pad.interp[m] * uu_star[r];
                self.div_chi_s += self.pad.gradient.get(m, i) * vv_star[r];
            }
        }
    }

    /// Calculates div(us) at the current integration point
    ///
    /// **Note:** `calc_shape` must be called first
    pub fn divergence(&self, l2g: &[usize], uu: &Vector) -> f64 {
        let mut div = 0.0;
        for m in 0..self.nnode {
            for i in 0..self.ndim {
                div += self.pad.gradient.get(m, i) * uu[l2g[self.umap[i + m * self.ndim]]];
            }
        }
        div
    }

    /// Adds the stiffness term `∇N · D · ∇N` to the Kuu block
    ///
    /// **Note:** `calc_shape` must be called first
    pub fn add_stiffness(&mut self, kuu: &mut Matrix, p: usize, coef: f64) -> Result<(), StrError> {
        self.model.actual.stiffness(&mut self.dd, &self.states.all[p])?;
        let (ndim, nnode) = (self.ndim, self.nnode);
        let gg = &self.pad.gradient;
        for m in 0..nnode {
            for i in 0..ndim {
                let r = i + m * ndim;
                for n in 0..nnode {
                    for j in 0..ndim {
                        let c = j + n * ndim;
                        let mut sum = 0.0;
                        for k in 0..ndim {
                            for l in 0..ndim {
                                sum += gg.get(m, k) * self.dd.get(i, k, j, l) * gg.get(n, l);
                            }
                        }
                        kuu.add(r, c, coef * sum);
                    }
                }
            }
        }
        Ok(())
    }

    /// Updates the effective stress at an integration point given the increment of primary unknowns
    ///
    /// # Input
    ///
    /// * `u_l2g` -- local-to-global map of the displacement equations only (ndim·nnode)
    pub fn update_stress(
        &mut self,
        p: usize,
        config: &Config,
        u_l2g: &[usize],
        duu: &Vector,
    ) -> Result<(), StrError> {
        let ksi = self.gauss.coords(p);
        calculate_strain(&mut self.delta_strain, duu, &config.ideal, u_l2g, ksi, &mut self.pad)?;
        self.model.actual.update_stress(&mut self.states.all[p], &self.delta_strain)
    }

    /// Initializes the internal values of the stress-strain model at all integration points
    pub fn initialize_internal_values(&mut self) -> Result<(), StrError> {
        for state in &mut self.states.all {
            self.model.actual.initialize_internal_values(state)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::ElementU;
    use crate::base::{Config, ParamStressStrain};
    use gemlab::mesh::Samples;
    use russell_lab::{approx_eq, Matrix, Vector};

    #[test]
    fn new_captures_errors() {
        let mesh = Samples::one_qua4();
        let mut config = Config::new(2);
        config.set_n_integ_point(100).unwrap();
        let param = ParamStressStrain::LinearElastic {
            young: 1000.0,
            poisson: 0.2,
        };
        assert!(ElementU::new(&mesh, &mesh.cells[0], &config, &param).is_err());
        let config = Config::new(2);
        let param = ParamStressStrain::LinearElastic {
            young: -1000.0,
            poisson: 0.2,
        };
        assert_eq!(
            ElementU::new(&mesh, &mesh.cells[0], &config, &param).err(),
            Some("Young's modulus must be positive")
        );
    }

    #[test]
    fn interpolation_works() {
        // ux = 0.1 + 0.2·x, uy = -0.3·y
        let mesh = Samples::one_qua4();
        let config = Config::new(2);
        let param = ParamStressStrain::LinearElastic {
            young: 1000.0,
            poisson: 0.2,
        };
        let mut elem = ElementU::new(&mesh, &mesh.cells[0], &config, &param).unwrap();
        assert_eq!(elem.n_equation(), 8);
        let l2g: Vec<_> = (0..8).collect();
        let mut uu = Vector::new(8);
        let mut vv_star = Vector::new(8);
        for m in 0..4 {
            let x = &mesh.points[mesh.cells[0].points[m]].coords;
            uu[0 + 2 * m] = 0.1 + 0.2 * x[0];
            uu[1 + 2 * m] = -0.3 * x[1];
            vv_star[0 + 2 * m] = 2.0 * x[0];
        }
        let uu_star = uu.clone();
        let mut area = 0.0;
        for p in 0..elem.gauss.npoint() {
            area += elem.calc_shape(p, 1.0).unwrap();
            elem.interp_vars(&l2g, &uu, &uu_star, &vv_star);
            approx_eq(elem.divergence(&l2g, &uu), 0.2 - 0.3, 1e-14);
            approx_eq(elem.div_chi_s, 2.0, 1e-14);
            approx_eq(elem.us[0], elem.zeta_s[0], 1e-15);
        }
        approx_eq(area, 1.0, 1e-14);
    }

    #[test]
    fn add_stiffness_and_update_stress_work() {
        let mesh = Samples::one_qua4();
        let config = Config::new(2);
        let param = ParamStressStrain::LinearElastic {
            young: 1000.0,
            poisson: 0.25,
        };
        let mut elem = ElementU::new(&mesh, &mesh.cells[0], &config, &param).unwrap();
        elem.initialize_internal_values().unwrap();
        let l2g: Vec<_> = (0..8).collect();

        // rigid body translation does not generate forces
        let mut kuu = Matrix::new(8, 8);
        for p in 0..elem.gauss.npoint() {
            let coef = elem.calc_shape(p, 1.0).unwrap();
            elem.add_stiffness(&mut kuu, p, coef).unwrap();
        }
        for r in 0..8 {
            let mut sum_x = 0.0;
            for n in 0..4 {
                sum_x += kuu.get(r, 0 + 2 * n);
            }
            approx_eq(sum_x, 0.0, 1e-12);
        }

        // uniform vertical strain εyy = 0.001
        let mut duu = Vector::new(8);
        for m in 0..4 {
            duu[1 + 2 * m] = 0.001 * mesh.points[mesh.cells[0].points[m]].coords[1];
        }
        for p in 0..elem.gauss.npoint() {
            elem.update_stress(p, &config, &l2g, &duu).unwrap();
            // plane-strain: σyy = (λ + 2G)·εyy and σxx = λ·εyy
            approx_eq(elem.states.all[p].stress.get(1, 1), 1200.0 * 0.001, 1e-12);
            approx_eq(elem.states.all[p].stress.get(0, 0), 400.0 * 0.001, 1e-12);
        }
    }
}
