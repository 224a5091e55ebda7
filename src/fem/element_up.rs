use super::{ElementP, ElementTrait, ElementU, FemState};
use crate::base::{Config, ParamFluids, ParamPorousSldLiq};
use crate::material::LiquidRetention;
use crate::StrError;
use gemlab::mesh::{Cell, Mesh};
use russell_lab::{Matrix, Vector};
use std::sync::Arc;

/// Implements the u-pl (solid displacement and liquid pressure) element for porous media mechanics
///
/// The local equations are ordered node-by-node: each node carries its displacement components
/// followed by the liquid pressure if the node belongs to the pressure interpolation.
///
/// # References
///
/// 1. Pedroso DM (2015) A consistent u-p formulation for porous media with hysteresis,
///    Int. J. for Numerical Methods in Engineering, 101:606-634, DOI: 10.1002/nme.4808
/// 2. Pedroso DM (2015) A solution to transient seepage in unsaturated porous media,
///    Computer Methods in Applied Mechanics and Engineering, 285:791-816
pub struct ElementUp {
    /// Configuration data
    pub config: Config,

    /// Identifier of the cell
    pub cell_id: usize,

    /// Space dimension
    pub ndim: usize,

    /// Displacement part
    pub u: ElementU,

    /// Liquid pressure part
    pub p: ElementP,

    /// Local-to-global mapping
    pub local_to_global: Vec<usize>,

    /// Local-to-global mapping of the displacement equations only (ndim·nnode)
    pub u_local_to_global: Vec<usize>,

    /// Body-force-like vector bs = α1·us - ζs - g
    pub bs: Vec<f64>,

    /// Driving vector of the liquid flux hl = -ρL·bs - ∇pl
    pub hl: Vec<f64>,

    /// Kuu block (nu, nu)
    pub kuu: Matrix,

    /// Kup block (nu, np)
    pub kup: Matrix,

    /// Kpu block (np, nu)
    pub kpu: Matrix,

    /// Kpp block (np, np)
    pub kpp: Matrix,
}

impl ElementUp {
    /// Allocates a new instance
    ///
    /// The local-to-global mapping is initialized with the sequence of local equations
    /// and may be replaced later with [ElementUp::set_eqs].
    pub fn new(
        mesh: &Mesh,
        cell: &Cell,
        config: &Config,
        param: &ParamPorousSldLiq,
        fluids: &ParamFluids,
        retention: Arc<dyn LiquidRetention>,
    ) -> Result<Self, StrError> {
        let ndim = mesh.ndim;
        if ndim != config.ideal.ndim() {
            return Err("space dimension of the mesh does not match the configuration");
        }
        let u = ElementU::new(mesh, cell, config, &param.stress_strain)?;
        let p = ElementP::new(mesh, cell, config, &u.gauss, param, fluids, retention)?;
        let (nu, np) = (u.n_equation(), p.nnode);
        let mut element = ElementUp {
            config: *config,
            cell_id: cell.id,
            ndim,
            u,
            p,
            local_to_global: Vec::new(),
            u_local_to_global: Vec::new(),
            bs: vec![0.0; ndim],
            hl: vec![0.0; ndim],
            kuu: Matrix::new(nu, nu),
            kup: Matrix::new(nu, np),
            kpu: Matrix::new(np, nu),
            kpp: Matrix::new(np, np),
        };
        element.set_local_maps();
        let eqs = element.local_eqs();
        element.set_eqs(&eqs)?;
        Ok(element)
    }

    /// Returns the number of local equations
    pub fn n_equation(&self) -> usize {
        self.u.n_equation() + self.p.nnode
    }

    /// Returns the local equations of each node (node-by-node numbering starting at zero)
    pub fn local_eqs(&self) -> Vec<Vec<usize>> {
        let mut eqs = Vec::with_capacity(self.u.nnode);
        let mut next = 0;
        for m in 0..self.u.nnode {
            let ndof = if m < self.p.nnode { self.ndim + 1 } else { self.ndim };
            eqs.push((next..next + ndof).collect());
            next += ndof;
        }
        eqs
    }

    /// Sets the global equation numbers of each node
    ///
    /// The nodes of the pressure interpolation (the first ones) must have `ndim + 1` equations
    /// (displacements and liquid pressure, in this order); the other nodes must have `ndim` equations.
    pub fn set_eqs(&mut self, eqs: &[Vec<usize>]) -> Result<(), StrError> {
        if eqs.len() != self.u.nnode {
            return Err("the number of nodes in eqs must equal the number of nodes of the cell");
        }
        for (m, node_eqs) in eqs.iter().enumerate() {
            let ndof = if m < self.p.nnode { self.ndim + 1 } else { self.ndim };
            if node_eqs.len() != ndof {
                return Err("the number of equations of a node is incorrect");
            }
        }
        self.local_to_global = eqs.iter().flatten().copied().collect();
        self.u_local_to_global = self.u.umap.iter().map(|l| self.local_to_global[*l]).collect();
        Ok(())
    }

    /// Computes the maps from the u-dofs and p-nodes to the local equations
    fn set_local_maps(&mut self) {
        let ndim = self.ndim;
        let mut next = 0;
        for m in 0..self.u.nnode {
            for i in 0..ndim {
                self.u.umap[i + m * ndim] = next + i;
            }
            next += ndim;
            if m < self.p.nnode {
                self.p.pmap[m] = next;
                next += 1;
            }
        }
    }

    /// Calculates the interpolation data and the primary variables at an integration point
    ///
    /// Returns the integration coefficient `det(J) · weight · thickness`
    pub fn calc_ip_vars(&mut self, p: usize, state: &FemState) -> Result<f64, StrError> {
        let coef = self.u.calc_shape(p, self.config.ideal.thickness)?;
        self.p.calc_shape(self.u.gauss.coords(p))?;
        let l2g = &self.local_to_global;
        self.u.interp_vars(l2g, &state.uu, &state.uu_star, &state.vv_star);
        self.p.interp_vars(l2g, &state.uu, &state.uu_star);
        Ok(coef)
    }

    /// Prints the porous state at an integration point after an update
    fn print_update(&self, p: usize, delta_pl: f64) {
        if !self.config.verbose {
            return;
        }
        let st = &self.p.states.all[p];
        println!(
            "{:>5} {:>3} : Δpl = {:>13.10} pc = {:>13.10} sl = {:>13.10} ρL = {:>13.10} wetting = {}",
            self.cell_id,
            p,
            delta_pl,
            st.capillary_pressure(),
            st.liquid_saturation,
            st.liquid_density,
            st.wetting
        );
    }

    /// Computes bs, hl, and ρl·wl at the current integration point
    fn calc_fluxes(&mut self, state: &FemState, rho_ll: f64, klr: f64) {
        let ndim = self.ndim;
        let alpha1 = state.coefs.alpha1;
        for i in 0..ndim {
            self.bs[i] = alpha1 * self.u.us[i] - self.u.zeta_s[i] - self.p.g[i];
            self.hl[i] = -rho_ll * self.bs[i] - self.p.gpl[i];
        }
        for i in 0..ndim {
            self.p.rho_wl[i] = 0.0;
            for j in 0..ndim {
                self.p.rho_wl[i] += klr * self.p.kl_sat.get(i, j) * self.hl[j];
            }
        }
    }
}

impl ElementTrait for ElementUp {
    /// Returns whether the local Jacobian matrix is symmetric or not
    fn symmetric_jacobian(&self) -> bool {
        false
    }

    /// Returns the local-to-global mapping
    fn local_to_global(&self) -> &Vec<usize> {
        &self.local_to_global
    }

    /// Initializes the porous states from the liquid pressure and the displacement fields
    fn initialize_internal_values(&mut self, state: &FemState) -> Result<(), StrError> {
        for p in 0..self.u.gauss.npoint() {
            self.calc_ip_vars(p, state)?;
            let divus = self.u.divergence(&self.local_to_global, &state.uu);
            self.p.states.all[p] = self.p.model.init_state(self.p.pl, 0.0, divus)?;
        }
        self.u.initialize_internal_values()
    }

    /// Calculates the residual vector
    fn calc_residual(&mut self, residual: &mut Vector, state: &FemState) -> Result<(), StrError> {
        let ndim = self.ndim;
        let (nnode_u, nnode_p) = (self.u.nnode, self.p.nnode);
        let coefs = state.coefs;
        residual.fill(0.0);
        self.p.clear_extrapolation();
        for p in 0..self.u.gauss.npoint() {
            let coef = self.calc_ip_vars(p, state)?;
            let st = self.p.states.all[p];
            let divvs = coefs.alpha4 * st.divus - self.u.div_chi_s;
            let plt = coefs.beta1 * self.p.pl - self.p.psi_l;
            let v = self.p.model.ls_vars(&st)?;
            self.calc_fluxes(state, st.liquid_density, v.klr);

            // liquid mass balance
            let nb = &self.p.pad.interp;
            let gb = &self.p.pad.gradient;
            for m in 0..nnode_p {
                let r = self.p.pmap[m];
                residual[r] += coef * nb[m] * (v.cpl * plt + v.cvs * divvs);
                for i in 0..ndim {
                    residual[r] -= coef * gb.get(m, i) * self.p.rho_wl[i];
                }
                if let Some(emat) = &self.p.extrap {
                    self.p.rho_l_ex[m] += emat.get(m, p) * v.rho_l;
                }
            }

            // balance of linear momentum
            let nn = &self.u.pad.interp;
            let gg = &self.u.pad.gradient;
            let sigma = &self.u.states.all[p].stress;
            for m in 0..nnode_u {
                for i in 0..ndim {
                    let r = self.u.umap[i + m * ndim];
                    residual[r] += coef * nn[m] * v.rho * self.bs[i];
                    for j in 0..ndim {
                        residual[r] += coef * sigma.get(i, j) * gg.get(m, j);
                    }
                    residual[r] -= coef * v.p * gg.get(m, i);
                }
            }
        }
        Ok(())
    }

    /// Calculates the Jacobian matrix
    fn calc_jacobian(&mut self, jacobian: &mut Matrix, state: &FemState) -> Result<(), StrError> {
        let ndim = self.ndim;
        let (nnode_u, nnode_p) = (self.u.nnode, self.p.nnode);
        let coefs = state.coefs;
        let cl = self.p.model.cl();
        self.kuu.fill(0.0);
        self.kup.fill(0.0);
        self.kpu.fill(0.0);
        self.kpp.fill(0.0);
        self.p.clear_extrapolation();
        for p in 0..self.u.gauss.npoint() {
            let coef = self.calc_ip_vars(p, state)?;
            let st = self.p.states.all[p];
            let divvs = coefs.alpha4 * st.divus - self.u.div_chi_s;
            let plt = coefs.beta1 * self.p.pl - self.p.psi_l;
            let rho_ll = st.liquid_density;
            let v = self.p.model.ls_vars(&st)?;
            let d = self.p.model.ls_derivs(&st)?;
            let klr = v.klr;
            self.calc_fluxes(state, rho_ll, klr);

            let nn = &self.u.pad.interp;
            let gg = &self.u.pad.gradient;
            let nb = &self.p.pad.interp;
            let gb = &self.p.pad.gradient;
            let kk = &self.p.kl_sat;

            // Kpu, Kup, and Kpp
            for n in 0..nnode_p {
                for j in 0..ndim {
                    for m in 0..nnode_u {
                        let c = j + m * ndim;
                        // storage and volumetric coupling terms
                        let mut val = nb[n] * (d.dcpl_dus * plt + coefs.alpha4 * v.cvs) * gg.get(m, j);
                        // inertia term of the liquid flux
                        for i in 0..ndim {
                            val += gb.get(n, i) * nn[m] * coefs.alpha1 * rho_ll * klr * kk.get(i, j);
                        }
                        self.kpu.add(n, c, coef * val);
                        // mixture density and averaged pore pressure
                        self.kup.add(c, n, coef * (nn[m] * nb[n] * d.drho_dpl * self.bs[j] - gg.get(m, j) * nb[n] * d.dp_dpl));
                    }
                    self.p.tmp[j] = nb[n] * d.dklr_dpl * self.hl[j] - klr * (nb[n] * cl * self.bs[j] + gb.get(n, j));
                }
                for m in 0..nnode_p {
                    let mut val = nb[m] * nb[n] * (d.dcpl_dpl * plt + d.dcvs_dpl * divvs + coefs.beta1 * v.cpl);
                    for i in 0..ndim {
                        for j in 0..ndim {
                            val -= gb.get(m, i) * kk.get(i, j) * self.p.tmp[j];
                        }
                    }
                    self.kpp.add(m, n, coef * val);
                    if let Some(emat) = &self.p.extrap {
                        self.p.drho_l_dpl_ex.add(m, n, emat.get(m, p) * v.cpl * nb[n]);
                    }
                }
                if let Some(emat) = &self.p.extrap {
                    self.p.rho_l_ex[n] += emat.get(n, p) * v.rho_l;
                }
            }

            // Kuu: inertia and density terms
            for m in 0..nnode_u {
                for i in 0..ndim {
                    let r = i + m * ndim;
                    for n in 0..nnode_u {
                        for j in 0..ndim {
                            let c = j + n * ndim;
                            let delta = if i == j { 1.0 } else { 0.0 };
                            let val = nn[m] * (nn[n] * coefs.alpha1 * v.rho * delta + d.drho_dus * self.bs[i] * gg.get(n, j));
                            self.kuu.add(r, c, coef * val);
                        }
                    }
                }
            }

            // Kuu: stiffness term
            self.u.add_stiffness(&mut self.kuu, p, coef)?;
        }

        // scatter the blocks into the local Jacobian matrix
        let nu = self.u.n_equation();
        for r in 0..nu {
            let ir = self.u.umap[r];
            for c in 0..nu {
                jacobian.set(ir, self.u.umap[c], self.kuu.get(r, c));
            }
            for n in 0..nnode_p {
                jacobian.set(ir, self.p.pmap[n], self.kup.get(r, n));
            }
        }
        for m in 0..nnode_p {
            let im = self.p.pmap[m];
            for c in 0..nu {
                jacobian.set(im, self.u.umap[c], self.kpu.get(m, c));
            }
            for n in 0..nnode_p {
                jacobian.set(im, self.p.pmap[n], self.kpp.get(m, n));
            }
        }
        Ok(())
    }

    /// Resets algorithmic variables such as Λ at the beginning of implicit iterations
    fn reset_algorithmic_variables(&mut self) {
        self.u.states.reset_algorithmic_variables();
    }

    /// Creates a copy of the secondary values
    fn backup_secondary_values(&mut self) {
        self.u.states.backup();
        self.p.states.backup();
    }

    /// Restores the secondary values from the backup
    fn restore_secondary_values(&mut self) {
        self.u.states.restore();
        self.p.states.restore();
    }

    /// Updates the porous states and the effective stresses
    ///
    /// The liquid pressure increment comes from ΔY and the volumetric strain from Y.
    fn update_secondary_values(&mut self, state: &FemState) -> Result<(), StrError> {
        let thickness = self.config.ideal.thickness;
        for p in 0..self.u.gauss.npoint() {
            self.u.calc_shape(p, thickness)?;
            self.p.calc_shape(self.u.gauss.coords(p))?;
            let delta_pl = self.p.interp_increment(&self.local_to_global, &state.duu);
            let divus = self.u.divergence(&self.local_to_global, &state.uu);
            self.p.model.update(&mut self.p.states.all[p], delta_pl, 0.0, divus)?;
            self.print_update(p, delta_pl);
            self.u.update_stress(p, &self.config, &self.u_local_to_global, &state.duu)?;
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
