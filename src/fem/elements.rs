use super::{ElementTrait, FemState};
use crate::StrError;
use russell_lab::{deriv1_central5, Matrix, Vector};
use russell_sparse::CooMatrix;

/// Defines a generic finite element, wrapping an "actual" implementation
pub struct GenericElement {
    /// Connects to the "actual" implementation of local equations
    pub actual: Box<dyn ElementTrait>,

    /// Implements the residual vector
    pub residual: Vector,

    /// Implements the Jacobian matrix
    pub jacobian: Matrix,
}

/// Holds auxiliary arguments for the computation of numerical Jacobian matrices
struct ArgsForNumericalJacobian<'a> {
    /// Holds the residual vector
    pub residual: &'a mut Vector,

    /// Holds the current state
    pub state: &'a mut FemState,
}

impl GenericElement {
    /// Allocates a new instance
    pub fn new(actual: Box<dyn ElementTrait>) -> Self {
        let neq = actual.local_to_global().len();
        GenericElement {
            actual,
            residual: Vector::new(neq),
            jacobian: Matrix::new(neq, neq),
        }
    }

    /// Calculates the residual vector
    pub fn calc_residual(&mut self, state: &FemState) -> Result<(), StrError> {
        self.actual.calc_residual(&mut self.residual, state)
    }

    /// Calculates the Jacobian matrix
    pub fn calc_jacobian(&mut self, state: &FemState) -> Result<(), StrError> {
        self.actual.calc_jacobian(&mut self.jacobian, state)
    }

    /// Adds the negative of the local residual vector to the global vector fb
    ///
    /// **Note:** You must call calc_residual first
    pub fn add_to_rhs(&self, fb: &mut Vector) -> Result<(), StrError> {
        let l2g = self.actual.local_to_global();
        for (l, g) in l2g.iter().enumerate() {
            if *g >= fb.dim() {
                return Err("global vector is too small for the local-to-global mapping");
            }
            fb[*g] -= self.residual[l];
        }
        Ok(())
    }

    /// Adds the local Jacobian matrix to the global matrix Kb
    ///
    /// **Note:** You must call calc_jacobian first
    pub fn add_to_kb(&self, kb: &mut CooMatrix) -> Result<(), StrError> {
        let l2g = self.actual.local_to_global();
        for (l, g) in l2g.iter().enumerate() {
            for (ll, gg) in l2g.iter().enumerate() {
                kb.put(*g, *gg, self.jacobian.get(l, ll))?;
            }
        }
        Ok(())
    }

    /// Calculates the Jacobian matrix using finite differences
    ///
    /// **Note:** The state may be changed temporarily, but it is restored at the end of the function
    pub fn numerical_jacobian(&mut self, state: &mut FemState) -> Result<(), StrError> {
        let neq = self.residual.dim();
        let mut args = ArgsForNumericalJacobian {
            residual: &mut self.residual,
            state,
        };
        for i in 0..neq {
            for j in 0..neq {
                let jj = self.actual.local_to_global()[j];
                let ii = i;
                let at_u = args.state.uu[jj];
                let res = deriv1_central5(at_u, &mut args, |u, a| {
                    let original_uu = a.state.uu[jj];
                    let original_duu = a.state.duu[jj];
                    a.state.uu[jj] = u;
                    a.state.duu[jj] = u - original_uu;
                    self.actual.backup_secondary_values();
                    let res = match self.actual.update_secondary_values(a.state) {
                        Ok(()) => self.actual.calc_residual(a.residual, a.state),
                        Err(e) => Err(e),
                    };
                    self.actual.restore_secondary_values();
                    a.state.uu[jj] = original_uu;
                    a.state.duu[jj] = original_duu;
                    res?;
                    Ok(a.residual[ii])
                })?;
                self.jacobian.set(i, j, res);
            }
        }
        Ok(())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
