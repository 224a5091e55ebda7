use super::FemState;
use crate::StrError;
use russell_lab::{Matrix, Vector};

/// Defines the trait for local (element) equations
pub trait ElementTrait: Send {
    /// Returns whether the local Jacobian matrix is symmetric or not
    fn symmetric_jacobian(&self) -> bool;

    /// Returns the local-to-global mapping
    fn local_to_global(&self) -> &Vec<usize>;

    /// Initializes the internal values given the initial primary unknowns
    fn initialize_internal_values(&mut self, state: &FemState) -> Result<(), StrError>;

    /// Calculates the residual vector
    fn calc_residual(&mut self, residual: &mut Vector, state: &FemState) -> Result<(), StrError>;

    /// Calculates the Jacobian matrix
    fn calc_jacobian(&mut self, jacobian: &mut Matrix, state: &FemState) -> Result<(), StrError>;

    /// Resets algorithmic variables such as Λ at the beginning of implicit iterations
    fn reset_algorithmic_variables(&mut self);

    /// Creates a copy of the secondary values (e.g., stresses and internal values)
    fn backup_secondary_values(&mut self);

    /// Restores the secondary values from the backup (e.g., stresses and internal values)
    fn restore_secondary_values(&mut self);

    /// Updates secondary values such as stresses and internal values
    ///
    /// Note that state.uu and state.duu have been updated already
    fn update_secondary_values(&mut self, state: &FemState) -> Result<(), StrError>;
}
