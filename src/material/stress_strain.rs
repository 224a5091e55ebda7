use super::{LinearElastic, LocalState, VonMises};
use crate::base::{Idealization, ParamStressStrain};
use crate::StrError;
use russell_tensor::{Tensor2, Tensor4};

/// Specifies the essential functions for effective stress-strain models
pub trait StressStrainTrait: Send {
    /// Indicates that the stiffness matrix is symmetric
    fn symmetric_stiffness(&self) -> bool;

    /// Returns the number of internal values
    fn n_internal_values(&self) -> usize;

    /// Initializes the internal values for the initial stress state
    fn initialize_internal_values(&self, state: &mut LocalState) -> Result<(), StrError>;

    /// Computes the consistent tangent stiffness
    fn stiffness(&mut self, dd: &mut Tensor4, state: &LocalState) -> Result<(), StrError>;

    /// Updates the stress tensor given the strain increment tensor
    fn update_stress(&mut self, state: &mut LocalState, delta_strain: &Tensor2) -> Result<(), StrError>;
}

/// Holds the actual stress-strain model implementation
pub struct StressStrain {
    /// Holds the actual model implementation
    pub actual: Box<dyn StressStrainTrait>,
}

impl StressStrain {
    /// Allocates a new instance
    pub fn new(ideal: &Idealization, param: &ParamStressStrain) -> Result<Self, StrError> {
        let actual: Box<dyn StressStrainTrait> = match *param {
            ParamStressStrain::LinearElastic { young, poisson } => Box::new(LinearElastic::new(ideal, young, poisson)?),
            ParamStressStrain::VonMises { young, poisson, hh, z0 } => {
                Box::new(VonMises::new(ideal, young, poisson, z0, hh)?)
            }
        };
        Ok(StressStrain { actual })
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
