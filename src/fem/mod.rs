//! Implements the coupled u-p finite element for porous media

mod element_p;
mod element_trait;
mod element_u;
mod element_up;
mod elements;
mod fem_state;
mod gauss;
pub use crate::fem::element_p::*;
pub use crate::fem::element_trait::*;
pub use crate::fem::element_u::*;
pub use crate::fem::element_up::*;
pub use crate::fem::elements::*;
pub use crate::fem::fem_state::*;
pub use crate::fem::gauss::*;
