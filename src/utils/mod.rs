/// Group of useful computations
pub mod computations;
mod direction;

pub use computations::*;
pub use direction::{Axis, Direction};
