pub use super::box_::{Box_, Epidemiology};
pub use super::config::SimulationConfig;
pub use super::error::{Error, Result};
pub use super::particle::Particle;
pub use super::region::{Rect, Region};
pub use super::simulation::Simulation;
pub use super::state::{Census, State};
