//! Particles bouncing around a box while a disease spreads between them.
//!
//! A [`Box_`] owns the population and advances it one tick at a time:
//! particles move and bounce off the walls, uninfected particles close to a
//! sick one may catch the disease, and sick particles may recover or die.

pub mod box_;
pub mod config;
pub mod error;
pub mod output;
pub mod particle;
pub mod partition;
pub mod prelude;
pub mod region;
pub mod simulation;
pub mod state;
pub mod utils;

pub use box_::{Box_, Epidemiology};
pub use config::SimulationConfig;
pub use error::{Error, Result};
pub use output::{Output, OutputSpec, Record};
pub use particle::Particle;
pub use region::{Rect, Region};
pub use simulation::Simulation;
pub use state::{Census, State};
