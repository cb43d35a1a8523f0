//! Simulation configuration
//!
//! Everything a host needs to set up a run, loadable from TOML. Keys left out
//! of a file fall back to [`SimulationConfig::default`].

use std::{f64::consts::TAU, path::Path};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Uniform};
use serde::Deserialize;
use tracing::debug;

use crate::{
    box_::Epidemiology,
    error::{Error, Result},
    region::{Rect, Region},
    Box_, Particle,
};

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Lower-left corner of the box
    pub origin: [f64; 2],
    pub width: f64,
    pub height: f64,

    /// Number of particles, including the seed case
    pub population: usize,
    /// Initial speed of every particle; directions are uniformly random
    pub speed: f64,

    /// Distance under which an uninfected particle is exposed to a sick one
    pub infection_radius: f64,
    /// Chance per tick that an exposed particle falls sick
    pub infection_chance: f64,
    /// Chance per tick that a sick particle dies
    pub death_chance: f64,
    /// Chance per tick that a sick particle recovers
    pub recovery_chance: f64,

    pub timestep: f64,
    pub steps: usize,
    /// Record a census every this many steps
    pub output_every: usize,
    /// RNG seed; `None` seeds from system entropy
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            origin: [0.0, 0.0],
            width: 1.0,
            height: 1.0,
            population: 100,
            speed: 0.2,
            infection_radius: 0.05,
            infection_chance: 0.5,
            death_chance: 0.01,
            recovery_chance: 0.05,
            timestep: 0.1,
            steps: 600,
            output_every: 10,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading config from {}", path.display());
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn rect(&self) -> Result<Rect> {
        Rect::from_origin(self.origin, self.width, self.height)
    }

    pub fn epidemiology(&self) -> Epidemiology {
        Epidemiology {
            infection_chance: self.infection_chance,
            infection_radius: self.infection_radius,
            death_chance: self.death_chance,
            recovery_chance: self.recovery_chance,
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.rect()?;
        self.epidemiology().validate()?;
        if self.population == 0 {
            return Err(Error::ConstraintViolation(
                "population should hold at least one particle".into(),
            ));
        }
        if !(self.speed.is_finite() && self.speed >= 0.0) {
            return Err(Error::ConstraintViolation(format!(
                "speed should be non-negative, found {}",
                self.speed
            )));
        }
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(Error::ConstraintViolation(format!(
                "timestep should be positive, found {}",
                self.timestep
            )));
        }
        if self.output_every == 0 {
            return Err(Error::ConstraintViolation(
                "output interval should be at least one step".into(),
            ));
        }
        Ok(())
    }

    /// Scatter `population` particles uniformly inside the box, each moving at
    /// `speed` in a uniformly random direction.
    pub fn build_population<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<Particle>> {
        let rect = self.rect()?;
        let heading = Uniform::new(0.0, TAU);
        (0..self.population)
            .map(|_| {
                let position = rect.get_random_coord(rng);
                let theta: f64 = heading.sample(rng);
                Particle::new(
                    position,
                    [self.speed * theta.cos(), self.speed * theta.sin()],
                )
            })
            .collect()
    }

    /// Validate, then build a populated box with its own `ChaCha8Rng`.
    ///
    /// The same generator draws the initial population and then every trial,
    /// so a fixed seed reproduces the whole run.
    pub fn build_box(&self) -> Result<Box_<ChaCha8Rng>> {
        self.validate()?;
        let mut rng = match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let particles = self.build_population(&mut rng)?;
        Box_::from_rect(particles, self.rect()?, self.epidemiology(), rng)
    }
}
