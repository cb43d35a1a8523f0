use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::{
    error::{Error, Result},
    output::{Output, Record},
    Box_, Census, SimulationConfig,
};

/// Drives a box forward at a fixed timestep, keeping a census history.
pub struct Simulation<R: Rng = ChaCha8Rng> {
    pub box_: Box_<R>,
    output: Output,
    timestep: f64,
    step: usize,
    history: Vec<Record>,
}
impl<R: Rng> Simulation<R> {
    /// Create a new simulation
    pub fn new(box_: Box_<R>, timestep: f64) -> Result<Self> {
        if !(timestep.is_finite() && timestep > 0.0) {
            return Err(Error::ConstraintViolation(format!(
                "timestep should be positive, found {}",
                timestep
            )));
        }
        Ok(Self {
            box_,
            output: Output::new(),
            timestep,
            step: 0,
            history: Vec::new(),
        })
    }

    // Getters
    pub fn timestep(&self) -> f64 {
        self.timestep
    }
    /// Steps taken so far
    pub fn current_step(&self) -> usize {
        self.step
    }
    pub fn time(&self) -> f64 {
        self.step as f64 * self.timestep
    }
    pub fn census(&self) -> Census {
        self.box_.census()
    }
    pub fn output(&self) -> &Output {
        &self.output
    }
    pub fn history(&self) -> &[Record] {
        &self.history
    }

    // Setters
    pub fn set_output(&mut self, every: usize) {
        self.output.set_every(every);
    }

    pub fn run(&mut self, num_steps: usize) {
        self.run_until(num_steps, |_| false);
    }

    /// Step until `done` holds for the census or `max_steps` have been taken.
    /// Returns the number of steps taken by this call.
    pub fn run_until<F>(&mut self, max_steps: usize, mut done: F) -> usize
    where
        F: FnMut(&Census) -> bool,
    {
        if self.history.is_empty() {
            self.record();
        }
        let start = self.step;
        while self.step - start < max_steps {
            self.box_.step(self.timestep);
            self.step += 1;

            let census = self.box_.census();
            if self.output.is_due(self.step) {
                self.record();
            }
            if done(&census) {
                info!("stopping after step {}: {}", self.step, census);
                if !self.output.is_due(self.step) {
                    self.record();
                }
                break;
            }
        }
        self.step - start
    }

    fn record(&mut self) {
        let record = Record {
            step: self.step,
            time: self.time(),
            census: self.box_.census(),
        };
        debug!("step {} t={:.3} {}", record.step, record.time, record.census);
        self.history.push(record);
    }
}

impl Simulation<ChaCha8Rng> {
    /// Build the box and driver described by `config`
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let mut simulation = Self::new(config.build_box()?, config.timestep)?;
        simulation.set_output(config.output_every);
        Ok(simulation)
    }
}
