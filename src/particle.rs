use rand::Rng;

use crate::{
    error::{Error, Result},
    region::Rect,
    utils::Axis,
    State,
};

/// A point particle moving freely inside a box, carrying a disease state.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    position: [f64; 2],
    velocity: [f64; 2],
    state: State,
}
impl Particle {
    /// Create a new, uninfected particle.
    ///
    /// Errors with `Error::ConstraintViolation` if any component is NaN or infinite.
    pub fn new(position: [f64; 2], velocity: [f64; 2]) -> Result<Self> {
        if !position.iter().all(|x| x.is_finite()) {
            return Err(Error::ConstraintViolation(format!(
                "position should be finite, found {:?}",
                position
            )));
        }
        if !velocity.iter().all(|v| v.is_finite()) {
            return Err(Error::ConstraintViolation(format!(
                "velocity should be finite, found {:?}",
                velocity
            )));
        }
        Ok(Self {
            position,
            velocity,
            state: State::Uninfected,
        })
    }

    // Getters
    pub fn position(&self) -> [f64; 2] {
        self.position
    }
    pub fn velocity(&self) -> [f64; 2] {
        self.velocity
    }
    pub fn state(&self) -> State {
        self.state
    }

    /// Advance by `velocity * dt`, then mirror off any wall that was crossed.
    ///
    /// Each axis reflects at most once, off the post-move position. A particle
    /// that overshoots a wall by more than the box length stays outside, and
    /// a particle sitting exactly on a wall is left alone until it crosses it.
    pub fn move_and_reflect(&mut self, dt: f64, bounds: &Rect) {
        for axis in Axis::ALL {
            let i = axis.index();
            self.position[i] += self.velocity[i] * dt;

            let [lo, hi] = bounds.get_bounds(axis);
            if self.position[i] > hi {
                self.position[i] = 2.0 * hi - self.position[i];
                self.velocity[i] = -self.velocity[i];
            } else if self.position[i] < lo {
                self.position[i] = 2.0 * lo - self.position[i];
                self.velocity[i] = -self.velocity[i];
            }
        }
    }

    /// Bernoulli trial for catching the disease from a nearby sick particle.
    ///
    /// Only an uninfected particle draws from `rng`; for any other state this
    /// is a no-op. Returns whether the particle became sick.
    pub fn attempt_infection<R: Rng + ?Sized>(&mut self, infection_chance: f64, rng: &mut R) -> bool {
        if self.state != State::Uninfected {
            return false;
        }
        if rng.gen::<f64>() < infection_chance {
            self.state = State::Sick;
            return true;
        }
        false
    }

    /// Bernoulli trial for leaving the sick state.
    ///
    /// A single draw `r` is checked against both outcomes: `r < recovery_chance`
    /// recovers, then `r > 1 - death_chance` kills. When the two ranges overlap
    /// the second check wins, so death takes precedence over recovery.
    /// Only a sick particle draws from `rng`. Returns whether the state changed.
    pub fn progress_infection<R: Rng + ?Sized>(
        &mut self,
        death_chance: f64,
        recovery_chance: f64,
        rng: &mut R,
    ) -> bool {
        if self.state != State::Sick {
            return false;
        }
        let r = rng.gen::<f64>();
        let mut next = State::Sick;
        if r < recovery_chance {
            next = State::Recovered;
        }
        if r > 1.0 - death_chance {
            next = State::Dead;
        }
        self.state = next;
        next != State::Sick
    }

    /// Seed the infection. Only the owning box does this, once.
    pub(crate) fn infect(&mut self) {
        self.state = State::Sick;
    }
}
