use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use crate::{
    error::{Error, Result},
    partition::{Members, Partitions},
    region::{Rect, Region},
    utils::{distance_squared, is_probability},
    Census, Particle, State,
};

/// Per-tick transition probabilities and the infection range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Epidemiology {
    pub infection_chance: f64,
    pub infection_radius: f64,
    pub death_chance: f64,
    pub recovery_chance: f64,
}
impl Epidemiology {
    /// The radius must be positive. Each chance must lie in the closed interval
    /// `[0, 1]`, so certain and impossible outcomes are allowed.
    pub fn validate(&self) -> Result<()> {
        if !(self.infection_radius.is_finite() && self.infection_radius > 0.0) {
            return Err(Error::ConstraintViolation(format!(
                "infection radius should be positive, found {}",
                self.infection_radius
            )));
        }
        for (name, p) in [
            ("infection chance", self.infection_chance),
            ("death chance", self.death_chance),
            ("recovery chance", self.recovery_chance),
        ] {
            if !is_probability(p) {
                return Err(Error::ConstraintViolation(format!(
                    "{} should be a probability in [0, 1], found {}",
                    name, p
                )));
            }
        }
        Ok(())
    }
}

/// Simulation box: a rectangular domain owning a population of particles
/// partitioned by disease state, and the random stream driving every trial.
#[derive(Debug)]
pub struct Box_<R: Rng = ChaCha8Rng> {
    rect: Rect,
    epidemiology: Epidemiology,
    particles: Vec<Particle>,
    partitions: Partitions,
    rng: R,
}

impl Box_<ChaCha8Rng> {
    /// Like [`Box_::new`], drawing from a `ChaCha8Rng` seeded with `seed`.
    #[allow(clippy::too_many_arguments)]
    pub fn seeded(
        particles: Vec<Particle>,
        position: [f64; 2],
        width: f64,
        height: f64,
        infection_chance: f64,
        infection_radius: f64,
        death_chance: f64,
        recovery_chance: f64,
        seed: u64,
    ) -> Result<Self> {
        Self::new(
            particles,
            position,
            width,
            height,
            infection_chance,
            infection_radius,
            death_chance,
            recovery_chance,
            ChaCha8Rng::seed_from_u64(seed),
        )
    }
}

impl<R: Rng> Box_<R> {
    // Creation

    /// Create a box spanning `[x0, x0 + width] x [y0, y0 + height]`.
    ///
    /// Every particle must start strictly inside the box. The first particle is
    /// the seed case and starts sick; all others start uninfected.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        particles: Vec<Particle>,
        position: [f64; 2],
        width: f64,
        height: f64,
        infection_chance: f64,
        infection_radius: f64,
        death_chance: f64,
        recovery_chance: f64,
        rng: R,
    ) -> Result<Self> {
        let rect = Rect::from_origin(position, width, height)?;
        let epidemiology = Epidemiology {
            infection_chance,
            infection_radius,
            death_chance,
            recovery_chance,
        };
        Self::from_rect(particles, rect, epidemiology, rng)
    }

    pub fn from_rect(
        mut particles: Vec<Particle>,
        rect: Rect,
        epidemiology: Epidemiology,
        rng: R,
    ) -> Result<Self> {
        epidemiology.validate()?;
        if let Some((idx, p)) = particles
            .iter()
            .enumerate()
            .find(|(_, p)| !rect.contains_strictly(&p.position()))
        {
            return Err(Error::ConstraintViolation(format!(
                "particle {} starts at {:?}, outside of {:?}",
                idx,
                p.position(),
                rect
            )));
        }
        if let Some((idx, p)) = particles
            .iter()
            .enumerate()
            .find(|(_, p)| p.state() != State::Uninfected)
        {
            return Err(Error::ConstraintViolation(format!(
                "particle {} starts {}, all particles should start uninfected",
                idx,
                p.state()
            )));
        }
        match particles.first_mut() {
            Some(seed) => seed.infect(),
            None => {
                return Err(Error::ConstraintViolation(
                    "population should hold at least one particle to seed the infection".into(),
                ))
            }
        }

        let partitions = Partitions::new(particles.iter().map(Particle::state));
        debug!(
            "box {:?} holds {} particles, {:?}",
            rect,
            particles.len(),
            epidemiology
        );
        Ok(Self {
            rect,
            epidemiology,
            particles,
            partitions,
            rng,
        })
    }

    // Getters
    pub fn rect(&self) -> &Rect {
        &self.rect
    }
    pub fn epidemiology(&self) -> &Epidemiology {
        &self.epidemiology
    }
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }
    /// Particle by its index in the population given at construction
    pub fn particle(&self, idx: usize) -> Option<&Particle> {
        self.particles.get(idx)
    }
    /// All particles in population order, whatever their state
    pub fn all_particles(&self) -> &[Particle] {
        &self.particles
    }
    /// Indices of the particles currently in `state`, in partition order
    pub fn members(&self, state: State) -> Members<'_> {
        self.partitions.members(state)
    }
    pub fn particles(&self, state: State) -> impl Iterator<Item = &Particle> + '_ {
        self.partitions
            .members(state)
            .map(move |idx| &self.particles[idx])
    }
    pub fn positions(&self, state: State) -> impl Iterator<Item = [f64; 2]> + '_ {
        self.particles(state).map(Particle::position)
    }
    pub fn count(&self, state: State) -> usize {
        self.partitions.count(state)
    }
    pub fn census(&self) -> Census {
        self.partitions.census()
    }

    /// Advance every particle by one tick of length `dt`.
    ///
    /// Partitions are walked in `State::ALL` order. Each particle moves and
    /// reflects, then an uninfected one within the infection radius of any
    /// member of the sick partition takes one infection trial, while a sick one
    /// takes one progression trial. Membership is only reconciled once every
    /// particle has been visited, so a particle infected this tick neither
    /// spreads nor progresses until the next one.
    pub fn step(&mut self, dt: f64) {
        assert!(
            dt > 0.0 && dt.is_finite(),
            "Timestep should be positive, found {}",
            dt
        );
        let radius_sq = self.epidemiology.infection_radius * self.epidemiology.infection_radius;
        let mut changed: Vec<usize> = Vec::new();

        for partition in State::ALL {
            for idx in self.partitions.members(partition) {
                debug_assert_eq!(self.particles[idx].state(), partition);

                self.particles[idx].move_and_reflect(dt, &self.rect);
                let transitioned = match partition {
                    State::Uninfected if self.near_sick(idx, radius_sq) => self.particles[idx]
                        .attempt_infection(self.epidemiology.infection_chance, &mut self.rng),
                    State::Sick => self.particles[idx].progress_infection(
                        self.epidemiology.death_chance,
                        self.epidemiology.recovery_chance,
                        &mut self.rng,
                    ),
                    _ => false,
                };
                if transitioned {
                    trace!(
                        "particle {} {} -> {} at {:?}",
                        idx,
                        partition,
                        self.particles[idx].state(),
                        self.particles[idx].position()
                    );
                    changed.push(idx);
                }
            }
        }

        for idx in changed {
            self.partitions.relocate(idx, self.particles[idx].state());
        }
        debug_assert!(
            self.check_invariants().is_ok(),
            "{:?}",
            self.check_invariants()
        );
    }

    /// Verify that the four partitions cover the population exactly once and
    /// agree with every particle's state.
    pub fn check_invariants(&self) -> Result<()> {
        self.partitions
            .check(self.particles.iter().map(Particle::state))
    }

    // Brute-force scan of the sick partition.
    fn near_sick(&self, idx: usize, radius_sq: f64) -> bool {
        let position = self.particles[idx].position();
        self.partitions
            .members(State::Sick)
            .any(|j| distance_squared(&self.particles[j].position(), &position) < radius_sq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids<R: Rng>(b: &Box_<R>, state: State) -> Vec<usize> {
        b.members(state).collect()
    }

    fn at_rest(coords: &[[f64; 2]]) -> Vec<Particle> {
        coords
            .iter()
            .map(|&c| Particle::new(c, [0.0, 0.0]).unwrap())
            .collect()
    }

    #[test]
    fn first_particle_seeds_the_infection() -> Result<()> {
        let b = Box_::seeded(
            at_rest(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]),
            [0.0, 0.0],
            4.0,
            4.0,
            0.5,
            0.1,
            0.1,
            0.1,
            1,
        )?;
        assert_eq!(ids(&b, State::Sick), vec![0]);
        assert_eq!(ids(&b, State::Uninfected), vec![1, 2]);
        assert_eq!(b.census(), Census::new(2, 1, 0, 0));
        assert_eq!(b.particle(0).map(Particle::state), Some(State::Sick));
        b.check_invariants()
    }

    #[test]
    fn particle_outside_rejected() {
        let err = Box_::seeded(
            at_rest(&[[1.0, 1.0], [5.0, 1.0]]),
            [0.0, 0.0],
            4.0,
            4.0,
            0.5,
            0.1,
            0.1,
            0.1,
            1,
        )
        .unwrap_err();
        assert!(matches!(err, Error::ConstraintViolation(_)));
        assert!(err.to_string().contains("particle 1"));
    }

    #[test]
    fn particle_on_wall_rejected() {
        let result = Box_::seeded(
            at_rest(&[[0.0, 1.0]]),
            [0.0, 0.0],
            4.0,
            4.0,
            0.5,
            0.1,
            0.1,
            0.1,
            1,
        );
        assert!(result.is_err());
    }

    #[test]
    fn bad_parameters_rejected() {
        let build = |infection: f64, radius: f64, death: f64, recovery: f64| {
            Box_::seeded(
                at_rest(&[[1.0, 1.0]]),
                [0.0, 0.0],
                4.0,
                4.0,
                infection,
                radius,
                death,
                recovery,
                1,
            )
        };
        assert!(build(0.5, 0.1, 0.1, 0.1).is_ok());
        assert!(build(1.0, 0.1, 0.0, 1.0).is_ok());
        assert!(build(1.5, 0.1, 0.1, 0.1).is_err());
        assert!(build(0.5, 0.0, 0.1, 0.1).is_err());
        assert!(build(0.5, f64::INFINITY, 0.1, 0.1).is_err());
        assert!(build(0.5, 0.1, -0.1, 0.1).is_err());
        assert!(build(0.5, 0.1, 0.1, f64::NAN).is_err());
    }

    #[test]
    fn empty_population_rejected() {
        let result = Box_::seeded(vec![], [0.0, 0.0], 4.0, 4.0, 0.5, 0.1, 0.1, 0.1, 1);
        assert!(matches!(result, Err(Error::ConstraintViolation(_))));
    }

    #[test]
    fn nearby_particle_catches_it() -> Result<()> {
        let mut b = Box_::seeded(
            at_rest(&[[2.0, 2.0], [2.5, 2.0]]),
            [0.0, 0.0],
            4.0,
            4.0,
            1.0,
            1.0,
            0.0,
            0.0,
            3,
        )?;
        b.step(1.0);
        assert_eq!(b.particle(1).map(Particle::state), Some(State::Sick));
        assert_eq!(b.particle(0).map(Particle::state), Some(State::Sick));
        assert_eq!(ids(&b, State::Sick), vec![0, 1]);
        assert_eq!(b.count(State::Uninfected), 0);
        b.check_invariants()
    }

    #[test]
    fn infected_particle_leaves_the_others_in_order() -> Result<()> {
        let mut b = Box_::seeded(
            at_rest(&[[1.0, 1.0], [1.2, 1.0], [3.0, 3.0], [3.5, 3.5]]),
            [0.0, 0.0],
            4.0,
            4.0,
            1.0,
            0.5,
            0.0,
            0.0,
            4,
        )?;
        assert_eq!(ids(&b, State::Uninfected), vec![1, 2, 3]);
        b.step(1.0);
        assert_eq!(ids(&b, State::Uninfected), vec![2, 3]);
        assert_eq!(ids(&b, State::Sick), vec![0, 1]);
        b.check_invariants()
    }

    #[test]
    fn infection_radius_is_exclusive() -> Result<()> {
        let mut b = Box_::seeded(
            at_rest(&[[1.0, 2.0], [2.0, 2.0], [3.5, 2.0]]),
            [0.0, 0.0],
            4.0,
            4.0,
            1.0,
            1.0,
            0.0,
            0.0,
            3,
        )?;
        b.step(1.0);
        // exactly one radius away: no trial
        assert_eq!(b.particle(1).map(Particle::state), Some(State::Uninfected));
        assert_eq!(b.particle(2).map(Particle::state), Some(State::Uninfected));
        Ok(())
    }

    #[test]
    fn newly_sick_do_not_spread_in_the_same_tick() -> Result<()> {
        // 0 infects 1 during the first tick; 2 is only in range of 1
        let mut b = Box_::seeded(
            at_rest(&[[1.0, 2.0], [1.8, 2.0], [2.6, 2.0]]),
            [0.0, 0.0],
            4.0,
            4.0,
            1.0,
            1.0,
            0.0,
            0.0,
            5,
        )?;
        b.step(1.0);
        assert_eq!(b.census(), Census::new(1, 2, 0, 0));
        b.step(1.0);
        assert_eq!(b.census(), Census::new(0, 3, 0, 0));
        Ok(())
    }

    #[test]
    fn certain_death_empties_the_sick_partition() -> Result<()> {
        let mut b = Box_::seeded(
            at_rest(&[[1.0, 1.0], [3.0, 3.0]]),
            [0.0, 0.0],
            4.0,
            4.0,
            1.0,
            0.5,
            1.0,
            1.0,
            9,
        )?;
        b.step(0.1);
        assert_eq!(ids(&b, State::Dead), vec![0]);
        assert_eq!(b.census(), Census::new(1, 0, 0, 1));
        for _ in 0..10 {
            b.step(0.1);
        }
        assert_eq!(b.census(), Census::new(1, 0, 0, 1));
        b.check_invariants()
    }

    #[test]
    fn every_partition_keeps_moving() -> Result<()> {
        let particles = vec![
            Particle::new([1.0, 1.0], [1.0, 0.0])?,
            Particle::new([3.0, 3.0], [0.0, -1.0])?,
        ];
        let mut b = Box_::seeded(particles, [0.0, 0.0], 4.0, 4.0, 0.0, 0.5, 0.0, 1.0, 2)?;
        b.step(0.5);
        // the seed recovered but still moved
        assert_eq!(b.particle(0).map(Particle::state), Some(State::Recovered));
        assert_eq!(b.particle(0).map(Particle::position), Some([1.5, 1.0]));
        b.step(0.5);
        assert_eq!(b.particle(0).map(Particle::position), Some([2.0, 1.0]));
        assert_eq!(b.particle(1).map(Particle::position), Some([3.0, 2.0]));
        Ok(())
    }

    #[test]
    #[should_panic(expected = "Timestep should be positive")]
    fn non_positive_dt_panics() {
        let mut b = Box_::seeded(
            at_rest(&[[1.0, 1.0]]),
            [0.0, 0.0],
            4.0,
            4.0,
            0.5,
            0.1,
            0.1,
            0.1,
            1,
        )
        .unwrap();
        b.step(0.0);
    }
}
