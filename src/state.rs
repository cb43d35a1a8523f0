use std::{
    fmt::Display,
    ops::{Index, IndexMut},
};

/// Disease state of a particle.
///
/// `Uninfected -> Sick -> {Recovered, Dead}`. Recovered and dead are terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum State {
    Uninfected,
    Sick,
    Recovered,
    Dead,
}
impl State {
    /// Every state, in the order partitions are visited during a step.
    pub const ALL: [State; 4] = [State::Uninfected, State::Sick, State::Recovered, State::Dead];

    pub fn index(&self) -> usize {
        match self {
            State::Uninfected => 0,
            State::Sick => 1,
            State::Recovered => 2,
            State::Dead => 3,
        }
    }
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Recovered | State::Dead)
    }
}
impl Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            State::Uninfected => "uninfected",
            State::Sick => "sick",
            State::Recovered => "recovered",
            State::Dead => "dead",
        };
        f.write_str(s)
    }
}

/// Number of particles in each state at one point in time
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Census {
    counts: [usize; 4],
}
impl Census {
    pub fn new(uninfected: usize, sick: usize, recovered: usize, dead: usize) -> Self {
        Self {
            counts: [uninfected, sick, recovered, dead],
        }
    }
    pub fn uninfected(&self) -> usize {
        self[State::Uninfected]
    }
    pub fn sick(&self) -> usize {
        self[State::Sick]
    }
    pub fn recovered(&self) -> usize {
        self[State::Recovered]
    }
    pub fn dead(&self) -> usize {
        self[State::Dead]
    }
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
impl Index<State> for Census {
    type Output = usize;
    fn index(&self, state: State) -> &usize {
        &self.counts[state.index()]
    }
}
impl IndexMut<State> for Census {
    fn index_mut(&mut self, state: State) -> &mut usize {
        &mut self.counts[state.index()]
    }
}
impl Display for Census {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "uninfected={} sick={} recovered={} dead={}",
            self.uninfected(),
            self.sick(),
            self.recovered(),
            self.dead()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_visit_order() {
        for (i, state) in State::ALL.iter().enumerate() {
            assert_eq!(state.index(), i);
        }
    }

    #[test]
    fn only_recovered_and_dead_are_terminal() {
        assert!(!State::Uninfected.is_terminal());
        assert!(!State::Sick.is_terminal());
        assert!(State::Recovered.is_terminal());
        assert!(State::Dead.is_terminal());
    }

    #[test]
    fn census_indexing_and_total() {
        let mut census = Census::new(5, 1, 0, 0);
        census[State::Sick] += 2;
        census[State::Uninfected] -= 2;
        assert_eq!(census.sick(), 3);
        assert_eq!(census.uninfected(), 3);
        assert_eq!(census.total(), 6);
        assert_eq!(
            census.to_string(),
            "uninfected=3 sick=3 recovered=0 dead=0"
        );
    }
}
