use crate::{
    error::{Error, Result},
    Census, State,
};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Slot {
    state: State,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Particle indices grouped by disease state.
///
/// Each partition is a doubly linked list threaded through a per-particle slot
/// table, so moving a particle is an unlink plus an append to the tail. The
/// particles left behind keep their relative order.
#[derive(Clone, Debug)]
pub struct Partitions {
    heads: [Option<usize>; 4],
    tails: [Option<usize>; 4],
    lens: [usize; 4],
    slots: Vec<Slot>,
}
impl Partitions {
    /// File every particle under its state, in index order.
    pub fn new(states: impl IntoIterator<Item = State>) -> Self {
        let mut partitions = Self {
            heads: [None; 4],
            tails: [None; 4],
            lens: [0; 4],
            slots: Vec::new(),
        };
        for (idx, state) in states.into_iter().enumerate() {
            partitions.slots.push(Slot {
                state,
                prev: None,
                next: None,
            });
            partitions.append(idx, state);
        }
        partitions
    }

    /// Indices filed under `state`, oldest first
    pub fn members(&self, state: State) -> Members<'_> {
        Members {
            slots: &self.slots,
            next: self.heads[state.index()],
            remaining: self.lens[state.index()],
        }
    }
    pub fn count(&self, state: State) -> usize {
        self.lens[state.index()]
    }
    pub fn census(&self) -> Census {
        let mut census = Census::default();
        for state in State::ALL {
            census[state] = self.count(state);
        }
        census
    }

    /// Move particle `idx` from its current partition to the end of `to`.
    pub fn relocate(&mut self, idx: usize, to: State) {
        if self.slots[idx].state == to {
            return;
        }
        self.unlink(idx);
        self.append(idx, to);
    }

    fn unlink(&mut self, idx: usize) {
        let Slot { state, prev, next } = self.slots[idx];
        let s = state.index();
        match prev {
            Some(p) => self.slots[p].next = next,
            None => self.heads[s] = next,
        }
        match next {
            Some(n) => self.slots[n].prev = prev,
            None => self.tails[s] = prev,
        }
        self.lens[s] -= 1;
    }

    fn append(&mut self, idx: usize, state: State) {
        let s = state.index();
        let tail = self.tails[s];
        self.slots[idx] = Slot {
            state,
            prev: tail,
            next: None,
        };
        match tail {
            Some(t) => self.slots[t].next = Some(idx),
            None => self.heads[s] = Some(idx),
        }
        self.tails[s] = Some(idx);
        self.lens[s] += 1;
    }

    /// Check that the partitions exactly cover `states` and agree with it.
    pub fn check(&self, states: impl ExactSizeIterator<Item = State>) -> Result<()> {
        let n = self.slots.len();
        if states.len() != n {
            return Err(Error::InvariantViolation(format!(
                "{} particles but {} slots",
                states.len(),
                n
            )));
        }
        let mut seen = vec![false; n];
        for partition in State::ALL {
            let s = partition.index();
            let mut prev = None;
            let mut cursor = self.heads[s];
            let mut walked = 0;
            while let Some(idx) = cursor {
                let slot = match self.slots.get(idx) {
                    Some(slot) if !seen[idx] => slot,
                    _ => {
                        return Err(Error::InvariantViolation(format!(
                            "particle {} reached twice or out of range in the {} partition",
                            idx, partition
                        )))
                    }
                };
                if slot.state != partition || slot.prev != prev {
                    return Err(Error::InvariantViolation(format!(
                        "particle {} found in the {} partition but its slot says {:?}",
                        idx, partition, slot
                    )));
                }
                seen[idx] = true;
                walked += 1;
                prev = cursor;
                cursor = slot.next;
            }
            if prev != self.tails[s] || walked != self.lens[s] {
                return Err(Error::InvariantViolation(format!(
                    "the {} partition holds {} particles ending at {:?}, expected {} ending at {:?}",
                    partition, walked, prev, self.lens[s], self.tails[s]
                )));
            }
        }
        if let Some(idx) = seen.iter().position(|&filed| !filed) {
            return Err(Error::InvariantViolation(format!(
                "particle {} is not filed under any partition",
                idx
            )));
        }
        for (idx, state) in states.enumerate() {
            let filed_under = self.slots[idx].state;
            if filed_under != state {
                return Err(Error::InvariantViolation(format!(
                    "particle {} is {} but filed under {}",
                    idx, state, filed_under
                )));
            }
        }
        Ok(())
    }
}

/// Iterator over one partition, see [`Partitions::members`]
#[derive(Clone, Debug)]
pub struct Members<'a> {
    slots: &'a [Slot],
    next: Option<usize>,
    remaining: usize,
}
impl Iterator for Members<'_> {
    type Item = usize;
    fn next(&mut self) -> Option<usize> {
        let idx = self.next?;
        self.next = self.slots[idx].next;
        self.remaining -= 1;
        Some(idx)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
impl ExactSizeIterator for Members<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn states() -> Vec<State> {
        vec![
            State::Sick,
            State::Uninfected,
            State::Uninfected,
            State::Uninfected,
            State::Recovered,
        ]
    }

    fn ids(partitions: &Partitions, state: State) -> Vec<usize> {
        partitions.members(state).collect()
    }

    #[test]
    fn filed_in_index_order() -> Result<()> {
        let states = states();
        let partitions = Partitions::new(states.iter().copied());
        assert_eq!(ids(&partitions, State::Uninfected), vec![1, 2, 3]);
        assert_eq!(ids(&partitions, State::Sick), vec![0]);
        assert_eq!(ids(&partitions, State::Recovered), vec![4]);
        assert_eq!(partitions.members(State::Dead).len(), 0);
        assert_eq!(partitions.census(), Census::new(3, 1, 1, 0));
        partitions.check(states.into_iter())
    }

    #[test]
    fn relocate_keeps_remaining_order() -> Result<()> {
        let mut states = states();
        let mut partitions = Partitions::new(states.iter().copied());

        // leave from the head
        states[1] = State::Sick;
        partitions.relocate(1, State::Sick);
        assert_eq!(ids(&partitions, State::Uninfected), vec![2, 3]);
        assert_eq!(ids(&partitions, State::Sick), vec![0, 1]);
        partitions.check(states.iter().copied())?;

        // leave from the tail
        states[3] = State::Sick;
        partitions.relocate(3, State::Sick);
        assert_eq!(ids(&partitions, State::Uninfected), vec![2]);
        assert_eq!(ids(&partitions, State::Sick), vec![0, 1, 3]);
        partitions.check(states.iter().copied())?;

        // leave from the middle
        states[1] = State::Dead;
        partitions.relocate(1, State::Dead);
        assert_eq!(ids(&partitions, State::Sick), vec![0, 3]);
        assert_eq!(ids(&partitions, State::Dead), vec![1]);
        partitions.check(states.iter().copied())?;

        // empty a partition, then refill it
        states[2] = State::Sick;
        partitions.relocate(2, State::Sick);
        assert_eq!(partitions.members(State::Uninfected).len(), 0);
        assert_eq!(ids(&partitions, State::Sick), vec![0, 3, 2]);
        partitions.check(states.iter().copied())?;

        assert_eq!(partitions.census(), Census::new(0, 3, 1, 1));
        Ok(())
    }

    #[test]
    fn relocate_to_same_partition_is_a_no_op() -> Result<()> {
        let states = states();
        let mut partitions = Partitions::new(states.iter().copied());
        partitions.relocate(2, State::Uninfected);
        assert_eq!(ids(&partitions, State::Uninfected), vec![1, 2, 3]);
        partitions.check(states.into_iter())
    }

    #[test]
    fn state_mismatch_detected() {
        let mut states = states();
        let partitions = Partitions::new(states.iter().copied());
        states[3] = State::Dead;
        let err = partitions.check(states.into_iter()).unwrap_err();
        assert!(matches!(err, Error::InvariantViolation(_)));
        assert!(err.to_string().contains("particle 3"));
    }

    #[test]
    fn broken_links_detected() {
        let states = states();
        let mut partitions = Partitions::new(states.iter().copied());
        // particle 2 drops out of the uninfected chain
        partitions.slots[1].next = Some(3);
        assert!(partitions.check(states.into_iter()).is_err());
    }

    #[test]
    fn population_size_mismatch_detected() {
        let states = states();
        let partitions = Partitions::new(states.iter().copied());
        assert!(partitions.check(states[..4].iter().copied()).is_err());
    }
}
