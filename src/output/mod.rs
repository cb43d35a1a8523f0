use std::fmt::Display;

use crate::{Census, State};

/// A column of the census table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputSpec {
    Step,
    Time,
    Count(State),
}
impl Display for OutputSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputSpec::Step => f.write_str("step"),
            OutputSpec::Time => f.write_str("time"),
            OutputSpec::Count(state) => state.fmt(f),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Output {
    every: usize,
    pub values: Vec<OutputSpec>,
}
impl Output {
    pub fn new() -> Self {
        Self {
            every: 100,
            values: vec![
                OutputSpec::Step,
                OutputSpec::Time,
                OutputSpec::Count(State::Uninfected),
                OutputSpec::Count(State::Sick),
                OutputSpec::Count(State::Recovered),
                OutputSpec::Count(State::Dead),
            ],
        }
    }
    pub fn every(&self) -> usize {
        self.every
    }
    pub fn set_every(&mut self, every: usize) {
        assert!(every > 0, "Output interval should be positive");
        self.every = every;
    }
    pub fn is_due(&self, step: usize) -> bool {
        step % self.every == 0
    }
    pub fn header(&self) -> String {
        self.values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\t")
    }
    pub fn row(&self, record: &Record) -> String {
        self.values
            .iter()
            .map(|&v| record.value(v).to_string())
            .collect::<Vec<_>>()
            .join("\t")
    }
}
impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

/// Census taken after `step` steps, at simulated time `time`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Record {
    pub step: usize,
    pub time: f64,
    pub census: Census,
}
impl Record {
    pub fn value(&self, spec: OutputSpec) -> Value {
        match spec {
            OutputSpec::Step => Value::Usize(self.step),
            OutputSpec::Time => Value::Float(self.time),
            OutputSpec::Count(state) => Value::Usize(self.census[state]),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Usize(usize),
    Float(f64),
}
impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{:.3}", v),
            Value::Usize(v) => v.fmt(f),
        }
    }
}
