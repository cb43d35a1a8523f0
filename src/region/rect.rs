use rand::Rng;
use rand_distr::{Distribution, Open01};

use super::Region;
use crate::{
    error::{Error, Result},
    utils::{Axis, Direction},
};

/// Axis-aligned rectangle `[xlo, xhi] x [ylo, yhi]`
#[derive(Clone, Debug, PartialEq)]
pub struct Rect {
    xlo: f64,
    xhi: f64,
    ylo: f64,
    yhi: f64,
}
impl Rect {
    pub fn new(xlo: f64, xhi: f64, ylo: f64, yhi: f64) -> Result<Self> {
        if ![xlo, xhi, ylo, yhi].iter().all(|b| b.is_finite()) {
            return Err(Error::ConstraintViolation(format!(
                "bounds should be finite, found x: [{}, {}], y: [{}, {}]",
                xlo, xhi, ylo, yhi
            )));
        }
        if xhi <= xlo || yhi <= ylo {
            return Err(Error::ConstraintViolation(format!(
                "lower bounds should be less than upper bounds, found x: [{}, {}], y: [{}, {}]",
                xlo, xhi, ylo, yhi
            )));
        }
        Ok(Self { xlo, xhi, ylo, yhi })
    }
    /// Create a rectangle from its lower-left corner and its side lengths
    pub fn from_origin(position: [f64; 2], width: f64, height: f64) -> Result<Self> {
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::ConstraintViolation(format!(
                "width and height should be positive, found {} x {}",
                width, height
            )));
        }
        Self::new(
            position[0],
            position[0] + width,
            position[1],
            position[1] + height,
        )
    }
    pub fn lx(&self) -> f64 {
        self.xhi - self.xlo
    }
    pub fn ly(&self) -> f64 {
        self.yhi - self.ylo
    }
    pub fn get_bound(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Xlo => self.xlo,
            Direction::Xhi => self.xhi,
            Direction::Ylo => self.ylo,
            Direction::Yhi => self.yhi,
        }
    }
    pub fn get_bounds(&self, axis: Axis) -> [f64; 2] {
        [
            self.get_bound(axis.direction(true)),
            self.get_bound(axis.direction(false)),
        ]
    }
}
impl Region for Rect {
    fn contains(&self, coord: &[f64; 2]) -> bool {
        self.xlo <= coord[0] && coord[0] <= self.xhi && self.ylo <= coord[1] && coord[1] <= self.yhi
    }
    fn contains_strictly(&self, coord: &[f64; 2]) -> bool {
        self.xlo < coord[0] && coord[0] < self.xhi && self.ylo < coord[1] && coord[1] < self.yhi
    }
    fn get_random_coord<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 2] {
        let u: f64 = Open01.sample(rng);
        let v: f64 = Open01.sample(rng);
        [self.xlo + u * self.lx(), self.ylo + v * self.ly()]
    }
}
