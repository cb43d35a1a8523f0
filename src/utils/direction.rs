#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}
impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
    pub fn direction(&self, lo: bool) -> Direction {
        match (self, lo) {
            (Axis::X, true) => Direction::Xlo,
            (Axis::X, false) => Direction::Xhi,
            (Axis::Y, true) => Direction::Ylo,
            (Axis::Y, false) => Direction::Yhi,
        }
    }
}

/// One of the four walls of a rectangle. `Yhi` is the ceiling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Xlo,
    Xhi,
    Ylo,
    Yhi,
}
