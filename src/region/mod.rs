pub mod rect;
pub use rect::Rect;

use rand::Rng;

pub trait Region {
    /// Closed containment, walls included.
    fn contains(&self, coord: &[f64; 2]) -> bool;
    /// Open containment, walls excluded.
    fn contains_strictly(&self, coord: &[f64; 2]) -> bool;
    /// A uniformly random coordinate strictly inside the region.
    fn get_random_coord<R: Rng + ?Sized>(&self, rng: &mut R) -> [f64; 2];
}
