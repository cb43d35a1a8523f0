/// Squared euclidean distance between two points in the plane.
///
/// ```rust
/// use rona::utils::distance_squared;
///
/// assert_eq!(distance_squared(&[2.0, 2.0], &[2.5, 2.0]), 0.25);
/// assert_eq!(distance_squared(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
/// ```
pub fn distance_squared(coord1: &[f64; 2], coord2: &[f64; 2]) -> f64 {
    let x = coord1[0] - coord2[0];
    let y = coord1[1] - coord2[1];
    x * x + y * y
}

/// Checks that `p` is a finite probability in `[0, 1]`.
///
/// ```rust
/// use rona::utils::is_probability;
///
/// assert!(is_probability(0.0));
/// assert!(is_probability(1.0));
/// assert!(!is_probability(1.5));
/// assert!(!is_probability(f64::NAN));
/// ```
pub fn is_probability(p: f64) -> bool {
    p.is_finite() && (0.0..=1.0).contains(&p)
}
