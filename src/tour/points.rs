use rand::Rng;
use std::f64::consts::PI;

/// `n` points evenly spaced on a circle of `radius` around the origin,
/// starting at `(radius, 0)` and going counter-clockwise.
///
/// The optimal open tour from point 0 follows the circle.
pub fn circle_points(radius: f64, n: usize) -> Vec<[f64; 2]> {
    (0..n)
        .map(|i| {
            let angle = 2.0 * PI * i as f64 / n as f64;
            [radius * angle.cos(), radius * angle.sin()]
        })
        .collect()
}

/// `n` points drawn uniformly from the square `[0, side)²`.
pub fn square_points<R: Rng>(side: f64, n: usize, rng: &mut R) -> Vec<[f64; 2]> {
    (0..n)
        .map(|_| [rng.random_range(0.0..side), rng.random_range(0.0..side)])
        .collect()
}
