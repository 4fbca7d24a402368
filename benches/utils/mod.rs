// Not every generator is used by every bench target.
#![allow(dead_code)]

use nalgebra::point;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use rangetree::{Rect, P2};

//// Utility functions

pub(crate) fn random_points(n: usize, seed: u64) -> Vec<P2> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| point![rng.gen_range(-1000.0..1000.0), rng.gen_range(-1000.0..1000.0)])
        .collect()
}

/// Integer coordinates in a narrow range, so a large share of the input
/// collapses into duplicate locations.
pub(crate) fn duplicated_points(n: usize, seed: u64) -> Vec<P2> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            point![
                rng.gen_range(-100..100) as f64,
                rng.gen_range(-100..100) as f64
            ]
        })
        .collect()
}

pub(crate) fn random_rects(n: usize, seed: u64) -> Vec<Rect> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|_| {
            Rect::from_corners(
                point![rng.gen_range(-1000.0..1000.0), rng.gen_range(-1000.0..1000.0)],
                point![rng.gen_range(-1000.0..1000.0), rng.gen_range(-1000.0..1000.0)],
            )
        })
        .collect()
}
