//! Logging and element/box generation used by the benchmarks and tests.
use std::time::Instant;

use colored::Colorize;
use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::{cell_box::CellBox, particle::Particle, shape::Cell};

pub fn log_duration(name: &str, start: Instant) -> Instant {
    eprintln!(
        "{}",
        format!("{name:>12}: {:>13.2?}s", start.elapsed().as_secs_f32()).bold()
    );
    Instant::now()
}

/// `nppc` elements per cell of `bx`, generated cell by cell in the box's
/// row-major order.
pub fn make_elements_in<const D: usize, T: Send>(
    bx: &CellBox<D>,
    nppc: usize,
    make: impl Fn(Cell<D>, usize) -> T + Sync,
) -> Vec<T> {
    let cells = bx.iter().collect_vec();
    cells
        .par_iter()
        .flat_map_iter(|&c| (0..nppc).map(move |i| (c, i)))
        .map(|(c, i)| make(c, i))
        .collect()
}

/// Particles at every cell of `bx`, with random offsets and velocities.
///
/// The same `seed` always gives the same particles.
pub fn make_particles_in<const D: usize>(
    bx: &CellBox<D>,
    nppc: usize,
    seed: u64,
) -> Vec<Particle<D>> {
    let start = Instant::now();
    let mut particles = make_elements_in(bx, nppc, |c, _| Particle::at(c));

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    for p in &mut particles {
        p.weight = 1.;
        p.charge = 1.;
        p.delta = [(); D].map(|_| rng.gen::<f64>());
        p.v = [(); 3].map(|_| rng.gen_range(-1.0..1.0));
    }
    if particles.len() >= 1 << 20 {
        log_duration("gen parts", start);
    }
    particles
}

/// `num_boxes` random square boxes anchored inside `domain`.
///
/// Side lengths are drawn from `min_size..=max_size`; the boxes may stick
/// out of the domain, so intersect them with it before querying.
pub fn generate_boxes<const D: usize>(
    domain: &CellBox<D>,
    min_size: usize,
    max_size: usize,
    num_boxes: usize,
    seed: u64,
) -> Vec<CellBox<D>> {
    assert!(0 < min_size && min_size <= max_size);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..num_boxes)
        .map(|_| {
            let size = rng.gen_range(min_size..=max_size);
            let mut lower = [0; D];
            for d in 0..D {
                lower[d] = rng.gen_range(domain.lower[d]..=domain.upper[d]);
            }
            CellBox::new(lower, lower.map(|l| l + size - 1))
        })
        .collect()
}
