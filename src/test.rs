use itertools::Itertools;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::*;
use crate::{soa::ParticleArray, util::*};

#[test]
fn select_sub_box() {
    let domain = CellBox::new([0, 0], [9, 19]);
    let nppc = 4;
    let particles = make_particles_in(&domain, nppc, 0);

    let mut grid = Grid2::new(domain.shape());
    grid.add_all(&particles);
    assert_eq!(grid.capacity(), domain.size() * DEFAULT_BUCKET_SIZE);

    for c in &domain {
        assert_eq!(grid.total(c), nppc, "invalid number of particles in cell {c:?}");
    }
    let first = grid.cell([2, 1]).iter().next().unwrap();
    assert_eq!(particles[first.get()].i_cell, [2, 1]);

    let sub = CellBox::new([4, 3], [6, 4]);
    let selected = grid.select(&particles, &sub);
    assert_eq!(selected.len(), 24);
    assert_eq!(selected.len(), sub.size() * nppc);
    assert!(selected.iter().all(|p| sub.contains(&p.i_cell)));
}

#[test]
fn random_boxes_clipped_to_domain() {
    let params = BenchParams {
        nppc: 3,
        num_boxes: 50,
        ..Default::default()
    };
    let domain = CellBox::new([0, 0], [39, 29]);
    let particles = make_particles_in(&domain, params.nppc, params.seed);
    let mut grid = Grid::<2, 16>::new(domain.shape());
    grid.add_all(&particles);

    let boxes = generate_boxes(
        &domain,
        params.min_size,
        params.max_size,
        params.num_boxes,
        params.seed,
    );
    for b in &boxes {
        let clipped = domain.try_intersection(b).unwrap();
        let found = grid.select(&particles, &clipped);
        assert_eq!(found.len(), clipped.size() * params.nppc);
        assert_eq!(found, select_linear(&particles, &clipped));
    }
}

/// Random cells, random insertion order: grid and linear scan agree as multisets.
#[test]
fn scattered_particles_3d() {
    let shape = Shape::new([6, 5, 4]);
    let mut rng = ChaCha8Rng::seed_from_u64(2718);
    let particles = (0..2000)
        .map(|i| Particle {
            charge: i as f64,
            ..Particle::at([
                rng.gen_range(0..6),
                rng.gen_range(0..5),
                rng.gen_range(0..4),
            ])
        })
        .collect_vec();

    let mut grid = Grid::<3, 7>::new(shape.extents());
    grid.add_all(&particles);
    assert_eq!(grid.len(), particles.len());
    assert_eq!(grid.occupancy().elements(), particles.len());
    assert_eq!(grid.occupancy().cells(), shape.num_cells());

    let sub = CellBox::new([1, 0, 2], [4, 3, 3]);
    let key = |p: &Particle<3>| p.charge as usize;
    let by_grid = grid.select(&particles, &sub).iter().map(key).sorted().collect_vec();
    let by_scan = select_linear(&particles, &sub).iter().map(key).collect_vec();
    assert_eq!(by_grid, by_scan);
}

/// Several push steps reusing the same grid: capacity settles, counts stay exact.
#[test]
fn step_cycle_reuses_buckets() {
    let domain = CellBox::new([0, 0], [7, 7]);
    let mut particles: ParticleArray<2> = make_particles_in(&domain, 10, 5).into_iter().collect();
    let mut grid = Grid::<2, 4>::new(domain.shape());
    grid.add_all(&particles.iter().collect_vec());
    let capacity = grid.capacity();

    for _step in 0..4 {
        // Move every particle one cell along the last axis, wrapping around.
        for i in 0..particles.len() {
            let mut p = particles.get_mut(i);
            let cell = p.i_cell();
            cell[1] = (cell[1] + 1) % 8;
        }
        grid.reset();
        grid.add_all(particles.cells());
        assert_eq!(grid.len(), particles.len());
        assert_eq!(grid.capacity(), capacity);

        let sub = CellBox::new([2, 2], [3, 5]);
        let found = grid.select(particles.cells(), &sub);
        assert_eq!(found.len(), sub.size() * 10);
    }
}

#[test]
fn sorted_soa_selects_contiguously() {
    let domain = CellBox::new([0, 0, 0], [2, 2, 2]);
    let mut particles = make_particles_in(&domain, 2, 9);
    particles.reverse();
    let mut soa: ParticleArray<3> = particles.into_iter().collect();
    soa.sort_by_cell(&Shape::new(domain.shape()));

    let mut grid = Grid::<3, 1>::new(domain.shape());
    grid.add_all(soa.cells());
    // After sorting, the handles of the whole domain come out as 0..n.
    let idx = grid.select_indices(&domain).map(ElementIdx::get).collect_vec();
    assert_eq!(idx, (0..soa.len()).collect_vec());
}
