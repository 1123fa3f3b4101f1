use std::{hint::black_box, time::Instant};

use anyhow::{bail, ensure, Result};
use bucket_grid::{util::*, *};
use clap::{Parser, Subcommand};

/// Benchmark range queries on a bucket grid of particles.
#[derive(clap::Parser)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the small 10x20 scenario and verify the counts.
    Check,
    /// Compare grid selection against a linear scan over all particles.
    Bench {
        #[arg(short, default_value_t = 200)]
        x: usize,
        #[arg(short, default_value_t = 400)]
        y: usize,
        #[arg(short, long, default_value_t = 100)]
        nppc: usize,
        #[arg(short, long, default_value_t = 10)]
        boxes: usize,
        #[arg(long, default_value_t = 5)]
        min: usize,
        #[arg(long, default_value_t = 10)]
        max: usize,
        #[arg(long, default_value_t = 31415)]
        seed: u64,
        #[arg(long)]
        stats: bool,
    },
    /// Only print cell occupancy statistics.
    Stats {
        #[arg(short, default_value_t = 200)]
        x: usize,
        #[arg(short, default_value_t = 400)]
        y: usize,
        #[arg(short, long, default_value_t = 100)]
        nppc: usize,
    },
}

fn main() -> Result<()> {
    let Args { command } = Args::parse();

    match command {
        Command::Check => check(),
        Command::Bench {
            x,
            y,
            nppc,
            boxes,
            min,
            max,
            seed,
            stats,
        } => bench(
            [x, y],
            BenchParams {
                nppc,
                num_boxes: boxes,
                min_size: min,
                max_size: max,
                seed,
                print_stats: stats,
            },
        ),
        Command::Stats { x, y, nppc } => {
            let domain = domain_of([x, y])?;
            let particles = make_particles_in(&domain, nppc, BenchParams::default().seed);
            let mut grid = Grid2::new(domain.shape());
            grid.add_all(&particles);
            grid.occupancy().print();
            Ok(())
        }
    }
}

/// The box covering a grid of the given extents; every extent must be positive.
fn domain_of(extents: [usize; 2]) -> Result<CellBox<2>> {
    let [x, y] = extents;
    let upper = [x.checked_sub(1), y.checked_sub(1)];
    match upper {
        [Some(ux), Some(uy)] => Ok(CellBox::new([0, 0], [ux, uy])),
        _ => bail!("empty domain {x}x{y}"),
    }
}

fn check() -> Result<()> {
    let domain = CellBox::new([0, 0], [9, 19]);
    let nppc = 4;
    let particles = make_particles_in(&domain, nppc, 0);

    eprintln!("making the grid...");
    let mut grid = Grid2::new(domain.shape());
    grid.add_all(&particles);
    eprintln!("total grid capacity : {}", grid.capacity());

    for c in &domain {
        ensure!(
            grid.total(c) == nppc,
            "invalid number of particles in cell {c:?}: {}",
            grid.total(c)
        );
    }
    eprintln!("nbr of particles ok.");

    let sub = CellBox::new([4, 3], [6, 4]);
    eprintln!("cells in box : {sub}");
    let selected = grid.select(&particles, &sub);
    eprintln!("nbr of particles selected : {}", selected.len());
    eprintln!("nbr of particles expected : {}", sub.size() * nppc);
    ensure!(
        selected.len() == sub.size() * nppc,
        "invalid number of found particles"
    );
    ensure!(
        selected.iter().all(|p| sub.contains(&p.i_cell)),
        "selected particle outside {sub}"
    );
    Ok(())
}

fn bench(extents: [usize; 2], params: BenchParams) -> Result<()> {
    let domain = domain_of(extents)?;
    ensure!(
        0 < params.min_size && params.min_size <= params.max_size,
        "invalid box sizes {}..={}",
        params.min_size,
        params.max_size
    );
    let particles = make_particles_in(&domain, params.nppc, params.seed);

    let start = Instant::now();
    let mut grid = Grid2::new(domain.shape());
    grid.add_all(&particles);
    log_duration("fill grid", start);
    eprintln!("    capacity: {:>10}", grid.capacity());
    if params.print_stats {
        grid.occupancy().print();
    }

    let boxes = generate_boxes(
        &domain,
        params.min_size,
        params.max_size,
        params.num_boxes,
        params.seed,
    );
    let clipped = boxes
        .iter()
        .map(|b| domain.try_intersection(b))
        .collect::<Result<Vec<_>>>()?;

    for (b, i) in boxes.iter().zip(&clipped) {
        let found = grid.select(&particles, i).len();
        eprintln!(
            "{b} -> {i}: expected {:>6} found {found:>6}",
            i.size() * params.nppc
        );
    }

    let start = Instant::now();
    let mut selected_grid = 0;
    for b in &clipped {
        selected_grid += black_box(grid.select(&particles, b)).len();
    }
    log_duration("grid select", start);

    let start = Instant::now();
    let mut selected_scan = 0;
    for b in &clipped {
        selected_scan += black_box(select_linear(&particles, b)).len();
    }
    log_duration("linear scan", start);

    ensure!(
        selected_grid == selected_scan,
        "grid found {selected_grid} particles, scan found {selected_scan}"
    );
    Ok(())
}

#[test]
fn zero_extent_is_an_empty_domain() {
    assert!(domain_of([0, 5]).is_err());
    assert!(domain_of([3, 0]).is_err());
    assert_eq!(domain_of([1, 5]).unwrap(), CellBox::new([0, 0], [0, 4]));
}
