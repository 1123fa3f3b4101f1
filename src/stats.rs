#[derive(Default, Clone, Copy)]
struct Row {
    cells: usize,
    elements: usize,
    capacity: usize,
}

impl Row {
    fn add(&mut self, total: usize, capacity: usize) {
        self.cells += 1;
        self.elements += total;
        self.capacity += capacity;
    }
}

/// Histogram of cells by number of elements.
pub struct OccupancyStats {
    bucket_size: usize,
    by_total: Vec<Row>,
}

impl OccupancyStats {
    pub fn new(bucket_size: usize) -> Self {
        Self {
            bucket_size,
            by_total: vec![],
        }
    }

    pub fn add(&mut self, total: usize, capacity: usize) {
        if self.by_total.len() <= total {
            self.by_total.resize(total + 1, Row::default());
        }
        self.by_total[total].add(total, capacity);
    }

    pub fn cells(&self) -> usize {
        self.by_total.iter().map(|r| r.cells).sum()
    }

    pub fn elements(&self) -> usize {
        self.by_total.iter().map(|r| r.elements).sum()
    }

    pub fn capacity(&self) -> usize {
        self.by_total.iter().map(|r| r.capacity).sum()
    }

    pub fn max_total(&self) -> usize {
        self.by_total.len().saturating_sub(1)
    }

    /// Number of cells holding exactly `total` elements.
    pub fn cells_with(&self, total: usize) -> usize {
        self.by_total.get(total).map_or(0, |r| r.cells)
    }

    /// Fraction of allocated slots that are in use.
    pub fn fill_ratio(&self) -> f32 {
        self.elements() as f32 / self.capacity().max(1) as f32
    }

    pub fn print(&self) {
        let c_total = self.cells();
        let n = self.elements();

        eprintln!();
        eprintln!(
            "{:>6}  {:>9} {:>7} {:>6} {:>6} {:>6} {:>8}",
            "sz", "cells", "cell%", "cuml%", "elem%", "cuml%", "buckets"
        );
        let mut cell_cuml = 0;
        let mut elem_cuml = 0;
        for (total, row) in self.by_total.iter().enumerate() {
            if row.cells == 0 {
                continue;
            }
            cell_cuml += row.cells;
            elem_cuml += row.elements;
            eprintln!(
                "{:>6}: {:>9} {:>7.2} {:>6.2} {:>6.2} {:>6.2} {:>8.2}",
                total,
                row.cells,
                row.cells as f32 / c_total as f32 * 100.,
                cell_cuml as f32 / c_total as f32 * 100.,
                row.elements as f32 / n.max(1) as f32 * 100.,
                elem_cuml as f32 / n.max(1) as f32 * 100.,
                row.capacity as f32 / (self.bucket_size * row.cells) as f32,
            );
        }
        eprintln!(
            "{:>6}: {:>9} {:>7.2} {:>6.2} {:>6.2} {:>6.2} {:>8.2}",
            "",
            c_total,
            100.,
            100.,
            100.,
            100.,
            self.capacity() as f32 / (self.bucket_size * c_total.max(1)) as f32,
        );
        eprintln!("  fill ratio: {:>6.2}%", 100. * self.fill_ratio());
        eprintln!();
    }
}

#[test]
fn histogram() {
    let mut stats = OccupancyStats::new(4);
    stats.add(0, 4);
    stats.add(3, 4);
    stats.add(3, 4);
    stats.add(9, 12);
    assert_eq!(stats.cells(), 4);
    assert_eq!(stats.elements(), 15);
    assert_eq!(stats.capacity(), 24);
    assert_eq!(stats.cells_with(3), 2);
    assert_eq!(stats.cells_with(5), 0);
    assert_eq!(stats.max_total(), 9);
    assert!((stats.fill_ratio() - 15. / 24.).abs() < 1e-6);
}
