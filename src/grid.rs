use rayon::prelude::*;

use crate::{
    bucket::BucketChain,
    cell_box::CellBox,
    particle::Located,
    shape::{Cell, Shape},
    stats::OccupancyStats,
    types::{CellVec, ElementIdx},
};

/// Dense `D`-dimensional grid of bucket chains holding element handles.
///
/// `B` is the number of handles per bucket.
#[derive(Debug, Clone)]
pub struct Grid<const D: usize, const B: usize> {
    shape: Shape<D>,
    chains: CellVec<BucketChain<ElementIdx, B>>,
}

impl<const D: usize, const B: usize> Grid<D, B> {
    /// Eagerly allocate one empty chain per cell.
    pub fn new(extents: [usize; D]) -> Self {
        let shape = Shape::new(extents);
        Self {
            shape,
            chains: CellVec::new_with(shape.num_cells(), BucketChain::new),
        }
    }

    pub fn shape(&self) -> &Shape<D> {
        &self.shape
    }

    /// The box covering the whole grid.
    pub fn domain(&self) -> CellBox<D> {
        CellBox::covering(&self.shape)
    }

    pub fn add_to_cell(&mut self, cell: Cell<D>, element: ElementIdx) {
        let idx = self.shape.flatten(&cell);
        self.chains[idx].add(element);
    }

    /// Insert every element of `elements` at its own cell, in slice order.
    pub fn add_all<T: Located<D>>(&mut self, elements: &[T]) {
        for (e, idx) in elements.iter().zip(ElementIdx::range(elements.len())) {
            self.add_to_cell(e.cell(), idx);
        }
    }

    /// Number of elements in `cell`.
    pub fn total(&self, cell: Cell<D>) -> usize {
        self.cell(cell).total()
    }

    /// Number of elements in the grid.
    pub fn len(&self) -> usize {
        self.chains.iter().map(|c| c.total()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.iter().all(|c| c.is_empty())
    }

    pub fn cell(&self, cell: Cell<D>) -> &BucketChain<ElementIdx, B> {
        &self.chains[self.shape.flatten(&cell)]
    }

    pub fn cell_mut(&mut self, cell: Cell<D>) -> &mut BucketChain<ElementIdx, B> {
        let idx = self.shape.flatten(&cell);
        &mut self.chains[idx]
    }

    /// Allocated slots over all cells. Diagnostic only.
    pub fn capacity(&self) -> usize {
        self.chains.iter().map(|c| c.capacity()).sum()
    }

    /// Empty every cell, keeping allocated buckets for the next step.
    pub fn reset(&mut self) {
        for chain in self.chains.iter_mut() {
            chain.reset();
        }
    }

    /// Handles of all elements in `bx`, grouped by cell in row-major order.
    pub fn select_indices<'g>(&'g self, bx: &CellBox<D>) -> impl Iterator<Item = ElementIdx> + 'g {
        bx.iter().flat_map(move |c| self.cell(c).iter())
    }

    /// Copy out all elements whose cell lies in `bx`.
    ///
    /// `elements` must be the storage the handles were created for. The
    /// result is sized exactly: a first pass counts, a second pass copies.
    pub fn select<T: Clone>(&self, elements: &[T], bx: &CellBox<D>) -> Vec<T> {
        assert!(
            self.shape.contains(&bx.upper),
            "Box {bx} is not inside the grid of shape {:?}.",
            self.shape.extents()
        );
        let count: usize = bx.iter().map(|c| self.total(c)).sum();

        let mut selection = Vec::with_capacity(count);
        for c in bx {
            selection.extend(self.cell(c).iter().map(|idx| elements[idx.get()].clone()));
        }
        debug_assert_eq!(selection.len(), count);
        selection
    }

    pub fn occupancy(&self) -> OccupancyStats {
        let mut stats = OccupancyStats::new(B);
        for chain in self.chains.iter() {
            stats.add(chain.total(), chain.capacity());
        }
        stats
    }
}

/// Baseline range query: scan every element and keep those inside `bx`.
///
/// Output is in slice order.
pub fn select_linear<const D: usize, T>(elements: &[T], bx: &CellBox<D>) -> Vec<T>
where
    T: Located<D> + Clone + Send + Sync,
{
    elements
        .par_iter()
        .filter(|e| bx.contains(&e.cell()))
        .cloned()
        .collect()
}
