use std::fmt::{Display, Formatter};

use anyhow::{bail, Result};
use itertools::Itertools;

use crate::shape::{Cell, Shape};

/// An axis-aligned, inclusive range `[lower, upper]` of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellBox<const D: usize> {
    pub lower: Cell<D>,
    pub upper: Cell<D>,
}

impl<const D: usize> CellBox<D> {
    /// Panics when `lower > upper` on some axis.
    pub fn new(lower: Cell<D>, upper: Cell<D>) -> Self {
        Self::try_new(lower, upper)
            .unwrap_or_else(|| panic!("Box lower {lower:?} exceeds upper {upper:?}."))
    }

    pub fn try_new(lower: Cell<D>, upper: Cell<D>) -> Option<Self> {
        lower
            .iter()
            .zip(&upper)
            .all(|(l, u)| l <= u)
            .then_some(Self { lower, upper })
    }

    /// The box covering every cell of `shape`.
    pub fn covering(shape: &Shape<D>) -> Self {
        let extents = shape.extents();
        assert!(extents.iter().all(|&n| n > 0), "Empty shape {extents:?}.");
        Self::new([0; D], extents.map(|n| n - 1))
    }

    /// Number of cells along each axis.
    pub fn shape(&self) -> [usize; D] {
        let mut s = [0; D];
        for d in 0..D {
            s[d] = self.upper[d] - self.lower[d] + 1;
        }
        s
    }

    /// Number of cells in the box.
    pub fn size(&self) -> usize {
        self.shape().iter().product()
    }

    pub fn contains(&self, cell: &Cell<D>) -> bool {
        (0..D).all(|d| self.lower[d] <= cell[d] && cell[d] <= self.upper[d])
    }

    /// Per-axis clamp of the two boxes, or `None` when they are disjoint.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let mut lower = [0; D];
        let mut upper = [0; D];
        for d in 0..D {
            lower[d] = self.lower[d].max(other.lower[d]);
            upper[d] = self.upper[d].min(other.upper[d]);
        }
        Self::try_new(lower, upper)
    }

    pub fn try_intersection(&self, other: &Self) -> Result<Self> {
        match self.intersection(other) {
            Some(b) => Ok(b),
            None => bail!("invalid intersection of {self} and {other}"),
        }
    }

    /// Iterate all cells of the box in row-major order (last axis fastest).
    pub fn iter(&self) -> CellBoxIter<D> {
        CellBoxIter {
            bx: *self,
            next: Some(self.lower),
            remaining: self.size(),
        }
    }
}

impl<const D: usize> IntoIterator for &CellBox<D> {
    type Item = Cell<D>;
    type IntoIter = CellBoxIter<D>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<const D: usize> Display for CellBox<D> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[({}),({})]",
            self.lower.iter().join(","),
            self.upper.iter().join(",")
        )
    }
}

pub struct CellBoxIter<const D: usize> {
    bx: CellBox<D>,
    next: Option<Cell<D>>,
    remaining: usize,
}

impl<const D: usize> Iterator for CellBoxIter<D> {
    type Item = Cell<D>;

    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.next?;
        self.remaining -= 1;

        // Odometer step: bump the last axis and carry into the previous ones.
        let mut cell = cur;
        self.next = None;
        for d in (0..D).rev() {
            if cell[d] < self.bx.upper[d] {
                cell[d] += 1;
                self.next = Some(cell);
                break;
            }
            cell[d] = self.bx.lower[d];
        }
        Some(cur)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<const D: usize> ExactSizeIterator for CellBoxIter<D> {}
