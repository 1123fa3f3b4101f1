use crate::types::CellIdx;

/// A cell coordinate. Only used as an index.
pub type Cell<const D: usize> = [usize; D];

/// Extents of a dense `D`-dimensional grid together with its row-major strides.
///
/// The last axis varies fastest, so in 2D a cell `[ix, iy]` maps to `iy + ix * ny`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape<const D: usize> {
    extents: [usize; D],
    strides: [usize; D],
}

impl<const D: usize> Shape<D> {
    pub fn new(extents: [usize; D]) -> Self {
        assert!(D > 0 && D < 4, "Only dimensions 1, 2, 3 are supported.");
        let mut strides = [1; D];
        for d in (0..D - 1).rev() {
            strides[d] = strides[d + 1] * extents[d + 1];
        }
        Self { extents, strides }
    }

    pub fn extents(&self) -> [usize; D] {
        self.extents
    }

    pub fn num_cells(&self) -> usize {
        self.extents.iter().product()
    }

    pub fn contains(&self, cell: &Cell<D>) -> bool {
        cell.iter().zip(&self.extents).all(|(&c, &n)| c < n)
    }

    /// Map a cell to its linear storage index.
    ///
    /// Panics when `cell` is outside the shape on any axis.
    pub fn flatten(&self, cell: &Cell<D>) -> CellIdx {
        assert!(
            self.contains(cell),
            "Cell {cell:?} is outside the grid of shape {:?}.",
            self.extents
        );
        CellIdx::new(cell.iter().zip(&self.strides).map(|(&c, &s)| c * s).sum())
    }

    pub fn unflatten(&self, idx: CellIdx) -> Cell<D> {
        let mut rem = idx.get();
        let mut cell = [0; D];
        for d in 0..D {
            cell[d] = rem / self.strides[d];
            rem %= self.strides[d];
        }
        cell
    }
}

#[test]
fn flatten_2d_is_row_major() {
    let shape = Shape::new([10, 20]);
    assert_eq!(shape.num_cells(), 200);
    assert_eq!(shape.flatten(&[0, 0]).get(), 0);
    assert_eq!(shape.flatten(&[0, 1]).get(), 1);
    assert_eq!(shape.flatten(&[1, 0]).get(), 20);
    assert_eq!(shape.flatten(&[4, 3]).get(), 3 + 4 * 20);
}

#[test]
fn flatten_is_a_bijection() {
    let shape = Shape::new([3, 4, 5]);
    for i in 0..shape.num_cells() {
        let cell = shape.unflatten(CellIdx::new(i));
        assert!(shape.contains(&cell));
        assert_eq!(shape.flatten(&cell).get(), i);
    }
    assert!(!shape.contains(&[3, 0, 0]));
    assert!(!shape.contains(&[0, 0, 5]));
}

#[test]
#[should_panic(expected = "outside the grid")]
fn flatten_rejects_aliasing_cell() {
    // [0, 3] would flatten to 3 == [1, 0] without the per-axis check.
    Shape::new([2, 3]).flatten(&[0, 3]);
}

#[test]
fn flatten_1d() {
    let shape = Shape::new([7]);
    assert_eq!(shape.flatten(&[6]).get(), 6);
    assert_eq!(shape.unflatten(CellIdx::new(2)), [2]);
}
