use crate::shape::Cell;

/// Anything that lives in a single grid cell.
pub trait Located<const D: usize> {
    fn cell(&self) -> Cell<D>;
}

/// A particle-in-cell macro particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle<const D: usize> {
    pub weight: f64,
    pub charge: f64,

    pub i_cell: Cell<D>,
    /// Position inside the cell, in `[0, 1)` per axis.
    pub delta: [f64; D],
    pub v: [f64; 3],

    pub e: [f64; 3],
    pub b: [f64; 3],
}

impl<const D: usize> Default for Particle<D> {
    fn default() -> Self {
        Self {
            weight: 0.,
            charge: 0.,
            i_cell: [0; D],
            delta: [0.; D],
            v: [0.; 3],
            e: [0.; 3],
            b: [0.; 3],
        }
    }
}

impl<const D: usize> Particle<D> {
    pub fn at(i_cell: Cell<D>) -> Self {
        Self {
            i_cell,
            ..Default::default()
        }
    }
}

impl<const D: usize> Located<D> for Particle<D> {
    fn cell(&self) -> Cell<D> {
        self.i_cell
    }
}

impl<const D: usize> Located<D> for Cell<D> {
    fn cell(&self) -> Cell<D> {
        *self
    }
}
