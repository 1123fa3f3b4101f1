//! Structure-of-arrays particle storage.
//!
//! Individual particles are accessed through `(array, index)` views instead
//! of materialized proxies, so a view never outlives or aliases its array.
use itertools::Itertools;

use crate::{
    particle::{Located, Particle},
    shape::{Cell, Shape},
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleArray<const D: usize> {
    weight: Vec<f64>,
    charge: Vec<f64>,
    i_cell: Vec<Cell<D>>,
    delta: Vec<[f64; D]>,
    v: Vec<[f64; 3]>,
    e: Vec<[f64; 3]>,
    b: Vec<[f64; 3]>,
}

impl<const D: usize> ParticleArray<D> {
    pub fn new() -> Self {
        Self {
            weight: vec![],
            charge: vec![],
            i_cell: vec![],
            delta: vec![],
            v: vec![],
            e: vec![],
            b: vec![],
        }
    }

    pub fn len(&self) -> usize {
        self.i_cell.len()
    }

    pub fn is_empty(&self) -> bool {
        self.i_cell.is_empty()
    }

    pub fn push(&mut self, p: Particle<D>) {
        self.weight.push(p.weight);
        self.charge.push(p.charge);
        self.i_cell.push(p.i_cell);
        self.delta.push(p.delta);
        self.v.push(p.v);
        self.e.push(p.e);
        self.b.push(p.b);
    }

    pub fn get(&self, index: usize) -> ParticleRef<'_, D> {
        assert!(index < self.len(), "Index {index} out of bounds.");
        ParticleRef { array: self, index }
    }

    pub fn get_mut(&mut self, index: usize) -> ParticleMut<'_, D> {
        assert!(index < self.len(), "Index {index} out of bounds.");
        ParticleMut { array: self, index }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = ParticleRef<'_, D>> + '_ {
        (0..self.len()).map(move |index| ParticleRef { array: self, index })
    }

    /// The cell column, for building a grid without materializing particles.
    pub fn cells(&self) -> &[Cell<D>] {
        &self.i_cell
    }

    pub fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.weight.swap(a, b);
        self.charge.swap(a, b);
        self.i_cell.swap(a, b);
        self.delta.swap(a, b);
        self.v.swap(a, b);
        self.e.swap(a, b);
        self.b.swap(a, b);
    }

    /// Stable sort of all particles by the flattened index of their cell.
    pub fn sort_by_cell(&mut self, shape: &Shape<D>) {
        let mut order = (0..self.len()).collect_vec();
        radsort::sort_by_key(&mut order, |&i| shape.flatten(&self.i_cell[i]).get() as u64);

        permute(&mut self.weight, &order);
        permute(&mut self.charge, &order);
        permute(&mut self.i_cell, &order);
        permute(&mut self.delta, &order);
        permute(&mut self.v, &order);
        permute(&mut self.e, &order);
        permute(&mut self.b, &order);
    }

    pub fn to_particles(&self) -> Vec<Particle<D>> {
        self.iter().map(|p| p.to_particle()).collect()
    }
}

fn permute<T: Copy>(column: &mut Vec<T>, order: &[usize]) {
    *column = order.iter().map(|&i| column[i]).collect();
}

impl<const D: usize> FromIterator<Particle<D>> for ParticleArray<D> {
    fn from_iter<I: IntoIterator<Item = Particle<D>>>(iter: I) -> Self {
        let mut array = Self::new();
        for p in iter {
            array.push(p);
        }
        array
    }
}

/// Read-only view of one particle.
#[derive(Clone, Copy)]
pub struct ParticleRef<'a, const D: usize> {
    array: &'a ParticleArray<D>,
    index: usize,
}

impl<'a, const D: usize> ParticleRef<'a, D> {
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn weight(&self) -> f64 {
        self.array.weight[self.index]
    }
    pub fn charge(&self) -> f64 {
        self.array.charge[self.index]
    }
    pub fn i_cell(&self) -> Cell<D> {
        self.array.i_cell[self.index]
    }
    pub fn delta(&self) -> [f64; D] {
        self.array.delta[self.index]
    }
    pub fn v(&self) -> [f64; 3] {
        self.array.v[self.index]
    }
    pub fn e(&self) -> [f64; 3] {
        self.array.e[self.index]
    }
    pub fn b(&self) -> [f64; 3] {
        self.array.b[self.index]
    }

    pub fn to_particle(&self) -> Particle<D> {
        Particle {
            weight: self.weight(),
            charge: self.charge(),
            i_cell: self.i_cell(),
            delta: self.delta(),
            v: self.v(),
            e: self.e(),
            b: self.b(),
        }
    }
}

impl<'a, const D: usize> Located<D> for ParticleRef<'a, D> {
    fn cell(&self) -> Cell<D> {
        self.i_cell()
    }
}

/// Mutable view of one particle.
pub struct ParticleMut<'a, const D: usize> {
    array: &'a mut ParticleArray<D>,
    index: usize,
}

impl<'a, const D: usize> ParticleMut<'a, D> {
    pub fn i_cell(&mut self) -> &mut Cell<D> {
        &mut self.array.i_cell[self.index]
    }
    pub fn delta(&mut self) -> &mut [f64; D] {
        &mut self.array.delta[self.index]
    }
    pub fn v(&mut self) -> &mut [f64; 3] {
        &mut self.array.v[self.index]
    }
    pub fn e(&mut self) -> &mut [f64; 3] {
        &mut self.array.e[self.index]
    }
    pub fn b(&mut self) -> &mut [f64; 3] {
        &mut self.array.b[self.index]
    }

    /// Overwrite every field.
    pub fn set(&mut self, p: Particle<D>) {
        let i = self.index;
        self.array.weight[i] = p.weight;
        self.array.charge[i] = p.charge;
        self.array.i_cell[i] = p.i_cell;
        self.array.delta[i] = p.delta;
        self.array.v[i] = p.v;
        self.array.e[i] = p.e;
        self.array.b[i] = p.b;
    }
}
