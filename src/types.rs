use std::ops::{Index, IndexMut};

/// Handle to an element in caller-owned storage.
///
/// The grid stores these instead of references, so the caller is free to
/// mutate (but not reorder) its elements between steps. Resolve a handle
/// against the same slice it was created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElementIdx(u32);

impl ElementIdx {
    pub fn new(idx: usize) -> Self {
        assert!(idx <= u32::MAX as usize, "Element index {idx} does not fit in 32 bits.");
        Self(idx as u32)
    }
    pub fn range(num_elements: usize) -> impl Iterator<Item = Self> + Clone {
        assert!(num_elements <= u32::MAX as usize);
        (0..num_elements as u32).map(Self)
    }
    pub fn get(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellIdx(usize);

impl CellIdx {
    pub fn new(idx: usize) -> Self {
        Self(idx)
    }
    pub fn get(self) -> usize {
        self.0
    }
}

/// A vector over cells.
/// Can only be indexed by `CellIdx`.
#[derive(Debug, Clone)]
pub struct CellVec<T>(Vec<T>);

impl<T> CellVec<T> {
    pub fn new_with(len: usize, f: impl FnMut() -> T) -> Self {
        let mut v = Vec::with_capacity(len);
        v.resize_with(len, f);
        Self(v)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.0.iter_mut()
    }
}

impl<T> Index<CellIdx> for CellVec<T> {
    type Output = T;

    fn index(&self, index: CellIdx) -> &Self::Output {
        &self.0[index.0]
    }
}

impl<T> IndexMut<CellIdx> for CellVec<T> {
    fn index_mut(&mut self, index: CellIdx) -> &mut Self::Output {
        &mut self.0[index.0]
    }
}
