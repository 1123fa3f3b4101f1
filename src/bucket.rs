/// An unrolled linked list: a growable chain of fixed-size buckets.
///
/// Buckets are never freed by `reset`, so a chain can be refilled every
/// simulation step without touching the allocator once it has grown to its
/// steady-state size.
#[derive(Debug, Clone)]
pub struct BucketChain<T, const B: usize> {
    buckets: Vec<[T; B]>,
    /// Index of the bucket currently being filled.
    bucket_idx: usize,
    /// Number of used slots in the current bucket.
    curr: usize,
}

impl<T: Copy + Default, const B: usize> Default for BucketChain<T, B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + Default, const B: usize> BucketChain<T, B> {
    pub fn new() -> Self {
        assert!(B > 0, "Bucket size must be positive.");
        Self {
            buckets: vec![[T::default(); B]],
            bucket_idx: 0,
            curr: 0,
        }
    }

    pub fn add(&mut self, t: T) {
        if self.curr == B {
            self.bucket_idx += 1;
            self.curr = 0;
            // Buckets retained from before a reset are reused.
            if self.bucket_idx == self.buckets.len() {
                self.buckets.push([T::default(); B]);
            }
        }
        self.buckets[self.bucket_idx][self.curr] = t;
        self.curr += 1;
    }

    /// Number of added elements.
    pub fn total(&self) -> usize {
        B * self.bucket_idx + self.curr
    }

    /// Number of allocated slots; an upper bound on `total`.
    pub fn capacity(&self) -> usize {
        self.buckets.len() * B
    }

    /// Forget all elements but keep the buckets.
    pub fn reset(&mut self) {
        self.bucket_idx = 0;
        self.curr = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.bucket_idx == 0 && self.curr == 0
    }

    /// Elements in insertion order.
    pub fn iter(&self) -> Iter<'_, T, B> {
        Iter {
            chain: self,
            bucket: 0,
            pos: 0,
            remaining: self.total(),
        }
    }
}

impl<'c, T: Copy + Default, const B: usize> IntoIterator for &'c BucketChain<T, B> {
    type Item = T;
    type IntoIter = Iter<'c, T, B>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct Iter<'c, T, const B: usize> {
    chain: &'c BucketChain<T, B>,
    bucket: usize,
    pos: usize,
    remaining: usize,
}

impl<'c, T: Copy, const B: usize> Iterator for Iter<'c, T, B> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.remaining == 0 {
            return None;
        }
        let t = self.chain.buckets[self.bucket][self.pos];
        self.remaining -= 1;
        self.pos += 1;
        if self.pos == B {
            self.bucket += 1;
            self.pos = 0;
        }
        Some(t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'c, T: Copy, const B: usize> ExactSizeIterator for Iter<'c, T, B> {}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn count_and_order() {
        for n in [0, 1, 3, 4, 5, 16, 17, 100] {
            let mut chain = BucketChain::<u32, 4>::new();
            for i in 0..n {
                chain.add(i);
            }
            assert_eq!(chain.total(), n as usize);
            assert_eq!(chain.iter().collect_vec(), (0..n).collect_vec());
            assert!(chain.capacity() >= chain.total());
            assert_eq!(chain.is_empty(), n == 0);
        }
    }

    #[test]
    fn bucket_boundary() {
        const B: usize = 8;
        let mut chain = BucketChain::<usize, B>::new();
        for i in 0..B {
            chain.add(i);
        }
        assert_eq!(chain.total(), B);
        assert_eq!(chain.capacity(), B);
        chain.add(B);
        assert_eq!(chain.total(), B + 1);
        assert_eq!(chain.capacity(), 2 * B);
        assert_eq!(chain.iter().collect_vec(), (0..=B).collect_vec());
    }

    #[test]
    fn reset_keeps_capacity() {
        let mut chain = BucketChain::<u64, 3>::new();
        for i in 0..10 {
            chain.add(i);
        }
        let capacity = chain.capacity();
        assert_eq!(capacity, 12);
        chain.reset();
        assert!(chain.is_empty());
        assert_eq!(chain.total(), 0);
        assert_eq!(chain.capacity(), capacity);
        assert_eq!(chain.iter().count(), 0);

        // Refilling reuses the retained buckets and sees no stale values.
        for i in 100..107 {
            chain.add(i);
        }
        assert_eq!(chain.capacity(), capacity);
        assert_eq!(chain.iter().collect_vec(), (100..107).collect_vec());
    }

    #[test]
    fn iteration_is_restartable() {
        let mut chain = BucketChain::<u8, 2>::new();
        chain.add(1);
        chain.add(2);
        chain.add(3);
        let first = chain.iter().collect_vec();
        let second = (&chain).into_iter().collect_vec();
        assert_eq!(first, second);
        assert_eq!(chain.iter().len(), 3);
    }
}
