//! Double-buffered scalar field.
//!
//! One instance per cell field (value, color, lifetime, direction):
//! - `current` is what every reader sees during a generation
//! - `next` is write-only scratch that rules fill in
//! - `commit` promotes `next` to `current` over a set of indices in one step

/// A flat field of scalars with a current and a next copy
#[derive(Debug, Clone, PartialEq)]
pub struct DoubleBuffered<T: Copy + PartialEq> {
    current: Vec<T>,
    next: Vec<T>,
}

impl<T: Copy + PartialEq> DoubleBuffered<T> {
    /// Create a field of `len` cells, both copies filled with `fill`
    pub fn new(len: usize, fill: T) -> Self {
        Self {
            current: vec![fill; len],
            next: vec![fill; len],
        }
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> T {
        self.current[idx]
    }

    #[inline]
    pub fn set(&mut self, idx: usize, value: T) {
        self.current[idx] = value;
    }

    #[inline]
    pub fn next(&self, idx: usize) -> T {
        self.next[idx]
    }

    #[inline]
    pub fn set_next(&mut self, idx: usize, value: T) {
        self.next[idx] = value;
    }

    /// Write `value` into both copies
    pub fn set_both(&mut self, idx: usize, value: T) {
        self.current[idx] = value;
        self.next[idx] = value;
    }

    /// Seed the scratch copy from the current one before a partial rewrite
    pub fn stage<I: IntoIterator<Item = usize>>(&mut self, indices: I) {
        for idx in indices {
            self.next[idx] = self.current[idx];
        }
    }

    /// Copy `next` into `current` at `indices`.
    ///
    /// Returns true if any promoted cell changed.
    pub fn commit<I: IntoIterator<Item = usize>>(&mut self, indices: I) -> bool {
        let mut changed = false;
        for idx in indices {
            let incoming = self.next[idx];
            if self.current[idx] != incoming {
                changed = true;
                self.current[idx] = incoming;
            }
        }
        changed
    }

    /// Iterate the current copy
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.current.iter().copied()
    }
}
