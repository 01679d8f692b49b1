//! The padded universe grid.
//!
//! Interior cells live at `1..=width` x `1..=height`. A one-cell sentinel ring
//! surrounds them in every field so that one-step neighbor lookups never leave
//! the allocation. The ring holds [`BORDER`] and is never written after
//! allocation.

use crate::core::config::MIN_DIMENSION;
use crate::core::error::{AutomatonError, Result};
use crate::core::types::{FieldKind, Position, BORDER, UNTIMED};
use crate::grid::cell::Slot;
use crate::grid::field::DoubleBuffered;

/// Universe grid with four double-buffered cell fields
#[derive(Debug, Clone)]
pub struct Grid {
    width: i32,
    height: i32,
    value: DoubleBuffered<i32>,
    color: DoubleBuffered<i32>,
    lifetime: DoubleBuffered<i32>,
    direction: DoubleBuffered<i32>,
    stalled: bool,
}

impl Grid {
    /// Allocate a `width` x `height` universe with default interior cells
    pub fn new(width: i32, height: i32) -> Result<Self> {
        if width < MIN_DIMENSION || height < MIN_DIMENSION {
            return Err(AutomatonError::InvalidDimensions { width, height });
        }

        let len = (width as usize + 2) * (height as usize + 2);
        let mut grid = Self {
            width,
            height,
            value: DoubleBuffered::new(len, 0),
            color: DoubleBuffered::new(len, 0),
            lifetime: DoubleBuffered::new(len, UNTIMED),
            direction: DoubleBuffered::new(len, 0),
            stalled: false,
        };
        grid.paint_border();
        Ok(grid)
    }

    /// Reallocate every buffer at a new size. All cell state is lost.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        *self = Grid::new(width, height)?;
        Ok(())
    }

    fn paint_border(&mut self) {
        let stride = self.width + 2;
        let rows = self.height + 2;
        for y in 0..rows {
            for x in 0..stride {
                if x == 0 || y == 0 || x == stride - 1 || y == rows - 1 {
                    let idx = (y * stride + x) as usize;
                    for field in self.fields_mut() {
                        field.set_both(idx, BORDER);
                    }
                }
            }
        }
    }

    fn fields_mut(&mut self) -> [&mut DoubleBuffered<i32>; 4] {
        [
            &mut self.value,
            &mut self.color,
            &mut self.lifetime,
            &mut self.direction,
        ]
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of interior cells
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// True if `pos` lies anywhere in the padded index space
    #[inline]
    pub fn in_padded(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.x <= self.width + 1 && pos.y >= 0 && pos.y <= self.height + 1
    }

    #[inline]
    pub fn is_interior(&self, pos: Position) -> bool {
        pos.x >= 1 && pos.x <= self.width && pos.y >= 1 && pos.y <= self.height
    }

    /// Linear index of `pos`.
    ///
    /// Panics if `pos` is outside the padded index space.
    #[inline]
    pub fn index_of(&self, pos: Position) -> usize {
        assert!(
            self.in_padded(pos),
            "coordinate {} outside {}x{} grid",
            pos,
            self.width,
            self.height
        );
        (pos.y * (self.width + 2) + pos.x) as usize
    }

    /// Border or interior, with the current value
    #[inline]
    pub fn slot(&self, pos: Position) -> Slot {
        if self.is_interior(pos) {
            Slot::Interior(self.value(pos))
        } else {
            assert!(self.in_padded(pos), "coordinate {} outside the grid", pos);
            Slot::Border
        }
    }

    /// Interior positions in row-major order (`y` outer, `x` inner)
    pub fn interior(&self) -> impl Iterator<Item = Position> {
        let (w, h) = (self.width, self.height);
        (1..=h).flat_map(move |y| (1..=w).map(move |x| Position::new(x, y)))
    }

    fn interior_indices(&self) -> impl Iterator<Item = usize> {
        let stride = self.width + 2;
        self.interior().map(move |p| (p.y * stride + p.x) as usize)
    }

    fn field(&self, kind: FieldKind) -> &DoubleBuffered<i32> {
        match kind {
            FieldKind::Value => &self.value,
            FieldKind::Color => &self.color,
            FieldKind::Lifetime => &self.lifetime,
            FieldKind::Direction => &self.direction,
        }
    }

    fn field_mut(&mut self, kind: FieldKind) -> &mut DoubleBuffered<i32> {
        match kind {
            FieldKind::Value => &mut self.value,
            FieldKind::Color => &mut self.color,
            FieldKind::Lifetime => &mut self.lifetime,
            FieldKind::Direction => &mut self.direction,
        }
    }

    fn writable_index(&self, pos: Position) -> usize {
        assert!(
            self.is_interior(pos),
            "write to {} outside the interior of a {}x{} grid",
            pos,
            self.width,
            self.height
        );
        self.index_of(pos)
    }

    /// Current value of a field. Border positions read [`BORDER`].
    #[inline]
    pub fn get(&self, kind: FieldKind, pos: Position) -> i32 {
        self.field(kind).get(self.index_of(pos))
    }

    /// Write the current copy of an interior cell
    #[inline]
    pub fn set(&mut self, kind: FieldKind, pos: Position, v: i32) {
        let idx = self.writable_index(pos);
        self.field_mut(kind).set(idx, v);
    }

    /// Pending value of a field for the generation being computed
    #[inline]
    pub fn next(&self, kind: FieldKind, pos: Position) -> i32 {
        self.field(kind).next(self.index_of(pos))
    }

    /// Write the scratch copy of an interior cell
    #[inline]
    pub fn set_next(&mut self, kind: FieldKind, pos: Position, v: i32) {
        let idx = self.writable_index(pos);
        self.field_mut(kind).set_next(idx, v);
    }

    #[inline]
    pub fn value(&self, pos: Position) -> i32 {
        self.get(FieldKind::Value, pos)
    }

    #[inline]
    pub fn set_value(&mut self, pos: Position, v: i32) {
        self.set(FieldKind::Value, pos, v);
    }

    #[inline]
    pub fn lifetime(&self, pos: Position) -> i32 {
        self.get(FieldKind::Lifetime, pos)
    }

    #[inline]
    pub fn set_lifetime(&mut self, pos: Position, v: i32) {
        self.set(FieldKind::Lifetime, pos, v);
    }

    #[inline]
    pub fn direction(&self, pos: Position) -> i32 {
        self.get(FieldKind::Direction, pos)
    }

    #[inline]
    pub fn set_direction(&mut self, pos: Position, v: i32) {
        self.set(FieldKind::Direction, pos, v);
    }

    /// Copy current interior state of `kinds` into their scratch copies, so a
    /// rule can rewrite only the cells it touches
    pub fn stage(&mut self, kinds: &[FieldKind]) {
        let indices: Vec<usize> = self.interior_indices().collect();
        for &kind in kinds {
            self.field_mut(kind).stage(indices.iter().copied());
        }
    }

    /// Promote `next` to `current` for `kinds` over the interior.
    ///
    /// The stall flag is set iff no interior value changed.
    pub fn commit_generation(&mut self, kinds: &[FieldKind]) {
        let indices: Vec<usize> = self.interior_indices().collect();
        let mut value_changed = false;
        for &kind in kinds {
            let changed = self.field_mut(kind).commit(indices.iter().copied());
            if kind == FieldKind::Value {
                value_changed = changed;
            }
        }
        self.stalled = !value_changed;
    }

    /// Promote value and lifetime; stalled iff no living timed entity remains
    pub fn commit_living(&mut self) {
        let indices: Vec<usize> = self.interior_indices().collect();
        let any_living = indices
            .iter()
            .any(|&idx| (0..UNTIMED).contains(&self.lifetime.next(idx)));
        self.value.commit(indices.iter().copied());
        self.lifetime.commit(indices.iter().copied());
        self.stalled = !any_living;
    }

    /// True iff the most recent generation produced no observable change
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    pub fn set_stalled(&mut self, stalled: bool) {
        self.stalled = stalled;
    }

    /// Count interior cells whose current value satisfies `pred`
    pub fn count_values(&self, pred: impl Fn(i32) -> bool) -> usize {
        self.interior_indices()
            .filter(|&idx| pred(self.value.get(idx)))
            .count()
    }

    /// Interior positions whose value is empty
    pub fn empty_cells(&self) -> Vec<Position> {
        self.interior().filter(|&p| self.value(p) == 0).collect()
    }
}
