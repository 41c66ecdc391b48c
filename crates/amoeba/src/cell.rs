//! Cell and Offset types for the toroidal map.

use std::fmt;

use crate::MAP_DIM;

/// Absolute map coordinate. Both components are always in `0..MAP_DIM`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Cell {
    pub row: u8,
    pub col: u8,
}

/// Relative `(row, col)` displacement from an implicit origin.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Offset {
    pub row: i32,
    pub col: i32,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:+}, {:+})", self.row, self.col)
    }
}

/// Reduce any integer coordinate onto the map.
#[must_use]
pub fn wrap(value: i32) -> u8 {
    value.rem_euclid(MAP_DIM as i32) as u8
}

impl Cell {
    /// Build a cell from arbitrary integers, wrapping both axes.
    #[must_use]
    pub fn new(row: i32, col: i32) -> Self {
        Self {
            row: wrap(row),
            col: wrap(col),
        }
    }

    /// Row-major index into a `MAP_DIM * MAP_DIM` buffer.
    #[must_use]
    pub fn index(self) -> usize {
        self.row as usize * MAP_DIM + self.col as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self {
            row: (index / MAP_DIM) as u8,
            col: (index % MAP_DIM) as u8,
        }
    }

    #[must_use]
    pub fn north(self) -> Self {
        self.shifted(Offset::new(-1, 0))
    }

    #[must_use]
    pub fn south(self) -> Self {
        self.shifted(Offset::new(1, 0))
    }

    #[must_use]
    pub fn west(self) -> Self {
        self.shifted(Offset::new(0, -1))
    }

    #[must_use]
    pub fn east(self) -> Self {
        self.shifted(Offset::new(0, 1))
    }

    /// Orthogonal neighbours in west, east, north, south order.
    #[must_use]
    pub fn neighbors(self) -> [Self; 4] {
        [self.west(), self.east(), self.north(), self.south()]
    }

    #[must_use]
    pub fn shifted(self, offset: Offset) -> Self {
        Self::new(
            i32::from(self.row) + offset.row,
            i32::from(self.col) + offset.col,
        )
    }

    /// Euclidean distance along the shortest wrapped path.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        let dr = axis_delta(self.row, other.row);
        let dc = axis_delta(self.col, other.col);
        f64::from(dr).hypot(f64::from(dc))
    }
}

fn axis_delta(a: u8, b: u8) -> i32 {
    let d = (i32::from(a) - i32::from(b)).abs();
    d.min(MAP_DIM as i32 - d)
}

impl Offset {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    #[must_use]
    pub const fn origin() -> Self {
        Self::new(0, 0)
    }

    /// Reflection about the row axis.
    #[must_use]
    pub const fn mirrored(self) -> Self {
        Self::new(self.row, -self.col)
    }

    /// Swap the two components.
    #[must_use]
    pub const fn transposed(self) -> Self {
        Self::new(self.col, self.row)
    }

    #[must_use]
    pub const fn plus(self, other: Self) -> Self {
        Self::new(self.row + other.row, self.col + other.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn north_of_top_row_wraps_to_bottom() {
        assert_eq!(Cell::new(0, 0).north(), Cell::new(99, 0));
    }

    #[test]
    fn west_of_left_column_wraps_to_right() {
        assert_eq!(Cell::new(0, 0).west(), Cell::new(0, 99));
    }

    #[test]
    fn south_and_east_wrap_at_far_edges() {
        assert_eq!(Cell::new(99, 99).south(), Cell::new(0, 99));
        assert_eq!(Cell::new(99, 99).east(), Cell::new(99, 0));
    }

    #[test]
    fn new_wraps_negative_and_large_values() {
        assert_eq!(Cell::new(-1, 100), Cell { row: 99, col: 0 });
        assert_eq!(Cell::new(-201, 305), Cell { row: 99, col: 5 });
    }

    #[test]
    fn distance_uses_shortest_wrapped_path() {
        let a = Cell::new(0, 0);
        assert!((a.distance(Cell::new(99, 0)) - 1.0).abs() < f64::EPSILON);
        assert!((a.distance(Cell::new(3, 96)) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn offset_mirror_and_transpose() {
        let o = Offset::new(3, -2);
        assert_eq!(o.mirrored(), Offset::new(3, 2));
        assert_eq!(o.transposed(), Offset::new(-2, 3));
        assert_eq!(o.plus(Offset::new(1, 1)), Offset::new(4, -1));
    }

    #[test]
    fn display_formats() {
        assert_eq!(format!("{}", Cell::new(4, 7)), "(4, 7)");
        assert_eq!(format!("{}", Offset::new(-1, 2)), "(-1, +2)");
    }

    proptest! {
        #[test]
        fn prop_index_round_trip(row in 0i32..100, col in 0i32..100) {
            let cell = Cell::new(row, col);
            prop_assert_eq!(Cell::from_index(cell.index()), cell);
        }

        #[test]
        fn prop_opposite_steps_cancel(row in any::<i16>(), col in any::<i16>()) {
            let cell = Cell::new(i32::from(row), i32::from(col));
            prop_assert_eq!(cell.north().south(), cell);
            prop_assert_eq!(cell.west().east(), cell);
        }

        #[test]
        fn prop_neighbors_are_at_unit_distance(row in 0i32..100, col in 0i32..100) {
            let cell = Cell::new(row, col);
            for n in cell.neighbors() {
                prop_assert!((cell.distance(n) - 1.0).abs() < f64::EPSILON);
            }
        }
    }
}
