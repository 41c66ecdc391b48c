//! Target silhouettes, one growth rule per shape id.
//!
//! Every rule describes only the right half of its silhouette as a *spine*:
//! an endless sequence of offsets with `col >= 0`, each orthogonally adjacent
//! to an earlier one. [`ShapeRule::generate`] mirrors the spine about the row
//! axis and keeps the first `count` unique offsets, so any silhouette is a
//! prefix of the next larger one.

mod branching;
mod comb;
mod diamond;
mod staircase;
mod wide_chevron;
mod zigzag;

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cell::{Cell, Offset};
use crate::error::AgentError;
use crate::{Grid, MAP_CELLS, MAP_DIM};

/// Discriminants are the ids the harness passes in; do not reorder.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeId {
    Staircase = 0,
    ZigZag = 1,
    DoubleZigZag = 2,
    Comb = 3,
    WideChevron = 4,
    BranchingChevron = 5,
    Diamond = 6,
}

impl ShapeId {
    pub const ALL: [Self; 7] = [
        Self::Staircase,
        Self::ZigZag,
        Self::DoubleZigZag,
        Self::Comb,
        Self::WideChevron,
        Self::BranchingChevron,
        Self::Diamond,
    ];
}

impl TryFrom<u8> for ShapeId {
    type Error = AgentError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(id))
            .copied()
            .ok_or(AgentError::UnknownShape(id))
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Staircase => write!(f, "Staircase"),
            Self::ZigZag => write!(f, "ZigZag"),
            Self::DoubleZigZag => write!(f, "DoubleZigZag"),
            Self::Comb => write!(f, "Comb"),
            Self::WideChevron => write!(f, "WideChevron"),
            Self::BranchingChevron => write!(f, "BranchingChevron"),
            Self::Diamond => write!(f, "Diamond"),
        }
    }
}

/// Unique relative offsets in growth order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Silhouette {
    offsets: Vec<Offset>,
}

impl Silhouette {
    #[must_use]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    #[must_use]
    pub fn offsets(&self) -> &[Offset] {
        &self.offsets
    }

    #[must_use]
    pub fn contains(&self, offset: Offset) -> bool {
        self.offsets.contains(&offset)
    }

    /// Same silhouette with rows and columns swapped.
    #[must_use]
    pub fn transposed(&self) -> Self {
        Self {
            offsets: self.offsets.iter().map(|o| o.transposed()).collect(),
        }
    }

    /// Absolute target cells with the origin placed on `center`.
    #[must_use]
    pub fn anchored(&self, center: Cell) -> Grid {
        self.offsets.iter().map(|&o| center.shifted(o)).collect()
    }
}

/// Keeps the first occurrence of each offset.
impl FromIterator<Offset> for Silhouette {
    fn from_iter<I: IntoIterator<Item = Offset>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        let offsets = iter.into_iter().filter(|o| seen.insert(*o)).collect();
        Self { offsets }
    }
}

/// A deterministic growth rule.
pub trait ShapeRule {
    /// Right half of the silhouette in priority order. Must never run dry.
    fn spine(&self) -> Box<dyn Iterator<Item = Offset>>;

    /// Exactly `count` unique offsets (capped at the map area).
    ///
    /// Each spine entry is followed by its mirror; when only one slot is left
    /// the mirror is dropped.
    fn generate(&self, count: usize) -> Silhouette {
        let count = count.min(MAP_CELLS);
        let mut seen = HashSet::with_capacity(count);
        let mut offsets = Vec::with_capacity(count);
        for offset in self.spine().flat_map(|o| [o, o.mirrored()]) {
            if offsets.len() == count {
                break;
            }
            if seen.insert(offset) {
                offsets.push(offset);
            }
        }
        Silhouette { offsets }
    }
}

/// Build the silhouette for `shape` holding `count` cells.
#[must_use]
pub fn generate(shape: ShapeId, count: usize) -> Silhouette {
    rule(shape).generate(count)
}

fn rule(shape: ShapeId) -> &'static dyn ShapeRule {
    match shape {
        ShapeId::Staircase => &staircase::Staircase,
        ShapeId::ZigZag => &zigzag::ZigZag,
        ShapeId::DoubleZigZag => &zigzag::DoubleZigZag,
        ShapeId::Comb => &comb::Comb,
        ShapeId::WideChevron => &wide_chevron::WideChevron,
        ShapeId::BranchingChevron => &branching::BranchingChevron,
        ShapeId::Diamond => &diamond::Diamond,
    }
}

/// Right half of `{(0,0), (0,±1), (1,±1)}`, the start of most rules.
const SEED: [Offset; 3] = [Offset::new(0, 0), Offset::new(0, 1), Offset::new(1, 1)];

/// Arms stay at or left of this column so `(i, j)` and `(i, -j)` never land
/// on the same torus cell.
const ARM_LIMIT: i32 = MAP_DIM as i32 / 2 - 1;

fn within_arm_limit(offset: &Offset) -> bool {
    offset.col <= ARM_LIMIT
}

/// Rows behind the origin, `half_width + 1` columns each, without end.
fn backfill(half_width: i32) -> impl Iterator<Item = Offset> {
    (1..).flat_map(move |depth| (0..=half_width).map(move |col| Offset::new(-depth, col)))
}

/// Arm driven by a repeating table of `(row, advance column afterwards)`.
fn cycled_arm(cycle: &'static [(i32, bool)], start_col: i32) -> impl Iterator<Item = Offset> {
    cycle
        .iter()
        .copied()
        .cycle()
        .scan(start_col, |col, (row, advance)| {
            let here = Offset::new(row, *col);
            if advance {
                *col += 1;
            }
            Some(here)
        })
        .take_while(within_arm_limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connectivity::is_connected;
    use proptest::prelude::*;

    fn arb_shape() -> impl Strategy<Value = ShapeId> {
        proptest::sample::select(ShapeId::ALL.to_vec())
    }

    fn as_set(silhouette: &Silhouette) -> HashSet<Offset> {
        silhouette.offsets().iter().copied().collect()
    }

    #[test]
    fn shape_ids_round_trip_through_u8() {
        for shape in ShapeId::ALL {
            assert_eq!(ShapeId::try_from(shape as u8).unwrap(), shape);
        }
        assert!(matches!(
            ShapeId::try_from(7),
            Err(AgentError::UnknownShape(7))
        ));
    }

    #[test]
    fn shape_display() {
        assert_eq!(format!("{}", ShapeId::BranchingChevron), "BranchingChevron");
        assert_eq!(format!("{}", ShapeId::ZigZag), "ZigZag");
    }

    #[test]
    fn seeded_rules_start_from_the_five_cell_seed() {
        let seed: HashSet<Offset> = [(0, 0), (0, 1), (0, -1), (1, 1), (1, -1)]
            .into_iter()
            .map(|(r, c)| Offset::new(r, c))
            .collect();
        for shape in [
            ShapeId::Staircase,
            ShapeId::ZigZag,
            ShapeId::DoubleZigZag,
            ShapeId::Comb,
            ShapeId::WideChevron,
            ShapeId::BranchingChevron,
        ] {
            assert_eq!(as_set(&generate(shape, 5)), seed, "{shape}");
        }
    }

    #[test]
    fn zero_count_is_empty() {
        for shape in ShapeId::ALL {
            assert!(generate(shape, 0).is_empty());
        }
    }

    #[test]
    fn odd_count_leaves_one_offset_unmirrored() {
        let silhouette = generate(ShapeId::Staircase, 6);
        assert_eq!(silhouette.len(), 6);
        assert_eq!(silhouette.offsets()[5], Offset::new(1, 2));
        assert!(!silhouette.contains(Offset::new(1, -2)));
    }

    #[test]
    fn transposed_swaps_every_offset() {
        let silhouette = generate(ShapeId::Comb, 30);
        let swapped = silhouette.transposed();
        for (a, b) in silhouette.offsets().iter().zip(swapped.offsets()) {
            assert_eq!(a.transposed(), *b);
        }
    }

    #[test]
    fn collected_silhouette_drops_repeats_in_order() {
        let silhouette: Silhouette = [(0, 0), (-1, 0), (0, 0), (1, 2), (-1, 0)]
            .into_iter()
            .map(|(r, c)| Offset::new(r, c))
            .collect();
        assert_eq!(
            silhouette.offsets(),
            &[Offset::new(0, 0), Offset::new(-1, 0), Offset::new(1, 2)]
        );
    }

    #[test]
    fn anchored_wraps_around_the_map() {
        let grid = generate(ShapeId::Staircase, 5).anchored(Cell::new(99, 0));
        assert_eq!(grid.len(), 5);
        assert!(grid.contains(Cell::new(99, 99)));
        assert!(grid.contains(Cell::new(0, 1)));
    }

    #[test]
    fn count_is_capped_at_map_area() {
        assert_eq!(generate(ShapeId::Diamond, MAP_CELLS + 50).len(), MAP_CELLS);
    }

    proptest! {
        #[test]
        fn prop_exact_count_with_origin(shape in arb_shape(), n in 1usize..1200) {
            let silhouette = generate(shape, n);
            prop_assert_eq!(silhouette.len(), n);
            prop_assert_eq!(as_set(&silhouette).len(), n);
            prop_assert!(silhouette.contains(Offset::origin()));
        }

        #[test]
        fn prop_growth_is_monotonic(shape in arb_shape(), n in 0usize..1200) {
            let small = generate(shape, n);
            let large = generate(shape, n + 1);
            prop_assert_eq!(large.offsets()[..n].to_vec(), small.offsets().to_vec());
        }

        #[test]
        fn prop_mirrored_except_for_the_newest(shape in arb_shape(), n in 1usize..1200) {
            let silhouette = generate(shape, n);
            let set = as_set(&silhouette);
            let newest = silhouette.offsets()[n - 1];
            for offset in silhouette.offsets() {
                if *offset != newest {
                    prop_assert!(set.contains(&offset.mirrored()), "{} lacks its mirror", offset);
                }
            }
        }

        #[test]
        fn prop_anchored_silhouette_is_connected(shape in arb_shape(), n in 1usize..1200) {
            let grid = generate(shape, n).anchored(Cell::new(50, 50));
            prop_assert_eq!(grid.len(), n);
            prop_assert!(is_connected(&grid));
        }
    }
}
