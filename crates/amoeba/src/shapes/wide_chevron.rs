//! Wide chevron: a steep staircase arm down to row 11, then a run of
//! Λ-shaped teeth along that row.
//!
//! Teeth start at the arm's last row and repeat at a fixed pitch, so they
//! tile without overlap and growth stays monotonic.

use super::{backfill, within_arm_limit, ShapeRule};
use crate::cell::Offset;

const BACKFILL_HALF_WIDTH: i32 = 11;

const fn o(row: i32, col: i32) -> Offset {
    Offset::new(row, col)
}

/// Right arm of the 35-cell chevron.
const CHEVRON: [Offset; 18] = [
    o(0, 0), o(0, 1), o(1, 1), o(1, 2), o(2, 2), o(3, 2),
    o(3, 3), o(4, 3), o(5, 3), o(5, 4), o(6, 4), o(7, 4),
    o(7, 5), o(8, 5), o(9, 5), o(9, 6), o(10, 6), o(11, 6),
];

/// Climbs eleven rows and comes back down, twelve columns across.
const TOOTH: [Offset; 35] = [
    o(0, 0), o(-1, 0), o(-2, 0), o(-2, 1), o(-3, 1), o(-4, 1), o(-4, 2),
    o(-5, 2), o(-6, 2), o(-6, 3), o(-7, 3), o(-8, 3), o(-8, 4), o(-9, 4),
    o(-10, 4), o(-10, 5), o(-11, 5), o(-11, 6), o(-11, 7), o(-10, 7), o(-10, 8),
    o(-9, 8), o(-8, 8), o(-8, 9), o(-7, 9), o(-6, 9), o(-6, 10), o(-5, 10),
    o(-4, 10), o(-4, 11), o(-3, 11), o(-2, 11), o(-2, 12), o(-1, 12), o(0, 12),
];

const TOOTH_PITCH: i32 = 13;

#[derive(Debug)]
pub struct WideChevron;

impl ShapeRule for WideChevron {
    fn spine(&self) -> Box<dyn Iterator<Item = Offset>> {
        let teeth = (0..)
            .flat_map(|k| {
                let base = o(11, 7 + TOOTH_PITCH * k);
                TOOTH.iter().map(move |&t| base.plus(t))
            })
            .take_while(within_arm_limit);
        Box::new(
            CHEVRON
                .into_iter()
                .chain(teeth)
                .chain(backfill(BACKFILL_HALF_WIDTH)),
        )
    }
}
