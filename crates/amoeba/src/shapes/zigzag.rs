//! Zig-zag arms: a single wave and a double-height wave.

use super::{backfill, cycled_arm, ShapeRule, SEED};
use crate::cell::Offset;

const BACKFILL_HALF_WIDTH: i32 = 24;

/// `(row, advance column afterwards)`; covers four columns per cycle.
const SINGLE_WAVE: [(i32, bool); 8] = [
    (1, false),
    (2, false),
    (3, true),
    (1, false),
    (0, true),
    (0, true),
    (0, false),
    (1, true),
];

/// Swings down to row 5 and back; covers six columns per cycle.
const DOUBLE_WAVE: [(i32, bool); 14] = [
    (1, false),
    (2, false),
    (3, true),
    (3, false),
    (4, false),
    (5, true),
    (3, false),
    (2, false),
    (1, true),
    (1, false),
    (0, true),
    (0, true),
    (0, false),
    (1, true),
];

#[derive(Debug)]
pub struct ZigZag;

impl ShapeRule for ZigZag {
    fn spine(&self) -> Box<dyn Iterator<Item = Offset>> {
        Box::new(
            SEED.into_iter()
                .chain(cycled_arm(&SINGLE_WAVE, 2))
                .chain(backfill(BACKFILL_HALF_WIDTH)),
        )
    }
}

#[derive(Debug)]
pub struct DoubleZigZag;

impl ShapeRule for DoubleZigZag {
    fn spine(&self) -> Box<dyn Iterator<Item = Offset>> {
        Box::new(
            SEED.into_iter()
                .chain(cycled_arm(&DOUBLE_WAVE, 2))
                .chain(backfill(BACKFILL_HALF_WIDTH)),
        )
    }
}
