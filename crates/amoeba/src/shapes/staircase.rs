//! Staircase: 3-tall columns, each starting two rows below the previous one,
//! followed by a compact block behind the origin.
//!
//! The block width is fixed rather than derived from the cells left over,
//! so every silhouette is a prefix of the next larger one.

use super::{backfill, ShapeRule, ARM_LIMIT, SEED};
use crate::cell::Offset;

const BACKFILL_HALF_WIDTH: i32 = 5;

#[derive(Debug)]
pub struct Staircase;

impl ShapeRule for Staircase {
    fn spine(&self) -> Box<dyn Iterator<Item = Offset>> {
        let arm = (2..=ARM_LIMIT).flat_map(|col| {
            let top = 2 * col - 3;
            (top..top + 3).map(move |row| Offset::new(row, col))
        });
        Box::new(SEED.into_iter().chain(arm).chain(backfill(BACKFILL_HALF_WIDTH)))
    }
}
