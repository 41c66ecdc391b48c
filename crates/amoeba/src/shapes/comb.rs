//! Comb: 6-tall teeth joined by a hooked bridge, climbing three rows every
//! four columns.

use super::{backfill, within_arm_limit, ShapeRule, SEED};
use crate::cell::Offset;

const BACKFILL_HALF_WIDTH: i32 = 16;

/// One tooth relative to its base; the next base is `(-3, +4)` away.
const TOOTH: [Offset; 11] = [
    Offset::new(0, 0),
    Offset::new(1, 0),
    Offset::new(2, 0),
    Offset::new(-1, 0),
    Offset::new(-2, 0),
    Offset::new(-3, 0),
    Offset::new(-3, 1),
    Offset::new(-4, 1),
    Offset::new(-4, 2),
    Offset::new(-4, 3),
    Offset::new(-3, 3),
];

#[derive(Debug)]
pub struct Comb;

impl ShapeRule for Comb {
    fn spine(&self) -> Box<dyn Iterator<Item = Offset>> {
        let teeth = (0..)
            .flat_map(|k| {
                let base = Offset::new(1 - 3 * k, 2 + 4 * k);
                TOOTH.iter().map(move |&t| base.plus(t))
            })
            .take_while(within_arm_limit);
        Box::new(SEED.into_iter().chain(teeth).chain(backfill(BACKFILL_HALF_WIDTH)))
    }
}
