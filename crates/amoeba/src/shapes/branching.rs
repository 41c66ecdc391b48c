//! Branching chevron: the deployed shape.
//!
//! One chevron arm plus nine copies stepped by `(6, 5)`, each copy hanging off
//! the tail of the previous one. Past 239 cells the arms thicken with storage
//! lobes laid one row behind the previous layer.

use super::ShapeRule;
use crate::cell::Offset;

const fn o(row: i32, col: i32) -> Offset {
    Offset::new(row, col)
}

const ARM: [Offset; 12] = [
    o(0, 0), o(0, 1), o(1, 1), o(1, 2), o(2, 2), o(3, 2),
    o(3, 3), o(4, 3), o(5, 3), o(5, 4), o(6, 4), o(7, 4),
];

/// Sits directly behind the arm cells at rows 0, 0, 1, 3, 5.
const LOBE: [Offset; 5] = [o(0, 0), o(0, 1), o(1, 2), o(3, 3), o(5, 4)];

const BRANCH_STEP: Offset = o(6, 5);

/// Arm copies that fit before column 50.
const BRANCHES: i32 = 10;

fn branch_base(k: i32) -> Offset {
    o(BRANCH_STEP.row * k, BRANCH_STEP.col * k)
}

#[derive(Debug)]
pub struct BranchingChevron;

impl ShapeRule for BranchingChevron {
    fn spine(&self) -> Box<dyn Iterator<Item = Offset>> {
        let arms = (0..BRANCHES).flat_map(|k| {
            let base = branch_base(k);
            ARM.iter().map(move |&a| base.plus(a))
        });
        let lobes = (1..).flat_map(|layer| {
            (0..BRANCHES).flat_map(move |k| {
                let base = branch_base(k).plus(o(-layer, 0));
                LOBE.iter().map(move |&l| base.plus(l))
            })
        });
        Box::new(arms.chain(lobes))
    }
}
