//! Move legality: the organism must stay a single 4-connected component.

use crate::cell::Cell;
use crate::percept::TurnContext;
use crate::Grid;

/// Flood fill from the first present cell with an explicit stack.
///
/// An empty set is not an organism and is reported as disconnected.
#[must_use]
pub fn is_connected(cells: &Grid) -> bool {
    drains_as_one_component(cells.clone())
}

/// Consumes `cells` as the scratch visited-set; no second grid is needed.
fn drains_as_one_component(mut cells: Grid) -> bool {
    let Some(start) = cells.first() else {
        return false;
    };
    let total = cells.len();
    let mut reached = 0;
    cells.remove(start);
    let mut stack = vec![start];
    while let Some(cell) = stack.pop() {
        reached += 1;
        for n in cell.neighbors() {
            if cells.remove(n) {
                stack.push(n);
            }
        }
    }
    reached == total
}

/// Whether `cell` may be extended into once the organism has shrunk to
/// `body` (current occupancy minus the retracted cells).
///
/// The cell must be free, obstacle-free and next to a periphery cell that
/// stays put. When every cell is retracted nothing stays put, and the
/// supplied movable cells decide instead.
fn reachable(ctx: &TurnContext<'_>, body: &Grid, cell: Cell) -> bool {
    if ctx.occupancy().contains(cell) || ctx.is_obstacle(cell) {
        return false;
    }
    if body.is_empty() {
        return ctx.is_movable(cell);
    }
    cell.neighbors()
        .into_iter()
        .any(|n| ctx.is_periphery(n) && body.contains(n))
}

/// Every cell an extend may land on after `retracted` is vacated: the free
/// neighbours of the periphery cells that remain.
#[must_use]
pub fn movable_superset(ctx: &TurnContext<'_>, retracted: &Grid) -> Grid {
    let mut body = ctx.occupancy().clone();
    for cell in retracted.iter() {
        body.remove(cell);
    }
    let near_periphery = ctx.periphery().iter().flat_map(|c| c.neighbors());
    let supplied = ctx.movable().iter().filter(|_| body.is_empty());
    near_periphery
        .chain(supplied)
        .filter(|&c| reachable(ctx, &body, c))
        .collect()
}

/// Whether retracting `retracts` and extending into `extends` (paired by
/// position) is a legal move this turn.
///
/// Malformed proposals (unequal lengths, duplicates, retracts off the
/// periphery, extends outside the movable superset) are simply illegal.
#[must_use]
pub fn is_legal(ctx: &TurnContext<'_>, retracts: &[Cell], extends: &[Cell]) -> bool {
    if retracts.len() != extends.len() {
        return false;
    }

    let mut candidate = ctx.occupancy().clone();
    for &cell in retracts {
        if !ctx.is_periphery(cell) || !candidate.remove(cell) {
            return false;
        }
    }

    // extends are never periphery cells, so inserting them leaves the
    // surviving periphery seen by `reachable` unchanged
    for &cell in extends {
        if !reachable(ctx, &candidate, cell) || !candidate.insert(cell) {
            return false;
        }
    }

    drains_as_one_component(candidate)
}
