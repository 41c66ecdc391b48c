//! Greedy retract/extend matching toward an anchored silhouette.

use std::cmp::Ordering;

use crate::cell::Cell;
use crate::connectivity::is_legal;
use crate::percept::TurnContext;
use crate::shapes::Silhouette;

/// A move: `retracts[i]` vacates while `extends[i]` becomes occupied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Movement {
    pub retracts: Vec<Cell>,
    pub extends: Vec<Cell>,
}

impl Movement {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extends.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.extends.len()
    }

    /// `(retract, extend)` in wire order.
    pub fn pairs(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.retracts.iter().copied().zip(self.extends.iter().copied())
    }
}

/// Pair cells the organism should give up with cells it should grow into,
/// closest first, until the budget runs out.
///
/// Every accepted pair is checked together with all pairs accepted before it,
/// so the returned move as a whole is legal.
#[must_use]
pub fn plan(ctx: &TurnContext<'_>, silhouette: &Silhouette, center: Cell) -> Movement {
    let desired = silhouette.anchored(center);

    let mut retract_pool: Vec<Cell> = ctx
        .periphery()
        .iter()
        .copied()
        .filter(|c| !desired.contains(*c))
        .collect();
    let extend_pool: Vec<Cell> = desired
        .iter()
        .filter(|c| !ctx.occupancy().contains(*c) && ctx.is_movable(*c))
        .collect();

    let mut movement = Movement::default();
    for extend in extend_pool {
        if movement.len() >= ctx.budget() || retract_pool.is_empty() {
            break;
        }

        // stable: equal distances keep row-major order
        let mut ranked = retract_pool.clone();
        ranked.sort_by(|a, b| by_distance(a.distance(extend), b.distance(extend)));

        movement.extends.push(extend);
        let mut accepted = false;
        for retract in ranked {
            movement.retracts.push(retract);
            if is_legal(ctx, &movement.retracts, &movement.extends) {
                retract_pool.retain(|&c| c != retract);
                accepted = true;
                break;
            }
            movement.retracts.pop();
        }
        if !accepted {
            movement.extends.pop();
        }
    }
    movement
}

fn by_distance(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// Share of periphery cells lying outside the anchored silhouette.
#[must_use]
pub fn misplaced_fraction(ctx: &TurnContext<'_>, silhouette: &Silhouette, center: Cell) -> f64 {
    let periphery = ctx.periphery();
    if periphery.is_empty() {
        return 0.0;
    }
    let desired = silhouette.anchored(center);
    let misplaced = periphery.iter().filter(|c| !desired.contains(**c)).count();
    misplaced as f64 / periphery.len() as f64
}

#[must_use]
pub fn in_formation(
    ctx: &TurnContext<'_>,
    silhouette: &Silhouette,
    center: Cell,
    tolerance: f64,
) -> bool {
    misplaced_fraction(ctx, silhouette, center) <= tolerance
}
