//! Turn planner for a single-celled organism on a toroidal grid.
//!
//! Each turn the agent receives the occupancy map, periphery, obstacles and
//! reachable cells, plus one byte of memory from the previous turn, and answers
//! with paired retract/extend cells that keep the organism in one piece.

pub mod agent;
pub mod cell;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod morph;
pub mod percept;
pub mod phase;
pub mod shapes;

#[cfg(test)]
mod scenarios_test;

pub use agent::{Agent, Decision};
pub use cell::{Cell, Offset};
pub use config::AgentConfig;
pub use error::{AgentError, AgentResult};
pub use morph::Movement;
pub use percept::{Percept, TurnContext};
pub use phase::{Memory, Orientation, Phase};
pub use shapes::{ShapeId, Silhouette};

use wasm_bindgen::prelude::*;

/// Side length of the square map. All coordinate arithmetic is modulo this.
pub const MAP_DIM: usize = 100;

pub const MAP_CELLS: usize = MAP_DIM * MAP_DIM;

/// Boolean field over the whole map, used as a set of cells.
///
/// Indexing wraps on both axes; there is no out-of-bounds.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    cells: Vec<bool>,
    population: usize,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![false; MAP_CELLS],
            population: 0,
        }
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells[cell.index()]
    }

    /// Wrapping lookup by raw coordinates.
    #[must_use]
    pub fn get(&self, row: i32, col: i32) -> bool {
        self.contains(Cell::new(row, col))
    }

    /// Returns `true` if the cell was not already present.
    pub fn insert(&mut self, cell: Cell) -> bool {
        let slot = &mut self.cells[cell.index()];
        if *slot {
            return false;
        }
        *slot = true;
        self.population += 1;
        true
    }

    /// Returns `true` if the cell was present.
    pub fn remove(&mut self, cell: Cell) -> bool {
        let slot = &mut self.cells[cell.index()];
        if !*slot {
            return false;
        }
        *slot = false;
        self.population -= 1;
        true
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.population
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.population == 0
    }

    /// Present cells in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &present)| present)
            .map(|(i, _)| Cell::from_index(i))
    }

    #[must_use]
    pub fn first(&self) -> Option<Cell> {
        self.iter().next()
    }
}

impl FromIterator<Cell> for Grid {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        let mut grid = Self::new();
        grid.extend(iter);
        grid
    }
}

impl Extend<Cell> for Grid {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        for cell in iter {
            self.insert(cell);
        }
    }
}

/// JS-facing handle around [`Agent`].
///
/// Coordinates cross the boundary as flat `row, col` byte pairs; the map is
/// 10000 bytes, row-major, non-zero meaning occupied.
#[wasm_bindgen]
#[derive(Debug)]
pub struct AmoebaAgent {
    agent: Agent,
}

#[wasm_bindgen]
impl AmoebaAgent {
    #[wasm_bindgen(constructor)]
    pub fn new(goal_size: usize, metabolism: f64, shape: u8) -> Result<AmoebaAgent, JsError> {
        let config = AgentConfig {
            goal_size,
            metabolism,
            shape: ShapeId::try_from(shape)?,
            ..AgentConfig::default()
        };
        Ok(Self {
            agent: Agent::new(config)?,
        })
    }

    /// Plan one turn. Returns `[memory, r0, c0, e0r, e0c, r1, c1, ...]`.
    pub fn step(
        &self,
        occupancy: &[u8],
        periphery: &[u8],
        bacteria: &[u8],
        movable: &[u8],
        memory: u8,
    ) -> Result<Vec<u8>, JsError> {
        let percept = Percept::from_flat(occupancy, periphery, bacteria, movable)?;
        let decision = self.agent.turn(None, &percept, memory)?;
        Ok(decision.to_bytes())
    }
}
