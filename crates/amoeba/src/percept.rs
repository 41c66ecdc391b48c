//! Per-turn input and the validated, read-only view planners work against.

use crate::cell::Cell;
use crate::config::AgentConfig;
use crate::error::{AgentError, AgentResult};
use crate::{Grid, MAP_CELLS, MAP_DIM};

/// What the engine tells the agent at the start of a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Percept {
    pub occupancy: Grid,
    pub current_size: usize,
    pub periphery: Vec<Cell>,
    pub bacteria: Vec<Cell>,
    pub movable_cells: Vec<Cell>,
}

impl Percept {
    /// Derive periphery and movable cells from the map the way the engine does.
    ///
    /// Periphery: occupied cells with an unoccupied orthogonal neighbour.
    /// Movable: unoccupied, bacteria-free neighbours of periphery cells.
    #[must_use]
    pub fn observe(occupancy: Grid, bacteria: Vec<Cell>) -> Self {
        let blocked: Grid = bacteria.iter().copied().collect();
        let periphery: Vec<Cell> = occupancy
            .iter()
            .filter(|cell| cell.neighbors().iter().any(|n| !occupancy.contains(*n)))
            .collect();
        let movable: Grid = periphery
            .iter()
            .flat_map(|cell| cell.neighbors())
            .filter(|n| !occupancy.contains(*n) && !blocked.contains(*n))
            .collect();
        Self {
            current_size: occupancy.len(),
            movable_cells: movable.iter().collect(),
            occupancy,
            periphery,
            bacteria,
        }
    }

    /// Parse the flat byte layout used across the WASM boundary.
    ///
    /// `occupancy` is `MAP_CELLS` bytes, row-major, non-zero meaning occupied.
    /// The other slices are `row, col` pairs.
    pub fn from_flat(
        occupancy: &[u8],
        periphery: &[u8],
        bacteria: &[u8],
        movable: &[u8],
    ) -> AgentResult<Self> {
        if occupancy.len() != MAP_CELLS {
            return Err(AgentError::MapSize(occupancy.len()));
        }
        let occupancy: Grid = occupancy
            .iter()
            .enumerate()
            .filter(|(_, &b)| b != 0)
            .map(|(i, _)| Cell::from_index(i))
            .collect();
        Ok(Self {
            current_size: occupancy.len(),
            occupancy,
            periphery: parse_pairs(periphery)?,
            bacteria: parse_pairs(bacteria)?,
            movable_cells: parse_pairs(movable)?,
        })
    }
}

fn parse_pairs(bytes: &[u8]) -> AgentResult<Vec<Cell>> {
    if bytes.len() % 2 != 0 {
        return Err(AgentError::OddCoordinates(bytes.len()));
    }
    bytes
        .chunks_exact(2)
        .map(|pair| {
            let (row, col) = (pair[0], pair[1]);
            if usize::from(row) >= MAP_DIM || usize::from(col) >= MAP_DIM {
                return Err(AgentError::OutOfBounds { row, col });
            }
            Ok(Cell { row, col })
        })
        .collect()
}

/// Immutable per-turn view, built once from a [`Percept`] after its
/// preconditions have been checked.
#[derive(Debug)]
pub struct TurnContext<'a> {
    occupancy: &'a Grid,
    periphery: Vec<Cell>,
    periphery_set: Grid,
    obstacles: Grid,
    movable: Grid,
    budget: usize,
}

impl<'a> TurnContext<'a> {
    pub fn new(percept: &'a Percept, config: &AgentConfig) -> AgentResult<Self> {
        let occupancy = &percept.occupancy;
        if occupancy.is_empty() {
            return Err(AgentError::EmptyOrganism);
        }
        if percept.current_size != occupancy.len() {
            return Err(AgentError::SizeMismatch {
                reported: percept.current_size,
                occupied: occupancy.len(),
            });
        }
        if let Some(&cell) = percept.periphery.iter().find(|c| !occupancy.contains(**c)) {
            return Err(AgentError::PeripheryNotOccupied(cell));
        }
        if let Some(&cell) = percept.movable_cells.iter().find(|c| occupancy.contains(**c)) {
            return Err(AgentError::MovableOccupied(cell));
        }

        let periphery_set: Grid = percept.periphery.iter().copied().collect();
        Ok(Self {
            occupancy,
            periphery: periphery_set.iter().collect(),
            periphery_set,
            obstacles: percept.bacteria.iter().copied().collect(),
            movable: percept.movable_cells.iter().copied().collect(),
            budget: config.budget(percept.current_size),
        })
    }

    #[must_use]
    pub fn occupancy(&self) -> &Grid {
        self.occupancy
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.occupancy.len()
    }

    /// Periphery cells, deduplicated, in row-major order.
    #[must_use]
    pub fn periphery(&self) -> &[Cell] {
        &self.periphery
    }

    #[must_use]
    pub fn is_periphery(&self, cell: Cell) -> bool {
        self.periphery_set.contains(cell)
    }

    #[must_use]
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacles.contains(cell)
    }

    #[must_use]
    pub fn is_movable(&self, cell: Cell) -> bool {
        self.movable.contains(cell)
    }

    #[must_use]
    pub fn movable(&self) -> &Grid {
        &self.movable
    }

    /// Maximum number of retract/extend pairs this turn.
    #[must_use]
    pub fn budget(&self) -> usize {
        self.budget
    }
}
