//! Cross-turn state machine packed into the memory byte.
//!
//! Bit 7 picks the travel axis. The low seven bits are 0 while the organism
//! is still assembling at home, or `coordinate + 1` once it is traveling.

use std::fmt;

use crate::cell::Cell;
use crate::config::AgentConfig;
use crate::error::{AgentError, AgentResult};
use crate::morph::{in_formation, plan, Movement};
use crate::percept::TurnContext;
use crate::shapes::{generate, Silhouette};
use crate::MAP_DIM;

const ORIENTATION_BIT: u8 = 0x80;
const FIELD_MASK: u8 = 0x7f;

/// Number of travel coordinates, one per map row or column.
const COORDINATES: u8 = MAP_DIM as u8;

/// Coordinate that lands on the home row or column.
const HOME_COORDINATE: u8 = COORDINATES - 1;

/// Axis along which the travel coordinate moves the anchor.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Orientation {
    /// Anchor walks down the rows; silhouette used as generated
    #[default]
    Rows,
    /// Anchor walks across the columns; silhouette transposed
    Columns,
}

impl Orientation {
    /// Anchor cell for `coordinate`, measured from one step past `home`.
    #[must_use]
    pub fn anchor(self, home: u8, coordinate: u8) -> Cell {
        let along = i32::from(home) + 1 + i32::from(coordinate);
        let across = i32::from(home);
        match self {
            Self::Rows => Cell::new(along, across),
            Self::Columns => Cell::new(across, along),
        }
    }

    #[must_use]
    pub fn orient(self, silhouette: &Silhouette) -> Silhouette {
        match self {
            Self::Rows => silhouette.clone(),
            Self::Columns => silhouette.transposed(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Phase {
    /// Assembling the silhouette at home
    Initializing,
    /// Advancing the anchor one coordinate at a time
    Traveling { coordinate: u8 },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initializing => write!(f, "initializing"),
            Self::Traveling { coordinate } => write!(f, "traveling@{coordinate}"),
        }
    }
}

/// Decoded form of the memory byte.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Memory {
    pub orientation: Orientation,
    pub phase: Phase,
}

impl Memory {
    /// State the engine hands over on the first turn (byte 0).
    pub const INITIAL: Self = Self {
        orientation: Orientation::Rows,
        phase: Phase::Initializing,
    };

    pub fn decode(byte: u8) -> AgentResult<Self> {
        let orientation = if byte & ORIENTATION_BIT == 0 {
            Orientation::Rows
        } else {
            Orientation::Columns
        };
        let phase = match byte & FIELD_MASK {
            0 => Phase::Initializing,
            field if field <= COORDINATES => Phase::Traveling {
                coordinate: field - 1,
            },
            field => return Err(AgentError::InvalidMemory { byte, field }),
        };
        Ok(Self { orientation, phase })
    }

    #[must_use]
    pub fn encode(self) -> u8 {
        let bit = match self.orientation {
            Orientation::Rows => 0,
            Orientation::Columns => ORIENTATION_BIT,
        };
        let field = match self.phase {
            Phase::Initializing => 0,
            Phase::Traveling { coordinate } => coordinate % COORDINATES + 1,
        };
        bit | field
    }
}

impl TryFrom<u8> for Memory {
    type Error = AgentError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        Self::decode(byte)
    }
}

impl From<Memory> for u8 {
    fn from(memory: Memory) -> Self {
        memory.encode()
    }
}

fn step_back(coordinate: u8, steps: u8) -> u8 {
    ((u16::from(coordinate) + u16::from(COORDINATES) - u16::from(steps % COORDINATES))
        % u16::from(COORDINATES)) as u8
}

fn step_forward(coordinate: u8) -> u8 {
    (coordinate + 1) % COORDINATES
}

/// Result of one controller pass.
#[derive(Clone, Debug, PartialEq)]
pub struct TurnOutcome {
    pub movement: Movement,
    pub memory: Memory,
    /// Where the accepted move was planned; `None` when no anchor worked.
    pub anchor: Option<Cell>,
}

/// Decides where the silhouette goes this turn and plans the move there.
#[derive(Debug)]
pub struct PhaseController<'a> {
    config: &'a AgentConfig,
}

impl<'a> PhaseController<'a> {
    #[must_use]
    pub fn new(config: &'a AgentConfig) -> Self {
        Self { config }
    }

    /// Plan the turn, stepping the anchor back one coordinate at a time until
    /// a move exists.
    ///
    /// When every coordinate fails the move is empty and `memory` is returned
    /// untouched.
    #[must_use]
    pub fn run(&self, ctx: &TurnContext<'_>, memory: Memory) -> TurnOutcome {
        let orientation = memory.orientation;
        let silhouette = orientation.orient(&generate(self.config.shape, ctx.size()));
        let (phase, target) = self.advance(ctx, &silhouette, memory);

        for steps in 0..COORDINATES {
            let coordinate = step_back(target, steps);
            let anchor = orientation.anchor(self.config.home, coordinate);
            let movement = plan(ctx, &silhouette, anchor);
            if movement.is_empty() {
                tracing::trace!(coordinate, %anchor, "no legal move, stepping back");
                continue;
            }

            // a retried anchor is recorded one further step back
            let settled = if steps == 0 {
                coordinate
            } else {
                step_back(coordinate, 1)
            };
            let phase = match phase {
                Phase::Initializing => Phase::Initializing,
                Phase::Traveling { .. } => Phase::Traveling {
                    coordinate: settled,
                },
            };
            return TurnOutcome {
                movement,
                memory: Memory { orientation, phase },
                anchor: Some(anchor),
            };
        }

        tracing::warn!(
            %phase,
            size = ctx.size(),
            "no legal move at any anchor, holding position"
        );
        TurnOutcome {
            movement: Movement::default(),
            memory,
            anchor: None,
        }
    }

    /// Apply the phase transition and return the coordinate to try first.
    fn advance(
        &self,
        ctx: &TurnContext<'_>,
        silhouette: &Silhouette,
        memory: Memory,
    ) -> (Phase, u8) {
        let home = self.config.home;
        match memory.phase {
            Phase::Initializing => {
                let anchor = memory.orientation.anchor(home, HOME_COORDINATE);
                if in_formation(ctx, silhouette, anchor, self.config.formation_tolerance) {
                    tracing::debug!(%anchor, "formation complete, starting travel");
                    (Phase::Traveling { coordinate: 0 }, 0)
                } else {
                    (Phase::Initializing, HOME_COORDINATE)
                }
            }
            Phase::Traveling { coordinate } => {
                let anchor = memory.orientation.anchor(home, coordinate);
                if in_formation(ctx, silhouette, anchor, self.config.travel_tolerance) {
                    let next = step_forward(coordinate);
                    (Phase::Traveling { coordinate: next }, next)
                } else {
                    (memory.phase, coordinate)
                }
            }
        }
    }
}
