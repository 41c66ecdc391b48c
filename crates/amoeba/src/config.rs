//! Agent configuration, fixed for the whole game.

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, AgentResult};
use crate::shapes::ShapeId;
use crate::MAP_DIM;

/// Parameters supplied once by the harness when the agent is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Size the organism must reach to win
    pub goal_size: usize,

    /// Fraction of the organism that may move in one turn
    pub metabolism: f64,

    /// Target silhouette
    pub shape: ShapeId,

    /// Misplaced-periphery fraction accepted before travel starts
    pub formation_tolerance: f64,

    /// Misplaced-periphery fraction accepted before advancing one step
    pub travel_tolerance: f64,

    /// Default center coordinate on both axes
    pub home: u8,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            goal_size: 100,
            metabolism: 1.0,
            shape: ShapeId::BranchingChevron,
            formation_tolerance: 0.0,
            travel_tolerance: 0.2,
            home: 50,
        }
    }
}

impl AgentConfig {
    #[must_use]
    pub fn new(goal_size: usize, metabolism: f64) -> Self {
        Self {
            goal_size,
            metabolism,
            ..Self::default()
        }
    }

    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> AgentResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AgentResult<()> {
        if self.goal_size == 0 {
            return Err(AgentError::config("goal_size must be positive"));
        }
        if !(self.metabolism > 0.0 && self.metabolism <= 1.0) {
            return Err(AgentError::config(format!(
                "metabolism {} outside (0, 1]",
                self.metabolism
            )));
        }
        for (name, value) in [
            ("formation_tolerance", self.formation_tolerance),
            ("travel_tolerance", self.travel_tolerance),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(AgentError::config(format!("{name} {value} outside [0, 1]")));
            }
        }
        if usize::from(self.home) >= MAP_DIM {
            return Err(AgentError::config(format!(
                "home {} outside the map",
                self.home
            )));
        }
        Ok(())
    }

    /// Cells allowed to move this turn: `ceil(metabolism * size)`.
    #[must_use]
    pub fn budget(&self, current_size: usize) -> usize {
        (self.metabolism * current_size as f64).ceil() as usize
    }
}
