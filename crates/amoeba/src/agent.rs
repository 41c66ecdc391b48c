//! Per-turn entry point.

use crate::cell::Cell;
use crate::config::AgentConfig;
use crate::error::AgentResult;
use crate::percept::{Percept, TurnContext};
use crate::phase::{Memory, PhaseController};

/// What the agent hands back to the engine each turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    /// `retracts[i]` is vacated as `extends[i]` is filled
    pub retracts: Vec<Cell>,
    pub extends: Vec<Cell>,
    pub memory: u8,
}

impl Decision {
    /// `[memory, r0, c0, e0r, e0c, r1, c1, e1r, e1c, ...]`
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + 4 * self.extends.len());
        out.push(self.memory);
        for (retract, extend) in self.retracts.iter().zip(&self.extends) {
            out.extend_from_slice(&[retract.row, retract.col, extend.row, extend.col]);
        }
        out
    }
}

/// Holds only the game-long configuration; everything else arrives each turn.
#[derive(Debug)]
pub struct Agent {
    config: AgentConfig,
}

impl Agent {
    pub fn new(config: AgentConfig) -> AgentResult<Self> {
        config.validate()?;
        tracing::debug!(
            goal_size = config.goal_size,
            metabolism = config.metabolism,
            shape = %config.shape,
            "agent configured"
        );
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    /// Plan one turn.
    ///
    /// `previous` is only consulted for logging. Fails if `memory` or
    /// `current` break their preconditions; an organism that cannot move
    /// is not an error and yields an empty decision.
    pub fn turn(
        &self,
        previous: Option<&Percept>,
        current: &Percept,
        memory: u8,
    ) -> AgentResult<Decision> {
        let incoming = Memory::decode(memory)?;
        let ctx = TurnContext::new(current, &self.config)?;

        if let Some(previous) = previous {
            let grown = current.current_size as i64 - previous.current_size as i64;
            if grown != 0 {
                tracing::debug!(size = ctx.size(), grown, "organism size changed");
            }
        }

        let outcome = PhaseController::new(&self.config).run(&ctx, incoming);
        let memory = outcome.memory.encode();
        tracing::debug!(
            phase = %outcome.memory.phase,
            anchor = ?outcome.anchor,
            moves = outcome.movement.len(),
            budget = ctx.budget(),
            memory,
            "turn planned"
        );

        Ok(Decision {
            retracts: outcome.movement.retracts,
            extends: outcome.movement.extends,
            memory,
        })
    }
}
