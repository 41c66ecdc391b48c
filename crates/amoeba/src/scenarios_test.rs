//! Multi-turn games against a minimal in-test engine.

use proptest::prelude::*;

use crate::connectivity::is_connected;
use crate::shapes::generate;
use crate::{Agent, AgentConfig, Cell, Decision, Grid, Memory, Offset, Percept, Phase, ShapeId};

/// Applies decisions the way the game does and feeds the next percept back.
struct Engine {
    agent: Agent,
    occupancy: Grid,
    bacteria: Vec<Cell>,
    memory: u8,
    previous: Option<Percept>,
}

impl Engine {
    fn new(config: AgentConfig, occupancy: Grid, bacteria: Vec<Cell>) -> Self {
        Self {
            agent: Agent::new(config).unwrap(),
            occupancy,
            bacteria,
            memory: 0,
            previous: None,
        }
    }

    /// Play one turn, checking every rule the engine enforces.
    fn step(&mut self) -> Decision {
        let percept = Percept::observe(self.occupancy.clone(), self.bacteria.clone());
        let decision = self
            .agent
            .turn(self.previous.as_ref(), &percept, self.memory)
            .unwrap();

        let budget = self.agent.config().budget(percept.current_size);
        assert_eq!(decision.retracts.len(), decision.extends.len());
        assert!(decision.extends.len() <= budget);
        for (retract, extend) in decision.retracts.iter().zip(&decision.extends) {
            assert!(percept.periphery.contains(retract), "retract {retract} off periphery");
            assert!(percept.movable_cells.contains(extend), "extend {extend} not movable");
        }
        // every extend must border a periphery cell that stays put, unless
        // the whole body relocates
        if decision.retracts.len() < self.occupancy.len() {
            for extend in &decision.extends {
                assert!(
                    extend.neighbors().iter().any(|n| percept.periphery.contains(n)
                        && !decision.retracts.contains(n)),
                    "extend {extend} only touches vacated cells"
                );
            }
        }

        let size = self.occupancy.len();
        for &cell in &decision.retracts {
            assert!(self.occupancy.remove(cell));
        }
        for &cell in &decision.extends {
            assert!(self.occupancy.insert(cell));
        }
        assert_eq!(self.occupancy.len(), size);
        assert!(is_connected(&self.occupancy));

        self.memory = decision.memory;
        self.previous = Some(percept);
        decision
    }

    /// Engine-side growth: a bacterium was eaten next to the organism.
    fn grow(&mut self) {
        let percept = Percept::observe(self.occupancy.clone(), self.bacteria.clone());
        if let Some(&cell) = percept.movable_cells.first() {
            self.occupancy.insert(cell);
        }
    }
}

fn start(cells: &[(i32, i32)]) -> Grid {
    cells.iter().map(|&(r, c)| Cell::new(r, c)).collect()
}

#[test]
fn single_cell_leaves_initializing_on_the_first_turn() {
    let mut engine = Engine::new(AgentConfig::new(100, 1.0), start(&[(50, 50)]), vec![]);

    let decision = engine.step();

    assert_eq!(decision.extends.len(), 1);
    assert!(Cell::new(50, 50).neighbors().contains(&decision.extends[0]));
    assert_eq!(decision.memory & 0x7f, 1);
}

#[test]
fn seeded_organism_assembles_then_travels() {
    let config = AgentConfig {
        shape: ShapeId::Staircase,
        ..AgentConfig::new(100, 1.0)
    };
    let plus = start(&[(50, 49), (50, 50), (50, 51), (49, 50), (48, 50)]);
    let mut engine = Engine::new(config, plus.clone(), vec![]);

    let mut travelled = false;
    for _ in 0..20 {
        engine.step();
        if let Phase::Traveling { .. } = Memory::decode(engine.memory).unwrap().phase {
            travelled = true;
        }
    }

    assert!(travelled);
    assert_ne!(engine.occupancy, plus);
}

#[test]
fn single_cell_walks_down_one_row_per_turn_and_wraps() {
    let mut engine = Engine::new(AgentConfig::new(100, 1.0), start(&[(50, 50)]), vec![]);

    for _ in 0..120 {
        engine.step();
    }

    assert_eq!(engine.occupancy.iter().collect::<Vec<_>>(), vec![Cell::new(70, 50)]);
    assert_eq!(
        Memory::decode(engine.memory).unwrap().phase,
        Phase::Traveling { coordinate: 19 }
    );
}

#[test]
fn chevron_keeps_traveling_once_formed() {
    let occupancy = generate(ShapeId::BranchingChevron, 20).anchored(Cell::new(50, 50));
    let mut engine = Engine::new(AgentConfig::new(100, 1.0), occupancy.clone(), vec![]);

    let mut phases = Vec::new();
    for _ in 0..12 {
        engine.step();
        phases.push(Memory::decode(engine.memory).unwrap().phase);
    }

    assert_eq!(phases[0], Phase::Traveling { coordinate: 0 });
    assert!(phases
        .iter()
        .all(|phase| matches!(phase, Phase::Traveling { .. })));
    assert_ne!(engine.occupancy, occupancy);
}

#[test]
fn growing_organism_keeps_every_invariant() {
    let occupancy = start(&[(50, 50), (50, 51), (51, 50)]);
    let bacteria = vec![Cell::new(52, 52), Cell::new(60, 48), Cell::new(5, 5)];
    let mut engine = Engine::new(AgentConfig::new(200, 0.4), occupancy, bacteria);

    for turn in 0..40 {
        if turn % 3 == 0 {
            engine.grow();
        }
        engine.step();
    }

    assert!(engine.occupancy.len() > 3);
}

#[test]
fn organism_straddling_the_corner_stays_connected() {
    let config = AgentConfig {
        home: 0,
        ..AgentConfig::new(100, 1.0)
    };
    let occupancy = start(&[(99, 99), (0, 99), (99, 0), (0, 0), (1, 0)]);
    let mut engine = Engine::new(config, occupancy, vec![]);

    let mut moved = 0;
    for _ in 0..15 {
        moved += engine.step().extends.len();
    }
    assert!(moved > 0);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn prop_games_never_break_the_organism(
        shape in proptest::sample::select(ShapeId::ALL.to_vec()),
        metabolism in 0.1f64..=1.0,
        home in 0u8..100,
        size in 1usize..40,
    ) {
        let config = AgentConfig {
            shape,
            home,
            ..AgentConfig::new(100, metabolism)
        };
        let center = Cell::new(i32::from(home), i32::from(home));
        let occupancy = generate(ShapeId::Diamond, size).anchored(center);
        let bacteria = vec![center.shifted(Offset::new(8, 1))];
        let mut engine = Engine::new(config, occupancy, bacteria);

        for turn in 0..10 {
            if turn % 4 == 3 {
                engine.grow();
            }
            engine.step();
        }
    }
}
