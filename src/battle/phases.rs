use crate::battle::field::BattlerIndex;
use crate::battle::state::GameState;
use schema::Move;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use strum::EnumDiscriminants;

/// One step of the turn pipeline. `PhaseKind` is the field-less
/// discriminant used to name phases without their payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, EnumDiscriminants)]
#[strum_discriminants(name(PhaseKind), derive(Hash, Serialize, Deserialize))]
pub enum Phase {
    /// Opening announcement; queues the summons.
    Encounter,
    Summon {
        battler: BattlerIndex,
        party_index: usize,
    },
    TurnInit,
    /// Waits for the player to choose an action for this battler.
    Command {
        battler: BattlerIndex,
    },
    EnemyCommand {
        battler: BattlerIndex,
    },
    /// Orders the chosen actions and queues them.
    TurnStart,
    Move {
        battler: BattlerIndex,
        move_slot: usize,
        target: Option<BattlerIndex>,
    },
    MoveEffect {
        battler: BattlerIndex,
        move_used: Move,
        targets: Vec<BattlerIndex>,
    },
    Switch {
        battler: BattlerIndex,
        party_index: usize,
    },
    TurnEnd,
    BattleEnd {
        outcome: GameState,
    },
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        PhaseKind::from(self)
    }
}

impl fmt::Display for PhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}Phase", self)
    }
}

/// FIFO queue of pending phases with front insertion for phases that
/// must run before anything already queued.
#[derive(Debug, Clone, Default)]
pub struct PhaseQueue {
    phases: VecDeque<Phase>,
}

impl PhaseQueue {
    pub fn new() -> Self {
        Self {
            phases: VecDeque::new(),
        }
    }

    pub fn push(&mut self, phase: Phase) {
        self.phases.push_back(phase);
    }

    pub fn unshift(&mut self, phase: Phase) {
        self.phases.push_front(phase);
    }

    pub fn pop(&mut self) -> Option<Phase> {
        self.phases.pop_front()
    }

    pub fn peek(&self) -> Option<&Phase> {
        self.phases.front()
    }

    pub fn clear(&mut self) {
        self.phases.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    /// Kinds of the queued phases, front first.
    pub fn kinds(&self) -> Vec<PhaseKind> {
        self.phases.iter().map(Phase::kind).collect()
    }
}
