//! Decision making for battlers no player controls.

use crate::battle::field::BattlerIndex;
use crate::battle::state::{BattleState, TurnRng};
use crate::player::PlayerAction;

/// A trait for any system that can decide on a battle action.
pub trait Behavior {
    /// Inspects the battle state and decides on the next action for the given battler.
    /// None means the battler has nothing it can do this turn.
    fn decide_action(
        &self,
        battler: BattlerIndex,
        battle_state: &BattleState,
        rng: &mut TurnRng,
    ) -> Option<PlayerAction>;
}

/// Picks uniformly among moves that still have PP, aimed at a random opponent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAI;

impl RandomAI {
    pub fn new() -> Self {
        Self
    }
}

impl Behavior for RandomAI {
    fn decide_action(
        &self,
        battler: BattlerIndex,
        battle_state: &BattleState,
        rng: &mut TurnRng,
    ) -> Option<PlayerAction> {
        let pokemon = battle_state.active_pokemon(battler)?;
        let usable: Vec<usize> = pokemon
            .moves
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.as_ref().is_some_and(|instance| instance.pp > 0))
            .map(|(index, _)| index)
            .collect();

        let move_index = match usable.len() {
            0 => {
                log::warn!("{} has no usable moves", battler);
                return None;
            }
            1 => usable[0],
            len => usable[rng.pick_index(len, "AI move choice")],
        };

        let opponents = battle_state.field.opponents_of(battler);
        let target = match opponents.len() {
            0 => None,
            1 => Some(opponents[0]),
            len => Some(opponents[rng.pick_index(len, "AI target choice")]),
        };

        Some(PlayerAction::UseMove { move_index, target })
    }
}
