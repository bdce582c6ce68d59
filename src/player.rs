use crate::battle::field::BattlerIndex;
use crate::pokemon::PokemonInst;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MAX_PARTY_SIZE: usize = 6;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum PlayerAction {
    // The index refers to the move's position (0-3) in the active Pokémon's move list.
    // `target` picks the opponent for single-target moves; None lets the engine choose.
    UseMove {
        move_index: usize,
        target: Option<BattlerIndex>,
    },

    // The index refers to the Pokémon's position (0-5) in the player's team.
    SwitchPokemon { team_index: usize },

    Forfeit,
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::UseMove {
                move_index,
                target: Some(target),
            } => write!(f, "use move {} on {:?}", move_index, target),
            PlayerAction::UseMove { move_index, .. } => write!(f, "use move {}", move_index),
            PlayerAction::SwitchPokemon { team_index } => write!(f, "switch to {}", team_index),
            PlayerAction::Forfeit => write!(f, "forfeit"),
        }
    }
}

/// One side of the battle: who is playing it and the full party.
/// Which party members are on the field is tracked by the field itself.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattlePlayer {
    pub player_id: String,
    pub player_name: String,
    pub team: Vec<PokemonInst>,
}

impl BattlePlayer {
    /// Create a new BattlePlayer. Members past the sixth are dropped.
    pub fn new(player_id: String, player_name: String, team: Vec<PokemonInst>) -> Self {
        let team = team.into_iter().take(MAX_PARTY_SIZE).collect();
        BattlePlayer {
            player_id,
            player_name,
            team,
        }
    }

    pub fn pokemon(&self, team_index: usize) -> Option<&PokemonInst> {
        self.team.get(team_index)
    }

    pub fn pokemon_mut(&mut self, team_index: usize) -> Option<&mut PokemonInst> {
        self.team.get_mut(team_index)
    }
}
