use crate::{Ability, Move, PokemonType, Species};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStats {
    pub hp: u8,
    pub attack: u8,
    pub defense: u8,
    pub sp_attack: u8,
    pub sp_defense: u8,
    pub speed: u8,
}

impl BaseStats {
    /// Base values in permanent stat order (HP, ATK, DEF, SP.ATK, SP.DEF, SPD).
    pub fn as_array(&self) -> [u8; 6] {
        [
            self.hp,
            self.attack,
            self.defense,
            self.sp_attack,
            self.sp_defense,
            self.speed,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Learnset {
    pub level_up: Vec<(u8, Move)>, // (level, move) in learning order
}

impl Learnset {
    pub fn learns_at_level(&self, level: u8) -> impl Iterator<Item = Move> + '_ {
        self.level_up
            .iter()
            .filter(move |(learn_level, _)| *learn_level == level)
            .map(|(_, move_)| *move_)
    }

    pub fn can_learn_move(&self, move_: Move) -> bool {
        self.level_up.iter().any(|(_, learned)| *learned == move_)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub id: Species,
    pub pokedex_number: u16,
    pub types: Vec<PokemonType>,
    pub base_stats: BaseStats,
    pub abilities: Vec<Ability>,
    pub learnset: Learnset,
}

impl PokemonSpecies {
    /// The ability a freshly generated member of this species carries.
    pub fn default_ability(&self) -> Ability {
        self.abilities.first().copied().unwrap_or_default()
    }
}
