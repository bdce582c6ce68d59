use crate::errors::{SpeciesDataError, SpeciesDataResult};
use crate::move_data::get_move_max_pp;
use schema::{Ability, BaseStats, Learnset, Move, PermanentStat, PokemonSpecies, Species};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

const SPECIES_RON: &str = include_str!("../data/species.ron");

// Global species data storage - parsed once, on first lookup
static SPECIES_DATA: LazyLock<SpeciesDataResult<HashMap<Species, PokemonSpecies>>> =
    LazyLock::new(|| parse_species_table(SPECIES_RON));

/// Parse a RON list of species records into a lookup table.
pub fn parse_species_table(source: &str) -> SpeciesDataResult<HashMap<Species, PokemonSpecies>> {
    let records: Vec<PokemonSpecies> = ron::from_str(source)
        .map_err(|err| SpeciesDataError::MalformedData(err.to_string()))?;
    Ok(records.into_iter().map(|record| (record.id, record)).collect())
}

/// Get species data for a specific species from the global store
pub fn get_species_data(species: Species) -> SpeciesDataResult<&'static PokemonSpecies> {
    let table = SPECIES_DATA.as_ref().map_err(Clone::clone)?;
    table
        .get(&species)
        .ok_or(SpeciesDataError::SpeciesNotFound(species))
}

// Fallback for moves missing from the move table
const DEFAULT_MAX_PP: u8 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveInstance {
    pub move_: Move,
    pub pp: u8,
}

impl MoveInstance {
    /// Create a new move instance with max PP
    pub fn new(move_: Move) -> Self {
        MoveInstance {
            move_,
            pp: Self::lookup_max_pp(move_),
        }
    }

    /// Get the max PP for this move
    pub fn max_pp(&self) -> u8 {
        Self::lookup_max_pp(self.move_)
    }

    /// Use the move (decrease PP)
    pub fn use_move(&mut self) -> bool {
        if self.pp > 0 {
            self.pp -= 1;
            true
        } else {
            false
        }
    }

    /// Restore PP
    pub fn restore_pp(&mut self, amount: u8) {
        self.pp = self.pp.saturating_add(amount).min(self.max_pp());
    }

    fn lookup_max_pp(move_: Move) -> u8 {
        get_move_max_pp(move_).unwrap_or_else(|err| {
            log::warn!("{}; using {} PP", err, DEFAULT_MAX_PP);
            DEFAULT_MAX_PP
        })
    }
}

/// A party member. Stat stages never live here: they belong to the
/// combatant created when this Pokemon enters the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokemonInst {
    pub name: String, // Species name if no nickname
    pub species: Species,
    pub level: u8,
    pub ability: Ability,
    pub ivs: [u8; 6],        // HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub curr_stats: [u16; 6], // HP, ATK, DEF, SP.ATK, SP.DEF, SPD
    pub moves: [Option<MoveInstance>; 4],
}

impl PokemonInst {
    /// Create a new Pokemon instance from species data
    pub fn new(
        species: Species,
        species_data: &PokemonSpecies,
        level: u8,
        ivs: Option<[u8; 6]>,
        moves: Option<Vec<Move>>,
    ) -> Self {
        let ivs = ivs.unwrap_or([0; 6]);
        let curr_stats = Self::calculate_stats(&species_data.base_stats, level, &ivs);

        // Derive moves from learnset if not provided
        let moves =
            moves.unwrap_or_else(|| Self::derive_moves_from_learnset(&species_data.learnset, level));

        let mut move_array = [const { None }; 4];
        for (i, move_) in moves.into_iter().take(4).enumerate() {
            move_array[i] = Some(MoveInstance::new(move_));
        }

        PokemonInst {
            name: species.name().to_string(),
            species,
            level,
            ability: species_data.default_ability(),
            ivs,
            curr_stats,
            moves: move_array,
        }
    }

    /// Replace the ability chosen from species data.
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = ability;
        self
    }

    pub fn stat(&self, stat: PermanentStat) -> u16 {
        self.curr_stats[stat.index()]
    }

    pub fn max_hp(&self) -> u16 {
        self.stat(PermanentStat::Hp)
    }

    /// Moves currently known, in slot order.
    pub fn known_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.moves.iter().flatten().map(|instance| instance.move_)
    }

    /// Slot of the given move, if known.
    pub fn move_position(&self, move_: Move) -> Option<usize> {
        self.moves
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|instance| instance.move_ == move_))
    }

    /// Calculate current stats based on base stats, level and IVs
    /// Uses Gen 3+ stat calculation formula without natures or EVs
    fn calculate_stats(base_stats: &BaseStats, level: u8, ivs: &[u8; 6]) -> [u16; 6] {
        let base = base_stats.as_array();
        let mut stats = [0u16; 6];

        for i in 0..6 {
            let base_calculation = 2 * base[i] as u32 + ivs[i] as u32;
            let scaled = base_calculation * level as u32 / 100;
            let stat = if i == PermanentStat::Hp.index() {
                // HP = floor((2 * Base + IV) * Level / 100) + Level + 10
                scaled + level as u32 + 10
            } else {
                // Other Stat = floor((2 * Base + IV) * Level / 100) + 5
                scaled + 5
            };
            stats[i] = stat.min(u16::MAX as u32) as u16;
        }

        stats
    }

    /// Returns the 4 most recent moves the Pokemon would know at this level
    fn derive_moves_from_learnset(learnset: &Learnset, level: u8) -> Vec<Move> {
        let mut learned_moves: Vec<Move> = Vec::new();
        for (learn_level, move_) in &learnset.level_up {
            if *learn_level <= level && !learned_moves.contains(move_) {
                learned_moves.push(*move_);
            }
        }

        if learned_moves.len() <= 4 {
            learned_moves
        } else {
            learned_moves.split_off(learned_moves.len() - 4)
        }
    }
}
