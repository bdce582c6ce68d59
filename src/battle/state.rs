use crate::battle::field::{BattlerIndex, Combatant, Field, Side};
use crate::errors::BattleStateError;
use crate::player::{BattlePlayer, PlayerAction};
use crate::pokemon::PokemonInst;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schema::BattleStat;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BattleFormat {
    #[default]
    Single,
    Double,
}

impl BattleFormat {
    /// Number of field slots each side fills.
    pub fn battlers_per_side(self) -> usize {
        match self {
            BattleFormat::Single => 1,
            BattleFormat::Double => 2,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Copy)]
pub enum GameState {
    WaitingForActions,
    TurnInProgress,
    PlayerWin,
    EnemyWin,
    Draw,
}

impl GameState {
    pub fn is_over(self) -> bool {
        matches!(
            self,
            GameState::PlayerWin | GameState::EnemyWin | GameState::Draw
        )
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameState::PlayerWin => Some(Side::Player),
            GameState::EnemyWin => Some(Side::Enemy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
enum RngSource {
    Scripted { outcomes: Vec<u8>, index: usize },
    Seeded(StdRng),
}

/// Source of every random decision in a battle. Outcomes are rolls in 1..=100.
///
/// Tests script the exact outcomes; a scripted source that runs dry panics
/// with the reason of the roll that could not be served.
#[derive(Debug, Clone)]
pub struct TurnRng {
    source: RngSource,
}

impl TurnRng {
    pub fn new_for_test(outcomes: Vec<u8>) -> Self {
        Self {
            source: RngSource::Scripted { outcomes, index: 0 },
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            source: RngSource::Seeded(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn new_random() -> Self {
        Self {
            source: RngSource::Seeded(StdRng::from_os_rng()),
        }
    }

    pub fn next_outcome(&mut self, reason: &str) -> u8 {
        let outcome = match &mut self.source {
            RngSource::Scripted { outcomes, index } => {
                if *index >= outcomes.len() {
                    panic!(
                        "TurnRng exhausted! Tried to get a value for: '{}'. Need more random values.",
                        reason
                    );
                }
                let outcome = outcomes[*index];
                *index += 1;
                outcome
            }
            RngSource::Seeded(rng) => rng.random_range(1..=100),
        };

        log::trace!("[RNG] Consumed {} for: {}", outcome, reason);
        outcome
    }

    /// Pick an index in `0..len` uniformly. `len` must be in `1..=100`.
    ///
    /// Rolls above the largest multiple of `len` are thrown away and rolled
    /// again, so every index owns the same number of outcomes.
    pub fn pick_index(&mut self, len: usize, reason: &str) -> usize {
        let len = len.clamp(1, 100);
        let limit = 100 - 100 % len;
        loop {
            let outcome = self.next_outcome(reason).clamp(1, 100) as usize;
            if outcome <= limit {
                return (outcome - 1) * len / limit;
            }
            log::trace!("[RNG] Re-rolling {} for: {}", outcome, reason);
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct BattleState {
    pub battle_id: String,
    pub format: BattleFormat,
    pub players: [BattlePlayer; 2],
    pub field: Field,
    pub turn_number: u32,
    pub game_state: GameState,
    /// Commands chosen for the current turn, indexed by battler slot.
    pub action_queue: [Option<PlayerAction>; 4],
}

impl BattleState {
    pub fn new(
        id: String,
        format: BattleFormat,
        player: BattlePlayer,
        enemy: BattlePlayer,
    ) -> Self {
        Self {
            battle_id: id,
            format,
            players: [player, enemy],
            field: Field::new(),
            turn_number: 0,
            game_state: GameState::WaitingForActions,
            action_queue: [const { None }; 4],
        }
    }

    pub fn player(&self, side: Side) -> &BattlePlayer {
        &self.players[side.index()]
    }

    pub fn player_mut(&mut self, side: Side) -> &mut BattlePlayer {
        &mut self.players[side.index()]
    }

    /// Field slots this format uses, in battler order.
    pub fn battler_slots(&self) -> Vec<BattlerIndex> {
        let per_side = self.format.battlers_per_side();
        BattlerIndex::ALL
            .into_iter()
            .filter(|battler| battler.position() < per_side)
            .collect()
    }

    pub fn combatant(&self, battler: BattlerIndex) -> Result<&Combatant, BattleStateError> {
        self.field
            .get(battler)
            .ok_or(BattleStateError::NoActivePokemon(battler))
    }

    /// The party member backing the combatant in a slot.
    pub fn active_pokemon(&self, battler: BattlerIndex) -> Option<&PokemonInst> {
        let combatant = self.field.get(battler)?;
        self.player(combatant.side).pokemon(combatant.party_index)
    }

    pub fn active_pokemon_mut(&mut self, battler: BattlerIndex) -> Option<&mut PokemonInst> {
        let (side, party_index) = {
            let combatant = self.field.get(battler)?;
            (combatant.side, combatant.party_index)
        };
        self.player_mut(side).pokemon_mut(party_index)
    }

    /// Stage of a stat for the combatant in a slot (0 for an empty slot).
    pub fn stat_stage(&self, battler: BattlerIndex, stat: BattleStat) -> i8 {
        self.field
            .get(battler)
            .map(|combatant| combatant.stat_stages.get(stat))
            .unwrap_or(0)
    }

    /// First party member of a side that is not already on the field.
    pub fn next_benched(&self, side: Side) -> Option<usize> {
        (0..self.player(side).team.len()).find(|index| !self.field.is_on_field(side, *index))
    }
}
