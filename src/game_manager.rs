//! A battle driver for tests and demos: configure both parties, start the
//! battle and step it phase by phase.

use crate::battle::engine::{BattleEngine, PhaseStep};
use crate::battle::events::EventBus;
use crate::battle::field::{BattlerIndex, Combatant, Side};
use crate::battle::phases::PhaseKind;
use crate::battle::state::{BattleFormat, BattleState, TurnRng};
use crate::errors::{BattleResult, BattleStateError, PhaseError};
use crate::player::{BattlePlayer, PlayerAction};
use crate::pokemon::{get_species_data, PokemonInst};
use schema::{Ability, Move, Species};
use serde::{Deserialize, Serialize};

pub const DEFAULT_LEVEL: u8 = 5;
pub const DEFAULT_ENEMY_SPECIES: Species = Species::Rattata;

/// Knobs applied when the next battle is built. Unset values fall back to
/// species data and `DEFAULT_LEVEL`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleOverrides {
    pub battle_format: BattleFormat,
    pub enemy_species: Option<Species>,
    pub enemy_level: Option<u8>,
    pub enemy_moveset: Option<Vec<Move>>,
    pub enemy_ability: Option<Ability>,
    pub starting_level: Option<u8>,
    pub moveset: Option<Vec<Move>>,
    pub ability: Option<Ability>,
}

impl BattleOverrides {
    pub fn battle_format(&mut self, format: BattleFormat) -> &mut Self {
        self.battle_format = format;
        self
    }

    pub fn enemy_species(&mut self, species: Species) -> &mut Self {
        self.enemy_species = Some(species);
        self
    }

    pub fn enemy_level(&mut self, level: u8) -> &mut Self {
        self.enemy_level = Some(level);
        self
    }

    pub fn enemy_moveset(&mut self, moves: Vec<Move>) -> &mut Self {
        self.enemy_moveset = Some(moves);
        self
    }

    pub fn enemy_ability(&mut self, ability: Ability) -> &mut Self {
        self.enemy_ability = Some(ability);
        self
    }

    pub fn starting_level(&mut self, level: u8) -> &mut Self {
        self.starting_level = Some(level);
        self
    }

    pub fn moveset(&mut self, moves: Vec<Move>) -> &mut Self {
        self.moveset = Some(moves);
        self
    }

    pub fn ability(&mut self, ability: Ability) -> &mut Self {
        self.ability = Some(ability);
        self
    }

    fn build_pokemon(
        species: Species,
        level: u8,
        moves: Option<Vec<Move>>,
        ability: Option<Ability>,
    ) -> BattleResult<PokemonInst> {
        let species_data = get_species_data(species)?;
        let pokemon = PokemonInst::new(species, species_data, level, None, moves);
        Ok(match ability {
            Some(ability) => pokemon.with_ability(ability),
            None => pokemon,
        })
    }

    fn player_party(&self, species: &[Species]) -> BattleResult<Vec<PokemonInst>> {
        let level = self.starting_level.unwrap_or(DEFAULT_LEVEL);
        species
            .iter()
            .map(|species| Self::build_pokemon(*species, level, self.moveset.clone(), self.ability))
            .collect()
    }

    /// One enemy per field slot, all of the same species.
    fn enemy_party(&self) -> BattleResult<Vec<PokemonInst>> {
        let species = self.enemy_species.unwrap_or(DEFAULT_ENEMY_SPECIES);
        let level = self.enemy_level.unwrap_or(DEFAULT_LEVEL);
        (0..self.battle_format.battlers_per_side())
            .map(|_| {
                Self::build_pokemon(species, level, self.enemy_moveset.clone(), self.enemy_ability)
            })
            .collect()
    }
}

/// Owns one battle at a time and exposes the calls a test script needs.
pub struct GameManager {
    overrides: BattleOverrides,
    seed: Option<u64>,
    engine: Option<BattleEngine>,
}

impl Default for GameManager {
    fn default() -> Self {
        Self::new()
    }
}

impl GameManager {
    pub fn new() -> Self {
        Self {
            overrides: BattleOverrides::default(),
            seed: None,
            engine: None,
        }
    }

    /// Battles started by this manager use a seeded RNG.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::new()
        }
    }

    pub fn from_config(config: &crate::config::GameConfig) -> Self {
        Self {
            overrides: config.overrides.clone(),
            seed: config.seed,
            engine: None,
        }
    }

    pub fn overrides(&mut self) -> &mut BattleOverrides {
        &mut self.overrides
    }

    /// Build both parties, start the engine and run until the first command.
    pub fn start_battle(&mut self, species: &[Species]) -> BattleResult<()> {
        let rng = match self.seed {
            Some(seed) => TurnRng::from_seed(seed),
            None => TurnRng::new_random(),
        };
        self.start_battle_with_rng(species, rng)
    }

    pub fn start_battle_with_rng(&mut self, species: &[Species], rng: TurnRng) -> BattleResult<()> {
        let player = BattlePlayer::new(
            "player".to_string(),
            "Player".to_string(),
            self.overrides.player_party(species)?,
        );
        let enemy = BattlePlayer::new(
            "wild".to_string(),
            "Wild".to_string(),
            self.overrides.enemy_party()?,
        );
        let state = BattleState::new(
            "game-manager".to_string(),
            self.overrides.battle_format,
            player,
            enemy,
        );

        let engine = self.engine.insert(BattleEngine::new(state, rng));
        engine.run_until_input()?;
        Ok(())
    }

    pub fn engine(&self) -> Result<&BattleEngine, PhaseError> {
        self.engine.as_ref().ok_or(PhaseError::NoBattle)
    }

    pub fn engine_mut(&mut self) -> Result<&mut BattleEngine, PhaseError> {
        self.engine.as_mut().ok_or(PhaseError::NoBattle)
    }

    pub fn state(&self) -> Result<&BattleState, PhaseError> {
        Ok(self.engine()?.state())
    }

    pub fn events(&self) -> Result<&EventBus, PhaseError> {
        Ok(self.engine()?.events())
    }

    fn first_on_side(&self, side: Side) -> Option<&Combatant> {
        let state = self.engine.as_ref()?.state();
        state
            .field
            .battlers_on(side)
            .into_iter()
            .find_map(|battler| state.field.get(battler))
    }

    pub fn player_pokemon(&self) -> Option<&Combatant> {
        self.first_on_side(Side::Player)
    }

    pub fn enemy_pokemon(&self) -> Option<&Combatant> {
        self.first_on_side(Side::Enemy)
    }

    /// Slot of a move in the moveset of the first player battler on the field.
    pub fn move_position(&self, move_: Move) -> Option<usize> {
        let state = self.engine.as_ref()?.state();
        let battler = state.field.battlers_on(Side::Player).into_iter().next()?;
        state.active_pokemon(battler)?.move_position(move_)
    }

    pub fn do_attack(&mut self, position: usize) -> BattleResult<BattlerIndex> {
        self.submit(PlayerAction::UseMove {
            move_index: position,
            target: None,
        })
    }

    pub fn do_attack_at(&mut self, position: usize, target: BattlerIndex) -> BattleResult<BattlerIndex> {
        self.submit(PlayerAction::UseMove {
            move_index: position,
            target: Some(target),
        })
    }

    pub fn do_switch(&mut self, team_index: usize) -> BattleResult<BattlerIndex> {
        self.submit(PlayerAction::SwitchPokemon { team_index })
    }

    pub fn do_forfeit(&mut self) -> BattleResult<BattlerIndex> {
        self.submit(PlayerAction::Forfeit)
    }

    /// Run ahead to the next command prompt, then hand it the action.
    fn submit(&mut self, action: PlayerAction) -> BattleResult<BattlerIndex> {
        let engine = self.engine_mut()?;
        if engine.awaiting_input().is_none() {
            if let PhaseStep::Finished = engine.run_until_input()? {
                if engine.state().game_state.is_over() {
                    return Err(BattleStateError::BattleOver.into());
                }
                return Err(PhaseError::QueueExhausted(PhaseKind::Command).into());
            }
        }
        engine.submit_action(action)
    }

    pub fn phase_interceptor(&mut self) -> PhaseInterceptor<'_> {
        PhaseInterceptor { manager: self }
    }
}

/// Runs queued phases up to a chosen one.
pub struct PhaseInterceptor<'a> {
    manager: &'a mut GameManager,
}

impl PhaseInterceptor<'_> {
    /// Run phases until one of kind `target` has run.
    pub fn to(self, target: PhaseKind) -> BattleResult<()> {
        let engine = self.manager.engine_mut()?;
        loop {
            match engine.run_next_phase()? {
                PhaseStep::Ran(kind) if kind == target => return Ok(()),
                PhaseStep::Ran(_) => continue,
                PhaseStep::AwaitingInput(awaiting) => {
                    return Err(PhaseError::AwaitingInput { target, awaiting }.into())
                }
                PhaseStep::Finished => return Err(PhaseError::QueueExhausted(target).into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::BattleEngineError;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_overrides_chain() {
        let mut game = GameManager::new();
        game.overrides()
            .battle_format(BattleFormat::Double)
            .enemy_species(Species::Koffing)
            .enemy_level(30)
            .starting_level(40)
            .ability(Ability::Simple);

        let overrides = game.overrides().clone();
        assert_eq!(overrides.battle_format, BattleFormat::Double);
        assert_eq!(overrides.enemy_species, Some(Species::Koffing));
        assert_eq!(overrides.enemy_level, Some(30));
        assert_eq!(overrides.starting_level, Some(40));
        assert_eq!(overrides.ability, Some(Ability::Simple));
        assert_eq!(overrides.moveset, None);
    }

    #[test]
    fn test_start_battle_applies_overrides() {
        let mut game = GameManager::with_seed(1);
        game.overrides()
            .enemy_species(Species::Magikarp)
            .enemy_level(12)
            .enemy_moveset(vec![Move::Splash])
            .enemy_ability(Ability::None)
            .starting_level(50)
            .moveset(vec![Move::Growl, Move::Haze])
            .ability(Ability::Contrary);
        game.start_battle(&[Species::Pikachu]).expect("battle starts");

        let player = game.player_pokemon().expect("player on field");
        assert_eq!(player.species, Species::Pikachu);
        assert_eq!(player.level, 50);
        assert_eq!(player.ability, Ability::Contrary);

        let enemy = game.enemy_pokemon().expect("enemy on field");
        assert_eq!(enemy.species, Species::Magikarp);
        assert_eq!(enemy.level, 12);
        assert_eq!(enemy.ability, Ability::None);

        assert_eq!(game.move_position(Move::Haze), Some(1));
        assert_eq!(game.move_position(Move::Charm), None);
    }

    #[test]
    fn test_calls_before_start_fail() {
        let mut game = GameManager::new();
        assert!(game.player_pokemon().is_none());
        assert!(matches!(
            game.do_attack(0),
            Err(BattleEngineError::Phase(PhaseError::NoBattle))
        ));
        assert!(matches!(
            game.phase_interceptor().to(PhaseKind::TurnEnd),
            Err(BattleEngineError::Phase(PhaseError::NoBattle))
        ));
    }

    #[test]
    fn test_interceptor_stops_at_command_prompt() {
        let mut game = GameManager::with_seed(3);
        game.overrides()
            .moveset(vec![Move::SwordsDance])
            .enemy_moveset(vec![Move::Splash]);
        game.start_battle(&[Species::Rattata]).expect("battle starts");

        let result = game.phase_interceptor().to(PhaseKind::TurnEnd);
        assert!(matches!(
            result,
            Err(BattleEngineError::Phase(PhaseError::AwaitingInput {
                target: PhaseKind::TurnEnd,
                awaiting: BattlerIndex::Player,
            }))
        ));
    }

    #[test]
    fn test_interceptor_reports_exhausted_queue() {
        let mut game = GameManager::with_seed(3);
        game.overrides()
            .moveset(vec![Move::SwordsDance])
            .enemy_moveset(vec![Move::Splash]);
        game.start_battle(&[Species::Rattata]).expect("battle starts");
        game.do_forfeit().expect("forfeit accepted");

        let result = game.phase_interceptor().to(PhaseKind::Move);
        assert!(matches!(
            result,
            Err(BattleEngineError::Phase(PhaseError::QueueExhausted(PhaseKind::Move)))
        ));
        assert!(game.state().expect("state").game_state.is_over());
        assert!(matches!(
            game.do_attack(0),
            Err(BattleEngineError::BattleState(BattleStateError::BattleOver))
        ));
    }
}
