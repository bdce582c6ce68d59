use crate::battle::field::BattlerIndex;
use crate::battle::state::{BattleFormat, BattleState, TurnRng};
use crate::errors::BattleResult;
use crate::player::BattlePlayer;
use crate::pokemon::PokemonInst;
use schema::{Ability, Move, Species};

/// A builder for creating test Pokemon instances with common defaults.
///
/// # Example
/// ```ignore
/// let pokemon = TestPokemonBuilder::new(Species::Rattata, 100)
///     .with_moves(vec![Move::SwordsDance])
///     .with_ability(Ability::None)
///     .build();
/// ```
pub struct TestPokemonBuilder {
    species: Species,
    level: u8,
    moves: Option<Vec<Move>>,
    ability: Option<Ability>,
}

impl TestPokemonBuilder {
    /// Creates a new builder for a given species and level.
    pub fn new(species: Species, level: u8) -> Self {
        Self {
            species,
            level,
            moves: None,
            ability: None,
        }
    }

    /// Sets the moves for the test Pokemon.
    pub fn with_moves(mut self, moves: Vec<Move>) -> Self {
        self.moves = Some(moves);
        self
    }

    /// Overrides the ability picked from species data.
    pub fn with_ability(mut self, ability: Ability) -> Self {
        self.ability = Some(ability);
        self
    }

    /// Builds the `PokemonInst`.
    pub fn build(self) -> PokemonInst {
        let species_data = match crate::pokemon::get_species_data(self.species) {
            Ok(data) => data,
            Err(err) => panic!(
                "Failed to load species data for {:?}: {}",
                self.species, err
            ),
        };

        let pokemon = PokemonInst::new(self.species, species_data, self.level, None, self.moves);
        match self.ability {
            Some(ability) => pokemon.with_ability(ability),
            None => pokemon,
        }
    }
}

/// Creates a default test player with a given ID, name, and team.
pub fn create_test_player(id: &str, name: &str, team: Vec<PokemonInst>) -> BattlePlayer {
    BattlePlayer::new(id.to_string(), name.to_string(), team)
}

/// Creates a standard 1v1 battle state for testing. Nobody is on the field yet.
pub fn create_test_battle(p1_pokemon: PokemonInst, p2_pokemon: PokemonInst) -> BattleState {
    let player1 = create_test_player("p1", "Player 1", vec![p1_pokemon]);
    let player2 = create_test_player("p2", "Player 2", vec![p2_pokemon]);

    BattleState::new("test_battle".to_string(), BattleFormat::Single, player1, player2)
}

/// Creates a 2v2 battle state for testing. Each team needs two members.
pub fn create_test_double_battle(
    p1_team: Vec<PokemonInst>,
    p2_team: Vec<PokemonInst>,
) -> BattleState {
    let player1 = create_test_player("p1", "Player 1", p1_team);
    let player2 = create_test_player("p2", "Player 2", p2_team);

    BattleState::new("test_double".to_string(), BattleFormat::Double, player1, player2)
}

/// Puts the leading party members on the field without going through the
/// engine: slot N of each side gets party member N.
pub fn summon_all(state: &mut BattleState) {
    for battler in state.battler_slots() {
        let party_index = battler.position();
        let Some(pokemon) = state.player(battler.side()).pokemon(party_index).cloned() else {
            continue;
        };
        state.field.enter(battler, party_index, &pokemon);
    }
}

/// Sets a stage directly on an active combatant.
pub fn set_stage(state: &mut BattleState, battler: BattlerIndex, stat: schema::BattleStat, stage: i8) {
    match state.field.get_mut(battler) {
        Some(combatant) => {
            combatant.stat_stages.set(stat, stage);
        }
        None => panic!("No combatant at {:?}", battler),
    }
}

/// Scripted rolls of 50, enough for several turns of any format.
/// For tests whose outcome does not hinge on a roll.
pub fn predictable_rng() -> TurnRng {
    TurnRng::new_for_test(vec![50; 100])
}

/// Helper function to assert that a Result is Ok and return the value.
/// Provides clear error messages in tests when functions unexpectedly fail.
pub fn assert_ok<T>(result: BattleResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("Expected Ok but got error: {}", err),
    }
}
