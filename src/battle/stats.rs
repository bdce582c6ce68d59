use crate::battle::field::BattlerIndex;
use crate::battle::stat_stages::{accuracy_stage_multiplier, apply_stat_stage};
use crate::battle::state::{BattleState, TurnRng};
use schema::{BattleStat, MoveData, PermanentStat};

/// Raw stat of the combatant in a slot with its stage applied.
/// Accuracy and evasion have no raw value and yield 0.
pub fn effective_stat(state: &BattleState, battler: BattlerIndex, stat: BattleStat) -> u16 {
    let Some(pokemon) = state.active_pokemon(battler) else {
        return 0;
    };
    let permanent = match stat {
        BattleStat::Atk => PermanentStat::Attack,
        BattleStat::Def => PermanentStat::Defense,
        BattleStat::SpAtk => PermanentStat::SpAttack,
        BattleStat::SpDef => PermanentStat::SpDefense,
        BattleStat::Spd => PermanentStat::Speed,
        BattleStat::Acc | BattleStat::Eva => return 0,
    };
    apply_stat_stage(pokemon.stat(permanent), state.stat_stage(battler, stat))
}

/// Calculate effective speed including stat stages
pub fn effective_speed(state: &BattleState, battler: BattlerIndex) -> u16 {
    effective_stat(state, battler, BattleStat::Spd)
}

/// Calculate if a move hits based on accuracy, evasion, and move accuracy
/// Returns true if the move hits, false if it misses
pub fn move_hits(
    state: &BattleState,
    attacker: BattlerIndex,
    defender: BattlerIndex,
    move_data: &MoveData,
    rng: &mut TurnRng,
) -> bool {
    // If move has no accuracy value, it never misses (like Haze)
    let Some(base_accuracy) = move_data.accuracy else {
        return true;
    };

    // Calculate adjusted stages: attacker's accuracy - defender's evasion
    let accuracy_stage = state.stat_stage(attacker, BattleStat::Acc);
    let evasion_stage = state.stat_stage(defender, BattleStat::Eva);
    let adjusted_stage = (accuracy_stage - evasion_stage).clamp(-6, 6);

    let modified_accuracy =
        (base_accuracy as f64 * accuracy_stage_multiplier(adjusted_stage)).round() as u16;
    let clamped_accuracy = modified_accuracy.clamp(1, 100) as u8;

    let reason = format!("Accuracy check for {:?} on {}", move_data.id, defender);
    rng.next_outcome(&reason) <= clamped_accuracy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::BattleFormat;
    use crate::battle::tests::common::{create_test_player, TestPokemonBuilder};
    use crate::move_data::get_move_data;
    use pretty_assertions::assert_eq;
    use schema::{Move, Species};

    fn battle_with_stages(player_acc: i8, enemy_eva: i8) -> BattleState {
        let player = create_test_player(
            "p1",
            "Player",
            vec![TestPokemonBuilder::new(Species::Rattata, 100).build()],
        );
        let enemy = create_test_player(
            "p2",
            "Enemy",
            vec![TestPokemonBuilder::new(Species::Rattata, 100).build()],
        );
        let mut state = BattleState::new("stats".to_string(), BattleFormat::Single, player, enemy);
        for (battler, side) in [
            (BattlerIndex::Player, crate::battle::field::Side::Player),
            (BattlerIndex::Enemy, crate::battle::field::Side::Enemy),
        ] {
            let pokemon = state.player(side).team[0].clone();
            state.field.enter(battler, 0, &pokemon);
        }
        if let Some(c) = state.field.get_mut(BattlerIndex::Player) {
            c.stat_stages.set(BattleStat::Acc, player_acc);
        }
        if let Some(c) = state.field.get_mut(BattlerIndex::Enemy) {
            c.stat_stages.set(BattleStat::Eva, enemy_eva);
        }
        state
    }

    #[test]
    fn test_effective_speed_uses_stage() {
        let mut state = battle_with_stages(0, 0);
        assert_eq!(effective_speed(&state, BattlerIndex::Player), 149);

        if let Some(c) = state.field.get_mut(BattlerIndex::Player) {
            c.stat_stages.set(BattleStat::Spd, 2);
        }
        assert_eq!(effective_speed(&state, BattlerIndex::Player), 298);
        assert_eq!(effective_speed(&state, BattlerIndex::PlayerTwo), 0);
    }

    #[test]
    fn test_never_miss_moves_skip_the_roll() {
        let state = battle_with_stages(-6, 6);
        let haze = get_move_data(Move::Haze).expect("Haze data");
        // An empty script would panic if a roll were taken.
        let mut rng = TurnRng::new_for_test(vec![]);
        assert!(move_hits(&state, BattlerIndex::Player, BattlerIndex::Enemy, haze, &mut rng));
    }

    #[test]
    fn test_evasion_lowers_hit_chance() {
        let charm = get_move_data(Move::Charm).expect("Charm data");

        let neutral = battle_with_stages(0, 0);
        let mut rng = TurnRng::new_for_test(vec![100]);
        assert!(move_hits(&neutral, BattlerIndex::Player, BattlerIndex::Enemy, charm, &mut rng));

        // +1 evasion: 100 * 3/4 = 75
        let evasive = battle_with_stages(0, 1);
        let mut rng = TurnRng::new_for_test(vec![75, 76]);
        assert!(move_hits(&evasive, BattlerIndex::Player, BattlerIndex::Enemy, charm, &mut rng));
        assert!(!move_hits(&evasive, BattlerIndex::Player, BattlerIndex::Enemy, charm, &mut rng));

        // Accuracy cancels evasion
        let cancelled = battle_with_stages(1, 1);
        let mut rng = TurnRng::new_for_test(vec![100]);
        assert!(move_hits(&cancelled, BattlerIndex::Player, BattlerIndex::Enemy, charm, &mut rng));
    }
}
