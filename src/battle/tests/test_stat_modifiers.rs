#[cfg(test)]
mod tests {
    use crate::battle::events::{BattleEvent, StatBlockReason};
    use crate::battle::field::BattlerIndex;
    use crate::battle::phases::PhaseKind;
    use crate::game_manager::GameManager;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::{Ability, BattleStat, Move, Species};

    /// Player Rattata L100 against a slower wild Rattata that only knows `enemy_move`.
    fn game(player_moves: Vec<Move>, player_ability: Ability, enemy_move: Move) -> GameManager {
        let mut game = GameManager::with_seed(5);
        game.overrides()
            .starting_level(100)
            .moveset(player_moves)
            .ability(player_ability)
            .enemy_level(10)
            .enemy_moveset(vec![enemy_move])
            .enemy_ability(Ability::None);
        game.start_battle(&[Species::Rattata]).expect("battle starts");
        game
    }

    fn play_turn(game: &mut GameManager, position: usize) {
        game.do_attack(position).expect("move accepted");
        game.phase_interceptor().to(PhaseKind::TurnEnd).expect("turn ends");
    }

    fn player_stage(game: &GameManager, stat: BattleStat) -> i8 {
        game.player_pokemon().expect("player").stat_stages.get(stat)
    }

    #[rstest]
    #[case(Ability::None, 2)]
    #[case(Ability::Simple, 4)]
    #[case(Ability::Contrary, -2)]
    fn test_swords_dance_with_ability(#[case] ability: Ability, #[case] expected: i8) {
        let mut game = game(vec![Move::SwordsDance], ability, Move::Splash);
        play_turn(&mut game, 0);
        assert_eq!(player_stage(&game, BattleStat::Atk), expected);
    }

    #[test]
    fn test_stages_stop_at_six() {
        let mut game = game(vec![Move::SwordsDance], Ability::None, Move::Splash);
        for _ in 0..4 {
            play_turn(&mut game, 0);
        }
        assert_eq!(player_stage(&game, BattleStat::Atk), 6);

        let events = game.events().expect("events").events();
        assert!(events.contains(&BattleEvent::StatChangeBlocked {
            target: BattlerIndex::Player,
            species: Species::Rattata,
            stat: BattleStat::Atk,
            reason: StatBlockReason::WontGoHigher,
        }));
    }

    #[rstest]
    #[case(Ability::HyperCutter, Move::Growl, BattleStat::Atk)]
    #[case(Ability::ClearBody, Move::Charm, BattleStat::Atk)]
    #[case(Ability::ClearBody, Move::ScaryFace, BattleStat::Spd)]
    #[case(Ability::KeenEye, Move::SandAttack, BattleStat::Acc)]
    fn test_ability_blocks_drop_from_opponent(
        #[case] ability: Ability,
        #[case] enemy_move: Move,
        #[case] stat: BattleStat,
    ) {
        let mut game = game(vec![Move::Harden], ability, enemy_move);
        play_turn(&mut game, 0);

        assert_eq!(player_stage(&game, stat), 0);
        assert!(game
            .events()
            .expect("events")
            .events()
            .contains(&BattleEvent::StatChangeBlocked {
                target: BattlerIndex::Player,
                species: Species::Rattata,
                stat,
                reason: StatBlockReason::Ability(ability),
            }));
    }

    #[test]
    fn test_hyper_cutter_lets_other_drops_through() {
        let mut game = game(vec![Move::Harden], Ability::HyperCutter, Move::TailWhip);
        play_turn(&mut game, 0);
        // Harden +1, Tail Whip -1
        assert_eq!(player_stage(&game, BattleStat::Def), 0);

        play_turn(&mut game, 0);
        assert_eq!(player_stage(&game, BattleStat::Def), 0);
        let drops = game
            .events()
            .expect("events")
            .events()
            .iter()
            .filter(|event| {
                matches!(event, BattleEvent::StatStageChanged { target: BattlerIndex::Player, new_stage, old_stage, .. } if new_stage < old_stage)
            })
            .count();
        assert_eq!(drops, 2);
    }

    #[test]
    fn test_charm_lowers_enemy_attack_two_stages() {
        let mut game = game(vec![Move::Charm], Ability::None, Move::Splash);
        play_turn(&mut game, 0);
        let enemy = game.enemy_pokemon().expect("enemy");
        assert_eq!(enemy.stat_stages.get(BattleStat::Atk), -2);
        assert_eq!(player_stage(&game, BattleStat::Atk), 0);
    }

    #[test]
    fn test_multi_stat_move() {
        let mut game = game(vec![Move::CalmMind], Ability::None, Move::Splash);
        play_turn(&mut game, 0);
        assert_eq!(player_stage(&game, BattleStat::SpAtk), 1);
        assert_eq!(player_stage(&game, BattleStat::SpDef), 1);
        assert_eq!(player_stage(&game, BattleStat::Atk), 0);
    }
}
