use crate::battle::ai::{Behavior, RandomAI};
use crate::battle::commands::{execute_command_batch, BattleCommand};
use crate::battle::events::{ActionFailureReason, BattleEvent, EventBus};
use crate::battle::field::{BattlerIndex, Side};
use crate::battle::move_effects::{BattleMoveEffectExt, EffectContext};
use crate::battle::phases::{Phase, PhaseKind, PhaseQueue};
use crate::battle::state::{BattleState, GameState, TurnRng};
use crate::battle::stats::{effective_speed, move_hits};
use crate::errors::{ActionError, BattleResult, BattleStateError};
use crate::move_data::get_move_data;
use crate::player::PlayerAction;
use schema::{Move, MoveTarget};
use std::cmp::Reverse;

/// Outcome of running one queued phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStep {
    Ran(PhaseKind),
    /// The front phase needs a command for this battler first.
    AwaitingInput(BattlerIndex),
    /// Nothing is left to run.
    Finished,
}

/// Drives a battle one phase at a time. Owns the battle state, its RNG and
/// the log of everything that happened.
pub struct BattleEngine {
    state: BattleState,
    rng: TurnRng,
    queue: PhaseQueue,
    events: EventBus,
    ai: Box<dyn Behavior>,
}

struct QueuedMove {
    battler: BattlerIndex,
    move_slot: usize,
    target: Option<BattlerIndex>,
    priority: i8,
    speed: u16,
}

impl BattleEngine {
    pub fn new(state: BattleState, rng: TurnRng) -> Self {
        let mut queue = PhaseQueue::new();
        queue.push(Phase::Encounter);
        Self {
            state,
            rng,
            queue,
            events: EventBus::new(),
            ai: Box::new(RandomAI::new()),
        }
    }

    /// Replace the behavior that picks enemy commands.
    pub fn with_ai(mut self, ai: Box<dyn Behavior>) -> Self {
        self.ai = ai;
        self
    }

    pub fn state(&self) -> &BattleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut BattleState {
        &mut self.state
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn queued_phases(&self) -> Vec<PhaseKind> {
        self.queue.kinds()
    }

    /// The player battler the front phase is waiting on, if any.
    pub fn awaiting_input(&self) -> Option<BattlerIndex> {
        match self.queue.peek() {
            Some(Phase::Command { battler })
                if self.state.action_queue[battler.index()].is_none() =>
            {
                Some(*battler)
            }
            _ => None,
        }
    }

    /// Record an action for the battler the queue is waiting on.
    pub fn submit_action(&mut self, action: PlayerAction) -> BattleResult<BattlerIndex> {
        if self.state.game_state.is_over() {
            return Err(BattleStateError::BattleOver.into());
        }
        let battler = self
            .awaiting_input()
            .ok_or(ActionError::NoBattlerAwaitingCommand)?;

        if let Err(err) = self.validate_action(battler, &action) {
            log::warn!("rejected {} for {}: {}", action, battler, err);
            return Err(err.into());
        }

        log::debug!("{} will {}", battler, action);
        self.state.action_queue[battler.index()] = Some(action);
        Ok(battler)
    }

    fn validate_action(&self, battler: BattlerIndex, action: &PlayerAction) -> Result<(), ActionError> {
        let pokemon = self
            .state
            .active_pokemon(battler)
            .ok_or_else(|| ActionError::InvalidAction(format!("{} is not on the field", battler)))?;

        match action {
            PlayerAction::UseMove { move_index, target } => {
                let instance = pokemon
                    .moves
                    .get(*move_index)
                    .and_then(Option::as_ref)
                    .ok_or(ActionError::InvalidMoveIndex(*move_index))?;
                if instance.pp == 0 {
                    return Err(ActionError::NoPpRemaining(instance.move_));
                }
                if let Some(target) = target {
                    if target.side() == battler.side() {
                        return Err(ActionError::InvalidAction(format!(
                            "{} cannot target its own side",
                            battler
                        )));
                    }
                }
                Ok(())
            }
            PlayerAction::SwitchPokemon { team_index } => {
                let side = battler.side();
                if *team_index >= self.state.player(side).team.len() {
                    return Err(ActionError::InvalidPokemonIndex(*team_index));
                }
                if self.state.field.is_on_field(side, *team_index) {
                    return Err(ActionError::InvalidAction(format!(
                        "party member {} is already in battle",
                        team_index
                    )));
                }
                let already_chosen = self.state.action_queue.iter().any(|queued| {
                    matches!(queued, Some(PlayerAction::SwitchPokemon { team_index: chosen }) if chosen == team_index)
                });
                if already_chosen {
                    return Err(ActionError::InvalidAction(format!(
                        "party member {} is already switching in",
                        team_index
                    )));
                }
                Ok(())
            }
            PlayerAction::Forfeit => Ok(()),
        }
    }

    /// Run the phase at the front of the queue.
    pub fn run_next_phase(&mut self) -> BattleResult<PhaseStep> {
        if let Some(battler) = self.awaiting_input() {
            return Ok(PhaseStep::AwaitingInput(battler));
        }
        let Some(phase) = self.queue.pop() else {
            return Ok(PhaseStep::Finished);
        };

        let kind = phase.kind();
        log::debug!("turn {}: running {}", self.state.turn_number, kind);
        self.run_phase(phase)?;
        Ok(PhaseStep::Ran(kind))
    }

    /// Run phases until one needs input or the queue is empty.
    pub fn run_until_input(&mut self) -> BattleResult<PhaseStep> {
        loop {
            match self.run_next_phase()? {
                PhaseStep::Ran(_) => continue,
                step => return Ok(step),
            }
        }
    }

    fn run_phase(&mut self, phase: Phase) -> BattleResult<()> {
        match phase {
            Phase::Encounter => self.run_encounter(),
            Phase::Summon {
                battler,
                party_index,
            } => self.execute(vec![BattleCommand::EnterField {
                battler,
                party_index,
            }]),
            Phase::TurnInit => self.run_turn_init(),
            Phase::Command { battler } => {
                log::trace!(
                    "{} committed to {:?}",
                    battler,
                    self.state.action_queue[battler.index()]
                );
                Ok(())
            }
            Phase::EnemyCommand { battler } => {
                let action = self.ai.decide_action(battler, &self.state, &mut self.rng);
                self.state.action_queue[battler.index()] = action;
                Ok(())
            }
            Phase::TurnStart => self.run_turn_start(),
            Phase::Move {
                battler,
                move_slot,
                target,
            } => self.run_move(battler, move_slot, target),
            Phase::MoveEffect {
                battler,
                move_used,
                targets,
            } => self.run_move_effect(battler, move_used, targets),
            Phase::Switch {
                battler,
                party_index,
            } => self.run_switch(battler, party_index),
            Phase::TurnEnd => {
                self.events.push(BattleEvent::TurnEnded {
                    turn_number: self.state.turn_number,
                });
                self.queue.push(Phase::TurnInit);
                Ok(())
            }
            Phase::BattleEnd { outcome } => self.run_battle_end(outcome),
        }
    }

    fn execute(&mut self, commands: Vec<BattleCommand>) -> BattleResult<()> {
        execute_command_batch(commands, &mut self.state, &mut self.events)?;
        Ok(())
    }

    fn run_encounter(&mut self) -> BattleResult<()> {
        for side in [Side::Player, Side::Enemy] {
            let player = self.state.player(side);
            if player.team.is_empty() {
                return Err(BattleStateError::EmptyParty(player.player_name.clone()).into());
            }
        }

        log::info!(
            "battle {} started ({:?})",
            self.state.battle_id,
            self.state.format
        );
        self.events.push(BattleEvent::BattleStarted {
            battle_id: self.state.battle_id.clone(),
            format: self.state.format,
        });

        for battler in self.state.battler_slots() {
            let side = battler.side();
            let party_index = battler.position();
            let Some(pokemon) = self.state.player(side).pokemon(party_index) else {
                continue;
            };
            if side == Side::Enemy {
                self.events.push(BattleEvent::WildPokemonAppeared {
                    battler,
                    species: pokemon.species,
                });
            }
            self.queue.push(Phase::Summon {
                battler,
                party_index,
            });
        }
        self.queue.push(Phase::TurnInit);
        Ok(())
    }

    fn run_turn_init(&mut self) -> BattleResult<()> {
        if self.state.game_state.is_over() {
            return Ok(());
        }
        self.execute(vec![
            BattleCommand::IncrementTurnNumber,
            BattleCommand::SetGameState(GameState::WaitingForActions),
            BattleCommand::ClearActionQueue,
        ])?;
        self.events.push(BattleEvent::TurnStarted {
            turn_number: self.state.turn_number,
        });

        for battler in self.state.field.battlers_on(Side::Player) {
            self.queue.push(Phase::Command { battler });
        }
        for battler in self.state.field.battlers_on(Side::Enemy) {
            self.queue.push(Phase::EnemyCommand { battler });
        }
        self.queue.push(Phase::TurnStart);
        Ok(())
    }

    fn run_turn_start(&mut self) -> BattleResult<()> {
        self.execute(vec![BattleCommand::SetGameState(GameState::TurnInProgress)])?;

        let chosen: Vec<(BattlerIndex, PlayerAction)> = BattlerIndex::ALL
            .into_iter()
            .filter(|battler| self.state.field.is_occupied(*battler))
            .filter_map(|battler| {
                self.state.action_queue[battler.index()]
                    .clone()
                    .map(|action| (battler, action))
            })
            .collect();

        // A forfeit ends the battle before anything else happens
        if let Some((battler, _)) = chosen
            .iter()
            .find(|(_, action)| matches!(action, PlayerAction::Forfeit))
        {
            let side = battler.side();
            self.events.push(BattleEvent::PlayerForfeited { side });
            let outcome = match side {
                Side::Player => GameState::EnemyWin,
                Side::Enemy => GameState::PlayerWin,
            };
            self.queue.push(Phase::BattleEnd { outcome });
            return Ok(());
        }

        let mut moves = Vec::new();
        for (battler, action) in chosen {
            match action {
                PlayerAction::SwitchPokemon { team_index } => self.queue.push(Phase::Switch {
                    battler,
                    party_index: team_index,
                }),
                PlayerAction::UseMove { move_index, target } => {
                    let priority = self
                        .state
                        .active_pokemon(battler)
                        .and_then(|pokemon| pokemon.moves.get(move_index).cloned().flatten())
                        .and_then(|instance| get_move_data(instance.move_).ok())
                        .map(|data| data.priority)
                        .unwrap_or(0);
                    moves.push(QueuedMove {
                        battler,
                        move_slot: move_index,
                        target,
                        priority,
                        speed: effective_speed(&self.state, battler),
                    });
                }
                PlayerAction::Forfeit => {}
            }
        }

        for queued in self.order_moves(moves) {
            self.queue.push(Phase::Move {
                battler: queued.battler,
                move_slot: queued.move_slot,
                target: queued.target,
            });
        }
        self.queue.push(Phase::TurnEnd);
        Ok(())
    }

    /// Priority first, then speed; ties are broken with the battle RNG.
    fn order_moves(&mut self, mut moves: Vec<QueuedMove>) -> Vec<QueuedMove> {
        moves.sort_by_key(|queued| (Reverse(queued.priority), Reverse(queued.speed)));

        let mut ordered = Vec::with_capacity(moves.len());
        let mut remaining = moves.into_iter().peekable();
        while let Some(first) = remaining.next() {
            let mut tied = vec![first];
            while let Some(next) = remaining.peek() {
                if next.priority == tied[0].priority && next.speed == tied[0].speed {
                    tied.extend(remaining.next());
                } else {
                    break;
                }
            }
            while tied.len() > 1 {
                let pick = self.rng.pick_index(tied.len(), "Speed tie-break");
                ordered.push(tied.remove(pick));
            }
            ordered.extend(tied);
        }
        ordered
    }

    fn run_move(
        &mut self,
        battler: BattlerIndex,
        move_slot: usize,
        chosen_target: Option<BattlerIndex>,
    ) -> BattleResult<()> {
        let Some(pokemon) = self.state.active_pokemon(battler) else {
            log::debug!("{} left the field before moving", battler);
            return Ok(());
        };
        let species = pokemon.species;
        let instance = pokemon
            .moves
            .get(move_slot)
            .cloned()
            .flatten()
            .ok_or(ActionError::InvalidMoveIndex(move_slot))?;
        let move_used = instance.move_;

        if instance.pp == 0 {
            self.events.push(BattleEvent::MoveFailed {
                battler,
                species,
                move_used,
                reason: ActionFailureReason::NoPpRemaining,
            });
            return Ok(());
        }

        self.execute(vec![
            BattleCommand::UseMovePp { battler, move_slot },
            BattleCommand::EmitEvent(BattleEvent::MoveUsed {
                battler,
                species,
                move_used,
            }),
        ])?;

        let move_data = get_move_data(move_used)?;
        let targets = self.resolve_targets(battler, move_data.target, chosen_target);
        if targets.is_empty() {
            self.events.push(BattleEvent::MoveFailed {
                battler,
                species,
                move_used,
                reason: ActionFailureReason::NoTarget,
            });
            return Ok(());
        }

        // Only opponents can dodge
        let mut hit = Vec::with_capacity(targets.len());
        for target in targets {
            let dodges = target.side() != battler.side()
                && !move_hits(&self.state, battler, target, move_data, &mut self.rng);
            if dodges {
                let defender_species = self.state.combatant(target)?.species;
                self.events.push(BattleEvent::MoveMissed {
                    attacker: battler,
                    defender: target,
                    defender_species,
                    move_used,
                });
            } else {
                hit.push(target);
            }
        }

        if !hit.is_empty() {
            self.queue.unshift(Phase::MoveEffect {
                battler,
                move_used,
                targets: hit,
            });
        }
        Ok(())
    }

    fn resolve_targets(
        &self,
        battler: BattlerIndex,
        move_target: MoveTarget,
        chosen: Option<BattlerIndex>,
    ) -> Vec<BattlerIndex> {
        let field = &self.state.field;
        match move_target {
            MoveTarget::User => vec![battler],
            MoveTarget::SelectedOpponent => {
                let opponents = field.opponents_of(battler);
                // Redirect to the first remaining opponent if the chosen one is gone
                match chosen.filter(|target| opponents.contains(target)) {
                    Some(target) => vec![target],
                    None => opponents.into_iter().take(1).collect(),
                }
            }
            MoveTarget::AllOpponents => field.opponents_of(battler),
            MoveTarget::BothSides => field.battlers(),
        }
    }

    fn run_move_effect(
        &mut self,
        battler: BattlerIndex,
        move_used: Move,
        targets: Vec<BattlerIndex>,
    ) -> BattleResult<()> {
        let move_data = get_move_data(move_used)?;
        let context = EffectContext::new(battler, targets, move_used);

        // Each effect sees the state left by the previous one
        for effect in &move_data.effects {
            let commands = effect.apply(&context, &self.state);
            self.execute(commands)?;
        }
        Ok(())
    }

    fn run_switch(&mut self, battler: BattlerIndex, party_index: usize) -> BattleResult<()> {
        let side = battler.side();
        if self.state.player(side).pokemon(party_index).is_none()
            || self.state.field.is_on_field(side, party_index)
        {
            log::warn!("{} cannot switch to party member {}", battler, party_index);
            return Ok(());
        }

        let mut commands = Vec::new();
        if self.state.field.is_occupied(battler) {
            commands.push(BattleCommand::LeaveField { battler });
        }
        commands.push(BattleCommand::EnterField {
            battler,
            party_index,
        });
        self.execute(commands)
    }

    fn run_battle_end(&mut self, outcome: GameState) -> BattleResult<()> {
        log::info!(
            "battle {} ended after {} turns: {:?}",
            self.state.battle_id,
            self.state.turn_number,
            outcome
        );
        self.execute(vec![
            BattleCommand::SetGameState(outcome),
            BattleCommand::EmitEvent(BattleEvent::BattleEnded {
                winner: outcome.winner(),
            }),
            BattleCommand::ClearField,
        ])?;
        self.queue.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::state::BattleFormat;
    use crate::battle::tests::common::{create_test_player, TestPokemonBuilder};
    use pretty_assertions::assert_eq;
    use schema::{BattleStat, Species};

    fn engine(player_moves: Vec<Move>, enemy_moves: Vec<Move>, rng: TurnRng) -> BattleEngine {
        let player = create_test_player(
            "p1",
            "Player",
            vec![
                TestPokemonBuilder::new(Species::Rattata, 100)
                    .with_moves(player_moves)
                    .build(),
                TestPokemonBuilder::new(Species::Raticate, 100).build(),
            ],
        );
        let enemy = create_test_player(
            "p2",
            "Wild",
            vec![TestPokemonBuilder::new(Species::Rattata, 100)
                .with_moves(enemy_moves)
                .build()],
        );
        let state = BattleState::new("engine".to_string(), BattleFormat::Single, player, enemy);
        BattleEngine::new(state, rng)
    }

    #[test]
    fn test_start_runs_until_first_command() {
        let mut engine = engine(vec![Move::SwordsDance], vec![Move::Splash], TurnRng::new_for_test(vec![]));
        assert_eq!(
            engine.run_until_input().expect("start"),
            PhaseStep::AwaitingInput(BattlerIndex::Player)
        );
        assert_eq!(engine.state().turn_number, 1);
        assert_eq!(
            engine.queued_phases(),
            vec![PhaseKind::Command, PhaseKind::EnemyCommand, PhaseKind::TurnStart]
        );
        assert!(matches!(
            engine.events().events(),
            [
                BattleEvent::BattleStarted { .. },
                BattleEvent::WildPokemonAppeared { .. },
                BattleEvent::PokemonSentOut { .. },
                BattleEvent::PokemonSentOut { .. },
                BattleEvent::TurnStarted { turn_number: 1 },
            ]
        ));
    }

    #[test]
    fn test_command_phase_blocks_until_action_submitted() {
        let mut engine = engine(vec![Move::SwordsDance], vec![Move::Splash], TurnRng::new_for_test(vec![]));
        engine.run_until_input().expect("start");

        // Running again without an action keeps waiting
        assert_eq!(
            engine.run_next_phase().expect("step"),
            PhaseStep::AwaitingInput(BattlerIndex::Player)
        );

        let battler = engine
            .submit_action(PlayerAction::UseMove {
                move_index: 0,
                target: None,
            })
            .expect("valid action");
        assert_eq!(battler, BattlerIndex::Player);
        assert_eq!(
            engine.run_next_phase().expect("step"),
            PhaseStep::Ran(PhaseKind::Command)
        );
    }

    #[test]
    fn test_full_turn_applies_move_and_spends_pp() {
        // 1 roll for the speed tie between two level 100 Rattata
        let mut engine = engine(
            vec![Move::SwordsDance],
            vec![Move::Splash],
            TurnRng::new_for_test(vec![1]),
        );
        engine.run_until_input().expect("start");
        engine
            .submit_action(PlayerAction::UseMove {
                move_index: 0,
                target: None,
            })
            .expect("valid action");

        assert_eq!(
            engine.run_until_input().expect("turn"),
            PhaseStep::AwaitingInput(BattlerIndex::Player)
        );
        assert_eq!(engine.state().turn_number, 2);
        assert_eq!(engine.state().stat_stage(BattlerIndex::Player, BattleStat::Atk), 2);

        let swords_dance = engine.state().players[0].team[0].moves[0]
            .as_ref()
            .expect("Swords Dance slot");
        assert_eq!(swords_dance.pp, swords_dance.max_pp() - 1);
        assert!(engine
            .events()
            .events()
            .contains(&BattleEvent::NothingHappened));
    }

    #[test]
    fn test_invalid_actions_are_rejected() {
        let mut engine = engine(vec![Move::SwordsDance], vec![Move::Splash], TurnRng::new_for_test(vec![]));
        engine.run_until_input().expect("start");

        let bad_index = engine.submit_action(PlayerAction::UseMove {
            move_index: 3,
            target: None,
        });
        assert!(matches!(
            bad_index,
            Err(crate::errors::BattleEngineError::Action(ActionError::InvalidMoveIndex(3)))
        ));

        let own_side = engine.submit_action(PlayerAction::UseMove {
            move_index: 0,
            target: Some(BattlerIndex::PlayerTwo),
        });
        assert!(own_side.is_err());

        let active_member = engine.submit_action(PlayerAction::SwitchPokemon { team_index: 0 });
        assert!(active_member.is_err());

        let missing_member = engine.submit_action(PlayerAction::SwitchPokemon { team_index: 4 });
        assert!(matches!(
            missing_member,
            Err(crate::errors::BattleEngineError::Action(ActionError::InvalidPokemonIndex(4)))
        ));

        // Nothing was recorded
        assert_eq!(engine.awaiting_input(), Some(BattlerIndex::Player));
    }

    #[test]
    fn test_submit_without_pending_command() {
        let mut engine = engine(vec![Move::SwordsDance], vec![Move::Splash], TurnRng::new_for_test(vec![]));
        let result = engine.submit_action(PlayerAction::Forfeit);
        assert!(matches!(
            result,
            Err(crate::errors::BattleEngineError::Action(ActionError::NoBattlerAwaitingCommand))
        ));
    }

    #[test]
    fn test_forfeit_ends_battle_and_clears_field() {
        let mut engine = engine(vec![Move::SwordsDance], vec![Move::Splash], TurnRng::new_for_test(vec![]));
        engine.run_until_input().expect("start");
        engine.submit_action(PlayerAction::Forfeit).expect("forfeit");

        assert_eq!(engine.run_until_input().expect("end"), PhaseStep::Finished);
        assert_eq!(engine.state().game_state, GameState::EnemyWin);
        assert!(engine.state().field.is_empty());
        assert!(engine
            .events()
            .events()
            .contains(&BattleEvent::BattleEnded {
                winner: Some(Side::Enemy)
            }));

        let late = engine.submit_action(PlayerAction::Forfeit);
        assert!(matches!(
            late,
            Err(crate::errors::BattleEngineError::BattleState(BattleStateError::BattleOver))
        ));
    }

    #[test]
    fn test_empty_party_is_an_error() {
        let player = create_test_player("p1", "Player", vec![]);
        let enemy = create_test_player(
            "p2",
            "Wild",
            vec![TestPokemonBuilder::new(Species::Rattata, 5).build()],
        );
        let state = BattleState::new("empty".to_string(), BattleFormat::Single, player, enemy);
        let mut engine = BattleEngine::new(state, TurnRng::new_for_test(vec![]));

        assert!(matches!(
            engine.run_next_phase(),
            Err(crate::errors::BattleEngineError::BattleState(BattleStateError::EmptyParty(_)))
        ));
    }
}
