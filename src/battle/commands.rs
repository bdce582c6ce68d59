use crate::battle::events::{BattleEvent, EventBus};
use crate::battle::field::BattlerIndex;
use crate::battle::state::{BattleState, GameState};
use crate::errors::BattleStateError;
use schema::BattleStat;

/// Atomic commands representing final state changes
#[derive(Debug, Clone, PartialEq)]
pub enum BattleCommand {
    // Direct state changes
    SetGameState(GameState),
    IncrementTurnNumber,
    ClearActionQueue,

    // Combatant modifications
    ChangeStatStage {
        target: BattlerIndex,
        stat: BattleStat,
        delta: i8,
    },
    ResetStatStages {
        target: BattlerIndex,
    },
    UseMovePp {
        battler: BattlerIndex,
        move_slot: usize,
    },

    // Field membership
    EnterField {
        battler: BattlerIndex,
        party_index: usize,
    },
    LeaveField {
        battler: BattlerIndex,
    },
    ClearField,

    // Battle flow
    EmitEvent(BattleEvent),
}

/// Execute a batch of commands in order, stopping at the first failure
pub fn execute_command_batch(
    commands: Vec<BattleCommand>,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> Result<(), BattleStateError> {
    for command in commands {
        execute_command(command, state, bus)?;
    }
    Ok(())
}

fn execute_command(
    command: BattleCommand,
    state: &mut BattleState,
    bus: &mut EventBus,
) -> Result<(), BattleStateError> {
    match command {
        BattleCommand::EmitEvent(event) => {
            bus.push(event);
            Ok(())
        }
        BattleCommand::SetGameState(game_state) => {
            state.game_state = game_state;
            Ok(())
        }
        BattleCommand::IncrementTurnNumber => {
            state.turn_number += 1;
            Ok(())
        }
        BattleCommand::ClearActionQueue => {
            state.action_queue = [const { None }; 4];
            Ok(())
        }
        BattleCommand::ChangeStatStage {
            target,
            stat,
            delta,
        } => {
            let combatant = state
                .field
                .get_mut(target)
                .ok_or(BattleStateError::NoActivePokemon(target))?;
            let change = combatant.stat_stages.modify(stat, delta);
            if !change.is_noop() {
                bus.push(BattleEvent::StatStageChanged {
                    target,
                    species: combatant.species,
                    stat,
                    old_stage: change.old,
                    new_stage: change.new,
                });
            }
            Ok(())
        }
        BattleCommand::ResetStatStages { target } => {
            let species = state.combatant(target)?.species;
            for (stat, old_stage) in state.field.reset_stat_stages(target) {
                bus.push(BattleEvent::StatStageReset {
                    target,
                    species,
                    stat,
                    old_stage,
                });
            }
            Ok(())
        }
        BattleCommand::UseMovePp { battler, move_slot } => {
            let pokemon = state
                .active_pokemon_mut(battler)
                .ok_or(BattleStateError::NoActivePokemon(battler))?;
            let instance = pokemon
                .moves
                .get_mut(move_slot)
                .and_then(Option::as_mut)
                .ok_or_else(|| {
                    BattleStateError::InconsistentState(format!(
                        "{} has no move in slot {}",
                        battler, move_slot
                    ))
                })?;
            if instance.use_move() {
                Ok(())
            } else {
                Err(BattleStateError::InconsistentState(format!(
                    "{:?} used with no PP left",
                    instance.move_
                )))
            }
        }
        BattleCommand::EnterField {
            battler,
            party_index,
        } => {
            let side = battler.side();
            let pokemon = state
                .player(side)
                .pokemon(party_index)
                .ok_or_else(|| {
                    BattleStateError::InconsistentState(format!(
                        "{:?} party has no member {}",
                        side, party_index
                    ))
                })?
                .clone();
            if state.field.is_on_field(side, party_index) {
                return Err(BattleStateError::InconsistentState(format!(
                    "{} is already on the field",
                    pokemon.name
                )));
            }
            state.field.enter(battler, party_index, &pokemon);
            bus.push(BattleEvent::PokemonSentOut {
                battler,
                species: pokemon.species,
            });
            Ok(())
        }
        BattleCommand::LeaveField { battler } => {
            let combatant = state
                .field
                .leave(battler)
                .ok_or(BattleStateError::NoActivePokemon(battler))?;
            bus.push(BattleEvent::PokemonRecalled {
                battler,
                species: combatant.species,
            });
            Ok(())
        }
        BattleCommand::ClearField => {
            let removed = state.field.clear();
            log::debug!("cleared {} combatants from the field", removed.len());
            Ok(())
        }
    }
}
