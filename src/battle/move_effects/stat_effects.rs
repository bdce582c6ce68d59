use super::EffectContext;
use crate::battle::commands::BattleCommand;
use crate::battle::events::{BattleEvent, StatBlockReason};
use crate::battle::field::BattlerIndex;
use crate::battle::state::BattleState;
use schema::{Ability, BattleStat, Target};

/// Apply stat change effect to every battler the target resolves to.
pub(super) fn apply_stat_change_effect(
    target: &Target,
    stat: BattleStat,
    stages: i8,
    context: &EffectContext,
    state: &BattleState,
) -> Vec<BattleCommand> {
    context
        .receivers(target)
        .into_iter()
        .flat_map(|receiver| stat_change_for(receiver, stat, stages, context, state))
        .collect()
}

fn stat_change_for(
    receiver: BattlerIndex,
    stat: BattleStat,
    stages: i8,
    context: &EffectContext,
    state: &BattleState,
) -> Vec<BattleCommand> {
    let Some(combatant) = state.field.get(receiver) else {
        return Vec::new();
    };

    let stages = match combatant.ability {
        Ability::Simple => stages.saturating_mul(2),
        Ability::Contrary => stages.saturating_neg(),
        _ => stages,
    };
    if stages == 0 {
        return Vec::new();
    }

    let caused_by_other = receiver != context.user;
    if caused_by_other && stages < 0 && blocks_drop(combatant.ability, stat) {
        return vec![BattleCommand::EmitEvent(BattleEvent::StatChangeBlocked {
            target: receiver,
            species: combatant.species,
            stat,
            reason: StatBlockReason::Ability(combatant.ability),
        })];
    }

    let change = combatant.stat_stages.preview(stat, stages);
    if change.is_noop() {
        let reason = if stages > 0 {
            StatBlockReason::WontGoHigher
        } else {
            StatBlockReason::WontGoLower
        };
        return vec![BattleCommand::EmitEvent(BattleEvent::StatChangeBlocked {
            target: receiver,
            species: combatant.species,
            stat,
            reason,
        })];
    }

    vec![BattleCommand::ChangeStatStage {
        target: receiver,
        stat,
        delta: change.applied(),
    }]
}

fn blocks_drop(ability: Ability, stat: BattleStat) -> bool {
    match ability {
        Ability::ClearBody => true,
        Ability::HyperCutter => stat == BattleStat::Atk,
        Ability::KeenEye => stat == BattleStat::Acc,
        _ => false,
    }
}

/// Apply haze effect: every combatant on the field, either side, loses all
/// of its stat stages. Abilities do not interfere.
pub(super) fn apply_haze_effect(context: &EffectContext, state: &BattleState) -> Vec<BattleCommand> {
    let mut commands: Vec<BattleCommand> = state
        .field
        .active()
        .filter(|(_, combatant)| !combatant.stat_stages.is_neutral())
        .map(|(battler, _)| BattleCommand::ResetStatStages { target: battler })
        .collect();
    log::debug!(
        "{} used {:?}: resetting {} combatants",
        context.user,
        context.move_used,
        commands.len()
    );

    commands.push(BattleCommand::EmitEvent(BattleEvent::StatChangesEliminated));
    commands
}
