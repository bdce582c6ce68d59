use super::EffectContext;
use crate::battle::commands::BattleCommand;
use crate::battle::events::BattleEvent;

pub(super) fn apply_splash_effect(context: &EffectContext) -> Vec<BattleCommand> {
    log::debug!("{} splashed around", context.user);
    vec![BattleCommand::EmitEvent(BattleEvent::NothingHappened)]
}
