// Move effect dispatch. Helpers live in private submodules and only
// ever read the battle state; the commands they return are executed by
// the phase that resolved the move.
mod special_effects;
mod stat_effects;

use crate::battle::commands::BattleCommand;
use crate::battle::field::BattlerIndex;
use crate::battle::state::BattleState;
use schema::{Move, MoveEffect, Target};

use self::{special_effects::*, stat_effects::*};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectContext {
    pub user: BattlerIndex,
    /// Battlers the move hit, after accuracy checks.
    pub targets: Vec<BattlerIndex>,
    pub move_used: Move,
}

impl EffectContext {
    pub fn new(user: BattlerIndex, targets: Vec<BattlerIndex>, move_used: Move) -> Self {
        Self {
            user,
            targets,
            move_used,
        }
    }

    /// Battlers an effect with the given target lands on.
    pub fn receivers(&self, target: &Target) -> Vec<BattlerIndex> {
        match target {
            Target::User => vec![self.user],
            Target::Target => self.targets.clone(),
        }
    }
}

pub trait BattleMoveEffectExt {
    fn apply(&self, context: &EffectContext, state: &BattleState) -> Vec<BattleCommand>;
}

impl BattleMoveEffectExt for MoveEffect {
    fn apply(&self, context: &EffectContext, state: &BattleState) -> Vec<BattleCommand> {
        match self {
            Self::StatChange(target, stat, stages) => {
                apply_stat_change_effect(target, *stat, *stages, context, state)
            }
            Self::Haze => apply_haze_effect(context, state),
            Self::Splash => apply_splash_effect(context),
        }
    }
}
