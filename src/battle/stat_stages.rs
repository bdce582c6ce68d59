use schema::BattleStat;
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};

pub const MIN_STAT_STAGE: i8 = -6;
pub const MAX_STAT_STAGE: i8 = 6;

/// Result of a clamped stage modification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageChange {
    pub old: i8,
    pub new: i8,
}

impl StageChange {
    /// Stages actually applied after clamping.
    pub fn applied(&self) -> i8 {
        self.new - self.old
    }

    pub fn is_noop(&self) -> bool {
        self.old == self.new
    }
}

/// Per-combatant stage modifiers for the seven battle stats.
///
/// Every entry stays within `MIN_STAT_STAGE..=MAX_STAT_STAGE`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatStageTable {
    stages: [i8; BattleStat::COUNT],
}

impl StatStageTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current stage for a stat (0 if never modified)
    pub fn get(&self, stat: BattleStat) -> i8 {
        self.stages[stat.index()]
    }

    /// Set the stage for a stat, clamped to -6..=6. Returns the stored value.
    pub fn set(&mut self, stat: BattleStat, stage: i8) -> i8 {
        let clamped = stage.clamp(MIN_STAT_STAGE, MAX_STAT_STAGE);
        self.stages[stat.index()] = clamped;
        clamped
    }

    /// Modify the stage for a stat by a delta, clamped to -6..=6
    pub fn modify(&mut self, stat: BattleStat, delta: i8) -> StageChange {
        let old = self.get(stat);
        let new = self.set(stat, old.saturating_add(delta));
        StageChange { old, new }
    }

    /// Where a modification would land, without applying it.
    pub fn preview(&self, stat: BattleStat, delta: i8) -> StageChange {
        let old = self.get(stat);
        StageChange {
            old,
            new: old.saturating_add(delta).clamp(MIN_STAT_STAGE, MAX_STAT_STAGE),
        }
    }

    /// Force every stage back to 0, returning the stats that were non-zero
    /// together with their previous stage.
    pub fn reset(&mut self) -> Vec<(BattleStat, i8)> {
        let previous: Vec<(BattleStat, i8)> = self.non_zero().collect();
        self.stages = [0; BattleStat::COUNT];
        previous
    }

    /// True when no stat carries a modifier.
    pub fn is_neutral(&self) -> bool {
        self.stages.iter().all(|stage| *stage == 0)
    }

    /// All stats with their stage, in stat order.
    pub fn iter(&self) -> impl Iterator<Item = (BattleStat, i8)> + '_ {
        BattleStat::iter().map(move |stat| (stat, self.get(stat)))
    }

    /// Stats whose stage is not 0.
    pub fn non_zero(&self) -> impl Iterator<Item = (BattleStat, i8)> + '_ {
        self.iter().filter(|(_, stage)| *stage != 0)
    }
}

/// Multiplier applied to ATK/DEF/SPATK/SPDEF/SPD for a stage.
/// Negative stages: 2 / (2 + |stage|), positive stages: (2 + stage) / 2
pub fn stat_stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(MIN_STAT_STAGE, MAX_STAT_STAGE) as f64;
    if stage < 0.0 {
        2.0 / (2.0 - stage)
    } else {
        (2.0 + stage) / 2.0
    }
}

/// Multiplier applied to accuracy for a combined accuracy-evasion stage.
/// Negative stages: 3 / (3 + |stage|), positive stages: (3 + stage) / 3
pub fn accuracy_stage_multiplier(stage: i8) -> f64 {
    let stage = stage.clamp(MIN_STAT_STAGE, MAX_STAT_STAGE) as f64;
    if stage < 0.0 {
        3.0 / (3.0 - stage)
    } else {
        (3.0 + stage) / 3.0
    }
}

/// Apply a stat stage multiplier to a raw stat value.
pub fn apply_stat_stage(base_stat: u16, stage: i8) -> u16 {
    if stage == 0 {
        return base_stat;
    }
    ((base_stat as f64) * stat_stage_multiplier(stage)).round() as u16
}
