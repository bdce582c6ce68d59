use crate::battle::stat_stages::StatStageTable;
use crate::pokemon::PokemonInst;
use schema::{Ability, Species};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side of the field a battler belongs to.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    /// Index into `BattleState::players`.
    pub fn index(self) -> usize {
        match self {
            Side::Player => 0,
            Side::Enemy => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// A slot on the field. Single battles only use `Player` and `Enemy`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BattlerIndex {
    Player = 0,
    PlayerTwo = 1,
    Enemy = 2,
    EnemyTwo = 3,
}

impl BattlerIndex {
    pub const ALL: [BattlerIndex; 4] = [
        BattlerIndex::Player,
        BattlerIndex::PlayerTwo,
        BattlerIndex::Enemy,
        BattlerIndex::EnemyTwo,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn side(self) -> Side {
        match self {
            BattlerIndex::Player | BattlerIndex::PlayerTwo => Side::Player,
            BattlerIndex::Enemy | BattlerIndex::EnemyTwo => Side::Enemy,
        }
    }

    /// Position within the side: 0 for the lead slot, 1 for the second.
    pub fn position(self) -> usize {
        match self {
            BattlerIndex::Player | BattlerIndex::Enemy => 0,
            BattlerIndex::PlayerTwo | BattlerIndex::EnemyTwo => 1,
        }
    }

    pub fn from_side(side: Side, position: usize) -> Option<BattlerIndex> {
        match (side, position) {
            (Side::Player, 0) => Some(BattlerIndex::Player),
            (Side::Player, 1) => Some(BattlerIndex::PlayerTwo),
            (Side::Enemy, 0) => Some(BattlerIndex::Enemy),
            (Side::Enemy, 1) => Some(BattlerIndex::EnemyTwo),
            _ => None,
        }
    }
}

impl fmt::Display for BattlerIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Stable identity of a combatant. Never reused within one battle.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CombatantId(pub u32);

/// A party member while it is on the field. Owns the only stat stage table
/// for that Pokemon; the table is discarded when the combatant leaves.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Combatant {
    pub id: CombatantId,
    pub side: Side,
    pub party_index: usize,
    pub species: Species,
    pub name: String,
    pub level: u8,
    pub ability: Ability,
    pub stat_stages: StatStageTable,
}

/// The battle's arena of combatants, indexed by battler slot.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct Field {
    slots: [Option<Combatant>; 4],
    next_id: u32,
}

impl Field {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a party member in a slot with a fresh stage table.
    /// Whatever occupied the slot before is returned.
    pub fn enter(
        &mut self,
        battler: BattlerIndex,
        party_index: usize,
        pokemon: &PokemonInst,
    ) -> (CombatantId, Option<Combatant>) {
        let id = CombatantId(self.next_id);
        self.next_id += 1;

        let combatant = Combatant {
            id,
            side: battler.side(),
            party_index,
            species: pokemon.species,
            name: pokemon.name.clone(),
            level: pokemon.level,
            ability: pokemon.ability,
            stat_stages: StatStageTable::new(),
        };
        let previous = self.slots[battler.index()].replace(combatant);
        (id, previous)
    }

    /// Remove the combatant in a slot, dropping its stage table.
    pub fn leave(&mut self, battler: BattlerIndex) -> Option<Combatant> {
        self.slots[battler.index()].take()
    }

    pub fn get(&self, battler: BattlerIndex) -> Option<&Combatant> {
        self.slots[battler.index()].as_ref()
    }

    pub fn get_mut(&mut self, battler: BattlerIndex) -> Option<&mut Combatant> {
        self.slots[battler.index()].as_mut()
    }

    pub fn find(&self, id: CombatantId) -> Option<(BattlerIndex, &Combatant)> {
        self.active().find(|(_, combatant)| combatant.id == id)
    }

    pub fn is_occupied(&self, battler: BattlerIndex) -> bool {
        self.slots[battler.index()].is_some()
    }

    /// Every occupied slot, in battler order.
    pub fn active(&self) -> impl Iterator<Item = (BattlerIndex, &Combatant)> {
        BattlerIndex::ALL
            .into_iter()
            .filter_map(move |battler| self.get(battler).map(|combatant| (battler, combatant)))
    }

    /// Occupied battler slots, in order.
    pub fn battlers(&self) -> Vec<BattlerIndex> {
        self.active().map(|(battler, _)| battler).collect()
    }

    pub fn battlers_on(&self, side: Side) -> Vec<BattlerIndex> {
        self.active()
            .filter(|(battler, _)| battler.side() == side)
            .map(|(battler, _)| battler)
            .collect()
    }

    pub fn opponents_of(&self, battler: BattlerIndex) -> Vec<BattlerIndex> {
        self.battlers_on(battler.side().opponent())
    }

    /// Whether the party member is currently on the field.
    pub fn is_on_field(&self, side: Side, party_index: usize) -> bool {
        self.active()
            .any(|(_, combatant)| combatant.side == side && combatant.party_index == party_index)
    }

    /// Set every stage of the battler's table to 0, reporting what was cleared.
    pub fn reset_stat_stages(&mut self, battler: BattlerIndex) -> Vec<(schema::BattleStat, i8)> {
        self.get_mut(battler)
            .map(|combatant| combatant.stat_stages.reset())
            .unwrap_or_default()
    }

    /// Discard every combatant.
    pub fn clear(&mut self) -> Vec<Combatant> {
        self.slots.iter_mut().filter_map(Option::take).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pokemon::get_species_data;
    use pretty_assertions::assert_eq;
    use schema::BattleStat;

    fn rattata() -> PokemonInst {
        let data = get_species_data(Species::Rattata).expect("Rattata data");
        PokemonInst::new(Species::Rattata, data, 100, None, None)
    }

    #[test]
    fn test_battler_index_sides() {
        assert_eq!(BattlerIndex::Player.side(), Side::Player);
        assert_eq!(BattlerIndex::PlayerTwo.side(), Side::Player);
        assert_eq!(BattlerIndex::Enemy.side(), Side::Enemy);
        assert_eq!(BattlerIndex::EnemyTwo.side(), Side::Enemy);
        assert_eq!(
            BattlerIndex::from_side(Side::Enemy, 1),
            Some(BattlerIndex::EnemyTwo)
        );
        assert_eq!(BattlerIndex::from_side(Side::Player, 2), None);
    }

    #[test]
    fn test_enter_creates_fresh_combatant() {
        let mut field = Field::new();
        let (first_id, previous) = field.enter(BattlerIndex::Player, 0, &rattata());
        assert!(previous.is_none());

        field
            .get_mut(BattlerIndex::Player)
            .expect("combatant")
            .stat_stages
            .set(BattleStat::Atk, 2);

        // Re-entering the slot replaces the combatant and its stages.
        let (second_id, previous) = field.enter(BattlerIndex::Player, 0, &rattata());
        assert_ne!(first_id, second_id);
        let previous = previous.expect("previous combatant");
        assert_eq!(previous.stat_stages.get(BattleStat::Atk), 2);
        assert!(field
            .get(BattlerIndex::Player)
            .expect("combatant")
            .stat_stages
            .is_neutral());
    }

    #[test]
    fn test_active_and_opponents() {
        let mut field = Field::new();
        field.enter(BattlerIndex::Enemy, 0, &rattata());
        field.enter(BattlerIndex::Player, 0, &rattata());
        field.enter(BattlerIndex::EnemyTwo, 1, &rattata());

        assert_eq!(
            field.battlers(),
            vec![BattlerIndex::Player, BattlerIndex::Enemy, BattlerIndex::EnemyTwo]
        );
        assert_eq!(
            field.opponents_of(BattlerIndex::Player),
            vec![BattlerIndex::Enemy, BattlerIndex::EnemyTwo]
        );
        assert_eq!(
            field.opponents_of(BattlerIndex::EnemyTwo),
            vec![BattlerIndex::Player]
        );
        assert!(field.is_on_field(Side::Enemy, 1));
        assert!(!field.is_on_field(Side::Player, 1));
    }

    #[test]
    fn test_leave_and_clear() {
        let mut field = Field::new();
        field.enter(BattlerIndex::Player, 0, &rattata());
        field.enter(BattlerIndex::Enemy, 0, &rattata());

        let left = field.leave(BattlerIndex::Player).expect("combatant");
        assert_eq!(left.species, Species::Rattata);
        assert!(!field.is_occupied(BattlerIndex::Player));

        assert_eq!(field.clear().len(), 1);
        assert!(field.is_empty());
    }

    #[test]
    fn test_ids_are_never_reused() {
        let mut field = Field::new();
        let (a, _) = field.enter(BattlerIndex::Player, 0, &rattata());
        field.clear();
        let (b, _) = field.enter(BattlerIndex::Player, 0, &rattata());
        assert!(b > a);
        assert_eq!(field.find(b).map(|(battler, _)| battler), Some(BattlerIndex::Player));
        assert!(field.find(a).is_none());
    }
}
