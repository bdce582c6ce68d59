use crate::battle::field::{BattlerIndex, Side};
use crate::battle::state::{BattleFormat, BattleState};
use crate::errors::LocaleResult;
use crate::i18n::{TextContext, Translator};
use schema::{Ability, BattleStat, Move, Species};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionFailureReason {
    NoPpRemaining,
    NoTarget, // every opponent left the field before the move resolved
}

/// Why a stat stage change did not happen.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatBlockReason {
    WontGoHigher,
    WontGoLower,
    Ability(Ability),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum BattleEvent {
    // Battle flow
    BattleStarted {
        battle_id: String,
        format: BattleFormat,
    },
    WildPokemonAppeared {
        battler: BattlerIndex,
        species: Species,
    },
    PokemonSentOut {
        battler: BattlerIndex,
        species: Species,
    },
    PokemonRecalled {
        battler: BattlerIndex,
        species: Species,
    },
    TurnStarted {
        turn_number: u32,
    },
    TurnEnded {
        turn_number: u32,
    },

    // Moves
    MoveUsed {
        battler: BattlerIndex,
        species: Species,
        move_used: Move,
    },
    MoveMissed {
        attacker: BattlerIndex,
        defender: BattlerIndex,
        defender_species: Species,
        move_used: Move,
    },
    MoveFailed {
        battler: BattlerIndex,
        species: Species,
        move_used: Move,
        reason: ActionFailureReason,
    },
    NothingHappened,

    // Stat stages
    StatStageChanged {
        target: BattlerIndex,
        species: Species,
        stat: BattleStat,
        old_stage: i8,
        new_stage: i8,
    },
    StatChangeBlocked {
        target: BattlerIndex,
        species: Species,
        stat: BattleStat,
        reason: StatBlockReason,
    },
    StatStageReset {
        target: BattlerIndex,
        species: Species,
        stat: BattleStat,
        old_stage: i8,
    },
    StatChangesEliminated,

    // Battle end
    PlayerForfeited {
        side: Side,
    },
    BattleEnded {
        winner: Option<Side>,
    },
}

impl BattleEvent {
    /// Formats the event into localized text using battle context.
    /// Returns None for silent events that should not produce user-visible text.
    pub fn format(
        &self,
        battle_state: &BattleState,
        translator: &Translator,
    ) -> LocaleResult<Option<String>> {
        let text = match self {
            BattleEvent::BattleStarted { .. } => None,
            BattleEvent::WildPokemonAppeared { species, .. } => Some(translator.t(
                "battle:wildPokemonAppeared",
                &TextContext::new().with("pokemonName", translator.species_name(*species)?),
            )?),
            BattleEvent::PokemonSentOut { battler, species } => match battler.side() {
                Side::Player => Some(translator.t(
                    "battle:playerGo",
                    &TextContext::new().with("pokemonName", translator.species_name(*species)?),
                )?),
                // Wild Pokemon are announced by their appearance message
                Side::Enemy => None,
            },
            BattleEvent::PokemonRecalled { battler, species } => match battler.side() {
                Side::Player => Some(translator.t(
                    "battle:playerComeBack",
                    &TextContext::new().with("pokemonName", translator.species_name(*species)?),
                )?),
                Side::Enemy => None,
            },
            BattleEvent::TurnStarted { turn_number } => Some(translator.t(
                "battle:turn",
                &TextContext::new().with("turnNumber", turn_number.to_string()),
            )?),
            BattleEvent::TurnEnded { .. } => None,

            BattleEvent::MoveUsed {
                battler,
                species,
                move_used,
            } => Some(translator.t(
                "battle:useMove",
                &TextContext::new()
                    .with(
                        "pokemonNameWithAffix",
                        Self::pokemon_name_with_affix(translator, *battler, *species)?,
                    )
                    .with("moveName", translator.move_name(*move_used)?),
            )?),
            BattleEvent::MoveMissed {
                defender,
                defender_species,
                ..
            } => Some(translator.t(
                "battle:attackMissed",
                &TextContext::new().with(
                    "pokemonNameWithAffix",
                    Self::pokemon_name_with_affix(translator, *defender, *defender_species)?,
                ),
            )?),
            BattleEvent::MoveFailed {
                battler,
                species,
                move_used,
                reason,
            } => match reason {
                ActionFailureReason::NoPpRemaining => Some(translator.t(
                    "battle:noPpLeft",
                    &TextContext::new()
                        .with(
                            "pokemonNameWithAffix",
                            Self::pokemon_name_with_affix(translator, *battler, *species)?,
                        )
                        .with("moveName", translator.move_name(*move_used)?),
                )?),
                ActionFailureReason::NoTarget => {
                    Some(translator.t("battle:attackFailed", &TextContext::new())?)
                }
            },
            BattleEvent::NothingHappened => {
                Some(translator.t("battle:splashNothingHappened", &TextContext::new())?)
            }

            BattleEvent::StatStageChanged {
                target,
                species,
                stat,
                old_stage,
                new_stage,
            } => {
                match Self::stat_change_key(new_stage - old_stage) {
                    Some(key) => Some(translator.t(
                        key,
                        &Self::stat_context(translator, *target, *species, *stat)?,
                    )?),
                    None => None,
                }
            }
            BattleEvent::StatChangeBlocked {
                target,
                species,
                stat,
                reason,
            } => {
                let context = Self::stat_context(translator, *target, *species, *stat)?;
                Some(match reason {
                    StatBlockReason::WontGoHigher => {
                        translator.t("battle:statWontGoAnyHigher", &context)?
                    }
                    StatBlockReason::WontGoLower => {
                        translator.t("battle:statWontGoAnyLower", &context)?
                    }
                    StatBlockReason::Ability(ability) => translator.t(
                        "battle:statChangeBlockedByAbility",
                        &context.with("abilityName", translator.ability_name(*ability)?),
                    )?,
                })
            }
            // Covered by the single "eliminated" message
            BattleEvent::StatStageReset { .. } => None,
            BattleEvent::StatChangesEliminated => {
                Some(translator.t("battle:statChangesEliminated", &TextContext::new())?)
            }

            BattleEvent::PlayerForfeited { side } => Some(translator.t(
                "battle:battleForfeit",
                &TextContext::new().with("playerName", &battle_state.player(*side).player_name),
            )?),
            BattleEvent::BattleEnded { .. } => None,
        };
        Ok(text)
    }

    /// Enemy Pokemon carry the "wild" affix, the player's do not.
    fn pokemon_name_with_affix(
        translator: &Translator,
        battler: BattlerIndex,
        species: Species,
    ) -> LocaleResult<String> {
        let name = translator.species_name(species)?;
        match battler.side() {
            Side::Player => Ok(name.to_string()),
            Side::Enemy => translator.t(
                "battle:wildPokemonWithAffix",
                &TextContext::new().with("pokemonName", name),
            ),
        }
    }

    fn stat_context(
        translator: &Translator,
        target: BattlerIndex,
        species: Species,
        stat: BattleStat,
    ) -> LocaleResult<TextContext> {
        Ok(TextContext::new()
            .with(
                "pokemonNameWithAffix",
                Self::pokemon_name_with_affix(translator, target, species)?,
            )
            .with("stats", translator.stat_name(stat)?))
    }

    /// No key for a zero change; there is nothing to report.
    fn stat_change_key(applied: i8) -> Option<&'static str> {
        match applied {
            i8::MIN..=-3 => Some("battle:statSeverelyFell"),
            -2 => Some("battle:statHarshlyFell"),
            -1 => Some("battle:statFell"),
            0 => None,
            1 => Some("battle:statRose"),
            2 => Some("battle:statSharplyRose"),
            3..=i8::MAX => Some("battle:statRoseDrastically"),
        }
    }
}

/// Event bus for collecting and managing battle events.
///
/// ```rust,ignore
/// event_bus.print_debug_with_message("Turn 1 events:");
/// for line in event_bus.formatted(&battle_state, &translator)? {
///     println!("{}", line);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    events: Vec<BattleEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, event: BattleEvent) {
        log::debug!("event: {:?}", event);
        self.events.push(event);
    }

    pub fn events(&self) -> &[BattleEvent] {
        &self.events
    }

    /// Events pushed since the given position.
    pub fn since(&self, position: usize) -> &[BattleEvent] {
        &self.events[position.min(self.events.len())..]
    }

    /// Print all events in debug format with indentation.
    pub fn print_debug(&self) {
        for event in &self.events {
            println!("  {:?}", event);
        }
    }

    /// Print all events in debug format with a custom prefix message.
    pub fn print_debug_with_message(&self, message: &str) {
        println!("{}", message);
        self.print_debug();
    }

    /// Localized lines for every event that has visible text.
    pub fn formatted(
        &self,
        battle_state: &BattleState,
        translator: &Translator,
    ) -> LocaleResult<Vec<String>> {
        let mut lines = Vec::new();
        for event in &self.events {
            if let Some(line) = event.format(battle_state, translator)? {
                lines.push(line);
            }
        }
        Ok(lines)
    }

    /// Return true if the event bus contains no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Return the number of events in the bus.
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl std::fmt::Display for EventBus {
    /// Format the EventBus for printing. Shows debug format of all events.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for event in &self.events {
            writeln!(f, "  {:?}", event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod event_formatting_tests {
    use super::*;
    use crate::battle::tests::common::{create_test_battle, TestPokemonBuilder};
    use crate::i18n::Locale;
    use pretty_assertions::assert_eq;

    fn create_test_battle_state() -> BattleState {
        create_test_battle(
            TestPokemonBuilder::new(Species::Rattata, 100).build(),
            TestPokemonBuilder::new(Species::Rattata, 100).build(),
        )
    }

    fn translator(locale: Locale) -> Translator {
        Translator::new(locale).expect("bundled locale")
    }

    #[test]
    fn test_silent_events_return_none() {
        let battle_state = create_test_battle_state();
        let translator = translator(Locale::En);

        let silent_events = vec![
            BattleEvent::TurnEnded { turn_number: 1 },
            BattleEvent::StatStageReset {
                target: BattlerIndex::Player,
                species: Species::Rattata,
                stat: BattleStat::Atk,
                old_stage: 2,
            },
            BattleEvent::PokemonSentOut {
                battler: BattlerIndex::Enemy,
                species: Species::Rattata,
            },
            BattleEvent::BattleEnded { winner: None },
        ];

        for event in silent_events {
            assert!(
                event
                    .format(&battle_state, &translator)
                    .expect("format")
                    .is_none(),
                "Event {:?} should be silent but returned text",
                event
            );
        }
    }

    #[test]
    fn test_english_event_text_samples() {
        let battle_state = create_test_battle_state();
        let translator = translator(Locale::En);
        let text = |event: BattleEvent| {
            event
                .format(&battle_state, &translator)
                .expect("format")
                .expect("visible text")
        };

        assert_eq!(
            text(BattleEvent::TurnStarted { turn_number: 5 }),
            "=== Turn 5 ==="
        );
        assert_eq!(
            text(BattleEvent::MoveUsed {
                battler: BattlerIndex::Player,
                species: Species::Rattata,
                move_used: Move::SwordsDance,
            }),
            "Rattata used Swords Dance!"
        );
        assert_eq!(
            text(BattleEvent::StatStageChanged {
                target: BattlerIndex::Enemy,
                species: Species::Rattata,
                stat: BattleStat::Atk,
                old_stage: 0,
                new_stage: -2,
            }),
            "Wild Rattata's Attack harshly fell!"
        );
        assert_eq!(
            text(BattleEvent::StatChangesEliminated),
            "All stat changes were eliminated!"
        );
        assert_eq!(
            text(BattleEvent::StatChangeBlocked {
                target: BattlerIndex::Player,
                species: Species::Rattata,
                stat: BattleStat::Atk,
                reason: StatBlockReason::WontGoHigher,
            }),
            "Rattata's Attack won't go any higher!"
        );
    }

    #[test]
    fn test_stat_change_text_follows_the_applied_amount() {
        let battle_state = create_test_battle_state();
        let translator = translator(Locale::En);
        let change = |old_stage: i8, new_stage: i8| {
            BattleEvent::StatStageChanged {
                target: BattlerIndex::Player,
                species: Species::Rattata,
                stat: BattleStat::Def,
                old_stage,
                new_stage,
            }
            .format(&battle_state, &translator)
            .expect("format")
        };

        assert_eq!(change(2, 2), None);
        assert_eq!(change(-6, 0), Some("Rattata's Defense rose drastically!".to_string()));
        assert_eq!(change(0, 3), Some("Rattata's Defense rose drastically!".to_string()));
        assert_eq!(change(1, -2), Some("Rattata's Defense severely fell!".to_string()));
        assert_eq!(change(0, 1), Some("Rattata's Defense rose!".to_string()));
    }

    #[test]
    fn test_french_event_text_samples() {
        let battle_state = create_test_battle_state();
        let translator = translator(Locale::Fr);

        let used = BattleEvent::MoveUsed {
            battler: BattlerIndex::Player,
            species: Species::Rattata,
            move_used: Move::Haze,
        };
        assert_eq!(
            used.format(&battle_state, &translator).expect("format"),
            Some("Rattata utilise Buée Noire !".to_string())
        );

        let splash = BattleEvent::NothingHappened;
        assert_eq!(
            splash.format(&battle_state, &translator).expect("format"),
            Some("Mais rien ne se passe !".to_string())
        );
    }

    #[test]
    fn test_stat_change_key_by_magnitude() {
        assert_eq!(BattleEvent::stat_change_key(1), "battle:statRose");
        assert_eq!(BattleEvent::stat_change_key(2), "battle:statSharplyRose");
        assert_eq!(BattleEvent::stat_change_key(4), "battle:statRoseDrastically");
        assert_eq!(BattleEvent::stat_change_key(-1), "battle:statFell");
        assert_eq!(BattleEvent::stat_change_key(-2), "battle:statHarshlyFell");
        assert_eq!(BattleEvent::stat_change_key(-6), "battle:statSeverelyFell");
    }

    #[test]
    fn test_event_bus_collects_and_formats() {
        let battle_state = create_test_battle_state();
        let translator = translator(Locale::En);

        let mut event_bus = EventBus::new();
        assert!(event_bus.is_empty());
        event_bus.push(BattleEvent::TurnStarted { turn_number: 1 });
        event_bus.push(BattleEvent::TurnEnded { turn_number: 1 });
        event_bus.push(BattleEvent::NothingHappened);

        assert_eq!(event_bus.len(), 3);
        assert_eq!(event_bus.since(2), &[BattleEvent::NothingHappened]);
        assert_eq!(
            event_bus
                .formatted(&battle_state, &translator)
                .expect("format"),
            vec!["=== Turn 1 ===".to_string(), "But nothing happened!".to_string()]
        );

        let display_output = format!("{}", event_bus);
        assert!(display_output.contains("TurnStarted"));
        assert!(display_output.contains("NothingHappened"));
    }
}
