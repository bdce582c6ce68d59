use crate::errors::{LocaleError, LocaleResult};
use crate::i18n::locale::{Locale, Namespace};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityText {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveText {
    pub name: String,
    pub effect: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BerryText {
    pub name: String,
    pub effect: String,
}

/// Item and modifier text. Some entries only describe, and some carry
/// variant strings under `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemText {
    #[serde(default)]
    pub name: Option<String>,
    pub description: String,
    #[serde(default)]
    pub extra: BTreeMap<String, String>,
}

/// Resolve a dotted path (already split) to a string inside a record.
pub trait TextLookup {
    fn lookup(&self, path: &[&str]) -> Option<&str>;

    /// Every path that resolves to a string, dotted.
    fn paths(&self) -> Vec<String>;
}

impl TextLookup for String {
    fn lookup(&self, path: &[&str]) -> Option<&str> {
        path.is_empty().then_some(self.as_str())
    }

    fn paths(&self) -> Vec<String> {
        vec![String::new()]
    }
}

impl TextLookup for AbilityText {
    fn lookup(&self, path: &[&str]) -> Option<&str> {
        match path {
            ["name"] => Some(&self.name),
            ["description"] => Some(&self.description),
            _ => None,
        }
    }

    fn paths(&self) -> Vec<String> {
        vec!["name".to_string(), "description".to_string()]
    }
}

impl TextLookup for MoveText {
    fn lookup(&self, path: &[&str]) -> Option<&str> {
        match path {
            ["name"] => Some(&self.name),
            ["effect"] => Some(&self.effect),
            _ => None,
        }
    }

    fn paths(&self) -> Vec<String> {
        vec!["name".to_string(), "effect".to_string()]
    }
}

impl TextLookup for BerryText {
    fn lookup(&self, path: &[&str]) -> Option<&str> {
        match path {
            ["name"] => Some(&self.name),
            ["effect"] => Some(&self.effect),
            _ => None,
        }
    }

    fn paths(&self) -> Vec<String> {
        vec!["name".to_string(), "effect".to_string()]
    }
}

impl TextLookup for ItemText {
    fn lookup(&self, path: &[&str]) -> Option<&str> {
        match path {
            ["name"] => self.name.as_deref(),
            ["description"] => Some(&self.description),
            ["extra", key] => self.extra.get(*key).map(String::as_str),
            _ => None,
        }
    }

    fn paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        if self.name.is_some() {
            paths.push("name".to_string());
        }
        paths.push("description".to_string());
        paths.extend(self.extra.keys().map(|key| format!("extra.{}", key)));
        paths
    }
}

impl<T: TextLookup> TextLookup for BTreeMap<String, T> {
    fn lookup(&self, path: &[&str]) -> Option<&str> {
        let (key, rest) = path.split_first()?;
        self.get(*key)?.lookup(rest)
    }

    fn paths(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(key, entry)| {
                entry.paths().into_iter().map(move |path| {
                    if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{}.{}", key, path)
                    }
                })
            })
            .collect()
    }
}

/// Every namespace of one locale.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LocaleTables {
    pub ability: BTreeMap<String, AbilityText>,
    pub moves: BTreeMap<String, MoveText>,
    pub berry: BTreeMap<String, BerryText>,
    pub modifier_type: BTreeMap<String, ItemText>,
    pub weather: BTreeMap<String, String>,
    pub tutorial: BTreeMap<String, String>,
    pub battle: BTreeMap<String, String>,
    pub battle_stat: BTreeMap<String, String>,
    pub pokemon: BTreeMap<String, String>,
}

impl LocaleTables {
    /// Parse every namespace of a locale, asking `source` for the RON text.
    pub fn parse<'a>(
        locale: Locale,
        source: impl Fn(Namespace) -> &'a str,
    ) -> LocaleResult<Self> {
        Ok(Self {
            ability: parse_namespace(locale, Namespace::Ability, source(Namespace::Ability))?,
            moves: parse_namespace(locale, Namespace::Move, source(Namespace::Move))?,
            berry: parse_namespace(locale, Namespace::Berry, source(Namespace::Berry))?,
            modifier_type: parse_namespace(
                locale,
                Namespace::ModifierType,
                source(Namespace::ModifierType),
            )?,
            weather: parse_namespace(locale, Namespace::Weather, source(Namespace::Weather))?,
            tutorial: parse_namespace(locale, Namespace::Tutorial, source(Namespace::Tutorial))?,
            battle: parse_namespace(locale, Namespace::Battle, source(Namespace::Battle))?,
            battle_stat: parse_namespace(
                locale,
                Namespace::BattleStat,
                source(Namespace::BattleStat),
            )?,
            pokemon: parse_namespace(locale, Namespace::Pokemon, source(Namespace::Pokemon))?,
        })
    }

    pub fn namespace(&self, namespace: Namespace) -> &dyn TextLookup {
        match namespace {
            Namespace::Ability => &self.ability,
            Namespace::Move => &self.moves,
            Namespace::Berry => &self.berry,
            Namespace::ModifierType => &self.modifier_type,
            Namespace::Weather => &self.weather,
            Namespace::Tutorial => &self.tutorial,
            Namespace::Battle => &self.battle,
            Namespace::BattleStat => &self.battle_stat,
            Namespace::Pokemon => &self.pokemon,
        }
    }

    pub fn lookup(&self, namespace: Namespace, path: &[&str]) -> Option<&str> {
        self.namespace(namespace).lookup(path)
    }
}

fn parse_namespace<T: DeserializeOwned>(
    locale: Locale,
    namespace: Namespace,
    source: &str,
) -> LocaleResult<T> {
    ron::from_str(source).map_err(|err| LocaleError::MalformedTable {
        locale,
        namespace,
        message: err.to_string(),
    })
}
