use crate::errors::{LocaleError, LocaleResult};
use crate::i18n::interpolate::{interpolate, TextContext};
use crate::i18n::locale::{Locale, Namespace};
use crate::i18n::tables::LocaleTables;
use schema::{Ability, BattleStat, BerryType, Move, Species};
use std::collections::HashMap;
use std::sync::OnceLock;
use strum::IntoEnumIterator;

macro_rules! locale_sources {
    ($code:literal) => {
        |namespace: Namespace| -> &'static str {
            match namespace {
                Namespace::Ability => include_str!(concat!("../../data/locales/", $code, "/ability.ron")),
                Namespace::Move => include_str!(concat!("../../data/locales/", $code, "/move.ron")),
                Namespace::Berry => include_str!(concat!("../../data/locales/", $code, "/berry.ron")),
                Namespace::ModifierType => {
                    include_str!(concat!("../../data/locales/", $code, "/modifierType.ron"))
                }
                Namespace::Weather => include_str!(concat!("../../data/locales/", $code, "/weather.ron")),
                Namespace::Tutorial => include_str!(concat!("../../data/locales/", $code, "/tutorial.ron")),
                Namespace::Battle => include_str!(concat!("../../data/locales/", $code, "/battle.ron")),
                Namespace::BattleStat => {
                    include_str!(concat!("../../data/locales/", $code, "/battleStat.ron"))
                }
                Namespace::Pokemon => include_str!(concat!("../../data/locales/", $code, "/pokemon.ron")),
            }
        }
    };
}

fn parse_bundled(locale: Locale) -> LocaleResult<LocaleTables> {
    match locale {
        Locale::En => LocaleTables::parse(locale, locale_sources!("en")),
        Locale::Fr => LocaleTables::parse(locale, locale_sources!("fr")),
        Locale::PtBr => LocaleTables::parse(locale, locale_sources!("pt_BR")),
    }
}

// Every bundled locale, parsed once on first use and read-only afterwards
static BUNDLED: OnceLock<LocaleResult<HashMap<Locale, LocaleTables>>> = OnceLock::new();

fn bundled_tables() -> LocaleResult<&'static HashMap<Locale, LocaleTables>> {
    BUNDLED
        .get_or_init(|| {
            let mut tables = HashMap::new();
            for locale in Locale::iter() {
                tables.insert(locale, parse_bundled(locale)?);
            }
            log::debug!("loaded text tables for {} locales", tables.len());
            Ok(tables)
        })
        .as_ref()
        .map_err(Clone::clone)
}

/// Tables for one bundled locale.
pub fn tables_for(locale: Locale) -> LocaleResult<&'static LocaleTables> {
    bundled_tables()?
        .get(&locale)
        .ok_or_else(|| LocaleError::UnknownLocale(locale.to_string()))
}

/// Looks up and renders text for one locale. Missing keys are errors;
/// there is no fallback to another locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator {
    locale: Locale,
    tables: &'static LocaleTables,
}

impl Translator {
    pub fn new(locale: Locale) -> LocaleResult<Self> {
        Ok(Self {
            locale,
            tables: tables_for(locale)?,
        })
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn tables(&self) -> &'static LocaleTables {
        self.tables
    }

    /// The untouched template for a `namespace:path.to.field` key.
    pub fn raw(&self, key: &str) -> LocaleResult<&'static str> {
        let (namespace, path) = key
            .split_once(':')
            .ok_or_else(|| LocaleError::MalformedKey(key.to_string()))?;
        let namespace: Namespace = namespace
            .parse()
            .map_err(|_| LocaleError::UnknownNamespace(namespace.to_string()))?;
        if path.is_empty() {
            return Err(LocaleError::MalformedKey(key.to_string()));
        }

        let segments: Vec<&str> = path.split('.').collect();
        self.tables
            .lookup(namespace, &segments)
            .ok_or_else(|| LocaleError::MissingKey {
                locale: self.locale,
                key: key.to_string(),
            })
    }

    /// Look up a key and fill in its placeholders.
    pub fn t(&self, key: &str, context: &TextContext) -> LocaleResult<String> {
        interpolate(self.raw(key)?, context)
    }

    pub fn move_name(&self, move_: Move) -> LocaleResult<&'static str> {
        self.raw(&format!("move:{}.name", move_.locale_key()))
    }

    pub fn ability_name(&self, ability: Ability) -> LocaleResult<&'static str> {
        self.raw(&format!("ability:{}.name", ability.locale_key()))
    }

    pub fn berry_name(&self, berry: BerryType) -> LocaleResult<&'static str> {
        self.raw(&format!("berry:{}.name", berry.locale_key()))
    }

    pub fn species_name(&self, species: Species) -> LocaleResult<&'static str> {
        self.raw(&format!("pokemon:{}", species.locale_key()))
    }

    pub fn stat_name(&self, stat: BattleStat) -> LocaleResult<&'static str> {
        self.raw(&format!("battleStat:{}", stat.locale_key()))
    }
}
