//! Per-node translation overrides.
//!
//! On the wire the table is the sparse `{ locale: { key: text } }` map the
//! builder has always stored. In memory every lookup answers with a
//! [`Localized`] value so that "fall back to the base props" is an explicit
//! case rather than a missing key.

use std::collections::BTreeMap;

use churchlink_core::types::LocaleCode;
use serde::{Deserialize, Serialize};

/// The state of one content key for one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Localized {
    /// A translation exists and replaces the base value.
    Overridden(String),
    /// No translation: the base-locale value from `props` applies.
    Inherited,
}

impl Localized {
    /// The displayed value, given the base-locale value.
    pub fn or_base(self, base: &str) -> String {
        match self {
            Self::Overridden(value) => value,
            Self::Inherited => base.to_string(),
        }
    }

    /// Whether a translation is present.
    pub fn is_overridden(&self) -> bool {
        matches!(self, Self::Overridden(_))
    }
}

/// Sparse translation overrides keyed by locale, then by content key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct I18nTable(BTreeMap<LocaleCode, BTreeMap<String, String>>);

impl I18nTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up `key` for `locale`.
    pub fn lookup(&self, locale: &LocaleCode, key: &str) -> Localized {
        match self.get(locale, key) {
            Some(value) => Localized::Overridden(value.to_string()),
            None => Localized::Inherited,
        }
    }

    /// The raw override, if any.
    pub fn get(&self, locale: &LocaleCode, key: &str) -> Option<&str> {
        self.0
            .get(locale)
            .and_then(|keys| keys.get(key))
            .map(String::as_str)
    }

    /// Set or clear the override for `key` in `locale`.
    ///
    /// Clearing the last key of a locale drops the locale entry, so an
    /// untranslated locale never appears as an empty object.
    pub fn set(&mut self, locale: &LocaleCode, key: &str, value: Localized) {
        match value {
            Localized::Overridden(text) => {
                self.0
                    .entry(locale.clone())
                    .or_default()
                    .insert(key.to_string(), text);
            }
            Localized::Inherited => {
                if let Some(keys) = self.0.get_mut(locale) {
                    keys.remove(key);
                    if keys.is_empty() {
                        self.0.remove(locale);
                    }
                }
            }
        }
    }

    /// Store `text` only when no override exists yet. Returns whether the
    /// table changed.
    pub fn set_if_absent(&mut self, locale: &LocaleCode, key: &str, text: &str) -> bool {
        let keys = self.0.entry(locale.clone()).or_default();
        if keys.contains_key(key) {
            return false;
        }
        keys.insert(key.to_string(), text.to_string());
        true
    }

    /// Locales that carry at least one override.
    pub fn locales(&self) -> impl Iterator<Item = &LocaleCode> {
        self.0.keys()
    }

    /// Every `(locale, key)` pair with an override.
    pub fn entries(&self) -> impl Iterator<Item = (&LocaleCode, &str, &str)> {
        self.0.iter().flat_map(|(locale, keys)| {
            keys.iter()
                .map(move |(key, text)| (locale, key.as_str(), text.as_str()))
        })
    }

    /// Whether the table holds no overrides at all.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(BTreeMap::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn es() -> LocaleCode {
        "es".parse().unwrap()
    }

    #[test]
    fn test_missing_key_is_inherited() {
        let table = I18nTable::new();
        assert_eq!(table.lookup(&es(), "html"), Localized::Inherited);
        assert_eq!(table.lookup(&es(), "html").or_base("Welcome"), "Welcome");
    }

    #[test]
    fn test_empty_override_is_not_inherited() {
        let mut table = I18nTable::new();
        table.set(&es(), "label", Localized::Overridden(String::new()));
        assert_eq!(
            table.lookup(&es(), "label"),
            Localized::Overridden(String::new())
        );
    }

    #[test]
    fn test_clearing_last_key_drops_locale() {
        let mut table = I18nTable::new();
        table.set(&es(), "html", Localized::Overridden("Hola".into()));
        table.set(&es(), "html", Localized::Inherited);
        assert!(table.is_empty());
        assert_eq!(table.locales().count(), 0);
        assert_eq!(serde_json::to_string(&table).unwrap(), "{}");
    }

    #[test]
    fn test_set_if_absent_keeps_existing() {
        let mut table = I18nTable::new();
        table.set(&es(), "html", Localized::Overridden("Hola a todos".into()));
        assert!(!table.set_if_absent(&es(), "html", "Hola"));
        assert_eq!(table.get(&es(), "html"), Some("Hola a todos"));
        assert!(table.set_if_absent(&es(), "label", "Enviar"));
    }

    #[test]
    fn test_wire_shape() {
        let table: I18nTable =
            serde_json::from_str(r#"{"es":{"html":"Hola"},"pt-br":{"html":"Olá"}}"#).unwrap();
        let pt: LocaleCode = "pt-BR".parse().unwrap();
        assert_eq!(table.get(&pt, "html"), Some("Olá"));
        assert_eq!(table.entries().count(), 2);
    }
}
