//! Locale registry: the closed set of supported locales.
//!
//! Built once from configuration at startup and immutable thereafter. A
//! [`Locale`] can only be obtained from the registry, so holding one means the
//! code is supported.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::config::schema::{LocaleSettings, LocalesConfig};

/// A supported locale code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(Arc<str>);

impl Locale {
    /// The locale code (e.g., "en").
    pub fn code(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Locale {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for Locale {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Registry construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("no locales configured")]
    Empty,

    #[error("invalid locale code '{0}': use ASCII letters, digits, '-' or '_'")]
    InvalidCode(String),

    #[error("locale '{0}' is declared more than once")]
    DuplicateCode(String),

    #[error("default locale '{0}' is not among the supported locales")]
    UnknownDefault(String),
}

/// The supported locales in declaration order, with exactly one default.
#[derive(Debug)]
pub struct LocaleRegistry {
    entries: Vec<(Locale, LocaleSettings)>,
    default_index: usize,
}

impl LocaleRegistry {
    /// Build a registry, rejecting the first problem found.
    pub fn new(settings: Vec<LocaleSettings>, default_code: &str) -> Result<Self, RegistryError> {
        if let Some(err) = Self::check(&settings, default_code).into_iter().next() {
            return Err(err);
        }

        let default_index = settings
            .iter()
            .position(|s| s.code == default_code)
            .ok_or_else(|| RegistryError::UnknownDefault(default_code.to_string()))?;

        let entries = settings
            .into_iter()
            .map(|s| (Locale(Arc::from(s.code.as_str())), s))
            .collect();

        Ok(Self {
            entries,
            default_index,
        })
    }

    pub fn from_config(config: &LocalesConfig) -> Result<Self, RegistryError> {
        Self::new(config.supported.clone(), &config.default)
    }

    /// Every problem with a prospective locale set.
    pub fn check(settings: &[LocaleSettings], default_code: &str) -> Vec<RegistryError> {
        let mut errors = Vec::new();
        if settings.is_empty() {
            errors.push(RegistryError::Empty);
            return errors;
        }

        for (i, entry) in settings.iter().enumerate() {
            if !is_valid_code(&entry.code) {
                errors.push(RegistryError::InvalidCode(entry.code.clone()));
            }
            if settings[..i].iter().any(|prev| prev.code == entry.code) {
                errors.push(RegistryError::DuplicateCode(entry.code.clone()));
            }
        }

        if !settings.iter().any(|s| s.code == default_code) {
            errors.push(RegistryError::UnknownDefault(default_code.to_string()));
        }

        errors
    }

    /// Look up a supported locale by exact code.
    pub fn get(&self, code: &str) -> Option<&Locale> {
        self.entries
            .iter()
            .find(|(locale, _)| locale.code() == code)
            .map(|(locale, _)| locale)
    }

    pub fn is_supported(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn default_locale(&self) -> &Locale {
        &self.entries[self.default_index].0
    }

    /// Metadata for a locale. Unknown locales get the default's settings.
    pub fn settings(&self, locale: &Locale) -> &LocaleSettings {
        self.entries
            .iter()
            .find(|(l, _)| l == locale)
            .map(|(_, s)| s)
            .unwrap_or(&self.entries[self.default_index].1)
    }

    /// Locales with their settings, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&Locale, &LocaleSettings)> {
        self.entries.iter().map(|(l, s)| (l, s))
    }

    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.entries.iter().map(|(l, _)| l)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick a translated string: the requested locale, then the default
    /// locale, then any non-empty entry, then `fallback`.
    pub fn pick_translation<'a>(
        &self,
        translations: &'a BTreeMap<String, String>,
        locale: &Locale,
        fallback: &'a str,
    ) -> &'a str {
        let non_empty = |code: &str| {
            translations
                .get(code)
                .map(String::as_str)
                .filter(|s| !s.is_empty())
        };

        non_empty(locale.code())
            .or_else(|| non_empty(self.default_locale().code()))
            .or_else(|| translations.values().map(String::as_str).find(|s| !s.is_empty()))
            .unwrap_or(fallback)
    }
}

fn is_valid_code(code: &str) -> bool {
    !code.is_empty()
        && code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
