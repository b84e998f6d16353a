//! The stored language preference and the first-visit gate built on it.

use std::collections::HashMap;

use crate::i18n::Language;

pub const LANGUAGE_KEY: &str = "selectedLanguage";

/// Key/value storage that survives between visits. In the browser this is
/// the cookie jar.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.values.insert(key.to_string(), value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageGate {
    /// Nothing stored yet: show the language overlay.
    Overlay,
    Ready(Language),
}

impl LanguageGate {
    pub fn language(self) -> Language {
        match self {
            LanguageGate::Overlay => Language::default(),
            LanguageGate::Ready(language) => language,
        }
    }

    pub fn shows_overlay(self) -> bool {
        self == LanguageGate::Overlay
    }
}

/// Any stored value unlocks the page. A value we don't support renders in
/// English rather than asking again.
pub fn gate(store: &impl PreferenceStore) -> LanguageGate {
    match store.get(LANGUAGE_KEY) {
        None => LanguageGate::Overlay,
        Some(code) => match code.parse::<Language>() {
            Ok(language) => LanguageGate::Ready(language),
            Err(e) => {
                tracing::debug!("{}; falling back to English", e);
                LanguageGate::Ready(Language::default())
            }
        },
    }
}

pub fn choose(store: &mut impl PreferenceStore, language: Language) {
    store.set(LANGUAGE_KEY, language.code().to_string());
}
