//! Client-side locale preference
//!
//! Holds the active locale for one browsing session, persists the user's
//! choice under a single storage key and notifies subscribers whenever the
//! active locale changes. Storage failures are logged and never surface to
//! callers; the session then runs on the in-memory value.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Locale, LocaleConfig};
use crate::utils::{StorageError, StoreError};

pub const PREFERENCE_KEY: &str = "preferred-language";

/// Key-value persistence the store writes its preference to.
pub trait PreferenceStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Volatile storage, lost with the process.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// JSON object on disk, one entry per key.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<HashMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl PreferenceStorage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.load()?.remove(key))
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
        }
        Ok(())
    }
}

/// Where the reported language list comes from (`navigator.languages`).
pub trait LanguageSource {
    /// Preferred languages, most preferred first.
    fn languages(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticLanguages(pub Vec<String>);

impl StaticLanguages {
    pub fn new<I, T>(languages: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self(languages.into_iter().map(Into::into).collect())
    }
}

impl LanguageSource for StaticLanguages {
    fn languages(&self) -> Vec<String> {
        self.0.clone()
    }
}

/// Operating-system locales, for native clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLanguages;

impl LanguageSource for SystemLanguages {
    fn languages(&self) -> Vec<String> {
        sys_locale::get_locales().collect()
    }
}

/// When a detected (not user-chosen) locale is written to storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PersistPolicy {
    /// Only `set_preference` writes; detection is redone every session.
    #[default]
    OnExplicitChoice,
    /// The first detection is stored and pins later sessions.
    Immediate,
}

impl PersistPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::OnExplicitChoice => "on_explicit_choice",
            Self::Immediate => "immediate",
        }
    }
}

#[derive(Debug, Clone)]
pub struct StoreSettings {
    /// Used when the reported language is unsupported
    pub fallback: Locale,
    pub storage_key: String,
    pub persist_policy: PersistPolicy,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            fallback: Locale::En,
            storage_key: PREFERENCE_KEY.to_string(),
            persist_policy: PersistPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(Locale)>;

pub struct LocaleStore<S: PreferenceStorage> {
    locales: LocaleConfig,
    settings: StoreSettings,
    storage: S,
    active: Locale,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl<S: PreferenceStorage> LocaleStore<S> {
    pub fn new(locales: LocaleConfig, settings: StoreSettings, storage: S) -> Result<Self, StoreError> {
        if !locales.supports(settings.fallback) {
            return Err(StoreError::Unsupported(settings.fallback));
        }

        Ok(Self {
            active: settings.fallback,
            locales,
            settings,
            storage,
            listeners: Vec::new(),
            next_id: 0,
        })
    }

    pub fn active(&self) -> Locale {
        self.active
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Resolve the session's locale. Call once when the page hydrates.
    pub fn initialize(&mut self, source: &dyn LanguageSource) -> Locale {
        if let Some(locale) = self.get_preference() {
            tracing::debug!("Adopting stored locale preference: {}", locale);
            self.adopt(locale);
            return locale;
        }

        let detected = source
            .languages()
            .first()
            .map(|primary| primary.chars().take(2).collect::<String>().to_lowercase())
            .and_then(|code| self.locales.find(&code))
            .unwrap_or(self.settings.fallback);
        tracing::debug!("Detected locale from language list: {}", detected);

        if self.settings.persist_policy == PersistPolicy::Immediate {
            self.persist(detected);
        }
        self.adopt(detected);
        detected
    }

    /// Stored preference. Garbage or unsupported values read as absent.
    pub fn get_preference(&self) -> Option<Locale> {
        match self.storage.read(&self.settings.storage_key) {
            Ok(Some(value)) => {
                let locale = self.locales.find(value.trim());
                if locale.is_none() {
                    tracing::warn!("Ignoring invalid stored locale preference '{}'", value);
                }
                locale
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to read locale preference: {}", e);
                None
            },
        }
    }

    /// Record an explicit locale choice and make it active.
    pub fn set_preference(&mut self, locale: Locale) -> Result<(), StoreError> {
        if !self.locales.supports(locale) {
            return Err(StoreError::Unsupported(locale));
        }
        self.persist(locale);
        self.adopt(locale);
        Ok(())
    }

    pub fn subscribe(&mut self, listener: impl FnMut(Locale) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    fn persist(&mut self, locale: Locale) {
        if let Err(e) = self.storage.write(&self.settings.storage_key, locale.code()) {
            tracing::warn!("Failed to persist locale preference {}: {} (keeping in memory)", locale, e);
        }
    }

    /// Listeners only fire on an actual change.
    fn adopt(&mut self, locale: Locale) {
        if self.active == locale {
            return;
        }
        self.active = locale;
        for (_, listener) in self.listeners.iter_mut() {
            listener(locale);
        }
    }
}
