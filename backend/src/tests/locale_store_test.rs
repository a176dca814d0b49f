use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Locale, LocaleConfig};
use crate::services::{
    FileStorage, LocaleStore, MemoryStorage, PREFERENCE_KEY, PersistPolicy, PreferenceStorage,
    StaticLanguages, StoreSettings, SystemLanguages,
};
use crate::tests::common::FailingStorage;
use crate::utils::StoreError;

fn create_store<S: PreferenceStorage>(storage: S, policy: PersistPolicy) -> LocaleStore<S> {
    let settings = StoreSettings { persist_policy: policy, ..Default::default() };
    LocaleStore::new(LocaleConfig::default(), settings, storage).expect("Failed to create store")
}

fn storage_with(value: &str) -> MemoryStorage {
    let mut storage = MemoryStorage::new();
    storage.write(PREFERENCE_KEY, value).unwrap();
    storage
}

#[test]
fn test_stored_preference_wins_over_detection() {
    let mut store = create_store(storage_with("es"), PersistPolicy::OnExplicitChoice);
    let locale = store.initialize(&StaticLanguages::new(["fr-FR", "en"]));
    assert_eq!(locale, Locale::Es);
    assert_eq!(store.active(), Locale::Es);
}

#[test]
fn test_detects_primary_browser_language() {
    let mut store = create_store(MemoryStorage::new(), PersistPolicy::OnExplicitChoice);
    assert_eq!(store.initialize(&StaticLanguages::new(["FR-ca", "es"])), Locale::Fr);
}

#[test]
fn test_only_primary_language_is_considered() {
    let mut store = create_store(MemoryStorage::new(), PersistPolicy::OnExplicitChoice);
    // de is unsupported; es further down the list is not consulted
    assert_eq!(store.initialize(&StaticLanguages::new(["de-DE", "es"])), Locale::En);
}

#[test]
fn test_falls_back_to_english_client_side() {
    let mut store = create_store(MemoryStorage::new(), PersistPolicy::OnExplicitChoice);
    assert_eq!(store.initialize(&StaticLanguages::default()), Locale::En);
}

#[test]
fn test_invalid_stored_value_is_ignored() {
    for junk in ["de", "FR", "", "french"] {
        let mut store = create_store(storage_with(junk), PersistPolicy::OnExplicitChoice);
        assert_eq!(store.get_preference(), None, "'{}' must read as absent", junk);
        assert_eq!(store.initialize(&StaticLanguages::new(["es"])), Locale::Es);
    }
}

#[test]
fn test_detection_is_not_persisted_by_default() {
    let mut store = create_store(MemoryStorage::new(), PersistPolicy::OnExplicitChoice);
    store.initialize(&StaticLanguages::new(["es"]));
    assert_eq!(store.get_preference(), None);
    assert_eq!(store.storage().read(PREFERENCE_KEY).unwrap(), None);
}

#[test]
fn test_immediate_policy_persists_detection() {
    let mut store = create_store(MemoryStorage::new(), PersistPolicy::Immediate);
    store.initialize(&StaticLanguages::new(["es-419"]));
    assert_eq!(store.get_preference(), Some(Locale::Es));
    assert_eq!(store.storage().read(PREFERENCE_KEY).unwrap().as_deref(), Some("es"));
}

#[test]
fn test_set_preference_persists_and_notifies() {
    let mut store = create_store(MemoryStorage::new(), PersistPolicy::OnExplicitChoice);
    store.initialize(&StaticLanguages::new(["en-US"]));

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |locale| sink.borrow_mut().push(locale));

    store.set_preference(Locale::Fr).unwrap();
    store.set_preference(Locale::Fr).unwrap();
    store.set_preference(Locale::Es).unwrap();

    assert_eq!(*seen.borrow(), vec![Locale::Fr, Locale::Es], "no event for an unchanged locale");
    assert_eq!(store.get_preference(), Some(Locale::Es));
    assert_eq!(store.active(), Locale::Es);
}

#[test]
fn test_unsubscribe_stops_notifications() {
    let mut store = create_store(MemoryStorage::new(), PersistPolicy::OnExplicitChoice);
    let count = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&count);
    let id = store.subscribe(move |_| *counter.borrow_mut() += 1);

    store.set_preference(Locale::Fr).unwrap();
    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.set_preference(Locale::Es).unwrap();

    assert_eq!(*count.borrow(), 1);
}

#[test]
fn test_unsupported_locale_is_rejected() {
    let locales = LocaleConfig::new(vec![Locale::Fr, Locale::En], Locale::Fr).unwrap();
    let mut store =
        LocaleStore::new(locales, StoreSettings::default(), MemoryStorage::new()).unwrap();

    assert_eq!(store.set_preference(Locale::Es), Err(StoreError::Unsupported(Locale::Es)));
    assert_eq!(store.get_preference(), None);
    assert_eq!(store.active(), Locale::En);
}

#[test]
fn test_fallback_must_be_supported() {
    let locales = LocaleConfig::new(vec![Locale::Fr], Locale::Fr).unwrap();
    let result = LocaleStore::new(locales, StoreSettings::default(), MemoryStorage::new());
    assert!(matches!(result, Err(StoreError::Unsupported(Locale::En))));
}

#[test]
fn test_storage_failures_fall_back_to_memory() {
    let mut store = create_store(FailingStorage, PersistPolicy::Immediate);

    assert_eq!(store.get_preference(), None);
    assert_eq!(store.initialize(&StaticLanguages::new(["es"])), Locale::Es);

    store.set_preference(Locale::Fr).expect("write failure must not surface");
    assert_eq!(store.active(), Locale::Fr);
}

#[test]
fn test_file_storage_survives_sessions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs/storage.json");

    {
        let mut store = create_store(FileStorage::new(&path), PersistPolicy::OnExplicitChoice);
        store.initialize(&StaticLanguages::new(["en"]));
        store.set_preference(Locale::Es).unwrap();
    }

    // Next session: the stored choice beats the browser language
    let mut store = create_store(FileStorage::new(&path), PersistPolicy::OnExplicitChoice);
    assert_eq!(store.initialize(&StaticLanguages::new(["fr"])), Locale::Es);
}

#[test]
fn test_file_storage_keeps_other_keys() {
    let dir = tempfile::tempdir().unwrap();
    let mut storage = FileStorage::new(dir.path().join("storage.json"));

    storage.write("theme", "dark").unwrap();
    storage.write(PREFERENCE_KEY, "fr").unwrap();
    storage.remove(PREFERENCE_KEY).unwrap();

    assert_eq!(storage.read("theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(storage.read(PREFERENCE_KEY).unwrap(), None);
}

#[test]
fn test_corrupt_file_storage_reads_as_absent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("storage.json");
    std::fs::write(&path, "{not json").unwrap();

    let mut store = create_store(FileStorage::new(&path), PersistPolicy::OnExplicitChoice);
    assert_eq!(store.get_preference(), None);
    assert_eq!(store.initialize(&StaticLanguages::new(["fr"])), Locale::Fr);
}

#[test]
fn test_system_languages_resolve_to_supported_locale() {
    let mut store = create_store(MemoryStorage::new(), PersistPolicy::OnExplicitChoice);
    let locale = store.initialize(&SystemLanguages);
    assert!(LocaleConfig::default().supports(locale));
    assert_eq!(store.active(), locale);
    assert_eq!(store.get_preference(), None);
}

#[test]
fn test_empty_language_list_uses_fallback() {
    let mut store = create_store(MemoryStorage::new(), PersistPolicy::OnExplicitChoice);
    assert_eq!(store.initialize(&StaticLanguages::new(Vec::<String>::new())), Locale::En);
}
