//! `Session::load_settings` against a recording fake API.
//!
//! Tests:
//! - Preferences replace their containers wholesale
//! - The language setting reaches every locale hook, or none when unset
//! - A failed system-preferences fetch stops the load and reaches the caller
mod support;
use crate::support::{make_preference, tracing_init, Call, FakeApi};
use ample_core::ampache::ApiError;
use ample_core::session::{LocaleHook, Session};
use ample_core::settings::{MemoryBackend, SettingsStore, SETTINGS_KEY};
use serde_json::json;
use std::sync::{Arc, Mutex};

/// Records every language it is given
#[derive(Default)]
struct RecordingHook {
    seen: Mutex<Vec<String>>,
}

impl RecordingHook {
    fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl LocaleHook for RecordingHook {
    fn set_locale(&self, lang: &str) {
        self.seen.lock().unwrap().push(lang.to_string());
    }
}

fn store_with(persisted: Option<&str>) -> SettingsStore {
    let backend = match persisted {
        Some(raw) => MemoryBackend::with_entry(SETTINGS_KEY, raw),
        None => MemoryBackend::new(),
    };
    SettingsStore::load(Arc::new(backend)).unwrap()
}

fn session(api: FakeApi, persisted: Option<&str>) -> (Session, Arc<FakeApi>, Arc<RecordingHook>) {
    let api = Arc::new(api);
    let hook = Arc::new(RecordingHook::default());
    let session =
        Session::new(api.clone(), store_with(persisted)).with_locale_hook(hook.clone());
    (session, api, hook)
}

#[tokio::test]
async fn loads_both_preference_sets_in_order() {
    tracing_init();
    let mut api = FakeApi::new();
    api.system_preferences = vec![make_preference("site_title", json!("Ampache"))];
    api.user_preferences = vec![
        make_preference("transcode_bitrate", json!("192")),
        make_preference("ajax_load", json!("1")),
    ];
    let (session, api, _hook) = session(api, None);

    session.load_settings().await.unwrap();

    assert_eq!(api.calls(), vec![Call::SystemPreferences, Call::UserPreferences]);
    assert_eq!(session.system_preferences().get(), api.system_preferences);
    assert_eq!(session.user_preferences().get().len(), 2);
}

#[tokio::test]
async fn reload_replaces_preferences_wholesale() {
    let mut api = FakeApi::new();
    api.user_preferences = vec![make_preference("only", json!(true))];
    let (session, _api, _hook) = session(api, None);

    session.user_preferences().set(vec![
        make_preference("stale_a", json!(1)),
        make_preference("stale_b", json!(2)),
    ]);
    session.load_settings().await.unwrap();

    let prefs = session.user_preferences().get();
    assert_eq!(prefs.len(), 1);
    assert_eq!(prefs[0].name, "only");
}

#[tokio::test]
async fn language_reaches_every_locale_hook() {
    let (session, _api, hook) = session(FakeApi::new(), Some(r#"{"Language": "fr"}"#));

    session.load_settings().await.unwrap();

    assert_eq!(hook.seen(), vec!["fr".to_string()]);
    assert_eq!(session.locale().get().as_deref(), Some("fr"));
}

#[tokio::test]
async fn default_language_is_applied() {
    let (session, _api, hook) = session(FakeApi::new(), None);

    session.load_settings().await.unwrap();

    assert_eq!(hook.seen(), vec!["en".to_string()]);
}

#[tokio::test]
async fn unset_language_calls_no_hooks() {
    let (session, _api, hook) = session(FakeApi::new(), Some(r#"{"Language": null}"#));

    session.load_settings().await.unwrap();

    assert!(hook.seen().is_empty());
    assert_eq!(session.locale().get(), None);
}

#[tokio::test]
async fn empty_language_calls_no_hooks() {
    let (session, _api, hook) = session(FakeApi::new(), Some(r#"{"Language": ""}"#));

    session.load_settings().await.unwrap();

    assert!(hook.seen().is_empty());
}

#[tokio::test]
async fn system_preferences_failure_stops_the_load() {
    let mut api = FakeApi::new();
    api.fail_system_preferences = true;
    api.user_preferences = vec![make_preference("never_loaded", json!(1))];
    let (session, api, hook) = session(api, Some(r#"{"Language": "fr"}"#));

    let err = session.load_settings().await.unwrap_err();

    match err {
        ApiError::Server { message, .. } => {
            assert_eq!(message, "system preferences unavailable")
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert_eq!(api.calls(), vec![Call::SystemPreferences]);
    assert!(session.system_preferences().get().is_empty());
    assert!(session.user_preferences().get().is_empty());
    assert!(hook.seen().is_empty());
}

#[tokio::test]
async fn user_preferences_failure_keeps_system_preferences() {
    let mut api = FakeApi::new();
    api.system_preferences = vec![make_preference("site_title", json!("Ampache"))];
    api.fail_user_preferences = true;
    let (session, api, hook) = session(api, None);

    assert!(session.load_settings().await.is_err());

    assert_eq!(api.calls(), vec![Call::SystemPreferences, Call::UserPreferences]);
    assert_eq!(session.system_preferences().get().len(), 1);
    assert!(hook.seen().is_empty());
}

#[tokio::test]
async fn language_change_applies_on_next_load() {
    let (session, _api, hook) = session(FakeApi::new(), None);

    session.load_settings().await.unwrap();
    session
        .settings()
        .update(|s| s.language = Some("de".into()))
        .unwrap();
    session.load_settings().await.unwrap();

    assert_eq!(hook.seen(), vec!["en".to_string(), "de".to_string()]);
}
