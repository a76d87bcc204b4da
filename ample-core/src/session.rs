//! Per-session state: the API client, settings and the preference containers
//! the UI reads from.

use crate::ampache::{AmpacheApi, ApiError, Preference};
use crate::reactive::Reactive;
use crate::settings::SettingsStore;
use std::sync::Arc;
use tracing::{debug, info};

/// Something that switches the UI language.
pub trait LocaleHook: Send + Sync {
    fn set_locale(&self, lang: &str);
}

impl LocaleHook for Reactive<Option<String>> {
    fn set_locale(&self, lang: &str) {
        self.set(Some(lang.to_string()));
    }
}

/// Everything a session needs, passed explicitly instead of living in globals.
pub struct Session {
    api: Arc<dyn AmpacheApi>,
    settings: SettingsStore,
    system_preferences: Reactive<Vec<Preference>>,
    user_preferences: Reactive<Vec<Preference>>,
    locale: Reactive<Option<String>>,
    locale_hooks: Vec<Arc<dyn LocaleHook>>,
}

impl Session {
    pub fn new(api: Arc<dyn AmpacheApi>, settings: SettingsStore) -> Self {
        Self {
            api,
            settings,
            system_preferences: Reactive::default(),
            user_preferences: Reactive::default(),
            locale: Reactive::default(),
            locale_hooks: Vec::new(),
        }
    }

    /// Register an extra hook to receive the language on load, e.g. a
    /// widget library with its own translations.
    pub fn with_locale_hook(mut self, hook: Arc<dyn LocaleHook>) -> Self {
        self.locale_hooks.push(hook);
        self
    }

    pub fn api(&self) -> &dyn AmpacheApi {
        self.api.as_ref()
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn system_preferences(&self) -> &Reactive<Vec<Preference>> {
        &self.system_preferences
    }

    pub fn user_preferences(&self) -> &Reactive<Vec<Preference>> {
        &self.user_preferences
    }

    /// The active UI locale
    pub fn locale(&self) -> &Reactive<Option<String>> {
        &self.locale
    }

    /// Load server preferences and apply the language setting.
    ///
    /// The two fetches run one after the other; if the system preferences
    /// fail, the user preferences are not requested and neither container
    /// changes. Locale hooks only run when a language is set.
    pub async fn load_settings(&self) -> Result<(), ApiError> {
        let system = self.api.system_preferences().await?;
        info!("Loaded {} system preferences", system.len());
        self.system_preferences.set(system);

        let user = self.api.user_preferences().await?;
        info!("Loaded {} user preferences", user.len());
        self.user_preferences.set(user);

        if let Some(lang) = self.settings.language() {
            debug!("Applying language {}", lang);
            self.locale.set_locale(&lang);
            for hook in &self.locale_hooks {
                hook.set_locale(&lang);
            }
        }

        Ok(())
    }
}
