//! Persisted display preferences.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::store::{PreferenceStore, PrefsError};

/// Key the preference record is stored under
pub const STORE_KEY: &str = "ringclock:v1";

/// User-facing display options.
///
/// Owned by the UI controller. The sync engine only reads them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisplayPreferences {
    #[serde(rename = "use24h")]
    pub use_24h: bool,
    #[serde(rename = "showSeconds")]
    pub show_seconds: bool,
    #[serde(rename = "showDate")]
    pub show_date: bool,
    #[serde(rename = "soundOn")]
    pub sound_on: bool,
}

impl Default for DisplayPreferences {
    fn default() -> Self {
        Self {
            use_24h: false,
            show_seconds: true,
            show_date: true,
            sound_on: false,
        }
    }
}

impl DisplayPreferences {
    /// Load the stored record.
    ///
    /// A missing or unparsable record yields the defaults, as does any JSON
    /// value that is not an object. Inside an object every absent or
    /// non-boolean field falls back on its own.
    pub fn load_from(store: &dyn PreferenceStore) -> Self {
        let Some(raw) = store.load(STORE_KEY) else {
            return Self::default();
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(value) => Self::from_value(&value),
            Err(e) => {
                warn!(error = %e, "Stored preferences are malformed, using defaults");
                Self::default()
            }
        }
    }

    fn from_value(value: &Value) -> Self {
        let defaults = Self::default();
        let flag = |name: &str, fallback: bool| {
            value.get(name).and_then(Value::as_bool).unwrap_or(fallback)
        };

        Self {
            use_24h: flag("use24h", defaults.use_24h),
            show_seconds: flag("showSeconds", defaults.show_seconds),
            show_date: flag("showDate", defaults.show_date),
            sound_on: flag("soundOn", defaults.sound_on),
        }
    }

    /// Overwrite the stored record. Failures are logged and otherwise ignored.
    pub fn save_to(&self, store: &mut dyn PreferenceStore) {
        let result = serde_json::to_string(self)
            .map_err(PrefsError::from)
            .and_then(|json| store.save(STORE_KEY, &json));

        if let Err(e) = result {
            warn!(error = %e, "Failed to save preferences");
        }
    }

    pub fn toggle_24h(&mut self) {
        self.use_24h = !self.use_24h;
    }

    pub fn toggle_seconds(&mut self) {
        self.show_seconds = !self.show_seconds;
    }

    pub fn toggle_date(&mut self) {
        self.show_date = !self.show_date;
    }

    pub fn toggle_sound(&mut self) {
        self.sound_on = !self.sound_on;
    }
}
