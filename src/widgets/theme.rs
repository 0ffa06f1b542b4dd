//! Theme preference and its persistence.

use crate::error::FxResult;
use serde::{Deserialize, Serialize};

/// Page color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Theme {
    /// Light background
    Light,
    /// Dark background
    #[default]
    Dark,
}

impl Theme {
    /// Stored and applied name of the theme.
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Parses a stored name; unknown names yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Durable string storage keyed by name (browser `localStorage`, eframe storage).
pub trait ThemeStore {
    /// Reads the value under `key`.
    fn read(&self, key: &str) -> FxResult<Option<String>>;

    /// Writes `value` under `key`.
    fn write(&mut self, key: &str, value: &str) -> FxResult<()>;
}

impl<'a> ThemeStore for dyn eframe::Storage + 'a {
    fn read(&self, key: &str) -> FxResult<Option<String>> {
        Ok(self.get_string(key))
    }

    fn write(&mut self, key: &str, value: &str) -> FxResult<()> {
        self.set_string(key, value.to_string());
        Ok(())
    }
}

/// Resolves the theme to apply at startup.
///
/// A valid stored value wins, then the system preference, then dark. Storage
/// failures are logged and treated as "nothing stored".
pub fn resolve_theme<S: ThemeStore + ?Sized>(
    store: &S,
    key: &str,
    system_prefers_dark: Option<bool>,
) -> Theme {
    let stored = match store.read(key) {
        Ok(value) => value.as_deref().and_then(Theme::parse),
        Err(e) => {
            log::warn!("theme preference unreadable: {e}");
            None
        }
    };
    stored.unwrap_or(match system_prefers_dark {
        Some(false) => Theme::Light,
        _ => Theme::Dark,
    })
}

/// Persists `theme` under `key`. Failures are logged, never raised.
pub fn persist_theme<S: ThemeStore + ?Sized>(store: &mut S, key: &str, theme: Theme) -> bool {
    match store.write(key, theme.as_str()) {
        Ok(()) => true,
        Err(e) => {
            log::warn!("theme preference not saved: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FxError;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MemoryStore {
        pub values: HashMap<String, String>,
        pub denied: bool,
    }

    impl ThemeStore for MemoryStore {
        fn read(&self, key: &str) -> FxResult<Option<String>> {
            if self.denied {
                return Err(FxError::Storage("access denied".into()));
            }
            Ok(self.values.get(key).cloned())
        }

        fn write(&mut self, key: &str, value: &str) -> FxResult<()> {
            if self.denied {
                return Err(FxError::Storage("quota exceeded".into()));
            }
            self.values.insert(key.to_string(), value.to_string());
            Ok(())
        }
    }

    #[test]
    fn stored_theme_wins_over_system_preference() {
        let mut store = MemoryStore::default();
        assert!(persist_theme(&mut store, "theme", Theme::Light));
        assert_eq!(resolve_theme(&store, "theme", Some(true)), Theme::Light);
    }

    #[test]
    fn unknown_value_falls_back_to_system_then_dark() {
        let mut store = MemoryStore::default();
        store.values.insert("theme".into(), "sepia".into());
        assert_eq!(resolve_theme(&store, "theme", Some(false)), Theme::Light);
        assert_eq!(resolve_theme(&store, "theme", None), Theme::Dark);
    }

    #[test]
    fn denied_storage_degrades_silently() {
        let mut store = MemoryStore {
            denied: true,
            ..Default::default()
        };
        assert!(!persist_theme(&mut store, "theme", Theme::Light));
        assert_eq!(resolve_theme(&store, "theme", None), Theme::Dark);
    }

    #[test]
    fn toggling_flips_theme() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::parse(" dark "), Some(Theme::Dark));
    }

    #[test]
    fn default_theme_is_dark() {
        assert_eq!(Theme::default(), Theme::Dark);
    }
}
