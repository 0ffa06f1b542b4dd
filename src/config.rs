//! Page configuration.
//!
//! Everything the effects look up by name (element ids, selectors, class names,
//! timings) is collected here so a page can override it with a JSON document.
//! Missing fields fall back to the values in [`crate::constants`].

use crate::constants::*;
use crate::error::FxResult;
use serde::{Deserialize, Serialize};

/// Tag names and classes that make an element "interactive" for the hover flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractiveSet {
    /// Lower-case tag names
    pub tags: Vec<String>,
    /// Class names
    pub classes: Vec<String>,
}

impl Default for InteractiveSet {
    fn default() -> Self {
        Self {
            tags: ["a", "button", "input", "select", "textarea", "label", "i"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            classes: ["bento-card", "cursor-pointer"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Settings of the pointer feedback loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Id of the follower dot
    pub dot_id: String,
    /// Id of the follower ring
    pub ring_id: String,
    /// Selector matching glow cards
    pub card_selector: String,
    /// Body class set while hovering an interactive element
    pub hover_class: String,
    /// Custom property receiving the horizontal glow offset
    pub glow_x_property: String,
    /// Custom property receiving the vertical glow offset
    pub glow_y_property: String,
    /// Margin around each card inside which its glow is updated
    pub cull_margin: f64,
    /// Viewports must be wider than this for the follower to run
    pub desktop_min_width: f64,
    /// Element categories that count as interactive
    pub interactive: InteractiveSet,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            dot_id: CURSOR_DOT_ID.to_string(),
            ring_id: CURSOR_RING_ID.to_string(),
            card_selector: CARD_SELECTOR.to_string(),
            hover_class: HOVER_CLASS.to_string(),
            glow_x_property: GLOW_X_PROPERTY.to_string(),
            glow_y_property: GLOW_Y_PROPERTY.to_string(),
            cull_margin: GLOW_CULL_MARGIN,
            desktop_min_width: DESKTOP_MIN_WIDTH,
            interactive: InteractiveSet::default(),
        }
    }
}

impl FeedbackConfig {
    /// Returns true if a viewport of `width` pixels should run the cursor follower.
    pub fn follower_enabled_for(&self, width: f64) -> bool {
        width > self.desktop_min_width
    }
}

/// Toast timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastConfig {
    /// Time the toast stays fully visible
    pub display_ms: u32,
    /// Fade-out duration after the display time
    pub fade_ms: u32,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            display_ms: TOAST_DISPLAY_MS,
            fade_ms: TOAST_FADE_MS,
        }
    }
}

impl ToastConfig {
    /// Total lifetime of a toast, saturating at `u32::MAX`.
    pub fn total_ms(&self) -> u32 {
        self.display_ms.saturating_add(self.fade_ms)
    }
}

/// Clock display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Id of the element receiving the time text
    pub element_id: String,
    /// Refresh period
    pub interval_ms: u32,
    /// Displayed time zone as an offset from UTC
    pub utc_offset_secs: i32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            element_id: "clock".to_string(),
            interval_ms: CLOCK_INTERVAL_MS,
            utc_offset_secs: CLOCK_UTC_OFFSET_SECS,
        }
    }
}

/// Ids of the slide-out menu elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Overlay shown while the menu is open
    pub overlay_id: String,
    /// Upper burger line
    pub top_line_id: String,
    /// Lower burger line
    pub bottom_line_id: String,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            overlay_id: "menuOverlay".to_string(),
            top_line_id: "line1".to_string(),
            bottom_line_id: "line2".to_string(),
        }
    }
}

/// Full page configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FxConfig {
    /// Pointer loop settings
    pub feedback: FeedbackConfig,
    /// Toast timings
    pub toast: ToastConfig,
    /// Clock settings
    pub clock: ClockConfig,
    /// Menu element ids
    pub menu: MenuConfig,
    /// Id of the scroll progress bar
    pub scroll_bar_id: String,
    /// Storage key of the theme preference
    pub theme_key: String,
}

impl FxConfig {
    /// Parses a configuration document. Absent fields take their defaults.
    pub fn from_json(json: &str) -> FxResult<Self> {
        let mut config: FxConfig = serde_json::from_str(json)?;
        config.fill_empty_names();
        Ok(config)
    }

    /// Serializes the configuration as pretty JSON.
    pub fn to_json(&self) -> FxResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn fill_empty_names(&mut self) {
        if self.scroll_bar_id.is_empty() {
            self.scroll_bar_id = "scroll-progress".to_string();
        }
        if self.theme_key.is_empty() {
            self.theme_key = THEME_STORAGE_KEY.to_string();
        }
    }

    /// Default configuration with every name filled in.
    pub fn standard() -> Self {
        let mut config = Self::default();
        config.fill_empty_names();
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = FxConfig::from_json(r#"{ "feedback": { "cull_margin": 40.0 } }"#).unwrap();
        assert_eq!(config.feedback.cull_margin, 40.0);
        assert_eq!(config.feedback.dot_id, CURSOR_DOT_ID);
        assert_eq!(config.toast.total_ms(), 2400);
        assert_eq!(config.theme_key, THEME_STORAGE_KEY);
        assert_eq!(config.scroll_bar_id, "scroll-progress");
    }

    #[test]
    fn huge_toast_timings_saturate() {
        let config =
            FxConfig::from_json(r#"{ "toast": { "display_ms": 4294967295, "fade_ms": 400 } }"#)
                .unwrap();
        assert_eq!(config.toast.total_ms(), u32::MAX);
        assert!(config.toast.total_ms() >= config.toast.display_ms);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            FxConfig::from_json("{ feedback: "),
            Err(crate::error::FxError::Config(_))
        ));
    }

    #[test]
    fn config_survives_json() {
        let config = FxConfig::standard();
        let json = config.to_json().unwrap();
        assert_eq!(FxConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn follower_needs_desktop_width() {
        let feedback = FeedbackConfig::default();
        assert!(!feedback.follower_enabled_for(1024.0));
        assert!(feedback.follower_enabled_for(1280.0));
        assert!(!feedback.follower_enabled_for(390.0));
    }
}
