//! Shared application-wide constants.
//! Centralizes tweakable values used by the pointer loop, the page widgets and the preview host.

// Pointer feedback
/// Margin (in CSS pixels) added on every side of a card before deciding whether its glow is updated.
pub const GLOW_CULL_MARGIN: f64 = 150.0;
/// Viewports at or below this width (in CSS pixels) get no cursor follower.
pub const DESKTOP_MIN_WIDTH: f64 = 1024.0;
/// Element id of the small follower dot.
pub const CURSOR_DOT_ID: &str = "cursor-dot";
/// Element id of the follower ring.
pub const CURSOR_RING_ID: &str = "cursor-ring";
/// Selector matching the cards that receive the glow effect.
pub const CARD_SELECTOR: &str = ".bento-card";
/// Class toggled on the body while the pointer is over an interactive element.
pub const HOVER_CLASS: &str = "cursor-hover";
/// Custom property carrying the horizontal glow offset.
pub const GLOW_X_PROPERTY: &str = "--mouse-x";
/// Custom property carrying the vertical glow offset.
pub const GLOW_Y_PROPERTY: &str = "--mouse-y";

// Parallax
/// Maximum image translation (in CSS pixels) across the full width or height of a card.
pub const PARALLAX_STRENGTH: f64 = 15.0;
/// Image scale while the pointer is over its card.
pub const PARALLAX_SCALE: f64 = 1.1;

// Toast notifications
/// How long a toast stays fully visible, in milliseconds.
pub const TOAST_DISPLAY_MS: u32 = 2000;
/// Fade-out duration of a toast, in milliseconds.
pub const TOAST_FADE_MS: u32 = 400;

// Clock
/// Clock refresh period, in milliseconds.
pub const CLOCK_INTERVAL_MS: u32 = 1000;
/// Offset from UTC (in seconds) used by the clock display. Jakarta time.
pub const CLOCK_UTC_OFFSET_SECS: i32 = 7 * 3600;

// Persistence
/// Storage key holding the theme preference.
pub const THEME_STORAGE_KEY: &str = "portfolio-theme";
