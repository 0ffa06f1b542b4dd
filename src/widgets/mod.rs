//! Peripheral page widgets: menu, theme, clock, scroll progress and clipboard copy.
//!
//! These hold the host-independent state and arithmetic; the web host and the
//! native preview apply the results to their own surfaces.
//!
//! # Module Organization
//!
//! - `menu` - Two-state slide-out menu and its style effects
//! - `theme` - Theme preference, resolution and persistence
//! - `clock` - `HH:MM` clock text for a fixed time zone
//! - `scroll` - Frame-coalesced scroll progress
//! - `clipboard` - Copy with fallback and the result toast

mod clipboard;
mod clock;
mod menu;
mod scroll;
mod theme;

pub use clipboard::{
    legacy_copy_result, settle_copy, CopyPath, CopyReport, Toast, ToastKind, ToastPhase, ToastSlot,
};
pub use clock::ClockDisplay;
pub use menu::{MenuEffects, MenuToggle};
pub use scroll::{ScrollMetrics, ScrollProgress};
pub use theme::{persist_theme, resolve_theme, Theme, ThemeStore};
