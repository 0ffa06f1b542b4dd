//! # Portfolio FX
//!
//! Pointer-driven visual feedback for a portfolio page, plus the small widgets
//! around it. The core is host-independent:
//! - **Pointer loop**: follower dot and ring, per-card glow offsets, at most one
//!   visual update per frame with the latest pointer position
//! - **Hover tracking**: a single delegated enter/leave pair toggles the hover
//!   class for interactive elements; registration is idempotent
//! - **Widgets**: slide-out menu, theme preference, clock, scroll progress and
//!   clipboard copy with a toast
//!
//! ## Hosts
//! - In the browser (`wasm32`), [`web::PortfolioFx`] binds the core to the DOM
//! - On desktop, [`run_app`] opens an egui preview of the same behavior

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod config;
mod constants;
pub mod error;
pub mod feedback;
pub mod hover;
pub mod parallax;
pub mod scheduler;
mod types;
mod ui;
pub mod widgets;

#[cfg(target_arch = "wasm32")]
pub mod web;

// Re-export public types and functions
pub use config::FxConfig;
pub use error::{FxError, FxResult};
pub use feedback::{FrameStats, PointerFeedback, Surface};
pub use scheduler::{FrameScheduler, ManualFrameScheduler};
pub use types::*;
pub use ui::PreviewApp;

/// Runs the desktop preview with default settings.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use portfolio_fx::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Portfolio FX Preview",
        options,
        Box::new(|cc| Ok(Box::new(PreviewApp::new(cc)))),
    )
}
