//! Native preview of the page effects.
//!
//! The preview paints a mock portfolio page with egui and drives the same
//! pointer loop, hover tracker and widgets the browser host uses, so the
//! behavior can be checked without a browser.
//!
//! # Module Organization
//!
//! - `state` - `PreviewApp` and its state transitions
//! - `surface` - The `Surface` implementation over egui-painted cards
//! - `rendering` - Painting of cards, followers, menu, toast and progress bar

mod rendering;
mod state;
mod surface;

pub use rendering::HoverSet;
pub use state::{sample_cards, PreviewApp, PreviewFeedback};
pub use surface::{PreviewCard, PreviewSurface};

use crate::widgets::{persist_theme, Theme};
use eframe::egui;
use std::time::Duration;

impl eframe::App for PreviewApp {
    /// Persist the theme preference between restarts.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        persist_theme(storage, &self.config.theme_key, self.theme);
    }

    /// Runs one preview frame.
    ///
    /// Pointer events are fed in first, then the page is laid out (which
    /// refreshes card rectangles and the hover set), then due frame callbacks
    /// run against that layout, and finally the followers are painted on top.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let visuals = match self.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        };
        ctx.set_visuals(visuals);

        let (events, width) = ctx.input(|i| (i.events.clone(), i.screen_rect().width()));
        self.handle_pointer_input(&events, width);

        let mut hovered = HoverSet::new();
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            self.draw_toolbar(ui, &mut hovered);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_cards(ui, &mut hovered);
        });
        self.draw_menu_overlay(ctx, &mut hovered);
        self.update_hover(hovered);

        if self.run_frames() > 0 {
            ctx.request_repaint();
        }
        self.draw_followers(ctx);
        self.draw_scroll_progress(ctx);
        self.draw_toast(ctx);

        if self.feedback.pending_token().is_some() {
            ctx.request_repaint();
        }
        ctx.request_repaint_after(Duration::from_millis(u64::from(
            self.config.clock.interval_ms,
        )));
    }
}
