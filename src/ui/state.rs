//! Preview application state.
//!
//! This module contains the `PreviewApp` struct and the state transitions the
//! preview drives on the core: pointer input, hover enter/leave, frame runs,
//! scroll metrics, menu, theme and clipboard.

use super::surface::{PreviewCard, PreviewSurface};
use crate::config::FxConfig;
use crate::error::{log_error, FxError};
use crate::feedback::PointerFeedback;
use crate::parallax::Tilt;
use crate::scheduler::ManualFrameScheduler;
use crate::types::*;
use crate::widgets::*;
use eframe::egui;

/// Pointer loop as wired in the preview.
pub type PreviewFeedback = PointerFeedback<PreviewSurface, ManualFrameScheduler>;

/// Cards shown on the mock page.
pub fn sample_cards() -> Vec<PreviewCard> {
    vec![
        PreviewCard::new("About", "Designer and developer based in Jakarta.", false),
        PreviewCard::new("Projects", "Selected work from the last few years.", true),
        PreviewCard::new("Stack", "Rust, TypeScript, a lot of CSS.", false),
        PreviewCard::new("Writing", "Notes on tooling and interfaces.", true),
        PreviewCard::new("Contact", "Say hello, the inbox is open.", false),
        PreviewCard::new("Now", "Currently rebuilding this site.", false),
    ]
}

/// The desktop preview of the portfolio effects.
pub struct PreviewApp {
    /// Names, selectors and timings
    pub config: FxConfig,
    /// The pointer feedback loop, writing into the mock page
    pub feedback: PreviewFeedback,
    /// Scroll progress of the card list
    pub scroll: ScrollProgress,
    /// Frame source of the scroll progress
    pub scroll_scheduler: ManualFrameScheduler,
    /// Scroll metrics reported last, to skip unchanged frames
    pub last_scroll: Option<ScrollMetrics>,
    /// Slide-out menu
    pub menu: MenuToggle,
    /// Active theme
    pub theme: Theme,
    /// Header clock
    pub clock: ClockDisplay,
    /// Toast currently on screen
    pub toast: Option<Toast>,
    /// Interactive elements under the pointer during the last frame
    pub hovered: Vec<(egui::Id, ElementInfo)>,
    /// Address copied by the contact button
    pub email: String,
    /// Requested card list offset, consumed by the next layout
    pub pending_scroll_offset: Option<f32>,
}

impl Default for PreviewApp {
    fn default() -> Self {
        Self::with_config(FxConfig::standard())
    }
}

impl PreviewApp {
    /// Creates the preview with `config` and the sample cards.
    pub fn with_config(config: FxConfig) -> Self {
        let surface = PreviewSurface {
            cards: sample_cards(),
            ..Default::default()
        };
        let mut feedback =
            PointerFeedback::new(&config.feedback, surface, ManualFrameScheduler::new());
        // The preview's "delegated listener" is the per-frame hover diff; nothing to attach.
        let _ = feedback.register_interactive_hover_tracking(|| Ok::<(), FxError>(()));
        let clock = ClockDisplay::new(&config.clock);
        Self {
            config,
            feedback,
            scroll: ScrollProgress::new(),
            scroll_scheduler: ManualFrameScheduler::new(),
            last_scroll: None,
            menu: MenuToggle::new(),
            theme: Theme::default(),
            clock,
            toast: None,
            hovered: Vec::new(),
            email: "hello@example.com".to_string(),
            pending_scroll_offset: None,
        }
    }

    /// Creates the preview, restoring the theme from eframe storage.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app = Self::default();
        if let Some(storage) = cc.storage {
            app.theme = resolve_theme(storage, &app.config.theme_key, None);
        }
        app
    }

    /// Feeds this frame's pointer events into the loop.
    ///
    /// `viewport_width` decides whether the followers exist at all.
    pub fn handle_pointer_input(&mut self, events: &[egui::Event], viewport_width: f32) {
        let enabled = self
            .config
            .feedback
            .follower_enabled_for(viewport_width as f64);
        let surface = self.feedback.surface_mut();
        if surface.followers_visible != enabled {
            surface.followers_visible = enabled;
            if !enabled {
                surface.dot = None;
                surface.ring = None;
            }
        }
        if !enabled {
            return;
        }

        for event in events {
            match event {
                egui::Event::PointerMoved(pos) => {
                    if let Err(e) = self.feedback.on_pointer_move(pos.x as f64, pos.y as f64) {
                        log_error("visual update not scheduled", &e);
                    }
                }
                egui::Event::PointerGone => self.feedback.on_pointer_leave_window(),
                _ => {}
            }
        }
    }

    /// Turns the set of interactive elements under the pointer into enter/leave
    /// notifications, the way delegated listeners would see them.
    pub fn update_hover(&mut self, now_hovered: Vec<(egui::Id, ElementInfo)>) {
        if !self.feedback.is_hover_tracking_registered() {
            self.hovered = now_hovered;
            return;
        }
        for (id, info) in &self.hovered {
            if !now_hovered.iter().any(|(other, _)| other == id) {
                self.feedback.on_interactive_leave(info);
            }
        }
        for (id, info) in &now_hovered {
            if !self.hovered.iter().any(|(other, _)| other == id) {
                self.feedback.on_interactive_enter(info);
            }
        }
        self.hovered = now_hovered;
    }

    /// Updates the image tilt of every card for the pointer at `pointer`.
    pub fn update_tilt(&mut self, pointer: Option<Point>) {
        for card in &mut self.feedback.surface_mut().cards {
            card.tilt = match (card.has_image, card.rect, pointer) {
                (true, Some(rect), Some(p)) if rect.contains(p) => {
                    Tilt::toward(rect, p).unwrap_or(Tilt::RESET)
                }
                _ => Tilt::RESET,
            };
        }
    }

    /// Reports the card list's scroll metrics; unchanged metrics are skipped.
    pub fn record_scroll(&mut self, metrics: ScrollMetrics) {
        if self.last_scroll == Some(metrics) {
            return;
        }
        self.last_scroll = Some(metrics);
        if let Err(e) = self.scroll.on_scroll(metrics, &mut self.scroll_scheduler) {
            log_error("scroll progress not scheduled", &e);
        }
    }

    /// Runs every frame callback that is due. Returns the number of visual updates.
    pub fn run_frames(&mut self) -> usize {
        let mut updates = 0;
        for token in self.feedback.scheduler_mut().take_due() {
            if self.feedback.run_visual_update(token) {
                updates += 1;
            }
        }
        for token in self.scroll_scheduler.take_due() {
            self.scroll.run(token);
        }
        updates
    }

    /// Opens or closes the menu; opening re-registers hover tracking.
    pub fn toggle_menu(&mut self) {
        self.menu.toggle();
        if self.menu.is_open() {
            let _ = self
                .feedback
                .register_interactive_hover_tracking(|| Ok::<(), FxError>(()));
        }
    }

    /// Asks the next layout to scroll the card list to `offset` pixels.
    pub fn scroll_to(&mut self, offset: f32) {
        self.pending_scroll_offset = Some(offset.max(0.0));
    }

    /// Asks the next layout to scroll the card list back to the top.
    pub fn scroll_to_top(&mut self) {
        self.scroll_to(0.0);
    }

    /// Switches the theme. It is persisted when eframe saves.
    pub fn toggle_theme(&mut self) {
        self.theme = self.theme.toggled();
    }

    /// Copies the contact address and shows the result.
    pub fn copy_email(&mut self, ctx: &egui::Context, now_ms: f64) {
        // egui hands the text to the platform on the next output; it cannot fail here.
        ctx.copy_text(self.email.clone());
        let report = CopyReport {
            copied: true,
            path: CopyPath::Platform,
        };
        self.toast = Some(Toast::for_copy(report, now_ms));
    }

    /// Current toast phase, clearing the toast once it is gone.
    pub fn toast_phase(&mut self, now_ms: f64) -> Option<ToastPhase> {
        let phase = self.toast.as_ref()?.phase(now_ms, &self.config.toast);
        if phase == ToastPhase::Gone {
            self.toast = None;
            return None;
        }
        Some(phase)
    }
}
