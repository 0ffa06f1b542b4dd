//! Painting of the mock page: toolbar, cards, menu overlay, followers, toast
//! and scroll progress.
//!
//! Everything here reads state the pointer loop and widgets already computed;
//! the only writes are card layout rectangles and hover bookkeeping.

use super::state::PreviewApp;
use super::surface::{to_pos, to_rect, PreviewCard};
use crate::types::*;
use crate::widgets::{ScrollMetrics, ToastKind, ToastPhase};
use eframe::egui;
use eframe::epaint::StrokeKind;

const CARD_HEIGHT: f32 = 150.0;
const CARD_CORNER_RADIUS: f32 = 16.0;
const GLOW_RADIUS: f32 = 140.0;
const GLOW_STEPS: usize = 8;
const DOT_RADIUS: f32 = 4.0;
const RING_RADIUS: f32 = 18.0;
const RING_HOVER_RADIUS: f32 = 30.0;
const PROGRESS_HEIGHT: f32 = 3.0;

/// Interactive elements under the pointer this frame.
pub type HoverSet = Vec<(egui::Id, ElementInfo)>;

fn track_hover(hovered: &mut HoverSet, response: &egui::Response, info: ElementInfo) {
    if response.hovered() {
        hovered.push((response.id, info));
    }
}

fn accent(dark: bool) -> egui::Color32 {
    if dark {
        egui::Color32::from_rgb(140, 170, 255)
    } else {
        egui::Color32::from_rgb(60, 90, 200)
    }
}

impl PreviewApp {
    fn is_dark(&self) -> bool {
        self.theme == crate::widgets::Theme::Dark
    }

    /// Header row: clock, scroll-to-top, theme, copy email and the menu button.
    pub fn draw_toolbar(&mut self, ui: &mut egui::Ui, hovered: &mut HoverSet) {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(self.clock.now_text()).monospace());
            ui.separator();

            let top = ui.button("Top");
            track_hover(hovered, &top, ElementInfo::tag("button"));
            if top.clicked() {
                self.scroll_to_top();
            }

            let theme_label = match self.theme {
                crate::widgets::Theme::Dark => "Light mode",
                crate::widgets::Theme::Light => "Dark mode",
            };
            let theme = ui.button(theme_label);
            track_hover(hovered, &theme, ElementInfo::tag("button"));
            if theme.clicked() {
                self.toggle_theme();
            }

            let copy = ui.button("Copy email");
            track_hover(hovered, &copy, ElementInfo::tag("button"));
            if copy.clicked() {
                let now_ms = ui.ctx().input(|i| i.time) * 1000.0;
                self.copy_email(ui.ctx(), now_ms);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let menu = self.draw_menu_button(ui);
                track_hover(hovered, &menu, ElementInfo::tag("button"));
                if menu.clicked() {
                    self.toggle_menu();
                }
            });
        });
    }

    /// Two-line menu button; the lines cross while the menu is open.
    fn draw_menu_button(&self, ui: &mut egui::Ui) -> egui::Response {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(28.0, 28.0), egui::Sense::click());
        let painter = ui.painter();
        let stroke = egui::Stroke::new(2.0, ui.visuals().strong_text_color());
        let c = rect.center();
        if self.menu.is_open() {
            painter.line_segment([c + egui::vec2(-8.0, -8.0), c + egui::vec2(8.0, 8.0)], stroke);
            painter.line_segment([c + egui::vec2(-8.0, 8.0), c + egui::vec2(8.0, -8.0)], stroke);
        } else {
            painter.line_segment([c + egui::vec2(-9.0, -5.0), c + egui::vec2(9.0, -5.0)], stroke);
            painter.line_segment([c + egui::vec2(-9.0, 5.0), c + egui::vec2(9.0, 5.0)], stroke);
        }
        response
    }

    /// Lays out the glow cards in a scroll area and reports scroll metrics.
    ///
    /// Card rectangles are written back to the surface so the next visual update
    /// measures this frame's layout.
    pub fn draw_cards(&mut self, ui: &mut egui::Ui, hovered: &mut HoverSet) {
        let pointer = ui.ctx().pointer_hover_pos();
        self.update_tilt(pointer.map(|p| Point::new(p.x as f64, p.y as f64)));

        let scrolling = self.menu.effects().body_overflow != "hidden";
        let mut area = egui::ScrollArea::vertical()
            .id_salt("cards")
            .auto_shrink([false, false])
            .enable_scrolling(scrolling);
        if let Some(offset) = self.pending_scroll_offset.take() {
            area = area.vertical_scroll_offset(offset);
        }

        let dark = self.is_dark();
        let card_class = crate::constants::CARD_SELECTOR.trim_start_matches('.');
        let output = area.show(ui, |ui| {
            ui.spacing_mut().item_spacing.y = 16.0;
            let count = self.feedback.surface().cards.len();
            for index in 0..count {
                let width = ui.available_width();
                let (rect, _) =
                    ui.allocate_exact_size(egui::vec2(width, CARD_HEIGHT), egui::Sense::hover());
                if pointer.is_some_and(|p| rect.contains(p)) {
                    hovered.push((
                        egui::Id::new(("bento-card", index)),
                        ElementInfo::tag("div").with_class(card_class),
                    ));
                }
                let card = &mut self.feedback.surface_mut().cards[index];
                card.rect = Some(to_rect(rect));
                paint_card(ui.painter(), rect, card, dark);
            }
        });

        self.record_scroll(ScrollMetrics {
            scroll_top: output.state.offset.y as f64,
            scroll_height: output.content_size.y as f64,
            client_height: output.inner_rect.height() as f64,
        });
    }

    /// Full-screen menu shown while the menu is open.
    pub fn draw_menu_overlay(&mut self, ctx: &egui::Context, hovered: &mut HoverSet) {
        if self.menu.effects().overlay_display != "flex" {
            return;
        }
        let screen = ctx.input(|i| i.screen_rect());
        egui::Area::new(egui::Id::new("menu_overlay"))
            .order(egui::Order::Middle)
            .fixed_pos(screen.min + egui::vec2(0.0, 48.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.set_min_width(screen.width());
                    ui.vertical_centered(|ui| {
                        for label in ["Work", "About", "Contact"] {
                            let link = ui.link(egui::RichText::new(label).heading());
                            track_hover(hovered, &link, ElementInfo::tag("a"));
                            if link.clicked() {
                                self.menu.close();
                            }
                        }
                    });
                });
            });
    }

    /// Dot and ring, painted above everything else.
    pub fn draw_followers(&self, ctx: &egui::Context) {
        let surface = self.feedback.surface();
        if !surface.followers_visible {
            return;
        }
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("followers"),
        ));
        let color = accent(self.is_dark());
        if let Some(dot) = surface.dot {
            painter.circle_filled(to_pos(dot), DOT_RADIUS, color);
        }
        if let Some(ring) = surface.ring {
            let radius = if surface.hover_class {
                RING_HOVER_RADIUS
            } else {
                RING_RADIUS
            };
            painter.circle_stroke(to_pos(ring), radius, egui::Stroke::new(1.5, color));
        }
    }

    /// Copy result toast, bottom center, fading out at the end of its lifetime.
    pub fn draw_toast(&mut self, ctx: &egui::Context) {
        let now_ms = ctx.input(|i| i.time) * 1000.0;
        let Some(phase) = self.toast_phase(now_ms) else {
            return;
        };
        let Some(toast) = self.toast.as_ref() else {
            return;
        };
        let opacity = match phase {
            ToastPhase::Visible => 1.0,
            ToastPhase::Fading(o) => o,
            ToastPhase::Gone => 0.0,
        };
        let fill = match toast.kind {
            ToastKind::Success => egui::Color32::from_rgb(40, 140, 80),
            ToastKind::Failure => egui::Color32::from_rgb(170, 50, 50),
        };
        let screen = ctx.input(|i| i.screen_rect());
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Tooltip,
            egui::Id::new("toast"),
        ));
        let rect = egui::Rect::from_center_size(
            egui::pos2(screen.center().x, screen.bottom() - 48.0),
            egui::vec2(220.0, 36.0),
        );
        painter.rect_filled(rect, 8.0, fill.gamma_multiply(opacity));
        painter.text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            &toast.message,
            egui::FontId::proportional(14.0),
            egui::Color32::WHITE.gamma_multiply(opacity),
        );
        ctx.request_repaint();
    }

    /// Thin bar along the top edge, as wide as the scrolled share of the list.
    pub fn draw_scroll_progress(&self, ctx: &egui::Context) {
        let screen = ctx.input(|i| i.screen_rect());
        let width = screen.width() * (self.scroll.percent() as f32 / 100.0);
        if width <= 0.0 {
            return;
        }
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("scroll_progress"),
        ));
        let rect = egui::Rect::from_min_size(screen.min, egui::vec2(width, PROGRESS_HEIGHT));
        painter.rect_filled(rect, 0.0, accent(self.is_dark()));
    }
}

/// Paints one card: background, sticky glow, optional tilted image and text.
fn paint_card(painter: &egui::Painter, rect: egui::Rect, card: &PreviewCard, dark: bool) {
    let (fill, border, text) = if dark {
        (
            egui::Color32::from_rgb(24, 24, 28),
            egui::Color32::from_rgb(60, 60, 70),
            egui::Color32::from_rgb(230, 230, 235),
        )
    } else {
        (
            egui::Color32::from_rgb(248, 248, 250),
            egui::Color32::from_rgb(210, 210, 220),
            egui::Color32::from_rgb(30, 30, 35),
        )
    };
    painter.rect_filled(rect, CARD_CORNER_RADIUS, fill);

    if let Some(glow) = card.glow {
        let clipped = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
        let center = rect.min + egui::vec2(glow.x as f32, glow.y as f32);
        let base = accent(dark);
        for step in 0..GLOW_STEPS {
            let t = step as f32 / GLOW_STEPS as f32;
            let radius = GLOW_RADIUS * (1.0 - t);
            clipped.circle_filled(center, radius, base.gamma_multiply(0.03));
        }
    }

    if card.has_image {
        let frame = egui::Rect::from_min_max(
            egui::pos2(rect.right() - rect.height(), rect.top()),
            rect.max,
        )
        .shrink(16.0);
        let tilt = card.tilt;
        let image = egui::Rect::from_center_size(
            frame.center() + egui::vec2(tilt.dx as f32, tilt.dy as f32),
            frame.size() * tilt.scale as f32,
        );
        let clipped = painter.with_clip_rect(frame.intersect(painter.clip_rect()));
        clipped.rect_filled(image, 8.0, accent(dark).gamma_multiply(0.5));
        clipped.rect_stroke(image, 8.0, egui::Stroke::new(1.0, border), StrokeKind::Inside);
    }

    painter.rect_stroke(
        rect,
        CARD_CORNER_RADIUS,
        egui::Stroke::new(1.0, border),
        StrokeKind::Inside,
    );
    painter.text(
        rect.min + egui::vec2(20.0, 20.0),
        egui::Align2::LEFT_TOP,
        &card.title,
        egui::FontId::proportional(20.0),
        text,
    );
    painter.text(
        rect.min + egui::vec2(20.0, 56.0),
        egui::Align2::LEFT_TOP,
        &card.blurb,
        egui::FontId::proportional(14.0),
        text.gamma_multiply(0.7),
    );
}
