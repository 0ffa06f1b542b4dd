//! The preview's stand-in for the page DOM.
//!
//! Card rectangles are refreshed from the egui layout every frame, so the pointer
//! loop measures them exactly as it would measure `getBoundingClientRect()`.

use crate::error::{FxError, FxResult};
use crate::feedback::Surface;
use crate::parallax::Tilt;
use crate::types::*;
use eframe::egui;

/// Converts an egui rectangle to a layout rectangle.
pub fn to_rect(rect: egui::Rect) -> Rect {
    Rect::new(
        rect.min.x as f64,
        rect.min.y as f64,
        rect.width() as f64,
        rect.height() as f64,
    )
}

/// Converts a point to an egui position.
pub fn to_pos(point: Point) -> egui::Pos2 {
    egui::pos2(point.x as f32, point.y as f32)
}

/// One card of the mock page.
#[derive(Debug, Clone)]
pub struct PreviewCard {
    /// Heading
    pub title: String,
    /// Body text
    pub blurb: String,
    /// Whether the card shows an image that tilts under the pointer
    pub has_image: bool,
    /// Layout rectangle from the last frame, `None` until laid out
    pub rect: Option<Rect>,
    /// Last glow offset written by the pointer loop
    pub glow: Option<GlowOffset>,
    /// Current image tilt
    pub tilt: Tilt,
}

impl PreviewCard {
    /// A card that has not been laid out yet.
    pub fn new(title: &str, blurb: &str, has_image: bool) -> Self {
        Self {
            title: title.to_string(),
            blurb: blurb.to_string(),
            has_image,
            rect: None,
            glow: None,
            tilt: Tilt::RESET,
        }
    }
}

/// Mock page the pointer loop writes into.
#[derive(Debug, Clone, Default)]
pub struct PreviewSurface {
    /// Glow cards in display order
    pub cards: Vec<PreviewCard>,
    /// Whether the follower elements exist (desktop-sized window)
    pub followers_visible: bool,
    /// Follower dot position
    pub dot: Option<Point>,
    /// Follower ring position
    pub ring: Option<Point>,
    /// Mirror of the `cursor-hover` body class
    pub hover_class: bool,
}

impl Surface for PreviewSurface {
    type Card = usize;

    fn place_follower(&mut self, follower: Follower, at: Point) -> FxResult<()> {
        if !self.followers_visible {
            return Err(FxError::MissingElement(format!("{follower:?} follower")));
        }
        match follower {
            Follower::Dot => self.dot = Some(at),
            Follower::Ring => self.ring = Some(at),
        }
        Ok(())
    }

    fn cards(&self) -> Vec<usize> {
        (0..self.cards.len()).collect()
    }

    fn card_rect(&self, card: &usize) -> FxResult<Rect> {
        self.cards
            .get(*card)
            .and_then(|c| c.rect)
            .ok_or_else(|| FxError::MissingElement(format!("card {card} not laid out")))
    }

    fn set_card_glow(&mut self, card: &usize, glow: GlowOffset) -> FxResult<()> {
        let card = self
            .cards
            .get_mut(*card)
            .ok_or_else(|| FxError::MissingElement(format!("card {card}")))?;
        card.glow = Some(glow);
        Ok(())
    }

    fn set_hover_class(&mut self, hovering: bool) -> FxResult<()> {
        self.hover_class = hovering;
        Ok(())
    }
}
