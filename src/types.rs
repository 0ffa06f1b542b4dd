//! Core data types shared by the pointer loop, the page widgets and the hosts.
//!
//! This module defines the geometric primitives (points, rectangles, glow offsets),
//! the follower element identities and the host-independent description of DOM
//! elements used by the interactive predicate.

use serde::{Deserialize, Serialize};

/// Identifier handed out by a frame scheduler for one pending callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameToken(pub u64);

/// A position in viewport space, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle in viewport space, shaped like a `DOMRect`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub left: f64,
    /// Top edge
    pub top: f64,
    /// Width, never negative for rectangles coming from layout
    pub width: f64,
    /// Height, never negative for rectangles coming from layout
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Returns the rectangle grown by `margin` on every side.
    pub fn padded(&self, margin: f64) -> Rect {
        Rect {
            left: self.left - margin,
            top: self.top - margin,
            width: self.width + 2.0 * margin,
            height: self.height + 2.0 * margin,
        }
    }

    /// Returns true if `point` lies inside the rectangle. Edges are inclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// Position of `point` relative to the top-left corner.
    pub fn offset_of(&self, point: Point) -> GlowOffset {
        GlowOffset {
            x: point.x - self.left,
            y: point.y - self.top,
        }
    }
}

/// Pointer position relative to a card's top-left corner, exposed to styling as
/// a pair of custom properties.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlowOffset {
    /// Horizontal offset from the card's left edge
    pub x: f64,
    /// Vertical offset from the card's top edge
    pub y: f64,
}

impl GlowOffset {
    /// Formats the offset as the two CSS values written to the card.
    pub fn css_values(&self) -> (String, String) {
        (format!("{}px", self.x), format!("{}px", self.y))
    }
}

/// The two elements that track the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Follower {
    /// The small dot drawn exactly under the pointer
    Dot,
    /// The larger ring around the dot
    Ring,
}

impl Follower {
    /// Both followers, in paint order.
    pub const ALL: [Follower; 2] = [Follower::Dot, Follower::Ring];

    /// CSS transform centering the follower on `at`.
    pub fn transform(at: Point) -> String {
        format!("translate({}px, {}px) translate(-50%, -50%)", at.x, at.y)
    }
}

/// Host-independent description of an element, enough to decide whether it is
/// interactive.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ElementInfo {
    /// Lower-case tag name (`a`, `button`, `div`, ...)
    pub tag: String,
    /// Class list
    pub classes: Vec<String>,
}

impl ElementInfo {
    /// Creates an element description with a tag and no classes.
    pub fn tag(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: Vec::new(),
        }
    }

    /// Adds a class to the description.
    pub fn with_class(mut self, class: &str) -> Self {
        self.classes.push(class.to_string());
        self
    }

    /// Returns true if the element carries `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_relative_to_top_left() {
        let card = Rect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(
            card.offset_of(Point::new(150.0, 120.0)),
            GlowOffset { x: 50.0, y: 20.0 }
        );
    }

    #[test]
    fn padded_rect_grows_on_every_side() {
        let card = Rect::new(100.0, 100.0, 200.0, 100.0).padded(10.0);
        assert_eq!(card, Rect::new(90.0, 90.0, 220.0, 120.0));
        assert!(card.contains(Point::new(90.0, 210.0)));
        assert!(card.contains(Point::new(310.0, 90.0)));
        assert!(!card.contains(Point::new(90.0, 210.1)));
        assert!(!card.contains(Point::new(89.9, 150.0)));
    }

    #[test]
    fn follower_transform_centers_element() {
        assert_eq!(
            Follower::transform(Point::new(12.0, 8.5)),
            "translate(12px, 8.5px) translate(-50%, -50%)"
        );
    }

    #[test]
    fn element_info_normalizes_tag() {
        let el = ElementInfo::tag("BUTTON").with_class("primary");
        assert_eq!(el.tag, "button");
        assert!(el.has_class("primary"));
        assert!(!el.has_class("bento-card"));
    }
}
