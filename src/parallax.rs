//! Image tilt inside glow cards.
//!
//! While the pointer is over a card, the card's image is scaled up slightly and
//! shifted toward the pointer; leaving the card puts it back.

use crate::constants::{PARALLAX_SCALE, PARALLAX_STRENGTH};
use crate::types::{Point, Rect};

/// Scale and translation applied to a card image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tilt {
    /// Uniform scale factor
    pub scale: f64,
    /// Horizontal shift in CSS pixels
    pub dx: f64,
    /// Vertical shift in CSS pixels
    pub dy: f64,
}

impl Tilt {
    /// The untouched image.
    pub const RESET: Tilt = Tilt {
        scale: 1.0,
        dx: 0.0,
        dy: 0.0,
    };

    /// Tilt for a pointer at `pointer` over a card at `rect`.
    ///
    /// Returns `None` for zero-sized cards, whose fractional position is undefined.
    pub fn toward(rect: Rect, pointer: Point) -> Option<Tilt> {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return None;
        }
        let fx = (pointer.x - rect.left) / rect.width;
        let fy = (pointer.y - rect.top) / rect.height;
        Some(Tilt {
            scale: PARALLAX_SCALE,
            dx: (fx - 0.5) * PARALLAX_STRENGTH,
            dy: (fy - 0.5) * PARALLAX_STRENGTH,
        })
    }

    /// CSS `transform` value.
    pub fn css(&self) -> String {
        if *self == Tilt::RESET {
            return "scale(1) translate(0, 0)".to_string();
        }
        format!(
            "scale({}) translate({}px, {}px)",
            self.scale, self.dx, self.dy
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_pointer_only_scales() {
        let tilt = Tilt::toward(Rect::new(0.0, 0.0, 200.0, 100.0), Point::new(100.0, 50.0)).unwrap();
        assert_eq!(tilt.dx, 0.0);
        assert_eq!(tilt.dy, 0.0);
        assert_eq!(tilt.css(), "scale(1.1) translate(0px, 0px)");
    }

    #[test]
    fn corner_pointer_shifts_by_half_strength() {
        let tilt = Tilt::toward(Rect::new(10.0, 10.0, 100.0, 100.0), Point::new(110.0, 10.0)).unwrap();
        assert_eq!(tilt.dx, 7.5);
        assert_eq!(tilt.dy, -7.5);
    }

    #[test]
    fn zero_sized_card_has_no_tilt() {
        assert_eq!(Tilt::toward(Rect::new(0.0, 0.0, 0.0, 50.0), Point::new(0.0, 0.0)), None);
        assert_eq!(Tilt::RESET.css(), "scale(1) translate(0, 0)");
    }
}
