//! The slide-out navigation menu.

/// Everything the page has to change when the menu opens or closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEffects {
    /// `display` value of the overlay
    pub overlay_display: &'static str,
    /// `transform` of the upper burger line
    pub top_line_transform: &'static str,
    /// `transform` of the lower burger line
    pub bottom_line_transform: &'static str,
    /// `overflow` value of the body; `hidden` locks scrolling
    pub body_overflow: &'static str,
}

/// Two-state menu toggle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MenuToggle {
    open: bool,
}

impl MenuToggle {
    /// A closed menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flips the state and returns the effects of the new state.
    pub fn toggle(&mut self) -> MenuEffects {
        self.open = !self.open;
        self.effects()
    }

    /// Closes the menu; returns `None` if it was already closed.
    pub fn close(&mut self) -> Option<MenuEffects> {
        if !self.open {
            return None;
        }
        Some(self.toggle())
    }

    /// Effects matching the current state.
    pub fn effects(&self) -> MenuEffects {
        if self.open {
            MenuEffects {
                overlay_display: "flex",
                top_line_transform: "translateY(5px) rotate(45deg)",
                bottom_line_transform: "translateY(-5px) rotate(-45deg)",
                body_overflow: "hidden",
            }
        } else {
            MenuEffects {
                overlay_display: "none",
                top_line_transform: "none",
                bottom_line_transform: "none",
                body_overflow: "auto",
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_opens_and_locks_scroll() {
        let mut menu = MenuToggle::new();
        let fx = menu.toggle();
        assert!(menu.is_open());
        assert_eq!(fx.overlay_display, "flex");
        assert_eq!(fx.body_overflow, "hidden");

        let fx = menu.toggle();
        assert!(!menu.is_open());
        assert_eq!(fx.overlay_display, "none");
        assert_eq!(fx.top_line_transform, "none");
        assert_eq!(fx.body_overflow, "auto");
    }

    #[test]
    fn close_is_a_no_op_when_closed() {
        let mut menu = MenuToggle::new();
        assert_eq!(menu.close(), None);
        menu.toggle();
        assert_eq!(menu.close().map(|fx| fx.overlay_display), Some("none"));
    }
}
