//! Hover-state propagation for interactive elements.
//!
//! The hover flag is driven by a single pair of delegated enter/leave listeners
//! at the document root. The tracker keeps the listener registration itself, so
//! registering twice is a no-op instead of a second set of listeners.

use crate::config::InteractiveSet;
use crate::types::ElementInfo;
use std::rc::Rc;

/// Decides whether an element counts as interactive.
pub type InteractivePredicate = Rc<dyn Fn(&ElementInfo) -> bool>;

/// Builds the predicate matching any of the tags or classes in `set`.
pub fn predicate_from_set(set: &InteractiveSet) -> InteractivePredicate {
    let set = set.clone();
    Rc::new(move |element: &ElementInfo| {
        set.tags.iter().any(|t| t.eq_ignore_ascii_case(&element.tag))
            || set.classes.iter().any(|c| element.has_class(c))
    })
}

/// Tracks whether the pointer is over at least one interactive element.
///
/// `G` is the host's listener guard; dropping it must detach the listeners.
pub struct HoverTracker<G> {
    predicate: InteractivePredicate,
    registration: Option<G>,
    depth: u32,
}

impl<G> HoverTracker<G> {
    /// Creates an unregistered tracker using `predicate`.
    pub fn new(predicate: InteractivePredicate) -> Self {
        Self {
            predicate,
            registration: None,
            depth: 0,
        }
    }

    /// Attaches the delegated listeners through `attach`, unless already attached.
    ///
    /// Returns `Ok(true)` if listeners were attached by this call and `Ok(false)` if
    /// they already were. `attach` is not called in the latter case.
    pub fn register<E>(&mut self, attach: impl FnOnce() -> Result<G, E>) -> Result<bool, E> {
        if self.registration.is_some() {
            return Ok(false);
        }
        self.registration = Some(attach()?);
        Ok(true)
    }

    /// Detaches the listeners by handing back their guard, and clears the hover state.
    pub fn unregister(&mut self) -> Option<G> {
        self.depth = 0;
        self.registration.take()
    }

    /// Whether the delegated listeners are attached.
    pub fn is_registered(&self) -> bool {
        self.registration.is_some()
    }

    /// Current value of the hover flag.
    pub fn is_hovering(&self) -> bool {
        self.depth > 0
    }

    /// Whether `element` is interactive according to the configured predicate.
    pub fn is_interactive(&self, element: &ElementInfo) -> bool {
        (self.predicate)(element)
    }

    /// Handles the pointer entering `element`.
    ///
    /// Returns the new flag value when it changed.
    pub fn on_enter(&mut self, element: &ElementInfo) -> Option<bool> {
        if !self.is_interactive(element) {
            return None;
        }
        self.depth += 1;
        (self.depth == 1).then_some(true)
    }

    /// Handles the pointer leaving `element`.
    ///
    /// Returns the new flag value when it changed. Unmatched leaves are ignored.
    pub fn on_leave(&mut self, element: &ElementInfo) -> Option<bool> {
        if !self.is_interactive(element) || self.depth == 0 {
            return None;
        }
        self.depth -= 1;
        (self.depth == 0).then_some(false)
    }

    /// Clears the flag, e.g. when the pointer leaves the window.
    pub fn reset(&mut self) -> Option<bool> {
        let was_hovering = self.is_hovering();
        self.depth = 0;
        was_hovering.then_some(false)
    }
}
