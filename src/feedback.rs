//! The pointer feedback loop.
//!
//! Raw pointer movement arrives far more often than the display refreshes. Each
//! movement records the latest position and replaces the pending visual update,
//! so at most one update runs per frame and it always uses the newest position.
//! An update moves the two follower elements and refreshes the glow offset of
//! every card near the pointer.
//!
//! The loop never talks to a DOM directly: the page is reached through the
//! [`Surface`] trait and the repaint cycle through [`FrameScheduler`], which keeps
//! the same code running in the browser, in the native preview and in tests.

use crate::config::FeedbackConfig;
use crate::error::{log_error, FxResult};
use crate::hover::{predicate_from_set, HoverTracker, InteractivePredicate};
use crate::scheduler::{FrameCoalescer, FrameScheduler};
use crate::types::*;

/// The parts of a page the pointer loop writes to.
///
/// Every method may fail independently; the loop logs the failure and moves on
/// to the next element.
pub trait Surface {
    /// Handle to one glow card.
    type Card;

    /// Moves a follower element so it is centered on `at`.
    fn place_follower(&mut self, follower: Follower, at: Point) -> FxResult<()>;

    /// The cards currently on the page.
    fn cards(&self) -> Vec<Self::Card>;

    /// Current layout rectangle of `card`. Queried on every update, never cached.
    fn card_rect(&self, card: &Self::Card) -> FxResult<Rect>;

    /// Writes the glow offset of `card`.
    fn set_card_glow(&mut self, card: &Self::Card, glow: GlowOffset) -> FxResult<()>;

    /// Adds or removes the hover presentation class.
    fn set_hover_class(&mut self, hovering: bool) -> FxResult<()>;
}

/// Counters describing how much work the loop did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Movement events received
    pub pointer_events: u64,
    /// Visual updates executed
    pub updates: u64,
    /// Scheduled updates replaced by a newer movement before they ran
    pub coalesced: u64,
    /// Glow offsets written
    pub glow_writes: u64,
    /// Card visits skipped because the pointer was too far away
    pub culled_cards: u64,
}

/// Glow offset for a card at `rect`, or `None` if the pointer is farther than
/// `margin` from every edge of the card.
pub fn glow_for(rect: Rect, pointer: Point, margin: f64) -> Option<GlowOffset> {
    rect.padded(margin)
        .contains(pointer)
        .then(|| rect.offset_of(pointer))
}

/// One page's pointer feedback component.
///
/// `G` is the guard type the host returns when attaching the delegated hover
/// listeners.
pub struct PointerFeedback<S: Surface, F: FrameScheduler, G = ()> {
    surface: S,
    scheduler: F,
    cull_margin: f64,
    pointer: Option<Point>,
    frames: FrameCoalescer<Point>,
    hover: HoverTracker<G>,
    stats: FrameStats,
}

impl<S: Surface, F: FrameScheduler, G> PointerFeedback<S, F, G> {
    /// Creates the component using the interactive set from `config`.
    pub fn new(config: &FeedbackConfig, surface: S, scheduler: F) -> Self {
        let predicate = predicate_from_set(&config.interactive);
        Self::with_predicate(config, surface, scheduler, predicate)
    }

    /// Creates the component with a custom interactive predicate.
    pub fn with_predicate(
        config: &FeedbackConfig,
        surface: S,
        scheduler: F,
        predicate: InteractivePredicate,
    ) -> Self {
        Self {
            surface,
            scheduler,
            cull_margin: config.cull_margin,
            pointer: None,
            frames: FrameCoalescer::new(),
            hover: HoverTracker::new(predicate),
            stats: FrameStats::default(),
        }
    }

    /// Records a pointer movement and replaces the pending visual update.
    ///
    /// The position is recorded even if no frame could be scheduled.
    pub fn on_pointer_move(&mut self, x: f64, y: f64) -> FxResult<()> {
        let position = Point::new(x, y);
        self.pointer = Some(position);
        self.stats.pointer_events += 1;
        let result = self.frames.submit(position, &mut self.scheduler).map(|_| ());
        self.stats.coalesced = self.frames.coalesced();
        result
    }

    /// Runs the visual update scheduled under `token`.
    ///
    /// Tokens that were replaced or cancelled are ignored. Returns whether an
    /// update ran.
    pub fn run_visual_update(&mut self, token: FrameToken) -> bool {
        let Some(position) = self.frames.fire(token) else {
            return false;
        };
        self.stats.updates += 1;

        for follower in Follower::ALL {
            if let Err(e) = self.surface.place_follower(follower, position) {
                log_error("follower update skipped", &e);
            }
        }

        for card in self.surface.cards() {
            let rect = match self.surface.card_rect(&card) {
                Ok(rect) => rect,
                Err(e) => {
                    log_error("card measurement failed", &e);
                    continue;
                }
            };
            match glow_for(rect, position, self.cull_margin) {
                Some(glow) => match self.surface.set_card_glow(&card, glow) {
                    Ok(()) => self.stats.glow_writes += 1,
                    Err(e) => log_error("card glow update failed", &e),
                },
                None => self.stats.culled_cards += 1,
            }
        }
        true
    }

    /// Attaches the delegated hover listeners through `attach`, once.
    ///
    /// Returns `Ok(false)` without calling `attach` when already registered.
    pub fn register_interactive_hover_tracking<E>(
        &mut self,
        attach: impl FnOnce() -> Result<G, E>,
    ) -> Result<bool, E> {
        let attached = self.hover.register(attach)?;
        if attached {
            log::debug!("interactive hover tracking registered");
        }
        Ok(attached)
    }

    /// Detaches the hover listeners and clears the hover class.
    pub fn unregister_hover_tracking(&mut self) -> Option<G> {
        let was_hovering = self.hover.is_hovering();
        let guard = self.hover.unregister();
        if was_hovering {
            self.apply_hover(false);
        }
        guard
    }

    /// Delegated "enter" notification for `element`.
    pub fn on_interactive_enter(&mut self, element: &ElementInfo) {
        if let Some(flag) = self.hover.on_enter(element) {
            self.apply_hover(flag);
        }
    }

    /// Delegated "leave" notification for `element`.
    pub fn on_interactive_leave(&mut self, element: &ElementInfo) {
        if let Some(flag) = self.hover.on_leave(element) {
            self.apply_hover(flag);
        }
    }

    /// The pointer left the page entirely.
    pub fn on_pointer_leave_window(&mut self) {
        if let Some(flag) = self.hover.reset() {
            self.apply_hover(flag);
        }
    }

    /// Drops the pending visual update, e.g. when the page is hidden.
    pub fn suspend(&mut self) -> bool {
        self.frames.cancel(&mut self.scheduler)
    }

    fn apply_hover(&mut self, hovering: bool) {
        if let Err(e) = self.surface.set_hover_class(hovering) {
            log_error("hover class update failed", &e);
        }
    }

    /// Last recorded pointer position.
    pub fn pointer(&self) -> Option<Point> {
        self.pointer
    }

    /// Current hover flag.
    pub fn is_hovering(&self) -> bool {
        self.hover.is_hovering()
    }

    /// Whether the delegated hover listeners are attached.
    pub fn is_hover_tracking_registered(&self) -> bool {
        self.hover.is_registered()
    }

    /// Token of the update waiting for the next frame.
    pub fn pending_token(&self) -> Option<FrameToken> {
        self.frames.pending_token()
    }

    /// Work counters.
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// The page surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the page surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Mutable access to the frame scheduler.
    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FxError;
    use crate::scheduler::ManualFrameScheduler;
    use std::collections::HashMap;

    /// In-memory page: optional followers, a list of card rectangles.
    #[derive(Default)]
    pub(crate) struct MemorySurface {
        pub has_followers: bool,
        pub followers: HashMap<Follower, Point>,
        pub follower_moves: usize,
        pub cards: Vec<Rect>,
        pub broken_cards: Vec<usize>,
        pub glows: HashMap<usize, GlowOffset>,
        pub hover_class: bool,
        pub hover_writes: usize,
    }

    impl Surface for MemorySurface {
        type Card = usize;

        fn place_follower(&mut self, follower: Follower, at: Point) -> FxResult<()> {
            if !self.has_followers {
                return Err(FxError::MissingElement(format!("{:?}", follower)));
            }
            self.follower_moves += 1;
            self.followers.insert(follower, at);
            Ok(())
        }

        fn cards(&self) -> Vec<usize> {
            (0..self.cards.len()).collect()
        }

        fn card_rect(&self, card: &usize) -> FxResult<Rect> {
            if self.broken_cards.contains(card) {
                return Err(FxError::Js("detached".into()));
            }
            self.cards
                .get(*card)
                .copied()
                .ok_or_else(|| FxError::MissingElement(format!("card {card}")))
        }

        fn set_card_glow(&mut self, card: &usize, glow: GlowOffset) -> FxResult<()> {
            self.glows.insert(*card, glow);
            Ok(())
        }

        fn set_hover_class(&mut self, hovering: bool) -> FxResult<()> {
            self.hover_class = hovering;
            self.hover_writes += 1;
            Ok(())
        }
    }

    type TestLoop = PointerFeedback<MemorySurface, ManualFrameScheduler, u32>;

    fn page_with_card() -> TestLoop {
        let surface = MemorySurface {
            has_followers: true,
            cards: vec![Rect::new(100.0, 100.0, 200.0, 100.0)],
            ..Default::default()
        };
        PointerFeedback::new(&FeedbackConfig::default(), surface, ManualFrameScheduler::new())
    }

    fn run_frame(fx: &mut TestLoop) -> usize {
        let due = fx.scheduler_mut().take_due();
        due.into_iter().filter(|t| fx.run_visual_update(*t)).count()
    }

    #[test]
    fn many_moves_in_one_frame_run_one_update_with_last_position() {
        let mut fx = page_with_card();
        for i in 0..20 {
            fx.on_pointer_move(100.0 + i as f64, 110.0).unwrap();
        }
        fx.on_pointer_move(150.0, 120.0).unwrap();

        assert_eq!(run_frame(&mut fx), 1);
        assert_eq!(run_frame(&mut fx), 0);

        let surface = fx.surface();
        assert_eq!(surface.followers[&Follower::Dot], Point::new(150.0, 120.0));
        assert_eq!(surface.followers[&Follower::Ring], Point::new(150.0, 120.0));
        assert_eq!(surface.glows[&0], GlowOffset { x: 50.0, y: 20.0 });

        let stats = fx.stats();
        assert_eq!(stats.pointer_events, 21);
        assert_eq!(stats.updates, 1);
        assert_eq!(stats.coalesced, 20);
    }

    #[test]
    fn far_pointer_leaves_glow_unchanged() {
        let mut fx = page_with_card();
        fx.on_pointer_move(150.0, 120.0).unwrap();
        run_frame(&mut fx);
        fx.on_pointer_move(500.0, 500.0).unwrap();
        run_frame(&mut fx);

        assert_eq!(fx.surface().glows[&0], GlowOffset { x: 50.0, y: 20.0 });
        assert_eq!(fx.surface().followers[&Follower::Dot], Point::new(500.0, 500.0));
        assert_eq!(fx.stats().culled_cards, 1);
    }

    #[test]
    fn pointer_within_margin_updates_glow_with_negative_offset() {
        let mut fx = page_with_card();
        fx.on_pointer_move(60.0, 90.0).unwrap();
        run_frame(&mut fx);
        assert_eq!(fx.surface().glows[&0], GlowOffset { x: -40.0, y: -10.0 });
    }

    #[test]
    fn glow_culling_uses_padded_bounds() {
        let rect = Rect::new(100.0, 100.0, 200.0, 100.0);
        assert_eq!(glow_for(rect, Point::new(500.0, 500.0), 150.0), None);
        assert_eq!(
            glow_for(rect, Point::new(450.0, 350.0), 150.0),
            Some(GlowOffset { x: 350.0, y: 250.0 })
        );
        assert_eq!(glow_for(rect, Point::new(301.0, 150.0), 0.0), None);
    }

    #[test]
    fn missing_followers_and_cards_are_not_errors() {
        let mut fx: TestLoop = PointerFeedback::new(
            &FeedbackConfig::default(),
            MemorySurface::default(),
            ManualFrameScheduler::new(),
        );
        fx.on_pointer_move(10.0, 10.0).unwrap();
        assert_eq!(run_frame(&mut fx), 1);
        assert!(fx.surface().followers.is_empty());
        assert!(fx.surface().glows.is_empty());
    }

    #[test]
    fn one_broken_card_does_not_stop_the_others() {
        let surface = MemorySurface {
            has_followers: true,
            cards: vec![
                Rect::new(0.0, 0.0, 100.0, 100.0),
                Rect::new(0.0, 0.0, 100.0, 100.0),
                Rect::new(50.0, 50.0, 100.0, 100.0),
            ],
            broken_cards: vec![1],
            ..Default::default()
        };
        let mut fx: TestLoop =
            PointerFeedback::new(&FeedbackConfig::default(), surface, ManualFrameScheduler::new());
        fx.on_pointer_move(60.0, 70.0).unwrap();
        run_frame(&mut fx);
        let glows = &fx.surface().glows;
        assert_eq!(glows.len(), 2);
        assert_eq!(glows[&0], GlowOffset { x: 60.0, y: 70.0 });
        assert_eq!(glows[&2], GlowOffset { x: 10.0, y: 20.0 });
    }

    #[test]
    fn card_rects_are_requeried_each_update() {
        let mut fx = page_with_card();
        fx.on_pointer_move(150.0, 120.0).unwrap();
        run_frame(&mut fx);
        fx.surface_mut().cards[0] = Rect::new(0.0, 0.0, 200.0, 200.0);
        fx.on_pointer_move(150.0, 120.0).unwrap();
        run_frame(&mut fx);
        assert_eq!(fx.surface().glows[&0], GlowOffset { x: 150.0, y: 120.0 });
    }

    #[test]
    fn stale_token_does_not_run() {
        let mut fx = page_with_card();
        fx.on_pointer_move(1.0, 1.0).unwrap();
        let stale = fx.pending_token().unwrap();
        fx.on_pointer_move(2.0, 2.0).unwrap();
        assert!(!fx.run_visual_update(stale));
        assert_eq!(fx.stats().updates, 0);
    }

    #[test]
    fn suspend_cancels_pending_update() {
        let mut fx = page_with_card();
        fx.on_pointer_move(150.0, 120.0).unwrap();
        assert!(fx.suspend());
        assert_eq!(run_frame(&mut fx), 0);
        assert_eq!(fx.pointer(), Some(Point::new(150.0, 120.0)));
        fx.on_pointer_move(151.0, 120.0).unwrap();
        assert_eq!(run_frame(&mut fx), 1);
    }

    #[test]
    fn hover_class_follows_flag_transitions_only() {
        let mut fx = page_with_card();
        let mut attached = 0;
        for _ in 0..3 {
            fx.register_interactive_hover_tracking(|| {
                attached += 1;
                Ok::<u32, ()>(attached)
            })
            .unwrap();
        }
        assert_eq!(attached, 1);

        let card = ElementInfo::tag("div").with_class("bento-card");
        let button = ElementInfo::tag("button");
        fx.on_interactive_enter(&card);
        fx.on_interactive_enter(&button);
        assert!(fx.surface().hover_class);
        assert_eq!(fx.surface().hover_writes, 1);

        fx.on_interactive_leave(&button);
        assert!(fx.is_hovering());
        fx.on_interactive_leave(&card);
        assert!(!fx.surface().hover_class);
        assert_eq!(fx.surface().hover_writes, 2);
    }

    #[test]
    fn leaving_window_and_unregistering_clear_hover() {
        let mut fx = page_with_card();
        fx.register_interactive_hover_tracking(|| Ok::<u32, ()>(1)).unwrap();
        fx.on_interactive_enter(&ElementInfo::tag("a"));
        fx.on_pointer_leave_window();
        assert!(!fx.surface().hover_class);

        fx.on_interactive_enter(&ElementInfo::tag("a"));
        assert_eq!(fx.unregister_hover_tracking(), Some(1));
        assert!(!fx.surface().hover_class);
        assert!(!fx.is_hover_tracking_registered());
    }
}
