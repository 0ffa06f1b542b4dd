//! Frame scheduling and per-frame coalescing.
//!
//! The hosts own the actual repaint cycle (browser animation frames, egui frames).
//! The core only asks for "a callback before the next repaint" through
//! [`FrameScheduler`] and keeps at most one such request alive per consumer with
//! a [`FrameCoalescer`].

use crate::error::FxResult;
use crate::types::FrameToken;

/// Something that can run a callback before the next repaint.
///
/// The scheduler only hands out tokens; the host is responsible for routing the
/// callback of a token back to whoever requested it.
pub trait FrameScheduler {
    /// Requests one callback before the next repaint.
    fn request_frame(&mut self) -> FxResult<FrameToken>;

    /// Cancels a request that has not run yet. Unknown or already-run tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// Holds at most one pending frame request together with its payload.
///
/// Submitting a new payload cancels the outstanding request and schedules a fresh
/// one, so the payload that runs in a frame is always the last one submitted.
#[derive(Debug)]
pub struct FrameCoalescer<T> {
    pending: Option<(FrameToken, T)>,
    coalesced: u64,
}

impl<T> Default for FrameCoalescer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameCoalescer<T> {
    /// Creates an empty coalescer.
    pub fn new() -> Self {
        Self {
            pending: None,
            coalesced: 0,
        }
    }

    /// Replaces the pending payload and reschedules.
    ///
    /// If the scheduler refuses the request the payload is dropped and the error
    /// returned; nothing stays pending in that case.
    pub fn submit<S: FrameScheduler + ?Sized>(
        &mut self,
        payload: T,
        scheduler: &mut S,
    ) -> FxResult<FrameToken> {
        if let Some((token, _)) = self.pending.take() {
            scheduler.cancel_frame(token);
            self.coalesced += 1;
        }
        let token = scheduler.request_frame()?;
        self.pending = Some((token, payload));
        Ok(token)
    }

    /// Takes the payload belonging to `token`, if it is still the pending one.
    pub fn fire(&mut self, token: FrameToken) -> Option<T> {
        match &self.pending {
            Some((pending, _)) if *pending == token => self.pending.take().map(|(_, p)| p),
            _ => None,
        }
    }

    /// Cancels the pending request, if any.
    pub fn cancel<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        match self.pending.take() {
            Some((token, _)) => {
                scheduler.cancel_frame(token);
                true
            }
            None => false,
        }
    }

    /// Token of the pending request.
    pub fn pending_token(&self) -> Option<FrameToken> {
        self.pending.as_ref().map(|(token, _)| *token)
    }

    /// Number of requests that were cancelled by a newer submission.
    pub fn coalesced(&self) -> u64 {
        self.coalesced
    }
}

/// A scheduler driven by hand, one "frame" at a time.
///
/// The native preview calls [`ManualFrameScheduler::take_due`] once per egui frame,
/// and tests use it to decide exactly when a frame happens.
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next_id: u64,
    queued: Vec<FrameToken>,
    requested: u64,
    cancelled: u64,
}

impl ManualFrameScheduler {
    /// Creates an idle scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns every request that is due in the current frame.
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.queued)
    }

    /// Number of requests still waiting for a frame.
    pub fn queued(&self) -> usize {
        self.queued.len()
    }

    /// Total number of requests made.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    /// Total number of cancellations of still-queued requests.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn request_frame(&mut self) -> FxResult<FrameToken> {
        self.next_id += 1;
        self.requested += 1;
        let token = FrameToken(self.next_id);
        self.queued.push(token);
        Ok(token)
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let before = self.queued.len();
        self.queued.retain(|t| *t != token);
        if self.queued.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FxError;

    struct RefusingScheduler;

    impl FrameScheduler for RefusingScheduler {
        fn request_frame(&mut self) -> FxResult<FrameToken> {
            Err(FxError::Scheduler("no window".into()))
        }

        fn cancel_frame(&mut self, _token: FrameToken) {}
    }

    #[test]
    fn resubmitting_keeps_one_request_queued() {
        let mut scheduler = ManualFrameScheduler::new();
        let mut coalescer = FrameCoalescer::new();
        for i in 0..5 {
            coalescer.submit(i, &mut scheduler).unwrap();
        }
        assert_eq!(scheduler.queued(), 1);
        assert_eq!(scheduler.cancelled(), 4);
        assert_eq!(coalescer.coalesced(), 4);

        let due = scheduler.take_due();
        assert_eq!(due.len(), 1);
        assert_eq!(coalescer.fire(due[0]), Some(4));
        assert_eq!(coalescer.pending_token(), None);
    }

    #[test]
    fn stale_tokens_do_not_fire() {
        let mut scheduler = ManualFrameScheduler::new();
        let mut coalescer = FrameCoalescer::new();
        let first = coalescer.submit("a", &mut scheduler).unwrap();
        let second = coalescer.submit("b", &mut scheduler).unwrap();
        assert_eq!(coalescer.fire(first), None);
        assert_eq!(coalescer.fire(second), Some("b"));
        assert_eq!(coalescer.fire(second), None);
    }

    #[test]
    fn cancel_clears_pending_request() {
        let mut scheduler = ManualFrameScheduler::new();
        let mut coalescer = FrameCoalescer::new();
        coalescer.submit((), &mut scheduler).unwrap();
        assert!(coalescer.cancel(&mut scheduler));
        assert!(!coalescer.cancel(&mut scheduler));
        assert!(scheduler.take_due().is_empty());
    }

    #[test]
    fn refused_request_leaves_nothing_pending() {
        let mut coalescer = FrameCoalescer::new();
        assert!(coalescer.submit(1, &mut RefusingScheduler).is_err());
        assert_eq!(coalescer.pending_token(), None);
    }
}
