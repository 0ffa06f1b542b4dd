//! Scroll progress bar.
//!
//! Scroll notifications are coalesced the same way pointer movement is: one
//! computation per frame, using the last metrics reported before the frame.

use crate::error::FxResult;
use crate::scheduler::{FrameCoalescer, FrameScheduler};
use crate::types::FrameToken;

/// Scroll position and extent of the document, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    /// Current vertical scroll offset
    pub scroll_top: f64,
    /// Full height of the content
    pub scroll_height: f64,
    /// Height of the visible area
    pub client_height: f64,
}

impl ScrollMetrics {
    /// Percentage of the scrollable distance already scrolled, in `[0, 100]`.
    ///
    /// Content that does not scroll reports 0.
    pub fn scrolled_percent(&self) -> f64 {
        let scrollable = self.scroll_height - self.client_height;
        if scrollable <= 0.0 {
            return 0.0;
        }
        (self.scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
    }
}

/// Per-frame scroll progress computation.
#[derive(Debug, Default)]
pub struct ScrollProgress {
    frames: FrameCoalescer<ScrollMetrics>,
    percent: f64,
}

impl ScrollProgress {
    /// Creates an indicator at 0%.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records new metrics and (re)schedules the computation.
    pub fn on_scroll<S: FrameScheduler + ?Sized>(
        &mut self,
        metrics: ScrollMetrics,
        scheduler: &mut S,
    ) -> FxResult<FrameToken> {
        self.frames.submit(metrics, scheduler)
    }

    /// Runs the computation scheduled under `token`, returning the new bar width
    /// in percent. Stale tokens return `None`.
    pub fn run(&mut self, token: FrameToken) -> Option<f64> {
        let metrics = self.frames.fire(token)?;
        self.percent = metrics.scrolled_percent();
        Some(self.percent)
    }

    /// Last computed percentage.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// CSS width for the bar.
    pub fn css_width(percent: f64) -> String {
        format!("{percent}%")
    }

    /// Cancels a pending computation.
    pub fn suspend<S: FrameScheduler + ?Sized>(&mut self, scheduler: &mut S) -> bool {
        self.frames.cancel(scheduler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualFrameScheduler;

    #[test]
    fn percent_of_scrollable_distance() {
        let metrics = ScrollMetrics {
            scroll_top: 50.0,
            scroll_height: 1000.0,
            client_height: 500.0,
        };
        assert_eq!(metrics.scrolled_percent(), 10.0);
    }

    #[test]
    fn unscrollable_content_reports_zero() {
        let metrics = ScrollMetrics {
            scroll_top: 0.0,
            scroll_height: 500.0,
            client_height: 500.0,
        };
        assert_eq!(metrics.scrolled_percent(), 0.0);
    }

    #[test]
    fn overscroll_is_clamped() {
        let metrics = ScrollMetrics {
            scroll_top: 700.0,
            scroll_height: 1000.0,
            client_height: 500.0,
        };
        assert_eq!(metrics.scrolled_percent(), 100.0);
    }

    #[test]
    fn scroll_bursts_compute_once_per_frame() {
        let mut scheduler = ManualFrameScheduler::new();
        let mut progress = ScrollProgress::new();
        for top in [10.0, 20.0, 250.0] {
            progress
                .on_scroll(
                    ScrollMetrics {
                        scroll_top: top,
                        scroll_height: 1000.0,
                        client_height: 500.0,
                    },
                    &mut scheduler,
                )
                .unwrap();
        }
        let widths: Vec<f64> = scheduler
            .take_due()
            .into_iter()
            .filter_map(|t| progress.run(t))
            .collect();
        assert_eq!(widths, vec![50.0]);
        assert_eq!(ScrollProgress::css_width(progress.percent()), "50%");
    }

    #[test]
    fn suspended_computation_never_runs() {
        let mut scheduler = ManualFrameScheduler::new();
        let mut progress = ScrollProgress::new();
        let token = progress
            .on_scroll(
                ScrollMetrics {
                    scroll_top: 250.0,
                    scroll_height: 1000.0,
                    client_height: 500.0,
                },
                &mut scheduler,
            )
            .unwrap();
        assert!(progress.suspend(&mut scheduler));
        assert!(!progress.suspend(&mut scheduler));
        assert_eq!(progress.run(token), None);
        assert_eq!(progress.percent(), 0.0);
    }
}
