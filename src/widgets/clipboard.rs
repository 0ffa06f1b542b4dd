//! Clipboard copy with a legacy fallback, reported through a toast.

use crate::config::ToastConfig;
use crate::error::{FxError, FxResult};

/// Which mechanism produced the final result of a copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyPath {
    /// The asynchronous platform clipboard API
    Platform,
    /// The selection + `execCommand("copy")` fallback
    Fallback,
}

/// Result of a copy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyReport {
    /// Whether the text ended up on the clipboard
    pub copied: bool,
    /// Mechanism that decided the result
    pub path: CopyPath,
}

/// Combines the platform write result with the fallback.
///
/// The fallback runs exactly once, and only when the platform write failed; its
/// own result then decides the outcome.
pub fn settle_copy(platform: FxResult<()>, fallback: impl FnOnce() -> FxResult<()>) -> CopyReport {
    match platform {
        Ok(()) => CopyReport {
            copied: true,
            path: CopyPath::Platform,
        },
        Err(e) => {
            log::warn!("clipboard write failed, using fallback: {e}");
            let copied = match fallback() {
                Ok(()) => true,
                Err(e) => {
                    log::warn!("clipboard fallback failed: {e}");
                    false
                }
            };
            CopyReport {
                copied,
                path: CopyPath::Fallback,
            }
        }
    }
}

/// Interprets the boolean returned by `execCommand("copy")`.
pub fn legacy_copy_result(accepted: bool) -> FxResult<()> {
    if accepted {
        Ok(())
    } else {
        Err(FxError::Clipboard("copy command rejected".into()))
    }
}

/// Success or failure styling of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    /// Confirmation
    Success,
    /// Something went wrong
    Failure,
}

/// Where a toast is in its lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastPhase {
    /// Fully visible
    Visible,
    /// Fading out; opacity in `[0, 1]`
    Fading(f32),
    /// Past its lifetime; should be removed
    Gone,
}

/// A transient on-screen notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    /// Text shown to the user
    pub message: String,
    /// Styling
    pub kind: ToastKind,
    /// Time the toast appeared, in milliseconds on the host clock
    pub shown_at_ms: f64,
}

impl Toast {
    /// Toast reporting a copy attempt.
    pub fn for_copy(report: CopyReport, shown_at_ms: f64) -> Self {
        if report.copied {
            Toast {
                message: "Email copied!".to_string(),
                kind: ToastKind::Success,
                shown_at_ms,
            }
        } else {
            Toast {
                message: "Could not copy email".to_string(),
                kind: ToastKind::Failure,
                shown_at_ms,
            }
        }
    }

    /// Phase of the toast at `now_ms`.
    pub fn phase(&self, now_ms: f64, timing: &ToastConfig) -> ToastPhase {
        let age = now_ms - self.shown_at_ms;
        let display = f64::from(timing.display_ms);
        let total = f64::from(timing.total_ms());
        if age < display {
            ToastPhase::Visible
        } else if age < total {
            let faded = (age - display) / f64::from(timing.fade_ms.max(1));
            ToastPhase::Fading((1.0 - faded).clamp(0.0, 1.0) as f32)
        } else {
            ToastPhase::Gone
        }
    }
}

/// Holds the resources of the toast on screen; at most one toast is live.
///
/// `H` is whatever the host keeps alive per toast (element, timers).
#[derive(Debug)]
pub struct ToastSlot<H> {
    current: Option<H>,
}

impl<H> Default for ToastSlot<H> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<H> ToastSlot<H> {
    /// An empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `handle` the live toast and returns the one it replaces, for teardown.
    pub fn show(&mut self, handle: H) -> Option<H> {
        self.current.replace(handle)
    }

    /// Empties the slot, returning the live toast if any.
    pub fn clear(&mut self) -> Option<H> {
        self.current.take()
    }

    /// Whether a toast is live.
    pub fn is_showing(&self) -> bool {
        self.current.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn platform_success_skips_fallback() {
        let calls = Cell::new(0);
        let report = settle_copy(Ok(()), || {
            calls.set(calls.get() + 1);
            Ok(())
        });
        assert_eq!(calls.get(), 0);
        assert_eq!(
            report,
            CopyReport {
                copied: true,
                path: CopyPath::Platform
            }
        );
    }

    #[test]
    fn platform_failure_runs_fallback_once() {
        for fallback_ok in [true, false] {
            let calls = Cell::new(0);
            let report = settle_copy(Err(FxError::Clipboard("denied".into())), || {
                calls.set(calls.get() + 1);
                legacy_copy_result(fallback_ok)
            });
            assert_eq!(calls.get(), 1);
            assert_eq!(report.copied, fallback_ok);
            assert_eq!(report.path, CopyPath::Fallback);
        }
    }

    #[test]
    fn success_toast_is_gone_after_display_and_fade() {
        let timing = ToastConfig::default();
        let toast = Toast::for_copy(
            CopyReport {
                copied: true,
                path: CopyPath::Platform,
            },
            1000.0,
        );
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(toast.phase(2999.0, &timing), ToastPhase::Visible);
        assert_eq!(toast.phase(3200.0, &timing), ToastPhase::Fading(0.5));
        assert!(matches!(toast.phase(3399.0, &timing), ToastPhase::Fading(_)));
        assert_eq!(toast.phase(3400.0, &timing), ToastPhase::Gone);
    }

    #[test]
    fn failed_copy_gets_failure_toast() {
        let toast = Toast::for_copy(
            CopyReport {
                copied: false,
                path: CopyPath::Fallback,
            },
            0.0,
        );
        assert_eq!(toast.kind, ToastKind::Failure);
        assert_ne!(toast.message, "Email copied!");
    }

    #[test]
    fn toast_slot_keeps_only_the_latest_toast() {
        let mut slot = ToastSlot::new();
        let mut torn_down = Vec::new();
        for id in 0..5 {
            if let Some(old) = slot.show(id) {
                torn_down.push(old);
            }
        }
        assert!(slot.is_showing());
        assert_eq!(torn_down, vec![0, 1, 2, 3]);
        assert_eq!(slot.clear(), Some(4));
        assert!(!slot.is_showing());
        assert_eq!(slot.clear(), None);
    }
}
