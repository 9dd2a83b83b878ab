//! Toast notifications
//!
//! Toasts are independent: each slides in, stays, slides out and disappears on
//! its own schedule. Simultaneous toasts stack newest-on-top, one slot each.

use crate::consts::cli_consts::toast;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, PartialEq, Eq, strum::Display)]
pub enum Severity {
    Success,
    Error,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ToastPhase {
    /// Created but still off-screen.
    Pending,
    /// Sliding in; the value is the fraction still hidden (1.0 = fully hidden).
    SlidingIn(f64),
    Shown,
    /// Sliding out; the value is the fraction already hidden.
    SlidingOut(f64),
}

impl ToastPhase {
    /// Fraction of the toast width pushed past the right edge.
    pub fn hidden_fraction(self) -> f64 {
        match self {
            ToastPhase::Pending => 1.0,
            ToastPhase::SlidingIn(hidden) | ToastPhase::SlidingOut(hidden) => hidden,
            ToastPhase::Shown => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub severity: Severity,
    created_at: Instant,
}

impl Toast {
    /// Phase at `now`, or `None` once the toast should be removed.
    pub fn phase(&self, now: Instant) -> Option<ToastPhase> {
        let age = now.saturating_duration_since(self.created_at);
        let slide_in_start = toast::slide_in_delay();
        let slide_in_end = slide_in_start + toast::slide_in();
        let slide_out_start = toast::visible();
        let removal = slide_out_start + toast::slide_out();

        if age >= removal {
            None
        } else if age >= slide_out_start {
            Some(ToastPhase::SlidingOut(fraction(
                age - slide_out_start,
                toast::slide_out(),
            )))
        } else if age >= slide_in_end {
            Some(ToastPhase::Shown)
        } else if age >= slide_in_start {
            Some(ToastPhase::SlidingIn(
                1.0 - fraction(age - slide_in_start, toast::slide_in()),
            ))
        } else {
            Some(ToastPhase::Pending)
        }
    }
}

fn fraction(elapsed: Duration, total: Duration) -> f64 {
    (elapsed.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

#[derive(Debug, Default)]
pub struct ToastStack {
    toasts: VecDeque<Toast>,
    next_id: u64,
}

impl ToastStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a toast. No de-duplication: identical messages stack.
    pub fn show_notification(
        &mut self,
        message: impl Into<String>,
        severity: Severity,
        now: Instant,
    ) -> u64 {
        self.next_id += 1;
        self.toasts.push_back(Toast {
            id: self.next_id,
            message: message.into(),
            severity,
            created_at: now,
        });
        self.next_id
    }

    /// Removes every toast whose slide-out has finished.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|t| t.phase(now).is_some());
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Toasts to draw, newest first, paired with their phase and stacking slot.
    pub fn visible(&self, now: Instant) -> Vec<(usize, &Toast, ToastPhase)> {
        self.toasts
            .iter()
            .rev()
            .filter_map(|t| t.phase(now).map(|phase| (t, phase)))
            .filter(|(_, phase)| *phase != ToastPhase::Pending)
            .take(toast::MAX_VISIBLE)
            .enumerate()
            .map(|(slot, (t, phase))| (slot, t, phase))
            .collect()
    }
}
