// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification Channel
//!
//! User-visible messages raised by the sync controller. The queue shows at
//! most one message at a time, first-in-first-out, each for a fixed
//! duration. Time is passed in explicitly so the view decides when to poll.

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Message severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Severity {
    #[default]
    Error,
    Success,
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Error => "error",
            Severity::Success => "success",
            Severity::Info => "info",
            Severity::Warning => "warning",
        };
        f.write_str(name)
    }
}

/// A single user-visible message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub text: String,
    pub severity: Severity,
}

impl Notification {
    pub fn new(text: impl Into<String>, severity: Severity) -> Self {
        Notification {
            text: text.into(),
            severity,
        }
    }
}

/// Receives user-visible messages.
pub trait Notifier: Send + Sync {
    /// Queues a message.
    fn notify(&self, text: &str, severity: Severity);

    /// Drops every queued and displayed message.
    fn clear(&self);
}

#[derive(Debug, Default)]
struct QueueState {
    pending: VecDeque<Notification>,
    displayed: Option<(Notification, Instant)>,
}

/// FIFO notification queue with a fixed display duration.
#[derive(Debug)]
pub struct NotificationQueue {
    duration: Duration,
    state: Mutex<QueueState>,
}

impl NotificationQueue {
    /// Creates a queue that shows each message for `duration`.
    pub fn new(duration: Duration) -> Self {
        NotificationQueue {
            duration,
            state: Mutex::new(QueueState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, QueueState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Expires the displayed message if its time is up and promotes the next.
    pub fn advance(&self, now: Instant) {
        let mut state = self.lock();
        if let Some((_, shown_at)) = &state.displayed {
            if now.saturating_duration_since(*shown_at) >= self.duration {
                state.displayed = None;
            }
        }
        if state.displayed.is_none() {
            if let Some(next) = state.pending.pop_front() {
                state.displayed = Some((next, now));
            }
        }
    }

    /// Returns the message on screen at `now`, if any.
    pub fn current(&self, now: Instant) -> Option<Notification> {
        self.advance(now);
        self.lock().displayed.as_ref().map(|(n, _)| n.clone())
    }

    /// Closes the displayed message early (user dismissal).
    pub fn dismiss(&self) {
        self.lock().displayed = None;
    }

    /// Number of messages waiting behind the displayed one.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// True if nothing is displayed or waiting.
    pub fn is_empty(&self) -> bool {
        let state = self.lock();
        state.displayed.is_none() && state.pending.is_empty()
    }

    /// Removes and returns every message in display order.
    pub fn drain(&self) -> Vec<Notification> {
        let mut state = self.lock();
        let mut all: Vec<Notification> = state.displayed.take().map(|(n, _)| n).into_iter().collect();
        all.extend(state.pending.drain(..));
        all
    }
}

impl Notifier for NotificationQueue {
    fn notify(&self, text: &str, severity: Severity) {
        self.lock()
            .pending
            .push_back(Notification::new(text, severity));
    }

    fn clear(&self) {
        let mut state = self.lock();
        state.pending.clear();
        state.displayed = None;
    }
}

/// Notifier that records every message, for tests.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message received since creation or the last `clear`.
    pub fn messages(&self) -> Vec<Notification> {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Messages of the given severity.
    pub fn with_severity(&self, severity: Severity) -> Vec<Notification> {
        self.messages()
            .into_iter()
            .filter(|n| n.severity == severity)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, text: &str, severity: Severity) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Notification::new(text, severity));
    }

    fn clear(&self) {
        self.messages
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_message_at_a_time_fifo() {
        let queue = NotificationQueue::new(Duration::from_secs(5));
        let start = Instant::now();

        queue.notify("first", Severity::Error);
        queue.notify("second", Severity::Success);

        assert_eq!(queue.current(start).unwrap().text, "first");
        assert_eq!(queue.pending_len(), 1);

        // Still within the display window
        let later = start + Duration::from_secs(4);
        assert_eq!(queue.current(later).unwrap().text, "first");

        let expired = start + Duration::from_secs(5);
        let shown = queue.current(expired).unwrap();
        assert_eq!(shown.text, "second");
        assert_eq!(shown.severity, Severity::Success);

        assert!(queue.current(expired + Duration::from_secs(5)).is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dismiss_advances_to_next() {
        let queue = NotificationQueue::new(Duration::from_secs(5));
        let now = Instant::now();
        queue.notify("a", Severity::Info);
        queue.notify("b", Severity::Info);
        queue.current(now);
        queue.dismiss();
        assert_eq!(queue.current(now).unwrap().text, "b");
    }

    #[test]
    fn test_clear_and_drain() {
        let queue = NotificationQueue::new(Duration::from_secs(5));
        queue.notify("a", Severity::Warning);
        queue.notify("b", Severity::Error);
        queue.current(Instant::now());
        let drained = queue.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].text, "a");

        queue.notify("c", Severity::Error);
        queue.clear();
        assert!(queue.is_empty());
    }

    #[test]
    fn test_severity_defaults_to_error() {
        assert_eq!(Severity::default(), Severity::Error);
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
