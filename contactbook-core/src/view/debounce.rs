// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Debounced input
//!
//! A value settles once no newer value arrived for the configured delay.
//! [`Debouncer`] is the timer/cancel state machine over explicit instants;
//! [`debounce`] drives it from a channel.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// Holds the latest raw value until its quiet period has elapsed.
#[derive(Debug)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Debouncer {
            delay,
            pending: None,
        }
    }

    /// Records a raw value, restarting the timer.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// When the pending value will settle.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Returns the pending value if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if deadline <= now => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    /// Stops the timer and hands back the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(v, _)| v)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

/// Emits each value from `input` that was not followed by another one
/// within `delay`.
///
/// When `input` closes, a still-pending value is emitted immediately.
/// Must be called from within a tokio runtime.
pub fn debounce<T: Send + 'static>(
    mut input: mpsc::Receiver<T>,
    delay: Duration,
) -> mpsc::Receiver<T> {
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut debouncer = Debouncer::new(delay);
        loop {
            let deadline = debouncer.deadline();
            tokio::select! {
                value = input.recv() => match value {
                    Some(value) => debouncer.push(value, Instant::now()),
                    None => {
                        if let Some(value) = debouncer.cancel() {
                            let _ = tx.send(value).await;
                        }
                        break;
                    }
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(value) = debouncer.poll(Instant::now()) {
                        if tx.send(value).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    rx
}
