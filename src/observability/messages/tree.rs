// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for event tree queueing, polling and cascade events.
//!
//! This module contains message types for logging events related to:
//! * Actions entering the pending queue and being flushed
//! * Poll lifecycle (start, completion)
//! * Dispatches and deletes that resolve to nothing
//! * Listeners skipped mid-cascade

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An action was appended to the pending queue.
///
/// # Log Level
/// `debug!` - Routine operational detail
///
/// # Example
/// ```
/// use mercury_events::observability::messages::tree::ActionQueued;
///
/// let msg = ActionQueued {
///     kind: "dispatch",
///     path: "ui/menu",
///     pending: 2,
/// };
///
/// assert_eq!(msg.to_string(), "Queued dispatch at '/ui/menu' (2 pending)");
/// ```
pub struct ActionQueued<'a> {
    pub kind: &'a str,
    pub path: &'a str,
    pub pending: usize,
}

impl Display for ActionQueued<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Queued {} at '/{}' ({} pending)",
            self.kind, self.path, self.pending
        )
    }
}

impl StructuredLog for ActionQueued<'_> {
    fn log(&self) {
        tracing::debug!(
            kind = self.kind,
            path = self.path,
            pending = self.pending,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "action_queued",
            span_name = name,
            kind = self.kind,
            path = self.path,
        )
    }
}

/// An action was applied to the tree.
///
/// # Log Level
/// `trace!` - High-volume detail
pub struct ActionFlushed<'a> {
    pub kind: &'a str,
    pub path: &'a str,
}

impl Display for ActionFlushed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Flushing {} at '/{}'", self.kind, self.path)
    }
}

impl StructuredLog for ActionFlushed<'_> {
    fn log(&self) {
        tracing::trace!(kind = self.kind, path = self.path, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "action_flushed",
            span_name = name,
            kind = self.kind,
            path = self.path,
        )
    }
}

/// A poll detached the pending queue and is about to drain it.
///
/// # Log Level
/// `debug!` - Routine operational detail
///
/// # Example
/// ```
/// use mercury_events::observability::messages::tree::PollStarted;
///
/// let msg = PollStarted { pending: 4 };
/// assert_eq!(msg.to_string(), "Polling 4 queued actions");
/// ```
pub struct PollStarted {
    pub pending: usize,
}

impl Display for PollStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Polling {} queued actions", self.pending)
    }
}

impl StructuredLog for PollStarted {
    fn log(&self) {
        tracing::debug!(pending = self.pending, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!("poll", span_name = name, pending = self.pending)
    }
}

/// A poll finished draining its detached queue.
///
/// `requeued` counts actions that listeners deferred during the drain; they
/// wait for the next poll.
///
/// # Log Level
/// `debug!` - Routine operational detail
///
/// # Example
/// ```
/// use mercury_events::observability::messages::tree::PollCompleted;
/// use std::time::Duration;
///
/// let msg = PollCompleted {
///     flushed: 4,
///     requeued: 1,
///     duration: Duration::from_micros(12),
/// };
///
/// tracing::debug!("{}", msg);
/// ```
pub struct PollCompleted {
    pub flushed: usize,
    pub requeued: usize,
    pub duration: std::time::Duration,
}

impl Display for PollCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Poll flushed {} actions in {:?}, {} queued for next poll",
            self.flushed, self.duration, self.requeued
        )
    }
}

impl StructuredLog for PollCompleted {
    fn log(&self) {
        tracing::debug!(
            flushed = self.flushed,
            requeued = self.requeued,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "poll_completed",
            span_name = name,
            flushed = self.flushed,
            requeued = self.requeued,
            duration = ?self.duration,
        )
    }
}

/// A dispatch targeted a path with no node; no listener fired.
///
/// # Log Level
/// `debug!` - Expected, silent no-op
pub struct DispatchUnresolved<'a> {
    pub path: &'a str,
    pub event_type: &'a str,
}

impl Display for DispatchUnresolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dispatch of '{}' to '/{}' found no node",
            self.event_type, self.path
        )
    }
}

impl StructuredLog for DispatchUnresolved<'_> {
    fn log(&self) {
        tracing::debug!(
            path = self.path,
            event_type = self.event_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "dispatch_unresolved",
            span_name = name,
            path = self.path,
            event_type = self.event_type,
        )
    }
}

/// A delete targeted the root, which is never removed.
///
/// # Log Level
/// `warn!` - Caller asked for something the tree refuses
///
/// # Example
/// ```
/// use mercury_events::observability::messages::tree::RootDeleteRejected;
///
/// assert_eq!(RootDeleteRejected.to_string(), "Refusing to delete the root node");
/// ```
pub struct RootDeleteRejected;

impl Display for RootDeleteRejected {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Refusing to delete the root node")
    }
}

impl StructuredLog for RootDeleteRejected {
    fn log(&self) {
        tracing::warn!("{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("root_delete_rejected", span_name = name)
    }
}

/// A listener in a cascade snapshot was deregistered before its turn.
///
/// # Log Level
/// `trace!` - High-volume detail
pub struct ListenerSkipped<'a> {
    pub path: &'a str,
    pub event_type: &'a str,
}

impl Display for ListenerSkipped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Skipping '{}' listener at '/{}': deregistered during cascade",
            self.event_type, self.path
        )
    }
}

impl StructuredLog for ListenerSkipped<'_> {
    fn log(&self) {
        tracing::trace!(
            path = self.path,
            event_type = self.event_type,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "listener_skipped",
            span_name = name,
            path = self.path,
            event_type = self.event_type,
        )
    }
}
