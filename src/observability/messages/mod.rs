// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! [`StructuredLog`] to emit itself as a `tracing` event with structured
//! fields, at the level documented on the type.
//!
//! # Usage Pattern
//!
//! ```rust
//! use mercury_events::observability::messages::StructuredLog;
//! use mercury_events::observability::messages::tree::PollStarted;
//!
//! let msg = PollStarted { pending: 3 };
//! msg.log();
//! let _span = msg.span("poll").entered();
//! ```

use tracing::Span;

pub mod tree;

/// A message that knows how to log itself with structured fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// Build a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
