// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! Message types follow a struct-based pattern with a `Display` implementation
//! so log text lives in one place instead of being scattered as string
//! literals through the event tree.
//!
//! Messages are organized by subsystem:
//! * `messages::tree` - queueing, polling and cascade events of the event tree

pub mod messages;
