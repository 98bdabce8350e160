// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Mercury's hierarchical event tree.
//!
//! A [`Tree`](event::Tree) addresses nodes by `/`-separated paths, keeps
//! typed listener registrations at each node, and applies listen, deafen,
//! dispatch and delete actions either immediately or on the next
//! [`poll`](event::Tree::poll). Dispatch cascades from the target node
//! through its whole subtree.

pub mod config;        // tree config loading
pub mod errors;        // error handling
pub mod event;         // the event tree
pub mod observability; // structured log messages
