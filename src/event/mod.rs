// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Hierarchical event tree.
//!
//! * [`path`] - flattening and normalizing paths into segments
//! * [`node`] - tree nodes with request/require resolution
//! * [`listener`] - listener handles, listener sets and [`once`]
//! * [`action`] - the queued action sum type and [`Timing`]
//! * [`tree`] - the [`Tree`] itself: queueing, polling and cascade

pub mod action;
pub mod listener;
pub mod node;
pub mod path;
pub mod tree;


pub use action::{Action, Timing};
pub use listener::{once, Context, Listener, ListenerSet};
pub use node::Node;
pub use path::{join, split, walk, Path};
pub use tree::Tree;
