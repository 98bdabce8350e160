// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Tree actions and when they take effect.

use std::fmt;

use crate::event::listener::Listener;

/// When an operation's effect becomes visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timing {
    /// Queue the action; it is applied by the next [`Tree::poll`](crate::event::Tree::poll).
    #[default]
    Deferred,
    /// Apply the action before the call returns.
    Immediate,
}

impl Timing {
    /// Maps a `defer` flag onto a timing.
    pub fn from_defer(defer: bool) -> Self {
        if defer {
            Timing::Deferred
        } else {
            Timing::Immediate
        }
    }

    pub fn is_deferred(self) -> bool {
        self == Timing::Deferred
    }
}

/// One state transition on the tree.
///
/// Paths are stored in canonical joined form. An action is immutable once
/// built and is consumed when flushed.
pub enum Action<E> {
    Listen {
        path: String,
        event_type: String,
        listener: Listener<E>,
    },
    /// `event_type: None` targets every type at the node; `listener: None`
    /// targets every listener of the selected type(s).
    Deafen {
        path: String,
        event_type: Option<String>,
        listener: Option<Listener<E>>,
    },
    Dispatch {
        path: String,
        event_type: String,
        event: E,
    },
    Delete {
        path: String,
    },
}

impl<E> Action<E> {
    /// Short lowercase name of the variant, used as a log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Listen { .. } => "listen",
            Action::Deafen { .. } => "deafen",
            Action::Dispatch { .. } => "dispatch",
            Action::Delete { .. } => "delete",
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Action::Listen { path, .. }
            | Action::Deafen { path, .. }
            | Action::Dispatch { path, .. }
            | Action::Delete { path } => path,
        }
    }
}

impl<E> fmt::Debug for Action<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Listen {
                path,
                event_type,
                listener,
            } => f
                .debug_struct("Listen")
                .field("path", path)
                .field("event_type", event_type)
                .field("listener", listener)
                .finish(),
            Action::Deafen {
                path,
                event_type,
                listener,
            } => f
                .debug_struct("Deafen")
                .field("path", path)
                .field("event_type", event_type)
                .field("listener", listener)
                .finish(),
            Action::Dispatch {
                path, event_type, ..
            } => f
                .debug_struct("Dispatch")
                .field("path", path)
                .field("event_type", event_type)
                .finish_non_exhaustive(),
            Action::Delete { path } => f.debug_struct("Delete").field("path", path).finish(),
        }
    }
}
