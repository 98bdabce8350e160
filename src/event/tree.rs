// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The event tree: path-addressed listener registration with deferred or
//! immediate application and cascading dispatch.
//!
//! # Queue semantics
//!
//! Every operation is either applied on the spot ([`Timing::Immediate`]) or
//! appended to the pending queue ([`Timing::Deferred`]). [`Tree::poll`]
//! detaches the queue before draining it, which gives two guarantees:
//!
//! 1. every action queued before the `poll` call is applied, in call order,
//!    before `poll` returns
//! 2. actions deferred by listeners *during* the drain land in a fresh queue
//!    and wait for the next `poll`
//!
//! # Cascade
//!
//! A dispatch fires the listeners for its type at the target node, then
//! recurses into every child (lexicographic by segment name), extending the
//! context path as it goes. Listeners are snapshotted per node before any of
//! them runs; a snapshotted listener that has been deregistered by the time
//! its turn comes is skipped. Children are snapshotted the same way, and a
//! child deleted mid-cascade is not visited.
//!
//! # Examples
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use mercury_events::event::{Listener, Timing, Tree};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = Rc::clone(&seen);
//! let mut tree: Tree<u32> = Tree::new();
//!
//! tree.listen("input/keys", "press", Listener::new(move |code: &u32, ctx| {
//!     log.borrow_mut().push((ctx.path.to_string(), *code));
//! }), Timing::Deferred);
//!
//! // Nothing is registered until the queue is drained.
//! tree.dispatch("input", "press", 1, Timing::Immediate);
//! assert!(seen.borrow().is_empty());
//!
//! tree.poll();
//! tree.dispatch("input", "press", 2, Timing::Immediate);
//! assert_eq!(*seen.borrow(), vec![("input/keys".to_string(), 2)]);
//! ```

use std::time::Instant;

use crate::config::TreeConfig;
use crate::event::action::{Action, Timing};
use crate::event::listener::{Context, Listener, ListenerSet};
use crate::event::node::Node;
use crate::event::path::{split, Path};
use crate::observability::messages::tree::{
    ActionFlushed, ActionQueued, DispatchUnresolved, ListenerSkipped, PollCompleted, PollStarted,
    RootDeleteRejected,
};
use crate::observability::messages::StructuredLog;

/// A path-addressed tree of listener registrations with a pending-action queue.
///
/// The tree is a self-contained, single-owner value with no internal
/// locking. Hosts that share one across threads must serialize access
/// themselves.
#[derive(Debug)]
pub struct Tree<E> {
    root: Node<E>,
    queue: Vec<Action<E>>,
    config: TreeConfig,
}

impl<E> Tree<E> {
    /// Creates an empty tree with default configuration.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            root: Node::new(),
            queue: Vec::with_capacity(config.queue_capacity),
            config,
        }
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn root(&self) -> &Node<E> {
        &self.root
    }

    /// Number of actions waiting for the next poll.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// True when a node exists at `path`. The root always exists.
    pub fn contains(&self, path: impl Into<Path>) -> bool {
        self.root.request_node(path.into().walk().as_slice()).is_some()
    }

    /// Number of listeners registered for `event_type` exactly at `path`.
    pub fn listener_count(&self, path: impl Into<Path>, event_type: &str) -> usize {
        self.root
            .request_node(path.into().walk().as_slice())
            .and_then(|node| node.request_listeners(event_type))
            .map_or(0, ListenerSet::len)
    }

    /// Registers `listener` for `event_type` at `path`, creating nodes as needed.
    pub fn listen(
        &mut self,
        path: impl Into<Path>,
        event_type: impl Into<String>,
        listener: Listener<E>,
        timing: Timing,
    ) {
        self.submit(
            Action::Listen {
                path: path.into().join(),
                event_type: event_type.into(),
                listener,
            },
            timing,
        );
    }

    /// Removes listeners at `path`.
    ///
    /// `event_type: None` matches every type at the node and `listener: None`
    /// matches every listener of the matched types. Missing nodes, sets or
    /// listeners make this a no-op.
    pub fn deafen(
        &mut self,
        path: impl Into<Path>,
        event_type: Option<impl Into<String>>,
        listener: Option<Listener<E>>,
        timing: Timing,
    ) {
        self.submit(
            Action::Deafen {
                path: path.into().join(),
                event_type: event_type.map(Into::into),
                listener,
            },
            timing,
        );
    }

    /// Fires `event` at `path` and every node below it.
    ///
    /// A dispatch to a path with no node does nothing.
    pub fn dispatch(
        &mut self,
        path: impl Into<Path>,
        event_type: impl Into<String>,
        event: E,
        timing: Timing,
    ) {
        self.submit(
            Action::Dispatch {
                path: path.into().join(),
                event_type: event_type.into(),
                event,
            },
            timing,
        );
    }

    /// Removes the node at `path` and its whole subtree.
    ///
    /// Deleting the root is refused and leaves the tree untouched.
    pub fn delete(&mut self, path: impl Into<Path>, timing: Timing) {
        self.submit(
            Action::Delete {
                path: path.into().join(),
            },
            timing,
        );
    }

    /// Queues or applies a prebuilt action.
    pub fn submit(&mut self, action: Action<E>, timing: Timing) {
        match timing {
            Timing::Deferred => {
                self.queue.push(action);
                if let Some(queued) = self.queue.last() {
                    ActionQueued {
                        kind: queued.kind(),
                        path: queued.path(),
                        pending: self.queue.len(),
                    }
                    .log();
                }
            }
            Timing::Immediate => self.flush(action),
        }
    }

    /// Drains the actions queued so far, in FIFO order.
    ///
    /// Returns the number of actions applied. Actions queued while draining
    /// are left for the next call.
    pub fn poll(&mut self) -> usize {
        if self.queue.is_empty() {
            return 0;
        }

        let mut drained = std::mem::take(&mut self.queue);
        let started = PollStarted {
            pending: drained.len(),
        };
        started.log();
        let _span = started.span("poll").entered();

        let start = Instant::now();
        let flushed = drained.len();
        for action in drained.drain(..) {
            self.flush(action);
        }

        PollCompleted {
            flushed,
            requeued: self.queue.len(),
            duration: start.elapsed(),
        }
        .log();

        // Hand the emptied buffer back when nothing was queued during the drain.
        if self.queue.is_empty() {
            self.queue = drained;
        }
        flushed
    }

    fn flush(&mut self, action: Action<E>) {
        ActionFlushed {
            kind: action.kind(),
            path: action.path(),
        }
        .log();

        match action {
            Action::Listen {
                path,
                event_type,
                listener,
            } => self.on_listen(&path, &event_type, listener),
            Action::Deafen {
                path,
                event_type,
                listener,
            } => self.on_deafen(&path, event_type.as_deref(), listener.as_ref()),
            Action::Dispatch {
                path,
                event_type,
                event,
            } => self.on_dispatch(&path, &event_type, &event),
            Action::Delete { path } => self.on_delete(&path),
        }
    }

    fn on_listen(&mut self, path: &str, event_type: &str, listener: Listener<E>) {
        self.root
            .require_node(split(path).as_slice())
            .require_listeners(event_type)
            .insert(listener);
    }

    fn on_deafen(&mut self, path: &str, event_type: Option<&str>, listener: Option<&Listener<E>>) {
        let prune = self.config.prune_empty_listener_sets;
        let Some(node) = self.root.request_node_mut(split(path).as_slice()) else {
            return;
        };
        match (event_type, listener) {
            (Some(ty), Some(l)) => {
                node.remove_listener(ty, l, prune);
            }
            (None, Some(l)) => {
                node.remove_listener_everywhere(l, prune);
            }
            (ty, None) => {
                node.clear_listeners(ty, prune);
            }
        }
    }

    fn on_delete(&mut self, path: &str) {
        let segments = split(path);
        let Some((last, parent)) = segments.split_last() else {
            RootDeleteRejected.log();
            return;
        };
        if let Some(parent) = self.root.request_node_mut(parent) {
            parent.remove_child(last);
        }
    }

    fn on_dispatch(&mut self, path: &str, event_type: &str, event: &E) {
        let mut segments = split(path);
        if self.root.request_node(segments.as_slice()).is_none() {
            DispatchUnresolved { path, event_type }.log();
            return;
        }
        self.cascade(&mut segments, event_type, event);
    }

    /// Fires the node at `segments`, then each of its children in turn.
    fn cascade(&mut self, segments: &mut Vec<String>, event_type: &str, event: &E) {
        let (listeners, children) = match self.root.request_node(segments.as_slice()) {
            Some(node) => (
                node.request_listeners(event_type)
                    .map(ListenerSet::snapshot)
                    .unwrap_or_default(),
                node.child_names(),
            ),
            None => return,
        };

        if !listeners.is_empty() {
            let path = segments.join("/");
            for listener in &listeners {
                if !self.is_registered(segments, event_type, listener) {
                    ListenerSkipped {
                        path: &path,
                        event_type,
                    }
                    .log();
                    continue;
                }
                let mut ctx = Context {
                    tree: &mut *self,
                    path: &path,
                    event_type,
                    listener,
                };
                listener.call(event, &mut ctx);
            }
        }

        for child in children {
            segments.push(child);
            self.cascade(segments, event_type, event);
            segments.pop();
        }
    }

    fn is_registered(&self, segments: &[String], event_type: &str, listener: &Listener<E>) -> bool {
        self.root
            .request_node(segments)
            .and_then(|node| node.request_listeners(event_type))
            .is_some_and(|set| set.contains(listener))
    }
}

impl<E> Default for Tree<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counter() -> (Rc<Cell<usize>>, Listener<()>) {
        let hits = Rc::new(Cell::new(0));
        let inner = Rc::clone(&hits);
        (hits, Listener::new(move |_, _| inner.set(inner.get() + 1)))
    }

    #[test]
    fn test_deferred_listen_waits_for_poll() {
        let mut tree: Tree<()> = Tree::new();
        let (_, l) = counter();

        tree.listen("a/b", "t", l, Timing::Deferred);
        assert_eq!(tree.pending(), 1);
        assert!(!tree.contains("a"));

        assert_eq!(tree.poll(), 1);
        assert_eq!(tree.pending(), 0);
        assert_eq!(tree.listener_count("a/b", "t"), 1);
    }

    #[test]
    fn test_immediate_listen_applies_at_once() {
        let mut tree: Tree<()> = Tree::new();
        let (_, l) = counter();
        tree.listen(["a", "b"], "t", l, Timing::Immediate);
        assert_eq!(tree.pending(), 0);
        assert!(tree.contains("a/b"));
    }

    #[test]
    fn test_listen_twice_registers_once() {
        let mut tree: Tree<()> = Tree::new();
        let (hits, l) = counter();
        tree.listen("a", "t", l.clone(), Timing::Immediate);
        tree.listen("/a/", "t", l, Timing::Immediate);
        tree.dispatch("a", "t", (), Timing::Immediate);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_deafen_specific_listener() {
        let mut tree: Tree<()> = Tree::new();
        let (hits_a, a) = counter();
        let (hits_b, b) = counter();
        tree.listen("n", "t", a.clone(), Timing::Immediate);
        tree.listen("n", "t", b, Timing::Immediate);

        tree.deafen("n", Some("t"), Some(a), Timing::Immediate);
        tree.dispatch("n", "t", (), Timing::Immediate);

        assert_eq!(hits_a.get(), 0);
        assert_eq!(hits_b.get(), 1);
    }

    #[test]
    fn test_deafen_without_listener_clears_type() {
        let mut tree: Tree<()> = Tree::new();
        let (hits_a, a) = counter();
        let (hits_b, b) = counter();
        tree.listen("n", "t", a, Timing::Immediate);
        tree.listen("n", "t", b, Timing::Immediate);
        let (hits_other, other) = counter();
        tree.listen("n", "u", other, Timing::Immediate);

        tree.deafen("n", Some("t"), None, Timing::Immediate);
        tree.dispatch("n", "t", (), Timing::Immediate);
        tree.dispatch("n", "u", (), Timing::Immediate);

        assert_eq!(hits_a.get() + hits_b.get(), 0);
        assert_eq!(hits_other.get(), 1);
    }

    #[test]
    fn test_deafen_without_type_covers_every_type() {
        let mut tree: Tree<()> = Tree::new();
        let (hits, l) = counter();
        tree.listen("n", "t", l.clone(), Timing::Immediate);
        tree.listen("n", "u", l.clone(), Timing::Immediate);

        tree.deafen("n", None::<&str>, Some(l), Timing::Immediate);
        tree.dispatch("n", "t", (), Timing::Immediate);
        tree.dispatch("n", "u", (), Timing::Immediate);
        assert_eq!(hits.get(), 0);

        let (_, l2) = counter();
        tree.listen("n", "v", l2, Timing::Immediate);
        tree.deafen("n", None::<&str>, None, Timing::Immediate);
        assert_eq!(tree.listener_count("n", "v"), 0);
    }

    #[test]
    fn test_deafen_accepts_owned_event_type() {
        let mut tree: Tree<()> = Tree::new();
        let (hits, l) = counter();
        let event_type = String::from("t");
        tree.listen("n", event_type.clone(), l.clone(), Timing::Immediate);

        tree.deafen("n", Some(event_type.clone()), Some(l), Timing::Immediate);
        tree.dispatch("n", event_type, (), Timing::Immediate);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_deafen_missing_things_is_noop() {
        let mut tree: Tree<()> = Tree::new();
        let (_, l) = counter();
        tree.deafen("nowhere", Some("t"), Some(l.clone()), Timing::Immediate);
        tree.listen("a", "t", l.clone(), Timing::Immediate);
        tree.deafen("a", Some("other"), Some(l.clone()), Timing::Immediate);
        let (_, stranger) = counter();
        tree.deafen("a", Some("t"), Some(stranger), Timing::Immediate);
        assert!(!tree.contains("nowhere"));
        assert_eq!(tree.listener_count("a", "t"), 1);
    }

    #[test]
    fn test_prune_empty_listener_sets() {
        let config = TreeConfig {
            prune_empty_listener_sets: true,
            ..TreeConfig::default()
        };
        let mut tree: Tree<()> = Tree::with_config(config);
        let (_, l) = counter();
        tree.listen("a", "t", l.clone(), Timing::Immediate);
        tree.deafen("a", Some("t"), Some(l), Timing::Immediate);

        let node = tree.root().request_node(&["a"]).unwrap();
        assert!(node.request_listeners("t").is_none());
    }

    #[test]
    fn test_dispatch_to_missing_path_creates_nothing() {
        let mut tree: Tree<()> = Tree::new();
        let (hits, l) = counter();
        tree.listen("", "t", l, Timing::Immediate);
        tree.dispatch("ghost/town", "t", (), Timing::Immediate);
        assert_eq!(hits.get(), 0);
        assert!(!tree.contains("ghost"));
    }

    #[test]
    fn test_delete_removes_subtree_only() {
        let mut tree: Tree<()> = Tree::new();
        let (_, l) = counter();
        tree.listen("a/b/c", "t", l.clone(), Timing::Immediate);
        tree.listen("a/d", "t", l, Timing::Immediate);

        tree.delete("a/b", Timing::Immediate);
        assert!(!tree.contains("a/b"));
        assert!(!tree.contains("a/b/c"));
        assert!(tree.contains("a/d"));

        tree.delete("a/zzz", Timing::Immediate);
        tree.delete("q/r", Timing::Immediate);
        assert!(tree.contains("a/d"));
    }

    #[test]
    fn test_delete_root_is_refused() {
        let mut tree: Tree<()> = Tree::new();
        let (hits, l) = counter();
        tree.listen("a", "t", l, Timing::Immediate);

        tree.delete("", Timing::Immediate);
        tree.delete("/", Timing::Immediate);
        tree.delete(Path::root(), Timing::Deferred);
        tree.poll();

        assert!(tree.contains("a"));
        tree.dispatch("", "t", (), Timing::Immediate);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_queued_paths_are_normalized() {
        let mut tree: Tree<()> = Tree::new();
        tree.delete(vec![" a ", "//b/"], Timing::Deferred);
        let (_, l) = counter();
        tree.listen("x", "t", l, Timing::Deferred);
        let paths: Vec<_> = tree.queue.iter().map(|a| a.path().to_string()).collect();
        assert_eq!(paths, vec!["a/b", "x"]);
    }

    #[test]
    fn test_poll_on_empty_queue() {
        let mut tree: Tree<()> = Tree::new();
        assert_eq!(tree.poll(), 0);
    }

    #[test]
    fn test_with_config_sizes_queue() {
        let config = TreeConfig {
            queue_capacity: 5,
            ..TreeConfig::default()
        };
        let tree: Tree<()> = Tree::with_config(config.clone());
        assert!(tree.queue.capacity() >= 5);
        assert_eq!(tree.config(), &config);
    }
}
