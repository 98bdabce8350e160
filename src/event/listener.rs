// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Listener handles, per-type listener sets and the invocation context.
//!
//! A [`Listener`] is a reference-counted callback. Its identity is the
//! allocation it wraps: clones of one listener compare equal, two listeners
//! built from identical closures do not. That identity is what `deafen`
//! matches against and what [`Context::listener`] hands back to the callback
//! so it can deregister itself.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::event::action::Timing;
use crate::event::tree::Tree;

type Callback<E> = dyn Fn(&E, &mut Context<'_, E>);

/// Everything a listener receives alongside the event.
pub struct Context<'a, E> {
    /// The tree the dispatch is running on. Listeners may issue further
    /// operations through it, deferred or immediate.
    pub tree: &'a mut Tree<E>,
    /// Canonical path of the node this listener is registered at.
    pub path: &'a str,
    /// The event type being dispatched.
    pub event_type: &'a str,
    /// The listener being invoked.
    pub listener: &'a Listener<E>,
}

/// A callback registered against an event type at a node.
pub struct Listener<E> {
    callback: Rc<Callback<E>>,
}

impl<E> Listener<E> {
    /// Wraps a closure into a listener with a fresh identity.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&E, &mut Context<'_, E>) + 'static,
    {
        Self {
            callback: Rc::new(callback),
        }
    }

    /// Invokes the callback.
    pub fn call(&self, event: &E, ctx: &mut Context<'_, E>) {
        (self.callback)(event, ctx)
    }

    /// True when both handles refer to the same registration.
    pub fn same(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Rc::as_ptr(&self.callback), Rc::as_ptr(&other.callback))
    }
}

impl<E> Clone for Listener<E> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<E> PartialEq for Listener<E> {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl<E> Eq for Listener<E> {}

impl<E> fmt::Debug for Listener<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Listener({:p})", Rc::as_ptr(&self.callback) as *const ())
    }
}

/// Wraps `listener` so it fires at most `times` times and then removes itself.
///
/// Right before the final invocation the wrapper issues an immediate `deafen`
/// for its own identity at the node it fired from, so later dispatches
/// (including ones the inner listener issues itself, and the remainder of the
/// current cascade) never see it. With `times == 0` the
/// inner listener is never called and the wrapper removes itself the first
/// time it is reached.
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use mercury_events::event::{once, Listener, Timing, Tree};
///
/// let hits = Rc::new(Cell::new(0));
/// let counter = Rc::clone(&hits);
/// let mut tree: Tree<()> = Tree::new();
/// tree.listen("a", "t", once(Listener::<()>::new(move |_, _| counter.set(counter.get() + 1)), 2), Timing::Immediate);
///
/// for _ in 0..3 {
///     tree.dispatch("a", "t", (), Timing::Immediate);
/// }
/// assert_eq!(hits.get(), 2);
/// assert_eq!(tree.listener_count("a", "t"), 0);
/// ```
pub fn once<E: 'static>(listener: Listener<E>, times: usize) -> Listener<E> {
    let remaining = Cell::new(times);
    Listener::new(move |event: &E, ctx: &mut Context<'_, E>| {
        let left = remaining.get();
        // Settle the count and registration before calling out, so a
        // re-entrant dispatch from the inner listener cannot reach it again.
        if left <= 1 {
            let (path, event_type) = (ctx.path, ctx.event_type);
            let this = ctx.listener.clone();
            ctx.tree
                .deafen(path, Some(event_type), Some(this), Timing::Immediate);
        }
        if left > 0 {
            remaining.set(left - 1);
            listener.call(event, ctx);
        }
    })
}

/// The listeners registered for one event type at one node.
///
/// Behaves as a set: a listener is stored at most once. Insertion order is
/// kept so invocation order within a node is deterministic.
#[derive(Debug)]
pub struct ListenerSet<E> {
    listeners: Vec<Listener<E>>,
}

impl<E> ListenerSet<E> {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds `listener`, returning false if it was already present.
    pub fn insert(&mut self, listener: Listener<E>) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Removes `listener`, returning false if it was not present.
    pub fn remove(&mut self, listener: &Listener<E>) -> bool {
        match self.listeners.iter().position(|l| l.same(listener)) {
            Some(idx) => {
                self.listeners.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, listener: &Listener<E>) -> bool {
        self.listeners.iter().any(|l| l.same(listener))
    }

    /// Removes every listener, returning how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.listeners.len();
        self.listeners.clear();
        removed
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Listener<E>> {
        self.listeners.iter()
    }

    /// Copies the handles out so the set can be mutated while they are invoked.
    pub fn snapshot(&self) -> Vec<Listener<E>> {
        self.listeners.clone()
    }
}

impl<E> Default for ListenerSet<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> Listener<()> {
        Listener::new(|_, _| {})
    }

    #[test]
    fn test_identity_follows_allocation() {
        let a = noop();
        let b = noop();
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_set_rejects_duplicates() {
        let a = noop();
        let mut set = ListenerSet::new();
        assert!(set.insert(a.clone()));
        assert!(!set.insert(a.clone()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_remove_only_touches_given_listener() {
        let a = noop();
        let b = noop();
        let c = noop();
        let mut set = ListenerSet::new();
        set.insert(a.clone());
        set.insert(b.clone());
        set.insert(c.clone());

        assert!(set.remove(&b));
        assert!(!set.remove(&b));
        let left: Vec<_> = set.iter().cloned().collect();
        assert_eq!(left, vec![a, c]);
    }

    #[test]
    fn test_snapshot_is_detached_from_set() {
        let a = noop();
        let mut set = ListenerSet::new();
        set.insert(a.clone());
        let snap = set.snapshot();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(snap, vec![a]);
    }
}
