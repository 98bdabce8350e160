// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A single addressable point in the event tree.
//!
//! Resolution comes in two flavours, mirrored at node and listener-set level:
//!
//! * `request_*` is read-only and reports absence with `None`
//! * `require_*` creates whatever is missing and always succeeds
//!
//! Children are kept in a `BTreeMap`, so cascades visit siblings in
//! lexicographic order of their segment names.

use std::collections::{BTreeMap, HashMap};

use crate::event::listener::{Listener, ListenerSet};

/// A node owns its children and the listener sets registered at it.
#[derive(Debug)]
pub struct Node<E> {
    children: BTreeMap<String, Node<E>>,
    listeners: HashMap<String, ListenerSet<E>>,
}

impl<E> Node<E> {
    pub fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            listeners: HashMap::new(),
        }
    }

    /// Walks existing children along `segments`, creating nothing.
    pub fn request_node<S: AsRef<str>>(&self, segments: &[S]) -> Option<&Node<E>> {
        let mut node = self;
        for segment in segments {
            node = node.children.get(segment.as_ref())?;
        }
        Some(node)
    }

    /// Mutable counterpart of [`Node::request_node`].
    pub fn request_node_mut<S: AsRef<str>>(&mut self, segments: &[S]) -> Option<&mut Node<E>> {
        let mut node = self;
        for segment in segments {
            node = node.children.get_mut(segment.as_ref())?;
        }
        Some(node)
    }

    /// Walks `segments`, creating and linking an empty node for every missing one.
    pub fn require_node<S: AsRef<str>>(&mut self, segments: &[S]) -> &mut Node<E> {
        let mut node = self;
        for segment in segments {
            node = node
                .children
                .entry(segment.as_ref().to_string())
                .or_insert_with(Node::new);
        }
        node
    }

    pub fn request_listeners(&self, event_type: &str) -> Option<&ListenerSet<E>> {
        self.listeners.get(event_type)
    }

    /// Returns the listener set for `event_type`, creating it if needed.
    pub fn require_listeners(&mut self, event_type: &str) -> &mut ListenerSet<E> {
        self.listeners.entry(event_type.to_string()).or_default()
    }

    /// Removes `listener` from the set for `event_type`.
    ///
    /// Returns false when the set or the listener is absent. When `prune` is
    /// set and the set ends up empty, the set itself is dropped.
    pub fn remove_listener(&mut self, event_type: &str, listener: &Listener<E>, prune: bool) -> bool {
        let Some(set) = self.listeners.get_mut(event_type) else {
            return false;
        };
        let removed = set.remove(listener);
        if prune && set.is_empty() {
            self.listeners.remove(event_type);
        }
        removed
    }

    /// Clears the set for `event_type`, or every set when `event_type` is `None`.
    ///
    /// Returns the number of listeners removed.
    pub fn clear_listeners(&mut self, event_type: Option<&str>, prune: bool) -> usize {
        let removed = match event_type {
            Some(ty) => self.listeners.get_mut(ty).map_or(0, ListenerSet::clear),
            None => self.listeners.values_mut().map(ListenerSet::clear).sum(),
        };
        if prune {
            self.listeners.retain(|_, set| !set.is_empty());
        }
        removed
    }

    /// Removes `listener` from every set at this node.
    pub fn remove_listener_everywhere(&mut self, listener: &Listener<E>, prune: bool) -> usize {
        let mut removed = 0;
        for set in self.listeners.values_mut() {
            if set.remove(listener) {
                removed += 1;
            }
        }
        if prune {
            self.listeners.retain(|_, set| !set.is_empty());
        }
        removed
    }

    /// Detaches the child named `name`, discarding its whole subtree.
    pub fn remove_child(&mut self, name: &str) -> Option<Node<E>> {
        self.children.remove(name)
    }

    pub fn child(&self, name: &str) -> Option<&Node<E>> {
        self.children.get(name)
    }

    /// Child segment names in cascade order.
    pub fn child_names(&self) -> Vec<String> {
        self.children.keys().cloned().collect()
    }

    /// Event types that currently have a listener set at this node.
    pub fn event_types(&self) -> impl Iterator<Item = &str> {
        self.listeners.keys().map(String::as_str)
    }
}

impl<E> Default for Node<E> {
    fn default() -> Self {
        Self::new()
    }
}
