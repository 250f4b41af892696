// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Event listener registry
//!
//! Two registration APIs live side by side, as they did in browsers:
//! `addEventListener` with a capture flag, and the legacy `attachEvent` keyed
//! by the prefixed handler name (`onclick`). A document only accepts the ones
//! its [`Capabilities`](super::Capabilities) profile declares.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use super::node::Node;
use crate::error::{Error, Result};

/// Prefix the host uses for legacy handler names
pub const LEGACY_PREFIX: &str = "on";

/// Shared event callback. Equality is identity of the underlying closure.
#[derive(Clone)]
pub struct EventHandler(Arc<dyn Fn(&Event) + Send + Sync>);

impl EventHandler {
    /// Wrap a closure
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        Self(Arc::new(handler))
    }

    /// Invoke the handler
    pub fn call(&self, event: &Event) {
        (self.0)(event)
    }

    fn addr(&self) -> *const () {
        Arc::as_ptr(&self.0) as *const ()
    }
}

impl PartialEq for EventHandler {
    fn eq(&self, other: &Self) -> bool {
        self.addr() == other.addr()
    }
}

impl Eq for EventHandler {}

impl fmt::Debug for EventHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventHandler({:p})", self.addr())
    }
}

/// Dispatch phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPhase {
    Capturing,
    AtTarget,
    Bubbling,
}

/// An event as seen by one handler invocation
#[derive(Debug)]
pub struct Event {
    event_type: String,
    target: Node,
    current_target: Node,
    phase: EventPhase,
    stopped: Rc<Cell<bool>>,
}

impl Event {
    /// Event type, without prefix (`click`)
    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// Node the event was dispatched on
    pub fn target(&self) -> &Node {
        &self.target
    }

    /// Node whose handler is running
    pub fn current_target(&self) -> &Node {
        &self.current_target
    }

    /// Current dispatch phase
    pub fn phase(&self) -> EventPhase {
        self.phase
    }

    /// Stop the event after the current node's handlers have run
    pub fn stop_propagation(&self) {
        self.stopped.set(true);
    }
}

/// A stored registration
#[derive(Debug, Clone)]
pub(crate) enum Registration {
    Listener {
        event_type: String,
        handler: EventHandler,
        capture: bool,
    },
    Attached {
        name: String,
        handler: EventHandler,
    },
}

impl Node {
    /// `addEventListener`. Registering the same handler twice for the same
    /// type and phase is a no-op.
    pub fn add_event_listener(
        &self,
        event_type: &str,
        handler: &EventHandler,
        capture: bool,
    ) -> Result<()> {
        if !self.tree().capabilities.event_listener {
            return Err(Error::capability("addEventListener"));
        }
        let registration = Registration::Listener {
            event_type: event_type.to_string(),
            handler: handler.clone(),
            capture,
        };
        self.register(registration);
        Ok(())
    }

    /// `removeEventListener`
    pub fn remove_event_listener(
        &self,
        event_type: &str,
        handler: &EventHandler,
        capture: bool,
    ) -> Result<()> {
        if !self.tree().capabilities.event_listener {
            return Err(Error::capability("removeEventListener"));
        }
        self.unregister(|r| {
            matches!(r, Registration::Listener { event_type: t, handler: h, capture: c }
                if t == event_type && h == handler && *c == capture)
        });
        Ok(())
    }

    /// Legacy `attachEvent`, keyed by the prefixed name (`onclick`)
    pub fn attach_event(&self, name: &str, handler: &EventHandler) -> Result<()> {
        if !self.tree().capabilities.attach_event {
            return Err(Error::capability("attachEvent"));
        }
        let registration = Registration::Attached {
            name: name.to_string(),
            handler: handler.clone(),
        };
        self.register(registration);
        Ok(())
    }

    /// Legacy `detachEvent`
    pub fn detach_event(&self, name: &str, handler: &EventHandler) -> Result<()> {
        if !self.tree().capabilities.attach_event {
            return Err(Error::capability("detachEvent"));
        }
        self.unregister(|r| {
            matches!(r, Registration::Attached { name: n, handler: h } if n == name && h == handler)
        });
        Ok(())
    }

    /// Number of registrations held by this node
    pub fn listener_count(&self) -> usize {
        self.tree()
            .listeners
            .read()
            .get(&self.id)
            .map(Vec::len)
            .unwrap_or(0)
    }

    fn register(&self, registration: Registration) {
        let mut listeners = self.tree().listeners.write();
        let entries = listeners.entry(self.id).or_default();
        if !entries.iter().any(|r| same_registration(r, &registration)) {
            entries.push(registration);
        }
    }

    fn unregister(&self, predicate: impl Fn(&Registration) -> bool) {
        let mut listeners = self.tree().listeners.write();
        if let Some(entries) = listeners.get_mut(&self.id) {
            if let Some(index) = entries.iter().position(predicate) {
                entries.remove(index);
            }
            if entries.is_empty() {
                listeners.remove(&self.id);
            }
        }
    }

    /// Handlers on this node that fire for `event_type` in `phase`
    fn handlers_for(&self, event_type: &str, phase: EventPhase) -> Vec<EventHandler> {
        let legacy_name = format!("{}{}", LEGACY_PREFIX, event_type);
        let listeners = self.tree().listeners.read();
        let Some(entries) = listeners.get(&self.id) else {
            return Vec::new();
        };

        entries
            .iter()
            .filter_map(|r| match r {
                Registration::Listener {
                    event_type: t,
                    handler,
                    capture,
                } if t == event_type => {
                    let fires = match phase {
                        EventPhase::Capturing => *capture,
                        EventPhase::AtTarget => true,
                        EventPhase::Bubbling => !*capture,
                    };
                    fires.then(|| handler.clone())
                }
                Registration::Attached { name, handler }
                    if *name == legacy_name && phase != EventPhase::Capturing =>
                {
                    Some(handler.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Dispatch an event of `event_type` at this node: capture listeners from
    /// the root down, then the target's own handlers, then bubbling handlers
    /// back up. Returns how many handlers ran.
    pub fn dispatch_event(&self, event_type: &str) -> usize {
        let mut path = Vec::new();
        let mut ancestor = self.parent();
        while let Some(node) = ancestor {
            ancestor = node.parent();
            path.push(node);
        }

        let stopped = Rc::new(Cell::new(false));
        let mut invoked = 0;

        let mut run = |node: &Node, phase: EventPhase| -> bool {
            for handler in node.handlers_for(event_type, phase) {
                let event = Event {
                    event_type: event_type.to_string(),
                    target: self.clone(),
                    current_target: node.clone(),
                    phase,
                    stopped: stopped.clone(),
                };
                handler.call(&event);
                invoked += 1;
            }
            !stopped.get()
        };

        let capturing = path.iter().rev().all(|node| run(node, EventPhase::Capturing));
        if capturing && run(self, EventPhase::AtTarget) {
            for node in &path {
                if !run(node, EventPhase::Bubbling) {
                    break;
                }
            }
        }

        tracing::trace!(event = event_type, handlers = invoked, "dispatched event");
        invoked
    }
}

fn same_registration(a: &Registration, b: &Registration) -> bool {
    match (a, b) {
        (
            Registration::Listener {
                event_type: t1,
                handler: h1,
                capture: c1,
            },
            Registration::Listener {
                event_type: t2,
                handler: h2,
                capture: c2,
            },
        ) => t1 == t2 && h1 == h2 && c1 == c2,
        (
            Registration::Attached { name: n1, handler: h1 },
            Registration::Attached { name: n2, handler: h2 },
        ) => n1 == n2 && h1 == h2,
        _ => false,
    }
}
