// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host API strategies
//!
//! Each set is closed and probed once, in priority order, when a [`Dom`] is
//! built. Calls never branch on host capabilities after that.
//!
//! [`Dom`]: super::Dom

use crate::dom::{Capabilities, Document, EventHandler, Node, LEGACY_PREFIX};
use crate::error::{Error, Result};

/// How identifiers are resolved to nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdLookup {
    /// `document.getElementById`
    ElementById,
    /// `document.all[id]`, which also matches `name`
    AllCollection,
    /// `document.layers[id]`, layer elements only
    Layers,
}

impl IdLookup {
    /// Probe order, first supported wins
    pub const PRIORITY: [IdLookup; 3] = [
        IdLookup::ElementById,
        IdLookup::AllCollection,
        IdLookup::Layers,
    ];

    /// Whether the host profile exposes this variant
    pub fn is_supported(&self, capabilities: &Capabilities) -> bool {
        match self {
            IdLookup::ElementById => capabilities.element_by_id,
            IdLookup::AllCollection => capabilities.all_collection,
            IdLookup::Layers => capabilities.layers,
        }
    }

    /// Pick the first supported variant
    pub fn probe(capabilities: &Capabilities) -> Result<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|lookup| lookup.is_supported(capabilities))
            .ok_or_else(|| Error::capability("No getElementById alternative"))
    }

    pub(crate) fn resolve(&self, document: &Document, id: &str) -> Result<Option<Node>> {
        match self {
            IdLookup::ElementById => document.get_element_by_id(id),
            IdLookup::AllCollection => document.all_named(id),
            IdLookup::Layers => document.layer_named(id),
        }
    }
}

/// How event handlers are registered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventBinding {
    /// `addEventListener` / `removeEventListener`
    Standard,
    /// `attachEvent` / `detachEvent` with a prefixed event name
    Legacy,
}

impl EventBinding {
    /// Probe order, first supported wins
    pub const PRIORITY: [EventBinding; 2] = [EventBinding::Standard, EventBinding::Legacy];

    /// Whether the host profile exposes this variant
    pub fn is_supported(&self, capabilities: &Capabilities) -> bool {
        match self {
            EventBinding::Standard => capabilities.event_listener,
            EventBinding::Legacy => capabilities.attach_event,
        }
    }

    /// Pick the first supported variant
    pub fn probe(capabilities: &Capabilities) -> Result<Self> {
        Self::PRIORITY
            .into_iter()
            .find(|binding| binding.is_supported(capabilities))
            .ok_or_else(|| Error::capability("No addEventListener alternative"))
    }

    pub(crate) fn add(
        &self,
        node: &Node,
        event: &str,
        handler: &EventHandler,
        capture: bool,
    ) -> Result<()> {
        match self {
            EventBinding::Standard => node.add_event_listener(event, handler, capture),
            EventBinding::Legacy => node.attach_event(&legacy_name(event), handler),
        }
    }

    pub(crate) fn remove(
        &self,
        node: &Node,
        event: &str,
        handler: &EventHandler,
        capture: bool,
    ) -> Result<()> {
        match self {
            EventBinding::Standard => node.remove_event_listener(event, handler, capture),
            EventBinding::Legacy => node.detach_event(&legacy_name(event), handler),
        }
    }
}

/// Handler name used by legacy registration (`onclick`)
fn legacy_name(event: &str) -> String {
    format!("{}{}", LEGACY_PREFIX, event)
}
