// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Facade configuration

use std::fmt;
use std::sync::Arc;

use super::ready::ReadyProvider;
use super::strategy::{EventBinding, IdLookup};

/// Facade configuration
#[derive(Clone)]
pub struct DomConfig {
    /// Force an identifier lookup variant instead of probing
    pub id_lookup: Option<IdLookup>,
    /// Force an event registration variant instead of probing
    pub event_binding: Option<EventBinding>,
    /// Phase flag passed to standard registration
    pub use_capture: bool,
    /// Readiness provider; the default document when unset
    pub ready_provider: Option<Arc<dyn ReadyProvider>>,
}

impl Default for DomConfig {
    fn default() -> Self {
        Self {
            id_lookup: None,
            event_binding: None,
            use_capture: true,
            ready_provider: None,
        }
    }
}

impl DomConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Force the identifier lookup variant
    pub fn id_lookup(mut self, lookup: IdLookup) -> Self {
        self.id_lookup = Some(lookup);
        self
    }

    /// Force the event registration variant
    pub fn event_binding(mut self, binding: EventBinding) -> Self {
        self.event_binding = Some(binding);
        self
    }

    /// Set the phase flag for standard registration
    pub fn use_capture(mut self, capture: bool) -> Self {
        self.use_capture = capture;
        self
    }

    /// Set the readiness provider
    pub fn ready_provider(mut self, provider: Arc<dyn ReadyProvider>) -> Self {
        self.ready_provider = Some(provider);
        self
    }

    /// Config that goes through the legacy `document.all` and `attachEvent` paths
    pub fn legacy() -> Self {
        Self {
            id_lookup: Some(IdLookup::AllCollection),
            event_binding: Some(EventBinding::Legacy),
            ..Default::default()
        }
    }
}

impl fmt::Debug for DomConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomConfig")
            .field("id_lookup", &self.id_lookup)
            .field("event_binding", &self.event_binding)
            .field("use_capture", &self.use_capture)
            .field("ready_provider", &self.ready_provider.is_some())
            .finish()
    }
}
