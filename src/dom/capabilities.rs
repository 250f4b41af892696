// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host API profile
//!
//! Declares which variants of the identifier lookup and event registration
//! APIs a document exposes.

/// Set of host API variants available on a document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// `document.getElementById`
    pub element_by_id: bool,
    /// `document.all[name]`
    pub all_collection: bool,
    /// `document.layers[name]`
    pub layers: bool,
    /// `addEventListener` / `removeEventListener`
    pub event_listener: bool,
    /// `attachEvent` / `detachEvent`
    pub attach_event: bool,
}

impl Capabilities {
    /// Standards-compliant host
    pub fn modern() -> Self {
        Self {
            element_by_id: true,
            all_collection: true,
            layers: false,
            event_listener: true,
            attach_event: false,
        }
    }

    /// Old Internet Explorer: `document.all` and `attachEvent` only
    pub fn legacy_ie() -> Self {
        Self {
            element_by_id: false,
            all_collection: true,
            layers: false,
            event_listener: false,
            attach_event: true,
        }
    }

    /// Netscape 4: layers, no usable event registration
    pub fn netscape4() -> Self {
        Self {
            element_by_id: false,
            all_collection: false,
            layers: true,
            event_listener: false,
            attach_event: false,
        }
    }

    /// Host exposing none of the variants
    pub fn bare() -> Self {
        Self {
            element_by_id: false,
            all_collection: false,
            layers: false,
            event_listener: false,
            attach_event: false,
        }
    }

    /// Set `getElementById` availability
    pub fn with_element_by_id(mut self, available: bool) -> Self {
        self.element_by_id = available;
        self
    }

    /// Set `document.all` availability
    pub fn with_all_collection(mut self, available: bool) -> Self {
        self.all_collection = available;
        self
    }

    /// Set `document.layers` availability
    pub fn with_layers(mut self, available: bool) -> Self {
        self.layers = available;
        self
    }

    /// Set `addEventListener` availability
    pub fn with_event_listener(mut self, available: bool) -> Self {
        self.event_listener = available;
        self
    }

    /// Set `attachEvent` availability
    pub fn with_attach_event(mut self, available: bool) -> Self {
        self.attach_event = available;
        self
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::modern()
    }
}
