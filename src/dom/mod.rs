// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host DOM
//!
//! An in-memory document tree built on top of html5ever, exposing the host
//! APIs the facade forwards to: selector queries, node creation and mutation,
//! inline styles, both event registration variants, the three identifier
//! lookup variants and document readiness.

mod capabilities;
mod document;
mod events;
mod node;
mod parser;
mod selector;
mod style;

pub use capabilities::Capabilities;
pub use document::{Document, ReadyCallback, ReadyState};
pub use events::{Event, EventHandler, EventPhase, LEGACY_PREFIX};
pub use node::{Node, NodeId, NodeType};
pub use parser::{parse_fragment, parse_html, parse_html_with};
pub use selector::Selector;
pub use style::css_property_name;
