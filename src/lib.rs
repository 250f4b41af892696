// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # dom-shortcut - short-named DOM helpers
//!
//! A thin facade over a pure Rust DOM: element selection, creation, cleanup,
//! inline styles and event registration, uniform across host API variants.
//!
//! ## Features
//!
//! - Selection: `select`, `select_all`, `children`, `by_id`, `body`
//! - Creation: elements, text nodes and fragments
//! - Cleanup: `empty`, `remove`, `clean` (comments and blank text)
//! - Styles: ordered property assignment onto the live inline style
//! - Events: `addEventListener` or legacy `attachEvent`, chosen once
//! - Identifier lookup: `getElementById`, `document.all` or `document.layers`, chosen once
//! - Readiness: `ready` forwards to a pluggable provider
//!
//! ## Example
//!
//! ```rust
//! use dom_shortcut::{parse_html, Dom, EventHandler};
//!
//! let doc = parse_html("<ul id='list'><li>a</li><!-- x --><li>b</li></ul>")?;
//! let dom = Dom::new(doc)?;
//!
//! let list = dom.by_id("list")?.expect("list exists");
//! dom.clean(&list);
//! dom.style_matching("li", [("color", "red")])?;
//!
//! let handler = EventHandler::new(|event| println!("{} on {:?}", event.event_type(), event.target()));
//! dom.add_listener(&list, "click", &handler)?;
//! # Ok::<(), dom_shortcut::Error>(())
//! ```

pub mod dom;
pub mod error;
pub mod facade;

// DOM
pub use dom::{
    parse_fragment, parse_html, parse_html_with, Capabilities, Document, Event, EventHandler,
    EventPhase, Node, NodeId, NodeType, ReadyState, Selector,
};

// Facade
pub use facade::{Dom, DomConfig, EventBinding, IdLookup, ReadyProvider};

// Errors
pub use error::{Error, Result};

/// dom-shortcut version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
