// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation

use std::fmt;
use std::sync::Arc;

use super::capabilities::Capabilities;
use super::node::{Node, NodeData, NodeId, Tree};
use crate::error::{Error, Result};

/// Callback queued until the document is ready
pub type ReadyCallback = Box<dyn FnOnce() + Send>;

/// Document loading state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadyState {
    /// Still being built; ready callbacks are queued
    #[default]
    Loading,
    /// Fully built; ready callbacks run immediately
    Complete,
}

#[derive(Default)]
pub(crate) struct Readiness {
    state: ReadyState,
    pending: Vec<ReadyCallback>,
}

/// HTML Document representation
#[derive(Clone)]
pub struct Document {
    /// Root node ID
    root_id: NodeId,
    /// Node storage, listeners and host profile
    tree: Arc<Tree>,
}

impl Document {
    /// Create a new empty document with a standards-compliant profile
    pub fn new() -> Self {
        Self::with_capabilities(Capabilities::modern())
    }

    /// Create a new empty document exposing only the given API variants
    pub fn with_capabilities(capabilities: Capabilities) -> Self {
        let tree = Arc::new(Tree::new(capabilities));
        let root_id = tree.insert(NodeData::document());
        Self { root_id, tree }
    }

    /// Host API variants this document exposes
    pub fn capabilities(&self) -> Capabilities {
        self.tree.capabilities
    }

    /// Get the root node
    pub fn root(&self) -> Node {
        Node::new(self.root_id, self.tree.clone())
    }

    /// Whether `node` belongs to this document
    pub fn owns(&self, node: &Node) -> bool {
        self.root().same_document(node)
    }

    fn create(&self, data: NodeData) -> Node {
        let node = Node::new(self.tree.insert(data), self.tree.clone());
        self.tree.track_detached(node.id);
        node
    }

    /// Get the document element (<html>)
    pub fn document_element(&self) -> Option<Node> {
        self.root().element_children().into_iter().next()
    }

    fn html_child(&self, tag: &str) -> Option<Node> {
        self.document_element()?
            .element_children()
            .into_iter()
            .find(|child| child.local_name().as_deref() == Some(tag))
    }

    /// Get the <head> element
    pub fn head(&self) -> Option<Node> {
        self.html_child("head")
    }

    /// Get the <body> element
    pub fn body(&self) -> Option<Node> {
        self.html_child("body")
    }

    /// Get document title
    pub fn title(&self) -> String {
        self.query_selector("title")
            .ok()
            .flatten()
            .map(|t| t.text_content().trim().to_string())
            .unwrap_or_default()
    }

    /// Query selector - find first matching element
    pub fn query_selector(&self, selector: &str) -> Result<Option<Node>> {
        self.root().query_selector(selector)
    }

    /// Query selector all - find all matching elements
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Node>> {
        self.root().query_selector_all(selector)
    }

    fn find_element(&self, predicate: impl Fn(&Node) -> bool) -> Option<Node> {
        self.root()
            .descendant_elements()
            .into_iter()
            .find(|node| predicate(node))
    }

    /// `document.getElementById`
    pub fn get_element_by_id(&self, id: &str) -> Result<Option<Node>> {
        if !self.tree.capabilities.element_by_id {
            return Err(Error::capability("getElementById"));
        }
        Ok(self.find_element(|node| node.element_id().as_deref() == Some(id)))
    }

    /// `document.all[name]`: first element whose `id` or `name` matches
    pub fn all_named(&self, name: &str) -> Result<Option<Node>> {
        if !self.tree.capabilities.all_collection {
            return Err(Error::capability("document.all"));
        }
        Ok(self.find_element(|node| id_or_name_is(node, name)))
    }

    /// `document.layers[name]`: first `<layer>`/`<ilayer>` whose `id` or `name` matches
    pub fn layer_named(&self, name: &str) -> Result<Option<Node>> {
        if !self.tree.capabilities.layers {
            return Err(Error::capability("document.layers"));
        }
        Ok(self.find_element(|node| {
            matches!(node.local_name().as_deref(), Some("layer" | "ilayer"))
                && id_or_name_is(node, name)
        }))
    }

    /// Create a new element
    pub fn create_element(&self, tag: &str) -> Node {
        self.create(NodeData::element(tag))
    }

    /// Create a text node
    pub fn create_text_node(&self, content: &str) -> Node {
        self.create(NodeData::text(content))
    }

    /// Create a comment node
    pub fn create_comment(&self, content: &str) -> Node {
        self.create(NodeData::comment(content))
    }

    /// Create an empty document fragment
    pub fn create_document_fragment(&self) -> Node {
        self.create(NodeData::fragment())
    }

    pub(crate) fn create_doctype(&self) -> Node {
        self.create(NodeData::doctype())
    }

    pub(crate) fn create_processing_instruction(&self, content: &str) -> Node {
        self.create(NodeData::processing_instruction(content))
    }

    /// Current loading state
    pub fn ready_state(&self) -> ReadyState {
        self.tree.ready.lock().state
    }

    /// Run `callback` once the document is complete. Runs immediately if it
    /// already is.
    pub fn when_ready(&self, callback: ReadyCallback) {
        {
            let mut ready = self.tree.ready.lock();
            if ready.state == ReadyState::Loading {
                ready.pending.push(callback);
                return;
            }
        }
        callback();
    }

    /// Mark the document complete and flush queued ready callbacks in order
    pub fn mark_ready(&self) {
        let pending = {
            let mut ready = self.tree.ready.lock();
            ready.state = ReadyState::Complete;
            std::mem::take(&mut ready.pending)
        };
        tracing::debug!(callbacks = pending.len(), "document ready");
        for callback in pending {
            callback();
        }
    }

    /// Number of nodes in storage, including detached ones still referenced
    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// Get the document's HTML
    pub fn outer_html(&self) -> String {
        self.root().outer_html()
    }
}

fn id_or_name_is(node: &Node, name: &str) -> bool {
    node.element_id().as_deref() == Some(name)
        || node.get_attribute("name").as_deref() == Some(name)
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root_id)
            .field("capabilities", &self.tree.capabilities)
            .field("ready_state", &self.ready_state())
            .finish()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.root_id == other.root_id
    }
}
