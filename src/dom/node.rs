// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM Node types and tree mutation

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, RwLock};

use super::capabilities::Capabilities;
use super::events::Registration;
use super::selector::Selector;
use crate::error::{Error, Result};

/// Unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a new unique node ID
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Document node
    Document,
    /// Element node (like <div>, <p>, etc.)
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Document type node (<!DOCTYPE>)
    DocumentType,
    /// Processing instruction
    ProcessingInstruction,
    /// Document fragment
    DocumentFragment,
}

impl NodeType {
    /// Get the numeric value (matches DOM spec)
    pub fn as_u8(&self) -> u8 {
        match self {
            NodeType::Element => 1,
            NodeType::Text => 3,
            NodeType::ProcessingInstruction => 7,
            NodeType::Comment => 8,
            NodeType::Document => 9,
            NodeType::DocumentType => 10,
            NodeType::DocumentFragment => 11,
        }
    }

    /// Whether nodes of this type may hold children
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            NodeType::Document | NodeType::Element | NodeType::DocumentFragment
        )
    }
}

/// Internal node data
#[derive(Debug)]
pub struct NodeData {
    /// Node type
    pub node_type: NodeType,
    /// Tag name (for elements), lowercase
    pub tag_name: Option<String>,
    /// Text content (for text/comment/processing-instruction nodes)
    pub text_content: Option<String>,
    /// Attributes (for elements)
    pub attributes: HashMap<String, String>,
    /// Parent node ID
    pub parent: Option<NodeId>,
    /// Child node IDs in document order
    pub children: Vec<NodeId>,
}

impl NodeData {
    fn with_type(node_type: NodeType) -> Self {
        Self {
            node_type,
            tag_name: None,
            text_content: None,
            attributes: HashMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a new element node data
    pub fn element(tag_name: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Element);
        data.tag_name = Some(tag_name.into().to_lowercase());
        data
    }

    /// Create a new text node data
    pub fn text(content: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Text);
        data.text_content = Some(content.into());
        data
    }

    /// Create a new comment node data
    pub fn comment(content: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::Comment);
        data.text_content = Some(content.into());
        data
    }

    /// Create a new document node data
    pub fn document() -> Self {
        Self::with_type(NodeType::Document)
    }

    /// Create a new document fragment node data
    pub fn fragment() -> Self {
        Self::with_type(NodeType::DocumentFragment)
    }

    /// Create a new doctype node data
    pub fn doctype() -> Self {
        Self::with_type(NodeType::DocumentType)
    }

    /// Create a new processing instruction node data
    pub fn processing_instruction(content: impl Into<String>) -> Self {
        let mut data = Self::with_type(NodeType::ProcessingInstruction);
        data.text_content = Some(content.into());
        data
    }
}

/// Storage shared by every node of one document
pub(crate) struct Tree {
    pub(crate) nodes: RwLock<HashMap<NodeId, NodeData>>,
    pub(crate) listeners: RwLock<HashMap<NodeId, Vec<Registration>>>,
    pub(crate) capabilities: Capabilities,
    pub(crate) ready: Mutex<super::document::Readiness>,
    /// Liveness token of each node that has had a handle
    handles: Mutex<HashMap<NodeId, Weak<()>>>,
    /// Parentless roots that may have become unreachable
    detached: Mutex<HashSet<NodeId>>,
}

impl Tree {
    pub(crate) fn new(capabilities: Capabilities) -> Self {
        Self {
            nodes: RwLock::new(HashMap::new()),
            listeners: RwLock::new(HashMap::new()),
            capabilities,
            ready: Mutex::new(super::document::Readiness::default()),
            handles: Mutex::new(HashMap::new()),
            detached: Mutex::new(HashSet::new()),
        }
    }

    /// Store a detached node and return its ID
    pub(crate) fn insert(&self, data: NodeData) -> NodeId {
        let id = NodeId::new();
        self.nodes.write().insert(id, data);
        id
    }

    /// Queue a parentless node for collection once its handles are gone
    pub(crate) fn track_detached(&self, id: NodeId) {
        self.detached.lock().insert(id);
    }

    /// Number of stored nodes, attached or not
    pub(crate) fn len(&self) -> usize {
        self.nodes.read().len()
    }

    fn handle_token(&self, id: NodeId) -> Arc<()> {
        let mut handles = self.handles.lock();
        if let Some(token) = handles.get(&id).and_then(Weak::upgrade) {
            return token;
        }
        let token = Arc::new(());
        handles.insert(id, Arc::downgrade(&token));
        token
    }

    fn mark_detached(&self, ids: impl IntoIterator<Item = NodeId>) {
        self.detached.lock().extend(ids);
        self.collect_garbage();
    }

    /// Free every parentless subtree that no live handle can reach, along
    /// with its listeners
    fn collect_garbage(&self) {
        let candidates: Vec<NodeId> = self.detached.lock().drain().collect();
        let mut kept = Vec::new();
        let mut freed = Vec::new();

        {
            let mut nodes = self.nodes.write();
            let mut handles = self.handles.lock();
            for root in candidates {
                match nodes.get(&root) {
                    Some(data) if data.parent.is_none() && data.node_type != NodeType::Document => {}
                    _ => continue,
                }

                let subtree = subtree_ids(&nodes, root);
                let reachable = subtree.iter().any(|id| {
                    handles
                        .get(id)
                        .map(|token| token.strong_count() > 0)
                        .unwrap_or(false)
                });
                if reachable {
                    kept.push(root);
                    continue;
                }

                for id in &subtree {
                    nodes.remove(id);
                    handles.remove(id);
                }
                freed.extend(subtree);
            }
        }

        if !freed.is_empty() {
            let mut listeners = self.listeners.write();
            for id in &freed {
                listeners.remove(id);
            }
            tracing::trace!(nodes = freed.len(), "freed detached nodes");
        }
        self.detached.lock().extend(kept);
    }
}

/// A reference to a node in the DOM tree.
///
/// A detached subtree stays in storage while any handle into it is alive.
#[derive(Clone)]
pub struct Node {
    /// Node ID
    pub id: NodeId,
    tree: Arc<Tree>,
    _token: Arc<()>,
}

impl Node {
    /// Create a new node reference
    pub(crate) fn new(id: NodeId, tree: Arc<Tree>) -> Self {
        let token = tree.handle_token(id);
        Self {
            id,
            tree,
            _token: token,
        }
    }

    pub(crate) fn tree(&self) -> &Arc<Tree> {
        &self.tree
    }

    fn handle(&self, id: NodeId) -> Node {
        Node::new(id, self.tree.clone())
    }

    /// Whether both nodes live in the same document
    pub fn same_document(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree)
    }

    /// Get the node type
    pub fn node_type(&self) -> NodeType {
        self.tree
            .nodes
            .read()
            .get(&self.id)
            .map(|n| n.node_type)
            .unwrap_or(NodeType::Element)
    }

    /// Get the tag name (uppercase, like browsers)
    pub fn tag_name(&self) -> Option<String> {
        self.local_name().map(|t| t.to_uppercase())
    }

    /// Get the tag name in lowercase
    pub fn local_name(&self) -> Option<String> {
        self.tree
            .nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.tag_name.clone())
    }

    /// Character data of text, comment and processing-instruction nodes
    pub fn node_value(&self) -> Option<String> {
        self.tree
            .nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.text_content.clone())
    }

    /// Replace the character data of a text-like node
    pub fn set_node_value(&self, value: impl Into<String>) {
        if let Some(node) = self.tree.nodes.write().get_mut(&self.id) {
            if node.text_content.is_some() {
                node.text_content = Some(value.into());
            }
        }
    }

    /// Get text content
    pub fn text_content(&self) -> String {
        let nodes = self.tree.nodes.read();
        collect_text_content(&nodes, self.id)
    }

    /// Set text content (replaces all children with a text node)
    pub fn set_text_content(&self, content: impl Into<String>) {
        let content = content.into();
        let mut nodes = self.tree.nodes.write();

        let node_type = match nodes.get(&self.id) {
            Some(node) => node.node_type,
            None => return,
        };

        if !node_type.is_container() {
            if let Some(node) = nodes.get_mut(&self.id) {
                node.text_content = Some(content);
            }
            return;
        }

        let old_children = nodes
            .get_mut(&self.id)
            .map(|n| std::mem::take(&mut n.children))
            .unwrap_or_default();
        for child_id in &old_children {
            if let Some(child) = nodes.get_mut(child_id) {
                child.parent = None;
            }
        }

        if !content.is_empty() {
            let text_id = NodeId::new();
            let mut text_data = NodeData::text(content);
            text_data.parent = Some(self.id);
            nodes.insert(text_id, text_data);
            if let Some(parent) = nodes.get_mut(&self.id) {
                parent.children.push(text_id);
            }
        }
        drop(nodes);

        self.tree.mark_detached(old_children);
    }

    /// Get an attribute value
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.tree
            .nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.attributes.get(&name.to_lowercase()).cloned())
    }

    /// Set an attribute value
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        if let Some(node) = self.tree.nodes.write().get_mut(&self.id) {
            if node.node_type == NodeType::Element {
                node.attributes
                    .insert(name.into().to_lowercase(), value.into());
            }
        }
    }

    /// Remove an attribute
    pub fn remove_attribute(&self, name: &str) {
        if let Some(node) = self.tree.nodes.write().get_mut(&self.id) {
            node.attributes.remove(&name.to_lowercase());
        }
    }

    /// Check if has an attribute
    pub fn has_attribute(&self, name: &str) -> bool {
        self.tree
            .nodes
            .read()
            .get(&self.id)
            .map(|n| n.attributes.contains_key(&name.to_lowercase()))
            .unwrap_or(false)
    }

    /// Get all attributes
    pub fn attributes(&self) -> HashMap<String, String> {
        self.tree
            .nodes
            .read()
            .get(&self.id)
            .map(|n| n.attributes.clone())
            .unwrap_or_default()
    }

    /// Get element ID
    pub fn element_id(&self) -> Option<String> {
        self.get_attribute("id")
    }

    /// Get class list as vector
    pub fn class_list(&self) -> Vec<String> {
        self.get_attribute("class")
            .map(|c| c.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }

    /// Check if element has a class
    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().iter().any(|c| c == class)
    }

    /// Get parent node
    pub fn parent(&self) -> Option<Node> {
        self.tree
            .nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.parent)
            .map(|id| self.handle(id))
    }

    /// Get parent node if it is an element
    pub fn parent_element(&self) -> Option<Node> {
        self.parent().filter(|p| p.is_element())
    }

    /// Get child nodes
    pub fn children(&self) -> Vec<Node> {
        self.child_ids()
            .into_iter()
            .map(|id| self.handle(id))
            .collect()
    }

    /// Get child element nodes
    pub fn element_children(&self) -> Vec<Node> {
        self.children().into_iter().filter(Node::is_element).collect()
    }

    fn child_ids(&self) -> Vec<NodeId> {
        self.tree
            .nodes
            .read()
            .get(&self.id)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    /// Whether the node has any children
    pub fn has_children(&self) -> bool {
        self.tree
            .nodes
            .read()
            .get(&self.id)
            .map(|n| !n.children.is_empty())
            .unwrap_or(false)
    }

    /// Get first child
    pub fn first_child(&self) -> Option<Node> {
        self.tree
            .nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.children.first().copied())
            .map(|id| self.handle(id))
    }

    /// Get last child
    pub fn last_child(&self) -> Option<Node> {
        self.tree
            .nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.children.last().copied())
            .map(|id| self.handle(id))
    }

    /// Get next sibling
    pub fn next_sibling(&self) -> Option<Node> {
        self.sibling_at(1)
    }

    /// Get previous sibling
    pub fn prev_sibling(&self) -> Option<Node> {
        self.sibling_at(-1)
    }

    fn sibling_at(&self, offset: isize) -> Option<Node> {
        let nodes = self.tree.nodes.read();
        let parent_id = nodes.get(&self.id)?.parent?;
        let siblings = &nodes.get(&parent_id)?.children;
        let index = siblings.iter().position(|&id| id == self.id)?;
        let target = index.checked_add_signed(offset)?;
        siblings.get(target).map(|&id| self.handle(id))
    }

    /// Check if this is an element node
    pub fn is_element(&self) -> bool {
        self.node_type() == NodeType::Element
    }

    /// Check if this is a text node
    pub fn is_text(&self) -> bool {
        self.node_type() == NodeType::Text
    }

    /// Check if this is a comment node
    pub fn is_comment(&self) -> bool {
        self.node_type() == NodeType::Comment
    }

    /// Inclusive descendant check, like `Node.contains`
    pub fn contains(&self, other: &Node) -> bool {
        if !self.same_document(other) {
            return false;
        }
        let nodes = self.tree.nodes.read();
        let mut current = Some(other.id);
        while let Some(id) = current {
            if id == self.id {
                return true;
            }
            current = nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn check_insertable(&self, child: &Node) -> Result<()> {
        if !self.same_document(child) {
            return Err(Error::hierarchy("node belongs to another document"));
        }
        if !self.node_type().is_container() {
            return Err(Error::hierarchy("parent cannot have children"));
        }
        if child.node_type() == NodeType::Document {
            return Err(Error::hierarchy("a document cannot be inserted"));
        }
        if child.contains(self) {
            return Err(Error::hierarchy("the new child is an ancestor of the parent"));
        }
        Ok(())
    }

    /// Append a child node, detaching it from its previous parent.
    ///
    /// Appending a fragment moves the fragment's children instead.
    pub fn append_child(&self, child: &Node) -> Result<Node> {
        self.insert_before(child, None)
    }

    /// Insert `child` before `reference`, or at the end when `reference` is `None`
    pub fn insert_before(&self, child: &Node, reference: Option<&Node>) -> Result<Node> {
        self.check_insertable(child)?;
        if reference == Some(child) {
            return Ok(child.clone());
        }
        if let Some(reference) = reference {
            if reference.parent().as_ref() != Some(self) {
                return Err(Error::hierarchy("reference node is not a child of this node"));
            }
        }

        let moving = if child.node_type() == NodeType::DocumentFragment {
            child.child_ids()
        } else {
            vec![child.id]
        };

        let mut nodes = self.tree.nodes.write();
        for id in moving {
            detach(&mut nodes, id);

            if let Some(child_data) = nodes.get_mut(&id) {
                child_data.parent = Some(self.id);
            }
            if let Some(parent_data) = nodes.get_mut(&self.id) {
                let position = reference
                    .and_then(|r| parent_data.children.iter().position(|&c| c == r.id))
                    .unwrap_or(parent_data.children.len());
                parent_data.children.insert(position, id);
            }
        }

        Ok(child.clone())
    }

    /// Remove a child node
    pub fn remove_child(&self, child: &Node) -> Result<Node> {
        if child.parent().as_ref() != Some(self) {
            return Err(Error::hierarchy("node is not a child of this node"));
        }
        detach(&mut self.tree.nodes.write(), child.id);
        self.tree.mark_detached([child.id]);
        Ok(child.clone())
    }

    /// Detach this node from its parent, if any. Once no handle into the
    /// detached subtree remains, its storage is released.
    pub fn detach(&self) {
        detach(&mut self.tree.nodes.write(), self.id);
        self.tree.mark_detached([self.id]);
    }

    /// Element descendants in document order, excluding self
    pub fn descendant_elements(&self) -> Vec<Node> {
        let nodes = self.tree.nodes.read();
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = nodes
            .get(&self.id)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();

        while let Some(id) = stack.pop() {
            if let Some(data) = nodes.get(&id) {
                if data.node_type == NodeType::Element {
                    out.push(id);
                }
                stack.extend(data.children.iter().rev().copied());
            }
        }
        drop(nodes);

        out.into_iter().map(|id| self.handle(id)).collect()
    }

    /// Query selector - find first matching descendant element
    pub fn query_selector(&self, selector: &str) -> Result<Option<Node>> {
        let sel = Selector::parse(selector)?;
        Ok(self
            .descendant_elements()
            .into_iter()
            .find(|node| sel.matches(node)))
    }

    /// Query selector all - find all matching descendant elements in document order
    pub fn query_selector_all(&self, selector: &str) -> Result<Vec<Node>> {
        let sel = Selector::parse(selector)?;
        Ok(self
            .descendant_elements()
            .into_iter()
            .filter(|node| sel.matches(node))
            .collect())
    }

    /// Check if element matches a selector
    pub fn matches(&self, selector: &str) -> Result<bool> {
        let sel = Selector::parse(selector)?;
        Ok(self.is_element() && sel.matches(self))
    }

    /// Get closest inclusive ancestor element matching selector
    pub fn closest(&self, selector: &str) -> Result<Option<Node>> {
        let sel = Selector::parse(selector)?;
        let mut current = Some(self.clone()).filter(Node::is_element);
        while let Some(node) = current {
            if sel.matches(&node) {
                return Ok(Some(node));
            }
            current = node.parent_element();
        }
        Ok(None)
    }

    /// Get inner HTML
    pub fn inner_html(&self) -> String {
        let nodes = self.tree.nodes.read();
        nodes
            .get(&self.id)
            .map(|node| {
                node.children
                    .iter()
                    .map(|&id| serialize_node(&nodes, id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Get outer HTML
    pub fn outer_html(&self) -> String {
        let nodes = self.tree.nodes.read();
        serialize_node(&nodes, self.id)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("id", &self.id)
            .field("type", &self.node_type())
            .field("name", &self.local_name())
            .finish()
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Unlink a node from its parent's child list
fn detach(nodes: &mut HashMap<NodeId, NodeData>, id: NodeId) {
    let parent = nodes.get_mut(&id).and_then(|d| d.parent.take());
    if let Some(parent_id) = parent {
        if let Some(parent_data) = nodes.get_mut(&parent_id) {
            parent_data.children.retain(|&c| c != id);
        }
    }
}

/// IDs of `root` and all of its descendants
fn subtree_ids(nodes: &HashMap<NodeId, NodeData>, root: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        if let Some(data) = nodes.get(&id) {
            stack.extend(data.children.iter().copied());
        }
        out.push(id);
    }
    out
}

/// Recursively collect text content
fn collect_text_content(nodes: &HashMap<NodeId, NodeData>, node_id: NodeId) -> String {
    match nodes.get(&node_id) {
        Some(node) => match node.node_type {
            NodeType::Text | NodeType::Comment | NodeType::ProcessingInstruction => {
                node.text_content.clone().unwrap_or_default()
            }
            NodeType::Element | NodeType::DocumentFragment => node
                .children
                .iter()
                .filter(|id| {
                    nodes
                        .get(*id)
                        .map(|c| !matches!(c.node_type, NodeType::Comment | NodeType::ProcessingInstruction))
                        .unwrap_or(false)
                })
                .map(|&child_id| collect_text_content(nodes, child_id))
                .collect(),
            NodeType::Document | NodeType::DocumentType => String::new(),
        },
        None => String::new(),
    }
}

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Serialize a node to HTML string
fn serialize_node(nodes: &HashMap<NodeId, NodeData>, node_id: NodeId) -> String {
    let Some(node) = nodes.get(&node_id) else {
        return String::new();
    };

    match node.node_type {
        NodeType::Text => html_escape(node.text_content.as_deref().unwrap_or(""), false),
        NodeType::Comment => {
            format!("<!--{}-->", node.text_content.as_deref().unwrap_or(""))
        }
        NodeType::ProcessingInstruction => {
            format!("<?{}>", node.text_content.as_deref().unwrap_or(""))
        }
        NodeType::Element => {
            let tag = node.tag_name.as_deref().unwrap_or("div");
            let mut names: Vec<&String> = node.attributes.keys().collect();
            names.sort();
            let attrs: String = names
                .into_iter()
                .map(|k| {
                    let v = &node.attributes[k];
                    if v.is_empty() {
                        format!(" {}", k)
                    } else {
                        format!(" {}=\"{}\"", k, html_escape(v, true))
                    }
                })
                .collect();

            if VOID_ELEMENTS.contains(&tag) {
                format!("<{}{}>", tag, attrs)
            } else {
                let children: String = node
                    .children
                    .iter()
                    .map(|&id| serialize_node(nodes, id))
                    .collect();
                format!("<{}{}>{}</{}>", tag, attrs, children, tag)
            }
        }
        NodeType::Document | NodeType::DocumentFragment => node
            .children
            .iter()
            .map(|&id| serialize_node(nodes, id))
            .collect(),
        NodeType::DocumentType => "<!DOCTYPE html>".to_string(),
    }
}

/// Escape HTML special characters
fn html_escape(s: &str, attribute: bool) -> String {
    let escaped = s
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;");
    if attribute {
        escaped.replace('"', "&quot;")
    } else {
        escaped
    }
}
