// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Short-named DOM helpers
//!
//! [`Dom`] wraps one default document and forwards every call to the host
//! DOM. Where a browser API let callers pass either a node or a selector
//! string, there are two entry points here: one taking a node
//! (`impl Into<Option<&Node>>`, so `None` is the missing target) and one
//! taking a selector resolved against the default document.

mod config;
mod ready;
mod strategy;

pub use config::DomConfig;
pub use ready::ReadyProvider;
pub use strategy::{EventBinding, IdLookup};

use crate::dom::{Document, EventHandler, Node, NodeType};
use crate::error::{Error, Result};

/// DOM facade bound to a default document
#[derive(Debug, Clone)]
pub struct Dom {
    document: Document,
    config: DomConfig,
    id_lookup: IdLookup,
    event_binding: EventBinding,
}

impl Dom {
    /// Create a facade over `document`, probing its host profile
    pub fn new(document: Document) -> Result<Self> {
        Self::with_config(document, DomConfig::default())
    }

    /// Create a facade with explicit configuration.
    ///
    /// Fails with [`Error::Capability`] when no identifier lookup or no event
    /// registration variant is usable.
    pub fn with_config(document: Document, config: DomConfig) -> Result<Self> {
        let capabilities = document.capabilities();

        let id_lookup = match config.id_lookup {
            Some(forced) if forced.is_supported(&capabilities) => forced,
            Some(forced) => {
                return Err(Error::capability(format!("{:?} lookup is not available", forced)))
            }
            None => IdLookup::probe(&capabilities)?,
        };

        let event_binding = match config.event_binding {
            Some(forced) if forced.is_supported(&capabilities) => forced,
            Some(forced) => {
                return Err(Error::capability(format!(
                    "{:?} event binding is not available",
                    forced
                )))
            }
            None => EventBinding::probe(&capabilities)?,
        };

        tracing::debug!(?id_lookup, ?event_binding, "dom facade initialized");

        Ok(Self {
            document,
            config,
            id_lookup,
            event_binding,
        })
    }

    /// The default document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Active configuration
    pub fn config(&self) -> &DomConfig {
        &self.config
    }

    /// Identifier lookup chosen at construction
    pub fn id_lookup(&self) -> IdLookup {
        self.id_lookup
    }

    /// Event registration chosen at construction
    pub fn event_binding(&self) -> EventBinding {
        self.event_binding
    }

    fn root(&self) -> Node {
        self.document.root()
    }

    // Selection

    /// First element matching `selector` in the default document
    pub fn select(&self, selector: &str) -> Result<Option<Node>> {
        self.select_in(&self.root(), selector)
    }

    /// First descendant of `target` matching `selector`
    pub fn select_in<'a>(
        &self,
        target: impl Into<Option<&'a Node>>,
        selector: &str,
    ) -> Result<Option<Node>> {
        let target = target.into().ok_or_else(Error::no_element)?;
        let found = target.query_selector(selector)?;
        tracing::trace!(selector, found = found.is_some(), "select");
        Ok(found)
    }

    /// All elements matching `selector` in the default document, in document order
    pub fn select_all(&self, selector: &str) -> Result<Vec<Node>> {
        self.select_all_in(&self.root(), selector)
    }

    /// All descendants of `target` matching `selector`, in document order
    pub fn select_all_in<'a>(
        &self,
        target: impl Into<Option<&'a Node>>,
        selector: &str,
    ) -> Result<Vec<Node>> {
        let target = target.into().ok_or_else(Error::no_element)?;
        let found = target.query_selector_all(selector)?;
        tracing::trace!(selector, count = found.len(), "select_all");
        Ok(found)
    }

    /// Matches of `selector` whose parent is exactly `target`
    pub fn children<'a>(
        &self,
        target: impl Into<Option<&'a Node>>,
        selector: &str,
    ) -> Result<Vec<Node>> {
        let target = target.into();
        let matches = self.select_all_in(target, selector)?;
        Ok(matches
            .into_iter()
            .filter(|node| node.parent().as_ref() == target)
            .collect())
    }

    /// Resolve an identifier with the lookup chosen at construction
    pub fn by_id(&self, id: &str) -> Result<Option<Node>> {
        self.id_lookup.resolve(&self.document, id)
    }

    /// The default document's `<body>`
    pub fn body(&self) -> Option<Node> {
        self.document.body()
    }

    // Creation

    /// New unattached element in the default document
    pub fn create_element(&self, tag: &str) -> Node {
        self.create_element_in(tag, &self.document)
    }

    /// New unattached element in `doc`
    pub fn create_element_in(&self, tag: &str, doc: &Document) -> Node {
        doc.create_element(tag)
    }

    /// New unattached text node in the default document
    pub fn create_text(&self, text: &str) -> Node {
        self.create_text_in(text, &self.document)
    }

    /// New unattached text node in `doc`
    pub fn create_text_in(&self, text: &str, doc: &Document) -> Node {
        doc.create_text_node(text)
    }

    /// Fragment in the default document holding `nodes` in order
    pub fn create_fragment<I>(&self, nodes: I) -> Result<Node>
    where
        I: IntoIterator<Item = Node>,
    {
        self.create_fragment_in(nodes, &self.document)
    }

    /// Fragment in `doc` holding `nodes` in order. Each node leaves its
    /// previous parent.
    pub fn create_fragment_in<I>(&self, nodes: I, doc: &Document) -> Result<Node>
    where
        I: IntoIterator<Item = Node>,
    {
        let fragment = doc.create_document_fragment();
        for node in nodes {
            fragment.append_child(&node)?;
        }
        Ok(fragment)
    }

    // Cleanup

    /// Remove every child of `target`
    pub fn empty(&self, target: &Node) {
        while let Some(child) = target.first_child() {
            child.detach();
        }
    }

    /// Empty every element matching `selector` in the default document
    pub fn empty_matching(&self, selector: &str) -> Result<()> {
        for node in self.select_all(selector)? {
            self.empty(&node);
        }
        Ok(())
    }

    /// Detach `target` from its parent; no-op when it has none
    pub fn remove(&self, target: &Node) {
        target.detach();
    }

    /// Remove every element matching `selector` in the default document
    pub fn remove_matching(&self, selector: &str) -> Result<()> {
        for node in self.select_all(selector)? {
            self.remove(&node);
        }
        Ok(())
    }

    /// Drop comments and whitespace-only text from the subtree of `node`,
    /// depth first
    pub fn clean(&self, node: &Node) -> Node {
        for child in node.children() {
            match child.node_type() {
                NodeType::Comment => self.remove(&child),
                NodeType::Text if is_blank(&child) => self.remove(&child),
                NodeType::Element => {
                    self.clean(&child);
                }
                _ => {}
            }
        }
        node.clone()
    }

    // Styles

    /// Assign each `(property, value)` pair onto the inline style of `target`, in order
    pub fn style<'a, I, K, V>(&self, target: impl Into<Option<&'a Node>>, style: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let target = target.into().ok_or_else(Error::no_element)?;
        for (property, value) in style {
            target.set_style_property(property.as_ref(), value.as_ref());
        }
        Ok(())
    }

    /// Style every element matching `selector`; zero matches is a no-op
    pub fn style_matching<I, K, V>(&self, selector: &str, style: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let style: Vec<(String, String)> = style
            .into_iter()
            .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
            .collect();
        for node in self.select_all(selector)? {
            self.style(&node, style.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        }
        Ok(())
    }

    // Events

    /// Register `handler` for `event` on `target`
    pub fn add_listener<'a>(
        &self,
        target: impl Into<Option<&'a Node>>,
        event: &str,
        handler: &EventHandler,
    ) -> Result<()> {
        let target = target.into().ok_or_else(Error::no_element)?;
        tracing::trace!(event, binding = ?self.event_binding, "add listener");
        self.event_binding
            .add(target, event, handler, self.config.use_capture)
    }

    /// Unregister `handler` for `event` on `target`
    pub fn remove_listener<'a>(
        &self,
        target: impl Into<Option<&'a Node>>,
        event: &str,
        handler: &EventHandler,
    ) -> Result<()> {
        let target = target.into().ok_or_else(Error::no_element)?;
        tracing::trace!(event, binding = ?self.event_binding, "remove listener");
        self.event_binding
            .remove(target, event, handler, self.config.use_capture)
    }

    /// Register on the first element matching `selector`
    pub fn add_listener_matching(
        &self,
        selector: &str,
        event: &str,
        handler: &EventHandler,
    ) -> Result<()> {
        let target = self.select(selector)?;
        self.add_listener(target.as_ref(), event, handler)
    }

    /// Unregister from the first element matching `selector`
    pub fn remove_listener_matching(
        &self,
        selector: &str,
        event: &str,
        handler: &EventHandler,
    ) -> Result<()> {
        let target = self.select(selector)?;
        self.remove_listener(target.as_ref(), event, handler)
    }

    // Traversal

    /// Walk up from `element` (or its parent when `include_self` is false)
    /// and return the first node found among the `selector` matches of its
    /// own parent. Nodes without a parent are never tested.
    pub fn find_ancestor(
        &self,
        element: &Node,
        selector: &str,
        include_self: bool,
    ) -> Result<Option<Node>> {
        let mut current = if include_self {
            Some(element.clone())
        } else {
            element.parent()
        };

        while let Some(node) = current {
            let Some(parent) = node.parent() else {
                break;
            };
            if self.select_all_in(&parent, selector)?.contains(&node) {
                return Ok(Some(node));
            }
            current = Some(parent);
        }

        Ok(None)
    }

    // Readiness

    /// Run `callback` once the document is ready, via the configured provider
    pub fn ready<F>(&self, callback: F)
    where
        F: FnOnce() + Send + 'static,
    {
        match &self.config.ready_provider {
            Some(provider) => provider.when_ready(Box::new(callback)),
            None => ReadyProvider::when_ready(&self.document, Box::new(callback)),
        }
    }
}

/// Text with no non-whitespace character. U+FEFF counts as whitespace, as
/// it does for `\s` in browser regular expressions.
fn is_blank(node: &Node) -> bool {
    node.node_value()
        .map(|text| text.chars().all(|c| c.is_whitespace() || c == '\u{FEFF}'))
        .unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::dom::{parse_html, parse_html_with, Capabilities, ReadyCallback, LEGACY_PREFIX};

    fn page() -> Dom {
        let html = r#"<html><head><title>t</title></head><body>
            <div id="main" class="container">
                <ul id="list">
                    <li class="item">one</li>
                    <li class="item"><span class="item">nested</span></li>
                    <li class="item last">three</li>
                </ul>
            </div>
            <p class="note">note</p>
        </body></html>"#;
        Dom::new(parse_html(html).unwrap()).unwrap()
    }

    fn counter() -> (Arc<AtomicUsize>, EventHandler) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        let handler = EventHandler::new(move |_| {
            inner.fetch_add(1, Ordering::SeqCst);
        });
        (count, handler)
    }

    #[test]
    fn test_select_is_first_of_select_all() {
        let dom = page();
        let all = dom.select_all(".item").unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(dom.select(".item").unwrap(), all.first().cloned());
        assert_eq!(dom.select(".missing").unwrap(), None);
        assert!(dom.select_all(".missing").unwrap().is_empty());
    }

    #[test]
    fn test_select_in_scopes_to_descendants() {
        let dom = page();
        let list = dom.by_id("list").unwrap().unwrap();
        let items = dom.select_all_in(&list, "li").unwrap();
        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|item| list.contains(item) && *item != list));
        assert!(dom.select_in(&list, "p").unwrap().is_none());
    }

    #[test]
    fn test_missing_target_is_invalid_argument() {
        let dom = page();
        assert!(dom.select_in(None, "div").unwrap_err().is_invalid_argument());
        assert!(dom.select_all_in(None, "div").unwrap_err().is_invalid_argument());
        assert!(dom.children(None, "div").unwrap_err().is_invalid_argument());
        assert!(dom
            .style(None, std::iter::empty::<(&str, &str)>())
            .unwrap_err()
            .is_invalid_argument());

        let (_, handler) = counter();
        assert!(dom.add_listener(None, "click", &handler).unwrap_err().is_invalid_argument());
        assert!(dom
            .add_listener_matching("#nope", "click", &handler)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_malformed_selector_passes_through() {
        let dom = page();
        let err = dom.select("li[").unwrap_err();
        assert!(err.is_selector());
        assert!(dom.style_matching("::", [("color", "red")]).unwrap_err().is_selector());
    }

    #[test]
    fn test_children_filters_direct_children() {
        let dom = page();
        let list = dom.by_id("list").unwrap().unwrap();
        let all = dom.select_all_in(&list, ".item").unwrap();
        let direct = dom.children(&list, ".item").unwrap();

        assert_eq!(all.len(), 4);
        assert_eq!(direct.len(), 3);
        assert!(direct.iter().all(|n| all.contains(n)));
        assert!(direct.iter().all(|n| n.parent().as_ref() == Some(&list)));
    }

    #[test]
    fn test_by_id_and_body() {
        let dom = page();
        assert_eq!(dom.id_lookup(), IdLookup::ElementById);
        let main = dom.by_id("main").unwrap().unwrap();
        assert!(main.has_class("container"));
        assert!(dom.by_id("absent").unwrap().is_none());
        assert_eq!(dom.body().unwrap().local_name().as_deref(), Some("body"));
    }

    #[test]
    fn test_by_id_legacy_variants() {
        let html = "<form name='login'></form><layer id='nav'></layer>";

        let ie = Dom::new(parse_html_with(html, Capabilities::legacy_ie()).unwrap()).unwrap();
        assert_eq!(ie.id_lookup(), IdLookup::AllCollection);
        assert_eq!(ie.event_binding(), EventBinding::Legacy);
        assert!(ie.by_id("login").unwrap().is_some());

        let layered = Capabilities::netscape4().with_attach_event(true);
        let ns = Dom::new(parse_html_with(html, layered).unwrap()).unwrap();
        assert_eq!(ns.id_lookup(), IdLookup::Layers);
        assert!(ns.by_id("nav").unwrap().is_some());
        assert!(ns.by_id("login").unwrap().is_none());
    }

    #[test]
    fn test_initialization_fails_without_capabilities() {
        let no_ids = Capabilities::modern()
            .with_element_by_id(false)
            .with_all_collection(false);
        let err = Dom::new(Document::with_capabilities(no_ids)).unwrap_err();
        assert_eq!(err, Error::capability("No getElementById alternative"));

        let err = Dom::new(Document::with_capabilities(Capabilities::netscape4())).unwrap_err();
        assert_eq!(err, Error::capability("No addEventListener alternative"));

        let forced = DomConfig::new().event_binding(EventBinding::Legacy);
        assert!(Dom::with_config(Document::new(), forced).unwrap_err().is_capability());
    }

    #[test]
    fn test_create_nodes() {
        let dom = page();
        let div = dom.create_element("DIV");
        assert_eq!(div.local_name().as_deref(), Some("div"));
        assert!(div.parent().is_none());
        assert!(dom.document().owns(&div));

        let text = dom.create_text("hello");
        assert_eq!(text.node_type(), NodeType::Text);
        assert_eq!(text.node_value().as_deref(), Some("hello"));

        let other = Document::new();
        let foreign = dom.create_element_in("span", &other);
        assert!(other.owns(&foreign));
        assert!(!dom.document().owns(&foreign));
        assert!(other.owns(&dom.create_text_in("x", &other)));
    }

    #[test]
    fn test_create_fragment_preserves_order_and_detaches() {
        let dom = page();
        let list = dom.by_id("list").unwrap().unwrap();
        let items = dom.children(&list, "li").unwrap();

        let fragment = dom.create_fragment(items.clone()).unwrap();
        assert_eq!(fragment.node_type(), NodeType::DocumentFragment);
        assert_eq!(fragment.children(), items);
        assert!(items.iter().all(|n| n.parent().as_ref() == Some(&fragment)));
        assert!(dom.select_all_in(&list, "li").unwrap().is_empty());

        let empty = dom.create_fragment(Vec::new()).unwrap();
        assert!(!empty.has_children());
    }

    #[test]
    fn test_create_fragment_rejects_foreign_nodes() {
        let dom = page();
        let other = Document::new();
        let foreign = other.create_element("p");
        let err = dom.create_fragment(vec![foreign]).unwrap_err();
        assert!(matches!(err, Error::Hierarchy(_)));
    }

    #[test]
    fn test_empty_is_idempotent() {
        let dom = page();
        let list = dom.by_id("list").unwrap().unwrap();
        let first = list.first_child().unwrap();

        dom.empty(&list);
        assert!(!list.has_children());
        assert!(first.parent().is_none());

        dom.empty(&list);
        assert!(!list.has_children());
    }

    #[test]
    fn test_empty_and_remove_matching() {
        let dom = page();
        dom.empty_matching("li").unwrap();
        assert!(dom
            .select_all("li")
            .unwrap()
            .iter()
            .all(|li| !li.has_children()));

        dom.remove_matching("li").unwrap();
        assert!(dom.select_all("li").unwrap().is_empty());
        dom.remove_matching("li").unwrap();
    }

    #[test]
    fn test_remove_detached_is_noop() {
        let dom = page();
        let div = dom.create_element("div");
        dom.remove(&div);
        assert!(div.parent().is_none());

        let note = dom.select(".note").unwrap().unwrap();
        dom.remove(&note);
        assert!(note.parent().is_none());
        assert!(dom.select(".note").unwrap().is_none());
    }

    #[test]
    fn test_clean() {
        let dom = page();
        let doc = dom.document();
        let node = doc.create_element("div");
        let tag = doc.create_element("b");
        let hi = doc.create_text_node("hi");
        for child in [
            doc.create_comment("x"),
            doc.create_text_node("  "),
            tag.clone(),
            hi.clone(),
        ] {
            node.append_child(&child).unwrap();
        }

        let returned = dom.clean(&node);
        assert_eq!(returned, node);
        assert_eq!(node.children(), vec![tag, hi]);
    }

    #[test]
    fn test_clean_recurses_into_elements() {
        let doc = parse_html("<div id='d'>\n  <p> <!-- c --> <em>x</em>\t</p>\n</div>").unwrap();
        let dom = Dom::new(doc).unwrap();
        let div = dom.by_id("d").unwrap().unwrap();

        dom.clean(&div);
        assert_eq!(div.inner_html(), "<p><em>x</em></p>");
    }

    #[test]
    fn test_style() {
        let dom = page();
        let note = dom.select(".note").unwrap().unwrap();
        dom.style(&note, [("color", "red"), ("display", "none")]).unwrap();
        assert_eq!(note.style_property("color").as_deref(), Some("red"));
        assert_eq!(note.style_property("display").as_deref(), Some("none"));

        dom.style(&note, vec![("backgroundColor".to_string(), "blue".to_string())])
            .unwrap();
        assert_eq!(note.style_property("background-color").as_deref(), Some("blue"));
    }

    #[test]
    fn test_style_matching() {
        let dom = page();
        dom.style_matching("li", [("fontWeight", "bold")]).unwrap();
        assert!(dom
            .select_all("li")
            .unwrap()
            .iter()
            .all(|li| li.style_property("font-weight").as_deref() == Some("bold")));

        dom.style_matching(".nothing-here", [("color", "red")]).unwrap();
    }

    #[test]
    fn test_standard_listeners() {
        let dom = page();
        assert_eq!(dom.event_binding(), EventBinding::Standard);
        let note = dom.select(".note").unwrap().unwrap();
        let (count, handler) = counter();

        dom.add_listener(&note, "click", &handler).unwrap();
        note.dispatch_event("click");
        assert_eq!(count.load(Ordering::SeqCst), 1);

        dom.remove_listener(&note, "click", &handler).unwrap();
        note.dispatch_event("click");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_listeners_register_in_capture_phase() {
        let dom = page();
        let list = dom.by_id("list").unwrap().unwrap();
        let span = dom.select("span").unwrap().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let s = seen.clone();
        let outer = EventHandler::new(move |e| s.lock().unwrap().push(("list", e.phase())));
        let s = seen.clone();
        let inner = EventHandler::new(move |e| s.lock().unwrap().push(("span", e.phase())));

        dom.add_listener(&list, "click", &outer).unwrap();
        span.add_event_listener("click", &inner, false).unwrap();
        span.dispatch_event("click");

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, "list");
        assert_eq!(seen[1].0, "span");
    }

    #[test]
    fn test_legacy_listeners() {
        let doc = parse_html_with("<a id='go' name='go'>x</a>", Capabilities::legacy_ie()).unwrap();
        let dom = Dom::new(doc).unwrap();
        let (count, handler) = counter();

        dom.add_listener_matching("#go", "click", &handler).unwrap();
        let link = dom.by_id("go").unwrap().unwrap();
        link.dispatch_event("click");
        assert_eq!(count.load(Ordering::SeqCst), 1);

        dom.remove_listener_matching("#go", "click", &handler).unwrap();
        link.dispatch_event("click");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_forced_legacy_config() {
        let caps = Capabilities::modern().with_attach_event(true);
        let doc = parse_html_with("<a id='go'>x</a>", caps).unwrap();
        let dom = Dom::with_config(doc, DomConfig::legacy()).unwrap();
        assert_eq!(dom.event_binding(), EventBinding::Legacy);

        let link = dom.by_id("go").unwrap().unwrap();
        let (count, handler) = counter();
        dom.add_listener(&link, "click", &handler).unwrap();
        link.dispatch_event("click");
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_find_ancestor() {
        let dom = page();
        let span = dom.select("span").unwrap().unwrap();

        let container = dom.find_ancestor(&span, ".container", false).unwrap().unwrap();
        assert_eq!(container.element_id().as_deref(), Some("main"));

        let li = dom.find_ancestor(&span, "li", false).unwrap().unwrap();
        assert_eq!(li, span.parent().unwrap());

        assert_eq!(dom.find_ancestor(&span, ".item", false).unwrap(), Some(li));
        assert_eq!(dom.find_ancestor(&span, ".item", true).unwrap(), Some(span.clone()));
        assert_eq!(dom.find_ancestor(&span, "table", false).unwrap(), None);
    }

    #[test]
    fn test_find_ancestor_never_tests_parentless_nodes() {
        let dom = page();
        let detached = dom.create_element("section");
        let child = dom.create_element("p");
        detached.append_child(&child).unwrap();

        assert_eq!(dom.find_ancestor(&child, "section", false).unwrap(), None);
        assert_eq!(dom.find_ancestor(&detached, "section", true).unwrap(), None);
        assert_eq!(dom.find_ancestor(&child, "p", true).unwrap(), Some(child.clone()));
    }

    #[test]
    fn test_ready_uses_document_by_default() {
        let doc = Document::new();
        let dom = Dom::new(doc.clone()).unwrap();
        let count = Arc::new(AtomicUsize::new(0));
        assert!(dom.body().is_none());

        let c = count.clone();
        dom.ready(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(count.load(Ordering::SeqCst), 0);
        doc.mark_ready();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    struct RecordingProvider(Mutex<Vec<ReadyCallback>>);

    impl ReadyProvider for RecordingProvider {
        fn when_ready(&self, callback: ReadyCallback) {
            self.0.lock().unwrap().push(callback);
        }
    }

    #[test]
    fn test_ready_forwards_to_provider() {
        let provider = Arc::new(RecordingProvider(Mutex::new(Vec::new())));
        let config = DomConfig::new().ready_provider(provider.clone());
        let dom = Dom::with_config(parse_html("<p></p>").unwrap(), config).unwrap();
        let count = Arc::new(AtomicUsize::new(0));

        let c = count.clone();
        dom.ready(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        assert_eq!(count.load(Ordering::SeqCst), 0);

        for callback in provider.0.lock().unwrap().drain(..) {
            callback();
        }
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_repeated_empty_releases_nodes() {
        let dom = Dom::new(parse_html("<div id='d'></div>").unwrap()).unwrap();
        let div = dom.by_id("d").unwrap().unwrap();
        let before = dom.document().node_count();

        for _ in 0..1000 {
            div.append_child(&dom.create_element("span")).unwrap();
            dom.empty(&div);
        }
        assert!(dom.document().node_count() <= before + 1);
    }

    #[test]
    fn test_style_value_with_semicolon() {
        let dom = page();
        let note = dom.select(".note").unwrap().unwrap();
        let image = "url(data:image/png;base64,AAA)";
        dom.style(&note, [("backgroundImage", image)]).unwrap();
        assert_eq!(note.style_property("backgroundImage").as_deref(), Some(image));
        assert_eq!(
            note.style_declarations(),
            vec![("background-image".to_string(), image.to_string())]
        );
    }

    #[test]
    fn test_legacy_registration_uses_host_prefix() {
        let doc = parse_html_with("<a id='go'>x</a>", Capabilities::legacy_ie()).unwrap();
        let dom = Dom::new(doc).unwrap();
        let link = dom.by_id("go").unwrap().unwrap();
        let (count, handler) = counter();

        dom.add_listener(&link, "click", &handler).unwrap();
        assert_eq!(link.listener_count(), 1);
        assert_eq!(link.dispatch_event("click"), 1);

        link.detach_event(&format!("{}click", LEGACY_PREFIX), &handler).unwrap();
        assert_eq!(link.listener_count(), 0);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_clean_drops_byte_order_mark_text() {
        let dom = page();
        let div = dom.create_element("div");
        div.append_child(&dom.create_text("\u{FEFF}")).unwrap();
        div.append_child(&dom.create_text(" \u{FEFF}\u{A0}\n")).unwrap();
        div.append_child(&dom.create_text("\u{FEFF}x")).unwrap();

        dom.clean(&div);
        assert_eq!(div.children().len(), 1);
        assert_eq!(div.text_content(), "\u{FEFF}x");
    }
}
