// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever
//!
//! Whitespace-only text and comments are kept, as a browser's parser keeps
//! them.

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::capabilities::Capabilities;
use super::document::Document;
use super::node::Node;
use crate::error::Result;

/// Parse HTML string into a complete Document with the modern host profile
pub fn parse_html(html: &str) -> Result<Document> {
    parse_html_with(html, Capabilities::modern())
}

/// Parse HTML string into a complete Document exposing the given API variants
pub fn parse_html_with(html: &str, capabilities: Capabilities) -> Result<Document> {
    let dom = parse_rcdom(html)?;
    let doc = Document::with_capabilities(capabilities);

    let converter = DomConverter::new(&doc);
    converter.convert_children(&dom.document, &doc.root())?;
    doc.mark_ready();

    tracing::trace!(bytes = html.len(), "parsed document");
    Ok(doc)
}

/// Parse HTML body content into a fragment owned by `doc`
pub fn parse_fragment(html: &str, doc: &Document) -> Result<Node> {
    let dom = parse_rcdom(&format!("<body>{}</body>", html))?;
    let fragment = doc.create_document_fragment();

    if let Some(body) = find_body(&dom.document) {
        DomConverter::new(doc).convert_children(&body, &fragment)?;
    }

    Ok(fragment)
}

fn parse_rcdom(html: &str) -> Result<RcDom> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())?;
    Ok(dom)
}

fn find_body(handle: &Handle) -> Option<Handle> {
    for child in handle.children.borrow().iter() {
        if let RcNodeData::Element { ref name, .. } = child.data {
            if &*name.local == "body" {
                return Some(child.clone());
            }
        }
        if let Some(found) = find_body(child) {
            return Some(found);
        }
    }
    None
}

/// Converts html5ever DOM to our DOM
struct DomConverter<'a> {
    doc: &'a Document,
}

impl<'a> DomConverter<'a> {
    fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    fn convert_children(&self, handle: &Handle, parent: &Node) -> Result<()> {
        for child in handle.children.borrow().iter() {
            if let Some(node) = self.convert_node(child)? {
                parent.append_child(&node)?;
            }
        }
        Ok(())
    }

    fn convert_node(&self, handle: &Handle) -> Result<Option<Node>> {
        let node = match handle.data {
            // Skip document node, we already have one
            RcNodeData::Document => return Ok(None),
            RcNodeData::Doctype { .. } => self.doc.create_doctype(),
            RcNodeData::Text { ref contents } => self.doc.create_text_node(&contents.borrow()),
            RcNodeData::Comment { ref contents } => self.doc.create_comment(contents),
            RcNodeData::ProcessingInstruction {
                ref target,
                ref contents,
            } => self
                .doc
                .create_processing_instruction(&format!("{} {}", target, contents)),
            RcNodeData::Element {
                ref name,
                ref attrs,
                ..
            } => {
                let element = self.doc.create_element(&name.local);
                for attr in attrs.borrow().iter() {
                    element.set_attribute(attr.name.local.to_string(), attr.value.to_string());
                }
                element
            }
        };

        self.convert_children(handle, &node)?;
        Ok(Some(node))
    }
}
