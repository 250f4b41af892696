// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Inline style record
//!
//! The `style` attribute is the single source of truth, so reads always see
//! the latest assignment and serialization needs no extra step.

use super::node::Node;

/// Convert a scripting-style property name (`backgroundColor`) to its CSS
/// form (`background-color`). Names already in CSS form pass through.
pub fn css_property_name(name: &str) -> String {
    if name == "cssFloat" {
        return "float".to_string();
    }
    if name.starts_with("--") {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse `a: b; c: d` into ordered declarations. Semicolons inside quotes or
/// parentheses belong to the value.
pub fn parse_declarations(text: &str) -> Vec<(String, String)> {
    split_declarations(text)
        .into_iter()
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim();
            let value = value.trim();
            (!name.is_empty() && !value.is_empty())
                .then(|| (name.to_lowercase(), value.to_string()))
        })
        .collect()
}

fn split_declarations(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut escaped = false;
    let mut start = 0;

    for (i, c) in text.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, c) {
            (_, '\\') => escaped = true,
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}

fn serialize_declarations(declarations: &[(String, String)]) -> String {
    declarations
        .iter()
        .map(|(name, value)| format!("{}: {};", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

impl Node {
    /// Declarations of the inline style, in source order
    pub fn style_declarations(&self) -> Vec<(String, String)> {
        self.get_attribute("style")
            .map(|s| parse_declarations(&s))
            .unwrap_or_default()
    }

    /// Read one inline style property
    pub fn style_property(&self, name: &str) -> Option<String> {
        let name = css_property_name(name);
        self.style_declarations()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }

    /// Assign one inline style property. An empty value removes it.
    pub fn set_style_property(&self, name: &str, value: &str) {
        if !self.is_element() {
            return;
        }

        let name = css_property_name(name);
        let value = value.trim();
        let mut declarations = self.style_declarations();

        if value.is_empty() {
            declarations.retain(|(n, _)| *n != name);
        } else if let Some(existing) = declarations.iter_mut().find(|(n, _)| *n == name) {
            existing.1 = value.to_string();
        } else {
            declarations.push((name, value.to_string()));
        }

        if declarations.is_empty() {
            self.remove_attribute("style");
        } else {
            self.set_attribute("style", serialize_declarations(&declarations));
        }
    }

    /// Remove one inline style property
    pub fn remove_style_property(&self, name: &str) {
        self.set_style_property(name, "");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{parse_html, Document};

    #[test]
    fn test_property_names() {
        assert_eq!(css_property_name("color"), "color");
        assert_eq!(css_property_name("backgroundColor"), "background-color");
        assert_eq!(css_property_name("border-top-width"), "border-top-width");
        assert_eq!(css_property_name("cssFloat"), "float");
        assert_eq!(css_property_name("--mainColor"), "--mainColor");
    }

    #[test]
    fn test_parse_declarations() {
        let decls = parse_declarations("color: red;; Display:none ; bogus");
        assert_eq!(
            decls,
            vec![
                ("color".to_string(), "red".to_string()),
                ("display".to_string(), "none".to_string()),
            ]
        );
    }

    #[test]
    fn test_set_style_property() {
        let doc = Document::new();
        let div = doc.create_element("div");

        div.set_style_property("color", "red");
        div.set_style_property("backgroundColor", "blue");
        div.set_style_property("color", "green");
        assert_eq!(div.style_property("color").as_deref(), Some("green"));
        assert_eq!(div.style_property("background-color").as_deref(), Some("blue"));
        assert_eq!(
            div.get_attribute("style").as_deref(),
            Some("color: green; background-color: blue;")
        );

        div.remove_style_property("color");
        div.remove_style_property("backgroundColor");
        assert!(!div.has_attribute("style"));
    }

    #[test]
    fn test_parsed_inline_style_is_live() {
        let doc = parse_html("<p style='margin: 0; color: red'>x</p>").unwrap();
        let p = doc.query_selector("p").unwrap().unwrap();
        assert_eq!(p.style_property("margin").as_deref(), Some("0"));
        p.set_style_property("margin", "4px");
        assert_eq!(p.style_declarations()[0], ("margin".to_string(), "4px".to_string()));
    }

    #[test]
    fn test_values_with_semicolons() {
        let doc = Document::new();
        let div = doc.create_element("div");
        let image = "url(data:image/png;base64,AAA)";

        div.set_style_property("backgroundImage", image);
        div.set_style_property("fontFamily", "\"a;b\", serif");
        div.set_style_property("color", "red");

        assert_eq!(div.style_property("backgroundImage").as_deref(), Some(image));
        assert_eq!(div.style_property("font-family").as_deref(), Some("\"a;b\", serif"));
        assert_eq!(div.style_declarations().len(), 3);

        div.set_style_property("color", "blue");
        assert_eq!(div.style_property("background-image").as_deref(), Some(image));
    }
}
