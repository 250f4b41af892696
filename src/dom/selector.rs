// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSS Selector parsing and matching
//!
//! Covers compound selectors, the four combinators and selector lists.
//! Matching runs right to left against the full ancestor chain, so a query
//! rooted at an element may match through ancestors outside of it, as
//! `querySelectorAll` does in browsers.

use crate::error::{Error, Result};

use super::node::{Node, NodeType};

/// A parsed CSS selector list
#[derive(Debug, Clone)]
pub struct Selector {
    source: String,
    alternatives: Vec<ComplexSelector>,
}

/// Compound selectors joined by combinators
#[derive(Debug, Clone)]
pub struct ComplexSelector {
    compounds: Vec<CompoundSelector>,
    /// `combinators[i]` sits between `compounds[i]` and `compounds[i + 1]`
    combinators: Vec<Combinator>,
}

/// Simple selectors that must all match one element
#[derive(Debug, Clone)]
pub struct CompoundSelector {
    parts: Vec<SelectorPart>,
}

/// Combinator between selector parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Descendant (space)
    Descendant,
    /// Child (>)
    Child,
    /// Adjacent sibling (+)
    AdjacentSibling,
    /// General sibling (~)
    GeneralSibling,
}

/// A part of a selector
#[derive(Debug, Clone)]
pub enum SelectorPart {
    /// Universal selector (*)
    Universal,
    /// Tag name
    Tag(String),
    /// ID selector (#id)
    Id(String),
    /// Class selector (.class)
    Class(String),
    /// Attribute selector ([attr], [attr=value], etc.)
    Attribute(AttributeSelector),
    /// Pseudo-class (:first-child, etc.)
    PseudoClass(PseudoClass),
}

/// Attribute selector
#[derive(Debug, Clone)]
pub struct AttributeSelector {
    pub name: String,
    pub operator: Option<AttributeOperator>,
    pub value: Option<String>,
    pub case_insensitive: bool,
}

/// Attribute selector operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeOperator {
    /// [attr=value] - exact match
    Equals,
    /// [attr~=value] - word in space-separated list
    Includes,
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch,
    /// [attr^=value] - starts with
    Prefix,
    /// [attr$=value] - ends with
    Suffix,
    /// [attr*=value] - contains substring
    Substring,
}

/// Pseudo-class selectors
#[derive(Debug, Clone)]
pub enum PseudoClass {
    FirstChild,
    LastChild,
    NthChild(NthExpr),
    NthLastChild(NthExpr),
    FirstOfType,
    LastOfType,
    NthOfType(NthExpr),
    OnlyChild,
    OnlyOfType,
    Empty,
    Not(Box<Selector>),
    Has(Box<Selector>),
    Is(Box<Selector>),
    Where(Box<Selector>),
    Checked,
    Disabled,
    Enabled,
    Required,
    Optional,
    Root,
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone)]
pub struct NthExpr {
    pub a: i32,
    pub b: i32,
}

impl Selector {
    /// Parse a CSS selector string
    pub fn parse(selector: &str) -> Result<Self> {
        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return Err(Error::selector(selector, "Empty selector"));
        }

        let mut parser = SelectorParser::new(trimmed);
        let alternatives = parser.parse_list()?;
        Ok(Self {
            source: trimmed.to_string(),
            alternatives,
        })
    }

    /// The selector text this was parsed from
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check if an element matches any selector of the list
    pub fn matches(&self, node: &Node) -> bool {
        node.is_element()
            && self
                .alternatives
                .iter()
                .any(|complex| complex.matches_at(complex.compounds.len() - 1, node))
    }
}

impl ComplexSelector {
    fn matches_at(&self, index: usize, node: &Node) -> bool {
        if !self.compounds[index].matches(node) {
            return false;
        }
        if index == 0 {
            return true;
        }

        match self.combinators[index - 1] {
            Combinator::Descendant => {
                let mut ancestor = node.parent_element();
                while let Some(candidate) = ancestor {
                    if self.matches_at(index - 1, &candidate) {
                        return true;
                    }
                    ancestor = candidate.parent_element();
                }
                false
            }
            Combinator::Child => node
                .parent_element()
                .map(|parent| self.matches_at(index - 1, &parent))
                .unwrap_or(false),
            Combinator::AdjacentSibling => previous_element_sibling(node)
                .map(|sibling| self.matches_at(index - 1, &sibling))
                .unwrap_or(false),
            Combinator::GeneralSibling => {
                let mut sibling = previous_element_sibling(node);
                while let Some(candidate) = sibling {
                    if self.matches_at(index - 1, &candidate) {
                        return true;
                    }
                    sibling = previous_element_sibling(&candidate);
                }
                false
            }
        }
    }
}

impl CompoundSelector {
    fn matches(&self, node: &Node) -> bool {
        self.parts.iter().all(|part| part_matches(part, node))
    }
}

/// Check if a selector part matches
fn part_matches(part: &SelectorPart, node: &Node) -> bool {
    match part {
        SelectorPart::Universal => true,
        SelectorPart::Tag(tag) => node
            .local_name()
            .map(|n| n.eq_ignore_ascii_case(tag))
            .unwrap_or(false),
        SelectorPart::Id(id) => node
            .get_attribute("id")
            .map(|n| n == *id)
            .unwrap_or(false),
        SelectorPart::Class(class) => node.has_class(class),
        SelectorPart::Attribute(attr) => attribute_matches(attr, node),
        SelectorPart::PseudoClass(pseudo) => pseudo_matches(pseudo, node),
    }
}

/// Check if attribute selector matches
fn attribute_matches(attr: &AttributeSelector, node: &Node) -> bool {
    let Some(value) = node.get_attribute(&attr.name) else {
        return false;
    };

    let (Some(op), Some(target)) = (&attr.operator, &attr.value) else {
        return true; // Just checking existence
    };

    let (value, target) = if attr.case_insensitive {
        (value.to_lowercase(), target.to_lowercase())
    } else {
        (value, target.clone())
    };

    match op {
        AttributeOperator::Equals => value == target,
        AttributeOperator::Includes => value.split_whitespace().any(|w| w == target),
        AttributeOperator::DashMatch => {
            value == target || value.starts_with(&format!("{}-", target))
        }
        AttributeOperator::Prefix => !target.is_empty() && value.starts_with(&target),
        AttributeOperator::Suffix => !target.is_empty() && value.ends_with(&target),
        AttributeOperator::Substring => !target.is_empty() && value.contains(&target),
    }
}

/// Check if pseudo-class matches
fn pseudo_matches(pseudo: &PseudoClass, node: &Node) -> bool {
    match pseudo {
        PseudoClass::FirstChild => previous_element_sibling(node).is_none(),
        PseudoClass::LastChild => next_element_sibling(node).is_none(),
        PseudoClass::OnlyChild => {
            previous_element_sibling(node).is_none() && next_element_sibling(node).is_none()
        }
        PseudoClass::NthChild(expr) => expr.matches(position(node, false, false)),
        PseudoClass::NthLastChild(expr) => expr.matches(position(node, true, false)),
        PseudoClass::FirstOfType => position(node, false, true) == 1,
        PseudoClass::LastOfType => position(node, true, true) == 1,
        PseudoClass::NthOfType(expr) => expr.matches(position(node, false, true)),
        PseudoClass::OnlyOfType => {
            position(node, false, true) == 1 && position(node, true, true) == 1
        }
        PseudoClass::Empty => node.children().iter().all(|child| match child.node_type() {
            NodeType::Element => false,
            NodeType::Text => child.node_value().unwrap_or_default().is_empty(),
            _ => true,
        }),
        PseudoClass::Checked => node.has_attribute("checked") || node.has_attribute("selected"),
        PseudoClass::Disabled => node.has_attribute("disabled"),
        PseudoClass::Enabled => is_form_control(node) && !node.has_attribute("disabled"),
        PseudoClass::Required => node.has_attribute("required"),
        PseudoClass::Optional => is_form_control(node) && !node.has_attribute("required"),
        PseudoClass::Root => node
            .parent()
            .map(|p| p.node_type() == NodeType::Document)
            .unwrap_or(false),
        PseudoClass::Not(sel) => !sel.matches(node),
        PseudoClass::Has(sel) => node
            .descendant_elements()
            .iter()
            .any(|descendant| sel.matches(descendant)),
        PseudoClass::Is(sel) | PseudoClass::Where(sel) => sel.matches(node),
    }
}

fn is_form_control(node: &Node) -> bool {
    matches!(
        node.local_name().as_deref(),
        Some("input" | "button" | "select" | "textarea" | "option" | "fieldset")
    )
}

fn previous_element_sibling(node: &Node) -> Option<Node> {
    let mut sibling = node.prev_sibling();
    while let Some(candidate) = sibling {
        if candidate.is_element() {
            return Some(candidate);
        }
        sibling = candidate.prev_sibling();
    }
    None
}

fn next_element_sibling(node: &Node) -> Option<Node> {
    let mut sibling = node.next_sibling();
    while let Some(candidate) = sibling {
        if candidate.is_element() {
            return Some(candidate);
        }
        sibling = candidate.next_sibling();
    }
    None
}

/// 1-based index among element siblings, optionally counted from the end
/// and restricted to siblings of the same type
fn position(node: &Node, from_end: bool, same_type: bool) -> i32 {
    let name = node.local_name();
    let siblings = match node.parent() {
        Some(parent) => parent.element_children(),
        None => return 1,
    };
    let candidates: Vec<&Node> = siblings
        .iter()
        .filter(|s| !same_type || s.local_name() == name)
        .collect();
    let index = candidates.iter().position(|s| *s == node).unwrap_or(0);
    let index = if from_end {
        candidates.len() - index
    } else {
        index + 1
    };
    index as i32
}

impl NthExpr {
    /// Check if an index matches this expression
    pub fn matches(&self, index: i32) -> bool {
        let (a, b, index) = (i64::from(self.a), i64::from(self.b), i64::from(index));
        if a == 0 {
            return index == b;
        }

        let diff = index - b;
        if a > 0 {
            diff >= 0 && diff % a == 0
        } else {
            diff <= 0 && diff % a == 0
        }
    }

    /// Parse an An+B expression
    pub fn parse(expr: &str) -> Option<Self> {
        let expr: String = expr
            .trim()
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect();
        match expr.as_str() {
            "odd" => return Some(Self { a: 2, b: 1 }),
            "even" => return Some(Self { a: 2, b: 0 }),
            _ => {}
        }

        if let Ok(n) = expr.parse::<i32>() {
            return Some(Self { a: 0, b: n });
        }

        let (a_part, b_part) = expr.split_once('n')?;
        let a = match a_part {
            "" | "+" => 1,
            "-" => -1,
            s => s.parse().ok()?,
        };
        let b = match b_part {
            "" => 0,
            s => s.strip_prefix('+').unwrap_or(s).parse().ok()?,
        };
        Some(Self { a, b })
    }
}

/// Recursive-descent selector parser
struct SelectorParser {
    source: String,
    input: Vec<char>,
    pos: usize,
}

impl SelectorParser {
    fn new(input: &str) -> Self {
        Self {
            source: input.to_string(),
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::selector(self.source.clone(), reason)
    }

    fn parse_list(&mut self) -> Result<Vec<ComplexSelector>> {
        let mut alternatives = Vec::new();
        loop {
            self.skip_whitespace();
            alternatives.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(',') => {
                    self.advance();
                }
                Some(c) => return Err(self.error(format!("Unexpected '{}'", c))),
            }
        }
        Ok(alternatives)
    }

    fn parse_complex(&mut self) -> Result<ComplexSelector> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_whitespace = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => Combinator::Child,
                Some('+') => Combinator::AdjacentSibling,
                Some('~') => Combinator::GeneralSibling,
                Some(_) if had_whitespace => Combinator::Descendant,
                Some(c) => return Err(self.error(format!("Unexpected '{}'", c))),
            };
            if combinator != Combinator::Descendant {
                self.advance();
                self.skip_whitespace();
            }
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector {
            compounds,
            combinators,
        })
    }

    fn parse_compound(&mut self) -> Result<CompoundSelector> {
        let mut parts = Vec::new();

        while let Some(c) = self.peek() {
            match c {
                '#' => {
                    self.advance();
                    let id = self.read_identifier()?;
                    parts.push(SelectorPart::Id(id));
                }
                '.' => {
                    self.advance();
                    let class = self.read_identifier()?;
                    parts.push(SelectorPart::Class(class));
                }
                '[' => {
                    parts.push(SelectorPart::Attribute(self.parse_attribute()?));
                }
                ':' => {
                    parts.push(SelectorPart::PseudoClass(self.parse_pseudo()?));
                }
                '*' if parts.is_empty() => {
                    self.advance();
                    parts.push(SelectorPart::Universal);
                }
                c if parts.is_empty() && is_ident_start(c) => {
                    let tag = self.read_identifier()?;
                    parts.push(SelectorPart::Tag(tag.to_lowercase()));
                }
                _ => break,
            }
        }

        if parts.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.error(format!("Unexpected '{}'", c)),
                None => self.error("Expected selector"),
            });
        }

        Ok(CompoundSelector { parts })
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    /// Returns whether any whitespace was skipped
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
        self.pos > start
    }

    fn read_identifier(&mut self) -> Result<String> {
        let mut result = String::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.advance();
                match self.advance() {
                    Some(escaped) => result.push(escaped),
                    None => return Err(self.error("Dangling escape")),
                }
            } else if is_ident_char(c) {
                result.push(c);
                self.advance();
            } else {
                break;
            }
        }
        if result.is_empty() {
            return Err(self.error("Expected identifier"));
        }
        Ok(result)
    }

    fn parse_attribute(&mut self) -> Result<AttributeSelector> {
        self.advance(); // consume '['

        self.skip_whitespace();
        let name = self.read_identifier()?.to_lowercase();
        self.skip_whitespace();

        let mut operator = None;
        let mut value = None;
        let mut case_insensitive = false;

        if let Some(c) = self.peek() {
            if c != ']' {
                let op = match c {
                    '=' => AttributeOperator::Equals,
                    '~' => AttributeOperator::Includes,
                    '|' => AttributeOperator::DashMatch,
                    '^' => AttributeOperator::Prefix,
                    '$' => AttributeOperator::Suffix,
                    '*' => AttributeOperator::Substring,
                    _ => return Err(self.error(format!("Unknown operator: {}", c))),
                };
                self.advance();
                if op != AttributeOperator::Equals {
                    self.expect('=')?;
                }
                operator = Some(op);

                self.skip_whitespace();
                value = Some(self.read_string_or_ident()?);
                self.skip_whitespace();

                if let Some('i') | Some('I') = self.peek() {
                    case_insensitive = true;
                    self.advance();
                    self.skip_whitespace();
                }
            }
        }

        self.expect(']')?;

        Ok(AttributeSelector {
            name,
            operator,
            value,
            case_insensitive,
        })
    }

    fn parse_pseudo(&mut self) -> Result<PseudoClass> {
        self.advance(); // consume ':'

        if let Some(':') = self.peek() {
            return Err(self.error("Pseudo-elements are not supported"));
        }

        let name = self.read_identifier()?.to_lowercase();

        let pseudo = match name.as_str() {
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "first-of-type" => PseudoClass::FirstOfType,
            "last-of-type" => PseudoClass::LastOfType,
            "only-child" => PseudoClass::OnlyChild,
            "only-of-type" => PseudoClass::OnlyOfType,
            "empty" => PseudoClass::Empty,
            "checked" => PseudoClass::Checked,
            "disabled" => PseudoClass::Disabled,
            "enabled" => PseudoClass::Enabled,
            "required" => PseudoClass::Required,
            "optional" => PseudoClass::Optional,
            "root" => PseudoClass::Root,
            "nth-child" => PseudoClass::NthChild(self.parse_nth()?),
            "nth-last-child" => PseudoClass::NthLastChild(self.parse_nth()?),
            "nth-of-type" => PseudoClass::NthOfType(self.parse_nth()?),
            "not" => PseudoClass::Not(Box::new(self.parse_nested()?)),
            "has" => PseudoClass::Has(Box::new(self.parse_nested()?)),
            "is" | "matches" => PseudoClass::Is(Box::new(self.parse_nested()?)),
            "where" => PseudoClass::Where(Box::new(self.parse_nested()?)),
            other => return Err(self.error(format!("Unknown pseudo-class: {}", other))),
        };

        Ok(pseudo)
    }

    fn parse_nth(&mut self) -> Result<NthExpr> {
        let expr = self.parse_function_arg()?;
        NthExpr::parse(&expr).ok_or_else(|| self.error("Invalid nth expression"))
    }

    fn parse_nested(&mut self) -> Result<Selector> {
        let inner = self.parse_function_arg()?;
        Selector::parse(&inner).map_err(|err| match err {
            Error::Selector { reason, .. } => self.error(reason),
            other => other,
        })
    }

    fn parse_function_arg(&mut self) -> Result<String> {
        self.expect('(')?;
        let mut depth = 1;
        let mut quote = None;
        let mut result = String::new();

        while let Some(c) = self.advance() {
            if let Some(q) = quote {
                result.push(c);
                if c == '\\' {
                    if let Some(escaped) = self.advance() {
                        result.push(escaped);
                    }
                } else if c == q {
                    quote = None;
                }
                continue;
            }
            match c {
                '"' | '\'' => {
                    quote = Some(c);
                    result.push(c);
                }
                '(' => {
                    depth += 1;
                    result.push(c);
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(result.trim().to_string());
                    }
                    result.push(c);
                }
                _ => result.push(c),
            }
        }

        Err(self.error("Unclosed parenthesis"))
    }

    fn read_string_or_ident(&mut self) -> Result<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let mut result = String::new();
                loop {
                    match self.advance() {
                        Some(c) if c == quote => return Ok(result),
                        Some('\\') => {
                            if let Some(escaped) = self.advance() {
                                result.push(escaped);
                            }
                        }
                        Some(c) => result.push(c),
                        None => return Err(self.error("Unterminated string")),
                    }
                }
            }
            _ => self.read_identifier(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("Expected '{}', got '{}'", expected, c))),
            None => Err(self.error(format!("Expected '{}', got EOF", expected))),
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '-' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_selector_parsing() {
        assert!(Selector::parse("div").is_ok());
        assert!(Selector::parse(".class").is_ok());
        assert!(Selector::parse("#id").is_ok());
        assert!(Selector::parse("[attr]").is_ok());
        assert!(Selector::parse("[attr=value]").is_ok());
        assert!(Selector::parse("div.class#id").is_ok());
        assert!(Selector::parse("ul > li + li ~ li a").is_ok());
        assert!(Selector::parse("h1, h2,h3").is_ok());
        assert!(Selector::parse("li:not(.done):nth-child(2n+1)").is_ok());
    }

    #[test]
    fn test_malformed_selectors() {
        for bad in ["", "   ", "div[", "div >", ",div", "a:hover-ish", "p::before", "div..x"] {
            let err = Selector::parse(bad).unwrap_err();
            assert!(err.is_selector(), "{bad:?} gave {err:?}");
        }
    }

    #[test]
    fn test_nth_expr() {
        let odd = NthExpr::parse("odd").unwrap();
        assert!(odd.matches(1));
        assert!(!odd.matches(2));
        assert!(odd.matches(3));

        let even = NthExpr::parse("even").unwrap();
        assert!(!even.matches(1));
        assert!(even.matches(2));

        let expr = NthExpr::parse("2n + 1").unwrap();
        assert!(expr.matches(1));
        assert!(!expr.matches(2));
        assert!(expr.matches(3));

        let first_three = NthExpr::parse("-n+3").unwrap();
        assert!(first_three.matches(3));
        assert!(!first_three.matches(4));
    }

    #[test]
    fn test_combinators() {
        let doc = parse_html(
            "<div id='a'><p class='x'>1</p><section><p class='x'>2</p></section><p>3</p></div>",
        )
        .unwrap();

        assert_eq!(doc.query_selector_all("div p").unwrap().len(), 3);
        assert_eq!(doc.query_selector_all("div > p").unwrap().len(), 2);
        assert_eq!(doc.query_selector_all("p.x + section").unwrap().len(), 1);
        assert_eq!(doc.query_selector_all("p.x ~ p").unwrap().len(), 1);
        assert_eq!(doc.query_selector_all("#a > section > .x").unwrap().len(), 1);
    }

    #[test]
    fn test_selector_list_keeps_document_order() {
        let doc = parse_html("<h2>b</h2><h1>a</h1><h2>c</h2>").unwrap();
        let found = doc.query_selector_all("h1, h2").unwrap();
        let texts: Vec<String> = found.iter().map(|n| n.text_content()).collect();
        assert_eq!(texts, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_structural_pseudo_classes() {
        let doc = parse_html(
            "<ul><li>a</li><!-- c --><li class='done'>b</li><li>c</li></ul><p></p>",
        )
        .unwrap();

        let first = doc.query_selector("li:first-child").unwrap().unwrap();
        assert_eq!(first.text_content(), "a");
        let last = doc.query_selector("li:last-child").unwrap().unwrap();
        assert_eq!(last.text_content(), "c");
        let second = doc.query_selector("li:nth-child(2)").unwrap().unwrap();
        assert_eq!(second.text_content(), "b");
        assert_eq!(doc.query_selector_all("li:not(.done)").unwrap().len(), 2);
        assert_eq!(doc.query_selector_all("ul:has(.done)").unwrap().len(), 1);
        assert_eq!(doc.query_selector_all("p:empty").unwrap().len(), 1);
        assert_eq!(doc.query_selector_all(":root").unwrap().len(), 1);
    }

    #[test]
    fn test_attribute_operators() {
        let doc = parse_html(
            "<a href='https://example.com/x.pdf' lang='en-US' rel='nofollow noopener'>x</a>",
        )
        .unwrap();
        for sel in [
            "a[href]",
            "a[href^='https']",
            "a[href$=\".pdf\"]",
            "a[href*=example]",
            "a[lang|=en]",
            "a[rel~=noopener]",
            "a[lang='EN-us' i]",
        ] {
            assert!(doc.query_selector(sel).unwrap().is_some(), "{sel}");
        }
        assert!(doc.query_selector("a[href^='']").unwrap().is_none());
    }

    #[test]
    fn test_nth_extreme_offsets() {
        let doc = parse_html("<ul><li>a</li><li>b</li></ul>").unwrap();
        assert_eq!(doc.query_selector_all("li:nth-child(n-2147483648)").unwrap().len(), 2);
        assert_eq!(doc.query_selector_all("li:nth-child(-n+2147483647)").unwrap().len(), 2);
        assert!(doc.query_selector_all("li:nth-child(2147483647)").unwrap().is_empty());

        let expr = NthExpr::parse("-2147483648n-2147483648").unwrap();
        assert!(!expr.matches(i32::MAX));
    }

    #[test]
    fn test_quoted_parenthesis_in_function_argument() {
        let doc = parse_html("<p title=')'>a</p><p title='x'>b</p>").unwrap();
        let found = doc.query_selector_all("p:not([title=\")\"])").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].text_content(), "b");
        assert_eq!(doc.query_selector_all("p:is([title='('], [title=')'])").unwrap().len(), 1);
    }
}
