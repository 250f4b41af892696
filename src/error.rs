// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for dom-shortcut
//!
//! The facade adds exactly two failure kinds of its own (capability and
//! invalid argument). Everything else is raised by the host DOM and passes
//! through unchanged.

use thiserror::Error;

/// Result type alias for DOM operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// No usable variant of a host API exists
    #[error("Missing host capability: {0}")]
    Capability(String),

    /// A required target resolved to nothing
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Selector parsing failed
    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// Tree mutation would break the single-parent tree
    #[error("Hierarchy error: {0}")]
    Hierarchy(String),

    /// HTML parsing failed
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),
}

impl Error {
    /// Create a capability error
    pub fn capability<S: Into<String>>(msg: S) -> Self {
        Error::Capability(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// The error raised when a target resolves to nothing
    pub fn no_element() -> Self {
        Error::invalid_argument("No element specified")
    }

    /// Create a selector error
    pub fn selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Selector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Create a hierarchy error
    pub fn hierarchy<S: Into<String>>(msg: S) -> Self {
        Error::Hierarchy(msg.into())
    }

    /// Check if this is a capability error
    pub fn is_capability(&self) -> bool {
        matches!(self, Error::Capability(_))
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    /// Check if this error came from the selector engine
    pub fn is_selector(&self) -> bool {
        matches!(self, Error::Selector { .. })
    }

    /// Get the offending selector if available
    pub fn selector_text(&self) -> Option<&str> {
        match self {
            Error::Selector { selector, .. } => Some(selector),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::HtmlParse(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_element_error() {
        let err = Error::no_element();
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "Invalid argument: No element specified");
        assert_eq!(err, Error::invalid_argument("No element specified"));
    }

    #[test]
    fn test_selector_error() {
        let err = Error::selector("div[", "Expected ']'");
        assert!(err.is_selector());
        assert_eq!(err.selector_text(), Some("div["));
        assert!(!err.is_capability());
    }
}
