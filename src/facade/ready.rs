// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document readiness provider

use crate::dom::{Document, ReadyCallback};

/// Something that can run a callback once a document has finished loading.
///
/// `Dom::ready` forwards to it without adding ordering or cancellation of
/// its own.
pub trait ReadyProvider: Send + Sync {
    /// Schedule `callback` for when the document is ready
    fn when_ready(&self, callback: ReadyCallback);
}

impl ReadyProvider for Document {
    fn when_ready(&self, callback: ReadyCallback) {
        Document::when_ready(self, callback);
    }
}
