//! # A single outstanding busy request.
//!
//! [`BusyRequest`] is what the queue stores: a caller-supplied identifier, an
//! absolute expiry deadline, and whether the request demands the modal
//! underlay. Identifiers are sanitized on the way in - they end up embedded
//! in a surface attribute (the spinner label), so single quotes are stripped
//! rather than rejected.

use tokio::time::Instant;

/// One outstanding loading request.
///
/// The empty string is a valid (anonymous) identifier. Anonymous requests are
/// never deduplicated against each other; named requests replace a queued
/// request with the same id.
#[derive(Clone, Debug)]
pub struct BusyRequest {
    /// Caller-supplied identifier, already sanitized.
    pub id: String,
    /// Deadline after which the request is stale and must be auto-removed.
    pub expiry: Instant,
    /// Whether this request demands the opaque modal underlay.
    pub modal: bool,
}

impl BusyRequest {
    /// True for requests submitted without an identifier.
    pub fn is_anonymous(&self) -> bool {
        self.id.is_empty()
    }
}

/// Strips characters that are unsafe to embed in a surface attribute.
///
/// Applied on both the start and stop paths so a caller using the same raw
/// string for both always addresses the same queue entry.
pub(crate) fn sanitize_id(raw: &str) -> String {
    raw.replace('\'', "")
}
