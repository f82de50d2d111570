//! Named records committed by the tree.

use serde::{Deserialize, Serialize};

use crate::digest::Digest;

/// An immutable (name, digest) pair supplied by the caller.
///
/// Records are produced upstream, already deduplicated and sorted ascending
/// by name. The digest serializes as base64 text, so record sets can travel
/// as JSON documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    name: String,
    digest: Digest,
}

impl Record {
    pub fn new(name: impl Into<String>, digest: Digest) -> Self {
        Self {
            name: name.into(),
            digest,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn digest(&self) -> &Digest {
        &self.digest
    }
}
