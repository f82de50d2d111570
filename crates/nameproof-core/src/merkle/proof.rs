//! Proof documents exchanged with verifiers.

use serde::{Deserialize, Serialize};

use crate::digest::Digest;

/// One step of a proof path: the sibling's base64 digest and the side it
/// occupies relative to the node being folded upward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStep {
    Left(String),
    Right(String),
}

/// Proof that a named record is committed under the root.
///
/// `path` runs from the leaf to the root; the root digest itself is the
/// final fold result and is not repeated in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    pub name: String,
    /// Leaf digest, base64.
    pub hash: String,
    pub path: Vec<PathStep>,
}

/// Proof that no record with the queried name exists: inclusion paths for
/// the adjacent predecessor and successor leaves. A query before the first
/// leaf has no predecessor; a query after the last leaf has no successor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NonInclusionProof {
    pub left: Option<InclusionProof>,
    pub right: Option<InclusionProof>,
}

/// Either proof kind. Serializes untagged, so inclusion and span documents
/// are distinguished by their fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Proof {
    Inclusion(InclusionProof),
    NonInclusion(NonInclusionProof),
}

impl Proof {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

/// Outcome of folding a path: the implied root plus the structural facts
/// span verification needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PathEvaluation {
    pub root: Digest,
    /// Leaf position reconstructed from the side bits: a left-side sibling
    /// means the node was a right child at that level.
    pub index: u64,
    /// True when the leaf is the last of every row on its way up, i.e. each
    /// step is a left-side sibling or a self-pair.
    pub rightmost: bool,
}

impl InclusionProof {
    /// Fold the path and recover the root digest this proof commits to.
    /// `None` if any digest fails to decode.
    pub fn implied_root(&self) -> Option<Digest> {
        self.evaluate().map(|eval| eval.root)
    }

    pub(crate) fn evaluate(&self) -> Option<PathEvaluation> {
        // Deeper paths than a u64 position can express are malformed.
        if self.path.len() >= 64 {
            return None;
        }

        let mut current = Digest::from_base64(&self.hash).ok()?;
        let mut index = 0u64;
        let mut rightmost = true;

        for (level, step) in self.path.iter().enumerate() {
            match step {
                PathStep::Right(text) => {
                    let sibling = Digest::from_base64(text).ok()?;
                    if sibling != current {
                        rightmost = false;
                    }
                    current = Digest::combine(&current, &sibling);
                }
                PathStep::Left(text) => {
                    let sibling = Digest::from_base64(text).ok()?;
                    index |= 1 << level;
                    current = Digest::combine(&sibling, &current);
                }
            }
        }

        Some(PathEvaluation {
            root: current,
            index,
            rightmost,
        })
    }
}
