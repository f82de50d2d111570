//! Tree construction and proof generation.

use thiserror::Error;
use tracing::debug;

use crate::digest::{Digest, DigestError};
use crate::record::Record;

use super::proof::{InclusionProof, NonInclusionProof, PathStep, Proof};

/// Merkle tree errors.
#[derive(Error, Debug)]
pub enum MerkleError {
    #[error("Records must be strictly ascending by name (violation at index {0})")]
    InvalidRecordOrder(usize),

    #[error("Tree has no leaves")]
    EmptyTree,

    #[error("Digest error: {0}")]
    Digest(#[from] DigestError),
}

pub type MerkleResult<T> = Result<T, MerkleError>;

/// Index of a node in the tree's arena.
type NodeId = usize;

/// Arena-allocated tree node. Ownership lives in the arena; `parent` is a
/// non-owning back-reference used only for upward traversal.
#[derive(Debug)]
struct Node {
    digest: Digest,
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// A leaf carries its record's name; names are not part of the hash chain.
/// An internal node's `right` is `None` when the last node of an odd row was
/// paired with itself.
#[derive(Debug)]
enum NodeKind {
    Leaf { name: String },
    Internal { left: NodeId, right: Option<NodeId> },
}

/// Merkle tree over a sorted, deduplicated record set.
///
/// Immutable once built: proof generation only reads the node graph, so a
/// shared tree serves any number of concurrent readers without
/// synchronization. A changed record set means a new tree; there is no
/// incremental update path.
#[derive(Debug)]
pub struct MerkleTree {
    nodes: Vec<Node>,
    /// Leaf ids in ascending name order; the only access path to leaves.
    leaves: Vec<NodeId>,
    root: Option<NodeId>,
}

impl MerkleTree {
    /// Build a tree from records sorted strictly ascending by name.
    ///
    /// Rows are paired left to right, bottom up; the last node of an odd row
    /// is paired with itself (duplicated, not zero-padded). Rejects input
    /// that is out of order or contains duplicate names.
    pub fn build(records: &[Record]) -> MerkleResult<Self> {
        for i in 1..records.len() {
            if records[i - 1].name() >= records[i].name() {
                return Err(MerkleError::InvalidRecordOrder(i));
            }
        }

        debug!(records = records.len(), "building merkle tree");

        let mut nodes: Vec<Node> = records
            .iter()
            .map(|record| Node {
                digest: *record.digest(),
                parent: None,
                kind: NodeKind::Leaf {
                    name: record.name().to_string(),
                },
            })
            .collect();
        let leaves: Vec<NodeId> = (0..nodes.len()).collect();

        if leaves.is_empty() {
            return Ok(Self {
                nodes,
                leaves,
                root: None,
            });
        }

        let mut row = leaves.clone();
        while row.len() > 1 {
            let mut next_row = Vec::with_capacity((row.len() + 1) / 2);

            for j in (0..row.len()).step_by(2) {
                let left = row[j];
                let right = row.get(j + 1).copied();
                let right_digest = match right {
                    Some(id) => nodes[id].digest,
                    None => nodes[left].digest,
                };

                let id = nodes.len();
                nodes.push(Node {
                    digest: Digest::combine(&nodes[left].digest, &right_digest),
                    parent: None,
                    kind: NodeKind::Internal { left, right },
                });
                nodes[left].parent = Some(id);
                if let Some(r) = right {
                    nodes[r].parent = Some(id);
                }
                next_row.push(id);
            }

            row = next_row;
        }

        Ok(Self {
            nodes,
            leaves,
            root: Some(row[0]),
        })
    }

    /// Root digest committing to the whole record set.
    pub fn root_digest(&self) -> MerkleResult<Digest> {
        match self.root {
            Some(id) => Ok(self.nodes[id].digest),
            None => Err(MerkleError::EmptyTree),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Generate a proof for a queried name: an inclusion proof when a leaf
    /// with that name exists, otherwise a span bracketing the query between
    /// its predecessor and successor leaves.
    pub fn generate_proof(&self, name: &str) -> MerkleResult<Proof> {
        if self.leaves.is_empty() {
            return Err(MerkleError::EmptyTree);
        }

        // First leaf whose name is >= the query.
        let position = self.leaves.partition_point(|&id| self.leaf_name(id) < name);
        debug!(name, position, "leaf lower bound");

        if position < self.leaves.len() && self.leaf_name(self.leaves[position]) == name {
            return Ok(Proof::Inclusion(self.path_from(self.leaves[position])));
        }

        let left = (position > 0).then(|| self.path_from(self.leaves[position - 1]));
        let right = (position < self.leaves.len()).then(|| self.path_from(self.leaves[position]));
        Ok(Proof::NonInclusion(NonInclusionProof { left, right }))
    }

    /// Walk the parent back-references from a leaf to the root, recording
    /// each sibling's digest and side.
    fn path_from(&self, leaf: NodeId) -> InclusionProof {
        let mut path = Vec::new();
        let mut current = leaf;

        while let Some(parent) = self.nodes[current].parent {
            if let NodeKind::Internal { left, right } = &self.nodes[parent].kind {
                let step = if *left == current {
                    // A missing right child means the node was paired with
                    // itself, so the sibling digest is its own.
                    let sibling = match right {
                        Some(id) => *id,
                        None => current,
                    };
                    PathStep::Right(self.nodes[sibling].digest.to_base64())
                } else {
                    PathStep::Left(self.nodes[*left].digest.to_base64())
                };
                path.push(step);
            }
            current = parent;
        }

        InclusionProof {
            name: self.leaf_name(leaf).to_string(),
            hash: self.nodes[leaf].digest.to_base64(),
            path,
        }
    }

    fn leaf_name(&self, id: NodeId) -> &str {
        match &self.nodes[id].kind {
            NodeKind::Leaf { name } => name,
            // Safe: leaf ids only ever come from `self.leaves`.
            NodeKind::Internal { .. } => unreachable!("leaf id points at an internal node"),
        }
    }
}
