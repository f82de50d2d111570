//! Proof verification against a trusted root.
//!
//! Verification is a pure boolean decision: malformed documents, digest
//! mismatches, and ordering violations all yield `false` rather than an
//! error, which suits routine presence/absence trust checks.

use crate::digest::Digest;
use crate::record::Record;

use super::proof::{InclusionProof, NonInclusionProof};

/// Check that `proof` commits `record` under `expected_root`.
pub fn verify_inclusion(proof: &InclusionProof, record: &Record, expected_root: &Digest) -> bool {
    if proof.name != record.name() {
        return false;
    }
    let leaf = match Digest::from_base64(&proof.hash) {
        Ok(digest) => digest,
        Err(_) => return false,
    };
    if leaf != *record.digest() {
        return false;
    }
    match proof.evaluate() {
        Some(eval) => eval.root == *expected_root,
        None => false,
    }
}

/// Check that `proof` establishes the absence of `name` under
/// `expected_root`.
///
/// Both bracketing paths must recompute the root, the bracket names must
/// strictly surround the query, and the two leaves must be adjacent in the
/// committed sequence. A single-sided span is accepted only when the present
/// leaf sits at the matching boundary of the tree.
pub fn verify_non_inclusion(proof: &NonInclusionProof, name: &str, expected_root: &Digest) -> bool {
    match (&proof.left, &proof.right) {
        // Query falls between two committed leaves.
        (Some(pred), Some(succ)) => {
            if !(pred.name.as_str() < name && name < succ.name.as_str()) {
                return false;
            }
            if pred.path.len() != succ.path.len() {
                return false;
            }
            let (Some(pred_eval), Some(succ_eval)) = (pred.evaluate(), succ.evaluate()) else {
                return false;
            };
            pred_eval.root == *expected_root
                && succ_eval.root == *expected_root
                && succ_eval.index == pred_eval.index + 1
        }
        // Query precedes every leaf: the successor must sit at position 0.
        (None, Some(succ)) => {
            if name >= succ.name.as_str() {
                return false;
            }
            match succ.evaluate() {
                Some(eval) => eval.root == *expected_root && eval.index == 0,
                None => false,
            }
        }
        // Query follows every leaf: the predecessor must be the rightmost.
        (Some(pred), None) => {
            if pred.name.as_str() >= name {
                return false;
            }
            match pred.evaluate() {
                Some(eval) => eval.root == *expected_root && eval.rightmost,
                None => false,
            }
        }
        (None, None) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merkle::{MerkleTree, PathStep, Proof};

    fn record(name: &str) -> Record {
        Record::new(name, Digest::of(name.as_bytes()))
    }

    fn build(names: &[&str]) -> (Vec<Record>, MerkleTree, Digest) {
        let records: Vec<Record> = names.iter().map(|name| record(name)).collect();
        let tree = MerkleTree::build(&records).unwrap();
        let root = tree.root_digest().unwrap();
        (records, tree, root)
    }

    fn inclusion(tree: &MerkleTree, name: &str) -> InclusionProof {
        match tree.generate_proof(name).unwrap() {
            Proof::Inclusion(proof) => proof,
            Proof::NonInclusion(_) => panic!("expected inclusion proof for {name}"),
        }
    }

    fn span(tree: &MerkleTree, name: &str) -> NonInclusionProof {
        match tree.generate_proof(name).unwrap() {
            Proof::NonInclusion(proof) => proof,
            Proof::Inclusion(_) => panic!("expected span proof for {name}"),
        }
    }

    #[test]
    fn test_every_record_verifies() {
        let (records, tree, root) = build(&["ant", "bee", "cat", "dog", "eel", "fox"]);
        for r in &records {
            assert!(verify_inclusion(&inclusion(&tree, r.name()), r, &root));
        }
    }

    #[test]
    fn test_inclusion_rejects_wrong_record() {
        let (records, tree, root) = build(&["ant", "bee", "cat"]);
        let proof = inclusion(&tree, "bee");

        // Name mismatch
        assert!(!verify_inclusion(&proof, &records[0], &root));
        // Digest mismatch under the right name
        let forged = Record::new("bee", Digest::of(b"other payload"));
        assert!(!verify_inclusion(&proof, &forged, &root));
    }

    #[test]
    fn test_inclusion_rejects_wrong_root() {
        let (records, tree, _) = build(&["ant", "bee", "cat"]);
        let (_, _, other_root) = build(&["ant", "bee", "cow"]);
        let proof = inclusion(&tree, "bee");
        assert!(!verify_inclusion(&proof, &records[1], &other_root));
    }

    #[test]
    fn test_span_between_leaves_verifies() {
        let (_, tree, root) = build(&["bravo", "delta", "foxtrot", "hotel"]);
        assert!(verify_non_inclusion(&span(&tree, "echo"), "echo", &root));
        assert!(!verify_non_inclusion(&span(&tree, "echo"), "echo", &Digest::of(b"other")));
    }

    #[test]
    fn test_span_at_boundaries_verifies() {
        let (_, tree, root) = build(&["bravo", "delta", "foxtrot"]);

        // Before the first leaf: no predecessor, successor at position 0
        assert!(verify_non_inclusion(&span(&tree, "alpha"), "alpha", &root));
        // After the last leaf of an odd row: rightmost check crosses a
        // self-paired level
        assert!(verify_non_inclusion(&span(&tree, "zulu"), "zulu", &root));
    }

    #[test]
    fn test_span_rejects_non_adjacent_bracket() {
        let (_, tree, root) = build(&["ant", "bee", "cat", "dog"]);

        // "ant" and "cat" both genuinely fold to the root, but leaf "bee"
        // sits between them.
        let forged = NonInclusionProof {
            left: Some(inclusion(&tree, "ant")),
            right: Some(inclusion(&tree, "cat")),
        };
        assert!(!verify_non_inclusion(&forged, "badger", &root));
    }

    #[test]
    fn test_span_rejects_interior_leaf_posing_as_boundary() {
        let (_, tree, root) = build(&["ant", "bee", "cat", "dog"]);

        // "bee" is not the first leaf, so it cannot witness a query before
        // the whole set.
        let forged = NonInclusionProof {
            left: None,
            right: Some(inclusion(&tree, "bee")),
        };
        assert!(!verify_non_inclusion(&forged, "amber", &root));

        // "cat" is not the last leaf either.
        let forged = NonInclusionProof {
            left: Some(inclusion(&tree, "cat")),
            right: None,
        };
        assert!(!verify_non_inclusion(&forged, "zulu", &root));
    }

    #[test]
    fn test_span_rejects_names_outside_bracket() {
        let (_, tree, root) = build(&["bravo", "delta", "foxtrot"]);
        let proof = span(&tree, "echo");

        // The bracket (delta, foxtrot) does not cover "golf"
        assert!(!verify_non_inclusion(&proof, "golf", &root));
        // Nor a name equal to one of its endpoints
        assert!(!verify_non_inclusion(&proof, "delta", &root));
    }

    #[test]
    fn test_empty_span_rejected() {
        let (_, _, root) = build(&["ant"]);
        let empty = NonInclusionProof {
            left: None,
            right: None,
        };
        assert!(!verify_non_inclusion(&empty, "bee", &root));
    }

    #[test]
    fn test_malformed_digest_fails_closed() {
        let (records, tree, root) = build(&["ant", "bee", "cat"]);
        let mut proof = inclusion(&tree, "ant");
        proof.path[0] = match &proof.path[0] {
            PathStep::Right(_) => PathStep::Right("***".to_string()),
            PathStep::Left(_) => PathStep::Left("***".to_string()),
        };
        assert!(!verify_inclusion(&proof, &records[0], &root));
    }
}
