//! Nameproof Core Library
//!
//! Authenticated commitment to a sorted set of named records. A server
//! builds a Merkle tree over (name, digest) records, publishes the 48-byte
//! SHA-384 root digest, and answers name queries with compact proofs that a
//! record is committed — or that no record with that name exists — which
//! remote parties verify against the root alone.
//!
//! The tree is immutable once built: it is rebuilt wholesale for each
//! snapshot of the record set, and a shared instance serves concurrent proof
//! generation without synchronization. Signing and publication of the root
//! digest happen outside this crate.
//!
//! # Modules
//!
//! - [`digest`]: SHA-384 primitive and base64 transport encoding
//! - [`record`]: the (name, digest) pairs committed by the tree
//! - [`merkle`]: tree construction, proof generation, proof verification
//!
//! # Example
//!
//! ```
//! use nameproof_core::{verify_inclusion, Digest, MerkleTree, Proof, Record};
//!
//! let records = vec![
//!     Record::new("alice", Digest::of(b"alice's data")),
//!     Record::new("bob", Digest::of(b"bob's data")),
//! ];
//! let tree = MerkleTree::build(&records)?;
//! let root = tree.root_digest()?;
//!
//! match tree.generate_proof("bob")? {
//!     Proof::Inclusion(proof) => assert!(verify_inclusion(&proof, &records[1], &root)),
//!     Proof::NonInclusion(_) => unreachable!(),
//! }
//! # Ok::<(), nameproof_core::MerkleError>(())
//! ```

pub mod digest;
pub mod merkle;
pub mod record;

// Re-export commonly used types
pub use digest::{Digest, DigestError, DIGEST_LEN};
pub use merkle::{
    verify_inclusion, verify_non_inclusion, InclusionProof, MerkleError, MerkleResult,
    MerkleTree, NonInclusionProof, PathStep, Proof,
};
pub use record::Record;
