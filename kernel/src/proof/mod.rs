//! Proof module: canonical serialization and content hashing.
//!
//! Depends on nothing internal. Everything that commits to bytes (graph
//! digests, search trace digests, fixture output) routes through here.

pub mod canon;
pub mod hash;
pub mod hash_domain;
