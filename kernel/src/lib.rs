//! Waypoint Kernel: the immutable graph model and its proof primitives.
//!
//! # API Surface
//!
//! - [`model::Graph`] -- weighted directed graph plus heuristic table, validated at construction
//! - [`model::GraphBuilder`] -- sparse, incremental construction of a [`model::Graph`]
//! - [`proof::canon::canonical_json_bytes`] -- the single canonical JSON writer
//! - [`proof::hash::canonical_hash`] -- domain-separated SHA-256 content hashing
//!
//! # Module Dependency Direction
//!
//! `proof` ← `model`
//!
//! One-way only. `model` uses `proof` to digest graphs; `proof` depends on
//! nothing internal. The kernel never depends on the search crate.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod model;
pub mod proof;
