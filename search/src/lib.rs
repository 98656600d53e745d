//! Waypoint Search: deterministic A* over a [`waypoint_kernel`] graph.
//!
//! This crate provides the search layer. It depends only on
//! `waypoint_kernel`; the kernel never depends on it.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_kernel  ←  waypoint_search
//! (graph, hashing)    (frontier, engine, goals)
//! ```
//!
//! # Key types
//!
//! - [`search::search`] — cheapest path between two vertices
//! - [`search::SearchRun`] — verdict plus arena, visited set, stats and trace
//! - [`frontier::Frontier`] — lazy-deletion min-heap keyed by `(f, creation order)`
//! - [`trace::SearchTraceV1`] — pop-by-pop audit log with canonical bytes
//! - [`goals::find_cheapest_goal`] — one search per goal, cheapest wins
//! - [`policy::SearchPolicy`] — expansion cap and trace recording

#![forbid(unsafe_code)]

pub mod error;
pub mod frontier;
pub mod goals;
pub mod node;
pub mod policy;
pub mod render;
pub mod search;
pub mod trace;
pub mod visited;

pub use error::SearchError;
pub use goals::{find_cheapest_goal, find_cheapest_goal_parallel, GoalAttempt, GoalRoute};
pub use search::{search, search_with_policy, SearchResult, SearchRun, SearchStats};
