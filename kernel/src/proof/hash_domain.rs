//! Typed domain separators for canonical hashing.
//!
//! Every digest selects a [`HashDomain`], so two artifacts that happen to
//! share bytes (a graph and a trace, say) can never collide.

/// Typed domain separator for [`super::hash::canonical_hash`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashDomain {
    /// Canonical JSON form of a [`crate::model::Graph`].
    GraphModel,
    /// Canonical JSON form of a search trace (audit log).
    SearchTrace,
    /// Canonical JSON form of a multi-goal survey report.
    GoalSurvey,
}

impl HashDomain {
    /// All domains in declaration order.
    pub const ALL: &'static [HashDomain] = &[
        Self::GraphModel,
        Self::SearchTrace,
        Self::GoalSurvey,
    ];

    /// The raw separator bytes (null-terminated).
    #[must_use]
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::GraphModel => b"WAYPOINT::GRAPH_MODEL::V1\0",
            Self::SearchTrace => b"WAYPOINT::SEARCH_TRACE::V1\0",
            Self::GoalSurvey => b"WAYPOINT::GOAL_SURVEY::V1\0",
        }
    }
}

impl std::fmt::Display for HashDomain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::GraphModel => "GraphModel",
            Self::SearchTrace => "SearchTrace",
            Self::GoalSurvey => "GoalSurvey",
        };
        f.write_str(name)
    }
}
