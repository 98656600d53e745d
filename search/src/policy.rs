//! Search policy: optional bounds and trace recording.

use crate::error::SearchError;

/// Per-run configuration.
///
/// The default is unbounded with tracing on. [`crate::search::search`] runs
/// unbounded without a trace. A bound does not change the algorithm; it only
/// stops it early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on node expansions. Stale discards do not count, and the
    /// goal pop is still allowed after the last permitted expansion.
    /// `None` means run until goal or exhaustion.
    pub max_expansions: Option<u64>,
    /// Record a pop-by-pop trace. Off saves memory on large graphs; the
    /// result, stats and visited set are identical either way.
    pub record_trace: bool,
}

impl SearchPolicy {
    /// An unbounded policy that does not record a trace.
    #[must_use]
    pub fn untraced() -> Self {
        Self {
            record_trace: false,
            ..Self::default()
        }
    }

    /// This policy with an expansion cap.
    #[must_use]
    pub fn with_max_expansions(mut self, max: u64) -> Self {
        self.max_expansions = Some(max);
        self
    }

    /// Reject nonsensical settings before a run starts.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidPolicy`] if `max_expansions` is `Some(0)`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// JSON echo of the policy, recorded in trace metadata.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "max_expansions": self.max_expansions,
            "record_trace": self.record_trace,
        })
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_expansions: None,
            record_trace: true,
        }
    }
}
