//! Ranking types.

use serde::{Deserialize, Serialize};

use crate::types::id::ChefId;

/// A single leaderboard row as reported by the backend.
///
/// Ordering is derived by [`crate::ranking::project`], never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    /// The scored chef's ID, when the backend includes one.
    #[serde(default)]
    pub chef_id: Option<ChefId>,
    /// The scored chef's display name.
    pub chef_name: String,
    /// Score in [0, 100]; absent when the result is still pending.
    #[serde(default)]
    pub score: Option<f64>,
}
