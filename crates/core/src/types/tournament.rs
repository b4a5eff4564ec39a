//! Tournament domain types.
//!
//! These are the canonical records produced by the web crate's
//! normalization layer; the heterogeneous wire shapes never escape that
//! boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::id::{ChefId, TournamentId};
use crate::types::location::LocationRef;

/// A tournament (canonical record, post-normalization).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tournament {
    /// Unique tournament ID.
    pub id: TournamentId,
    /// Tournament display name.
    pub name: String,
    /// Free-form description, if provided.
    #[serde(default)]
    pub description: Option<String>,
    /// Canonical venue reference.
    #[serde(default)]
    pub location: LocationRef,
    /// Maximum number of participants; `None` means unlimited.
    #[serde(default)]
    pub capacity: Option<u32>,
    /// Scheduled date, if set.
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    /// Venue latitude, if known.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Venue longitude, if known.
    #[serde(default)]
    pub lon: Option<f64>,
    /// Hero image URL, if set.
    #[serde(default)]
    pub image: Option<String>,
    /// Chefs registered into this tournament.
    #[serde(default)]
    pub registrations: Vec<Registration>,
}

impl Tournament {
    /// IDs of all registered chefs.
    #[must_use]
    pub fn registered_chef_ids(&self) -> Vec<ChefId> {
        self.registrations.iter().map(|r| r.chef_id).collect()
    }

    /// Current occupancy (number of registered chefs).
    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.registrations.len()
    }
}

/// A chef's registration within a tournament, including any recorded
/// result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    /// The registered chef's ID.
    pub chef_id: ChefId,
    /// Display name at registration time.
    pub name: String,
    /// Culinary specialty, if declared.
    #[serde(default)]
    pub specialty: Option<String>,
    /// Recorded score in [0, 100], once a result has been submitted.
    #[serde(default)]
    pub score: Option<f64>,
    /// Jury notes attached to the result.
    #[serde(default)]
    pub notes: Option<String>,
}
