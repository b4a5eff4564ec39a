//! Chef domain types.

use serde::{Deserialize, Serialize};

use crate::types::id::ChefId;

/// A chef (canonical record, post-normalization).
///
/// The backend occasionally attaches account-linkage ids under different
/// names; they are kept alongside the primary id because self-registration
/// matches a viewer against any of them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chef {
    /// Unique chef ID.
    pub id: ChefId,
    /// Chef's display name.
    pub name: String,
    /// Culinary specialty, if declared.
    #[serde(default)]
    pub specialty: Option<String>,
    /// Years of experience.
    #[serde(default)]
    pub experience: Option<u32>,
    /// Linked account id, when the backend sends one.
    #[serde(default)]
    pub user_id: Option<i64>,
    /// Alias of `user_id` used by some backend responses.
    #[serde(default)]
    pub account_id: Option<i64>,
    /// Self-referencing alias some roster payloads carry.
    #[serde(default)]
    pub chef_id: Option<i64>,
}

impl Chef {
    /// All ids under which this chef may be referenced.
    ///
    /// Used by eligibility matching: a viewer's chef identity may arrive
    /// under any of these aliases depending on which backend endpoint
    /// produced the record.
    #[must_use]
    pub fn candidate_ids(&self) -> Vec<i64> {
        let mut ids = vec![self.id.as_i64()];
        for alias in [self.user_id, self.account_id, self.chef_id] {
            if let Some(value) = alias
                && !ids.contains(&value)
            {
                ids.push(value);
            }
        }
        ids
    }

    /// Whether `identity` refers to this chef under any known alias.
    #[must_use]
    pub fn matches_identity(&self, identity: i64) -> bool {
        self.candidate_ids().contains(&identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chef(id: i64) -> Chef {
        Chef {
            id: ChefId::new(id),
            name: format!("Chef {id}"),
            specialty: None,
            experience: None,
            user_id: None,
            account_id: None,
            chef_id: None,
        }
    }

    #[test]
    fn test_matches_primary_id() {
        assert!(chef(5).matches_identity(5));
        assert!(!chef(5).matches_identity(6));
    }

    #[test]
    fn test_matches_alias_ids() {
        let mut c = chef(9);
        c.user_id = Some(31);
        c.account_id = Some(77);
        assert!(c.matches_identity(31));
        assert!(c.matches_identity(77));
        assert!(c.matches_identity(9));
        assert!(!c.matches_identity(32));
    }

    #[test]
    fn test_candidate_ids_deduplicates() {
        let mut c = chef(4);
        c.chef_id = Some(4);
        c.user_id = Some(4);
        assert_eq!(c.candidate_ids(), vec![4]);
    }
}
