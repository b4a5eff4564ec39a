//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use chefclash_core::RoleTier;

use crate::backend::types::{FlexId, RawProfile};

/// Session-stored user identity.
///
/// The whole signed-in identity lives under one session key and is read
/// and written wholesale: created on login, destroyed on logout, and
/// treated as absent if the stored data no longer deserializes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Bearer token for backend requests.
    pub token: String,
    /// Account id, when the backend reports one.
    pub user_id: Option<i64>,
    /// Login username.
    pub username: String,
    /// Display name.
    pub name: String,
    /// Raw role string as issued by the backend.
    pub role: String,
    /// Linked chef profile id, for self-registration.
    pub chef_id: Option<i64>,
}

impl CurrentUser {
    /// Build a session identity from a profile payload and its token.
    #[must_use]
    pub fn from_profile(token: String, profile: &RawProfile) -> Self {
        let username = profile.username.clone().unwrap_or_default();
        Self {
            token,
            user_id: profile.id.as_ref().and_then(FlexId::as_i64),
            name: profile.name.clone().unwrap_or_else(|| username.clone()),
            username,
            role: profile.role.clone().unwrap_or_default(),
            chef_id: profile.chef_id.as_ref().and_then(FlexId::as_i64),
        }
    }

    /// Capability tier for this identity.
    #[must_use]
    pub fn role_tier(&self) -> RoleTier {
        RoleTier::classify(Some(&self.role))
    }

    /// Whether this identity counts as logged in (non-empty token).
    #[must_use]
    pub fn is_logged(&self) -> bool {
        !self.token.is_empty()
    }

    /// The chef identity this user may self-register as.
    ///
    /// A visitor falls back to their account id when no chef profile is
    /// linked; other tiers only ever register their explicit chef id.
    #[must_use]
    pub fn chef_identity(&self) -> Option<i64> {
        if self.role_tier().is_visitor() {
            self.chef_id.or(self.user_id)
        } else {
            self.chef_id
        }
    }
}

/// Session keys for authentication data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn user(role: &str) -> CurrentUser {
        CurrentUser {
            token: "tok".to_string(),
            user_id: Some(21),
            username: "ana".to_string(),
            name: "Ana".to_string(),
            role: role.to_string(),
            chef_id: None,
        }
    }

    #[test]
    fn test_round_trip_through_session_storage() {
        let original = user("visitor");
        let stored = serde_json::to_value(&original).unwrap();
        let loaded: CurrentUser = serde_json::from_value(stored).unwrap();
        assert_eq!(loaded.username, original.username);
        assert_eq!(loaded.token, original.token);
        assert_eq!(loaded.chef_identity(), original.chef_identity());
    }

    #[test]
    fn test_corrupt_stored_data_is_not_an_identity() {
        let corrupt = serde_json::json!({ "token": 42, "username": [] });
        let loaded = serde_json::from_value::<CurrentUser>(corrupt);
        // The extractors treat this as "no session" via .ok().flatten().
        assert!(loaded.is_err());
    }

    #[test]
    fn test_empty_token_is_not_logged() {
        let mut anonymous = user("visitor");
        anonymous.token = String::new();
        assert!(!anonymous.is_logged());
        assert!(user("visitor").is_logged());
    }

    #[test]
    fn test_visitor_chef_identity_falls_back_to_account_id() {
        let visitor = user("visitor");
        assert_eq!(visitor.chef_identity(), Some(21));

        let mut linked = user("visitor");
        linked.chef_id = Some(5);
        assert_eq!(linked.chef_identity(), Some(5));
    }

    #[test]
    fn test_non_visitor_has_no_account_id_fallback() {
        let admin = user("admin");
        assert_eq!(admin.chef_identity(), None);
    }

    #[test]
    fn test_from_profile_defaults_name_to_username() {
        let profile: RawProfile =
            serde_json::from_value(serde_json::json!({ "username": "ana", "role": "visitor" }))
                .unwrap();
        let current = CurrentUser::from_profile("tok".to_string(), &profile);
        assert_eq!(current.name, "ana");
        assert!(current.role_tier().is_visitor());
    }
}
