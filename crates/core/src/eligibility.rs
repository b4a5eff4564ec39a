//! Registration eligibility.
//!
//! Determines which chefs a given viewer may submit for tournament
//! registration, and re-validates the actual submission. The read side
//! ([`eligible_chefs`]) is total and never fails; the write side
//! ([`validate_registration`]) is the one place in the core that signals
//! errors, because a submitted selection can be stale or tampered with
//! even when the candidate set was already filtered.

use thiserror::Error;

use crate::types::chef::Chef;
use crate::types::id::ChefId;
use crate::types::role::RoleTier;

/// Why a registration submission was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    /// No chef was chosen.
    #[error("select a chef to register")]
    SelectionRequired,

    /// The viewer's tier carries no registration capability.
    #[error("your role does not permit registering chefs")]
    NotPermitted,

    /// A visitor without a resolvable chef identity cannot self-register.
    #[error("no chef profile is linked to your account")]
    ProfileUnavailable,

    /// A visitor tried to register a chef other than themselves.
    #[error("you can only register your own chef profile")]
    NotOwnProfile,
}

/// Compute the chefs `viewer` may register into a tournament.
///
/// The base candidate set is `all_chefs` minus those already in
/// `registered`, sorted by name ascending (case-insensitive). An admin
/// sees the whole set; a visitor sees at most their own chef profile,
/// matched by `viewer_identity` against a candidate's id or any of its
/// alias ids; a guest sees nothing.
///
/// `viewer_identity` is the viewer's resolved chef identity: their
/// `chef_id` when set, else their account id (see
/// `CurrentUser::chef_identity` in the web crate).
#[must_use]
pub fn eligible_chefs(
    tier: RoleTier,
    viewer_identity: Option<i64>,
    all_chefs: &[Chef],
    registered: &[ChefId],
) -> Vec<Chef> {
    let mut base: Vec<Chef> = all_chefs
        .iter()
        .filter(|chef| !registered.contains(&chef.id))
        .cloned()
        .collect();
    base.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));

    match tier {
        RoleTier::Admin => base,
        RoleTier::Visitor => {
            let Some(identity) = viewer_identity else {
                return Vec::new();
            };
            base.into_iter()
                .find(|chef| chef.matches_identity(identity))
                .map_or_else(Vec::new, |chef| vec![chef])
        }
        RoleTier::Guest => Vec::new(),
    }
}

/// Re-validate a registration submission.
///
/// `chosen` is the chef record the submitted id resolved to (`None` when
/// nothing was chosen or the id matched no known chef). Succeeds with the
/// chef id to send to the backend, or explains the rejection.
///
/// # Errors
///
/// - [`RegistrationError::SelectionRequired`] when no chef was chosen.
/// - [`RegistrationError::NotPermitted`] for guest-tier viewers.
/// - [`RegistrationError::ProfileUnavailable`] for a visitor with no
///   resolvable chef identity.
/// - [`RegistrationError::NotOwnProfile`] for a visitor whose selection is
///   not their own profile under any alias id.
pub fn validate_registration(
    tier: RoleTier,
    viewer_identity: Option<i64>,
    chosen: Option<&Chef>,
) -> Result<ChefId, RegistrationError> {
    let chosen = chosen.ok_or(RegistrationError::SelectionRequired)?;

    match tier {
        RoleTier::Admin => Ok(chosen.id),
        RoleTier::Guest => Err(RegistrationError::NotPermitted),
        RoleTier::Visitor => {
            let identity = viewer_identity.ok_or(RegistrationError::ProfileUnavailable)?;
            if chosen.matches_identity(identity) {
                Ok(chosen.id)
            } else {
                Err(RegistrationError::NotOwnProfile)
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn chef(id: i64, name: &str) -> Chef {
        Chef {
            id: ChefId::new(id),
            name: name.to_string(),
            specialty: None,
            experience: None,
            user_id: None,
            account_id: None,
            chef_id: None,
        }
    }

    #[test]
    fn test_admin_sees_unregistered_chefs_sorted_by_name() {
        let all = vec![chef(3, "Carla"), chef(1, "ana"), chef(2, "Bruno")];
        let registered = vec![ChefId::new(2)];
        let eligible = eligible_chefs(RoleTier::Admin, None, &all, &registered);
        let names: Vec<_> = eligible.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["ana", "Carla"]);
    }

    #[test]
    fn test_visitor_sees_only_own_profile() {
        let all = vec![chef(4, "Ana"), chef(5, "Bruno")];
        let eligible = eligible_chefs(RoleTier::Visitor, Some(5), &all, &[]);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, ChefId::new(5));
    }

    #[test]
    fn test_visitor_already_registered_sees_nothing() {
        let all = vec![chef(5, "Bruno")];
        let registered = vec![ChefId::new(5)];
        assert!(eligible_chefs(RoleTier::Visitor, Some(5), &all, &registered).is_empty());
    }

    #[test]
    fn test_visitor_matches_alias_ids() {
        let mut own = chef(8, "Dana");
        own.user_id = Some(21);
        let eligible = eligible_chefs(RoleTier::Visitor, Some(21), &[own], &[]);
        assert_eq!(eligible.len(), 1);
    }

    #[test]
    fn test_visitor_without_identity_sees_nothing() {
        let all = vec![chef(5, "Bruno")];
        assert!(eligible_chefs(RoleTier::Visitor, None, &all, &[]).is_empty());
    }

    #[test]
    fn test_guest_sees_nothing() {
        let all = vec![chef(5, "Bruno")];
        assert!(eligible_chefs(RoleTier::Guest, Some(5), &all, &[]).is_empty());
    }

    #[test]
    fn test_validate_requires_selection() {
        assert_eq!(
            validate_registration(RoleTier::Admin, None, None),
            Err(RegistrationError::SelectionRequired)
        );
    }

    #[test]
    fn test_validate_admin_accepts_any_chef() {
        let other = chef(9, "Elena");
        assert_eq!(
            validate_registration(RoleTier::Admin, None, Some(&other)),
            Ok(ChefId::new(9))
        );
    }

    #[test]
    fn test_validate_visitor_rejects_foreign_selection() {
        let other = chef(9, "Elena");
        assert_eq!(
            validate_registration(RoleTier::Visitor, Some(5), Some(&other)),
            Err(RegistrationError::NotOwnProfile)
        );
    }

    #[test]
    fn test_validate_visitor_without_identity() {
        let own = chef(5, "Bruno");
        assert_eq!(
            validate_registration(RoleTier::Visitor, None, Some(&own)),
            Err(RegistrationError::ProfileUnavailable)
        );
    }

    #[test]
    fn test_validate_visitor_accepts_own_profile_via_alias() {
        let mut own = chef(8, "Dana");
        own.account_id = Some(21);
        assert_eq!(
            validate_registration(RoleTier::Visitor, Some(21), Some(&own)),
            Ok(ChefId::new(8))
        );
    }

    #[test]
    fn test_validate_guest_is_rejected() {
        let own = chef(5, "Bruno");
        assert_eq!(
            validate_registration(RoleTier::Guest, Some(5), Some(&own)),
            Err(RegistrationError::NotPermitted)
        );
    }
}
