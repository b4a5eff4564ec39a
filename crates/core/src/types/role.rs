//! Viewer role classification.
//!
//! The backend hands out roles as free-form strings ("admin", "chef_admin",
//! "Visitor", ...). Everything that gates behavior works on the closed
//! [`RoleTier`] set instead, so an unrecognized role can never acquire
//! capabilities by accident.

use serde::{Deserialize, Serialize};

/// Role strings that classify as admin tier.
const ADMIN_ALIASES: &[&str] = &["admin", "chef_admin", "chef-admin"];

/// Capability tier derived from a raw role string.
///
/// Classification is total: any string (or no string at all) maps to
/// exactly one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RoleTier {
    /// Full tournament/chef management rights.
    Admin,
    /// Authenticated viewer limited to self-registration.
    Visitor,
    /// Unauthenticated or unrecognized role.
    #[default]
    Guest,
}

impl RoleTier {
    /// Classify a raw role string into a tier.
    ///
    /// Matching is case-insensitive; `None`, the empty string, and any
    /// unrecognized value all classify as [`RoleTier::Guest`].
    #[must_use]
    pub fn classify(role: Option<&str>) -> Self {
        let normalized = role.unwrap_or_default().to_lowercase();
        if ADMIN_ALIASES.contains(&normalized.as_str()) {
            Self::Admin
        } else if normalized == "visitor" {
            Self::Visitor
        } else {
            Self::Guest
        }
    }

    /// Whether this tier carries admin capabilities.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Whether this tier is a self-registration-only visitor.
    #[must_use]
    pub const fn is_visitor(self) -> bool {
        matches!(self, Self::Visitor)
    }

    /// Whether this tier carries no capabilities.
    #[must_use]
    pub const fn is_guest(self) -> bool {
        matches!(self, Self::Guest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_admin_aliases_case_insensitive() {
        for alias in ["admin", "ADMIN", "Chef_Admin", "chef-admin", "CHEF-ADMIN"] {
            let tier = RoleTier::classify(Some(alias));
            assert_eq!(tier, RoleTier::Admin, "alias {alias} should be admin");
            assert!(tier.is_admin());
            assert!(!tier.is_visitor());
        }
    }

    #[test]
    fn test_classify_visitor() {
        assert_eq!(RoleTier::classify(Some("visitor")), RoleTier::Visitor);
        assert_eq!(RoleTier::classify(Some("Visitor")), RoleTier::Visitor);
    }

    #[test]
    fn test_classify_is_total() {
        assert_eq!(RoleTier::classify(None), RoleTier::Guest);
        assert_eq!(RoleTier::classify(Some("")), RoleTier::Guest);
        assert_eq!(RoleTier::classify(Some("superuser")), RoleTier::Guest);
        assert_eq!(RoleTier::classify(Some("admin ")), RoleTier::Guest);
    }

    #[test]
    fn test_tiers_are_mutually_exclusive() {
        for role in [None, Some("admin"), Some("visitor"), Some("whatever")] {
            let tier = RoleTier::classify(role);
            let flags = [tier.is_admin(), tier.is_visitor(), tier.is_guest()];
            assert_eq!(flags.iter().filter(|&&f| f).count(), 1, "role {role:?}");
        }
    }
}
