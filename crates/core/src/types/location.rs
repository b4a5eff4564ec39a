//! Location types and display-name resolution.
//!
//! The backend is inconsistent about how a tournament's venue arrives: a
//! plain name, a bare id (number or numeric string), a nested object, or
//! nothing at all. [`LocationRef`] is the canonical form every variant is
//! normalized into, and [`LocationDirectory`] turns a ref into a display
//! name with an explicit, ordered fallback policy.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::types::id::LocationId;

/// Display value for a record with no location data and no known venues.
pub const NOT_REGISTERED: &str = "Not registered";

/// Display value for a location object that carried neither name nor id.
pub const NO_NAME_ASSIGNED: &str = "No name assigned";

/// A known venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Unique location ID.
    pub id: LocationId,
    /// Venue display name.
    pub name: String,
}

/// Canonical form of a record's location field.
///
/// Normalization at the client boundary maps every backend shape into one
/// of these variants; nothing past that boundary needs to care what the
/// wire actually carried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LocationRef {
    /// No location data at all (absent, null, or empty string).
    #[default]
    Unspecified,
    /// An explicit venue name.
    Named(String),
    /// A reference to a venue by id, resolved against the directory.
    Id(String),
    /// A location object that carried neither a name nor an id.
    Unnamed,
}

/// Lookup table of known venue names, keyed by id.
///
/// Preserves insertion order so that pseudo-assignment (picking a display
/// name for a record with no location data) is stable for the lifetime of
/// the directory.
#[derive(Debug, Clone, Default)]
pub struct LocationDirectory {
    names: Vec<String>,
    by_id: HashMap<String, String>,
}

impl LocationDirectory {
    /// Build a directory from known venues, skipping entries whose name is
    /// empty.
    #[must_use]
    pub fn new(locations: &[Location]) -> Self {
        let mut names = Vec::with_capacity(locations.len());
        let mut by_id = HashMap::with_capacity(locations.len());
        for location in locations {
            if location.name.is_empty() {
                continue;
            }
            names.push(location.name.clone());
            by_id.insert(location.id.to_string(), location.name.clone());
        }
        Self { names, by_id }
    }

    /// Whether the directory knows no venues.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Number of known venues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Look up a venue name by id key.
    #[must_use]
    pub fn name_for(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Resolve a location ref to a display name.
    ///
    /// Resolution policy, in priority order:
    /// 1. `Unspecified`: pseudo-assign one of the known venue names from
    ///    the record's identity, or [`NOT_REGISTERED`] if no venues are
    ///    known.
    /// 2. `Named`: the name, verbatim.
    /// 3. `Id`: directory lookup, falling back to `"ID <id>"` when the id
    ///    is unknown.
    /// 4. `Unnamed`: [`NO_NAME_ASSIGNED`].
    ///
    /// Total over all inputs, and deterministic for a fixed directory.
    #[must_use]
    pub fn resolve(
        &self,
        location: &LocationRef,
        record_id: Option<i64>,
        record_name: &str,
    ) -> String {
        match location {
            LocationRef::Unspecified => self
                .pseudo_assign(record_id, record_name)
                .map_or_else(|| NOT_REGISTERED.to_string(), str::to_string),
            LocationRef::Named(name) => name.clone(),
            LocationRef::Id(id) => self
                .name_for(id)
                .map_or_else(|| format!("ID {id}"), str::to_string),
            LocationRef::Unnamed => NO_NAME_ASSIGNED.to_string(),
        }
    }

    /// Deterministically pick a venue name for a record with no location
    /// data, so the same record always shows the same venue while this
    /// directory is alive.
    ///
    /// A non-negative numeric record id indexes the name list directly;
    /// otherwise a byte-sum hash of the record name does. Returns `None`
    /// when the directory is empty.
    fn pseudo_assign(&self, record_id: Option<i64>, record_name: &str) -> Option<&str> {
        if self.names.is_empty() {
            return None;
        }
        let len = self.names.len() as u64;
        let index = match record_id {
            Some(id) if id >= 0 => id.unsigned_abs() % len,
            _ => {
                let key = if record_name.is_empty() { "0" } else { record_name };
                let hash: u64 = key.bytes().map(u64::from).sum();
                hash % len
            }
        };
        self.names.get(usize::try_from(index).ok()?).map(String::as_str)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn directory() -> LocationDirectory {
        LocationDirectory::new(&[
            Location {
                id: LocationId::new(1),
                name: "Market Hall".to_string(),
            },
            Location {
                id: LocationId::new(2),
                name: "Harbor Kitchen".to_string(),
            },
            Location {
                id: LocationId::new(3),
                name: "Old Mill".to_string(),
            },
        ])
    }

    #[test]
    fn test_named_returned_verbatim() {
        let dir = directory();
        let named = LocationRef::Named("Plaza Central".to_string());
        assert_eq!(dir.resolve(&named, Some(1), "x"), "Plaza Central");
    }

    #[test]
    fn test_id_lookup_hit_and_miss() {
        let dir = directory();
        assert_eq!(
            dir.resolve(&LocationRef::Id("2".to_string()), None, ""),
            "Harbor Kitchen"
        );
        assert_eq!(
            dir.resolve(&LocationRef::Id("99".to_string()), None, ""),
            "ID 99"
        );
    }

    #[test]
    fn test_unspecified_empty_directory_is_sentinel() {
        let dir = LocationDirectory::default();
        assert_eq!(
            dir.resolve(&LocationRef::Unspecified, Some(7), "Torneo"),
            NOT_REGISTERED
        );
    }

    #[test]
    fn test_unnamed_object_is_sentinel() {
        let dir = directory();
        assert_eq!(dir.resolve(&LocationRef::Unnamed, Some(7), ""), NO_NAME_ASSIGNED);
    }

    #[test]
    fn test_pseudo_assignment_by_numeric_id() {
        let dir = directory();
        // 4 % 3 == 1 -> second venue
        assert_eq!(
            dir.resolve(&LocationRef::Unspecified, Some(4), ""),
            "Harbor Kitchen"
        );
    }

    #[test]
    fn test_pseudo_assignment_is_deterministic() {
        let dir = directory();
        let first = dir.resolve(&LocationRef::Unspecified, None, "Grand Prix");
        let second = dir.resolve(&LocationRef::Unspecified, None, "Grand Prix");
        assert_eq!(first, second);
        assert!(dir.names.contains(&first));
    }

    #[test]
    fn test_pseudo_assignment_negative_id_falls_back_to_name_hash() {
        let dir = directory();
        let by_name = dir.resolve(&LocationRef::Unspecified, Some(-1), "Grand Prix");
        let by_hash = dir.resolve(&LocationRef::Unspecified, None, "Grand Prix");
        assert_eq!(by_name, by_hash);
    }

    #[test]
    fn test_directory_skips_empty_names() {
        let dir = LocationDirectory::new(&[
            Location {
                id: LocationId::new(1),
                name: String::new(),
            },
            Location {
                id: LocationId::new(2),
                name: "Harbor Kitchen".to_string(),
            },
        ]);
        assert_eq!(dir.len(), 1);
        assert!(dir.name_for("1").is_none());
    }
}
