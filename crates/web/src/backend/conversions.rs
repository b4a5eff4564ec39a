//! Conversion of raw backend payloads into canonical core types.
//!
//! Every function here is total: unknown or partial shapes degrade to the
//! canonical absent variants, never to an error. Records that lack the one
//! thing nothing can be done without (an id) are skipped with a warning.

use chrono::{DateTime, Utc};

use chefclash_core::{
    Chef, ChefId, LocationId, LocationRef, RankingEntry, Registration, Tournament, TournamentId,
};

use super::types::{
    FlexId, FlexNumber, RawChef, RawLocation, RawLocationField, RawRankingEntry, RawRegistration,
    RawScore, RawTournament, ScoreRow,
};

/// First finite value out of a chain of coordinate aliases.
fn first_coordinate(sources: &[Option<&FlexNumber>]) -> Option<f64> {
    sources
        .iter()
        .filter_map(|source| *source)
        .find_map(FlexNumber::as_f64)
}

/// First non-negative integer out of a chain of capacity aliases.
fn first_capacity(sources: &[Option<&FlexNumber>]) -> Option<u32> {
    sources
        .iter()
        .filter_map(|source| *source)
        .find_map(FlexNumber::as_f64)
        .and_then(|value| {
            if value >= 0.0 && value.fract() == 0.0 {
                u32::try_from(value as i64).ok()
            } else {
                None
            }
        })
}

/// Normalize the `location` field (or its `locationId` sibling) into a
/// [`LocationRef`].
///
/// Resolution of the wire shapes, in order: absent/null/empty string maps
/// to `Unspecified`; an object prefers an explicit name/title/label, then
/// an id, then `Unnamed`; a bare number or all-digit string is an id
/// reference; any other string is a venue name, verbatim.
#[must_use]
pub fn convert_location(
    location: Option<&RawLocationField>,
    location_id: Option<&FlexId>,
) -> LocationRef {
    match location {
        None => location_id.map_or(LocationRef::Unspecified, |id| LocationRef::Id(id.as_key())),
        Some(RawLocationField::Object(object)) => {
            let name = [&object.name, &object.title, &object.label]
                .into_iter()
                .find_map(|field| field.as_deref().filter(|value| !value.is_empty()));
            if let Some(name) = name {
                return LocationRef::Named(name.to_string());
            }
            object
                .id
                .as_ref()
                .or(object.location_id.as_ref())
                .map_or(LocationRef::Unnamed, |id| LocationRef::Id(id.as_key()))
        }
        Some(RawLocationField::Number(id)) => LocationRef::Id(id.to_string()),
        Some(RawLocationField::Text(text)) => {
            if text.is_empty() {
                LocationRef::Unspecified
            } else if text.chars().all(|c| c.is_ascii_digit()) {
                LocationRef::Id(text.clone())
            } else {
                LocationRef::Named(text.clone())
            }
        }
    }
}

/// Normalize a roster entry, tolerating the flat and nested variants.
///
/// Returns `None` when no id can be found under any alias.
#[must_use]
pub fn convert_registration(entry: &RawRegistration) -> Option<Registration> {
    let base = entry.chef.as_ref().or(entry.participant.as_ref());

    let id = entry
        .chef_id
        .as_ref()
        .or_else(|| base.and_then(|chef| chef.id.as_ref()))
        .or(entry.id.as_ref())
        .and_then(FlexId::as_i64)?;

    let name = base
        .and_then(|chef| chef.name.clone())
        .or_else(|| entry.chef_name.clone())
        .or_else(|| entry.name.clone())
        .unwrap_or_else(|| "Unnamed chef".to_string());

    let specialty = base
        .and_then(|chef| chef.specialty.clone())
        .or_else(|| entry.specialty.clone())
        .filter(|value| !value.is_empty());

    let score = entry
        .score
        .as_ref()
        .or_else(|| entry.result.as_ref().and_then(|result| result.score.as_ref()))
        .or_else(|| base.and_then(|chef| chef.score.as_ref()))
        .and_then(FlexNumber::as_f64);

    let notes = entry
        .notes
        .clone()
        .or_else(|| entry.result.as_ref().and_then(|result| result.notes.clone()))
        .or_else(|| base.and_then(|chef| chef.notes.clone()));

    Some(Registration {
        chef_id: ChefId::new(id),
        name,
        specialty,
        score,
        notes,
    })
}

/// Normalize a tournament record.
#[must_use]
pub fn convert_tournament(raw: &RawTournament) -> Tournament {
    let id = raw.id.as_i64().unwrap_or_default();

    let name = raw
        .name
        .clone()
        .or_else(|| raw.title.clone())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| format!("Tournament {}", raw.id.as_key()));

    let location = convert_location(raw.location.as_ref(), raw.location_id.as_ref());

    let capacity = first_capacity(&[
        raw.max_participants.as_ref(),
        raw.max_chefs.as_ref(),
        raw.capacity.as_ref(),
        raw.limit.as_ref(),
    ]);

    let date = raw.date.as_deref().and_then(parse_date);

    let location_object = match raw.location.as_ref() {
        Some(RawLocationField::Object(object)) => Some(object.as_ref()),
        _ => None,
    };
    let lat = first_coordinate(&[
        raw.lat.as_ref(),
        raw.latitude.as_ref(),
        location_object.and_then(|object| object.lat.as_ref()),
        location_object.and_then(|object| object.latitude.as_ref()),
        raw.location_lat.as_ref(),
    ]);
    let lon = first_coordinate(&[
        raw.lon.as_ref(),
        raw.lng.as_ref(),
        raw.longitude.as_ref(),
        location_object.and_then(|object| object.lon.as_ref()),
        location_object.and_then(|object| object.lng.as_ref()),
        location_object.and_then(|object| object.longitude.as_ref()),
        raw.location_lon.as_ref(),
    ]);

    let roster = raw
        .registered_chefs
        .as_ref()
        .or(raw.participants.as_ref())
        .or(raw.chefs.as_ref());
    let registrations = roster
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| {
                    let converted = convert_registration(entry);
                    if converted.is_none() {
                        tracing::warn!(tournament = id, "roster entry without chef id, skipping");
                    }
                    converted
                })
                .collect()
        })
        .unwrap_or_default();

    Tournament {
        id: TournamentId::new(id),
        name,
        description: raw.description.clone().filter(|value| !value.is_empty()),
        location,
        capacity,
        date,
        lat,
        lon,
        image: raw.image.clone().filter(|value| !value.is_empty()),
        registrations,
    }
}

/// Score-table rows for a tournament: the `scores`/`results` arrays when
/// present, otherwise derived from registrations that carry a score.
#[must_use]
pub fn convert_score_rows(raw: &RawTournament, registrations: &[Registration]) -> Vec<ScoreRow> {
    let table = raw.scores.as_ref().or(raw.results.as_ref());
    if let Some(rows) = table {
        return rows.iter().map(convert_score_row).collect();
    }
    registrations
        .iter()
        .filter(|registration| registration.score.is_some())
        .map(|registration| ScoreRow {
            chef_id: Some(registration.chef_id.as_i64()),
            chef_name: registration.name.clone(),
            score: registration.score,
            notes: registration.notes.clone(),
        })
        .collect()
}

fn convert_score_row(row: &RawScore) -> ScoreRow {
    let chef_id = row
        .chef_id
        .as_ref()
        .or_else(|| row.chef.as_ref().and_then(|chef| chef.id.as_ref()))
        .or(row.id.as_ref())
        .and_then(FlexId::as_i64);
    let chef_name = row
        .chef_name
        .clone()
        .or_else(|| row.chef.as_ref().and_then(|chef| chef.name.clone()))
        .or_else(|| row.name.clone())
        .unwrap_or_else(|| "—".to_string());
    ScoreRow {
        chef_id,
        chef_name,
        score: row.score.as_ref().and_then(FlexNumber::as_f64),
        notes: row.notes.clone(),
    }
}

/// Normalize a chef record. Returns `None` when the record has no id.
#[must_use]
pub fn convert_chef(raw: &RawChef) -> Option<Chef> {
    let id = raw.id.as_ref().and_then(FlexId::as_i64)?;
    let experience = raw
        .experience
        .as_ref()
        .or(raw.experience_years.as_ref())
        .and_then(FlexNumber::as_f64)
        .and_then(|value| {
            if value >= 0.0 {
                u32::try_from(value as i64).ok()
            } else {
                None
            }
        });
    Some(Chef {
        id: ChefId::new(id),
        name: raw
            .name
            .clone()
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| "Unnamed chef".to_string()),
        specialty: raw.specialty.clone().filter(|value| !value.is_empty()),
        experience,
        user_id: raw.user_id.as_ref().and_then(FlexId::as_i64),
        account_id: raw.account_id.as_ref().and_then(FlexId::as_i64),
        chef_id: raw.chef_id.as_ref().and_then(FlexId::as_i64),
    })
}

/// Normalize a venue record for the location directory.
#[must_use]
pub fn convert_venue(raw: &RawLocation) -> chefclash_core::Location {
    let name = [&raw.name, &raw.title, &raw.label]
        .into_iter()
        .find_map(|field| field.clone().filter(|value| !value.is_empty()))
        .unwrap_or_default();
    chefclash_core::Location {
        id: LocationId::new(raw.id.as_i64().unwrap_or_default()),
        name,
    }
}

/// Normalize a leaderboard row.
#[must_use]
pub fn convert_ranking_entry(raw: &RawRankingEntry) -> RankingEntry {
    RankingEntry {
        chef_id: raw
            .chef_id
            .as_ref()
            .or(raw.id.as_ref())
            .and_then(FlexId::as_i64)
            .map(ChefId::new),
        chef_name: raw
            .chef_name
            .clone()
            .or_else(|| raw.name.clone())
            .unwrap_or_else(|| "—".to_string()),
        score: raw.score.as_ref().and_then(FlexNumber::as_f64),
    }
}

/// Parse the backend's date strings (RFC 3339, with a date-only fallback).
fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn tournament_from(json: serde_json::Value) -> Tournament {
        let raw: RawTournament = serde_json::from_value(json).unwrap();
        convert_tournament(&raw)
    }

    #[test]
    fn test_capacity_aliases() {
        for field in ["maxParticipants", "maxChefs", "capacity", "limit"] {
            let t = tournament_from(serde_json::json!({ "id": 1, "name": "T", field: 12 }));
            assert_eq!(t.capacity, Some(12), "alias {field}");
        }
        let unlimited = tournament_from(serde_json::json!({ "id": 1, "name": "T" }));
        assert_eq!(unlimited.capacity, None);
    }

    #[test]
    fn test_roster_aliases_and_nesting() {
        let t = tournament_from(serde_json::json!({
            "id": 1,
            "name": "T",
            "participants": [
                { "chef": { "id": "7", "name": "Ana", "specialty": "Pastry" } },
                { "chefId": 8, "chefName": "Bruno", "result": { "score": "88", "notes": "solid" } },
                { "specialty": "no id at all" },
            ],
        }));
        assert_eq!(t.registrations.len(), 2);
        assert_eq!(t.registrations[0].chef_id, ChefId::new(7));
        assert_eq!(t.registrations[0].name, "Ana");
        assert_eq!(t.registrations[1].score, Some(88.0));
        assert_eq!(t.registrations[1].notes.as_deref(), Some("solid"));
    }

    #[test]
    fn test_location_variants() {
        let named = tournament_from(serde_json::json!({ "id": 1, "location": "Market Hall" }));
        assert_eq!(named.location, LocationRef::Named("Market Hall".to_string()));

        let by_number = tournament_from(serde_json::json!({ "id": 1, "location": 3 }));
        assert_eq!(by_number.location, LocationRef::Id("3".to_string()));

        let by_digit_string = tournament_from(serde_json::json!({ "id": 1, "location": "42" }));
        assert_eq!(by_digit_string.location, LocationRef::Id("42".to_string()));

        let object_named = tournament_from(
            serde_json::json!({ "id": 1, "location": { "title": "Old Mill", "id": 9 } }),
        );
        assert_eq!(object_named.location, LocationRef::Named("Old Mill".to_string()));

        let object_by_id = tournament_from(serde_json::json!({ "id": 1, "location": { "id": 9 } }));
        assert_eq!(object_by_id.location, LocationRef::Id("9".to_string()));

        let object_empty = tournament_from(serde_json::json!({ "id": 1, "location": {} }));
        assert_eq!(object_empty.location, LocationRef::Unnamed);

        let sibling = tournament_from(serde_json::json!({ "id": 1, "locationId": "5" }));
        assert_eq!(sibling.location, LocationRef::Id("5".to_string()));

        let absent = tournament_from(serde_json::json!({ "id": 1 }));
        assert_eq!(absent.location, LocationRef::Unspecified);

        let empty = tournament_from(serde_json::json!({ "id": 1, "location": "" }));
        assert_eq!(empty.location, LocationRef::Unspecified);
    }

    #[test]
    fn test_coordinates_from_nested_object_and_strings() {
        let t = tournament_from(serde_json::json!({
            "id": 1,
            "location": { "name": "Pier", "latitude": "4.61", "lng": -74.08 },
        }));
        assert_eq!(t.lat, Some(4.61));
        assert_eq!(t.lon, Some(-74.08));
    }

    #[test]
    fn test_string_and_numeric_ids() {
        let raw: RawChef =
            serde_json::from_value(serde_json::json!({ "id": "15", "name": "Ana", "userId": 4 }))
                .unwrap();
        let chef = convert_chef(&raw).unwrap();
        assert_eq!(chef.id, ChefId::new(15));
        assert_eq!(chef.user_id, Some(4));
    }

    #[test]
    fn test_chef_without_id_is_skipped() {
        let raw: RawChef = serde_json::from_value(serde_json::json!({ "name": "Ana" })).unwrap();
        assert!(convert_chef(&raw).is_none());
    }

    #[test]
    fn test_score_rows_fall_back_to_registrations() {
        let raw: RawTournament = serde_json::from_value(serde_json::json!({
            "id": 1,
            "registeredChefs": [
                { "chefId": 1, "chefName": "Ana", "score": 91 },
                { "chefId": 2, "chefName": "Bruno" },
            ],
        }))
        .unwrap();
        let tournament = convert_tournament(&raw);
        let rows = convert_score_rows(&raw, &tournament.registrations);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].chef_name, "Ana");
        assert_eq!(rows[0].score, Some(91.0));
    }

    #[test]
    fn test_score_rows_prefer_explicit_table() {
        let raw: RawTournament = serde_json::from_value(serde_json::json!({
            "id": 1,
            "results": [{ "chefId": 3, "name": "Carla", "score": "77.5" }],
        }))
        .unwrap();
        let rows = convert_score_rows(&raw, &[]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].chef_name, "Carla");
        assert_eq!(rows[0].score, Some(77.5));
    }

    #[test]
    fn test_ranking_entry_name_aliases() {
        let raw: RawRankingEntry =
            serde_json::from_value(serde_json::json!({ "id": 2, "name": "Bruno", "score": 95 }))
                .unwrap();
        let entry = convert_ranking_entry(&raw);
        assert_eq!(entry.chef_id, Some(ChefId::new(2)));
        assert_eq!(entry.chef_name, "Bruno");
        assert_eq!(entry.score, Some(95.0));
    }

    #[test]
    fn test_tournament_name_fallbacks() {
        let titled = tournament_from(serde_json::json!({ "id": 1, "title": "Autumn Cup" }));
        assert_eq!(titled.name, "Autumn Cup");
        let unnamed = tournament_from(serde_json::json!({ "id": 9 }));
        assert_eq!(unnamed.name, "Tournament 9");
    }

    #[test]
    fn test_date_parsing() {
        let rfc = tournament_from(
            serde_json::json!({ "id": 1, "date": "2026-03-14T18:00:00Z" }),
        );
        assert!(rfc.date.is_some());
        let plain = tournament_from(serde_json::json!({ "id": 1, "date": "2026-03-14" }));
        assert!(plain.date.is_some());
        let junk = tournament_from(serde_json::json!({ "id": 1, "date": "soon" }));
        assert!(junk.date.is_none());
    }
}
