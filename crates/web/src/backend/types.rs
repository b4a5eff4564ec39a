//! Raw wire types for the tournament backend.
//!
//! The backend is loose about shapes: ids arrive as numbers or strings,
//! the same field travels under several names, and optional structures are
//! sometimes flattened and sometimes nested. Everything in this module is
//! deliberately permissive; `conversions` maps it into the canonical
//! `chefclash-core` types and nothing else ever sees these.

use serde::Deserialize;

// =============================================================================
// Flexible scalars
// =============================================================================

/// An id that may arrive as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlexId {
    /// Numeric id.
    Int(i64),
    /// String id (usually numeric text).
    Text(String),
}

impl FlexId {
    /// The id as an `i64`, if it is numeric.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }

    /// The id as a lookup key (the canonical string form).
    #[must_use]
    pub fn as_key(&self) -> String {
        match self {
            Self::Int(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// A number that may arrive as a JSON number or numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FlexNumber {
    /// Plain number.
    Num(f64),
    /// Numeric text.
    Text(String),
}

impl FlexNumber {
    /// The value as a finite `f64`, if it parses as one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Self::Num(value) => *value,
            Self::Text(text) => text.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

// =============================================================================
// Auth payloads
// =============================================================================

/// Response body of `POST /api/users/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Bearer token, absent on malformed responses.
    #[serde(default)]
    pub token: Option<String>,
    /// User summary included with the login response.
    #[serde(default)]
    pub user: Option<RawProfile>,
}

/// A user profile as returned by login or `GET /api/users/profile`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawProfile {
    #[serde(default)]
    pub id: Option<FlexId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, rename = "chefId")]
    pub chef_id: Option<FlexId>,
}

/// Error body the backend attaches to failure responses.
#[derive(Debug, Clone, Deserialize)]
pub struct RawErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Tournament payloads
// =============================================================================

/// A tournament as the backend sends it, aliases and all.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTournament {
    pub id: FlexId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub date: Option<String>,

    /// Location: name, bare id, nested object, or absent.
    #[serde(default)]
    pub location: Option<RawLocationField>,
    /// Sibling id field some payloads use instead of `location`.
    #[serde(default, rename = "locationId")]
    pub location_id: Option<FlexId>,

    // Capacity aliases, first match wins.
    #[serde(default, rename = "maxParticipants")]
    pub max_participants: Option<FlexNumber>,
    #[serde(default, rename = "maxChefs")]
    pub max_chefs: Option<FlexNumber>,
    #[serde(default)]
    pub capacity: Option<FlexNumber>,
    #[serde(default)]
    pub limit: Option<FlexNumber>,

    // Roster aliases, first match wins.
    #[serde(default, rename = "registeredChefs")]
    pub registered_chefs: Option<Vec<RawRegistration>>,
    #[serde(default)]
    pub participants: Option<Vec<RawRegistration>>,
    #[serde(default)]
    pub chefs: Option<Vec<RawRegistration>>,

    // Score-table aliases.
    #[serde(default)]
    pub scores: Option<Vec<RawScore>>,
    #[serde(default)]
    pub results: Option<Vec<RawScore>>,

    // Coordinate aliases, top-level variants.
    #[serde(default)]
    pub lat: Option<FlexNumber>,
    #[serde(default)]
    pub latitude: Option<FlexNumber>,
    #[serde(default)]
    pub lng: Option<FlexNumber>,
    #[serde(default)]
    pub lon: Option<FlexNumber>,
    #[serde(default)]
    pub longitude: Option<FlexNumber>,
    #[serde(default, rename = "locationLat")]
    pub location_lat: Option<FlexNumber>,
    #[serde(default, rename = "locationLon")]
    pub location_lon: Option<FlexNumber>,
}

/// The `location` field in any of its wire shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLocationField {
    /// Nested location object.
    Object(Box<RawLocationObject>),
    /// Bare numeric id.
    Number(i64),
    /// Venue name or numeric-string id.
    Text(String),
}

/// A nested location object.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLocationObject {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub id: Option<FlexId>,
    #[serde(default, rename = "locationId")]
    pub location_id: Option<FlexId>,
    #[serde(default)]
    pub lat: Option<FlexNumber>,
    #[serde(default)]
    pub latitude: Option<FlexNumber>,
    #[serde(default)]
    pub lng: Option<FlexNumber>,
    #[serde(default)]
    pub lon: Option<FlexNumber>,
    #[serde(default)]
    pub longitude: Option<FlexNumber>,
}

/// A roster entry: flat, or nesting the chef under `chef`/`participant`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRegistration {
    #[serde(default)]
    pub chef: Option<RawChef>,
    #[serde(default)]
    pub participant: Option<RawChef>,
    #[serde(default, rename = "chefId")]
    pub chef_id: Option<FlexId>,
    #[serde(default)]
    pub id: Option<FlexId>,
    #[serde(default, rename = "chefName")]
    pub chef_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub score: Option<FlexNumber>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub result: Option<RawResult>,
}

/// A nested result attached to a roster entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResult {
    #[serde(default)]
    pub score: Option<FlexNumber>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A row of the tournament's score table (`scores`/`results` arrays).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScore {
    #[serde(default, rename = "chefId")]
    pub chef_id: Option<FlexId>,
    #[serde(default)]
    pub id: Option<FlexId>,
    #[serde(default, rename = "chefName")]
    pub chef_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub chef: Option<RawChef>,
    #[serde(default)]
    pub score: Option<FlexNumber>,
    #[serde(default)]
    pub notes: Option<String>,
}

// =============================================================================
// Chef / location / ranking payloads
// =============================================================================

/// A chef record from `GET /api/chefs` or nested in a roster entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawChef {
    #[serde(default)]
    pub id: Option<FlexId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub experience: Option<FlexNumber>,
    #[serde(default, rename = "experienceYears")]
    pub experience_years: Option<FlexNumber>,
    #[serde(default, rename = "userId")]
    pub user_id: Option<FlexId>,
    #[serde(default, rename = "accountId")]
    pub account_id: Option<FlexId>,
    #[serde(default, rename = "chefId")]
    pub chef_id: Option<FlexId>,
    #[serde(default)]
    pub score: Option<FlexNumber>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A venue from `GET /api/locations`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLocation {
    pub id: FlexId,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
}

/// A leaderboard row from `GET /api/tournaments/{id}/ranking`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRankingEntry {
    #[serde(default, rename = "chefId")]
    pub chef_id: Option<FlexId>,
    #[serde(default)]
    pub id: Option<FlexId>,
    #[serde(default, rename = "chefName")]
    pub chef_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub score: Option<FlexNumber>,
}

// =============================================================================
// Canonical score row (conversion output)
// =============================================================================

/// A normalized score-table row for the tournament detail view.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    /// Chef id, when the backend included one.
    pub chef_id: Option<i64>,
    /// Display name ("—" when the backend sent none).
    pub chef_name: String,
    /// Score, absent while the result is pending.
    pub score: Option<f64>,
    /// Jury notes.
    pub notes: Option<String>,
}
