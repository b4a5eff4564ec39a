//! HTTP client for the tournament backend.
//!
//! Wraps every endpoint the site consumes, forwards the viewer's bearer
//! token per request, and normalizes the backend's heterogeneous payloads
//! into canonical `chefclash-core` types at this boundary. The location
//! directory is cached with `moka` (5-minute TTL) since every page that
//! renders a venue needs it.

pub mod conversions;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use chefclash_core::{Chef, ChefId, LocationDirectory, RankingEntry, Tournament, TournamentId};

use conversions::{
    convert_chef, convert_ranking_entry, convert_score_rows, convert_tournament, convert_venue,
};
use types::{
    LoginResponse, RawChef, RawErrorBody, RawLocation, RawProfile, RawRankingEntry, RawTournament,
    ScoreRow,
};

/// How long a fetched location directory stays fresh.
const LOCATIONS_TTL: Duration = Duration::from_secs(300);

/// Errors from the tournament backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("backend request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status. `message` is the
    /// backend's own human-readable explanation when it sent one, and is
    /// surfaced to the viewer verbatim.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The backend answered 2xx but the body did not parse.
    #[error("could not parse backend response: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request path did not form a valid URL.
    #[error("invalid backend URL: {0}")]
    Url(#[from] url::ParseError),
}

/// A tournament plus its normalized score table.
#[derive(Debug, Clone)]
pub struct TournamentDetail {
    /// The canonical tournament record.
    pub tournament: Tournament,
    /// Score-table rows for the results section.
    pub score_rows: Vec<ScoreRow>,
}

/// New-chef / chef-update payload.
///
/// The backend historically read experience under either name, so both are
/// sent.
#[derive(Debug, Clone, Serialize)]
pub struct ChefPayload {
    pub name: String,
    pub specialty: String,
    pub experience: u32,
    #[serde(rename = "experienceYears")]
    pub experience_years: u32,
}

#[derive(Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct NewUser<'a> {
    username: &'a str,
    password: &'a str,
    role: &'a str,
}

#[derive(Serialize)]
struct RegisterChefBody {
    #[serde(rename = "chefId")]
    chef_id: i64,
}

#[derive(Serialize)]
struct SubmitResultBody<'a> {
    #[serde(rename = "chefId")]
    chef_id: i64,
    score: f64,
    notes: &'a str,
}

// =============================================================================
// BackendClient
// =============================================================================

/// Client for the tournament backend API.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: Url,
    locations: Cache<&'static str, LocationDirectory>,
}

impl BackendClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        let locations = Cache::builder()
            .max_capacity(1)
            .time_to_live(LOCATIONS_TTL)
            .build();

        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url,
                locations,
            }),
        }
    }

    // -------------------------------------------------------------------------
    // Users
    // -------------------------------------------------------------------------

    /// Authenticate and obtain a bearer token.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection (wrong
    /// credentials arrive as `Rejected` with the backend's message).
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, BackendError> {
        self.request(
            Method::POST,
            "api/users/login",
            None,
            Some(&Credentials { username, password }),
        )
        .await
    }

    /// Create a visitor account.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection.
    pub async fn register_user(&self, username: &str, password: &str) -> Result<(), BackendError> {
        self.execute(
            Method::POST,
            "api/users/register",
            None,
            Some(&NewUser {
                username,
                password,
                role: "visitor",
            }),
        )
        .await
    }

    /// Fetch the authenticated user's profile.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection.
    pub async fn profile(&self, token: &str) -> Result<RawProfile, BackendError> {
        self.request(Method::GET, "api/users/profile", Some(token), None::<&()>)
            .await
    }

    // -------------------------------------------------------------------------
    // Tournaments
    // -------------------------------------------------------------------------

    /// List all tournaments, normalized.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection.
    pub async fn tournaments(&self, token: Option<&str>) -> Result<Vec<Tournament>, BackendError> {
        let raw: Vec<RawTournament> = self
            .request(Method::GET, "api/tournaments", token, None::<&()>)
            .await?;
        Ok(raw.iter().map(convert_tournament).collect())
    }

    /// Fetch one tournament with its score table, normalized.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection (a missing
    /// tournament arrives as `Rejected` with status 404).
    pub async fn tournament(
        &self,
        id: TournamentId,
        token: Option<&str>,
    ) -> Result<TournamentDetail, BackendError> {
        let raw: RawTournament = self
            .request(
                Method::GET,
                &format!("api/tournaments/{id}"),
                token,
                None::<&()>,
            )
            .await?;
        let tournament = convert_tournament(&raw);
        let score_rows = convert_score_rows(&raw, &tournament.registrations);
        Ok(TournamentDetail {
            tournament,
            score_rows,
        })
    }

    /// Register a chef into a tournament.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection (capacity
    /// and duplicate-registration rules are enforced backend-side).
    pub async fn register_chef(
        &self,
        tournament_id: TournamentId,
        chef_id: ChefId,
        token: &str,
    ) -> Result<(), BackendError> {
        self.execute(
            Method::POST,
            &format!("api/tournaments/{tournament_id}/register"),
            Some(token),
            Some(&RegisterChefBody {
                chef_id: chef_id.as_i64(),
            }),
        )
        .await
    }

    /// Submit a chef's result for a tournament.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection.
    pub async fn submit_result(
        &self,
        tournament_id: TournamentId,
        chef_id: ChefId,
        score: f64,
        notes: &str,
        token: &str,
    ) -> Result<(), BackendError> {
        self.execute(
            Method::POST,
            &format!("api/tournaments/{tournament_id}/submit"),
            Some(token),
            Some(&SubmitResultBody {
                chef_id: chef_id.as_i64(),
                score,
                notes,
            }),
        )
        .await
    }

    /// Remove a chef from a tournament.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection.
    pub async fn remove_chef(
        &self,
        tournament_id: TournamentId,
        chef_id: ChefId,
        token: &str,
    ) -> Result<(), BackendError> {
        self.execute(
            Method::DELETE,
            &format!("api/tournaments/{tournament_id}/chefs/{chef_id}"),
            Some(token),
            None::<&()>,
        )
        .await
    }

    /// Fetch a tournament's leaderboard, normalized (unordered; see
    /// `chefclash_core::ranking::project`).
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection.
    pub async fn ranking(
        &self,
        tournament_id: TournamentId,
        token: Option<&str>,
    ) -> Result<Vec<RankingEntry>, BackendError> {
        let raw: Vec<RawRankingEntry> = self
            .request(
                Method::GET,
                &format!("api/tournaments/{tournament_id}/ranking"),
                token,
                None::<&()>,
            )
            .await?;
        Ok(raw.iter().map(convert_ranking_entry).collect())
    }

    // -------------------------------------------------------------------------
    // Chefs
    // -------------------------------------------------------------------------

    /// List all chefs, normalized. Records without an id are skipped.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection.
    pub async fn chefs(&self, token: Option<&str>) -> Result<Vec<Chef>, BackendError> {
        let raw: Vec<RawChef> = self
            .request(Method::GET, "api/chefs", token, None::<&()>)
            .await?;
        Ok(raw.iter().filter_map(convert_chef).collect())
    }

    /// Create a chef.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection.
    pub async fn create_chef(&self, payload: &ChefPayload, token: &str) -> Result<(), BackendError> {
        self.execute(Method::POST, "api/chefs", Some(token), Some(payload))
            .await
    }

    /// Update a chef.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection.
    pub async fn update_chef(
        &self,
        id: ChefId,
        payload: &ChefPayload,
        token: &str,
    ) -> Result<(), BackendError> {
        self.execute(
            Method::PUT,
            &format!("api/chefs/{id}"),
            Some(token),
            Some(payload),
        )
        .await
    }

    /// Delete a chef.
    ///
    /// # Errors
    ///
    /// Returns `BackendError` on transport failure or rejection.
    pub async fn delete_chef(&self, id: ChefId, token: &str) -> Result<(), BackendError> {
        self.execute(
            Method::DELETE,
            &format!("api/chefs/{id}"),
            Some(token),
            None::<&()>,
        )
        .await
    }

    // -------------------------------------------------------------------------
    // Locations
    // -------------------------------------------------------------------------

    /// The venue directory, cached.
    ///
    /// A fetch failure is downgraded to an empty directory with a warning:
    /// venue names degrade to their sentinels rather than breaking the
    /// page. Failures are not cached.
    pub async fn location_directory(&self, token: Option<&str>) -> LocationDirectory {
        let fetch = self.fetch_locations(token);
        match self.inner.locations.try_get_with("directory", fetch).await {
            Ok(directory) => directory,
            Err(error) => {
                tracing::warn!(%error, "could not load the location directory");
                LocationDirectory::default()
            }
        }
    }

    async fn fetch_locations(&self, token: Option<&str>) -> Result<LocationDirectory, BackendError> {
        let raw: Vec<RawLocation> = self
            .request(Method::GET, "api/locations", token, None::<&()>)
            .await?;
        let venues: Vec<_> = raw.iter().map(convert_venue).collect();
        Ok(LocationDirectory::new(&venues))
    }

    // -------------------------------------------------------------------------
    // Request plumbing
    // -------------------------------------------------------------------------

    /// Issue a request and deserialize the response body.
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&impl Serialize>,
    ) -> Result<T, BackendError> {
        let text = self.send(method, path, token, body).await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Issue a request and discard the response body.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&impl Serialize>,
    ) -> Result<(), BackendError> {
        self.send(method, path, token, body).await?;
        Ok(())
    }

    /// Issue a request, returning the body text on success and extracting
    /// the backend's `message` field on rejection.
    async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<&impl Serialize>,
    ) -> Result<String, BackendError> {
        let url = self.inner.base_url.join(path)?;
        let mut request = self.inner.client.request(method, url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<RawErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| format!("HTTP {status}"));
            tracing::warn!(status = %status, path, "backend rejected request");
            return Err(BackendError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_error_displays_backend_message() {
        let error = BackendError::Rejected {
            status: 409,
            message: "Tournament is full".to_string(),
        };
        assert_eq!(error.to_string(), "Tournament is full");
    }

    #[test]
    fn test_error_body_message_extraction() {
        let body: RawErrorBody =
            serde_json::from_str(r#"{"message":"Invalid credentials"}"#).unwrap();
        assert_eq!(body.message.as_deref(), Some("Invalid credentials"));

        let empty: RawErrorBody = serde_json::from_str("{}").unwrap();
        assert!(empty.message.is_none());
    }
}
