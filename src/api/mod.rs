//! HTTP access layer for the parking backend.
//!
//! Every network call in the client funnels through one request primitive:
//! it attaches the bearer token from the session store when one is present,
//! issues the request, and classifies the outcome. A 404 is a valid "absent"
//! result (`Ok(None)`), 401/403 is the re-authentication signal, and any
//! other failure carries the server's `detail` message. The primitive never
//! retries and never mutates the session store.

pub mod error;
pub mod models;

mod admin;
mod bookings;
mod slots;
mod zones;

pub use error::ApiError;
pub use zones::DEFAULT_NEARBY_RADIUS_KM;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

use crate::session::SessionStore;

/// Endpoint paths, kept in one table like the backend's router.
pub(crate) mod paths {
    pub const REGISTER: &str = "/auth/register";
    pub const LOGIN: &str = "/auth/login";

    pub const ZONES: &str = "/parking/zones";
    pub const ZONES_SEARCH: &str = "/parking/zones/search";
    pub const ZONES_NEARBY: &str = "/parking/zones/nearby";
    pub const MY_ZONE: &str = "/parking/zones/my-zone";

    pub const BOOKINGS: &str = "/parking/bookings";
    pub const ACTIVE_BOOKING: &str = "/parking/bookings/active";
    pub const BOOKING_HISTORY: &str = "/parking/bookings/history";
    pub const PROFILE_STATS: &str = "/parking/profile/stats";

    pub const ADMIN_BOOKINGS: &str = "/parking/admin/bookings";
    pub const ADMIN_BOOKING_STATS: &str = "/parking/admin/bookings/stats";

    pub fn zone_availability(zone_id: i64) -> String {
        format!("/parking/zones/{zone_id}/availability")
    }

    pub fn zone_slots(zone_id: i64) -> String {
        format!("/parking/zones/{zone_id}/slots")
    }

    pub fn slot(zone_id: i64, slot_id: i64) -> String {
        format!("/parking/zones/{zone_id}/slots/{slot_id}")
    }

    pub fn slot_status(zone_id: i64, slot_id: i64) -> String {
        format!("/parking/zones/{zone_id}/slots/{slot_id}/status")
    }

    pub fn slot_stats(zone_id: i64) -> String {
        format!("/parking/zones/{zone_id}/slots/stats")
    }

    pub fn booking_extend(booking_id: i64) -> String {
        format!("/parking/bookings/{booking_id}/extend")
    }

    pub fn booking_complete(booking_id: i64) -> String {
        format!("/parking/bookings/{booking_id}/complete")
    }

    pub fn booking_cancel(booking_id: i64) -> String {
        format!("/parking/bookings/{booking_id}/cancel")
    }
}

/// Client for the parking backend API.
///
/// The session store is an injected dependency: the client reads the token
/// from it before every request but never writes to it. Cloning is cheap and
/// shares the underlying connection pool and store.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    store: Arc<SessionStore>,
}

impl ApiClient {
    /// Create a client against `base_url`, reading auth state from `store`.
    pub fn new(base_url: impl Into<String>, store: Arc<SessionStore>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
            store,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        debug!("{} {}", method, path);
        self.http.request(method, self.url(path))
    }

    // ------------------------------------------------------------------
    // Request primitive
    // ------------------------------------------------------------------

    /// Issue one request and classify the outcome.
    ///
    /// `Ok(None)` covers both a 404 and an empty success body; callers decide
    /// whether absence is a valid state ([`require`] turns it into
    /// [`ApiError::NotFound`] where it is not).
    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<Option<T>, ApiError> {
        let mut req = req.header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.store.token() {
            req = req.bearer_auth(token);
        }

        let response = req.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(ApiError::from_failure(status, &body));
        }
        if body.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&body)
            .map(Some)
            .map_err(ApiError::Malformed)
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        self.send(self.request(Method::GET, path)).await
    }

    pub(crate) async fn get_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<Option<T>, ApiError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub(crate) async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    pub(crate) async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ApiError> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    pub(crate) async fn patch_empty<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ApiError> {
        self.send(self.request(Method::PATCH, path)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ApiError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    /// POST for the auth endpoints, which never carry a token and must
    /// surface the server's `detail` even on a 401: a rejected login is a bad
    /// credential, not an expired session.
    pub(crate) async fn post_unauthenticated<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self
            .request(Method::POST, path)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::RequestFailed {
                status,
                message: error::error_detail(&body),
            });
        }
        serde_json::from_str(&body).map_err(ApiError::Malformed)
    }
}

/// Convert an absent payload into [`ApiError::NotFound`] for operations
/// where a 404 is not a valid domain state (mutations against ids the caller
/// just obtained).
pub(crate) fn require<T>(payload: Option<T>) -> Result<T, ApiError> {
    payload.ok_or(ApiError::NotFound)
}
