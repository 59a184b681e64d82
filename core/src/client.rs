//! The tracker API client: request builders plus async dispatch.
//!
//! # Design
//! `TrackerClient` holds only the immutable `(token, base_url)` pair and a
//! `reqwest::Client`; no mutable state is carried between calls and any
//! number of operations may be in flight at once. Each operation is split
//! into a crate-visible `*_request` builder that produces a plain-data
//! `HttpRequest` and a public async method that executes it, keeping the
//! exact wire shape assertable in unit tests.
//!
//! Status codes are deliberately not inspected: a 4xx/5xx response with a
//! parseable body resolves like any other. Callers that need the status use
//! `update_ticket`, which returns the raw response.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::Error;
use crate::http::{HttpMethod, HttpRequest};
use crate::types::{BasicTicket, Collection, Ticket, TicketUpdate, Tracker};

/// Production endpoint of the `todo.sr.ht` REST API.
pub const DEFAULT_BASE_URL: &str = "https://todo.sr.ht/api";

/// Asynchronous client for the `todo.sr.ht` tracker API.
///
/// Cheap to clone; clones share the underlying connection pool. Multiple
/// instances with different tokens coexist without interference.
#[derive(Debug, Clone)]
pub struct TrackerClient {
    http: reqwest::Client,
    token: String,
    base_url: String,
}

impl TrackerClient {
    /// Creates a client against the production API endpoint.
    ///
    /// `token` is an OAuth token issued by the host service, opaque to this
    /// client; it is sent verbatim as `Authorization: token {token}`.
    pub fn new(token: &str) -> Self {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Creates a client against a non-default endpoint, e.g. a self-hosted
    /// instance or a test server. A trailing `/` on `base_url` is stripped.
    pub fn with_base_url(token: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            token: token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Lists all trackers associated with the authenticated user.
    pub async fn list_trackers(&self) -> Result<Collection<Tracker>, Error> {
        self.fetch_json(self.list_trackers_request()).await
    }

    /// Lists the tickets of the named tracker.
    ///
    /// `tracker` is interpolated verbatim into the URL path; the caller must
    /// supply a value safe for path embedding.
    pub async fn list_tracker_tickets(&self, tracker: &str) -> Result<Collection<Ticket>, Error> {
        self.fetch_json(self.list_tracker_tickets_request(tracker)).await
    }

    /// Fetches a single ticket from the named tracker.
    pub async fn get_ticket(&self, tracker: &str, id: u64) -> Result<Ticket, Error> {
        self.fetch_json(self.get_ticket_request(tracker, id)).await
    }

    /// Applies a sparse update to a ticket. The ticket must already exist.
    ///
    /// Returns the raw response rather than a decoded ticket: callers
    /// inspect the status code and parse the body themselves.
    pub async fn update_ticket(
        &self,
        tracker: &str,
        id: u64,
        update: &TicketUpdate,
    ) -> Result<reqwest::Response, Error> {
        self.send(self.update_ticket_request(tracker, id, update)?).await
    }

    /// Creates a ticket in the named tracker and returns it as the service
    /// recorded it (id, timestamps, and initial status filled in).
    pub async fn create_ticket(&self, tracker: &str, ticket: &BasicTicket) -> Result<Ticket, Error> {
        self.fetch_json(self.create_ticket_request(tracker, ticket)?).await
    }

    pub(crate) fn list_trackers_request(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/trackers", self.base_url),
            headers: vec![self.auth_header()],
            body: None,
        }
    }

    pub(crate) fn list_tracker_tickets_request(&self, tracker: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/trackers/{tracker}/tickets", self.base_url),
            headers: vec![self.auth_header()],
            body: None,
        }
    }

    pub(crate) fn get_ticket_request(&self, tracker: &str, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/trackers/{tracker}/tickets/{id}", self.base_url),
            headers: vec![self.auth_header()],
            body: None,
        }
    }

    // Updates carry no explicit Content-Type; the service parses the body
    // regardless.
    pub(crate) fn update_ticket_request(
        &self,
        tracker: &str,
        id: u64,
        update: &TicketUpdate,
    ) -> Result<HttpRequest, Error> {
        let body = serde_json::to_string(update).map_err(Error::Serialize)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/trackers/{tracker}/tickets/{id}", self.base_url),
            headers: vec![self.auth_header()],
            body: Some(body),
        })
    }

    pub(crate) fn create_ticket_request(
        &self,
        tracker: &str,
        ticket: &BasicTicket,
    ) -> Result<HttpRequest, Error> {
        let body = serde_json::to_string(ticket).map_err(Error::Serialize)?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/trackers/{tracker}/tickets", self.base_url),
            headers: vec![
                self.auth_header(),
                ("Content-Type".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    fn auth_header(&self) -> (String, String) {
        ("Authorization".to_string(), format!("token {}", self.token))
    }

    /// Executes a request. Fails only if the transport does; the response is
    /// returned as-is whatever its status.
    async fn send(&self, request: HttpRequest) -> Result<reqwest::Response, Error> {
        debug!(method = %request.method, url = %request.url, "dispatching request");
        let mut builder = match request.method {
            HttpMethod::Get => self.http.get(&request.url),
            HttpMethod::Post => self.http.post(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        Ok(builder.send().await?)
    }

    /// Executes a request and decodes the body as JSON, ignoring the status.
    async fn fetch_json<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T, Error> {
        let response = self.send(request).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(Error::Decode)
    }
}
