//! Asynchronous API client for the sourcehut `todo.sr.ht` issue tracker.
//!
//! # Overview
//! Thin typed layer over the service's REST API: each operation builds one
//! HTTP request against a fixed path template, attaches the caller's token
//! as `Authorization: token ...`, and maps the JSON response body to a typed
//! result. No retries, no caching, no pagination handling.
//!
//! # Design
//! - `TrackerClient` is stateless beyond its immutable `(token, base_url)`
//!   pair and the underlying `reqwest::Client`.
//! - Each operation is split into a request builder (produces a plain-data
//!   `HttpRequest`, testable without I/O) and an async method that executes
//!   it, so the I/O boundary stays explicit.
//! - HTTP status codes are never inspected here. A 4xx/5xx with a parseable
//!   body resolves like any other response; `update_ticket` hands back the
//!   raw response so callers can judge the status themselves.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod types;

pub use client::{TrackerClient, DEFAULT_BASE_URL};
pub use error::Error;
pub use http::{HttpMethod, HttpRequest};
pub use types::{
    BasicTicket, Collection, DefaultPermissions, Owner, Ticket, TicketPermissions,
    TicketResolution, TicketStatus, TicketUpdate, Tracker, TrackerSummary,
};
