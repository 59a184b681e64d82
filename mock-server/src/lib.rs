//! In-memory stand-in for the `todo.sr.ht` tracker API.
//!
//! DTOs here are defined independently from the client crate so that
//! integration tests catch schema drift between the two. Behavior follows
//! the real service where it matters to the client: token auth on every
//! route, a paging envelope around lists, sparse ticket updates, and a
//! tolerant update endpoint that parses the body without demanding a
//! Content-Type header (update requests carry none).

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header::AUTHORIZATION, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize)]
pub struct Owner {
    pub canonical_name: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct DefaultPermissions {
    pub anonymous: Vec<String>,
    pub submitter: Vec<String>,
    pub user: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Tracker {
    pub id: u64,
    pub owner: Owner,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub default_permissions: DefaultPermissions,
}

#[derive(Clone, Debug, Serialize)]
pub struct Ticket {
    pub id: u64,
    #[serde(rename = "ref")]
    pub reference: String,
    pub title: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub submitter: Owner,
    pub status: String,
    pub resolution: String,
    pub labels: Vec<String>,
    pub assignees: Vec<String>,
}

#[derive(Deserialize)]
pub struct BasicTicket {
    pub title: String,
    pub description: String,
}

#[derive(Deserialize)]
pub struct TicketUpdate {
    pub comment: Option<String>,
    pub status: Option<String>,
    pub resolution: Option<String>,
    pub labels: Option<Vec<String>>,
}

/// The service's paging envelope. `next` stays null — the mock never pages.
#[derive(Serialize)]
struct Collection<T> {
    next: Option<u64>,
    results: Vec<T>,
    total: usize,
    results_per_page: usize,
}

impl<T> Collection<T> {
    fn of(results: Vec<T>) -> Self {
        let total = results.len();
        Self {
            next: None,
            results,
            total,
            results_per_page: 25,
        }
    }
}

/// A tracker plus its tickets and the id counter for new ones.
pub struct TrackerState {
    pub tracker: Tracker,
    pub tickets: HashMap<u64, Ticket>,
    pub next_ticket_id: u64,
}

pub type Db = Arc<RwLock<HashMap<String, TrackerState>>>;

#[derive(Clone)]
struct AppState {
    token: Arc<String>,
    db: Db,
}

pub fn new_db() -> Db {
    Arc::new(RwLock::new(HashMap::new()))
}

fn sample_owner() -> Owner {
    Owner {
        canonical_name: "~example".to_string(),
        name: "example".to_string(),
    }
}

/// Inserts an empty tracker owned by `~example` and returns its record.
pub async fn seed_tracker(db: &Db, name: &str, description: &str) -> Tracker {
    let now = Utc::now();
    let mut trackers = db.write().await;
    let id = trackers.len() as u64 + 1;
    let tracker = Tracker {
        id,
        owner: sample_owner(),
        created: now,
        updated: now,
        name: name.to_string(),
        description: description.to_string(),
        default_permissions: DefaultPermissions {
            anonymous: vec!["browse".to_string()],
            submitter: vec!["browse".to_string(), "comment".to_string()],
            user: vec!["browse".to_string(), "submit".to_string(), "comment".to_string()],
        },
    };
    trackers.insert(
        name.to_string(),
        TrackerState {
            tracker: tracker.clone(),
            tickets: HashMap::new(),
            next_ticket_id: 1,
        },
    );
    tracker
}

/// Builds the router. Every route requires `Authorization: token {token}`.
pub fn app(token: &str, db: Db) -> Router {
    let state = AppState {
        token: Arc::new(token.to_string()),
        db,
    };
    Router::new()
        .route("/trackers", get(list_trackers))
        .route(
            "/trackers/{name}/tickets",
            get(list_tickets).post(create_ticket),
        )
        .route(
            "/trackers/{name}/tickets/{id}",
            get(get_ticket).post(update_ticket),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_token))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app(token, db)).await
}

async fn require_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let expected = format!("token {}", state.token);
    let supplied = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    if supplied == Some(expected.as_str()) {
        next.run(request).await
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({"errors": [{"reason": "invalid or missing token"}]})),
        )
            .into_response()
    }
}

async fn list_trackers(State(state): State<AppState>) -> Json<Collection<Tracker>> {
    let trackers = state.db.read().await;
    let mut results: Vec<Tracker> = trackers.values().map(|t| t.tracker.clone()).collect();
    results.sort_by_key(|t| t.id);
    Json(Collection::of(results))
}

async fn list_tickets(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Collection<Ticket>>, StatusCode> {
    let trackers = state.db.read().await;
    let tracker = trackers.get(&name).ok_or(StatusCode::NOT_FOUND)?;
    let mut results: Vec<Ticket> = tracker.tickets.values().cloned().collect();
    results.sort_by_key(|t| t.id);
    Ok(Json(Collection::of(results)))
}

async fn get_ticket(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, u64)>,
) -> Result<Json<Ticket>, StatusCode> {
    let trackers = state.db.read().await;
    let tracker = trackers.get(&name).ok_or(StatusCode::NOT_FOUND)?;
    tracker.tickets.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_ticket(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<BasicTicket>,
) -> Result<(StatusCode, Json<Ticket>), StatusCode> {
    let mut trackers = state.db.write().await;
    let tracker = trackers.get_mut(&name).ok_or(StatusCode::NOT_FOUND)?;
    let now = Utc::now();
    let id = tracker.next_ticket_id;
    tracker.next_ticket_id += 1;
    let ticket = Ticket {
        id,
        reference: format!("~example/{name}#{id}"),
        title: input.title,
        description: input.description,
        created: now,
        updated: now,
        submitter: sample_owner(),
        status: "reported".to_string(),
        resolution: "unresolved".to_string(),
        labels: Vec::new(),
        assignees: Vec::new(),
    };
    tracker.tickets.insert(id, ticket.clone());
    Ok((StatusCode::CREATED, Json(ticket)))
}

// Body taken as a raw string: update requests arrive without a Content-Type
// header, which the Json extractor would reject with 415.
async fn update_ticket(
    State(state): State<AppState>,
    Path((name, id)): Path<(String, u64)>,
    body: String,
) -> Result<Json<Ticket>, StatusCode> {
    let input: TicketUpdate =
        serde_json::from_str(&body).map_err(|_| StatusCode::BAD_REQUEST)?;
    let mut trackers = state.db.write().await;
    let tracker = trackers.get_mut(&name).ok_or(StatusCode::NOT_FOUND)?;
    let ticket = tracker.tickets.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(status) = input.status {
        ticket.status = status;
    }
    if let Some(resolution) = input.resolution {
        ticket.resolution = resolution;
    }
    if let Some(labels) = input.labels {
        ticket.labels = labels;
    }
    // Comments are accepted and dropped; the mock keeps no comment feed.
    let _ = input.comment;
    ticket.updated = Utc::now();
    Ok(Json(ticket.clone()))
}
