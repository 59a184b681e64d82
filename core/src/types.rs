//! Domain DTOs for the tracker API.
//!
//! # Design
//! These types mirror the shapes `todo.sr.ht` returns but are defined
//! independently from the mock-server crate; integration tests catch any
//! schema drift between the two. Fields the service may omit are `Option`;
//! unknown fields in responses are ignored. Permission entries are kept as
//! opaque strings rather than an enum — the service owns that vocabulary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Short form of a user entity, as embedded in trackers and tickets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Owner {
    /// Canonical name including the sigil, e.g. `~jdoe`.
    pub canonical_name: String,
    pub name: String,
}

/// Access policy a tracker grants each class of visitor.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DefaultPermissions {
    pub anonymous: Vec<String>,
    pub submitter: Vec<String>,
    pub user: Vec<String>,
}

/// An issue tracker: a named bucket of tickets plus its access policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracker {
    pub id: u64,
    pub owner: Owner,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub default_permissions: DefaultPermissions,
}

/// Abbreviated tracker record, as embedded in tickets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerSummary {
    pub id: u64,
    pub owner: Owner,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    pub name: String,
}

/// Workflow state of a ticket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Reported,
    Confirmed,
    InProgress,
    Pending,
    Resolved,
}

/// Terminal disposition of a resolved ticket.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TicketResolution {
    Unresolved,
    Fixed,
    Implemented,
    WontFix,
    ByDesign,
    Invalid,
    Duplicate,
    NotOurBug,
}

/// Per-ticket permission overrides. Each field is absent when the ticket
/// inherits the tracker's defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TicketPermissions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anonymous: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<Vec<String>>,
}

/// A single reported issue. Every ticket belongs to exactly one tracker,
/// addressed by path; the embedded `tracker` summary is optional on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: u64,
    #[serde(rename = "ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker: Option<TrackerSummary>,
    pub title: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter: Option<Owner>,
    pub status: TicketStatus,
    pub resolution: TicketResolution,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<TicketPermissions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignees: Option<Vec<String>>,
}

/// Sparse mutation payload for a ticket. Only the fields present in the
/// JSON are applied; omitted fields remain unchanged on the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TicketUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<TicketResolution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
}

/// Payload for creating a new ticket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicTicket {
    pub title: String,
    pub description: String,
}

/// The service's paging envelope around a list of resources.
///
/// `next` is an opaque cursor (or null); this client never interprets it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collection<T> {
    #[serde(default)]
    pub next: Option<serde_json::Value>,
    pub results: Vec<T>,
    pub total: u64,
    pub results_per_page: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_to_wire_strings() {
        let cases = [
            (TicketStatus::Reported, "\"reported\""),
            (TicketStatus::Confirmed, "\"confirmed\""),
            (TicketStatus::InProgress, "\"in_progress\""),
            (TicketStatus::Pending, "\"pending\""),
            (TicketStatus::Resolved, "\"resolved\""),
        ];
        for (status, wire) in cases {
            assert_eq!(serde_json::to_string(&status).unwrap(), wire);
            let back: TicketStatus = serde_json::from_str(wire).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn resolution_serializes_to_wire_strings() {
        let cases = [
            (TicketResolution::Unresolved, "\"unresolved\""),
            (TicketResolution::Fixed, "\"fixed\""),
            (TicketResolution::Implemented, "\"implemented\""),
            (TicketResolution::WontFix, "\"wont_fix\""),
            (TicketResolution::ByDesign, "\"by_design\""),
            (TicketResolution::Invalid, "\"invalid\""),
            (TicketResolution::Duplicate, "\"duplicate\""),
            (TicketResolution::NotOurBug, "\"not_our_bug\""),
        ];
        for (resolution, wire) in cases {
            assert_eq!(serde_json::to_string(&resolution).unwrap(), wire);
            let back: TicketResolution = serde_json::from_str(wire).unwrap();
            assert_eq!(back, resolution);
        }
    }

    #[test]
    fn ticket_update_omits_absent_fields() {
        let update = TicketUpdate {
            status: Some(TicketStatus::Resolved),
            ..TicketUpdate::default()
        };
        assert_eq!(
            serde_json::to_string(&update).unwrap(),
            r#"{"status":"resolved"}"#
        );
    }

    #[test]
    fn empty_ticket_update_serializes_to_empty_object() {
        let update = TicketUpdate::default();
        assert_eq!(serde_json::to_string(&update).unwrap(), "{}");
    }

    #[test]
    fn ticket_update_roundtrips_enum_fields() {
        let update = TicketUpdate {
            comment: Some("closing".to_string()),
            status: Some(TicketStatus::Resolved),
            resolution: Some(TicketResolution::WontFix),
            labels: Some(vec!["wontfix".to_string()]),
        };
        let json = serde_json::to_string(&update).unwrap();
        let back: TicketUpdate = serde_json::from_str(&json).unwrap();
        assert_eq!(back.status, Some(TicketStatus::Resolved));
        assert_eq!(back.resolution, Some(TicketResolution::WontFix));
        assert_eq!(back.comment.as_deref(), Some("closing"));
    }

    #[test]
    fn ticket_deserializes_from_service_json() {
        let json = r#"{
            "id": 42,
            "ref": "~jdoe/bugs#42",
            "title": "Crash on startup",
            "description": "It crashes.",
            "created": "2021-03-01T12:00:00Z",
            "updated": "2021-03-02T08:30:00Z",
            "submitter": {"canonical_name": "~jdoe", "name": "jdoe"},
            "status": "in_progress",
            "resolution": "unresolved",
            "labels": ["crash"],
            "assignees": ["~jdoe"]
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.id, 42);
        assert_eq!(ticket.reference.as_deref(), Some("~jdoe/bugs#42"));
        assert!(ticket.tracker.is_none());
        assert_eq!(ticket.status, TicketStatus::InProgress);
        assert_eq!(ticket.resolution, TicketResolution::Unresolved);
        assert_eq!(ticket.labels.as_deref(), Some(&["crash".to_string()][..]));
    }

    #[test]
    fn ticket_with_embedded_tracker_summary_deserializes() {
        let json = r#"{
            "id": 3,
            "tracker": {
                "id": 7,
                "owner": {"canonical_name": "~jdoe", "name": "jdoe"},
                "created": "2020-06-15T09:00:00Z",
                "updated": "2021-01-20T17:45:00Z",
                "name": "bugs"
            },
            "title": "Embedded",
            "description": "",
            "created": "2021-01-01T00:00:00Z",
            "updated": "2021-01-01T00:00:00Z",
            "status": "pending",
            "resolution": "unresolved"
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        let summary = ticket.tracker.unwrap();
        assert_eq!(summary.id, 7);
        assert_eq!(summary.name, "bugs");
        assert_eq!(summary.owner.name, "jdoe");
    }

    #[test]
    fn ticket_without_optional_fields_deserializes() {
        let json = r#"{
            "id": 1,
            "title": "Minimal",
            "description": "",
            "created": "2021-01-01T00:00:00Z",
            "updated": "2021-01-01T00:00:00Z",
            "status": "reported",
            "resolution": "unresolved"
        }"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert!(ticket.reference.is_none());
        assert!(ticket.submitter.is_none());
        assert!(ticket.permissions.is_none());
    }

    #[test]
    fn collection_deserializes_with_opaque_cursor() {
        let json = r#"{
            "next": 17,
            "results": [],
            "total": 40,
            "results_per_page": 25
        }"#;
        let page: Collection<Ticket> = serde_json::from_str(json).unwrap();
        assert!(page.next.is_some());
        assert!(page.results.is_empty());
        assert_eq!(page.total, 40);
        assert_eq!(page.results_per_page, 25);
    }

    #[test]
    fn collection_accepts_null_cursor() {
        let json = r#"{"next": null, "results": [], "total": 0, "results_per_page": 25}"#;
        let page: Collection<Tracker> = serde_json::from_str(json).unwrap();
        assert!(page.next.is_none());
    }

    #[test]
    fn tracker_deserializes_from_service_json() {
        let json = r#"{
            "id": 7,
            "owner": {"canonical_name": "~jdoe", "name": "jdoe"},
            "created": "2020-06-15T09:00:00Z",
            "updated": "2021-01-20T17:45:00Z",
            "name": "bugs",
            "description": "Bug reports",
            "default_permissions": {
                "anonymous": ["browse"],
                "submitter": ["browse", "comment"],
                "user": ["browse", "submit", "comment"]
            }
        }"#;
        let tracker: Tracker = serde_json::from_str(json).unwrap();
        assert_eq!(tracker.name, "bugs");
        assert_eq!(tracker.owner.canonical_name, "~jdoe");
        assert_eq!(tracker.default_permissions.anonymous, vec!["browse"]);
    }
}
