//! Domain model for teams, users, and pull requests.
//!
//! These are the records the store holds and the service reasons about.
//! DTOs for the HTTP surface live in `crate::api::types`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A team member. Created only as part of team creation; the activity flag
/// is the only mutable field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Back-reference to the owning team by name, not an ownership pointer.
    pub team_name: String,
    /// Gates reviewer eligibility.
    pub is_active: bool,
}

/// A team: unique name plus an ordered member list. Team names are
/// immutable and permanent once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub members: Vec<User>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrStatus {
    Open,
    Merged,
}

impl PrStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Merged => "merged",
        }
    }
}

/// A pull request. `status` only ever moves `Open -> Merged`, and
/// `merged_at` is `Some` exactly when the status is `Merged`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    pub id: String,
    pub name: String,
    pub author_id: String,
    pub status: PrStatus,
    /// Ordered reviewer user ids, at most two at creation. Never contains
    /// the author.
    pub assigned_reviewers: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    #[must_use]
    pub const fn is_merged(&self) -> bool {
        matches!(self.status, PrStatus::Merged)
    }
}
