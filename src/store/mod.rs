//! Concurrency-safe in-memory storage for teams, users, and pull requests.
//!
//! One `RwLock` guards all four maps, so multi-step mutations (team insert
//! plus per-member indexing) are observed atomically. Every read hands out
//! clones; callers never see references into the maps. Nothing here awaits,
//! so the lock is safe to take from async handlers.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::models::{PullRequest, Team, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("not found")]
    NotFound,

    #[error("team already exists")]
    TeamExists,

    #[error("pull request already exists")]
    PrExists,
}

#[derive(Default)]
struct Inner {
    teams: HashMap<String, Team>,
    users: HashMap<String, User>,
    pull_requests: HashMap<String, PullRequest>,
    /// Reviewer lists are kept apart from the PR bodies so reassignment
    /// touches only this map.
    reviewers: HashMap<String, Vec<String>>,
}

/// Handle to the process-lifetime store. Cheap to clone; all clones share
/// the same state.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a team and indexes each member as a standalone user record.
    /// The indexed users are independent copies: mutating one later does
    /// not rewrite the team record's member snapshot.
    pub fn create_team(&self, team: &Team) -> Result<(), StoreError> {
        let mut inner = self.write();

        if inner.teams.contains_key(&team.name) {
            return Err(StoreError::TeamExists);
        }

        for member in &team.members {
            inner.users.insert(member.id.clone(), member.clone());
        }
        inner.teams.insert(team.name.clone(), team.clone());

        Ok(())
    }

    pub fn get_team(&self, name: &str) -> Result<Team, StoreError> {
        self.read()
            .teams
            .get(name)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Flips the activity flag in place and returns the post-mutation user.
    pub fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<User, StoreError> {
        let mut inner = self.write();

        let user = inner.users.get_mut(user_id).ok_or(StoreError::NotFound)?;
        user.is_active = is_active;

        Ok(user.clone())
    }

    pub fn get_user(&self, user_id: &str) -> Result<User, StoreError> {
        self.read()
            .users
            .get(user_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    pub fn create_pull_request(&self, pr: &PullRequest) -> Result<(), StoreError> {
        let mut inner = self.write();

        if inner.pull_requests.contains_key(&pr.id) {
            return Err(StoreError::PrExists);
        }

        inner
            .reviewers
            .insert(pr.id.clone(), pr.assigned_reviewers.clone());
        inner.pull_requests.insert(pr.id.clone(), pr.clone());

        Ok(())
    }

    /// Returns the PR body merged with the current reviewer list.
    pub fn get_pull_request(&self, id: &str) -> Result<PullRequest, StoreError> {
        let inner = self.read();

        let mut pr = inner.pull_requests.get(id).cloned().ok_or(StoreError::NotFound)?;
        if let Some(reviewers) = inner.reviewers.get(id) {
            pr.assigned_reviewers = reviewers.clone();
        }

        Ok(pr)
    }

    /// Full overwrite of the stored body and reviewer list. Not a patch.
    pub fn update_pull_request(&self, pr: &PullRequest) -> Result<(), StoreError> {
        let mut inner = self.write();

        if !inner.pull_requests.contains_key(&pr.id) {
            return Err(StoreError::NotFound);
        }

        inner
            .reviewers
            .insert(pr.id.clone(), pr.assigned_reviewers.clone());
        inner.pull_requests.insert(pr.id.clone(), pr.clone());

        Ok(())
    }

    pub fn set_reviewers(&self, pr_id: &str, reviewer_ids: Vec<String>) -> Result<(), StoreError> {
        let mut inner = self.write();

        if !inner.pull_requests.contains_key(pr_id) {
            return Err(StoreError::NotFound);
        }
        inner.reviewers.insert(pr_id.to_string(), reviewer_ids);

        Ok(())
    }

    pub fn get_reviewers(&self, pr_id: &str) -> Result<Vec<String>, StoreError> {
        self.read()
            .reviewers
            .get(pr_id)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Every PR whose current reviewer list contains the given user, as
    /// copies. Order is whatever a single scan of the map yields.
    #[must_use]
    pub fn pull_requests_by_reviewer(&self, user_id: &str) -> Vec<PullRequest> {
        let inner = self.read();

        inner
            .reviewers
            .iter()
            .filter(|(_, ids)| ids.iter().any(|id| id == user_id))
            .filter_map(|(pr_id, ids)| {
                inner.pull_requests.get(pr_id).map(|pr| {
                    let mut pr = pr.clone();
                    pr.assigned_reviewers = ids.clone();
                    pr
                })
            })
            .collect()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}
