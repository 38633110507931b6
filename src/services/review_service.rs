//! Domain policy over the store: team creation, activity toggling, pull
//! request creation with reviewer assignment, idempotent merge, review
//! queue lookup, and constrained reviewer reassignment.

use chrono::Utc;
use thiserror::Error;

use crate::models::{PrStatus, PullRequest, Team, User};
use crate::services::reviewer_picker::ReviewerPicker;
use crate::store::{MemoryStore, StoreError};

/// Reviewers assigned per pull request at creation, at most.
const MAX_REVIEWERS: usize = 2;

/// Errors specific to review-workflow operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReviewError {
    #[error("not found")]
    NotFound,

    #[error("team already exists")]
    TeamExists,

    #[error("pull request already exists")]
    PrExists,

    #[error("pull request already merged")]
    PrMerged,

    #[error("reviewer not assigned to this pull request")]
    NotAssigned,

    #[error("no active replacement candidate in team")]
    NoCandidate,
}

impl From<StoreError> for ReviewError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            StoreError::TeamExists => Self::TeamExists,
            StoreError::PrExists => Self::PrExists,
        }
    }
}

/// Stateless domain service; all shared mutable state lives in the store,
/// so one instance serves every request handler concurrently.
pub struct ReviewService {
    store: MemoryStore,
    picker: Box<dyn ReviewerPicker>,
}

impl ReviewService {
    #[must_use]
    pub fn new(store: MemoryStore, picker: Box<dyn ReviewerPicker>) -> Self {
        Self { store, picker }
    }

    pub fn create_team(&self, name: &str, members: Vec<User>) -> Result<Team, ReviewError> {
        let team = Team {
            name: name.to_string(),
            members,
        };

        self.store.create_team(&team)?;
        Ok(team)
    }

    pub fn get_team(&self, name: &str) -> Result<Team, ReviewError> {
        Ok(self.store.get_team(name)?)
    }

    pub fn set_user_active(&self, user_id: &str, is_active: bool) -> Result<User, ReviewError> {
        Ok(self.store.set_user_active(user_id, is_active)?)
    }

    /// Creates a pull request and assigns up to two reviewers drawn from
    /// the author's active teammates. An empty candidate pool still
    /// succeeds with zero reviewers.
    ///
    /// The author/team read and the PR write are separate store calls;
    /// membership changes in between are an accepted race.
    pub fn create_pull_request(
        &self,
        id: &str,
        name: &str,
        author_id: &str,
    ) -> Result<PullRequest, ReviewError> {
        let author = self.store.get_user(author_id)?;
        let team = self.store.get_team(&author.team_name)?;

        let candidates: Vec<User> = team
            .members
            .into_iter()
            .filter(|m| m.id != author_id && m.is_active)
            .collect();

        let reviewers = self.picker.pick_reviewers(&candidates, MAX_REVIEWERS);

        let pr = PullRequest {
            id: id.to_string(),
            name: name.to_string(),
            author_id: author_id.to_string(),
            status: PrStatus::Open,
            assigned_reviewers: reviewers,
            created_at: Utc::now(),
            merged_at: None,
        };

        self.store.create_pull_request(&pr)?;
        Ok(pr)
    }

    /// Merges a pull request. Idempotent: merging an already-merged PR
    /// returns it unchanged without touching `merged_at`.
    pub fn merge_pull_request(&self, pr_id: &str) -> Result<PullRequest, ReviewError> {
        let mut pr = self.store.get_pull_request(pr_id)?;

        if pr.is_merged() {
            return Ok(pr);
        }

        pr.status = PrStatus::Merged;
        pr.merged_at = Some(Utc::now());

        self.store.update_pull_request(&pr)?;
        Ok(pr)
    }

    /// Every pull request the user is currently assigned to review.
    pub fn user_reviews(&self, user_id: &str) -> Result<Vec<PullRequest>, ReviewError> {
        self.store.get_user(user_id)?;
        Ok(self.store.pull_requests_by_reviewer(user_id))
    }

    /// Replaces one assigned reviewer with a randomly chosen active
    /// teammate. Only replaces an existing slot; never widens the list,
    /// never duplicates a reviewer, never picks the author or the
    /// outgoing reviewer.
    pub fn reassign_reviewer(
        &self,
        pr_id: &str,
        old_user_id: &str,
    ) -> Result<(PullRequest, String), ReviewError> {
        let mut pr = self.store.get_pull_request(pr_id)?;

        if pr.is_merged() {
            return Err(ReviewError::PrMerged);
        }

        let slot = pr
            .assigned_reviewers
            .iter()
            .position(|r| r == old_user_id)
            .ok_or(ReviewError::NotAssigned)?;

        let old_user = self.store.get_user(old_user_id)?;
        let team = self.store.get_team(&old_user.team_name)?;

        let candidates: Vec<User> = team
            .members
            .into_iter()
            .filter(|m| {
                m.is_active
                    && m.id != old_user_id
                    && m.id != pr.author_id
                    && !pr.assigned_reviewers.contains(&m.id)
            })
            .collect();

        let new_reviewer = self
            .picker
            .pick_one(&candidates)
            .ok_or(ReviewError::NoCandidate)?;

        pr.assigned_reviewers[slot] = new_reviewer.clone();

        self.store.update_pull_request(&pr)?;
        Ok((pr, new_reviewer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::reviewer_picker::SeededPicker;

    fn member(id: &str, active: bool) -> User {
        User {
            id: id.to_string(),
            username: format!("user-{id}"),
            team_name: "core".to_string(),
            is_active: active,
        }
    }

    fn service_with_team(members: Vec<User>) -> ReviewService {
        let store = MemoryStore::new();
        let svc = ReviewService::new(store, Box::new(SeededPicker::new(42)));
        svc.create_team("core", members).unwrap();
        svc
    }

    #[test]
    fn create_team_twice_fails() {
        let svc = service_with_team(vec![member("a", true)]);
        assert_eq!(
            svc.create_team("core", vec![]),
            Err(ReviewError::TeamExists)
        );
    }

    #[test]
    fn reviewers_come_from_active_teammates_only() {
        let svc = service_with_team(vec![
            member("a", true),
            member("b", true),
            member("c", true),
            member("d", false),
        ]);

        let pr = svc.create_pull_request("pr1", "feat", "a").unwrap();

        assert!(pr.assigned_reviewers.len() <= 2);
        for id in &pr.assigned_reviewers {
            assert_ne!(id, "a");
            assert_ne!(id, "d");
            assert!(["b", "c"].contains(&id.as_str()));
        }
    }

    #[test]
    fn lone_author_gets_zero_reviewers() {
        let svc = service_with_team(vec![member("a", true)]);

        let pr = svc.create_pull_request("pr1", "solo", "a").unwrap();

        assert_eq!(pr.status, PrStatus::Open);
        assert!(pr.assigned_reviewers.is_empty());
    }

    #[test]
    fn unknown_author_fails() {
        let svc = service_with_team(vec![member("a", true)]);
        assert_eq!(
            svc.create_pull_request("pr1", "x", "ghost"),
            Err(ReviewError::NotFound)
        );
    }

    #[test]
    fn duplicate_pr_id_fails() {
        let svc = service_with_team(vec![member("a", true), member("b", true)]);
        svc.create_pull_request("pr1", "x", "a").unwrap();
        assert_eq!(
            svc.create_pull_request("pr1", "y", "b"),
            Err(ReviewError::PrExists)
        );
    }

    #[test]
    fn merge_is_idempotent() {
        let svc = service_with_team(vec![member("a", true), member("b", true)]);
        svc.create_pull_request("pr1", "x", "a").unwrap();

        let first = svc.merge_pull_request("pr1").unwrap();
        let second = svc.merge_pull_request("pr1").unwrap();

        assert_eq!(first.status, PrStatus::Merged);
        assert!(first.merged_at.is_some());
        assert_eq!(first.merged_at, second.merged_at);
    }

    #[test]
    fn merge_unknown_pr_fails() {
        let svc = service_with_team(vec![member("a", true)]);
        assert_eq!(svc.merge_pull_request("nope"), Err(ReviewError::NotFound));
    }

    #[test]
    fn user_reviews_lists_current_assignments() {
        let svc = service_with_team(vec![member("a", true), member("b", true)]);
        let pr = svc.create_pull_request("pr1", "x", "a").unwrap();

        // With one eligible teammate the assignment is forced.
        assert_eq!(pr.assigned_reviewers, vec!["b".to_string()]);

        let reviews = svc.user_reviews("b").unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].id, "pr1");

        assert!(svc.user_reviews("a").unwrap().is_empty());
        assert_eq!(svc.user_reviews("ghost"), Err(ReviewError::NotFound));
    }

    #[test]
    fn reassign_replaces_in_place_without_duplicates() {
        let svc = service_with_team(vec![
            member("a", true),
            member("b", true),
            member("c", true),
            member("e", true),
        ]);
        let pr = svc.create_pull_request("pr1", "x", "a").unwrap();
        let old = pr.assigned_reviewers[0].clone();

        let (updated, new_reviewer) = svc.reassign_reviewer("pr1", &old).unwrap();

        assert_eq!(updated.assigned_reviewers.len(), pr.assigned_reviewers.len());
        assert_eq!(updated.assigned_reviewers[0], new_reviewer);
        assert!(!updated.assigned_reviewers.contains(&old));
        assert_ne!(new_reviewer, "a");

        let mut seen = updated.assigned_reviewers.clone();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), updated.assigned_reviewers.len());
    }

    #[test]
    fn reassign_on_merged_pr_fails_and_leaves_pr_unchanged() {
        let svc = service_with_team(vec![member("a", true), member("b", true), member("c", true)]);
        let pr = svc.create_pull_request("pr1", "x", "a").unwrap();
        let old = pr.assigned_reviewers[0].clone();
        svc.merge_pull_request("pr1").unwrap();

        assert_eq!(
            svc.reassign_reviewer("pr1", &old),
            Err(ReviewError::PrMerged)
        );

        let after = svc.user_reviews(&old).unwrap();
        assert_eq!(after.len(), 1, "assignment list untouched");
    }

    #[test]
    fn reassign_requires_current_assignment() {
        let svc = service_with_team(vec![member("a", true), member("b", true), member("c", true)]);
        svc.create_pull_request("pr1", "x", "a").unwrap();

        assert_eq!(
            svc.reassign_reviewer("pr1", "a"),
            Err(ReviewError::NotAssigned)
        );
    }

    #[test]
    fn reassign_with_no_eligible_replacement_fails() {
        // Team: author a, reviewer b, and an inactive d. Nobody can take
        // over from b.
        let svc = service_with_team(vec![
            member("a", true),
            member("b", true),
            member("d", false),
        ]);
        let pr = svc.create_pull_request("pr1", "x", "a").unwrap();
        assert_eq!(pr.assigned_reviewers, vec!["b".to_string()]);

        assert_eq!(
            svc.reassign_reviewer("pr1", "b"),
            Err(ReviewError::NoCandidate)
        );

        // Reviewer list unchanged on failure.
        let reviews = svc.user_reviews("b").unwrap();
        assert_eq!(reviews[0].assigned_reviewers, vec!["b".to_string()]);
    }

    #[test]
    fn reassign_on_unknown_pr_fails() {
        let svc = service_with_team(vec![member("a", true)]);
        assert_eq!(
            svc.reassign_reviewer("nope", "a"),
            Err(ReviewError::NotFound)
        );
    }
}
