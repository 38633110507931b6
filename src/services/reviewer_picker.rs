//! Reviewer selection strategy.
//!
//! Selection is intentionally randomized per call, so the randomness lives
//! behind a trait and tests can substitute a seeded source.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};
use std::sync::Mutex;

use crate::models::User;

/// Draws reviewers from a candidate pool. Implementations must be safe to
/// share across request handlers.
pub trait ReviewerPicker: Send + Sync {
    /// Uniformly shuffles the pool and returns at most `max` user ids, in
    /// post-shuffle order. An empty pool yields an empty list.
    fn pick_reviewers(&self, candidates: &[User], max: usize) -> Vec<String>;

    /// Picks a single replacement uniformly at random.
    fn pick_one(&self, candidates: &[User]) -> Option<String>;
}

/// Production picker backed by the thread-local rng.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPicker;

impl ReviewerPicker for RandomPicker {
    fn pick_reviewers(&self, candidates: &[User], max: usize) -> Vec<String> {
        let mut pool: Vec<&User> = candidates.iter().collect();
        pool.shuffle(&mut rand::rng());
        pool.iter().take(max).map(|u| u.id.clone()).collect()
    }

    fn pick_one(&self, candidates: &[User]) -> Option<String> {
        candidates.choose(&mut rand::rng()).map(|u| u.id.clone())
    }
}

/// Deterministic picker for tests: same seed, same picks.
pub struct SeededPicker {
    rng: Mutex<StdRng>,
}

impl SeededPicker {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ReviewerPicker for SeededPicker {
    fn pick_reviewers(&self, candidates: &[User], max: usize) -> Vec<String> {
        let mut rng = self.rng.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        let mut pool: Vec<&User> = candidates.iter().collect();
        pool.shuffle(&mut *rng);
        pool.iter().take(max).map(|u| u.id.clone()).collect()
    }

    fn pick_one(&self, candidates: &[User]) -> Option<String> {
        let mut rng = self.rng.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        candidates.choose(&mut *rng).map(|u| u.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(ids: &[&str]) -> Vec<User> {
        ids.iter()
            .map(|id| User {
                id: (*id).to_string(),
                username: (*id).to_string(),
                team_name: "t".to_string(),
                is_active: true,
            })
            .collect()
    }

    #[test]
    fn picks_at_most_max_without_duplicates() {
        let picker = RandomPicker;
        let candidates = pool(&["a", "b", "c", "d"]);

        for _ in 0..50 {
            let picked = picker.pick_reviewers(&candidates, 2);
            assert_eq!(picked.len(), 2);
            assert_ne!(picked[0], picked[1]);
        }
    }

    #[test]
    fn empty_pool_yields_nothing() {
        let picker = RandomPicker;
        assert!(picker.pick_reviewers(&[], 2).is_empty());
        assert!(picker.pick_one(&[]).is_none());
    }

    #[test]
    fn seeded_picker_is_reproducible() {
        let candidates = pool(&["a", "b", "c", "d", "e"]);

        let first = SeededPicker::new(7).pick_reviewers(&candidates, 2);
        let second = SeededPicker::new(7).pick_reviewers(&candidates, 2);

        assert_eq!(first, second);
    }
}
