use std::sync::Arc;

use crate::config::Config;
use crate::services::{RandomPicker, ReviewService, ReviewerPicker};
use crate::store::MemoryStore;

/// Process-wide state: the store and the domain service over it,
/// constructed once at startup and shared into every handler.
#[derive(Clone)]
pub struct SharedState {
    pub config: Config,

    pub store: MemoryStore,

    pub review_service: Arc<ReviewService>,
}

impl SharedState {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self::with_picker(config, Box::new(RandomPicker))
    }

    /// Test entry point: swap in a deterministic picker.
    #[must_use]
    pub fn with_picker(config: Config, picker: Box<dyn ReviewerPicker>) -> Self {
        let store = MemoryStore::new();
        let review_service = Arc::new(ReviewService::new(store.clone(), picker));

        Self {
            config,
            store,
            review_service,
        }
    }
}
