pub mod review_service;
pub use review_service::{ReviewError, ReviewService};

pub mod reviewer_picker;
pub use reviewer_picker::{RandomPicker, ReviewerPicker, SeededPicker};
