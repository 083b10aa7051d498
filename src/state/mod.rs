//! State module for tracking crawl progress
//!
//! `PageState` tracks a single link from the work queue through navigation,
//! extraction and the final success or failure classification.

mod page_state;

pub use page_state::PageState;
