//! # cookielab Search
//!
//! The two search workflows over the canonical row set:
//!
//! - [`SimilarityQuery`] + [`score_record`] - five-feature
//!   normalized-Euclidean similarity ranking
//! - [`filter_by_category`] - exact categorical filtering
//! - [`SearchController`] - the mode state machine dispatching between them

pub mod category;
pub mod distance;
pub mod mode;
pub mod query;

pub use category::filter_by_category;
pub use distance::{score_all, score_record};
pub use mode::{SearchController, SearchMode, SearchOutcome};
pub use query::{json_to_input, SimilarityQuery};
