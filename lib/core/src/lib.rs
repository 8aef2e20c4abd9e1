//! # cookielab Core
//!
//! Core library for the cookielab dataset service.
//!
//! This crate owns everything derived from the CSV resource:
//!
//! - [`CellValue`] - Dynamically typed dataset cells (number / text / missing)
//! - [`Record`] - One dataset row with a stable id and a match score
//! - [`Dataset`] - The canonical row set plus load-time metadata
//! - [`FeatureRange`] - Per-feature min/max normalization parameters
//!
//! ## Example
//!
//! ```rust
//! use cookielab_core::Dataset;
//!
//! let csv = "Name,Type,Spread ratio,Cookie hardness,WI,Crack Ratio,Sensory score\n\
//!            Choc chip,Crunchy,5.2,31.5,61.2,0.8,7.5\n";
//! let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
//! assert_eq!(dataset.len(), 1);
//! assert_eq!(dataset.category_options(), ["all", "Crunchy"]);
//! ```

pub mod dataset;
pub mod error;
pub mod normalize;
pub mod record;
pub mod value;

pub use dataset::Dataset;
pub use error::{Error, Result};
pub use normalize::{compute_params, FeatureRange};
pub use record::{
    Column, FieldMap, Record, ALL_CATEGORIES, FEATURE_KEYS, NAME_COLUMN, SCORE_COLUMN, TYPE_COLUMN,
};
pub use value::{CellValue, MatchScore};
