//! # cookielab
//!
//! An in-memory dataset service for a cookie quality reference dataset.
//!
//! cookielab loads a CSV of past cookie samples once at startup, derives
//! per-feature normalization parameters, and serves an interactive table
//! over REST: similarity ranking over five numeric features, exact category
//! filtering, and generic sort / column-filter / pagination semantics.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! cookielab --dataset ./data/cookies.csv --http-port 8080
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use cookielab::prelude::*;
//!
//! let csv = "Name,Type,Spread ratio,Cookie hardness,WI,Crack Ratio,Sensory score\n\
//!            Choc chip,Crunchy,5.2,31.5,61.2,0.8,7.5\n\
//!            Oat soft,Soft,4.1,18.0,55.0,0.4,8.2\n";
//! let dataset = Dataset::from_reader(csv.as_bytes()).unwrap();
//! let mut session = TableSession::new(dataset);
//!
//! session.submit_search(SearchRequest::Category { value: "Soft".into() }).unwrap();
//! assert_eq!(session.current_page().info.total, 1);
//! ```
//!
//! ## Crate Structure
//!
//! - `cookielab-core` - CSV loading, typed cells, normalization, errors
//! - `cookielab-search` - similarity scorer, category filter, mode machine
//! - `cookielab-table` - view engine (filter/sort/paginate) and session
//! - `cookielab-api` - REST endpoints and the prediction service proxy

// Re-export core types
pub use cookielab_core::{
    CellValue, Column, Dataset, Error, FeatureRange, MatchScore, Record, Result,
    ALL_CATEGORIES, FEATURE_KEYS, NAME_COLUMN, SCORE_COLUMN, TYPE_COLUMN,
};

// Re-export search
pub use cookielab_search::{
    filter_by_category, score_all, score_record, SearchController, SearchMode, SearchOutcome,
    SimilarityQuery,
};

// Re-export table
pub use cookielab_table::{
    PageAction, PageInfo, SearchRequest, SortDirection, SortSpec, TableSession, ViewState,
};

// Re-export API
pub use cookielab_api::{AppState, PredictClient, RestApi, TableState};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        CellValue, Column, Dataset, Error, FeatureRange, MatchScore, Record, Result,
        SearchController, SearchMode, SearchOutcome, SimilarityQuery,
        PageAction, PageInfo, SearchRequest, SortDirection, SortSpec, TableSession, ViewState,
        AppState, PredictClient, RestApi, TableState,
        ALL_CATEGORIES, FEATURE_KEYS, NAME_COLUMN, SCORE_COLUMN, TYPE_COLUMN,
    };
}
