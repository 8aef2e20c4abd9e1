//! The search mode state machine.
//!
//! Two mutually exclusive workflows share the search form: similarity
//! ranking over the five feature inputs, and exact category filtering over
//! the `Type` selection. Selecting a mode clears the other mode's inputs so
//! a stale query can never leak across a mode switch.

use crate::category::filter_by_category;
use crate::distance::score_all;
use crate::query::SimilarityQuery;
use ahash::AHashMap;
use cookielab_core::{Dataset, Record, Result, ALL_CATEGORIES, TYPE_COLUMN};
use serde::{Deserialize, Serialize};

/// Which search workflow is active. `Similarity` is the default and the
/// state restored by a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Similarity,
    #[serde(rename = "type")]
    Category,
}

/// What a successful submit produced.
#[derive(Debug)]
pub enum SearchOutcome {
    /// Similarity mode: every canonical row copied with a fresh score.
    /// The table should sort ascending by score.
    Ranked(Vec<Record>),
    /// Category mode: the matching subset with sentinel scores.
    /// The table should drop any active sort.
    Filtered(Vec<Record>),
}

/// Holds the per-mode input state and dispatches submits.
#[derive(Debug, Clone)]
pub struct SearchController {
    mode: SearchMode,
    similarity_inputs: AHashMap<String, String>,
    category_selection: String,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            mode: SearchMode::Similarity,
            similarity_inputs: AHashMap::new(),
            category_selection: ALL_CATEGORIES.to_string(),
        }
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn category_selection(&self) -> &str {
        &self.category_selection
    }

    pub fn similarity_input(&self, key: &str) -> Option<&str> {
        self.similarity_inputs.get(key).map(String::as_str)
    }

    /// Transition to a mode, clearing the other mode's input state.
    pub fn select_mode(&mut self, mode: SearchMode) {
        if self.mode == mode {
            return;
        }
        match mode {
            SearchMode::Similarity => self.category_selection = ALL_CATEGORIES.to_string(),
            SearchMode::Category => self.similarity_inputs.clear(),
        }
        self.mode = mode;
    }

    /// Record one feature input (similarity mode form field).
    pub fn set_feature_input(&mut self, key: &str, raw: String) {
        self.similarity_inputs.insert(key.to_string(), raw);
    }

    /// Record the category selection (category mode form field).
    pub fn set_category(&mut self, value: String) {
        self.category_selection = value;
    }

    /// Dispatch the active mode against the canonical row set. Validation
    /// failures propagate before any derived rows are produced.
    pub fn submit(&self, dataset: &Dataset) -> Result<SearchOutcome> {
        match self.mode {
            SearchMode::Similarity => {
                let query = SimilarityQuery::from_inputs(&self.similarity_inputs)?;
                Ok(SearchOutcome::Ranked(score_all(
                    dataset.records(),
                    &query,
                    dataset.params(),
                )))
            }
            SearchMode::Category => Ok(SearchOutcome::Filtered(filter_by_category(
                dataset.records(),
                TYPE_COLUMN,
                &self.category_selection,
            )?)),
        }
    }

    /// Reset both modes' inputs and return to the default mode.
    pub fn clear(&mut self) {
        self.mode = SearchMode::Similarity;
        self.similarity_inputs.clear();
        self.category_selection = ALL_CATEGORIES.to_string();
    }
}
