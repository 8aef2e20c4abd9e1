//! The interactive table session.
//!
//! One session owns the loaded dataset, the derived row set produced by the
//! last executed search, the search mode controller, and the view state.
//! Every user event (submit, clear, mode select, sort, filter, page) maps to
//! one synchronous method here; the API layer serializes access, so there is
//! no concurrent mutation to reason about.

use crate::view::{PageView, SortSpec, ViewState, DEFAULT_PAGE_SIZE};
use cookielab_core::{Column, Dataset, Error, Record, Result, SCORE_COLUMN};
use cookielab_search::{json_to_input, SearchController, SearchMode, SearchOutcome};
use serde::Deserialize;
use std::collections::HashMap;

/// A submit payload: one of the two query shapes, never both.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SearchRequest {
    /// Five feature inputs, loosely typed (numbers or numeric strings).
    Similarity {
        values: HashMap<String, serde_json::Value>,
    },
    /// One category value from the `Type` options.
    #[serde(rename = "type")]
    Category { value: String },
}

/// A pagination event.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageAction {
    First,
    Prev,
    Next,
    Last,
}

pub struct TableSession {
    dataset: Dataset,
    active: Vec<Record>,
    controller: SearchController,
    view: ViewState,
}

impl TableSession {
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        Self::with_page_size(dataset, DEFAULT_PAGE_SIZE)
    }

    #[must_use]
    pub fn with_page_size(dataset: Dataset, page_size: usize) -> Self {
        let active = dataset.records().to_vec();
        Self {
            dataset,
            active,
            controller: SearchController::new(),
            view: ViewState::new(page_size),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn mode(&self) -> SearchMode {
        self.controller.mode()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn columns(&self) -> Vec<Column> {
        self.dataset.columns()
    }

    /// The derived row set currently feeding the view engine.
    pub fn active_rows(&self) -> &[Record] {
        &self.active
    }

    /// The current page after filters, sort, and slicing.
    pub fn current_page(&self) -> PageView<'_> {
        self.view.apply(&self.active)
    }

    /// Execute a search. On success the derived row set is replaced and the
    /// sort adjusted per mode (ascending score for similarity, none for
    /// category); on failure nothing changes besides the recorded inputs.
    pub fn submit_search(&mut self, request: SearchRequest) -> Result<()> {
        match request {
            SearchRequest::Similarity { values } => {
                self.controller.select_mode(SearchMode::Similarity);
                for (key, value) in &values {
                    self.controller.set_feature_input(key, json_to_input(value));
                }
            }
            SearchRequest::Category { value } => {
                self.controller.select_mode(SearchMode::Category);
                self.controller.set_category(value);
            }
        }

        match self.controller.submit(&self.dataset)? {
            SearchOutcome::Ranked(rows) => {
                self.active = rows;
                self.view = self
                    .view
                    .with_sort(Some(SortSpec::ascending(SCORE_COLUMN)))
                    .first_page();
            }
            SearchOutcome::Filtered(rows) => {
                self.active = rows;
                self.view = self.view.with_sort(None).first_page();
            }
        }
        Ok(())
    }

    /// Reset everything: canonical row set with sentinel scores, default
    /// mode, no sort, no filters, first page. Page size is kept.
    pub fn clear_search(&mut self) {
        self.controller.clear();
        self.active = self.dataset.records().to_vec();
        self.view = ViewState::new(self.view.page_size());
    }

    /// Explicit mode transition (radio button), no submit.
    pub fn select_mode(&mut self, mode: SearchMode) {
        self.controller.select_mode(mode);
    }

    /// Replace the sort key, or clear it with `None`.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) -> Result<()> {
        if let Some(spec) = &sort {
            if !self.dataset.has_column(&spec.column) {
                return Err(Error::UnknownColumn(spec.column.clone()));
            }
        }
        self.view = self.view.with_sort(sort);
        Ok(())
    }

    /// Set or remove (empty value) one column's text filter. The score
    /// column takes no text filter.
    pub fn set_filter(&mut self, column: &str, value: &str) -> Result<()> {
        let filterable = self
            .columns()
            .into_iter()
            .any(|c| c.key == column && c.filterable);
        if !filterable {
            return Err(Error::UnknownColumn(column.to_string()));
        }
        self.view = self.view.with_filter(column, value);
        Ok(())
    }

    /// Page navigation; all actions clamp at the boundaries.
    pub fn page(&mut self, action: PageAction) {
        let total = self.current_page().info.total;
        self.view = match action {
            PageAction::First => self.view.first_page(),
            PageAction::Prev => self.view.prev_page(),
            PageAction::Next => self.view.next_page(total),
            PageAction::Last => self.view.last_page(total),
        };
    }

    pub fn set_page_index(&mut self, index: usize) {
        self.view = self.view.at_page(index);
    }

    pub fn set_page_size(&mut self, size: usize) {
        self.view = self.view.with_page_size(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookielab_core::{MatchScore, FEATURE_KEYS, TYPE_COLUMN};
    use serde_json::json;

    const SAMPLE: &str = "\
Name,Type,Spread ratio,Cookie hardness,WI,Crack Ratio,Sensory score
A,Soft,1,2,3,4,5
B,Crunchy,5,2,3,4,5
C,Soft,9,2,3,4,5
";

    fn session() -> TableSession {
        TableSession::new(Dataset::from_reader(SAMPLE.as_bytes()).unwrap())
    }

    fn similarity_request(values: [f64; 5]) -> SearchRequest {
        SearchRequest::Similarity {
            values: FEATURE_KEYS
                .iter()
                .zip(values)
                .map(|(k, v)| (k.to_string(), json!(v)))
                .collect(),
        }
    }

    #[test]
    fn test_similarity_submit_sorts_ascending_by_score() {
        let mut session = session();
        session
            .submit_search(similarity_request([5.0, 2.0, 3.0, 4.0, 5.0]))
            .unwrap();

        assert_eq!(session.mode(), SearchMode::Similarity);
        assert_eq!(session.view().sort().unwrap().column, SCORE_COLUMN);

        let page = session.current_page();
        assert_eq!(page.rows[0].display("Name"), "B");
        assert_eq!(page.info.total, 3);
    }

    #[test]
    fn test_category_submit_filters_and_clears_sort() {
        let mut session = session();
        session
            .submit_search(similarity_request([5.0, 2.0, 3.0, 4.0, 5.0]))
            .unwrap();
        session
            .submit_search(SearchRequest::Category {
                value: "Soft".to_string(),
            })
            .unwrap();

        assert_eq!(session.mode(), SearchMode::Category);
        assert!(session.view().sort().is_none());
        let page = session.current_page();
        assert_eq!(page.info.total, 2);
        assert!(page.rows.iter().all(|r| r.match_score.is_unscored()));
    }

    #[test]
    fn test_failed_submit_leaves_rows_and_sort_unchanged() {
        let mut session = session();
        session
            .submit_search(similarity_request([5.0, 2.0, 3.0, 4.0, 5.0]))
            .unwrap();

        // Incomplete similarity query: one value blank.
        let mut values: HashMap<String, serde_json::Value> = FEATURE_KEYS
            .iter()
            .map(|k| (k.to_string(), json!(1.0)))
            .collect();
        values.insert("WI".to_string(), json!(""));
        assert!(session
            .submit_search(SearchRequest::Similarity { values })
            .is_err());

        assert_eq!(session.view().sort().unwrap().column, SCORE_COLUMN);
        assert_eq!(session.current_page().rows[0].display("Name"), "B");

        // Sentinel category selection.
        assert!(session
            .submit_search(SearchRequest::Category {
                value: "all".to_string()
            })
            .is_err());
        assert_eq!(session.current_page().info.total, 3);
    }

    #[test]
    fn test_clear_restores_canonical_state() {
        let mut session = session();
        session.set_filter("Name", "A").unwrap();
        session
            .submit_search(SearchRequest::Category {
                value: "Soft".to_string(),
            })
            .unwrap();
        session.clear_search();

        assert_eq!(session.mode(), SearchMode::Similarity);
        assert!(session.view().sort().is_none());
        assert!(session.view().filters().is_empty());

        let page = session.current_page();
        assert_eq!(page.info.total, 3);
        assert!(session
            .active_rows()
            .iter()
            .all(|r| r.match_score == MatchScore::Unscored));
    }

    #[test]
    fn test_sort_on_unknown_column_rejected() {
        let mut session = session();
        assert!(matches!(
            session.set_sort(Some(SortSpec::ascending("Chewiness"))),
            Err(Error::UnknownColumn(_))
        ));
        assert!(session.set_sort(Some(SortSpec::ascending(TYPE_COLUMN))).is_ok());
        assert!(session.set_sort(None).is_ok());
    }

    #[test]
    fn test_filter_on_score_column_rejected() {
        let mut session = session();
        assert!(matches!(
            session.set_filter(SCORE_COLUMN, "0.5"),
            Err(Error::UnknownColumn(_))
        ));
        assert!(session.set_filter("Name", "a").is_ok());
    }

    #[test]
    fn test_page_navigation_round_trip() {
        let mut session = session();
        session.set_page_size(1);
        session.page(PageAction::Next);
        assert_eq!(session.current_page().info.page_index, 1);
        session.page(PageAction::Last);
        assert_eq!(session.current_page().info.page_index, 2);
        session.page(PageAction::Next);
        assert_eq!(session.current_page().info.page_index, 2);
        session.page(PageAction::First);
        assert_eq!(session.current_page().info.page_index, 0);
        session.page(PageAction::Prev);
        assert_eq!(session.current_page().info.page_index, 0);
    }
}
