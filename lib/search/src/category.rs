//! Exact categorical filtering.
//!
//! Category mode does not rank: matching rows come back with their score
//! reset to the sentinel, and non-matching rows are excluded entirely.

use cookielab_core::{CellValue, Error, MatchScore, Record, Result, ALL_CATEGORIES};

/// Keep exactly the rows whose categorical cell equals `value`
/// (case-sensitive, text cells only). The sentinel `"all"` is not a real
/// category and is rejected before anything is touched.
pub fn filter_by_category(records: &[Record], column: &str, value: &str) -> Result<Vec<Record>> {
    if value == ALL_CATEGORIES {
        return Err(Error::InvalidSelection(value.to_string()));
    }

    Ok(records
        .iter()
        .filter(|record| {
            matches!(record.cell(column), Some(CellValue::Text(s)) if s == value)
        })
        .map(|record| record.clone().with_score(MatchScore::Unscored))
        .collect())
}
