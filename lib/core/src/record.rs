use crate::value::{CellValue, MatchScore};
use ahash::AHashMap;
use serde::Serialize;

/// The five numeric feature columns used for similarity ranking.
/// Names are literal CSV headers, embedded spaces included.
pub const FEATURE_KEYS: [&str; 5] = [
    "Spread ratio",
    "Cookie hardness",
    "WI",
    "Crack Ratio",
    "Sensory score",
];

/// Designated key field; rows with a blank value here are dropped at load.
pub const NAME_COLUMN: &str = "Name";

/// Categorical column used by category search.
pub const TYPE_COLUMN: &str = "Type";

/// Synthetic score column, always displayed first. Not a data column.
pub const SCORE_COLUMN: &str = "matchScore";

/// Sentinel category option meaning "no filter / nothing selected".
pub const ALL_CATEGORIES: &str = "all";

pub type FieldMap = AHashMap<String, CellValue>;

/// One dataset row.
///
/// The id is the row's position in parse order and never changes after
/// assignment. Canonical records are never mutated in place; search modes
/// produce copies with only `match_score` (and membership) changed.
#[derive(Debug, Clone)]
pub struct Record {
    pub id: u64,
    pub fields: FieldMap,
    pub match_score: MatchScore,
}

impl Record {
    #[must_use]
    pub fn new(id: u64, fields: FieldMap) -> Self {
        Self {
            id,
            fields,
            match_score: MatchScore::Unscored,
        }
    }

    pub fn cell(&self, column: &str) -> Option<&CellValue> {
        self.fields.get(column)
    }

    /// Numeric coercion of a cell, missing on failure.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        self.cell(column).and_then(CellValue::as_f64)
    }

    /// Stringified cell value as shown in the table; the synthetic score
    /// column renders through [`MatchScore`].
    pub fn display(&self, column: &str) -> String {
        if column == SCORE_COLUMN {
            return self.match_score.to_string();
        }
        self.cell(column).map(ToString::to_string).unwrap_or_default()
    }

    #[must_use]
    pub fn with_score(mut self, score: MatchScore) -> Self {
        self.match_score = score;
        self
    }
}

/// Display metadata for one table column.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub key: String,
    pub label: String,
    pub filterable: bool,
    pub sortable: bool,
}

impl Column {
    /// A column backed by a CSV header.
    #[must_use]
    pub fn data(key: &str) -> Self {
        Self {
            key: key.to_string(),
            label: key.to_string(),
            filterable: true,
            sortable: true,
        }
    }

    /// The synthetic score column: sortable, never text-filtered.
    #[must_use]
    pub fn score() -> Self {
        Self {
            key: SCORE_COLUMN.to_string(),
            label: "Match".to_string(),
            filterable: false,
            sortable: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with(column: &str, value: CellValue) -> Record {
        let mut fields = FieldMap::default();
        fields.insert(column.to_string(), value);
        Record::new(0, fields)
    }

    #[test]
    fn test_numeric_lookup() {
        let r = record_with("WI", CellValue::Number(61.2));
        assert_eq!(r.numeric("WI"), Some(61.2));
        assert_eq!(r.numeric("absent"), None);
    }

    #[test]
    fn test_display_score_column() {
        let r = record_with("Name", CellValue::Text("A".into()));
        assert_eq!(r.display(SCORE_COLUMN), "-");
        assert_eq!(
            r.with_score(MatchScore::Scored(0.25)).display(SCORE_COLUMN),
            "0.25000"
        );
    }

    #[test]
    fn test_score_column_not_filterable() {
        assert!(!Column::score().filterable);
        assert!(Column::score().sortable);
        assert!(Column::data("Type").filterable);
    }
}
