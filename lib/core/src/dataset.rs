//! CSV loading and derived dataset metadata.
//!
//! The loader runs once at startup. It parses the first line as headers,
//! drops rows with a blank `Name`, assigns each surviving row its stable
//! parse-order id, and derives the metadata consumed by the search modes:
//! normalization parameters for the five feature columns and the sorted
//! list of category options.

use crate::error::{Error, Result};
use crate::normalize::{compute_params, FeatureRange};
use crate::record::{
    Column, FieldMap, Record, ALL_CATEGORIES, FEATURE_KEYS, NAME_COLUMN, SCORE_COLUMN, TYPE_COLUMN,
};
use crate::value::CellValue;
use ahash::AHashMap;
use std::collections::BTreeSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// The canonical row set plus everything derived from it at load time.
/// Immutable after construction; search modes copy rows, never edit them.
#[derive(Debug, Clone)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
    params: AHashMap<String, FeatureRange>,
    category_options: Vec<String>,
}

impl Dataset {
    /// Load the dataset from a file on disk. A single attempt; any I/O or
    /// parse failure surfaces as [`Error::DataUnavailable`].
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .map_err(|e| Error::DataUnavailable(format!("{}: {}", path.as_ref().display(), e)))?;
        Self::from_reader(file)
    }

    /// Parse CSV content from any reader, first line = headers.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .map_err(|e| Error::DataUnavailable(e.to_string()))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row.map_err(|e| Error::DataUnavailable(e.to_string()))?;
            let mut fields = FieldMap::default();
            for (header, raw) in headers.iter().zip(row.iter()) {
                fields.insert(header.clone(), CellValue::parse(raw));
            }
            // Rows without a Name are noise in the source file.
            if fields.get(NAME_COLUMN).map_or(true, CellValue::is_missing) {
                continue;
            }
            let id = records.len() as u64;
            records.push(Record::new(id, fields));
        }

        let params = compute_params(&records, &FEATURE_KEYS);
        let category_options = derive_category_options(&records);

        Ok(Self {
            headers,
            records,
            params,
            category_options,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// The canonical row set, in parse order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn params(&self) -> &AHashMap<String, FeatureRange> {
        &self.params
    }

    /// `"all"` followed by the sorted unique non-empty `Type` values.
    pub fn category_options(&self) -> &[String] {
        &self.category_options
    }

    /// Display columns: the synthetic score column first, then one column
    /// per CSV header in source order.
    pub fn columns(&self) -> Vec<Column> {
        let mut columns = vec![Column::score()];
        columns.extend(self.headers.iter().map(|h| Column::data(h)));
        columns
    }

    /// Whether a column key names the score column or a CSV header.
    pub fn has_column(&self, key: &str) -> bool {
        key == SCORE_COLUMN || self.headers.iter().any(|h| h == key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn derive_category_options(records: &[Record]) -> Vec<String> {
    let uniques: BTreeSet<&str> = records
        .iter()
        .filter_map(|r| r.cell(TYPE_COLUMN).and_then(CellValue::as_text))
        .filter(|s| !s.is_empty())
        .collect();

    let mut options = Vec::with_capacity(uniques.len() + 1);
    options.push(ALL_CATEGORIES.to_string());
    options.extend(uniques.into_iter().map(str::to_string));
    options
}
