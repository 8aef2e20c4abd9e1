//! Generic table view semantics: per-column text filters, a single stable
//! sort key, and pagination. The engine operates on whatever row set it is
//! given and knows nothing about similarity or category search.
//!
//! Order of operations is fixed: filter, then sort, then slice the page.
//! The sort is stable, so ties preserve the order produced by the upstream
//! stage; since the upstream order is record-id order, the effective
//! tie-break is record id ascending.

use cookielab_core::{CellValue, Record, SCORE_COLUMN};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// The single active sort key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: String,
    pub direction: SortDirection,
}

impl SortSpec {
    #[must_use]
    pub fn ascending(column: &str) -> Self {
        Self {
            column: column.to_string(),
            direction: SortDirection::Asc,
        }
    }
}

/// One per-column text filter: case-insensitive substring match against the
/// stringified cell value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnFilter {
    pub column: String,
    pub needle: String,
}

impl ColumnFilter {
    fn matches(&self, record: &Record) -> bool {
        record
            .display(&self.column)
            .to_lowercase()
            .contains(&self.needle.to_lowercase())
    }
}

/// Page bounds and navigation flags reported for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    /// 1-based index of the first row on the page; 0 when the page is empty.
    pub start: usize,
    /// 1-based index of the last row on the page; 0 when the page is empty.
    pub end: usize,
    /// Row count after filtering, before slicing.
    pub total: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

/// One rendered page: borrowed rows plus the bounds that produced them.
#[derive(Debug)]
pub struct PageView<'a> {
    pub rows: Vec<&'a Record>,
    pub info: PageInfo,
}

/// The table's display state. Replaced wholesale on every transition; the
/// builder-style methods return a new state and leave `self` untouched.
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    filters: Vec<ColumnFilter>,
    sort: Option<SortSpec>,
    page_index: usize,
    page_size: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ViewState {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            filters: Vec::new(),
            sort: None,
            page_index: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn filters(&self) -> &[ColumnFilter] {
        &self.filters
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Set or replace one column's text filter; an empty needle removes it.
    /// Any filter change snaps back to the first page.
    #[must_use]
    pub fn with_filter(&self, column: &str, needle: &str) -> Self {
        let mut next = self.clone();
        next.filters.retain(|f| f.column != column);
        if !needle.is_empty() {
            next.filters.push(ColumnFilter {
                column: column.to_string(),
                needle: needle.to_string(),
            });
        }
        next.page_index = 0;
        next
    }

    #[must_use]
    pub fn with_sort(&self, sort: Option<SortSpec>) -> Self {
        let mut next = self.clone();
        next.sort = sort;
        next
    }

    #[must_use]
    pub fn with_page_size(&self, page_size: usize) -> Self {
        let mut next = self.clone();
        next.page_size = page_size.max(1);
        next.page_index = 0;
        next
    }

    #[must_use]
    pub fn first_page(&self) -> Self {
        self.at_page(0)
    }

    #[must_use]
    pub fn prev_page(&self) -> Self {
        self.at_page(self.page_index.saturating_sub(1))
    }

    /// Advance a page; a no-op at the last page of `total` filtered rows.
    #[must_use]
    pub fn next_page(&self, total: usize) -> Self {
        let last = self.last_index(total);
        self.at_page((self.page_index + 1).min(last))
    }

    #[must_use]
    pub fn last_page(&self, total: usize) -> Self {
        self.at_page(self.last_index(total))
    }

    #[must_use]
    pub fn at_page(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.page_index = index;
        next
    }

    fn last_index(&self, total: usize) -> usize {
        page_count(total, self.page_size).saturating_sub(1)
    }

    /// Filter, sort, and slice the given rows into the current page.
    /// A page index beyond the end (the row set shrank) clamps to the last
    /// page rather than erroring.
    pub fn apply<'a>(&self, rows: &'a [Record]) -> PageView<'a> {
        let mut visible: Vec<&Record> = rows
            .iter()
            .filter(|record| self.filters.iter().all(|f| f.matches(record)))
            .collect();

        if let Some(spec) = &self.sort {
            visible.sort_by(|a, b| {
                let ordering = compare_records(a, b, &spec.column);
                match spec.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            });
        }

        let total = visible.len();
        let count = page_count(total, self.page_size);
        let page_index = self.page_index.min(count.saturating_sub(1));
        let start = page_index * self.page_size;
        let end = (start + self.page_size).min(total);
        let rows: Vec<&Record> = visible[start..end].to_vec();

        PageView {
            info: PageInfo {
                page_index,
                page_count: count,
                page_size: self.page_size,
                start: if rows.is_empty() { 0 } else { start + 1 },
                end,
                total,
                has_prev: page_index > 0,
                has_next: page_index + 1 < count,
            },
            rows,
        }
    }
}

fn page_count(total: usize, page_size: usize) -> usize {
    if total == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

/// Cell ordering for a sort key: numbers before text, missing cells last.
/// Equal cells return `Equal` so the stable sort keeps the upstream order.
fn compare_records(a: &Record, b: &Record, column: &str) -> Ordering {
    if column == SCORE_COLUMN {
        return OrderedFloat(a.match_score.as_f64()).cmp(&OrderedFloat(b.match_score.as_f64()));
    }

    let rank = |cell: Option<&CellValue>| match cell {
        Some(CellValue::Number(_)) => 0u8,
        Some(CellValue::Text(_)) => 1,
        Some(CellValue::Missing) | None => 2,
    };

    let (ca, cb) = (a.cell(column), b.cell(column));
    match (ca, cb) {
        (Some(CellValue::Number(x)), Some(CellValue::Number(y))) => {
            OrderedFloat(*x).cmp(&OrderedFloat(*y))
        }
        (Some(CellValue::Text(x)), Some(CellValue::Text(y))) => x.cmp(y),
        _ => rank(ca).cmp(&rank(cb)),
    }
}
