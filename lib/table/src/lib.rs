//! # cookielab Table
//!
//! The generic table view engine and the interactive session that wires it
//! to the search modes:
//!
//! - [`ViewState`] - per-column text filters, single stable sort key,
//!   pagination; replaced wholesale on each transition
//! - [`TableSession`] - canonical + derived row sets, mode controller, and
//!   view state behind one event-per-method surface

pub mod session;
pub mod view;

pub use session::{PageAction, SearchRequest, TableSession};
pub use view::{
    ColumnFilter, PageInfo, PageView, SortDirection, SortSpec, ViewState, DEFAULT_PAGE_SIZE,
};
