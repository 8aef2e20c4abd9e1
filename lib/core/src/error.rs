use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure taxonomy for the table core. None of these are fatal to the
/// process; every variant maps to an inline, recoverable API state.
#[derive(Error, Debug)]
pub enum Error {
    /// The dataset resource could not be read or parsed. The table surface
    /// presents an empty/unavailable state instead of crashing.
    #[error("dataset unavailable: {0}")]
    DataUnavailable(String),

    /// Similarity submit with one or more feature values empty or
    /// non-numeric. The active row set and sort are left untouched.
    #[error("incomplete similarity query, missing values for: {}", missing.join(", "))]
    IncompleteQuery { missing: Vec<String> },

    /// Category submit with the sentinel "all" selection.
    #[error("invalid category selection: {0:?}")]
    InvalidSelection(String),

    /// Sort or filter referencing a column that does not exist or does not
    /// support the operation.
    #[error("unknown or unsupported column: {0:?}")]
    UnknownColumn(String),
}
