//! Error-handling module for the crate

use thiserror::Error;

use crate::tabular::table::ColumnMarker;

/// Error-Collection for all the possible Errors occurring in this crate
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A row does not have as many entries as the table has columns
    #[error("Row of length {found} cannot be added to a table with {expected} columns")]
    ArityMismatch {
        /// Number of columns of the table
        expected: usize,
        /// Length of the offending row
        found: usize,
    },
    /// An operation referred to a column that the table does not have
    #[error("The table has no column marked with {0}")]
    UnknownColumnMarker(ColumnMarker),
    /// The same marker was used for two columns of one table
    #[error("The column marker {0} is used more than once")]
    DuplicateColumnMarker(ColumnMarker),
}
