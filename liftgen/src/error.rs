//! Error-handling module for the crate

use thiserror::Error;

use crate::{datalog::transformations::rule_splitting::SplitError, task::TaskError};

/// Error-Collection for all the possible Errors occurring in this crate
#[allow(variant_size_differences)]
#[derive(Error, Debug)]
pub enum Error {
    /// Rule splitting errors
    #[error(transparent)]
    SplitError(#[from] SplitError),
    /// Errors in the description of a task
    #[error(transparent)]
    TaskError(#[from] TaskError),
    /// Error in the physical layer
    #[error(transparent)]
    PhysicalError(#[from] liftgen_physical::error::Error),
    /// Grounding parameters could not be read
    #[error("Unable to read grounding parameters: {0}")]
    ParametersError(#[from] serde_json::Error),
    /// Error when trying to look up a join ordering by name
    #[error("The join ordering {0} is unknown.")]
    UnknownJoinOrdering(String),
    /// A ground action does not provide one object per schema parameter
    #[error("Action schema {schema} expects {expected} arguments but got {found}")]
    ActionArityMismatch {
        /// Index of the action schema
        schema: usize,
        /// Number of parameters of the schema
        expected: usize,
        /// Number of arguments of the action
        found: usize,
    },
}
