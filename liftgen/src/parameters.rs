//! This module defines [GroundingParameters].

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::{
    error::Error,
    successor_generators::ordering::{declaration_order, inverse_arity_order, JoinOrdering},
};

/// Selects the order in which preconditions are joined
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum JoinOrderingKind {
    /// Join preconditions in the order they are declared
    Declaration,
    /// Join preconditions of higher arity first
    #[default]
    InverseArity,
}

impl JoinOrderingKind {
    /// Look up an ordering by its name.
    pub fn from_name(name: &str) -> Result<Self, Error> {
        name.parse()
            .map_err(|_| Error::UnknownJoinOrdering(name.to_string()))
    }

    /// Return the function implementing this ordering.
    pub fn ordering(self) -> JoinOrdering {
        match self {
            JoinOrderingKind::Declaration => declaration_order,
            JoinOrderingKind::InverseArity => inverse_arity_order,
        }
    }
}

/// External parameters affecting grounding and successor generation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundingParameters {
    /// Order in which the preconditions of an action schema are joined
    pub join_ordering: JoinOrderingKind,
    /// Whether successor generation is recorded in the timing tree
    pub timing: bool,
}

impl GroundingParameters {
    /// Read parameters from a JSON document.
    ///
    /// Missing fields take their default value.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let parameters: Self = serde_json::from_str(json)?;
        log::debug!("Using grounding parameters {parameters:?}");

        Ok(parameters)
    }

    /// Set the join ordering.
    pub fn set_join_ordering(&mut self, join_ordering: JoinOrderingKind) {
        self.join_ordering = join_ordering;
    }

    /// Enable or disable timing.
    pub fn set_timing(&mut self, timing: bool) {
        self.timing = timing;
    }
}
