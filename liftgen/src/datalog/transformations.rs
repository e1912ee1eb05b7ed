//! This module collects the transformations applied to Datalog rules before evaluation.

pub mod greedy_join;
pub mod rule_splitting;
