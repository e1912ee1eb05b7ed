//! This module contains the evaluation of conditions and rules against relational data.

pub mod atom_table;
pub mod join_program;
pub mod rule_evaluation;

pub use join_program::JoinProgram;
pub use rule_evaluation::Derivation;
