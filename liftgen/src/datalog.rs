//! This module contains the Datalog view of a planning task:
//! rules, their transformation into primitive rules and the facts they are evaluated on.

pub mod annotation;
pub mod facts;
pub mod program;
pub mod rules;
pub mod transformations;
