//! Rule splitting and join-based successor generation for lifted classical planning
//!
//! A planning [task][task::Task] is turned into a Datalog [program][datalog::program::Program]
//! whose rules are split once into primitive project, product and join rules.
//! Ground actions are enumerated by evaluating join programs
//! over the relations of a [state][state::DBState].

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts
)]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_qualifications,
    unused_extern_crates,
    variant_size_differences
)]

#[cfg(test)]
extern crate self as liftgen;

/// The crate for underlying physical operations.
pub extern crate liftgen_physical;

pub mod components;
pub mod datalog;
pub mod error;
pub mod execution;
pub mod parameters;
pub mod state;
pub mod successor_generators;
pub mod task;

#[cfg(test)]
pub(crate) mod test_util;

pub use liftgen_physical::meta;
