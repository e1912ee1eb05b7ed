//! This module defines operations over tables

pub mod filter;
pub mod join;
pub mod product;
pub mod project;

pub use filter::{ColumnSelection, TupleFilter};
pub use join::join;
pub use product::cartesian_product;
pub use project::project;
