//! This module defines tables of variable bindings and the operations over them.

pub mod operations;
pub mod table;
