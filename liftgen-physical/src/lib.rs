//! This crate defines low-level data structures and operations, i.e.,
//! it corresponds to the physical layer of the grounding core.
//! Tables only know about column markers and storage values;
//! the logical meaning of both is assigned by the `liftgen` crate.

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
    variant_size_differences,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

pub mod error;
pub mod meta;
pub mod tabular;
