//! This module collects functionality that is not part of the actual computation.

pub mod timing;
