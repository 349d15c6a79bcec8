//! Error types and error handling for the front end.
//!
//! This module defines the diagnostics produced by every phase:
//!
//! - `Error`: a single diagnostic with its source line
//! - `ErrorImpl`: the specific scanning, parsing and type checking failures
//! - `ErrorTip`: optional suggestions shown alongside a diagnostic
//! - `Diagnostics`: the append-only collector threaded through the pipeline

pub mod diagnostics;
pub mod errors;
