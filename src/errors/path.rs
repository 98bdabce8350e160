// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for converting dynamically typed values into event paths.

use thiserror::Error;

/// A dynamically typed path could not be converted into a [`Path`](crate::event::Path).
///
/// Typed paths built from `&str`, `String` or nested vectors are total and never
/// produce this error; it only surfaces when a path arrives as a
/// `serde_json::Value` from an outer layer.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    /// A path leaf was neither a string nor an array of paths
    #[error("Invalid path segment: expected a string or an array, found {found}")]
    InvalidSegment { found: String },
}
