// SPDX-License-Identifier: MIT
// Copyright (c) 2025 OpalDB

/// Errors surfaced by the engine to its caller.
///
/// Conditions the engine recovers from internally (for example a sort key
/// configuration the vectorized path cannot handle) never appear here.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	/// Reserving a sort buffer failed. The sort aborts and no partial
	/// results are returned.
	#[error("sort buffer reservation failed ({entries} entries)")]
	ResourceExhausted {
		entries: usize,
	},

	/// Output batch construction found a column count or type that does
	/// not match the recorded input schema.
	#[error("schema mismatch: expected {expected}, found {found}")]
	SchemaMismatch {
		expected: String,
		found: String,
	},

	/// A sort key refers to a column the input schema does not have.
	#[error("column index {index} out of bounds for {columns} columns")]
	ColumnOutOfBounds {
		index: usize,
		columns: usize,
	},
}

pub type Result<T> = std::result::Result<T, Error>;
