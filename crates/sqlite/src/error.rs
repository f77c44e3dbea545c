// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Failures of connection and transaction management.
///
/// Query and statement failures are reported through
/// [`rowbind_core::Error`] instead.
#[derive(Debug, thiserror::Error)]
pub enum SqliteError {
	#[error("failed to connect to database at {path}: {source}")]
	Connect {
		path: String,
		#[source]
		source: rusqlite::Error,
	},

	#[error("failed to set pragma {pragma}: {source}")]
	Pragma {
		pragma: &'static str,
		#[source]
		source: rusqlite::Error,
	},

	#[error("transaction failed: {0}")]
	Transaction(#[source] rusqlite::Error),
}

pub type Result<T> = std::result::Result<T, SqliteError>;
