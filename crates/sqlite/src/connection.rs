// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Opening connections from a [`SqliteConfig`].

use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tracing::{debug, instrument};

use crate::{DbPath, OpenFlags, SqliteConfig, SqliteError, error::Result};

/// File name used when the configured path is a directory.
pub const DEFAULT_FILE_NAME: &str = "rowbind.db";

/// Opens a connection and applies the configured pragmas.
#[instrument(name = "sqlite::connect", level = "debug", skip_all, fields(path = ?config.path))]
pub fn connect(config: &SqliteConfig) -> Result<Connection> {
	let flags = convert_flags(&config.flags);

	let conn = match &config.path {
		DbPath::Memory => Connection::open_in_memory_with_flags(flags).map_err(|source| SqliteError::Connect {
			path: ":memory:".to_string(),
			source,
		})?,
		DbPath::File(path) => {
			let path = resolve_db_path(path);
			Connection::open_with_flags(&path, flags).map_err(|source| SqliteError::Connect {
				path: path.display().to_string(),
				source,
			})?
		}
	};

	pragma(&conn, "journal_mode", config.journal_mode.as_str())?;
	pragma(&conn, "synchronous", config.synchronous_mode.as_str())?;
	pragma(&conn, "temp_store", config.temp_store.as_str())?;
	conn.busy_timeout(config.busy_timeout).map_err(|source| SqliteError::Pragma {
		pragma: "busy_timeout",
		source,
	})?;

	debug!(journal_mode = config.journal_mode.as_str(), "connected");
	Ok(conn)
}

fn pragma(conn: &Connection, name: &'static str, value: &str) -> Result<()> {
	conn.pragma_update(None, name, value).map_err(|source| SqliteError::Pragma {
		pragma: name,
		source,
	})
}

/// A path without extension is a directory that receives
/// [`DEFAULT_FILE_NAME`]. Missing parent directories are created.
pub fn resolve_db_path(config_path: &Path) -> PathBuf {
	if config_path.to_string_lossy().starts_with("file:") {
		config_path.to_path_buf()
	} else if config_path.extension().is_none() {
		std::fs::create_dir_all(config_path).ok();
		config_path.join(DEFAULT_FILE_NAME)
	} else {
		if let Some(parent) = config_path.parent() {
			std::fs::create_dir_all(parent).ok();
		}
		config_path.to_path_buf()
	}
}

pub fn convert_flags(flags: &OpenFlags) -> rusqlite::OpenFlags {
	let mut result = rusqlite::OpenFlags::empty();

	if flags.read_write {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE;
	} else {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_READ_ONLY;
	}
	if flags.create {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_CREATE;
	}
	if flags.full_mutex {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_FULL_MUTEX;
	}
	if flags.no_mutex {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX;
	}
	if flags.shared_cache {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_SHARED_CACHE;
	}
	if flags.private_cache {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_PRIVATE_CACHE;
	}
	if flags.uri {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
	}

	result
}
