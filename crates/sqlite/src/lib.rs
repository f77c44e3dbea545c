// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQLite backend for rowbind, built on rusqlite.
//!
//! [`Sqlite`] and [`SqliteTransaction`] both implement
//! [`rowbind_core::Executor`], so records bind the same way through either.

#![cfg_attr(not(debug_assertions), deny(warnings))]

mod config;
mod connection;
mod error;
mod executor;

pub use config::{DbPath, JournalMode, OpenFlags, SqliteConfig, SynchronousMode, TempStore};
pub use connection::{DEFAULT_FILE_NAME, connect, convert_flags, resolve_db_path};
pub use error::{Result, SqliteError};
pub use executor::{Sqlite, SqliteTransaction};
pub use rusqlite;
