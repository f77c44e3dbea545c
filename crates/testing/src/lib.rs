// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Test support shared by the rowbind crates.

pub mod executor;
pub mod tempdir;
pub mod util;

pub use executor::{Recorded, ScriptError, ScriptedExecutor, ScriptedResult};
pub use tempdir::temp_dir;

/// Installs a fmt subscriber honouring `RUST_LOG`, once per process.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}
