// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Polling waits for tests that coordinate threads.

use std::{
	thread,
	time::{Duration, Instant},
};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Blocks until `condition` holds.
///
/// # Panics
/// Panics with `timeout_message` if the condition is still false after
/// `timeout`.
pub fn wait_for_condition<F>(condition: F, timeout: Duration, poll_interval: Duration, timeout_message: &str)
where
	F: Fn() -> bool,
{
	let start = Instant::now();
	while !condition() {
		if start.elapsed() > timeout {
			panic!("Timeout after {:?}: {}", timeout, timeout_message);
		}
		thread::sleep(poll_interval);
	}
}

/// [`wait_for_condition`] with the default timeout and poll interval.
pub fn wait_for(condition: impl Fn() -> bool, message: &str) {
	wait_for_condition(condition, DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL, message)
}

#[cfg(test)]
pub mod tests {
	use std::sync::{
		Arc,
		atomic::{AtomicBool, Ordering},
	};

	use super::*;

	#[test]
	fn test_immediate_condition() {
		wait_for(|| true, "Should not timeout");
	}

	#[test]
	fn test_condition_set_by_other_thread() {
		let flag = Arc::new(AtomicBool::new(false));
		let setter = flag.clone();

		let handle = thread::spawn(move || {
			thread::sleep(Duration::from_millis(10));
			setter.store(true, Ordering::SeqCst);
		});

		wait_for(|| flag.load(Ordering::SeqCst), "Flag should be set");
		handle.join().unwrap();
	}

	#[test]
	#[should_panic(expected = "Timeout after")]
	fn test_timeout() {
		wait_for_condition(|| false, Duration::from_millis(20), Duration::from_millis(1), "Expected timeout");
	}
}
