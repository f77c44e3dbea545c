// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Process-wide cache of validated record shapes.
//!
//! Each record type owns one slot holding a publish-once outcome. The first
//! caller for a type validates its descriptor inside the slot's initializer;
//! concurrent callers for the same type block on that slot and observe the
//! same outcome. A failed outcome is published before the slot is evicted,
//! so callers already waiting on it see the failure while later callers
//! start over with a fresh slot.

use std::{
	any::{TypeId, type_name},
	sync::{Arc, OnceLock},
};

use dashmap::DashMap;
use tracing::{debug, instrument};

use super::ShapeMapping;
use crate::{Record, ShapeError};

type Outcome = Result<Arc<ShapeMapping>, ShapeError>;

struct ShapeSlot {
	outcome: OnceLock<Outcome>,
}

impl ShapeSlot {
	fn new() -> Self {
		Self {
			outcome: OnceLock::new(),
		}
	}
}

pub struct ShapeRegistry {
	/// record type → slot of its validated mapping
	shapes: DashMap<TypeId, Arc<ShapeSlot>>,
}

impl ShapeRegistry {
	pub fn new() -> Self {
		Self {
			shapes: DashMap::new(),
		}
	}

	/// The registry shared by the whole process.
	pub fn global() -> &'static ShapeRegistry {
		static INSTANCE: OnceLock<ShapeRegistry> = OnceLock::new();
		INSTANCE.get_or_init(ShapeRegistry::new)
	}

	/// Returns the validated mapping of `T`, validating it on first use.
	#[instrument(name = "shape::resolve", level = "trace", skip(self), fields(record = type_name::<T>()))]
	pub fn resolve<T: Record>(&self) -> Result<Arc<ShapeMapping>, ShapeError> {
		let key = TypeId::of::<T>();

		// The shard lock is released at the end of this statement, before
		// validation starts.
		let slot = self.shapes.entry(key).or_insert_with(|| Arc::new(ShapeSlot::new())).clone();

		let outcome = slot
			.outcome
			.get_or_init(|| {
				let descriptor = T::descriptor();
				let outcome = ShapeMapping::build(&descriptor).map(Arc::new);
				if let Ok(mapping) = &outcome {
					debug!(record = descriptor.name, columns = mapping.len(), "shape published");
				}
				outcome
			})
			.clone();

		if let Err(err) = &outcome {
			if self.shapes.remove_if(&key, |_, current| Arc::ptr_eq(current, &slot)).is_some() {
				debug!(record = type_name::<T>(), error = %err, "shape rejected, slot evicted");
			}
		}

		outcome
	}

	/// Whether a valid mapping of `T` has been published.
	pub fn contains<T: Record>(&self) -> bool {
		self.shapes
			.get(&TypeId::of::<T>())
			.is_some_and(|slot| matches!(slot.outcome.get(), Some(Ok(_))))
	}

	/// Number of record types with a slot, including ones still validating.
	pub fn len(&self) -> usize {
		self.shapes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.shapes.is_empty()
	}

	#[cfg(test)]
	fn slot_refs<T: Record>(&self) -> Option<usize> {
		self.shapes.get(&TypeId::of::<T>()).map(|slot| Arc::strong_count(slot.value()))
	}
}

impl Default for ShapeRegistry {
	fn default() -> Self {
		Self::new()
	}
}
