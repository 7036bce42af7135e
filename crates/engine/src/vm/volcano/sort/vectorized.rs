// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

use std::fmt::{self, Display, Formatter};

use opaldb_core::{ColumnData, Columns, SortDirection, SortKey};
use tracing::debug;

use crate::{
	util::bitonic::{self, EntryBuf, PAD_WIDTH},
	vm::volcano::sort::RowLocator,
};

/// Per-batch row capacity of the packed locator encoding.
pub(crate) const ROWS_PER_BATCH: u32 = 4096;

const KEY_SIGN_BIT: u32 = 1 << 31;

/// Why a sort cannot take the vectorized path. Recovered by running the
/// generic path instead, never surfaced to the caller.
enum Ineligible {
	KeyCount,
	Descending,
	KeyType,
	UndefinedKeys,
	LocatorRange,
}

impl Display for Ineligible {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			Ineligible::KeyCount => f.write_str("key specification is not a single key"),
			Ineligible::Descending => f.write_str("descending sort key"),
			Ineligible::KeyType => f.write_str("sort key is not a 32-bit integer column"),
			Ineligible::UndefinedKeys => f.write_str("sort key column has undefined values"),
			Ineligible::LocatorRange => f.write_str("row locators exceed the packed encoding"),
		}
	}
}

/// Sort with the packed bitonic kernel when the key specification and the
/// input shape allow it. Returns `None` (after logging the reason) when
/// the generic path must run instead. Nothing is packed before the input
/// passes the eligibility check, so fallback leaves no partial state.
pub(crate) fn try_sort(batches: &[Columns], by: &[SortKey]) -> crate::Result<Option<(EntryBuf, usize)>> {
	if let Err(reason) = eligible(batches, by) {
		debug!(%reason, "vectorized sort not applicable, falling back to generic path");
		return Ok(None);
	}

	let key = by[0].column;
	let count: usize = batches.iter().map(|b| b.row_count()).sum();
	let padded = count.next_multiple_of(PAD_WIDTH);

	let mut primary = EntryBuf::filled(padded)?;
	let scratch = EntryBuf::filled(padded)?;

	let mut index = 0;
	for (batch_id, batch) in batches.iter().enumerate() {
		if let ColumnData::Int4(container) = batch[key].data() {
			for (offset, &value) in container.iter().enumerate() {
				primary.set_entry(index, pack(value, batch_id as u32, offset as u32));
				index += 1;
			}
		}
	}
	debug_assert_eq!(index, count);

	Ok(Some((bitonic::merge_sort(primary, scratch), count)))
}

fn eligible(batches: &[Columns], by: &[SortKey]) -> Result<(), Ineligible> {
	let [key] = by else {
		return Err(Ineligible::KeyCount);
	};
	if key.direction != SortDirection::Asc {
		return Err(Ineligible::Descending);
	}

	let mut code_space = 0u64;
	for batch in batches {
		let ColumnData::Int4(container) = batch[key.column].data() else {
			return Err(Ineligible::KeyType);
		};
		if !container.is_fully_defined() {
			return Err(Ineligible::UndefinedKeys);
		}
		if batch.row_count() > ROWS_PER_BATCH as usize {
			return Err(Ineligible::LocatorRange);
		}
		code_space += u64::from(ROWS_PER_BATCH);
	}
	// The all-ones locator code is reserved: together with an `i32::MAX`
	// key it would pack to the sentinel itself.
	if code_space > u64::from(u32::MAX) {
		return Err(Ineligible::LocatorRange);
	}
	Ok(())
}

/// Pack a key and its row locator into one 64-bit entry. The key sits in
/// the high 32 bits with its sign bit flipped, so unsigned comparison of
/// whole entries orders by (key, locator) and the all-ones sentinel never
/// sorts before a valid entry.
fn pack(key: i32, batch: u32, offset: u32) -> u64 {
	debug_assert!(offset < ROWS_PER_BATCH);
	let code = u64::from(batch) * u64::from(ROWS_PER_BATCH) + u64::from(offset);
	debug_assert!(code < u64::from(u32::MAX));
	(u64::from(key as u32 ^ KEY_SIGN_BIT) << 32) | code
}

/// Inverse of the locator half of `pack`.
pub(crate) fn decode_locator(entry: u64) -> RowLocator {
	let code = entry as u32;
	RowLocator {
		batch: code / ROWS_PER_BATCH,
		offset: code % ROWS_PER_BATCH,
	}
}
