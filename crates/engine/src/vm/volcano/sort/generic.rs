// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

use std::cmp::Ordering::{self, Equal};

use opaldb_core::{
	Columns,
	SortDirection::{Asc, Desc},
	SortKey,
};
use opaldb_type::Value;

use crate::vm::volcano::sort::RowLocator;

/// One sort-buffer entry: a row locator plus the extracted key sub-row.
/// Only the key columns are copied here; full rows stay in the retained
/// input batches until output.
struct SortBufferEntry {
	locator: RowLocator,
	key_row: Vec<Value>,
}

/// Order every input row with the lexicographic multi-key comparator and
/// return the locators in sorted order.
pub(crate) fn sort(batches: &[Columns], by: &[SortKey]) -> Vec<RowLocator> {
	let count: usize = batches.iter().map(|b| b.row_count()).sum();
	let mut entries = Vec::with_capacity(count);

	for (batch_id, batch) in batches.iter().enumerate() {
		for offset in 0..batch.row_count() {
			let key_row = by.iter().map(|key| batch[key.column].data().get_value(offset)).collect();
			entries.push(SortBufferEntry {
				locator: RowLocator {
					batch: batch_id as u32,
					offset: offset as u32,
				},
				key_row,
			});
		}
	}

	entries.sort_unstable_by(|l, r| compare(l, r, by));
	entries.into_iter().map(|entry| entry.locator).collect()
}

/// Less-than over key rows, not equality: rows whose keys all compare
/// equal keep an unspecified relative order.
fn compare(l: &SortBufferEntry, r: &SortBufferEntry, by: &[SortKey]) -> Ordering {
	for (index, key) in by.iter().enumerate() {
		let ord = l.key_row[index].partial_cmp(&r.key_row[index]).unwrap_or(Equal);
		let ord = match key.direction {
			Asc => ord,
			Desc => ord.reverse(),
		};
		if ord != Equal {
			return ord;
		}
	}
	Equal
}

#[cfg(test)]
mod tests {
	use opaldb_core::{Column, ColumnData};

	use super::*;

	fn batch(keys: Vec<i32>, tags: Vec<&str>) -> Columns {
		Columns::new(vec![
			Column::new("key", ColumnData::int4(keys)),
			Column::new("tag", ColumnData::utf8(tags)),
		])
	}

	fn keys_in_order(batches: &[Columns], locators: &[RowLocator], column: usize) -> Vec<Value> {
		locators.iter()
			.map(|loc| batches[loc.batch as usize][column].data().get_value(loc.offset as usize))
			.collect()
	}

	#[test]
	fn test_single_key_ascending() {
		let batches = vec![batch(vec![3, 1, 4], vec!["a", "b", "c"]), batch(vec![1, 5], vec!["d", "e"])];
		let by = vec![SortKey {
			column: 0,
			direction: Asc,
		}];

		let locators = sort(&batches, &by);
		let keys = keys_in_order(&batches, &locators, 0);
		assert_eq!(
			keys,
			vec![Value::Int4(1), Value::Int4(1), Value::Int4(3), Value::Int4(4), Value::Int4(5)]
		);
	}

	#[test]
	fn test_single_key_descending() {
		let batches = vec![batch(vec![2, 9, 4], vec!["a", "b", "c"])];
		let by = vec![SortKey {
			column: 0,
			direction: Desc,
		}];

		let locators = sort(&batches, &by);
		let keys = keys_in_order(&batches, &locators, 0);
		assert_eq!(keys, vec![Value::Int4(9), Value::Int4(4), Value::Int4(2)]);
	}

	#[test]
	fn test_second_key_breaks_ties() {
		let batches = vec![batch(vec![1, 1, 0], vec!["x", "y", "z"])];
		let by = vec![
			SortKey {
				column: 0,
				direction: Asc,
			},
			SortKey {
				column: 1,
				direction: Desc,
			},
		];

		let locators = sort(&batches, &by);
		let tags = keys_in_order(&batches, &locators, 1);
		assert_eq!(tags, vec![Value::utf8("z"), Value::utf8("y"), Value::utf8("x")]);
	}

	#[test]
	fn test_undefined_keys_sort_first_ascending() {
		let mut data = ColumnData::int4([7]);
		data.push_undefined();
		data.push_value(Value::Int4(2)).unwrap();
		let batches = vec![Columns::new(vec![Column::new("key", data)])];
		let by = vec![SortKey {
			column: 0,
			direction: Asc,
		}];

		let locators = sort(&batches, &by);
		let keys = keys_in_order(&batches, &locators, 0);
		assert_eq!(keys, vec![Value::Undefined, Value::Int4(2), Value::Int4(7)]);
	}
}
