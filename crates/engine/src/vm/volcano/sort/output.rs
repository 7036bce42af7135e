// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

use opaldb_core::{Column, ColumnData, ColumnHeaders, Columns};
use opaldb_type::Error;

use crate::vm::volcano::sort::SortedEntries;

/// Materialize rows `[start, start + take)` of the sorted sequence into a
/// fresh batch laid out per the recorded input schema. Every column value
/// of every row is copied out of its source batch; the sorted entries
/// themselves are not consumed.
pub(crate) fn materialize(
	batches: &[Columns],
	headers: &ColumnHeaders,
	entries: &SortedEntries,
	start: usize,
	take: usize,
) -> crate::Result<Columns> {
	let mut columns: Vec<Column> = headers
		.columns
		.iter()
		.map(|header| Column::new(header.name.clone(), ColumnData::with_capacity(header.ty, take)))
		.collect();

	for row in 0..take {
		let locator = entries.locator(start + row);
		let source = &batches[locator.batch as usize];
		if source.len() != columns.len() {
			return Err(Error::SchemaMismatch {
				expected: format!("{} columns", columns.len()),
				found: format!("{} columns", source.len()),
			});
		}
		for (index, column) in columns.iter_mut().enumerate() {
			let value = source[index].data().get_value(locator.offset as usize);
			column.data_mut().push_value(value)?;
		}
	}

	Ok(Columns::new(columns))
}

#[cfg(test)]
mod tests {
	use opaldb_core::{ColumnHeader, SortDirection, SortKey};
	use opaldb_type::{Type, Value};

	use super::*;
	use crate::vm::volcano::sort::generic;

	fn batch(keys: Vec<i32>, tags: Vec<&str>) -> Columns {
		Columns::new(vec![
			Column::new("key", ColumnData::int4(keys)),
			Column::new("tag", ColumnData::utf8(tags)),
		])
	}

	#[test]
	fn test_materializes_full_rows_in_sorted_order() {
		let batches = vec![batch(vec![2, 1], vec!["b", "a"]), batch(vec![3], vec!["c"])];
		let by = vec![SortKey {
			column: 0,
			direction: SortDirection::Asc,
		}];
		let entries = SortedEntries::Generic(generic::sort(&batches, &by));
		let headers = batches[0].headers();

		let out = materialize(&batches, &headers, &entries, 0, 3).unwrap();
		assert_eq!(out.row_count(), 3);
		assert_eq!(out[0].data().get_value(0), Value::Int4(1));
		assert_eq!(out[1].data().get_value(0), Value::utf8("a"));
		assert_eq!(out[1].data().get_value(2), Value::utf8("c"));
	}

	#[test]
	fn test_column_count_mismatch_is_schema_mismatch() {
		let batches = vec![
			batch(vec![2], vec!["b"]),
			Columns::new(vec![Column::new("key", ColumnData::int4(vec![1]))]),
		];
		let by = vec![SortKey {
			column: 0,
			direction: SortDirection::Asc,
		}];
		let entries = SortedEntries::Generic(generic::sort(&batches, &by));
		let headers = batches[0].headers();

		let err = materialize(&batches, &headers, &entries, 0, 2).unwrap_err();
		assert!(matches!(err, Error::SchemaMismatch { .. }));
	}

	#[test]
	fn test_column_type_mismatch_is_schema_mismatch() {
		let batches = vec![batch(vec![1], vec!["a"])];
		let entries = SortedEntries::Generic(vec![super::super::RowLocator {
			batch: 0,
			offset: 0,
		}]);
		let headers = ColumnHeaders {
			columns: vec![
				ColumnHeader {
					name: "key".to_string(),
					ty: Type::Int8,
				},
				ColumnHeader {
					name: "tag".to_string(),
					ty: Type::Utf8,
				},
			],
		};

		let err = materialize(&batches, &headers, &entries, 0, 1).unwrap_err();
		assert!(matches!(err, Error::SchemaMismatch { .. }));
	}
}
