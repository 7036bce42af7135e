// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

use std::ops::{Deref, Index};

use crate::value::column::{
	Column,
	headers::{ColumnHeader, ColumnHeaders},
};

/// A bounded batch of rows held column-wise. All columns carry the same
/// number of rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Columns {
	pub columns: Vec<Column>,
}

impl Deref for Columns {
	type Target = [Column];

	fn deref(&self) -> &Self::Target {
		self.columns.deref()
	}
}

impl Index<usize> for Columns {
	type Output = Column;

	fn index(&self, index: usize) -> &Self::Output {
		self.columns.index(index)
	}
}

impl Columns {
	pub fn new(columns: Vec<Column>) -> Self {
		let n = columns.first().map_or(0, |c| c.data().len());
		assert!(columns.iter().all(|c| c.data().len() == n));

		Self {
			columns,
		}
	}

	pub fn row_count(&self) -> usize {
		self.columns.first().map_or(0, |c| c.data().len())
	}

	pub fn shape(&self) -> (usize, usize) {
		(self.row_count(), self.columns.len())
	}

	/// The physical schema of this batch: column names and types in
	/// column order.
	pub fn headers(&self) -> ColumnHeaders {
		ColumnHeaders {
			columns: self
				.columns
				.iter()
				.map(|c| ColumnHeader {
					name: c.name().to_string(),
					ty: c.data().ty(),
				})
				.collect(),
		}
	}

	pub fn into_iter(self) -> impl Iterator<Item = Column> {
		self.columns.into_iter()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::value::column::data::ColumnData;

	#[test]
	fn test_row_count() {
		let columns = Columns::new(vec![
			Column::new("id", ColumnData::int4([1, 2, 3])),
			Column::new("name", ColumnData::utf8(["a", "b", "c"])),
		]);
		assert_eq!(columns.row_count(), 3);
		assert_eq!(columns.shape(), (3, 2));
	}

	#[test]
	#[should_panic]
	fn test_ragged_columns_rejected() {
		Columns::new(vec![
			Column::new("id", ColumnData::int4([1, 2, 3])),
			Column::new("name", ColumnData::utf8(["a"])),
		]);
	}
}
