// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

pub mod sort;
pub mod util;
pub mod value;

pub use sort::{SortDirection, SortKey};
pub use value::column::{
	Column, Columns,
	data::ColumnData,
	headers::{ColumnHeader, ColumnHeaders},
};
