// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

use opaldb_type::{Error, Result, Type, Value};

use crate::value::container::{BoolContainer, NumberContainer, UndefinedContainer, Utf8Container};

/// The values of one column, stored in a container per physical type.
#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
	Bool(BoolContainer),
	Float8(NumberContainer<f64>),
	Int4(NumberContainer<i32>),
	Int8(NumberContainer<i64>),
	Utf8(Utf8Container),
	Undefined(UndefinedContainer),
}

impl ColumnData {
	pub fn bool(values: impl IntoIterator<Item = bool>) -> Self {
		ColumnData::Bool(BoolContainer::new(values.into_iter().collect()))
	}

	pub fn float8(values: impl IntoIterator<Item = f64>) -> Self {
		ColumnData::Float8(NumberContainer::new(values.into_iter().collect()))
	}

	pub fn int4(values: impl IntoIterator<Item = i32>) -> Self {
		ColumnData::Int4(NumberContainer::new(values.into_iter().collect()))
	}

	pub fn int8(values: impl IntoIterator<Item = i64>) -> Self {
		ColumnData::Int8(NumberContainer::new(values.into_iter().collect()))
	}

	pub fn utf8<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
		ColumnData::Utf8(Utf8Container::new(values.into_iter().map(Into::into).collect()))
	}

	pub fn undefined(len: usize) -> Self {
		ColumnData::Undefined(UndefinedContainer::new(len))
	}

	/// An empty container for `ty` with room for `capacity` rows.
	pub fn with_capacity(ty: Type, capacity: usize) -> Self {
		match ty {
			Type::Boolean => ColumnData::Bool(BoolContainer::with_capacity(capacity)),
			Type::Float8 => ColumnData::Float8(NumberContainer::with_capacity(capacity)),
			Type::Int4 => ColumnData::Int4(NumberContainer::with_capacity(capacity)),
			Type::Int8 => ColumnData::Int8(NumberContainer::with_capacity(capacity)),
			Type::Utf8 => ColumnData::Utf8(Utf8Container::with_capacity(capacity)),
			Type::Undefined => ColumnData::Undefined(UndefinedContainer::new(0)),
		}
	}

	pub fn ty(&self) -> Type {
		match self {
			ColumnData::Bool(_) => Type::Boolean,
			ColumnData::Float8(_) => Type::Float8,
			ColumnData::Int4(_) => Type::Int4,
			ColumnData::Int8(_) => Type::Int8,
			ColumnData::Utf8(_) => Type::Utf8,
			ColumnData::Undefined(_) => Type::Undefined,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			ColumnData::Bool(container) => container.len(),
			ColumnData::Float8(container) => container.len(),
			ColumnData::Int4(container) => container.len(),
			ColumnData::Int8(container) => container.len(),
			ColumnData::Utf8(container) => container.len(),
			ColumnData::Undefined(container) => container.len(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get_value(&self, index: usize) -> Value {
		match self {
			ColumnData::Bool(container) => {
				container.get(index).map_or(Value::Undefined, Value::Boolean)
			}
			ColumnData::Float8(container) => {
				container.get(index).map_or(Value::Undefined, |v| Value::float8(v))
			}
			ColumnData::Int4(container) => {
				container.get(index).map_or(Value::Undefined, Value::Int4)
			}
			ColumnData::Int8(container) => {
				container.get(index).map_or(Value::Undefined, Value::Int8)
			}
			ColumnData::Utf8(container) => {
				container.get(index).map_or(Value::Undefined, Value::utf8)
			}
			ColumnData::Undefined(_) => Value::Undefined,
		}
	}

	/// Append `value`, promoting an undefined container to the value's
	/// type on first defined push. A value of a conflicting type is a
	/// schema mismatch.
	pub fn push_value(&mut self, value: Value) -> Result<()> {
		let value = match value {
			Value::Undefined => {
				self.push_undefined();
				return Ok(());
			}
			value => value,
		};

		if let ColumnData::Undefined(container) = &*self {
			let undefined = container.len();
			let mut promoted = ColumnData::with_capacity(value.ty(), undefined + 1);
			for _ in 0..undefined {
				promoted.push_undefined();
			}
			*self = promoted;
		}

		match (&mut *self, value) {
			(ColumnData::Bool(container), Value::Boolean(v)) => container.push(v),
			(ColumnData::Float8(container), Value::Float8(v)) => container.push(v.value()),
			(ColumnData::Int4(container), Value::Int4(v)) => container.push(v),
			(ColumnData::Int8(container), Value::Int8(v)) => container.push(v),
			(ColumnData::Utf8(container), Value::Utf8(v)) => container.push(v),
			(data, value) => {
				return Err(Error::SchemaMismatch {
					expected: data.ty().to_string(),
					found: value.ty().to_string(),
				});
			}
		}
		Ok(())
	}

	pub fn push_undefined(&mut self) {
		match self {
			ColumnData::Bool(container) => container.push_undefined(),
			ColumnData::Float8(container) => container.push_undefined(),
			ColumnData::Int4(container) => container.push_undefined(),
			ColumnData::Int8(container) => container.push_undefined(),
			ColumnData::Utf8(container) => container.push_undefined(),
			ColumnData::Undefined(container) => container.push_undefined(),
		}
	}

	/// Whether no row of this column is undefined.
	pub fn is_fully_defined(&self) -> bool {
		match self {
			ColumnData::Bool(container) => container.is_fully_defined(),
			ColumnData::Float8(container) => container.is_fully_defined(),
			ColumnData::Int4(container) => container.is_fully_defined(),
			ColumnData::Int8(container) => container.is_fully_defined(),
			ColumnData::Utf8(container) => container.is_fully_defined(),
			ColumnData::Undefined(container) => container.is_empty(),
		}
	}
}
