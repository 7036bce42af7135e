// SPDX-License-Identifier: MIT
// Copyright (c) 2025 OpalDB

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

mod ordered_f64;
mod r#type;

pub use ordered_f64::OrderedF64;
pub use r#type::Type;

/// A single column value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
	/// Value is not defined (think null in common programming languages)
	Undefined,
	/// A boolean: true or false.
	Boolean(bool),
	/// An 8-byte floating point
	Float8(OrderedF64),
	/// A 4-byte signed integer
	Int4(i32),
	/// An 8-byte signed integer
	Int8(i64),
	/// A UTF-8 encoded text
	Utf8(String),
}

impl Value {
	pub fn float8(v: impl Into<OrderedF64>) -> Self {
		Value::Float8(v.into())
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::Utf8(v.into())
	}

	pub fn ty(&self) -> Type {
		match self {
			Value::Undefined => Type::Undefined,
			Value::Boolean(_) => Type::Boolean,
			Value::Float8(_) => Type::Float8,
			Value::Int4(_) => Type::Int4,
			Value::Int8(_) => Type::Int8,
			Value::Utf8(_) => Type::Utf8,
		}
	}
}

impl PartialOrd for Value {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		match (self, other) {
			// Undefined orders below every defined value.
			(Value::Undefined, Value::Undefined) => Some(Ordering::Equal),
			(Value::Undefined, _) => Some(Ordering::Less),
			(_, Value::Undefined) => Some(Ordering::Greater),
			(Value::Boolean(l), Value::Boolean(r)) => l.partial_cmp(r),
			(Value::Float8(l), Value::Float8(r)) => l.partial_cmp(r),
			(Value::Int4(l), Value::Int4(r)) => l.partial_cmp(r),
			(Value::Int8(l), Value::Int8(r)) => l.partial_cmp(r),
			(Value::Utf8(l), Value::Utf8(r)) => l.partial_cmp(r),
			(_, _) => None,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Undefined => f.write_str("undefined"),
			Value::Boolean(true) => f.write_str("true"),
			Value::Boolean(false) => f.write_str("false"),
			Value::Float8(value) => Display::fmt(value, f),
			Value::Int4(value) => Display::fmt(value, f),
			Value::Int8(value) => Display::fmt(value, f),
			Value::Utf8(value) => Display::fmt(value, f),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_undefined_orders_first() {
		assert_eq!(Value::Undefined.partial_cmp(&Value::Int4(i32::MIN)), Some(Ordering::Less));
		assert_eq!(Value::Int4(0).partial_cmp(&Value::Undefined), Some(Ordering::Greater));
		assert_eq!(Value::Undefined.partial_cmp(&Value::Undefined), Some(Ordering::Equal));
	}

	#[test]
	fn test_same_type_ordering() {
		assert_eq!(Value::Int4(1).partial_cmp(&Value::Int4(2)), Some(Ordering::Less));
		assert_eq!(Value::utf8("b").partial_cmp(&Value::utf8("a")), Some(Ordering::Greater));
		assert_eq!(Value::float8(1.5).partial_cmp(&Value::float8(1.5)), Some(Ordering::Equal));
	}

	#[test]
	fn test_mismatched_types_do_not_order() {
		assert_eq!(Value::Int4(1).partial_cmp(&Value::utf8("1")), None);
	}
}
