// SPDX-License-Identifier: MIT
// Copyright (c) 2025 OpalDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// The physical type of a column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	Undefined,
	Boolean,
	Float8,
	Int4,
	Int8,
	Utf8,
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Undefined => f.write_str("UNDEFINED"),
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Int4 => f.write_str("INT4"),
			Type::Int8 => f.write_str("INT8"),
			Type::Utf8 => f.write_str("UTF8"),
		}
	}
}
