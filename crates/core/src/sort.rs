// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

use serde::{Deserialize, Serialize};

/// Direction of a single sort key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
	Asc,
	Desc,
}

/// One key of a sort specification: a column index into the input schema
/// and the direction to order it by. The first key is primary; later keys
/// break ties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
	pub column: usize,
	pub direction: SortDirection,
}
