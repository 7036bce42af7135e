// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use opaldb_type::{Error, Result};

mod util;
mod vm;

pub use vm::volcano::{
	inline::InlineDataNode,
	query::{DEFAULT_BATCH_SIZE, QueryContext, QueryNode, QueryOperator},
	sort::{RowLocator, SortNode},
};
