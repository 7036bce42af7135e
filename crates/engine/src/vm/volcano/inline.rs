// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

use opaldb_core::{ColumnHeaders, Columns};
use tracing::instrument;

use crate::vm::volcano::query::{QueryContext, QueryNode};

/// Serves a fixed list of batches, one per pull.
pub struct InlineDataNode {
	batches: Vec<Columns>,
	cursor: usize,
	initialized: Option<()>,
}

impl InlineDataNode {
	pub fn new(batches: Vec<Columns>) -> Self {
		Self {
			batches,
			cursor: 0,
			initialized: None,
		}
	}
}

impl QueryNode for InlineDataNode {
	#[instrument(level = "trace", skip_all, name = "volcano::inline::initialize")]
	fn initialize(&mut self, _ctx: &QueryContext) -> crate::Result<()> {
		self.cursor = 0;
		self.initialized = Some(());
		Ok(())
	}

	#[instrument(level = "trace", skip_all, name = "volcano::inline::next")]
	fn next(&mut self, _ctx: &mut QueryContext) -> crate::Result<Option<Columns>> {
		debug_assert!(self.initialized.is_some(), "InlineDataNode::next() called before initialize()");

		let Some(batch) = self.batches.get(self.cursor) else {
			return Ok(None);
		};
		self.cursor += 1;
		Ok(Some(batch.clone()))
	}

	fn headers(&self) -> Option<ColumnHeaders> {
		self.batches.first().map(|batch| batch.headers())
	}
}
