// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

mod generic;
mod output;
mod vectorized;

use std::time::Instant;

use opaldb_core::{ColumnHeaders, Columns, SortKey};
use opaldb_type::Error;
use tracing::{debug, instrument};

use crate::{
	util::bitonic::EntryBuf,
	vm::volcano::query::{QueryContext, QueryNode, QueryOperator},
};

/// Identifies one row of one retained input batch without copying it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowLocator {
	pub batch: u32,
	pub offset: u32,
}

/// The totally ordered result of a finished sort.
enum SortedEntries {
	Empty,
	Generic(Vec<RowLocator>),
	Packed {
		buf: EntryBuf,
		valid: usize,
	},
}

impl SortedEntries {
	fn len(&self) -> usize {
		match self {
			SortedEntries::Empty => 0,
			SortedEntries::Generic(locators) => locators.len(),
			SortedEntries::Packed {
				valid,
				..
			} => *valid,
		}
	}

	fn locator(&self, index: usize) -> RowLocator {
		match self {
			SortedEntries::Empty => unreachable!("empty sort result holds no locators"),
			SortedEntries::Generic(locators) => locators[index],
			SortedEntries::Packed {
				buf,
				valid,
			} => {
				// Padding entries sit past `valid` and never reach here.
				debug_assert!(index < *valid);
				vectorized::decode_locator(buf.entry(index))
			}
		}
	}
}

/// Mutable cursor state of one in-flight sort operation.
struct SortState {
	done: bool,
	batches: Vec<Columns>,
	headers: Option<ColumnHeaders>,
	entries: SortedEntries,
	rows_emitted: usize,
}

/// A pipeline breaker and materialization point: drains its input on the
/// first pull, sorts, then re-emits bounded batches.
///
/// All retained input and sort buffers live until the node is dropped.
pub struct SortNode {
	input: Box<QueryOperator>,
	by: Vec<SortKey>,
	vectorized: bool,
	initialized: Option<()>,
	state: SortState,
}

impl SortNode {
	pub fn new(input: Box<QueryOperator>, by: Vec<SortKey>) -> Self {
		Self {
			input,
			by,
			vectorized: false,
			initialized: None,
			state: SortState {
				done: false,
				batches: Vec::new(),
				headers: None,
				entries: SortedEntries::Empty,
				rows_emitted: 0,
			},
		}
	}

	/// Request the vectorized sort path. Honored only when the key
	/// specification is a single ascending `Int4` key with no undefined
	/// values and every row fits the packed locator encoding; any other
	/// configuration runs the generic path.
	pub fn use_vectorized(&mut self) {
		self.vectorized = true;
	}

	fn do_sort(&mut self, ctx: &mut QueryContext) -> crate::Result<()> {
		let start = Instant::now();

		let mut batches = Vec::new();
		let mut count = 0usize;
		while let Some(columns) = self.input.next(ctx)? {
			count += columns.row_count();
			batches.push(columns);
		}

		let headers = self.input.headers().or_else(|| batches.first().map(|b| b.headers()));
		if count == 0 {
			self.state.headers = headers;
			self.state.done = true;
			return Ok(());
		}
		let Some(headers) = headers else {
			self.state.done = true;
			return Ok(());
		};

		for key in &self.by {
			if key.column >= headers.len() {
				return Err(Error::ColumnOutOfBounds {
					index: key.column,
					columns: headers.len(),
				});
			}
		}

		let entries = if self.vectorized {
			match vectorized::try_sort(&batches, &self.by)? {
				Some((buf, valid)) => SortedEntries::Packed {
					buf,
					valid,
				},
				None => SortedEntries::Generic(generic::sort(&batches, &self.by)),
			}
		} else {
			SortedEntries::Generic(generic::sort(&batches, &self.by))
		};

		debug_assert_eq!(entries.len(), count);

		self.state.batches = batches;
		self.state.headers = Some(headers);
		self.state.entries = entries;
		self.state.done = true;

		debug!(rows = count, elapsed = ?start.elapsed(), "sort complete");
		Ok(())
	}
}

impl QueryNode for SortNode {
	#[instrument(level = "trace", skip_all, name = "volcano::sort::initialize")]
	fn initialize(&mut self, ctx: &QueryContext) -> crate::Result<()> {
		self.input.initialize(ctx)?;
		self.initialized = Some(());
		Ok(())
	}

	#[instrument(level = "trace", skip_all, name = "volcano::sort::next")]
	fn next(&mut self, ctx: &mut QueryContext) -> crate::Result<Option<Columns>> {
		debug_assert!(self.initialized.is_some(), "SortNode::next() called before initialize()");

		if !self.state.done {
			self.do_sort(ctx)?;
		}

		let total = self.state.entries.len();
		if self.state.rows_emitted >= total {
			return Ok(None);
		}
		let Some(headers) = &self.state.headers else {
			return Ok(None);
		};

		let take = (ctx.batch_size as usize).min(total - self.state.rows_emitted);
		let batch = output::materialize(
			&self.state.batches,
			headers,
			&self.state.entries,
			self.state.rows_emitted,
			take,
		)?;
		self.state.rows_emitted += take;
		Ok(Some(batch))
	}

	fn headers(&self) -> Option<ColumnHeaders> {
		self.input.headers()
	}
}
