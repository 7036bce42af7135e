// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

use opaldb_core::{Column, ColumnData, Columns, SortDirection, SortKey};
use opaldb_engine::{InlineDataNode, QueryContext, QueryNode, QueryOperator, SortNode};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn batch(ids: Vec<i32>, names: Vec<&str>, scores: Vec<f64>) -> Columns {
	Columns::new(vec![
		Column::new("id", ColumnData::int4(ids)),
		Column::new("name", ColumnData::utf8(names)),
		Column::new("score", ColumnData::float8(scores)),
	])
}

fn demo_batches() -> Vec<Columns> {
	vec![
		batch(vec![42, 7, 19], vec!["vega", "altair", "deneb"], vec![3.5, 1.25, 9.0]),
		batch(vec![3, 56, 7], vec!["rigel", "mira", "spica"], vec![7.75, 2.0, 4.5]),
		batch(vec![28, 11], vec!["polaris", "antares"], vec![6.25, 8.5]),
	]
}

fn run(mut operator: QueryOperator, ctx: &mut QueryContext, label: &str) {
	operator.initialize(ctx).unwrap();
	let mut page = 0;
	while let Some(columns) = operator.next(ctx).unwrap() {
		for row in 0..columns.row_count() {
			info!(
				page,
				id = %columns[0].data().get_value(row),
				name = %columns[1].data().get_value(row),
				score = %columns[2].data().get_value(row),
				"{label}"
			);
		}
		page += 1;
	}
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
		.init();

	let mut ctx = QueryContext {
		batch_size: 3,
	};

	// Single ascending integer key, vectorized kernel opted in.
	let input = Box::new(QueryOperator::InlineData(InlineDataNode::new(demo_batches())));
	let mut sort = SortNode::new(input, vec![SortKey {
		column: 0,
		direction: SortDirection::Asc,
	}]);
	sort.use_vectorized();
	run(QueryOperator::Sort(sort), &mut ctx, "by id");

	// Two keys, descending primary: takes the generic comparator path.
	let input = Box::new(QueryOperator::InlineData(InlineDataNode::new(demo_batches())));
	let sort = SortNode::new(input, vec![
		SortKey {
			column: 2,
			direction: SortDirection::Desc,
		},
		SortKey {
			column: 1,
			direction: SortDirection::Asc,
		},
	]);
	run(QueryOperator::Sort(sort), &mut ctx, "by score desc, name");
}
