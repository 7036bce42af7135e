// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

use std::ops::Deref;

use crate::util::BitVec;

#[derive(Clone, Debug, PartialEq)]
pub struct BoolContainer {
	data: Vec<bool>,
	bitvec: BitVec,
}

impl BoolContainer {
	pub fn new(data: Vec<bool>) -> Self {
		let bitvec = BitVec::repeat(true, data.len());
		Self {
			data,
			bitvec,
		}
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			data: Vec::with_capacity(capacity),
			bitvec: BitVec::with_capacity(capacity),
		}
	}

	pub fn push(&mut self, value: bool) {
		self.data.push(value);
		self.bitvec.push(true);
	}

	pub fn push_undefined(&mut self) {
		self.data.push(false);
		self.bitvec.push(false);
	}

	pub fn get(&self, index: usize) -> Option<bool> {
		self.is_defined(index).then(|| self.data[index])
	}

	pub fn is_defined(&self, index: usize) -> bool {
		self.bitvec.get(index)
	}

	pub fn is_fully_defined(&self) -> bool {
		self.bitvec.all()
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}
}

impl Deref for BoolContainer {
	type Target = [bool];

	fn deref(&self) -> &Self::Target {
		self.data.as_slice()
	}
}
