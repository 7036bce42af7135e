// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

use std::{fmt::Debug, ops::Deref};

use crate::util::BitVec;

/// Fixed-width values plus a definedness mask. Undefined slots hold the
/// type's default so the data vector stays index-aligned with the mask.
#[derive(Clone, Debug, PartialEq)]
pub struct NumberContainer<T> {
	data: Vec<T>,
	bitvec: BitVec,
}

impl<T> NumberContainer<T>
where
	T: Copy + Debug + Default,
{
	pub fn new(data: Vec<T>) -> Self {
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

	pub fn push(&mut self, value: T) {
		self.data.push(value);
		self.bitvec.push(true);
	}

	pub fn push_undefined(&mut self) {
		self.data.push(T::default());
		self.bitvec.push(false);
	}

	pub fn get(&self, index: usize) -> Option<T> {
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

impl<T> Deref for NumberContainer<T> {
	type Target = [T];

	fn deref(&self) -> &Self::Target {
		self.data.as_slice()
	}
}
