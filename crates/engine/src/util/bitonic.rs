// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 OpalDB

//! Bitonic merge sort over packed 64-bit sort entries.
//!
//! The kernel is written against a small set of fixed-width register
//! primitives (`Reg`): lane reverse, half and pair swaps, lane-wise
//! min/max, and a 4x4 transpose. Every compare-and-swap sequence is data
//! independent, so the same instruction stream runs regardless of input
//! and duplicate entries are handled like any others. Entries compare as
//! plain unsigned 64-bit values; the packing layer guarantees that this
//! equals comparison on the embedded key.

use std::mem;

use opaldb_type::{Error, Result};

/// Entries per register.
pub(crate) const LANES: usize = 4;
/// Entries per block sorted by the intra-block network.
pub(crate) const SORT_WIDTH: usize = 16;
/// Buffer lengths are padded to a multiple of this many entries.
pub(crate) const PAD_WIDTH: usize = 64;
/// Padding entry. Never smaller than a valid entry, so padding collects
/// at the tail of a sorted buffer.
pub(crate) const SENTINEL: u64 = u64::MAX;

/// A fixed-width vector register of four packed sort entries, aligned to
/// the register width.
#[repr(C, align(32))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Reg(pub(crate) [u64; LANES]);

impl Reg {
	fn splat(value: u64) -> Self {
		Reg([value; LANES])
	}

	/// Lanes in reverse order.
	fn reverse(self) -> Self {
		let [a, b, c, d] = self.0;
		Reg([d, c, b, a])
	}

	/// The two register halves swapped.
	fn swap_halves(self) -> Self {
		let [a, b, c, d] = self.0;
		Reg([c, d, a, b])
	}

	/// Adjacent lanes swapped within each half.
	fn swap_pairs(self) -> Self {
		let [a, b, c, d] = self.0;
		Reg([b, a, d, c])
	}

	/// Lane-wise minimum and maximum.
	fn minmax(a: Reg, b: Reg) -> (Reg, Reg) {
		let mut lo = a;
		let mut hi = b;
		for lane in 0..LANES {
			if a.0[lane] > b.0[lane] {
				lo.0[lane] = b.0[lane];
				hi.0[lane] = a.0[lane];
			}
		}
		(lo, hi)
	}
}

/// A register-aligned buffer of packed sort entries. Holds a whole number
/// of registers; the padding layer rounds valid entries up to `PAD_WIDTH`.
#[derive(Debug)]
pub(crate) struct EntryBuf {
	regs: Vec<Reg>,
}

impl EntryBuf {
	/// A buffer of `entries` sentinel entries.
	pub(crate) fn filled(entries: usize) -> Result<Self> {
		debug_assert_eq!(entries % SORT_WIDTH, 0);
		let regs = entries / LANES;
		let mut buf = Vec::new();
		buf.try_reserve_exact(regs).map_err(|_| Error::ResourceExhausted {
			entries,
		})?;
		buf.resize(regs, Reg::splat(SENTINEL));
		Ok(Self {
			regs: buf,
		})
	}

	pub(crate) fn len(&self) -> usize {
		self.regs.len() * LANES
	}

	pub(crate) fn entry(&self, index: usize) -> u64 {
		self.regs[index / LANES].0[index % LANES]
	}

	pub(crate) fn set_entry(&mut self, index: usize, entry: u64) {
		self.regs[index / LANES].0[index % LANES] = entry;
	}

	fn load(&self, index: usize) -> Reg {
		debug_assert_eq!(index % LANES, 0);
		self.regs[index / LANES]
	}

	fn store(&mut self, index: usize, reg: Reg) {
		debug_assert_eq!(index % LANES, 0);
		self.regs[index / LANES] = reg;
	}

	/// Copy the entries from `from` to the end over from `src`.
	fn copy_tail(&mut self, src: &EntryBuf, from: usize) {
		debug_assert_eq!(from % LANES, 0);
		let reg = from / LANES;
		self.regs[reg..].copy_from_slice(&src.regs[reg..]);
	}
}

/// The four-element sorting network applied lane-wise across four
/// registers: afterwards every lane is sorted across `r[0]..r[3]`.
fn sort_columns(r: &mut [Reg; 4]) {
	let (lo, hi) = Reg::minmax(r[0], r[1]);
	r[0] = lo;
	r[1] = hi;
	let (lo, hi) = Reg::minmax(r[2], r[3]);
	r[2] = lo;
	r[3] = hi;
	let (lo, hi) = Reg::minmax(r[0], r[2]);
	r[0] = lo;
	r[2] = hi;
	let (lo, hi) = Reg::minmax(r[1], r[3]);
	r[1] = lo;
	r[3] = hi;
	let (lo, hi) = Reg::minmax(r[1], r[2]);
	r[1] = lo;
	r[2] = hi;
}

/// Transpose a 4x4 tile so each register holds one ascending run.
fn transpose(r: &mut [Reg; 4]) {
	let t = *r;
	for lane in 0..LANES {
		r[lane] = Reg([t[0].0[lane], t[1].0[lane], t[2].0[lane], t[3].0[lane]]);
	}
}

/// Merge the bitonic sequence held by one register into ascending lane
/// order: a two-by-two merge across halves, then a one-by-one merge of
/// adjacent lanes.
fn intra_register_sort(a: &mut Reg) {
	let (lo, hi) = Reg::minmax(*a, a.swap_halves());
	*a = Reg([lo.0[0], lo.0[1], hi.0[2], hi.0[3]]);
	let (lo, hi) = Reg::minmax(*a, a.swap_pairs());
	*a = Reg([lo.0[0], hi.0[1], lo.0[2], hi.0[3]]);
}

/// Four-by-four merge of two sorted registers; afterwards `a` holds the
/// smaller half and `b` the larger half, both sorted.
fn bitonic_merge(a: &mut Reg, b: &mut Reg) {
	let (lo, hi) = Reg::minmax(*a, b.reverse());
	*a = lo;
	*b = hi;
	intra_register_sort(a);
	intra_register_sort(b);
}

/// Sort every `SORT_WIDTH` block in place, leaving ascending runs of
/// `LANES` entries in row-major order.
fn sort_blocks(buf: &mut EntryBuf) {
	let mut i = 0;
	while i < buf.len() {
		let mut rows = [
			buf.load(i),
			buf.load(i + LANES),
			buf.load(i + 2 * LANES),
			buf.load(i + 3 * LANES),
		];
		sort_columns(&mut rows);
		transpose(&mut rows);
		buf.store(i, rows[0]);
		buf.store(i + LANES, rows[1]);
		buf.store(i + 2 * LANES, rows[2]);
		buf.store(i + 3 * LANES, rows[3]);
		i += SORT_WIDTH;
	}
}

/// Merge the sorted runs `[start, mid)` and `[mid, end)` of `input` into
/// `out`, one register at a time, always refilling from the run whose
/// head entry is smaller.
fn merge_phase(input: &EntryBuf, out: &mut EntryBuf, start: usize, mid: usize, end: usize) {
	let mut i = start;
	let mut j = mid;
	let mut k = start;

	let mut ra = input.load(i);
	i += LANES;
	let mut rb = input.load(j);
	j += LANES;

	while i < mid && j < end {
		bitonic_merge(&mut ra, &mut rb);

		// save the smaller half
		out.store(k, ra);
		k += LANES;

		// keep the larger half for the next comparison
		ra = rb;

		// refill from the input with the smaller head entry
		if input.entry(i) < input.entry(j) {
			rb = input.load(i);
			i += LANES;
		} else {
			rb = input.load(j);
			j += LANES;
		}
	}

	// merge the final pair of registers from each run
	bitonic_merge(&mut ra, &mut rb);
	out.store(k, ra);
	k += LANES;
	ra = rb;

	// drain whichever run still has data
	while i < mid {
		rb = input.load(i);
		i += LANES;
		bitonic_merge(&mut ra, &mut rb);
		out.store(k, ra);
		k += LANES;
		ra = rb;
	}
	while j < end {
		rb = input.load(j);
		j += LANES;
		bitonic_merge(&mut ra, &mut rb);
		out.store(k, ra);
		k += LANES;
		ra = rb;
	}

	out.store(k, ra);
}

/// One pass merging adjacent runs of `size` entries into runs of twice
/// the size. A trailing run with no partner is copied through unchanged.
fn merge_pass(input: &EntryBuf, out: &mut EntryBuf, size: usize) {
	let n = input.len();
	let mut i = 0;
	while i < n {
		let mid = i + size;
		let end = (i + 2 * size).min(n);
		if mid < end {
			merge_phase(input, out, i, mid, end);
		} else {
			out.copy_tail(input, i);
			break;
		}
		i += 2 * size;
	}
}

/// Sort `current` ascending. `scratch` must have the same length. The two
/// buffers exchange roles after every merge pass; the buffer holding the
/// final pass's output is returned.
pub(crate) fn merge_sort(mut current: EntryBuf, mut scratch: EntryBuf) -> EntryBuf {
	debug_assert_eq!(current.len(), scratch.len());
	debug_assert_eq!(current.len() % SORT_WIDTH, 0);

	sort_blocks(&mut current);

	let mut size = LANES;
	while size < current.len() {
		merge_pass(&current, &mut scratch, size);
		mem::swap(&mut current, &mut scratch);
		size *= 2;
	}
	current
}
