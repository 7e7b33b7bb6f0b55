// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Allocation counting
//!
//! Register [`CountingAllocator`] as the global allocator of a test binary to assert that a
//! piece of code frees everything it allocates:
//!
//! ```ignore
//! #[global_allocator]
//! static ALLOC: mpvbind_testing::alloc::CountingAllocator = mpvbind_testing::alloc::CountingAllocator;
//!
//! let ((), net) = mpvbind_testing::alloc::measure(|| drop(vec![1, 2, 3]));
//! assert_eq!(net, 0);
//! ```
//!
//! Counts are kept per thread, so tests running in parallel do not see each other.

use std::{
	alloc::{GlobalAlloc, Layout, System},
	cell::Cell,
};

thread_local! {
	static NET: Cell<isize> = const { Cell::new(0) };
	static TOTAL: Cell<usize> = const { Cell::new(0) };
}

/// System allocator that counts live allocations of the calling thread
pub struct CountingAllocator;

unsafe impl GlobalAlloc for CountingAllocator {
	unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
		let ptr = unsafe { System.alloc(layout) };
		if !ptr.is_null() {
			record(1);
		}
		ptr
	}

	unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
		let ptr = unsafe { System.alloc_zeroed(layout) };
		if !ptr.is_null() {
			record(1);
		}
		ptr
	}

	unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
		unsafe { System.dealloc(ptr, layout) };
		record(-1);
	}

	// A reallocation moves a live allocation, the count stays the same
	unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
		unsafe { System.realloc(ptr, layout, new_size) }
	}
}

fn record(delta: isize) {
	// try_with: the thread may be tearing down its locals
	let _ = NET.try_with(|net| net.set(net.get() + delta));
	if delta > 0 {
		let _ = TOTAL.try_with(|total| total.set(total.get() + 1));
	}
}

/// Allocations minus deallocations made by this thread so far
pub fn net_allocations() -> isize {
	NET.with(Cell::get)
}

/// Number of allocations made by this thread so far
pub fn total_allocations() -> usize {
	TOTAL.with(Cell::get)
}

/// Run `f` and report how many of its allocations are still alive when it returns
///
/// Whatever `f` returns is counted as alive, so return nothing that owns heap memory
/// unless that is what should be measured.
pub fn measure<R>(f: impl FnOnce() -> R) -> (R, isize) {
	let before = net_allocations();
	let result = f();
	(result, net_allocations() - before)
}
