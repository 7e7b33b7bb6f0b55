// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use mpvbind_marshal::{EncodeError, encode};
use mpvbind_testing::alloc::{CountingAllocator, measure, total_allocations};
use mpvbind_type::Value;

#[global_allocator]
static ALLOC: CountingAllocator = CountingAllocator;

fn sample() -> Value {
	Value::map([
		("speed", Value::float(1.5)),
		("title", Value::string("Big Buck Bunny")),
		("filters", Value::list(["a", "b", "c"])),
		("cover", Value::bytes(vec![1u8, 2, 3, 4])),
		("nested", Value::list([Value::map([("deep", Value::list([Value::bool(true)]))])])),
		("empty", Value::List(vec![])),
	])
}

#[test]
fn test_encode_and_drop_frees_everything() {
	let value = sample();
	let before = total_allocations();
	let ((), net) = measure(|| {
		let node = encode(&value).unwrap();
		drop(node);
	});
	assert!(total_allocations() > before);
	assert_eq!(net, 0);
}

#[test]
fn test_failed_encode_frees_partial_tree() {
	// The empty key comes last, after several entries have been allocated
	let value = Value::map([
		("a", Value::list(["x", "y"])),
		("b", Value::string("z")),
		("c", Value::bytes(vec![9u8])),
		("", Value::int(1)),
	]);
	let (result, net) = measure(|| encode(&value).map(drop));
	assert_eq!(result, Err(EncodeError::EmptyKey));
	assert_eq!(net, 0);
}

#[test]
fn test_failed_nested_encode_frees_partial_tree() {
	let value = Value::list([Value::string("fine"), Value::list([Value::int(1), Value::None])]);
	let (result, net) = measure(|| encode(&value).map(drop).is_err());
	assert!(result);
	assert_eq!(net, 0);
}

#[test]
fn test_decode_leaves_only_the_value() {
	let value = sample();
	let node = encode(&value).unwrap();
	let (decoded, _) = measure(|| node.decode().unwrap());
	assert_eq!(decoded, value);
	drop(decoded);
	let ((), net) = measure(|| drop(node));
	assert!(net < 0);
}
