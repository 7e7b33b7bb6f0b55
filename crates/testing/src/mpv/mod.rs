// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! In-process stand-in for libmpv
//!
//! [`FakeMpv`] fills a [`ClientCallbacks`] table with `extern "C"` functions backed by a
//! scriptable in-memory player:
//! - properties are kept in a map and can be read in any format libmpv supports
//! - options, commands and property writes are recorded for inspection
//! - failures can be scripted per operation with a libmpv status code
//! - events are queued and handed out one by one by `wait_event`
//! - results the client receives are tracked until it frees them, so tests can assert that
//!   nothing handed over by the library leaks
//!
//! The fake is bound to the thread that created it, like a handle used from a single
//! thread.

mod callbacks;
mod event;
mod foreign;

use std::{
	cell::RefCell,
	collections::{HashMap, HashSet, VecDeque},
	ffi::c_int,
	sync::Arc,
};

use mpvbind_abi::{ClientCallbacks, Format};
use mpvbind_type::Value;
use parking_lot::Mutex;

pub use event::ScriptedEvent;

use self::event::EventStorage;

thread_local! {
	static CURRENT: RefCell<Option<Arc<Shared>>> = const { RefCell::new(None) };
}

/// A property write seen by the fake
#[derive(Debug, Clone, PartialEq)]
pub struct SetCall {
	pub name: String,
	pub format: Format,
	pub value: Value,
}

/// Operations whose status can be scripted
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Failure {
	Initialize,
	Option(String),
	Command(String),
	GetProperty(String),
	SetProperty(String),
}

pub(crate) struct Shared {
	state: Mutex<State>,
}

struct State {
	fail_create: bool,
	failures: HashMap<Failure, c_int>,
	properties: HashMap<String, Value>,
	command_results: HashMap<String, Value>,
	options: Vec<(String, String)>,
	commands: Vec<Value>,
	set_calls: Vec<SetCall>,
	events: VecDeque<ScriptedEvent>,
	current_event: Option<EventStorage>,
	created: usize,
	destroyed: usize,
	initialized: bool,
	outstanding: HashSet<usize>,
	invalid_frees: usize,
	last_timeout: Option<f64>,
}

/// Scriptable libmpv double. Creating one makes it the target of the callback table on the
/// current thread, replacing any previous fake.
#[derive(Clone)]
pub struct FakeMpv {
	shared: Arc<Shared>,
}

impl FakeMpv {
	pub fn new() -> Self {
		let shared = Arc::new(Shared {
			state: Mutex::new(State {
				fail_create: false,
				failures: HashMap::new(),
				properties: HashMap::new(),
				command_results: HashMap::new(),
				options: Vec::new(),
				commands: Vec::new(),
				set_calls: Vec::new(),
				events: VecDeque::new(),
				current_event: None,
				created: 0,
				destroyed: 0,
				initialized: false,
				outstanding: HashSet::new(),
				invalid_frees: 0,
				last_timeout: None,
			}),
		});
		CURRENT.with(|current| *current.borrow_mut() = Some(shared.clone()));
		Self {
			shared,
		}
	}

	/// Callback table routed to the fake installed on the calling thread
	pub fn callbacks(&self) -> ClientCallbacks {
		callbacks::create_client_callbacks()
	}

	// Scripting

	pub fn set_property(&self, name: &str, value: impl Into<Value>) -> &Self {
		self.shared.state.lock().properties.insert(name.to_string(), value.into());
		self
	}

	/// Result node returned by `command_node` for commands named `name`
	pub fn command_result(&self, name: &str, result: impl Into<Value>) -> &Self {
		self.shared.state.lock().command_results.insert(name.to_string(), result.into());
		self
	}

	pub fn push_event(&self, event: ScriptedEvent) -> &Self {
		self.shared.state.lock().events.push_back(event);
		self
	}

	/// Make `create` return null
	pub fn fail_create(&self) -> &Self {
		self.shared.state.lock().fail_create = true;
		self
	}

	pub fn fail_initialize(&self, status: c_int) -> &Self {
		self.fail(Failure::Initialize, status)
	}

	pub fn fail_option(&self, name: &str, status: c_int) -> &Self {
		self.fail(Failure::Option(name.to_string()), status)
	}

	pub fn fail_command(&self, name: &str, status: c_int) -> &Self {
		self.fail(Failure::Command(name.to_string()), status)
	}

	pub fn fail_get_property(&self, name: &str, status: c_int) -> &Self {
		self.fail(Failure::GetProperty(name.to_string()), status)
	}

	pub fn fail_set_property(&self, name: &str, status: c_int) -> &Self {
		self.fail(Failure::SetProperty(name.to_string()), status)
	}

	fn fail(&self, failure: Failure, status: c_int) -> &Self {
		self.shared.state.lock().failures.insert(failure, status);
		self
	}

	// Inspection

	pub fn property(&self, name: &str) -> Option<Value> {
		self.shared.state.lock().properties.get(name).cloned()
	}

	/// Options in the order they were set
	pub fn options(&self) -> Vec<(String, String)> {
		self.shared.state.lock().options.clone()
	}

	/// Argument lists of every command received, failed ones included
	pub fn commands(&self) -> Vec<Value> {
		self.shared.state.lock().commands.clone()
	}

	pub fn set_calls(&self) -> Vec<SetCall> {
		self.shared.state.lock().set_calls.clone()
	}

	pub fn is_initialized(&self) -> bool {
		self.shared.state.lock().initialized
	}

	/// Handles created and not yet destroyed
	pub fn live_handles(&self) -> usize {
		let state = self.shared.state.lock();
		state.created - state.destroyed
	}

	/// Results handed to the client and not yet freed through the library
	pub fn outstanding(&self) -> usize {
		self.shared.state.lock().outstanding.len()
	}

	/// Frees of pointers the library never handed out
	pub fn invalid_frees(&self) -> usize {
		self.shared.state.lock().invalid_frees
	}

	/// Number of events still queued
	pub fn pending_events(&self) -> usize {
		self.shared.state.lock().events.len()
	}

	pub fn last_wait_timeout(&self) -> Option<f64> {
		self.shared.state.lock().last_timeout
	}
}

impl Default for FakeMpv {
	fn default() -> Self {
		Self::new()
	}
}

fn current() -> Option<Arc<Shared>> {
	CURRENT.with(|current| current.borrow().clone())
}

#[cfg(test)]
mod tests {
	use std::{
		ffi::{CString, c_char, c_void},
		ptr::null_mut,
	};

	use mpvbind_abi::{EventId, MPV_ERROR_PROPERTY_NOT_FOUND, NodeFFI};

	use super::*;

	#[test]
	fn test_handle_lifecycle() {
		let fake = FakeMpv::new();
		let cb = fake.callbacks();
		let handle = unsafe { (cb.create)() };
		assert!(!handle.is_null());
		assert_eq!(fake.live_handles(), 1);
		assert_eq!(unsafe { (cb.initialize)(handle) }, 0);
		assert!(fake.is_initialized());
		unsafe { (cb.terminate_destroy)(handle) };
		assert_eq!(fake.live_handles(), 0);
	}

	#[test]
	fn test_get_property_node_is_tracked_until_freed() {
		let fake = FakeMpv::new();
		fake.set_property("track-list", Value::list([Value::map([("id", 1i64)])]));
		let cb = fake.callbacks();
		let handle = unsafe { (cb.create)() };

		let name = CString::new("track-list").unwrap();
		let mut node = NodeFFI::empty();
		let status = unsafe {
			(cb.get_property)(handle, name.as_ptr(), Format::NODE, &mut node as *mut NodeFFI as *mut c_void)
		};
		assert_eq!(status, 0);
		assert_eq!(fake.outstanding(), 1);

		unsafe { (cb.free_node_contents)(&mut node) };
		assert_eq!(fake.outstanding(), 0);
		assert_eq!(node.format, Format::NONE);
		unsafe { (cb.terminate_destroy)(handle) };
	}

	#[test]
	fn test_get_missing_property() {
		let fake = FakeMpv::new();
		let cb = fake.callbacks();
		let handle = unsafe { (cb.create)() };
		let name = CString::new("nope").unwrap();
		let mut slot: *mut c_char = null_mut();
		let status = unsafe {
			(cb.get_property)(handle, name.as_ptr(), Format::STRING, &mut slot as *mut *mut c_char as *mut c_void)
		};
		assert_eq!(status, MPV_ERROR_PROPERTY_NOT_FOUND);
		assert!(slot.is_null());
		unsafe { (cb.terminate_destroy)(handle) };
	}

	#[test]
	fn test_events_drain_to_none() {
		let fake = FakeMpv::new();
		fake.push_event(ScriptedEvent::Bare(EventId::FILE_LOADED));
		let cb = fake.callbacks();
		let handle = unsafe { (cb.create)() };

		let first = unsafe { &*(cb.wait_event)(handle, 0.0) };
		assert_eq!(first.event_id, EventId::FILE_LOADED);
		let second = unsafe { &*(cb.wait_event)(handle, 0.0) };
		assert_eq!(second.event_id, EventId::NONE);
		assert_eq!(fake.last_wait_timeout(), Some(0.0));
		unsafe { (cb.terminate_destroy)(handle) };
	}
}
