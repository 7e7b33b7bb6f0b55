// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! `extern "C"` entry points of the fake library

use std::{
	ffi::{CString, c_char, c_double, c_int, c_void},
	ptr::null_mut,
	sync::Arc,
};

use mpvbind_abi::{
	ClientCallbacks, EventFFI, Format, HandleFFI, MPV_ERROR_INVALID_PARAMETER, MPV_ERROR_PROPERTY_FORMAT,
	MPV_ERROR_PROPERTY_NOT_FOUND, MPV_ERROR_SUCCESS, NodeFFI,
};
use mpvbind_type::Value;

use super::{
	Failure, SetCall, Shared, current,
	event::EventStorage,
	foreign::{self, read_string},
};

/// What a `HandleFFI` pointer handed out by the fake points to
struct FakeHandle {
	shared: Arc<Shared>,
}

/// Create the client callback table
pub(crate) fn create_client_callbacks() -> ClientCallbacks {
	ClientCallbacks {
		create: fake_create,
		initialize: fake_initialize,
		terminate_destroy: fake_terminate_destroy,
		set_option_string: fake_set_option_string,
		command_node: fake_command_node,
		get_property: fake_get_property,
		set_property: fake_set_property,
		wait_event: fake_wait_event,
		free_node_contents: fake_free_node_contents,
		free: fake_free,
	}
}

unsafe fn shared<'a>(handle: *mut HandleFFI) -> Option<&'a Shared> {
	if handle.is_null() {
		return None;
	}
	Some(unsafe { &(*(handle as *const FakeHandle)).shared })
}

// ==================== Lifecycle ====================

unsafe extern "C" fn fake_create() -> *mut HandleFFI {
	let Some(shared) = current() else {
		return null_mut();
	};
	{
		let mut state = shared.state.lock();
		if state.fail_create {
			return null_mut();
		}
		state.created += 1;
	}
	Box::into_raw(Box::new(FakeHandle {
		shared,
	})) as *mut HandleFFI
}

unsafe extern "C" fn fake_initialize(handle: *mut HandleFFI) -> c_int {
	let Some(shared) = (unsafe { shared(handle) }) else {
		return MPV_ERROR_INVALID_PARAMETER;
	};
	let mut state = shared.state.lock();
	if let Some(status) = state.failures.get(&Failure::Initialize) {
		return *status;
	}
	state.initialized = true;
	MPV_ERROR_SUCCESS
}

unsafe extern "C" fn fake_terminate_destroy(handle: *mut HandleFFI) {
	if handle.is_null() {
		return;
	}
	let handle = unsafe { Box::from_raw(handle as *mut FakeHandle) };
	let mut state = handle.shared.state.lock();
	state.destroyed += 1;
	state.initialized = false;
	state.current_event = None;
}

unsafe extern "C" fn fake_set_option_string(handle: *mut HandleFFI, name: *const c_char, data: *const c_char) -> c_int {
	let Some(shared) = (unsafe { shared(handle) }) else {
		return MPV_ERROR_INVALID_PARAMETER;
	};
	let (Some(name), Some(data)) = (unsafe { read_string(name) }, unsafe { read_string(data) }) else {
		return MPV_ERROR_INVALID_PARAMETER;
	};

	let mut state = shared.state.lock();
	let status = state.failures.get(&Failure::Option(name.clone())).copied();
	state.options.push((name, data));
	status.unwrap_or(MPV_ERROR_SUCCESS)
}

// ==================== Commands & Properties ====================

unsafe extern "C" fn fake_command_node(handle: *mut HandleFFI, args: *mut NodeFFI, result: *mut NodeFFI) -> c_int {
	let Some(shared) = (unsafe { shared(handle) }) else {
		return MPV_ERROR_INVALID_PARAMETER;
	};
	if args.is_null() || unsafe { (*args).format } != Format::NODE_ARRAY {
		return MPV_ERROR_INVALID_PARAMETER;
	}

	let args = unsafe { foreign::read_node(&*args) };
	let name = args.as_list().and_then(|list| list.first()).and_then(Value::as_str).unwrap_or_default().to_string();

	let mut state = shared.state.lock();
	state.commands.push(args);
	if let Some(status) = state.failures.get(&Failure::Command(name.clone())) {
		return *status;
	}

	if !result.is_null() {
		let node = foreign::build(state.command_results.get(&name).unwrap_or(&Value::None));
		if let Some(address) = foreign::root_address(&node) {
			state.outstanding.insert(address);
		}
		unsafe { *result = node };
	}
	MPV_ERROR_SUCCESS
}

unsafe extern "C" fn fake_get_property(
	handle: *mut HandleFFI,
	name: *const c_char,
	format: Format,
	data: *mut c_void,
) -> c_int {
	let Some(shared) = (unsafe { shared(handle) }) else {
		return MPV_ERROR_INVALID_PARAMETER;
	};
	let Some(name) = (unsafe { read_string(name) }) else {
		return MPV_ERROR_INVALID_PARAMETER;
	};
	if data.is_null() {
		return MPV_ERROR_INVALID_PARAMETER;
	}

	let mut state = shared.state.lock();
	if let Some(status) = state.failures.get(&Failure::GetProperty(name.clone())) {
		return *status;
	}
	let Some(value) = state.properties.get(&name).cloned() else {
		return MPV_ERROR_PROPERTY_NOT_FOUND;
	};

	unsafe {
		match (format, &value) {
			(Format::STRING | Format::OSD_STRING, value) => {
				let Some(text) = to_text(value).and_then(|t| CString::new(t).ok()) else {
					return MPV_ERROR_PROPERTY_FORMAT;
				};
				let ptr = text.into_raw();
				state.outstanding.insert(ptr as usize);
				*(data as *mut *mut c_char) = ptr;
			}
			(Format::FLAG, Value::Bool(v)) => *(data as *mut c_int) = *v as c_int,
			(Format::INT64, Value::Int(v)) => *(data as *mut i64) = *v,
			(Format::DOUBLE, Value::Float(v)) => *(data as *mut f64) = *v,
			(Format::DOUBLE, Value::Int(v)) => *(data as *mut f64) = *v as f64,
			(Format::NODE, value) => {
				let node = foreign::build(value);
				if let Some(address) = foreign::root_address(&node) {
					state.outstanding.insert(address);
				}
				*(data as *mut NodeFFI) = node;
			}
			_ => return MPV_ERROR_PROPERTY_FORMAT,
		}
	}
	MPV_ERROR_SUCCESS
}

/// String form of a property, the way libmpv formats it for STRING reads
fn to_text(value: &Value) -> Option<String> {
	match value {
		Value::String(v) => Some(v.clone()),
		Value::Bool(v) => Some(if *v { "yes" } else { "no" }.to_string()),
		Value::Int(v) => Some(v.to_string()),
		Value::Float(v) => Some(format!("{v:.6}")),
		_ => None,
	}
}

unsafe extern "C" fn fake_set_property(
	handle: *mut HandleFFI,
	name: *const c_char,
	format: Format,
	data: *mut c_void,
) -> c_int {
	let Some(shared) = (unsafe { shared(handle) }) else {
		return MPV_ERROR_INVALID_PARAMETER;
	};
	let Some(name) = (unsafe { read_string(name) }) else {
		return MPV_ERROR_INVALID_PARAMETER;
	};

	let value = unsafe { foreign::read(format, data) };
	let mut state = shared.state.lock();
	state.set_calls.push(SetCall {
		name: name.clone(),
		format,
		value: value.clone(),
	});
	if let Some(status) = state.failures.get(&Failure::SetProperty(name.clone())) {
		return *status;
	}
	state.properties.insert(name, value);
	MPV_ERROR_SUCCESS
}

// ==================== Events ====================

unsafe extern "C" fn fake_wait_event(handle: *mut HandleFFI, timeout: c_double) -> *mut EventFFI {
	let Some(shared) = (unsafe { shared(handle) }) else {
		return null_mut();
	};
	let mut state = shared.state.lock();
	state.last_timeout = Some(timeout);

	// The previous event is invalidated by this call
	state.current_event = None;
	let mut storage = match state.events.pop_front() {
		Some(event) => EventStorage::build(&event),
		None => EventStorage::none(),
	};
	let header = storage.header_ptr();
	state.current_event = Some(storage);
	header
}

// ==================== Memory ====================

unsafe extern "C" fn fake_free_node_contents(node: *mut NodeFFI) {
	if node.is_null() {
		return;
	}
	let Some(shared) = current() else {
		return;
	};
	let raw = unsafe { *node };
	if let Some(address) = foreign::root_address(&raw) {
		let mut state = shared.state.lock();
		if state.outstanding.remove(&address) {
			unsafe { foreign::free(raw) };
		} else {
			state.invalid_frees += 1;
		}
	}
	unsafe { *node = NodeFFI::empty() };
}

unsafe extern "C" fn fake_free(data: *mut c_void) {
	if data.is_null() {
		return;
	}
	let Some(shared) = current() else {
		return;
	};
	let mut state = shared.state.lock();
	if state.outstanding.remove(&(data as usize)) {
		drop(unsafe { CString::from_raw(data as *mut c_char) });
	} else {
		state.invalid_frees += 1;
	}
}
