// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

pub mod value;

pub use value::{Kind, Map, Value};
