// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Marshalling between host [`Value`]s and libmpv nodes
//!
//! - [`encode`] builds an owned [`Node`] tree from a value. Every allocation belongs to the
//!   root and is freed exactly once when the node is dropped.
//! - [`decode`] and [`decode_node`] read a node tree (possibly owned by libmpv) back into a
//!   value without taking ownership of anything.
//! - [`describe`] renders a node tree for diagnostics.
//!
//! [`Value`]: mpvbind_type::Value

pub mod decode;
pub mod describe;
pub mod encode;
pub mod error;
pub mod format;
pub mod node;
pub mod release;

pub use decode::{decode, decode_node};
pub use describe::describe;
pub use encode::encode;
pub use error::{DecodeError, EncodeError};
pub use format::{condense, format_for, kind_for};
pub use node::Node;
pub use release::release;
