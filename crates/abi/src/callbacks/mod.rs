// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Entry point tables the host calls into

pub mod client;
