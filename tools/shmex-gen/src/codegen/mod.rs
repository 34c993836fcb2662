// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Code and manifest emission.
//!
//! Emission is a pure function of the resolved module: the same schema
//! always produces byte-identical output, so generated files can be
//! checked in and diffed.

pub mod manifest;
pub mod rust_backend;

pub use manifest::{manifest_for, manifest_json};
pub use rust_backend::generate_module;
