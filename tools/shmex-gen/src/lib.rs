// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Offline code generator for shmex schema modules.
//!
//! Consumes a declarative JSON schema, resolves layouts and structural
//! hashes through the runtime crate's own `shmex::schema` (generator
//! and runtime can never disagree), and emits a Rust module plus a JSON
//! manifest per schema file.

pub mod codegen;
pub mod parser;
