// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Declarative schema model.
//!
//! One schema file describes one module: a set of enums and structs
//! exchanged over the channel. The model is deliberately
//! language-neutral; generators for each target language consume the
//! resolved form of this model, never a host language's reflection API.
//!
//! ```json
//! {
//!   "module": "bench",
//!   "enums": [
//!     { "name": "EvictionPolicy", "values": ["Lru", "Mru", "Random"] }
//!   ],
//!   "structs": [
//!     {
//!       "name": "CacheConfig",
//!       "fields": [
//!         { "name": "cache_size", "type": "u32", "primary_key": true },
//!         { "name": "eviction_policy", "type": "EvictionPolicy" },
//!         { "name": "label", "type": "string" }
//!       ]
//!     }
//!   ]
//! }
//! ```

#[cfg(feature = "manifest")]
use serde::{Deserialize, Serialize};

/// One schema module: the unit of code generation.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "manifest", derive(Serialize, Deserialize))]
pub struct SchemaFile {
    /// Module name; prefixes every qualified type name.
    pub module: String,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub enums: Vec<EnumDef>,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub structs: Vec<StructDef>,
}

/// A u32-backed enumeration; discriminants are assigned 0..n in
/// declaration order.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "manifest", derive(Serialize, Deserialize))]
pub struct EnumDef {
    pub name: String,
    pub values: Vec<String>,
}

/// A fixed-layout struct declaration.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "manifest", derive(Serialize, Deserialize))]
pub struct StructDef {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

/// One field declaration.
///
/// `type` is a primitive tag (`"u32"`, `"f64"`, `"bool"`, ...),
/// `"string"`, or the name of an enum or struct declared earlier in the
/// same module. `array > 0` makes the field a fixed array of that many
/// elements (primitives only).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "manifest", derive(Serialize, Deserialize))]
pub struct FieldDef {
    pub name: String,
    #[cfg_attr(feature = "manifest", serde(rename = "type"))]
    pub type_name: String,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub primary_key: bool,
    #[cfg_attr(feature = "manifest", serde(default))]
    pub array: u32,
}

impl FieldDef {
    /// Shorthand for building schemas in code (tests, examples).
    #[must_use]
    pub fn new(name: &str, type_name: &str) -> Self {
        Self {
            name: name.to_string(),
            type_name: type_name.to_string(),
            primary_key: false,
            array: 0,
        }
    }

    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    #[must_use]
    pub fn array(mut self, len: u32) -> Self {
        self.array = len;
        self
    }
}
