// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Type schema and metadata.
//!
//! Two descriptor worlds live here:
//!
//! - the **schema model** ([`model`]): owned declarations parsed from a
//!   schema file, resolved into layouts and structural hashes by the
//!   code generator (and by anything else that needs to reason about a
//!   schema at build time);
//! - the **static descriptors** ([`descriptor`]): `&'static` metadata
//!   emitted into generated code and consumed at runtime by the dispatch
//!   table and the shared config dictionary.
//!
//! [`registry`] composes the static side: generated schema modules are
//! merged into one process-wide [`registry::TypeRegistry`] with
//! non-overlapping dispatch index ranges and duplicate-hash detection.

pub mod descriptor;
pub mod hash;
pub mod layout;
pub mod model;
pub mod registry;

pub use descriptor::{FieldLayout, FieldType, PrimitiveKind, TypeDescriptor};
pub use hash::{fnv1a_32, fnv1a_64, structural_hash};
pub use layout::{resolve, ResolvedField, ResolvedFieldKind, ResolvedModule, ResolvedType};
pub use model::{EnumDef, FieldDef, SchemaFile, StructDef};
pub use registry::{SchemaModule, TypeEntry, TypeRegistry};

use std::fmt;

/// Errors raised while resolving a schema or composing registries.
///
/// All of these are fatal build-time (or registration-time) conditions:
/// code generation and registry composition abort rather than emit or
/// accept partially-correct metadata.
#[derive(Debug)]
pub enum SchemaError {
    /// A field references a type that is not a primitive and was not
    /// declared earlier in the schema.
    UnresolvedType { type_name: String, field: String },

    /// Primary-key flag on a field whose type cannot be hashed into a
    /// fixed-size key (strings, structs, arrays).
    InvalidPrimaryKey { type_name: String, field: String },

    /// Fixed-array element type is not a primitive.
    InvalidArrayElement { type_name: String, field: String },

    /// Two declarations share a name.
    DuplicateType(String),

    /// Two fields of one struct share a name.
    DuplicateField { type_name: String, field: String },

    /// Two structurally distinct types produced the same hash.
    DuplicateTypeHash { first: String, second: String, hash: u64 },

    /// A struct with no fields has no layout.
    EmptyStruct(String),

    /// A type's structural hash landed on a reserved value.
    ReservedHash(String),

    /// Module entries are not densely indexed from zero.
    NonDenseIndex { module: String, expected: u32, found: u32 },

    /// A manifest records a different hash than the compiled registry.
    HashMismatch { type_name: String, manifest: u64, compiled: u64 },

    /// A manifest records a different dispatch index than the compiled
    /// registry.
    IndexMismatch { type_name: String, manifest: u32, compiled: u32 },

    /// A manifest names a type the composed registry does not contain.
    UnknownManifestType(String),

    /// A manifest hash field could not be parsed.
    MalformedManifestHash { type_name: String, value: String },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnresolvedType { type_name, field } => {
                write!(f, "Unresolved type reference in {type_name}.{field}")
            }
            Self::InvalidPrimaryKey { type_name, field } => {
                write!(
                    f,
                    "Primary key {type_name}.{field} must be a fixed-size scalar"
                )
            }
            Self::InvalidArrayElement { type_name, field } => {
                write!(
                    f,
                    "Array field {type_name}.{field} must have a primitive element type"
                )
            }
            Self::DuplicateType(name) => write!(f, "Duplicate type declaration: {name}"),
            Self::DuplicateField { type_name, field } => {
                write!(f, "Duplicate field {field} in {type_name}")
            }
            Self::DuplicateTypeHash {
                first,
                second,
                hash,
            } => write!(
                f,
                "Type hash collision: {first} and {second} both hash to {hash:#018x}"
            ),
            Self::EmptyStruct(name) => write!(f, "Struct {name} has no fields"),
            Self::ReservedHash(name) => {
                write!(f, "Type {name} hashes to a reserved value")
            }
            Self::NonDenseIndex {
                module,
                expected,
                found,
            } => write!(
                f,
                "Module {module} entries are not dense: expected index {expected}, found {found}"
            ),
            Self::HashMismatch {
                type_name,
                manifest,
                compiled,
            } => write!(
                f,
                "Hash mismatch for {type_name}: manifest {manifest:#018x}, compiled {compiled:#018x}"
            ),
            Self::IndexMismatch {
                type_name,
                manifest,
                compiled,
            } => write!(
                f,
                "Type index mismatch for {type_name}: manifest {manifest}, compiled {compiled}"
            ),
            Self::UnknownManifestType(name) => {
                write!(f, "Manifest type {name} is not in the composed registry")
            }
            Self::MalformedManifestHash { type_name, value } => {
                write!(f, "Malformed manifest hash for {type_name}: {value:?}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations.
pub type Result<T> = std::result::Result<T, SchemaError>;
