// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Static type descriptors for runtime field layout metadata.
//!
//! Generated code embeds one `TypeDescriptor` per exchanged type. The
//! dispatch table and the shared config dictionary consume these to find
//! primary-key fields and fixed sizes without knowing the Rust type.

/// Scalar wire types with a fixed size and natural alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
}

impl PrimitiveKind {
    /// Serialized size in bytes.
    #[must_use]
    pub const fn size(self) -> u32 {
        match self {
            Self::U8 | Self::I8 | Self::Bool => 1,
            Self::U16 | Self::I16 => 2,
            Self::U32 | Self::I32 | Self::F32 => 4,
            Self::U64 | Self::I64 | Self::F64 => 8,
        }
    }

    /// Natural alignment (equals size for every supported primitive).
    #[must_use]
    pub const fn alignment(self) -> u8 {
        self.size() as u8
    }

    /// Canonical tag used in structural hashing and schema files.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::U8 => "u8",
            Self::U16 => "u16",
            Self::U32 => "u32",
            Self::U64 => "u64",
            Self::I8 => "i8",
            Self::I16 => "i16",
            Self::I32 => "i32",
            Self::I64 => "i64",
            Self::F32 => "f32",
            Self::F64 => "f64",
            Self::Bool => "bool",
        }
    }

    /// Parse a schema type tag into a primitive kind.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "u8" => Some(Self::U8),
            "u16" => Some(Self::U16),
            "u32" => Some(Self::U32),
            "u64" => Some(Self::U64),
            "i8" => Some(Self::I8),
            "i16" => Some(Self::I16),
            "i32" => Some(Self::I32),
            "i64" => Some(Self::I64),
            "f32" => Some(Self::F32),
            "f64" => Some(Self::F64),
            "bool" => Some(Self::Bool),
            _ => None,
        }
    }
}

/// Field classification in a fixed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Primitive(PrimitiveKind),
    /// u32-backed enumeration.
    Enum,
    /// Variable-length UTF-8 string: a 16-byte inline (offset, length)
    /// slot pointing into the frame's trailing variable-data region.
    String,
    /// Nested fixed-layout struct, inlined at its offset.
    Struct,
    /// Fixed-size array of primitives, inlined at its offset.
    Array(PrimitiveKind),
}

/// Layout of a single field within a type's fixed region.
#[derive(Debug)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset_bytes: u32,
    pub field_type: FieldType,
    /// Total inline size: primitive size, 16 for strings, nested fixed
    /// size for structs, `element * array_len` for arrays.
    pub size_bytes: u32,
    pub alignment: u8,
    pub is_primary_key: bool,
    /// Element count for arrays, zero otherwise.
    pub array_len: u32,
    /// Descriptor of the nested type for struct fields.
    pub element_type: Option<&'static TypeDescriptor>,
}

/// Type descriptor: per-type metadata for dispatch and config storage.
#[derive(Debug)]
pub struct TypeDescriptor {
    /// Qualified name, stable across languages (`module::Type`).
    pub type_name: &'static str,
    /// 64-bit structural hash; the type's wire identity.
    pub type_hash: u64,
    /// Dense zero-based position inside the owning schema module.
    pub type_index: u32,
    /// Byte size of the fixed (non-variable) region.
    pub fixed_size: u32,
    /// Maximum member alignment.
    pub alignment: u8,
    /// True if any field, directly or transitively, carries a string.
    pub has_variable_data: bool,
    pub fields: &'static [FieldLayout],
}

impl TypeDescriptor {
    /// Iterate the primary-key fields in declaration order.
    pub fn primary_key_fields(&self) -> impl Iterator<Item = &FieldLayout> {
        self.fields.iter().filter(|f| f.is_primary_key)
    }

    /// Total byte length of the primary key when packed in declaration
    /// order.
    #[must_use]
    pub fn primary_key_len(&self) -> usize {
        self.primary_key_fields()
            .map(|f| f.size_bytes as usize)
            .sum()
    }
}
