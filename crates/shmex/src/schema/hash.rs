// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Deterministic structural type hashing.
//!
//! The 64-bit FNV-1a hash of a type's canonical field encoding is its
//! wire identity. Two independently built generators (for any target
//! language) must agree on it, so the encoding depends only on
//! declaration order and canonical type tags, never on a runtime's
//! reflection ordering:
//!
//! ```text
//! per field:  name 0x1F tag 0x1F pk-flag 0x1F array-len(LE u32) 0x1E
//! ```
//!
//! Canonical tags: primitive identifiers (`u32`, `f64`, ...), `string`,
//! `enum(u32)` for enumerations (repr identity, not the declared name),
//! and the 16-hex-digit rendering of the nested type's own structural
//! hash for struct fields.

const FNV64_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV64_PRIME: u64 = 0x0000_0100_0000_01b3;

const FNV32_OFFSET: u32 = 2_166_136_261;
const FNV32_PRIME: u32 = 16_777_619;

/// Field separator within one field's encoding.
const FIELD_SEP: u8 = 0x1F;
/// Record separator between fields.
const RECORD_SEP: u8 = 0x1E;

/// 64-bit FNV-1a over a byte slice.
#[must_use]
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV64_OFFSET;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV64_PRIME);
    }
    hash
}

/// 32-bit FNV-1a over a byte slice. Used for dictionary slot probing
/// and segment-name derived identifiers.
#[must_use]
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    let mut hash = FNV32_OFFSET;
    for byte in bytes {
        hash ^= u32::from(*byte);
        hash = hash.wrapping_mul(FNV32_PRIME);
    }
    hash
}

/// Canonical fingerprint of one field, fed into [`structural_hash`].
#[derive(Debug, Clone)]
pub struct FieldFingerprint {
    pub name: String,
    /// Canonical type tag (see module docs).
    pub tag: String,
    pub primary_key: bool,
    pub array_len: u32,
}

/// Compute the structural hash of a type from its ordered field
/// fingerprints.
#[must_use]
pub fn structural_hash(fields: &[FieldFingerprint]) -> u64 {
    let mut buf = Vec::with_capacity(fields.len() * 24);
    for field in fields {
        buf.extend_from_slice(field.name.as_bytes());
        buf.push(FIELD_SEP);
        buf.extend_from_slice(field.tag.as_bytes());
        buf.push(FIELD_SEP);
        buf.push(u8::from(field.primary_key));
        buf.push(FIELD_SEP);
        buf.extend_from_slice(&field.array_len.to_le_bytes());
        buf.push(RECORD_SEP);
    }
    fnv1a_64(&buf)
}

/// Render a nested type's hash as its canonical tag.
#[must_use]
pub fn nested_tag(type_hash: u64) -> String {
    format!("{type_hash:016x}")
}
