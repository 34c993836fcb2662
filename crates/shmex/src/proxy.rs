// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! The contract between generated types and the runtime.
//!
//! The code generator emits, for each schema struct, an owned value type
//! plus two zero-copy proxies, and wires all three to the runtime by
//! implementing [`ShmType`]. The dispatch table, the config dictionary,
//! and the channel helpers only ever speak this trait.

use crate::frame::{self, FrameError};
use crate::schema::TypeDescriptor;
use crate::view;

/// A generated exchanged type.
///
/// Implementations are emitted by the code generator; hand-written
/// implementations are possible but must uphold the layout the
/// descriptor declares, since verified payloads are trusted by proxies.
pub trait ShmType: Sized + Default {
    /// Structural hash; the type's wire identity.
    const TYPE_HASH: u64;
    /// Byte size of the fixed region.
    const FIXED_SIZE: usize;
    /// Maximum member alignment.
    const ALIGNMENT: usize;
    /// Whether any field carries variable-length data.
    const HAS_VARIABLE_DATA: bool;

    /// Read-only zero-copy view over a verified payload.
    type Proxy<'a>;
    /// Mutable view over a payload's fixed region.
    type ProxyMut<'a>;

    /// Static layout metadata.
    fn descriptor() -> &'static TypeDescriptor;

    /// Bytes this value will append to the variable region.
    fn var_data_size(&self) -> usize;

    /// Total serialized payload size.
    fn serialized_size(&self) -> usize {
        Self::FIXED_SIZE + self.var_data_size()
    }

    /// Serialize into a fresh payload: fixed region, then packed
    /// variable region.
    fn serialize(&self) -> Vec<u8>;

    /// Verify a payload: fixed-region length, every variable slot
    /// (in-bounds, contiguous, exhaustive), every enum discriminant,
    /// string UTF-8.
    fn verify(payload: &[u8]) -> frame::Result<()>;

    /// View a payload. Callers verify first; on unverified input the
    /// proxy degrades to default values rather than panicking.
    fn proxy(payload: &[u8]) -> Self::Proxy<'_>;

    /// Mutable view over the fixed region. Variable-length fields cannot
    /// be resized in place; rewriting them takes a full re-serialize.
    fn proxy_mut(payload: &mut [u8]) -> Self::ProxyMut<'_>;

    /// Deserialize a payload into an owned value.
    fn from_payload(payload: &[u8]) -> frame::Result<Self>;

    /// Primary-key bytes in declaration order, packed without padding.
    fn primary_key_bytes(&self) -> Vec<u8> {
        let payload = self.serialize();
        extract_primary_key(Self::descriptor(), &payload).unwrap_or_default()
    }
}

/// Extract a payload's packed primary-key bytes using only descriptor
/// metadata. Returns `None` when the payload is too short for any key
/// field. Used by the default dispatch handler, which republishes typed
/// payloads it has no compiled handler for.
#[must_use]
pub fn extract_primary_key(desc: &TypeDescriptor, payload: &[u8]) -> Option<Vec<u8>> {
    let mut key = Vec::with_capacity(desc.primary_key_len());
    for field in desc.primary_key_fields() {
        let start = field.offset_bytes as usize;
        let end = start + field.size_bytes as usize;
        key.extend_from_slice(payload.get(start..end)?);
    }
    Some(key)
}

/// Verify the common fixed-region prelude: payload at least
/// `fixed_size` bytes. Generated verifiers call this first.
pub fn verify_fixed_len(payload: &[u8], fixed_size: usize) -> frame::Result<()> {
    if payload.len() < fixed_size {
        return Err(FrameError::TooShort {
            need: fixed_size,
            have: payload.len(),
        });
    }
    Ok(())
}

/// Check one enum field's discriminant against its variant count.
pub fn verify_enum(
    payload: &[u8],
    offset: usize,
    variant_count: u32,
    field: &'static str,
) -> frame::Result<()> {
    let value = view::get_u32(payload, offset);
    if value >= variant_count {
        return Err(FrameError::InvalidEnumValue { field, value });
    }
    Ok(())
}

/// Check one string field's bytes for UTF-8 validity. Bounds are
/// enforced separately by the slot contiguity check.
pub fn verify_utf8(
    payload: &[u8],
    slot_offset: usize,
    var_base: usize,
    field: &'static str,
) -> frame::Result<()> {
    let bytes = view::get_bytes(payload, slot_offset, var_base);
    std::str::from_utf8(bytes)
        .map(|_| ())
        .map_err(|_| FrameError::InvalidUtf8 { field })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldLayout, FieldType, PrimitiveKind, TypeDescriptor};

    static KEYED: TypeDescriptor = TypeDescriptor {
        type_name: "t::Keyed",
        type_hash: 0x0101_0202_0303_0404,
        type_index: 0,
        fixed_size: 16,
        alignment: 8,
        has_variable_data: false,
        fields: &[
            FieldLayout {
                name: "id",
                offset_bytes: 0,
                field_type: FieldType::Primitive(PrimitiveKind::U64),
                size_bytes: 8,
                alignment: 8,
                is_primary_key: true,
                array_len: 0,
                element_type: None,
            },
            FieldLayout {
                name: "shard",
                offset_bytes: 8,
                field_type: FieldType::Primitive(PrimitiveKind::U32),
                size_bytes: 4,
                alignment: 4,
                is_primary_key: true,
                array_len: 0,
                element_type: None,
            },
            FieldLayout {
                name: "flags",
                offset_bytes: 12,
                field_type: FieldType::Primitive(PrimitiveKind::U32),
                size_bytes: 4,
                alignment: 4,
                is_primary_key: false,
                array_len: 0,
                element_type: None,
            },
        ],
    };

    #[test]
    fn primary_key_packs_in_declaration_order() {
        let mut payload = vec![0u8; 16];
        view::put_u64(&mut payload, 0, 0x1122_3344_5566_7788);
        view::put_u32(&mut payload, 8, 7);
        view::put_u32(&mut payload, 12, 0xffff_ffff);

        let key = extract_primary_key(&KEYED, &payload).expect("key");
        assert_eq!(key.len(), 12);
        assert_eq!(&key[0..8], &0x1122_3344_5566_7788u64.to_le_bytes());
        assert_eq!(&key[8..12], &7u32.to_le_bytes());
    }

    #[test]
    fn short_payload_yields_no_key() {
        assert!(extract_primary_key(&KEYED, &[0u8; 4]).is_none());
    }

    #[test]
    fn enum_discriminant_checked() {
        let mut payload = vec![0u8; 4];
        view::put_u32(&mut payload, 0, 2);
        verify_enum(&payload, 0, 3, "mode").expect("in range");
        let err = verify_enum(&payload, 0, 2, "mode").expect_err("out of range");
        assert_eq!(
            err,
            FrameError::InvalidEnumValue {
                field: "mode",
                value: 2
            }
        );
    }

    #[test]
    fn utf8_checked() {
        let mut payload = vec![0u8; 16];
        payload.extend_from_slice(&[0xc3, 0x28]);
        view::put_var_slot(&mut payload, 0, 0, 2);
        let err = verify_utf8(&payload, 0, 16, "label").expect_err("bad utf8");
        assert_eq!(err, FrameError::InvalidUtf8 { field: "label" });
    }
}
