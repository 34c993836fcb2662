// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Schema resolution and byte layout computation.
//!
//! Fields are placed in declaration order, each aligned to its natural
//! alignment; the whole fixed region is padded to the maximum member
//! alignment. Variable-length (string) fields reserve a 16-byte inline
//! `(u64 offset, u64 length)` slot; the string bytes live in the packed
//! variable-data region after the fixed region.
//!
//! Resolution is single-pass: a struct may reference enums and structs
//! declared earlier in the same module, so nested layouts and hashes are
//! always available when a referencing field is placed. Forward
//! references are unresolved-type errors.

use super::descriptor::PrimitiveKind;
use super::hash::{nested_tag, structural_hash, FieldFingerprint};
use super::model::{EnumDef, SchemaFile};
use super::{Result, SchemaError};
use std::collections::HashMap;

/// Inline slot size of a variable-length field: u64 offset + u64 length.
pub const VAR_SLOT_SIZE: u32 = 16;
/// Alignment of a variable-length field's inline slot.
pub const VAR_SLOT_ALIGN: u8 = 8;
/// Size and alignment of an enum field (u32 repr).
pub const ENUM_SIZE: u32 = 4;
pub const ENUM_ALIGN: u8 = 4;

/// Round `offset` up to the next multiple of `alignment`.
#[must_use]
pub const fn align_to(offset: u32, alignment: u32) -> u32 {
    (offset + alignment - 1) / alignment * alignment
}

/// A field with its resolved kind and computed placement.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    pub name: String,
    pub kind: ResolvedFieldKind,
    pub offset: u32,
    /// Total inline size (array fields: element size times length).
    pub size: u32,
    pub alignment: u8,
    pub primary_key: bool,
    /// Element count for array fields, zero otherwise.
    pub array_len: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedFieldKind {
    Primitive(PrimitiveKind),
    /// Enum field; carries the enum's declared name.
    Enum(String),
    String,
    /// Nested struct field; carries the struct's declared name.
    Struct(String),
}

/// A struct with computed layout, hash, and dispatch index.
#[derive(Debug, Clone)]
pub struct ResolvedType {
    pub name: String,
    pub fields: Vec<ResolvedField>,
    pub fixed_size: u32,
    pub alignment: u8,
    pub has_variable_data: bool,
    pub type_hash: u64,
    /// Dense zero-based position in the module (declaration order).
    pub type_index: u32,
}

/// A fully resolved schema module, ready for code generation.
#[derive(Debug, Clone)]
pub struct ResolvedModule {
    pub name: String,
    pub enums: Vec<EnumDef>,
    pub types: Vec<ResolvedType>,
}

impl ResolvedModule {
    /// Find a resolved type by declared name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ResolvedType> {
        self.types.iter().find(|t| t.name == name)
    }
}

/// Resolve a schema file: validate declarations, compute layouts and
/// structural hashes, and assign dense type indices.
pub fn resolve(file: &SchemaFile) -> Result<ResolvedModule> {
    let mut enums: HashMap<&str, &EnumDef> = HashMap::new();
    for e in &file.enums {
        if enums.insert(e.name.as_str(), e).is_some() {
            return Err(SchemaError::DuplicateType(e.name.clone()));
        }
    }

    let mut resolved: Vec<ResolvedType> = Vec::with_capacity(file.structs.len());
    let mut by_name: HashMap<String, usize> = HashMap::new();
    let mut seen_hashes: HashMap<u64, String> = HashMap::new();

    for (index, def) in file.structs.iter().enumerate() {
        if def.fields.is_empty() {
            return Err(SchemaError::EmptyStruct(def.name.clone()));
        }
        if enums.contains_key(def.name.as_str()) || by_name.contains_key(&def.name) {
            return Err(SchemaError::DuplicateType(def.name.clone()));
        }

        let mut fields: Vec<ResolvedField> = Vec::with_capacity(def.fields.len());
        let mut fingerprints: Vec<FieldFingerprint> = Vec::with_capacity(def.fields.len());
        let mut offset = 0u32;
        let mut max_align = 1u8;
        let mut has_var = false;

        for fd in &def.fields {
            if fields.iter().any(|f| f.name == fd.name) {
                return Err(SchemaError::DuplicateField {
                    type_name: def.name.clone(),
                    field: fd.name.clone(),
                });
            }

            let (kind, elem_size, elem_align, tag) = classify(
                &fd.type_name,
                &enums,
                &by_name,
                &resolved,
                &def.name,
                &fd.name,
            )?;

            if fd.array > 0 && !matches!(kind, ResolvedFieldKind::Primitive(_)) {
                return Err(SchemaError::InvalidArrayElement {
                    type_name: def.name.clone(),
                    field: fd.name.clone(),
                });
            }
            if fd.primary_key
                && !matches!(
                    kind,
                    ResolvedFieldKind::Primitive(_) | ResolvedFieldKind::Enum(_)
                )
            {
                return Err(SchemaError::InvalidPrimaryKey {
                    type_name: def.name.clone(),
                    field: fd.name.clone(),
                });
            }
            if fd.primary_key && fd.array > 0 {
                return Err(SchemaError::InvalidPrimaryKey {
                    type_name: def.name.clone(),
                    field: fd.name.clone(),
                });
            }

            match &kind {
                ResolvedFieldKind::String => has_var = true,
                ResolvedFieldKind::Struct(name) => {
                    // Index was validated by classify().
                    if let Some(nested) = by_name.get(name).and_then(|i| resolved.get(*i)) {
                        has_var |= nested.has_variable_data;
                    }
                }
                _ => {}
            }

            let size = if fd.array > 0 {
                elem_size * fd.array
            } else {
                elem_size
            };

            offset = align_to(offset, u32::from(elem_align));
            max_align = max_align.max(elem_align);

            fields.push(ResolvedField {
                name: fd.name.clone(),
                kind,
                offset,
                size,
                alignment: elem_align,
                primary_key: fd.primary_key,
                array_len: fd.array,
            });
            fingerprints.push(FieldFingerprint {
                name: fd.name.clone(),
                tag,
                primary_key: fd.primary_key,
                array_len: fd.array,
            });

            offset += size;
        }

        let fixed_size = align_to(offset, u32::from(max_align));
        let type_hash = structural_hash(&fingerprints);
        if type_hash == 0 {
            return Err(SchemaError::ReservedHash(def.name.clone()));
        }
        if let Some(first) = seen_hashes.insert(type_hash, def.name.clone()) {
            return Err(SchemaError::DuplicateTypeHash {
                first,
                second: def.name.clone(),
                hash: type_hash,
            });
        }

        by_name.insert(def.name.clone(), resolved.len());
        resolved.push(ResolvedType {
            name: def.name.clone(),
            fields,
            fixed_size,
            alignment: max_align,
            has_variable_data: has_var,
            type_hash,
            type_index: index as u32,
        });
    }

    Ok(ResolvedModule {
        name: file.module.clone(),
        enums: file.enums.clone(),
        types: resolved,
    })
}

/// Classify one field type reference: kind, element size, element
/// alignment, canonical hash tag.
fn classify(
    type_name: &str,
    enums: &HashMap<&str, &EnumDef>,
    by_name: &HashMap<String, usize>,
    resolved: &[ResolvedType],
    owner: &str,
    field: &str,
) -> Result<(ResolvedFieldKind, u32, u8, String)> {
    if let Some(kind) = PrimitiveKind::from_tag(type_name) {
        return Ok((
            ResolvedFieldKind::Primitive(kind),
            kind.size(),
            kind.alignment(),
            kind.tag().to_string(),
        ));
    }
    if type_name == "string" {
        return Ok((
            ResolvedFieldKind::String,
            VAR_SLOT_SIZE,
            VAR_SLOT_ALIGN,
            "string".to_string(),
        ));
    }
    if enums.contains_key(type_name) {
        return Ok((
            ResolvedFieldKind::Enum(type_name.to_string()),
            ENUM_SIZE,
            ENUM_ALIGN,
            "enum(u32)".to_string(),
        ));
    }
    if let Some(nested) = by_name.get(type_name).and_then(|i| resolved.get(*i)) {
        return Ok((
            ResolvedFieldKind::Struct(type_name.to_string()),
            nested.fixed_size,
            nested.alignment,
            nested_tag(nested.type_hash),
        ));
    }
    Err(SchemaError::UnresolvedType {
        type_name: owner.to_string(),
        field: field.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::model::{FieldDef, StructDef};

    fn schema(structs: Vec<StructDef>) -> SchemaFile {
        SchemaFile {
            module: "test".to_string(),
            enums: vec![EnumDef {
                name: "Mode".to_string(),
                values: vec!["A".to_string(), "B".to_string()],
            }],
            structs,
        }
    }

    fn st(name: &str, fields: Vec<FieldDef>) -> StructDef {
        StructDef {
            name: name.to_string(),
            fields,
        }
    }

    #[test]
    fn layout_aligns_fields_naturally() {
        let module = resolve(&schema(vec![st(
            "Sample",
            vec![
                FieldDef::new("flag", "u8"),
                FieldDef::new("count", "u32"),
                FieldDef::new("stamp", "u64"),
            ],
        )]))
        .expect("resolve");

        let ty = module.get("Sample").expect("type");
        assert_eq!(ty.fields[0].offset, 0);
        assert_eq!(ty.fields[1].offset, 4); // aligned past the u8
        assert_eq!(ty.fields[2].offset, 8);
        assert_eq!(ty.fixed_size, 16);
        assert_eq!(ty.alignment, 8);
        assert!(!ty.has_variable_data);
    }

    #[test]
    fn string_reserves_inline_slot() {
        let module = resolve(&schema(vec![st(
            "Labelled",
            vec![
                FieldDef::new("id", "u32").primary_key(),
                FieldDef::new("label", "string"),
            ],
        )]))
        .expect("resolve");

        let ty = module.get("Labelled").expect("type");
        assert_eq!(ty.fields[1].offset, 8); // slot aligned to 8
        assert_eq!(ty.fields[1].size, VAR_SLOT_SIZE);
        assert_eq!(ty.fixed_size, 24);
        assert!(ty.has_variable_data);
    }

    #[test]
    fn array_reserves_inline_elements() {
        let module = resolve(&schema(vec![st(
            "Weights",
            vec![FieldDef::new("w", "f64").array(4)],
        )]))
        .expect("resolve");

        let ty = module.get("Weights").expect("type");
        assert_eq!(ty.fields[0].size, 32);
        assert_eq!(ty.fixed_size, 32);
    }

    #[test]
    fn nested_struct_inlines_fixed_region() {
        let module = resolve(&schema(vec![
            st(
                "Point",
                vec![FieldDef::new("x", "f64"), FieldDef::new("y", "f64")],
            ),
            st(
                "Segment",
                vec![
                    FieldDef::new("id", "u32").primary_key(),
                    FieldDef::new("a", "Point"),
                    FieldDef::new("b", "Point"),
                ],
            ),
        ]))
        .expect("resolve");

        let ty = module.get("Segment").expect("type");
        assert_eq!(ty.fields[1].offset, 8);
        assert_eq!(ty.fields[1].size, 16);
        assert_eq!(ty.fields[2].offset, 24);
        assert_eq!(ty.fixed_size, 40);
    }

    #[test]
    fn variable_data_propagates_through_nesting() {
        let module = resolve(&schema(vec![
            st(
                "Inner",
                vec![FieldDef::new("note", "string")],
            ),
            st(
                "Outer",
                vec![FieldDef::new("id", "u64").primary_key(), FieldDef::new("inner", "Inner")],
            ),
        ]))
        .expect("resolve");

        assert!(module.get("Outer").expect("type").has_variable_data);
    }

    #[test]
    fn forward_reference_is_unresolved() {
        let err = resolve(&schema(vec![
            st("Uses", vec![FieldDef::new("p", "Point")]),
            st(
                "Point",
                vec![FieldDef::new("x", "f64"), FieldDef::new("y", "f64")],
            ),
        ]))
        .expect_err("forward reference must fail");
        assert!(matches!(err, SchemaError::UnresolvedType { .. }));
    }

    #[test]
    fn string_primary_key_rejected() {
        let err = resolve(&schema(vec![st(
            "Bad",
            vec![FieldDef::new("name", "string").primary_key()],
        )]))
        .expect_err("string pk must fail");
        assert!(matches!(err, SchemaError::InvalidPrimaryKey { .. }));
    }

    #[test]
    fn array_of_structs_rejected() {
        let err = resolve(&schema(vec![
            st(
                "Point",
                vec![FieldDef::new("x", "f64"), FieldDef::new("y", "f64")],
            ),
            st("Bad", vec![FieldDef::new("pts", "Point").array(3)]),
        ]))
        .expect_err("struct array must fail");
        assert!(matches!(err, SchemaError::InvalidArrayElement { .. }));
    }

    #[test]
    fn enum_field_is_u32_sized() {
        let module = resolve(&schema(vec![st(
            "Tuned",
            vec![
                FieldDef::new("id", "u32").primary_key(),
                FieldDef::new("mode", "Mode"),
            ],
        )]))
        .expect("resolve");
        let ty = module.get("Tuned").expect("type");
        assert_eq!(ty.fields[1].size, 4);
        assert_eq!(ty.fixed_size, 8);
    }

    #[test]
    fn indices_are_dense_declaration_order() {
        let module = resolve(&schema(vec![
            st("A", vec![FieldDef::new("x", "u8")]),
            st("B", vec![FieldDef::new("y", "u16")]),
        ]))
        .expect("resolve");
        assert_eq!(module.types[0].type_index, 0);
        assert_eq!(module.types[1].type_index, 1);
    }

    #[test]
    fn hash_stable_across_resolves() {
        let file = schema(vec![st(
            "Stable",
            vec![
                FieldDef::new("id", "u32").primary_key(),
                FieldDef::new("label", "string"),
            ],
        )]);
        let a = resolve(&file).expect("resolve a");
        let b = resolve(&file).expect("resolve b");
        assert_eq!(
            a.get("Stable").expect("a").type_hash,
            b.get("Stable").expect("b").type_hash
        );
    }
}
