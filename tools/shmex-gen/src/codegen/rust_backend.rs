// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Rust source emission for one resolved schema module.
//!
//! Per enum: a `#[repr(u32)]` Rust enum with checked conversion. Per
//! struct: an owned value type, a read proxy, a write proxy over the
//! fixed region, static layout descriptors, and a `ShmType` impl wiring
//! them to the runtime. The module tail exports a `SchemaModule` entry
//! table for registry composition.

use shmex::schema::{ResolvedField, ResolvedFieldKind, ResolvedModule, ResolvedType};
use std::fmt::Write;

/// Emit the complete Rust module for a resolved schema.
#[must_use]
pub fn generate_module(module: &ResolvedModule) -> String {
    let mut out = String::with_capacity(16 * 1024);

    let _ = writeln!(
        out,
        "// @generated by shmex-gen from schema module `{}`. Do not edit.",
        module.name
    );
    out.push_str("#![allow(clippy::all)]\n");
    out.push_str("#![allow(dead_code)]\n\n");
    out.push_str("use shmex::frame::{self, VarCheck, VarRegion};\n");
    out.push_str("use shmex::proxy::{self, ShmType};\n");
    out.push_str("use shmex::schema::{\n");
    out.push_str("    FieldLayout, FieldType, PrimitiveKind, SchemaModule, TypeDescriptor, TypeEntry,\n");
    out.push_str("};\n");
    out.push_str("use shmex::view;\n");

    for e in &module.enums {
        emit_enum(&mut out, &e.name, &e.values);
    }

    for ty in &module.types {
        emit_struct(&mut out, module, ty);
    }

    emit_module_table(&mut out, module);
    out
}

/// CamelCase (or mixed) name to SHOUTY_SNAKE for static names.
fn shouty(name: &str) -> String {
    snake(name).to_uppercase()
}

/// CamelCase (or mixed) name to snake_case.
fn snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c.is_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    out
}

fn variant_count(module: &ResolvedModule, enum_name: &str) -> u32 {
    module
        .enums
        .iter()
        .find(|e| e.name == enum_name)
        .map_or(0, |e| e.values.len() as u32)
}

fn emit_enum(out: &mut String, name: &str, values: &[String]) {
    let _ = writeln!(out, "\n/// Schema enum `{name}` (u32 on the wire).");
    out.push_str("#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]\n");
    out.push_str("#[repr(u32)]\n");
    let _ = writeln!(out, "pub enum {name} {{");
    for (i, v) in values.iter().enumerate() {
        if i == 0 {
            out.push_str("    #[default]\n");
        }
        let _ = writeln!(out, "    {v} = {i},");
    }
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl {name} {{");
    let _ = writeln!(
        out,
        "    pub const VARIANT_COUNT: u32 = {};\n",
        values.len()
    );
    out.push_str("    #[must_use]\n");
    out.push_str("    pub fn from_u32(value: u32) -> Option<Self> {\n");
    out.push_str("        match value {\n");
    for (i, v) in values.iter().enumerate() {
        let _ = writeln!(out, "            {i} => Some(Self::{v}),");
    }
    out.push_str("            _ => None,\n");
    out.push_str("        }\n");
    out.push_str("    }\n\n");
    out.push_str("    #[must_use]\n");
    out.push_str("    pub fn as_u32(self) -> u32 {\n");
    out.push_str("        self as u32\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

/// Rust type of a field in the owned value struct.
fn value_type(field: &ResolvedField) -> String {
    match &field.kind {
        ResolvedFieldKind::Primitive(kind) => {
            if field.array_len > 0 {
                format!("[{}; {}]", kind.tag(), field.array_len)
            } else {
                kind.tag().to_string()
            }
        }
        ResolvedFieldKind::Enum(name) | ResolvedFieldKind::Struct(name) => name.clone(),
        ResolvedFieldKind::String => "String".to_string(),
    }
}

fn default_expr(field: &ResolvedField) -> String {
    match &field.kind {
        ResolvedFieldKind::Primitive(kind) => {
            let zero = match kind.tag() {
                "f32" | "f64" => "0.0",
                "bool" => "false",
                _ => "0",
            };
            if field.array_len > 0 {
                format!("[{zero}; {}]", field.array_len)
            } else {
                zero.to_string()
            }
        }
        ResolvedFieldKind::Enum(name) | ResolvedFieldKind::Struct(name) => {
            format!("{name}::default()")
        }
        ResolvedFieldKind::String => "String::new()".to_string(),
    }
}

fn emit_struct(out: &mut String, module: &ResolvedModule, ty: &ResolvedType) {
    let name = &ty.name;
    let upper = shouty(name);
    let lower = snake(name);

    // Owned value type.
    let _ = writeln!(
        out,
        "\n/// Schema struct `{name}` (hash {:#018x}).",
        ty.type_hash
    );
    out.push_str("#[derive(Debug, Clone, PartialEq)]\n");
    let _ = writeln!(out, "pub struct {name} {{");
    for f in &ty.fields {
        let _ = writeln!(out, "    pub {}: {},", f.name, value_type(f));
    }
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl Default for {name} {{");
    out.push_str("    fn default() -> Self {\n");
    out.push_str("        Self {\n");
    for f in &ty.fields {
        let _ = writeln!(out, "            {}: {},", f.name, default_expr(f));
    }
    out.push_str("        }\n");
    out.push_str("    }\n");
    out.push_str("}\n");

    emit_proxy(out, module, ty);
    emit_proxy_mut(out, module, ty);
    emit_descriptor(out, module, ty, &upper);
    emit_helpers(out, module, ty);
    emit_shmtype(out, ty, &upper);

    // Registry verifier, referenced by the module entry table.
    let _ = writeln!(
        out,
        "\nfn verify_{lower}(payload: &[u8]) -> frame::Result<()> {{"
    );
    let _ = writeln!(out, "    <{name} as ShmType>::verify(payload)");
    out.push_str("}\n");
}

fn emit_proxy(out: &mut String, _module: &ResolvedModule, ty: &ResolvedType) {
    let name = &ty.name;
    let _ = writeln!(out, "\n/// Zero-copy read view over a `{name}` payload.");
    out.push_str("#[derive(Clone, Copy)]\n");
    let _ = writeln!(out, "pub struct {name}Proxy<'a> {{");
    out.push_str("    payload: &'a [u8],\n");
    out.push_str("    base: usize,\n");
    out.push_str("    var_base: usize,\n");
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl<'a> {name}Proxy<'a> {{");
    let mut first = true;
    for f in &ty.fields {
        if !first {
            out.push_str("\n");
        }
        first = false;
        let off = f.offset;
        match &f.kind {
            ResolvedFieldKind::Primitive(kind) => {
                if f.array_len > 0 {
                    out.push_str("    #[must_use]\n");
                    let _ = writeln!(
                        out,
                        "    pub fn {}(&self) -> view::ArrayView<'a, {}> {{",
                        f.name,
                        kind.tag()
                    );
                    let _ = writeln!(
                        out,
                        "        view::ArrayView::new(self.payload, self.base + {off}, {})",
                        f.array_len
                    );
                    out.push_str("    }\n");
                } else {
                    out.push_str("    #[must_use]\n");
                    let _ = writeln!(out, "    pub fn {}(&self) -> {} {{", f.name, kind.tag());
                    let _ = writeln!(
                        out,
                        "        view::get_{}(self.payload, self.base + {off})",
                        kind.tag()
                    );
                    out.push_str("    }\n");
                }
            }
            ResolvedFieldKind::Enum(enum_name) => {
                out.push_str("    #[must_use]\n");
                let _ = writeln!(out, "    pub fn {}(&self) -> {enum_name} {{", f.name);
                let _ = writeln!(
                    out,
                    "        {enum_name}::from_u32(view::get_u32(self.payload, self.base + {off}))"
                );
                out.push_str("            .unwrap_or_default()\n");
                out.push_str("    }\n");
            }
            ResolvedFieldKind::String => {
                out.push_str("    #[must_use]\n");
                let _ = writeln!(out, "    pub fn {}(&self) -> &'a str {{", f.name);
                let _ = writeln!(
                    out,
                    "        view::get_str(self.payload, self.base + {off}, self.var_base)"
                );
                out.push_str("    }\n");
            }
            ResolvedFieldKind::Struct(nested) => {
                out.push_str("    #[must_use]\n");
                let _ = writeln!(out, "    pub fn {}(&self) -> {nested}Proxy<'a> {{", f.name);
                let _ = writeln!(out, "        {nested}Proxy {{");
                out.push_str("            payload: self.payload,\n");
                let _ = writeln!(out, "            base: self.base + {off},");
                out.push_str("            var_base: self.var_base,\n");
                out.push_str("        }\n");
                out.push_str("    }\n");
            }
        }
    }
    out.push_str("}\n");
}

fn emit_proxy_mut(out: &mut String, _module: &ResolvedModule, ty: &ResolvedType) {
    let name = &ty.name;
    let _ = writeln!(
        out,
        "\n/// In-place write view over a `{name}` fixed region. Strings\n/// cannot be resized through it."
    );
    let _ = writeln!(out, "pub struct {name}ProxyMut<'a> {{");
    out.push_str("    payload: &'a mut [u8],\n");
    out.push_str("    base: usize,\n");
    out.push_str("}\n\n");

    let _ = writeln!(out, "impl<'a> {name}ProxyMut<'a> {{");
    let mut first = true;
    for f in &ty.fields {
        let off = f.offset;
        match &f.kind {
            ResolvedFieldKind::Primitive(kind) => {
                if !first {
                    out.push_str("\n");
                }
                first = false;
                if f.array_len > 0 {
                    let _ = writeln!(
                        out,
                        "    pub fn set_{}(&mut self, values: &[{}]) {{",
                        f.name,
                        kind.tag()
                    );
                    let _ = writeln!(
                        out,
                        "        view::put_array(self.payload, self.base + {off}, {}, values);",
                        f.array_len
                    );
                    out.push_str("    }\n");
                } else {
                    let _ = writeln!(
                        out,
                        "    pub fn set_{}(&mut self, value: {}) {{",
                        f.name,
                        kind.tag()
                    );
                    let _ = writeln!(
                        out,
                        "        view::put_{}(self.payload, self.base + {off}, value);",
                        kind.tag()
                    );
                    out.push_str("    }\n");
                }
            }
            ResolvedFieldKind::Enum(enum_name) => {
                if !first {
                    out.push_str("\n");
                }
                first = false;
                let _ = writeln!(
                    out,
                    "    pub fn set_{}(&mut self, value: {enum_name}) {{",
                    f.name
                );
                let _ = writeln!(
                    out,
                    "        view::put_u32(self.payload, self.base + {off}, value.as_u32());"
                );
                out.push_str("    }\n");
            }
            ResolvedFieldKind::Struct(nested) => {
                if !first {
                    out.push_str("\n");
                }
                first = false;
                let _ = writeln!(
                    out,
                    "    pub fn {}_mut(&mut self) -> {nested}ProxyMut<'_> {{",
                    f.name
                );
                let _ = writeln!(out, "        {nested}ProxyMut {{");
                out.push_str("            payload: self.payload,\n");
                let _ = writeln!(out, "            base: self.base + {off},");
                out.push_str("        }\n");
                out.push_str("    }\n");
            }
            ResolvedFieldKind::String => {} // no in-place string setter
        }
    }
    out.push_str("}\n");
}

fn field_type_expr(f: &ResolvedField) -> (String, String) {
    match &f.kind {
        ResolvedFieldKind::Primitive(kind) => {
            if f.array_len > 0 {
                (
                    format!("FieldType::Array(PrimitiveKind::{kind:?})"),
                    "None".to_string(),
                )
            } else {
                (
                    format!("FieldType::Primitive(PrimitiveKind::{kind:?})"),
                    "None".to_string(),
                )
            }
        }
        ResolvedFieldKind::Enum(_) => ("FieldType::Enum".to_string(), "None".to_string()),
        ResolvedFieldKind::String => ("FieldType::String".to_string(), "None".to_string()),
        ResolvedFieldKind::Struct(nested) => (
            "FieldType::Struct".to_string(),
            format!("Some(&{}_DESC)", shouty(nested)),
        ),
    }
}

fn emit_descriptor(out: &mut String, module: &ResolvedModule, ty: &ResolvedType, upper: &str) {
    let _ = writeln!(
        out,
        "\nstatic {upper}_FIELDS: [FieldLayout; {}] = [",
        ty.fields.len()
    );
    for f in &ty.fields {
        let (field_type, element_type) = field_type_expr(f);
        out.push_str("    FieldLayout {\n");
        let _ = writeln!(out, "        name: \"{}\",", f.name);
        let _ = writeln!(out, "        offset_bytes: {},", f.offset);
        let _ = writeln!(out, "        field_type: {field_type},");
        let _ = writeln!(out, "        size_bytes: {},", f.size);
        let _ = writeln!(out, "        alignment: {},", f.alignment);
        let _ = writeln!(out, "        is_primary_key: {},", f.primary_key);
        let _ = writeln!(out, "        array_len: {},", f.array_len);
        let _ = writeln!(out, "        element_type: {element_type},");
        out.push_str("    },\n");
    }
    out.push_str("];\n\n");

    let _ = writeln!(out, "static {upper}_DESC: TypeDescriptor = TypeDescriptor {{");
    let _ = writeln!(out, "    type_name: \"{}::{}\",", module.name, ty.name);
    let _ = writeln!(out, "    type_hash: {:#018x},", ty.type_hash);
    let _ = writeln!(out, "    type_index: {},", ty.type_index);
    let _ = writeln!(out, "    fixed_size: {},", ty.fixed_size);
    let _ = writeln!(out, "    alignment: {},", ty.alignment);
    let _ = writeln!(out, "    has_variable_data: {},", ty.has_variable_data);
    let _ = writeln!(out, "    fields: &{upper}_FIELDS,");
    out.push_str("};\n");
}

fn emit_helpers(out: &mut String, module: &ResolvedModule, ty: &ResolvedType) {
    let name = &ty.name;
    let _ = writeln!(out, "\nimpl {name} {{");

    // write_fields: fixed region writes plus in-order variable appends.
    out.push_str(
        "    fn write_fields(&self, buf: &mut Vec<u8>, base: usize, region: &VarRegion) {\n",
    );
    for f in &ty.fields {
        let off = f.offset;
        match &f.kind {
            ResolvedFieldKind::Primitive(kind) => {
                if f.array_len > 0 {
                    let _ = writeln!(
                        out,
                        "        view::put_array(buf, base + {off}, {}, &self.{});",
                        f.array_len, f.name
                    );
                } else {
                    let _ = writeln!(
                        out,
                        "        view::put_{}(buf, base + {off}, self.{});",
                        kind.tag(),
                        f.name
                    );
                }
            }
            ResolvedFieldKind::Enum(_) => {
                let _ = writeln!(
                    out,
                    "        view::put_u32(buf, base + {off}, self.{}.as_u32());",
                    f.name
                );
            }
            ResolvedFieldKind::String => {
                let _ = writeln!(
                    out,
                    "        let (off, len) = region.append(buf, self.{}.as_bytes());",
                    f.name
                );
                let _ = writeln!(out, "        view::put_var_slot(buf, base + {off}, off, len);");
            }
            ResolvedFieldKind::Struct(_) => {
                let _ = writeln!(
                    out,
                    "        self.{}.write_fields(buf, base + {off}, region);",
                    f.name
                );
            }
        }
    }
    let uses_var = ty
        .fields
        .iter()
        .any(|f| matches!(f.kind, ResolvedFieldKind::String | ResolvedFieldKind::Struct(_)));
    if ty.fields.is_empty() {
        out.push_str("        let _ = (buf, base, region);\n");
    } else if !uses_var {
        out.push_str("        let _ = region;\n");
    }
    out.push_str("    }\n\n");

    // verify_fields: enum ranges, slot contiguity, UTF-8, recursion.
    out.push_str(
        "    fn verify_fields(\n        payload: &[u8],\n        base: usize,\n        var_base: usize,\n        check: &mut VarCheck,\n    ) -> frame::Result<()> {\n",
    );
    let mut used_any = false;
    for f in &ty.fields {
        let off = f.offset;
        match &f.kind {
            ResolvedFieldKind::Primitive(_) => {}
            ResolvedFieldKind::Enum(enum_name) => {
                used_any = true;
                let count = variant_count(module, enum_name);
                let _ = writeln!(
                    out,
                    "        proxy::verify_enum(payload, base + {off}, {count}, \"{}\")?;",
                    f.name
                );
            }
            ResolvedFieldKind::String => {
                used_any = true;
                let _ = writeln!(
                    out,
                    "        let (off, len) = view::get_var_slot(payload, base + {off});"
                );
                let _ = writeln!(out, "        check.slot(\"{}\", off, len)?;", f.name);
                let _ = writeln!(
                    out,
                    "        proxy::verify_utf8(payload, base + {off}, var_base, \"{}\")?;",
                    f.name
                );
            }
            ResolvedFieldKind::Struct(nested) => {
                used_any = true;
                let _ = writeln!(
                    out,
                    "        {nested}::verify_fields(payload, base + {off}, var_base, check)?;"
                );
            }
        }
    }
    if !used_any {
        out.push_str("        let _ = (payload, base, var_base, check);\n");
    } else if !uses_var {
        out.push_str("        let _ = (var_base, check);\n");
    }
    out.push_str("        Ok(())\n");
    out.push_str("    }\n\n");

    // read_fields: owned deserialization, shared with nested readers.
    out.push_str(
        "    fn read_fields(payload: &[u8], base: usize, var_base: usize) -> Self {\n",
    );
    if !uses_var {
        out.push_str("        let _ = var_base;\n");
    }
    out.push_str("        Self {\n");
    for f in &ty.fields {
        let off = f.offset;
        match &f.kind {
            ResolvedFieldKind::Primitive(kind) => {
                if f.array_len > 0 {
                    let _ = writeln!(out, "            {}: {{", f.name);
                    let _ = writeln!(
                        out,
                        "                let mut a = [{}; {}];",
                        if matches!(kind.tag(), "f32" | "f64") {
                            "0.0"
                        } else if kind.tag() == "bool" {
                            "false"
                        } else {
                            "0"
                        },
                        f.array_len
                    );
                    let _ = writeln!(
                        out,
                        "                let v = view::ArrayView::<{}>::new(payload, base + {off}, {});",
                        kind.tag(),
                        f.array_len
                    );
                    out.push_str("                for (slot, value) in a.iter_mut().zip(v.iter()) {\n");
                    out.push_str("                    *slot = value;\n");
                    out.push_str("                }\n");
                    out.push_str("                a\n");
                    out.push_str("            },\n");
                } else {
                    let _ = writeln!(
                        out,
                        "            {}: view::get_{}(payload, base + {off}),",
                        f.name,
                        kind.tag()
                    );
                }
            }
            ResolvedFieldKind::Enum(enum_name) => {
                let _ = writeln!(
                    out,
                    "            {}: {enum_name}::from_u32(view::get_u32(payload, base + {off}))",
                    f.name
                );
                out.push_str("                .unwrap_or_default(),\n");
            }
            ResolvedFieldKind::String => {
                let _ = writeln!(
                    out,
                    "            {}: view::get_str(payload, base + {off}, var_base).to_string(),",
                    f.name
                );
            }
            ResolvedFieldKind::Struct(nested) => {
                let _ = writeln!(
                    out,
                    "            {}: {nested}::read_fields(payload, base + {off}, var_base),",
                    f.name
                );
            }
        }
    }
    out.push_str("        }\n");
    out.push_str("    }\n\n");

    // primary_key_matches / eq_proxy: value-to-proxy comparison, used by
    // dictionary slot matching and tests.
    out.push_str("    /// Compare only the primary-key fields against a proxy.\n");
    out.push_str("    #[must_use]\n");
    let _ = writeln!(
        out,
        "    pub fn primary_key_matches(&self, other: &{name}Proxy<'_>) -> bool {{"
    );
    let pk_terms: Vec<String> = ty
        .fields
        .iter()
        .filter(|f| f.primary_key)
        .map(eq_expr)
        .collect();
    if pk_terms.is_empty() {
        out.push_str("        let _ = other;\n");
        out.push_str("        true\n");
    } else {
        let _ = writeln!(out, "        {}", pk_terms.join("\n            && "));
    }
    out.push_str("    }\n\n");

    out.push_str("    /// Full field-by-field comparison against a proxy.\n");
    out.push_str("    #[must_use]\n");
    let _ = writeln!(
        out,
        "    pub fn eq_proxy(&self, other: &{name}Proxy<'_>) -> bool {{"
    );
    let eq_terms: Vec<String> = ty.fields.iter().map(eq_expr).collect();
    let _ = writeln!(out, "        {}", eq_terms.join("\n            && "));
    out.push_str("    }\n");
    out.push_str("}\n");
}

/// Value-to-proxy comparison expression for one field.
fn eq_expr(f: &ResolvedField) -> String {
    let n = &f.name;
    match &f.kind {
        ResolvedFieldKind::Primitive(_) if f.array_len > 0 => {
            format!("self.{n}.iter().copied().eq(other.{n}().iter())")
        }
        ResolvedFieldKind::Primitive(_)
        | ResolvedFieldKind::Enum(_)
        | ResolvedFieldKind::String => format!("self.{n} == other.{n}()"),
        ResolvedFieldKind::Struct(_) => format!("self.{n}.eq_proxy(&other.{n}())"),
    }
}

fn emit_shmtype(out: &mut String, ty: &ResolvedType, upper: &str) {
    let name = &ty.name;
    let _ = writeln!(out, "\nimpl ShmType for {name} {{");
    let _ = writeln!(out, "    const TYPE_HASH: u64 = {:#018x};", ty.type_hash);
    let _ = writeln!(out, "    const FIXED_SIZE: usize = {};", ty.fixed_size);
    let _ = writeln!(out, "    const ALIGNMENT: usize = {};", ty.alignment);
    let _ = writeln!(
        out,
        "    const HAS_VARIABLE_DATA: bool = {};\n",
        ty.has_variable_data
    );
    let _ = writeln!(out, "    type Proxy<'a> = {name}Proxy<'a>;");
    let _ = writeln!(out, "    type ProxyMut<'a> = {name}ProxyMut<'a>;\n");
    out.push_str("    fn descriptor() -> &'static TypeDescriptor {\n");
    let _ = writeln!(out, "        &{upper}_DESC");
    out.push_str("    }\n\n");

    // var_data_size: sum of string byte lengths, recursively.
    out.push_str("    fn var_data_size(&self) -> usize {\n");
    let mut terms: Vec<String> = Vec::new();
    for f in &ty.fields {
        match &f.kind {
            ResolvedFieldKind::String => terms.push(format!("self.{}.len()", f.name)),
            ResolvedFieldKind::Struct(_) => {
                terms.push(format!("self.{}.var_data_size()", f.name));
            }
            _ => {}
        }
    }
    if terms.is_empty() {
        out.push_str("        0\n");
    } else {
        let _ = writeln!(out, "        {}", terms.join(" + "));
    }
    out.push_str("    }\n\n");

    out.push_str("    fn serialize(&self) -> Vec<u8> {\n");
    out.push_str("        let mut buf = vec![0u8; Self::FIXED_SIZE];\n");
    out.push_str("        let region = VarRegion::new(&buf);\n");
    out.push_str("        self.write_fields(&mut buf, 0, &region);\n");
    out.push_str("        buf\n");
    out.push_str("    }\n\n");

    out.push_str("    fn verify(payload: &[u8]) -> frame::Result<()> {\n");
    out.push_str("        proxy::verify_fixed_len(payload, Self::FIXED_SIZE)?;\n");
    out.push_str("        let mut check = VarCheck::new(payload.len() - Self::FIXED_SIZE);\n");
    out.push_str("        Self::verify_fields(payload, 0, Self::FIXED_SIZE, &mut check)?;\n");
    out.push_str("        check.finish()\n");
    out.push_str("    }\n\n");

    let _ = writeln!(out, "    fn proxy(payload: &[u8]) -> {name}Proxy<'_> {{");
    let _ = writeln!(out, "        {name}Proxy {{");
    out.push_str("            payload,\n");
    out.push_str("            base: 0,\n");
    out.push_str("            var_base: Self::FIXED_SIZE,\n");
    out.push_str("        }\n");
    out.push_str("    }\n\n");

    let _ = writeln!(
        out,
        "    fn proxy_mut(payload: &mut [u8]) -> {name}ProxyMut<'_> {{"
    );
    let _ = writeln!(out, "        {name}ProxyMut {{ payload, base: 0 }}");
    out.push_str("    }\n\n");

    out.push_str("    fn from_payload(payload: &[u8]) -> frame::Result<Self> {\n");
    out.push_str("        Self::verify(payload)?;\n");
    out.push_str("        Ok(Self::read_fields(payload, 0, Self::FIXED_SIZE))\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn emit_module_table(out: &mut String, module: &ResolvedModule) {
    let _ = writeln!(
        out,
        "\nstatic MODULE_ENTRIES: [TypeEntry; {}] = [",
        module.types.len()
    );
    for ty in &module.types {
        out.push_str("    TypeEntry {\n");
        let _ = writeln!(out, "        type_hash: {:#018x},", ty.type_hash);
        let _ = writeln!(out, "        type_index: {},", ty.type_index);
        let _ = writeln!(out, "        descriptor: &{}_DESC,", shouty(&ty.name));
        let _ = writeln!(out, "        verify: verify_{},", snake(&ty.name));
        out.push_str("    },\n");
    }
    out.push_str("];\n\n");

    let _ = writeln!(out, "static MODULE: SchemaModule = SchemaModule {{");
    let _ = writeln!(out, "    name: \"{}\",", module.name);
    out.push_str("    entries: &MODULE_ENTRIES,\n");
    out.push_str("};\n\n");

    out.push_str("/// Registry entry table for this schema module.\n");
    out.push_str("#[must_use]\n");
    out.push_str("pub fn schema_module() -> &'static SchemaModule {\n");
    out.push_str("    &MODULE\n");
    out.push_str("}\n");
}
