// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Schema file loading and identifier validation.
//!
//! The JSON shape is `shmex::schema::SchemaFile`; this layer adds the
//! checks serde cannot express: module, type, field, and enum-variant
//! names must be valid identifiers in every target language, so they
//! are restricted to `[A-Za-z_][A-Za-z0-9_]*`.

use anyhow::{bail, Context, Result};
use regex::Regex;
use shmex::schema::{resolve, ResolvedModule, SchemaFile};
use std::path::Path;
use std::sync::OnceLock;

fn ident_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier regex"))
}

fn check_ident(kind: &str, name: &str) -> Result<()> {
    if !ident_re().is_match(name) {
        bail!("{kind} name {name:?} is not a valid identifier");
    }
    Ok(())
}

/// Validate every name in a parsed schema.
pub fn validate_idents(schema: &SchemaFile) -> Result<()> {
    check_ident("Module", &schema.module)?;
    for e in &schema.enums {
        check_ident("Enum", &e.name)?;
        if e.values.is_empty() {
            bail!("Enum {} has no variants", e.name);
        }
        for v in &e.values {
            check_ident("Enum variant", v)?;
        }
    }
    for s in &schema.structs {
        check_ident("Struct", &s.name)?;
        for f in &s.fields {
            check_ident("Field", &f.name)?;
        }
    }
    Ok(())
}

/// Parse a schema JSON string and resolve it.
pub fn parse_schema(text: &str) -> Result<ResolvedModule> {
    let schema: SchemaFile = serde_json::from_str(text).context("Malformed schema JSON")?;
    validate_idents(&schema)?;
    resolve(&schema).context("Schema resolution failed")
}

/// Load and resolve a schema file from disk.
pub fn load_schema(path: &Path) -> Result<ResolvedModule> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read schema file {}", path.display()))?;
    parse_schema(&text).with_context(|| format!("In schema file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOOD: &str = r#"{
        "module": "bench",
        "enums": [
            { "name": "EvictionPolicy", "values": ["Lru", "Mru", "Random"] }
        ],
        "structs": [
            {
                "name": "CacheConfig",
                "fields": [
                    { "name": "cache_size", "type": "u32", "primary_key": true },
                    { "name": "eviction_policy", "type": "EvictionPolicy" },
                    { "name": "label", "type": "string" }
                ]
            }
        ]
    }"#;

    #[test]
    fn parses_and_resolves() {
        let module = parse_schema(GOOD).expect("parse");
        assert_eq!(module.name, "bench");
        let ty = module.get("CacheConfig").expect("type");
        assert!(ty.has_variable_data);
        assert_eq!(ty.fields.len(), 3);
    }

    #[test]
    fn rejects_bad_identifier() {
        let bad = GOOD.replace("cache_size", "cache-size");
        let err = parse_schema(&bad).expect_err("must fail");
        assert!(err.to_string().contains("identifier"));
    }

    #[test]
    fn rejects_empty_enum() {
        let bad = GOOD.replace(r#"["Lru", "Mru", "Random"]"#, "[]");
        assert!(parse_schema(&bad).is_err());
    }

    #[test]
    fn rejects_unknown_field_type() {
        let bad = GOOD.replace(r#""type": "u32""#, r#""type": "u33""#);
        assert!(parse_schema(&bad).is_err());
    }
}
