// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Manifest emission.
//!
//! One JSON manifest per schema module, in the shape
//! `shmex::manifest::ManifestFile`, so runtime verification reads
//! exactly what the generator wrote.

use anyhow::Result;
use shmex::manifest::{ManifestFile, ManifestType};
use shmex::schema::ResolvedModule;

/// Build the manifest record for a resolved module.
#[must_use]
pub fn manifest_for(module: &ResolvedModule) -> ManifestFile {
    ManifestFile {
        module: module.name.clone(),
        types: module
            .types
            .iter()
            .map(|ty| ManifestType {
                name: format!("{}::{}", module.name, ty.name),
                type_hash: format!("{:016x}", ty.type_hash),
                type_index: ty.type_index,
            })
            .collect(),
    }
}

/// Serialize a module's manifest as pretty-printed JSON.
pub fn manifest_json(module: &ResolvedModule) -> Result<String> {
    let mut text = serde_json::to_string_pretty(&manifest_for(module))?;
    text.push('\n');
    Ok(text)
}
