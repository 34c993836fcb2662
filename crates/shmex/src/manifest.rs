// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Schema manifest loading and verification.
//!
//! Alongside generated code, the generator writes one JSON manifest per
//! schema module recording every type's name, structural hash, and
//! index. At startup a process can load the manifests named by the
//! `SHMEX_SCHEMA_PATH` environment variable (a `:`-separated directory
//! list) and check them against its compiled registry, catching the
//! classic deployment failure of processes built from different schema
//! revisions before any frame is exchanged.

use crate::schema::{SchemaError, TypeRegistry};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming manifest directories, `:`-separated.
pub const SCHEMA_PATH_ENV: &str = "SHMEX_SCHEMA_PATH";

/// One type's manifest record. The hash is serialized as a 16-digit hex
/// string so manifests stay readable and language-neutral.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestType {
    pub name: String,
    pub type_hash: String,
    pub type_index: u32,
}

/// One schema module's manifest file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestFile {
    pub module: String,
    pub types: Vec<ManifestType>,
}

/// Manifest loading and verification errors.
#[derive(Debug)]
pub enum ManifestError {
    Io(PathBuf, io::Error),
    Parse(PathBuf, serde_json::Error),
    Schema(SchemaError),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "Cannot read manifest {}: {e}", path.display()),
            Self::Parse(path, e) => write!(f, "Cannot parse manifest {}: {e}", path.display()),
            Self::Schema(e) => write!(f, "Manifest verification failed: {e}"),
        }
    }
}

impl std::error::Error for ManifestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(_, e) => Some(e),
            Self::Parse(_, e) => Some(e),
            Self::Schema(e) => Some(e),
        }
    }
}

impl From<SchemaError> for ManifestError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;

/// Load every `*.json` manifest found directly in the given
/// directories. A path that is itself a file is loaded as one manifest.
pub fn load_manifests(paths: &[PathBuf]) -> Result<Vec<ManifestFile>> {
    let mut manifests = Vec::new();
    for path in paths {
        if path.is_dir() {
            let entries =
                std::fs::read_dir(path).map_err(|e| ManifestError::Io(path.clone(), e))?;
            let mut files: Vec<PathBuf> = entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .collect();
            // Deterministic load order regardless of directory order.
            files.sort();
            for file in files {
                manifests.push(load_one(&file)?);
            }
        } else {
            manifests.push(load_one(path)?);
        }
    }
    Ok(manifests)
}

fn load_one(path: &Path) -> Result<ManifestFile> {
    let text =
        std::fs::read_to_string(path).map_err(|e| ManifestError::Io(path.to_path_buf(), e))?;
    serde_json::from_str(&text).map_err(|e| ManifestError::Parse(path.to_path_buf(), e))
}

/// Load manifests from the directories named by `SHMEX_SCHEMA_PATH`.
/// Returns an empty list when the variable is unset; verification is
/// opt-in per deployment.
pub fn load_manifests_from_env() -> Result<Vec<ManifestFile>> {
    match std::env::var(SCHEMA_PATH_ENV) {
        Ok(value) => {
            let paths: Vec<PathBuf> = value
                .split(':')
                .filter(|s| !s.is_empty())
                .map(PathBuf::from)
                .collect();
            load_manifests(&paths)
        }
        Err(_) => Ok(Vec::new()),
    }
}

/// Check manifests against the compiled registry: every manifest type
/// must exist with the same hash and module-local index.
pub fn verify_registry(registry: &TypeRegistry, manifests: &[ManifestFile]) -> Result<()> {
    for manifest in manifests {
        for ty in &manifest.types {
            let hash = u64::from_str_radix(&ty.type_hash, 16).map_err(|_| {
                SchemaError::MalformedManifestHash {
                    type_name: ty.name.clone(),
                    value: ty.type_hash.clone(),
                }
            })?;
            let slot = registry
                .lookup_hash(hash)
                .ok_or_else(|| match registry.slots().iter().find(|s| {
                    s.entry.descriptor.type_name == ty.name
                }) {
                    // Name exists but under a different hash: schema drift.
                    Some(slot) => SchemaError::HashMismatch {
                        type_name: ty.name.clone(),
                        manifest: hash,
                        compiled: slot.entry.type_hash,
                    },
                    None => SchemaError::UnknownManifestType(ty.name.clone()),
                })?;
            if slot.entry.descriptor.type_name != ty.name {
                return Err(SchemaError::UnknownManifestType(ty.name.clone()).into());
            }
            if slot.entry.type_index != ty.type_index {
                return Err(SchemaError::IndexMismatch {
                    type_name: ty.name.clone(),
                    manifest: ty.type_index,
                    compiled: slot.entry.type_index,
                }
                .into());
            }
        }
        log::debug!(
            "[MANIFEST] Module {} verified ({} types)",
            manifest.module,
            manifest.types.len()
        );
    }
    Ok(())
}

/// Convenience: load from the environment and verify in one step.
pub fn verify_registry_from_env(registry: &TypeRegistry) -> Result<()> {
    let manifests = load_manifests_from_env()?;
    verify_registry(registry, &manifests)
}
