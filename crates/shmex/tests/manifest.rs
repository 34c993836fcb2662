// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Manifest verification against a compiled registry.

#![cfg(feature = "manifest")]

mod support;

use shmex::manifest::{load_manifests, verify_registry, ManifestError, ManifestFile, ManifestType};
use shmex::schema::{SchemaError, TypeRegistry};

fn registry() -> TypeRegistry {
    TypeRegistry::compose(&[support::schema_module()]).expect("compose")
}

/// A manifest mirroring the compiled registry, as the generator would
/// have written it.
fn matching_manifest() -> ManifestFile {
    let registry = registry();
    ManifestFile {
        module: "bench".to_string(),
        types: registry
            .slots()
            .iter()
            .map(|slot| ManifestType {
                name: slot.entry.descriptor.type_name.to_string(),
                type_hash: format!("{:016x}", slot.entry.type_hash),
                type_index: slot.entry.type_index,
            })
            .collect(),
    }
}

#[test]
fn matching_manifest_verifies() {
    verify_registry(&registry(), &[matching_manifest()]).expect("verify");
}

#[test]
fn empty_manifest_list_verifies() {
    verify_registry(&registry(), &[]).expect("verify");
}

#[test]
fn tampered_hash_reported_as_drift() {
    let mut manifest = matching_manifest();
    manifest.types[1].type_hash = format!("{:016x}", 0xdead_beef_dead_beefu64);

    let err = verify_registry(&registry(), &[manifest]).expect_err("drift must fail");
    assert!(matches!(
        err,
        ManifestError::Schema(SchemaError::HashMismatch { .. })
    ));
}

#[test]
fn unknown_type_reported() {
    let mut manifest = matching_manifest();
    manifest.types.push(ManifestType {
        name: "bench::Missing".to_string(),
        type_hash: "00000000000000aa".to_string(),
        type_index: 9,
    });

    let err = verify_registry(&registry(), &[manifest]).expect_err("unknown must fail");
    assert!(matches!(
        err,
        ManifestError::Schema(SchemaError::UnknownManifestType(_))
    ));
}

#[test]
fn index_mismatch_reported() {
    let mut manifest = matching_manifest();
    manifest.types[0].type_index += 1;

    let err = verify_registry(&registry(), &[manifest]).expect_err("index must fail");
    assert!(matches!(
        err,
        ManifestError::Schema(SchemaError::IndexMismatch { .. })
    ));
}

#[test]
fn malformed_hash_reported() {
    let mut manifest = matching_manifest();
    manifest.types[0].type_hash = "not-hex".to_string();

    let err = verify_registry(&registry(), &[manifest]).expect_err("hex must fail");
    assert!(matches!(
        err,
        ManifestError::Schema(SchemaError::MalformedManifestHash { .. })
    ));
}

#[test]
fn manifests_load_from_directory() {
    let manifest = matching_manifest();
    let json = serde_json::to_string_pretty(&manifest).expect("json");

    let dir = tempfile::tempdir().expect("tempdir");
    std::fs::write(dir.path().join("bench.manifest.json"), json).expect("write");
    std::fs::write(dir.path().join("notes.txt"), "ignored").expect("write");

    let loaded = load_manifests(&[dir.path().to_path_buf()]).expect("load");
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].module, "bench");
    assert_eq!(loaded[0].types.len(), 4);

    verify_registry(&registry(), &loaded).expect("verify loaded");
}

#[test]
fn unreadable_manifest_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.json");

    let err = load_manifests(&[missing]).expect_err("missing file must fail");
    assert!(matches!(err, ManifestError::Io(_, _)));
}
