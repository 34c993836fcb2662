// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Process-wide type registry.
//!
//! Each generated schema module exports a `&'static SchemaModule` whose
//! entries are densely indexed in declaration order. A process composes
//! the modules it links into one [`TypeRegistry`]; composition assigns
//! each module a base index so the global index space stays dense, and
//! rejects hash collisions across modules.

use super::descriptor::TypeDescriptor;
use super::{Result, SchemaError};
use crate::frame::FrameError;
use std::collections::HashMap;

/// Payload verifier emitted by the code generator: bounds-checks every
/// variable-length slot and enum discriminant before a proxy is handed
/// out.
pub type VerifyFn = fn(&[u8]) -> std::result::Result<(), FrameError>;

/// One generated type's registry entry.
#[derive(Debug, Clone, Copy)]
pub struct TypeEntry {
    pub type_hash: u64,
    /// Dense index inside the owning module.
    pub type_index: u32,
    pub descriptor: &'static TypeDescriptor,
    pub verify: VerifyFn,
}

/// One generated schema module's exported entry table.
#[derive(Debug)]
pub struct SchemaModule {
    pub name: &'static str,
    /// Entries in declaration order; `type_index` must run 0..len.
    pub entries: &'static [TypeEntry],
}

/// A composed slot: module-local entry plus its global dispatch index.
#[derive(Debug, Clone, Copy)]
pub struct RegistrySlot {
    pub entry: TypeEntry,
    /// Global dense index (`module base + type_index`).
    pub global_index: usize,
    pub module: &'static str,
}

/// Composed registry over all schema modules linked into the process.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    slots: Vec<RegistrySlot>,
    by_hash: HashMap<u64, usize>,
}

impl TypeRegistry {
    /// Compose a registry from generated modules. Module order fixes the
    /// global index layout, so every process of one deployment must pass
    /// the same module list.
    pub fn compose(modules: &[&'static SchemaModule]) -> Result<Self> {
        let total: usize = modules.iter().map(|m| m.entries.len()).sum();
        let mut slots = Vec::with_capacity(total);
        let mut by_hash: HashMap<u64, usize> = HashMap::with_capacity(total);
        let mut first_name: HashMap<u64, &'static str> = HashMap::with_capacity(total);

        for module in modules {
            let base = slots.len();
            for (position, entry) in module.entries.iter().enumerate() {
                if entry.type_index as usize != position {
                    return Err(SchemaError::NonDenseIndex {
                        module: module.name.to_string(),
                        expected: position as u32,
                        found: entry.type_index,
                    });
                }
                if entry.type_hash == 0 {
                    return Err(SchemaError::ReservedHash(
                        entry.descriptor.type_name.to_string(),
                    ));
                }
                let global_index = base + position;
                if let Some(first) = first_name.insert(entry.type_hash, entry.descriptor.type_name)
                {
                    return Err(SchemaError::DuplicateTypeHash {
                        first: first.to_string(),
                        second: entry.descriptor.type_name.to_string(),
                        hash: entry.type_hash,
                    });
                }
                by_hash.insert(entry.type_hash, global_index);
                slots.push(RegistrySlot {
                    entry: *entry,
                    global_index,
                    module: module.name,
                });
            }
        }

        Ok(Self { slots, by_hash })
    }

    /// Look up a type by its structural hash.
    #[must_use]
    pub fn lookup_hash(&self, type_hash: u64) -> Option<&RegistrySlot> {
        self.by_hash.get(&type_hash).map(|i| &self.slots[*i])
    }

    /// Look up a type by its global dispatch index.
    #[must_use]
    pub fn lookup_slot(&self, global_index: usize) -> Option<&RegistrySlot> {
        self.slots.get(global_index)
    }

    /// All composed slots in global index order.
    #[must_use]
    pub fn slots(&self) -> &[RegistrySlot] {
        &self.slots
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
