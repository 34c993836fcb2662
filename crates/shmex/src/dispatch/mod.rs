// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Hash-keyed frame dispatch.
//!
//! A [`DispatchTable`] maps structural type hashes to handlers. Frames
//! are verified before any handler sees them, so handlers work on
//! payloads whose variable slots and enum discriminants are known good.
//! Types without a registered handler fall through to the default
//! behavior: if the table carries a config dictionary, the payload is
//! republished into it under the type's primary key.

pub mod agent;

pub use agent::{Agent, AgentStats};

use crate::config::ConfigDictionary;
use crate::frame::{Frame, FrameError};
use crate::proxy::ShmType;
use crate::schema::{self, SchemaModule, TypeEntry, TypeRegistry};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Dispatch-time errors.
#[derive(Debug)]
pub enum DispatchError {
    /// Frame hash matches no registered type.
    UnknownType(u64),

    /// Payload failed the type's verifier.
    CorruptFrame(FrameError),

    /// A handler reported failure.
    Handler(String),

    /// Default republish into the config dictionary failed.
    Republish(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownType(hash) => write!(f, "No type registered for hash {hash:#018x}"),
            Self::CorruptFrame(e) => write!(f, "Corrupt frame payload: {e}"),
            Self::Handler(msg) => write!(f, "Handler failed: {msg}"),
            Self::Republish(msg) => write!(f, "Config republish failed: {msg}"),
        }
    }
}

impl std::error::Error for DispatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CorruptFrame(e) => Some(e),
            _ => None,
        }
    }
}

impl From<FrameError> for DispatchError {
    fn from(e: FrameError) -> Self {
        Self::CorruptFrame(e)
    }
}

/// Result type for dispatch operations.
pub type Result<T> = std::result::Result<T, DispatchError>;

/// A registered frame handler. Receives the verified payload bytes.
pub type Handler = Box<dyn FnMut(&[u8]) -> Result<()> + Send>;

struct DispatchSlot {
    entry: TypeEntry,
    handler: Option<Handler>,
}

/// Hash-keyed dispatch table over a composed type registry.
pub struct DispatchTable {
    slots: Vec<DispatchSlot>,
    by_hash: HashMap<u64, usize>,
    dictionary: Option<Arc<ConfigDictionary>>,
}

impl DispatchTable {
    /// Build a table over the given schema modules. Module order must
    /// match the peer's, since it fixes the global index layout.
    pub fn new(modules: &[&'static SchemaModule]) -> schema::Result<Self> {
        let registry = TypeRegistry::compose(modules)?;
        let mut slots = Vec::with_capacity(registry.len());
        let mut by_hash = HashMap::with_capacity(registry.len());
        for slot in registry.slots() {
            by_hash.insert(slot.entry.type_hash, slot.global_index);
            slots.push(DispatchSlot {
                entry: slot.entry,
                handler: None,
            });
        }
        Ok(Self {
            slots,
            by_hash,
            dictionary: None,
        })
    }

    /// Attach the config dictionary that unhandled typed frames are
    /// republished into.
    #[must_use]
    pub fn with_dictionary(mut self, dictionary: Arc<ConfigDictionary>) -> Self {
        self.dictionary = Some(dictionary);
        self
    }

    /// Register a typed handler. The closure receives a zero-copy proxy
    /// over the already verified payload. Replaces any previous handler
    /// for the type.
    pub fn register<T, F>(&mut self, mut handler: F) -> Result<()>
    where
        T: ShmType,
        F: for<'a> FnMut(T::Proxy<'a>) -> Result<()> + Send + 'static,
    {
        self.register_raw(
            T::TYPE_HASH,
            Box::new(move |payload| handler(T::proxy(payload))),
        )
    }

    /// Register a raw handler for a type hash.
    pub fn register_raw(&mut self, type_hash: u64, handler: Handler) -> Result<()> {
        let index = *self
            .by_hash
            .get(&type_hash)
            .ok_or(DispatchError::UnknownType(type_hash))?;
        self.slots[index].handler = Some(handler);
        Ok(())
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Verify and dispatch one frame.
    pub fn dispatch(&mut self, frame: &Frame) -> Result<()> {
        let index = *self
            .by_hash
            .get(&frame.type_hash)
            .ok_or(DispatchError::UnknownType(frame.type_hash))?;

        // Clone the dictionary handle up front; the handler borrow
        // below is exclusive.
        let dictionary = self.dictionary.clone();
        let slot = &mut self.slots[index];

        (slot.entry.verify)(&frame.payload)?;

        if let Some(handler) = slot.handler.as_mut() {
            return handler(&frame.payload);
        }

        // Default: republish config payloads into the dictionary so a
        // host can push updates without compiling in a handler.
        if let Some(dict) = dictionary {
            let desc = slot.entry.descriptor;
            if desc.primary_key_len() > 0 {
                dict.create_or_update_raw(desc, &frame.payload)
                    .map_err(|e| DispatchError::Republish(e.to_string()))?;
            } else {
                log::debug!(
                    "[DISPATCH] Dropping unhandled keyless frame {}",
                    desc.type_name
                );
            }
        }
        Ok(())
    }
}
