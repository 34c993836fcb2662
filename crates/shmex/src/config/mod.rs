// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Shared config dictionary and the component-side client.
//!
//! The dictionary is an open-addressing hash table in shared memory
//! keyed by `(type_hash, primary key bytes)`. The host and the agent
//! publish config payloads into it; component processes bind a
//! [`component::ComponentConfig`] to one entry and read it through
//! zero-copy proxies.

pub mod component;
pub mod dictionary;

pub use component::ComponentConfig;
pub use dictionary::{ConfigDictionary, MAX_KEY_BYTES};

use crate::channel::ChannelError;
use crate::frame::FrameError;
use std::fmt;

/// Config dictionary errors.
#[derive(Debug)]
pub enum ConfigError {
    /// No free slot within the load bound.
    DictionaryFull,

    /// Blob arena has no room for another payload.
    ArenaExhausted { need: usize, free: usize },

    /// Packed key exceeds the inline key capacity.
    KeyTooLong { len: usize },

    /// Type carries variable-length data; only fixed-size types can be
    /// stored and updated in place.
    VariableSize(&'static str),

    /// Payload length differs from the stored entry's.
    SizeMismatch { stored: usize, given: usize },

    /// Type declares no primary key, so it has no dictionary identity.
    MissingPrimaryKey(&'static str),

    /// No entry under the given key.
    NotFound,

    /// Stored entry's type hash differs from the caller's type.
    TypeMismatch { stored: u64, given: u64 },

    /// In-place update attempted with a different primary key than the
    /// bound entry's.
    KeyChanged,

    /// Bad magic, version, or internally inconsistent header.
    Corruption(String),

    /// Underlying segment failure.
    Segment(ChannelError),

    /// Stored payload failed verification.
    Frame(FrameError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DictionaryFull => write!(f, "Config dictionary is full"),
            Self::ArenaExhausted { need, free } => {
                write!(f, "Config arena exhausted: need {need} bytes, {free} free")
            }
            Self::KeyTooLong { len } => {
                write!(f, "Packed config key of {len} bytes exceeds {MAX_KEY_BYTES}")
            }
            Self::VariableSize(name) => {
                write!(f, "Type {name} has variable-length data and cannot be a config entry")
            }
            Self::SizeMismatch { stored, given } => {
                write!(f, "Payload size {given} does not match stored entry size {stored}")
            }
            Self::MissingPrimaryKey(name) => {
                write!(f, "Type {name} declares no primary key")
            }
            Self::NotFound => write!(f, "Config entry not found"),
            Self::TypeMismatch { stored, given } => write!(
                f,
                "Config entry type mismatch: stored {stored:#018x}, given {given:#018x}"
            ),
            Self::KeyChanged => {
                write!(f, "Update would change the entry's primary key")
            }
            Self::Corruption(what) => write!(f, "Config dictionary corruption: {what}"),
            Self::Segment(e) => write!(f, "Config segment error: {e}"),
            Self::Frame(e) => write!(f, "Config payload error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Segment(e) => Some(e),
            Self::Frame(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ChannelError> for ConfigError {
    fn from(e: ChannelError) -> Self {
        Self::Segment(e)
    }
}

impl From<FrameError> for ConfigError {
    fn from(e: FrameError) -> Self {
        Self::Frame(e)
    }
}

/// Result type for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
