// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Component-side binding to one config entry.
//!
//! A [`ComponentConfig`] pins the dictionary slot of one typed entry at
//! attach time; reads and in-place updates afterwards skip the probe
//! entirely. Only fixed-size types qualify: in-place update of a
//! variable-length payload could change its size, which the arena does
//! not support.

use super::{ConfigError, Result};
use crate::context::ComponentContext;
use crate::proxy::ShmType;
use std::marker::PhantomData;
use std::sync::Arc;

/// Typed handle to one entry in an instance's config dictionary.
pub struct ComponentConfig<T: ShmType> {
    ctx: Arc<ComponentContext>,
    slot: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ShmType> std::fmt::Debug for ComponentConfig<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentConfig")
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

impl<T: ShmType> ComponentConfig<T> {
    /// Bind to the entry whose primary key matches `template`'s. Fails
    /// with [`ConfigError::NotFound`] if the host has not published it.
    pub fn attach(ctx: Arc<ComponentContext>, template: &T) -> Result<Self> {
        if T::HAS_VARIABLE_DATA {
            return Err(ConfigError::VariableSize(T::descriptor().type_name));
        }
        let pk = template.primary_key_bytes();
        if pk.is_empty() {
            return Err(ConfigError::MissingPrimaryKey(T::descriptor().type_name));
        }
        let slot = ctx.dictionary().find_typed::<T>(&pk)?;
        log::debug!(
            "[CONFIG] Component bound {} to slot {slot}",
            T::descriptor().type_name
        );
        Ok(Self {
            ctx,
            slot,
            _marker: PhantomData,
        })
    }

    /// Bind to the entry, publishing `template` first if absent.
    pub fn attach_or_create(ctx: Arc<ComponentContext>, template: &T) -> Result<Self> {
        if T::HAS_VARIABLE_DATA {
            return Err(ConfigError::VariableSize(T::descriptor().type_name));
        }
        ctx.dictionary().create_or_update(template)?;
        Self::attach(ctx, template)
    }

    /// Dictionary slot this handle is pinned to.
    #[must_use]
    pub fn slot(&self) -> u32 {
        self.slot
    }

    /// Read the entry into an owned value.
    pub fn read(&self) -> Result<T> {
        self.ctx
            .dictionary()
            .with_payload(self.slot, |payload| {
                T::verify(payload)?;
                T::from_payload(payload)
            })?
            .map_err(ConfigError::Frame)
    }

    /// Run `f` over a zero-copy proxy of the live entry.
    ///
    /// The proxy aliases shared memory; a concurrent writer may be
    /// observed mid-update.
    pub fn with_proxy<R>(&self, f: impl FnOnce(T::Proxy<'_>) -> R) -> Result<R> {
        self.ctx
            .dictionary()
            .with_payload(self.slot, |payload| f(T::proxy(payload)))
    }

    /// Replace the entry's payload with `value`. The primary key must
    /// stay the one this handle is bound to.
    pub fn update(&self, value: &T) -> Result<()> {
        let payload = value.serialize();
        let stored = self.ctx.dictionary().with_payload(self.slot, |current| {
            crate::proxy::extract_primary_key(T::descriptor(), current)
        })?;
        let given = crate::proxy::extract_primary_key(T::descriptor(), &payload);
        if stored != given {
            // A changed key would strand the entry under the old probe
            // position.
            return Err(ConfigError::KeyChanged);
        }
        self.ctx.dictionary().update_in_place(self.slot, &payload)
    }

    /// Edit the entry's fixed region in place through a mutable proxy.
    pub fn modify<R>(&self, f: impl FnOnce(T::ProxyMut<'_>) -> R) -> Result<R> {
        self.ctx
            .dictionary()
            .with_payload_mut(self.slot, |payload| f(T::proxy_mut(payload)))
    }

    /// Send a typed telemetry frame to the host's agent.
    pub fn send_telemetry<M: ShmType>(&self, value: &M) -> crate::context::Result<()> {
        self.ctx.send_telemetry(value)
    }
}
