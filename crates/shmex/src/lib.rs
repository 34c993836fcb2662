// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Cross-process object exchange over POSIX shared memory.
//!
//! Processes written against schema-generated types exchange
//! self-describing frames through shared-memory ring channels and share
//! a config dictionary, without sockets or serialization frameworks in
//! the hot path:
//!
//! - [`schema`]: declarative type schemas, byte layouts, and 64-bit
//!   structural hashes that serve as wire identities;
//! - [`frame`]: the frame format and variable-region invariants;
//! - [`view`] and [`proxy`]: bounds-checked accessors and the
//!   [`proxy::ShmType`] contract generated code implements;
//! - [`channel`]: SPSC byte rings with futex-backed blocking;
//! - [`dispatch`]: hash-keyed handler tables and the agent loop;
//! - [`config`]: the shared config dictionary and component client;
//! - [`context`]: host and component wiring for one exchange instance.
//!
//! Code generation lives in the companion `shmex-gen` tool, which
//! consumes the same [`schema`] module, so the generator and the
//! runtime can never disagree on layout or hashing.
//!
//! # Example
//!
//! ```no_run
//! use shmex::context::{ExchangeHost, ExchangeOptions};
//!
//! let host = ExchangeHost::create("bench0", ExchangeOptions::default())?;
//! // Publish generated config values, then pump the agent:
//! // host.publish_config(&cache_config)?;
//! // let mut agent = host.agent(&[bench::schema_module()])?;
//! // agent.run()?;
//! host.close();
//! # Ok::<(), shmex::context::ContextError>(())
//! ```

pub mod channel;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod frame;
#[cfg(feature = "manifest")]
pub mod manifest;
pub mod proxy;
pub mod schema;
pub mod view;

pub use channel::{FrameReader, FrameSender};
pub use config::{ComponentConfig, ConfigDictionary};
pub use context::{ComponentContext, ExchangeHost, ExchangeOptions};
pub use dispatch::{Agent, DispatchTable};
pub use frame::{Frame, SHUTDOWN_TYPE_HASH};
pub use proxy::ShmType;
pub use schema::{SchemaModule, TypeRegistry};
