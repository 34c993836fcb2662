// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 shmex contributors

//! Exchange instance contexts.
//!
//! One exchange instance owns three shared segments:
//!
//! - `/shmex_{instance}_global`: the config dictionary;
//! - `/shmex_{instance}_control`: host-to-component frame channel;
//! - `/shmex_{instance}_feedback`: component-to-agent frame channel.
//!
//! The host process creates all three through [`ExchangeHost`];
//! component processes attach with [`ComponentContext`]. The host's
//! agent consumes the feedback channel, so host and agent typically run
//! in the same process on different threads.

use crate::channel::{
    cleanup_instance_segments, ChannelError, FrameReader, FrameSender, DEFAULT_CHANNEL_CAPACITY,
};
use crate::config::{ConfigDictionary, ConfigError};
use crate::dispatch::{Agent, DispatchTable};
use crate::frame::Frame;
use crate::proxy::ShmType;
use crate::schema::{SchemaError, SchemaModule};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Context-level errors.
#[derive(Debug)]
pub enum ContextError {
    /// Instance name violates the segment naming rules.
    InvalidInstance(String),

    /// Channel or segment failure.
    Channel(ChannelError),

    /// Config dictionary failure.
    Config(ConfigError),

    /// Registry composition failure while building the agent.
    Schema(SchemaError),

    /// The host's agent was already constructed.
    AgentAlreadyTaken,
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidInstance(name) => write!(f, "Invalid instance name: {name:?}"),
            Self::Channel(e) => write!(f, "Channel error: {e}"),
            Self::Config(e) => write!(f, "Config error: {e}"),
            Self::Schema(e) => write!(f, "Schema error: {e}"),
            Self::AgentAlreadyTaken => write!(f, "Agent was already taken for this host"),
        }
    }
}

impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Channel(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Schema(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ChannelError> for ContextError {
    fn from(e: ChannelError) -> Self {
        Self::Channel(e)
    }
}

impl From<ConfigError> for ContextError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<SchemaError> for ContextError {
    fn from(e: SchemaError) -> Self {
        Self::Schema(e)
    }
}

/// Result type for context operations.
pub type Result<T> = std::result::Result<T, ContextError>;

/// Sizing and timing knobs for one exchange instance.
#[derive(Debug, Clone)]
pub struct ExchangeOptions {
    /// Ring capacity of each channel, in bytes. Must be a power of two.
    pub channel_capacity: usize,
    /// Config dictionary slot count.
    pub dictionary_slots: usize,
    /// Config blob arena size in bytes.
    pub arena_bytes: usize,
    /// Timeout applied to blocking sends from either side.
    pub send_timeout: Duration,
}

impl Default for ExchangeOptions {
    fn default() -> Self {
        Self {
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            dictionary_slots: 256,
            arena_bytes: 64 * 1024,
            send_timeout: Duration::from_secs(1),
        }
    }
}

fn validate_instance(instance: &str) -> Result<()> {
    let ok = !instance.is_empty()
        && instance.len() <= 64
        && instance
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if ok {
        Ok(())
    } else {
        Err(ContextError::InvalidInstance(instance.to_string()))
    }
}

/// Segment name of an instance's config dictionary.
#[must_use]
pub fn global_segment(instance: &str) -> String {
    format!("/shmex_{instance}_global")
}

/// Segment name of an instance's host-to-component channel.
#[must_use]
pub fn control_segment(instance: &str) -> String {
    format!("/shmex_{instance}_control")
}

/// Segment name of an instance's component-to-agent channel.
#[must_use]
pub fn feedback_segment(instance: &str) -> String {
    format!("/shmex_{instance}_feedback")
}

/// Host side of an exchange instance. Creates and owns the segments.
#[derive(Debug)]
pub struct ExchangeHost {
    instance: String,
    options: ExchangeOptions,
    dictionary: Arc<ConfigDictionary>,
    control: Mutex<FrameSender>,
    feedback: Mutex<Option<FrameReader>>,
}

impl ExchangeHost {
    /// Create the instance's segments. Fails if any already exist; run
    /// cleanup first after a crashed host.
    pub fn create(instance: &str, options: ExchangeOptions) -> Result<Self> {
        validate_instance(instance)?;
        let dictionary = ConfigDictionary::create(
            &global_segment(instance),
            options.dictionary_slots,
            options.arena_bytes,
        )?;
        let control = FrameSender::create(&control_segment(instance), options.channel_capacity)?;
        let feedback = FrameReader::create(&feedback_segment(instance), options.channel_capacity)?;
        log::info!("[HOST] Exchange instance {instance} created");
        Ok(Self {
            instance: instance.to_string(),
            options,
            dictionary: Arc::new(dictionary),
            control: Mutex::new(control),
            feedback: Mutex::new(Some(feedback)),
        })
    }

    #[must_use]
    pub fn instance(&self) -> &str {
        &self.instance
    }

    #[must_use]
    pub fn dictionary(&self) -> &Arc<ConfigDictionary> {
        &self.dictionary
    }

    /// Build the agent over the feedback channel. Can only be taken
    /// once; the channel has a single receiver.
    pub fn agent(&self, modules: &[&'static SchemaModule]) -> Result<Agent> {
        let reader = self
            .feedback
            .lock()
            .take()
            .ok_or(ContextError::AgentAlreadyTaken)?;
        let table =
            DispatchTable::new(modules)?.with_dictionary(Arc::clone(&self.dictionary));
        Ok(Agent::new(table, reader))
    }

    /// Publish a typed value into the config dictionary.
    pub fn publish_config<T: ShmType>(&self, value: &T) -> Result<u32> {
        Ok(self.dictionary.create_or_update(value)?)
    }

    /// Send a typed frame down the control channel.
    pub fn send_control<T: ShmType>(&self, value: &T) -> Result<()> {
        self.control
            .lock()
            .send_value(value, self.options.send_timeout)?;
        Ok(())
    }

    /// Send the shutdown sentinel down the control channel.
    pub fn send_control_shutdown(&self) -> Result<()> {
        self.control.lock().send_shutdown(self.options.send_timeout)?;
        Ok(())
    }

    /// Unlink every segment of this instance. Mapped peers keep their
    /// views until they drop them.
    pub fn close(&self) {
        let removed = cleanup_instance_segments(&self.instance);
        log::info!(
            "[HOST] Exchange instance {} closed, {removed} segments unlinked",
            self.instance
        );
    }
}

/// Component side of an exchange instance. Attaches to segments the
/// host created.
#[derive(Debug)]
pub struct ComponentContext {
    instance: String,
    dictionary: Arc<ConfigDictionary>,
    feedback: Mutex<FrameSender>,
    control: Mutex<FrameReader>,
    send_timeout: Duration,
}

impl ComponentContext {
    /// Attach to a running exchange instance.
    pub fn attach(instance: &str) -> Result<Arc<Self>> {
        Self::attach_with_timeout(instance, Duration::from_secs(1))
    }

    /// Attach with an explicit blocking-send timeout.
    pub fn attach_with_timeout(instance: &str, send_timeout: Duration) -> Result<Arc<Self>> {
        validate_instance(instance)?;
        let dictionary = ConfigDictionary::open(&global_segment(instance))?;
        let feedback = FrameSender::attach(&feedback_segment(instance))?;
        let control = FrameReader::attach(&control_segment(instance))?;
        log::info!("[COMPONENT] Attached to exchange instance {instance}");
        Ok(Arc::new(Self {
            instance: instance.to_string(),
            dictionary: Arc::new(dictionary),
            feedback: Mutex::new(feedback),
            control: Mutex::new(control),
            send_timeout,
        }))
    }

    #[must_use]
    pub fn instance(&self) -> &str {
        &self.instance
    }

    #[must_use]
    pub fn dictionary(&self) -> &Arc<ConfigDictionary> {
        &self.dictionary
    }

    /// Send a typed frame up the feedback channel to the agent.
    pub fn send_telemetry<T: ShmType>(&self, value: &T) -> Result<()> {
        self.feedback.lock().send_value(value, self.send_timeout)?;
        Ok(())
    }

    /// Ask the agent to stop.
    pub fn send_shutdown(&self) -> Result<()> {
        self.feedback.lock().send_shutdown(self.send_timeout)?;
        Ok(())
    }

    /// Receive one frame from the control channel.
    pub fn recv_control(&self, timeout: Duration) -> Result<Frame> {
        Ok(self.control.lock().receive(timeout)?)
    }
}
