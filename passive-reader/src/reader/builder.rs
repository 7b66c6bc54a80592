// passive-reader/src/reader/builder.rs

use std::sync::Arc;

use crate::reader::config::ReaderConfig;
use crate::reader::handle::Reader;
use crate::reader::listener::{ReaderListener, ResponseListener, ZhagaListener};
use crate::reader::router::Listeners;
use crate::transport::Transport;
use crate::types::DeviceFamily;
use crate::{Error, Result};

/// Helper to construct a Reader with optional configuration.
#[derive(Default)]
pub struct ReaderBuilder {
    transport: Option<Box<dyn Transport>>,
    listeners: Listeners,
    config: ReaderConfig,
}

impl ReaderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provide the transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn with_reader_listener(mut self, listener: Arc<dyn ReaderListener>) -> Self {
        self.listeners.reader = Some(listener);
        self
    }

    pub fn with_zhaga_listener(mut self, listener: Arc<dyn ZhagaListener>) -> Self {
        self.listeners.zhaga = Some(listener);
        self
    }

    pub fn with_response_listener(mut self, listener: Arc<dyn ResponseListener>) -> Self {
        self.listeners.response = Some(listener);
        self
    }

    pub fn with_config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn odd_length_fix(mut self, enabled: bool) -> Self {
        self.config.odd_length_fix = enabled;
        self
    }

    pub fn legacy_family(mut self, family: DeviceFamily) -> Self {
        self.config.legacy_family = family;
        self
    }

    /// Consume the builder. The reader starts `NotInitialized`; call
    /// [`Reader::on_connected`] once the transport is up.
    pub fn build(self) -> Result<Reader> {
        match self.transport {
            Some(t) => Ok(Reader::new(t, self.listeners, self.config)),
            None => Err(Error::InvalidParameter(
                "a transport is required to build a reader".into(),
            )),
        }
    }
}
