// passive-reader/src/transport/mock.rs

use std::sync::{Arc, Mutex, MutexGuard};

use crate::transport::traits::{TransferMode, Transport, TransportError, TransportResult};

#[derive(Debug, Default)]
struct MockState {
    written: Vec<String>,
    mode_requests: Vec<TransferMode>,
    disconnects: usize,
    legacy: bool,
    /// Testing hook: errors returned by the next `write` calls, in order
    write_failures: Vec<TransportError>,
    /// Testing hook: errors returned by the next `set_transfer_mode` calls
    mode_failures: Vec<TransportError>,
}

/// Mock transport for tests. It records written frames and mode requests.
///
/// Clones share the same recording, so a test can keep one handle while
/// the reader owns another.
#[derive(Debug, Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock that reports itself as a legacy device.
    pub fn legacy() -> Self {
        let mock = Self::new();
        mock.state().legacy = true;
        mock
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Every frame written so far, terminators included.
    pub fn written(&self) -> Vec<String> {
        self.state().written.clone()
    }

    /// Last frame written, without its terminator.
    pub fn last_frame(&self) -> Option<String> {
        self.state()
            .written
            .last()
            .map(|f| f.trim_end_matches(['\r', '\n']).to_string())
    }

    pub fn write_count(&self) -> usize {
        self.state().written.len()
    }

    pub fn clear(&self) {
        self.state().written.clear();
    }

    pub fn mode_requests(&self) -> Vec<TransferMode> {
        self.state().mode_requests.clone()
    }

    pub fn disconnects(&self) -> usize {
        self.state().disconnects
    }

    /// Make the next `write` fail with `err`.
    pub fn fail_next_write(&self, err: TransportError) {
        self.state().write_failures.push(err);
    }

    /// Make the next `set_transfer_mode` fail with `err`.
    pub fn fail_next_mode_change(&self, err: TransportError) {
        self.state().mode_failures.push(err);
    }
}

impl Transport for MockTransport {
    fn write(&mut self, frame: &str) -> TransportResult<()> {
        let mut state = self.state();
        if !state.write_failures.is_empty() {
            return Err(state.write_failures.remove(0));
        }
        state.written.push(frame.to_string());
        Ok(())
    }

    fn set_transfer_mode(&mut self, mode: TransferMode) -> TransportResult<()> {
        let mut state = self.state();
        if !state.mode_failures.is_empty() {
            return Err(state.mode_failures.remove(0));
        }
        state.mode_requests.push(mode);
        Ok(())
    }

    fn disconnect(&mut self) -> TransportResult<()> {
        self.state().disconnects += 1;
        Ok(())
    }

    fn is_legacy(&self) -> bool {
        self.state().legacy
    }
}
