// passive-reader/src/reader/handle.rs

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use log::{debug, error, info, trace, warn};

use crate::constants::LINE_TERMINATOR;
use crate::protocol::commands::{AnswerKind, Command, CommandCode};
use crate::protocol::frame::{classify_line, split_lines, Answer, Event, LineKind};
use crate::protocol::inventory::{decode_line, InventoryContext};
use crate::protocol::responses::{reader as reader_payload, Response};
use crate::protocol::sequence::SequenceCounter;
use crate::transport::{TransferMode, Transport, TransportError, TransportResult};
use crate::types::{DeviceFamily, ExtendedTagId, InventoryFormat, InventoryMode, Staged};
use crate::utils::hex_to_bytes;
use crate::{Error, Result};

use super::config::ReaderConfig;
use super::link::{Link, LinkStatus, ModeSubstatus, PendingCommand};
use super::router::{Delivery, Listeners};

/// Mutable state of one connection. Only ever touched under the reader's
/// lock.
struct Session {
    link: Link,
    /// Locked after the session when both are needed
    transport: Arc<Mutex<Box<dyn Transport>>>,
    family: DeviceFamily,
    inventory_format: Staged<InventoryFormat>,
    inventory_mode: Staged<InventoryMode>,
    /// Frame of a legacy command, sent once command mode is active
    deferred: Option<String>,
    /// Outcome of a legacy command, delivered once stream mode is back
    parked: Option<Delivery>,
}

/// Connection to one reader.
///
/// Commands are issued through the methods of this type (and the free
/// functions of [`crate::tag`]); each returns synchronously once the
/// frame is handed to the transport, and the answer is reported later
/// through the registered listeners. Transport completions are fed in
/// through the `on_*` methods.
///
/// At most one command is in flight. Listener callbacks run after the
/// internal lock is released and after the status went back to `Ready`,
/// so a callback may issue the next command.
pub struct Reader {
    session: Mutex<Session>,
    listeners: Listeners,
    config: ReaderConfig,
}

impl std::fmt::Debug for Reader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reader")
            .field("status", &self.status())
            .field("listeners", &self.listeners)
            .field("config", &self.config)
            .finish()
    }
}

impl Reader {
    pub(crate) fn new(
        transport: Box<dyn Transport>,
        listeners: Listeners,
        config: ReaderConfig,
    ) -> Self {
        let family = config.legacy_family;
        Self {
            session: Mutex::new(Session {
                link: Link::new(),
                transport: Arc::new(Mutex::new(transport)),
                family,
                inventory_format: Staged::new(InventoryFormat::default()),
                inventory_mode: Staged::new(InventoryMode::default()),
                deferred: None,
                parked: None,
            }),
            listeners,
            config,
        }
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn status(&self) -> LinkStatus {
        self.session().link.status().clone()
    }

    pub fn mode(&self) -> ModeSubstatus {
        self.session().link.mode()
    }

    pub fn device_family(&self) -> DeviceFamily {
        self.session().family
    }

    /// Inventory format confirmed by the device.
    pub fn inventory_format(&self) -> InventoryFormat {
        self.session().inventory_format.current()
    }

    pub fn inventory_mode(&self) -> InventoryMode {
        self.session().inventory_mode.current()
    }

    /// How long the host should wait before calling [`Reader::on_timeout`]
    /// for the identification answer or the command in flight, if any.
    pub fn pending_timeout(&self) -> Option<Duration> {
        let s = self.session();
        if *s.link.status() == LinkStatus::Uninitialized {
            return Some(self.config.command_timeout);
        }
        match s.link.mode() {
            ModeSubstatus::SettingCommandMode | ModeSubstatus::SettingStreamMode => {
                Some(self.config.mode_change_timeout)
            }
            _ => s.link.pending().map(|p| self.config.timeout_for(p.code)),
        }
    }

    /// Issue a reader-level or device-feature command.
    pub fn send(&self, command: Command) -> Result<()> {
        let code = command.code();
        self.submit(
            code,
            None,
            |seq| command.encode(seq),
            |s| s.stage(&command),
        )
    }

    /// Issue a tag memory operation built by `build`.
    pub(crate) fn send_tag_operation<F>(
        &self,
        code: CommandCode,
        tag: ExtendedTagId,
        build: F,
    ) -> Result<()>
    where
        F: FnOnce(&mut SequenceCounter) -> Result<String>,
    {
        self.submit(code, Some(tag), build, |_| {})
    }

    fn submit<F, S>(
        &self,
        code: CommandCode,
        tag: Option<ExtendedTagId>,
        build: F,
        stage: S,
    ) -> Result<()>
    where
        F: FnOnce(&mut SequenceCounter) -> Result<String>,
        S: FnOnce(&mut Session),
    {
        let result = self.session().start(code, tag.clone(), build, stage);
        if let Err(e) = &result {
            debug!("{} rejected: {}", code, e);
            self.listeners
                .deliver(Delivery::failed(code, tag, e.clone()));
        }
        result
    }

    /// Transport connected (and, for non-legacy devices, discovered its
    /// services). Starts identification.
    pub fn on_connected(&self) {
        let deliveries = {
            let mut s = self.session();
            s.deferred = None;
            s.parked = None;
            s.inventory_format = Staged::new(InventoryFormat::default());
            s.inventory_mode = Staged::new(InventoryMode::default());
            if s.transport().is_legacy() {
                s.link.connected(true);
                s.family = self.config.legacy_family;
                info!("legacy reader connected, assuming {} family", s.family);
                vec![Delivery::ConnectionSuccess]
            } else {
                s.link.connected(false);
                match s.identify_request() {
                    Ok(()) => {
                        info!("reader connected, identifying");
                        Vec::new()
                    }
                    Err(e) => {
                        error!("identification request failed: {}", e);
                        s.link.fail();
                        vec![Delivery::ConnectionFailure(e.code())]
                    }
                }
            }
        };
        self.listeners.deliver_all(deliveries);
    }

    pub fn on_connect_failed(&self, error: TransportError) {
        self.on_transport_error(error);
    }

    pub fn on_disconnected(&self) {
        {
            let mut s = self.session();
            info!("reader disconnected while {}", s.link.status());
            s.reset();
        }
        self.listeners.deliver(Delivery::Disconnection);
    }

    /// Tear the link down. The status is reset to `NotInitialized`
    /// whatever the transport answers.
    ///
    /// The session lock is released before the transport is asked to
    /// disconnect, so the transport may report `on_disconnected()` from
    /// inside `Transport::disconnect`.
    pub fn disconnect(&self) -> Result<()> {
        let transport = {
            let mut s = self.session();
            s.reset();
            Arc::clone(&s.transport)
        };
        let result = transport
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .disconnect();
        result?;
        Ok(())
    }

    /// A notification from the data channel: answers, tunnel answers,
    /// events and inventory lines, possibly several per call.
    pub fn on_data_received(&self, text: &str) {
        let deliveries = self.session().receive(text, &self.config);
        self.listeners.deliver_all(deliveries);
    }

    /// A notification from the event channel.
    pub fn on_event_received(&self, text: &str) {
        let deliveries = {
            let s = self.session();
            match s.link.status() {
                LinkStatus::Ready | LinkStatus::PendingCommand(_) => split_lines(text)
                    .filter_map(|line| {
                        let body = match classify_line(line) {
                            LineKind::Event(body) => body,
                            _ => line,
                        };
                        let event = Event::decode(body);
                        if event.is_none() {
                            warn!("dropping malformed event '{}'", line);
                        }
                        event.map(Delivery::Event)
                    })
                    .collect(),
                status => {
                    trace!("ignoring event while {}", status);
                    Vec::new()
                }
            }
        };
        self.listeners.deliver_all(deliveries);
    }

    pub fn on_transport_error(&self, error: TransportError) {
        let deliveries = self.session().transport_error(error);
        self.listeners.deliver_all(deliveries);
    }

    /// The transport finished switching to `mode`.
    pub fn on_transfer_mode_changed(&self, mode: TransferMode) {
        let deliveries = self.session().mode_changed(mode);
        self.listeners.deliver_all(deliveries);
    }

    /// The host timer for the command in flight (or for identification)
    /// expired.
    pub fn on_timeout(&self) {
        let deliveries = self.session().timeout();
        self.listeners.deliver_all(deliveries);
    }
}

impl Session {
    fn transport(&self) -> MutexGuard<'_, Box<dyn Transport>> {
        self.transport.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn write_frame(&mut self, frame: &str) -> TransportResult<()> {
        debug!("-> {}", frame);
        let mut line = String::with_capacity(frame.len() + LINE_TERMINATOR.len());
        line.push_str(frame);
        line.push_str(LINE_TERMINATOR);
        self.transport().write(&line)
    }

    fn identify_request(&mut self) -> Result<()> {
        let frame = Command::GetStandard.encode(self.link.sequence_mut())?;
        self.write_frame(&frame)?;
        Ok(())
    }

    fn reset(&mut self) {
        self.deferred = None;
        self.parked = None;
        self.inventory_format.discard();
        self.inventory_mode.discard();
        self.link.reset();
    }

    fn inventory_context(&self) -> InventoryContext {
        InventoryContext::new(self.family, self.inventory_format.current())
    }

    /// Remember the value a configuration command is about to apply.
    fn stage(&mut self, command: &Command) {
        match command {
            Command::SetInventoryFormat(f) => self.inventory_format.propose(*f),
            Command::SetInventoryMode(m) => self.inventory_mode.propose(*m),
            _ => {}
        }
    }

    /// Apply what a successful answer confirms about the device.
    fn apply(&mut self, code: CommandCode, response: &Response) {
        match (code, response) {
            (CommandCode::SetInventoryFormat, _) => {
                let f = self.inventory_format.commit();
                info!("inventory format is now {}", f);
            }
            (CommandCode::SetInventoryMode, _) => {
                let m = self.inventory_mode.commit();
                info!("inventory mode is now {}", m);
            }
            (_, Response::InventoryFormat(f)) => self.inventory_format.confirm(*f),
            (_, Response::InventoryMode(m)) => self.inventory_mode.confirm(*m),
            _ => {}
        }
    }

    fn start<F, S>(
        &mut self,
        code: CommandCode,
        tag: Option<ExtendedTagId>,
        build: F,
        stage: S,
    ) -> Result<()>
    where
        F: FnOnce(&mut SequenceCounter) -> Result<String>,
        S: FnOnce(&mut Session),
    {
        self.link.ensure_ready()?;

        // Build on a copy so a rejected command leaves the counter alone.
        let mut sequence = self.link.sequence();
        let frame = build(&mut sequence)?;

        if let Some(required) = code.required_family() {
            if required != self.family {
                return Err(Error::UnsupportedOperation(format!(
                    "{} needs a {} reader, connected reader is {}",
                    code, required, self.family
                )));
            }
        }

        self.link.commit_sequence(sequence);
        self.link.begin(PendingCommand::new(code, tag))?;
        stage(self);

        if self.transport().is_legacy() && code.needs_command_mode() {
            debug!("{} needs command mode, switching", code);
            self.link.set_mode(ModeSubstatus::SettingCommandMode);
            self.deferred = Some(frame);
            let switched = self.transport().set_transfer_mode(TransferMode::Command);
            if let Err(e) = switched {
                warn!("could not request command mode: {}", e);
                self.abort();
                return Err(e.into());
            }
            return Ok(());
        }

        if let Err(e) = self.write_frame(&frame) {
            warn!("write of {} failed: {}", code, e);
            self.abort();
            return Err(e.into());
        }
        Ok(())
    }

    /// Drop the command in flight without reporting it.
    fn abort(&mut self) -> Option<PendingCommand> {
        self.deferred = None;
        self.parked = None;
        self.inventory_format.discard();
        self.inventory_mode.discard();
        self.link.complete()
    }

    /// Complete the command in flight with `error`.
    fn fail_pending(&mut self, error: Error) -> Vec<Delivery> {
        if self.link.mode() == ModeSubstatus::CommandModeActive {
            let switched = self.transport().set_transfer_mode(TransferMode::Stream);
            if let Err(e) = switched {
                warn!("could not return to stream mode: {}", e);
            }
        }
        match self.abort() {
            Some(p) => {
                warn!("{} failed: {}", p.code, error);
                vec![Delivery::failed(p.code, p.tag, error)]
            }
            None => Vec::new(),
        }
    }

    fn transport_error(&mut self, error: TransportError) -> Vec<Delivery> {
        match self.link.status().clone() {
            LinkStatus::NotInitialized | LinkStatus::Uninitialized => {
                error!("connection failed: {}", error);
                self.link.fail();
                vec![Delivery::ConnectionFailure(error.code())]
            }
            LinkStatus::PendingCommand(_) => {
                let failure =
                    if error.is_mode_change() && self.link.mode() == ModeSubstatus::SettingStreamMode {
                        Error::ModeChangeFailed
                    } else {
                        Error::from(error)
                    };
                self.fail_pending(failure)
            }
            status => {
                debug!("ignoring transport error {} while {}", error, status);
                Vec::new()
            }
        }
    }

    fn timeout(&mut self) -> Vec<Delivery> {
        match self.link.status().clone() {
            LinkStatus::Uninitialized => {
                error!("identification timed out");
                self.link.fail();
                vec![Delivery::ConnectionFailure(
                    TransportError::ReadTimeout.code(),
                )]
            }
            LinkStatus::PendingCommand(_) => {
                let failure = match self.link.mode() {
                    ModeSubstatus::SettingCommandMode => {
                        Error::from(TransportError::ModeChangeTimeout)
                    }
                    ModeSubstatus::SettingStreamMode => Error::ModeChangeFailed,
                    _ => Error::from(TransportError::ReadTimeout),
                };
                self.fail_pending(failure)
            }
            status => {
                trace!("timeout ignored while {}", status);
                Vec::new()
            }
        }
    }

    fn mode_changed(&mut self, mode: TransferMode) -> Vec<Delivery> {
        match (self.link.mode(), mode) {
            (ModeSubstatus::SettingCommandMode, TransferMode::Command) => {
                self.link.set_mode(ModeSubstatus::CommandModeActive);
                let Some(frame) = self.deferred.take() else {
                    return Vec::new();
                };
                match self.write_frame(&frame) {
                    Ok(()) => Vec::new(),
                    Err(e) => self.fail_pending(Error::from(e)),
                }
            }
            (ModeSubstatus::SettingStreamMode, TransferMode::Stream) => {
                let parked = self.parked.take();
                self.link.complete();
                debug!("back in stream mode");
                parked.into_iter().collect()
            }
            (current, requested) => {
                debug!("transfer mode {} reported while {}", requested, current);
                Vec::new()
            }
        }
    }

    fn receive(&mut self, text: &str, config: &ReaderConfig) -> Vec<Delivery> {
        trace!("<- {:?}", text);
        let pending = match self.link.status().clone() {
            status @ (LinkStatus::NotInitialized | LinkStatus::Error) => {
                trace!("ignoring data while {}", status);
                return Vec::new();
            }
            LinkStatus::Uninitialized => return self.identify(text),
            LinkStatus::Ready => return self.unsolicited(text),
            LinkStatus::PendingCommand(p) => p,
        };

        if text.is_empty() {
            warn!(
                "empty notification while {} is pending; back to ready without an answer",
                pending.code
            );
            self.abort();
            return Vec::new();
        }

        // A parked legacy answer is already in; only a mode change
        // completes the command now.
        let mut answered = self.parked.is_some();
        let mut out = Vec::new();
        for line in split_lines(text) {
            let outcome = match classify_line(line) {
                LineKind::Answer(body) | LineKind::Transparent(body) if !answered => {
                    self.answer_outcome(pending.code, body, config.odd_length_fix)
                }
                LineKind::Tunnel { encrypted, body } if !answered => {
                    tunnel_outcome(pending.code, encrypted, body)
                }
                _ => {
                    out.extend(self.line_delivery(line));
                    continue;
                }
            };
            answered = true;
            out.extend(self.conclude(outcome));
        }
        out
    }

    fn answer_outcome(&self, code: CommandCode, body: &str, odd_length_fix: bool) -> Result<Response> {
        if code.answer_kind() == AnswerKind::Tunnel {
            return match Answer::decode(body, false) {
                Some(a) if !a.is_success() => Err(Error::DeviceStatus(a.return_code)),
                Some(_) => Err(Error::UnexpectedAnswer(format!(
                    "command answer to tunnel command {}",
                    code
                ))),
                None => Err(Error::FrameFormat(format!("malformed answer '{}'", body))),
            };
        }

        let fix = odd_length_fix && code.is_read_type();
        let answer = Answer::decode(body, fix)
            .ok_or_else(|| Error::FrameFormat(format!("malformed answer '{}'", body)))?;
        let sequence = self.link.sequence();
        if !sequence.matches(answer.sequence) {
            return Err(Error::SequenceMismatch {
                expected: sequence.expected_answer(),
                actual: answer.sequence,
            });
        }
        if !answer.is_success() {
            return Err(if code.is_tag_operation() {
                Error::TagStatus(answer.return_code)
            } else {
                Error::DeviceStatus(answer.return_code)
            });
        }
        debug!("<- answer to {} accepted", code);
        Response::decode(code, &answer.data)
    }

    /// Finish the command in flight with `outcome`; legacy commands first
    /// switch the transport back to stream mode.
    fn conclude(&mut self, outcome: Result<Response>) -> Vec<Delivery> {
        let Some(pending) = self.link.pending().cloned() else {
            return Vec::new();
        };
        match &outcome {
            Ok(response) => self.apply(pending.code, response),
            Err(e) => {
                warn!("{} completed with error: {}", pending.code, e);
                self.inventory_format.discard();
                self.inventory_mode.discard();
            }
        }
        let delivery = Delivery::Completed {
            code: pending.code,
            tag: pending.tag.clone(),
            outcome,
        };

        if self.link.mode() == ModeSubstatus::CommandModeActive {
            self.link.set_mode(ModeSubstatus::SettingStreamMode);
            let switched = self.transport().set_transfer_mode(TransferMode::Stream);
            if let Err(e) = switched {
                warn!("could not return to stream mode: {}", e);
                self.abort();
                return vec![Delivery::failed(
                    pending.code,
                    pending.tag,
                    Error::ModeChangeFailed,
                )];
            }
            self.parked = Some(delivery);
            return Vec::new();
        }

        self.link.complete();
        vec![delivery]
    }

    fn identify(&mut self, text: &str) -> Vec<Delivery> {
        for line in split_lines(text) {
            let LineKind::Answer(body) = classify_line(line) else {
                trace!("ignoring '{}' during identification", line);
                continue;
            };
            let sequence = self.link.sequence();
            let result = match Answer::decode(body, false) {
                None => Err(Error::FrameFormat(format!("malformed answer '{}'", body))),
                Some(a) if !sequence.matches(a.sequence) => Err(Error::SequenceMismatch {
                    expected: sequence.expected_answer(),
                    actual: a.sequence,
                }),
                Some(a) if !a.is_success() => Err(Error::DeviceReturned(a.return_code)),
                Some(a) => reader_payload::decode_standard(&a.data),
            };
            return match result {
                Ok(family) => {
                    self.family = family;
                    self.link.identified();
                    info!("{} reader identified, ready", family);
                    vec![Delivery::ConnectionSuccess]
                }
                Err(e) => {
                    error!("identification failed: {}", e);
                    self.link.fail();
                    vec![Delivery::ConnectionFailure(e.code())]
                }
            };
        }
        Vec::new()
    }

    fn unsolicited(&self, text: &str) -> Vec<Delivery> {
        split_lines(text)
            .filter_map(|line| self.line_delivery(line))
            .collect()
    }

    /// Event or inventory delivery for a line that does not answer
    /// anything.
    fn line_delivery(&self, line: &str) -> Option<Delivery> {
        match classify_line(line) {
            LineKind::Event(body) => {
                let event = Event::decode(body);
                if event.is_none() {
                    warn!("dropping malformed event '{}'", line);
                }
                event.map(Delivery::Event)
            }
            LineKind::Inventory(body) => {
                let tag = decode_line(body, self.inventory_context());
                match &tag {
                    Some(t) => trace!("tag {}", t.extended_id()),
                    None => trace!("not a tag report: '{}'", body),
                }
                tag.map(Delivery::Inventory)
            }
            _ => {
                warn!("dropping unsolicited answer '{}'", line);
                None
            }
        }
    }
}

/// A `#:` answer only completes a plain tunnel, a `%:` answer only an
/// encrypted one.
fn tunnel_outcome(code: CommandCode, encrypted: bool, body: &str) -> Result<Response> {
    if code.answer_kind() != AnswerKind::Tunnel {
        return Err(Error::UnexpectedAnswer(format!(
            "tunnel answer to non-tunnel command {}",
            code
        )));
    }
    if encrypted != (code == CommandCode::Iso15693EncryptedTunnel) {
        return Err(Error::UnexpectedAnswer(format!(
            "{} tunnel answer to {}",
            if encrypted { "encrypted" } else { "plain" },
            code
        )));
    }
    Ok(Response::Tunnel(hex_to_bytes(body)))
}
