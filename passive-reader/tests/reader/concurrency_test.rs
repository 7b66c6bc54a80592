#[path = "../common/mod.rs"]
mod common;

use std::sync::{Arc, Mutex, OnceLock, Weak};
use std::thread;

use common::{answer_line, ready_reader, RecordingListener};
use passive_reader::prelude::*;
use passive_reader::reader::router::Listeners;
use passive_reader::transport::{TransferMode, TransportResult};

#[test]
fn only_one_of_many_concurrent_commands_is_sent() {
    let (reader, mock, _rec) = ready_reader(DeviceFamily::Uhf);
    let reader = Arc::new(reader);
    let writes = mock.write_count();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let reader = Arc::clone(&reader);
            thread::spawn(move || reader.get_battery_level().is_ok())
        })
        .collect();
    let accepted = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(accepted, 1);
    assert_eq!(mock.write_count(), writes + 1);
    assert!(matches!(reader.status(), LinkStatus::PendingCommand(_)));
}

/// Issues the next command from inside the completion callback.
#[derive(Default)]
struct Chaining {
    reader: OnceLock<Weak<Reader>>,
    outcome: Mutex<Option<bool>>,
}

impl ReaderListener for Chaining {
    fn battery_level_event(&self, _volts: f32) {
        let ok = self
            .reader
            .get()
            .and_then(Weak::upgrade)
            .map(|r| r.get_firmware_version().is_ok());
        *self.outcome.lock().unwrap() = ok;
    }
}

#[test]
fn listener_may_send_from_its_callback() {
    let mock = passive_reader::transport::MockTransport::new();
    let chaining = Arc::new(Chaining::default());
    let reader = Arc::new(
        ReaderBuilder::new()
            .with_transport(Box::new(mock.clone()))
            .with_reader_listener(chaining.clone())
            .build()
            .unwrap(),
    );
    chaining.reader.set(Arc::downgrade(&reader)).unwrap();

    reader.on_connected();
    reader.on_data_received(&answer_line(0x00, 0x00, &[0x01]));
    reader.get_battery_level().unwrap();
    reader.on_data_received(&answer_line(0x01, 0x00, &[0x08, 0x00]));

    assert_eq!(*chaining.outcome.lock().unwrap(), Some(true));
    assert_eq!(mock.last_frame().as_deref(), Some("$:040216"));
    assert!(matches!(reader.status(), LinkStatus::PendingCommand(_)));
}

/// Reports the teardown synchronously from inside `disconnect`.
#[derive(Clone, Default)]
struct SyncDisconnect {
    reader: Arc<OnceLock<Weak<Reader>>>,
}

impl Transport for SyncDisconnect {
    fn write(&mut self, _frame: &str) -> TransportResult<()> {
        Ok(())
    }

    fn set_transfer_mode(&mut self, _mode: TransferMode) -> TransportResult<()> {
        Ok(())
    }

    fn disconnect(&mut self) -> TransportResult<()> {
        if let Some(reader) = self.reader.get().and_then(Weak::upgrade) {
            reader.on_disconnected();
        }
        Ok(())
    }
}

#[test]
fn transport_may_report_disconnect_from_inside_disconnect() {
    let transport = SyncDisconnect::default();
    let rec = RecordingListener::new();
    let reader = Arc::new(
        ReaderBuilder::new()
            .with_transport(Box::new(transport.clone()))
            .with_reader_listener(rec.clone())
            .build()
            .unwrap(),
    );
    transport.reader.set(Arc::downgrade(&reader)).unwrap();

    reader.on_connected();
    reader.on_data_received(&answer_line(0x00, 0x00, &[0x01]));

    let (done_tx, done_rx) = std::sync::mpsc::channel();
    let worker = {
        let reader = Arc::clone(&reader);
        thread::spawn(move || {
            let result = reader.disconnect();
            let _ = done_tx.send(());
            result
        })
    };
    done_rx
        .recv_timeout(std::time::Duration::from_secs(3))
        .expect("disconnect did not return");
    worker.join().unwrap().unwrap();

    assert_eq!(reader.status(), LinkStatus::NotInitialized);
    assert_eq!(
        rec.events(),
        vec!["reader:connected".to_string(), "reader:disconnected".to_string()]
    );
}

#[test]
fn listeners_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Reader>();
    assert_send_sync::<Listeners>();
}
