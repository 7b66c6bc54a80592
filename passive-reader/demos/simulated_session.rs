// Simulated reader session over the in-memory transport.
//
// Plays the device side by hand: every frame the engine writes is printed,
// and the matching answer lines are fed back through `on_data_received`.
// Run with `RUST_LOG=debug` to see the engine's own logging.

use std::sync::{Arc, Mutex};

use passive_reader::prelude::*;
use passive_reader::tag::epc;
use passive_reader::test_support::answer_line;
use passive_reader::transport::MockTransport;

#[derive(Default)]
struct Printer {
    seen: Mutex<Vec<Tag>>,
}

impl ReaderListener for Printer {
    fn connection_success_event(&self) {
        println!("reader identified");
    }
    fn result_event(&self, command: CommandCode, error: u16) {
        println!("{} -> {:#06x}", command, error);
    }
    fn firmware_version_event(&self, major: u8, minor: u8) {
        println!("firmware {}.{}", major, minor);
    }
}

impl ResponseListener for Printer {
    fn inventory_event(&self, tag: &Tag) {
        println!("tag {} rssi {:?}", tag.extended_id(), tag.rssi());
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(tag.clone());
        }
    }
    fn read_event(&self, tag: &ExtendedTagId, error: u16, data: Option<&[u8]>) {
        match data {
            Some(d) => println!("read {} -> {}", tag, bytes_to_hex(d)),
            None => println!("read {} failed with {:#06x}", tag, error),
        }
    }
}

fn exchange(reader: &Reader, mock: &MockTransport, lines: &[String]) {
    if let Some(frame) = mock.last_frame() {
        println!(">> {}", frame);
    }
    let text: String = lines.iter().map(|l| format!("{}\r\n", l)).collect();
    print!("<< {}", text);
    reader.on_data_received(&text);
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mock = MockTransport::new();
    let printer = Arc::new(Printer::default());
    let reader = ReaderBuilder::new()
        .with_transport(Box::new(mock.clone()))
        .with_reader_listener(printer.clone())
        .with_response_listener(printer.clone())
        .build()?;

    reader.on_connected();
    exchange(&reader, &mock, &[answer_line(0x00, 0x00, &[0x02])]);
    println!("family: {}", reader.device_family());

    reader.get_firmware_version()?;
    exchange(&reader, &mock, &[answer_line(0x01, 0x00, &[0x15])]);

    reader.do_inventory()?;
    exchange(
        &reader,
        &mock,
        &[
            "3000E2801160600002054E2A1C31 CC".to_string(),
            "3000E2801160600002054E2A1C32 C4".to_string(),
            answer_line(0x02, 0x00, &[]),
        ],
    );

    let first = printer
        .seen
        .lock()
        .map_err(|_| anyhow::anyhow!("listener lock poisoned"))?
        .first()
        .cloned();
    if let Some(Tag::Epc(tag)) = first {
        epc::read(&reader, &tag, epc::MemoryBank::User, 0, 2, None)?;
        exchange(
            &reader,
            &mock,
            &[answer_line(0x03, 0x00, &[0xCA, 0xFE, 0xBA, 0xBE])],
        );
    }

    reader.disconnect()?;
    println!("status: {}", reader.status());
    Ok(())
}
