// passive-reader/tests/common/mod.rs
#![allow(dead_code)]

pub mod fixtures;

pub use passive_reader::test_support::{
    answer_line, event_line, legacy_reader, mock_reader, ready_reader, RecordingListener,
};

/// Route `log` output to the test harness; safe to call from every test.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
