use passive_reader::transport::{MockTransport, TransferMode, Transport, TransportError};

#[test]
fn clones_share_the_recording() {
    let mock = MockTransport::new();
    let mut owned = mock.clone();
    owned.write("$:040030\r\n").unwrap();
    owned.set_transfer_mode(TransferMode::Command).unwrap();
    owned.disconnect().unwrap();

    assert_eq!(mock.written(), vec!["$:040030\r\n".to_string()]);
    assert_eq!(mock.last_frame().as_deref(), Some("$:040030"));
    assert_eq!(mock.mode_requests(), vec![TransferMode::Command]);
    assert_eq!(mock.disconnects(), 1);
    assert!(!owned.is_legacy());
    assert!(MockTransport::legacy().is_legacy());
}

#[test]
fn injected_failures_are_consumed_in_order() {
    let mut mock = MockTransport::new();
    mock.fail_next_write(TransportError::WriteTimeout);
    mock.fail_next_write(TransportError::WriteFailed);
    assert_eq!(mock.write("a"), Err(TransportError::WriteTimeout));
    assert_eq!(mock.write("b"), Err(TransportError::WriteFailed));
    mock.write("c").unwrap();
    assert_eq!(mock.write_count(), 1);

    mock.fail_next_mode_change(TransportError::ModeChangeTimeout);
    assert!(mock.set_transfer_mode(TransferMode::Stream).is_err());
    assert!(mock.mode_requests().is_empty());
}
