use passive_reader::error::{codes, ErrorKind};
use passive_reader::transport::TransportError;
use passive_reader::Error;

#[test]
fn transport_errors_map_into_their_own_range() {
    let all = [
        (TransportError::ConnectFailed, codes::CONNECT_ERROR),
        (TransportError::ConnectTimeout, codes::CONNECT_TIMEOUT_ERROR),
        (TransportError::WriteFailed, codes::WRITE_ERROR),
        (TransportError::WriteTimeout, codes::WRITE_TIMEOUT_ERROR),
        (TransportError::ReadFailed, codes::READ_ERROR),
        (TransportError::ReadTimeout, codes::READ_TIMEOUT_ERROR),
        (TransportError::ModeChangeFailed, codes::MODE_ERROR),
        (TransportError::ModeChangeTimeout, codes::MODE_TIMEOUT_ERROR),
        (TransportError::ServiceDiscoveryFailed, codes::SERVICE_DISCOVERY_ERROR),
    ];
    for (err, code) in all {
        assert_eq!(err.code(), code);
        let wrapped = Error::from(err);
        assert_eq!(wrapped.code(), code);
        assert_eq!(ErrorKind::of(wrapped.code()), ErrorKind::Transport);
    }
}

#[test]
fn only_mode_errors_are_mode_changes() {
    assert!(TransportError::ModeChangeFailed.is_mode_change());
    assert!(TransportError::ModeChangeTimeout.is_mode_change());
    assert!(!TransportError::ReadTimeout.is_mode_change());
}
