//! Tests for error classification and messages.

use std::io;

use crate::endpoint::EndpointKind;
use crate::error::{ErrorKind, IoflowError};
use crate::io::transport_error;

fn io_kind(kind: io::ErrorKind) -> ErrorKind {
    IoflowError::from(io::Error::new(kind, "backend")).kind()
}

#[test]
fn native_io_errors_are_classified() {
    assert_eq!(io_kind(io::ErrorKind::NotFound), ErrorKind::NotFound);
    assert_eq!(io_kind(io::ErrorKind::PermissionDenied), ErrorKind::PermissionDenied);
    assert_eq!(io_kind(io::ErrorKind::ConnectionRefused), ErrorKind::TransportError);
    assert_eq!(io_kind(io::ErrorKind::TimedOut), ErrorKind::TransportError);
    assert_eq!(io_kind(io::ErrorKind::Other), ErrorKind::Io);
}

#[test]
fn marked_transport_failures_are_classified() {
    let err = IoflowError::from(transport_error("bucket gateway unavailable"));
    assert_eq!(err.kind(), ErrorKind::TransportError);
    assert_eq!(err.to_string(), "bucket gateway unavailable");

    // an unmarked Other stays a plain I/O error
    assert_eq!(io_kind(io::ErrorKind::Other), ErrorKind::Io);
}

#[test]
fn io_errors_keep_their_message() {
    let err = IoflowError::from(io::Error::new(io::ErrorKind::NotFound, "no such bucket"));
    assert_eq!(err.to_string(), "no such bucket");
}

#[test]
fn messages_name_the_offending_value() {
    assert_eq!(
        IoflowError::UnsupportedEndpointKind("pigeon".into()).to_string(),
        "unsupported endpoint kind 'pigeon'"
    );
    assert_eq!(
        IoflowError::MissingIdentifier(EndpointKind::File).to_string(),
        "file endpoint requires an identifier"
    );
}

#[test]
fn composite_error_mentions_both_failures() {
    let err = IoflowError::ReleaseAfterFailure {
        body: Box::new(IoflowError::config("bad row")),
        release: Box::new(IoflowError::ResourceNotOpen),
    };
    let message = err.to_string();
    assert!(message.contains("bad row"));
    assert!(message.contains("no open resource"));
    assert_eq!(err.kind(), ErrorKind::ReleaseAfterFailure);
}

#[test]
fn kinds_display_their_names() {
    assert_eq!(ErrorKind::TransportError.to_string(), "TransportError");
    assert_eq!(ErrorKind::ResourceNotOpen.to_string(), "ResourceNotOpen");
}
