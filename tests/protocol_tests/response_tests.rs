//! Tests for Response and Reply
//!
//! These tests verify:
//! - Accessors on the raw bytes of a read
//! - Truncation hint when the buffer is full
//! - Classification of the service's reply vocabulary per command kind

use bytes::Bytes;
use kvsclient::protocol::{CommandKind, Reply, Response};

fn response(text: &str, capacity: usize) -> Response {
    Response::new(Bytes::copy_from_slice(text.as_bytes()), capacity)
}

// =============================================================================
// Response Tests
// =============================================================================

#[test]
fn test_response_accessors() {
    let resp = response("King", 1024);
    assert_eq!(resp.len(), 4);
    assert_eq!(resp.as_bytes(), b"King");
    assert_eq!(resp.text(), "King");
    assert_eq!(resp.capacity(), 1024);
    assert!(!resp.is_empty());
    assert!(!resp.fills_buffer());
}

#[test]
fn test_empty_response_means_peer_closed() {
    let resp = response("", 1024);
    assert!(resp.is_empty());
    assert_eq!(resp.reply(CommandKind::Get), Reply::Closed);
}

#[test]
fn test_full_buffer_may_be_truncated() {
    let resp = response("abcd", 4);
    assert!(resp.fills_buffer());
}

#[test]
fn test_text_is_lossy() {
    let resp = Response::new(Bytes::from_static(&[b'o', 0xff, b'k']), 16);
    assert_eq!(resp.text(), "o\u{fffd}k");
    assert_eq!(resp.as_bytes(), &[b'o', 0xff, b'k']);
}

// =============================================================================
// Reply Classification Tests
// =============================================================================

#[test]
fn test_set_ok() {
    assert_eq!(
        Reply::classify(CommandKind::Set, "OK"),
        Reply::Ok { detail: None }
    );
}

#[test]
fn test_set_ok_with_annotation() {
    assert_eq!(
        Reply::classify(CommandKind::Set, "OK (overwritten)"),
        Reply::Ok {
            detail: Some("(overwritten)".to_string())
        }
    );
}

#[test]
fn test_ok_prefix_must_stand_alone() {
    assert_eq!(
        Reply::classify(CommandKind::Del, "OKAY"),
        Reply::Other("OKAY".to_string())
    );
}

#[test]
fn test_del_not_found() {
    assert_eq!(Reply::classify(CommandKind::Del, "NOT_FOUND"), Reply::NotFound);
}

#[test]
fn test_get_value() {
    assert_eq!(
        Reply::classify(CommandKind::Get, "King"),
        Reply::Value("King".to_string())
    );
}

#[test]
fn test_get_value_that_looks_like_ok() {
    assert_eq!(
        Reply::classify(CommandKind::Get, "OK"),
        Reply::Value("OK".to_string())
    );
}

#[test]
fn test_get_expired_and_not_found() {
    assert_eq!(Reply::classify(CommandKind::Get, "EXPIRED"), Reply::Expired);
    assert_eq!(Reply::classify(CommandKind::Get, "NOT_FOUND"), Reply::NotFound);
}

#[test]
fn test_error_reply() {
    let reply = Reply::classify(CommandKind::Set, "ERROR: ttl must be an integer");
    assert_eq!(reply, Reply::Error("ttl must be an integer".to_string()));
    assert!(reply.is_error());
}

#[test]
fn test_error_reply_without_space() {
    assert_eq!(
        Reply::classify(CommandKind::Raw, "ERROR:unknown"),
        Reply::Error("unknown".to_string())
    );
}

#[test]
fn test_raw_reply_forms() {
    assert_eq!(Reply::classify(CommandKind::Raw, "OK"), Reply::Ok { detail: None });
    assert_eq!(Reply::classify(CommandKind::Raw, "EXPIRED"), Reply::Expired);
    assert_eq!(
        Reply::classify(CommandKind::Raw, "King"),
        Reply::Other("King".to_string())
    );
}

#[test]
fn test_status_words_tolerate_trailing_newline() {
    assert_eq!(Reply::classify(CommandKind::Get, "NOT_FOUND\n"), Reply::NotFound);
    assert_eq!(Reply::classify(CommandKind::Get, "EXPIRED\r\n"), Reply::Expired);
    assert_eq!(Reply::classify(CommandKind::Del, "NOT_FOUND\n"), Reply::NotFound);
    assert_eq!(Reply::classify(CommandKind::Raw, "EXPIRED\n"), Reply::Expired);
    assert_eq!(Reply::classify(CommandKind::Set, "OK\n"), Reply::Ok { detail: None });
    assert_eq!(
        Reply::classify(CommandKind::Set, "ERROR: bad ttl\n"),
        Reply::Error("bad ttl".to_string())
    );
}

#[test]
fn test_get_value_keeps_trailing_newline() {
    assert_eq!(
        Reply::classify(CommandKind::Get, "King\n"),
        Reply::Value("King\n".to_string())
    );
}
