use palisade::http::parser::{ParseError, parse_request};
use palisade::http::request::Method;

#[test]
fn test_parse_simple_get_request() {
    let req = parse_request(b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n").unwrap();

    assert_eq!(req.method, Method::GET);
    assert_eq!(req.path(), "/");
    assert_eq!(req.content_length, 0);
    assert!(req.body.is_empty());
}

#[test]
fn test_parse_post_request_with_body() {
    let req =
        parse_request(b"POST /x HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello").unwrap();

    assert_eq!(req.method, Method::POST);
    assert_eq!(req.path(), "/x");
    assert_eq!(req.content_length, 5);
    assert_eq!(req.body, b"hello");
}

#[test]
fn test_unknown_headers_are_ignored() {
    let req = parse_request(
        b"POST /api HTTP/1.1\r\nHost: localhost\r\nX-Custom: v\r\nContent-Length: 3\r\n\r\nabc",
    )
    .unwrap();

    assert_eq!(req.content_length, 3);
    assert_eq!(req.body, b"abc");
}

#[test]
fn test_query_string_stays_in_target() {
    let req = parse_request(b"GET /search?q=rust HTTP/1.1\r\n\r\n").unwrap();

    assert_eq!(req.path(), "/search?q=rust");
}

#[test]
fn test_short_target_is_stored_inline() {
    let req = parse_request(b"GET /short HTTP/1.1\r\n\r\n").unwrap();

    assert!(req.target.is_inline());
}

#[test]
fn test_long_target_gets_its_own_allocation() {
    let path = format!("/{}", "a".repeat(100));
    let raw = format!("GET {} HTTP/1.1\r\n\r\n", path);
    let req = parse_request(raw.as_bytes()).unwrap();

    assert!(!req.target.is_inline());
    assert_eq!(req.path(), path);
}

#[test]
fn test_unknown_method_is_malformed() {
    let outcome = parse_request(b"FOO / HTTP/1.1\r\n\r\n");
    assert_eq!(outcome.unwrap_err(), ParseError::InvalidMethod);
}

#[test]
fn test_method_matching_is_case_sensitive() {
    let outcome = parse_request(b"get / HTTP/1.1\r\n\r\n");
    assert_eq!(outcome.unwrap_err(), ParseError::InvalidMethod);
}

#[test]
fn test_target_must_begin_with_slash() {
    let outcome = parse_request(b"GET x HTTP/1.1\r\n\r\n");
    assert_eq!(outcome.unwrap_err(), ParseError::InvalidTarget);
}

#[test]
fn test_http10_is_rejected() {
    let outcome = parse_request(b"GET / HTTP/1.0\r\n\r\n");
    assert_eq!(outcome.unwrap_err(), ParseError::InvalidVersion);
}

#[test]
fn test_garbled_version_is_rejected() {
    let outcome = parse_request(b"GET / HTPT/1.1\r\n\r\n");
    assert_eq!(outcome.unwrap_err(), ParseError::InvalidVersion);
}

#[test]
fn test_header_line_without_colon_is_malformed() {
    let outcome = parse_request(b"GET / HTTP/1.1\r\nNoColonHere\r\n\r\n");
    assert_eq!(outcome.unwrap_err(), ParseError::InvalidHeader);
}

#[test]
fn test_content_length_name_is_case_insensitive() {
    let req =
        parse_request(b"POST /x HTTP/1.1\r\ncontent-length: 3\r\n\r\nabc").unwrap();

    assert_eq!(req.content_length, 3);
    assert_eq!(req.body, b"abc");
}

#[test]
fn test_non_numeric_content_length_counts_as_absent() {
    let req =
        parse_request(b"POST /x HTTP/1.1\r\nContent-Length: soon\r\n\r\n").unwrap();

    assert_eq!(req.content_length, 0);
    assert!(req.body.is_empty());
}

#[test]
fn test_chunked_transfer_encoding_is_rejected() {
    let outcome =
        parse_request(b"POST /x HTTP/1.1\r\nTransfer-Encoding: chunked\r\n\r\n");
    assert_eq!(outcome.unwrap_err(), ParseError::UnsupportedEncoding);
}

#[test]
fn test_body_longer_than_declared_is_trimmed_to_declaration() {
    let req =
        parse_request(b"POST /x HTTP/1.1\r\nContent-Length: 2\r\n\r\nhello").unwrap();

    assert_eq!(req.body, b"he");
}

#[test]
fn test_truncated_request_line_is_malformed() {
    assert_eq!(
        parse_request(b"GET /pa").unwrap_err(),
        ParseError::UnexpectedEnd
    );
    assert_eq!(parse_request(b"GET").unwrap_err(), ParseError::InvalidMethod);
}

#[test]
fn test_declared_body_missing_from_buffer_is_malformed() {
    let outcome = parse_request(b"POST /x HTTP/1.1\r\nContent-Length: 10\r\n\r\nhi");
    assert_eq!(outcome.unwrap_err(), ParseError::UnexpectedEnd);
}
