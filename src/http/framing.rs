//! Request framing: deciding whether one complete HTTP request is
//! present in a connection's receive buffer.
//!
//! Two rules, selected by the (provisionally read) request method:
//!
//! 1. Methods that do not carry a body complete as soon as the buffer
//!    ends in the CRLFCRLF header terminator. Only the trailing four
//!    bytes need checking.
//! 2. Body-carrying methods (POST/PUT/PATCH) need the header terminator
//!    located anywhere in the buffer - a body may already follow it -
//!    and, when a Content-Length was declared, at least that many bytes
//!    after it. Without a Content-Length the request is treated as
//!    complete at the end of headers; chunked transfer-encoding is
//!    unsupported and rejected later by the parser.

use crate::http::request::Method;

const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Offset of the first CRLFCRLF in `buf`, if any.
///
/// The first occurrence wins: it is the earliest possible headers end,
/// and anything after it belongs to the body.
pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == HEADER_TERMINATOR)
}

/// Whether `buf` holds at least one complete request.
pub fn request_is_complete(buf: &[u8]) -> bool {
    // CRLFCRLF cannot fit yet.
    if buf.len() < 4 {
        return false;
    }

    if !leading_method_expects_body(buf) {
        return buf.ends_with(HEADER_TERMINATOR);
    }

    let Some(headers_end) = find_headers_end(buf) else {
        return false;
    };
    let body_start = headers_end + 4;

    match scan_content_length(&buf[..headers_end]) {
        Some(declared) => buf.len() - body_start >= declared,
        None => true,
    }
}

/// Provisional read of the method token. An incomplete or unrecognized
/// token counts as body-less; the parser is the authority on validity.
fn leading_method_expects_body(buf: &[u8]) -> bool {
    let Some(space) = buf.iter().position(|&b| b == b' ') else {
        return false;
    };
    Method::from_token(&buf[..space]).is_some_and(Method::expects_body)
}

/// Provisional scan of the header block for a Content-Length value.
///
/// Header names compare ASCII case-insensitively. A value that does not
/// parse as an unsigned integer is treated as absent, matching the
/// parser.
fn scan_content_length(headers: &[u8]) -> Option<usize> {
    for line in headers.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        let Some(colon) = line.iter().position(|&b| b == b':') else {
            continue;
        };
        if !line[..colon].eq_ignore_ascii_case(b"Content-Length") {
            continue;
        }
        let value = line[colon + 1..]
            .strip_prefix(b" ")
            .unwrap_or(&line[colon + 1..]);
        return std::str::from_utf8(value).ok()?.parse().ok();
    }
    None
}
