use std::fmt;
use std::str;

use crate::http::request::{Method, Request, Target};

/// Why a framed request failed to parse.
///
/// Every variant is a malformed request as far as the caller is
/// concerned; the distinctions exist for logging. All of them turn into
/// a 400 at the handler boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Method token missing or not in the supported set.
    InvalidMethod,
    /// Target missing, not UTF-8, or not beginning with `/`.
    InvalidTarget,
    /// Version token is not exactly `HTTP/1.1` followed by CRLF.
    InvalidVersion,
    /// Header line without a colon before its end.
    InvalidHeader,
    /// `Transfer-Encoding: chunked`, which this server does not speak.
    UnsupportedEncoding,
    /// A scan ran off the end of the buffer before its delimiter.
    UnexpectedEnd,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ParseError::InvalidMethod => "unrecognized request method",
            ParseError::InvalidTarget => "invalid request target",
            ParseError::InvalidVersion => "unsupported HTTP version",
            ParseError::InvalidHeader => "malformed header line",
            ParseError::UnsupportedEncoding => "chunked transfer-encoding is not supported",
            ParseError::UnexpectedEnd => "request truncated",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for ParseError {}

/// Either a parsed request or a malformed-request error, never both.
pub type ParseOutcome<'a> = Result<Request<'a>, ParseError>;

/// Parses one complete request from `buf`.
///
/// `buf` is the connection's receive buffer after framing reported a
/// complete request; contents are untrusted, so every index is checked
/// against the buffer length before use.
pub fn parse_request(buf: &[u8]) -> ParseOutcome<'_> {
    // Request line: method, target, version.
    let space = buf
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ParseError::InvalidMethod)?;
    let method = Method::from_token(&buf[..space]).ok_or(ParseError::InvalidMethod)?;

    let target_start = space + 1;
    if buf.get(target_start) != Some(&b'/') {
        return Err(ParseError::InvalidTarget);
    }
    let target_len = buf[target_start..]
        .iter()
        .position(|&b| b == b' ')
        .ok_or(ParseError::UnexpectedEnd)?;
    let target_bytes = &buf[target_start..target_start + target_len];
    let target = str::from_utf8(target_bytes)
        .map(Target::new)
        .map_err(|_| ParseError::InvalidTarget)?;

    // Anything other than HTTP/1.1 is rejected rather than misparsed.
    let version_start = target_start + target_len + 1;
    let version_end = version_start + b"HTTP/1.1\r\n".len();
    match buf.get(version_start..version_end) {
        Some(b"HTTP/1.1\r\n") => {}
        Some(_) => return Err(ParseError::InvalidVersion),
        None => return Err(ParseError::UnexpectedEnd),
    }

    // Header lines until the blank line that ends them.
    let mut cursor = version_end;
    let mut content_length = 0usize;
    loop {
        let line_len = find_crlf(&buf[cursor..]).ok_or(ParseError::UnexpectedEnd)?;
        if line_len == 0 {
            cursor += 2;
            break;
        }
        let line = &buf[cursor..cursor + line_len];
        let colon = line
            .iter()
            .position(|&b| b == b':')
            .ok_or(ParseError::InvalidHeader)?;
        let name = &line[..colon];
        // Exactly one optional space after the colon, nothing smarter.
        let value = line[colon + 1..]
            .strip_prefix(b" ")
            .unwrap_or(&line[colon + 1..]);

        if name.eq_ignore_ascii_case(b"Content-Length") {
            // Unparseable values count as absent, not as errors.
            content_length = str::from_utf8(value)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0);
        } else if name.eq_ignore_ascii_case(b"Transfer-Encoding")
            && value.eq_ignore_ascii_case(b"chunked")
        {
            return Err(ParseError::UnsupportedEncoding);
        }

        cursor += line_len + 2;
    }

    // Body: the next content_length bytes, borrowed from the buffer.
    let body = if content_length > 0 {
        buf.get(cursor..cursor + content_length)
            .ok_or(ParseError::UnexpectedEnd)?
    } else {
        &[]
    };

    Ok(Request {
        method,
        target,
        content_length,
        body,
    })
}

fn find_crlf(buf: &[u8]) -> Option<usize> {
    buf.windows(2).position(|w| w == b"\r\n")
}
