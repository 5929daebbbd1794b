use std::fmt;
use std::io::{self, Write};
use std::net::TcpStream;
use std::os::fd::AsRawFd;
use std::time::Duration;

use crate::http::response::Response;
use crate::server::poller;

pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Worst-case size of the serialized header block: status line, Date,
/// Content-Type, Content-Length, and the blank line, each at their
/// longest representable value.
const MAX_HEADER_BYTES: usize = 192;

/// How long a single response write may wait for the peer to drain its
/// receive window before the connection is given up on.
const WRITE_STALL_TIMEOUT: Duration = Duration::from_secs(5);

/// The serialized response overran its computed capacity.
///
/// This cannot happen for any value representable by [`Response`]; it is
/// an invariant breach to surface loudly, not an input error.
#[derive(Debug)]
pub struct SerializeError {
    computed: usize,
    actual: usize,
}

impl fmt::Display for SerializeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "serialized response overran its computed capacity ({} > {})",
            self.actual, self.computed
        )
    }
}

impl std::error::Error for SerializeError {}

/// Renders `response` into a single wire-format buffer.
///
/// Pure function of the response, including its embedded timestamp: the
/// same response serializes to the same bytes every time. The output is
/// sized as worst-case headers plus the exact body length, and the
/// function fails rather than exceed that bound.
pub fn serialize_response(response: &Response) -> Result<Vec<u8>, SerializeError> {
    let capacity = MAX_HEADER_BYTES + response.body.len();
    let mut buf = Vec::with_capacity(capacity);

    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        response.status.as_u16(),
        response.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    append_header(&mut buf, "Date", &httpdate::fmt_http_date(response.timestamp));
    append_header(&mut buf, "Content-Type", response.content_type.as_str());
    append_header(
        &mut buf,
        "Content-Length",
        &response.content_length().to_string(),
    );

    buf.extend_from_slice(b"\r\n");
    buf.extend_from_slice(&response.body);

    if buf.len() > capacity {
        return Err(SerializeError {
            computed: capacity,
            actual: buf.len(),
        });
    }
    Ok(buf)
}

fn append_header(buf: &mut Vec<u8>, name: &str, value: &str) {
    buf.extend_from_slice(name.as_bytes());
    buf.extend_from_slice(b": ");
    buf.extend_from_slice(value.as_bytes());
    buf.extend_from_slice(b"\r\n");
}

/// Writes one serialized response to a non-blocking socket.
pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Result<Self, SerializeError> {
        Ok(Self {
            buffer: serialize_response(response)?,
            written: 0,
        })
    }

    /// Drains the buffer into `stream`.
    ///
    /// A would-block write waits for the socket to become writable again,
    /// bounded by [`WRITE_STALL_TIMEOUT`] so a stalled peer cannot wedge
    /// the server. Any other error, a timeout, or a zero-length write is
    /// connection-fatal for the caller.
    pub fn write_to_stream(&mut self, stream: &mut TcpStream) -> io::Result<()> {
        while self.written < self.buffer.len() {
            match stream.write(&self.buffer[self.written..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        io::ErrorKind::WriteZero,
                        "connection closed while writing",
                    ));
                }
                Ok(n) => self.written += n,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    poller::await_writable(stream.as_raw_fd(), WRITE_STALL_TIMEOUT)?;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
