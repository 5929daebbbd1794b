use std::io::{self, Read};
use std::net::{Shutdown, TcpStream};
use std::os::fd::{AsRawFd, RawFd};
use std::time::SystemTime;

use tracing::{debug, error, warn};

use crate::http::buffer::RecvBuffer;
use crate::http::framing;
use crate::http::parser;
use crate::http::writer::ResponseWriter;
use crate::router::Handler;

/// How much is pulled off the socket per read call.
const READ_CHUNK: usize = 1024;

/// Lifecycle of one connection. `Closing` is terminal; nothing leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Still accumulating request bytes.
    Receiving,
    /// A complete request is framed; parse-and-respond pending.
    RequestReady,
    /// Response written, fatal error, or peer closed. To be reclaimed.
    Closing,
}

/// One client connection: the socket, its receive buffer, and where it
/// is in its lifecycle. Owned and driven exclusively by the multiplexer.
pub struct Connection {
    stream: TcpStream,
    buf: RecvBuffer,
    state: ConnectionState,
}

impl Connection {
    pub fn new(stream: TcpStream) -> io::Result<Self> {
        stream.set_nonblocking(true)?;
        Ok(Self {
            stream,
            buf: RecvBuffer::new(),
            state: ConnectionState::Receiving,
        })
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// One readiness dispatch.
    ///
    /// Drains whatever the socket has, and if that completed a request,
    /// parses it, hands it to the router, and writes the response. The
    /// connection always ends the exchange in `Closing`; there is no
    /// keep-alive.
    pub fn on_readable(&mut self, handler: &dyn Handler) {
        if self.state == ConnectionState::Receiving {
            self.drain_socket();
        }
        if self.state == ConnectionState::RequestReady {
            self.respond(handler);
            self.state = ConnectionState::Closing;
        }
    }

    /// Reads until the socket would block, the peer closes, or framing
    /// reports a complete request. Each pass either consumes available
    /// bytes or stops, so the loop cannot spin.
    fn drain_socket(&mut self) {
        let mut chunk = [0u8; READ_CHUNK];
        loop {
            match self.stream.read(&mut chunk) {
                Ok(0) => {
                    debug!("peer closed before completing a request");
                    self.state = ConnectionState::Closing;
                    return;
                }
                Ok(n) => {
                    if let Err(e) = self.buf.append(&chunk[..n]) {
                        warn!("receive buffer growth failed: {}", e);
                        self.state = ConnectionState::Closing;
                        return;
                    }
                    if framing::request_is_complete(self.buf.as_slice()) {
                        self.state = ConnectionState::RequestReady;
                        return;
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => return,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    warn!("read failed: {}", e);
                    self.state = ConnectionState::Closing;
                    return;
                }
            }
        }
    }

    fn respond(&mut self, handler: &dyn Handler) {
        let mut response = handler.handle(parser::parse_request(self.buf.as_slice()));
        // Stamp immediately before writing; the serializer itself never
        // reads the clock.
        response.set_timestamp(SystemTime::now());

        match ResponseWriter::new(&response) {
            Ok(mut writer) => {
                if let Err(e) = writer.write_to_stream(&mut self.stream) {
                    warn!("response write failed: {}", e);
                }
            }
            Err(e) => error!("dropping response: {}", e),
        }
    }

    /// Signals end-of-response to the peer ahead of teardown. The socket
    /// and buffer are released when the connection is dropped.
    pub fn shutdown(&mut self) {
        let _ = self.stream.shutdown(Shutdown::Write);
    }
}

impl AsRawFd for Connection {
    fn as_raw_fd(&self) -> RawFd {
        self.stream.as_raw_fd()
    }
}
