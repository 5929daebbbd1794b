//! Connection multiplexer.
//!
//! One thread, one `poll(2)` wait per loop iteration. Each iteration
//! dispatches readiness to every live connection, reaps the ones that
//! finished, and takes at most one accept off the listener. Connections
//! past the configured capacity are closed on accept rather than queued.

mod listener;
pub(crate) mod poller;

use std::io;
use std::net::SocketAddr;
use std::os::fd::AsRawFd;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::http::connection::{Connection, ConnectionState};
use crate::router::Handler;

/// The server: the listening socket plus the table of live connections.
pub struct Server {
    listener: std::net::TcpListener,
    conns: Vec<Connection>,
    max_connections: usize,
}

impl Server {
    /// Binds the listening socket described by `config`.
    pub fn bind(config: &Config) -> io::Result<Self> {
        let addr: SocketAddr = config
            .listen_addr
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let listener = listener::bind(&addr, config.backlog)?;

        Ok(Self {
            listener,
            conns: Vec::with_capacity(config.max_connections),
            max_connections: config.max_connections,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Runs the readiness loop until a poll failure. Per-connection
    /// faults are absorbed by the connections themselves; only the wait
    /// call can take the whole server down.
    pub fn run(mut self, handler: &dyn Handler) -> io::Result<()> {
        info!("listening on {}", self.listener.local_addr()?);
        loop {
            self.turn(handler)?;
        }
    }

    /// One loop iteration: wait, dispatch, reap, accept.
    fn turn(&mut self, handler: &dyn Handler) -> io::Result<()> {
        let mut fds = Vec::with_capacity(self.conns.len() + 1);
        fds.push(poller::pollfd(self.listener.as_raw_fd()));
        fds.extend(self.conns.iter().map(|c| poller::pollfd(c.as_raw_fd())));

        poller::wait(&mut fds)?;

        // Readiness pass. fds[i + 1] belongs to conns[i]; reaping
        // swap-removes from both vectors so the pairing holds, and the
        // slot is re-examined because the swapped-in connection has not
        // been visited yet this pass.
        let mut i = 0;
        while i < self.conns.len() {
            if poller::readable(fds[i + 1].revents) {
                self.conns[i].on_readable(handler);
            }
            if self.conns[i].state() == ConnectionState::Closing {
                let mut conn = self.conns.swap_remove(i);
                fds.swap_remove(i + 1);
                conn.shutdown();
                continue;
            }
            i += 1;
        }

        if poller::readable(fds[0].revents) {
            self.accept_one();
        }
        Ok(())
    }

    /// Takes one pending connection off the listener, if any.
    fn accept_one(&mut self) {
        match self.listener.accept() {
            Ok((stream, peer)) => {
                if self.conns.len() >= self.max_connections {
                    warn!("connection table full; rejecting {}", peer);
                    return;
                }
                match Connection::new(stream) {
                    Ok(conn) => {
                        debug!("accepted connection from {}", peer);
                        self.conns.push(conn);
                    }
                    Err(e) => warn!("failed to set up connection from {}: {}", peer, e),
                }
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {}
            Err(e) => warn!("accept failed: {}", e),
        }
    }
}
