//! Thin wrapper over `poll(2)`.
//!
//! Readiness is the only thing the event loop ever blocks on; everything
//! else in the process is non-blocking. Interrupted waits are retried
//! here so callers never see `EINTR`.

use std::io;
use std::os::fd::RawFd;
use std::time::Duration;

/// A read-interest poll entry for `fd`.
pub(crate) fn pollfd(fd: RawFd) -> libc::pollfd {
    libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    }
}

/// Whether a returned entry warrants a read dispatch. Hangups and error
/// conditions count: the subsequent read surfaces what happened.
pub(crate) fn readable(revents: libc::c_short) -> bool {
    revents & (libc::POLLIN | libc::POLLHUP | libc::POLLERR) != 0
}

/// Blocks until at least one entry in `fds` is ready.
pub(crate) fn wait(fds: &mut [libc::pollfd]) -> io::Result<()> {
    loop {
        let rc = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, -1) };
        if rc >= 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}

/// Waits for `fd` to become writable, bounded by `timeout`.
pub(crate) fn await_writable(fd: RawFd, timeout: Duration) -> io::Result<()> {
    let millis = timeout.as_millis().min(libc::c_int::MAX as u128) as libc::c_int;
    let mut fds = [libc::pollfd {
        fd,
        events: libc::POLLOUT,
        revents: 0,
    }];
    loop {
        let rc = unsafe { libc::poll(fds.as_mut_ptr(), 1, millis) };
        if rc > 0 {
            return Ok(());
        }
        if rc == 0 {
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                "peer stopped draining the response",
            ));
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(err);
        }
    }
}
