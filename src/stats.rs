use serde::Serialize;
use std::{
    fmt::{self, Write},
    sync::atomic::{AtomicU64, Ordering},
};

/// Search counters, readable from a signal handler
#[derive(Debug, Default)]
pub struct Statistics {
    decisions: AtomicU64,
    conflicts: AtomicU64,
    propagations: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatsSnapshot {
    pub decisions: u64,
    pub conflicts: u64,
    pub propagations: u64,
}

impl Statistics {
    pub fn decision(&self) {
        self.decisions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn conflict(&self) {
        self.conflicts.fetch_add(1, Ordering::Relaxed);
    }

    pub fn propagation(&self) {
        self.propagations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            decisions: self.decisions.load(Ordering::Relaxed),
            conflicts: self.conflicts.load(Ordering::Relaxed),
            propagations: self.propagations.load(Ordering::Relaxed),
        }
    }

    /// Print the counters without allocating or locking
    ///
    /// Only formatting into a stack buffer and `write(2)` are used, so this may be called from
    /// a signal handler.
    pub fn print_signal_safe(&self) {
        let mut buffer = StackBuffer::new();
        // A truncated snapshot is still printed
        let _ = self.snapshot().write_to(&mut buffer);
        buffer.flush();
    }
}

impl StatsSnapshot {
    fn write_to(&self, w: &mut impl Write) -> fmt::Result {
        writeln!(w, "c decisions:    {:>12}", self.decisions)?;
        writeln!(w, "c conflicts:    {:>12}", self.conflicts)?;
        writeln!(w, "c propagations: {:>12}", self.propagations)
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}

/// Fixed-size output buffer written straight to stdout
pub(crate) struct StackBuffer {
    bytes: [u8; 512],
    len: usize,
}

impl StackBuffer {
    pub(crate) fn new() -> Self {
        Self {
            bytes: [0; 512],
            len: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub(crate) fn flush(&mut self) {
        let mut written = 0;
        while written < self.len {
            let rest = &self.bytes[written..self.len];
            // SAFETY: `rest` is a valid initialized buffer, and write(2) is async-signal-safe
            let n = unsafe { libc::write(libc::STDOUT_FILENO, rest.as_ptr().cast(), rest.len()) };
            if n <= 0 {
                break;
            }
            written += n as usize;
        }
        self.len = 0;
    }
}

impl Write for StackBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > self.bytes.len() {
            return Err(fmt::Error);
        }
        self.bytes[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}
