//! Stopping the solver from signal handlers and the soft time limit
//!
//! Handlers run on the solving thread at arbitrary points, so everything they do is limited to
//! atomic stores, formatting into a stack buffer and async-signal-safe system calls. The
//! search loop only ever sees the [TerminationFlag].

use crate::{stats::StackBuffer, Solver, Statistics};
use signal_hook::{
    consts::{SIGABRT, SIGALRM, SIGINT, SIGTERM},
    low_level, SigId,
};
use std::{
    fmt::Write,
    io,
    os::raw::c_int,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

mod flag;

pub use flag::TerminationFlag;

/// Signals on which statistics are printed before the process dies
pub const FATAL_SIGNALS: &[c_int] = &[SIGABRT, SIGINT, SIGTERM];

/// The single view of the running solver the handlers get
#[derive(Debug, Clone)]
pub struct EngineHandle {
    flag: Arc<TerminationFlag>,
    stats: Arc<Statistics>,
}

impl EngineHandle {
    pub fn new(flag: Arc<TerminationFlag>, stats: Arc<Statistics>) -> Self {
        Self { flag, stats }
    }

    pub fn terminate(&self) -> bool {
        self.flag.terminate()
    }

    pub fn is_terminated(&self) -> bool {
        self.flag.is_set()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    Armed,
    Triggered,
    Finalizing,
}

/// Owns the signal and alarm registrations for one solver run
#[derive(Debug, Default)]
pub struct Controller {
    handle: Option<EngineHandle>,
    ignore_alarm: Arc<AtomicBool>,
    signals: Vec<SigId>,
    alarm: Option<SigId>,
    finalizing: bool,
}

impl Controller {
    pub fn state(&self) -> State {
        match &self.handle {
            None => State::Idle,
            Some(_) if self.finalizing => State::Finalizing,
            Some(handle) if handle.is_terminated() => State::Triggered,
            Some(_) => State::Armed,
        }
    }

    /// Install the handlers for `handle` and schedule the alarm after `timeout`
    pub fn arm(&mut self, handle: EngineHandle, timeout: Option<Duration>) -> io::Result<()> {
        assert_eq!(self.state(), State::Idle, "Arming an active controller");
        self.ignore_alarm.store(false, Ordering::SeqCst);
        if let Err(err) = self.install(&handle) {
            self.disarm();
            return Err(err);
        }
        if let Some(timeout) = timeout {
            let secs = u32::try_from(timeout.as_secs()).unwrap_or(u32::MAX);
            if secs > 0 {
                log::debug!("scheduling alarm in {secs} seconds");
                // SAFETY: alarm(2) has no memory safety requirements
                unsafe { libc::alarm(secs) };
            }
        }
        self.handle = Some(handle);
        Ok(())
    }

    fn install(&mut self, handle: &EngineHandle) -> io::Result<()> {
        for &signal in FATAL_SIGNALS {
            let handle = handle.clone();
            // SAFETY: the action only touches atomics, a stack buffer, write(2) and raise(2)
            let id = unsafe { low_level::register(signal, move || on_fatal_signal(&handle, signal)) }?;
            self.signals.push(id);
        }
        let ignore = Arc::clone(&self.ignore_alarm);
        let handle = handle.clone();
        // SAFETY: the action only performs atomic loads and stores
        let id = unsafe {
            low_level::register(SIGALRM, move || {
                on_alarm(&ignore, &handle);
            })
        }?;
        self.alarm = Some(id);
        Ok(())
    }

    /// Remove all handlers and make a late alarm harmless
    pub fn disarm(&mut self) {
        for id in self.signals.drain(..) {
            low_level::unregister(id);
        }
        self.ignore_alarm.store(true, Ordering::SeqCst);
        // SAFETY: alarm(2) has no memory safety requirements
        unsafe { libc::alarm(0) };
        if let Some(id) = self.alarm.take() {
            low_level::unregister(id);
        }
        if self.handle.is_some() {
            self.finalizing = true;
        }
    }

    /// Disarm before `solver` is released, then drop the engine handle
    pub fn teardown(&mut self, solver: Solver) {
        self.disarm();
        solver.release();
        self.handle = None;
        self.finalizing = false;
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.disarm();
    }
}

/// Alarm action: request termination unless teardown already started
///
/// Returns `true` if this call set the flag.
pub fn on_alarm(ignore: &AtomicBool, handle: &EngineHandle) -> bool {
    if ignore.load(Ordering::SeqCst) {
        return false;
    }
    handle.terminate()
}

fn on_fatal_signal(handle: &EngineHandle, signal: c_int) {
    handle.terminate();
    let mut buffer = StackBuffer::new();
    let _ = writeln!(buffer, "c caught signal {signal}");
    buffer.flush();
    handle.stats.print_signal_safe();
    let _ = writeln!(buffer, "c raising signal {signal}");
    buffer.flush();
    // SAFETY: signal(2) and raise(2) are async-signal-safe. The signal stays blocked until this
    // handler returns and is then delivered with the default action.
    unsafe { libc::signal(signal, libc::SIG_DFL) };
    let _ = low_level::raise(signal);
}
