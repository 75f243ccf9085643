use std::sync::atomic::{AtomicBool, Ordering};

/// Process-wide stop request, polled by the search loop
///
/// Once set it stays set for the rest of the run.
#[derive(Debug, Default)]
pub struct TerminationFlag(AtomicBool);

impl TerminationFlag {
    /// Request termination. Returns `true` only for the call that actually set the flag.
    pub fn terminate(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
