use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

/// Cooperative cancellation for a running optimization. The engines
/// check this at the top of every generation and after each
/// heavyweight operator; on stop they return the best result found so
/// far, flagged as aborted. A deadline behaves like a stop that trips
/// itself once the elapsed-time budget runs out.
#[derive(Clone, Debug)]
pub struct RunControl {
    stop: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl RunControl {
    pub fn new() -> Self {
        RunControl {
            stop: Arc::new(AtomicBool::new(false)),
            deadline: None,
        }
    }

    /// A control that trips after `timeout` of wall time.
    pub fn with_timeout(timeout: Duration) -> Self {
        RunControl {
            stop: Arc::new(AtomicBool::new(false)),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Requests a cooperative stop. Callable from any thread holding a
    /// clone of this control.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_stopped(&self) -> bool {
        if self.stop.load(Ordering::Relaxed) {
            return true;
        }

        match self.deadline {
            Some(deadline) => Instant::now() >= deadline,
            None => false,
        }
    }
}

impl Default for RunControl {
    fn default() -> Self {
        RunControl::new()
    }
}
