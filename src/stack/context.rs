//! Cancellation and deadline handling for a detection run.

use crate::error::DetectionError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Execution context shared between the caller and a running detection.
///
/// Clones share the same cancellation flag, so a signal handler can hold one
/// clone while the registry checks another.
#[derive(Debug, Clone, Default)]
pub struct DetectContext {
    cancelled: Arc<AtomicBool>,
    deadline: Option<Instant>,
}

impl DetectContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new().deadline_at(Instant::now() + timeout)
    }

    pub fn deadline_at(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Fails once the context is cancelled or past its deadline.
    pub fn check(&self) -> Result<(), DetectionError> {
        if self.is_cancelled() {
            return Err(DetectionError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(DetectionError::DeadlineExceeded),
            _ => Ok(()),
        }
    }
}
