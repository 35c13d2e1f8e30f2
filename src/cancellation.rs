use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

// @module: Cooperative cancellation flag shared across conversion tasks

/// Cloneable cancellation flag.
///
/// Checked between files and between segments within one file; in-progress
/// pure computation is never forcibly interrupted. All clones observe the
/// same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a token that has not been cancelled
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation to every holder of this token
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
