use std::sync::Arc;

use portable_atomic::{AtomicBool, Ordering};

/// A cooperative shutdown request shared between a signal handler and the driver.
///
/// Clones share the same flag. Setting it never interrupts work in progress;
/// the driver only checks it between attempts.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    /// Creates an unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests shutdown.
    pub fn request(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Returns `true` once shutdown has been requested through any clone.
    #[must_use]
    pub fn is_requested(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let flag = ShutdownFlag::new();
        let handle = flag.clone();
        assert!(!flag.is_requested());
        handle.request();
        assert!(flag.is_requested());
    }
}
