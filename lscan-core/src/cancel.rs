//! Cooperative cancellation shared between a host and a running pipeline

use crate::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cloneable flag a host raises to stop a running pipeline.
///
/// Clones share the same underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Create a flag that is not raised
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// True once [`CancelFlag::cancel`] has been called on any clone
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Return `Error::Cancelled` naming `stage` if the flag is raised
    pub fn check(&self, stage: &'static str) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled { stage })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_state() {
        let flag = CancelFlag::new();
        let host = flag.clone();
        assert!(flag.check("grouping").is_ok());

        host.cancel();
        assert!(flag.is_cancelled());
        assert_eq!(flag.check("grouping"), Err(Error::Cancelled { stage: "grouping" }));
    }
}
