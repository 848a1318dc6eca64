use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cooperative cancellation signal shared by every worker of a
/// [`cluster`](crate::cluster) call.
///
/// Clones share the same underlying flag. Once cancelled, a token stays
/// cancelled. Workers poll it once per outer iteration, so a request is
/// honored after at most one more outer iteration per worker.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. This is async-signal-safe (it is a single
    /// atomic store).
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    #[inline(always)]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let token = CancelToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        token.cancel();
        assert!(other.is_cancelled());
        assert!(token.is_cancelled());
    }
}
