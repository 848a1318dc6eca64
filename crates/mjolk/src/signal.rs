//! Turns SIGINT/SIGTERM into cancellation requests.
//!
//! The handler cancels the [`CancelToken`] of the computation that is
//! currently running, so each input file gets its own token. A signal that
//! arrives between two files cancels the next one as soon as it is watched.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use galaxy::CancelToken;

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static CURRENT: Mutex<Option<CancelToken>> = Mutex::new(None);

fn current() -> MutexGuard<'static, Option<CancelToken>> {
    // a token is always in a valid state, even after a panic elsewhere
    CURRENT.lock().unwrap_or_else(PoisonError::into_inner)
}

fn on_signal() {
    tracing::warn!("interrupted, finishing with partial results");
    INTERRUPTED.store(true, Ordering::SeqCst);
    if let Some(token) = current().as_ref() {
        token.cancel();
    }
}

/// Route SIGINT and SIGTERM to [`watch`]ed tokens instead of terminating the
/// process.
pub fn install() -> Result<(), ctrlc::Error> {
    ctrlc::set_handler(on_signal)
}

/// Cancels the watched token on a signal, until dropped
pub struct SignalWatch {
    _private: (),
}

pub fn watch(token: CancelToken) -> SignalWatch {
    if INTERRUPTED.load(Ordering::SeqCst) {
        token.cancel();
    }
    *current() = Some(token);
    SignalWatch { _private: () }
}

impl Drop for SignalWatch {
    fn drop(&mut self) {
        *current() = None;
    }
}
