//! Change notification for sources.

use parking_lot::{Condvar, Mutex};

use crate::changeset::ChangeSet;
use crate::error::{EnvError, EnvResult};

/// Blocking stream of change sets emitted by a source.
pub trait Watcher: Send + Sync {
    /// Block until the source changes, returning the new change set.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::WatcherStopped`] once [`Watcher::stop`] has been
    /// called.
    fn next(&self) -> EnvResult<ChangeSet>;

    /// Stop the watcher, waking any caller blocked in [`Watcher::next`].
    ///
    /// # Errors
    ///
    /// Implementations may fail to release underlying resources.
    fn stop(&self) -> EnvResult<()>;
}

/// Watcher that never reports a change.
///
/// [`Watcher::next`] blocks until [`Watcher::stop`] is called and then fails
/// with [`EnvError::WatcherStopped`].
#[derive(Debug, Default)]
pub struct NoopWatcher {
    stopped: Mutex<bool>,
    wake: Condvar,
}

impl NoopWatcher {
    /// Create a running watcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Watcher for NoopWatcher {
    fn next(&self) -> EnvResult<ChangeSet> {
        let mut stopped = self.stopped.lock();
        while !*stopped {
            self.wake.wait(&mut stopped);
        }
        Err(EnvError::WatcherStopped)
    }

    fn stop(&self) -> EnvResult<()> {
        *self.stopped.lock() = true;
        self.wake.notify_all();
        Ok(())
    }
}
