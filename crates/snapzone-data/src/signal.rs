use std::sync::{Arc, Condvar, Mutex, PoisonError};

#[derive(Debug, Default)]
struct Latch {
    fired: Mutex<bool>,
    cond: Condvar,
}

impl Latch {
    fn is_fired(&self) -> bool {
        *self.fired.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One-shot "table is loaded" notification.
///
/// Waiters obtained through [`LoadSignal::subscribe`] block until the
/// signal fires; once fired, every wait returns immediately. Waiting never
/// starts a load.
///
/// # Examples
///
/// ```
/// use std::thread;
///
/// use snapzone_data::signal::LoadSignal;
///
/// let signal = LoadSignal::new();
/// let waiter = signal.subscribe();
/// let handle = thread::spawn(move || waiter.wait());
/// signal.fire();
/// handle.join().unwrap();
/// assert!(signal.subscribe().is_ready());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoadSignal {
    latch: Arc<Latch>,
}

/// Handle for waiting on a [`LoadSignal`].
#[derive(Debug, Clone)]
pub struct LoadWaiter {
    latch: Arc<Latch>,
}

impl LoadSignal {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn subscribe(&self) -> LoadWaiter {
        LoadWaiter {
            latch: Arc::clone(&self.latch),
        }
    }

    #[must_use]
    pub fn is_fired(&self) -> bool {
        self.latch.is_fired()
    }

    /// Fires the signal, releasing every current waiter.
    pub fn fire(&self) {
        let mut fired = self
            .latch
            .fired
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        *fired = true;
        self.latch.cond.notify_all();
    }

    /// Arms a fresh latch for the next load if this one already fired.
    ///
    /// Waiters subscribed before the rearm keep the fired latch.
    pub fn rearm(&mut self) {
        if self.is_fired() {
            self.latch = Arc::default();
        }
    }
}

impl LoadWaiter {
    /// Blocks until the signal fires.
    pub fn wait(&self) {
        let fired = self
            .latch
            .fired
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let _fired = self
            .latch
            .cond
            .wait_while(fired, |fired| !*fired)
            .unwrap_or_else(PoisonError::into_inner);
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.latch.is_fired()
    }
}
