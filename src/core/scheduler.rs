//! Alert check scheduling.
//!
//! A timer task marks an alert check as pending; the frame thread drains the
//! mark once per frame and does the actual work. Ticks that land before the
//! frame drains the flag coalesce into one check.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::error::{RadarError, Result};

pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_millis(50);

/// Single-slot mailbox shared between the timer and the frame thread
#[derive(Debug, Clone, Default)]
pub struct AlertSignal {
    pending: Arc<Mutex<bool>>,
}

impl AlertSignal {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, bool> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Mark a check as pending. Never blocks on engine work.
    pub fn request(&self) {
        *self.lock() = true;
    }

    /// Clear the pending mark, returning whether one was set
    pub fn take(&self) -> bool {
        std::mem::replace(&mut *self.lock(), false)
    }

    pub fn is_pending(&self) -> bool {
        *self.lock()
    }
}

/// Periodic timer feeding an [`AlertSignal`]
pub struct AlertScheduler {
    signal: AlertSignal,
    period: Duration,
    task: Option<JoinHandle<()>>,
}

impl AlertScheduler {
    pub fn new(period: Duration) -> Self {
        Self {
            signal: AlertSignal::new(),
            period: period.max(Duration::from_millis(1)),
            task: None,
        }
    }

    pub fn signal(&self) -> AlertSignal {
        self.signal.clone()
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Start on the ambient tokio runtime
    pub fn start(&mut self) -> Result<()> {
        let handle = Handle::try_current().map_err(|e| RadarError::Scheduler(e.to_string()))?;
        self.start_on(&handle);
        Ok(())
    }

    /// Start (or restart) the timer on the given runtime. The first tick is
    /// immediate.
    pub fn start_on(&mut self, handle: &Handle) {
        self.stop();

        let signal = self.signal.clone();
        let period = self.period;
        self.task = Some(handle.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                signal.request();
            }
        }));
        log::debug!("Alert timer started ({}ms)", period.as_millis());
    }

    /// Stop future ticks. A check already pending stays pending.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            log::debug!("Alert timer stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Default for AlertScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_CHECK_INTERVAL)
    }
}

impl Drop for AlertScheduler {
    fn drop(&mut self) {
        self.stop();
    }
}
