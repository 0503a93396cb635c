//! # Inactivity Tracker
//!
//! Runs a callback once the register has seen no activity for a while.
//!
//! ## Countdown Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     countdown task (tokio::spawn)                        │
//! │                                                                         │
//! │   loop {                                                                │
//! │     select! {                                                           │
//! │       deadline elapsed ───► active = false, on_idle(), disarm           │
//! │       activity signal ───► active = true, deadline = now + timeout      │
//! │       Control::Reset   ───► active = true, deadline = now + timeout     │
//! │       control closed   ───► exit                                        │
//! │     }                                                                   │
//! │   }                                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A disarmed countdown stays idle until the next signal or `reset_timer`,
//! so the callback runs exactly once per elapsed countdown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, trace};

/// Input events that count as activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivitySignal {
    PointerDown,
    PointerMove,
    KeyPress,
    Scroll,
    TouchStart,
    Click,
}

#[derive(Debug)]
enum Control {
    Reset,
}

/// Idle timer over a stream of [`ActivitySignal`]s.
///
/// Starts active with the countdown armed. Dropping the tracker cancels the
/// countdown.
#[derive(Debug)]
pub struct InactivityTracker {
    active: Arc<AtomicBool>,
    control: mpsc::UnboundedSender<Control>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl InactivityTracker {
    /// Arms the countdown and starts listening on `signals`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<F>(
        timeout: Duration,
        signals: broadcast::Receiver<ActivitySignal>,
        on_idle: F,
    ) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        let active = Arc::new(AtomicBool::new(true));
        let (control, control_rx) = mpsc::unbounded_channel();
        let deadline = Instant::now() + timeout;

        let task = tokio::spawn(countdown(
            timeout,
            deadline,
            signals,
            control_rx,
            active.clone(),
            on_idle,
        ));

        debug!(timeout_secs = timeout.as_secs(), "Inactivity tracker started");

        InactivityTracker {
            active,
            control,
            task: Mutex::new(Some(task)),
        }
    }

    /// Marks the register active and restarts the countdown.
    pub fn reset_timer(&self) {
        self.active.store(true, Ordering::SeqCst);
        // The countdown is gone after cleanup; nothing to re-arm.
        let _ = self.control.send(Control::Reset);
    }

    /// False between an elapsed countdown and the next activity.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Cancels the countdown and stops listening for signals.
    ///
    /// Safe to call more than once.
    pub fn cleanup(&self) {
        let task = self
            .task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(task) = task {
            task.abort();
            debug!("Inactivity tracker stopped");
        }
    }
}

impl Drop for InactivityTracker {
    fn drop(&mut self) {
        self.cleanup();
    }
}

async fn countdown<F>(
    timeout: Duration,
    deadline: Instant,
    mut signals: broadcast::Receiver<ActivitySignal>,
    mut control: mpsc::UnboundedReceiver<Control>,
    active: Arc<AtomicBool>,
    mut on_idle: F,
) where
    F: FnMut() + Send + 'static,
{
    let mut deadline = Some(deadline);
    let mut listening = true;

    loop {
        let rearm = tokio::select! {
            _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                deadline = None;
                active.store(false, Ordering::SeqCst);
                debug!("Inactivity timeout elapsed");
                on_idle();
                false
            }

            signal = signals.recv(), if listening => match signal {
                Ok(signal) => {
                    trace!(?signal, "Activity");
                    true
                }
                // Missed signals were still activity.
                Err(RecvError::Lagged(_)) => true,
                Err(RecvError::Closed) => {
                    listening = false;
                    false
                }
            },

            msg = control.recv() => match msg {
                Some(Control::Reset) => true,
                None => break,
            },
        };

        if rearm {
            active.store(true, Ordering::SeqCst);
            deadline = Some(Instant::now() + timeout);
        }
    }
}
