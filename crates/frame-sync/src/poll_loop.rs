//! Cancellable repeating task that ticks a [`GestureSession`].
//!
//! The loop owns the session for as long as it runs. Each tick's report is
//! published on a watch channel, so a renderer only ever sees the most
//! recent camera state. Stopping hands the session back to the caller.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use handorbit_common::error::{HandOrbitError, HandOrbitResult};
use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::session::{GestureSession, TickReport};
use crate::{HandDetector, VideoSource};

pub struct PollLoop<S, D> {
    stop_flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
    reports: watch::Receiver<Option<TickReport>>,
    task: Option<JoinHandle<GestureSession<S, D>>>,
}

impl<S, D> PollLoop<S, D>
where
    S: VideoSource + 'static,
    D: HandDetector + 'static,
{
    /// Spawn the loop on the current tokio runtime.
    ///
    /// Must be called from within a runtime. A tick rate of zero is treated
    /// as one tick per second.
    pub fn start(mut session: GestureSession<S, D>, tick_rate_hz: u32) -> Self {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let notify = Arc::new(Notify::new());
        let (tx, rx) = watch::channel(None);
        let period = Duration::from_secs_f64(1.0 / f64::from(tick_rate_hz.max(1)));

        let flag = Arc::clone(&stop_flag);
        let wake = Arc::clone(&notify);
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            tracing::info!(tick_rate_hz, "Poll loop started");

            loop {
                tokio::select! {
                    _ = interval.tick() => {}
                    _ = wake.notified() => {}
                }
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                let report = session.tick();
                tx.send_replace(Some(report));
            }

            tracing::info!(
                ticks = session.controller().ticks(),
                detector_calls = session.sync_stats().detector_calls,
                "Poll loop stopped"
            );
            session
        });

        Self {
            stop_flag,
            notify,
            reports: rx,
            task: Some(task),
        }
    }

    /// Receiver that always holds the most recent report.
    pub fn subscribe(&self) -> watch::Receiver<Option<TickReport>> {
        self.reports.clone()
    }

    /// Most recent report, or `None` before the first tick.
    pub fn latest(&self) -> Option<TickReport> {
        *self.reports.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Shared stop flag, for wiring into signal handlers.
    pub fn stop_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_flag)
    }

    /// Stop the loop and return the session.
    ///
    /// No tick runs after this returns. Ticks already scheduled on the
    /// interval are dropped.
    pub async fn stop(mut self) -> HandOrbitResult<GestureSession<S, D>> {
        self.stop_flag.store(true, Ordering::SeqCst);
        self.notify.notify_one();

        let Some(task) = self.task.take() else {
            return Err(HandOrbitError::Other(anyhow::anyhow!(
                "poll loop already stopped"
            )));
        };
        task.await
            .map_err(|e| HandOrbitError::Other(anyhow::anyhow!("poll loop task failed: {e}")))
    }
}

impl<S, D> Drop for PollLoop<S, D> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            self.stop_flag.store(true, Ordering::SeqCst);
            task.abort();
        }
    }
}
