use crate::state::messages::UiEvent;
use log::debug;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// One-shot liveness timer. Each `schedule()` arms a single tick; the
/// navigator asks for the next one after handling it.
pub struct PeriodicRefresher {
    ui_events: mpsc::Sender<UiEvent>,
    interval: Duration,
    pending: Option<JoinHandle<()>>,
}

impl PeriodicRefresher {
    pub fn new(ui_events: mpsc::Sender<UiEvent>, interval: Duration) -> Self {
        Self { ui_events, interval, pending: None }
    }

    /// Arm the next tick, replacing any tick still waiting.
    pub fn schedule(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let ui_events = self.ui_events.clone();
        let interval = self.interval;
        self.pending = Some(tokio::spawn(async move {
            sleep(interval).await;
            if ui_events.send(UiEvent::LivenessTick).await.is_err() {
                debug!("ui channel closed, dropping liveness tick");
            }
        }));
    }

    pub fn shutdown(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}
