//! Poll and tick timers feeding the controller's single-writer loop.
//!
//! Three tasks run per dashboard:
//! - the poll task fires immediately and then every poll interval, spawning
//!   one fetch task per flow so a slow response never delays the next cycle;
//! - the tick task fires every tick interval;
//! - the owner task holds the [`DataSyncController`] and applies events in
//!   arrival order.
//!
//! A late response is applied whenever it arrives, even if a newer cycle has
//! already landed.

use crate::core::domain::{
    error::{DashboardError, DashboardResult},
    model::dashboard_config::DashboardConfig,
};
use crate::core::infrastructure::source::DashboardSource;
use crate::presentation::view::DashboardView;
use crate::sync::{
    application::service::{
        node_sync_service::NodeSyncService, stats_sync_service::StatsSyncService,
    },
    controller::{DashboardEvent, DataSyncController, UserCommand},
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

pub struct RefreshScheduler<S: ?Sized> {
    source: Arc<S>,
    poll_interval: Duration,
    tick_interval: Duration,
}

impl<S> RefreshScheduler<S>
where
    S: DashboardSource + ?Sized + 'static,
{
    pub fn new(source: Arc<S>, config: &DashboardConfig) -> Self {
        Self {
            source,
            poll_interval: config.poll_interval,
            tick_interval: config.tick_interval,
        }
    }

    /// Spawns the poll, tick and owner tasks onto the current Tokio runtime.
    pub fn start<V>(self, controller: DataSyncController<V>) -> DashboardHandle
    where
        V: DashboardView + 'static,
    {
        let (events, receiver) = mpsc::unbounded_channel();

        info!(
            poll_secs = self.poll_interval.as_secs(),
            tick_ms = self.tick_interval.as_millis() as u64,
            "Starting dashboard refresh"
        );

        let owner = tokio::spawn(run_owner(controller, receiver));
        let poll = tokio::spawn(run_poll(self.source, self.poll_interval, events.clone()));
        let tick = tokio::spawn(run_tick(self.tick_interval, events.clone()));

        DashboardHandle {
            events,
            tasks: vec![owner, poll, tick],
        }
    }
}

async fn run_owner<V: DashboardView>(
    mut controller: DataSyncController<V>,
    mut receiver: mpsc::UnboundedReceiver<DashboardEvent>,
) {
    while let Some(event) = receiver.recv().await {
        controller.handle(event, Utc::now());
    }
}

async fn run_poll<S>(
    source: Arc<S>,
    period: Duration,
    events: mpsc::UnboundedSender<DashboardEvent>,
) where
    S: DashboardSource + ?Sized + 'static,
{
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;
        if events.is_closed() {
            break;
        }
        debug!("Starting poll cycle");

        let stats_source = Arc::clone(&source);
        let stats_events = events.clone();
        tokio::spawn(async move {
            let result = StatsSyncService::new().execute(stats_source.as_ref()).await;
            if stats_events.send(DashboardEvent::Stats(result)).is_err() {
                debug!("Dashboard stopped before stats arrived");
            }
        });

        let node_source = Arc::clone(&source);
        let node_events = events.clone();
        tokio::spawn(async move {
            let result = NodeSyncService::new().execute(node_source.as_ref()).await;
            if node_events.send(DashboardEvent::Nodes(result)).is_err() {
                debug!("Dashboard stopped before nodes arrived");
            }
        });
    }
}

async fn run_tick(period: Duration, events: mpsc::UnboundedSender<DashboardEvent>) {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        if events.send(DashboardEvent::Tick).is_err() {
            break;
        }
    }
}

/// Handle to a running dashboard.
///
/// Dropping it leaves the timers running for the life of the runtime; call
/// [`DashboardHandle::shutdown`] to stop them.
#[derive(Debug)]
pub struct DashboardHandle {
    events: mpsc::UnboundedSender<DashboardEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl DashboardHandle {
    /// Queues a user command behind any pending events.
    ///
    /// # Errors
    /// Returns `DashboardError::View` once the dashboard has been shut down.
    pub fn send(&self, command: UserCommand) -> DashboardResult<()> {
        self.events
            .send(DashboardEvent::Command(command))
            .map_err(|_| DashboardError::View("dashboard is no longer running".to_string()))
    }

    /// Stops the timers and the owner task. In-flight fetches finish but
    /// their results are discarded.
    pub fn shutdown(self) {
        for task in self.tasks {
            task.abort();
        }
    }
}
