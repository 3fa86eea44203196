//! Tick scheduling - the single recurring timer driving the game

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tracing::debug;

use crate::game::game_loop;
use crate::state::AppState;

/// Owns the recurring tick task. At most one task is ever active: every
/// reschedule aborts the previous handle before installing the replacement,
/// so a superseded period can never fire again.
#[derive(Debug, Default)]
pub struct TickScheduler {
    handle: Option<JoinHandle<()>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self { handle: None }
    }

    /// Whether a tick task is currently installed
    pub fn is_active(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Cancel the current tick task and start a new one at `period`. The new
    /// task's first tick fires one full period from now, not on the old
    /// task's schedule.
    pub fn reschedule(&mut self, state: Arc<AppState>, period: Duration) {
        self.cancel();
        debug!("Tick task rescheduled at {:?}", period);
        self.handle = Some(spawn_tick_task(state, period));
    }

    /// Stop ticking. The abort lands at the task's next await point; the
    /// session's run-state guard covers a tick already past it.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

impl Drop for TickScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn spawn_tick_task(state: Arc<AppState>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticks = time::interval_at(Instant::now() + period, period);

        loop {
            ticks.tick().await;
            game_loop::run_tick(&state).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_cancel_is_idempotent() {
        let mut scheduler = TickScheduler::new();
        assert!(!scheduler.is_active());

        scheduler.cancel();
        scheduler.cancel();
        assert!(!scheduler.is_active());
    }

    #[tokio::test]
    async fn test_reschedule_replaces_the_handle() {
        let state = Arc::new(AppState::new());
        let mut scheduler = TickScheduler::new();

        scheduler.reschedule(state.clone(), Duration::from_secs(60));
        assert!(scheduler.is_active());

        // A second reschedule aborts the first task before installing the
        // new one; there is still exactly one handle
        scheduler.reschedule(state, Duration::from_secs(60));
        assert!(scheduler.is_active());

        scheduler.cancel();
        assert!(!scheduler.is_active());
    }
}
