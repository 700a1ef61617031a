use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use studio_core::{eased_progress, AttemptId, PROGRESS_PENDING_MAX};
use studio_logging::{studio_debug, studio_info};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::probe::{resolve_first, AssetProber};
use crate::{EngineEvent, ProgressSink};

#[derive(Debug, Clone)]
pub struct SimulationSettings {
    pub tick_interval: Duration,
    pub min_duration: Duration,
    /// Upper bound of the random extra added to `min_duration`.
    pub max_extra_duration: Duration,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(30),
            min_duration: Duration::from_secs(18),
            max_extra_duration: Duration::from_secs(7),
        }
    }
}

impl SimulationSettings {
    /// Short durations for demos and manual testing.
    pub fn fast() -> Self {
        Self {
            min_duration: Duration::from_secs(2),
            max_extra_duration: Duration::from_secs(1),
            ..Self::default()
        }
    }

    pub fn sample_duration(&self) -> Duration {
        if self.max_extra_duration.is_zero() {
            return self.min_duration;
        }
        let extra = rand::thread_rng().gen_range(Duration::ZERO..=self.max_extra_duration);
        self.min_duration + extra
    }
}

struct ActiveAttempt {
    attempt_id: AttemptId,
    token: CancellationToken,
    handle: JoinHandle<()>,
}

/// Runs the timer of at most one generation attempt at a time.
pub struct GenerationDriver {
    runtime: Handle,
    prober: Arc<dyn AssetProber>,
    settings: SimulationSettings,
    active: Option<ActiveAttempt>,
}

impl GenerationDriver {
    pub fn new(runtime: Handle, prober: Arc<dyn AssetProber>, settings: SimulationSettings) -> Self {
        Self {
            runtime,
            prober,
            settings,
            active: None,
        }
    }

    /// Arms the timer for a new attempt, cancelling whatever was running.
    pub fn start(
        &mut self,
        attempt_id: AttemptId,
        candidates: Vec<String>,
        sink: Arc<dyn ProgressSink>,
    ) {
        self.cancel();
        let duration = self.settings.sample_duration();
        studio_info!(
            "Attempt {} generating for {:?} over {} candidates",
            attempt_id,
            duration,
            candidates.len()
        );

        let token = CancellationToken::new();
        let handle = self.runtime.spawn(run_attempt(
            attempt_id,
            candidates,
            duration,
            self.settings.tick_interval,
            self.prober.clone(),
            sink,
            token.clone(),
        ));
        self.active = Some(ActiveAttempt {
            attempt_id,
            token,
            handle,
        });
    }

    /// Stops the running timer, if any. Returns the id it belonged to.
    pub fn cancel(&mut self) -> Option<AttemptId> {
        let active = self.active.take()?;
        active.token.cancel();
        if active.handle.is_finished() {
            return None;
        }
        studio_info!("Attempt {} timer cancelled", active.attempt_id);
        Some(active.attempt_id)
    }

    /// Cancels only if `attempt_id` is the running attempt.
    pub fn cancel_attempt(&mut self, attempt_id: AttemptId) -> bool {
        match &self.active {
            Some(active) if active.attempt_id == attempt_id => self.cancel().is_some(),
            _ => false,
        }
    }

    pub fn active_attempt(&self) -> Option<AttemptId> {
        self.active
            .as_ref()
            .filter(|active| !active.handle.is_finished())
            .map(|active| active.attempt_id)
    }
}

impl Drop for GenerationDriver {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn run_attempt(
    attempt_id: AttemptId,
    candidates: Vec<String>,
    duration: Duration,
    tick_interval: Duration,
    prober: Arc<dyn AssetProber>,
    sink: Arc<dyn ProgressSink>,
    token: CancellationToken,
) {
    let started = Instant::now();
    let mut ticker = tokio::time::interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut last_reported = None;

    loop {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                studio_debug!("Attempt {} stopped before completion", attempt_id);
                return;
            }
            _ = ticker.tick() => {}
        }
        let elapsed = started.elapsed();
        if elapsed >= duration {
            break;
        }
        let progress = eased_progress(elapsed, duration).min(PROGRESS_PENDING_MAX);
        if last_reported != Some(progress) && !token.is_cancelled() {
            last_reported = Some(progress);
            sink.emit(EngineEvent::Progress {
                attempt_id,
                progress,
            });
        }
    }

    let resolved = tokio::select! {
        biased;
        _ = token.cancelled() => return,
        resolved = resolve_first(prober.as_ref(), &candidates) => resolved,
    };
    if token.is_cancelled() {
        return;
    }
    sink.emit(EngineEvent::GenerationFinished {
        attempt_id,
        resolved,
    });
}
