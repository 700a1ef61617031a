use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use studio_core::PROGRESS_COMPLETE;
use studio_engine::{
    AssetProber, EngineEvent, GenerationDriver, ProgressSink, SimulationSettings,
};
use tokio::runtime::Handle;

#[derive(Default)]
struct TestSink {
    events: Mutex<Vec<EngineEvent>>,
}

impl TestSink {
    fn take(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ProgressSink for TestSink {
    fn emit(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

struct FakeProber {
    existing: HashSet<String>,
    probed: Mutex<Vec<String>>,
}

impl FakeProber {
    fn with(existing: &[&str]) -> Self {
        Self {
            existing: existing.iter().map(|s| s.to_string()).collect(),
            probed: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl AssetProber for FakeProber {
    async fn exists(&self, candidate: &str) -> bool {
        self.probed.lock().unwrap().push(candidate.to_string());
        self.existing.contains(candidate)
    }
}

fn settings() -> SimulationSettings {
    SimulationSettings {
        tick_interval: Duration::from_millis(30),
        min_duration: Duration::from_secs(1),
        max_extra_duration: Duration::ZERO,
    }
}

fn attempt_of(event: &EngineEvent) -> u64 {
    match event {
        EngineEvent::Progress { attempt_id, .. } => *attempt_id,
        EngineEvent::GenerationFinished { attempt_id, .. } => *attempt_id,
        other => panic!("unexpected event {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn progress_is_monotonic_and_resolution_follows_timer() {
    studio_logging::initialize_for_tests();
    let prober = Arc::new(FakeProber::with(&["/Videos/B.mp4"]));
    let sink = Arc::new(TestSink::default());
    let mut driver = GenerationDriver::new(Handle::current(), prober.clone(), settings());

    driver.start(
        1,
        vec!["/Videos/A.mp4".into(), "/Videos/B.mp4".into(), "/Videos/C.mp4".into()],
        sink.clone(),
    );
    assert_eq!(driver.active_attempt(), Some(1));
    tokio::time::sleep(Duration::from_millis(1500)).await;

    let events = sink.take();
    let (last, progress) = events.split_last().expect("events");
    assert_eq!(
        last,
        &EngineEvent::GenerationFinished {
            attempt_id: 1,
            resolved: Some("/Videos/B.mp4".into()),
        }
    );
    let values: Vec<u8> = progress
        .iter()
        .map(|event| match event {
            EngineEvent::Progress { progress, .. } => *progress,
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert!(values.len() > 5);
    assert!(values.windows(2).all(|w| w[0] < w[1]));
    assert!(values.iter().all(|v| *v < PROGRESS_COMPLETE));
    assert_eq!(
        *prober.probed.lock().unwrap(),
        vec!["/Videos/A.mp4".to_string(), "/Videos/B.mp4".to_string()]
    );
    assert_eq!(driver.active_attempt(), None);
}

#[tokio::test(start_paused = true)]
async fn restarting_leaves_a_single_active_timer() {
    studio_logging::initialize_for_tests();
    let prober = Arc::new(FakeProber::with(&["/Videos/New.mp4"]));
    let sink = Arc::new(TestSink::default());
    let mut driver = GenerationDriver::new(Handle::current(), prober, settings());

    driver.start(1, vec!["/Videos/Old.mp4".into()], sink.clone());
    tokio::time::sleep(Duration::from_millis(300)).await;
    let before_restart = sink.take();
    assert!(!before_restart.is_empty());
    assert!(before_restart.iter().all(|e| attempt_of(e) == 1));

    driver.start(2, vec!["/Videos/New.mp4".into()], sink.clone());
    assert_eq!(driver.active_attempt(), Some(2));
    tokio::time::sleep(Duration::from_secs(3)).await;

    let after_restart = sink.take();
    assert!(after_restart.iter().all(|e| attempt_of(e) == 2));
    let finished: Vec<_> = after_restart
        .iter()
        .filter(|e| matches!(e, EngineEvent::GenerationFinished { .. }))
        .collect();
    assert_eq!(finished.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_stops_reporting() {
    let prober = Arc::new(FakeProber::with(&["/Videos/A.mp4"]));
    let sink = Arc::new(TestSink::default());
    let mut driver = GenerationDriver::new(Handle::current(), prober.clone(), settings());

    driver.start(5, vec!["/Videos/A.mp4".into()], sink.clone());
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(!driver.cancel_attempt(4));
    assert!(driver.cancel_attempt(5));
    sink.take();

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(sink.take().is_empty());
    assert!(prober.probed.lock().unwrap().is_empty());
    assert_eq!(driver.active_attempt(), None);
    assert_eq!(driver.cancel(), None);
}

#[test]
fn sampled_duration_stays_in_range() {
    let settings = SimulationSettings::default();
    for _ in 0..100 {
        let duration = settings.sample_duration();
        assert!(duration >= Duration::from_secs(18));
        assert!(duration <= Duration::from_secs(25));
    }
}
