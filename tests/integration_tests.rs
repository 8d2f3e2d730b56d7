//! Integration tests for the radar loop
//!
//! The loop runs under paused tokio time, so hours of sleeping finish
//! instantly. The wall clock seen by the market-hours gate follows the same
//! virtual time.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

use nifty_radar::market::PriceSource;
use nifty_radar::notify::Notifier;
use nifty_radar::schedule::{ist, Clock};
use nifty_radar::targets::TargetSource;
use nifty_radar::{Cycle, Radar, RadarError, RadarResult, ScheduleWindow, TargetSet, Timings};

// =============================================================================
// Test Utilities
// =============================================================================

const TARGETS_ON: &str = "CE : 18500\nPE : 18000\nBUFFER : 20\nRADAR : Yes";
const TARGETS_OFF: &str = "CE : 18500\nPE : 18000\nBUFFER : 20\nRADAR : No";

/// Wall clock that starts at `base` and advances with tokio's clock
struct VirtualClock {
    base: DateTime<FixedOffset>,
    origin: Instant,
}

impl VirtualClock {
    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> Self {
        Self {
            base: ist().with_ymd_and_hms(y, mo, d, h, mi, s).unwrap(),
            origin: Instant::now(),
        }
    }
}

/// 2026-10-19
fn monday(h: u32, mi: u32, s: u32) -> VirtualClock {
    VirtualClock::at(2026, 10, 19, h, mi, s)
}

/// 2026-10-17
fn saturday(h: u32, mi: u32, s: u32) -> VirtualClock {
    VirtualClock::at(2026, 10, 17, h, mi, s)
}

impl Clock for VirtualClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.base + chrono::Duration::from_std(self.origin.elapsed()).unwrap()
    }
}

/// Price source replaying a script; each call is timestamped
struct ScriptedPrices {
    script: Mutex<VecDeque<RadarResult<i64>>>,
    latency: Duration,
    calls: Mutex<Vec<Instant>>,
}

impl ScriptedPrices {
    fn new(script: Vec<RadarResult<i64>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            latency: Duration::ZERO,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    fn calls(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PriceSource for ScriptedPrices {
    async fn latest_price(&self) -> RadarResult<i64> {
        self.calls.lock().unwrap().push(Instant::now());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Err(RadarError::NoPriceData("^NSEI".to_string())))
    }
}

struct FixedTargets(&'static str);

#[async_trait]
impl TargetSource for FixedTargets {
    async fn latest_message_text(&self) -> RadarResult<String> {
        Ok(self.0.to_string())
    }
}

struct NoTargets;

#[async_trait]
impl TargetSource for NoTargets {
    async fn latest_message_text(&self) -> RadarResult<String> {
        Err(RadarError::NoUpdates)
    }
}

#[derive(Default)]
struct Recorder(Mutex<Vec<String>>);

impl Recorder {
    fn sent(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for Recorder {
    async fn send(&self, text: &str) -> bool {
        self.0.lock().unwrap().push(text.to_string());
        true
    }
}

fn radar<'a, T: TargetSource>(
    prices: &'a ScriptedPrices,
    targets: T,
    notifier: &'a Recorder,
    clock: VirtualClock,
) -> Radar<&'a ScriptedPrices, T, &'a Recorder, VirtualClock> {
    Radar::new(
        ScheduleWindow::default(),
        Timings::default(),
        prices,
        targets,
        notifier,
        clock,
    )
}

fn assert_close(actual: Duration, expected: Duration) {
    let diff = if actual > expected {
        actual - expected
    } else {
        expected - actual
    };
    assert!(
        diff < Duration::from_millis(5),
        "got {:?}, expected {:?}",
        actual,
        expected
    );
}

fn assert_elapsed(start: Instant, expected: Duration) {
    assert_close(start.elapsed(), expected);
}

// =============================================================================
// Schedule Gate
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_weekend_notifies_and_sleeps_a_day() {
    let prices = ScriptedPrices::new(vec![]);
    let notifier = Recorder::default();
    // Saturday
    let radar = radar(&prices, FixedTargets(TARGETS_ON), &notifier, saturday(10, 0, 0));

    let start = Instant::now();
    assert_eq!(radar.run_cycle().await, Cycle::Weekend);

    assert_eq!(notifier.sent(), ["----weekend----"]);
    assert_elapsed(start, Duration::from_secs(24 * 3600));
    assert!(prices.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_weekday_before_open_backs_off_quietly() {
    let prices = ScriptedPrices::new(vec![]);
    let notifier = Recorder::default();
    // Monday, 08:54:59
    let radar = radar(&prices, FixedTargets(TARGETS_ON), &notifier, monday(8, 54, 59));

    let start = Instant::now();
    assert_eq!(radar.run_cycle().await, Cycle::OutsideWindow);

    assert!(notifier.sent().is_empty());
    assert_elapsed(start, Duration::from_secs(5 * 60));
}

#[tokio::test(start_paused = true)]
async fn test_cycles_until_market_opens() {
    let prices = ScriptedPrices::new(vec![]);
    let notifier = Recorder::default();
    // Monday, 08:45: two back-offs reach 08:55
    let radar = radar(&prices, FixedTargets(TARGETS_OFF), &notifier, monday(8, 45, 0));

    assert_eq!(radar.run_cycle().await, Cycle::OutsideWindow);
    assert_eq!(radar.run_cycle().await, Cycle::OutsideWindow);
    assert!(matches!(radar.run_cycle().await, Cycle::Session(_)));
}

// =============================================================================
// Sessions
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_radar_off_skips_monitoring() {
    let prices = ScriptedPrices::new(vec![Ok(18480)]);
    let notifier = Recorder::default();
    let radar = radar(&prices, FixedTargets(TARGETS_OFF), &notifier, monday(10, 0, 0));

    let start = Instant::now();
    let Cycle::Session(report) = radar.run_cycle().await else {
        panic!("expected a session");
    };

    assert_eq!(report.ticks, 0);
    assert!(!report.stopped_by_close);
    assert!(!report.targets.radar);
    assert!(prices.calls().is_empty());
    assert_eq!(
        notifier.sent(),
        ["Radar started", "failed to fetch, update the targets"]
    );
    assert_elapsed(start, Duration::from_secs(5 * 60));
}

#[tokio::test(start_paused = true)]
async fn test_target_error_is_reported_and_radar_stays_off() {
    let prices = ScriptedPrices::new(vec![]);
    let notifier = Recorder::default();
    let radar = radar(&prices, NoTargets, &notifier, monday(10, 0, 0));

    let Cycle::Session(report) = radar.run_cycle().await else {
        panic!("expected a session");
    };

    assert_eq!(report.ticks, 0);
    assert_eq!(report.targets, TargetSet::default());
    assert_eq!(
        notifier.sent(),
        [
            "received error : no updates received by the bot",
            "Radar started",
            "failed to fetch, update the targets"
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_malformed_targets_are_reported() {
    let prices = ScriptedPrices::new(vec![]);
    let notifier = Recorder::default();
    let targets = FixedTargets("CE : 18500\nPE : 18000\nBUFFER : 20");
    let radar = radar(&prices, targets, &notifier, monday(10, 0, 0));

    radar.run_cycle().await;

    assert_eq!(
        notifier.sent()[0],
        "received error : parse error: missing RADAR line"
    );
    assert!(prices.calls().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_session_stops_when_market_closes() {
    let prices = ScriptedPrices::new(vec![Ok(18480), Ok(18250)]);
    let notifier = Recorder::default();
    // Ticks at 15:33:30 and 15:34:30; the check at 15:35:30 ends the session
    let radar = radar(&prices, FixedTargets(TARGETS_ON), &notifier, monday(15, 33, 30));

    let start = Instant::now();
    let Cycle::Session(report) = radar.run_cycle().await else {
        panic!("expected a session");
    };

    assert_eq!(report.ticks, 2);
    assert_eq!(report.alerts, 1);
    assert_eq!(report.skipped, 0);
    assert!(report.stopped_by_close);
    assert_eq!(
        notifier.sent(),
        [
            "Radar started",
            "Index entered Buffer Zone",
            "⏸ Radar Stopped",
            "failed to fetch, update the targets"
        ]
    );

    // two ticks, cooldown, back-off
    assert_elapsed(start, Duration::from_secs(2 * 60 + 17 * 15 * 60 + 5 * 60));
}

#[tokio::test(start_paused = true)]
async fn test_missing_price_skips_tick_without_ending_session() {
    let prices = ScriptedPrices::new(vec![
        Err(RadarError::NoPriceData("^NSEI".to_string())),
        Ok(18600),
    ]);
    let notifier = Recorder::default();
    // Ticks at 15:34:00 and 15:35:00 (close is inclusive)
    let radar = radar(&prices, FixedTargets(TARGETS_ON), &notifier, monday(15, 34, 0));

    let Cycle::Session(report) = radar.run_cycle().await else {
        panic!("expected a session");
    };

    assert_eq!(report.ticks, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.alerts, 1);
    assert_eq!(
        notifier.sent(),
        [
            "Radar started",
            "Index entered Buffer Zone",
            "⏸ Radar Stopped",
            "failed to fetch, update the targets"
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_quiet_ticks_send_nothing() {
    let prices = ScriptedPrices::new(vec![Ok(18250), Ok(18300), Ok(18100)]);
    let notifier = Recorder::default();
    let radar = radar(&prices, FixedTargets(TARGETS_ON), &notifier, monday(15, 33, 0));

    let Cycle::Session(report) = radar.run_cycle().await else {
        panic!("expected a session");
    };

    assert_eq!(report.ticks, 3);
    assert_eq!(report.alerts, 0);
    assert_eq!(
        notifier.sent(),
        [
            "Radar started",
            "⏸ Radar Stopped",
            "failed to fetch, update the targets"
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_ticks_stay_phase_aligned_under_latency() {
    let prices = ScriptedPrices::new((0..6).map(|_| Ok(18250)).collect())
        .with_latency(Duration::from_secs(7));
    let notifier = Recorder::default();
    // Ticks at 15:30:00 .. 15:35:00
    let radar = radar(&prices, FixedTargets(TARGETS_ON), &notifier, monday(15, 30, 0));

    let Cycle::Session(report) = radar.run_cycle().await else {
        panic!("expected a session");
    };

    assert_eq!(report.ticks, 6);
    let calls = prices.calls();
    assert_eq!(calls.len(), 6);
    for (k, call) in calls.iter().enumerate() {
        let offset = call.duration_since(calls[0]);
        let expected = Duration::from_secs(60 * k as u64);
        assert_close(offset, expected);
    }
}
