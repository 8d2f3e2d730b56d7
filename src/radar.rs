//! Radar loop
//!
//! One outer cycle checks the market-hours gate. When the market is open it
//! pulls the trader's targets, and if RADAR is on, polls the index price on
//! a fixed cadence until the window closes:
//!
//! ```text
//! weekend ──────────────► notify, sleep 24h
//! weekday, closed ──────► sleep 5m
//! weekday, open ────────► fetch targets ─► notify "started"
//!                           │ RADAR=Yes
//!                           ▼
//!                         tick: price ─► evaluate ─► notify zone
//!                           │ sleep to next aligned tick
//!                           │ window closed ─► notify "stopped", sleep 4h15m
//!                           ▼
//!                         notify idle, sleep 5m
//! ```
//!
//! Every step is awaited in sequence; nothing runs concurrently.

use tokio::time::{sleep, sleep_until, Instant};
use tracing::{debug, info, warn};

use crate::config::Timings;
use crate::market::PriceSource;
use crate::notify::{self, Notifier};
use crate::schedule::{until_next_tick, Clock, ScheduleWindow};
use crate::targets::{fetch_targets_or_default, TargetSet, TargetSource};
use crate::threshold::evaluate;

/// What one outer cycle did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cycle {
    /// Saturday or Sunday
    Weekend,
    /// Weekday outside the daily window
    OutsideWindow,
    /// Market was open; targets were fetched
    Session(SessionReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub targets: TargetSet,
    /// Ticks run, including skipped ones
    pub ticks: u32,
    /// Ticks without a price
    pub skipped: u32,
    /// Zone notifications sent
    pub alerts: u32,
    /// Whether the loop ended because the window closed
    pub stopped_by_close: bool,
}

impl SessionReport {
    fn new(targets: TargetSet) -> Self {
        Self {
            targets,
            ticks: 0,
            skipped: 0,
            alerts: 0,
            stopped_by_close: false,
        }
    }
}

pub struct Radar<P, T, N, C> {
    window: ScheduleWindow,
    timings: Timings,
    prices: P,
    targets: T,
    notifier: N,
    clock: C,
}

impl<P, T, N, C> Radar<P, T, N, C>
where
    P: PriceSource,
    T: TargetSource,
    N: Notifier,
    C: Clock,
{
    pub fn new(
        window: ScheduleWindow,
        timings: Timings,
        prices: P,
        targets: T,
        notifier: N,
        clock: C,
    ) -> Self {
        Self {
            window,
            timings,
            prices,
            targets,
            notifier,
            clock,
        }
    }

    /// Run cycles forever; the process is stopped externally
    pub async fn run(&self) {
        info!(
            "Radar running: window {}-{} (UTC{}), tick {:?}",
            self.window.start, self.window.end, self.window.offset, self.timings.tick
        );
        loop {
            match self.run_cycle().await {
                Cycle::Session(report) => info!(
                    "Session finished: ticks={} skipped={} alerts={} stopped_by_close={}",
                    report.ticks, report.skipped, report.alerts, report.stopped_by_close
                ),
                other => debug!("Cycle finished: {:?}", other),
            }
        }
    }

    /// One pass of the outer loop, including its trailing sleep
    pub async fn run_cycle(&self) -> Cycle {
        let now = self.clock.now();

        if !self.window.is_trading_instant(now) {
            info!(
                "Weekend ({}), checking again in {:?}",
                now.date_naive(),
                self.timings.weekend_sleep
            );
            self.notifier.send(notify::WEEKEND).await;
            sleep(self.timings.weekend_sleep).await;
            return Cycle::Weekend;
        }

        if !self.window.contains_instant(now) {
            debug!("Outside market hours at {}", now.time());
            sleep(self.timings.idle_backoff).await;
            return Cycle::OutsideWindow;
        }

        info!("Within market hours at {}", now.time());
        let targets = fetch_targets_or_default(&self.targets, &self.notifier).await;

        let anchor = Instant::now();
        self.notifier.send(notify::RADAR_STARTED).await;

        let report = if targets.radar {
            self.track(targets, anchor).await
        } else {
            info!("RADAR is off, not monitoring");
            SessionReport::new(targets)
        };

        self.notifier.send(notify::RADAR_IDLE).await;
        sleep(self.timings.idle_backoff).await;
        Cycle::Session(report)
    }

    /// Poll the price at `anchor + k * tick` until the window closes
    async fn track(&self, targets: TargetSet, anchor: Instant) -> SessionReport {
        let mut report = SessionReport::new(targets);

        loop {
            report.ticks += 1;
            match self.prices.latest_price().await {
                Ok(price) => {
                    let zone = evaluate(price, &targets);
                    info!("Tick {}: price={} zone={:?}", report.ticks, price, zone);
                    if let Some(message) = zone.message() {
                        self.notifier.send(message).await;
                        report.alerts += 1;
                    }
                }
                Err(e) => {
                    warn!("Tick {}: no price, skipping evaluation: {}", report.ticks, e);
                    report.skipped += 1;
                }
            }

            let wait = until_next_tick(anchor.elapsed(), self.timings.tick);
            sleep_until(Instant::now() + wait).await;

            if !self.window.contains_instant(self.clock.now()) {
                info!("Market closed, radar stopped after {} ticks", report.ticks);
                self.notifier.send(notify::RADAR_STOPPED).await;
                sleep(self.timings.session_cooldown).await;
                report.stopped_by_close = true;
                return report;
            }
        }
    }
}
