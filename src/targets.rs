//! Trader targets
//!
//! Targets arrive as the last message the trader sent to the bot:
//!
//! ```text
//! CE : 18500
//! PE : 18000
//! BUFFER : 20
//! RADAR : Yes
//! ```
//!
//! Anything before the last `=` in the message is ignored, so the block can
//! be prefixed with a heading such as `Targets =`. The first three lines
//! must carry their labels; a fourth line that is not `RADAR : Yes` turns
//! the radar off.

use async_trait::async_trait;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

use crate::error::RadarResult;
use crate::notify::{self, Notifier};

/// Levels the radar watches for one session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TargetSet {
    /// Call-side target (upper level)
    pub ce: i64,
    /// Put-side target (lower level)
    pub pe: i64,
    /// Tolerance band around both levels
    pub buffer: i64,
    /// Whether per-tick monitoring should run
    pub radar: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TargetParseError {
    #[error("missing {0} line")]
    MissingLine(&'static str),

    #[error("expected {expected} line, got '{line}'")]
    UnexpectedLabel { expected: &'static str, line: String },

    #[error("invalid {label} value '{value}'")]
    InvalidNumber { label: &'static str, value: String },
}

/// Parse a target message
pub fn parse_targets(text: &str) -> Result<TargetSet, TargetParseError> {
    let body = text.rsplit('=').next().unwrap_or(text).trim();
    let mut lines = body.lines();

    let ce = parse_int(field(lines.next(), "CE")?, "CE")?;
    let pe = parse_int(field(lines.next(), "PE")?, "PE")?;
    let buffer = parse_int(field(lines.next(), "BUFFER")?, "BUFFER")?;
    let radar = radar_on(lines.next())?;

    Ok(TargetSet {
        ce,
        pe,
        buffer,
        radar,
    })
}

/// Strip `<label> :` from a line and return the trimmed value
fn field<'a>(line: Option<&'a str>, label: &'static str) -> Result<&'a str, TargetParseError> {
    let line = line.ok_or(TargetParseError::MissingLine(label))?.trim();
    line.strip_prefix(label)
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix(':'))
        .map(str::trim)
        .ok_or_else(|| TargetParseError::UnexpectedLabel {
            expected: label,
            line: line.to_string(),
        })
}

/// RADAR is on only for a well-formed `RADAR : Yes` line; any other
/// fourth line leaves it off without rejecting the levels above it
fn radar_on(line: Option<&str>) -> Result<bool, TargetParseError> {
    match field(line, "RADAR") {
        Ok(value) => Ok(value == "Yes"),
        Err(TargetParseError::UnexpectedLabel { .. }) => Ok(false),
        Err(e) => Err(e),
    }
}

fn parse_int(value: &str, label: &'static str) -> Result<i64, TargetParseError> {
    value
        .parse()
        .map_err(|_| TargetParseError::InvalidNumber {
            label,
            value: value.to_string(),
        })
}

impl FromStr for TargetSet {
    type Err = TargetParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_targets(s)
    }
}

impl fmt::Display for TargetSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "CE : {}\nPE : {}\nBUFFER : {}\nRADAR : {}",
            self.ce,
            self.pe,
            self.buffer,
            if self.radar { "Yes" } else { "No" }
        )
    }
}

/// Pull-based provider of the raw target message
#[async_trait]
pub trait TargetSource: Send + Sync {
    /// Text of the most recent inbound message
    async fn latest_message_text(&self) -> RadarResult<String>;
}

#[async_trait]
impl<S: TargetSource + ?Sized> TargetSource for &S {
    async fn latest_message_text(&self) -> RadarResult<String> {
        (**self).latest_message_text().await
    }
}

/// Fetch and parse the current targets
pub async fn fetch_targets<S: TargetSource + ?Sized>(source: &S) -> RadarResult<TargetSet> {
    let text = source.latest_message_text().await?;
    Ok(parse_targets(&text)?)
}

/// Fetch the targets, reporting any failure to the trader and falling back
/// to the all-zero set so the radar stays off
pub async fn fetch_targets_or_default<S, N>(source: &S, notifier: &N) -> TargetSet
where
    S: TargetSource + ?Sized,
    N: Notifier + ?Sized,
{
    match fetch_targets(source).await {
        Ok(targets) => {
            info!(
                "Targets: CE={} PE={} BUFFER={} RADAR={}",
                targets.ce, targets.pe, targets.buffer, targets.radar
            );
            targets
        }
        Err(e) => {
            warn!("Failed to fetch targets: {}", e);
            notifier.send(&notify::target_error(&e)).await;
            TargetSet::default()
        }
    }
}
