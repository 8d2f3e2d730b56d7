//! Price vs. target classification
//!
//! The checks run in a fixed order and the first match wins. With a
//! non-negative buffer the buffer-zone check already covers every price the
//! "crossed" checks would match, so those two outcomes are only reachable
//! with a negative buffer. The order is kept as is.

use crate::targets::TargetSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    /// At or beyond CE - BUFFER, or at or below PE + BUFFER
    EnteredBuffer,
    /// At or beyond CE + BUFFER
    CrossedCe,
    /// At or below PE - BUFFER
    CrossedPe,
    /// Between the levels, nothing to report
    Inside,
}

impl Zone {
    /// Notification text for this outcome, if any
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Zone::EnteredBuffer => Some("Index entered Buffer Zone"),
            Zone::CrossedCe => Some("Index Crossed CE Buffer Zone"),
            Zone::CrossedPe => Some("Index Crossed PE Buffer Zone"),
            Zone::Inside => None,
        }
    }
}

pub fn evaluate(price: i64, targets: &TargetSet) -> Zone {
    let approach_ce = targets.ce.saturating_sub(targets.buffer);
    let approach_pe = targets.pe.saturating_add(targets.buffer);

    if price >= approach_ce || price <= approach_pe {
        Zone::EnteredBuffer
    } else if price >= targets.ce.saturating_add(targets.buffer) {
        Zone::CrossedCe
    } else if price <= targets.pe.saturating_sub(targets.buffer) {
        Zone::CrossedPe
    } else {
        Zone::Inside
    }
}
