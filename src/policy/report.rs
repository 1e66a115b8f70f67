//! Read-only executor state consumed each tick.
//!
//! The execution engine reports one row per ladder it knows about. The
//! policy treats the report as a point-in-time view; it never mutates rows,
//! and all queries are simple predicate filters and min/max reductions.

use serde::{Deserialize, Serialize};

/// Accumulation side of a ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    #[serde(rename = "LONG")]
    Long,
    #[serde(rename = "SHORT")]
    Short,
}

/// Executor-reported ladder status.
///
/// Only `Active` and `Terminated` carry meaning for the policy; every other
/// engine-internal status deserializes to `Other` so new executor states
/// never break report parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LadderStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "TERMINATED")]
    Terminated,
    #[serde(other)]
    Other,
}

/// Point-in-time view of one ladder owned by the execution engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LadderSnapshot {
    pub id: String,
    pub side: Side,
    pub status: LadderStatus,
    /// Creation time, epoch seconds
    pub timestamp: f64,
    /// Net realized PnL in quote currency; exactly 0.0 until anything fills
    pub net_pnl_quote: f64,
    /// Filled base amount; exactly 0.0 until anything fills
    pub filled_amount: f64,
    /// Average fill price; the executor reports exactly 0.0 as "undefined"
    pub avg_fill_price: f64,
}

/// Ordered collection of ladder snapshots, as reported by the executor.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExecutorReport {
    pub ladders: Vec<LadderSnapshot>,
}

impl ExecutorReport {
    pub fn is_empty(&self) -> bool {
        self.ladders.is_empty()
    }

    /// Rows on `side` that the executor has not terminated.
    pub fn non_terminated(&self, side: Side) -> impl Iterator<Item = &LadderSnapshot> {
        self.ladders
            .iter()
            .filter(move |row| row.status != LadderStatus::Terminated && row.side == side)
    }

    /// Count of non-terminated ladders on `side`.
    pub fn count_non_terminated(&self, side: Side) -> usize {
        self.non_terminated(side).count()
    }

    /// The side's most extended average fill price: minimum for Long
    /// (furthest underwater), maximum for Short. A reported 0.0 average is
    /// the executor's "undefined" sentinel and participates in the
    /// reduction, so an unfilled Long ladder pins the minimum at 0.0.
    ///
    /// Returns `None` when the side has no non-terminated ladders.
    pub fn worst_average_price(&self, side: Side) -> Option<f64> {
        self.non_terminated(side)
            .map(|row| row.avg_fill_price)
            .reduce(|worst, price| match side {
                Side::Long => worst.min(price),
                Side::Short => worst.max(price),
            })
    }
}

impl From<Vec<LadderSnapshot>> for ExecutorReport {
    fn from(ladders: Vec<LadderSnapshot>) -> Self {
        Self { ladders }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, side: Side, status: LadderStatus, avg: f64) -> LadderSnapshot {
        LadderSnapshot {
            id: id.to_string(),
            side,
            status,
            timestamp: 0.0,
            net_pnl_quote: 0.0,
            filled_amount: 0.0,
            avg_fill_price: avg,
        }
    }

    #[test]
    fn worst_average_is_min_for_long_max_for_short() {
        let report = ExecutorReport::from(vec![
            row("a", Side::Long, LadderStatus::Active, 100.0),
            row("b", Side::Long, LadderStatus::Active, 95.0),
            row("c", Side::Short, LadderStatus::Active, 110.0),
            row("d", Side::Short, LadderStatus::Active, 120.0),
        ]);
        assert_eq!(report.worst_average_price(Side::Long), Some(95.0));
        assert_eq!(report.worst_average_price(Side::Short), Some(120.0));
    }

    #[test]
    fn terminated_rows_are_excluded() {
        let report = ExecutorReport::from(vec![
            row("a", Side::Long, LadderStatus::Terminated, 90.0),
            row("b", Side::Long, LadderStatus::Active, 100.0),
        ]);
        assert_eq!(report.count_non_terminated(Side::Long), 1);
        assert_eq!(report.worst_average_price(Side::Long), Some(100.0));
        assert_eq!(report.worst_average_price(Side::Short), None);
    }

    #[test]
    fn unfilled_sentinel_pins_long_minimum() {
        let report = ExecutorReport::from(vec![
            row("a", Side::Long, LadderStatus::Active, 100.0),
            row("b", Side::Long, LadderStatus::Active, 0.0),
        ]);
        assert_eq!(report.worst_average_price(Side::Long), Some(0.0));
    }

    #[test]
    fn unknown_status_deserializes_to_other() {
        let json = r#"{
            "id": "x", "side": "LONG", "status": "SHUTTING_DOWN",
            "timestamp": 1.0, "net_pnl_quote": 0.0,
            "filled_amount": 0.0, "avg_fill_price": 0.0
        }"#;
        let snapshot: LadderSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.status, LadderStatus::Other);
    }
}
