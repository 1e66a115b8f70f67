//! Per-side create gating and stale-ladder withdrawal.

use std::collections::HashSet;

use tracing::debug;

use super::actions::PolicyAction;
use super::report::{ExecutorReport, LadderStatus, Side};

/// Decide whether a new ladder should open on `side`.
///
/// A side with no non-terminated ladders always creates. Otherwise creation
/// requires a free slot under `max_per_side`, a defined (non-zero) worst
/// average fill price, and the market having moved at least `min_distance`
/// (fractional) beyond that average in the adverse-entry direction.
pub(crate) fn should_create(
    report: &ExecutorReport,
    side: Side,
    close_price: f64,
    max_per_side: usize,
    min_distance: f64,
) -> bool {
    let count = report.count_non_terminated(side);
    if count == 0 {
        return true;
    }
    if count >= max_per_side {
        return false;
    }
    let Some(worst_avg) = report.worst_average_price(side) else {
        return true;
    };
    // 0.0 is the executor's "no fills yet" sentinel, not a price
    if worst_avg == 0.0 {
        return false;
    }
    match side {
        Side::Long => close_price < worst_avg * (1.0 - min_distance),
        Side::Short => close_price > worst_avg * (1.0 + min_distance),
    }
}

/// Emits stop intents for stale ladders, at most once per ladder id.
///
/// The only cross-tick state in the policy: ids already stopped are
/// remembered so a ladder that the executor still reports as ACTIVE (stop
/// not yet processed) is not withdrawn twice. The set grows monotonically;
/// ids are never reused.
#[derive(Debug, Default)]
pub(crate) struct LifecycleDecider {
    expired: HashSet<String>,
}

impl LifecycleDecider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Stop every ACTIVE ladder that has sat past `refresh_time` seconds
    /// with zero fills and zero PnL: the market never approached it, and
    /// withdrawing it frees a create slot.
    pub(crate) fn stop_actions_proposal(
        &mut self,
        report: &ExecutorReport,
        refresh_time: f64,
        now: f64,
    ) -> Vec<PolicyAction> {
        let mut proposal = Vec::new();
        for row in &report.ladders {
            if row.status != LadderStatus::Active {
                continue;
            }
            if row.net_pnl_quote != 0.0 || row.filled_amount != 0.0 {
                continue;
            }
            if row.timestamp + refresh_time >= now {
                continue;
            }
            if self.expired.contains(&row.id) {
                continue;
            }
            self.expired.insert(row.id.clone());
            debug!(
                ladder_id = %row.id,
                age_s = %format!("{:.1}", now - row.timestamp),
                "stale ladder, withdrawing"
            );
            proposal.push(PolicyAction::StopLadder { id: row.id.clone() });
        }
        proposal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::report::LadderSnapshot;

    fn stale_row(id: &str, created_at: f64) -> LadderSnapshot {
        LadderSnapshot {
            id: id.to_string(),
            side: Side::Long,
            status: LadderStatus::Active,
            timestamp: created_at,
            net_pnl_quote: 0.0,
            filled_amount: 0.0,
            avg_fill_price: 0.0,
        }
    }

    #[test]
    fn stops_stale_unfilled_ladder() {
        let mut decider = LifecycleDecider::new();
        let report = ExecutorReport::from(vec![stale_row("a", 0.0)]);
        let actions = decider.stop_actions_proposal(&report, 60.0, 100.0);
        assert_eq!(actions.len(), 1);
        assert_eq!(actions[0].ladder_id(), "a");
    }

    #[test]
    fn stop_is_emitted_at_most_once() {
        let mut decider = LifecycleDecider::new();
        let report = ExecutorReport::from(vec![stale_row("a", 0.0)]);
        assert_eq!(decider.stop_actions_proposal(&report, 60.0, 100.0).len(), 1);
        // Next tick: executor has not processed the stop yet, row unchanged
        // (and even more stale)
        assert!(decider
            .stop_actions_proposal(&report, 60.0, 200.0)
            .is_empty());
    }

    #[test]
    fn fresh_ladder_is_not_stopped() {
        let mut decider = LifecycleDecider::new();
        let report = ExecutorReport::from(vec![stale_row("a", 90.0)]);
        assert!(decider
            .stop_actions_proposal(&report, 60.0, 100.0)
            .is_empty());
    }

    #[test]
    fn filled_or_profitable_ladders_are_kept() {
        let mut decider = LifecycleDecider::new();
        let mut filled = stale_row("a", 0.0);
        filled.filled_amount = 1.0;
        let mut pnl = stale_row("b", 0.0);
        pnl.net_pnl_quote = -0.2;
        let report = ExecutorReport::from(vec![filled, pnl]);
        assert!(decider
            .stop_actions_proposal(&report, 60.0, 1_000.0)
            .is_empty());
    }

    #[test]
    fn boundary_age_is_not_stale() {
        let mut decider = LifecycleDecider::new();
        // timestamp + refresh == now: not yet past the window
        let report = ExecutorReport::from(vec![stale_row("a", 40.0)]);
        assert!(decider
            .stop_actions_proposal(&report, 60.0, 100.0)
            .is_empty());
    }

    #[test]
    fn create_gating_distance_threshold() {
        let report = ExecutorReport::from(vec![LadderSnapshot {
            id: "a".to_string(),
            side: Side::Long,
            status: LadderStatus::Active,
            timestamp: 0.0,
            net_pnl_quote: 0.0,
            filled_amount: 0.5,
            avg_fill_price: 100.0,
        }]);
        // Exactly at the threshold: no create
        assert!(!should_create(&report, Side::Long, 97.0, 3, 0.03));
        assert!(!should_create(&report, Side::Long, 97.5, 3, 0.03));
        // Beyond it: create
        assert!(should_create(&report, Side::Long, 96.9, 3, 0.03));
    }

    #[test]
    fn create_gating_short_side_mirrors() {
        let report = ExecutorReport::from(vec![LadderSnapshot {
            id: "a".to_string(),
            side: Side::Short,
            status: LadderStatus::Active,
            timestamp: 0.0,
            net_pnl_quote: 0.0,
            filled_amount: 0.5,
            avg_fill_price: 100.0,
        }]);
        assert!(!should_create(&report, Side::Short, 103.0, 3, 0.03));
        assert!(should_create(&report, Side::Short, 103.1, 3, 0.03));
    }

    #[test]
    fn create_blocked_by_undefined_average() {
        // One active ladder, nothing filled: average is the 0.0 sentinel
        let report = ExecutorReport::from(vec![stale_row("a", 0.0)]);
        assert!(!should_create(&report, Side::Long, 50.0, 3, 0.03));
    }

    #[test]
    fn empty_side_always_creates() {
        let report = ExecutorReport::default();
        assert!(should_create(&report, Side::Long, 100.0, 3, 0.03));
        assert!(should_create(&report, Side::Short, 100.0, 3, 0.03));
    }
}
