//! Archive collection for terminated ladders.

use super::actions::PolicyAction;
use super::report::{ExecutorReport, LadderStatus};

/// One archive intent per TERMINATED row, emitted on every tick the row
/// appears. Terminal state, so no dedup: the persistence layer is expected
/// to be idempotent on archive, or the executor to drop rows once archived.
pub(crate) fn store_actions_proposal(report: &ExecutorReport) -> Vec<PolicyAction> {
    report
        .ladders
        .iter()
        .filter(|row| row.status == LadderStatus::Terminated)
        .map(|row| PolicyAction::ArchiveLadder {
            id: row.id.clone(),
        })
        .collect()
}
