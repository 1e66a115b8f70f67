//! Intents emitted by the policy each tick.

use serde::{Deserialize, Serialize};

use super::ladder::DcaLadder;

/// An intent handed to the host, not a command with guaranteed effect: the
/// execution engine may reject or delay it and keeps reporting state back
/// through the next tick's snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PolicyAction {
    /// Open a new ladder; ownership of the blueprint passes to the executor
    CreateLadder(DcaLadder),
    /// Withdraw a stale, unfilled ladder
    StopLadder { id: String },
    /// Persist a terminated ladder
    ArchiveLadder { id: String },
}

impl PolicyAction {
    /// Ladder id this intent refers to.
    pub fn ladder_id(&self) -> &str {
        match self {
            PolicyAction::CreateLadder(ladder) => &ladder.id,
            PolicyAction::StopLadder { id } | PolicyAction::ArchiveLadder { id } => id,
        }
    }
}
