#![deny(unreachable_pub)]

//! Decision core for a bidirectional dollar-cost-averaging (DCA) ladder
//! policy.
//!
//! Turns a per-tick snapshot of executor-owned ladders plus the current
//! close price into an ordered list of intents: open new ladders at
//! geometrically spaced prices and sizes, withdraw stale unfilled ladders,
//! and archive terminated ones. The crate never talks to an exchange,
//! never manages fills, and never persists anything; those are the host's
//! collaborators.

mod errors;
mod policy;

pub use errors::{ConfigError, PolicyError};
pub use policy::{
    geometric, DcaLadder, DcaPolicy, DcaPolicyConfig, ExecutorReport, LadderLevel, LadderSnapshot,
    LadderStatus, OrderType, PolicyAction, Side, TickContext, TrailingStopConfig,
};
