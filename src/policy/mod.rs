//! Bidirectional DCA policy: the tick-driven decision orchestrator.
//!
//! Each tick the host supplies the executor's ladder report and the current
//! close price; the policy returns the ordered list of intents (create,
//! stop, archive) for the execution and persistence layers to apply. The
//! policy itself performs no I/O and owns no orders.

mod actions;
mod archive;
mod config;
mod distributions;
mod ladder;
mod lifecycle;
mod report;

pub use actions::PolicyAction;
pub use config::{DcaPolicyConfig, TrailingStopConfig};
pub use distributions::geometric;
pub use ladder::{DcaLadder, LadderLevel, OrderType};
pub use report::{ExecutorReport, LadderSnapshot, LadderStatus, Side};

use std::collections::{HashMap, HashSet};

use tracing::{debug, info, warn};

use crate::errors::ConfigError;

use lifecycle::LifecycleDecider;

/// Inputs for one decision tick. All values are immutable for the tick;
/// `now` is injected so staleness checks are deterministic under test.
#[derive(Debug, Clone, Copy)]
pub struct TickContext<'a> {
    /// Market-data readiness gate; nothing is decided until true
    pub data_ready: bool,
    /// Current close price of the configured pair
    pub close_price: f64,
    /// Current time, epoch seconds
    pub now: f64,
    /// The executor's view of every ladder it knows about
    pub report: &'a ExecutorReport,
}

/// The decision core of the bidirectional DCA strategy.
///
/// Holds the validated config, the precomputed per-ladder size and spread
/// sequences, and the stop-dedup memory. Single-threaded and synchronous:
/// one caller invokes [`determine_actions`](Self::determine_actions) once
/// per control-loop tick.
#[derive(Debug)]
pub struct DcaPolicy {
    config: DcaPolicyConfig,
    amounts: Vec<f64>,
    spreads: Vec<f64>,
    lifecycle: LifecycleDecider,
}

impl DcaPolicy {
    /// Validate `config` and precompute the amount and spread sequences.
    pub fn new(config: DcaPolicyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let amounts = distributions::amount_sequence(&config);
        let spreads = distributions::spread_sequence(&config);
        info!(
            exchange = %config.exchange,
            trading_pair = %config.trading_pair,
            n_levels = config.n_levels,
            max_dca_per_side = config.max_dca_per_side,
            "DCA policy configured"
        );
        Ok(Self {
            config,
            amounts,
            spreads,
            lifecycle: LifecycleDecider::new(),
        })
    }

    pub fn config(&self) -> &DcaPolicyConfig {
        &self.config
    }

    /// Declare the (exchange, pair) this policy depends on, merging into the
    /// host's market map. Idempotent and additive.
    pub fn register_markets(&self, markets: &mut HashMap<String, HashSet<String>>) {
        markets
            .entry(self.config.exchange.clone())
            .or_default()
            .insert(self.config.trading_pair.clone());
    }

    /// Run one decision tick.
    ///
    /// Returns creates, then stops, then archives. When market data is not
    /// ready no decision is valid, so the result is empty; this is a gate,
    /// not an error.
    pub fn determine_actions(&mut self, tick: &TickContext<'_>) -> Vec<PolicyAction> {
        if !tick.data_ready {
            debug!("market data not ready, skipping tick");
            return Vec::new();
        }

        let mut actions = self.create_actions_proposal(tick.report, tick.close_price, tick.now);
        actions.extend(self.lifecycle.stop_actions_proposal(
            tick.report,
            self.config.dca_refresh_time,
            tick.now,
        ));
        actions.extend(archive::store_actions_proposal(tick.report));
        actions
    }

    /// Evaluate both sides independently and propose a ladder for each side
    /// whose create conditions hold. The per-side flag is computed once per
    /// tick, so two same-side creates can never be issued together.
    ///
    /// A ladder the factory refuses to build (bad reference price) skips
    /// only that side: the other side and the stop/archive paths still run.
    fn create_actions_proposal(
        &self,
        report: &ExecutorReport,
        close_price: f64,
        now: f64,
    ) -> Vec<PolicyAction> {
        let mut proposal = Vec::new();
        for side in [Side::Long, Side::Short] {
            if !lifecycle::should_create(
                report,
                side,
                close_price,
                self.config.max_dca_per_side,
                self.config.min_distance_between_dca,
            ) {
                continue;
            }
            match ladder::build_ladder(
                &self.config,
                &self.spreads,
                &self.amounts,
                side,
                close_price,
                now,
            ) {
                Ok(ladder) => {
                    info!(
                        ladder_id = %ladder.id,
                        side = ?side,
                        close_price = %format!("{:.6}", close_price),
                        levels = ladder.levels.len(),
                        "proposing new DCA ladder"
                    );
                    proposal.push(PolicyAction::CreateLadder(ladder));
                }
                Err(err) => {
                    warn!(
                        side = ?side,
                        close_price = close_price,
                        error = %err,
                        "skipping ladder creation"
                    );
                }
            }
        }
        proposal
    }
}
