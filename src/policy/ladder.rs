//! Ladder blueprints and the factory that builds them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::PolicyError;

use super::config::{DcaPolicyConfig, TrailingStopConfig};
use super::report::Side;

/// Order type the executor should use for ladder levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Limit,
    Market,
}

/// A single resting level of a ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LadderLevel {
    /// Price of this level
    pub price: f64,
    /// Notional at this level in quote currency, sized to the level's price
    pub amount_quote: f64,
}

/// A fully-specified DCA ladder, handed to the execution engine with a
/// create intent.
///
/// Immutable once built: ownership passes to the executor and the policy
/// never touches it again, tracking it only through snapshot rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcaLadder {
    pub id: String,
    pub exchange: String,
    pub trading_pair: String,
    pub side: Side,
    /// Creation time, epoch seconds
    pub timestamp: f64,
    /// Levels ordered innermost first; prices move strictly away from the
    /// reference price (down for Long, up for Short)
    pub levels: Vec<LadderLevel>,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub trailing_stop: TrailingStopConfig,
    /// Seconds the executor lets the ladder live before timing it out
    pub time_limit: f64,
    pub open_order_type: OrderType,
    pub leverage: u32,
    pub activation_bounds: Option<f64>,
}

/// Build a ladder around `close_price` for `side`.
///
/// `spreads` and `amounts` are the policy's precomputed per-level sequences.
/// Price per level is `close · (1 - spread)` for Long and `close · (1 + spread)`
/// for Short; the quote amount is re-sized to each level's own price.
///
/// Fails fast on a non-positive or non-finite reference price rather than
/// producing a degenerate ladder.
pub(crate) fn build_ladder(
    config: &DcaPolicyConfig,
    spreads: &[f64],
    amounts: &[f64],
    side: Side,
    close_price: f64,
    now: f64,
) -> Result<DcaLadder, PolicyError> {
    if !close_price.is_finite() || close_price <= 0.0 {
        return Err(PolicyError::InvalidPrice(close_price));
    }

    let levels = spreads
        .iter()
        .zip(amounts.iter())
        .map(|(&spread, &amount)| {
            let price = match side {
                Side::Long => close_price * (1.0 - spread),
                Side::Short => close_price * (1.0 + spread),
            };
            LadderLevel {
                price,
                amount_quote: amount / price,
            }
        })
        .collect();

    Ok(DcaLadder {
        id: Uuid::new_v4().to_string(),
        exchange: config.exchange.clone(),
        trading_pair: config.trading_pair.clone(),
        side,
        timestamp: now,
        levels,
        stop_loss: config.stop_loss,
        take_profit: config.take_profit,
        trailing_stop: config.trailing_stop,
        time_limit: config.time_limit,
        open_order_type: OrderType::Limit,
        leverage: config.leverage,
        activation_bounds: config.activation_bounds,
    })
}
