//! Policy configuration types.

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Trailing stop parameters handed to the execution engine with each ladder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrailingStopConfig {
    /// Fractional profit at which the trailing stop activates
    pub activation_price: f64,
    /// Fractional giveback from the peak before the stop fires
    pub trailing_delta: f64,
}

/// Configuration for the bidirectional DCA policy.
///
/// Immutable after construction. `validate` must pass before a
/// [`DcaPolicy`](crate::DcaPolicy) is built from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DcaPolicyConfig {
    /// Exchange the executor trades on (e.g., "binance_perpetual")
    pub exchange: String,
    /// Trading pair (e.g., "DOGE-USDT")
    pub trading_pair: String,
    /// Leverage applied by the execution engine
    pub leverage: u32,

    /// Number of price levels per ladder
    pub n_levels: usize,
    /// Quote-denominated size of the innermost level
    pub order_amount: f64,
    /// Geometric growth factor for level sizes (> 1)
    pub amount_ratio_increase: f64,
    /// Fractional spread of the innermost level, kept tight to the market
    pub top_order_start_spread: f64,
    /// Fractional spread of the second level, start of the geometric fan-out
    pub start_spread: f64,
    /// Geometric growth factor for spreads beyond the second level (> 1)
    pub spread_ratio_increase: f64,

    /// Maximum non-terminated ladders allowed per side
    pub max_dca_per_side: usize,
    /// Fractional adverse move beyond a side's worst average fill price
    /// required before another same-side ladder may be opened
    pub min_distance_between_dca: f64,
    /// Seconds an unfilled ladder may rest before it is withdrawn
    pub dca_refresh_time: f64,

    /// Stop-loss fraction copied into each ladder
    pub stop_loss: f64,
    /// Take-profit fraction copied into each ladder
    pub take_profit: f64,
    /// Trailing stop copied into each ladder
    pub trailing_stop: TrailingStopConfig,
    /// Seconds a ladder may live before the executor times it out
    pub time_limit: f64,
    /// Optional activation-price bound forwarded to the executor
    pub activation_bounds: Option<f64>,
}

impl Default for DcaPolicyConfig {
    fn default() -> Self {
        Self {
            exchange: "binance_perpetual".to_string(),
            trading_pair: "DOGE-USDT".to_string(),
            leverage: 20,
            n_levels: 5,
            order_amount: 10.0,
            amount_ratio_increase: 1.5,
            top_order_start_spread: 0.001,
            start_spread: 0.02,
            spread_ratio_increase: 2.0,
            max_dca_per_side: 3,
            min_distance_between_dca: 0.03,
            dca_refresh_time: 60.0,
            stop_loss: 0.1,
            take_profit: 0.02,
            trailing_stop: TrailingStopConfig {
                activation_price: 0.01,
                trailing_delta: 0.005,
            },
            time_limit: 60.0 * 60.0 * 24.0 * 7.0,
            activation_bounds: None,
        }
    }
}

impl DcaPolicyConfig {
    /// Validate invariants that would produce degenerate ladders or
    /// nonsensical decisions.
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_levels < 1 {
            return Err(ConfigError::NotEnoughLevels(self.n_levels));
        }
        if self.order_amount <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "order_amount",
                got: self.order_amount,
            });
        }
        if self.amount_ratio_increase <= 1.0 {
            return Err(ConfigError::RatioNotIncreasing {
                name: "amount_ratio_increase",
                got: self.amount_ratio_increase,
            });
        }
        if self.spread_ratio_increase <= 1.0 {
            return Err(ConfigError::RatioNotIncreasing {
                name: "spread_ratio_increase",
                got: self.spread_ratio_increase,
            });
        }
        if self.top_order_start_spread < 0.0 {
            return Err(ConfigError::Negative {
                name: "top_order_start_spread",
                got: self.top_order_start_spread,
            });
        }
        if self.start_spread <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "start_spread",
                got: self.start_spread,
            });
        }
        // The innermost level must sit tighter to the market than the
        // geometric fan-out it precedes, or level prices stop being
        // monotonic away from the reference price.
        if self.n_levels > 1 && self.top_order_start_spread >= self.start_spread {
            return Err(ConfigError::TopSpreadNotTightest {
                top: self.top_order_start_spread,
                start: self.start_spread,
            });
        }
        // A spread at or past 1.0 would put a Long level at or below zero.
        let outermost_spread = if self.n_levels > 1 {
            self.start_spread * self.spread_ratio_increase.powi(self.n_levels as i32 - 2)
        } else {
            self.top_order_start_spread
        };
        if outermost_spread >= 1.0 {
            return Err(ConfigError::SpreadReachesOne {
                got: outermost_spread,
            });
        }
        if self.min_distance_between_dca < 0.0 {
            return Err(ConfigError::Negative {
                name: "min_distance_between_dca",
                got: self.min_distance_between_dca,
            });
        }
        if self.dca_refresh_time <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "dca_refresh_time",
                got: self.dca_refresh_time,
            });
        }
        if self.time_limit <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "time_limit",
                got: self.time_limit,
            });
        }
        if self.max_dca_per_side < 1 {
            return Err(ConfigError::NoLadderBudget);
        }
        if self.leverage < 1 {
            return Err(ConfigError::ZeroLeverage);
        }
        Ok(())
    }
}
