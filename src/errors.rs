use thiserror::Error;

/// Configuration errors caught at policy construction.
///
/// Any of these must prevent the policy from starting: a policy built from
/// a config that fails validation would emit degenerate ladders.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("n_levels must be at least 1, got {0}")]
    NotEnoughLevels(usize),

    #[error("{name} must be positive, got {got}")]
    NonPositive { name: &'static str, got: f64 },

    #[error("{name} must be greater than 1.0, got {got}")]
    RatioNotIncreasing { name: &'static str, got: f64 },

    #[error("{name} must not be negative, got {got}")]
    Negative { name: &'static str, got: f64 },

    #[error("top_order_start_spread must be tighter than start_spread, got {top} vs {start}")]
    TopSpreadNotTightest { top: f64, start: f64 },

    #[error("outermost spread must stay below 1.0, got {got}; ladder prices would cross zero")]
    SpreadReachesOne { got: f64 },

    #[error("max_dca_per_side must be at least 1")]
    NoLadderBudget,

    #[error("leverage must be at least 1")]
    ZeroLeverage,
}

/// Per-tick decision errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PolicyError {
    /// The reference price supplied for ladder creation was unusable.
    /// Fatal for that side's create attempt on that tick only; stop and
    /// archive decisions are unaffected.
    #[error("invalid reference price: {0}")]
    InvalidPrice(f64),
}
