//! Geometric sequences for ladder sizes and spreads.

use super::config::DcaPolicyConfig;

/// Geometric sequence `start, start·ratio, start·ratio², ...` of length `n`.
pub fn geometric(n: usize, start: f64, ratio: f64) -> Vec<f64> {
    (0..n).map(|i| start * ratio.powi(i as i32)).collect()
}

/// Quote-denominated size per level: geometric growth from `order_amount`.
pub(crate) fn amount_sequence(config: &DcaPolicyConfig) -> Vec<f64> {
    geometric(
        config.n_levels,
        config.order_amount,
        config.amount_ratio_increase,
    )
}

/// Fractional spread per level.
///
/// The innermost level sits at the fixed `top_order_start_spread`, close to
/// the market; the remaining `n_levels - 1` levels fan out geometrically
/// from `start_spread`. Length equals `n_levels` (validated >= 1).
pub(crate) fn spread_sequence(config: &DcaPolicyConfig) -> Vec<f64> {
    let mut spreads = Vec::with_capacity(config.n_levels);
    spreads.push(config.top_order_start_spread);
    spreads.extend(geometric(
        config.n_levels - 1,
        config.start_spread,
        config.spread_ratio_increase,
    ));
    spreads
}
