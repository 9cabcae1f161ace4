use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use crate::types::MONEY_SCALE;
use crate::types::PERCENT_SCALE;
use crate::types::RATE_SCALE;

/// Rounds to `scale` places the way NUMERIC columns do, half away from zero.
pub fn round(v: Decimal, scale: u32) -> Decimal {
    let mut v = v.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    v.rescale(scale);
    v
}

pub fn money(v: Decimal) -> Decimal {
    round(v, MONEY_SCALE)
}

pub fn rate(v: Decimal) -> Decimal {
    round(v, RATE_SCALE)
}

pub fn percent(v: Decimal) -> Decimal {
    round(v, PERCENT_SCALE)
}

/// Zero at money scale, i.e. `0.00`.
pub fn zero_money() -> Decimal {
    Decimal::new(0, MONEY_SCALE)
}

/// `numerator / denominator`, or zero when the denominator is not positive.
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    numerator / denominator
}
