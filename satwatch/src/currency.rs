use rust_decimal::{Decimal, RoundingStrategy};

pub const SATOSHI_IN_BTC: i64 = 100_000_000;
pub const BTC_PRECISION: u32 = 8;

pub fn from_satoshi(satoshi: i64) -> Decimal {
    (Decimal::from(satoshi) / Decimal::from(SATOSHI_IN_BTC)).round_dp(BTC_PRECISION)
}

pub fn to_satoshi(btc: Decimal) -> Option<i64> {
    use rust_decimal::prelude::ToPrimitive;
    (btc * Decimal::from(SATOSHI_IN_BTC))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}
