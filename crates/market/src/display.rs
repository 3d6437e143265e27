//! Fiat rendering of prices and balances.
//!
//! Conversions go through `Decimal` so that a satoshi balance times a price
//! does not pick up binary float noise before rounding.

use b1t_common::{COIN, COIN_DECIMALS};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// Price rounded half away from zero to `decimals` places, e.g. `0.0123` at 2 is `"0.01"`
pub fn format_price(price: f64, decimals: u32) -> String {
    let value = to_decimal(price).round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, value)
}

/// Fiat value of a satoshi balance at `price` per coin. A product that does
/// not fit in a `Decimal` is reported as zero, like any unusable price.
pub fn balance_value(sats: u64, price: f64) -> Decimal {
    let coins = Decimal::from(sats) / Decimal::from(COIN);
    coins.checked_mul(to_decimal(price)).unwrap_or(Decimal::ZERO)
}

pub fn format_balance_value(sats: u64, price: f64, decimals: u32) -> String {
    let value = balance_value(sats, price).round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", decimals as usize, value)
}

/// Coin amount of a satoshi balance, e.g. `150000000` is `"1.5"`
pub fn format_coins(sats: u64) -> String {
    Decimal::from_i128_with_scale(sats as i128, COIN_DECIMALS)
        .normalize()
        .to_string()
}

/// Balance value as `f64`, for callers that only display it
pub fn balance_value_f64(sats: u64, price: f64) -> f64 {
    balance_value(sats, price).to_f64().unwrap_or(0.0)
}

fn to_decimal(price: f64) -> Decimal {
    if !price.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(price).unwrap_or(Decimal::ZERO)
}
