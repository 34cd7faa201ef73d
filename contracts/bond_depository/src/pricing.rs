//! Pure pricing arithmetic. Everything here is a function of
//! `(stored state, now)` so decay and tuning can be recomputed lazily at
//! the top of each mutating call and simulated in read-only queries.

/// 9-decimal fixed point shared with the protocol token.
pub const PRICE_SCALE: i128 = 1_000_000_000;

/// Debt-buffer denominator: a buffer of 100_000 doubles the debt ceiling.
pub const BUFFER_SCALE: i128 = 100_000;

/// Payout numerator scale, chosen so quote tokens of up to 18 decimals
/// divide out exactly.
pub const PAYOUT_SCALE: i128 = 1_000_000_000_000_000_000;

pub fn pow10(n: u32) -> i128 {
    10_i128.pow(n)
}

/// Debt burned off by linear decay over `elapsed` seconds, clamped so the
/// debt never goes negative. The full market `length` is the decay window.
pub fn debt_decay(total_debt: i128, elapsed: u64, length: u64) -> i128 {
    if length == 0 {
        return total_debt;
    }
    let decay = total_debt
        .checked_mul(i128::from(elapsed))
        .expect("debt decay overflow")
        / i128::from(length);
    decay.min(total_debt)
}

/// Outstanding debt relative to the sell-out target, 9-decimal fixed point.
pub fn debt_ratio(total_debt: i128, target_debt: i128) -> i128 {
    total_debt
        .checked_mul(PRICE_SCALE)
        .expect("debt ratio overflow")
        / target_debt
}

/// Effective price: control variable times debt ratio, never below the
/// market's floor.
pub fn market_price(
    control_variable: i128,
    total_debt: i128,
    target_debt: i128,
    min_price: i128,
) -> i128 {
    let price = control_variable
        .checked_mul(debt_ratio(total_debt, target_debt))
        .expect("price overflow")
        / PRICE_SCALE;
    price.max(min_price)
}

/// Base tokens (9 decimals) owed for `amount` of quote at `price`. The
/// quote decimals are folded into the scale first so 18-decimal quote
/// amounts stay inside i128.
pub fn payout_for(amount: i128, price: i128, quote_decimals: u32) -> i128 {
    amount
        .checked_mul(PAYOUT_SCALE / pow10(quote_decimals))
        .expect("payout overflow")
        / price
}
