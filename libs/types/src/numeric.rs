//! Overflow-checked helpers for ledger amounts
//!
//! Amounts are `rust_decimal::Decimal` throughout. Nothing here wraps or
//! saturates: every operation that can overflow returns `None`.
//!
//! `Decimal::checked_add` only reports overflow of the 96-bit mantissa. A
//! result that needs more than 28 significant digits is rounded and still
//! returned as `Some`, so a small amount added to a large one can vanish.
//! `exact_add` and `exact_sub` also reject those lossy results.

use rust_decimal::Decimal;

/// True when `amount` is strictly greater than zero.
pub fn is_positive(amount: Decimal) -> bool {
    amount > Decimal::ZERO
}

/// `a + b`, or `None` on overflow or when the sum cannot be represented
/// without rounding.
pub fn exact_add(a: Decimal, b: Decimal) -> Option<Decimal> {
    let sum = a.checked_add(b)?;
    (sum.checked_sub(a)? == b && sum.checked_sub(b)? == a).then_some(sum)
}

/// `a - b`, or `None` on overflow or when the difference cannot be
/// represented without rounding.
pub fn exact_sub(a: Decimal, b: Decimal) -> Option<Decimal> {
    exact_add(a, -b)
}

/// Sum a sequence of amounts, returning `None` on overflow or rounding.
pub fn checked_sum<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| exact_add(acc, amount))
}
