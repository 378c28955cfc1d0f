//! Utility functions and helpers

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Format a number with thousands separators
pub fn format_number<T: ToString>(n: T, separator: &str) -> String {
    let s = n.to_string();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    format!("{}{}", sign, result.chars().rev().collect::<String>())
}

/// Format a currency amount, e.g. `R1,234.50`
pub fn format_amount(amount: Decimal, symbol: &str, decimal_places: u32, separator: &str) -> String {
    let rounded = amount.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let abs = rounded.abs();
    let whole = abs.trunc();
    let whole_str = format_number(whole.to_u64().unwrap_or_default(), separator);

    if decimal_places == 0 {
        return format!("{}{}{}", sign, symbol, whole_str);
    }

    let fraction = (abs - whole) * Decimal::from(10u64.pow(decimal_places));
    format!(
        "{}{}{}.{:0width$}",
        sign,
        symbol,
        whole_str,
        fraction.trunc().to_u64().unwrap_or_default(),
        width = decimal_places as usize
    )
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generate a unique record ID
pub fn generate_id(prefix: &str) -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let seq = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{:x}-{:x}", prefix, now, seq)
}
