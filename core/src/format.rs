/*
 * Copyright (c) 2026 Mohamad Al-Zawahreh (dba Sovereign Systems).
 *
 * This file is part of the Creator Earnings Estimator.
 *
 * LICENSE: DUAL-LICENSED (AGPLv3 or COMMERCIAL).
 * PATENT NOTICE: Protected by US Patent App #63/935,467.
 */

//! Display formatting for estimates and view counts.
//!
//! - Amounts: exactly 2 decimals, comma thousands separators (`1,234.50`)
//! - View counts: comma thousands separators (`1,234,567`)

/// Round to the nearest cent, halves away from zero.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Format an amount with 2 decimals and thousands separators.
pub fn format_amount(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }
    let fixed = format!("{:.2}", round_cents(amount).abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    // -0.00 prints without a sign
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, group_thousands(whole), cents)
}

/// Format an amount as US dollars, e.g. `$1,234.50` or `-$3.00`.
pub fn format_usd(amount: f64) -> String {
    let body = format_amount(amount);
    match body.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", body),
    }
}

/// Whole view count from a host-supplied number. Negative, NaN and
/// infinite inputs become 0; fractions are truncated.
pub fn whole_views(views: f64) -> u64 {
    if !views.is_finite() || views <= 0.0 {
        return 0;
    }
    // `as` saturates above u64::MAX
    views.trunc() as u64
}

/// Format a view count with thousands separators.
pub fn format_views(views: u64) -> String {
    group_thousands(&views.to_string())
}

/// Insert a comma every three digits from the right. Expects ASCII digits.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
