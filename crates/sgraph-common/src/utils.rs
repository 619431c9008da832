//! Shared formatting and normalization helpers.

/// Currency markers stripped from numeric cells before parsing.
const CURRENCY_MARKERS: &[&str] = &["Rs.", "Rs", "INR", "USD", "$", "₹", "€", "£", "¥"];

fn strip_currency_prefix(body: &str) -> Option<&str> {
    CURRENCY_MARKERS
        .iter()
        .find_map(|marker| body.strip_prefix(marker))
        .map(str::trim_start)
}

fn strip_currency_suffix(body: &str) -> Option<&str> {
    CURRENCY_MARKERS
        .iter()
        .find_map(|marker| body.strip_suffix(marker))
        .map(str::trim_end)
}

/// Parses a possibly currency-formatted amount such as `"$1,234.56"`,
/// `"₹ 12,00,000"`, `"(300)"` or `"$(300)"`.
///
/// At most one sign is accepted, written as a leading `-`/`+` or as
/// enclosing parentheses, before or after the currency marker.
/// Returns `None` for blank input, anything that is not a number once the
/// decorations are removed, and non-finite values.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let mut body = raw.trim();
    let mut negative = false;
    let mut signed = false;
    let mut prefixed = false;
    let mut suffixed = false;

    loop {
        if !signed {
            if let Some(inner) = body.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
                negative = true;
                signed = true;
                body = inner.trim();
                continue;
            }
            if let Some(rest) = body.strip_prefix('-') {
                negative = true;
                signed = true;
                body = rest.trim_start();
                continue;
            }
            if let Some(rest) = body.strip_prefix('+') {
                signed = true;
                body = rest.trim_start();
                continue;
            }
        }
        if !prefixed {
            if let Some(rest) = strip_currency_prefix(body) {
                prefixed = true;
                body = rest;
                continue;
            }
        }
        if !suffixed {
            if let Some(rest) = strip_currency_suffix(body) {
                suffixed = true;
                body = rest;
                continue;
            }
        }
        break;
    }

    let digits: String = body
        .chars()
        .filter(|c| !matches!(c, ',' | '_' | ' ' | '\u{a0}'))
        .collect();
    if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let value: f64 = digits.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(if negative { -value } else { value })
}

/// Inserts `,` every three digits of an unsigned integer string.
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

/// Formats an amount with a currency symbol, thousands separators and
/// two decimals, e.g. `₹1,234.50` or `-$20.00`.
pub fn format_money(amount: f64, symbol: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{symbol}{}.{frac_part}", group_thousands(int_part))
}

/// Formats a percentage with two decimals, e.g. `125.00%`.
pub fn format_percent(pct: f64) -> String {
    format!("{pct:.2}%")
}
