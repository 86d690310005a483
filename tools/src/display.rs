//! Number formatting for the summary table and dashboard cards.

use bizmetrics_core::config::DisplayConfig;

/// Insert thousands separators into the integer part of a formatted number.
fn group_thousands(formatted: &str) -> String {
    let (sign, body) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    let (int_part, frac_part) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// `$1,234,567` in whole currency units.
pub fn currency(value: f64, cfg: &DisplayConfig) -> String {
    let body = group_thousands(&format!("{:.0}", value.abs()));
    if value < 0.0 && body != "0" {
        format!("-{}{body}", cfg.currency_symbol)
    } else {
        format!("{}{body}", cfg.currency_symbol)
    }
}

/// `$4.25` for per-unit costs such as CPC.
pub fn currency_cents(value: f64, cfg: &DisplayConfig) -> String {
    let body = group_thousands(&format!("{:.2}", value.abs()));
    if value < 0.0 && body != "0.00" {
        format!("-{}{body}", cfg.currency_symbol)
    } else {
        format!("{}{body}", cfg.currency_symbol)
    }
}

/// `12.3%`
pub fn percent(value: f64, cfg: &DisplayConfig) -> String {
    format!("{:.*}{}", cfg.decimal_places, value, cfg.percentage_symbol)
}

/// `-` for an undefined percentage.
pub fn optional_percent(value: Option<f64>, cfg: &DisplayConfig) -> String {
    value.map_or_else(|| "-".to_string(), |v| percent(v, cfg))
}

/// `2.1x`
pub fn ratio(value: f64, cfg: &DisplayConfig) -> String {
    format!("{:.*}x", cfg.decimal_places, value)
}

/// `1,234`
pub fn count(value: usize) -> String {
    group_thousands(&value.to_string())
}
