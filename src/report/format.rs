//! Abbreviated display of monetary values
//!
//! Not part of the numeric contract. Values are scaled to thousands,
//! millions or billions and printed with Brazilian separators: `.` groups
//! thousands and `,` marks decimals.

use crate::rates::round_half_up;

/// Suffixes appended after the scaled value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Suffixes {
    pub thousand: &'static str,
    pub million: &'static str,
    pub billion: &'static str,
}

pub const SHORT_SUFFIXES: Suffixes = Suffixes {
    thousand: "mil",
    million: "mi",
    billion: "bi",
};

pub const LONG_SUFFIXES: Suffixes = Suffixes {
    thousand: "mil",
    million: "milhões",
    billion: "bilhões",
};

/// Number style for the scaled value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// `R$` prefix with one or two decimals
    Currency,
    /// Plain number with at most `max_fraction_digits` decimals
    Decimal { max_fraction_digits: usize },
}

/// Format `value` with the short suffixes
pub fn format_abbreviated(value: f64, style: NumberStyle) -> String {
    format_with_suffixes(value, style, SHORT_SUFFIXES)
}

/// Currency format with spelled-out suffixes
pub fn format_abbreviated_long(value: f64) -> String {
    format_with_suffixes(value, NumberStyle::Currency, LONG_SUFFIXES)
}

pub fn format_with_suffixes(value: f64, style: NumberStyle, suffixes: Suffixes) -> String {
    if !value.is_finite() {
        return "-".to_string();
    }

    let magnitude = value.abs();
    let (divisor, suffix) = if magnitude >= 1e9 {
        (1e9, suffixes.billion)
    } else if magnitude >= 1e6 {
        (1e6, suffixes.million)
    } else if magnitude >= 1e3 {
        (1e3, suffixes.thousand)
    } else {
        (1.0, "")
    };

    let scaled = value / divisor;
    let number = match style {
        NumberStyle::Currency => {
            let digits = pt_br_digits(scaled.abs(), 1, 2);
            if scaled < 0.0 && digits != "0,0" {
                format!("-R$ {}", digits)
            } else {
                format!("R$ {}", digits)
            }
        }
        NumberStyle::Decimal { max_fraction_digits } => {
            let digits = pt_br_digits(scaled.abs(), 0, max_fraction_digits);
            if scaled < 0.0 && digits != "0" {
                format!("-{}", digits)
            } else {
                digits
            }
        }
    };

    if suffix.is_empty() {
        number
    } else {
        format!("{} {}", number, suffix)
    }
}

/// Render a non-negative number with pt-BR separators, trimming trailing
/// zeros down to `min_fraction` decimals
fn pt_br_digits(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    let rounded = round_half_up(value, max_fraction as i32);
    let fixed = format!("{:.*}", max_fraction, rounded);
    let (integer, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let mut fraction = fraction.to_string();
    while fraction.len() > min_fraction && fraction.ends_with('0') {
        fraction.pop();
    }

    if fraction.is_empty() {
        grouped
    } else {
        format!("{},{}", grouped, fraction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_abbreviations() {
        assert_eq!(format_abbreviated(2_409_309.28, NumberStyle::Currency), "R$ 2,41 mi");
        assert_eq!(format_abbreviated(1_500.0, NumberStyle::Currency), "R$ 1,5 mil");
        assert_eq!(format_abbreviated(999.0, NumberStyle::Currency), "R$ 999,0");
        assert_eq!(format_abbreviated(1_234_500_000_000.0, NumberStyle::Currency), "R$ 1.234,5 bi");
    }

    #[test]
    fn test_long_suffixes() {
        assert_eq!(format_abbreviated_long(3_967_604.55), "R$ 3,97 milhões");
        assert_eq!(format_abbreviated_long(2_000_000_000.0), "R$ 2,0 bilhões");
    }

    #[test]
    fn test_decimal_style() {
        let style = NumberStyle::Decimal { max_fraction_digits: 1 };
        assert_eq!(format_abbreviated(10_666.21, style), "10,7 mil");
        assert_eq!(format_abbreviated(12.0, style), "12");
        assert_eq!(
            format_abbreviated(-250_000.0, NumberStyle::Decimal { max_fraction_digits: 0 }),
            "-250 mil"
        );
    }

    #[test]
    fn test_negative_currency_and_non_finite() {
        assert_eq!(format_abbreviated(-1_250.0, NumberStyle::Currency), "-R$ 1,25 mil");
        assert_eq!(format_abbreviated(f64::NAN, NumberStyle::Currency), "-");
    }
}
