//! Compact human-readable counts for badge messages

/// Formats this number to a simple human readable version
///
/// The value is first rounded to two significant figures (ties go to the
/// even digit), then scaled to `k` or `m` by magnitude.
///
/// ```
/// use usage_badges::format::format_number;
///
/// assert_eq!(format_number(1234567890), "1200m");
/// assert_eq!(format_number(1234567), "1.2m");
/// assert_eq!(format_number(123456), "120k");
/// assert_eq!(format_number(1234), "1.2k");
/// assert_eq!(format_number(123), "120");
/// assert_eq!(format_number(1), "1");
/// ```
pub fn format_number(i: u64) -> String {
    let rounded = round_significant(i, 2);

    if rounded > 10_000_000 {
        format!("{}m", rounded / 1_000_000)
    } else if rounded > 1_000_000 {
        tenths(rounded / 100_000, "m")
    } else if rounded > 10_000 {
        format!("{}k", rounded / 1_000)
    } else if rounded > 1_000 {
        tenths(rounded / 100, "k")
    } else {
        rounded.to_string()
    }
}

/// Renders `n / 10` with exactly one decimal place
fn tenths(n: u128, suffix: &str) -> String {
    format!("{}.{}{}", n / 10, n % 10, suffix)
}

/// Rounds to `figures` significant digits with round-half-to-even.
///
/// Every bracket above the plain-integer case divides exactly after this
/// rounding, so the formatting stays in integer arithmetic.
fn round_significant(i: u64, figures: u32) -> u128 {
    let value = u128::from(i);
    let digits = decimal_digits(value);
    if digits <= figures {
        return value;
    }

    let scale = 10u128.pow(digits - figures);
    let mut quotient = value / scale;
    let remainder = value % scale;
    let half = scale / 2;

    if remainder > half || (remainder == half && quotient % 2 == 1) {
        quotient += 1;
    }
    quotient * scale
}

fn decimal_digits(mut value: u128) -> u32 {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}
