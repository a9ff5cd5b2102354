/// Parsing of user-typed investment amounts

use regex::Regex;
use std::sync::OnceLock;

/// Currency symbols, grouping commas and whitespace around the number
fn get_noise_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[\s$,]").expect("static regex"))
}

/// Number that survives the noise stripping: digits with an optional fraction
fn get_number_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^-?(?:\d+(?:\.\d*)?|\.\d+)$").expect("static regex"))
}

/// Turn raw amount text into a non-negative amount
///
/// Anything that is not a plain number after stripping `$`, `,` and
/// whitespace counts as 0, as do negative values.
///
/// # Examples
/// ```
/// use stemvest::invest::parse_amount;
///
/// assert_eq!(parse_amount("$1,250.50"), 1250.5);
/// assert_eq!(parse_amount("abc"), 0.0);
/// ```
pub fn parse_amount(input: &str) -> f64 {
    let cleaned = get_noise_regex().replace_all(input, "");
    if !get_number_regex().is_match(&cleaned) {
        return 0.0;
    }
    cleaned.parse::<f64>().map(sanitize_amount).unwrap_or(0.0)
}

/// Clamp an already numeric amount, NaN and infinities included, to `>= 0`
pub fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount > 0.0 {
        amount
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_number() {
        assert_eq!(parse_amount("1000"), 1000.0);
        assert_eq!(parse_amount("  42.5 "), 42.5);
        assert_eq!(parse_amount(".5"), 0.5);
    }

    #[test]
    fn test_currency_formatting() {
        assert_eq!(parse_amount("$1,000"), 1000.0);
        assert_eq!(parse_amount("$ 12,345.67"), 12345.67);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("abc"), 0.0);
        assert_eq!(parse_amount("12abc"), 0.0);
        assert_eq!(parse_amount("1.2.3"), 0.0);
    }

    #[test]
    fn test_negative_is_zero() {
        assert_eq!(parse_amount("-50"), 0.0);
        assert_eq!(sanitize_amount(-1.0), 0.0);
    }

    #[test]
    fn test_non_finite_is_zero() {
        assert_eq!(sanitize_amount(f64::NAN), 0.0);
        assert_eq!(sanitize_amount(f64::INFINITY), 0.0);
    }
}
