use std::fmt;
/// Result of interpreting one raw line from the probe.
#[derive(Clone, Debug, PartialEq)]
pub enum Reading {
    Temperature(f64),
    Discarded(DiscardReason),
}
#[derive(Clone, Debug, PartialEq)]
pub enum DiscardReason {
    EmptyLine,
    NotANumber(String),
    NonFinite(f64),
}
impl fmt::Display for DiscardReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardReason::EmptyLine => write!(f, "empty line"),
            DiscardReason::NotANumber(token) => write!(f, "non-numeric token {token:?}"),
            DiscardReason::NonFinite(value) => write!(f, "non-finite value {value}"),
        }
    }
}
/// Parses the first whitespace-separated token as a temperature; trailing
/// fields are ignored.
pub fn parse_reading(line: &str) -> Reading {
    let Some(token) = line.split_whitespace().next() else {
        return Reading::Discarded(DiscardReason::EmptyLine);
    };
    match token.parse::<f64>() {
        Ok(value) if value.is_finite() => Reading::Temperature(value),
        Ok(value) => Reading::Discarded(DiscardReason::NonFinite(value)),
        Err(_) => Reading::Discarded(DiscardReason::NotANumber(token.to_owned())),
    }
}
/// Formats a value the way C's `%1.8e` does: signed, at least two exponent digits.
pub fn format_scientific(value: f64) -> String {
    let raw = format!("{value:.8e}");
    let Some((mantissa, exponent)) = raw.split_once('e') else {
        return raw;
    };
    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}
/// One output-file line: `%1.8e    %f`.
pub fn format_record(elapsed_s: f64, temperature_k: f64) -> String {
    format!("{}    {:.6}", format_scientific(elapsed_s), temperature_k)
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn first_token_wins_over_trailing_fields() {
        assert_eq!(parse_reading("300.0 extra\n"), Reading::Temperature(300.0));
        assert_eq!(parse_reading("  293.15\t21 C\r\n"), Reading::Temperature(293.15));
        assert_eq!(parse_reading("-1e2"), Reading::Temperature(-100.0));
    }
    #[test]
    fn malformed_lines_are_discarded_with_reason() {
        assert_eq!(
            parse_reading("\n"),
            Reading::Discarded(DiscardReason::EmptyLine)
        );
        assert_eq!(
            parse_reading("bad 300.0"),
            Reading::Discarded(DiscardReason::NotANumber("bad".into()))
        );
        assert!(matches!(
            parse_reading("NaN"),
            Reading::Discarded(DiscardReason::NonFinite(_))
        ));
    }
    #[test]
    fn scientific_format_matches_printf() {
        assert_eq!(format_scientific(0.0), "0.00000000e+00");
        assert_eq!(format_scientific(1.5), "1.50000000e+00");
        assert_eq!(format_scientific(123.456), "1.23456000e+02");
        assert_eq!(format_scientific(0.00123), "1.23000000e-03");
        assert_eq!(format_scientific(1.0e120), "1.00000000e+120");
    }
    #[test]
    fn record_line_layout() {
        assert_eq!(format_record(2.5, 301.5), "2.50000000e+00    301.500000");
    }
}
