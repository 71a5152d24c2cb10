//! Free-text amount parsing
//!
//! Form fields arrive as whatever the user typed: currency symbols,
//! thousands separators, stray characters. The contract: drop everything
//! that is not a digit or decimal point, then take the first number-shaped
//! run. Empty or hopeless input is worth zero.

use rust_decimal::Decimal;

/// Parse a free-text amount field into a `Decimal`, defaulting to zero
///
/// `"1,234.56abc"` → 1234.56, `""` → 0, `"..1.2.3"` → 1.2
pub fn parse_amount(raw: &str) -> Decimal {
    let mut out = String::new();
    let mut seen_digit = false;
    let mut seen_dot = false;

    for c in raw.chars() {
        if c.is_ascii_digit() {
            out.push(c);
            seen_digit = true;
        } else if c == '.' {
            // Dots before any digit carry no value; a second dot ends the number
            if !seen_digit {
                continue;
            }
            if seen_dot {
                break;
            }
            seen_dot = true;
            out.push(c);
        }
        // Every other character (commas, currency symbols, letters) is noise
    }

    // A trailing dot is not a valid Decimal
    let trimmed = out.trim_end_matches('.');
    trimmed.parse().unwrap_or(Decimal::ZERO)
}
