//! Deal-size string parsing
//!
//! Extracted deal sizes arrive as free text ("€45M", "$1.2B", "N/A").
//! Unparseable strings contribute zero; parsing never fails the
//! computation.

/// Parse a deal-size string into millions.
///
/// The leading number is taken as millions when the string carries an
/// "M" and as billions (x1000) when it carries a "B"; anything else
/// contributes 0. "M" is checked first when both letters appear.
pub fn parse_deal_value(deal_size: &str) -> f64 {
    let Some(amount) = leading_number(deal_size) else {
        return 0.0;
    };

    let upper = deal_size.to_uppercase();
    if upper.contains('M') {
        amount
    } else if upper.contains('B') {
        amount * 1000.0
    } else {
        0.0
    }
}

/// First contiguous numeric run (digits and a decimal point) in the
/// string, skipping any currency prefix.
fn leading_number(s: &str) -> Option<f64> {
    let start = s.find(|c: char| c.is_ascii_digit())?;
    let run: String = s[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    run.parse::<f64>().ok()
}
