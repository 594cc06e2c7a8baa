//! Unit tests for deal-size parsing

use themetrix::momentum::parse_deal_value;

#[test]
fn millions_parse_as_is() {
    assert_eq!(parse_deal_value("€45M"), 45.0);
    assert_eq!(parse_deal_value("$500M"), 500.0);
    assert_eq!(parse_deal_value("45M"), 45.0);
}

#[test]
fn billions_scale_by_thousand() {
    assert_eq!(parse_deal_value("€1.2B"), 1200.0);
    assert_eq!(parse_deal_value("$2B"), 2000.0);
}

#[test]
fn lowercase_units_accepted() {
    assert_eq!(parse_deal_value("45m"), 45.0);
    assert_eq!(parse_deal_value("1.5b"), 1500.0);
}

#[test]
fn unparseable_contributes_zero() {
    assert_eq!(parse_deal_value("N/A"), 0.0);
    assert_eq!(parse_deal_value(""), 0.0);
    assert_eq!(parse_deal_value("undisclosed"), 0.0);
}

#[test]
fn bare_number_without_unit_contributes_zero() {
    assert_eq!(parse_deal_value("45"), 0.0);
    assert_eq!(parse_deal_value("$1000000"), 0.0);
}

#[test]
fn decimal_amounts_parse() {
    assert_eq!(parse_deal_value("€4.75M"), 4.75);
}

#[test]
fn millions_checked_before_billions() {
    // "M" wins when both letters appear.
    assert_eq!(parse_deal_value("3M (Series B)"), 3.0);
}
