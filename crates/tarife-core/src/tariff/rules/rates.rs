//! Percentage rate tokens.

use rust_decimal::Decimal;

use super::TokenRule;
use super::amounts::parse_decimal;
use super::patterns::PERCENT_TOKEN;

/// Percentage rule. The value is kept in percent: "0,5%" parses to `0.5`.
/// Out-of-range rates are passed through unchanged.
pub struct RateRule;

impl TokenRule for RateRule {
    type Output = Decimal;

    fn parse(&self, token: &str) -> Option<Decimal> {
        if !PERCENT_TOKEN.is_match(token) {
            return None;
        }
        parse_decimal(token.trim_end_matches('%'))
    }
}
