//! Amount tokens.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::TokenRule;
use super::patterns::{DECIMAL_TOKEN, INTEGER_TOKEN};

/// Integer amount rule. Tariff lists print fee bounds as whole numbers;
/// tokens with a fractional part are not amount candidates.
pub struct AmountRule;

impl TokenRule for AmountRule {
    type Output = Decimal;

    fn parse(&self, token: &str) -> Option<Decimal> {
        if !INTEGER_TOKEN.is_match(token) {
            return None;
        }
        Decimal::from_str(token).ok()
    }
}

/// Parse an unsigned number written with either `.` or `,` as the decimal
/// separator (e.g. "0,5" or "2.25").
pub fn parse_decimal(s: &str) -> Option<Decimal> {
    if !INTEGER_TOKEN.is_match(s) && !DECIMAL_TOKEN.is_match(s) {
        return None;
    }
    Decimal::from_str(&s.replace(',', ".")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_rule() {
        assert_eq!(AmountRule.parse("500"), Some(Decimal::from(500)));
        assert_eq!(AmountRule.parse("007"), Some(Decimal::from(7)));
        assert_eq!(AmountRule.parse("1.000"), None);
        assert_eq!(AmountRule.parse("10TL"), None);
    }

    #[test]
    fn test_amount_rule_overflow_is_ignored() {
        assert_eq!(AmountRule.parse("999999999999999999999999999999999"), None);
    }

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("0,5"), Some(Decimal::from_str("0.5").unwrap()));
        assert_eq!(parse_decimal("2.25"), Some(Decimal::from_str("2.25").unwrap()));
        assert_eq!(parse_decimal("3"), Some(Decimal::from(3)));
        assert_eq!(parse_decimal("1,2,3"), None);
        assert_eq!(parse_decimal(""), None);
    }
}
