//! Update date tokens.

use chrono::NaiveDate;

use super::TokenRule;
use super::patterns::DATE_TOKEN;

/// `DD.MM.YYYY` date rule. Tokens with the right shape but no such
/// calendar day (e.g. `31.02.2023`) are not dates.
pub struct DateRule;

impl TokenRule for DateRule {
    type Output = NaiveDate;

    fn parse(&self, token: &str) -> Option<NaiveDate> {
        let caps = DATE_TOKEN.captures(token)?;
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Shape check only, used when deciding where a service name ends.
pub fn looks_like_date(token: &str) -> bool {
    DATE_TOKEN.is_match(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_rule() {
        assert_eq!(
            DateRule.parse("01.01.2023"),
            Some(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
        );
        assert_eq!(
            DateRule.parse("15.06.2024"),
            Some(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        );
    }

    #[test]
    fn test_impossible_date_is_rejected() {
        assert!(looks_like_date("31.02.2023"));
        assert_eq!(DateRule.parse("31.02.2023"), None);
        assert_eq!(DateRule.parse("2023-01-01"), None);
    }
}
