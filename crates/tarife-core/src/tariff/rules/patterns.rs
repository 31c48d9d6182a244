//! Common regex patterns for tariff list lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Section header: "1.1 Kredi Tahsis ve Kredi Kullandırım"
    pub static ref SECTION_HEADER: Regex = Regex::new(
        r"^(\d+\.\d+)\s+(.+)$"
    ).unwrap();

    // Any three-or-more component dotted run; disqualifies section headers.
    pub static ref DOTTED_TRIPLE: Regex = Regex::new(
        r"\d+\.\d+\.\d+"
    ).unwrap();

    // Detailed entry: "3 3 1.1.2İtibar Mektubu Ücreti TRY 100"
    pub static ref DETAILED_ENTRY: Regex = Regex::new(
        r"^(\d+)(?:\s+(\d+))?\s+(\d+\.\d+\.\d+)(.*)$"
    ).unwrap();

    // Report number and id interleaved with "Kredi" by text extraction:
    // "1K.r1e.1d.i2 Kullandırım"
    pub static ref FUSED_REPORT_ID: Regex = Regex::new(
        r"^\d+K\.r1e\.1d\.i\d+\s+(.+)$"
    ).unwrap();

    pub static ref LEADING_DIGIT: Regex = Regex::new(
        r"^\d"
    ).unwrap();

    // Token shapes
    pub static ref TOKEN: Regex = Regex::new(
        r"\S+"
    ).unwrap();

    pub static ref INTEGER_TOKEN: Regex = Regex::new(
        r"^\d+$"
    ).unwrap();

    pub static ref DECIMAL_TOKEN: Regex = Regex::new(
        r"^\d+[.,]\d+$"
    ).unwrap();

    pub static ref PERCENT_TOKEN: Regex = Regex::new(
        r"^(\d+)(?:[.,](\d+))?%$"
    ).unwrap();

    pub static ref DATE_TOKEN: Regex = Regex::new(
        r"^(\d{2})\.(\d{2})\.(\d{4})$"
    ).unwrap();
}
