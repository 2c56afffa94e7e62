//! Common regex patterns for boleto extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Dates: dd/mm/yyyy, or "dd mmm yy" with a Portuguese month abbreviation
    pub static ref DATE_ANY: Regex = Regex::new(
        r"(\d{2}/\d{2}/\d{4})|(\d{2})\s(\w{3})\s(\d{2})"
    ).unwrap();

    // Installation code: exactly 12 digits
    pub static ref INSTALLATION_CODE: Regex = Regex::new(
        r"\b(\d{12})\b"
    ).unwrap();

    // User code: 8 to 11 digits
    pub static ref USER_CODE: Regex = Regex::new(
        r"\b(\d{8,11})\b"
    ).unwrap();

    // Amount after the real currency symbol (1.234,56 kept as printed)
    pub static ref TOTAL_AMOUNT: Regex = Regex::new(
        r"R\$\s*([\d.,]+)"
    ).unwrap();

    // Digitable line: four blocks of 11 digits, each followed by a check digit
    pub static ref BARCODE: Regex = Regex::new(
        r"(\d{11})-(\d)\s*(\d{11})-(\d)\s*(\d{11})-(\d)\s*(\d{11})-(\d)"
    ).unwrap();
}
