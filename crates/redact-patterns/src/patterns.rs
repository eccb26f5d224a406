//! Built-in regular expressions
//!
//! The `regex` crate compiles to finite automata and matches in time linear
//! in the input; none of these can backtrack catastrophically. Digit classes
//! are spelled `[0-9]` because `\d` is Unicode-aware.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref EMAIL: Regex = Regex::new(
        r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}\b"
    )
    .unwrap();

    pub static ref CREDIT_CARD: Regex = Regex::new(r"\b[0-9](?:[ -]?[0-9]){12,18}\b").unwrap();

    pub static ref IPV4: Regex = Regex::new(
        r"\b(?:(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\.){3}(?:25[0-5]|2[0-4][0-9]|1[0-9]{2}|[1-9]?[0-9])\b"
    )
    .unwrap();

    pub static ref IBAN: Regex =
        Regex::new(r"\b[A-Z]{2}[0-9]{2}(?: ?[A-Z0-9]{4}){2,7}(?: ?[A-Z0-9]{1,3})?\b").unwrap();

    pub static ref URL: Regex = Regex::new(r#"\bhttps?://[^\s<>"'\[\]{}|\\^`]+"#).unwrap();

    // Indonesia
    pub static ref PHONE_ID: Regex =
        Regex::new(r"(?:\+62[ -]?|\b62[ -]?|\b0)8[0-9]{2}(?:[ -]?[0-9]){6,9}\b").unwrap();

    pub static ref NIK_ID: Regex = Regex::new(r"\b[1-9][0-9]{15}\b").unwrap();

    // United States
    pub static ref PHONE_US: Regex = Regex::new(
        r"(?:\+1[ .-]?)?(?:\([2-9][0-9]{2}\) ?|\b[2-9][0-9]{2}[ .-]?)[2-9][0-9]{2}[ .-]?[0-9]{4}\b"
    )
    .unwrap();

    pub static ref SSN_US: Regex = Regex::new(r"\b[0-9]{3}-[0-9]{2}-[0-9]{4}\b").unwrap();

    // United Kingdom
    pub static ref PHONE_GB: Regex =
        Regex::new(r"(?:\+44 ?|\b0)7[0-9]{3} ?[0-9]{3} ?[0-9]{3}\b").unwrap();

    pub static ref NINO_GB: Regex = Regex::new(
        r"\b[A-CEGHJ-PR-TW-Z][A-CEGHJ-NPR-TW-Z] ?[0-9]{2} ?[0-9]{2} ?[0-9]{2} ?[A-D]\b"
    )
    .unwrap();
}
