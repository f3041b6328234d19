//! Contact form field rules.
//!
//! Lengths are counted in UTF-16 code units, which is what the page's own string length
//! reports, so "æ" counts once and an emoji counts twice.

use regex::Regex;
use std::sync::LazyLock;

// The page's `\s` and `trim` also cover U+FEFF; Rust's do not.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$")
        .expect("email pattern compiles")
});

// Digits are ASCII only, as in the page's regex dialect.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[0-9\s\x{FEFF}-]{8,}$").expect("phone pattern compiles")
});

fn trim(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

pub fn validate_name(value: &str) -> bool {
    utf16_len(trim(value)) >= 2
}

pub fn validate_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Phone is optional: blank input passes.
pub fn validate_phone(value: &str) -> bool {
    trim(value).is_empty() || PHONE.is_match(value)
}

pub fn validate_message(value: &str) -> bool {
    utf16_len(trim(value)) >= 10
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Email,
    Phone,
    Message,
}

/// Static description of one validated field.
#[derive(Clone, Copy)]
pub struct FieldSpec {
    pub kind: FieldKind,
    /// Looked up inside the form.
    pub selector: &'static str,
    pub validate: fn(&str) -> bool,
    pub error: &'static str,
}

pub static FIELDS: [FieldSpec; 4] = [
    FieldSpec {
        kind: FieldKind::Name,
        selector: "#name",
        validate: validate_name,
        error: "Vennligst oppgi ditt navn",
    },
    FieldSpec {
        kind: FieldKind::Email,
        selector: "#email",
        validate: validate_email,
        error: "Vennligst oppgi en gyldig e-postadresse",
    },
    FieldSpec {
        kind: FieldKind::Phone,
        selector: "#phone",
        validate: validate_phone,
        error: "Vennligst oppgi et gyldig telefonnummer",
    },
    FieldSpec {
        kind: FieldKind::Message,
        selector: "#message",
        validate: validate_message,
        error: "Meldingen må være minst 10 tegn",
    },
];

pub fn field_spec(kind: FieldKind) -> &'static FieldSpec {
    match kind {
        FieldKind::Name => &FIELDS[0],
        FieldKind::Email => &FIELDS[1],
        FieldKind::Phone => &FIELDS[2],
        FieldKind::Message => &FIELDS[3],
    }
}
