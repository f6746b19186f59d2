//! Integer to display string conversion.
//!
//! Supports grouped decimals, bijective base-26 letters and subtractive
//! Roman numerals, each in lower and upper case where applicable.
//!
//! # Example
//!
//! ```
//! use pagetree::number::{format_number, NumberFormat};
//!
//! assert_eq!(format_number(27, NumberFormat::UpperAlpha), "AA");
//! assert_eq!(format_number(1994, NumberFormat::UpperRoman), "MCMXCIV");
//! ```

use crate::error::Warning;
use serde::{Deserialize, Serialize};
use std::fmt;

const ROMAN_SYMBOLS: [(i64, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Display representation of a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NumberFormat {
    /// 1, 2, 3, ... (grouped decimal)
    #[default]
    Int,
    /// a, b, ..., z, aa, ...
    LowerAlpha,
    /// A, B, ..., Z, AA, ...
    UpperAlpha,
    /// i, ii, iii, ...
    LowerRoman,
    /// I, II, III, ...
    UpperRoman,
    /// Unrecognized format name; the plain integer is printed.
    Raw,
}

impl NumberFormat {
    /// Look up a format by its configuration name.
    ///
    /// Unknown names map to [`NumberFormat::Raw`]. Use [`NumberFormat::parse`]
    /// when an unknown name should be detected.
    pub fn from_name(name: &str) -> Self {
        Self::parse(name).unwrap_or(NumberFormat::Raw)
    }

    /// Strict lookup by configuration name.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "int" | "Int" | "INT" => Some(NumberFormat::Int),
            "alpha" => Some(NumberFormat::LowerAlpha),
            "Alpha" | "ALPHA" => Some(NumberFormat::UpperAlpha),
            "roman" => Some(NumberFormat::LowerRoman),
            "Roman" | "ROMAN" => Some(NumberFormat::UpperRoman),
            "raw" => Some(NumberFormat::Raw),
            _ => None,
        }
    }

    /// Configuration name of the format.
    pub fn name(&self) -> &'static str {
        match self {
            NumberFormat::Int => "int",
            NumberFormat::LowerAlpha => "alpha",
            NumberFormat::UpperAlpha => "Alpha",
            NumberFormat::LowerRoman => "roman",
            NumberFormat::UpperRoman => "Roman",
            NumberFormat::Raw => "raw",
        }
    }
}

impl From<String> for NumberFormat {
    fn from(name: String) -> Self {
        match NumberFormat::parse(&name) {
            Some(format) => format,
            None => {
                log::warn!("{}", Warning::UnknownNumberFormat(name));
                NumberFormat::Raw
            }
        }
    }
}

impl From<NumberFormat> for String {
    fn from(format: NumberFormat) -> Self {
        format.name().to_string()
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Letter case for alpha and Roman output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    /// Lowercase letters
    Lower,
    /// Uppercase letters
    Upper,
}

/// Separators used by the `int` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimalStyle {
    /// Number of decimals (always zero for numbering)
    pub decimals: usize,

    /// Decimal point
    pub decimal_point: String,

    /// Thousands separator (empty = no grouping)
    pub thousands_separator: String,
}

impl Default for DecimalStyle {
    fn default() -> Self {
        Self {
            decimals: 0,
            decimal_point: ".".to_string(),
            thousands_separator: String::new(),
        }
    }
}

/// A wrapped integer value that can be rendered in any [`NumberFormat`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Number(pub i64);

impl Number {
    /// Create a new number.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the raw value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Render with the default decimal style.
    pub fn formatted(&self, format: NumberFormat) -> String {
        self.formatted_with(format, &DecimalStyle::default())
    }

    /// Render with an explicit decimal style for the `int` format.
    pub fn formatted_with(&self, format: NumberFormat, style: &DecimalStyle) -> String {
        match format {
            NumberFormat::Int => decimal(self.0, style),
            NumberFormat::LowerAlpha => alpha(self.0, Case::Lower),
            NumberFormat::UpperAlpha => alpha(self.0, Case::Upper),
            NumberFormat::LowerRoman => roman(self.0, Case::Lower),
            NumberFormat::UpperRoman => roman(self.0, Case::Upper),
            NumberFormat::Raw => self.0.to_string(),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Render `value` in the given format.
pub fn format_number(value: i64, format: NumberFormat) -> String {
    Number(value).formatted(format)
}

/// Grouped decimal representation.
pub fn decimal(value: i64, style: &DecimalStyle) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(&style.thousands_separator);
        }
        grouped.push(ch);
    }

    if style.decimals > 0 {
        grouped.push_str(&style.decimal_point);
        grouped.push_str(&"0".repeat(style.decimals));
    }
    grouped
}

/// Bijective base-26 letters: 1 → A, 26 → Z, 27 → AA.
///
/// Values `<= 0` have no letter form and render as `"0"`.
pub fn alpha(value: i64, case: Case) -> String {
    if value <= 0 {
        return "0".to_string();
    }

    let base = match case {
        Case::Lower => b'a',
        Case::Upper => b'A',
    };
    let mut letters = Vec::new();
    let mut n = value;
    while n > 0 {
        let index = ((n - 1) % 26) as u8;
        letters.push((base + index) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Largest magnitude written with Roman symbols.
pub const ROMAN_MAX: u64 = 3999;

/// Subtractive Roman numerals. Zero renders as `"0"`, negatives get a sign.
///
/// Magnitudes above [`ROMAN_MAX`] have no standard form and are written as
/// plain decimals instead.
pub fn roman(value: i64, case: Case) -> String {
    if value == 0 || value.unsigned_abs() > ROMAN_MAX {
        return value.to_string();
    }

    let mut result = String::new();
    if value < 0 {
        result.push('-');
    }

    let mut remaining = value.unsigned_abs();
    for &(symbol_value, symbol) in &ROMAN_SYMBOLS {
        let symbol_value = symbol_value as u64;
        let count = remaining / symbol_value;
        for _ in 0..count {
            result.push_str(symbol);
        }
        remaining %= symbol_value;
    }

    match case {
        Case::Lower => result.to_lowercase(),
        Case::Upper => result,
    }
}
