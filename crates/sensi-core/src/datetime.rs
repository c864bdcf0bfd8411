//! Strict date matching against moment-style format strings.
//!
//! Instrument exports document their timestamp layout with moment-style
//! patterns such as `M/DD/YYYY H:mm` or `YYYY-MM-DD HH:mm:ss`. A
//! [`DateFormat`] compiles such a pattern once and then matches cells
//! strictly: every token must match and the whole cell must be consumed.
//!
//! # Supported Tokens
//!
//! - `YYYY`: four digit year; `YY`: two digit year (`69`-`99` -> 19xx, else 20xx)
//! - `M`/`MM`: month, `D`/`DD`: day of month
//! - `H`/`HH`: hour 0-23, `h`/`hh`: hour 1-12 (requires `A` or `a`)
//! - `m`/`mm`: minute, `s`/`ss`: second
//! - `S` to `SSSSSSSSS`: fractional second with exactly that many digits
//! - `A`/`a`: `AM`/`PM` marker, case-insensitive
//! - `[...]`: escaped literal text
//!
//! Single-letter numeric tokens accept one or two digits, doubled tokens
//! require exactly two. Every other character is a literal. Components are
//! validated through `chrono`, so impossible calendar dates never match.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// Date format used by the Sensititre exports when none is configured.
pub const DEFAULT_DATE_FORMAT: &str = "M/DD/YYYY H:mm";

/// Errors raised while compiling a date format pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateFormatError {
    /// Pattern is empty.
    #[error("date format is empty")]
    Empty,

    /// No pattern was supplied to a matcher.
    #[error("at least one date format is required")]
    NoFormats,

    /// Token run that has no strict numeric meaning (e.g. `MMM`).
    #[error("unsupported token '{token}' in date format '{pattern}'")]
    UnsupportedToken { token: String, pattern: String },

    /// `[` without a closing `]`.
    #[error("unterminated '[' in date format '{pattern}'")]
    UnterminatedLiteral { pattern: String },

    /// 12-hour token without an AM/PM marker.
    #[error("12-hour token requires an AM/PM marker in date format '{pattern}'")]
    MissingMeridiem { pattern: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Year,
    ShortYear,
    Month,
    Day,
    Hour,
    Hour12,
    Minute,
    Second,
    Fraction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(char),
    Number { field: Field, min: usize, max: usize },
    Meridiem,
}

/// A compiled, strict date format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    tokens: Vec<Token>,
}

impl DateFormat {
    /// Compiles a moment-style pattern.
    pub fn new(pattern: &str) -> Result<Self, DateFormatError> {
        if pattern.is_empty() {
            return Err(DateFormatError::Empty);
        }

        let chars: Vec<char> = pattern.chars().collect();
        let mut tokens = Vec::new();
        let mut idx = 0;
        while idx < chars.len() {
            let ch = chars[idx];
            if ch == '[' {
                let close = chars[idx + 1..]
                    .iter()
                    .position(|&c| c == ']')
                    .ok_or_else(|| DateFormatError::UnterminatedLiteral {
                        pattern: pattern.to_string(),
                    })?;
                tokens.extend(
                    chars[idx + 1..idx + 1 + close]
                        .iter()
                        .copied()
                        .map(Token::Literal),
                );
                idx += close + 2;
                continue;
            }
            if !is_token_letter(ch) {
                tokens.push(Token::Literal(ch));
                idx += 1;
                continue;
            }
            let run = chars[idx..].iter().take_while(|&&c| c == ch).count();
            let token = field_token(ch, run).ok_or_else(|| DateFormatError::UnsupportedToken {
                token: ch.to_string().repeat(run),
                pattern: pattern.to_string(),
            })?;
            tokens.push(token);
            idx += run;
        }

        let has_hour12 = tokens.iter().any(|token| {
            matches!(
                token,
                Token::Number {
                    field: Field::Hour12,
                    ..
                }
            )
        });
        if has_hour12 && !tokens.contains(&Token::Meridiem) {
            return Err(DateFormatError::MissingMeridiem {
                pattern: pattern.to_string(),
            });
        }

        Ok(Self {
            pattern: pattern.to_string(),
            tokens,
        })
    }

    /// The pattern this format was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Parses `cell` strictly, returning `None` unless the whole cell matches.
    pub fn parse(&self, cell: &str) -> Option<NaiveDateTime> {
        let mut parts = Parts::default();
        let mut rest = cell;
        for token in &self.tokens {
            match token {
                Token::Literal(expected) => {
                    rest = rest.strip_prefix(*expected)?;
                }
                Token::Number { field, min, max } => {
                    let len = rest
                        .bytes()
                        .take(*max)
                        .take_while(u8::is_ascii_digit)
                        .count();
                    if len < *min {
                        return None;
                    }
                    let (digits, tail) = rest.split_at(len);
                    parts.set(*field, digits.parse().ok()?, len);
                    rest = tail;
                }
                Token::Meridiem => {
                    let marker = rest.get(..2)?;
                    parts.pm = if marker.eq_ignore_ascii_case("PM") {
                        Some(true)
                    } else if marker.eq_ignore_ascii_case("AM") {
                        Some(false)
                    } else {
                        return None;
                    };
                    rest = &rest[2..];
                }
            }
        }
        if !rest.is_empty() {
            return None;
        }
        parts.resolve()
    }

    /// Returns true if `cell` is a valid date under this format.
    pub fn matches(&self, cell: &str) -> bool {
        self.parse(cell).is_some()
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl FromStr for DateFormat {
    type Err = DateFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Strict validity check of one cell against one format.
pub fn is_valid_date(cell: &str, format: &DateFormat) -> bool {
    format.matches(cell)
}

/// One or more date formats tried in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateMatcher {
    formats: Vec<DateFormat>,
}

impl DateMatcher {
    pub fn new(format: DateFormat) -> Self {
        Self {
            formats: vec![format],
        }
    }

    /// Compiles every pattern; fails on the first invalid one or when empty.
    pub fn from_patterns<I, S>(patterns: I) -> Result<Self, DateFormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let formats = patterns
            .into_iter()
            .map(|pattern| DateFormat::new(pattern.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if formats.is_empty() {
            return Err(DateFormatError::NoFormats);
        }
        Ok(Self { formats })
    }

    pub fn formats(&self) -> &[DateFormat] {
        &self.formats
    }

    /// Parses `cell` with the first format that matches it.
    pub fn parse(&self, cell: &str) -> Option<NaiveDateTime> {
        self.formats.iter().find_map(|format| format.parse(cell))
    }

    pub fn is_valid_date(&self, cell: &str) -> bool {
        self.parse(cell).is_some()
    }
}

fn is_token_letter(ch: char) -> bool {
    matches!(
        ch,
        'Y' | 'M' | 'D' | 'H' | 'h' | 'm' | 's' | 'S' | 'A' | 'a'
    )
}

fn number(field: Field, min: usize, max: usize) -> Option<Token> {
    Some(Token::Number { field, min, max })
}

fn field_token(ch: char, run: usize) -> Option<Token> {
    match (ch, run) {
        ('Y', 4) => number(Field::Year, 4, 4),
        ('Y', 2) => number(Field::ShortYear, 2, 2),
        ('M', 1) => number(Field::Month, 1, 2),
        ('M', 2) => number(Field::Month, 2, 2),
        ('D', 1) => number(Field::Day, 1, 2),
        ('D', 2) => number(Field::Day, 2, 2),
        ('H', 1) => number(Field::Hour, 1, 2),
        ('H', 2) => number(Field::Hour, 2, 2),
        ('h', 1) => number(Field::Hour12, 1, 2),
        ('h', 2) => number(Field::Hour12, 2, 2),
        ('m', 1) => number(Field::Minute, 1, 2),
        ('m', 2) => number(Field::Minute, 2, 2),
        ('s', 1) => number(Field::Second, 1, 2),
        ('s', 2) => number(Field::Second, 2, 2),
        ('S', 1..=9) => number(Field::Fraction, run, run),
        ('A' | 'a', 1) => Some(Token::Meridiem),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct Parts {
    year: Option<i32>,
    month: Option<u32>,
    day: Option<u32>,
    hour: Option<u32>,
    hour12: Option<u32>,
    minute: Option<u32>,
    second: Option<u32>,
    nanos: Option<u32>,
    pm: Option<bool>,
}

impl Parts {
    fn set(&mut self, field: Field, value: u32, digits: usize) {
        match field {
            Field::Year => self.year = Some(value as i32),
            Field::ShortYear => {
                let century = if value > 68 { 1900 } else { 2000 };
                self.year = Some(century + value as i32);
            }
            Field::Month => self.month = Some(value),
            Field::Day => self.day = Some(value),
            Field::Hour => self.hour = Some(value),
            Field::Hour12 => self.hour12 = Some(value),
            Field::Minute => self.minute = Some(value),
            Field::Second => self.second = Some(value),
            Field::Fraction => self.nanos = Some(value * 10u32.pow(9 - digits as u32)),
        }
    }

    fn resolve(&self) -> Option<NaiveDateTime> {
        let hour = match self.hour12 {
            Some(hour12) => {
                if !(1..=12).contains(&hour12) {
                    return None;
                }
                let base = hour12 % 12;
                if self.pm == Some(true) { base + 12 } else { base }
            }
            None => self.hour.unwrap_or(0),
        };
        NaiveDate::from_ymd_opt(
            self.year.unwrap_or(1970),
            self.month.unwrap_or(1),
            self.day.unwrap_or(1),
        )?
        .and_hms_nano_opt(
            hour,
            self.minute.unwrap_or(0),
            self.second.unwrap_or(0),
            self.nanos.unwrap_or(0),
        )
    }
}
