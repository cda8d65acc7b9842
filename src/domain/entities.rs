//! Domain entities: core data structures

use std::fmt;

use crate::domain::DomainError;

/// Positional argument names, in invocation order.
pub const ARGUMENT_NAMES: [&str; 3] = ["country_code", "state_code", "city_id"];

/// A request to resolve Steam profile location codes.
///
/// Codes are kept verbatim; an empty code means the profile leaves that
/// level unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    pub country_code: String,
    pub state_code: String,
    pub city_id: i64,
}

impl LocationQuery {
    pub fn new(country_code: impl Into<String>, state_code: impl Into<String>, city_id: i64) -> Self {
        Self {
            country_code: country_code.into(),
            state_code: state_code.into(),
            city_id,
        }
    }

    /// Build a query from argv-equivalent input (program name excluded).
    ///
    /// Exactly three values are accepted: country code, state code, city id.
    pub fn from_args<S: AsRef<str>>(args: &[S], parsing: CityIdParsing) -> Result<Self, DomainError> {
        if let Some(extra) = args.get(ARGUMENT_NAMES.len()) {
            return Err(DomainError::UnexpectedArgument(extra.as_ref().to_string()));
        }
        let country_code = arg_at(args, 0)?;
        let state_code = arg_at(args, 1)?;
        let city_id = parsing.parse(arg_at(args, 2)?)?;

        Ok(Self::new(country_code, state_code, city_id))
    }
}

fn arg_at<S: AsRef<str>>(args: &[S], idx: usize) -> Result<&str, DomainError> {
    args.get(idx)
        .map(|s| s.as_ref())
        .ok_or(DomainError::MissingArgument(ARGUMENT_NAMES[idx]))
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.country_code, self.state_code, self.city_id)
    }
}

/// How the textual city id is converted to an integer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CityIdParsing {
    /// Leading-integer conversion; text without digits reads as 0.
    #[default]
    Lenient,
    /// Optionally signed decimal digits only; anything else is rejected.
    Strict,
}

impl CityIdParsing {
    pub fn parse(self, raw: &str) -> Result<i64, DomainError> {
        match self {
            CityIdParsing::Lenient => Ok(parse_city_id_lenient(raw)),
            CityIdParsing::Strict => parse_city_id_strict(raw),
        }
    }
}

/// Convert the leading integer of `raw`, never failing.
///
/// Skips leading whitespace, takes an optional sign, then reads decimal
/// digits (a single `_` between two digits is allowed) up to the first
/// other character. No digits gives 0. Values past the `i64` range
/// saturate.
pub fn parse_city_id_lenient(raw: &str) -> i64 {
    let s = raw.trim_start_matches(|c: char| c.is_ascii_whitespace() || c == '\u{0b}');
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let bytes = digits.as_bytes();
    let mut value: i64 = 0;
    let mut after_digit = false;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'0'..=b'9' => {
                let d = i64::from(b - b'0');
                value = if negative {
                    value.saturating_mul(10).saturating_sub(d)
                } else {
                    value.saturating_mul(10).saturating_add(d)
                };
                after_digit = true;
            }
            b'_' if after_digit && bytes.get(i + 1).is_some_and(|n| n.is_ascii_digit()) => {
                after_digit = false;
            }
            _ => break,
        }
    }
    value
}

/// Parse `raw` as an optionally signed decimal integer.
pub fn parse_city_id_strict(raw: &str) -> Result<i64, DomainError> {
    let invalid = || DomainError::InvalidCityId(raw.to_string());
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    if unsigned.is_empty() || !unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<i64>().map_err(|_| invalid())
}

/// Expand environment variables and tilde in a path string.
///
/// Supports: `~`, `$VAR`, `${VAR}`
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
