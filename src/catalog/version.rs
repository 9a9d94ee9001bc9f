use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use std::cmp::Ordering;
use std::fmt;

/// A declared or catalogued node version.
///
/// The numeric value drives the default comparison. The label keeps the text the
/// version was written with, so `"1.10"` can still be told apart from `"1.1"`.
#[derive(Debug, Clone, Default)]
pub struct Version {
    value: f64,
    label: Option<String>,
}

impl Version {
    pub fn new(value: f64) -> Self {
        Self { value, label: None }
    }

    /// Parses a JSON value leniently.
    ///
    /// Numbers are taken as-is. Strings are read from their longest leading
    /// decimal prefix (`"2.1beta"` is `2.1`). Anything else, or a non-finite
    /// result, becomes `0`.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(n)) => {
                Self::new(n.as_f64().filter(|v| v.is_finite()).unwrap_or(0.0))
            }
            Some(Value::String(s)) => Self {
                value: parse_leading_float(s).unwrap_or(0.0),
                label: Some(s.trim().to_string()),
            },
            _ => Self::default(),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    /// The JSON form this version was read from: the original text when it was a
    /// string, otherwise a number.
    pub fn to_json(&self) -> Value {
        match &self.label {
            Some(label) => Value::String(label.clone()),
            None => serde_json::Number::from_f64(self.value)
                .map(Value::Number)
                .unwrap_or(Value::Null),
        }
    }

    /// The text used for segment-wise comparison.
    pub fn label(&self) -> String {
        match &self.label {
            Some(label) if !label.is_empty() => label.clone(),
            _ => format_version(self.value),
        }
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<f64> for Version {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_version(self.value))
    }
}

impl Serialize for Version {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.value)
    }
}

/// How a node's declared version is compared against the catalog's latest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionComparison {
    /// A single floating-point ordering. `"1.10"` reads as `1.1` and sorts
    /// below `"1.9"`.
    #[default]
    Numeric,
    /// Dot-separated segments compared as integers, so `"1.10"` is newer
    /// than `"1.9"`.
    Segmented,
}

impl VersionComparison {
    /// Returns `true` when `current` is strictly older than `latest`.
    pub fn is_outdated(self, current: &Version, latest: &Version) -> bool {
        match self {
            VersionComparison::Numeric => current.value() < latest.value(),
            VersionComparison::Segmented => {
                compare_segments(&current.label(), &latest.label()) == Ordering::Less
            }
        }
    }
}

/// Compares two dotted version strings segment by segment; missing segments count as zero.
pub fn compare_segments(left: &str, right: &str) -> Ordering {
    let left: Vec<u64> = left.split('.').map(leading_integer).collect();
    let right: Vec<u64> = right.split('.').map(leading_integer).collect();
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn leading_integer(segment: &str) -> u64 {
    let digits: String = segment
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

/// Parses the longest leading decimal number of `input`, ignoring leading whitespace.
///
/// Accepts an optional sign, digits with an optional fraction, and an optional
/// exponent. Returns `None` when no digits are found or the result is not finite.
/// The `Infinity` literal is not a version: records are emitted as JSON, which
/// has no representation for it, so `"Infinity"` reads like any other text.
pub fn parse_leading_float(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if digits > 0 || frac_end > frac_start {
            digits += frac_end - frac_start;
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent is only consumed when at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Formats a version number the way the workflow host prints it: `3` rather than `3.0`.
pub fn format_version(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
