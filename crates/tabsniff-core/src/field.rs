//! Field values

use std::fmt;

use lazy_regex::regex_is_match;

/// A single field of a row
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Field {
    /// Text, as read from the file
    Text(String),
    /// Integer produced by numeric conversion
    Int(i64),
    /// Floating-point number produced by numeric conversion
    Float(f64),
}

impl Field {
    /// Create a text field
    pub fn text<S: Into<String>>(s: S) -> Self {
        Field::Text(s.into())
    }

    /// Whether `s` looks like a number: optional sign, digits with an
    /// optional decimal point, optional exponent
    pub fn is_numeric(s: &str) -> bool {
        regex_is_match!(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$", s)
    }

    /// Whether `s` is a plain integer without leading zeros
    pub fn is_integer(s: &str) -> bool {
        regex_is_match!(r"^[+-]?(?:0|[1-9][0-9]*)$", s)
    }

    /// Convert numeric-looking text: integer if it validates as one, else
    /// float, else the text unchanged
    pub fn convert(s: String) -> Self {
        if Self::is_integer(&s) {
            if let Ok(n) = s.parse::<i64>() {
                return Field::Int(n);
            }
        }

        if Self::is_numeric(&s) {
            if let Ok(n) = s.parse::<f64>() {
                return Field::Float(n);
            }
        }

        Field::Text(s)
    }

    /// Text content, if this is a text field
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Field::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Field::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric value; integers widen to `f64`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Field::Int(n) => Some(*n as f64),
            Field::Float(n) => Some(*n),
            Field::Text(_) => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Field::Text(_))
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Text(s) => f.write_str(s),
            Field::Int(n) => write!(f, "{}", n),
            Field::Float(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self {
        Field::Text(s.to_string())
    }
}

impl From<String> for Field {
    fn from(s: String) -> Self {
        Field::Text(s)
    }
}

impl From<i64> for Field {
    fn from(n: i64) -> Self {
        Field::Int(n)
    }
}

impl From<f64> for Field {
    fn from(n: f64) -> Self {
        Field::Float(n)
    }
}

impl PartialEq<&str> for Field {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}
