use serde::{Serialize, Serializer};
use std::fmt;

/// A single cell of the dataset.
///
/// CSV cells are dynamically typed: a cell is parsed into a number when the
/// raw text is a finite float, kept as text otherwise, and marked missing
/// when empty. Numeric consumers go through [`CellValue::as_f64`] and treat
/// a failed coercion as missing rather than an error.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Parse a raw CSV cell into a typed value.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return CellValue::Missing;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() => CellValue::Number(v),
            _ => CellValue::Text(trimmed.to_string()),
        }
    }

    /// Coerce the cell to a finite number. Text that happens to contain a
    /// numeric literal still coerces; anything else is `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            CellValue::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            CellValue::Missing => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) => write!(f, "{}", v),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Missing => Ok(()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Number(v) => serializer.serialize_f64(*v),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Missing => serializer.serialize_unit(),
        }
    }
}

/// A row's similarity score.
///
/// `Unscored` is the "no match" sentinel: semantically +infinity, it sorts
/// after every real distance when ascending and serializes to JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchScore {
    Scored(f64),
    Unscored,
}

impl MatchScore {
    /// The score as a float, with the sentinel mapped to +infinity so that
    /// unscored rows order after every scored row.
    pub fn as_f64(&self) -> f64 {
        match self {
            MatchScore::Scored(v) => *v,
            MatchScore::Unscored => f64::INFINITY,
        }
    }

    pub fn is_unscored(&self) -> bool {
        matches!(self, MatchScore::Unscored)
    }
}

impl Default for MatchScore {
    fn default() -> Self {
        MatchScore::Unscored
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchScore::Scored(v) => write!(f, "{:.5}", v),
            MatchScore::Unscored => write!(f, "-"),
        }
    }
}

impl Serialize for MatchScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MatchScore::Scored(v) => serializer.serialize_f64(*v),
            MatchScore::Unscored => serializer.serialize_unit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(CellValue::parse("3.5"), CellValue::Number(3.5));
        assert_eq!(CellValue::parse(" 42 "), CellValue::Number(42.0));
        assert_eq!(CellValue::parse("-1e3"), CellValue::Number(-1000.0));
    }

    #[test]
    fn test_parse_text_and_missing() {
        assert_eq!(
            CellValue::parse("Soft Batch"),
            CellValue::Text("Soft Batch".to_string())
        );
        assert_eq!(CellValue::parse(""), CellValue::Missing);
        assert_eq!(CellValue::parse("   "), CellValue::Missing);
        // Non-finite literals stay textual
        assert_eq!(CellValue::parse("inf"), CellValue::Text("inf".to_string()));
        assert_eq!(CellValue::parse("NaN"), CellValue::Text("NaN".to_string()));
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(CellValue::Number(2.0).as_f64(), Some(2.0));
        assert_eq!(CellValue::Text("2.5".to_string()).as_f64(), Some(2.5));
        assert_eq!(CellValue::Text("soft".to_string()).as_f64(), None);
        assert_eq!(CellValue::Missing.as_f64(), None);
    }

    #[test]
    fn test_score_sentinel_orders_last() {
        assert!(MatchScore::Unscored.as_f64() > MatchScore::Scored(1e12).as_f64());
        assert_eq!(MatchScore::Scored(0.5).as_f64(), 0.5);
    }

    #[test]
    fn test_score_serialization() {
        assert_eq!(
            serde_json::to_string(&MatchScore::Unscored).unwrap(),
            "null"
        );
        assert_eq!(serde_json::to_string(&MatchScore::Scored(0.5)).unwrap(), "0.5");
    }

    #[test]
    fn test_cell_serialization() {
        assert_eq!(serde_json::to_string(&CellValue::Number(1.5)).unwrap(), "1.5");
        assert_eq!(
            serde_json::to_string(&CellValue::Text("Soft".into())).unwrap(),
            "\"Soft\""
        );
        assert_eq!(serde_json::to_string(&CellValue::Missing).unwrap(), "null");
    }
}
