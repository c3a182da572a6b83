use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a question within one data set.
///
/// Spreadsheet rows carry either numeric ids or free-form keys. Textual ids that
/// are plain unsigned integers are normalized to `Number`, so `"7"` and `7`
/// name the same question.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum QuestionId {
    Number(u64),
    Text(String),
}

impl QuestionId {
    /// Creates a numeric `QuestionId`
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self::Number(id)
    }

    /// Returns the numeric value, if this id is numeric
    #[must_use]
    pub fn as_number(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl From<u64> for QuestionId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for QuestionId {
    fn from(raw: &str) -> Self {
        let trimmed = raw.trim();
        trimmed
            .parse::<u64>()
            .map_or_else(|_| Self::Text(trimmed.to_owned()), Self::Number)
    }
}

impl From<String> for QuestionId {
    fn from(raw: String) -> Self {
        Self::from(raw.as_str())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawQuestionId {
    Number(u64),
    Signed(i64),
    Float(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for QuestionId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match RawQuestionId::deserialize(deserializer)? {
            RawQuestionId::Number(n) => Ok(Self::Number(n)),
            RawQuestionId::Signed(n) => Ok(Self::Text(n.to_string())),
            // Spreadsheet exports write whole numbers as `10.0`.
            RawQuestionId::Float(f) if f >= 0.0 && f.fract() == 0.0 && f < 9.0e15 => {
                Ok(Self::Number(f as u64))
            }
            RawQuestionId::Float(f) => Ok(Self::Text(f.to_string())),
            RawQuestionId::Text(s) if s.trim().is_empty() => {
                Err(serde::de::Error::custom("question id cannot be empty"))
            }
            RawQuestionId::Text(s) => Ok(Self::from(s)),
        }
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "QuestionId({n})"),
            Self::Text(s) => write!(f, "QuestionId({s:?})"),
        }
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse QuestionId from {:?}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(ParseIdError { raw: s.to_owned() });
        }
        Ok(Self::from(s))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_text_normalizes_to_number() {
        let id: QuestionId = " 42 ".parse().unwrap();
        assert_eq!(id, QuestionId::new(42));
    }

    #[test]
    fn free_form_text_stays_text() {
        let id: QuestionId = "hist-7".parse().unwrap();
        assert_eq!(id, QuestionId::Text("hist-7".into()));
        assert_eq!(id.to_string(), "hist-7");
    }

    #[test]
    fn empty_id_is_rejected() {
        assert!("   ".parse::<QuestionId>().is_err());
    }

    #[test]
    fn json_string_and_number_deserialize_to_same_id() {
        let a: QuestionId = serde_json::from_str("5").unwrap();
        let b: QuestionId = serde_json::from_str("\"5\"").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn whole_floats_and_negatives_deserialize() {
        let whole: QuestionId = serde_json::from_str("10.0").unwrap();
        let fraction: QuestionId = serde_json::from_str("2.5").unwrap();
        let negative: QuestionId = serde_json::from_str("-3").unwrap();

        assert_eq!(whole, QuestionId::new(10));
        assert_eq!(fraction, QuestionId::Text("2.5".into()));
        assert_eq!(negative, QuestionId::Text("-3".into()));
    }

    #[test]
    fn serializes_without_tag() {
        let json = serde_json::to_string(&vec![QuestionId::new(1), "x".into()]).unwrap();
        assert_eq!(json, r#"[1,"x"]"#);
    }
}
