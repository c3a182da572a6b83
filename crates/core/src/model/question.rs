use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// A single question/answer record as loaded from a data set.
///
/// Records are immutable once loaded. `question` and `answer` may contain
/// lightweight markup which is passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    id: QuestionId,
    #[serde(default)]
    category: String,
    #[serde(default)]
    sub_category: String,
    question: String,
    answer: String,
    #[serde(default)]
    has_asterisk: bool,
    #[serde(default)]
    is_update_flagged: bool,
}

impl QuestionRecord {
    #[must_use]
    pub fn new(
        id: impl Into<QuestionId>,
        question: impl Into<String>,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category: String::new(),
            sub_category: String::new(),
            question: question.into(),
            answer: answer.into(),
            has_asterisk: false,
            is_update_flagged: false,
        }
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    #[must_use]
    pub fn with_sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = sub_category.into();
        self
    }

    #[must_use]
    pub fn with_asterisk(mut self, flag: bool) -> Self {
        self.has_asterisk = flag;
        self
    }

    #[must_use]
    pub fn with_update_flag(mut self, flag: bool) -> Self {
        self.is_update_flagged = flag;
        self
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn sub_category(&self) -> &str {
        &self.sub_category
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn has_asterisk(&self) -> bool {
        self.has_asterisk
    }

    #[must_use]
    pub fn is_update_flagged(&self) -> bool {
        self.is_update_flagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let json = r#"{"id": 3, "question": "Q?", "answer": "A", "subCategory": "Wars"}"#;
        let record: QuestionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id(), &QuestionId::new(3));
        assert_eq!(record.category(), "");
        assert_eq!(record.sub_category(), "Wars");
        assert!(!record.has_asterisk());
        assert!(!record.is_update_flagged());
    }

    #[test]
    fn builder_sets_flags() {
        let record = QuestionRecord::new(1_u64, "Q", "A")
            .with_category("History")
            .with_asterisk(true)
            .with_update_flag(true);

        assert_eq!(record.category(), "History");
        assert!(record.has_asterisk());
        assert!(record.is_update_flagged());
    }
}
