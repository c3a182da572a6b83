use async_trait::async_trait;

use quiz_core::model::QuestionRecord;

use super::{QuestionSource, SourceKind};
use crate::error::LoadError;

/// Last-resort source baked into the binary. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

impl BuiltinSource {
    #[must_use]
    pub fn records() -> Vec<QuestionRecord> {
        BUILTIN
            .iter()
            .zip(1_u64..)
            .map(|(&(category, sub_category, question, answer, starred), id)| {
                QuestionRecord::new(id, question, answer)
                    .with_category(category)
                    .with_sub_category(sub_category)
                    .with_asterisk(starred)
            })
            .collect()
    }
}

#[async_trait]
impl QuestionSource for BuiltinSource {
    fn kind(&self) -> SourceKind {
        SourceKind::Builtin
    }

    async fn fetch(&self) -> Result<Vec<QuestionRecord>, LoadError> {
        Ok(Self::records())
    }
}

const BUILTIN: &[(&str, &str, &str, &str, bool)] = &[
    (
        "History",
        "Modern",
        "In which year did the First World War begin?",
        "**1914**",
        true,
    ),
    (
        "History",
        "Modern",
        "Which treaty formally ended the First World War with Germany?",
        "The Treaty of Versailles (1919).",
        false,
    ),
    (
        "History",
        "Ancient",
        "Which river was the lifeline of ancient Egypt?",
        "The Nile.",
        false,
    ),
    (
        "Science",
        "Chemistry",
        "What is the chemical formula of water?",
        "H<sub>2</sub>O",
        true,
    ),
    (
        "Science",
        "Physics",
        "What is the SI unit of force?",
        "The newton (N), equal to one kg·m/s².",
        false,
    ),
    (
        "Science",
        "Biology",
        "Which organelle is known as the powerhouse of the cell?",
        "The mitochondrion.",
        false,
    ),
    (
        "Geography",
        "",
        "What is the longest mountain range on land?",
        "The Andes.",
        false,
    ),
    (
        "Geography",
        "",
        "Which ocean is the largest?",
        "The Pacific Ocean.",
        true,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::QuestionStore;

    #[test]
    fn builtin_set_is_always_loadable() {
        let records = BuiltinSource::records();
        assert!(QuestionStore::validate(&records).is_ok());
        assert!(records.iter().any(|r| r.has_asterisk()));
    }
}
