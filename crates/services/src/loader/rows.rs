use std::collections::HashSet;

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use quiz_core::model::{QuestionId, QuestionRecord};

use crate::error::LoadError;

/// Payload shapes a spreadsheet endpoint may return.
///
/// - an array of row objects keyed by column header
/// - a `values` grid whose first row holds the headers
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SheetPayload {
    Rows(Vec<Map<String, Value>>),
    Grid { values: Vec<Vec<Value>> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Id,
    Category,
    SubCategory,
    Question,
    Answer,
    Asterisk,
    Updates,
}

fn column_for(header: &str) -> Option<Column> {
    let key: String = header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match key.as_str() {
        "id" => Some(Column::Id),
        "category" => Some(Column::Category),
        "subcategory" => Some(Column::SubCategory),
        "question" => Some(Column::Question),
        "answer" => Some(Column::Answer),
        "asterisk" | "hasasterisk" | "starred" | "star" => Some(Column::Asterisk),
        "updates" | "updated" | "isupdateflagged" | "update" => Some(Column::Updates),
        _ => None,
    }
}

#[derive(Debug, Default)]
struct RowCells {
    id: String,
    category: String,
    sub_category: String,
    question: String,
    answer: String,
    asterisk: bool,
    updates: bool,
}

impl RowCells {
    fn set(&mut self, column: Column, value: &Value) {
        match column {
            Column::Id => self.id = cell_text(value),
            Column::Category => self.category = cell_text(value),
            Column::SubCategory => self.sub_category = cell_text(value),
            Column::Question => self.question = cell_text(value),
            Column::Answer => self.answer = cell_text(value),
            Column::Asterisk => self.asterisk = cell_flag(value),
            Column::Updates => self.updates = cell_flag(value),
        }
    }

    fn explicit_id(&self) -> Option<QuestionId> {
        (!self.id.is_empty()).then(|| QuestionId::from(self.id.as_str()))
    }

    fn into_record(self, id: QuestionId) -> QuestionRecord {
        QuestionRecord::new(id, self.question, self.answer)
            .with_category(self.category)
            .with_sub_category(self.sub_category)
            .with_asterisk(self.asterisk)
            .with_update_flag(self.updates)
    }
}

/// Id for a row without one: its 1-based row number, unless another row
/// claims that number explicitly.
fn fallback_id(row_number: u64, taken: &HashSet<QuestionId>) -> QuestionId {
    let numeric = QuestionId::new(row_number);
    if !taken.contains(&numeric) {
        return numeric;
    }
    let mut candidate = QuestionId::Text(format!("row-{row_number}"));
    let mut suffix = 2;
    while taken.contains(&candidate) {
        candidate = QuestionId::Text(format!("row-{row_number}-{suffix}"));
        suffix += 1;
    }
    candidate
}

fn assign_ids(rows: Vec<(RowCells, u64)>) -> Vec<QuestionRecord> {
    let taken: HashSet<QuestionId> = rows
        .iter()
        .filter_map(|(cells, _)| cells.explicit_id())
        .collect();
    rows.into_iter()
        .map(|(cells, number)| {
            let id = cells
                .explicit_id()
                .unwrap_or_else(|| fallback_id(number, &taken));
            cells.into_record(id)
        })
        .collect()
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(n) => number_text(n),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

// Sheets export whole numbers as floats (`10.0`); keep them integral.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 9.0e15 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

fn cell_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_u64() == Some(1),
        Value::String(s) => matches!(
            s.trim().to_ascii_lowercase().as_str(),
            "yes" | "y" | "true" | "x" | "*" | "1"
        ),
        _ => false,
    }
}

/// Transform spreadsheet rows into question records.
///
/// Rows without a question are skipped. Rows without an id use their 1-based
/// row number, or `row-<n>` when another row already claims that number.
///
/// # Errors
///
/// Returns `LoadError::NoQuestions` if no row yields a question.
pub fn records_from_payload(payload: SheetPayload) -> Result<Vec<QuestionRecord>, LoadError> {
    let rows: Vec<(RowCells, u64)> = match payload {
        SheetPayload::Rows(rows) => rows
            .iter()
            .zip(1_u64..)
            .filter_map(|(row, number)| {
                let mut cells = RowCells::default();
                for (header, value) in row {
                    if let Some(column) = column_for(header) {
                        cells.set(column, value);
                    }
                }
                (!cells.question.is_empty()).then_some((cells, number))
            })
            .collect(),
        SheetPayload::Grid { values } => {
            let mut rows = values.into_iter();
            let Some(header) = rows.next() else {
                return Err(LoadError::NoQuestions);
            };
            let columns: Vec<Option<Column>> = header
                .iter()
                .map(|h| column_for(&cell_text(h)))
                .collect();
            rows.zip(1_u64..)
                .filter_map(|(row, number)| {
                    let mut cells = RowCells::default();
                    for (column, value) in columns.iter().zip(&row) {
                        if let Some(column) = column {
                            cells.set(*column, value);
                        }
                    }
                    (!cells.question.is_empty()).then_some((cells, number))
                })
                .collect()
        }
    };

    if rows.is_empty() {
        return Err(LoadError::NoQuestions);
    }
    Ok(assign_ids(rows))
}

/// Parse a JSON document holding either question records or spreadsheet rows.
///
/// # Errors
///
/// Returns `LoadError::Parse` if the text matches neither shape and
/// `LoadError::NoQuestions` if it holds no usable question.
pub fn records_from_json(text: &str) -> Result<Vec<QuestionRecord>, LoadError> {
    if let Ok(records) = serde_json::from_str::<Vec<QuestionRecord>>(text) {
        if records.is_empty() {
            return Err(LoadError::NoQuestions);
        }
        return Ok(records);
    }
    let payload: SheetPayload =
        serde_json::from_str(text).map_err(|e| LoadError::Parse(e.to_string()))?;
    records_from_payload(payload)
}
