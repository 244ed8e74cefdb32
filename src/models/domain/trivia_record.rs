use serde::{Deserialize, Serialize};

pub const VALUE_COLUMN: usize = 1;
pub const CATEGORY_COLUMN: usize = 3;
pub const QUESTION_COLUMN: usize = 5;
pub const ANSWER_COLUMN: usize = 6;

/// A single column value as stored in the question bank.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum RawValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl RawValue {
    pub fn as_text(&self) -> Option<String> {
        match self {
            RawValue::Null => None,
            RawValue::Integer(v) => Some(v.to_string()),
            RawValue::Real(v) => Some(v.to_string()),
            RawValue::Text(v) => Some(v.clone()),
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            RawValue::Null => None,
            RawValue::Integer(v) => Some(*v),
            RawValue::Real(v) => Some(v.round() as i64),
            RawValue::Text(v) => {
                let digits: String = v
                    .trim()
                    .chars()
                    .filter(|c| !matches!(c, '$' | ',' | ' '))
                    .collect();
                digits.parse().ok()
            }
        }
    }
}

/// A row from the question bank, addressed by column position only.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RawTriviaRecord {
    pub columns: Vec<RawValue>,
}

impl RawTriviaRecord {
    pub fn new(columns: Vec<RawValue>) -> Self {
        Self { columns }
    }

    pub fn column(&self, index: usize) -> &RawValue {
        self.columns.get(index).unwrap_or(&RawValue::Null)
    }

    fn text_at(&self, index: usize) -> String {
        self.column(index).as_text().unwrap_or_default()
    }

    pub fn value(&self) -> Option<i64> {
        self.column(VALUE_COLUMN).as_integer()
    }

    pub fn category(&self) -> String {
        self.text_at(CATEGORY_COLUMN)
    }

    pub fn question(&self) -> String {
        self.text_at(QUESTION_COLUMN)
    }

    pub fn answer(&self) -> String {
        self.text_at(ANSWER_COLUMN)
    }
}
