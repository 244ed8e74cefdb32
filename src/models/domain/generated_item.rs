use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

use super::RawValue;

/// One entry of the persisted feed.
///
/// Field names on the wire are shared with the display front end, which is
/// why `slot` is stored as `question_number`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct GeneratedItem {
    pub id: u64,
    pub date: NaiveDate,
    #[serde(rename = "question_number")]
    pub slot: u32,
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_value")]
    pub value: Option<i64>,
    pub question: String,
    pub answer: String,
    pub possible_answers: BTreeSet<String>,
    pub explanation: String,
}

impl GeneratedItem {
    /// Lexicographic feed position used for ordering checks.
    pub fn position(&self) -> (NaiveDate, u32) {
        (self.date, self.slot)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredValue {
    Integer(i64),
    Real(f64),
    Text(String),
}

/// Accept values written as floats or dollar strings by hand edits and older
/// generators. Unparseable text becomes `None`.
fn deserialize_value<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Option::<StoredValue>::deserialize(deserializer)?;
    Ok(stored.and_then(|v| {
        match v {
            StoredValue::Integer(n) => RawValue::Integer(n),
            StoredValue::Real(n) => RawValue::Real(n),
            StoredValue::Text(s) => RawValue::Text(s),
        }
        .as_integer()
    }))
}
