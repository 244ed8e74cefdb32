#[cfg(test)]
pub mod fixtures {
    use chrono::NaiveDate;

    use crate::models::domain::{GeneratedItem, RawTriviaRecord, RawValue};

    /// A question-bank row laid out like the imported TSV, worth $200.
    pub fn raw_record(category: &str, question: &str, answer: &str) -> RawTriviaRecord {
        RawTriviaRecord::new(vec![
            RawValue::Text("Jeopardy!".to_string()),
            RawValue::Integer(200),
            RawValue::Integer(0),
            RawValue::Text(category.to_string()),
            RawValue::Null,
            RawValue::Text(question.to_string()),
            RawValue::Text(answer.to_string()),
            RawValue::Text("2004-03-15".to_string()),
            RawValue::Null,
        ])
    }

    /// A feed item at the given position with placeholder content.
    pub fn generated_item(id: u64, date: NaiveDate, slot: u32) -> GeneratedItem {
        GeneratedItem {
            id,
            date,
            slot,
            category: "WORLD CAPITALS".to_string(),
            value: Some(400),
            question: format!("Question number {}", id),
            answer: "Paris".to_string(),
            possible_answers: ["paris".to_string()].into_iter().collect(),
            explanation: "Paris has been the capital of France since 987.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use chrono::NaiveDate;

    #[test]
    fn test_fixtures_raw_record() {
        let record = raw_record("SCIENCE", "Symbol Fe", "Iron");
        assert_eq!(record.category(), "SCIENCE");
        assert_eq!(record.answer(), "Iron");
        assert_eq!(record.value(), Some(200));
    }

    #[test]
    fn test_fixtures_generated_item() {
        let date = NaiveDate::from_ymd_opt(2024, 8, 1).unwrap();
        let item = generated_item(3, date, 2);
        assert_eq!(item.position(), (date, 2));
        assert!(item.possible_answers.contains("paris"));
    }
}
