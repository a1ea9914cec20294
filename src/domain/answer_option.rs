use serde::{Deserialize, Serialize};

/// One answer choice of a question.
///
/// `percentage` is stored exactly as entered. Values above 100 or below 0 are
/// kept; only the preview clamps the bar it draws.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnswerOption {
    pub id: String,
    pub label: String,
    pub percentage: f64,
}

impl AnswerOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>, percentage: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_above_one_hundred_is_kept_verbatim() {
        let option = AnswerOption::new("o1", "A", 140.0);
        assert_eq!(option.percentage, 140.0);
    }

    #[test]
    fn serializes_with_plain_field_names() {
        let option = AnswerOption::new("o1", "", 12.5);
        let json = serde_json::to_value(&option).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "id": "o1", "label": "", "percentage": 12.5 })
        );
    }
}
