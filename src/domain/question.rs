use serde::{Deserialize, Serialize};

use super::answer_option::AnswerOption;

/// Descriptive tag of a question. It only changes the badge shown in the
/// preview and never restricts how the percentages are entered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionType {
    #[default]
    #[serde(rename = "SINGLE", alias = "single", alias = "单选")]
    Single,
    #[serde(rename = "MULTI", alias = "multi", alias = "多选")]
    Multi,
}

impl QuestionType {
    /// Stable tag used in JSON documents and the response schema.
    pub fn tag(self) -> &'static str {
        match self {
            QuestionType::Single => "SINGLE",
            QuestionType::Multi => "MULTI",
        }
    }

    pub fn display_label(self) -> &'static str {
        match self {
            QuestionType::Single => "Single choice",
            QuestionType::Multi => "Multi choice",
        }
    }

    /// Lenient parse for user and service input. Accepts the tags, their
    /// lower-case forms and the localised labels.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "single" | "单选" => Some(QuestionType::Single),
            "multi" | "多选" => Some(QuestionType::Multi),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub options: Vec<AnswerOption>,
}

impl Question {
    pub fn option(&self, option_id: &str) -> Option<&AnswerOption> {
        self.options.iter().find(|option| option.id == option_id)
    }
}
