use thiserror::Error;

use crate::domain::ids::IdGenerator;
use crate::domain::question::QuestionType;
use crate::domain::survey::Survey;
use crate::services::survey_edit::{self, OptionPatch, QuestionPatch};

#[derive(Error, Debug, PartialEq)]
pub enum EditParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("unknown question type: {0} (expected single or multi)")]
    UnknownQuestionType(String),
}

/// A single user edit, addressed by question and option IDs.
#[derive(Debug, Clone, PartialEq)]
pub enum EditIntent {
    SetTotalCount(String),
    AddQuestion,
    RemoveQuestion {
        question_id: String,
    },
    UpdateQuestion {
        question_id: String,
        patch: QuestionPatch,
    },
    AddOption {
        question_id: String,
    },
    RemoveOption {
        question_id: String,
        option_id: String,
    },
    UpdateOption {
        question_id: String,
        option_id: String,
        patch: OptionPatch,
    },
}

impl EditIntent {
    /// Parses one editor command line, e.g. `percent q1 o2 45`.
    ///
    /// Free text arguments (`text`, `label`) take the rest of the line verbatim
    /// after the addressed IDs.
    pub fn parse(line: &str) -> Result<Self, EditParseError> {
        let line = line.trim();
        let (command, rest) = split_word(line);
        match command {
            "" => Err(EditParseError::Empty),
            "total" => Ok(EditIntent::SetTotalCount(rest.to_string())),
            "add-question" => Ok(EditIntent::AddQuestion),
            "remove-question" => {
                let (question_id, _) = require_word(rest, "remove-question <question-id>")?;
                Ok(EditIntent::RemoveQuestion { question_id })
            }
            "text" => {
                let (question_id, text) = require_word(rest, "text <question-id> <text>")?;
                Ok(EditIntent::UpdateQuestion {
                    question_id,
                    patch: QuestionPatch {
                        text: Some(text.to_string()),
                        ..QuestionPatch::default()
                    },
                })
            }
            "type" => {
                let (question_id, value) = require_word(rest, "type <question-id> single|multi")?;
                let question_type = QuestionType::parse(value)
                    .ok_or_else(|| EditParseError::UnknownQuestionType(value.to_string()))?;
                Ok(EditIntent::UpdateQuestion {
                    question_id,
                    patch: QuestionPatch {
                        question_type: Some(question_type),
                        ..QuestionPatch::default()
                    },
                })
            }
            "add-option" => {
                let (question_id, _) = require_word(rest, "add-option <question-id>")?;
                Ok(EditIntent::AddOption { question_id })
            }
            "remove-option" => {
                let usage = "remove-option <question-id> <option-id>";
                let (question_id, rest) = require_word(rest, usage)?;
                let (option_id, _) = require_word(rest, usage)?;
                Ok(EditIntent::RemoveOption {
                    question_id,
                    option_id,
                })
            }
            "label" => {
                let usage = "label <question-id> <option-id> <text>";
                let (question_id, rest) = require_word(rest, usage)?;
                let (option_id, label) = require_word(rest, usage)?;
                Ok(EditIntent::UpdateOption {
                    question_id,
                    option_id,
                    patch: OptionPatch::label(label),
                })
            }
            "percent" => {
                let usage = "percent <question-id> <option-id> <value>";
                let (question_id, rest) = require_word(rest, usage)?;
                let (option_id, value) = require_word(rest, usage)?;
                Ok(EditIntent::UpdateOption {
                    question_id,
                    option_id,
                    patch: OptionPatch::percentage_from_input(value),
                })
            }
            other => Err(EditParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// Applies an edit to the current survey and returns its replacement.
pub fn apply_intent(survey: &Survey, intent: EditIntent, ids: &mut IdGenerator) -> Survey {
    match intent {
        EditIntent::SetTotalCount(value) => survey_edit::set_total_count(survey, &value),
        EditIntent::AddQuestion => survey_edit::add_question(survey, ids).0,
        EditIntent::RemoveQuestion { question_id } => {
            survey_edit::remove_question(survey, &question_id)
        }
        EditIntent::UpdateQuestion { question_id, patch } => {
            survey_edit::update_question(survey, &question_id, patch)
        }
        EditIntent::AddOption { question_id } => {
            survey_edit::add_option(survey, &question_id, ids).0
        }
        EditIntent::RemoveOption {
            question_id,
            option_id,
        } => survey_edit::remove_option(survey, &question_id, &option_id),
        EditIntent::UpdateOption {
            question_id,
            option_id,
            patch,
        } => survey_edit::update_option(survey, &question_id, &option_id, patch),
    }
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (input, ""),
    }
}

fn require_word<'a>(
    input: &'a str,
    usage: &'static str,
) -> Result<(String, &'a str), EditParseError> {
    let (word, rest) = split_word(input);
    if word.is_empty() {
        return Err(EditParseError::Usage(usage));
    }
    Ok((word.to_string(), rest))
}
