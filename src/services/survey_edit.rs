use crate::domain::answer_option::AnswerOption;
use crate::domain::ids::{IdGenerator, IdKind};
use crate::domain::question::{Question, QuestionType};
use crate::domain::survey::Survey;

pub const DEFAULT_QUESTION_TEXT: &str = "New question";
pub const DEFAULT_OPTION_LABEL: &str = "New option";

/// Fields of a question to overwrite. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionPatch {
    pub text: Option<String>,
    pub question_type: Option<QuestionType>,
    pub options: Option<Vec<AnswerOption>>,
}

/// Fields of an option to overwrite. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionPatch {
    pub label: Option<String>,
    pub percentage: Option<f64>,
}

impl OptionPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            percentage: None,
        }
    }

    pub fn percentage(percentage: f64) -> Self {
        Self {
            label: None,
            percentage: Some(percentage),
        }
    }

    pub fn percentage_from_input(input: &str) -> Self {
        Self::percentage(coerce_number(input))
    }
}

/// Reads a number typed by the user. Anything that is not a finite number
/// becomes 0; a trailing `%` is tolerated.
pub fn coerce_number(input: &str) -> f64 {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    match trimmed.parse::<f64>() {
        // adding zero turns -0 into 0
        Ok(value) if value.is_finite() => value + 0.0,
        _ => 0.0,
    }
}

/// Respondent counts are whole and non-negative: fractions are truncated,
/// negatives become 0.
pub fn coerce_count(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        // `as` saturates at u64::MAX
        value.trunc() as u64
    } else {
        0
    }
}

pub fn set_total_count(survey: &Survey, value: &str) -> Survey {
    Survey {
        total_count: coerce_count(coerce_number(value)),
        questions: survey.questions.clone(),
    }
}

/// Appends a default question with two 50/50 options and returns the new
/// question's ID alongside the updated survey.
pub fn add_question(survey: &Survey, ids: &mut IdGenerator) -> (Survey, String) {
    let question_id = ids.next_id(IdKind::Question, survey);
    let first_option = ids.next_id(IdKind::Option, survey);
    let second_option = ids.next_id(IdKind::Option, survey);

    let mut questions = survey.questions.clone();
    questions.push(Question {
        id: question_id.clone(),
        text: DEFAULT_QUESTION_TEXT.to_string(),
        question_type: QuestionType::Single,
        options: vec![
            AnswerOption::new(first_option, "Option A", 50.0),
            AnswerOption::new(second_option, "Option B", 50.0),
        ],
    });

    (
        Survey {
            total_count: survey.total_count,
            questions,
        },
        question_id,
    )
}

pub fn remove_question(survey: &Survey, question_id: &str) -> Survey {
    Survey {
        total_count: survey.total_count,
        questions: survey
            .questions
            .iter()
            .filter(|question| question.id != question_id)
            .cloned()
            .collect(),
    }
}

pub fn update_question(survey: &Survey, question_id: &str, patch: QuestionPatch) -> Survey {
    map_question(survey, question_id, |question| Question {
        id: question.id.clone(),
        text: patch.text.clone().unwrap_or_else(|| question.text.clone()),
        question_type: patch.question_type.unwrap_or(question.question_type),
        options: patch
            .options
            .clone()
            .unwrap_or_else(|| question.options.clone()),
    })
}

/// Appends an empty option at 0 %. Returns `None` for the ID when the question
/// does not exist, in which case the survey content is unchanged.
pub fn add_option(
    survey: &Survey,
    question_id: &str,
    ids: &mut IdGenerator,
) -> (Survey, Option<String>) {
    if survey.question(question_id).is_none() {
        return (survey.clone(), None);
    }

    let option_id = ids.next_id(IdKind::Option, survey);
    let updated = map_question(survey, question_id, |question| {
        let mut options = question.options.clone();
        options.push(AnswerOption::new(
            option_id.clone(),
            DEFAULT_OPTION_LABEL,
            0.0,
        ));
        Question {
            options,
            ..question.clone()
        }
    });
    (updated, Some(option_id))
}

pub fn remove_option(survey: &Survey, question_id: &str, option_id: &str) -> Survey {
    map_question(survey, question_id, |question| Question {
        options: question
            .options
            .iter()
            .filter(|option| option.id != option_id)
            .cloned()
            .collect(),
        ..question.clone()
    })
}

pub fn update_option(
    survey: &Survey,
    question_id: &str,
    option_id: &str,
    patch: OptionPatch,
) -> Survey {
    map_question(survey, question_id, |question| Question {
        options: question
            .options
            .iter()
            .map(|option| {
                if option.id != option_id {
                    return option.clone();
                }
                AnswerOption {
                    id: option.id.clone(),
                    label: patch.label.clone().unwrap_or_else(|| option.label.clone()),
                    percentage: patch.percentage.unwrap_or(option.percentage),
                }
            })
            .collect(),
        ..question.clone()
    })
}

fn map_question<F>(survey: &Survey, question_id: &str, update: F) -> Survey
where
    F: Fn(&Question) -> Question,
{
    Survey {
        total_count: survey.total_count,
        questions: survey
            .questions
            .iter()
            .map(|question| {
                if question.id == question_id {
                    update(question)
                } else {
                    question.clone()
                }
            })
            .collect(),
    }
}
