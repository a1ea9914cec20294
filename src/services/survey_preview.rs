use serde::Serialize;

use crate::domain::survey::Survey;

/// Read-only projection of a survey into what the preview shows.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SurveyPreview {
    pub total_count_display: String,
    pub questions: Vec<QuestionPreview>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct QuestionPreview {
    pub number: usize,
    pub badge: &'static str,
    pub text: String,
    pub options: Vec<OptionPreview>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct OptionPreview {
    pub label: String,
    /// Filled share of the bar track, 0 to 100.
    pub bar_width: f64,
    /// The stored value as typed, never clamped.
    pub percentage_text: String,
}

pub fn project(survey: &Survey) -> SurveyPreview {
    SurveyPreview {
        total_count_display: group_thousands(survey.total_count),
        questions: survey
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| QuestionPreview {
                number: index + 1,
                badge: question.question_type.display_label(),
                text: question.text.clone(),
                options: question
                    .options
                    .iter()
                    .map(|option| OptionPreview {
                        label: option.label.clone(),
                        bar_width: bar_width(option.percentage),
                        percentage_text: format_percentage(option.percentage),
                    })
                    .collect(),
            })
            .collect(),
    }
}

pub fn bar_width(percentage: f64) -> f64 {
    if percentage.is_nan() {
        return 0.0;
    }
    percentage.clamp(0.0, 100.0)
}

pub fn format_percentage(percentage: f64) -> String {
    format!("{percentage}%")
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
