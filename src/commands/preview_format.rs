use crate::domain::survey::Survey;
use crate::services::survey_preview::{OptionPreview, SurveyPreview};

const BAR_TRACK_CELLS: usize = 40;

pub fn format_survey_preview(preview: &SurveyPreview) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} responses match the search",
        preview.total_count_display
    ));

    for question in &preview.questions {
        lines.push(String::new());
        lines.push(format!(
            "Q{} [{}] {}",
            question.number, question.badge, question.text
        ));
        for option in &question.options {
            lines.push(format!("  {}", option.label));
            lines.push(format!("  {}", format_bar(option)));
        }
    }

    lines.join("\n")
}

fn format_bar(option: &OptionPreview) -> String {
    let filled = ((option.bar_width / 100.0) * BAR_TRACK_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_TRACK_CELLS);
    format!(
        "{}{} {}",
        "█".repeat(filled),
        "░".repeat(BAR_TRACK_CELLS - filled),
        option.percentage_text
    )
}

/// Editable listing with the IDs the edit commands address.
pub fn format_editor_panel(survey: &Survey) -> String {
    let mut lines = Vec::new();
    lines.push("Data editor".to_string());
    lines.push(format!("Total count: {}", survey.total_count));

    for (index, question) in survey.questions.iter().enumerate() {
        let text = if question.text.is_empty() {
            "<no text>".to_string()
        } else {
            question.text.clone()
        };
        lines.push(format!(
            "Q{} [{}] {} {}",
            index + 1,
            question.id,
            question.question_type.tag(),
            text
        ));
        for option in &question.options {
            lines.push(format!(
                "  - [{}] {}: {}%",
                option.id, option.label, option.percentage
            ));
        }
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::survey_preview::project;
    use crate::test_support::{build_question, build_survey};

    #[test]
    fn format_survey_preview_includes_header_and_bars() {
        let survey = build_survey(
            3996,
            vec![build_question("q1", &[("o1", 140.0), ("o2", 25.0), ("o3", 0.0)])],
        );

        let output = format_survey_preview(&project(&survey));

        assert!(output.contains("3,996 responses match the search"));
        assert!(output.contains("Q1 [Single choice] Question q1"));
        assert!(output.contains("  Option o1"));
        assert!(output.contains(&format!("{} 140%", "█".repeat(40))));
        assert!(output.contains(&format!("{}{} 25%", "█".repeat(10), "░".repeat(30))));
        assert!(output.contains(&format!("{} 0%", "░".repeat(40))));
    }

    #[test]
    fn format_editor_panel_lists_ids() {
        let survey = build_survey(12, vec![build_question("q1", &[("o1", 97.2)])]);

        let output = format_editor_panel(&survey);
        assert!(output.contains("Total count: 12"));
        assert!(output.contains("Q1 [q1] SINGLE Question q1"));
        assert!(output.contains("  - [o1] Option o1: 97.2%"));
    }
}
