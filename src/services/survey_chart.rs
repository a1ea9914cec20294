use plotters::prelude::*;
use thiserror::Error;

use crate::domain::survey::Survey;
use crate::services::survey_preview::{QuestionPreview, project};

const CHART_WIDTH: u32 = 1000;
const PANEL_HEADER_HEIGHT: u32 = 60;
const ROW_HEIGHT: u32 = 40;

#[derive(Error, Debug)]
pub enum SurveyChartError {
    #[error("survey has no questions")]
    EmptySurvey,
    #[error("failed to render survey chart: {0}")]
    Render(String),
}

pub async fn write_survey_chart_png(
    output_path: &str,
    survey: &Survey,
) -> Result<(), SurveyChartError> {
    if survey.questions.is_empty() {
        return Err(SurveyChartError::EmptySurvey);
    }
    let output_path = output_path.to_string();
    let survey = survey.clone();
    tokio::task::spawn_blocking(move || render_survey_chart_png(&output_path, &survey))
        .await
        .map_err(|e| SurveyChartError::Render(e.to_string()))??;
    Ok(())
}

fn panel_height(question: &QuestionPreview) -> u32 {
    PANEL_HEADER_HEIGHT + ROW_HEIGHT * question.options.len().max(1) as u32
}

fn render_survey_chart_png(output_path: &str, survey: &Survey) -> Result<(), SurveyChartError> {
    let preview = project(survey);
    let total_height: u32 = preview.questions.iter().map(panel_height).sum();

    let root = BitMapBackend::new(output_path, (CHART_WIDTH, total_height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| SurveyChartError::Render(e.to_string()))?;

    let mut remaining = root.clone();
    for question in &preview.questions {
        let (panel, rest) = remaining.split_vertically(panel_height(question) as i32);
        draw_question_panel(&panel, question)?;
        remaining = rest;
    }

    root.present()
        .map_err(|e| SurveyChartError::Render(e.to_string()))?;
    Ok(())
}

fn draw_question_panel(
    area: &DrawingArea<BitMapBackend, plotters::coord::Shift>,
    question: &QuestionPreview,
) -> Result<(), SurveyChartError> {
    let rows = question.options.len().max(1) as i32;
    let caption = format!("Q{} [{}] {}", question.number, question.badge, question.text);

    let mut chart = ChartBuilder::on(area)
        .margin(10)
        .caption(caption, ("sans-serif", 20))
        .x_label_area_size(0)
        .y_label_area_size(260)
        .build_cartesian_2d(0f64..115f64, 0..rows)
        .map_err(|e| SurveyChartError::Render(e.to_string()))?;

    // Row 0 sits at the top so options read in their stored order.
    let label_for_row = |row: &i32| {
        let index = rows - 1 - *row;
        question
            .options
            .get(index as usize)
            .map(|option| option.label.clone())
            .unwrap_or_default()
    };
    chart
        .configure_mesh()
        .disable_mesh()
        .disable_x_axis()
        .y_labels(rows as usize)
        .y_label_formatter(&label_for_row)
        .label_style(("sans-serif", 16))
        .draw()
        .map_err(|e| SurveyChartError::Render(e.to_string()))?;

    let track_color = RGBColor(243, 232, 255);
    let bar_color = RGBColor(168, 85, 247);
    let track_style = ShapeStyle::from(&track_color).filled();
    let bar_style = ShapeStyle::from(&bar_color).filled();

    let row_of = |index: usize| rows - 1 - index as i32;
    chart
        .draw_series(question.options.iter().enumerate().map(|(index, _)| {
            let row = row_of(index);
            Rectangle::new([(0.0, row), (100.0, row + 1)], track_style)
        }))
        .map_err(|e| SurveyChartError::Render(e.to_string()))?;
    chart
        .draw_series(question.options.iter().enumerate().map(|(index, option)| {
            let row = row_of(index);
            Rectangle::new([(0.0, row), (option.bar_width, row + 1)], bar_style)
        }))
        .map_err(|e| SurveyChartError::Render(e.to_string()))?;
    chart
        .draw_series(question.options.iter().enumerate().map(|(index, option)| {
            Text::new(
                option.percentage_text.clone(),
                (102.0, row_of(index)),
                ("sans-serif", 16).into_font(),
            )
        }))
        .map_err(|e| SurveyChartError::Render(e.to_string()))?;

    Ok(())
}
