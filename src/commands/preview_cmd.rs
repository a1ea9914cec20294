use crate::commands::base_commands::Commands;
use crate::commands::preview_format::format_survey_preview;
use crate::domain::survey::Survey;
use crate::services::sample_survey::sample_survey;
use crate::services::survey_chart::write_survey_chart_png;
use crate::services::survey_preview::project;

pub async fn preview_command(cmd: Commands) {
    if let Commands::Preview { png } = cmd {
        let survey = sample_survey();
        println!("{}", format_survey_preview(&project(&survey)));
        write_chart_if_requested(png.as_deref(), &survey).await;
    }
}

pub(crate) async fn write_chart_if_requested(png: Option<&str>, survey: &Survey) {
    let Some(output) = png else {
        return;
    };
    match write_survey_chart_png(output, survey).await {
        Ok(()) => println!("Survey chart written to {output}"),
        Err(e) => eprintln!("Failed to write survey chart: {e}"),
    }
}
