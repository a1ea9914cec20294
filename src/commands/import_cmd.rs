use tokio::io::AsyncReadExt;

use crate::commands::base_commands::Commands;
use crate::commands::preview_cmd::write_chart_if_requested;
use crate::commands::preview_format::format_survey_preview;
use crate::services::gemini_api::AiConfig;
use crate::services::session::report_import_result;
use crate::services::survey_import::{ImportOutcome, SurveyImporter};
use crate::services::survey_preview::project;

pub async fn import_command(cmd: Commands) {
    if let Commands::Import {
        input,
        total_hint,
        config,
        png,
    } = cmd
    {
        let config = match AiConfig::load(config.as_deref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load AI config: {e}");
                return;
            }
        };

        let text = match read_survey_text(input.as_deref()).await {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Failed to read survey text: {e}");
                return;
            }
        };

        let importer = SurveyImporter::from_config(&config, config.api_key_from_env());
        let result = importer.import(&text, total_hint).await;
        let report = report_import_result(&result, importer.credential_hint());

        match result {
            Ok(ImportOutcome::Imported(survey)) => {
                println!("{}", report.user_message());
                println!();
                println!("{}", format_survey_preview(&project(&survey)));
                write_chart_if_requested(png.as_deref(), &survey).await;
            }
            _ => eprintln!("{}", report.user_message()),
        }
    }
}

async fn read_survey_text(input: Option<&str>) -> std::io::Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(path).await,
        None => {
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            Ok(text)
        }
    }
}
