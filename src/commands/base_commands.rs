use clap::{Parser, Subcommand};
use clap_complete::Shell;

pub const DEFAULT_TOTAL_HINT: u64 = 1000;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the bar-chart preview of the built-in sample survey
    Preview {
        /// Also render the preview into a PNG chart
        #[arg(short, long)]
        png: Option<String>,
    },
    /// Turn free text into a survey with the AI service and print its preview
    Import {
        /// Text file describing the survey (reads stdin when omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Respondent count to assume when the text does not state one
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOTAL_HINT)]
        total_hint: u64,
        /// Path to the AI service config YAML
        #[arg(short, long)]
        config: Option<String>,
        /// Also render the preview into a PNG chart
        #[arg(short, long)]
        png: Option<String>,
    },
    /// Edit the sample survey interactively, one command per line on stdin
    Edit {
        /// Path to the AI service config YAML
        #[arg(short, long)]
        config: Option<String>,
        /// Respondent count to assume for imports that do not state one
        #[arg(short = 'n', long, default_value_t = DEFAULT_TOTAL_HINT)]
        total_hint: u64,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn import_defaults_total_hint() {
        let args = CliArgs::parse_from(["surveyviz", "import", "-i", "survey.txt"]);

        if let Commands::Import {
            input, total_hint, ..
        } = args.command
        {
            assert_eq!(input.as_deref(), Some("survey.txt"));
            assert_eq!(total_hint, DEFAULT_TOTAL_HINT);
        } else {
            panic!("expected import command");
        }
    }

    #[test]
    fn edit_accepts_config_path() {
        let args = CliArgs::parse_from(["surveyviz", "edit", "-c", "ai.yaml", "-n", "250"]);

        if let Commands::Edit { config, total_hint } = args.command {
            assert_eq!(config.as_deref(), Some("ai.yaml"));
            assert_eq!(total_hint, 250);
        } else {
            panic!("expected edit command");
        }
    }
}
