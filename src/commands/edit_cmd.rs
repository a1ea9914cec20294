use std::io::{self, Write};
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::commands::base_commands::Commands;
use crate::commands::preview_format::{format_editor_panel, format_survey_preview};
use crate::services::editor::{EditIntent, EditParseError};
use crate::services::gemini_api::AiConfig;
use crate::services::sample_survey::sample_survey;
use crate::services::session::{ImportTicket, SurveySession};
use crate::services::survey_import::{ImportError, ImportOutcome, SurveyImporter};
use crate::services::survey_preview::project;

const HELP: &str = "\
Commands:
  show                                  print the editor (when open) and the preview
  editor show|hide|toggle               open or close the data editor
  total <value>                         set the respondent count
  add-question                          append a question with two options
  remove-question <qid>                 delete a question
  text <qid> <text>                     change a question's text
  type <qid> single|multi               change a question's type
  add-option <qid>                      append an option at 0%
  remove-option <qid> <oid>             delete an option
  label <qid> <oid> <text>              change an option's label
  percent <qid> <oid> <value>           change an option's percentage
  import <text>                         replace the survey with one parsed from text
  wait                                  wait for a running import to finish
  help                                  show this help
  quit                                  leave the editor";

#[derive(Debug, PartialEq)]
enum SessionCommand {
    Edit(EditIntent),
    Show,
    ShowEditor,
    HideEditor,
    ToggleEditor,
    Import(String),
    Wait,
    Help,
    Quit,
}

impl SessionCommand {
    fn parse(line: &str) -> Result<Self, EditParseError> {
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };
        match command {
            "show" => Ok(SessionCommand::Show),
            "editor" => match rest {
                "show" | "open" => Ok(SessionCommand::ShowEditor),
                "hide" | "close" => Ok(SessionCommand::HideEditor),
                "toggle" | "" => Ok(SessionCommand::ToggleEditor),
                _ => Err(EditParseError::Usage("editor show|hide|toggle")),
            },
            "import" => Ok(SessionCommand::Import(rest.to_string())),
            "wait" => Ok(SessionCommand::Wait),
            "help" => Ok(SessionCommand::Help),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            _ => EditIntent::parse(line).map(SessionCommand::Edit),
        }
    }
}

type ImportResult = (ImportTicket, Result<ImportOutcome, ImportError>);

pub async fn edit_command(cmd: Commands) {
    if let Commands::Edit { config, total_hint } = cmd {
        let config = match AiConfig::load(config.as_deref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("Failed to load AI config: {e}");
                return;
            }
        };
        let importer = Arc::new(SurveyImporter::from_config(
            &config,
            config.api_key_from_env(),
        ));

        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = io::stdout();
        if let Err(e) = run_edit_session(stdin, &mut stdout, importer, total_hint).await {
            eprintln!("Editor session failed: {e}");
        }
    }
}

/// Runs the editor over line commands until `quit` or end of input.
///
/// At most one import runs at a time; edits keep working while it is
/// outstanding. An import still running when the session ends is aborted and
/// its result dropped.
pub async fn run_edit_session<R, W>(
    input: R,
    out: &mut W,
    importer: Arc<SurveyImporter>,
    total_hint: u64,
) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = SurveySession::new(sample_survey());
    let mut lines = input.lines();
    let (results_tx, mut results_rx) = mpsc::unbounded_channel::<ImportResult>();
    let mut running: Option<AbortHandle> = None;

    writeln!(out, "Survey editor ready. Type 'help' for commands.")?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match SessionCommand::parse(&line) {
                    Ok(SessionCommand::Quit) => break,
                    Ok(SessionCommand::Wait) => {
                        if !session.is_import_pending() {
                            writeln!(out, "No import is running")?;
                            continue;
                        }
                        if let Some((ticket, result)) = results_rx.recv().await {
                            settle_import(&mut session, out, &importer, ticket, result)?;
                        }
                    }
                    Ok(SessionCommand::Import(text)) => match session.begin_import() {
                        Ok(ticket) => {
                            writeln!(out, "Import started")?;
                            running = Some(spawn_import(
                                importer.clone(),
                                text,
                                total_hint,
                                ticket,
                                results_tx.clone(),
                            ));
                        }
                        Err(e) => writeln!(out, "Cannot import: {e}")?,
                    },
                    Ok(command) => handle_command(&mut session, out, command)?,
                    Err(e) => writeln!(out, "Error: {e}")?,
                }
            }
            Some((ticket, result)) = results_rx.recv() => {
                settle_import(&mut session, out, &importer, ticket, result)?;
            }
        }
    }

    session.close();
    if let Some(handle) = running {
        handle.abort();
    }
    writeln!(out, "Bye")?;
    Ok(())
}

/// Runs one import in its own task. Every import delivers exactly one result,
/// even when the task panics or is aborted, so `wait` always returns.
fn spawn_import(
    importer: Arc<SurveyImporter>,
    text: String,
    total_hint: u64,
    ticket: ImportTicket,
    results_tx: mpsc::UnboundedSender<ImportResult>,
) -> AbortHandle {
    let worker = tokio::spawn(async move { importer.import(&text, total_hint).await });
    let abort = worker.abort_handle();
    tokio::spawn(async move {
        let result = match worker.await {
            Ok(result) => result,
            Err(err) => Err(ImportError::Interrupted(err.to_string())),
        };
        // the receiver is gone once the session has ended
        let _ = results_tx.send((ticket, result));
    });
    abort
}

fn handle_command<W: Write>(
    session: &mut SurveySession,
    out: &mut W,
    command: SessionCommand,
) -> io::Result<()> {
    match command {
        SessionCommand::Edit(intent) => session.apply(intent),
        SessionCommand::Show => {
            if session.editor_visible() {
                writeln!(out, "{}", format_editor_panel(session.survey()))?;
                writeln!(out)?;
            }
            writeln!(out, "{}", format_survey_preview(&project(session.survey())))?;
        }
        SessionCommand::ShowEditor => session.show_editor(),
        SessionCommand::HideEditor => session.hide_editor(),
        SessionCommand::ToggleEditor => session.toggle_editor(),
        SessionCommand::Help => writeln!(out, "{HELP}")?,
        SessionCommand::Import(_) | SessionCommand::Wait | SessionCommand::Quit => {}
    }
    Ok(())
}

fn settle_import<W: Write>(
    session: &mut SurveySession,
    out: &mut W,
    importer: &SurveyImporter,
    ticket: ImportTicket,
    result: Result<ImportOutcome, ImportError>,
) -> io::Result<()> {
    let report = session.finish_import(ticket, result, importer.credential_hint());
    writeln!(out, "{}", report.user_message())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::survey_import::StructuredGenerator;
    use crate::test_support::{MockGenerator, MockReply};

    async fn run(script: &str, importer: SurveyImporter) -> String {
        let mut out = Vec::new();
        run_edit_session(script.as_bytes(), &mut out, Arc::new(importer), 1000)
            .await
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn mock_importer(reply: MockReply) -> (Arc<MockGenerator>, SurveyImporter) {
        let generator = Arc::new(MockGenerator::new(reply));
        let importer =
            SurveyImporter::new(Some(generator.clone() as Arc<dyn StructuredGenerator>));
        (generator, importer)
    }

    #[test]
    fn parses_session_commands() {
        assert_eq!(SessionCommand::parse("show"), Ok(SessionCommand::Show));
        assert_eq!(
            SessionCommand::parse("editor hide"),
            Ok(SessionCommand::HideEditor)
        );
        assert_eq!(
            SessionCommand::parse("import Q1 tea? yes 60% no 40%"),
            Ok(SessionCommand::Import("Q1 tea? yes 60% no 40%".to_string()))
        );
        assert_eq!(
            SessionCommand::parse("add-question"),
            Ok(SessionCommand::Edit(EditIntent::AddQuestion))
        );
        assert!(SessionCommand::parse("editor sideways").is_err());
    }

    #[tokio::test]
    async fn edits_show_up_in_the_preview() {
        let output = run(
            "total abc\ntotal 42\npercent q1 o1-1 140\nremove-question q3\nshow\nquit\n",
            SurveyImporter::new(None),
        )
        .await;

        assert!(output.contains("Total count: 42"));
        assert!(output.contains("42 responses match the search"));
        assert!(output.contains("140%"));
        assert!(!output.contains("Q3 ["));
        assert!(output.ends_with("Bye\n"));
    }

    #[tokio::test]
    async fn hidden_editor_only_prints_the_preview() {
        let output = run("editor hide\nshow\n", SurveyImporter::new(None)).await;

        assert!(!output.contains("Data editor"));
        assert!(output.contains("3,996 responses match the search"));
    }

    #[tokio::test]
    async fn reports_bad_commands_and_keeps_going() {
        let output = run("frobnicate\npercent q1\nshow\n", SurveyImporter::new(None)).await;

        assert!(output.contains("Error: unknown command: frobnicate"));
        assert!(output.contains("Error: usage: percent <question-id> <option-id> <value>"));
        assert!(output.contains("Data editor"));
    }

    #[tokio::test]
    async fn import_without_credential_is_a_soft_failure() {
        let output = run("import Q1 tea?\nwait\nshow\n", SurveyImporter::new(None)).await;

        assert!(output.contains("Could not parse the survey text"));
        assert!(output.contains("3,996 responses match the search"));
    }

    #[tokio::test]
    async fn import_replaces_the_survey() {
        let (generator, importer) = mock_importer(MockReply::Text(
            serde_json::json!({
                "totalCount": 500,
                "questions": [{
                    "text": "Do you like tea?",
                    "type": "MULTI",
                    "options": [
                        { "label": "Yes", "percentage": 60 },
                        { "label": "No", "percentage": 40 }
                    ]
                }]
            })
            .to_string(),
        ));

        let output = run("import tea yes 60 no 40\nwait\nshow\n", importer).await;

        assert_eq!(generator.calls(), 1);
        assert!(output.contains("Imported survey with 1 question(s)"));
        assert!(output.contains("Q1 [q-0] MULTI Do you like tea?"));
        assert!(output.contains("  - [o-0-1] No: 40%"));
        assert!(output.contains("500 responses match the search"));
    }

    #[tokio::test]
    async fn failed_import_keeps_the_survey() {
        let (_, importer) = mock_importer(MockReply::Fail);

        let output = run("import something\nwait\nshow\n", importer).await;

        assert!(output.contains("Import failed, please try again later"));
        assert!(!output.contains("mock connection refused"));
        assert!(output.contains("3,996 responses match the search"));
    }

    #[tokio::test]
    async fn crashed_import_still_releases_wait() {
        let (generator, importer) = mock_importer(MockReply::Panic);

        let output = run(
            "import something\nwait\nimport again\nwait\nshow\n",
            importer,
        )
        .await;

        assert_eq!(generator.calls(), 2);
        assert_eq!(output.matches("Import failed, please try again later").count(), 2);
        assert!(!output.contains("Cannot import"));
        assert!(output.contains("3,996 responses match the search"));
        assert!(output.ends_with("Bye\n"));
    }

    #[tokio::test]
    async fn wait_without_import_is_reported() {
        let output = run("wait\n", SurveyImporter::new(None)).await;
        assert!(output.contains("No import is running"));
    }
}
