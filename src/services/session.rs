use thiserror::Error;

use crate::domain::ids::IdGenerator;
use crate::domain::survey::Survey;
use crate::services::editor::{EditIntent, apply_intent};
use crate::services::survey_import::{ImportError, ImportOutcome};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("an import is already in progress")]
    ImportInProgress,
    #[error("the session is closed")]
    Closed,
}

/// Identifies one import attempt. Results carrying any other ticket than the
/// pending one are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum ImportReport {
    Applied { questions: usize },
    NoCredential { variable: String },
    NoContent,
    Failed,
    Discarded,
}

impl ImportReport {
    pub fn user_message(&self) -> String {
        match self {
            ImportReport::Applied { questions } => {
                format!("Imported survey with {questions} question(s)")
            }
            ImportReport::NoCredential { variable } if variable.is_empty() => {
                "Could not parse the survey text: no AI credential is configured".to_string()
            }
            ImportReport::NoCredential { variable } => format!(
                "Could not parse the survey text: no AI credential is configured (set {variable})"
            ),
            ImportReport::NoContent => {
                "Could not recognise a survey in that text; please add more detail".to_string()
            }
            ImportReport::Failed => "Import failed, please try again later".to_string(),
            ImportReport::Discarded => "Import result discarded".to_string(),
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, ImportReport::Applied { .. })
    }
}

/// Converts the outcome of an import attempt into the report shown to the
/// user. Failure causes are logged, not returned.
pub fn report_import_result(
    result: &Result<ImportOutcome, ImportError>,
    credential_variable: &str,
) -> ImportReport {
    match result {
        Ok(ImportOutcome::Imported(survey)) => ImportReport::Applied {
            questions: survey.questions.len(),
        },
        Ok(ImportOutcome::NoCredential) => ImportReport::NoCredential {
            variable: credential_variable.to_string(),
        },
        Ok(ImportOutcome::NoContent) => ImportReport::NoContent,
        Err(ImportError::EmptyText) => ImportReport::NoContent,
        Err(err) => {
            tracing::error!(error = %err, "survey import failed");
            ImportReport::Failed
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImportState {
    Idle,
    Pending(ImportTicket),
}

/// Holds the current survey and everything around it that is not part of the
/// survey itself: editor visibility, ID generation and the pending import.
#[derive(Debug)]
pub struct SurveySession {
    survey: Survey,
    editor_visible: bool,
    ids: IdGenerator,
    import_state: ImportState,
    next_ticket: u64,
    closed: bool,
}

impl SurveySession {
    pub fn new(survey: Survey) -> Self {
        Self::with_id_generator(survey, IdGenerator::new())
    }

    pub fn with_id_generator(survey: Survey, ids: IdGenerator) -> Self {
        Self {
            survey,
            editor_visible: true,
            ids,
            import_state: ImportState::Idle,
            next_ticket: 0,
            closed: false,
        }
    }

    pub fn survey(&self) -> &Survey {
        &self.survey
    }

    pub fn apply(&mut self, intent: EditIntent) {
        let updated = apply_intent(&self.survey, intent, &mut self.ids);
        self.replace(updated);
    }

    pub fn replace(&mut self, survey: Survey) {
        self.survey = survey;
    }

    pub fn editor_visible(&self) -> bool {
        self.editor_visible
    }

    pub fn show_editor(&mut self) {
        self.editor_visible = true;
    }

    pub fn hide_editor(&mut self) {
        self.editor_visible = false;
    }

    pub fn toggle_editor(&mut self) {
        self.editor_visible = !self.editor_visible;
    }

    pub fn is_import_pending(&self) -> bool {
        matches!(self.import_state, ImportState::Pending(_))
    }

    pub fn begin_import(&mut self) -> Result<ImportTicket, SessionError> {
        if self.closed {
            return Err(SessionError::Closed);
        }
        if self.is_import_pending() {
            return Err(SessionError::ImportInProgress);
        }
        self.next_ticket += 1;
        let ticket = ImportTicket(self.next_ticket);
        self.import_state = ImportState::Pending(ticket);
        Ok(ticket)
    }

    /// Settles an import. The survey is replaced only for a successful import
    /// whose ticket is still the pending one.
    pub fn finish_import(
        &mut self,
        ticket: ImportTicket,
        result: Result<ImportOutcome, ImportError>,
        credential_variable: &str,
    ) -> ImportReport {
        if self.closed || self.import_state != ImportState::Pending(ticket) {
            tracing::debug!(?ticket, "discarding stale import result");
            return ImportReport::Discarded;
        }
        self.import_state = ImportState::Idle;

        let report = report_import_result(&result, credential_variable);
        if let Ok(ImportOutcome::Imported(survey)) = result {
            self.replace(survey);
        }
        report
    }

    /// Drops any pending import; its result will be discarded when it arrives.
    pub fn cancel_import(&mut self) {
        self.import_state = ImportState::Idle;
    }

    pub fn close(&mut self) {
        self.cancel_import();
        self.closed = true;
    }
}
