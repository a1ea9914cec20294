use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::domain::answer_option::AnswerOption;
use crate::domain::question::{Question, QuestionType};
use crate::domain::survey::Survey;
use crate::services::gemini_api::{AiConfig, GeminiClient};
use crate::services::survey_edit::{coerce_count, coerce_number};

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("survey text is empty")]
    EmptyText,
    #[error("connection error: {0}")]
    Connection(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error("rate limited")]
    RateLimited,
    #[error("service error: HTTP {0}")]
    Service(u16),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("import task stopped: {0}")]
    Interrupted(String),
}

/// Describes a service that turns a prompt into JSON constrained by a schema.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Returns the generated JSON text, or `None` when the service produced no
    /// text at all.
    async fn generate_json(&self, prompt: &str, schema: &Value)
    -> Result<Option<String>, ImportError>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    Imported(Survey),
    /// No credential is configured; nothing was sent.
    NoCredential,
    /// The service answered but nothing usable came back.
    NoContent,
}

pub struct SurveyImporter {
    generator: Option<Arc<dyn StructuredGenerator>>,
    credential_hint: String,
}

impl SurveyImporter {
    pub fn new(generator: Option<Arc<dyn StructuredGenerator>>) -> Self {
        Self {
            generator,
            credential_hint: String::new(),
        }
    }

    /// Builds a Gemini backed importer. Without a credential the importer stays
    /// offline and every import reports [`ImportOutcome::NoCredential`].
    pub fn from_config(config: &AiConfig, api_key: Option<String>) -> Self {
        let generator = api_key
            .filter(|key| !key.trim().is_empty())
            .map(|key| Arc::new(GeminiClient::new(config.clone(), key)) as Arc<dyn StructuredGenerator>);
        Self {
            generator,
            credential_hint: config.api_key_env.clone(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.generator.is_some()
    }

    /// Name of the environment variable expected to hold the credential.
    pub fn credential_hint(&self) -> &str {
        &self.credential_hint
    }

    pub async fn import(&self, text: &str, total_hint: u64) -> Result<ImportOutcome, ImportError> {
        if text.trim().is_empty() {
            return Err(ImportError::EmptyText);
        }
        let Some(generator) = &self.generator else {
            tracing::warn!("no AI credential configured, skipping survey import");
            return Ok(ImportOutcome::NoCredential);
        };

        let prompt = build_prompt(text, total_hint);
        let schema = survey_response_schema();
        tracing::debug!(chars = text.chars().count(), "requesting survey import");
        let Some(json) = generator.generate_json(&prompt, &schema).await? else {
            tracing::warn!("AI service returned no text");
            return Ok(ImportOutcome::NoContent);
        };

        let document: SurveyDocument = match serde_json::from_str(&json) {
            Ok(document) => document,
            Err(err) => {
                tracing::warn!(error = %err, "AI service returned malformed survey json");
                return Ok(ImportOutcome::NoContent);
            }
        };
        let survey = normalize_document(document, total_hint);
        if survey.questions.is_empty() {
            tracing::warn!("AI service returned a survey without questions");
            return Ok(ImportOutcome::NoContent);
        }
        tracing::info!(questions = survey.questions.len(), "survey imported");
        Ok(ImportOutcome::Imported(survey))
    }
}

/// Survey document as returned by the service. Nothing in it is trusted:
/// every field may be missing or of the wrong type, and list entries that are
/// not objects are skipped.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurveyDocument {
    pub total_count: Option<Value>,
    pub questions: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct QuestionDocument {
    pub id: Option<Value>,
    pub text: Option<Value>,
    #[serde(rename = "type")]
    pub question_type: Option<Value>,
    pub options: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OptionDocument {
    pub id: Option<Value>,
    pub label: Option<Value>,
    pub percentage: Option<Value>,
}

/// Turns an untrusted document into a survey that satisfies the model's
/// invariants.
///
/// Missing IDs are backfilled from the position (`q-{question}` and
/// `o-{question}-{option}`); IDs repeated within one collection get a numeric
/// suffix.
pub fn normalize_document(document: SurveyDocument, total_hint: u64) -> Survey {
    let total_count = match document.total_count.as_ref() {
        Some(value) if !value.is_null() => coerce_count(value_to_number(value)),
        _ => total_hint,
    };

    let mut question_ids = HashSet::new();
    let questions = object_entries::<QuestionDocument>(document.questions)
        .into_iter()
        .enumerate()
        .map(|(question_index, question)| {
            let id = unique_id(
                question.id,
                format!("q-{question_index}"),
                &mut question_ids,
            );

            let mut option_ids = HashSet::new();
            let options = object_entries::<OptionDocument>(question.options)
                .into_iter()
                .enumerate()
                .map(|(option_index, option)| AnswerOption {
                    id: unique_id(
                        option.id,
                        format!("o-{question_index}-{option_index}"),
                        &mut option_ids,
                    ),
                    label: value_to_text(option.label),
                    percentage: option.percentage.as_ref().map(value_to_number).unwrap_or(0.0),
                })
                .collect();

            Question {
                id,
                text: value_to_text(question.text),
                question_type: QuestionType::parse(&value_to_text(question.question_type))
                    .unwrap_or_default(),
                options,
            }
        })
        .collect();

    Survey {
        total_count,
        questions,
    }
}

/// Object entries of a JSON array; anything else yields nothing.
fn object_entries<T: DeserializeOwned>(list: Option<Value>) -> Vec<T> {
    match list {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn value_to_text(value: Option<Value>) -> String {
    match value {
        Some(Value::String(text)) => text,
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}

fn unique_id(supplied: Option<Value>, fallback: String, taken: &mut HashSet<String>) -> String {
    let base = supplied
        .and_then(|id| match id {
            Value::String(text) => Some(text.trim().to_string()),
            Value::Number(number) => Some(number.to_string()),
            _ => None,
        })
        .filter(|id| !id.is_empty())
        .unwrap_or(fallback);

    let mut candidate = base.clone();
    let mut suffix = 2;
    while taken.contains(&candidate) {
        candidate = format!("{base}-{suffix}");
        suffix += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

fn value_to_number(value: &Value) -> f64 {
    match value {
        Value::Number(number) => number
            .as_f64()
            .filter(|v| v.is_finite())
            .map_or(0.0, |v| v + 0.0),
        Value::String(text) => coerce_number(text),
        _ => 0.0,
    }
}

pub fn build_prompt(text: &str, total_hint: u64) -> String {
    format!(
        "Parse the following text into a structured JSON object for a survey visualization tool.\n\
         \n\
         The text contains:\n\
         1. A total count of questionnaires (infer it if possible, otherwise use {total_hint}).\n\
         2. A list of questions.\n\
         3. For each question, whether it is single choice (SINGLE) or multi choice (MULTI).\n\
         4. For each question, a list of options with their percentage values.\n\
         \n\
         Percentages must be plain numbers (e.g. 87 for 87%).\n\
         \n\
         Input text:\n\
         {text}"
    )
}

/// Response schema in the OpenAPI subset accepted by `generateContent`.
pub fn survey_response_schema() -> Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "totalCount": { "type": "INTEGER" },
            "questions": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "text": { "type": "STRING" },
                        "type": {
                            "type": "STRING",
                            "enum": [QuestionType::Single.tag(), QuestionType::Multi.tag()]
                        },
                        "options": {
                            "type": "ARRAY",
                            "items": {
                                "type": "OBJECT",
                                "properties": {
                                    "id": { "type": "STRING" },
                                    "label": { "type": "STRING" },
                                    "percentage": { "type": "NUMBER" }
                                },
                                "required": ["id", "label", "percentage"]
                            }
                        }
                    },
                    "required": ["id", "text", "type", "options"]
                }
            }
        },
        "required": ["totalCount", "questions"]
    })
}
