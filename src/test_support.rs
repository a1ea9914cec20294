use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::answer_option::AnswerOption;
use crate::domain::question::{Question, QuestionType};
use crate::domain::survey::Survey;
use crate::services::survey_import::{ImportError, StructuredGenerator};

pub fn build_question(id: &str, options: &[(&str, f64)]) -> Question {
    Question {
        id: id.to_string(),
        text: format!("Question {id}"),
        question_type: QuestionType::Single,
        options: options
            .iter()
            .map(|(option_id, percentage)| {
                AnswerOption::new(*option_id, format!("Option {option_id}"), *percentage)
            })
            .collect(),
    }
}

pub fn build_survey(total_count: u64, questions: Vec<Question>) -> Survey {
    Survey {
        total_count,
        questions,
    }
}

pub enum MockReply {
    Text(String),
    Empty,
    Fail,
    Panic,
}

// A generator that replays a canned reply and records every prompt it receives
pub struct MockGenerator {
    reply: MockReply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockGenerator {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn replying(json: serde_json::Value) -> Self {
        Self::new(MockReply::Text(json.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl StructuredGenerator for MockGenerator {
    async fn generate_json(
        &self,
        prompt: &str,
        _schema: &serde_json::Value,
    ) -> Result<Option<String>, ImportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            MockReply::Text(text) => Ok(Some(text.clone())),
            MockReply::Empty => Ok(None),
            MockReply::Fail => Err(ImportError::Connection("mock connection refused".to_string())),
            MockReply::Panic => panic!("mock generator crashed"),
        }
    }
}
