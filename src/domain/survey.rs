use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::question::Question;

/// The whole document: a respondent count and the ordered questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Survey {
    pub total_count: u64,
    pub questions: Vec<Question>,
}

impl Survey {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn question(&self, question_id: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }

    /// Every question and option ID in the survey.
    pub fn all_ids(&self) -> HashSet<&str> {
        let mut ids = HashSet::new();
        for question in &self.questions {
            ids.insert(question.id.as_str());
            for option in &question.options {
                ids.insert(option.id.as_str());
            }
        }
        ids
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.questions.iter().any(|question| {
            question.id == id || question.options.iter().any(|option| option.id == id)
        })
    }
}
