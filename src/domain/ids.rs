use rand::Rng;

use super::survey::Survey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Question,
    Option,
}

impl IdKind {
    fn prefix(self) -> &'static str {
        match self {
            IdKind::Question => "q",
            IdKind::Option => "o",
        }
    }
}

/// Hands out IDs that are unique for the lifetime of the generator.
///
/// IDs combine a random per-generator tag with a counter that only ever grows,
/// so two calls never return the same value even within the same instant.
/// Candidates that already occur anywhere in the survey are skipped, which
/// covers IDs that came in through an import.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    tag: String,
    counter: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        let tag: u32 = rand::thread_rng().r#gen();
        Self::with_tag(format!("{tag:08x}"))
    }

    pub fn with_tag(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            counter: 0,
        }
    }

    pub fn next_id(&mut self, kind: IdKind, survey: &Survey) -> String {
        loop {
            self.counter += 1;
            let candidate = format!("{}-{}-{}", kind.prefix(), self.tag, self.counter);
            if !survey.contains_id(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_question, build_survey};

    #[test]
    fn consecutive_ids_differ() {
        let survey = Survey::new();
        let mut ids = IdGenerator::with_tag("t");
        let first = ids.next_id(IdKind::Question, &survey);
        let second = ids.next_id(IdKind::Question, &survey);
        assert_eq!(first, "q-t-1");
        assert_eq!(second, "q-t-2");
    }

    #[test]
    fn skips_ids_already_in_the_survey() {
        let survey = build_survey(0, vec![build_question("q-t-1", &[("o-t-2", 50.0)])]);
        let mut ids = IdGenerator::with_tag("t");
        assert_eq!(ids.next_id(IdKind::Question, &survey), "q-t-2");
        assert_eq!(ids.next_id(IdKind::Option, &survey), "o-t-3");
    }
}
