use crate::domain::answer_option::AnswerOption;
use crate::domain::question::{Question, QuestionType};
use crate::domain::survey::Survey;

/// Survey loaded at start-up before anything is edited or imported.
pub fn sample_survey() -> Survey {
    Survey {
        total_count: 3996,
        questions: vec![
            Question {
                id: "q1".to_string(),
                text: "If your claim involved several liable parties, how clear was our split of liability, how accurate was the payout calculation and how well was it explained?".to_string(),
                question_type: QuestionType::Single,
                options: vec![
                    AnswerOption::new("o1-1", "Clear split, precise calculation, basis fully explained; fully accept it", 87.0),
                    AnswerOption::new("o1-2", "Reasonable split, no obvious calculation errors, but the explanation was brief", 11.0),
                    AnswerOption::new("o1-3", "Vague split, calculation without basis, core questions avoided", 2.0),
                ],
            },
            Question {
                id: "q2".to_string(),
                text: "When you talked to our staff during the claim (phone or online), how clear, patient and empathetic were they?".to_string(),
                question_type: QuestionType::Single,
                options: vec![
                    AnswerOption::new("o2-1", "Clear and professional, listened patiently, answered from your point of view", 97.2),
                    AnswerOption::new("o2-2", "Understandable, but impatient and stuck to scripted answers", 2.8),
                    AnswerOption::new("o2-3", "Confusing, interrupted or brushed you off", 0.0),
                ],
            },
            Question {
                id: "q3".to_string(),
                text: "When your vehicle was damaged in a remote area, how quickly did our assessor arrive and how professional was the on-site handling?".to_string(),
                question_type: QuestionType::Single,
                options: vec![
                    AnswerOption::new("o3-1", "Arrived as promised, thorough inspection, evidence and liability settled on site", 96.4),
                    AnswerOption::new("o3-2", "Arrived one to two hours late, inspection skipped some details", 2.7),
                    AnswerOption::new("o3-3", "Never arrived or asked you to collect the evidence yourself", 0.9),
                ],
            },
        ],
    }
}
