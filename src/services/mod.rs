pub mod editor;
pub mod gemini_api;
pub mod sample_survey;
pub mod session;
pub mod survey_chart;
pub mod survey_edit;
pub mod survey_import;
pub mod survey_preview;
