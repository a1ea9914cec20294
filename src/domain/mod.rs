pub mod answer_option;
pub mod ids;
pub mod question;
pub mod survey;
