pub mod base_commands;
pub mod edit_cmd;
pub mod import_cmd;
pub mod preview_cmd;
pub mod preview_format;
