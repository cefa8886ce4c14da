//! Output formatting for one-shot commands and chat turns

pub mod console;
pub mod formatter;
