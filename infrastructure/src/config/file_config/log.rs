//! Logging configuration from TOML (`[log]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLogConfig {
    /// Directory for daily-rotated diagnostic log files
    pub dir: Option<String>,
    /// JSONL file receiving the conversation transcript
    pub conversation_log: Option<String>,
}
