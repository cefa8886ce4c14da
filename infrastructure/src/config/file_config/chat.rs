//! Chat configuration from TOML (`[chat]` section)

use nutrichat_application::ChatBehavior;
use serde::{Deserialize, Serialize};

/// Raw chat configuration from TOML
///
/// Unset fields keep the built-in Indonesian texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileChatConfig {
    pub stream_fallback: Option<String>,
    pub recipe_prompt: Option<String>,
    pub recipe_fallback: Option<String>,
    pub description_fallback: Option<String>,
}

impl FileChatConfig {
    pub fn to_behavior(&self) -> ChatBehavior {
        let mut behavior = ChatBehavior::default();
        if let Some(text) = &self.stream_fallback {
            behavior = behavior.with_stream_fallback(text);
        }
        if let Some(text) = &self.recipe_prompt {
            behavior = behavior.with_recipe_prompt(text);
        }
        if let Some(text) = &self.recipe_fallback {
            behavior = behavior.with_recipe_fallback(text);
        }
        if let Some(text) = &self.description_fallback {
            behavior = behavior.with_description_fallback(text);
        }
        behavior
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override() {
        let toml_str = r#"
[chat]
stream_fallback = "Resep tidak tersedia saat ini."
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        let behavior = config.chat.to_behavior();
        assert_eq!(behavior.stream_fallback, "Resep tidak tersedia saat ini.");
        assert_eq!(behavior.recipe_fallback, ChatBehavior::default().recipe_fallback);
    }
}
