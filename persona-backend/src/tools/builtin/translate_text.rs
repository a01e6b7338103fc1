use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Mock translator; always answers "Hello world"
pub struct TranslateTextTool {
    definition: ToolDefinition,
}

impl TranslateTextTool {
    pub fn new() -> Self {
        TranslateTextTool {
            definition: ToolDefinition {
                name: "translate_text".to_string(),
                description: "Translates a given text into a target language.".to_string(),
                input_schema: ToolInputSchema::object(
                    vec![
                        ("text", PropertySchema::string("The text to translate.")),
                        (
                            "targetLanguage",
                            PropertySchema::string("The language to translate to."),
                        ),
                    ],
                    &["text", "targetLanguage"],
                ),
            },
        }
    }
}

impl Default for TranslateTextTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateParams {
    text: String,
    target_language: String,
}

#[async_trait]
impl Tool for TranslateTextTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> ToolResult {
        let params: TranslateParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        ToolResult::success(format!(
            "The translation of \"{}\" into {} is \"Hello world\".",
            params.text, params.target_language
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_translation_sentence() {
        let result = TranslateTextTool::new()
            .execute(
                json!({"text": "Bonjour le monde", "targetLanguage": "English"}),
                &ToolContext::default(),
            )
            .await;
        assert!(result.success);
        assert_eq!(
            result.content,
            "The translation of \"Bonjour le monde\" into English is \"Hello world\"."
        );
    }
}
