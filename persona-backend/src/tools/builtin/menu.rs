use crate::tools::registry::Tool;
use crate::tools::types::{ToolContext, ToolDefinition, ToolInputSchema, ToolResult};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

/// Fixed restaurant menu, grouped by section
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Menu {
    pub drinks: Drinks,
    pub veg: Veg,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Drinks {
    pub chai: &'static str,
    pub coffee: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Veg {
    pub dal_makhni: &'static str,
    pub panner: &'static str,
}

pub const MENU: Menu = Menu {
    drinks: Drinks {
        chai: "INR 50",
        coffee: "INR 70",
    },
    veg: Veg {
        dal_makhni: "INR 250",
        panner: "INR 400",
    },
};

/// Tool returning the menu
pub struct MenuTool {
    definition: ToolDefinition,
}

impl MenuTool {
    pub fn new() -> Self {
        MenuTool {
            definition: ToolDefinition {
                name: "get_menu".to_string(),
                description: "Fetches and returns the menu items".to_string(),
                input_schema: ToolInputSchema::default(),
            },
        }
    }
}

impl Default for MenuTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for MenuTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, _params: Value, _context: &ToolContext) -> ToolResult {
        match serde_json::to_value(&MENU) {
            Ok(menu) => ToolResult::success(menu.to_string()).with_metadata(menu),
            Err(e) => ToolResult::error(format!("Failed to serialize menu: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_menu_is_deterministic() {
        let tool = MenuTool::new();
        let ctx = ToolContext::default();
        let first = tool.execute(json!({}), &ctx).await;
        let second = tool.execute(json!({}), &ctx).await;

        assert!(first.success);
        assert_eq!(first.content.as_bytes(), second.content.as_bytes());
        assert_eq!(first.metadata, second.metadata);
    }

    #[tokio::test]
    async fn test_menu_contents() {
        let result = MenuTool::new().execute(json!({}), &ToolContext::default()).await;
        let menu = result.metadata.unwrap();
        assert_eq!(menu["Drinks"]["Chai"], "INR 50");
        assert_eq!(menu["Drinks"]["Coffee"], "INR 70");
        assert_eq!(menu["Veg"]["DalMakhni"], "INR 250");
        assert_eq!(menu["Veg"]["Panner"], "INR 400");
    }
}
