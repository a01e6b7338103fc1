pub mod builtin;
pub mod registry;
pub mod types;

pub use registry::{Tool, ToolRegistry};
pub use types::{
    PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult, ValidationError,
};

use std::sync::Arc;

/// Create a registry holding every built-in function tool
pub fn create_default_registry() -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    registry.register(Arc::new(builtin::CurrentTimeTool::new()));
    registry.register(Arc::new(builtin::MenuTool::new()));
    registry.register(Arc::new(builtin::WeatherTool::new()));
    registry.register(Arc::new(builtin::StockPriceTool::new()));
    registry.register(Arc::new(builtin::TranslateTextTool::new()));

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_contents() {
        let registry = create_default_registry();
        assert_eq!(
            registry.names(),
            vec![
                "get_current_time",
                "get_menu",
                "get_weather",
                "get_stock_price",
                "translate_text"
            ]
        );
    }
}
