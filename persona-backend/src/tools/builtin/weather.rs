use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canned weather report. There is no weather provider behind this tool.
pub struct WeatherTool {
    definition: ToolDefinition,
}

impl WeatherTool {
    pub fn new() -> Self {
        WeatherTool {
            definition: ToolDefinition {
                name: "get_weather".to_string(),
                description: "Fetches weather for a given city.".to_string(),
                input_schema: ToolInputSchema::object(
                    vec![("city", PropertySchema::string("The name of the city."))],
                    &["city"],
                ),
            },
        }
    }
}

impl Default for WeatherTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct WeatherParams {
    city: String,
}

#[derive(Debug, Serialize)]
struct WeatherReport {
    city: String,
    temperature: &'static str,
    condition: &'static str,
    humidity: &'static str,
}

#[async_trait]
impl Tool for WeatherTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> ToolResult {
        let params: WeatherParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        let report = WeatherReport {
            city: params.city,
            temperature: "22°C (72°F)",
            condition: "Sunny with a light breeze",
            humidity: "45%",
        };

        match serde_json::to_string(&report) {
            Ok(json) => ToolResult::success(json),
            Err(e) => ToolResult::error(format!("Failed to serialize weather report: {}", e)),
        }
    }
}
