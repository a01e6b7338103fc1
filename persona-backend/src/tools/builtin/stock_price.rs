use crate::tools::registry::Tool;
use crate::tools::types::{
    PropertySchema, ToolContext, ToolDefinition, ToolInputSchema, ToolResult,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Canned stock quote for any ticker
pub struct StockPriceTool {
    definition: ToolDefinition,
}

impl StockPriceTool {
    pub fn new() -> Self {
        StockPriceTool {
            definition: ToolDefinition {
                name: "get_stock_price".to_string(),
                description: "Fetches the current price of a stock by its ticker symbol.".to_string(),
                input_schema: ToolInputSchema::object(
                    vec![(
                        "symbol",
                        PropertySchema::string("The stock ticker symbol (e.g., AAPL)."),
                    )],
                    &["symbol"],
                ),
            },
        }
    }
}

impl Default for StockPriceTool {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct StockPriceParams {
    symbol: String,
}

#[derive(Debug, Serialize)]
struct StockQuote {
    symbol: String,
    price: &'static str,
    currency: &'static str,
    change: &'static str,
}

#[async_trait]
impl Tool for StockPriceTool {
    fn definition(&self) -> ToolDefinition {
        self.definition.clone()
    }

    async fn execute(&self, params: Value, _context: &ToolContext) -> ToolResult {
        let params: StockPriceParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return ToolResult::error(format!("Invalid parameters: {}", e)),
        };

        let quote = StockQuote {
            symbol: params.symbol,
            price: "150.75",
            currency: "USD",
            change: "+1.25",
        };

        match serde_json::to_string(&quote) {
            Ok(json) => ToolResult::success(json),
            Err(e) => ToolResult::error(format!("Failed to serialize quote: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_quote_echoes_symbol() {
        let result = StockPriceTool::new()
            .execute(json!({"symbol": "AAPL"}), &ToolContext::default())
            .await;
        assert!(result.success);
        let quote: Value = serde_json::from_str(&result.content).unwrap();
        assert_eq!(quote["symbol"], "AAPL");
        assert_eq!(quote["currency"], "USD");
    }
}
