use crate::ai::types::{AiError, AiResponse, ToolCall, ToolHistoryEntry, ToolResponse};
use crate::ai::Message;
use crate::tools::ToolDefinition;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Client for the OpenAI Chat Completions API with native tool calling
#[derive(Clone)]
pub struct OpenAIClient {
    client: Client,
    auth_headers: header::HeaderMap,
    endpoint: String,
}

#[derive(Debug, Serialize)]
struct OpenAICompletionRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<OpenAITool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIMessage {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<OpenAIToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Clone)]
struct OpenAITool {
    #[serde(rename = "type")]
    tool_type: String,
    function: OpenAIToolFunction,
}

#[derive(Debug, Serialize, Clone)]
struct OpenAIToolFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIToolCall {
    pub id: String,
    #[serde(rename = "type", default = "function_type")]
    pub call_type: String,
    pub function: OpenAIFunctionCall,
}

/// Arguments travel as a JSON-encoded string on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIFunctionCall {
    pub name: String,
    #[serde(default)]
    pub arguments: String,
}

fn function_type() -> String {
    "function".to_string()
}

#[derive(Debug, Deserialize)]
struct OpenAICompletionResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorResponse {
    error: OpenAIError,
}

#[derive(Debug, Deserialize)]
struct OpenAIError {
    message: String,
}

impl OpenAIClient {
    pub fn new(api_key: &str, endpoint: Option<&str>) -> Result<Self, String> {
        let mut auth_headers = header::HeaderMap::new();
        auth_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let auth_value = header::HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| format!("Invalid API key format: {}", e))?;
        auth_headers.insert(header::AUTHORIZATION, auth_value);

        Ok(Self {
            client: crate::http::shared_client().clone(),
            auth_headers,
            endpoint: endpoint.unwrap_or(DEFAULT_ENDPOINT).to_string(),
        })
    }

    /// Generate a response with tool support.
    ///
    /// Exactly one HTTP request is made. Failures are returned as-is; the
    /// caller decides whether the run fails.
    pub async fn generate_with_tools(
        &self,
        model: &str,
        messages: Vec<Message>,
        tool_history: &[ToolHistoryEntry],
        tools: Vec<ToolDefinition>,
    ) -> Result<AiResponse, AiError> {
        let request = Self::build_request(model, messages, tool_history, tools);

        log::debug!(
            "[OPENAI] Sending request: {}",
            serde_json::to_string(&request).unwrap_or_default()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.auth_headers.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::new(format!("OpenAI API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let error_msg =
                if let Ok(error_response) = serde_json::from_str::<OpenAIErrorResponse>(&error_text) {
                    format!("OpenAI API error: {}", error_response.error.message)
                } else {
                    format!("OpenAI API returned error status: {}, body: {}", status, error_text)
                };
            return Err(AiError::with_status(error_msg, status.as_u16()));
        }

        let response_data: OpenAICompletionResponse = response
            .json()
            .await
            .map_err(|e| AiError::new(format!("Failed to parse OpenAI response: {}", e)))?;

        Self::parse_response(response_data)
    }

    fn build_request(
        model: &str,
        messages: Vec<Message>,
        tool_history: &[ToolHistoryEntry],
        tools: Vec<ToolDefinition>,
    ) -> OpenAICompletionRequest {
        let mut api_messages: Vec<OpenAIMessage> = messages
            .into_iter()
            .map(|m| OpenAIMessage {
                role: m.role.to_string(),
                content: Some(m.content),
                tool_calls: None,
                tool_call_id: None,
            })
            .collect();

        for entry in tool_history {
            api_messages.extend(Self::build_tool_result_messages(
                &entry.tool_calls,
                &entry.tool_responses,
            ));
        }

        let openai_tools: Vec<OpenAITool> = tools
            .into_iter()
            .map(|t| OpenAITool {
                tool_type: "function".to_string(),
                function: OpenAIToolFunction {
                    name: t.name,
                    description: t.description,
                    parameters: serde_json::to_value(t.input_schema).unwrap_or_default(),
                },
            })
            .collect();

        let has_tools = !openai_tools.is_empty();
        OpenAICompletionRequest {
            model: model.to_string(),
            messages: api_messages,
            tools: if has_tools { Some(openai_tools) } else { None },
            tool_choice: if has_tools { Some("auto".to_string()) } else { None },
        }
    }

    fn parse_response(response_data: OpenAICompletionResponse) -> Result<AiResponse, AiError> {
        let choice = response_data
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AiError::new("OpenAI API returned no choices"))?;

        let tool_calls: Vec<ToolCall> = choice
            .message
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|tc| ToolCall {
                id: tc.id,
                name: tc.function.name,
                arguments: parse_arguments(&tc.function.arguments),
            })
            .collect();

        Ok(AiResponse {
            content: choice.message.content.unwrap_or_default(),
            tool_calls,
            stop_reason: choice.finish_reason,
        })
    }

    /// Build the messages that replay one round of tool calls: the assistant
    /// message carrying the calls, then one `tool` message per response.
    pub fn build_tool_result_messages(
        tool_calls: &[ToolCall],
        tool_responses: &[ToolResponse],
    ) -> Vec<OpenAIMessage> {
        let calls: Vec<OpenAIToolCall> = tool_calls
            .iter()
            .map(|tc| OpenAIToolCall {
                id: tc.id.clone(),
                call_type: function_type(),
                function: OpenAIFunctionCall {
                    name: tc.name.clone(),
                    arguments: tc.arguments.to_string(),
                },
            })
            .collect();

        let mut messages = vec![OpenAIMessage {
            role: "assistant".to_string(),
            content: None,
            tool_calls: Some(calls),
            tool_call_id: None,
        }];

        messages.extend(tool_responses.iter().map(|tr| OpenAIMessage {
            role: "tool".to_string(),
            content: Some(tr.content.clone()),
            tool_calls: None,
            tool_call_id: Some(tr.tool_call_id.clone()),
        }));

        messages
    }
}

/// Decode a tool-call argument string. Blank input means no arguments;
/// malformed JSON is kept as a string so schema validation rejects it.
fn parse_arguments(raw: &str) -> Value {
    if raw.trim().is_empty() {
        return Value::Object(serde_json::Map::new());
    }
    serde_json::from_str(raw).unwrap_or_else(|e| {
        log::warn!("[OPENAI] Tool call arguments are not valid JSON: {}", e);
        Value::String(raw.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::MessageRole;
    use crate::tools::{PropertySchema, ToolInputSchema};
    use serde_json::json;

    #[test]
    fn test_build_request_includes_tools_and_history() {
        let messages = vec![
            Message::new(MessageRole::System, "You are a weather assistant."),
            Message::new(MessageRole::User, "Weather in Paris?"),
        ];
        let call = ToolCall {
            id: "call_1".to_string(),
            name: "get_weather".to_string(),
            arguments: json!({"city": "Paris"}),
        };
        let history = vec![ToolHistoryEntry::new(
            vec![call],
            vec![ToolResponse::success("call_1".to_string(), "sunny".to_string())],
        )];
        let tools = vec![ToolDefinition {
            name: "get_weather".to_string(),
            description: "Fetches weather for a given city.".to_string(),
            input_schema: ToolInputSchema::object(
                vec![("city", PropertySchema::string("The name of the city."))],
                &["city"],
            ),
        }];

        let request = OpenAIClient::build_request("gpt-4o-mini", messages, &history, tools);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["model"], "gpt-4o-mini");
        assert_eq!(value["tool_choice"], "auto");
        assert_eq!(value["tools"][0]["type"], "function");
        assert_eq!(value["tools"][0]["function"]["name"], "get_weather");
        assert_eq!(value["tools"][0]["function"]["parameters"]["required"], json!(["city"]));

        let msgs = value["messages"].as_array().unwrap();
        assert_eq!(msgs.len(), 4);
        assert_eq!(msgs[0]["role"], "system");
        assert_eq!(msgs[2]["role"], "assistant");
        assert!(msgs[2].get("content").is_none());
        assert_eq!(msgs[2]["tool_calls"][0]["function"]["arguments"], r#"{"city":"Paris"}"#);
        assert_eq!(msgs[3]["role"], "tool");
        assert_eq!(msgs[3]["tool_call_id"], "call_1");
    }

    #[test]
    fn test_build_request_without_tools() {
        let request = OpenAIClient::build_request(
            "gpt-4o-mini",
            vec![Message::new(MessageRole::User, "hi")],
            &[],
            vec![],
        );
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert!(value.get("tool_choice").is_none());
    }

    #[test]
    fn test_parse_response_with_tool_calls() {
        let raw = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_abc",
                        "type": "function",
                        "function": {"name": "get_stock_price", "arguments": "{\"symbol\":\"AAPL\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        });
        let data: OpenAICompletionResponse = serde_json::from_value(raw).unwrap();
        let response = OpenAIClient::parse_response(data).unwrap();

        assert!(response.has_tool_calls());
        assert_eq!(response.content, "");
        assert_eq!(response.tool_calls[0].name, "get_stock_price");
        assert_eq!(response.tool_calls[0].arguments, json!({"symbol": "AAPL"}));
    }

    #[test]
    fn test_parse_response_text_only() {
        let raw = json!({
            "choices": [{
                "message": {"role": "assistant", "content": "It is sunny."},
                "finish_reason": "stop"
            }]
        });
        let data: OpenAICompletionResponse = serde_json::from_value(raw).unwrap();
        let response = OpenAIClient::parse_response(data).unwrap();
        assert!(!response.has_tool_calls());
        assert_eq!(response.content, "It is sunny.");
    }

    #[test]
    fn test_parse_response_no_choices() {
        let data: OpenAICompletionResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert!(OpenAIClient::parse_response(data).is_err());
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(parse_arguments(""), json!({}));
        assert_eq!(parse_arguments("{\"a\":1}"), json!({"a": 1}));
        assert!(parse_arguments("{not json").is_string());
    }
}
