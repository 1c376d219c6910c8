//! Tool responses and the wire serializer.
//!
//! A tool produces an ordered sequence of content items. The serializer
//! collapses that sequence into the wire shape callers expect: an empty
//! response becomes an empty object, a single item is unwrapped to its
//! own value, and multiple items become an ordered list. The singleton
//! unwrap is an intentional ergonomic contract — callers of one-result
//! tools get the value directly, not a one-element list.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One item of tool output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ToolContent {
    Text { text: String },
    Json { data: Value },
}

impl ToolContent {
    /// The item's own wire value: raw text, or the structured payload.
    pub fn to_wire(&self) -> Value {
        match self {
            ToolContent::Text { text } => Value::String(text.clone()),
            ToolContent::Json { data } => data.clone(),
        }
    }
}

/// The structured result of one tool execution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
}

impl ToolResponse {
    /// A response with a single text item.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ToolContent::Text { text: text.into() }],
        }
    }

    /// A response with a single structured item.
    pub fn json(data: Value) -> Self {
        Self {
            content: vec![ToolContent::Json { data }],
        }
    }

    /// A response built from any serializable output record.
    pub fn from_output<T: Serialize>(output: &T) -> Result<Self, serde_json::Error> {
        Ok(Self::json(serde_json::to_value(output)?))
    }

    /// Collapse into the wire value.
    ///
    /// Empty → `{}`; one item → that item's value; many → ordered list.
    pub fn to_wire(&self) -> Value {
        match self.content.as_slice() {
            [] => Value::Object(serde_json::Map::new()),
            [single] => single.to_wire(),
            many => Value::Array(many.iter().map(ToolContent::to_wire).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_response_serializes_to_empty_object() {
        assert_eq!(ToolResponse::default().to_wire(), json!({}));
    }

    #[test]
    fn single_text_item_unwraps_to_raw_text() {
        let resp = ToolResponse::text("done");
        assert_eq!(resp.to_wire(), json!("done"));
    }

    #[test]
    fn single_json_item_unwraps_to_payload() {
        let resp = ToolResponse::json(json!({"status": "success"}));
        assert_eq!(resp.to_wire(), json!({"status": "success"}));
    }

    #[test]
    fn multiple_items_become_ordered_list() {
        let resp = ToolResponse {
            content: vec![
                ToolContent::Text { text: "first".into() },
                ToolContent::Json { data: json!({"n": 2}) },
            ],
        };
        assert_eq!(resp.to_wire(), json!(["first", {"n": 2}]));
    }

    #[test]
    fn from_output_serializes_record() {
        #[derive(Serialize)]
        struct Out {
            version: &'static str,
        }
        let resp = ToolResponse::from_output(&Out { version: "0.1.0" }).unwrap();
        assert_eq!(resp.to_wire(), json!({"version": "0.1.0"}));
    }
}
