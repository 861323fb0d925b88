use serde::Serialize;

use crate::schema::SummaryDetails;

pub const SYSTEM_PROMPT: &str =
    "You are an AI that generates JSON and only JSON according to the instructions provided to you.";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// JSON schema of `SummaryDetails` without the `$schema`/`title` noise
pub fn summary_schema() -> serde_json::Value {
    let mut schema = serde_json::Value::from(schemars::schema_for!(SummaryDetails));
    if let Some(obj) = schema.as_object_mut() {
        obj.remove("$schema");
        obj.remove("title");
    }
    schema
}

/// Instructions telling the model which JSON shape to produce
pub fn format_instructions() -> String {
    format!(
        r#"The output should be formatted as a JSON instance that conforms to the JSON schema below.

As an example, for the schema {{"properties": {{"foo": {{"title": "Foo", "description": "a list of strings", "type": "array", "items": {{"type": "string"}}}}}}, "required": ["foo"]}}
the object {{"foo": ["bar", "baz"]}} is a well-formatted instance of the schema. The object {{"properties": {{"foo": ["bar", "baz"]}}}} is not well-formatted.

Here is the output schema:
```
{}
```"#,
        summary_schema()
    )
}

pub fn build_summary_messages(input: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(format!(
            "Generate JSON about the user input according to the provided format instructions.\nInput: {}\nFormat instructions {}",
            input,
            format_instructions()
        )),
    ]
}
