use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One turn of a conversation transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String
}

impl Message {

    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Message {
            role: role.into(),
            content: content.into()
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }

}

/// Structured output directive, serialized as `{"type": "json_object"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    JsonObject
}

/// Body of a `chat/completions` request. Absent options are never sent.
#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presence_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_format: Option<ResponseFormat>,
    pub messages: &'a [Message]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub index: u32,
    pub message: Message,
    #[serde(default)]
    pub logprobs: Option<Value>,
    #[serde(default)]
    pub finish_reason: Option<String>
}

impl Choice {

    /// Parses the message content as JSON. `None` if it is not valid JSON
    /// or is the literal `null`.
    pub fn json(&self) -> Option<Value> {
        serde_json::from_str(&self.message.content)
            .ok()
            .filter(|value: &Value| !value.is_null())
    }

}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64
}

/// Decoded response envelope of one completion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub id: String,
    pub object: String,
    pub choices: Vec<Choice>,
    #[serde(with = "created_timestamp")]
    pub created: DateTime<Utc>,
    pub model: String,
    pub system_fingerprint: String,
    pub usage: Usage
}

impl Answer {

    /// The first ranked choice, if the service returned any.
    pub fn primary(&self) -> Option<&Choice> {
        self.choices.first()
    }

    pub fn content(&self) -> Option<&str> {
        self.primary().map(|choice| choice.message.content.as_str())
    }

}

/// Result of `Client::easy_complete`. The variant follows the `json` flag of the request.
#[derive(Debug, Clone, PartialEq)]
pub enum EasyAnswer {
    Text(String),
    Structured(Value)
}

impl EasyAnswer {

    pub fn as_text(&self) -> Option<&str> {
        match self {
            EasyAnswer::Text(text) => Some(text),
            EasyAnswer::Structured(_) => None
        }
    }

    pub fn as_structured(&self) -> Option<&Value> {
        match self {
            EasyAnswer::Structured(value) => Some(value),
            EasyAnswer::Text(_) => None
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            EasyAnswer::Text(text) => Some(text),
            EasyAnswer::Structured(_) => None
        }
    }

    pub fn into_structured(self) -> Option<Value> {
        match self {
            EasyAnswer::Structured(value) => Some(value),
            EasyAnswer::Text(_) => None
        }
    }

}

// `created` arrives as unix seconds (integer, float or numeric string);
// RFC 3339 strings are accepted as well.
mod created_timestamp {

    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Seconds(i64),
        Float(f64),
        Text(String)
    }

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(value.timestamp())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {

        match Raw::deserialize(deserializer)? {
            Raw::Seconds(seconds) => from_seconds(seconds),
            Raw::Float(seconds) => from_float_seconds(seconds),
            Raw::Text(text) => {
                let text = text.trim();
                if let Ok(seconds) = text.parse::<i64>() {
                    return from_seconds(seconds);
                }
                if let Ok(seconds) = text.parse::<f64>() {
                    return from_float_seconds(seconds);
                }
                DateTime::parse_from_rfc3339(text)
                    .map(|parsed| parsed.with_timezone(&Utc))
                    .map_err(D::Error::custom)
            }
        }

    }

    fn from_seconds<E: serde::de::Error>(seconds: i64) -> Result<DateTime<Utc>, E> {
        DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| E::custom(format!("timestamp out of range: {}", seconds)))
    }

    fn from_float_seconds<E: serde::de::Error>(seconds: f64) -> Result<DateTime<Utc>, E> {

        let out_of_range = || E::custom(format!("timestamp out of range: {}", seconds));

        if !seconds.is_finite() || seconds.abs() > i64::MAX as f64 {
            return Err(out_of_range());
        }

        let whole = seconds.floor();
        let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);

        DateTime::from_timestamp(whole as i64, nanos).ok_or_else(out_of_range)

    }

}
