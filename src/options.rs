use serde::{Deserialize, Serialize};

use crate::models::{ChatRequest, Message, ResponseFormat};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Generation options for `Client::complete`.
///
/// Every numeric option is optional; an option left as `None` is not sent and
/// the service default applies. Options outside this set cannot be expressed,
/// and unknown keys are rejected when the struct is loaded from configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionOptions {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub presence_penalty: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub temperature: Option<f64>,
    /// Ask for a JSON object instead of free text.
    pub json: bool
}

impl CompletionOptions {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_presence_penalty(mut self, penalty: f64) -> Self {
        self.presence_penalty = Some(penalty);
        self
    }

    pub fn with_frequency_penalty(mut self, penalty: f64) -> Self {
        self.frequency_penalty = Some(penalty);
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }

    pub(crate) fn to_request<'a>(&'a self, messages: &'a [Message]) -> ChatRequest<'a> {

        ChatRequest {
            model: self.model(),
            max_tokens: self.max_tokens,
            presence_penalty: self.presence_penalty,
            frequency_penalty: self.frequency_penalty,
            temperature: self.temperature,
            response_format: self.json.then_some(ResponseFormat::JsonObject),
            messages
        }

    }

}

/// Options for `Client::easy_complete`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EasyOptions {
    /// Sent as a leading system message when present.
    pub system_prompt: Option<String>,
    pub completion: CompletionOptions
}

impl EasyOptions {

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.completion.json = json;
        self
    }

    pub fn with_completion(mut self, completion: CompletionOptions) -> Self {
        self.completion = completion;
        self
    }

    pub(crate) fn transcript(&self, prompt: &str) -> Vec<Message> {

        let mut messages = Vec::with_capacity(2);
        if let Some(system_prompt) = &self.system_prompt {
            messages.push(Message::system(system_prompt.as_str()));
        }
        messages.push(Message::user(prompt));
        messages

    }

}
