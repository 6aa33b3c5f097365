//! Common types for oracle interactions
//!
//! The extraction pipeline only exchanges text, so requests and responses
//! carry plain strings rather than multi-modal content blocks.

/// Completion request
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// System instruction, sent out-of-band from the message list
    pub system: Option<String>,
    pub messages: Vec<LlmMessage>,
    pub max_tokens: Option<u32>,
    /// Low values suit structured extraction; None uses the provider default
    pub temperature: Option<f32>,
}

impl LlmRequest {
    /// Request consisting of a single user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            system: None,
            messages: vec![LlmMessage {
                role: MessageRole::User,
                text: text.into(),
            }],
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Message in conversation
#[derive(Debug, Clone)]
pub struct LlmMessage {
    pub role: MessageRole,
    pub text: String,
}

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    User,
    Assistant,
}

/// Completion response
#[derive(Debug, Clone)]
pub struct LlmResponse {
    /// Concatenated text of the response
    pub text: String,
    pub usage: Usage,
}

impl LlmResponse {
    /// Response with the given text and zero usage, for stubs and tests
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            usage: Usage::default(),
        }
    }
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}
