//! Model value object representing an LLM model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Language models known to work with tool calling (Value Object)
///
/// Any other identifier served by the backend is carried as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // Local models served by Ollama
    Llama32,
    Llama31,
    Qwen25,
    MistralNemo,
    // Hosted OpenAI models
    Gpt4oMini,
    Gpt41Mini,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Llama32 => "llama3.2",
            Model::Llama31 => "llama3.1",
            Model::Qwen25 => "qwen2.5",
            Model::MistralNemo => "mistral-nemo",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::Custom(s) => s,
        }
    }

    /// Check if this model is normally served by a local Ollama instance
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Model::Llama32 | Model::Llama31 | Model::Qwen25 | Model::MistralNemo
        )
    }
}

impl Default for Model {
    /// Returns the default model (llama3.2)
    fn default() -> Self {
        Model::Llama32
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "llama3.2" => Model::Llama32,
            "llama3.1" => Model::Llama31,
            "qwen2.5" => Model::Qwen25,
            "mistral-nemo" => Model::MistralNemo,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
