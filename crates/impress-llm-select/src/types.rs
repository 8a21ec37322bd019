//! Type definitions for provider/model selection
//!
//! These types are plain values handed in by the surrounding application and
//! map cleanly across the Rust-Swift boundary when the `uniffi` feature is on.

use serde::{Deserialize, Serialize};

/// A configured model-serving backend
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Internal identifier
    pub id: i64,
    /// Display name (unique among providers)
    pub name: String,
    /// Vendor type (e.g., "openai", "anthropic")
    pub provider: String,
    /// Models served by this provider, in display order
    #[serde(default)]
    pub model_names: Vec<String>,
    /// Model used when nothing more specific is selected
    #[serde(default)]
    pub default_model_name: String,
    /// Whether this is the system default provider
    #[serde(default)]
    pub is_default_provider: bool,
}

impl ProviderDescriptor {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        provider: impl Into<String>,
        default_model_name: impl Into<String>,
    ) -> Self {
        let default_model_name = default_model_name.into();
        Self {
            id,
            name: name.into(),
            provider: provider.into(),
            model_names: vec![default_model_name.clone()],
            default_model_name,
            is_default_provider: false,
        }
    }

    /// Builder: set the served models
    pub fn with_models<I, S>(mut self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.model_names = models.into_iter().map(Into::into).collect();
        self
    }

    /// Builder: flag as the default provider
    pub fn as_default(mut self) -> Self {
        self.is_default_provider = true;
        self
    }

    /// Check if this provider serves a model (exact match)
    pub fn serves(&self, model_name: &str) -> bool {
        self.model_names.iter().any(|m| m == model_name)
    }
}

/// Unique identifier for a persona
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonaId(pub String);

#[cfg(feature = "uniffi")]
uniffi::custom_newtype!(PersonaId, String);

impl PersonaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PersonaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PersonaId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PersonaId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// An assistant preset that may pin a provider and/or model
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Unique identifier
    pub id: PersonaId,
    /// Human-readable display name
    pub name: String,
    /// Short description of the assistant
    #[serde(default)]
    pub description: String,
    /// Display name of the provider to pin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_model_provider_override: Option<String>,
    /// Model name to pin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub llm_model_version_override: Option<String>,
}

impl Persona {
    /// Create a persona without any model overrides
    pub fn new(id: impl Into<PersonaId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            llm_model_provider_override: None,
            llm_model_version_override: None,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builder: pin a provider by display name
    pub fn with_provider_override(mut self, provider_name: impl Into<String>) -> Self {
        self.llm_model_provider_override = Some(provider_name.into());
        self
    }

    /// Builder: pin a model name
    pub fn with_model_override(mut self, model_name: impl Into<String>) -> Self {
        self.llm_model_version_override = Some(model_name.into());
        self
    }

    /// Provider override, treating an empty string as unset
    pub fn provider_override(&self) -> Option<&str> {
        non_empty(self.llm_model_provider_override.as_deref())
    }

    /// Model override, treating an empty string as unset
    pub fn model_override(&self) -> Option<&str> {
        non_empty(self.llm_model_version_override.as_deref())
    }
}

/// A resolved (display name, provider type, model name) selection
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlmDescriptor {
    /// Display name of the provider, absent when not tied to a named provider
    #[serde(default)]
    pub name: Option<String>,
    /// Vendor type
    #[serde(default)]
    pub provider: String,
    /// Model name
    #[serde(default, rename = "modelName")]
    pub model_name: String,
}

impl LlmDescriptor {
    pub fn new(
        name: Option<String>,
        provider: impl Into<String>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            name,
            provider: provider.into(),
            model_name: model_name.into(),
        }
    }

    /// Descriptor for a model served by a named provider
    pub fn for_provider(provider: &ProviderDescriptor, model_name: impl Into<String>) -> Self {
        Self::new(
            Some(provider.name.clone()),
            provider.provider.clone(),
            model_name,
        )
    }
}

/// Provider type and model name chosen for a conversation
///
/// An empty string in either field means nothing resolved at any precedence level.
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedLlm {
    pub provider: String,
    pub model: String,
}

impl ResolvedLlm {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
        }
    }

    /// Whether both provider and model resolved to something
    pub fn is_complete(&self) -> bool {
        !self.provider.is_empty() && !self.model.is_empty()
    }

    pub fn into_pair(self) -> (String, String) {
        (self.provider, self.model)
    }
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
