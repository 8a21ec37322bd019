//! LLM catalog loaded from TOML
//!
//! Bundles the configured providers, assistant personas and the image-input
//! model table so callers can resolve selections without assembling the
//! lists themselves. File layout:
//!
//! ```toml
//! [[providers]]
//! id = 1
//! name = "OpenAI"
//! provider = "openai"
//! model_names = ["gpt-4o", "gpt-4o-mini"]
//! default_model_name = "gpt-4o"
//! is_default_provider = true
//!
//! [[personas]]
//! id = "vision"
//! name = "Vision Helper"
//! llm_model_provider_override = "OpenAI"
//! llm_model_version_override = "gpt-4o-mini"
//!
//! [image_input]
//! mode = "extend"
//! models = ["my-vision-model"]
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::capabilities::{builtin_image_input_models, ImageInputModels};
use crate::error::CatalogLoadError;
use crate::resolve::{
    find_provider_for_model, get_final_llm, get_llm_provider_override_for_persona,
};
use crate::types::{LlmDescriptor, Persona, PersonaId, ProviderDescriptor, ResolvedLlm};

/// How a catalog's image-input list combines with the built-in table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageInputMode {
    /// Append to the built-in table
    #[default]
    Extend,
    /// Use only the catalog's list
    Replace,
}

/// TOML representation of the image-input section
#[derive(Debug, Deserialize, Default)]
struct TomlImageInput {
    #[serde(default)]
    mode: ImageInputMode,
    #[serde(default)]
    models: ImageInputModels,
}

/// Full TOML catalog document
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    providers: Vec<ProviderDescriptor>,
    #[serde(default)]
    personas: Vec<Persona>,
    #[serde(default)]
    image_input: Option<TomlImageInput>,
}

/// Providers, personas and image-input table for one deployment
#[derive(Debug, Clone)]
pub struct LlmCatalog {
    providers: Vec<ProviderDescriptor>,
    personas: Vec<Persona>,
    image_input: ImageInputModels,
}

impl Default for LlmCatalog {
    fn default() -> Self {
        Self {
            providers: Vec::new(),
            personas: Vec::new(),
            image_input: builtin_image_input_models().clone(),
        }
    }
}

impl LlmCatalog {
    /// Create a catalog using the built-in image-input table
    pub fn new(providers: Vec<ProviderDescriptor>, personas: Vec<Persona>) -> Self {
        Self {
            providers,
            personas,
            ..Default::default()
        }
    }

    /// Builder: replace the image-input table
    pub fn with_image_input(mut self, table: ImageInputModels) -> Self {
        self.image_input = table;
        self
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        debug!(
            path = %path.display(),
            providers = catalog.providers.len(),
            personas = catalog.personas.len(),
            "loaded llm catalog"
        );
        Ok(catalog)
    }

    /// Parse and validate a catalog from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogLoadError> {
        let toml: TomlCatalog = toml::from_str(content)?;

        validate_providers(&toml.providers)?;
        validate_personas(&toml.personas, &toml.providers)?;

        let image_input = match toml.image_input {
            Some(TomlImageInput {
                mode: ImageInputMode::Replace,
                models,
            }) => models,
            Some(TomlImageInput {
                mode: ImageInputMode::Extend,
                models,
            }) => builtin_image_input_models().extended(models.names()),
            None => builtin_image_input_models().clone(),
        };

        Ok(Self {
            providers: toml.providers,
            personas: toml.personas,
            image_input,
        })
    }

    pub fn providers(&self) -> &[ProviderDescriptor] {
        &self.providers
    }

    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn image_input(&self) -> &ImageInputModels {
        &self.image_input
    }

    /// The provider flagged as default, if any
    pub fn default_provider(&self) -> Option<&ProviderDescriptor> {
        self.providers.iter().find(|p| p.is_default_provider)
    }

    /// Get a persona by ID
    pub fn persona(&self, id: &PersonaId) -> Option<&Persona> {
        self.personas.iter().find(|p| &p.id == id)
    }

    /// Get a persona by string ID
    pub fn persona_by_str(&self, id: &str) -> Option<&Persona> {
        self.personas.iter().find(|p| p.id.as_str() == id)
    }

    /// Resolve provider and model for an optional persona and current selection
    ///
    /// An unknown persona ID resolves as if no persona were given.
    pub fn resolve(&self, persona_id: Option<&str>, current: Option<&LlmDescriptor>) -> ResolvedLlm {
        let persona = persona_id.and_then(|id| {
            let persona = self.persona_by_str(id);
            if persona.is_none() {
                warn!(persona = id, "unknown persona, resolving without it");
            }
            persona
        });
        get_final_llm(&self.providers, persona, current)
    }

    /// Concrete provider/model for a persona's stored override
    pub fn persona_override(&self, persona_id: &str) -> Option<LlmDescriptor> {
        self.persona_by_str(persona_id)
            .and_then(|p| get_llm_provider_override_for_persona(p, &self.providers))
    }

    /// Vendor type serving `model_name`, or an empty string
    pub fn provider_for_model(&self, model_name: &str) -> String {
        find_provider_for_model(&self.providers, model_name)
    }

    /// Check the catalog's image-input table
    pub fn supports_image_input(&self, model: &str) -> bool {
        self.image_input.supports_image_input(model)
    }
}

fn validate_providers(providers: &[ProviderDescriptor]) -> Result<(), CatalogLoadError> {
    let mut seen = HashSet::new();
    for provider in providers {
        if !seen.insert(provider.name.as_str()) {
            return Err(CatalogLoadError::DuplicateProvider(provider.name.clone()));
        }
    }

    let defaults = providers.iter().filter(|p| p.is_default_provider).count();
    if defaults > 1 {
        warn!(
            count = defaults,
            "multiple default providers configured, the first one wins"
        );
    }

    Ok(())
}

fn validate_personas(
    personas: &[Persona],
    providers: &[ProviderDescriptor],
) -> Result<(), CatalogLoadError> {
    for persona in personas {
        if let Some(name) = persona.provider_override() {
            if !providers.iter().any(|p| p.name == name) {
                return Err(CatalogLoadError::UnknownPersonaProvider {
                    persona: persona.id.to_string(),
                    provider: name.to_string(),
                });
            }
        }
    }
    Ok(())
}
