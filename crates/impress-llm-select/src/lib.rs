//! Impress LLM Select - provider/model resolution for impress assistants
//!
//! This crate decides which language-model provider and model are active for
//! a conversation, given the configured providers, an optional persona
//! (assistant preset) and an optional explicit user selection.
//!
//! # Resolution Order
//!
//! 1. The default provider (`is_default_provider`) and its default model
//! 2. The persona's provider/model overrides
//! 3. The fields of the user's explicit selection
//!
//! # Other Helpers
//!
//! - `check_llm_supports_image_input`: staged lookup in a table of models
//!   known to accept image input
//! - `structure_value`/`destructure_value`: `name__provider__modelName`
//!   tokens for UI state
//! - `LlmCatalog`: providers, personas and the image-input table loaded from TOML
//!
//! # Features
//!
//! - `uniffi`: Enable FFI bindings for Swift/Kotlin (required for iOS/macOS)
//! - `native`: Full native build with UniFFI
//! - `cli`: The `impress-llm-select` command-line tool
//!
//! All functions are synchronous and free of shared mutable state.

pub mod capabilities;
pub mod catalog;
pub mod error;
pub mod resolve;
pub mod token;
pub mod types;

pub use capabilities::{
    builtin_image_input_models, check_llm_supports_image_input, ImageInputModels,
};
pub use catalog::{ImageInputMode, LlmCatalog};
pub use error::{CatalogLoadError, Result, SelectError, TokenError};
pub use resolve::{
    find_provider_for_model, get_final_llm, get_llm_provider_override_for_persona,
    provider_for_model,
};
pub use token::{
    destructure_value, parse_llm_token, structure_value, try_structure_value, TOKEN_DELIMITER,
};
pub use types::{LlmDescriptor, Persona, PersonaId, ProviderDescriptor, ResolvedLlm};

// Setup UniFFI when the feature is enabled
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

// ============================================================================
// UniFFI Exports - Resolution
// ============================================================================

/// Resolve the provider type and model name for a conversation
#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn resolve_final_llm(
    providers: Vec<ProviderDescriptor>,
    persona: Option<Persona>,
    current: Option<LlmDescriptor>,
) -> ResolvedLlm {
    get_final_llm(&providers, persona.as_ref(), current.as_ref())
}

/// Concrete provider/model for a persona's stored override
#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn persona_llm_override(
    persona: Persona,
    providers: Vec<ProviderDescriptor>,
) -> Option<LlmDescriptor> {
    get_llm_provider_override_for_persona(&persona, &providers)
}

/// Vendor type of the first provider serving a model, or an empty string
#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn provider_type_for_model(providers: Vec<ProviderDescriptor>, model_name: String) -> String {
    find_provider_for_model(&providers, &model_name)
}

/// Check the built-in image-input table
#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn supports_image_input(model: String) -> bool {
    check_llm_supports_image_input(&model)
}

// ============================================================================
// UniFFI Exports - Tokens
// ============================================================================

/// Encode a selection token
#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn encode_llm_token(name: String, provider: String, model_name: String) -> String {
    structure_value(&name, &provider, &model_name)
}

/// Decode a selection token leniently
#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn decode_llm_token(value: String) -> LlmDescriptor {
    destructure_value(&value)
}

/// Decode a selection token, failing unless it has exactly three fields
#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn decode_llm_token_strict(value: String) -> Result<LlmDescriptor> {
    Ok(parse_llm_token(&value)?)
}

/// Get the version of the impress-llm-select crate
#[cfg(feature = "uniffi")]
#[uniffi::export]
pub fn get_impress_llm_select_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// ============================================================================
// Tests
// ============================================================================
