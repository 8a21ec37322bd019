//! Provider/model resolution
//!
//! Layers the active provider and model for a conversation:
//! default provider < persona override < explicit user selection.

use tracing::{debug, trace};

use crate::types::{LlmDescriptor, Persona, ProviderDescriptor, ResolvedLlm};

/// Resolve the provider type and model name for a conversation
///
/// Precedence, lowest to highest:
/// 1. the provider flagged `is_default_provider` and its default model
/// 2. the persona's provider override (matched by display name) and model override
/// 3. the non-empty fields of the current explicit selection
///
/// Unresolved fields are returned as empty strings.
pub fn get_final_llm(
    providers: &[ProviderDescriptor],
    persona: Option<&Persona>,
    current: Option<&LlmDescriptor>,
) -> ResolvedLlm {
    let default_provider = providers.iter().find(|p| p.is_default_provider);

    let mut provider = default_provider
        .map(|p| p.provider.clone())
        .unwrap_or_default();
    let mut model = default_provider
        .map(|p| p.default_model_name.clone())
        .unwrap_or_default();

    trace!(provider = %provider, model = %model, "seeded from default provider");

    if let Some(persona) = persona {
        if let Some(override_name) = persona.provider_override() {
            match providers.iter().find(|p| p.name == override_name) {
                Some(underlying) if !underlying.provider.is_empty() => {
                    provider = underlying.provider.clone();
                }
                Some(_) => {}
                None => debug!(
                    persona = %persona.id,
                    provider = override_name,
                    "persona provider override matches no configured provider"
                ),
            }
        }
        // The model override applies even when the provider override did not match
        if let Some(override_model) = persona.model_override() {
            model = override_model.to_string();
        }
    }

    if let Some(current) = current {
        if !current.provider.is_empty() {
            provider = current.provider.clone();
        }
        if !current.model_name.is_empty() {
            model = current.model_name.clone();
        }
    }

    debug!(provider = %provider, model = %model, "resolved final llm");
    ResolvedLlm { provider, model }
}

/// Map a persona's stored override to a concrete provider/model
///
/// Returns `None` when the persona has no model override, or when no provider
/// both matches the provider override (if one is set) and serves the model.
/// The first match in input order wins.
pub fn get_llm_provider_override_for_persona(
    persona: &Persona,
    providers: &[ProviderDescriptor],
) -> Option<LlmDescriptor> {
    let override_model = persona.model_override()?;
    let override_provider = persona.provider_override();

    let matching = providers.iter().find(|p| {
        override_provider.map_or(true, |name| p.name == name) && p.serves(override_model)
    });

    if matching.is_none() {
        debug!(
            persona = %persona.id,
            model = override_model,
            "no provider serves persona model override"
        );
    }

    matching.map(|p| LlmDescriptor::for_provider(p, override_model))
}

/// Vendor type of the first provider serving `model_name`, or an empty string
pub fn find_provider_for_model(providers: &[ProviderDescriptor], model_name: &str) -> String {
    providers
        .iter()
        .find(|p| p.serves(model_name))
        .map(|p| p.provider.clone())
        .unwrap_or_default()
}

/// Like [`find_provider_for_model`] but returns `None` instead of an empty string
pub fn provider_for_model<'a>(
    providers: &'a [ProviderDescriptor],
    model_name: &str,
) -> Option<&'a ProviderDescriptor> {
    providers.iter().find(|p| p.serves(model_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn providers() -> Vec<ProviderDescriptor> {
        vec![
            ProviderDescriptor::new(1, "OpenAI", "openai", "gpt-4o")
                .with_models(["gpt-4o", "gpt-4o-mini", "gpt-4.1"])
                .as_default(),
            ProviderDescriptor::new(2, "Anthropic", "anthropic", "claude-3-5-sonnet-20241022")
                .with_models(["claude-3-5-sonnet-20241022", "claude-3-opus-20240229"]),
            ProviderDescriptor::new(3, "Bedrock", "bedrock", "claude-3-opus-20240229")
                .with_models(["claude-3-opus-20240229"]),
        ]
    }

    #[test]
    fn test_default_provider_only() {
        let resolved = get_final_llm(&providers(), None, None);
        assert_eq!(resolved, ResolvedLlm::new("openai", "gpt-4o"));
    }

    #[test]
    fn test_no_default_provider() {
        let providers: Vec<_> = providers()
            .into_iter()
            .map(|mut p| {
                p.is_default_provider = false;
                p
            })
            .collect();

        let resolved = get_final_llm(&providers, None, None);
        assert_eq!(resolved.into_pair(), (String::new(), String::new()));
    }

    #[test]
    fn test_persona_overrides_provider_and_model() {
        let persona = Persona::new("writer", "Writer")
            .with_provider_override("Anthropic")
            .with_model_override("claude-3-opus-20240229");

        let resolved = get_final_llm(&providers(), Some(&persona), None);
        assert_eq!(
            resolved,
            ResolvedLlm::new("anthropic", "claude-3-opus-20240229")
        );
    }

    #[test]
    fn test_persona_model_override_without_matching_provider() {
        let persona = Persona::new("writer", "Writer")
            .with_provider_override("Nonexistent")
            .with_model_override("some-model");

        let resolved = get_final_llm(&providers(), Some(&persona), None);
        assert_eq!(resolved, ResolvedLlm::new("openai", "some-model"));
    }

    #[test]
    fn test_persona_provider_override_with_empty_vendor_keeps_previous() {
        let mut providers = providers();
        providers.push(ProviderDescriptor::new(4, "Custom", "", "local-model"));
        let persona = Persona::new("writer", "Writer").with_provider_override("Custom");

        let resolved = get_final_llm(&providers, Some(&persona), None);
        assert_eq!(resolved, ResolvedLlm::new("openai", "gpt-4o"));
    }

    #[test]
    fn test_persona_without_overrides_keeps_default() {
        let persona = Persona::new("plain", "Plain");
        let resolved = get_final_llm(&providers(), Some(&persona), None);
        assert_eq!(resolved, ResolvedLlm::new("openai", "gpt-4o"));
    }

    #[test]
    fn test_current_selection_wins() {
        let persona = Persona::new("writer", "Writer")
            .with_provider_override("Anthropic")
            .with_model_override("claude-3-opus-20240229");
        let current = LlmDescriptor::new(None, "bedrock", "claude-3-opus-20240229");

        let resolved = get_final_llm(&providers(), Some(&persona), Some(&current));
        assert_eq!(
            resolved,
            ResolvedLlm::new("bedrock", "claude-3-opus-20240229")
        );
    }

    #[test]
    fn test_current_selection_empty_fields_fall_through() {
        let current = LlmDescriptor::new(None, "", "gpt-4o-mini");
        let resolved = get_final_llm(&providers(), None, Some(&current));
        assert_eq!(resolved, ResolvedLlm::new("openai", "gpt-4o-mini"));
    }

    #[test]
    fn test_override_for_persona_without_model_override() {
        let persona = Persona::new("writer", "Writer").with_provider_override("Anthropic");
        assert!(get_llm_provider_override_for_persona(&persona, &providers()).is_none());
    }

    #[test]
    fn test_override_for_persona_matches_named_provider() {
        let persona = Persona::new("writer", "Writer")
            .with_provider_override("Bedrock")
            .with_model_override("claude-3-opus-20240229");

        let descriptor = get_llm_provider_override_for_persona(&persona, &providers()).unwrap();
        assert_eq!(descriptor.name.as_deref(), Some("Bedrock"));
        assert_eq!(descriptor.provider, "bedrock");
        assert_eq!(descriptor.model_name, "claude-3-opus-20240229");
    }

    #[test]
    fn test_override_for_persona_first_match_without_provider_override() {
        let persona = Persona::new("writer", "Writer").with_model_override("claude-3-opus-20240229");

        let descriptor = get_llm_provider_override_for_persona(&persona, &providers()).unwrap();
        assert_eq!(descriptor.name.as_deref(), Some("Anthropic"));
        assert_eq!(descriptor.provider, "anthropic");
    }

    #[test]
    fn test_override_for_persona_provider_does_not_serve_model() {
        let persona = Persona::new("writer", "Writer")
            .with_provider_override("OpenAI")
            .with_model_override("claude-3-opus-20240229");

        assert!(get_llm_provider_override_for_persona(&persona, &providers()).is_none());
    }

    #[test]
    fn test_find_provider_for_model() {
        let providers = providers();
        assert_eq!(find_provider_for_model(&providers, "gpt-4.1"), "openai");
        assert_eq!(
            find_provider_for_model(&providers, "claude-3-opus-20240229"),
            "anthropic"
        );
        assert_eq!(find_provider_for_model(&providers, "GPT-4.1"), "");
        assert_eq!(find_provider_for_model(&providers, "unknown"), "");
        assert!(provider_for_model(&providers, "unknown").is_none());
    }
}
