//! `name__provider__modelName` selection tokens
//!
//! Used as in-process UI state, e.g. the value of a model select control.
//! There is no escaping: a field containing the delimiter decodes wrongly
//! with [`destructure_value`]. The strict variants reject such input instead.

use std::str::FromStr;

use crate::error::TokenError;
use crate::types::LlmDescriptor;

/// Field delimiter
pub const TOKEN_DELIMITER: &str = "__";

const TOKEN_FIELDS: usize = 3;

/// Join name, provider and model name into a token
pub fn structure_value(name: &str, provider: &str, model_name: &str) -> String {
    [name, provider, model_name].join(TOKEN_DELIMITER)
}

/// Split a token into its fields positionally
///
/// Missing segments come back absent (`None` name, empty provider or model),
/// extra segments are dropped.
pub fn destructure_value(value: &str) -> LlmDescriptor {
    let mut parts = value.split(TOKEN_DELIMITER);
    let name = parts.next().map(str::to_string);
    let provider = parts.next().unwrap_or_default();
    let model_name = parts.next().unwrap_or_default();
    LlmDescriptor::new(name, provider, model_name)
}

/// Like [`structure_value`] but refuses fields that would not decode back
pub fn try_structure_value(
    name: &str,
    provider: &str,
    model_name: &str,
) -> Result<String, TokenError> {
    for (field, value) in [
        ("name", name),
        ("provider", provider),
        ("model_name", model_name),
    ] {
        if value.contains(TOKEN_DELIMITER) {
            return Err(TokenError::DelimiterInField {
                field,
                value: value.to_string(),
            });
        }
    }
    Ok(structure_value(name, provider, model_name))
}

/// Decode a token that must have exactly three fields
pub fn parse_llm_token(value: &str) -> Result<LlmDescriptor, TokenError> {
    let parts: Vec<&str> = value.split(TOKEN_DELIMITER).collect();
    if parts.len() != TOKEN_FIELDS {
        return Err(TokenError::SegmentCount {
            expected: TOKEN_FIELDS,
            found: parts.len(),
        });
    }
    Ok(LlmDescriptor::new(
        Some(parts[0].to_string()),
        parts[1],
        parts[2],
    ))
}

impl LlmDescriptor {
    /// Encode as a selection token; an absent name encodes as empty
    pub fn to_token(&self) -> String {
        structure_value(
            self.name.as_deref().unwrap_or_default(),
            &self.provider,
            &self.model_name,
        )
    }
}

impl FromStr for LlmDescriptor {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_llm_token(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_value() {
        assert_eq!(
            structure_value("OpenAI", "openai", "gpt-4o"),
            "OpenAI__openai__gpt-4o"
        );
    }

    #[test]
    fn test_destructure_value() {
        let descriptor = destructure_value("Anthropic__anthropic__claude-3-opus-20240229");
        assert_eq!(descriptor.name.as_deref(), Some("Anthropic"));
        assert_eq!(descriptor.provider, "anthropic");
        assert_eq!(descriptor.model_name, "claude-3-opus-20240229");
    }

    #[test]
    fn test_round_trip() {
        let token = structure_value("My Bedrock", "bedrock", "anthropic.claude-3-haiku-20240307-v1:0");
        let descriptor = destructure_value(&token);
        assert_eq!(
            descriptor,
            LlmDescriptor::new(
                Some("My Bedrock".to_string()),
                "bedrock",
                "anthropic.claude-3-haiku-20240307-v1:0"
            )
        );
        assert_eq!(descriptor.to_token(), token);
    }

    #[test]
    fn test_destructure_short_token() {
        let descriptor = destructure_value("OpenAI");
        assert_eq!(descriptor.name.as_deref(), Some("OpenAI"));
        assert_eq!(descriptor.provider, "");
        assert_eq!(descriptor.model_name, "");
    }

    #[test]
    fn test_destructure_drops_extra_segments() {
        let descriptor = destructure_value("a__b__c__d");
        assert_eq!(descriptor.name.as_deref(), Some("a"));
        assert_eq!(descriptor.provider, "b");
        assert_eq!(descriptor.model_name, "c");
    }

    #[test]
    fn test_delimiter_in_field_corrupts_lenient_decode() {
        let token = structure_value("my__provider", "openai", "gpt-4o");
        let descriptor = destructure_value(&token);
        assert_eq!(descriptor.name.as_deref(), Some("my"));
        assert_eq!(descriptor.provider, "provider");
    }

    #[test]
    fn test_try_structure_value_rejects_delimiter() {
        let err = try_structure_value("OpenAI", "open__ai", "gpt-4o").unwrap_err();
        assert_eq!(
            err,
            TokenError::DelimiterInField {
                field: "provider",
                value: "open__ai".to_string()
            }
        );
        assert!(try_structure_value("OpenAI", "openai", "gpt-4o").is_ok());
    }

    #[test]
    fn test_parse_llm_token_segment_count() {
        assert!(matches!(
            parse_llm_token("a__b"),
            Err(TokenError::SegmentCount { expected: 3, found: 2 })
        ));
        assert!(matches!(
            "a__b__c__d".parse::<LlmDescriptor>(),
            Err(TokenError::SegmentCount { expected: 3, found: 4 })
        ));

        let descriptor: LlmDescriptor = "OpenAI__openai__gpt-4o".parse().unwrap();
        assert_eq!(descriptor.provider, "openai");
    }

    #[test]
    fn test_absent_name_encodes_empty() {
        let descriptor = LlmDescriptor::new(None, "openai", "gpt-4o");
        assert_eq!(descriptor.to_token(), "__openai__gpt-4o");
    }
}
