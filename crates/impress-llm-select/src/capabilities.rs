//! Image-input capability lookup
//!
//! The same underlying model is named differently by direct vendor APIs,
//! proxies/gateways and cloud marketplaces (prefixes, version suffixes,
//! path-style identifiers). Matching is therefore staged:
//!
//! 1. case-insensitive exact match of the full name
//! 2. case-insensitive match of the last `/`- or `.`-separated segment
//! 3. for path-style names, the segment after the first `/` as a
//!    case-insensitive substring of a known name

use lazy_static::lazy_static;
use serde::Deserialize;
use tracing::trace;

lazy_static! {
    /// Models known to accept image input
    static ref BUILTIN_IMAGE_INPUT_MODELS: ImageInputModels = ImageInputModels::new([
        "gpt-4o",
        "gpt-4.1",
        "gpt-4o-mini",
        "gpt-4-vision-preview",
        "gpt-4-turbo",
        "gpt-4-1106-vision-preview",
        // standard claude names
        "claude-3-5-sonnet-20240620",
        "claude-3-5-sonnet-20241022",
        "claude-3-7-sonnet-20250219",
        "claude-3-opus-20240229",
        "claude-3-sonnet-20240229",
        "claude-3-haiku-20240307",
        // custom claude names
        "claude-3.5-sonnet-v2@20241022",
        "claude-3-7-sonnet@20250219",
        // claude names with AWS Bedrock suffix
        "claude-3-opus-20240229-v1:0",
        "claude-3-sonnet-20240229-v1:0",
        "claude-3-haiku-20240307-v1:0",
        "claude-3-5-sonnet-20240620-v1:0",
        "claude-3-5-sonnet-20241022-v2:0",
        // claude names with full AWS Bedrock names
        "anthropic.claude-3-opus-20240229-v1:0",
        "anthropic.claude-3-sonnet-20240229-v1:0",
        "anthropic.claude-3-haiku-20240307-v1:0",
        "anthropic.claude-3-5-sonnet-20240620-v1:0",
        "anthropic.claude-3-5-sonnet-20241022-v2:0",
        "anthropic.claude-3-7-sonnet-20250219-v1:0",
        "claude-3.7-sonnet@202502019",
        "claude-3-7-sonnet-202502019",
        // google gemini
        "gemini-1.5-pro",
        "gemini-1.5-flash",
        "gemini-1.5-pro-001",
        "gemini-1.5-flash-001",
        "gemini-1.5-pro-002",
        "gemini-1.5-flash-002",
        "gemini-2.0-flash-exp",
        "gemini-2.0-flash-001",
        "gemini-2.0-pro-exp-02-05",
        // amazon
        "amazon.nova-lite@v1",
        "amazon.nova-pro@v1",
        // meta
        "llama-3.2-90b-vision-instruct",
        "llama-3.2-11b-vision-instruct",
        "Llama-3-2-11B-Vision-Instruct-yb",
    ]);
}

/// Check whether a model name is known to support image input
///
/// Uses the built-in model table.
pub fn check_llm_supports_image_input(model: &str) -> bool {
    BUILTIN_IMAGE_INPUT_MODELS.supports_image_input(model)
}

/// The built-in image-input model table
pub fn builtin_image_input_models() -> &'static ImageInputModels {
    &BUILTIN_IMAGE_INPUT_MODELS
}

/// Last segment of a model name split on `/` and `.`
fn last_segment(name: &str) -> &str {
    name.rsplit(['/', '.']).next().unwrap_or(name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct KnownModel {
    name: String,
    lowercase: String,
    last_segment: String,
}

impl KnownModel {
    fn new(name: String) -> Self {
        let lowercase = name.to_lowercase();
        let last_segment = last_segment(&lowercase).to_string();
        Self {
            name,
            lowercase,
            last_segment,
        }
    }
}

/// An immutable table of model names that accept image input
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct ImageInputModels {
    models: Vec<KnownModel>,
}

impl ImageInputModels {
    pub fn new<I, S>(models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            models: models
                .into_iter()
                .map(|m| KnownModel::new(m.into()))
                .collect(),
        }
    }

    /// A copy of this table with additional model names appended
    pub fn extended<I, S>(&self, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut table = self.clone();
        table
            .models
            .extend(models.into_iter().map(|m| KnownModel::new(m.into())));
        table
    }

    /// Model names in table order, as originally written
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.models.iter().map(|m| m.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Check whether a model name matches this table
    pub fn supports_image_input(&self, model: &str) -> bool {
        let lowercase = model.to_lowercase();

        if self.models.iter().any(|m| m.lowercase == lowercase) {
            trace!(model, "image input: exact match");
            return true;
        }

        let last = last_segment(&lowercase);
        if self.models.iter().any(|m| m.last_segment == last) {
            trace!(model, segment = last, "image input: last segment match");
            return true;
        }

        if lowercase.contains('/') {
            // An empty segment is a substring of every name and therefore matches
            let after_slash = lowercase.split('/').nth(1).unwrap_or_default();
            let found = self.models.iter().any(|m| m.lowercase.contains(after_slash));
            if found {
                trace!(model, segment = after_slash, "image input: path segment match");
            }
            return found;
        }

        false
    }
}

impl From<Vec<String>> for ImageInputModels {
    fn from(models: Vec<String>) -> Self {
        Self::new(models)
    }
}
