//! impress-llm-select CLI
//!
//! Resolve provider/model selections against a TOML catalog.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use impress_llm_select::{
    check_llm_supports_image_input, destructure_value, parse_llm_token, structure_value,
    LlmCatalog, LlmDescriptor, SelectError,
};

#[derive(Parser)]
#[command(name = "impress-llm-select", version, about = "Resolve LLM provider/model selections")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve the active provider and model
    Resolve {
        /// Catalog TOML file
        #[arg(long)]
        catalog: PathBuf,
        /// Persona ID
        #[arg(long)]
        persona: Option<String>,
        /// Current selection token (name__provider__modelName)
        #[arg(long)]
        current: Option<String>,
    },
    /// Show the concrete provider/model for a persona's override
    PersonaOverride {
        #[arg(long)]
        catalog: PathBuf,
        #[arg(long)]
        persona: String,
    },
    /// Check whether a model accepts image input
    SupportsImage {
        model: String,
        /// Use the catalog's image-input table instead of the built-in one
        #[arg(long)]
        catalog: Option<PathBuf>,
    },
    /// Find the provider type serving a model
    ProviderFor {
        model: String,
        #[arg(long)]
        catalog: PathBuf,
    },
    /// Encode a selection token
    Encode {
        name: String,
        provider: String,
        model: String,
    },
    /// Decode a selection token
    Decode {
        token: String,
        /// Require exactly three fields
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Resolve {
            catalog,
            persona,
            current,
        } => {
            let catalog = load_catalog(&catalog)?;
            let current = current.as_deref().map(destructure_value);
            let resolved = catalog.resolve(persona.as_deref(), current.as_ref());
            println!("{}", serde_json::to_string_pretty(&resolved)?);
        }
        Command::PersonaOverride { catalog, persona } => {
            let catalog = load_catalog(&catalog)?;
            if catalog.persona_by_str(&persona).is_none() {
                return Err(SelectError::NotFound(format!("persona {persona}")).into());
            }
            let descriptor: Option<LlmDescriptor> = catalog.persona_override(&persona);
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
        Command::SupportsImage { model, catalog } => {
            let supported = match catalog {
                Some(path) => load_catalog(&path)?.supports_image_input(&model),
                None => check_llm_supports_image_input(&model),
            };
            println!("{supported}");
        }
        Command::ProviderFor { model, catalog } => {
            println!("{}", load_catalog(&catalog)?.provider_for_model(&model));
        }
        Command::Encode {
            name,
            provider,
            model,
        } => {
            println!("{}", structure_value(&name, &provider, &model));
        }
        Command::Decode { token, strict } => {
            let descriptor = if strict {
                parse_llm_token(&token).map_err(SelectError::from)?
            } else {
                destructure_value(&token)
            };
            println!("{}", serde_json::to_string_pretty(&descriptor)?);
        }
    }
    Ok(())
}

fn load_catalog(path: &Path) -> Result<LlmCatalog, SelectError> {
    Ok(LlmCatalog::load(path)?)
}
