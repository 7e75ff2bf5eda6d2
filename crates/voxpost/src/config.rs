//! Layered configuration for the Voxpost binary.

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};
use voxpost_error::{ConfigError, VoxpostError, VoxpostResult};
use voxpost_models::CompletionConfig;
use voxpost_pipeline::GenerationConfig;

/// Defaults shipped with the crate.
const DEFAULT_CONFIG: &str = include_str!("../../../voxpost.toml");

/// Prefix of environment overrides, e.g. `VOXPOST__GENERATION__MAX_ATTEMPTS=3`.
pub const ENV_PREFIX: &str = "VOXPOST";

/// Complete runtime configuration.
///
/// # Example
///
/// ```toml
/// [completion]
/// base_url = "http://localhost:8080"
/// model = "gpt-4o-mini"
///
/// [generation]
/// max_attempts = 5
/// hashtag_minimum = 12
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters)]
#[serde(default)]
pub struct VoxpostConfig {
    /// Completion service connection
    completion: CompletionConfig,
    /// Retry, sampling and hashtag policy
    generation: GenerationConfig,
}

impl VoxpostConfig {
    /// Create a configuration from its two sections.
    pub fn new(completion: CompletionConfig, generation: GenerationConfig) -> Self {
        Self {
            completion,
            generation,
        }
    }

    /// The bundled defaults alone, with no user files or environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled `voxpost.toml` fails to parse.
    pub fn bundled() -> VoxpostResult<Self> {
        finish(Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml)))
    }

    /// Load configuration from a specific file path, over the bundled defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> VoxpostResult<Self> {
        debug!("Loading configuration from file");
        finish(
            Config::builder()
                .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
                .add_source(File::from(path.as_ref())),
        )
    }

    /// Load configuration with precedence, later sources overriding earlier:
    ///
    /// 1. Bundled defaults (`voxpost.toml` shipped with the crate)
    /// 2. User config directory (`~/.config/voxpost/voxpost.toml`)
    /// 3. Current directory (`./voxpost.toml`)
    /// 4. `explicit`, when given (must exist)
    /// 5. `VOXPOST__SECTION__KEY` environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if any present source fails to parse or the merged
    /// result does not deserialize.
    #[instrument(skip(explicit), fields(explicit = ?explicit.map(Path::display)))]
    pub fn load(explicit: Option<&Path>) -> VoxpostResult<Self> {
        debug!("Loading configuration: env > explicit > current dir > user dir > bundled");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(dir) = dirs::config_dir() {
            let user_config = dir.join("voxpost").join("voxpost.toml");
            builder = builder.add_source(File::from(user_config).required(false));
        }

        builder = builder.add_source(File::with_name("voxpost").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        finish(builder)
    }
}

fn finish(builder: ConfigBuilder<DefaultState>) -> VoxpostResult<VoxpostConfig> {
    let config: VoxpostConfig = builder
        .build()
        .map_err(|e| {
            VoxpostError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            VoxpostError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })?;
    debug!(
        model = %config.completion.model,
        max_attempts = config.generation.max_attempts(),
        "Configuration loaded"
    );
    Ok(config)
}
