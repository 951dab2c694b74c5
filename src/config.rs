//! Configuration loading
//!
//! Settings come from `defaults/twcn.default.toml`, compiled into the crate,
//! with a project's `twcn.toml` and any `--config` file merged over it. See
//! [`Loader`] for the layering order.

use crate::transform::Strategy;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/twcn.default.toml");

/// Top-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TwConfig {
    pub transform: TransformConfig,
    pub vocabulary: VocabularyConfig,
}

/// Settings for the source transformer and its extension registry.
#[derive(Debug, Clone, Deserialize)]
pub struct TransformConfig {
    pub callees: Vec<String>,
    pub extensions: Vec<String>,
    pub strategy: Strategy,
}

/// Additions to the built-in class-name vocabulary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VocabularyConfig {
    #[serde(default)]
    pub extra_variants: Vec<String>,
    #[serde(default)]
    pub extra_classes: Vec<String>,
}

/// Name of the per-project settings file picked up by [`Loader::with_project_dir`].
pub const PROJECT_FILE: &str = "twcn.toml";

/// Builds a [`TwConfig`] from the embedded defaults plus TOML layers.
///
/// Layers apply in the order they are added; later ones win key by key, and
/// typed settings such as [`Loader::with_strategy`] win over every file.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    pub fn new() -> Self {
        Self {
            builder: Config::builder()
                .add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml)),
        }
    }

    /// Layer a TOML file that must exist.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), true)
    }

    /// Layer a TOML file if it exists.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.layer(path.as_ref(), false)
    }

    /// Layer `twcn.toml` from a project root, when the project has one.
    pub fn with_project_dir(self, dir: impl AsRef<Path>) -> Self {
        let path = dir.as_ref().join(PROJECT_FILE);
        tracing::debug!(path = %path.display(), "looking for project settings");
        self.layer(&path, false)
    }

    /// Force the transform strategy regardless of what the files say.
    pub fn with_strategy(mut self, strategy: Strategy) -> Result<Self, ConfigError> {
        self.builder = self
            .builder
            .set_override("transform.strategy", strategy.to_string())?;
        Ok(self)
    }

    /// Merge every layer and deserialize the result.
    pub fn build(self) -> Result<TwConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn layer(mut self, path: &Path, required: bool) -> Self {
        let source = File::from(path)
            .format(FileFormat::Toml)
            .required(required);
        self.builder = self.builder.add_source(source);
        self
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The embedded defaults with nothing layered on top.
pub fn load_defaults() -> Result<TwConfig, ConfigError> {
    Loader::new().build()
}
