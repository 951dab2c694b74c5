//! Content-transform registry
//!
//! Build tools hand source files to a transform chosen by file extension.
//! This registry maps extensions to [`ContentTransform`]s and applies them to
//! the full text of a file. It does no file I/O itself.
//!
//! ```ignore
//! let config = load_defaults()?;
//! let registry = ContentTransformers::from_config(&config.transform);
//! let output = registry.apply_to_path("src/App.tsx", &content);
//! ```

use crate::config::TransformConfig;
use crate::transform::Transformer;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Synchronous text-to-text transform
pub trait ContentTransform: Send + Sync {
    fn transform(&self, content: &str) -> String;
}

impl ContentTransform for Transformer {
    fn transform(&self, content: &str) -> String {
        Transformer::transform(self, content)
    }
}

impl<F> ContentTransform for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn transform(&self, content: &str) -> String {
        self(content)
    }
}

/// Registry of content transforms keyed by file extension
///
/// Extensions are stored without the leading dot and compared
/// case-insensitively.
#[derive(Default, Clone)]
pub struct ContentTransformers {
    transforms: BTreeMap<String, Arc<dyn ContentTransform>>,
}

impl ContentTransformers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that runs one transformer, built from `config`, for every
    /// configured extension.
    pub fn from_config(config: &TransformConfig) -> Self {
        let transformer =
            Transformer::new(config.callees.iter().cloned()).with_strategy(config.strategy);
        let mut registry = Self::new();
        registry.register_shared(&config.extensions, Arc::new(transformer));
        registry
    }

    /// Register `transform` for `extension`, replacing any previous entry.
    pub fn register<T: ContentTransform + 'static>(&mut self, extension: &str, transform: T) {
        self.transforms
            .insert(normalize(extension), Arc::new(transform));
    }

    /// Register one shared transform for several extensions.
    pub fn register_shared<S: AsRef<str>>(
        &mut self,
        extensions: &[S],
        transform: Arc<dyn ContentTransform>,
    ) {
        for extension in extensions {
            self.transforms
                .insert(normalize(extension.as_ref()), Arc::clone(&transform));
        }
    }

    pub fn has(&self, extension: &str) -> bool {
        self.transforms.contains_key(&normalize(extension))
    }

    /// Registered extensions, sorted
    pub fn extensions(&self) -> Vec<String> {
        self.transforms.keys().cloned().collect()
    }

    pub fn for_extension(&self, extension: &str) -> Option<&dyn ContentTransform> {
        let found = self.transforms.get(&normalize(extension));
        tracing::trace!(extension, found = found.is_some(), "content transform lookup");
        found.map(|transform| transform.as_ref())
    }

    pub fn for_path(&self, path: impl AsRef<Path>) -> Option<&dyn ContentTransform> {
        let extension = path.as_ref().extension()?.to_str()?;
        self.for_extension(extension)
    }

    /// Transform `content` with the transform registered for `extension`.
    ///
    /// Returns `None` when nothing is registered for it.
    pub fn apply(&self, extension: &str, content: &str) -> Option<String> {
        self.for_extension(extension)
            .map(|transform| transform.transform(content))
    }

    /// Like [`apply`](Self::apply), keyed by the extension of `path`.
    pub fn apply_to_path(&self, path: impl AsRef<Path>, content: &str) -> Option<String> {
        self.for_path(path)
            .map(|transform| transform.transform(content))
    }
}

impl std::fmt::Debug for ContentTransformers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentTransformers")
            .field("extensions", &self.extensions())
            .finish()
    }
}

fn normalize(extension: &str) -> String {
    extension.trim_start_matches('.').to_ascii_lowercase()
}
