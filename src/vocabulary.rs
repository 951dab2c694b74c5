//! Class-name vocabulary
//!
//! Checks that a class token is something the utility framework knows about:
//! `variant:variant:...:base`, where every variant is a known modifier and the
//! base fully matches one of the category patterns. A leading `!` (important)
//! and a leading `-` (negative value) on the base are accepted.
//!
//! The built-in vocabulary is embedded from `defaults/vocabulary.yaml`. Its
//! patterns may contain `{name}` placeholders that expand to the `scales`
//! entry of that name, so spacing and color scales are written once.

use crate::config::VocabularyConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

const BUILTIN_YAML: &str = include_str!("../defaults/vocabulary.yaml");

static BUILTIN: Lazy<Vocabulary> =
    Lazy::new(|| Vocabulary::from_yaml(BUILTIN_YAML).expect("built-in vocabulary is valid"));

/// Category reported for classes added through [`Vocabulary::with_extra_classes`].
pub const EXTRA_CATEGORY: &str = "extra";

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("empty class name")]
    Empty,
    #[error("'{token}' has no base class after its variants")]
    MissingBase { token: String },
    #[error("unknown variant '{variant}' in '{token}'")]
    UnknownVariant { variant: String, token: String },
    #[error("unknown class '{class}' in '{token}'")]
    UnknownClass { class: String, token: String },
    #[error("invalid pattern in category '{category}': {source}")]
    InvalidPattern {
        category: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid vocabulary schema: {0}")]
    Schema(#[from] serde_yaml::Error),
}

#[derive(Debug, Deserialize)]
struct Schema {
    #[serde(default)]
    scales: BTreeMap<String, String>,
    variants: BTreeMap<String, Vec<String>>,
    categories: Vec<CategorySchema>,
}

#[derive(Debug, Deserialize)]
struct CategorySchema {
    name: String,
    patterns: Vec<String>,
}

#[derive(Debug, Clone)]
struct Category {
    name: String,
    patterns: Vec<Regex>,
}

/// A successfully validated class token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    pub variants: Vec<String>,
    pub base: String,
    pub category: String,
    pub important: bool,
    pub negative: bool,
}

/// Known variants and class patterns
#[derive(Debug, Clone)]
pub struct Vocabulary {
    variants: BTreeSet<String>,
    categories: Vec<Category>,
    extra_classes: BTreeSet<String>,
}

impl Vocabulary {
    /// The vocabulary embedded in the crate.
    pub fn builtin() -> &'static Vocabulary {
        &BUILTIN
    }

    /// The built-in vocabulary extended with the additions in `config`.
    pub fn from_config(config: &VocabularyConfig) -> Vocabulary {
        Self::builtin()
            .clone()
            .with_extra_variants(config.extra_variants.iter().cloned())
            .with_extra_classes(config.extra_classes.iter().cloned())
    }

    pub fn from_yaml(text: &str) -> Result<Self, VocabularyError> {
        let schema: Schema = serde_yaml::from_str(text)?;

        let variants = schema.variants.into_values().flatten().collect();
        let categories = schema
            .categories
            .into_iter()
            .map(|category| {
                let patterns = category
                    .patterns
                    .iter()
                    .map(|pattern| Regex::new(&expand(pattern, &schema.scales)))
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|source| VocabularyError::InvalidPattern {
                        category: category.name.clone(),
                        source,
                    })?;
                Ok(Category {
                    name: category.name,
                    patterns,
                })
            })
            .collect::<Result<Vec<_>, VocabularyError>>()?;

        Ok(Self {
            variants,
            categories,
            extra_classes: BTreeSet::new(),
        })
    }

    pub fn with_extra_variants<I, S>(mut self, variants: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.variants.extend(variants.into_iter().map(Into::into));
        self
    }

    pub fn with_extra_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_classes
            .extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn has_variant(&self, variant: &str) -> bool {
        self.variants.contains(variant)
    }

    /// Names of the pattern categories, in schema order.
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|category| category.name.as_str())
    }

    /// Category of a bare base class, if any.
    pub fn category_of(&self, base: &str) -> Option<&str> {
        if self.extra_classes.contains(base) {
            return Some(EXTRA_CATEGORY);
        }
        self.categories
            .iter()
            .find(|category| category.patterns.iter().any(|re| re.is_match(base)))
            .map(|category| category.name.as_str())
    }

    /// Validate a single class token.
    pub fn validate(&self, token: &str) -> Result<Validated, VocabularyError> {
        if token.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let mut segments: Vec<&str> = token.split(':').collect();
        let base = segments.pop().unwrap_or_default();
        if base.is_empty() {
            return Err(VocabularyError::MissingBase {
                token: token.to_string(),
            });
        }

        if let Some(unknown) = segments.iter().find(|variant| !self.has_variant(variant)) {
            return Err(VocabularyError::UnknownVariant {
                variant: unknown.to_string(),
                token: token.to_string(),
            });
        }

        let (important, rest) = match base.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, base),
        };
        let (negative, class) = match rest.strip_prefix('-') {
            Some(class) => (true, class),
            None => (false, rest),
        };

        let category = self
            .category_of(class)
            .ok_or_else(|| VocabularyError::UnknownClass {
                class: class.to_string(),
                token: token.to_string(),
            })?;

        tracing::trace!(token, category, "validated class");
        Ok(Validated {
            variants: segments.into_iter().map(str::to_string).collect(),
            base: class.to_string(),
            category: category.to_string(),
            important,
            negative,
        })
    }

    pub fn is_valid(&self, token: &str) -> bool {
        self.validate(token).is_ok()
    }

    /// Validate every whitespace-separated token of `classes`, returning the
    /// failures in order.
    pub fn validate_all(&self, classes: &str) -> Vec<VocabularyError> {
        classes
            .split_whitespace()
            .filter_map(|token| self.validate(token).err())
            .collect()
    }
}

/// Substitute scale placeholders and anchor the pattern.
///
/// Scales may refer to other scales, so substitution repeats until nothing
/// changes or every scale has had a chance to expand.
fn expand(pattern: &str, scales: &BTreeMap<String, String>) -> String {
    let mut out = pattern.to_string();
    for _ in 0..=scales.len() {
        let before = out.clone();
        for (name, alternatives) in scales {
            out = out.replace(&format!("{{{}}}", name), &format!("(?:{})", alternatives));
        }
        if out == before {
            break;
        }
    }
    format!("^(?:{})$", out)
}
