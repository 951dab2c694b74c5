//! # tw-classnames
//!
//! Utility-class string assembly and purge-friendly source rewriting.
//!
//! - [`assembler`] builds a class string from plain names, falsy values and
//!   modifier maps (`{ "md:hover": ["p-4", "m-2"] }` becomes
//!   `md:hover:p-4 md:hover:m-2`).
//! - [`transform`] rewrites `classnames(...)` calls in source text so that the
//!   same prefixed names appear as string literals a purge tool can find.
//! - [`extract`] is the naive literal scan such tools perform.
//! - [`vocabulary`] checks class names against a known set of variants and
//!   class patterns.
//! - [`hooks`] maps file extensions to content transforms for build tools.
//! - [`config`] loads the layered configuration shared by all of the above.

pub mod assembler;
pub mod config;
pub mod extract;
pub mod hooks;
pub mod transform;
pub mod vocabulary;

pub use assembler::{assemble, tokens, ClassEntry, ClassInput, MapValue, ModifierMap};
pub use transform::{transform, Strategy, Transformer};
pub use vocabulary::{Validated, Vocabulary, VocabularyError};
