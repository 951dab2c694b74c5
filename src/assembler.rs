//! Class assembler
//!
//! Turns an ordered list of [`ClassInput`]s into one space-separated class
//! string. Each input contributes zero or more tokens:
//!
//! - `Class(name)` contributes `name` as-is.
//! - `Falsy` contributes nothing.
//! - `Map` contributes, per entry in declared order, either the key itself
//!   (`Toggle(true)`) or `key:class` for every truthy class in the value.
//!
//! Tokens are never reordered, deduplicated, validated or escaped, and empty
//! names never produce a token, so the output never has stray separators.
//!
//! ```rust,ignore
//! use tw_classnames::{classnames, ModifierMap};
//!
//! let classes = classnames!(
//!     "text-sm",
//!     is_active.then_some("font-bold"),
//!     ModifierMap::new()
//!         .entry("hover", "underline")
//!         .entry("md:dark", [Some("p-4"), None]),
//! );
//! ```

mod input;
mod json;

pub use input::{ClassEntry, ClassInput, MapValue, ModifierMap};
pub use json::{from_json, InputError};

/// Assemble `items` into a single space-separated class string.
pub fn assemble<'a, I>(items: I) -> String
where
    I: IntoIterator<Item = &'a ClassInput>,
{
    tokens(items).join(" ")
}

/// Ordered tokens `items` produce, before joining.
pub fn tokens<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a ClassInput>,
{
    let mut out = Vec::new();
    for item in items {
        push_item(&mut out, item);
    }
    out
}

fn push_item(out: &mut Vec<String>, item: &ClassInput) {
    match item {
        ClassInput::Class(name) => push_token(out, name.clone()),
        ClassInput::Falsy => {}
        ClassInput::Map(map) => {
            for (key, value) in map.iter() {
                push_entry(out, key, value);
            }
        }
    }
}

fn push_entry(out: &mut Vec<String>, key: &str, value: &MapValue) {
    match value {
        MapValue::Toggle(true) => push_token(out, key.to_string()),
        MapValue::Toggle(false) => {}
        MapValue::Class(class) => push_prefixed(out, key, class),
        MapValue::Classes(entries) => {
            for entry in entries {
                if let ClassEntry::Class(class) = entry {
                    push_prefixed(out, key, class);
                }
            }
        }
    }
}

fn push_prefixed(out: &mut Vec<String>, modifier: &str, class: &str) {
    if !class.is_empty() {
        out.push(format!("{}:{}", modifier, class));
    }
}

fn push_token(out: &mut Vec<String>, token: String) {
    if !token.is_empty() {
        out.push(token);
    }
}

/// Variadic assembler call: every argument goes through `Into<ClassInput>`.
///
/// ```rust,ignore
/// assert_eq!(classnames!("a", None::<&str>, "b"), "a b");
/// ```
#[macro_export]
macro_rules! classnames {
    ($($item:expr),* $(,)?) => {
        $crate::assembler::assemble(
            &[$($crate::assembler::ClassInput::from($item)),*] as &[$crate::assembler::ClassInput],
        )
    };
}
