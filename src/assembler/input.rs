//! Input shapes accepted by the class assembler
//!
//! Every argument of an assembler call converts into a [`ClassInput`]. The
//! conversions below cover the shapes a caller writes by hand: string slices,
//! owned strings, `Option`s (where `None` is the excluded case) and
//! [`ModifierMap`]s built entry by entry.

/// One argument of an assembler call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassInput {
    /// A class named directly, emitted verbatim
    Class(String),
    /// A conditionally excluded argument (`false`, `None`, `null`)
    Falsy,
    /// An ordered map from class names or modifier specifiers to values
    Map(ModifierMap),
}

impl ClassInput {
    /// Include `class` only when `condition` holds.
    pub fn when(condition: bool, class: impl Into<String>) -> Self {
        if condition {
            ClassInput::Class(class.into())
        } else {
            ClassInput::Falsy
        }
    }
}

impl From<&str> for ClassInput {
    fn from(class: &str) -> Self {
        ClassInput::Class(class.to_string())
    }
}

impl From<String> for ClassInput {
    fn from(class: String) -> Self {
        ClassInput::Class(class)
    }
}

impl From<&String> for ClassInput {
    fn from(class: &String) -> Self {
        ClassInput::Class(class.clone())
    }
}

impl From<ModifierMap> for ClassInput {
    fn from(map: ModifierMap) -> Self {
        ClassInput::Map(map)
    }
}

impl<T: Into<ClassInput>> From<Option<T>> for ClassInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ClassInput::Falsy)
    }
}

/// Value side of a [`ModifierMap`] entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapValue {
    /// `{ "opacity-50": true }` form: the key itself is the class
    Toggle(bool),
    /// `{ hover: "border-4" }` form: one prefixed class
    Class(String),
    /// `{ "xs:hover": ["bg-blue-50", false] }` form: one prefixed class per truthy entry
    Classes(Vec<ClassEntry>),
}

impl From<bool> for MapValue {
    fn from(on: bool) -> Self {
        MapValue::Toggle(on)
    }
}

impl From<&str> for MapValue {
    fn from(class: &str) -> Self {
        MapValue::Class(class.to_string())
    }
}

impl From<String> for MapValue {
    fn from(class: String) -> Self {
        MapValue::Class(class)
    }
}

impl<T: Into<ClassEntry>> From<Vec<T>> for MapValue {
    fn from(entries: Vec<T>) -> Self {
        MapValue::Classes(entries.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<ClassEntry>, const N: usize> From<[T; N]> for MapValue {
    fn from(entries: [T; N]) -> Self {
        MapValue::Classes(entries.into_iter().map(Into::into).collect())
    }
}

/// One element of a modifier's class list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassEntry {
    Class(String),
    Falsy,
}

impl From<&str> for ClassEntry {
    fn from(class: &str) -> Self {
        ClassEntry::Class(class.to_string())
    }
}

impl From<String> for ClassEntry {
    fn from(class: String) -> Self {
        ClassEntry::Class(class)
    }
}

impl<T: Into<ClassEntry>> From<Option<T>> for ClassEntry {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(ClassEntry::Falsy)
    }
}

/// Ordered mapping from key to [`MapValue`]
///
/// Entries keep their insertion order, which is the order their tokens are
/// emitted in. Repeated keys are kept as separate entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModifierMap {
    entries: Vec<(String, MapValue)>,
}

impl ModifierMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, builder style.
    pub fn entry(mut self, key: impl Into<String>, value: impl Into<MapValue>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<MapValue>) {
        self.entries.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MapValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<MapValue>> FromIterator<(K, V)> for ModifierMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_conversions() {
        assert_eq!(ClassInput::from(None::<&str>), ClassInput::Falsy);
        assert_eq!(
            ClassInput::from(Some("flex")),
            ClassInput::Class("flex".to_string())
        );
        assert_eq!(ClassEntry::from(None::<String>), ClassEntry::Falsy);
    }

    #[test]
    fn test_when() {
        assert_eq!(ClassInput::when(false, "hidden"), ClassInput::Falsy);
        assert_eq!(
            ClassInput::when(true, "hidden"),
            ClassInput::Class("hidden".to_string())
        );
    }

    #[test]
    fn test_map_keeps_insertion_order() {
        let map = ModifierMap::new()
            .entry("md", "p-4")
            .entry("hover", true)
            .entry("md", ["m-2"]);

        let keys: Vec<&str> = map.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["md", "hover", "md"]);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_list_value_from_mixed_entries() {
        let value = MapValue::from([Some("bg-blue-50"), None]);
        assert_eq!(
            value,
            MapValue::Classes(vec![
                ClassEntry::Class("bg-blue-50".to_string()),
                ClassEntry::Falsy
            ])
        );
    }
}
