//! Style records: ordered property/value declarations for one node.

use indexmap::IndexMap;
use std::fmt;

/// The resolved declarations of one node (or one text run).
///
/// Declarations keep insertion order for output. Setting a property that is
/// already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StyleRecord {
    declarations: IndexMap<String, String>,
}

impl StyleRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a declaration.
    pub fn set(&mut self, property: impl Into<String>, value: impl Into<String>) {
        self.declarations.insert(property.into(), value.into());
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    pub fn contains(&self, property: &str) -> bool {
        self.declarations.contains_key(property)
    }

    pub fn remove(&mut self, property: &str) -> Option<String> {
        self.declarations.shift_remove(property)
    }

    /// Declarations in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.declarations
            .iter()
            .map(|(property, value)| (property.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Append every declaration of `other`, replacing existing ones.
    pub fn merge(&mut self, other: &StyleRecord) {
        for (property, value) in other.iter() {
            self.set(property, value);
        }
    }

    /// Declarations sorted by property name.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut pairs: Vec<_> = self.iter().collect();
        pairs.sort_unstable();
        pairs
    }

    /// Order-independent identity of the record: two records with the same
    /// key emit byte-identical rules.
    pub fn canonical_key(&self) -> String {
        let mut key = String::new();
        for (property, value) in self.sorted() {
            key.push_str(property);
            key.push(':');
            key.push_str(value);
            key.push(';');
        }
        key
    }

    /// Declarations of `self` that are absent from `base` or carry a different value.
    pub fn difference(&self, base: &StyleRecord) -> StyleRecord {
        let declarations = self
            .declarations
            .iter()
            .filter(|(property, value)| base.declarations.get(*property) != Some(*value))
            .map(|(property, value)| (property.clone(), value.clone()))
            .collect();
        StyleRecord { declarations }
    }
}

impl fmt::Display for StyleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}: {};", property, value)?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = StyleRecord::new();
        for (property, value) in iter {
            record.set(property, value);
        }
        record
    }
}
