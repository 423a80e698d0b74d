//! The extraction result.
//!
//! [`OpenGraph`] is an insertion-ordered mapping from key to a non-empty list
//! of values. The first value is the key's value; any later values are the
//! key's companions, surfaced as `<key>_additional` when enumerating or
//! serializing.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::schema;

/// Suffix of the companion key holding every value after the first.
pub const ADDITIONAL_SUFFIX: &str = "_additional";

const ADDRESS_KEYS: [&str; 5] = [
    "street_address",
    "locality",
    "region",
    "postal_code",
    "country_name",
];

#[derive(Debug, Clone, PartialEq, Eq)]
struct Field {
    key: String,
    values: Vec<String>,
}

/// Metadata extracted from one HTML document.
///
/// Built by [`crate::parse`] and friends and immutable afterwards.
///
/// # Example
///
/// ```rust
/// use og_card::OpenGraph;
///
/// let graph: OpenGraph = [("title", "First"), ("title", "Second"), ("type", "restaurant")]
///     .into_iter()
///     .collect();
///
/// assert_eq!(graph.get("title"), Some("First"));
/// assert_eq!(graph.additional("title"), ["Second".to_string()]);
/// assert!(graph.has("title_additional"));
/// assert_eq!(graph.schema(), Some("business"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpenGraph {
    fields: Vec<Field>,
}

impl OpenGraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key == key)
    }

    fn field(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key == key)
    }

    /// Insert `value` under `key`, or append it to the key's companions if
    /// the key already exists. The first value is never replaced.
    ///
    /// A literal `<key>_additional` key shares its name with the companion
    /// list of `<key>`, so its values are folded into that list once the base
    /// key exists.
    pub(crate) fn accumulate(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if let Some(idx) = key
            .strip_suffix(ADDITIONAL_SUFFIX)
            .and_then(|base| self.position(base))
        {
            self.fields[idx].values.push(value);
            return;
        }

        let Some(idx) = self.position(&key) else {
            self.fields.push(Field {
                key,
                values: vec![value],
            });
            return;
        };

        if self.fields[idx].values.len() == 1 {
            self.fold_literal_companion(&key);
        }
        if let Some(idx) = self.position(&key) {
            self.fields[idx].values.push(value);
        }
    }

    /// Move the values of a literal `<key>_additional` field, seen before
    /// `key` had companions, into the companion list of `key`.
    fn fold_literal_companion(&mut self, key: &str) {
        let Some(literal) = self.position(&format!("{key}{ADDITIONAL_SUFFIX}")) else {
            return;
        };
        let literal = self.fields.remove(literal);
        if let Some(idx) = self.position(key) {
            self.fields[idx].values.extend(literal.values);
        }
    }

    /// Replace the key's first value, keeping companions and position.
    pub(crate) fn set(&mut self, key: &str, value: impl Into<String>) {
        match self.position(key) {
            Some(idx) => self.fields[idx].values[0] = value.into(),
            None => self.fields.push(Field {
                key: key.to_string(),
                values: vec![value.into()],
            }),
        }
    }

    pub(crate) fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.position(key)?;
        let mut field = self.fields.remove(idx);
        Some(field.values.swap_remove(0))
    }

    /// First value stored under `key`.
    ///
    /// Companion keys (`<key>_additional`) hold lists; use
    /// [`additional`](Self::additional) for those.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.field(key).map(|f| f.values[0].as_str())
    }

    /// Every value stored under `key`, first value included.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.field(key)
            .map(|f| f.values.as_slice())
            .unwrap_or_default()
    }

    /// The values after the first one, in document order.
    #[must_use]
    pub fn additional(&self, key: &str) -> &[String] {
        self.field(key)
            .map(|f| &f.values[1..])
            .unwrap_or_default()
    }

    /// Whether `key` is populated. Companion keys count as populated when
    /// their base key has more than one value.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        if self.field(key).is_some() {
            return true;
        }
        key.strip_suffix(ADDITIONAL_SUFFIX)
            .is_some_and(|base| !self.additional(base).is_empty())
    }

    /// All populated keys, each companion key directly after its base key.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            keys.push(field.key.clone());
            if field.values.len() > 1 {
                keys.push(format!("{}{ADDITIONAL_SUFFIX}", field.key));
            }
        }
        keys
    }

    /// Schema bucket of the `type` value (see [`schema::classify`]).
    #[must_use]
    pub fn schema(&self) -> Option<&'static str> {
        self.get("type").and_then(schema::classify)
    }

    /// Whether the page embeds a location: both coordinates, or a complete
    /// postal address.
    #[must_use]
    pub fn has_location(&self) -> bool {
        if self.has("latitude") && self.has("longitude") {
            return true;
        }
        ADDRESS_KEYS.iter().all(|key| self.has(key))
    }

    /// Number of distinct base keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Walk the record in insertion order. Each call starts from the
    /// beginning.
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.fields.iter(),
        }
    }
}

/// Insertion-ordered iterator over `(key, values)` pairs of an [`OpenGraph`].
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: std::slice::Iter<'a, Field>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, &'a [String]);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner
            .next()
            .map(|f| (f.key.as_str(), f.values.as_slice()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a OpenGraph {
    type Item = (&'a str, &'a [String]);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OpenGraph {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut graph = OpenGraph::new();
        for (key, value) in iter {
            graph.accumulate(key, value);
        }
        graph
    }
}

impl Serialize for OpenGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let companions = self.fields.iter().filter(|f| f.values.len() > 1).count();
        let mut map = serializer.serialize_map(Some(self.fields.len() + companions))?;
        for field in &self.fields {
            map.serialize_entry(&field.key, &field.values[0])?;
            if field.values.len() > 1 {
                map.serialize_entry(
                    &format!("{}{ADDITIONAL_SUFFIX}", field.key),
                    &field.values[1..],
                )?;
            }
        }
        map.end()
    }
}
