//! Option catalog: the ordered set of choices a combo box offers.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opaque option identifier, unique within one catalog.
///
/// The empty id means "no selection".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    /// Create an id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The empty id (no selection).
    #[must_use]
    pub const fn none() -> Self {
        Self(String::new())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is the empty id.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for OptionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A single labeled choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogOption {
    /// Identifier reported to the host on commit
    pub id: OptionId,
    /// Display label, also used for matching
    pub label: String,
}

impl CatalogOption {
    /// Create a new option.
    #[must_use]
    pub fn new(id: impl Into<OptionId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Wire shape of one catalog entry: `{ label, id? }`.
#[derive(Deserialize)]
struct RawOption {
    #[serde(default)]
    id: Option<OptionId>,
    label: String,
}

/// Insertion-ordered mapping from [`OptionId`] to [`CatalogOption`].
///
/// Serializes as the host object shape, `{ css: { label: CSS, id: css }, ... }`.
///
/// ```
/// use pickbox_widgets::{Catalog, OptionId};
///
/// let catalog = Catalog::new().with("a", "Apple").with("b", "Banana");
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.label(&OptionId::from("b")), Some("Banana"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    entries: IndexMap<OptionId, CatalogOption>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, builder style.
    #[must_use]
    pub fn with(mut self, id: impl Into<OptionId>, label: impl Into<String>) -> Self {
        self.insert(CatalogOption::new(id, label));
        self
    }

    /// Insert an option. Re-inserting an id replaces its label in place.
    pub fn insert(&mut self, option: CatalogOption) {
        self.entries.insert(option.id.clone(), option);
    }

    /// Look up an option.
    #[must_use]
    pub fn get(&self, id: &OptionId) -> Option<&CatalogOption> {
        self.entries.get(id)
    }

    /// Look up an option's label.
    #[must_use]
    pub fn label(&self, id: &OptionId) -> Option<&str> {
        self.get(id).map(|o| o.label.as_str())
    }

    /// Check whether an id is present.
    #[must_use]
    pub fn contains(&self, id: &OptionId) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterate options in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogOption> {
        self.entries.values()
    }

    /// Number of options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<I, L> FromIterator<(I, L)> for Catalog
where
    I: Into<OptionId>,
    L: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (I, L)>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for (id, label) in iter {
            catalog.insert(CatalogOption::new(id, label));
        }
        catalog
    }
}

/// Error produced when a serialized catalog entry disagrees with its key.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CatalogKeyMismatch {
    key: OptionId,
    id: OptionId,
}

impl fmt::Display for CatalogKeyMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "option `{}` declares mismatched id `{}`", self.key, self.id)
    }
}

impl std::error::Error for CatalogKeyMismatch {}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = IndexMap::<OptionId, RawOption>::deserialize(deserializer)?;
        let mut catalog = Self::new();
        for (key, entry) in raw {
            if let Some(id) = entry.id {
                if id != key {
                    return Err(serde::de::Error::custom(CatalogKeyMismatch { key, id }));
                }
            }
            catalog.insert(CatalogOption::new(key, entry.label));
        }
        Ok(catalog)
    }
}
