//! Entity records and the compiled catalog.

use convcat_foundation::CanonicalName;
use serde::{Deserialize, Serialize};

use crate::value::{EntityValueRecord, FUZZY_MATCH_MARKER};

/// One entity in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRecord {
    /// Entity name.
    #[serde(rename = "entity")]
    pub name: CanonicalName,
    /// Values in source line order. Empty for system entities.
    pub values: Vec<EntityValueRecord>,
    /// Whether the platform should match values approximately.
    #[serde(default, skip_serializing_if = "is_false")]
    pub fuzzy_match: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(flag: &bool) -> bool {
    !*flag
}

impl EntityRecord {
    /// Creates an entity with no values.
    #[must_use]
    pub fn new(name: CanonicalName) -> Self {
        Self {
            name,
            values: Vec::new(),
            fuzzy_match: false,
        }
    }

    /// Builder method to add a value.
    #[must_use]
    pub fn with_value(mut self, value: EntityValueRecord) -> Self {
        self.values.push(value);
        self
    }

    /// Builder method to set fuzzy matching.
    #[must_use]
    pub fn with_fuzzy_match(mut self, fuzzy_match: bool) -> Self {
        self.fuzzy_match = fuzzy_match;
        self
    }

    /// Returns true if this entity carries no values, as system entities do.
    #[must_use]
    pub fn is_value_free(&self) -> bool {
        self.values.is_empty()
    }

    /// Renders the entity back into catalog lines.
    ///
    /// The fuzzy-match marker, if set, comes first.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let marker = self
            .fuzzy_match
            .then(|| FUZZY_MATCH_MARKER.to_string());
        marker
            .into_iter()
            .chain(self.values.iter().map(EntityValueRecord::to_line))
            .collect()
    }
}

/// The ordered list of entities produced by one compilation.
///
/// Order is sorted file order, then line order within a file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityCatalog {
    entities: Vec<EntityRecord>,
}

impl EntityCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entity.
    pub fn push(&mut self, entity: EntityRecord) {
        self.entities.push(entity);
    }

    /// Returns the number of entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Returns true if the catalog has no entities.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Iterates over entities in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &EntityRecord> {
        self.entities.iter()
    }

    /// Returns the first entity with the given name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&EntityRecord> {
        self.entities.iter().find(|e| e.name == name)
    }
}

impl From<Vec<EntityRecord>> for EntityCatalog {
    fn from(entities: Vec<EntityRecord>) -> Self {
        Self { entities }
    }
}

impl IntoIterator for EntityCatalog {
    type Item = EntityRecord;
    type IntoIter = std::vec::IntoIter<EntityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.into_iter()
    }
}

impl<'a> IntoIterator for &'a EntityCatalog {
    type Item = &'a EntityRecord;
    type IntoIter = std::slice::Iter<'a, EntityRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.iter()
    }
}
