//! In-memory schema metadata store.
//!
//! The side table downstream schema generators read: per type, a map from
//! property name to its [`PropertySchema`], plus an ordered list of
//! annotated property keys so documented properties can be enumerated
//! deterministically.
//!
//! # Example
//!
//! ```
//! use entity_ref_core::{PropertySchema, SchemaMetadataStore, TypeKey};
//!
//! struct User;
//!
//! let mut store = SchemaMetadataStore::new();
//! let user = TypeKey::of::<User>();
//!
//! store.annotate(user, "email", PropertySchema::new().with_format("email"));
//! store.annotate(user, "name", PropertySchema::new().with_description("Display name"));
//!
//! assert!(store.get(user, "email").is_some());
//! assert_eq!(store.property_keys(user), &[":email", ":name"]);
//! ```

use std::collections::HashMap;

use crate::schema::PropertySchema;
use crate::types::TypeKey;

/// Per-type property schema metadata with an ordered key registry.
///
/// Property keys in the ordered registry are stored as `:<property>`; the
/// leading colon disambiguates them from other registries sharing the same
/// namespace.
#[derive(Debug, Default)]
pub struct SchemaMetadataStore {
    metadata: HashMap<TypeKey, HashMap<String, PropertySchema>>,
    property_keys: HashMap<TypeKey, Vec<String>>,
}

impl SchemaMetadataStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the schema metadata for `property` on `ty`, if any.
    pub fn get(&self, ty: TypeKey, property: &str) -> Option<&PropertySchema> {
        self.metadata.get(&ty)?.get(property)
    }

    /// Writes the schema metadata for `property` on `ty`, replacing any
    /// previous record. Does not touch the ordered key registry.
    pub fn put(&mut self, ty: TypeKey, property: &str, schema: PropertySchema) {
        self.metadata
            .entry(ty)
            .or_default()
            .insert(property.to_string(), schema);
    }

    /// Appends `key` to `ty`'s ordered key registry unless already present.
    /// First-seen order is preserved.
    pub fn register_property_key(&mut self, ty: TypeKey, key: &str) {
        let keys = self.property_keys.entry(ty).or_default();
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_string());
        }
    }

    /// The ordered annotated-property keys registered for `ty`.
    pub fn property_keys(&self, ty: TypeKey) -> &[String] {
        self.property_keys.get(&ty).map_or(&[], Vec::as_slice)
    }

    /// Writes metadata and registers the `:<property>` ordered key in one
    /// step — how a canonical type declares its own properties.
    pub fn annotate(&mut self, ty: TypeKey, property: &str, schema: PropertySchema) {
        self.put(ty, property, schema);
        self.register_property_key(ty, &format!(":{property}"));
    }

    /// Number of properties carrying metadata on `ty`.
    pub fn property_count(&self, ty: TypeKey) -> usize {
        self.metadata.get(&ty).map_or(0, HashMap::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Account;

    #[test]
    fn test_put_and_get_roundtrip() {
        let mut store = SchemaMetadataStore::new();
        let ty = TypeKey::of::<Account>();

        store.put(ty, "id", PropertySchema::new().with_format("uuid"));
        assert_eq!(
            store.get(ty, "id").and_then(|s| s.format.as_deref()),
            Some("uuid")
        );
        assert!(store.get(ty, "missing").is_none());
    }

    #[test]
    fn test_register_property_key_deduplicates() {
        let mut store = SchemaMetadataStore::new();
        let ty = TypeKey::of::<Account>();

        store.register_property_key(ty, ":id");
        store.register_property_key(ty, ":name");
        store.register_property_key(ty, ":id");

        assert_eq!(store.property_keys(ty), &[":id", ":name"]);
    }

    #[test]
    fn test_annotate_registers_ordered_key() {
        let mut store = SchemaMetadataStore::new();
        let ty = TypeKey::of::<Account>();

        store.annotate(ty, "email", PropertySchema::new());
        assert_eq!(store.property_keys(ty), &[":email"]);
        assert_eq!(store.property_count(ty), 1);
    }
}
