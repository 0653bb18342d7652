//! The reference registry: descriptor store, ancestry links, and the
//! property registrar.

use std::collections::HashMap;

use entity_ref_core::{PropertyKey, PropertySchema, TypeKey};

use crate::directive::{CopyDirective, CopyOptions};
use crate::error::{RefError, Result};
use crate::index::ValidationIndexCache;

/// Declaration record for one type: its ancestry link and its own copy
/// directives, in registration order. Directives are never merged across
/// types here; inheritance is realized by the ancestry walk at propagation
/// time.
#[derive(Debug, Default)]
pub(crate) struct TypeDecl {
    pub(crate) parent: Option<TypeKey>,
    pub(crate) directives: Vec<CopyDirective>,
}

/// Process-wide registry of declared types, their ancestry, and their copy
/// directives.
///
/// Explicit state rather than ambient globals: create one registry at
/// start-up (or one per test) and route all declarations through it. All
/// state grows monotonically; nothing is pruned.
///
/// # Example
///
/// ```
/// use entity_ref_core::{PropertySchema, TypeKey};
/// use entity_ref_registry::{CopyOptions, RefRegistry};
///
/// struct UserSummary;
///
/// let mut registry = RefRegistry::new();
/// registry.declare::<UserSummary>();
/// registry
///     .property::<UserSummary>("email", PropertySchema::new(), CopyOptions::default())
///     .unwrap();
///
/// assert!(registry.is_declared(TypeKey::of::<UserSummary>()));
/// assert_eq!(registry.directive_count(TypeKey::of::<UserSummary>()), 1);
/// ```
#[derive(Debug, Default)]
pub struct RefRegistry {
    pub(crate) types: HashMap<TypeKey, TypeDecl>,
    pub(crate) canonical_links: HashMap<TypeKey, TypeKey>,
    pub(crate) validation_index: ValidationIndexCache,
}

impl RefRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares `T`, creating its (possibly empty) declaration record.
    ///
    /// Declaring is what makes a type a valid reference-link target; a type
    /// that only ever appears as a canonical source does not need it.
    pub fn declare<T: 'static>(&mut self) -> TypeKey {
        let key = TypeKey::of::<T>();
        self.types.entry(key).or_default();
        key
    }

    /// Declares `T` with `P` as its ancestor. `P` is declared too, so
    /// chains can be built leaf-first.
    pub fn declare_with_parent<T: 'static, P: 'static>(&mut self) -> TypeKey {
        let parent = self.declare::<P>();
        let key = self.declare::<T>();
        self.set_parent(key, parent);
        key
    }

    /// Sets (or replaces) the declared ancestor of `child`, creating its
    /// declaration record if absent.
    pub fn set_parent(&mut self, child: TypeKey, parent: TypeKey) {
        self.types.entry(child).or_default().parent = Some(parent);
    }

    /// Registers one copy directive for `key` on `declaring`.
    ///
    /// This is the registrar behind property annotation: it validates the
    /// property key, normalizes the canonical source property from
    /// `options`, and appends a new directive to the declaring type's own
    /// descriptor entry (creating the entry if absent).
    ///
    /// # Errors
    ///
    /// [`RefError::InvalidPropertyKind`] for opaque keys; the descriptor
    /// store is left untouched.
    pub fn register_property(
        &mut self,
        declaring: TypeKey,
        key: PropertyKey,
        schema: PropertySchema,
        options: CopyOptions,
    ) -> Result<()> {
        let Some(name) = key.as_named() else {
            return Err(RefError::InvalidPropertyKind {
                declaring: declaring.name().to_string(),
            });
        };

        self.types
            .entry(declaring)
            .or_default()
            .directives
            .push(CopyDirective::new(name.to_string(), schema, options));
        Ok(())
    }

    /// Generic sugar for [`register_property`](Self::register_property).
    pub fn property<T: 'static>(
        &mut self,
        key: impl Into<PropertyKey>,
        schema: PropertySchema,
        options: CopyOptions,
    ) -> Result<()> {
        self.register_property(TypeKey::of::<T>(), key.into(), schema, options)
    }

    /// Whether `ty` has a declaration record (via [`declare`](Self::declare),
    /// a parent link, or a registered property).
    pub fn is_declared(&self, ty: TypeKey) -> bool {
        self.types.contains_key(&ty)
    }

    /// Number of copy directives registered directly on `ty` (inherited
    /// directives are not counted).
    pub fn directive_count(&self, ty: TypeKey) -> usize {
        self.types.get(&ty).map_or(0, |d| d.directives.len())
    }

    /// Declared ancestor of `ty`, if any.
    pub fn parent_of(&self, ty: TypeKey) -> Option<TypeKey> {
        self.types.get(&ty)?.parent
    }

    /// The canonical type `reference` was last linked to, if any.
    pub fn canonical_of(&self, reference: TypeKey) -> Option<TypeKey> {
        self.canonical_links.get(&reference).copied()
    }

    /// Number of validation indexes built so far, one per
    /// `(canonical type, group-set key)` pair.
    pub fn validation_index_count(&self) -> usize {
        self.validation_index.built_count()
    }
}
