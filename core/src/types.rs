//! Type and property identity.
//!
//! Metadata in this crate is keyed by *type identity*, not by values. A
//! [`TypeKey`] pins down one Rust type; a [`PropertyKey`] names one property
//! of such a type. Both are cheap to copy/clone and usable as map keys.

use std::any::TypeId;
use std::fmt;

/// Identity of a declared type.
///
/// Wraps the type's [`TypeId`] together with its type name so that error
/// messages and logs can name the type involved.
///
/// # Examples
///
/// ```
/// use entity_ref_core::TypeKey;
///
/// struct User;
/// struct UserSummary;
///
/// let user = TypeKey::of::<User>();
/// assert_eq!(user, TypeKey::of::<User>());
/// assert_ne!(user, TypeKey::of::<UserSummary>());
/// assert!(user.name().ends_with("User"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Returns the key identifying `T`.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Full type name, as produced by [`std::any::type_name`].
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A property identifier as supplied at registration time.
///
/// Copy directives need a stable textual name to look up the canonical
/// property, so only [`PropertyKey::Named`] keys are accepted by the
/// registrar. [`PropertyKey::Opaque`] covers interned tokens that have no
/// stable textual form; registering one is rejected.
///
/// # Examples
///
/// ```
/// use entity_ref_core::PropertyKey;
///
/// let named = PropertyKey::from("email");
/// assert_eq!(named.as_named(), Some("email"));
///
/// let opaque = PropertyKey::Opaque(42);
/// assert_eq!(opaque.as_named(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    /// A stable, named key (e.g. `"email"`).
    Named(String),
    /// An interned token with no stable textual form.
    Opaque(u64),
}

impl PropertyKey {
    /// Returns the textual name for named keys, `None` for opaque keys.
    pub fn as_named(&self) -> Option<&str> {
        match self {
            PropertyKey::Named(name) => Some(name),
            PropertyKey::Opaque(_) => None,
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        PropertyKey::Named(name.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        PropertyKey::Named(name)
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyKey::Named(name) => f.write_str(name),
            PropertyKey::Opaque(token) => write!(f, "<opaque:{token}>"),
        }
    }
}
