//! Registry of available transformations.
//!
//! The [`TransformationRegistry`] maps short names (the identifiers clients
//! send, such as `rename`) to transformation implementations. Iteration is
//! ordered by short name so listings are stable. Duplicate registrations are
//! rejected.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::builtin::{NullTransformation, Rename};
use crate::error::RegistryError;
use crate::transformation::Transformation;

/// Transformations keyed by short name.
///
/// # Example
///
/// ```
/// use recast_transform::TransformationRegistry;
/// use recast_transform::builtin::Rename;
///
/// let mut registry = TransformationRegistry::new();
/// registry.register("rename", Rename).expect("registration succeeds");
/// assert!(registry.contains("rename"));
/// assert!(registry.register("rename", Rename).is_err());
/// ```
#[derive(Clone, Default)]
pub struct TransformationRegistry {
    transformations: BTreeMap<String, Arc<dyn Transformation>>,
}

impl TransformationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in transformations.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut transformations: BTreeMap<String, Arc<dyn Transformation>> = BTreeMap::new();
        transformations.insert(String::from("null"), Arc::new(NullTransformation));
        transformations.insert(String::from("rename"), Arc::new(Rename));
        Self { transformations }
    }

    /// Registers a transformation under `short_name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::EmptyName`] for a blank name and
    /// [`RegistryError::Duplicate`] when the name is already taken.
    pub fn register<T>(
        &mut self,
        short_name: impl Into<String>,
        transformation: T,
    ) -> Result<(), RegistryError>
    where
        T: Transformation + 'static,
    {
        let name = short_name.into();
        if name.trim().is_empty() {
            return Err(RegistryError::EmptyName);
        }
        if self.transformations.contains_key(&name) {
            return Err(RegistryError::Duplicate { name });
        }
        debug!(transformation = %name, "registering transformation");
        self.transformations.insert(name, Arc::new(transformation));
        Ok(())
    }

    /// Looks up a transformation by short name.
    #[must_use]
    pub fn get(&self, short_name: &str) -> Option<Arc<dyn Transformation>> {
        self.transformations.get(short_name).cloned()
    }

    /// Returns `true` when `short_name` is registered.
    #[must_use]
    pub fn contains(&self, short_name: &str) -> bool {
        self.transformations.contains_key(short_name)
    }

    /// Iterates over `(short name, transformation)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &dyn Transformation)> {
        self.transformations
            .iter()
            .map(|(name, transformation)| (name.as_str(), transformation.as_ref()))
    }

    /// Number of registered transformations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }
}

impl fmt::Debug for TransformationRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.transformations.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests;
