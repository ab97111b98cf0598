//! Containers and scope construction.
//!
//! A [`DexContainer`] is an ordered sequence of class handles — the unit of
//! both input and output for the pass. The first container is the "primary",
//! loaded eagerly at startup; all others are "secondary".
//!
//! [`build_class_lookup`] and [`build_class_scope`] flatten a container list
//! into the two views the pass works from: a name-keyed lookup (the
//! resolution surface for cold-start entries and instruction operands) and
//! the concatenated scope in original order (the leftover emission order).

use rustc_hash::FxHashMap;
use std::sync::Arc;

use crate::metadata::class::ClassRc;

/// Name-keyed class lookup built from a set of containers.
pub type ClassLookup = FxHashMap<Arc<str>, ClassRc>;

/// An ordered sequence of classes; the unit of packing.
#[derive(Debug, Clone, Default)]
pub struct DexContainer {
    classes: Vec<ClassRc>,
}

impl DexContainer {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a container from an ordered class list.
    #[must_use]
    pub fn from_classes(classes: Vec<ClassRc>) -> Self {
        Self { classes }
    }

    /// Appends a class.
    pub fn push(&mut self, class: ClassRc) {
        self.classes.push(class);
    }

    /// Number of classes in the container.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Returns true if the container holds no classes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// The ordered class list.
    #[must_use]
    pub fn classes(&self) -> &[ClassRc] {
        &self.classes
    }

    /// Iterates the classes in order.
    pub fn iter(&self) -> std::slice::Iter<'_, ClassRc> {
        self.classes.iter()
    }
}

impl<'a> IntoIterator for &'a DexContainer {
    type Item = &'a ClassRc;
    type IntoIter = std::slice::Iter<'a, ClassRc>;

    fn into_iter(self) -> Self::IntoIter {
        self.classes.iter()
    }
}

/// Builds the name-keyed lookup over every class in every container.
///
/// Names are unique across well-formed input; if a name repeats, the later
/// occurrence wins.
#[must_use]
pub fn build_class_lookup(containers: &[DexContainer]) -> ClassLookup {
    let mut lookup = ClassLookup::default();
    for container in containers {
        for class in container {
            lookup.insert(Arc::clone(class.name()), Arc::clone(class));
        }
    }
    lookup
}

/// Concatenates every container's classes in order into a single scope.
#[must_use]
pub fn build_class_scope(containers: &[DexContainer]) -> Vec<ClassRc> {
    let mut scope = Vec::new();
    for container in containers {
        scope.extend(container.iter().cloned());
    }
    scope
}
