//! Mutable state for one container-in-progress.
//!
//! An [`EmitTracker`] accumulates the classes scheduled into the container
//! currently being filled: the running linear-alloc sum, the deduplicated
//! method and field reference sets, and the ordered class list. The
//! `emitted` set spans the tracker's whole lifetime — it survives flushes,
//! guaranteeing no class is ever scheduled twice by the same tracker.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::metadata::class::{ClassRc, DexClass};
use crate::metadata::container::ClassLookup;
use crate::metadata::token::Token;

/// Accumulator for one container-in-progress.
#[derive(Debug, Default)]
pub struct EmitTracker {
    /// Running sum of per-class linear-alloc estimates.
    pub(crate) la_size: usize,
    /// Method references contributed so far, deduplicated.
    pub(crate) mrefs: FxHashSet<Token>,
    /// Field references contributed so far, deduplicated.
    pub(crate) frefs: FxHashSet<Token>,
    /// Classes scheduled into the current container, in order.
    pub(crate) outs: Vec<ClassRc>,
    /// Classes placed into any container over this tracker's lifetime.
    pub(crate) emitted: FxHashSet<Token>,
    /// Class lookup scoping this tracker's name resolution.
    pub(crate) clookup: ClassLookup,
}

impl EmitTracker {
    /// Creates an empty tracker scoped to a class lookup.
    #[must_use]
    pub fn with_lookup(clookup: ClassLookup) -> Self {
        Self {
            clookup,
            ..Self::default()
        }
    }

    /// Resolves a class name within this tracker's scope.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&ClassRc> {
        self.clookup.get(name)
    }

    /// Unions a class's method and field references into the tracker's
    /// sets.
    pub fn gather_refs(&mut self, class: &DexClass) {
        self.mrefs.extend(class.gather_methods());
        self.frefs.extend(class.gather_fields());
    }

    /// Returns true if the tracker has already placed this class.
    #[must_use]
    pub fn is_emitted(&self, class: &DexClass) -> bool {
        self.emitted.contains(&class.type_token())
    }

    /// Records a class as placed for the rest of the tracker's lifetime.
    pub fn mark_emitted(&mut self, class: &DexClass) {
        self.emitted.insert(class.type_token());
    }

    /// Takes the scheduled class list and zeroes the per-container state.
    ///
    /// The emitted set and the lookup are preserved.
    pub fn take_container(&mut self) -> Vec<ClassRc> {
        self.la_size = 0;
        self.mrefs.clear();
        self.frefs.clear();
        std::mem::take(&mut self.outs)
    }

    /// Number of classes currently scheduled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.outs.len()
    }
}

/// Builds a lookup scoped to a single container, for primary-phase
/// trackers.
#[must_use]
pub fn container_lookup(classes: &[ClassRc]) -> ClassLookup {
    let mut lookup = ClassLookup::default();
    for class in classes {
        lookup.insert(Arc::clone(class.name()), Arc::clone(class));
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::class::{ClassBuilder, DexMethod, Instruction};
    use crate::metadata::flags::MethodAccessFlags;
    use crate::metadata::pool::RefPool;

    fn referencing_class(pool: &mut RefPool, name: &str, target: &str) -> ClassRc {
        let ty = pool.intern_type(name);
        let target_ty = pool.intern_type(target);
        let own = pool.intern_method(ty, "run");
        let callee = pool.intern_method(target_ty, "helper");
        let field = pool.intern_field(target_ty, "shared");
        ClassBuilder::new(ty, name)
            .virtual_method(DexMethod::new(
                own,
                MethodAccessFlags::PUBLIC,
                vec![
                    Instruction::Invoke(callee),
                    Instruction::FieldAccess(field),
                ],
            ))
            .build()
    }

    #[test]
    fn test_gather_refs_deduplicates() {
        let mut pool = RefPool::new();
        let a = referencing_class(&mut pool, "com/app/A", "com/app/T");
        let b = referencing_class(&mut pool, "com/app/B", "com/app/T");

        let mut tracker = EmitTracker::default();
        tracker.gather_refs(&a);
        // A declares "run" and references T::helper.
        assert_eq!(tracker.mrefs.len(), 2);
        assert_eq!(tracker.frefs.len(), 1);

        tracker.gather_refs(&b);
        // B adds its own "run"; T::helper and T::shared are already
        // present.
        assert_eq!(tracker.mrefs.len(), 3);
        assert_eq!(tracker.frefs.len(), 1);
    }

    #[test]
    fn test_take_container_preserves_emitted() {
        let mut pool = RefPool::new();
        let a = referencing_class(&mut pool, "com/app/A", "com/app/T");

        let mut tracker = EmitTracker::default();
        tracker.gather_refs(&a);
        tracker.la_size = 100;
        tracker.outs.push(Arc::clone(&a));
        tracker.mark_emitted(&a);

        let classes = tracker.take_container();
        assert_eq!(classes.len(), 1);
        assert_eq!(tracker.la_size, 0);
        assert!(tracker.mrefs.is_empty());
        assert!(tracker.frefs.is_empty());
        assert_eq!(tracker.pending(), 0);
        assert!(tracker.is_emitted(&a));
    }
}
