//! Per-class linear-allocation estimation.
//!
//! The runtime loader carves per-class records — the class object, method
//! records, field records, and the vtable — out of a single linear
//! allocation region. The packer cannot know the exact sizes without
//! loading, so it uses an additive estimate derived from class layout. The
//! only contract the packer relies on is determinism (the same class always
//! yields the same value) and additivity across the classes of a container.

use crate::metadata::class::DexClass;

/// Fixed per-class record cost.
const CLASS_OBJECT_BYTES: usize = 160;

/// Size of one vtable slot.
const VTABLE_SLOT_BYTES: usize = 4;

/// Vtable slots inherited from the root object type.
const OBJECT_VTABLE_SLOTS: usize = 48;

/// Loader-side record size of one method.
const METHOD_BYTES: usize = 52;

/// Loader-side record size of one field.
const FIELD_BYTES: usize = 16;

/// Estimates the linear-allocation cost contribution of a class.
///
/// Interfaces carry no vtable; every other class pays the inherited object
/// vtable plus one slot per declared virtual method. Calling this twice on
/// the same class yields the same integer.
///
/// # Example
///
/// ```rust
/// use dexpack::metadata::class::ClassBuilder;
/// use dexpack::metadata::pool::RefPool;
/// use dexpack::pack::estimate::estimate_linear_alloc;
///
/// let mut pool = RefPool::new();
/// let ty = pool.intern_type("com/app/Empty");
/// let class = ClassBuilder::new(ty, "com/app/Empty").build();
///
/// assert_eq!(
///     estimate_linear_alloc(&class),
///     estimate_linear_alloc(&class)
/// );
/// ```
#[must_use]
pub fn estimate_linear_alloc(class: &DexClass) -> usize {
    let mut size = CLASS_OBJECT_BYTES;

    if !class.is_interface() {
        let vtable_slots = OBJECT_VTABLE_SLOTS + class.virtual_methods().len();
        size += vtable_slots * VTABLE_SLOT_BYTES;
    }

    let method_count = class.direct_methods().len() + class.virtual_methods().len();
    size += method_count * METHOD_BYTES;

    let field_count = class.static_fields().len() + class.instance_fields().len();
    size += field_count * FIELD_BYTES;

    size
}
