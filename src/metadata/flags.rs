//! Access flags for classes and methods.
//!
//! These carry the source format's `ACC_*` bit values. The pass itself only
//! consults [`ClassAccessFlags::INTERFACE`] (the capacity estimator skips the
//! vtable term for interfaces) and [`MethodAccessFlags::STATIC`] (statistics),
//! but the full flag surface is kept so synthesized classes — canaries are
//! public abstract interfaces — round-trip with the right attributes.

use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Class access and property flags
    pub struct ClassAccessFlags: u32 {
        /// Visible everywhere
        const PUBLIC = 0x0001;
        /// No subclasses allowed
        const FINAL = 0x0010;
        /// The class is an interface
        const INTERFACE = 0x0200;
        /// Not instantiable
        const ABSTRACT = 0x0400;
        /// Not directly defined in source code
        const SYNTHETIC = 0x1000;
        /// Declared as an annotation type
        const ANNOTATION = 0x2000;
        /// Declared as an enumerated type
        const ENUM = 0x4000;
    }
}

impl ClassAccessFlags {
    /// Returns true if the interface bit is set
    #[must_use]
    pub fn is_interface(&self) -> bool {
        self.contains(ClassAccessFlags::INTERFACE)
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    /// Method access and property flags
    pub struct MethodAccessFlags: u32 {
        /// Visible everywhere
        const PUBLIC = 0x0001;
        /// Visible only to the defining class
        const PRIVATE = 0x0002;
        /// Visible to the package and subclasses
        const PROTECTED = 0x0004;
        /// Per-class rather than per-instance
        const STATIC = 0x0008;
        /// Not overridable
        const FINAL = 0x0010;
        /// No implementation provided
        const ABSTRACT = 0x0400;
        /// Constructor method
        const CONSTRUCTOR = 0x10000;
    }
}

impl MethodAccessFlags {
    /// Returns true if the static bit is set
    #[must_use]
    pub fn is_static(&self) -> bool {
        self.contains(MethodAccessFlags::STATIC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interface_predicate() {
        let canary =
            ClassAccessFlags::PUBLIC | ClassAccessFlags::INTERFACE | ClassAccessFlags::ABSTRACT;
        assert!(canary.is_interface());
        assert!(!ClassAccessFlags::PUBLIC.is_interface());
    }

    #[test]
    fn test_static_predicate() {
        assert!((MethodAccessFlags::PUBLIC | MethodAccessFlags::STATIC).is_static());
        assert!(!MethodAccessFlags::PRIVATE.is_static());
    }
}
