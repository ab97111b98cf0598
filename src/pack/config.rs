//! Configuration for the packing pass.
//!
//! This module provides the pass tunables — canary emission, static
//! pruning, primary-container handling — and the capacity limits with
//! their modern and legacy profiles, plus the naming constants shared by
//! the pass and its consumers.

/// Name prefix identifying canary classes.
pub const CANARY_PREFIX: &str = "secondary/dex";

/// Substring sentinel in a cold-start entry forcing a container flush.
pub const COLDSTART_END_MARKER: &str = "DexEndMarker";

/// Canonical name of the root object type; superclass of synthesized
/// canaries.
pub const OBJECT_CLASS_NAME: &str = "java/lang/Object";

/// Highest container index a flush may produce (containers are named by a
/// two-digit decimal index).
pub const MAX_CONTAINER_INDEX: usize = 99;

/// Builds the canary class name for a container index.
///
/// The primary container has index 0, so the first secondary's canary is
/// `secondary/dex01/Canary`.
///
/// # Example
///
/// ```rust
/// use dexpack::pack::config::canary_name;
///
/// assert_eq!(canary_name(1), "secondary/dex01/Canary");
/// assert_eq!(canary_name(42), "secondary/dex42/Canary");
/// ```
#[must_use]
pub fn canary_name(index: usize) -> String {
    format!("{CANARY_PREFIX}{index:02}/Canary")
}

/// Returns true if a class name marks a canary class.
#[must_use]
pub fn is_canary_name(name: &str) -> bool {
    name.starts_with(CANARY_PREFIX)
}

/// Hard capacity limits of one container.
///
/// The linear-alloc limit bounds the summed per-class loader-memory
/// estimate. The reference limits bound the deduplicated method and field
/// reference counts; the check is `>=`, so the effective upper bound is one
/// below the limit — a slot stays reserved for final patching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityLimits {
    /// Maximum summed linear-alloc estimate.
    pub linear_alloc: usize,

    /// Maximum distinct method references.
    pub method_refs: usize,

    /// Maximum distinct field references.
    pub field_refs: usize,
}

impl CapacityLimits {
    /// The modern profile: 11,600 KiB of linear alloc, 64Ki − 1 references.
    #[must_use]
    pub fn modern() -> Self {
        Self {
            linear_alloc: 11_600 * 1024,
            method_refs: 64 * 1024 - 1,
            field_refs: 64 * 1024 - 1,
        }
    }

    /// The legacy profile for old runtimes with a 2,600 KiB linear-alloc
    /// budget.
    #[must_use]
    pub fn legacy() -> Self {
        Self {
            linear_alloc: 2_600 * 1024,
            ..Self::modern()
        }
    }
}

impl Default for CapacityLimits {
    fn default() -> Self {
        Self::modern()
    }
}

/// Configuration for the packing engine.
#[derive(Debug, Clone)]
pub struct PackConfig {
    /// Append a canary class naming each secondary container (default:
    /// true).
    pub emit_canaries: bool,

    /// Run the static reachability pruner over the cold-start set
    /// (default: false).
    pub static_prune: bool,

    /// Treat the primary container like any other instead of holding its
    /// class set fixed (default: false).
    ///
    /// When false, output container 0 contains exactly the classes of
    /// input container 0, reordered so cold-start classes come first, and
    /// any overflow there is fatal.
    pub normal_primary_dex: bool,

    /// Capacity limits applied to every container.
    pub limits: CapacityLimits,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            emit_canaries: true,
            static_prune: false,
            normal_primary_dex: false,
            limits: CapacityLimits::default(),
        }
    }
}
