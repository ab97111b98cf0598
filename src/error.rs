//! Error handling for the packing pass.
//!
//! This module defines the [`Error`] enum covering the fatal conditions a
//! packing run can hit. Non-fatal conditions are recorded in the
//! per-invocation [`crate::metadata::diagnostics::Diagnostics`] instead and
//! never abort the pass.

use thiserror::Error;

/// The generic Error type, which provides coverage for all errors this library
/// can potentially return.
///
/// The packing pass distinguishes fatal conditions, which abort the pass
/// without producing any output, from non-fatal conditions, which are recorded
/// in the per-invocation [`crate::metadata::diagnostics::Diagnostics`] while
/// the pass runs to completion. Only the fatal conditions appear here:
///
/// - [`Error::PrimaryOverflow`] - A class cannot be placed into the primary
///   container without exceeding a capacity limit. The primary container is
///   loaded eagerly and its class set may be fixed by external contracts, so
///   it can never be split mid-packing.
/// - [`Error::TooManyContainers`] - A flush would produce a container index
///   beyond the supported range.
///
/// Non-fatal conditions — a cold-start entry that resolves to no class, a
/// canary class missing from the lookup (it is synthesized instead), or a
/// first packing attempt that grew the container count (the engine retries) —
/// never surface as errors.
///
/// # Examples
///
/// ```rust,ignore
/// use dexpack::{Error, PackConfig, PackEngine};
///
/// let engine = PackEngine::new(PackConfig::default());
/// match engine.run(&input, &mut pool, &order) {
///     Ok(result) => println!("{}", result.summary()),
///     Err(Error::PrimaryOverflow { class, .. }) => {
///         eprintln!("primary container cannot hold {}", class);
///     }
///     Err(e) => eprintln!("packing failed: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// Emitting a class into the primary container would exceed a capacity
    /// limit.
    ///
    /// The primary container cannot be flushed early, so an overflow there
    /// indicates inconsistent input or misconfiguration. The fields capture
    /// the tracker state at the point of failure: the running linear-alloc
    /// sum already includes the offending class, and the reference counts are
    /// the deduplicated set sizes after its references were added.
    #[error(
        "would have to do an early flush on the primary container emitting {class}: \
         linear alloc {la_size}:{la_limit}, method refs {method_refs}:{method_refs_limit}, \
         field refs {field_refs}:{field_refs_limit}"
    )]
    PrimaryOverflow {
        /// Canonical name of the class that could not be placed.
        class: String,
        /// Linear-alloc sum including the offending class.
        la_size: usize,
        /// Configured linear-alloc capacity.
        la_limit: usize,
        /// Distinct method references including the offending class's.
        method_refs: usize,
        /// Configured method reference capacity.
        method_refs_limit: usize,
        /// Distinct field references including the offending class's.
        field_refs: usize,
        /// Configured field reference capacity.
        field_refs_limit: usize,
    },

    /// A flush would produce a container with an index beyond the supported
    /// range.
    ///
    /// Secondary containers are named by a two-digit decimal index, so at
    /// most 100 containers (indices 0 through 99) can exist. The associated
    /// value is the index the flush attempted to use.
    #[error("max container number surpassed: {0}")]
    TooManyContainers(usize),
}
