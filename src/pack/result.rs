//! Packing result types.
//!
//! This module contains the [`PackResult`] struct which encapsulates the
//! outcome of a packing run: the output containers, per-invocation
//! statistics, and the diagnostics collected along the way. Nothing here is
//! process-wide — two runs never share counters, so invocations need not be
//! serialized.

use crate::metadata::class::DexClass;
use crate::metadata::container::DexContainer;
use crate::metadata::diagnostics::Diagnostics;

/// Statistics accumulated over one packing invocation.
///
/// Reference counts are summed per flushed container after deduplication
/// within each container, so a method referenced from two containers counts
/// twice — the figure mirrors what the containers will actually carry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackStats {
    /// Classes placed into output containers (canaries included).
    pub classes: usize,

    /// Distinct method references, summed per container.
    pub method_refs: usize,

    /// Distinct field references, summed per container.
    pub field_refs: usize,

    /// Declared direct methods across emitted classes.
    pub direct_methods: usize,

    /// Declared static methods across emitted classes (a subset of the
    /// direct methods).
    pub static_methods: usize,

    /// Declared virtual methods across emitted classes.
    pub virtual_methods: usize,

    /// Cold-start classes that landed in the primary container.
    pub coldstart_in_primary: usize,

    /// Cold-start entries skipped in the primary phase because pruning cut
    /// them loose.
    pub skipped_primary: usize,

    /// Cold-start entries skipped in the secondary phase because pruning
    /// cut them loose.
    pub skipped_secondary: usize,

    /// Packing attempts the engine ran (2 when the retry fired).
    pub attempts: usize,
}

impl PackStats {
    /// Folds one emitted class into the method counters.
    pub(crate) fn record_class(&mut self, class: &DexClass) {
        self.direct_methods += class.direct_methods().len();
        self.static_methods += class
            .direct_methods()
            .iter()
            .filter(|method| method.is_static())
            .count();
        self.virtual_methods += class.virtual_methods().len();
    }

    /// Folds one flushed container into the totals.
    pub(crate) fn record_container(&mut self, classes: usize, mrefs: usize, frefs: usize) {
        self.classes += classes;
        self.method_refs += mrefs;
        self.field_refs += frefs;
    }

    /// Renders the counters as a one-line report.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} mrefs, {} frefs, {} cls, {} dmeth, {} smeth, {} vmeth",
            self.method_refs,
            self.field_refs,
            self.classes,
            self.direct_methods,
            self.static_methods,
            self.virtual_methods
        )
    }
}

/// Result of running the packing engine.
///
/// # Example
///
/// ```rust,ignore
/// use dexpack::{PackConfig, PackEngine};
///
/// let engine = PackEngine::new(PackConfig::default());
/// let result = engine.run(&input, &mut pool, &order)?;
///
/// println!("{}", result.summary());
/// for diagnostic in result.diagnostics.iter() {
///     println!("{}", diagnostic);
/// }
/// # Ok::<(), dexpack::Error>(())
/// ```
#[derive(Debug)]
pub struct PackResult {
    /// The output containers; index 0 is the primary.
    pub containers: Vec<DexContainer>,

    /// Per-invocation statistics.
    pub stats: PackStats,

    /// Diagnostics collected while packing.
    pub diagnostics: Diagnostics,
}

impl PackResult {
    /// Number of secondary containers produced.
    #[must_use]
    pub fn secondary_count(&self) -> usize {
        self.containers.len().saturating_sub(1)
    }

    /// Generates a human-readable summary of the packing outcome.
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "packed {} containers ({} secondary) in {} attempt(s): {}",
            self.containers.len(),
            self.secondary_count(),
            self.stats.attempts,
            self.stats.summary()
        )
    }
}
