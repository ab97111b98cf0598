//! The packing engine.
//!
//! [`PackEngine`] drives the whole pass: it builds the class lookup and
//! scope from the input containers, runs the cold-start pruner, emits the
//! primary container (held fixed unless configured otherwise), then fills
//! secondary containers in cold-start order followed by the pruned
//! cold-start classes and the remaining scope, flushing whenever a capacity
//! limit would be crossed. A flush appends the canary class naming the new
//! container's index, synthesizing one when the input does not provide it.
//!
//! Emission is strictly order-preserving and deterministic: a class that
//! would overflow the container in progress becomes the first class of the
//! next one, and the flushed container's recorded statistics cover only the
//! classes it actually holds.
//!
//! If the first attempt produces more containers than the input had, the
//! engine reruns once with the early-cutoff policy disabled and returns the
//! second attempt's result.

use std::sync::Arc;

use crate::error::Error;
use crate::metadata::class::{ClassBuilder, ClassRc};
use crate::metadata::container::{build_class_lookup, build_class_scope, DexContainer};
use crate::metadata::diagnostics::{DiagnosticCategory, Diagnostics};
use crate::metadata::flags::ClassAccessFlags;
use crate::metadata::pool::RefPool;
use crate::pack::config::{
    canary_name, is_canary_name, PackConfig, COLDSTART_END_MARKER, MAX_CONTAINER_INDEX,
    OBJECT_CLASS_NAME,
};
use crate::pack::estimate::estimate_linear_alloc;
use crate::pack::prune::find_unreferenced_coldstart;
use crate::pack::result::{PackResult, PackStats};
use crate::pack::tracker::{container_lookup, EmitTracker};
use crate::Result;

/// Configured entry point for the packing pass.
///
/// The engine is stateless between runs; all mutable state lives in a
/// per-invocation [`PackRun`], so a single engine may be reused for any
/// number of sequential invocations.
///
/// # Example
///
/// ```rust,ignore
/// use dexpack::{PackConfig, PackEngine};
///
/// let engine = PackEngine::new(PackConfig::default());
/// let result = engine.run(&input, &mut pool, &order)?;
/// assert!(result.containers.len() >= 1);
/// # Ok::<(), dexpack::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct PackEngine {
    config: PackConfig,
}

impl PackEngine {
    /// Creates an engine with the given configuration.
    #[must_use]
    pub fn new(config: PackConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Runs the pass over the input containers.
    ///
    /// The input is read-only; the result carries fresh containers sharing
    /// the same class handles. The pool is used to resolve instruction
    /// operands and to intern synthesized canary types.
    ///
    /// If the first attempt grows the container count beyond the input's,
    /// a second attempt runs with the early-cutoff policy disabled and its
    /// result is returned; `stats.attempts` reports which happened.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PrimaryOverflow`] if a class cannot be placed into
    /// the fixed primary container, and [`Error::TooManyContainers`] if a
    /// flush would exceed the container index range. No output is produced
    /// on error.
    pub fn run(
        &self,
        input: &[DexContainer],
        pool: &mut RefPool,
        coldstart_order: &[String],
    ) -> Result<PackResult> {
        let diagnostics = Diagnostics::new();

        let (mut containers, mut stats) =
            self.run_once(input, pool, coldstart_order, true, &diagnostics)?;
        let mut attempts = 1;

        if containers.len() > input.len() {
            diagnostics.warning(
                DiagnosticCategory::General,
                format!(
                    "packing grew the number of containers from {} to {}, \
                     retrying without cutting off",
                    input.len(),
                    containers.len()
                ),
            );
            attempts = 2;
            (containers, stats) =
                self.run_once(input, pool, coldstart_order, false, &diagnostics)?;
        }

        stats.attempts = attempts;
        Ok(PackResult {
            containers,
            stats,
            diagnostics,
        })
    }

    /// One packing attempt.
    ///
    /// `allow_cutting_off` is reserved flush policy; it is recorded in the
    /// run trace and drives only the caller's retry decision.
    fn run_once(
        &self,
        input: &[DexContainer],
        pool: &mut RefPool,
        coldstart_order: &[String],
        allow_cutting_off: bool,
        diagnostics: &Diagnostics,
    ) -> Result<(Vec<DexContainer>, PackStats)> {
        if input.is_empty() {
            return Ok((Vec::new(), PackStats::default()));
        }

        diagnostics.info(
            DiagnosticCategory::General,
            format!(
                "packing {} containers, {} coldstart entries, cutting off: {}",
                input.len(),
                coldstart_order.len(),
                allow_cutting_off
            ),
        );

        let clookup = build_class_lookup(input);
        let scope = build_class_scope(input);
        let unreferenced = find_unreferenced_coldstart(
            &scope,
            &clookup,
            pool,
            coldstart_order,
            self.config.static_prune,
            diagnostics,
        );

        let mut run = PackRun {
            config: &self.config,
            pool,
            diagnostics,
            outputs: Vec::new(),
            stats: PackStats::default(),
        };
        let mut det = EmitTracker::with_lookup(clookup);

        // The primary container is loaded eagerly and its class set may be
        // fixed by external contracts. Unless configured otherwise it is
        // emitted through its own tracker: cold-start classes first, then
        // the remaining primary classes in their original order.
        if !self.config.normal_primary_dex {
            let primary = &input[0];
            let mut primary_det = EmitTracker::with_lookup(container_lookup(primary.classes()));

            for name in coldstart_order {
                let Some(class) = primary_det.lookup(name).cloned() else {
                    continue;
                };
                if unreferenced.contains(&class.type_token()) {
                    diagnostics.info(
                        DiagnosticCategory::Prune,
                        format!("{} no longer linked to coldstart set", class.name()),
                    );
                    run.stats.skipped_primary += 1;
                    continue;
                }
                run.emit_class(&mut primary_det, &class, true)?;
                run.stats.coldstart_in_primary += 1;
            }
            for class in primary.iter() {
                run.emit_class(&mut primary_det, class, true)?;
            }

            diagnostics.info(
                DiagnosticCategory::General,
                format!(
                    "{} of {} classes in primary container from coldstart list",
                    run.stats.coldstart_in_primary,
                    primary_det.pending()
                ),
            );
            run.flush_primary(&mut primary_det);

            // The primary classes are done; the main tracker must never
            // emit them again.
            for class in primary.iter() {
                det.mark_emitted(class);
            }
        }

        // Secondary containers fill in cold-start order. An entry that
        // resolves to nothing is ignored unless it carries the end-marker
        // sentinel, which forces a flush at that position.
        for name in coldstart_order {
            match det.lookup(name).cloned() {
                None => {
                    if name.contains(COLDSTART_END_MARKER) {
                        diagnostics.info(
                            DiagnosticCategory::ColdStart,
                            "terminating container due to end marker",
                        );
                        run.flush_secondary(&mut det)?;
                    } else {
                        diagnostics.info(
                            DiagnosticCategory::ColdStart,
                            format!("no such entry {name}"),
                        );
                    }
                }
                Some(class) => {
                    if unreferenced.contains(&class.type_token()) {
                        diagnostics.info(
                            DiagnosticCategory::Prune,
                            format!("{} no longer linked to coldstart set", class.name()),
                        );
                        run.stats.skipped_secondary += 1;
                        continue;
                    }
                    run.emit_class(&mut det, &class, false)?;
                }
            }
        }

        // Cold-start classes the pruner cut loose are still part of the
        // output; they just land after the referenced ones.
        for name in coldstart_order {
            if let Some(class) = det.lookup(name).cloned() {
                if unreferenced.contains(&class.type_token()) {
                    run.emit_class(&mut det, &class, false)?;
                }
            }
        }

        // Everything the cold-start list did not name, in original order.
        for class in &scope {
            run.emit_class(&mut det, class, false)?;
        }

        if det.pending() > 0 {
            run.flush_secondary(&mut det)?;
        }

        diagnostics.info(
            DiagnosticCategory::General,
            format!(
                "secondary container count {}",
                run.outputs.len().saturating_sub(1)
            ),
        );

        Ok((run.outputs, run.stats))
    }
}

/// Mutable state of one packing attempt.
struct PackRun<'a> {
    config: &'a PackConfig,
    pool: &'a mut RefPool,
    diagnostics: &'a Diagnostics,
    outputs: Vec<DexContainer>,
    stats: PackStats,
}

impl PackRun<'_> {
    /// Schedules a class into the container in progress.
    ///
    /// Already-emitted classes and input canaries are skipped. Capacity is
    /// checked against the reference sets including the new class; on
    /// overflow the container is flushed with the pre-add snapshot counts
    /// and the class seeds the next container. Overflow in the primary is
    /// fatal.
    fn emit_class(
        &mut self,
        det: &mut EmitTracker,
        class: &ClassRc,
        is_primary: bool,
    ) -> Result<()> {
        if det.is_emitted(class) {
            return Ok(());
        }
        if is_canary_name(class.name()) {
            return Ok(());
        }

        let la = estimate_linear_alloc(class);
        let mrefs_before = det.mrefs.len();
        let frefs_before = det.frefs.len();
        det.gather_refs(class);

        let limits = &self.config.limits;
        if det.la_size + la > limits.linear_alloc
            || det.mrefs.len() >= limits.method_refs
            || det.frefs.len() >= limits.field_refs
        {
            if is_primary {
                return Err(Error::PrimaryOverflow {
                    class: class.name().to_string(),
                    la_size: det.la_size + la,
                    la_limit: limits.linear_alloc,
                    method_refs: det.mrefs.len(),
                    method_refs_limit: limits.method_refs,
                    field_refs: det.frefs.len(),
                    field_refs_limit: limits.field_refs,
                });
            }
            self.flush_secondary_with(det, mrefs_before, frefs_before)?;
            det.gather_refs(class);
        }

        det.la_size += la;
        det.outs.push(Arc::clone(class));
        det.mark_emitted(class);
        self.stats.record_class(class);
        Ok(())
    }

    /// Flushes the container in progress as a secondary container.
    fn flush_secondary(&mut self, det: &mut EmitTracker) -> Result<()> {
        let mrefs = det.mrefs.len();
        let frefs = det.frefs.len();
        self.flush_secondary_with(det, mrefs, frefs)
    }

    /// Flushes as a secondary container, reporting the given snapshot
    /// counts (the overflow path excludes the seeding class's references
    /// from the flushed container's statistics).
    fn flush_secondary_with(
        &mut self,
        det: &mut EmitTracker,
        mrefs_count: usize,
        frefs_count: usize,
    ) -> Result<()> {
        // Never emit an empty container.
        if det.pending() == 0 {
            return Ok(());
        }

        if self.config.emit_canaries {
            let index = self.outputs.len();
            if index > MAX_CONTAINER_INDEX {
                return Err(Error::TooManyContainers(index));
            }
            let name = canary_name(index);
            let canary = match det.lookup(&name).cloned() {
                Some(class) => class,
                None => {
                    self.diagnostics.warning(
                        DiagnosticCategory::Canary,
                        format!("no canary class {name} found"),
                    );
                    self.synthesize_canary(&name)
                }
            };
            det.outs.push(canary);
        }

        self.flush(det, mrefs_count, frefs_count);
        Ok(())
    }

    /// Flushes the primary container: no canary, emitted even when empty.
    fn flush_primary(&mut self, det: &mut EmitTracker) {
        let mrefs = det.mrefs.len();
        let frefs = det.frefs.len();
        self.flush(det, mrefs, frefs);
    }

    /// Terminates the container in progress and appends it to the output.
    fn flush(&mut self, det: &mut EmitTracker, mrefs_count: usize, frefs_count: usize) {
        let la_size = det.la_size;
        let classes = det.take_container();

        self.diagnostics.info(
            DiagnosticCategory::Capacity,
            format!(
                "terminating container at {} classes, linear alloc {}:{}, \
                 mrefs {}:{}, frefs {}:{}",
                classes.len(),
                la_size,
                self.config.limits.linear_alloc,
                mrefs_count,
                self.config.limits.method_refs,
                frefs_count,
                self.config.limits.field_refs
            ),
        );

        self.stats
            .record_container(classes.len(), mrefs_count, frefs_count);
        self.outputs.push(DexContainer::from_classes(classes));
    }

    /// Materializes the canary class for a container that has none: a
    /// public abstract interface extending the root object type.
    fn synthesize_canary(&mut self, name: &str) -> ClassRc {
        let ty = self.pool.intern_type(name);
        let object = self.pool.intern_type(OBJECT_CLASS_NAME);
        ClassBuilder::new(ty, name)
            .access(
                ClassAccessFlags::PUBLIC
                    | ClassAccessFlags::INTERFACE
                    | ClassAccessFlags::ABSTRACT,
            )
            .superclass(object)
            .build()
    }
}
