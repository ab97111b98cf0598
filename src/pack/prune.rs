//! Static reachability pruning over the cold-start set.
//!
//! A cold-start class earns its place on the hot path only if some other
//! cold-start class still reaches it. This module computes the complement:
//! the cold-start classes nothing retained references, which the packer
//! then demotes behind the referenced ones.
//!
//! The analysis runs to a fixed point because dropping one class can
//! disconnect others: each iteration rescans the bytecode of the classes
//! retained by the previous iteration, rebuilds the reachable set, and
//! re-partitions the cold-start set from scratch. It terminates when the
//! unreferenced count stops changing. Class reference graphs may be
//! cyclic, so the iteration collects hits in one sweep and subtracts in a
//! second instead of descending recursively.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::metadata::class::ClassRc;
use crate::metadata::container::ClassLookup;
use crate::metadata::diagnostics::{DiagnosticCategory, Diagnostics};
use crate::metadata::pool::RefPool;
use crate::metadata::token::Token;

/// Finds the cold-start classes no retained cold-start class references.
///
/// Returns the type tokens of the classes to treat as no longer linked.
/// When `enabled` is false the analysis is skipped entirely and the result
/// is empty.
///
/// A class is only ever dropped if it is renameable; classes pinned by
/// external contracts (reflective or native callers) count as reachable,
/// as does everything their type lists name. Entries of `coldstart_order`
/// that resolve to no class are ignored here; the packer reports them.
#[must_use]
pub fn find_unreferenced_coldstart(
    scope: &[ClassRc],
    clookup: &ClassLookup,
    pool: &RefPool,
    coldstart_order: &[String],
    enabled: bool,
    diagnostics: &Diagnostics,
) -> FxHashSet<Token> {
    let mut unreferenced = FxHashSet::default();
    if !enabled {
        return unreferenced;
    }

    // The membership set is fixed for the whole analysis; iterations only
    // shrink the set of classes whose bytecode is scanned.
    let mut coldstart: Vec<ClassRc> = Vec::new();
    let mut coldstart_set: FxHashSet<Token> = FxHashSet::default();
    for name in coldstart_order {
        if let Some(class) = clookup.get(name.as_str()) {
            if coldstart_set.insert(class.type_token()) {
                coldstart.push(Arc::clone(class));
            }
        }
    }

    let mut input_scope: Vec<ClassRc> = scope.to_vec();
    let mut old_no_ref = usize::MAX;

    loop {
        let mut hit: FxHashSet<Token> = FxHashSet::default();

        // Collect cold-start classes referenced from the bytecode of the
        // classes still under consideration, excluding self-references.
        for class in &input_scope {
            if !coldstart_set.contains(&class.type_token()) {
                continue;
            }
            for method in class.methods() {
                for inst in method.code() {
                    let Some(operand) = inst.metadata_ref() else {
                        continue;
                    };
                    let Some(owner) = pool.owner_of(operand) else {
                        continue;
                    };
                    if owner == class.type_token() {
                        continue;
                    }
                    let Some(owner_name) = pool.type_name(owner) else {
                        continue;
                    };
                    let Some(target) = clookup.get(owner_name) else {
                        continue;
                    };
                    if coldstart_set.contains(&target.type_token()) {
                        hit.insert(target.type_token());
                    }
                }
            }
        }

        // Classes that might be entered from native or reflective code
        // must never be dropped.
        for class in scope {
            if !class.can_rename() {
                hit.insert(class.type_token());
            }
        }

        // Everything a hit class names through its type list is reachable
        // too, even without a referencing opcode.
        let mut closure: Vec<Token> = Vec::new();
        for class in &input_scope {
            if !hit.contains(&class.type_token()) {
                continue;
            }
            for ty in class.gather_types() {
                let Some(name) = pool.type_name(ty) else {
                    continue;
                };
                if let Some(target) = clookup.get(name) {
                    closure.push(target.type_token());
                }
            }
        }
        hit.extend(closure);

        let mut retained: Vec<ClassRc> = Vec::new();
        let mut no_ref = 0usize;
        for class in &coldstart {
            if class.can_rename() && !hit.contains(&class.type_token()) {
                no_ref += 1;
                unreferenced.insert(class.type_token());
            } else {
                retained.push(Arc::clone(class));
            }
        }

        diagnostics.info(
            DiagnosticCategory::Prune,
            format!("found {no_ref} classes in coldstart with no references"),
        );

        if no_ref == old_no_ref {
            break;
        }
        old_no_ref = no_ref;
        input_scope = retained;
    }

    unreferenced
}
