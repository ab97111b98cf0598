//! End-to-end tests for static reachability pruning through the engine.

mod common;

use common::{all_names, names, order, Fixture};
use dexpack::prelude::*;

fn prune_config() -> PackConfig {
    PackConfig {
        emit_canaries: false,
        static_prune: true,
        ..PackConfig::default()
    }
}

/// A cold-start class nothing references is demoted behind the referenced
/// ones, not removed.
#[test]
fn test_unreferenced_class_demoted_behind_referenced() {
    let mut fixture = Fixture::new();
    let primary = DexContainer::from_classes(vec![fixture.class("com/app/Primary")]);
    // The entry point is reached reflectively, so it is pinned; it invokes
    // B, keeping B linked.
    let a = {
        let ty = fixture.pool.intern_type("com/app/APinned");
        let own = fixture.pool.intern_method(ty, "m0");
        let b_ty = fixture.pool.intern_type("com/app/B");
        let callee = fixture.pool.intern_method(b_ty, "m0");
        ClassBuilder::new(ty, "com/app/APinned")
            .access(ClassAccessFlags::PUBLIC)
            .virtual_method(DexMethod::new(
                own,
                MethodAccessFlags::PUBLIC,
                vec![Instruction::Invoke(callee)],
            ))
            .pinned()
            .build()
    };
    let secondary = DexContainer::from_classes(vec![
        a,
        fixture.class("com/app/B"),
        fixture.class("com/app/C"),
    ]);
    let input = vec![primary, secondary];

    let coldstart = order(&["com/app/APinned", "com/app/B", "com/app/C"]);
    let result = PackEngine::new(prune_config())
        .run(&input, &mut fixture.pool, &coldstart)
        .unwrap();

    // C is still in the output, after the classes the set retains.
    assert_eq!(
        names(&result.containers[1]),
        vec!["com/app/APinned", "com/app/B", "com/app/C"]
    );
    assert_eq!(result.stats.skipped_secondary, 1);
    assert_eq!(result.stats.skipped_primary, 0);

    let prune_notes = result.diagnostics.by_category(DiagnosticCategory::Prune);
    assert!(prune_notes
        .iter()
        .any(|d| d.message.contains("no longer linked to coldstart set")));
}

/// Pruning a primary cold-start entry costs it its priority slot, never its
/// place in the primary container.
#[test]
fn test_pruned_primary_class_keeps_its_container() {
    let mut fixture = Fixture::new();
    let primary =
        DexContainer::from_classes(vec![fixture.class("com/app/X"), fixture.class("com/app/Y")]);
    let input = vec![primary];

    let coldstart = order(&["com/app/X"]);
    let result = PackEngine::new(prune_config())
        .run(&input, &mut fixture.pool, &coldstart)
        .unwrap();

    assert_eq!(
        all_names(&result.containers),
        vec![vec!["com/app/X".to_string(), "com/app/Y".to_string()]]
    );
    assert_eq!(result.stats.skipped_primary, 1);
    assert_eq!(result.stats.coldstart_in_primary, 0);
}

/// A chain whose head nothing references collapses transitively across
/// iterations.
#[test]
fn test_transitive_pruning_through_engine() {
    let mut fixture = Fixture::new();
    let primary = DexContainer::from_classes(vec![fixture.class("com/app/Primary")]);
    let pinned = fixture.pinned_class("com/app/Keep");
    let x = fixture.class_invoking("com/app/X", &["com/app/Y"]);
    let y = fixture.class_invoking("com/app/Y", &["com/app/Z"]);
    let z = fixture.class("com/app/Z");
    let secondary = DexContainer::from_classes(vec![pinned, x, y, z]);
    let input = vec![primary, secondary];

    let coldstart = order(&["com/app/Keep", "com/app/X", "com/app/Y", "com/app/Z"]);
    let result = PackEngine::new(prune_config())
        .run(&input, &mut fixture.pool, &coldstart)
        .unwrap();

    // Keep retains its slot; X, Y, Z are all demoted, in list order.
    assert_eq!(
        names(&result.containers[1]),
        vec!["com/app/Keep", "com/app/X", "com/app/Y", "com/app/Z"]
    );
    assert_eq!(result.stats.skipped_secondary, 3);
}

/// With pruning disabled the cold-start ordering is honored as given.
#[test]
fn test_disabled_pruning_keeps_everything() {
    let mut fixture = Fixture::new();
    let primary = DexContainer::from_classes(vec![fixture.class("com/app/Primary")]);
    let secondary =
        DexContainer::from_classes(vec![fixture.class("com/app/B"), fixture.class("com/app/C")]);
    let input = vec![primary, secondary];

    let config = PackConfig {
        emit_canaries: false,
        static_prune: false,
        ..PackConfig::default()
    };
    let coldstart = order(&["com/app/C", "com/app/B"]);
    let result = PackEngine::new(config)
        .run(&input, &mut fixture.pool, &coldstart)
        .unwrap();

    assert_eq!(names(&result.containers[1]), vec!["com/app/C", "com/app/B"]);
    assert_eq!(result.stats.skipped_secondary, 0);
    assert!(result
        .diagnostics
        .by_category(DiagnosticCategory::Prune)
        .is_empty());
}
