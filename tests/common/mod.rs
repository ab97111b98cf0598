#![allow(dead_code)]

//! Shared fixtures for the packing integration tests.
//!
//! Classes are modeled through the public builder API: each helper interns
//! the tokens it needs in a test-owned [`RefPool`] so reference identities
//! behave exactly as they would for loaded input.

use dexpack::prelude::*;

/// Test fixture owning the reference pool the modeled classes intern into.
pub struct Fixture {
    pub pool: RefPool,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            pool: RefPool::new(),
        }
    }

    /// A class with one declared virtual method and no fields.
    pub fn class(&mut self, name: &str) -> ClassRc {
        self.class_with(name, 1, 0)
    }

    /// A class declaring `methods` virtual methods and `fields` instance
    /// fields, each with a distinct token.
    pub fn class_with(&mut self, name: &str, methods: usize, fields: usize) -> ClassRc {
        let ty = self.pool.intern_type(name);
        let mut builder = ClassBuilder::new(ty, name).access(ClassAccessFlags::PUBLIC);
        for i in 0..methods {
            let token = self.pool.intern_method(ty, &format!("m{i}"));
            builder =
                builder.virtual_method(DexMethod::abstract_method(token, MethodAccessFlags::PUBLIC));
        }
        for i in 0..fields {
            let token = self.pool.intern_field(ty, &format!("f{i}"));
            builder = builder.instance_field(token);
        }
        builder.build()
    }

    /// A class whose single method invokes `m0` on each target class.
    pub fn class_invoking(&mut self, name: &str, targets: &[&str]) -> ClassRc {
        let ty = self.pool.intern_type(name);
        let own = self.pool.intern_method(ty, "m0");
        let mut code = Vec::new();
        for target in targets {
            let target_ty = self.pool.intern_type(target);
            code.push(Instruction::Invoke(self.pool.intern_method(target_ty, "m0")));
        }
        ClassBuilder::new(ty, name)
            .access(ClassAccessFlags::PUBLIC)
            .virtual_method(DexMethod::new(own, MethodAccessFlags::PUBLIC, code))
            .build()
    }

    /// Like [`Fixture::class`], but pinned by an external contract.
    pub fn pinned_class(&mut self, name: &str) -> ClassRc {
        let ty = self.pool.intern_type(name);
        let token = self.pool.intern_method(ty, "m0");
        ClassBuilder::new(ty, name)
            .access(ClassAccessFlags::PUBLIC)
            .virtual_method(DexMethod::abstract_method(token, MethodAccessFlags::PUBLIC))
            .pinned()
            .build()
    }
}

/// Class names of one container, in order.
pub fn names(container: &DexContainer) -> Vec<String> {
    container
        .iter()
        .map(|class| class.name().to_string())
        .collect()
}

/// Class names of every container, in order.
pub fn all_names(containers: &[DexContainer]) -> Vec<Vec<String>> {
    containers.iter().map(names).collect()
}

/// Builds a cold-start ordering from string literals.
pub fn order(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|s| (*s).to_string()).collect()
}

/// Asserts every container satisfies the configured capacity limits, with
/// reference counts recomputed from scratch (strict bound: one below the
/// limit).
pub fn assert_capacities(containers: &[DexContainer], limits: &CapacityLimits) {
    for (index, container) in containers.iter().enumerate() {
        let mut mrefs = std::collections::HashSet::new();
        let mut frefs = std::collections::HashSet::new();
        let mut la = 0usize;
        for class in container {
            mrefs.extend(class.gather_methods());
            frefs.extend(class.gather_fields());
            la += estimate_linear_alloc(class);
        }
        assert!(
            la <= limits.linear_alloc,
            "container {index} exceeds linear alloc: {la}"
        );
        assert!(
            mrefs.len() < limits.method_refs,
            "container {index} exceeds method refs: {}",
            mrefs.len()
        );
        assert!(
            frefs.len() < limits.field_refs,
            "container {index} exceeds field refs: {}",
            frefs.len()
        );
    }
}
