//! Class metadata model for the packing planner.
//!
//! This module contains the in-memory representation of everything the pass
//! consumes: tokens identifying entries in the reference pool, the pool
//! itself, access flags, class and method handles with their bytecode
//! reference surfaces, containers, and the per-invocation diagnostics record.
//!
//! The model is deliberately a planner's view of the container format: it
//! keeps exactly the surfaces the pass reads — canonical names, reference
//! enumeration, access flags, the rename predicate — and nothing of the
//! on-disk encoding.
//!
//! # Key Components
//!
//! - [`crate::metadata::token::Token`] - Tagged handle into the reference pool
//! - [`crate::metadata::pool::RefPool`] - Interning registry for types and
//!   member references
//! - [`crate::metadata::class::DexClass`] - Class handle with reference
//!   gathering
//! - [`crate::metadata::container::DexContainer`] - Ordered class sequence,
//!   the unit of input and output
//! - [`crate::metadata::diagnostics::Diagnostics`] - Per-invocation
//!   diagnostic collection

pub mod class;
pub mod container;
pub mod diagnostics;
pub mod flags;
pub mod pool;
pub mod token;

pub use class::{ClassBuilder, ClassRc, DexClass, DexMethod, Instruction};
pub use container::{build_class_lookup, build_class_scope, ClassLookup, DexContainer};
pub use diagnostics::{Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics};
pub use flags::{ClassAccessFlags, MethodAccessFlags};
pub use pool::{MemberSpec, RefPool};
pub use token::Token;
