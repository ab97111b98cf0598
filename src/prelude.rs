//! # dexpack Prelude
//!
//! This module provides a convenient prelude for the most commonly used
//! types from the dexpack library. Import this module to get quick access to
//! the essential types for modeling containers and running the packing pass.
//!
//! ```rust
//! use dexpack::prelude::*;
//! ```

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all dexpack operations
pub use crate::Error;

/// The result type used throughout dexpack
pub use crate::Result;

// ================================================================================================
// Main Entry Points
// ================================================================================================

/// The packing engine and its configuration
pub use crate::pack::{CapacityLimits, PackConfig, PackEngine};

/// Packing outcome: containers, statistics, diagnostics
pub use crate::pack::{PackResult, PackStats};

/// Per-class linear-allocation estimation
pub use crate::pack::estimate_linear_alloc;

/// Canary naming helpers
pub use crate::pack::{canary_name, is_canary_name};

// ================================================================================================
// Metadata Model
// ================================================================================================

/// Tagged handle into the reference pool
pub use crate::metadata::token::Token;

/// Interning registry for types and member references
pub use crate::metadata::pool::{MemberSpec, RefPool};

/// Class and method access flags
pub use crate::metadata::flags::{ClassAccessFlags, MethodAccessFlags};

/// Class, method, and instruction handles
pub use crate::metadata::class::{ClassBuilder, ClassRc, DexClass, DexMethod, Instruction};

/// Containers and scope construction
pub use crate::metadata::container::{
    build_class_lookup, build_class_scope, ClassLookup, DexContainer,
};

/// Diagnostics collection
pub use crate::metadata::diagnostics::{
    Diagnostic, DiagnosticCategory, DiagnosticSeverity, Diagnostics,
};
