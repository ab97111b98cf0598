//! The packing pass.
//!
//! This module implements the cold-start-aware bin-packing planner over
//! class containers. Given input containers and an ordered list of
//! cold-start class names, the pass:
//!
//! 1. Builds the class lookup and scope from the input
//! 2. Optionally prunes cold-start classes no retained cold-start class
//!    still references (static reachability, run to a fixed point)
//! 3. Emits the primary container — held fixed by default, reordered so
//!    cold-start classes come first
//! 4. Emits secondary containers in cold-start order, splitting whenever a
//!    capacity limit would be exceeded, then the pruned cold-start classes,
//!    then every remaining class in original order
//! 5. Appends a canary class naming each secondary container's index
//!
//! If the first attempt produces more containers than the input had, the
//! engine retries with the early-cutoff policy disabled.
//!
//! # Key Components
//!
//! - [`PackEngine`] - Configured entry point running the pass
//! - [`PackConfig`] / [`CapacityLimits`] - Tunables and capacity profiles
//! - [`PackResult`] / [`PackStats`] - Output containers plus per-invocation
//!   statistics and diagnostics
//! - [`estimate_linear_alloc`] - Additive per-class loader-memory estimate

pub mod config;
pub mod estimate;
pub mod packer;
pub mod prune;
pub mod result;
pub mod tracker;

pub use config::{canary_name, is_canary_name, CapacityLimits, PackConfig};
pub use estimate::estimate_linear_alloc;
pub use packer::PackEngine;
pub use result::{PackResult, PackStats};
