// Copyright 2026 the dexpack authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![deny(missing_docs)]
#![allow(dead_code)]

//! # dexpack
//!
//! A cold-start-aware class packing planner for applications whose bytecode is
//! split across multiple container files ("dex" units). Each container carries
//! hard capacity limits — distinct method references, distinct field
//! references, and an estimated linear-allocation cost approximating runtime
//! loader memory. `dexpack` reorganizes classes across containers so that the
//! classes touched during application startup are packed together and placed
//! first, reducing page faults and cold-start latency, while every capacity
//! limit is respected.
//!
//! `dexpack` is a planner, not a packager: it consumes in-memory class handles
//! and produces a new partitioning of the same classes into containers. It
//! does not parse or emit the on-disk container format, does not rewrite
//! bytecode, and does not rename symbols.
//!
//! # Architecture
//!
//! The library is organized into two layers:
//!
//! - **Metadata Layer**: the class data model — tokens, the reference pool,
//!   access flags, class/method/instruction handles, containers, and the
//!   per-invocation diagnostics record
//! - **Pack Layer**: the packing pass — capacity configuration, the
//!   linear-allocation estimator, the emit tracker, the cold-start pruner,
//!   and the packing engine with its retry policy
//!
//! ## Key Components
//!
//! - [`crate::PackEngine`] - Main entry point for running the packing pass
//! - [`crate::PackConfig`] - Pass configuration (canaries, pruning, limits)
//! - [`crate::PackResult`] - Output containers, statistics, and diagnostics
//! - [`crate::metadata`] - Class model, reference pool, and containers
//! - [`crate::pack`] - Packing pass internals
//! - [`crate::prelude`] - Convenient re-exports of commonly used types
//! - [`crate::Error`] and [`crate::Result`] - Error handling
//!
//! # Usage Examples
//!
//! ## Quick Start
//!
//! ```rust
//! use dexpack::prelude::*;
//!
//! let mut pool = RefPool::new();
//!
//! // Model two classes in a single input container.
//! let object = pool.intern_type("java/lang/Object");
//! let main_ty = pool.intern_type("com/app/Main");
//! let util_ty = pool.intern_type("com/app/Util");
//!
//! let main = ClassBuilder::new(main_ty, "com/app/Main")
//!     .access(ClassAccessFlags::PUBLIC)
//!     .superclass(object)
//!     .build();
//! let util = ClassBuilder::new(util_ty, "com/app/Util")
//!     .access(ClassAccessFlags::PUBLIC)
//!     .superclass(object)
//!     .build();
//!
//! let input = vec![DexContainer::from_classes(vec![main, util])];
//!
//! // Pack with the cold-start ordering observed at startup.
//! let order = vec!["com/app/Util".to_string()];
//! let engine = PackEngine::new(PackConfig::default());
//! let result = engine.run(&input, &mut pool, &order)?;
//!
//! println!("{}", result.summary());
//! # Ok::<(), dexpack::Error>(())
//! ```
//!
//! # Determinism
//!
//! For identical inputs — the same classes, the same cold-start ordering, the
//! same configuration — the pass produces an identical container sequence.
//! All state is per-invocation; nothing process-wide is mutated, so separate
//! invocations need not be serialized.

pub mod error;
pub mod metadata;
pub mod pack;
pub mod prelude;

pub use error::Error;

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

pub use pack::{PackConfig, PackEngine, PackResult};
