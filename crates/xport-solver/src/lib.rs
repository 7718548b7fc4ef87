//! Transitive Export Solver
//!
//! Computes which ancestor types of a class must be visible at the language
//! boundary when that class crosses it. It uses:
//!
//! - **Persistent substitution maps**: type parameters are bound per hierarchy
//!   level without copying outer bindings
//! - **Recursion guards**: cyclic or runaway class models fail loudly
//! - **Memoization**: results are cached by `(class, applied arguments)` for
//!   the lifetime of one collection run
//!
//! The class model and export classification come from `xport-model`; this
//! crate never mutates them.
mod caches;
pub mod collector;
pub mod recursion;
pub mod substitution;
pub mod walker;

pub use collector::{CollectorOptions, CollectorStats, TransitiveExportCollector};
pub use recursion::{RecursionGuard, RecursionProfile, RecursionResult};
pub use substitution::{SubstitutionMap, Substitutor};
pub use walker::{HierarchyWalker, TypeSet};

// Test modules are loaded by their source files via #[path = "../tests/..."] declarations:
// collector_tests: loaded from collector.rs
// recursion_tests: loaded from recursion.rs
// substitution_tests: loaded from substitution.rs
// walker_tests: loaded from walker.rs
