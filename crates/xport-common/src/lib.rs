//! Common types and utilities for the xport export collector.
//!
//! This crate provides foundational types used across all xport crates:
//! - String interning (`Atom`, `Interner`)
//! - Traversal limits and thresholds

// String interning for class and type-parameter names
pub mod interner;
pub use interner::{Atom, Interner};

// Centralized limits and thresholds
pub mod limits;
