//! Centralized limits and thresholds for hierarchy traversal.
//!
//! A well-formed class model has no inheritance cycles and a modest depth, so
//! these limits are never reached in practice. They exist so that a broken
//! metadata provider produces a clear failure instead of a stack overflow.
//!
//! The solver wraps these values in named `RecursionProfile`s; prefer the
//! profiles at call sites.

/// Maximum depth of the declared-supertype chain followed by the walker.
///
/// Each level of the hierarchy walk adds a handful of stack frames (walk,
/// substitution, recursion guard). Real-world hierarchies rarely exceed a
/// depth of 20; 256 leaves ample headroom while staying far below the default
/// 8 MB stack.
///
/// ```text
/// class Leaf : Mid1<Int>
/// class Mid1<T> : Mid2<T>
/// class Mid2<T> : Mid3<List<T>>
/// ... 256 levels ...
/// ```
pub const MAX_HIERARCHY_DEPTH: u32 = 256;

/// Maximum number of distinct applied classes one walker enters.
///
/// The walker memoizes every applied class it finishes, so shared ancestors
/// in diamond-shaped hierarchies are entered once. The bound therefore grows
/// with the number of distinct `(class, arguments)` pairs, not with the
/// number of paths through the hierarchy.
pub const MAX_HIERARCHY_ITERATIONS: u32 = 1_000_000;

/// Maximum depth for the nearest-explicit-ancestor search.
///
/// The search only climbs declared supertypes, so it shares the walker's
/// depth budget.
pub const MAX_ANCESTOR_SEARCH_DEPTH: u32 = MAX_HIERARCHY_DEPTH;
