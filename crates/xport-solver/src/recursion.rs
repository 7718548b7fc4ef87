//! Recursion bounds for the hierarchy walk and the ancestor search.
//!
//! A validated class model is acyclic, but the walker also accepts providers
//! that never ran validation. [`RecursionGuard`] tracks the classes on the
//! active path so such a provider produces a named violation instead of a
//! stack overflow. Classes shared between branches (diamonds) leave the path
//! before the sibling branch enters them, so they are never reported.

use rustc_hash::FxHashSet;
use xport_common::limits;
use xport_model::ClassId;

/// Named limit presets for the two recursive phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionProfile {
    /// Transitive walk through non-exported classes.
    HierarchyWalk,
    /// Nearest explicitly exported ancestor search.
    AncestorSearch,
    Custom { max_depth: u32, max_iterations: u32 },
}

impl RecursionProfile {
    pub const fn max_depth(self) -> u32 {
        match self {
            Self::HierarchyWalk => limits::MAX_HIERARCHY_DEPTH,
            Self::AncestorSearch => limits::MAX_ANCESTOR_SEARCH_DEPTH,
            Self::Custom { max_depth, .. } => max_depth,
        }
    }

    /// Upper bound on classes entered by one walker.
    pub const fn max_iterations(self) -> u32 {
        match self {
            Self::HierarchyWalk | Self::AncestorSearch => limits::MAX_HIERARCHY_ITERATIONS,
            Self::Custom { max_iterations, .. } => max_iterations,
        }
    }
}

/// Outcome of [`RecursionGuard::enter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecursionResult {
    Entered,
    /// The class is already on the active path.
    Cycle,
    DepthExceeded,
    IterationExceeded,
}

/// Active-path tracker with depth and work bounds.
pub struct RecursionGuard {
    path: FxHashSet<ClassId>,
    iterations: u32,
    max_depth: u32,
    max_iterations: u32,
}

impl RecursionGuard {
    pub fn with_profile(profile: RecursionProfile) -> Self {
        Self {
            path: FxHashSet::default(),
            iterations: 0,
            max_depth: profile.max_depth(),
            max_iterations: profile.max_iterations(),
        }
    }

    /// Push `class` onto the active path.
    ///
    /// Every [`RecursionResult::Entered`] must be paired with a
    /// [`leave`](Self::leave) for the same class.
    pub fn enter(&mut self, class: ClassId) -> RecursionResult {
        self.iterations = self.iterations.saturating_add(1);
        if self.iterations > self.max_iterations {
            RecursionResult::IterationExceeded
        } else if self.path.len() as u32 >= self.max_depth {
            RecursionResult::DepthExceeded
        } else if !self.path.insert(class) {
            RecursionResult::Cycle
        } else {
            RecursionResult::Entered
        }
    }

    pub fn leave(&mut self, class: ClassId) {
        let removed = self.path.remove(&class);
        debug_assert!(removed, "left class #{} that was never entered", class.0);
    }

    #[inline]
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    #[inline]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }
}

#[cfg(test)]
#[path = "../tests/recursion_tests.rs"]
mod tests;
