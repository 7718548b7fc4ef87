//! Memoized transitive export collector.
//!
//! The public entry point of the solver. Code generators ask for the
//! boundary-visible ancestors of a type; the collector answers from its cache
//! when it has seen the same class applied to the same arguments before, and
//! runs a fresh [`HierarchyWalker`] otherwise.
//!
//! ## Cache key
//!
//! Entries are keyed by `(class, applied arguments)`, not by class alone:
//! `Box<Int>` and `Box<String>` yield `{Box<Int>}` and `{Box<String>}`
//! respectively and must never share an entry.
//!
//! ## Lifetime
//!
//! One collector per collection run. The cache is never invalidated while the
//! run is in progress; it assumes the class model is immutable for the
//! collector's lifetime. Independent runs (e.g. one per compilation unit on
//! separate threads) each own a collector and may share the model.

use crate::caches::query_trace;
use crate::recursion::RecursionProfile;
use crate::substitution::SubstitutionMap;
use crate::walker::{AppliedClass, HierarchyWalker, TypeSet};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::sync::Arc;
use tracing::debug;
use xport_model::{ClassMetadata, ExportClassifier, TypeRef, display_type, display_types};

/// Configuration for a [`TransitiveExportCollector`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CollectorOptions {
    /// Limits for the walk through non-exported classes.
    pub walk_profile: RecursionProfile,
    /// Limits for the nearest-explicit-ancestor search.
    pub search_profile: RecursionProfile,
}

impl Default for CollectorOptions {
    fn default() -> Self {
        Self {
            walk_profile: RecursionProfile::HierarchyWalk,
            search_profile: RecursionProfile::AncestorSearch,
        }
    }
}

/// Counters describing a collector's work so far.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CollectorStats {
    /// Calls to `collect`.
    pub queries: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    /// Queries for types not rooted at a class; answered empty, never cached.
    pub uncached_queries: u64,
    /// Entries currently held in the cache.
    pub cached_entries: usize,
}

impl CollectorStats {
    /// Fraction of cacheable queries served from the cache.
    pub fn hit_rate(&self) -> f64 {
        let cacheable = self.cache_hits + self.cache_misses;
        if cacheable == 0 {
            0.0
        } else {
            self.cache_hits as f64 / cacheable as f64
        }
    }
}

/// Collects the boundary-visible ancestor types of class types, memoized by
/// `(class, applied arguments)`.
pub struct TransitiveExportCollector<'a, M: ?Sized> {
    model: &'a M,
    options: CollectorOptions,
    cache: FxHashMap<AppliedClass, Arc<TypeSet>>,
    empty: Arc<TypeSet>,
    stats: CollectorStats,
}

impl<'a, M: ClassMetadata + ExportClassifier + ?Sized> TransitiveExportCollector<'a, M> {
    pub fn new(model: &'a M) -> Self {
        Self::with_options(model, CollectorOptions::default())
    }

    pub fn with_options(model: &'a M, options: CollectorOptions) -> Self {
        Self {
            model,
            options,
            cache: FxHashMap::default(),
            empty: Arc::new(TypeSet::default()),
            stats: CollectorStats::default(),
        }
    }

    /// The boundary-visible ancestor types of `ty`.
    ///
    /// Types whose classifier does not resolve to a class yield the empty set
    /// and are not cached.
    ///
    /// # Panics
    ///
    /// Panics on contract violations in the class model: inheritance cycles,
    /// hierarchies beyond the configured recursion limits, or type argument
    /// counts that do not match a class's type parameters.
    pub fn collect(&mut self, ty: &TypeRef) -> Arc<TypeSet> {
        self.stats.queries += 1;
        let model = self.model;
        let options = self.options;
        let class = model.resolve_class(ty).map(|class| class.id);

        let query_id = if query_trace::enabled() {
            let query_id = query_trace::next_query_id();
            query_trace::collect_start(
                query_id,
                "collect",
                class.map(|id| id.0),
                ty.args.len(),
            );
            Some(query_id)
        } else {
            None
        };

        let Some(class) = class else {
            self.stats.uncached_queries += 1;
            if let Some(query_id) = query_id {
                query_trace::collect_end(query_id, "collect", 0, false);
            }
            return Arc::clone(&self.empty);
        };

        let key = AppliedClass::new(class, &ty.args);
        let (result, cache_hit) = match self.cache.entry(key) {
            Entry::Occupied(entry) => {
                self.stats.cache_hits += 1;
                (Arc::clone(entry.get()), true)
            }
            Entry::Vacant(entry) => {
                self.stats.cache_misses += 1;
                let mut walker = HierarchyWalker::with_profiles(
                    model,
                    options.walk_profile,
                    options.search_profile,
                );
                let result = Arc::new(walker.walk(ty, &SubstitutionMap::new()));
                debug!(
                    ty = %display_type(model, ty),
                    result = %display_types(model, result.iter()),
                    "collected transitive export hierarchy"
                );
                (Arc::clone(entry.insert(result)), false)
            }
        };

        if let Some(query_id) = query_id {
            query_trace::collect_end(query_id, "collect", result.len(), cache_hit);
        }
        result
    }

    /// The de-duplicated union of the results for every type in `types`.
    pub fn collect_all<'t>(&mut self, types: impl IntoIterator<Item = &'t TypeRef>) -> TypeSet {
        let mut union = TypeSet::default();
        for ty in types {
            union.extend(self.collect(ty).iter().cloned());
        }
        union
    }

    /// The cached result for `ty`, without computing it.
    pub fn cached(&self, ty: &TypeRef) -> Option<Arc<TypeSet>> {
        let class = self.model.resolve_class(ty)?.id;
        let key = AppliedClass::new(class, &ty.args);
        self.cache.get(&key).cloned()
    }

    /// Number of cached entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    pub fn stats(&self) -> CollectorStats {
        CollectorStats {
            cached_entries: self.cache.len(),
            ..self.stats
        }
    }

    pub fn options(&self) -> &CollectorOptions {
        &self.options
    }

    pub fn model(&self) -> &'a M {
        self.model
    }

    /// Drop all cached results and statistics, starting a new run.
    pub fn reset(&mut self) {
        debug!(entries = self.cache.len(), "resetting export collector cache");
        self.cache.clear();
        self.stats = CollectorStats::default();
    }
}

#[cfg(test)]
#[path = "../tests/collector_tests.rs"]
mod tests;
