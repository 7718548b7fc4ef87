//! Transitive hierarchy walker.
//!
//! Starting from a type, the walker computes the ancestor types that must be
//! visible at the language boundary. At every class it reaches it asks the
//! export classifier one question and takes one of three exits:
//!
//! | Class is | Result |
//! |----------|--------|
//! | built-in or standard library | nothing; the foreign side has it already |
//! | exported (explicitly or implicitly) | the substituted type itself, plus its nearest explicitly exported ancestor for non-interfaces exported only implicitly |
//! | neither | whatever its declared supertypes yield, walked with this level's substitution |
//!
//! Non-exported classes are transparent links: the boundary sees through them
//! to the exported types they inherit from, with type arguments substituted
//! all the way down.
//!
//! The walker assumes an acyclic hierarchy. It still runs under a
//! [`RecursionGuard`], so a cyclic or absurdly deep provider fails loudly
//! instead of overflowing the stack.

use crate::recursion::{RecursionGuard, RecursionProfile, RecursionResult};
use crate::substitution::{SubstitutionMap, Substitutor};
use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashMap};
use tracing::trace;
use xport_model::{
    ClassDeclaration, ClassId, ClassMetadata, ExportClassifier, ExportStatus, TypeArgument,
    TypeRef, display_type,
};

/// De-duplicated set of boundary types, in discovery order.
pub type TypeSet = IndexSet<TypeRef, FxBuildHasher>;

/// A class together with fully substituted type arguments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct AppliedClass {
    pub(crate) class: ClassId,
    pub(crate) args: Vec<TypeArgument>,
}

impl AppliedClass {
    pub(crate) fn new(class: ClassId, args: &[TypeArgument]) -> Self {
        Self {
            class,
            args: args.to_vec(),
        }
    }
}

/// Recursive walker over declared supertypes.
///
/// Results for non-exported classes and ancestor-search answers are memoized
/// per applied class for the walker's lifetime, so every distinct
/// `(class, arguments)` pair is expanded once no matter how many paths reach
/// it.
pub struct HierarchyWalker<'a, M: ?Sized> {
    model: &'a M,
    substitutor: Substitutor<'a, M>,
    walk_guard: RecursionGuard,
    search_guard: RecursionGuard,
    reached: FxHashMap<AppliedClass, TypeSet>,
    nearest_explicit: FxHashMap<AppliedClass, Option<TypeRef>>,
}

impl<'a, M: ClassMetadata + ExportClassifier + ?Sized> HierarchyWalker<'a, M> {
    pub fn new(model: &'a M) -> Self {
        Self::with_profiles(
            model,
            RecursionProfile::HierarchyWalk,
            RecursionProfile::AncestorSearch,
        )
    }

    pub fn with_profiles(
        model: &'a M,
        walk_profile: RecursionProfile,
        search_profile: RecursionProfile,
    ) -> Self {
        Self {
            model,
            substitutor: Substitutor::new(model),
            walk_guard: RecursionGuard::with_profile(walk_profile),
            search_guard: RecursionGuard::with_profile(search_profile),
            reached: FxHashMap::default(),
            nearest_explicit: FxHashMap::default(),
        }
    }

    /// Collect the boundary-crossing types reachable from `ty`.
    ///
    /// `substitution` binds the type parameters `ty` may mention; it is empty
    /// for an entry type.
    ///
    /// # Panics
    ///
    /// Panics if the hierarchy contains a cycle, exceeds the configured
    /// recursion limits, or applies the wrong number of type arguments to a
    /// class.
    pub fn walk(&mut self, ty: &TypeRef, substitution: &SubstitutionMap) -> TypeSet {
        let mut out = TypeSet::default();
        self.walk_into(ty, substitution, &mut out);
        out
    }

    fn walk_into(&mut self, ty: &TypeRef, substitution: &SubstitutionMap, out: &mut TypeSet) {
        let model = self.model;
        let Some(owner) = model.resolve_class(ty) else {
            trace!(ty = %display_type(model, ty), "not class-rooted, contributes nothing");
            return;
        };
        let id = owner.id;

        if model.is_universally_available(id) {
            trace!(class = model.name(owner.name), "built-in or stdlib, stopping");
            return;
        }

        let applied = self.substitutor.substitute(ty, substitution);
        match model.export_status(id) {
            ExportStatus::Explicit => {
                trace!(ty = %display_type(model, &applied), "explicitly exported");
                out.insert(applied);
            }
            ExportStatus::Implicit => {
                trace!(ty = %display_type(model, &applied), "implicitly exported");
                let ancestor = if owner.is_interface() {
                    None
                } else {
                    self.find_nearest_explicit_ancestor(&applied, owner)
                };
                out.insert(applied);
                if let Some(ancestor) = ancestor {
                    trace!(
                        class = model.name(owner.name),
                        ancestor = %display_type(model, &ancestor),
                        "surfacing nearest explicit ancestor"
                    );
                    out.insert(ancestor);
                }
            }
            ExportStatus::NotExported => {
                let key = AppliedClass::new(id, &applied.args);
                if let Some(reached) = self.reached.get(&key) {
                    out.extend(reached.iter().cloned());
                    return;
                }

                self.enter(Phase::Walk, owner);
                let own = self.substitutor.build_substitution(
                    owner,
                    &applied.args,
                    &SubstitutionMap::new(),
                );
                let mut reached = TypeSet::default();
                for supertype in model.declared_supertypes(id) {
                    self.walk_into(supertype, &own, &mut reached);
                }
                self.walk_guard.leave(id);

                out.extend(reached.iter().cloned());
                self.reached.insert(key, reached);
            }
        }
    }

    /// Depth-first search for the first explicitly exported ancestor of the
    /// applied class `ty`, in declaration order.
    ///
    /// Only the first hit is returned; explicitly exported ancestors on later
    /// branches are not collected.
    fn find_nearest_explicit_ancestor(
        &mut self,
        ty: &TypeRef,
        owner: &ClassDeclaration,
    ) -> Option<TypeRef> {
        let key = AppliedClass::new(owner.id, &ty.args);
        if let Some(found) = self.nearest_explicit.get(&key) {
            return found.clone();
        }

        let model = self.model;
        self.enter(Phase::AncestorSearch, owner);
        let own = self
            .substitutor
            .build_substitution(owner, &ty.args, &SubstitutionMap::new());

        let mut found = None;
        for supertype in model.declared_supertypes(owner.id) {
            let Some(parent) = model.resolve_class(supertype) else {
                continue;
            };
            let applied = self.substitutor.substitute(supertype, &own);
            if model.is_explicitly_exported(parent.id) {
                found = Some(applied);
                break;
            }
            if let Some(hit) = self.find_nearest_explicit_ancestor(&applied, parent) {
                found = Some(hit);
                break;
            }
        }

        self.search_guard.leave(owner.id);
        self.nearest_explicit.insert(key, found.clone());
        found
    }

    fn enter(&mut self, phase: Phase, class: &ClassDeclaration) {
        let guard = match phase {
            Phase::Walk => &mut self.walk_guard,
            Phase::AncestorSearch => &mut self.search_guard,
        };
        match guard.enter(class.id) {
            RecursionResult::Entered => {}
            denied => {
                let max_depth = guard.max_depth();
                let max_iterations = guard.max_iterations();
                report_violation(
                    denied,
                    phase,
                    self.model.name(class.name),
                    max_depth,
                    max_iterations,
                )
            }
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    Walk,
    AncestorSearch,
}

impl Phase {
    fn describe(self) -> &'static str {
        match self {
            Phase::Walk => "walking the export hierarchy",
            Phase::AncestorSearch => "searching for an explicitly exported ancestor",
        }
    }
}

#[cold]
#[inline(never)]
fn report_violation(
    result: RecursionResult,
    phase: Phase,
    class: &str,
    max_depth: u32,
    max_iterations: u32,
) -> ! {
    let phase = phase.describe();
    match result {
        RecursionResult::Cycle => {
            panic!("inheritance cycle through class `{class}` while {phase}")
        }
        RecursionResult::DepthExceeded => panic!(
            "class hierarchy deeper than {max_depth} levels at `{class}` while {phase}"
        ),
        RecursionResult::IterationExceeded => panic!(
            "visited more than {max_iterations} classes at `{class}` while {phase}"
        ),
        RecursionResult::Entered => unreachable!("entered scopes are not violations"),
    }
}

#[cfg(test)]
#[path = "../tests/walker_tests.rs"]
mod tests;
