//! Generic substitution across inheritance levels.
//!
//! Walking from a class to its ancestors means re-expressing each declared
//! supertype in terms of the concrete arguments applied at the entry type:
//!
//! ```text
//! class Leaf : Mid<String>
//! class Mid<T> : Top<List<T>>
//!
//! walk(Leaf)            map = {}
//!   walk(Mid<String>)   map = {Mid.T -> String}
//!     walk(Top<List<T>>) -> Top<List<String>>
//! ```
//!
//! ## Invariants
//!
//! - A [`SubstitutionMap`] is always *pre-resolved*: every value was resolved
//!   against the outer map when it was inserted, so lookups never recurse.
//! - Maps are persistent. Extending a map produces a new map sharing the
//!   parent's frames; sibling recursive calls never observe each other's
//!   bindings.
//! - Type parameter handles are model-unique, so a binding is never shadowed.

use smallvec::SmallVec;
use std::sync::Arc;
use tracing::trace;
use xport_model::{
    ClassDeclaration, ClassMetadata, Classifier, TypeArgument, TypeParamId, TypeRef,
};

// =============================================================================
// SubstitutionMap
// =============================================================================

/// Persistent mapping from type parameters to (already resolved) arguments.
#[derive(Clone, Debug, Default)]
pub struct SubstitutionMap {
    head: Option<Arc<Frame>>,
}

#[derive(Debug)]
struct Frame {
    bindings: SmallVec<[(TypeParamId, TypeArgument); 2]>,
    parent: Option<Arc<Frame>>,
    len: usize,
}

impl SubstitutionMap {
    /// The empty map used at the top of every collection.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Total number of bindings visible through this map.
    #[inline]
    pub fn len(&self) -> usize {
        self.head.as_ref().map_or(0, |frame| frame.len)
    }

    /// Look up the argument bound to `param`.
    pub fn get(&self, param: TypeParamId) -> Option<&TypeArgument> {
        self.frames()
            .flat_map(|frame| frame.bindings.iter())
            .find(|(key, _)| *key == param)
            .map(|(_, arg)| arg)
    }

    #[inline]
    pub fn contains(&self, param: TypeParamId) -> bool {
        self.get(param).is_some()
    }

    /// A new map containing this map's bindings plus `bindings`.
    ///
    /// `self` is left untouched; the result shares its frames.
    pub fn extend(
        &self,
        bindings: impl IntoIterator<Item = (TypeParamId, TypeArgument)>,
    ) -> SubstitutionMap {
        let bindings: SmallVec<[(TypeParamId, TypeArgument); 2]> =
            bindings.into_iter().collect();
        if bindings.is_empty() {
            return self.clone();
        }
        debug_assert!(
            bindings.iter().all(|(param, _)| !self.contains(*param)),
            "type parameter bound twice in one substitution chain"
        );
        let len = self.len() + bindings.len();
        SubstitutionMap {
            head: Some(Arc::new(Frame {
                bindings,
                parent: self.head.clone(),
                len,
            })),
        }
    }

    /// All bindings, innermost frame first.
    pub fn iter(&self) -> impl Iterator<Item = (TypeParamId, &TypeArgument)> {
        self.frames()
            .flat_map(|frame| frame.bindings.iter())
            .map(|(param, arg)| (*param, arg))
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        std::iter::successors(self.head.as_deref(), |frame| frame.parent.as_deref())
    }
}

// =============================================================================
// Substitutor
// =============================================================================

/// Builds and applies [`SubstitutionMap`]s against a class model.
pub struct Substitutor<'a, M: ?Sized> {
    model: &'a M,
}

impl<M: ?Sized> Clone for Substitutor<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for Substitutor<'_, M> {}

impl<'a, M: ClassMetadata + ?Sized> Substitutor<'a, M> {
    pub fn new(model: &'a M) -> Self {
        Self { model }
    }

    /// Extend `outer` with bindings for `owner`'s type parameters.
    ///
    /// Each applied argument is resolved against `outer` first, keeping the
    /// resulting map pre-resolved.
    ///
    /// # Panics
    ///
    /// Panics if `applied` does not supply exactly one argument per type
    /// parameter of `owner`. The class model guarantees matching arity at
    /// every declaration site, so a mismatch is a bug in the caller or in
    /// the metadata provider.
    pub fn build_substitution(
        &self,
        owner: &ClassDeclaration,
        applied: &[TypeArgument],
        outer: &SubstitutionMap,
    ) -> SubstitutionMap {
        assert_eq!(
            applied.len(),
            owner.type_params.len(),
            "class `{}` declares {} type parameter(s) but {} argument(s) were applied",
            self.model.name(owner.name),
            owner.type_params.len(),
            applied.len(),
        );

        let map = outer.extend(
            owner
                .type_params
                .iter()
                .zip(applied)
                .map(|(&param, arg)| (param, self.resolve_argument(arg, outer))),
        );
        trace!(
            class = self.model.name(owner.name),
            bindings = map.len(),
            "built substitution"
        );
        map
    }

    /// Resolve a type argument against `map`.
    pub fn resolve_argument(&self, arg: &TypeArgument, map: &SubstitutionMap) -> TypeArgument {
        match arg {
            TypeArgument::Type(ty) => self.resolve_type(ty, map),
            TypeArgument::Projection { variance, ty } => match self.resolve_type(ty, map) {
                TypeArgument::Type(resolved) => TypeArgument::Projection {
                    variance: *variance,
                    ty: resolved,
                },
                TypeArgument::Projection {
                    variance: inner,
                    ty: resolved,
                } => match variance.compose(inner) {
                    Some(variance) => TypeArgument::Projection {
                        variance,
                        ty: resolved,
                    },
                    None => TypeArgument::Star,
                },
                TypeArgument::Star => TypeArgument::Star,
            },
            TypeArgument::Star => TypeArgument::Star,
        }
    }

    /// Resolve a type against `map`.
    ///
    /// A bound type parameter is replaced by its argument, which may itself
    /// be a projection or a star. Any other type keeps its classifier and has
    /// its arguments resolved.
    pub fn resolve_type(&self, ty: &TypeRef, map: &SubstitutionMap) -> TypeArgument {
        if let Classifier::TypeParam(param) = ty.classifier {
            return match map.get(param) {
                Some(bound) => bound.clone(),
                None => TypeArgument::Type(ty.clone()),
            };
        }
        TypeArgument::Type(self.substitute(ty, map))
    }

    /// Apply `map` to the arguments of `ty`, keeping its classifier.
    ///
    /// Used for class-rooted types such as declared supertypes. Non-generic
    /// types are returned as an unchanged copy.
    pub fn substitute(&self, ty: &TypeRef, map: &SubstitutionMap) -> TypeRef {
        if map.is_empty() || !self.has_substitutable_args(ty) {
            return ty.clone();
        }
        TypeRef {
            classifier: ty.classifier,
            args: ty
                .args
                .iter()
                .map(|arg| self.resolve_argument(arg, map))
                .collect(),
            nullable: ty.nullable,
            annotations: ty.annotations.clone(),
        }
    }

    fn has_substitutable_args(&self, ty: &TypeRef) -> bool {
        match ty.classifier {
            Classifier::Class(id) => self
                .model
                .class(id)
                .map_or(!ty.args.is_empty(), ClassDeclaration::is_generic),
            Classifier::TypeParam(_) => false,
            Classifier::Unresolved(_) => !ty.args.is_empty(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/substitution_tests.rs"]
mod tests;
