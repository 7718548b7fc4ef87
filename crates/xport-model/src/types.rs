//! Generic type references and type arguments.
//!
//! A [`TypeRef`] is an application of a classifier (a class, a type
//! parameter, or a name the metadata provider could not resolve) to an ordered
//! list of [`TypeArgument`]s.
//!
//! ## Equality
//!
//! Two type references are equal when their classifier, argument list and
//! nullability match. The annotation payload is carried along through
//! substitution but takes no part in equality or hashing, so result sets
//! de-duplicate `@Foo Box<Int>` and `Box<Int>` into a single entry.

use crate::ids::{ClassId, TypeParamId};
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use xport_common::Atom;

/// The declaration a type reference points to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Classifier {
    /// A class or interface declared in the class model.
    Class(ClassId),
    /// A type parameter of some class in the model.
    TypeParam(TypeParamId),
    /// A name the metadata provider could not resolve to a declaration.
    Unresolved(Atom),
}

/// Use-site variance of a projected type argument.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Variance {
    Invariant,
    /// `in T`: the argument is only consumed.
    In,
    /// `out T`: the argument is only produced.
    Out,
}

impl Variance {
    /// Compose an outer use-site variance with the variance of the argument
    /// substituted into it.
    ///
    /// Returns `None` when the two conflict (`in` applied to `out` or vice
    /// versa); such a projection can only be represented by a star.
    pub const fn compose(self, inner: Variance) -> Option<Variance> {
        match (self, inner) {
            (Variance::Invariant, v) | (v, Variance::Invariant) => Some(v),
            (Variance::In, Variance::In) => Some(Variance::In),
            (Variance::Out, Variance::Out) => Some(Variance::Out),
            (Variance::In, Variance::Out) | (Variance::Out, Variance::In) => None,
        }
    }

    /// Keyword used when rendering a projection.
    pub const fn keyword(self) -> Option<&'static str> {
        match self {
            Variance::Invariant => None,
            Variance::In => Some("in"),
            Variance::Out => Some("out"),
        }
    }
}

/// Opaque annotation payload attached to a type reference.
///
/// The collector never interprets annotations; it only carries them from a
/// declared supertype to its substituted copy.
#[derive(Clone, Debug, Default)]
pub struct Annotations(Option<Arc<[Atom]>>);

impl Annotations {
    pub fn new(names: impl IntoIterator<Item = Atom>) -> Self {
        let names: Arc<[Atom]> = names.into_iter().collect();
        if names.is_empty() {
            Self(None)
        } else {
            Self(Some(names))
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = Atom> + '_ {
        self.0.iter().flat_map(|names| names.iter().copied())
    }
}

/// A (possibly generic) type reference.
#[derive(Clone, Debug)]
pub struct TypeRef {
    pub classifier: Classifier,
    /// Ordered type arguments; empty for non-generic classes and for type
    /// parameter references.
    pub args: Vec<TypeArgument>,
    pub nullable: bool,
    pub annotations: Annotations,
}

impl TypeRef {
    /// A reference to `class` applied to `args`.
    pub fn class(class: ClassId, args: Vec<TypeArgument>) -> Self {
        Self {
            classifier: Classifier::Class(class),
            args,
            nullable: false,
            annotations: Annotations::default(),
        }
    }

    /// A reference to a non-generic class.
    pub fn simple(class: ClassId) -> Self {
        Self::class(class, Vec::new())
    }

    /// A reference to a type parameter.
    pub fn param(param: TypeParamId) -> Self {
        Self {
            classifier: Classifier::TypeParam(param),
            args: Vec::new(),
            nullable: false,
            annotations: Annotations::default(),
        }
    }

    /// A reference whose classifier could not be resolved.
    pub fn unresolved(name: Atom, args: Vec<TypeArgument>) -> Self {
        Self {
            classifier: Classifier::Unresolved(name),
            args,
            nullable: false,
            annotations: Annotations::default(),
        }
    }

    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    /// The class this reference is rooted at, if any.
    #[inline]
    pub fn class_id(&self) -> Option<ClassId> {
        match self.classifier {
            Classifier::Class(id) => Some(id),
            _ => None,
        }
    }

    /// The type parameter this reference names, if any.
    #[inline]
    pub fn type_param(&self) -> Option<TypeParamId> {
        match self.classifier {
            Classifier::TypeParam(id) => Some(id),
            _ => None,
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        self.classifier == other.classifier
            && self.nullable == other.nullable
            && self.args == other.args
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.classifier.hash(state);
        self.args.hash(state);
        self.nullable.hash(state);
    }
}

/// A type argument in a generic application.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeArgument {
    /// A plain type: `Box<Int>`.
    Type(TypeRef),
    /// A use-site projection: `Box<out Int>`.
    Projection { variance: Variance, ty: TypeRef },
    /// The star projection: `Box<*>`.
    Star,
}

impl TypeArgument {
    pub fn projection(variance: Variance, ty: TypeRef) -> Self {
        Self::Projection { variance, ty }
    }

    /// The type carried by this argument, if it is not a star.
    pub fn as_type(&self) -> Option<&TypeRef> {
        match self {
            TypeArgument::Type(ty) | TypeArgument::Projection { ty, .. } => Some(ty),
            TypeArgument::Star => None,
        }
    }
}

impl From<TypeRef> for TypeArgument {
    fn from(ty: TypeRef) -> Self {
        TypeArgument::Type(ty)
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
