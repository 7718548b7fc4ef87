//! Interfaces the collector consumes from the class-metadata provider.
//!
//! The collector never loads declarations or reads annotations itself. It
//! asks two questions of whoever owns the class model:
//!
//! - [`ClassMetadata`]: what does this type point to, and what are a class's
//!   type parameters and declared supertypes?
//! - [`ExportClassifier`]: is a class built-in, from the standard library,
//!   explicitly exported, or exported only implicitly?
//!
//! Both must answer consistently for the whole collection run; the
//! collector's cache assumes the model does not change underneath it.

use crate::class::{ClassDeclaration, TypeParameter};
use crate::ids::{ClassId, TypeParamId};
use crate::types::{Classifier, TypeRef};
use xport_common::Atom;

/// A classifier resolved against the class model.
#[derive(Copy, Clone, Debug)]
pub enum ResolvedClassifier<'a> {
    Class(&'a ClassDeclaration),
    TypeParam(&'a TypeParameter),
}

/// Read-only access to class declarations.
pub trait ClassMetadata {
    /// Look up a class declaration by handle.
    fn class(&self, id: ClassId) -> Option<&ClassDeclaration>;

    /// Look up a type parameter by handle.
    fn type_param(&self, id: TypeParamId) -> Option<&TypeParameter>;

    /// Resolve an interned name.
    fn name(&self, atom: Atom) -> &str;

    /// Resolve the classifier of `ty`.
    ///
    /// Returns `None` for unresolved names and for handles the model does not
    /// know about.
    fn resolve_classifier(&self, ty: &TypeRef) -> Option<ResolvedClassifier<'_>> {
        match ty.classifier {
            Classifier::Class(id) => self.class(id).map(ResolvedClassifier::Class),
            Classifier::TypeParam(id) => self.type_param(id).map(ResolvedClassifier::TypeParam),
            Classifier::Unresolved(_) => None,
        }
    }

    /// Resolve `ty` to the class it is rooted at, if any.
    fn resolve_class(&self, ty: &TypeRef) -> Option<&ClassDeclaration> {
        match self.resolve_classifier(ty)? {
            ResolvedClassifier::Class(class) => Some(class),
            ResolvedClassifier::TypeParam(_) => None,
        }
    }

    /// Declared supertypes of `id`, in declaration order.
    fn declared_supertypes(&self, id: ClassId) -> &[TypeRef] {
        self.class(id)
            .map(|class| class.supertypes.as_slice())
            .unwrap_or(&[])
    }

    /// Type parameters of `id`, in declaration order.
    fn type_parameters(&self, id: ClassId) -> &[TypeParamId] {
        self.class(id)
            .map(|class| class.type_params.as_slice())
            .unwrap_or(&[])
    }
}

/// Tri-state export classification of a class.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExportStatus {
    NotExported,
    /// Exported only because another exported declaration requires it.
    Implicit,
    /// Directly marked for export.
    Explicit,
}

impl ExportStatus {
    #[inline]
    pub fn is_exported(self) -> bool {
        !matches!(self, ExportStatus::NotExported)
    }
}

/// Export classification of classes.
///
/// All predicates must be pure functions of the class handle for the duration
/// of a collection run.
pub trait ExportClassifier {
    fn is_built_in(&self, id: ClassId) -> bool;

    fn is_standard_library(&self, id: ClassId) -> bool;

    fn is_explicitly_exported(&self, id: ClassId) -> bool;

    fn is_implicitly_exported(&self, id: ClassId) -> bool;

    /// Built-in and standard-library classes exist on the foreign side
    /// already; the hierarchy walk stops at them.
    fn is_universally_available(&self, id: ClassId) -> bool {
        self.is_built_in(id) || self.is_standard_library(id)
    }

    /// Exported either explicitly or implicitly.
    fn is_exported(&self, id: ClassId) -> bool {
        self.is_explicitly_exported(id) || self.is_implicitly_exported(id)
    }

    /// Combined classification; explicit export wins over implicit.
    fn export_status(&self, id: ClassId) -> ExportStatus {
        if self.is_explicitly_exported(id) {
            ExportStatus::Explicit
        } else if self.is_implicitly_exported(id) {
            ExportStatus::Implicit
        } else {
            ExportStatus::NotExported
        }
    }
}
