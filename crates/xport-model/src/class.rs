//! Class declarations and type parameters.

use crate::ids::{ClassId, TypeParamId};
use crate::types::TypeRef;
use bitflags::bitflags;
use smallvec::SmallVec;
use xport_common::Atom;

bitflags! {
    /// Structural kind and externally supplied export classification of a class.
    ///
    /// The classification bits come from whatever reads the export
    /// annotations; the collector only consumes them.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ClassFlags: u8 {
        const INTERFACE = 1 << 0;
        /// Part of the language's built-in types (`Any`, `Int`, ...).
        const BUILT_IN = 1 << 1;
        /// Declared in the standard library.
        const STANDARD_LIBRARY = 1 << 2;
        /// Directly marked as crossing the language boundary.
        const EXPLICIT_EXPORT = 1 << 3;
        /// Forced across the boundary by another exported declaration.
        const IMPLICIT_EXPORT = 1 << 4;
    }
}

/// A type parameter, owned by exactly one class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeParameter {
    pub id: TypeParamId,
    pub name: Atom,
    pub owner: ClassId,
    /// Position in the owner's type parameter list.
    pub position: u32,
}

/// A class or interface declaration.
#[derive(Clone, Debug)]
pub struct ClassDeclaration {
    pub id: ClassId,
    pub name: Atom,
    pub type_params: SmallVec<[TypeParamId; 2]>,
    /// Declared supertypes in declaration order, expressed in terms of this
    /// class's own type parameters.
    pub supertypes: SmallVec<[TypeRef; 2]>,
    pub flags: ClassFlags,
}

impl ClassDeclaration {
    #[inline]
    pub fn is_interface(&self) -> bool {
        self.flags.contains(ClassFlags::INTERFACE)
    }

    #[inline]
    pub fn is_generic(&self) -> bool {
        !self.type_params.is_empty()
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.type_params.len()
    }
}
