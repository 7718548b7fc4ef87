//! Arena handles for classes and type parameters.
//!
//! Classes and type parameters are stored in flat arenas owned by the class
//! model and addressed by index. Types refer to them by handle only, so the
//! hierarchy graph never holds back-references.

/// Handle of a class declaration in the class model.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub u32);

impl ClassId {
    /// Position of this class in the model's class arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Handle of a type parameter in the class model.
///
/// Type parameter handles are unique across the whole model, not just within
/// their owning class, so substitution maps never confuse `T` of one class
/// with `T` of another.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeParamId(pub u32);

impl TypeParamId {
    /// Position of this type parameter in the model's parameter arena.
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}
