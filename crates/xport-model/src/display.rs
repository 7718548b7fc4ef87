//! Human-readable rendering of type references.
//!
//! Types render in source-like syntax: `Box<Int>`, `List<out T>?`, `Map<*, V>`.
//! Used by log output, validation errors and test failure messages.

use crate::provider::ClassMetadata;
use crate::types::{Classifier, TypeArgument, TypeRef};
use std::fmt;

/// Displays a [`TypeRef`] using names from a class model.
pub struct TypeDisplay<'a, M: ?Sized> {
    model: &'a M,
    ty: &'a TypeRef,
}

/// Displays a [`TypeArgument`] using names from a class model.
pub struct ArgumentDisplay<'a, M: ?Sized> {
    model: &'a M,
    arg: &'a TypeArgument,
}

/// Displays a list of types as `{A, B<C>}`.
pub struct TypeListDisplay<'a, M: ?Sized, I> {
    model: &'a M,
    types: I,
}

pub fn display_type<'a, M: ClassMetadata + ?Sized>(
    model: &'a M,
    ty: &'a TypeRef,
) -> TypeDisplay<'a, M> {
    TypeDisplay { model, ty }
}

pub fn display_argument<'a, M: ClassMetadata + ?Sized>(
    model: &'a M,
    arg: &'a TypeArgument,
) -> ArgumentDisplay<'a, M> {
    ArgumentDisplay { model, arg }
}

pub fn display_types<'a, M, I>(model: &'a M, types: I) -> TypeListDisplay<'a, M, I>
where
    M: ClassMetadata + ?Sized,
    I: IntoIterator<Item = &'a TypeRef> + Clone,
{
    TypeListDisplay { model, types }
}

impl<M: ClassMetadata + ?Sized> fmt::Display for TypeDisplay<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_type(self.model, self.ty, f)
    }
}

impl<M: ClassMetadata + ?Sized> fmt::Display for ArgumentDisplay<'_, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_argument(self.model, self.arg, f)
    }
}

impl<'a, M, I> fmt::Display for TypeListDisplay<'a, M, I>
where
    M: ClassMetadata + ?Sized,
    I: IntoIterator<Item = &'a TypeRef> + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, ty) in self.types.clone().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_type(self.model, ty, f)?;
        }
        f.write_str("}")
    }
}

fn write_type<M: ClassMetadata + ?Sized>(
    model: &M,
    ty: &TypeRef,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match ty.classifier {
        Classifier::Class(id) => match model.class(id) {
            Some(class) => f.write_str(model.name(class.name))?,
            None => write!(f, "<class #{}>", id.0)?,
        },
        Classifier::TypeParam(id) => match model.type_param(id) {
            Some(param) => f.write_str(model.name(param.name))?,
            None => write!(f, "<param #{}>", id.0)?,
        },
        Classifier::Unresolved(name) => match model.name(name) {
            "" => f.write_str("<unresolved>")?,
            name => f.write_str(name)?,
        },
    }

    if !ty.args.is_empty() {
        f.write_str("<")?;
        for (i, arg) in ty.args.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write_argument(model, arg, f)?;
        }
        f.write_str(">")?;
    }

    if ty.nullable {
        f.write_str("?")?;
    }
    Ok(())
}

fn write_argument<M: ClassMetadata + ?Sized>(
    model: &M,
    arg: &TypeArgument,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    match arg {
        TypeArgument::Type(ty) => write_type(model, ty, f),
        TypeArgument::Projection { variance, ty } => {
            if let Some(keyword) = variance.keyword() {
                write!(f, "{keyword} ")?;
            }
            write_type(model, ty, f)
        }
        TypeArgument::Star => f.write_str("*"),
    }
}

#[cfg(test)]
#[path = "../tests/display_tests.rs"]
mod tests;
