//! Arena-backed class model.
//!
//! `ClassModel` is the in-memory class-metadata provider: classes and type
//! parameters live in flat vectors addressed by [`ClassId`] / [`TypeParamId`],
//! names are interned, and classification comes from [`ClassFlags`].
//!
//! Models are assembled with [`ClassModelBuilder`]. Declarations may reference
//! classes declared later, so all consistency checks run once in
//! [`ClassModelBuilder::finish`]:
//!
//! - every class-rooted reference points at a known class and applies as many
//!   arguments as that class declares type parameters
//! - supertypes are class-rooted (or unresolved names); never type parameters
//! - a class only mentions its own type parameters
//! - the declared-supertype graph is acyclic

use crate::class::{ClassDeclaration, ClassFlags, TypeParameter};
use crate::display::display_type;
use crate::error::ModelError;
use crate::ids::{ClassId, TypeParamId};
use crate::provider::{ClassMetadata, ExportClassifier};
use crate::types::{Classifier, TypeArgument, TypeRef};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::debug;
use xport_common::{Atom, Interner};

/// An immutable, validated set of class declarations.
#[derive(Clone, Debug, Default)]
pub struct ClassModel {
    interner: Interner,
    classes: Vec<ClassDeclaration>,
    type_params: Vec<TypeParameter>,
    by_name: FxHashMap<Atom, ClassId>,
}

impl ClassModel {
    pub fn builder() -> ClassModelBuilder {
        ClassModelBuilder::new()
    }

    /// Number of classes in the model.
    #[inline]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> impl Iterator<Item = &ClassDeclaration> {
        self.classes.iter()
    }

    /// Find a class by its name.
    pub fn class_by_name(&self, name: &str) -> Option<ClassId> {
        let atom = self.interner.lookup(name)?;
        self.by_name.get(&atom).copied()
    }

    pub fn interner(&self) -> &Interner {
        &self.interner
    }

    /// Check the model's structural invariants.
    ///
    /// Models produced by [`ClassModelBuilder::finish`] always pass.
    pub fn validate(&self) -> Result<(), ModelError> {
        for class in &self.classes {
            for param in &class.type_params {
                self.check_param_owner(class, *param)?;
            }
            for supertype in &class.supertypes {
                if supertype.type_param().is_some() {
                    return Err(ModelError::SupertypeNotClass {
                        class: self.name(class.name).to_string(),
                        supertype: display_type(self, supertype).to_string(),
                    });
                }
                self.check_type_ref(class, supertype)?;
            }
        }
        self.check_acyclic()
    }

    fn check_param_owner(
        &self,
        class: &ClassDeclaration,
        param: TypeParamId,
    ) -> Result<(), ModelError> {
        let Some(decl) = self.type_params.get(param.index()) else {
            return Err(ModelError::UnknownTypeParam {
                class: self.name(class.name).to_string(),
                id: param.0,
            });
        };
        if decl.owner != class.id {
            return Err(ModelError::TypeParamOutOfScope {
                class: self.name(class.name).to_string(),
                param: self.name(decl.name).to_string(),
            });
        }
        Ok(())
    }

    fn check_type_ref(&self, class: &ClassDeclaration, ty: &TypeRef) -> Result<(), ModelError> {
        match ty.classifier {
            Classifier::Class(id) => {
                let Some(target) = self.classes.get(id.index()) else {
                    return Err(ModelError::UnknownClass {
                        class: self.name(class.name).to_string(),
                        id: id.0,
                    });
                };
                if target.arity() != ty.args.len() {
                    return Err(ModelError::ArityMismatch {
                        class: self.name(class.name).to_string(),
                        target: self.name(target.name).to_string(),
                        expected: target.arity(),
                        found: ty.args.len(),
                    });
                }
            }
            Classifier::TypeParam(id) => self.check_param_owner(class, id)?,
            Classifier::Unresolved(_) => {}
        }

        for arg in &ty.args {
            match arg {
                TypeArgument::Type(inner) | TypeArgument::Projection { ty: inner, .. } => {
                    self.check_type_ref(class, inner)?;
                }
                TypeArgument::Star => {}
            }
        }
        Ok(())
    }

    fn check_acyclic(&self) -> Result<(), ModelError> {
        let mut marks = vec![VisitMark::Unvisited; self.classes.len()];
        let mut path = Vec::new();
        for class in &self.classes {
            self.visit_for_cycles(class.id, &mut marks, &mut path)?;
        }
        Ok(())
    }

    fn visit_for_cycles(
        &self,
        id: ClassId,
        marks: &mut [VisitMark],
        path: &mut Vec<ClassId>,
    ) -> Result<(), ModelError> {
        match marks[id.index()] {
            VisitMark::Done => return Ok(()),
            VisitMark::InProgress => {
                let start = path.iter().position(|&c| c == id).unwrap_or(0);
                let mut names: Vec<String> = path[start..]
                    .iter()
                    .map(|&c| self.name(self.classes[c.index()].name).to_string())
                    .collect();
                names.push(self.name(self.classes[id.index()].name).to_string());
                return Err(ModelError::InheritanceCycle { path: names });
            }
            VisitMark::Unvisited => {}
        }

        marks[id.index()] = VisitMark::InProgress;
        path.push(id);
        for supertype in &self.classes[id.index()].supertypes {
            if let Some(parent) = supertype.class_id() {
                self.visit_for_cycles(parent, marks, path)?;
            }
        }
        path.pop();
        marks[id.index()] = VisitMark::Done;
        Ok(())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitMark {
    Unvisited,
    InProgress,
    Done,
}

impl ClassMetadata for ClassModel {
    #[inline]
    fn class(&self, id: ClassId) -> Option<&ClassDeclaration> {
        self.classes.get(id.index())
    }

    #[inline]
    fn type_param(&self, id: TypeParamId) -> Option<&TypeParameter> {
        self.type_params.get(id.index())
    }

    #[inline]
    fn name(&self, atom: Atom) -> &str {
        self.interner.resolve(atom)
    }
}

impl ExportClassifier for ClassModel {
    fn is_built_in(&self, id: ClassId) -> bool {
        self.has_flag(id, ClassFlags::BUILT_IN)
    }

    fn is_standard_library(&self, id: ClassId) -> bool {
        self.has_flag(id, ClassFlags::STANDARD_LIBRARY)
    }

    fn is_explicitly_exported(&self, id: ClassId) -> bool {
        self.has_flag(id, ClassFlags::EXPLICIT_EXPORT)
    }

    fn is_implicitly_exported(&self, id: ClassId) -> bool {
        self.has_flag(id, ClassFlags::IMPLICIT_EXPORT)
    }
}

impl ClassModel {
    #[inline]
    fn has_flag(&self, id: ClassId, flag: ClassFlags) -> bool {
        self.classes
            .get(id.index())
            .is_some_and(|class| class.flags.contains(flag))
    }
}

// =============================================================================
// ClassModelBuilder
// =============================================================================

/// Incrementally assembles a [`ClassModel`].
///
/// ```
/// use xport_model::{ClassFlags, ClassModel, TypeArgument, TypeRef};
///
/// let mut builder = ClassModel::builder();
/// let base = builder.declare_class("Base", ClassFlags::EXPLICIT_EXPORT);
/// let (boxed, params) = builder.declare_generic_class("Box", ClassFlags::empty(), &["T"]);
/// builder.add_supertype(boxed, TypeRef::simple(base));
/// let model = builder.finish().unwrap();
/// assert_eq!(model.len(), 2);
/// # let _ = (params, TypeArgument::Star);
/// ```
#[derive(Debug, Default)]
pub struct ClassModelBuilder {
    model: ClassModel,
    errors: Vec<ModelError>,
}

impl ClassModelBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a name, e.g. for an unresolved classifier or an annotation.
    pub fn intern(&mut self, name: &str) -> Atom {
        self.model.interner.intern(name)
    }

    /// Declare a class with no type parameters and no supertypes yet.
    pub fn declare_class(&mut self, name: &str, flags: ClassFlags) -> ClassId {
        let atom = self.model.interner.intern(name);
        let id = ClassId(self.model.classes.len() as u32);
        if self.model.by_name.insert(atom, id).is_some() {
            self.errors.push(ModelError::DuplicateClass {
                name: name.to_string(),
            });
        }
        self.model.classes.push(ClassDeclaration {
            id,
            name: atom,
            type_params: SmallVec::new(),
            supertypes: SmallVec::new(),
            flags,
        });
        id
    }

    /// Declare a class together with its type parameters.
    pub fn declare_generic_class(
        &mut self,
        name: &str,
        flags: ClassFlags,
        params: &[&str],
    ) -> (ClassId, Vec<TypeParamId>) {
        let id = self.declare_class(name, flags);
        let params = params
            .iter()
            .map(|param| self.add_type_param(id, param))
            .collect();
        (id, params)
    }

    /// Append a type parameter to `class`.
    pub fn add_type_param(&mut self, class: ClassId, name: &str) -> TypeParamId {
        let atom = self.model.interner.intern(name);
        let id = TypeParamId(self.model.type_params.len() as u32);
        let Some(decl) = self.model.classes.get_mut(class.index()) else {
            self.errors.push(ModelError::UnknownClass {
                class: name.to_string(),
                id: class.0,
            });
            return id;
        };
        let position = decl.type_params.len() as u32;
        decl.type_params.push(id);
        self.model.type_params.push(TypeParameter {
            id,
            name: atom,
            owner: class,
            position,
        });
        id
    }

    /// Append a declared supertype to `class`.
    pub fn add_supertype(&mut self, class: ClassId, supertype: TypeRef) {
        match self.model.classes.get_mut(class.index()) {
            Some(decl) => decl.supertypes.push(supertype),
            None => self.errors.push(ModelError::UnknownClass {
                class: display_type(&self.model, &supertype).to_string(),
                id: class.0,
            }),
        }
    }

    /// Replace the flags of `class`.
    pub fn set_flags(&mut self, class: ClassId, flags: ClassFlags) {
        match self.model.classes.get_mut(class.index()) {
            Some(decl) => decl.flags = flags,
            None => self.errors.push(ModelError::UnknownClass {
                class: String::new(),
                id: class.0,
            }),
        }
    }

    /// Validate and return the finished model.
    pub fn finish(self) -> Result<ClassModel, ModelError> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }
        self.model.validate()?;
        debug!(
            classes = self.model.classes.len(),
            type_params = self.model.type_params.len(),
            "class model built"
        );
        Ok(self.model)
    }

    /// Return the model without validating it.
    ///
    /// Only the collector's recursion guard stands between an unvalidated
    /// model with an inheritance cycle and a runaway walk.
    pub fn finish_unchecked(self) -> ClassModel {
        self.model
    }
}

#[cfg(test)]
#[path = "../tests/model_tests.rs"]
mod tests;
