//! Class and generic type model for the xport export collector.
//!
//! The model is the collector's only view of the program: an arena of class
//! declarations addressed by [`ClassId`], their type parameters, their declared
//! supertypes, and the externally supplied export classification.
//!
//! - `ids` / `types` / `class`: the data model
//! - `provider`: the [`ClassMetadata`] and [`ExportClassifier`] traits the
//!   collector consumes
//! - `model`: [`ClassModel`], an in-memory provider, and its builder
//! - `display`: source-like rendering of types

pub mod class;
pub mod display;
pub mod error;
pub mod ids;
pub mod model;
pub mod provider;
pub mod types;

pub use class::{ClassDeclaration, ClassFlags, TypeParameter};
pub use display::{display_argument, display_type, display_types};
pub use error::ModelError;
pub use ids::{ClassId, TypeParamId};
pub use model::{ClassModel, ClassModelBuilder};
pub use provider::{ClassMetadata, ExportClassifier, ExportStatus, ResolvedClassifier};
pub use types::{Annotations, Classifier, TypeArgument, TypeRef, Variance};
pub use xport_common::Atom;
