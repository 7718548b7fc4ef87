//! Transitive export hierarchy collection for cross-language type boundaries.
//!
//! When a class crosses into a foreign language, the foreign side needs every
//! ancestor type it can observe: exported ancestors directly, and the exported
//! types reachable through non-exported intermediates, with generic arguments
//! substituted along the way. This crate bundles the pieces:
//!
//! - [`model`]: class declarations, type references and the provider traits
//! - [`solver`]: substitution, the hierarchy walker and the memoized collector
//! - [`tracing_config`]: opt-in log output for debugging a collection run
//!
//! ```
//! use xport::{ClassFlags, ClassModel, TransitiveExportCollector, TypeRef};
//!
//! let mut builder = ClassModel::builder();
//! let base = builder.declare_class("Base", ClassFlags::EXPLICIT_EXPORT);
//! let widget = builder.declare_class("Widget", ClassFlags::empty());
//! builder.add_supertype(widget, TypeRef::simple(base));
//! let model = builder.finish().unwrap();
//!
//! let mut collector = TransitiveExportCollector::new(&model);
//! let exported = collector.collect(&TypeRef::simple(widget));
//! assert_eq!(exported.len(), 1);
//! ```

pub use xport_common as common;
pub use xport_model as model;
pub use xport_solver as solver;

pub use xport_common::limits;
pub use xport_model::{
    Annotations, Atom, ClassDeclaration, ClassFlags, ClassId, ClassMetadata, ClassModel,
    ClassModelBuilder, Classifier, ExportClassifier, ExportStatus, ModelError, TypeArgument,
    TypeParamId, TypeParameter, TypeRef, Variance, display_type, display_types,
};
pub use xport_solver::{
    CollectorOptions, CollectorStats, RecursionProfile, SubstitutionMap, TransitiveExportCollector,
    TypeSet,
};

// Tracing configuration (text / tree / JSON output for debugging)
pub mod tracing_config;
pub use tracing_config::{LogFormat, init_tracing};

#[cfg(test)]
#[path = "tests/tracing_config_tests.rs"]
mod tracing_config_tests;
