use thiserror::Error;

/// Errors detected while building or validating a class model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("duplicate class `{name}`")]
    DuplicateClass { name: String },

    #[error("class `{class}` references unknown class #{id}")]
    UnknownClass { class: String, id: u32 },

    #[error("class `{class}` references unknown type parameter #{id}")]
    UnknownTypeParam { class: String, id: u32 },

    #[error("class `{class}` uses type parameter `{param}` of another class")]
    TypeParamOutOfScope { class: String, param: String },

    #[error("supertype `{supertype}` of class `{class}` is not a class")]
    SupertypeNotClass { class: String, supertype: String },

    #[error(
        "class `{class}` applies {found} type argument(s) to `{target}`, which declares {expected}"
    )]
    ArityMismatch {
        class: String,
        target: String,
        expected: usize,
        found: usize,
    },

    #[error("inheritance cycle: {}", path.join(" -> "))]
    InheritanceCycle { path: Vec<String> },
}
