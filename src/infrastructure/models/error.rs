use thiserror::Error;

/// Problems found while compiling a model artifact
#[derive(Debug, Error, PartialEq)]
pub enum ArtifactError {
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),

    #[error("Column '{column}' is not {expected}")]
    WrongColumnKind {
        column: String,
        expected: &'static str,
    },

    #[error("Column '{0}' has no categories")]
    EmptyCategories(String),

    #[error("Column '{column}' has invalid scale {scale}")]
    InvalidScale { column: String, scale: f64 },

    #[error("{what} expects {expected} features, preprocessor produces {found}")]
    FeatureMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("Invalid tree {tree} at node {node}: {reason}")]
    InvalidTree {
        tree: usize,
        node: usize,
        reason: String,
    },

    #[error("Invalid neighbors model: {0}")]
    InvalidNeighbors(String),

    #[error("Random forest has no trees")]
    EmptyForest,
}
