//! Model artifacts - preprocessing, estimators and the model registry

mod error;
mod forest;
mod knn;
mod linear;
mod pipeline;
mod preprocess;
mod registry;

pub use error::ArtifactError;
pub use forest::{DecisionTree, RandomForest, TreeNode};
pub use knn::{KNeighbors, NeighborWeights};
pub use linear::LinearModel;
pub use pipeline::{Estimator, ModelArtifact, Pipeline};
pub use preprocess::{CategoricalColumnSpec, NumericColumnSpec, Preprocessor, PreprocessorSpec};
pub use registry::ModelRegistry;
