//! Model artifacts compiled into predictors

use serde::{Deserialize, Serialize};

use super::error::ArtifactError;
use super::forest::RandomForest;
use super::knn::KNeighbors;
use super::linear::LinearModel;
use super::preprocess::{Preprocessor, PreprocessorSpec};
use crate::domain::{ChurnLabel, CustomerRecord, Predictor};

/// Serialized model artifact: a preprocessing step followed by an estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    pub preprocessor: PreprocessorSpec,
    pub estimator: Estimator,
}

/// Supported estimators, tagged by `kind`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
    LogisticRegression(LinearModel),
    LinearSvc(LinearModel),
    KNeighbors(KNeighbors),
    RandomForest(RandomForest),
}

impl Estimator {
    fn validate(&self, num_features: usize) -> Result<(), ArtifactError> {
        match self {
            Self::LogisticRegression(model) | Self::LinearSvc(model) => model.validate(num_features),
            Self::KNeighbors(model) => model.validate(num_features),
            Self::RandomForest(model) => model.validate(num_features),
        }
    }

    fn predict(&self, features: &[f64]) -> ChurnLabel {
        match self {
            Self::LogisticRegression(model) | Self::LinearSvc(model) => model.predict(features),
            Self::KNeighbors(model) => model.predict(features),
            Self::RandomForest(model) => model.predict(features),
        }
    }

    fn probability(&self, features: &[f64]) -> Option<f64> {
        match self {
            Self::LogisticRegression(model) => Some(model.probability(features)),
            Self::LinearSvc(_) => None,
            Self::KNeighbors(model) => Some(model.probability(features)),
            Self::RandomForest(model) => Some(model.probability(features)),
        }
    }
}

/// A validated artifact ready to score records
#[derive(Debug)]
pub struct Pipeline {
    name: String,
    preprocessor: Preprocessor,
    estimator: Estimator,
}

impl Pipeline {
    pub fn compile(artifact: ModelArtifact) -> Result<Self, ArtifactError> {
        let preprocessor = Preprocessor::compile(artifact.preprocessor)?;
        artifact.estimator.validate(preprocessor.num_features())?;

        Ok(Self {
            name: artifact.name,
            preprocessor,
            estimator: artifact.estimator,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Predictor for Pipeline {
    fn predict(&self, record: &CustomerRecord) -> ChurnLabel {
        let features = self.preprocessor.transform(record);
        self.estimator.predict(&features)
    }

    fn predict_proba(&self, record: &CustomerRecord) -> Option<f64> {
        let features = self.preprocessor.transform(record);
        self.estimator.probability(&features)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGREG: &str = r#"{
        "name": "test_logreg",
        "preprocessor": {
            "numeric": [{"column": "tenure", "mean": 12.0, "scale": 12.0}],
            "categorical": [{"column": "Contract", "categories": ["Month-to-month", "One year", "Two year"]}]
        },
        "estimator": {"kind": "logistic_regression", "coefficients": [-1.0, 1.0, -1.0, -2.0], "intercept": 0.0}
    }"#;

    fn compile(json: &str) -> Result<Pipeline, ArtifactError> {
        Pipeline::compile(serde_json::from_str(json).unwrap())
    }

    #[test]
    fn test_logistic_pipeline() {
        let pipeline = compile(LOGREG).unwrap();
        let record = CustomerRecord {
            tenure: 12,
            contract: "Month-to-month".to_string(),
            ..CustomerRecord::default()
        };

        // decision = 0 * -1 + 1 * 1 = 1
        assert_eq!(pipeline.name(), "test_logreg");
        assert_eq!(pipeline.predict(&record), ChurnLabel::Leave);
        let p = pipeline.predict_proba(&record).unwrap();
        assert!((p - 1.0 / (1.0 + (-1.0f64).exp())).abs() < 1e-12);

        let loyal = CustomerRecord {
            tenure: 48,
            contract: "Two year".to_string(),
            ..CustomerRecord::default()
        };
        assert_eq!(pipeline.predict(&loyal), ChurnLabel::Stay);
    }

    #[test]
    fn test_linear_svc_has_no_probability() {
        let json = LOGREG.replace("logistic_regression", "linear_svc");
        let pipeline = compile(&json).unwrap();

        assert_eq!(
            pipeline.predict(&CustomerRecord::default()),
            ChurnLabel::Leave
        );
        assert_eq!(pipeline.predict_proba(&CustomerRecord::default()), None);
    }

    #[test]
    fn test_coefficient_count_must_match_features() {
        let json = LOGREG.replace("[-1.0, 1.0, -1.0, -2.0]", "[-1.0, 1.0]");

        assert!(matches!(
            compile(&json),
            Err(ArtifactError::FeatureMismatch { found: 4, .. })
        ));
    }

    #[test]
    fn test_unknown_estimator_kind_fails_to_parse() {
        let json = LOGREG.replace("logistic_regression", "gradient_boosting");

        assert!(serde_json::from_str::<ModelArtifact>(&json).is_err());
    }
}
