//! Turns a customer record into the numeric feature vector a model expects

use serde::{Deserialize, Serialize};

use super::error::ArtifactError;
use crate::domain::{CustomerField, CustomerRecord, FieldKind};

/// Serialized preprocessing step of an artifact
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreprocessorSpec {
    #[serde(default)]
    pub numeric: Vec<NumericColumnSpec>,
    #[serde(default)]
    pub categorical: Vec<CategoricalColumnSpec>,
}

/// Standard-scaled numeric column; `(x - mean) / scale`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NumericColumnSpec {
    pub column: String,
    #[serde(default)]
    pub mean: f64,
    #[serde(default = "default_scale")]
    pub scale: f64,
}

/// One-hot encoded column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalColumnSpec {
    pub column: String,
    pub categories: Vec<String>,
}

fn default_scale() -> f64 {
    1.0
}

#[derive(Debug, Clone)]
struct NumericColumn {
    field: CustomerField,
    mean: f64,
    scale: f64,
}

#[derive(Debug, Clone)]
struct CategoricalColumn {
    field: CustomerField,
    categories: Vec<String>,
}

/// Compiled preprocessor. Numeric columns come first in listed order,
/// followed by one indicator per category. Unknown categories encode
/// as all zeros.
#[derive(Debug, Clone)]
pub struct Preprocessor {
    numeric: Vec<NumericColumn>,
    categorical: Vec<CategoricalColumn>,
    num_features: usize,
}

impl Preprocessor {
    pub fn compile(spec: PreprocessorSpec) -> Result<Self, ArtifactError> {
        let numeric = spec
            .numeric
            .into_iter()
            .map(|column| {
                let field = resolve(&column.column, FieldKind::Numeric)?;

                if !column.scale.is_finite() || column.scale == 0.0 {
                    return Err(ArtifactError::InvalidScale {
                        column: column.column,
                        scale: column.scale,
                    });
                }

                Ok(NumericColumn {
                    field,
                    mean: column.mean,
                    scale: column.scale,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let categorical = spec
            .categorical
            .into_iter()
            .map(|column| {
                let field = resolve(&column.column, FieldKind::Categorical)?;

                if column.categories.is_empty() {
                    return Err(ArtifactError::EmptyCategories(column.column));
                }

                Ok(CategoricalColumn {
                    field,
                    categories: column.categories,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let num_features =
            numeric.len() + categorical.iter().map(|c| c.categories.len()).sum::<usize>();

        Ok(Self {
            numeric,
            categorical,
            num_features,
        })
    }

    /// Width of the encoded feature vector
    pub fn num_features(&self) -> usize {
        self.num_features
    }

    pub fn transform(&self, record: &CustomerRecord) -> Vec<f64> {
        let mut features = Vec::with_capacity(self.num_features);

        for column in &self.numeric {
            let value = record.number(column.field).unwrap_or_default();
            features.push((value - column.mean) / column.scale);
        }

        for column in &self.categorical {
            let value = record.text(column.field).unwrap_or_default();
            features.extend(
                column
                    .categories
                    .iter()
                    .map(|category| if category == value { 1.0 } else { 0.0 }),
            );
        }

        features
    }
}

fn resolve(column: &str, expected: FieldKind) -> Result<CustomerField, ArtifactError> {
    let field = CustomerField::from_column(column)
        .ok_or_else(|| ArtifactError::UnknownColumn(column.to_string()))?;

    if field.kind() != expected {
        return Err(ArtifactError::WrongColumnKind {
            column: column.to_string(),
            expected: match expected {
                FieldKind::Numeric => "numeric",
                FieldKind::Categorical => "categorical",
            },
        });
    }

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> PreprocessorSpec {
        PreprocessorSpec {
            numeric: vec![NumericColumnSpec {
                column: "tenure".to_string(),
                mean: 10.0,
                scale: 4.0,
            }],
            categorical: vec![CategoricalColumnSpec {
                column: "Contract".to_string(),
                categories: vec![
                    "Month-to-month".to_string(),
                    "One year".to_string(),
                    "Two year".to_string(),
                ],
            }],
        }
    }

    #[test]
    fn test_transform_scales_and_one_hot_encodes() {
        let preprocessor = Preprocessor::compile(spec()).unwrap();
        let record = CustomerRecord {
            tenure: 18,
            contract: "One year".to_string(),
            ..CustomerRecord::default()
        };

        assert_eq!(preprocessor.num_features(), 4);
        assert_eq!(preprocessor.transform(&record), vec![2.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unknown_category_encodes_as_zeros() {
        let preprocessor = Preprocessor::compile(spec()).unwrap();
        let record = CustomerRecord {
            tenure: 10,
            contract: "Three year".to_string(),
            ..CustomerRecord::default()
        };

        assert_eq!(preprocessor.transform(&record), vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let mut spec = spec();
        spec.numeric[0].column = "Age".to_string();

        assert_eq!(
            Preprocessor::compile(spec).unwrap_err(),
            ArtifactError::UnknownColumn("Age".to_string())
        );
    }

    #[test]
    fn test_wrong_column_kind_is_rejected() {
        let mut spec = spec();
        spec.numeric[0].column = "Contract".to_string();

        assert!(matches!(
            Preprocessor::compile(spec),
            Err(ArtifactError::WrongColumnKind { .. })
        ));
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        let mut spec = spec();
        spec.numeric[0].scale = 0.0;

        assert!(matches!(
            Preprocessor::compile(spec),
            Err(ArtifactError::InvalidScale { .. })
        ));
    }

    #[test]
    fn test_scale_defaults_to_one() {
        let spec: NumericColumnSpec = serde_json::from_str(r#"{"column": "tenure"}"#).unwrap();

        assert_eq!(spec.mean, 0.0);
        assert_eq!(spec.scale, 1.0);
    }
}
