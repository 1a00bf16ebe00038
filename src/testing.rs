//! Shared fixtures for unit tests

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::domain::{
    ChurnLabel, CustomerRecord, HistoryRecord, ModelId, PredictionResult, Predictor,
};
use crate::infrastructure::models::ModelRegistry;

/// Directory holding the artifacts shipped with the repository
pub fn bundled_model_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("model")
}

pub fn bundled_registry() -> ModelRegistry {
    ModelRegistry::load(bundled_model_dir()).expect("bundled artifacts load")
}

/// Predictor with a fixed answer that counts how often it was asked
#[derive(Debug)]
pub struct CountingPredictor {
    label: ChurnLabel,
    probability: Option<f64>,
    calls: Arc<AtomicUsize>,
}

impl Predictor for CountingPredictor {
    fn predict(&self, _record: &CustomerRecord) -> ChurnLabel {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.label
    }

    fn predict_proba(&self, _record: &CustomerRecord) -> Option<f64> {
        self.probability
    }
}

/// Registry whose three models all answer `label`/`probability`, plus the
/// shared call counter
pub fn counting_registry(
    label: ChurnLabel,
    probability: Option<f64>,
) -> (ModelRegistry, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let models: BTreeMap<ModelId, Arc<dyn Predictor>> = ModelId::ALL
        .into_iter()
        .map(|id| {
            let predictor: Arc<dyn Predictor> = Arc::new(CountingPredictor {
                label,
                probability,
                calls: calls.clone(),
            });
            (id, predictor)
        })
        .collect();

    let registry = ModelRegistry::from_predictors(models).expect("all models registered");
    (registry, calls)
}

/// History record with a fixed timestamp offset by `minute`
pub fn history_record(
    tenure: u32,
    model: ModelId,
    prediction: ChurnLabel,
    probability: Option<f64>,
    minute: u32,
) -> HistoryRecord {
    let customer = CustomerRecord {
        tenure,
        ..CustomerRecord::default()
    };
    let result = PredictionResult::new(model, prediction, probability);
    let timestamp = Utc
        .with_ymd_and_hms(2024, 5, 1, 9, minute, 0)
        .single()
        .expect("valid timestamp");

    HistoryRecord::new(customer, &result, timestamp)
}

/// URL-encoded dashboard form for the default customer, with some columns
/// replaced
pub fn form_body(overrides: &[(&str, &str)], model: &str) -> String {
    let record = serde_json::to_value(CustomerRecord::default()).expect("record serializes");
    let mut pairs: Vec<(String, String)> = record
        .as_object()
        .expect("record is an object")
        .iter()
        .map(|(k, v)| {
            let value = match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (k.clone(), value)
        })
        .collect();
    pairs.push(("model".to_string(), model.to_string()));

    for (key, value) in overrides {
        if let Some(pair) = pairs.iter_mut().find(|(k, _)| k == key) {
            pair.1 = value.to_string();
        }
    }

    serde_urlencoded::to_string(&pairs).expect("form pairs encode")
}
