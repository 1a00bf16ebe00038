//! History record entity

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::customer::CustomerRecord;
use crate::domain::prediction::{ChurnLabel, ModelId, PredictionResult};

/// One persisted prediction: the submitted customer, the model used and
/// its outcome. Kept flat so every attribute maps to one history column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct HistoryRecord {
    #[serde(rename = "gender")]
    pub gender: String,
    pub senior_citizen: String,
    pub partner: String,
    pub dependents: String,
    #[serde(rename = "tenure")]
    pub tenure: u32,
    pub phone_service: String,
    pub multiple_lines: String,
    pub internet_service: String,
    pub online_security: String,
    pub online_backup: String,
    pub device_protection: String,
    pub tech_support: String,
    #[serde(rename = "StreamingTV")]
    pub streaming_tv: String,
    pub streaming_movies: String,
    pub contract: String,
    pub paperless_billing: String,
    pub payment_method: String,
    pub monthly_charges: f64,
    pub total_charges: f64,
    #[serde(rename = "model")]
    pub model: ModelId,
    #[serde(rename = "prediction")]
    pub prediction: ChurnLabel,
    #[serde(rename = "probability")]
    pub probability: Option<f64>,
    #[serde(rename = "timestamp", deserialize_with = "deserialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl HistoryRecord {
    pub fn new(customer: CustomerRecord, result: &PredictionResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            gender: customer.gender,
            senior_citizen: customer.senior_citizen,
            partner: customer.partner,
            dependents: customer.dependents,
            tenure: customer.tenure,
            phone_service: customer.phone_service,
            multiple_lines: customer.multiple_lines,
            internet_service: customer.internet_service,
            online_security: customer.online_security,
            online_backup: customer.online_backup,
            device_protection: customer.device_protection,
            tech_support: customer.tech_support,
            streaming_tv: customer.streaming_tv,
            streaming_movies: customer.streaming_movies,
            contract: customer.contract,
            paperless_billing: customer.paperless_billing,
            payment_method: customer.payment_method,
            monthly_charges: customer.monthly_charges,
            total_charges: customer.total_charges,
            model: result.model_used,
            prediction: result.prediction,
            probability: result.churn_probability,
            timestamp,
        }
    }

    /// The customer attributes this prediction was made for
    pub fn customer(&self) -> CustomerRecord {
        CustomerRecord {
            gender: self.gender.clone(),
            senior_citizen: self.senior_citizen.clone(),
            partner: self.partner.clone(),
            dependents: self.dependents.clone(),
            tenure: self.tenure,
            phone_service: self.phone_service.clone(),
            multiple_lines: self.multiple_lines.clone(),
            internet_service: self.internet_service.clone(),
            online_security: self.online_security.clone(),
            online_backup: self.online_backup.clone(),
            device_protection: self.device_protection.clone(),
            tech_support: self.tech_support.clone(),
            streaming_tv: self.streaming_tv.clone(),
            streaming_movies: self.streaming_movies.clone(),
            contract: self.contract.clone(),
            paperless_billing: self.paperless_billing.clone(),
            payment_method: self.payment_method.clone(),
            monthly_charges: self.monthly_charges,
            total_charges: self.total_charges,
        }
    }

    pub fn is_high_risk(&self) -> bool {
        self.prediction == ChurnLabel::Leave
    }
}

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one which is taken as UTC
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    match DateTime::parse_from_rfc3339(raw) {
        Ok(timestamp) => Ok(timestamp.with_timezone(&Utc)),
        Err(_) => NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc()),
    }
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_copies_customer_and_result() {
        let customer = CustomerRecord {
            tenure: 3,
            contract: "Two year".to_string(),
            ..CustomerRecord::default()
        };
        let result = PredictionResult::new(ModelId::Logreg, ChurnLabel::Leave, Some(0.81));

        let record = HistoryRecord::new(customer.clone(), &result, Utc::now());

        assert_eq!(record.customer(), customer);
        assert_eq!(record.model, ModelId::Logreg);
        assert_eq!(record.probability, Some(0.81));
        assert!(record.is_high_risk());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();

        assert_eq!(parse_timestamp("2024-05-01T09:00:00+00:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-05-01T11:00:00+02:00").unwrap(), expected);
        assert_eq!(parse_timestamp("2024-05-01T09:00:00").unwrap(), expected);
        assert_eq!(
            parse_timestamp("2024-05-01T09:00:00.123456").unwrap(),
            expected + chrono::Duration::microseconds(123_456)
        );
        assert!(parse_timestamp("yesterday").is_err());
    }
}
