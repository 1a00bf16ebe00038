//! Customer record sent to the prediction service

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::field::{CustomerField, FieldValue};

/// Raw customer attributes, one value per column. Categorical values are
/// not checked against their choices here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
pub struct CustomerRecord {
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
    #[validate(range(min = 0.0))]
    pub monthly_charges: f64,
    #[validate(range(min = 0.0))]
    pub total_charges: f64,
}

impl CustomerRecord {
    /// Value of a single column
    pub fn value(&self, field: CustomerField) -> FieldValue<'_> {
        use CustomerField::*;

        match field {
            Gender => FieldValue::Text(&self.gender),
            SeniorCitizen => FieldValue::Text(&self.senior_citizen),
            Partner => FieldValue::Text(&self.partner),
            Dependents => FieldValue::Text(&self.dependents),
            Tenure => FieldValue::Number(f64::from(self.tenure)),
            PhoneService => FieldValue::Text(&self.phone_service),
            MultipleLines => FieldValue::Text(&self.multiple_lines),
            InternetService => FieldValue::Text(&self.internet_service),
            OnlineSecurity => FieldValue::Text(&self.online_security),
            OnlineBackup => FieldValue::Text(&self.online_backup),
            DeviceProtection => FieldValue::Text(&self.device_protection),
            TechSupport => FieldValue::Text(&self.tech_support),
            StreamingTv => FieldValue::Text(&self.streaming_tv),
            StreamingMovies => FieldValue::Text(&self.streaming_movies),
            Contract => FieldValue::Text(&self.contract),
            PaperlessBilling => FieldValue::Text(&self.paperless_billing),
            PaymentMethod => FieldValue::Text(&self.payment_method),
            MonthlyCharges => FieldValue::Number(self.monthly_charges),
            TotalCharges => FieldValue::Number(self.total_charges),
        }
    }

    /// Text value of a categorical column, `None` for numeric columns
    pub fn text(&self, field: CustomerField) -> Option<&str> {
        match self.value(field) {
            FieldValue::Text(value) => Some(value),
            FieldValue::Number(_) => None,
        }
    }

    /// Numeric value of a numeric column, `None` for categorical columns
    pub fn number(&self, field: CustomerField) -> Option<f64> {
        match self.value(field) {
            FieldValue::Number(value) => Some(value),
            FieldValue::Text(_) => None,
        }
    }
}

impl Default for CustomerRecord {
    /// The dashboard's initial form: first choice of every column,
    /// 12 months tenure, 70.0 monthly and 900.0 total charges.
    fn default() -> Self {
        let first = |field: CustomerField| field.options()[0].to_string();

        Self {
            gender: first(CustomerField::Gender),
            senior_citizen: first(CustomerField::SeniorCitizen),
            partner: first(CustomerField::Partner),
            dependents: first(CustomerField::Dependents),
            tenure: 12,
            phone_service: first(CustomerField::PhoneService),
            multiple_lines: first(CustomerField::MultipleLines),
            internet_service: first(CustomerField::InternetService),
            online_security: first(CustomerField::OnlineSecurity),
            online_backup: first(CustomerField::OnlineBackup),
            device_protection: first(CustomerField::DeviceProtection),
            tech_support: first(CustomerField::TechSupport),
            streaming_tv: first(CustomerField::StreamingTv),
            streaming_movies: first(CustomerField::StreamingMovies),
            contract: first(CustomerField::Contract),
            paperless_billing: first(CustomerField::PaperlessBilling),
            payment_method: first(CustomerField::PaymentMethod),
            monthly_charges: 70.0,
            total_charges: 900.0,
        }
    }
}
