//! Dashboard input form

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::{CustomerField, CustomerRecord, DomainError, ModelId};

pub const MAX_TENURE: u32 = 120;
pub const MAX_MONTHLY_CHARGES: f64 = 200.0;
pub const MAX_TOTAL_CHARGES: f64 = 10_000.0;

/// Submitted input form. Field names match the service's wire names so the
/// form posts the same columns the service expects, plus the model choice.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "PascalCase")]
#[validate(schema(function = "validate_form", skip_on_field_errors = false))]
pub struct PredictionForm {
    #[serde(rename = "gender")]
    pub gender: String,
    pub senior_citizen: String,
    pub partner: String,
    pub dependents: String,
    #[serde(rename = "tenure")]
    #[validate(range(max = 120))]
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
    #[validate(range(min = 0.0, max = 200.0))]
    pub monthly_charges: f64,
    #[validate(range(min = 0.0, max = 10000.0))]
    pub total_charges: f64,
    #[serde(rename = "model", default)]
    pub model: ModelId,
}

/// Sidebar model selector
#[derive(Debug, Clone, Deserialize)]
pub struct ModelSelection {
    pub model: ModelId,
}

impl PredictionForm {
    pub fn record(&self) -> CustomerRecord {
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

    /// Validate and split into the record to score and the model to use
    pub fn into_request(self) -> Result<(CustomerRecord, ModelId), DomainError> {
        self.validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        Ok((self.record(), self.model))
    }
}

/// Charges must be finite and categorical values must be one of the
/// field's choices
fn validate_form(form: &PredictionForm) -> Result<(), ValidationError> {
    for (label, value) in [
        ("Monthly Charges", form.monthly_charges),
        ("Total Charges", form.total_charges),
    ] {
        if !value.is_finite() {
            let mut error = ValidationError::new("finite");
            error.message = Some(format!("{} must be a number", label).into());
            return Err(error);
        }
    }

    let record = form.record();

    for field in CustomerField::categorical() {
        let Some(value) = record.text(field) else {
            continue;
        };

        if !field.options().contains(&value) {
            let mut error = ValidationError::new("choice");
            let message = format!(
                "{} must be one of: {}",
                field.label(),
                field.options().join(", ")
            );
            error.message = Some(message.into());
            return Err(error);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::extract::FromRequest;
    use axum::http::{header, Request};
    use axum::Form;

    use super::*;
    use crate::testing::form_body;

    async fn parse(overrides: &[(&str, &str)]) -> PredictionForm {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form_body(overrides, "knn")))
            .unwrap();

        let Form(form) = Form::<PredictionForm>::from_request(request, &())
            .await
            .unwrap();
        form
    }

    #[tokio::test]
    async fn test_default_form_is_valid() {
        let (record, model) = parse(&[]).await.into_request().unwrap();

        assert_eq!(record, CustomerRecord::default());
        assert_eq!(model, ModelId::Knn);
    }

    #[tokio::test]
    async fn test_tenure_above_bound_rejected() {
        let err = parse(&[("tenure", "121")]).await.into_request().unwrap_err();

        assert!(matches!(err, DomainError::Validation { .. }));
        assert!(err.to_string().contains("tenure"));
    }

    #[tokio::test]
    async fn test_charge_bounds() {
        assert!(parse(&[("MonthlyCharges", "200.5")]).await.into_request().is_err());
        assert!(parse(&[("TotalCharges", "10000.01")]).await.into_request().is_err());
        assert!(parse(&[("TotalCharges", "10000")]).await.into_request().is_ok());
        assert!(parse(&[("MonthlyCharges", "0")]).await.into_request().is_ok());
    }

    #[tokio::test]
    async fn test_non_finite_charges_rejected() {
        for value in ["NaN", "inf", "-inf"] {
            let err = parse(&[("MonthlyCharges", value)])
                .await
                .into_request()
                .unwrap_err();
            assert!(err.to_string().contains("Monthly Charges must be a number"));

            let err = parse(&[("TotalCharges", value)])
                .await
                .into_request()
                .unwrap_err();
            assert!(err.to_string().contains("Total Charges must be a number"));
        }
    }

    #[tokio::test]
    async fn test_reserved_characters_survive_encoding() {
        let form = parse(&[("PaymentMethod", "Cash & 50% + card")]).await;

        assert_eq!(form.payment_method, "Cash & 50% + card");
        assert!(form.into_request().is_err());
    }

    #[tokio::test]
    async fn test_unknown_choice_rejected() {
        let err = parse(&[("Contract", "Weekly")])
            .await
            .into_request()
            .unwrap_err();

        assert!(err.to_string().contains("Month-to-month"));
    }

    #[tokio::test]
    async fn test_choices_with_spaces_accepted() {
        let form = parse(&[
            ("PaymentMethod", "Credit card (automatic)"),
            ("InternetService", "Fiber optic"),
        ])
        .await;

        let (record, _) = form.into_request().unwrap();
        assert_eq!(record.payment_method, "Credit card (automatic)");
        assert_eq!(record.internet_service, "Fiber optic");
    }
}
