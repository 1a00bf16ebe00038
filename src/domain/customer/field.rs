//! Customer record columns and their enumerated choices

use std::fmt;

const YES_NO: &[&str] = &["No", "Yes"];
const INTERNET_ADDON: &[&str] = &["No", "Yes", "No internet service"];

/// Kind of value a column holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Categorical,
    Numeric,
}

/// Borrowed value of a single customer column
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

/// One of the 19 columns of a customer record, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CustomerField {
    Gender,
    SeniorCitizen,
    Partner,
    Dependents,
    Tenure,
    PhoneService,
    MultipleLines,
    InternetService,
    OnlineSecurity,
    OnlineBackup,
    DeviceProtection,
    TechSupport,
    StreamingTv,
    StreamingMovies,
    Contract,
    PaperlessBilling,
    PaymentMethod,
    MonthlyCharges,
    TotalCharges,
}

impl CustomerField {
    pub const ALL: [CustomerField; 19] = [
        Self::Gender,
        Self::SeniorCitizen,
        Self::Partner,
        Self::Dependents,
        Self::Tenure,
        Self::PhoneService,
        Self::MultipleLines,
        Self::InternetService,
        Self::OnlineSecurity,
        Self::OnlineBackup,
        Self::DeviceProtection,
        Self::TechSupport,
        Self::StreamingTv,
        Self::StreamingMovies,
        Self::Contract,
        Self::PaperlessBilling,
        Self::PaymentMethod,
        Self::MonthlyCharges,
        Self::TotalCharges,
    ];

    /// Column name as it appears on the wire and in the history file
    pub fn column(&self) -> &'static str {
        match self {
            Self::Gender => "gender",
            Self::SeniorCitizen => "SeniorCitizen",
            Self::Partner => "Partner",
            Self::Dependents => "Dependents",
            Self::Tenure => "tenure",
            Self::PhoneService => "PhoneService",
            Self::MultipleLines => "MultipleLines",
            Self::InternetService => "InternetService",
            Self::OnlineSecurity => "OnlineSecurity",
            Self::OnlineBackup => "OnlineBackup",
            Self::DeviceProtection => "DeviceProtection",
            Self::TechSupport => "TechSupport",
            Self::StreamingTv => "StreamingTV",
            Self::StreamingMovies => "StreamingMovies",
            Self::Contract => "Contract",
            Self::PaperlessBilling => "PaperlessBilling",
            Self::PaymentMethod => "PaymentMethod",
            Self::MonthlyCharges => "MonthlyCharges",
            Self::TotalCharges => "TotalCharges",
        }
    }

    /// Human-readable label used by the dashboard form
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gender => "Gender",
            Self::SeniorCitizen => "Senior Citizen",
            Self::Partner => "Partner",
            Self::Dependents => "Dependents",
            Self::Tenure => "Tenure (months)",
            Self::PhoneService => "Phone Service",
            Self::MultipleLines => "Multiple Lines",
            Self::InternetService => "Internet Service",
            Self::OnlineSecurity => "Online Security",
            Self::OnlineBackup => "Online Backup",
            Self::DeviceProtection => "Device Protection",
            Self::TechSupport => "Tech Support",
            Self::StreamingTv => "Streaming TV",
            Self::StreamingMovies => "Streaming Movies",
            Self::Contract => "Contract Type",
            Self::PaperlessBilling => "Paperless Billing",
            Self::PaymentMethod => "Payment Method",
            Self::MonthlyCharges => "Monthly Charges (€)",
            Self::TotalCharges => "Total Charges (€)",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Tenure | Self::MonthlyCharges | Self::TotalCharges => FieldKind::Numeric,
            _ => FieldKind::Categorical,
        }
    }

    /// Enumerated choices for categorical columns, first entry is the default.
    /// Numeric columns have no choices.
    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::Gender => &["Female", "Male"],
            Self::SeniorCitizen
            | Self::Partner
            | Self::Dependents
            | Self::PhoneService
            | Self::PaperlessBilling => YES_NO,
            Self::MultipleLines => &["No", "Yes", "No phone service"],
            Self::InternetService => &["DSL", "Fiber optic", "No"],
            Self::OnlineSecurity
            | Self::OnlineBackup
            | Self::DeviceProtection
            | Self::TechSupport
            | Self::StreamingTv
            | Self::StreamingMovies => INTERNET_ADDON,
            Self::Contract => &["Month-to-month", "One year", "Two year"],
            Self::PaymentMethod => &[
                "Electronic check",
                "Mailed check",
                "Bank transfer (automatic)",
                "Credit card (automatic)",
            ],
            Self::Tenure | Self::MonthlyCharges | Self::TotalCharges => &[],
        }
    }

    /// Look up a column by its wire name
    pub fn from_column(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.column() == name)
    }

    pub fn categorical() -> impl Iterator<Item = CustomerField> {
        Self::ALL
            .into_iter()
            .filter(|field| field.kind() == FieldKind::Categorical)
    }
}

impl fmt::Display for CustomerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_counts() {
        let categorical = CustomerField::categorical().count();
        let numeric = CustomerField::ALL
            .iter()
            .filter(|f| f.kind() == FieldKind::Numeric)
            .count();

        assert_eq!(categorical, 16);
        assert_eq!(numeric, 3);
    }

    #[test]
    fn test_categorical_fields_have_options() {
        for field in CustomerField::categorical() {
            assert!(!field.options().is_empty(), "{} has no options", field);
        }
        assert!(CustomerField::Tenure.options().is_empty());
    }

    #[test]
    fn test_from_column() {
        assert_eq!(
            CustomerField::from_column("StreamingTV"),
            Some(CustomerField::StreamingTv)
        );
        assert_eq!(CustomerField::from_column("tenure"), Some(CustomerField::Tenure));
        assert_eq!(CustomerField::from_column("Tenure"), None);
    }
}
