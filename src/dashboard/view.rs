//! Server-rendered dashboard pages

use std::fmt::Write;

use super::analytics::HistorySummary;
use super::chart::{bar_chart, line_chart};
use super::form::{MAX_MONTHLY_CHARGES, MAX_TENURE, MAX_TOTAL_CHARGES};
use super::session::{Notice, NoticeLevel, Page};
use crate::domain::{
    CustomerField, CustomerRecord, FieldKind, FieldValue, HistoryRecord, ModelId, ServiceHealth,
};

pub const EMPTY_HISTORY: &str = "No predictions recorded yet.";
pub const SERVICE_UNAVAILABLE: &str = "Prediction service is unavailable.";
const SYSTEM_DESCRIPTION: &str =
    "This system predicts customer churn using multiple machine learning models served via an API.";

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex;color:#222}\
aside{width:260px;padding:16px;background:#f4f5f7;min-height:100vh}\
main{flex:1;padding:16px 32px}\
.notice{padding:10px;border-radius:4px;margin-bottom:12px}\
.info{background:#e7f1fb}.error{background:#fdecea}\
.banner{padding:14px;border-radius:4px;font-size:1.2em;margin:12px 0}\
.high{background:#fdecea;color:#a12622}.low{background:#e8f5e9;color:#1e6b2a}\
.grid{display:grid;grid-template-columns:repeat(3,1fr);gap:10px}\
.charts{display:flex;flex-wrap:wrap;gap:16px}\
table{border-collapse:collapse;font-size:.85em}td,th{border:1px solid #ccc;padding:3px 6px}\
form.inline{display:inline}";

/// Everything needed to render one dashboard page
#[derive(Debug, Clone)]
pub struct PageContext {
    pub page: Page,
    pub selected_model: ModelId,
    pub notice: Option<Notice>,
    pub health: Result<ServiceHealth, String>,
    pub api_url: String,
    pub last_prediction: Option<HistoryRecord>,
    /// Values the input form starts from
    pub draft: CustomerRecord,
    /// Full history, only loaded for the results page
    pub history: Option<Vec<HistoryRecord>>,
}

/// Escape text for HTML element content and attribute values
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Banner text for a prediction, with the probability shown as a percentage
pub fn risk_banner(record: &HistoryRecord) -> String {
    let risk = if record.is_high_risk() { "High" } else { "Low" };

    match record.probability {
        Some(p) => format!("{} churn risk detected ({:.1}% probability)", risk, p * 100.0),
        None => format!("{} churn risk detected (probability unavailable)", risk),
    }
}

pub fn render_page(ctx: &PageContext) -> String {
    let mut body = String::new();

    if let Some(notice) = &ctx.notice {
        render_notice(&mut body, notice);
    }

    match ctx.page {
        Page::Input => render_input(&mut body, ctx),
        Page::Results => render_results(&mut body, ctx),
    }

    layout(&sidebar(ctx), &body)
}

/// Page shown when the history log cannot be read
pub fn render_error_page(ctx: &PageContext, message: &str) -> String {
    let mut body = String::new();
    render_notice(&mut body, &Notice::error(message));
    body.push_str(&actions());

    layout(&sidebar(ctx), &body)
}

fn layout(sidebar: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html lang=\"en\"><head><meta charset=\"utf-8\">\
         <title>Customer Churn Prediction</title><style>{STYLE}</style></head>\
         <body><aside>{sidebar}</aside><main><h1>Customer Churn Prediction</h1>{body}</main></body></html>"
    )
}

fn render_notice(out: &mut String, notice: &Notice) {
    let class = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Error => "error",
    };
    let _ = write!(
        out,
        r#"<div class="notice {class}">{}</div>"#,
        escape(&notice.message)
    );
}

fn model_options(selected: ModelId) -> String {
    let mut out = String::new();
    for model in [ModelId::Rf, ModelId::Logreg, ModelId::Knn] {
        let attr = if model == selected { " selected" } else { "" };
        let _ = write!(
            out,
            r#"<option value="{}"{attr}>{}</option>"#,
            model.as_str(),
            escape(model.display_name())
        );
    }
    out
}

fn sidebar(ctx: &PageContext) -> String {
    let mut out = format!(
        "<h2>Customer Churn System</h2><p><em>Predict &bull; Analyze &bull; Decide</em></p><p>{}</p><h2>Prediction Model</h2>",
        SYSTEM_DESCRIPTION
    );
    let _ = write!(
        out,
        r#"<form method="post" action="/model"><select name="model">{}</select> <button type="submit">Use model</button></form>"#,
        model_options(ctx.selected_model)
    );

    out.push_str("<h2>Service</h2>");
    match &ctx.health {
        Ok(health) => {
            let models = health
                .available_models
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            let _ = write!(
                out,
                "<p>{}</p><p>Models: {}</p>",
                escape(&health.status),
                escape(&models)
            );
        }
        Err(message) => {
            let _ = write!(
                out,
                r#"<p class="notice error">{}</p><p><small>{}</small></p>"#,
                SERVICE_UNAVAILABLE,
                escape(message)
            );
        }
    }
    let _ = write!(out, "<p><small>{}</small></p>", escape(&ctx.api_url));

    out
}

fn render_input(out: &mut String, ctx: &PageContext) {
    out.push_str(r#"<h2>Customer details</h2><form method="post" action="/predict"><div class="grid">"#);

    for field in CustomerField::ALL {
        let name = field.column();
        let _ = write!(out, "<label>{}<br>", escape(field.label()));

        match (field.kind(), ctx.draft.value(field)) {
            (FieldKind::Categorical, FieldValue::Text(current)) => {
                let _ = write!(out, r#"<select name="{name}">"#);
                for option in field.options() {
                    let attr = if *option == current { " selected" } else { "" };
                    let _ = write!(
                        out,
                        r#"<option value="{0}"{attr}>{0}</option>"#,
                        escape(option)
                    );
                }
                out.push_str("</select>");
            }
            (_, value) => {
                let current = match value {
                    FieldValue::Number(n) => n,
                    FieldValue::Text(_) => 0.0,
                };
                let (max, step) = match field {
                    CustomerField::Tenure => (f64::from(MAX_TENURE), "1"),
                    CustomerField::MonthlyCharges => (MAX_MONTHLY_CHARGES, "0.01"),
                    _ => (MAX_TOTAL_CHARGES, "0.01"),
                };
                let _ = write!(
                    out,
                    r#"<input type="number" name="{name}" min="0" max="{max}" step="{step}" value="{current}" required>"#
                );
            }
        }

        out.push_str("</label>");
    }

    let _ = write!(
        out,
        r#"</div><p><label>Model <select name="model">{}</select></label></p><button type="submit">Predict churn</button></form>"#,
        model_options(ctx.selected_model)
    );
}

fn actions() -> String {
    r#"<p><form class="inline" method="post" action="/new"><button type="submit">New Prediction</button></form> <form class="inline" method="post" action="/clear"><button type="submit">Clear All Predictions</button></form></p>"#
        .to_string()
}

fn render_results(out: &mut String, ctx: &PageContext) {
    if let Some(record) = &ctx.last_prediction {
        let class = if record.is_high_risk() { "high" } else { "low" };
        let _ = write!(
            out,
            r#"<div class="banner {class}">{}</div><p>Model used: {} &middot; {}</p>"#,
            escape(&risk_banner(record)),
            escape(record.model.display_name()),
            escape(record.prediction.message())
        );
    }

    out.push_str(&actions());
    out.push_str("<h2>Prediction history</h2>");

    let records = ctx.history.as_deref().unwrap_or_default();
    let summary = HistorySummary::from_records(records);

    if summary.is_empty() {
        let _ = write!(out, "<p>{}</p>", EMPTY_HISTORY);
        return;
    }

    let _ = write!(out, "<p>{} predictions", summary.total);
    if let Some(mean) = summary.mean_probability {
        let _ = write!(out, ", mean churn probability {:.1}%", mean * 100.0);
    }
    out.push_str("</p>");

    let _ = write!(
        out,
        r#"<div class="charts">{}{}{}</div>"#,
        bar_chart("Predictions by outcome", &summary.outcome_counts),
        bar_chart("Predictions by model", &summary.model_counts),
        line_chart("Tenure per prediction", &summary.tenure_series)
    );

    render_history_table(out, records);
}

fn render_history_table(out: &mut String, records: &[HistoryRecord]) {
    out.push_str("<table><thead><tr>");
    for field in CustomerField::ALL {
        let _ = write!(out, "<th>{}</th>", field.column());
    }
    out.push_str("<th>model</th><th>prediction</th><th>probability</th><th>timestamp</th></tr></thead><tbody>");

    for record in records {
        out.push_str("<tr>");
        let customer = record.customer();
        for field in CustomerField::ALL {
            let cell = match customer.value(field) {
                FieldValue::Text(text) => escape(text),
                FieldValue::Number(n) => n.to_string(),
            };
            let _ = write!(out, "<td>{cell}</td>");
        }
        let probability = record
            .probability
            .map(|p| format!("{:.4}", p))
            .unwrap_or_default();
        let _ = write!(
            out,
            "<td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            record.model,
            record.prediction,
            probability,
            record.timestamp.to_rfc3339()
        );
    }

    out.push_str("</tbody></table>");
}
