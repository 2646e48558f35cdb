//! Dashboard section scaffolds.
//!
//! Each section type is a fixed composition of Blend components. Options
//! tweak titles and data; everything is rendered through the markup
//! generator so formatting and imports match single-component output.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{MuseaError, Result};
use crate::markup::{
    generate_component_markup, ComponentGenerationRequest, MarkupOptions, PropTypes,
};

/// Known section patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    FintechKpiSummaryWithChart,
    TransactionListWithControls,
}

impl SectionType {
    pub const ALL: [SectionType; 2] = [
        SectionType::FintechKpiSummaryWithChart,
        SectionType::TransactionListWithControls,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::FintechKpiSummaryWithChart => "fintech_kpi_summary_with_chart",
            SectionType::TransactionListWithControls => "transaction_list_with_controls",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(|s| s.as_str()).collect()
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionType {
    type Err = MuseaError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| MuseaError::UnknownSection(s.to_string()))
    }
}

/// Options of `fintech_kpi_summary_with_chart`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KpiSummaryOptions {
    pub kpis: Vec<KpiOption>,
    pub chart_title: String,
    pub chart_type: String,
    pub chart_data: Value,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiOption {
    pub title: String,
    pub value: Value,
    #[serde(default)]
    pub change: Option<Value>,
}

impl Default for KpiSummaryOptions {
    fn default() -> Self {
        let kpi = |title: &str, value: &str, change: f64| KpiOption {
            title: title.to_string(),
            value: Value::String(value.to_string()),
            change: Some(json!({ "value": change, "valueType": "percentage" })),
        };
        Self {
            kpis: vec![
                kpi("Total Revenue", "₹12,45,000", 12.5),
                kpi("Transactions", "8,432", 4.2),
                kpi("Success Rate", "98.2%", -0.3),
            ],
            chart_title: "Revenue Trend".to_string(),
            chart_type: "line".to_string(),
            chart_data: json!([
                { "name": "Jan", "revenue": 980000 },
                { "name": "Feb", "revenue": 1245000 },
                { "name": "Mar", "revenue": 1120000 }
            ]),
        }
    }
}

/// A table column of `transaction_list_with_controls`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnOption {
    pub field: String,
    pub header: String,
}

/// Options of `transaction_list_with_controls`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionListOptions {
    pub title: String,
    pub columns: Vec<ColumnOption>,
    pub show_date_filter: bool,
    pub action_text: String,
}

impl Default for TransactionListOptions {
    fn default() -> Self {
        let column = |field: &str, header: &str| ColumnOption {
            field: field.to_string(),
            header: header.to_string(),
        };
        Self {
            title: "Recent Transactions".to_string(),
            columns: vec![
                column("id", "Transaction ID"),
                column("date", "Date"),
                column("amount", "Amount"),
                column("status", "Status"),
            ],
            show_date_filter: true,
            action_text: "Export".to_string(),
        }
    }
}

/// Build the component tree of a section.
///
/// `options` may be `null` (all defaults) or an object of overrides.
pub fn section_request(
    section: SectionType,
    options: &Value,
) -> Result<ComponentGenerationRequest> {
    let request = match section {
        SectionType::FintechKpiSummaryWithChart => kpi_summary(parse_options(options)?),
        SectionType::TransactionListWithControls => transaction_list(parse_options(options)?),
    };
    Ok(request)
}

/// Render a section as JSX.
pub fn scaffold_dashboard_section(
    section_type: &str,
    options: &Value,
    markup: &MarkupOptions,
    types: &dyn PropTypes,
) -> Result<String> {
    let section: SectionType = section_type.parse()?;
    let request = section_request(section, options)?;
    tracing::debug!("scaffolding {}", section);
    Ok(generate_component_markup(&request, markup, types))
}

fn parse_options<T: serde::de::DeserializeOwned + Default>(options: &Value) -> Result<T> {
    match options {
        Value::Null => Ok(T::default()),
        Value::Object(_) => serde_json::from_value(options.clone())
            .map_err(|e| MuseaError::InvalidOptions(e.to_string())),
        other => Err(MuseaError::InvalidOptions(format!(
            "expected an object, got {other}"
        ))),
    }
}

fn stack(direction: &str) -> ComponentGenerationRequest {
    ComponentGenerationRequest::new("div").prop(
        "style",
        json!({ "display": "flex", "flexDirection": direction, "gap": "16px" }),
    )
}

fn kpi_summary(options: KpiSummaryOptions) -> ComponentGenerationRequest {
    let mut cards = ComponentGenerationRequest::new("div").prop(
        "style",
        json!({
            "display": "grid",
            "gridTemplateColumns": "repeat(auto-fit, minmax(220px, 1fr))",
            "gap": "16px"
        }),
    );
    for kpi in options.kpis {
        let mut card = ComponentGenerationRequest::new("StatCard")
            .prop("title", kpi.title)
            .prop("value", kpi.value);
        if let Some(change) = kpi.change {
            card = card.prop("change", change);
        }
        cards = cards.child(card);
    }

    let heading = ComponentGenerationRequest::new("Text")
        .prop("variant", "heading.sm")
        .text(options.chart_title);
    let chart = ComponentGenerationRequest::new("Charts")
        .prop("chartType", options.chart_type)
        .prop("data", options.chart_data);

    stack("column").child(cards).child(heading).child(chart)
}

fn transaction_list(options: TransactionListOptions) -> ComponentGenerationRequest {
    let mut controls = ComponentGenerationRequest::new("div").prop(
        "style",
        json!({ "display": "flex", "justifyContent": "space-between", "alignItems": "center" }),
    );
    if options.show_date_filter {
        controls = controls.child(
            ComponentGenerationRequest::new("DateRangePicker")
                .prop("value", "{dateRange}")
                .prop("onChange", "{setDateRange}"),
        );
    }
    controls = controls.child(
        ComponentGenerationRequest::new("Button")
            .prop("text", options.action_text)
            .prop("buttonType", "{ButtonType.SECONDARY}"),
    );

    let columns: Vec<Value> = options
        .columns
        .iter()
        .map(|c| json!({ "field": c.field, "header": c.header }))
        .collect();
    let table = ComponentGenerationRequest::new("DataTable")
        .prop("title", options.title)
        .prop("idField", "id")
        .prop("columns", Value::Array(columns))
        .prop("data", "{transactions}");

    stack("column").child(controls).child(table)
}
