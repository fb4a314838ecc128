//! Builds the request body the chart rendering service expects.

use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use super::aggregation::MonthlySummary;

/// A chart description in the rendering service's schema.
///
/// Income and expense render as bars, profit as a line over the top.
#[derive(Debug, Clone, Serialize)]
pub struct ChartDocument {
    chart: ChartSpec,
}

#[derive(Debug, Clone, Serialize)]
struct ChartSpec {
    #[serde(rename = "type")]
    chart_type: &'static str,
    data: ChartData,
    options: ChartOptions,
}

#[derive(Debug, Clone, Serialize)]
struct ChartData {
    labels: Vec<String>,
    datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Serialize)]
struct Dataset {
    #[serde(rename = "type")]
    dataset_type: &'static str,
    label: &'static str,
    data: Vec<f64>,
    #[serde(rename = "backgroundColor", skip_serializing_if = "Option::is_none")]
    background_color: Option<&'static str>,
    #[serde(rename = "borderColor", skip_serializing_if = "Option::is_none")]
    border_color: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fill: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
struct ChartOptions {
    title: ChartTitle,
}

#[derive(Debug, Clone, Serialize)]
struct ChartTitle {
    display: bool,
    text: &'static str,
}

impl From<&MonthlySummary> for ChartDocument {
    fn from(summary: &MonthlySummary) -> Self {
        let to_floats = |series: &[rust_decimal::Decimal]| {
            series
                .iter()
                .map(|value| value.to_f64().unwrap_or_default())
                .collect()
        };

        Self {
            chart: ChartSpec {
                chart_type: "bar",
                data: ChartData {
                    labels: summary.labels.clone(),
                    datasets: vec![
                        Dataset {
                            dataset_type: "bar",
                            label: "Income",
                            data: to_floats(&summary.income),
                            background_color: Some("rgba(75, 192, 192, 0.6)"),
                            border_color: None,
                            fill: None,
                        },
                        Dataset {
                            dataset_type: "bar",
                            label: "Expense",
                            data: to_floats(&summary.expense),
                            background_color: Some("rgba(255, 99, 132, 0.6)"),
                            border_color: None,
                            fill: None,
                        },
                        Dataset {
                            dataset_type: "line",
                            label: "Profit",
                            data: to_floats(&summary.profit),
                            background_color: None,
                            border_color: Some("rgba(54, 162, 235, 1.0)"),
                            fill: Some(false),
                        },
                    ],
                },
                options: ChartOptions {
                    title: ChartTitle {
                        display: true,
                        text: "Monthly income and expenses",
                    },
                },
            },
        }
    }
}

#[cfg(test)]
mod document_tests {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::report::MonthlySummary;

    use super::ChartDocument;

    fn decimals(raw: &[&str]) -> Vec<Decimal> {
        raw.iter().map(|s| Decimal::from_str(s).unwrap()).collect()
    }

    #[test]
    fn document_has_two_bars_and_a_line() {
        let summary = MonthlySummary {
            labels: vec!["January".to_owned(), "February".to_owned()],
            income: decimals(&["100", "50"]),
            expense: decimals(&["30", "0"]),
            profit: decimals(&["70", "50"]),
        };

        let value = serde_json::to_value(ChartDocument::from(&summary)).unwrap();

        assert_eq!(value["chart"]["type"], "bar");
        assert_eq!(
            value["chart"]["data"]["labels"],
            json!(["January", "February"])
        );

        let datasets = value["chart"]["data"]["datasets"].as_array().unwrap();
        assert_eq!(datasets.len(), 3);
        assert_eq!(datasets[0]["label"], "Income");
        assert_eq!(datasets[0]["type"], "bar");
        assert_eq!(datasets[0]["data"], json!([100.0, 50.0]));
        assert_eq!(datasets[1]["label"], "Expense");
        assert_eq!(datasets[1]["type"], "bar");
        assert_eq!(datasets[2]["label"], "Profit");
        assert_eq!(datasets[2]["type"], "line");
        assert_eq!(datasets[2]["data"], json!([70.0, 50.0]));
    }
}
