/// Chart rendering: aggregate tables → Plotly figure descriptions.
///
/// `render_chart` takes a `ChartTable` (named columns), a `ColumnRoles`
/// saying which column is the label, the value and optionally the series,
/// a title and a `ChartKind`, and returns a `Chart` whose `figure` is a
/// `{ "data": [...], "layout": {...} }` object ready for `Plotly.newPlot`.
/// `build_charts` wires the five dashboard tables to their chart kinds.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::config::{COMPARISON_YEARS, HISTOGRAM_YEAR, MAP_YEAR, TOP_CITY_COUNT};
use crate::error::PipelineError;
use crate::ingest::boundaries::Boundaries;
use crate::model::{AgeGroupCount, DashboardData, GroupCount, MonthlyCount};

// ---------------------------------------------------------------------------
// Chart inputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Choropleth,
    HorizontalBar,
    Pie,
    Line,
    Histogram,
}

/// A small column-oriented table. Every column has the same length.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartTable {
    columns: Vec<(String, Vec<Value>)>,
}

impl ChartTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_column(mut self, name: &str, values: Vec<Value>) -> Self {
        self.columns.push((name.to_string(), values));
        self
    }

    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |(_, values)| values.len())
    }
}

/// Which columns of a `ChartTable` play which part in the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoles {
    /// Category / location / x axis.
    pub label: String,
    /// Count plotted as size, colour or y.
    pub value: String,
    /// Splits rows into separate traces (line chart only).
    pub series: Option<String>,
}

impl ColumnRoles {
    pub fn new(label: &str, value: &str) -> Self {
        ColumnRoles { label: label.to_string(), value: value.to_string(), series: None }
    }

    pub fn with_series(mut self, series: &str) -> Self {
        self.series = Some(series.to_string());
        self
    }
}

/// A rendered chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub kind: ChartKind,
    pub title: String,
    pub figure: Value,
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Builds a Plotly figure for `table`.
///
/// `geo` is required for `ChartKind::Choropleth` and ignored otherwise.
pub fn render_chart(
    table: &ChartTable,
    roles: &ColumnRoles,
    title: &str,
    kind: ChartKind,
    geo: Option<&Boundaries>,
) -> Result<Chart, PipelineError> {
    let fail = |reason: String| PipelineError::Render { title: title.to_string(), reason };

    let labels = table
        .column(&roles.label)
        .ok_or_else(|| fail(format!("no label column '{}'", roles.label)))?;
    let values = table
        .column(&roles.value)
        .ok_or_else(|| fail(format!("no value column '{}'", roles.value)))?;
    if labels.len() != values.len() {
        return Err(fail(format!(
            "label column has {} rows, value column has {}",
            labels.len(),
            values.len()
        )));
    }

    let mut layout = json!({ "title": { "text": title } });

    let data = match kind {
        ChartKind::Choropleth => {
            let geo = geo.ok_or_else(|| fail("choropleth needs boundary data".to_string()))?;
            layout["geo"] = json!({ "fitbounds": "locations", "visible": false });
            vec![json!({
                "type": "choropleth",
                "geojson": geo.geojson,
                "featureidkey": geo.feature_id_key,
                "locations": labels,
                "z": values,
                "hovertext": labels,
                "colorbar": { "title": { "text": roles.value } },
            })]
        }
        ChartKind::HorizontalBar => {
            layout["xaxis"] = json!({ "title": { "text": roles.value } });
            layout["yaxis"] = json!({ "title": { "text": roles.label } });
            vec![json!({
                "type": "bar",
                "orientation": "h",
                "x": values,
                "y": labels,
            })]
        }
        ChartKind::Pie => {
            vec![json!({
                "type": "pie",
                "labels": labels,
                "values": values,
            })]
        }
        ChartKind::Line => {
            layout["xaxis"] = json!({ "title": { "text": roles.label } });
            layout["yaxis"] = json!({ "title": { "text": roles.value } });
            match &roles.series {
                Some(series) => {
                    let series_values = table
                        .column(series)
                        .ok_or_else(|| fail(format!("no series column '{}'", series)))?;
                    if series_values.len() != labels.len() {
                        return Err(fail(format!("series column '{}' has wrong length", series)));
                    }
                    layout["legend"] = json!({ "title": { "text": series } });
                    line_traces(labels, values, series_values)
                }
                None => vec![json!({
                    "type": "scatter",
                    "mode": "lines",
                    "x": labels,
                    "y": values,
                })],
            }
        }
        ChartKind::Histogram => {
            // Counts are already binned; keep the bucket order on the axis.
            layout["xaxis"] = json!({
                "title": { "text": roles.label },
                "type": "category",
                "categoryorder": "array",
                "categoryarray": labels,
            });
            layout["yaxis"] = json!({ "title": { "text": "count" } });
            layout["bargap"] = json!(0.0);
            vec![json!({
                "type": "bar",
                "x": labels,
                "y": values,
            })]
        }
    };

    Ok(Chart {
        kind,
        title: title.to_string(),
        figure: json!({ "data": data, "layout": layout }),
    })
}

/// One scatter trace per distinct series value, in first-seen order.
fn line_traces(labels: &[Value], values: &[Value], series: &[Value]) -> Vec<Value> {
    let mut order: Vec<String> = Vec::new();
    let mut traces: Map<String, Value> = Map::new();

    for ((x, y), s) in labels.iter().zip(values).zip(series) {
        let name = match s {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        };
        let trace = traces.entry(name.clone()).or_insert_with(|| {
            order.push(name.clone());
            json!({ "type": "scatter", "mode": "lines", "name": name, "x": [], "y": [] })
        });
        if let Some(xs) = trace["x"].as_array_mut() {
            xs.push(x.clone());
        }
        if let Some(ys) = trace["y"].as_array_mut() {
            ys.push(y.clone());
        }
    }

    order.iter().filter_map(|name| traces.remove(name)).collect()
}

// ---------------------------------------------------------------------------
// Aggregate → table adapters
// ---------------------------------------------------------------------------

pub fn group_count_table(counts: &[GroupCount], label: &str, value: &str) -> ChartTable {
    ChartTable::new()
        .with_column(label, counts.iter().map(|c| json!(c.key)).collect())
        .with_column(value, counts.iter().map(|c| json!(c.count)).collect())
}

/// Columns `month` (first day, ISO date), `deaths` and `year`.
pub fn monthly_table(counts: &[MonthlyCount]) -> ChartTable {
    let months = counts
        .iter()
        .map(|m| match m.period_start() {
            Some(date) => json!(date.format("%Y-%m-%d").to_string()),
            None => Value::Null,
        })
        .collect();

    ChartTable::new()
        .with_column("month", months)
        .with_column("deaths", counts.iter().map(|m| json!(m.count)).collect())
        .with_column("year", counts.iter().map(|m| json!(m.year)).collect())
}

pub fn age_group_table(counts: &[AgeGroupCount]) -> ChartTable {
    ChartTable::new()
        .with_column("age group", counts.iter().map(|c| json!(c.group)).collect())
        .with_column("deaths", counts.iter().map(|c| json!(c.count)).collect())
}

/// Renders the five dashboard charts in page order.
pub fn build_charts(data: &DashboardData, boundaries: &Boundaries) -> Result<Vec<Chart>, PipelineError> {
    let [first_year, second_year] = COMPARISON_YEARS;

    Ok(vec![
        render_chart(
            &group_count_table(&data.region_deaths, "department", "deaths"),
            &ColumnRoles::new("department", "deaths"),
            &format!("Total COVID-19 Deaths by Department ({})", MAP_YEAR),
            ChartKind::Choropleth,
            Some(boundaries),
        )?,
        render_chart(
            &group_count_table(&data.top_cities, "city", "deaths"),
            &ColumnRoles::new("city", "deaths"),
            &format!("Top {} Cities by COVID-19 Deaths ({})", TOP_CITY_COUNT, MAP_YEAR),
            ChartKind::HorizontalBar,
            None,
        )?,
        render_chart(
            &group_count_table(&data.case_status, "case status", "count"),
            &ColumnRoles::new("case status", "count"),
            &format!("COVID-19 Case Status Distribution ({})", MAP_YEAR),
            ChartKind::Pie,
            None,
        )?,
        render_chart(
            &monthly_table(&data.monthly_deaths),
            &ColumnRoles::new("month", "deaths").with_series("year"),
            &format!("Monthly COVID-19 Deaths ({} vs {})", first_year, second_year),
            ChartKind::Line,
            None,
        )?,
        render_chart(
            &age_group_table(&data.age_groups),
            &ColumnRoles::new("age group", "deaths"),
            &format!("Frequency of COVID-19 Deaths by Age Group ({})", HISTOGRAM_YEAR),
            ChartKind::Histogram,
            None,
        )?,
    ])
}
