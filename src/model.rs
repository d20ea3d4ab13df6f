/// Shared data types for the COVID-19 mortality dashboard.
///
/// `RawRecord` is a row exactly as it appears in the source export, `Record`
/// is the typed row the analysis layer works on, and the remaining types are
/// the derived aggregate tables handed to the renderer.

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Source columns
// ---------------------------------------------------------------------------

pub const COL_DEATH_DATE: &str = "FECHA DEFUNCIÓN";
pub const COL_CASE_STATUS: &str = "COVID-19";
pub const COL_REGION: &str = "DEPARTAMENTO";
pub const COL_CITY: &str = "MUNICIPIO";
pub const COL_AGE: &str = "EDAD FALLECIDO";

/// Every column the loader insists on. Checked once against the header row.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_DEATH_DATE,
    COL_CASE_STATUS,
    COL_REGION,
    COL_CITY,
    COL_AGE,
];

/// Case status of a lab-confirmed COVID-19 death.
pub const CONFIRMED_STATUS: &str = "CONFIRMADO";

/// Label used for rows whose case-status cell is blank, so the status
/// distribution still accounts for every row of the year.
pub const MISSING_STATUS_LABEL: &str = "SIN DATO";

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One row of the source table as text. Cells missing from a short row
/// are empty strings.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    pub death_date: String,
    pub case_status: String,
    pub region: String,
    pub city: String,
    pub age: String,
}

/// Typed row.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// `None` when the source cell was blank or unparsable.
    pub death_date: Option<NaiveDate>,
    pub case_status: String,
    pub region: String,
    pub city: String,
    /// Free-form age text, e.g. "67 AÑOS".
    pub raw_age: String,
    /// Set by `analysis::age_groups::bucketize_age`.
    pub age_group: Option<AgeGroup>,
}

impl Record {
    /// Builds a typed row from raw text plus an already-parsed date.
    ///
    /// Text fields are trimmed; a blank case status becomes
    /// `MISSING_STATUS_LABEL`.
    pub fn from_raw(raw: RawRecord, death_date: Option<NaiveDate>) -> Self {
        let status = raw.case_status.trim();
        let case_status = if status.is_empty() {
            MISSING_STATUS_LABEL.to_string()
        } else {
            status.to_string()
        };

        Record {
            death_date,
            case_status,
            region: raw.region.trim().to_string(),
            city: raw.city.trim().to_string(),
            raw_age: raw.age.trim().to_string(),
            age_group: None,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        self.case_status == CONFIRMED_STATUS
    }
}

/// Ordered collection of rows sharing one schema. Never sorted implicitly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Dataset { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// Age buckets
// ---------------------------------------------------------------------------

/// A five-year age bucket. `high` is inclusive; `None` means open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AgeGroup {
    pub label: &'static str,
    pub low: u32,
    pub high: Option<u32>,
}

impl AgeGroup {
    const fn bounded(label: &'static str, low: u32, high: u32) -> Self {
        AgeGroup { label, low, high: Some(high) }
    }

    pub fn contains(&self, age: u32) -> bool {
        age >= self.low && self.high.is_none_or(|high| age <= high)
    }
}

/// Histogram buckets in display order. Upper bounds are 4, 9, 14, ... 89,
/// so a boundary value belongs to the lower bucket; 90 and up is `90+`.
pub const AGE_GROUPS: [AgeGroup; 19] = [
    AgeGroup::bounded("0-4", 0, 4),
    AgeGroup::bounded("5-9", 5, 9),
    AgeGroup::bounded("10-14", 10, 14),
    AgeGroup::bounded("15-19", 15, 19),
    AgeGroup::bounded("20-24", 20, 24),
    AgeGroup::bounded("25-29", 25, 29),
    AgeGroup::bounded("30-34", 30, 34),
    AgeGroup::bounded("35-39", 35, 39),
    AgeGroup::bounded("40-44", 40, 44),
    AgeGroup::bounded("45-49", 45, 49),
    AgeGroup::bounded("50-54", 50, 54),
    AgeGroup::bounded("55-59", 55, 59),
    AgeGroup::bounded("60-64", 60, 64),
    AgeGroup::bounded("65-69", 65, 69),
    AgeGroup::bounded("70-74", 70, 74),
    AgeGroup::bounded("75-79", 75, 79),
    AgeGroup::bounded("80-84", 80, 84),
    AgeGroup::bounded("85-89", 85, 89),
    AgeGroup { label: "90+", low: 90, high: None },
];

// ---------------------------------------------------------------------------
// Derived aggregate tables
// ---------------------------------------------------------------------------

/// One group of a `count_by` result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub key: String,
    pub count: usize,
}

impl GroupCount {
    pub fn new(key: impl Into<String>, count: usize) -> Self {
        GroupCount { key: key.into(), count }
    }
}

/// Confirmed deaths in one calendar month. `year` doubles as the chart
/// series so 2020 and 2021 plot as separate lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

impl MonthlyCount {
    /// First day of the month, used as the x value of the trend line.
    pub fn period_start(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgeGroupCount {
    pub group: &'static str,
    pub count: usize,
}

/// The five chart-ready tables, built once per run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub region_deaths: Vec<GroupCount>,
    pub top_cities: Vec<GroupCount>,
    pub case_status: Vec<GroupCount>,
    pub monthly_deaths: Vec<MonthlyCount>,
    pub age_groups: Vec<AgeGroupCount>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
