/// Row normalization and year slicing.
///
/// `parse_dates` turns raw rows into the typed `Dataset`, marking unparsable
/// death dates as missing. `filter_by_year` then slices by calendar year;
/// rows without a valid date never survive a year filter, so they cannot leak
/// into any year-keyed aggregate.

use chrono::Datelike;
use tracing::debug;

use crate::ingest::dates::parse_death_date;
use crate::model::{Dataset, RawRecord, Record};

/// Parses the death-date column of every row.
pub fn parse_dates(rows: Vec<RawRecord>) -> Dataset {
    let mut invalid = 0usize;

    let records: Vec<Record> = rows
        .into_iter()
        .map(|raw| {
            let date = parse_death_date(&raw.death_date);
            if date.is_none() {
                invalid += 1;
            }
            Record::from_raw(raw, date)
        })
        .collect();

    if invalid > 0 {
        debug!(invalid, total = records.len(), "rows with unparsable death date");
    }

    Dataset::new(records)
}

/// Keeps rows whose death date falls in `year`.
pub fn filter_by_year(dataset: &Dataset, year: i32) -> Dataset {
    Dataset::new(
        dataset
            .iter()
            .filter(|r| r.death_date.is_some_and(|d| d.year() == year))
            .cloned()
            .collect(),
    )
}
