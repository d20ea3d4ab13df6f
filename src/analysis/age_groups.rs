/// Age extraction and five-year bucketing for the age histogram.
///
/// The age column is free text ("67 AÑOS", "3 MESES", "90"). The numeric age
/// is the first run of ASCII digits; text without digits has no age and is
/// left out of the histogram. Units are not interpreted, so "3 MESES" is
/// bucketed as 3.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{AgeGroup, AgeGroupCount, Dataset, Record};

// ASCII only. `\d` would also match other scripts' decimal digits, which
// `str::parse::<u32>` rejects; those cells are treated as having no age.
static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"));

/// First contiguous digit run of `raw`, as a number of years.
///
/// A run too long for `u32` saturates, which still lands in the open-ended
/// top bucket.
pub fn extract_age(raw: &str) -> Option<u32> {
    let digits = DIGIT_RUN.find(raw)?.as_str();
    Some(digits.parse().unwrap_or(u32::MAX))
}

/// The single bucket containing `age`, if any.
pub fn age_group_for(age: u32, buckets: &[AgeGroup]) -> Option<AgeGroup> {
    buckets.iter().copied().find(|g| g.contains(age))
}

/// Returns a copy of `dataset` with `age_group` set from each row's raw age.
pub fn bucketize_age(dataset: &Dataset, buckets: &[AgeGroup]) -> Dataset {
    Dataset::new(
        dataset
            .iter()
            .map(|r| Record {
                age_group: extract_age(&r.raw_age).and_then(|age| age_group_for(age, buckets)),
                ..r.clone()
            })
            .collect(),
    )
}

/// Histogram over `buckets` in bucket order, zero counts included.
///
/// Expects a dataset already passed through `bucketize_age`.
pub fn age_group_counts(
    dataset: &Dataset,
    status_filter: Option<&str>,
    buckets: &[AgeGroup],
) -> Vec<AgeGroupCount> {
    let mut counts = vec![0usize; buckets.len()];

    for record in dataset.iter() {
        if status_filter.is_some_and(|status| record.case_status != status) {
            continue;
        }
        let Some(group) = record.age_group else { continue };
        if let Some(idx) = buckets.iter().position(|b| *b == group) {
            counts[idx] += 1;
        }
    }

    buckets
        .iter()
        .zip(counts)
        .map(|(bucket, count)| AgeGroupCount { group: bucket.label, count })
        .collect()
}
