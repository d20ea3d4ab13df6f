/// Group-and-count helpers behind the dashboard tables.
///
/// `count_by` is the one grouping primitive: filter on case status, group on
/// a single column, count. Groups come back in ascending key order, and
/// `top_n` / `case_status_counts` re-rank with a stable sort so equal counts
/// keep that order. `monthly_counts` groups on (year, month) and only emits
/// months that actually had deaths.

use std::collections::BTreeMap;

use chrono::Datelike;

use crate::model::{Dataset, GroupCount, MonthlyCount, Record};

/// Column to group on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    Region,
    City,
    CaseStatus,
}

impl GroupKey {
    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            GroupKey::Region => &record.region,
            GroupKey::City => &record.city,
            GroupKey::CaseStatus => &record.case_status,
        }
    }
}

fn matches_status(record: &Record, status_filter: Option<&str>) -> bool {
    status_filter.is_none_or(|status| record.case_status == status)
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// Counts rows per `group_key` value, keeping only rows whose case status
/// equals `status_filter` when one is given.
///
/// Rows with a blank group value are not counted.
pub fn count_by(dataset: &Dataset, group_key: GroupKey, status_filter: Option<&str>) -> Vec<GroupCount> {
    let mut groups: BTreeMap<&str, usize> = BTreeMap::new();

    for record in dataset.iter().filter(|r| matches_status(r, status_filter)) {
        let key = group_key.value(record);
        if key.is_empty() {
            continue;
        }
        *groups.entry(key).or_insert(0) += 1;
    }

    groups
        .into_iter()
        .map(|(key, count)| GroupCount::new(key, count))
        .collect()
}

/// The `n` largest groups, descending by count. Ties keep their input order.
pub fn top_n(counts: &[GroupCount], n: usize) -> Vec<GroupCount> {
    let mut ranked = counts.to_vec();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

/// Every case-status value with its row count, most frequent first.
pub fn case_status_counts(dataset: &Dataset) -> Vec<GroupCount> {
    let counts = count_by(dataset, GroupKey::CaseStatus, None);
    top_n(&counts, counts.len())
}

/// Rows per calendar month for each of `years`, in the order the years are
/// given and then by month. Months without a matching row are omitted.
pub fn monthly_counts(dataset: &Dataset, status_filter: Option<&str>, years: &[i32]) -> Vec<MonthlyCount> {
    let mut out = Vec::new();

    for &year in years {
        let mut months: BTreeMap<u32, usize> = BTreeMap::new();
        for record in dataset.iter().filter(|r| matches_status(r, status_filter)) {
            let Some(date) = record.death_date else { continue };
            if date.year() == year {
                *months.entry(date.month()).or_insert(0) += 1;
            }
        }

        out.extend(
            months
                .into_iter()
                .map(|(month, count)| MonthlyCount { year, month, count }),
        );
    }

    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::filters::{filter_by_year, parse_dates};
    use crate::ingest::fixtures::*;
    use crate::ingest::records::read_records;
    use crate::model::{CONFIRMED_STATUS, MISSING_STATUS_LABEL, RawRecord};

    fn region_dataset() -> Dataset {
        parse_dates(read_records(fixture_region_csv().as_bytes(), b',').unwrap())
    }

    fn row(date: &str, status: &str, region: &str, city: &str) -> RawRecord {
        RawRecord {
            death_date: date.to_string(),
            case_status: status.to_string(),
            region: region.to_string(),
            city: city.to_string(),
            age: String::new(),
        }
    }

    // --- count_by ------------------------------------------------------------

    #[test]
    fn test_count_by_region_confirmed_2021() {
        let y2021 = filter_by_year(&region_dataset(), 2021);
        let counts = count_by(&y2021, GroupKey::Region, Some(CONFIRMED_STATUS));

        assert_eq!(counts, vec![GroupCount::new("A", 4), GroupCount::new("B", 2)]);
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), 6);
    }

    #[test]
    fn test_count_by_without_filter_counts_every_status() {
        let y2021 = filter_by_year(&region_dataset(), 2021);
        let counts = count_by(&y2021, GroupKey::Region, None);
        assert_eq!(counts, vec![GroupCount::new("A", 5), GroupCount::new("B", 2)]);
    }

    #[test]
    fn test_count_by_orders_groups_by_key() {
        let dataset = parse_dates(vec![
            row("2021-01-01", "CONFIRMADO", "META", "X"),
            row("2021-01-01", "CONFIRMADO", "ANTIOQUIA", "Y"),
            row("2021-01-01", "CONFIRMADO", "CALDAS", "Z"),
        ]);
        let keys: Vec<String> = count_by(&dataset, GroupKey::Region, None)
            .into_iter()
            .map(|c| c.key)
            .collect();
        assert_eq!(keys, vec!["ANTIOQUIA", "CALDAS", "META"]);
    }

    #[test]
    fn test_count_by_skips_blank_keys() {
        let dataset = parse_dates(vec![
            row("2021-01-01", "CONFIRMADO", "", "CALI"),
            row("2021-01-01", "CONFIRMADO", "VALLE DEL CAUCA", ""),
        ]);
        assert_eq!(
            count_by(&dataset, GroupKey::Region, None),
            vec![GroupCount::new("VALLE DEL CAUCA", 1)]
        );
        assert_eq!(
            count_by(&dataset, GroupKey::City, None),
            vec![GroupCount::new("CALI", 1)]
        );
    }

    // --- top_n ---------------------------------------------------------------

    #[test]
    fn test_top_n_descending_and_bounded() {
        let counts = vec![
            GroupCount::new("BARRANQUILLA", 12),
            GroupCount::new("BOGOTÁ", 40),
            GroupCount::new("CALI", 25),
            GroupCount::new("CARTAGENA", 3),
            GroupCount::new("CÚCUTA", 9),
            GroupCount::new("MEDELLÍN", 31),
            GroupCount::new("PASTO", 1),
        ];
        let top = top_n(&counts, 5);

        assert_eq!(top.len(), 5);
        let keys: Vec<&str> = top.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["BOGOTÁ", "MEDELLÍN", "CALI", "BARRANQUILLA", "CÚCUTA"]);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_top_n_ties_keep_grouping_order() {
        let counts = vec![
            GroupCount::new("A", 2),
            GroupCount::new("B", 5),
            GroupCount::new("C", 2),
            GroupCount::new("D", 2),
        ];
        let keys: Vec<String> = top_n(&counts, 3).into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_top_n_with_fewer_groups_than_n() {
        let counts = vec![GroupCount::new("A", 1)];
        assert_eq!(top_n(&counts, 5), counts);
        assert!(top_n(&[], 5).is_empty());
    }

    // --- case_status_counts --------------------------------------------------

    #[test]
    fn test_case_status_counts_cover_whole_year_slice() {
        let mut rows = read_records(fixture_region_csv().as_bytes(), b',').unwrap();
        rows.push(row("2021-05-05", "", "A", "A1"));
        rows.push(row("2021-05-06", "DESCARTADO", "B", "B1"));
        let y2021 = filter_by_year(&parse_dates(rows), 2021);

        let counts = case_status_counts(&y2021);
        assert_eq!(
            counts,
            vec![
                GroupCount::new("CONFIRMADO", 6),
                GroupCount::new("DESCARTADO", 1),
                GroupCount::new(MISSING_STATUS_LABEL, 1),
                GroupCount::new("SOSPECHOSO", 1),
            ]
        );
        assert_eq!(counts.iter().map(|c| c.count).sum::<usize>(), y2021.len());
    }

    // --- monthly_counts ------------------------------------------------------

    #[test]
    fn test_monthly_counts_two_years_in_series_order() {
        let dataset = region_dataset();
        let monthly = monthly_counts(&dataset, Some(CONFIRMED_STATUS), &[2020, 2021]);

        assert_eq!(
            monthly,
            vec![
                MonthlyCount { year: 2020, month: 11, count: 1 },
                MonthlyCount { year: 2021, month: 1, count: 2 },
                MonthlyCount { year: 2021, month: 2, count: 2 },
                MonthlyCount { year: 2021, month: 3, count: 1 },
                MonthlyCount { year: 2021, month: 6, count: 1 },
            ]
        );
    }

    #[test]
    fn test_monthly_counts_omit_empty_months() {
        let dataset = region_dataset();
        let monthly = monthly_counts(&dataset, Some(CONFIRMED_STATUS), &[2020, 2021]);

        assert!(monthly.iter().all(|m| m.count > 0));
        // April 2021 only has a suspected death
        assert!(!monthly.iter().any(|m| m.year == 2021 && m.month == 4));
    }

    #[test]
    fn test_monthly_counts_ignore_other_years() {
        let dataset = region_dataset();
        assert!(monthly_counts(&dataset, Some(CONFIRMED_STATUS), &[2019]).is_empty());
    }
}
