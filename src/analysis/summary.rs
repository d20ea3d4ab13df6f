/// Builds the five dashboard tables from a parsed dataset.
///
/// Years, top-N size and age buckets are the fixed constants from `config`
/// and `model`; nothing here is data-dependent apart from the rows.

use tracing::{debug, info};

use crate::analysis::age_groups::{age_group_counts, bucketize_age};
use crate::analysis::filters::filter_by_year;
use crate::analysis::groupings::{case_status_counts, count_by, monthly_counts, top_n, GroupKey};
use crate::config::{COMPARISON_YEARS, HISTOGRAM_YEAR, MAP_YEAR, TOP_CITY_COUNT};
use crate::model::{AGE_GROUPS, CONFIRMED_STATUS, DashboardData, Dataset};

pub fn build_dashboard_data(dataset: &Dataset) -> DashboardData {
    let map_year = filter_by_year(dataset, MAP_YEAR);
    let histogram_year = bucketize_age(&filter_by_year(dataset, HISTOGRAM_YEAR), &AGE_GROUPS);

    let region_deaths = count_by(&map_year, GroupKey::Region, Some(CONFIRMED_STATUS));
    let city_deaths = count_by(&map_year, GroupKey::City, Some(CONFIRMED_STATUS));
    let top_cities = top_n(&city_deaths, TOP_CITY_COUNT);
    let case_status = case_status_counts(&map_year);
    let monthly_deaths = monthly_counts(dataset, Some(CONFIRMED_STATUS), &COMPARISON_YEARS);
    let age_groups = age_group_counts(&histogram_year, Some(CONFIRMED_STATUS), &AGE_GROUPS);

    let without_age = histogram_year
        .iter()
        .filter(|r| r.is_confirmed() && r.age_group.is_none())
        .count();
    if without_age > 0 {
        debug!(year = HISTOGRAM_YEAR, rows = without_age, "confirmed rows without a usable age");
    }

    info!(
        rows = dataset.len(),
        map_year_rows = map_year.len(),
        regions = region_deaths.len(),
        months = monthly_deaths.len(),
        "aggregates built"
    );

    DashboardData {
        region_deaths,
        top_cities,
        case_status,
        monthly_deaths,
        age_groups,
    }
}
