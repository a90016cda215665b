use std::collections::HashMap;

use crate::data::{PopulationRecord, TimeSeriesRecord};
use crate::reports::types::JoinedRow;

/// Rows of `series_id`/`period` joined to population on `year == Year`.
///
/// Rows without a population match are dropped. A year present several
/// times in `population` yields one output row per match, in population
/// order.
pub fn filtered_report(
    timeseries: &[TimeSeriesRecord],
    population: &[PopulationRecord],
    series_id: &str,
    period: &str,
) -> Vec<JoinedRow> {
    let mut by_year: HashMap<i32, Vec<i64>> = HashMap::new();
    for row in population {
        by_year.entry(row.year).or_default().push(row.population);
    }

    timeseries
        .iter()
        .filter(|r| r.series_id == series_id && r.period == period)
        .flat_map(|r| {
            by_year
                .get(&r.year)
                .into_iter()
                .flatten()
                .map(move |&population| JoinedRow {
                    series_id: r.series_id.clone(),
                    year: r.year,
                    period: r.period.clone(),
                    value: r.value,
                    population,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::{pop, ts};

    #[test]
    fn test_duplicate_years_fan_out() {
        let series = vec![ts("X", 2015, "Q01", 1.5)];
        let population = vec![pop(2015, 100), pop(2015, 200)];

        let report = filtered_report(&series, &population, "X", "Q01");

        assert_eq!(report.len(), 2);
        assert!(report.iter().all(|r| r.series_id == "X" && r.year == 2015));
        assert_eq!(report[0].population, 100);
        assert_eq!(report[1].population, 200);
    }

    #[test]
    fn test_unmatched_year_is_excluded() {
        let series = vec![ts("X", 2014, "Q01", 1.0), ts("X", 2015, "Q01", 2.0)];
        let population = vec![pop(2015, 100)];

        let report = filtered_report(&series, &population, "X", "Q01");

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].year, 2015);
        assert_eq!(report[0].value, 2.0);
    }

    #[test]
    fn test_filter_on_series_and_period() {
        let series = vec![
            ts("X", 2015, "Q01", 1.0),
            ts("X", 2015, "Q02", 2.0),
            ts("Y", 2015, "Q01", 3.0),
        ];
        let population = vec![pop(2015, 100)];

        let report = filtered_report(&series, &population, "X", "Q01");

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].period, "Q01");
        assert_eq!(report[0].value, 1.0);
    }

    #[test]
    fn test_preserves_time_series_order() {
        let series = vec![ts("X", 2019, "Q01", 1.0), ts("X", 2013, "Q01", 2.0)];
        let population = vec![pop(2013, 1), pop(2019, 2)];

        let years: Vec<_> = filtered_report(&series, &population, "X", "Q01")
            .iter()
            .map(|r| r.year)
            .collect();
        assert_eq!(years, vec![2019, 2013]);
    }
}
