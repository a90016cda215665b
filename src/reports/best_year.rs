use std::collections::BTreeMap;

use crate::data::TimeSeriesRecord;
use crate::reports::types::BestYear;

/// For each series, the year whose summed `value` is largest.
///
/// Values are summed per `(series_id, year)`; NaN cells are not skipped, so
/// a single NaN makes that year's sum NaN. Groups are then walked in
/// ascending `(series_id, year)` order and only a strictly larger sum
/// replaces the current best, which means:
///
/// - ties go to the earliest year;
/// - a NaN sum never beats a finite one;
/// - a series whose sums are all NaN reports its earliest year.
///
/// Output is ordered by `series_id`.
pub fn best_years(timeseries: &[TimeSeriesRecord]) -> Vec<BestYear> {
    let mut sums: BTreeMap<(&str, i32), f64> = BTreeMap::new();
    for row in timeseries {
        *sums.entry((row.series_id.as_str(), row.year)).or_insert(0.0) += row.value;
    }

    let mut best: Vec<BestYear> = Vec::new();
    for ((series_id, year), value) in sums {
        match best.last_mut() {
            Some(current) if current.series_id == series_id => {
                if beats(value, current.value) {
                    current.year = year;
                    current.value = value;
                }
            }
            _ => best.push(BestYear {
                series_id: series_id.to_string(),
                year,
                value,
            }),
        }
    }

    best
}

fn beats(candidate: f64, current: f64) -> bool {
    candidate > current || (current.is_nan() && !candidate.is_nan())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::ts;

    #[test]
    fn test_tie_goes_to_earliest_year() {
        let rows = vec![
            ts("A", 2021, "Q01", 60.0),
            ts("A", 2019, "Q01", 50.0),
            ts("A", 2020, "Q01", 40.0),
            ts("A", 2021, "Q02", 40.0),
            ts("A", 2020, "Q02", 60.0),
        ];

        let best = best_years(&rows);
        assert_eq!(
            best,
            vec![BestYear {
                series_id: "A".into(),
                year: 2020,
                value: 100.0
            }]
        );
    }

    #[test]
    fn test_clear_maximum() {
        let rows = vec![ts("B", 2020, "Q01", 50.0), ts("B", 2021, "Q01", 75.0)];
        let best = best_years(&rows);

        assert_eq!(best.len(), 1);
        assert_eq!(best[0].series_id, "B");
        assert_eq!(best[0].year, 2021);
        assert_eq!(best[0].value, 75.0);
    }

    #[test]
    fn test_one_row_per_series_sorted() {
        let rows = vec![
            ts("Z", 2000, "Q01", 1.0),
            ts("A", 2000, "Q01", 1.0),
            ts("M", 2001, "Q01", 3.0),
            ts("M", 2000, "Q01", 2.0),
        ];
        let ids: Vec<_> = best_years(&rows)
            .into_iter()
            .map(|b| (b.series_id, b.year))
            .collect();
        assert_eq!(
            ids,
            vec![("A".to_string(), 2000), ("M".to_string(), 2001), ("Z".to_string(), 2000)]
        );
    }

    #[test]
    fn test_nan_propagates_into_sum_but_never_wins() {
        let rows = vec![
            ts("C", 2018, "Q01", 1000.0),
            ts("C", 2018, "Q02", f64::NAN),
            ts("C", 2019, "Q01", 5.0),
        ];
        let best = best_years(&rows);
        assert_eq!(best[0].year, 2019);
        assert_eq!(best[0].value, 5.0);
    }

    #[test]
    fn test_all_nan_series_reports_earliest_year() {
        let rows = vec![ts("D", 2011, "Q01", f64::NAN), ts("D", 2010, "Q01", f64::NAN)];
        let best = best_years(&rows);
        assert_eq!(best[0].year, 2010);
        assert!(best[0].value.is_nan());
    }

    #[test]
    fn test_empty_input() {
        assert!(best_years(&[]).is_empty());
    }
}
