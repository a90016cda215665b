use crate::data::PopulationRecord;
use crate::error::PipelineError;
use crate::reports::types::PopulationSummary;
use crate::reports::utility::{mean, sample_stddev};

/// Mean and sample standard deviation of `Population` for rows whose year
/// lies in `start_year..=end_year`.
///
/// # Errors
///
/// [`PipelineError::EmptyInput`] when no row falls inside the window.
pub fn population_summary(
    population: &[PopulationRecord],
    start_year: i32,
    end_year: i32,
) -> Result<PopulationSummary, PipelineError> {
    let values: Vec<f64> = population
        .iter()
        .filter(|r| (start_year..=end_year).contains(&r.year))
        .map(|r| r.population as f64)
        .collect();

    if values.is_empty() {
        return Err(PipelineError::EmptyInput(format!(
            "no population rows between {start_year} and {end_year}"
        )));
    }

    let avg = mean(&values);
    Ok(PopulationSummary {
        start_year,
        end_year,
        rows: values.len(),
        mean: avg,
        stddev: sample_stddev(&values, avg),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::tests::pop;

    #[test]
    fn test_window_bounds_are_inclusive() {
        let rows = vec![pop(2012, 10), pop(2013, 20), pop(2018, 30), pop(2019, 40)];
        let summary = population_summary(&rows, 2013, 2018).unwrap();

        assert_eq!(summary.rows, 2);
        assert_eq!(summary.mean, 25.0);
        assert!((summary.stddev - 50f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_empty_window_is_error() {
        let rows = vec![pop(2010, 10), pop(2020, 20)];
        assert!(matches!(
            population_summary(&rows, 2013, 2018),
            Err(PipelineError::EmptyInput(_))
        ));
    }

    #[test]
    fn test_single_row_has_nan_stddev() {
        let summary = population_summary(&[pop(2015, 7)], 2013, 2018).unwrap();
        assert_eq!(summary.mean, 7.0);
        assert!(summary.stddev.is_nan());
    }
}
