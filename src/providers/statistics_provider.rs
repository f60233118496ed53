use chrono::NaiveDate;

use crate::types::internal::repair::CompletionStats;

/// Average repair duration over (start, completion) pairs
///
/// Pairs whose completion precedes the start are ignored. With nothing left
/// the average is 0. The average is rounded to one decimal place.
pub fn average_completion(spans: &[(NaiveDate, NaiveDate)]) -> CompletionStats {
    let durations: Vec<i64> = spans
        .iter()
        .map(|(start, completed)| (*completed - *start).num_days())
        .filter(|days| *days >= 0)
        .collect();

    let total_days: i64 = durations.iter().sum();
    let completed = durations.len() as u64;
    let average_days = if completed == 0 {
        0.0
    } else {
        let mean = total_days as f64 / completed as f64;
        (mean * 10.0).round() / 10.0
    };

    CompletionStats {
        average_days,
        completed,
        total_days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::utils::date;

    #[test]
    fn test_empty_input_averages_to_zero() {
        let stats = average_completion(&[]);

        assert_eq!(stats.average_days, 0.0);
        assert_eq!(stats.completed, 0);
        assert_eq!(stats.total_days, 0);
    }

    #[test]
    fn test_negative_durations_are_excluded() {
        let stats = average_completion(&[
            (date(2024, 1, 1), date(2024, 1, 3)),
            (date(2024, 1, 10), date(2024, 1, 5)),
            (date(2024, 2, 1), date(2024, 2, 3)),
        ]);

        assert_eq!(stats.completed, 2);
        assert_eq!(stats.total_days, 4);
        assert_eq!(stats.average_days, 2.0);
    }

    #[test]
    fn test_average_is_rounded_to_one_decimal() {
        let stats = average_completion(&[
            (date(2024, 1, 1), date(2024, 1, 2)),
            (date(2024, 1, 1), date(2024, 1, 2)),
            (date(2024, 1, 1), date(2024, 1, 3)),
        ]);

        assert_eq!(stats.total_days, 4);
        assert_eq!(stats.average_days, 1.3);
    }

    #[test]
    fn test_same_day_completion_counts_as_zero_days() {
        let stats = average_completion(&[(date(2024, 5, 5), date(2024, 5, 5))]);

        assert_eq!(stats.completed, 1);
        assert_eq!(stats.average_days, 0.0);
    }
}
