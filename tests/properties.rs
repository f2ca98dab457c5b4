// Properties of the aggregation core that must hold for any input table.
use proptest::prelude::*;

use streaming_insights::dataset::{CategoryField, Row};
use streaming_insights::stats::{
    DummyEncoder, FrequencyTable, ShareAggregator, YearlyGenreProfiler, bucket_runtimes,
};

fn row_strategy() -> impl Strategy<Value = Row> {
    (
        prop::collection::vec("[a-f]", 0..4),
        prop::collection::vec("[A-D]{2}", 0..3),
        1990i32..1996,
        -10.0f64..240.0,
    )
        .prop_map(|(genres, countries, year, runtime)| Row::new(genres, countries, year, runtime))
}

fn rows_strategy() -> impl Strategy<Value = Vec<Row>> {
    prop::collection::vec(row_strategy(), 0..40)
}

proptest! {
    #[test]
    fn frequency_total_matches_extracted_occurrences(rows in rows_strategy()) {
        let table = FrequencyTable::from_field(&rows, CategoryField::Genres);
        let extracted: usize = rows.iter().map(|row| row.genres.len()).sum();

        prop_assert_eq!(table.total(), extracted);
    }

    #[test]
    fn frequency_order_is_count_desc_then_first_seen(rows in rows_strategy()) {
        let table = FrequencyTable::from_field(&rows, CategoryField::Genres);
        let flattened: Vec<&str> = rows.iter().flat_map(|row| row.genres.iter()).collect();
        let first_seen = |key: &str| flattened.iter().position(|value| *value == key);

        for pair in table.entries().windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
            if pair[0].count == pair[1].count {
                prop_assert!(first_seen(pair[0].key.as_str()) < first_seen(pair[1].key.as_str()));
            }
        }
    }

    #[test]
    fn shares_sum_to_one_within_rounding(rows in rows_strategy(), min_share in 0.0f64..0.2) {
        let table = FrequencyTable::from_field(&rows, CategoryField::ProductionCountries);
        prop_assume!(table.total() > 0);

        let records = ShareAggregator::new(min_share)
            .aggregate(&table)
            .expect("non-empty table");
        let sum: f64 = records.iter().map(|record| record.value).sum();
        let tolerance = 0.01 * (table.len() + 1) as f64;

        prop_assert!(records.iter().all(|record| record.value >= 0.0));
        prop_assert_eq!(records.last().map(|record| record.category.as_str()), Some("Other"));
        prop_assert!((sum - 1.0).abs() <= tolerance, "sum {} outside tolerance {}", sum, tolerance);
    }

    #[test]
    fn dummy_columns_match_row_count(rows in rows_strategy()) {
        let top = FrequencyTable::from_field(&rows, CategoryField::Genres).top_n(3);

        let table = DummyEncoder::genres(top).encode(&rows);

        prop_assert_eq!(table.row_count(), rows.len());
        for (_, values) in table.columns() {
            prop_assert_eq!(values.len(), rows.len());
            prop_assert!(values.iter().all(|value| *value <= 1));
        }
    }

    #[test]
    fn yearly_profile_has_one_record_per_year(rows in rows_strategy()) {
        let main = FrequencyTable::from_field(&rows, CategoryField::Genres).top_n(3);
        let profiler = YearlyGenreProfiler::unrounded(main.clone()).expect("generated genres are not reserved");

        let records = profiler.profile(&rows);
        let mut years: Vec<i32> = rows.iter().map(|row| row.release_year).collect();
        years.sort_unstable();
        years.dedup();

        prop_assert_eq!(records.len(), years.len());
        for (record, year) in records.iter().zip(&years) {
            prop_assert_eq!(&record.year, &year.to_string());
            prop_assert_eq!(record.shares().len(), main.len());
            let sum: f64 = record.shares().iter().map(|(_, share)| share).sum();
            prop_assert!(sum.abs() < 1e-9 || (sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn aggregations_are_idempotent(rows in rows_strategy()) {
        let top = FrequencyTable::from_field(&rows, CategoryField::Genres).top_n(8);
        let profiler = YearlyGenreProfiler::rounded(top.clone(), 2).expect("generated genres are not reserved");
        let encoder = DummyEncoder::countries(top.clone());
        let table = FrequencyTable::from_field(&rows, CategoryField::Genres);

        prop_assert_eq!(profiler.profile(&rows), profiler.profile(&rows));
        prop_assert_eq!(encoder.encode(&rows), encoder.encode(&rows));
        prop_assert_eq!(bucket_runtimes(&rows), bucket_runtimes(&rows));
        prop_assert_eq!(
            ShareAggregator::genres().aggregate(&table).ok(),
            ShareAggregator::genres().aggregate(&table).ok()
        );
    }
}
