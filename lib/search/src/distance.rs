//! Normalized-Euclidean distance between a query vector and dataset rows.
//!
//! Every feature is rescaled into [0, 1] with the dataset-wide min/max
//! before squared differences are accumulated, so no single feature's unit
//! dominates the distance. Lower is a better match.

use crate::query::SimilarityQuery;
use ahash::AHashMap;
use cookielab_core::{FeatureRange, MatchScore, Record, FEATURE_KEYS};

/// Score one row against a validated query.
///
/// If any feature key has no normalization params, or the row's value does
/// not coerce to a finite number, the whole row scores `Unscored` - an early
/// exit, never a partial distance. A zero-range feature contributes nothing.
pub fn score_record(
    record: &Record,
    query: &SimilarityQuery,
    params: &AHashMap<String, FeatureRange>,
) -> MatchScore {
    let mut sum_of_squares = 0.0f64;

    for key in FEATURE_KEYS {
        let Some(range) = params.get(key) else {
            return MatchScore::Unscored;
        };
        let Some(row_value) = record.numeric(key) else {
            return MatchScore::Unscored;
        };
        // Validation guarantees the query value exists.
        let Some(query_value) = query.value(key) else {
            return MatchScore::Unscored;
        };

        if range.span() == 0.0 {
            continue;
        }
        let diff = range.normalize(row_value) - range.normalize(query_value);
        sum_of_squares += diff * diff;
    }

    MatchScore::Scored(sum_of_squares.sqrt())
}

/// Score every row once, producing the derived row set for similarity mode.
/// The canonical records are copied, never edited.
pub fn score_all(
    records: &[Record],
    query: &SimilarityQuery,
    params: &AHashMap<String, FeatureRange>,
) -> Vec<Record> {
    records
        .iter()
        .map(|record| record.clone().with_score(score_record(record, query, params)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cookielab_core::{compute_params, CellValue, FieldMap};

    fn record(id: u64, values: [f64; 5]) -> Record {
        let mut fields = FieldMap::default();
        for (key, v) in FEATURE_KEYS.iter().zip(values) {
            fields.insert(key.to_string(), CellValue::Number(v));
        }
        Record::new(id, fields)
    }

    fn query_for(values: [f64; 5]) -> SimilarityQuery {
        let inputs = FEATURE_KEYS
            .iter()
            .zip(values)
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SimilarityQuery::from_inputs(&inputs).unwrap()
    }

    #[test]
    fn test_identical_row_and_query_score_zero() {
        let records = vec![record(0, [1.0, 2.0, 3.0, 4.0, 5.0]), record(1, [9.0, 8.0, 7.0, 6.0, 5.0])];
        let params = compute_params(&records, &FEATURE_KEYS);
        let query = query_for([1.0, 2.0, 3.0, 4.0, 5.0]);

        match score_record(&records[0], &query, &params) {
            MatchScore::Scored(d) => assert!(d.abs() < 1e-12),
            MatchScore::Unscored => panic!("expected a real score"),
        }
    }

    #[test]
    fn test_scores_are_non_negative() {
        let records = vec![record(0, [1.0, 5.0, 2.0, 0.1, 7.0]), record(1, [3.0, 1.0, 8.0, 0.9, 6.0])];
        let params = compute_params(&records, &FEATURE_KEYS);
        let query = query_for([2.0, 4.0, 4.0, 0.5, 6.5]);

        for r in &records {
            assert!(score_record(r, &query, &params).as_f64() >= 0.0);
        }
    }

    #[test]
    fn test_unparsable_row_value_degrades_to_sentinel() {
        let records = vec![record(0, [1.0, 2.0, 3.0, 4.0, 5.0]), record(1, [2.0, 3.0, 4.0, 5.0, 6.0])];
        let params = compute_params(&records, &FEATURE_KEYS);
        let query = query_for([1.0, 2.0, 3.0, 4.0, 5.0]);

        let mut broken = records[0].clone();
        broken
            .fields
            .insert("WI".to_string(), CellValue::Text("n/a".to_string()));
        assert!(score_record(&broken, &query, &params).is_unscored());
    }

    #[test]
    fn test_missing_params_fail_closed() {
        let records = vec![record(0, [1.0, 2.0, 3.0, 4.0, 5.0])];
        let query = query_for([1.0, 2.0, 3.0, 4.0, 5.0]);
        // No params at all: every key is missing, every row is unscored.
        let empty = AHashMap::new();
        assert!(score_record(&records[0], &query, &empty).is_unscored());
    }

    #[test]
    fn test_zero_range_feature_contributes_zero() {
        // Sensory score is constant across the dataset.
        let records = vec![record(0, [1.0, 2.0, 3.0, 4.0, 5.0]), record(1, [9.0, 8.0, 7.0, 6.0, 5.0])];
        let params = compute_params(&records, &FEATURE_KEYS);
        // Query matches row 0 on the four ranged features but differs wildly
        // on the degenerate one; the distance must still be zero.
        let query = query_for([1.0, 2.0, 3.0, 4.0, 100.0]);

        match score_record(&records[0], &query, &params) {
            MatchScore::Scored(d) => assert!(d.abs() < 1e-12),
            MatchScore::Unscored => panic!("expected a real score"),
        }
    }

    #[test]
    fn test_spread_ratio_ranking_example() {
        // Three rows with Spread ratio {1, 5, 9}; the other features all sit
        // at the dataset minimum so a query at those minimums contributes 0.
        let records = vec![
            record(0, [1.0, 2.0, 3.0, 4.0, 5.0]),
            record(1, [5.0, 2.0, 3.0, 4.0, 5.0]),
            record(2, [9.0, 2.0, 3.0, 4.0, 5.0]),
        ];
        let params = compute_params(&records, &FEATURE_KEYS);
        let query = query_for([5.0, 2.0, 3.0, 4.0, 5.0]);

        let mut scored = score_all(&records, &query, &params);
        scored.sort_by(|a, b| a.match_score.as_f64().total_cmp(&b.match_score.as_f64()));
        assert_eq!(scored[0].id, 1, "the exact-value row must rank first");
    }

    #[test]
    fn test_score_is_invariant_to_feature_order() {
        let records = vec![
            record(0, [1.0, 5.0, 2.0, 0.1, 7.0]),
            record(1, [3.0, 1.0, 8.0, 0.9, 6.0]),
            record(2, [2.0, 3.0, 4.0, 0.5, 6.5]),
        ];
        let params = compute_params(&records, &FEATURE_KEYS);
        let query = query_for([2.0, 4.0, 4.0, 0.5, 6.5]);

        // Accumulate the same squared differences in reversed key order;
        // the distance must not depend on summation order.
        let mut reversed = FEATURE_KEYS;
        reversed.reverse();

        for r in &records {
            let mut sum_of_squares = 0.0f64;
            for key in reversed {
                let range = params.get(key).unwrap();
                if range.span() == 0.0 {
                    continue;
                }
                let diff = range.normalize(r.numeric(key).unwrap())
                    - range.normalize(query.value(key).unwrap());
                sum_of_squares += diff * diff;
            }

            match score_record(r, &query, &params) {
                MatchScore::Scored(d) => assert!((d - sum_of_squares.sqrt()).abs() < 1e-12),
                MatchScore::Unscored => panic!("expected a real score"),
            }
        }
    }

    #[test]
    fn test_score_all_copies_leave_originals_untouched() {
        let records = vec![record(0, [1.0, 2.0, 3.0, 4.0, 5.0]), record(1, [2.0, 3.0, 4.0, 5.0, 6.0])];
        let params = compute_params(&records, &FEATURE_KEYS);
        let query = query_for([1.0, 2.0, 3.0, 4.0, 5.0]);

        let scored = score_all(&records, &query, &params);
        assert!(scored.iter().all(|r| !r.match_score.is_unscored()));
        assert!(records.iter().all(|r| r.match_score.is_unscored()));
    }
}
