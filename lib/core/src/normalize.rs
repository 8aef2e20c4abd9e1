//! Per-feature normalization parameters.
//!
//! Min/max are computed once over the canonical row set and reused for every
//! similarity query. A feature with no finite values in the whole dataset is
//! omitted from the result; callers must treat the missing key as "cannot
//! normalize this feature" and fail closed.

use crate::record::Record;
use ahash::AHashMap;
use serde::Serialize;

/// Dataset-wide min/max for one feature. Invariant: `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureRange {
    pub min: f64,
    pub max: f64,
}

impl FeatureRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Rescale a value into [0, 1]. A zero-range feature maps everything to
    /// 0 so it contributes nothing to a distance (degenerate-range rule,
    /// not a division by zero).
    pub fn normalize(&self, value: f64) -> f64 {
        let span = self.span();
        if span == 0.0 {
            0.0
        } else {
            (value - self.min) / span
        }
    }
}

/// Compute min/max for each feature key over rows whose value coerces to a
/// finite number. Pure function of its inputs.
pub fn compute_params(records: &[Record], feature_keys: &[&str]) -> AHashMap<String, FeatureRange> {
    let mut params = AHashMap::new();
    for key in feature_keys {
        let mut range: Option<FeatureRange> = None;
        for record in records {
            if let Some(v) = record.numeric(key) {
                range = Some(match range {
                    Some(r) => FeatureRange {
                        min: r.min.min(v),
                        max: r.max.max(v),
                    },
                    None => FeatureRange { min: v, max: v },
                });
            }
        }
        if let Some(r) = range {
            params.insert(key.to_string(), r);
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::FieldMap;
    use crate::value::CellValue;

    fn record(id: u64, key: &str, value: CellValue) -> Record {
        let mut fields = FieldMap::default();
        fields.insert(key.to_string(), value);
        Record::new(id, fields)
    }

    #[test]
    fn test_min_max_over_finite_values() {
        let records = vec![
            record(0, "WI", CellValue::Number(1.0)),
            record(1, "WI", CellValue::Number(9.0)),
            record(2, "WI", CellValue::Text("n/a".into())),
            record(3, "WI", CellValue::Number(5.0)),
        ];
        let params = compute_params(&records, &["WI"]);
        let range = params.get("WI").unwrap();
        assert_eq!(range.min, 1.0);
        assert_eq!(range.max, 9.0);
    }

    #[test]
    fn test_key_without_values_is_omitted() {
        let records = vec![record(0, "WI", CellValue::Text("x".into()))];
        let params = compute_params(&records, &["WI", "Crack Ratio"]);
        assert!(params.is_empty());
    }

    #[test]
    fn test_normalized_values_stay_in_unit_interval() {
        let range = FeatureRange { min: 2.0, max: 10.0 };
        for v in [2.0, 4.0, 10.0] {
            let n = range.normalize(v);
            assert!((0.0..=1.0).contains(&n), "normalize({}) = {}", v, n);
        }
        assert_eq!(range.normalize(2.0), 0.0);
        assert_eq!(range.normalize(10.0), 1.0);
    }

    #[test]
    fn test_zero_range_contributes_zero() {
        let range = FeatureRange { min: 3.0, max: 3.0 };
        assert_eq!(range.normalize(3.0), 0.0);
        assert_eq!(range.normalize(99.0), 0.0);
    }
}
