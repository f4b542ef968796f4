use crate::models::{FeatureVector, FEATURE_COUNT};

/// Min-max scales every feature column to [0, 1] across the given rows
///
/// A constant column (max == min) scales to 0 for every row instead of
/// dividing by zero. The input is left untouched.
pub fn normalize(rows: &[FeatureVector]) -> Vec<FeatureVector> {
    if rows.is_empty() {
        return Vec::new();
    }

    let mut mins = [f64::INFINITY; FEATURE_COUNT];
    let mut maxs = [f64::NEG_INFINITY; FEATURE_COUNT];

    for row in rows {
        for (col, value) in row.iter().enumerate() {
            mins[col] = mins[col].min(*value);
            maxs[col] = maxs[col].max(*value);
        }
    }

    rows.iter()
        .map(|row| {
            let mut scaled = [0.0; FEATURE_COUNT];
            for col in 0..FEATURE_COUNT {
                let range = maxs[col] - mins[col];
                if range > 0.0 {
                    scaled[col] = (row[col] - mins[col]) / range;
                }
            }
            scaled
        })
        .collect()
}
