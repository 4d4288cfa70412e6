//! Portfolio construction and hedging.

use std::collections::BTreeMap;

/// Sums values per bucket (region, segment, ...). Input order does not matter.
pub fn exposure_by_bucket<'a, I>(values_by_bucket: I) -> BTreeMap<String, f64>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut agg = BTreeMap::new();
    for (bucket, value) in values_by_bucket {
        *agg.entry(bucket.to_string()).or_insert(0.0) += value;
    }
    agg
}

/// `Σ wᵢ·yᵢ`. The weights are not required to sum to one.
pub fn weighted_yield(weights_and_yields: &[(f64, f64)]) -> f64 {
    weights_and_yields.iter().map(|(w, y)| w * y).sum()
}

/// Inverse-variance weights normalized to sum to one.
///
/// A bucket with non-positive variance gets weight zero. When every bucket is
/// zero-weighted the result is all zeros rather than NaN.
pub fn simple_risk_parity_weights(variances: &BTreeMap<String, f64>) -> BTreeMap<String, f64> {
    let inverse: BTreeMap<&String, f64> = variances
        .iter()
        .map(|(k, v)| (k, if *v <= 0.0 { 0.0 } else { 1.0 / v }))
        .collect();
    let total: f64 = inverse.values().sum();
    inverse
        .into_iter()
        .map(|(k, inv)| {
            let weight = if total == 0.0 { 0.0 } else { inv / total };
            (k.clone(), weight)
        })
        .collect()
}
