//! Weighted Shannon entropy of a candidate multiset
//!
//! The entropy of a cell summarizes how undetermined its candidate set is
//! given the tile frequencies observed in the sample. Fewer or more skewed
//! candidates yield lower entropy; a resolved cell scores zero.

/// Shannon entropy of a set of occurrence weights
///
/// For weights `w_i` summing to `W` the value is
/// `ln(W) - (sum of w_i * ln(w_i)) / W`. Zero weights contribute nothing.
/// A singleton set scores zero exactly; an empty set is defined as zero
/// (such a cell is contradictory and is never selected for collapse).
pub fn shannon_entropy<I>(weights: I) -> f64
where
    I: IntoIterator<Item = u32>,
{
    let mut total = 0.0_f64;
    let mut weighted_log = 0.0_f64;
    for weight in weights {
        if weight == 0 {
            continue;
        }
        let w = f64::from(weight);
        total += w;
        weighted_log += w * w.ln();
    }
    if total <= 0.0 {
        return 0.0;
    }
    total.ln() - weighted_log / total
}
