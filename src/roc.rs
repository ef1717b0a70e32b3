//! ROC curve derivation from a population index.
//!
//! [`roc_curve`] walks the merged population once and produces the
//! true-positive-rate / specificity step curve with synthetic endpoints;
//! [`RocCurve::marker_at`] places the marker for a chosen threshold index,
//! and [`auc`] computes the area under the curve via the Mann-Whitney
//! rank-sum.
//!
//! Axis convention, used consistently everywhere: `tpr` is the y-axis and
//! `specificity` (1 − FPR) the x-axis.

use crate::population::Population;

/// One point of the ROC curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocPoint {
    /// True positive rate (y-axis).
    pub tpr: f64,
    /// Specificity, 1 − FPR (x-axis).
    pub specificity: f64,
    /// The data value associated with this point.
    pub threshold: f64,
}

/// An ROC step curve: parallel `tpr` / `specificity` / `threshold`
/// sequences, one entry per population element plus two synthetic
/// endpoints.
///
/// The first point is always (tpr=1, specificity 0) — "classify everything
/// Positive" — and the last (tpr=0, specificity 1) — "classify nothing Positive".
/// The curve is piecewise-constant between entries (horizontal-then-
/// vertical steps), never linearly interpolated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RocCurve {
    pub tpr: Vec<f64>,
    pub specificity: Vec<f64>,
    pub thresholds: Vec<f64>,
}

impl RocCurve {
    /// Number of curve points (population length + 2).
    pub fn len(&self) -> usize {
        self.tpr.len()
    }

    /// Whether the curve holds no points.
    pub fn is_empty(&self) -> bool {
        self.tpr.is_empty()
    }

    /// Curve point at array position `i`.
    pub fn point(&self, i: usize) -> RocPoint {
        RocPoint {
            tpr: self.tpr[i],
            specificity: self.specificity[i],
            threshold: self.thresholds[i],
        }
    }

    /// Marker point for a threshold index (the count of population entries
    /// strictly below the threshold, per [`Population::threshold_index`]).
    ///
    /// Index 0 maps to the (1, 0) endpoint, an index at or past the
    /// population length to the (0, 1) endpoint, anything else to the
    /// point one step past the index.
    pub fn marker_at(&self, threshold_index: usize) -> RocPoint {
        let n = self.len() - 2;
        let i = if threshold_index == 0 {
            0
        } else if threshold_index >= n {
            n + 1
        } else {
            threshold_index + 1
        };
        self.point(i)
    }
}

/// Derive the ROC curve for `population`.
///
/// Returns `None` when the population has neither Positive nor Negative
/// samples (a pure-Unknown column has no curve). When exactly one of the
/// two classes is empty, that axis contributes 0 throughout and the
/// synthetic endpoints still anchor the curve at (1, 0) and (0, 1).
///
/// # Example
///
/// ```
/// use cutpoint::label::label_column;
/// use cutpoint::population::Population;
/// use cutpoint::roc::roc_curve;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let refs = [-1.0, -1.0, 1.0, 1.0, 1.0];
/// let pop = Population::build(&label_column(&values, Some(&refs)).unwrap());
/// let curve = roc_curve(&pop).unwrap();
/// assert_eq!(curve.len(), 7); // 5 data points + 2 endpoints
/// assert_eq!((curve.tpr[0], curve.specificity[0]), (1.0, 0.0));
/// ```
pub fn roc_curve(population: &Population) -> Option<RocCurve> {
    let total_pos = population.total_positive();
    let total_neg = population.total_negative();
    if total_pos == 0 && total_neg == 0 {
        return None;
    }

    let entries = population.entries();
    let n = entries.len();
    let p = total_pos as f64;
    let ng = total_neg as f64;

    let mut tpr = Vec::with_capacity(n + 2);
    let mut specificity = Vec::with_capacity(n + 2);
    let mut thresholds = Vec::with_capacity(n + 2);

    // Synthetic "threshold below all data" endpoint.
    tpr.push(1.0);
    specificity.push(0.0);
    thresholds.push(entries[0].value);

    for k in 0..n {
        let (pos_before, neg_before, _) = population.prefix_counts(k);
        let t = if total_pos > 0 {
            (p - pos_before as f64) / p
        } else {
            0.0
        };
        let s = if total_neg > 0 {
            1.0 - (ng - neg_before as f64) / ng
        } else {
            0.0
        };
        tpr.push(t);
        specificity.push(s);
        thresholds.push(entries[k].value);
    }

    // Synthetic "threshold above all data" endpoint.
    tpr.push(0.0);
    specificity.push(1.0);
    thresholds.push(entries[n - 1].value);

    Some(RocCurve {
        tpr,
        specificity,
        thresholds,
    })
}

/// Area under the ROC curve via the Mann-Whitney U statistic.
///
/// Tied values receive average ranks, so the result matches the step
/// curve's trapezoid-free area exactly. `None` when either the Positive or
/// the Negative class is empty — an AUC is then undefined.
pub fn auc(population: &Population) -> Option<f64> {
    let p = population.total_positive();
    let ng = population.total_negative();
    if p == 0 || ng == 0 {
        return None;
    }

    // Entries are already sorted; walk tie groups, skipping Unknowns from
    // the ranking (they carry no ground truth).
    let ranked: Vec<(f64, bool)> = population
        .entries()
        .iter()
        .filter_map(|e| match e.label {
            crate::label::ClassLabel::Positive => Some((e.value, true)),
            crate::label::ClassLabel::Negative => Some((e.value, false)),
            crate::label::ClassLabel::Unknown => None,
        })
        .collect();

    let n = ranked.len();
    let mut rank_sum_pos = 0.0;
    let mut i = 0;
    while i < n {
        let mut j = i + 1;
        while j < n && ranked[j].0.total_cmp(&ranked[i].0).is_eq() {
            j += 1;
        }
        // Average 1-based rank over the tie group [i, j).
        let avg_rank = (i + 1 + j) as f64 / 2.0;
        for item in &ranked[i..j] {
            if item.1 {
                rank_sum_pos += avg_rank;
            }
        }
        i = j;
    }

    let pf = p as f64;
    let nf = ng as f64;
    let u = rank_sum_pos - pf * (pf + 1.0) / 2.0;
    Some((u / (pf * nf)).clamp(0.0, 1.0))
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::label_column;
    use crate::population::Population;

    const TOL: f64 = 1e-10;

    fn population(values: &[f64], refs: &[f64]) -> Population {
        Population::build(&label_column(values, Some(refs)).unwrap())
    }

    #[test]
    fn endpoints_regardless_of_data() {
        let pop = population(&[1.0, 2.0, 3.0], &[1.0, 1.0, -1.0]);
        let curve = roc_curve(&pop).unwrap();
        assert_eq!(curve.tpr[0], 1.0);
        assert_eq!(curve.specificity[0], 0.0);
        assert_eq!(*curve.tpr.last().unwrap(), 0.0);
        assert_eq!(*curve.specificity.last().unwrap(), 1.0);
        assert_eq!(curve.thresholds[0], 1.0);
        assert_eq!(*curve.thresholds.last().unwrap(), 3.0);
    }

    #[test]
    fn perfect_separation_curve() {
        // Negatives below, positives above: the curve passes through
        // (tpr=1, specificity 1) at the separating threshold.
        let pop = population(
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[-1.0, -1.0, 1.0, 1.0, 1.0],
        );
        let curve = roc_curve(&pop).unwrap();
        assert_eq!(curve.len(), 7);
        // Data point k=2 (value 3.0): both negatives are before it.
        assert!((curve.tpr[3] - 1.0).abs() < TOL);
        assert!((curve.specificity[3] - 1.0).abs() < TOL);
    }

    #[test]
    fn exclusive_prefix_arithmetic() {
        let pop = population(&[1.0, 2.0], &[1.0, -1.0]);
        let curve = roc_curve(&pop).unwrap();
        // k=0: nothing before → tpr 1, specificity 0.
        assert!((curve.tpr[1] - 1.0).abs() < TOL);
        assert!((curve.specificity[1] - 0.0).abs() < TOL);
        // k=1: one positive before → tpr 0, negative still at or after → specificity 0.
        assert!((curve.tpr[2] - 0.0).abs() < TOL);
        assert!((curve.specificity[2] - 0.0).abs() < TOL);
    }

    #[test]
    fn marker_boundaries() {
        let pop = population(
            &[1.0, 2.0, 3.0, 4.0],
            &[-1.0, -1.0, 1.0, 1.0],
        );
        let curve = roc_curve(&pop).unwrap();

        let m0 = curve.marker_at(0);
        assert_eq!((m0.tpr, m0.specificity), (1.0, 0.0));

        let m_end = curve.marker_at(4);
        assert_eq!((m_end.tpr, m_end.specificity), (0.0, 1.0));

        // Threshold index 2 (t = 3.0): marker is the point one step past.
        let m2 = curve.marker_at(2);
        assert!((m2.tpr - 1.0).abs() < TOL);
        assert!((m2.specificity - 1.0).abs() < TOL);
    }

    #[test]
    fn marker_matches_threshold_lookup() {
        let pop = population(
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[-1.0, 1.0, -1.0, 1.0, 1.0],
        );
        let curve = roc_curve(&pop).unwrap();
        for &t in &[0.0, 1.5, 3.0, 4.2, 9.0] {
            let idx = pop.threshold_index(t);
            let marker = curve.marker_at(idx);
            let counts = pop.counts_at(t);
            let expect_tpr = counts.true_positive as f64 / pop.total_positive() as f64;
            assert!(
                (marker.tpr - expect_tpr).abs() < TOL,
                "t={}: marker tpr {} vs counts {}",
                t,
                marker.tpr,
                expect_tpr
            );
        }
    }

    #[test]
    fn positive_only_population_still_has_curve() {
        let pop = population(&[1.0, 2.0], &[1.0, 1.0]);
        let curve = roc_curve(&pop).unwrap();
        // No negatives: specificity contributes 0 at every data point.
        assert!((curve.specificity[1]).abs() < TOL);
        assert!((curve.specificity[2]).abs() < TOL);
        assert_eq!(*curve.specificity.last().unwrap(), 1.0);
    }

    #[test]
    fn pure_unknown_column_has_no_curve() {
        let pop = population(&[1.0, 2.0, 3.0], &[0.0, 0.0, 0.0]);
        assert!(roc_curve(&pop).is_none());
    }

    #[test]
    fn auc_perfect_separation() {
        let pop = population(
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            &[-1.0, -1.0, -1.0, 1.0, 1.0, 1.0],
        );
        assert!((auc(&pop).unwrap() - 1.0).abs() < TOL);
    }

    #[test]
    fn auc_reversed_separation() {
        let pop = population(
            &[1.0, 2.0, 3.0, 4.0],
            &[1.0, 1.0, -1.0, -1.0],
        );
        assert!((auc(&pop).unwrap()).abs() < TOL);
    }

    #[test]
    fn auc_with_ties_is_half_credit() {
        // All values identical: AUC must be exactly 0.5.
        let pop = population(&[2.0, 2.0, 2.0, 2.0], &[1.0, 1.0, -1.0, -1.0]);
        assert!((auc(&pop).unwrap() - 0.5).abs() < TOL);
    }

    #[test]
    fn auc_ignores_unknowns() {
        let with_unknowns = population(
            &[1.0, 1.5, 2.0, 3.0, 4.0],
            &[-1.0, 0.0, -1.0, 1.0, 1.0],
        );
        let without = population(&[1.0, 2.0, 3.0, 4.0], &[-1.0, -1.0, 1.0, 1.0]);
        assert!((auc(&with_unknowns).unwrap() - auc(&without).unwrap()).abs() < TOL);
    }

    #[test]
    fn auc_undefined_when_class_empty() {
        let pop = population(&[1.0, 2.0], &[1.0, 1.0]);
        assert!(auc(&pop).is_none());
    }
}
