//! Shared histogram bin edges for plotting population overlays.
//!
//! [`bin_edges`] computes one common set of edges over a display range for
//! whichever subset of the three classes is being shown, so overlaid
//! histograms stay comparable. Bin width follows the "auto" rule: the
//! smaller of the Freedman-Diaconis and Sturges widths, falling back to
//! Sturges when the IQR is zero.

use crate::label::{ClassLabel, LabeledColumn};

/// Compute evenly spaced bin edges over `range` for the values of the
/// selected `classes`.
///
/// Values outside the range are ignored for width estimation. Returns an
/// empty vector when no selected values fall inside the range or the range
/// is empty/inverted.
pub fn bin_edges(column: &LabeledColumn, classes: &[ClassLabel], range: (f64, f64)) -> Vec<f64> {
    let (lo, hi) = range;
    if !(hi > lo) {
        return Vec::new();
    }

    let mut data: Vec<f64> = Vec::new();
    for &class in classes {
        data.extend(
            column
                .class(class)
                .iter()
                .copied()
                .filter(|v| (lo..=hi).contains(v)),
        );
    }
    if data.is_empty() {
        return Vec::new();
    }
    data.sort_by(|a, b| a.total_cmp(b));

    let n = data.len() as f64;
    let span = hi - lo;

    let sturges = span / (n.log2() + 1.0);
    let iqr = quantile_sorted(&data, 0.75) - quantile_sorted(&data, 0.25);
    let fd = 2.0 * iqr / n.cbrt();

    let width = if fd > 0.0 { fd.min(sturges) } else { sturges };
    let n_bins = (span / width).ceil().max(1.0) as usize;

    let step = span / n_bins as f64;
    (0..=n_bins).map(|i| lo + step * i as f64).collect()
}

/// Quantile by linear interpolation over a pre-sorted slice.
fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = q * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;
    if lo + 1 >= n {
        sorted[n - 1]
    } else {
        sorted[lo] * (1.0 - frac) + sorted[lo + 1] * frac
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::label_column;

    const TOL: f64 = 1e-10;

    #[test]
    fn edges_span_the_range_evenly() {
        let values: Vec<f64> = (0..50).map(|i| i as f64 / 5.0).collect();
        let column = label_column(&values, None).unwrap();
        let edges = bin_edges(&column, &[ClassLabel::Unknown], (0.0, 10.0));
        assert!(edges.len() >= 2);
        assert!((edges[0] - 0.0).abs() < TOL);
        assert!((edges.last().unwrap() - 10.0).abs() < TOL);
        let step = edges[1] - edges[0];
        for w in edges.windows(2) {
            assert!((w[1] - w[0] - step).abs() < 1e-9);
        }
    }

    #[test]
    fn selection_controls_which_classes_count() {
        let values = [1.0, 1.0, 1.0, 9.0, 9.0, 9.0];
        let refs = [1.0, 1.0, 1.0, -1.0, -1.0, -1.0];
        let column = label_column(&values, Some(&refs)).unwrap();
        let pos_only = bin_edges(&column, &[ClassLabel::Positive], (0.0, 10.0));
        let both = bin_edges(
            &column,
            &[ClassLabel::Positive, ClassLabel::Negative],
            (0.0, 10.0),
        );
        assert!(!pos_only.is_empty());
        assert!(!both.is_empty());
        // More spread data (both classes) produces different binning than
        // a single tight cluster.
        assert_ne!(pos_only.len(), both.len());
    }

    #[test]
    fn zero_iqr_falls_back_to_sturges() {
        let values = [5.0; 16];
        let column = label_column(&values, None).unwrap();
        let edges = bin_edges(&column, &[ClassLabel::Unknown], (0.0, 10.0));
        // Sturges: 10 / (log2(16) + 1) = 2 → 5 bins → 6 edges.
        assert_eq!(edges.len(), 6);
    }

    #[test]
    fn empty_selection_is_empty() {
        let values = [1.0, 2.0];
        let refs = [1.0, 1.0];
        let column = label_column(&values, Some(&refs)).unwrap();
        assert!(bin_edges(&column, &[ClassLabel::Negative], (0.0, 10.0)).is_empty());
        assert!(bin_edges(&column, &[], (0.0, 10.0)).is_empty());
    }

    #[test]
    fn inverted_range_is_empty() {
        let column = label_column(&[1.0], None).unwrap();
        assert!(bin_edges(&column, &[ClassLabel::Unknown], (5.0, 1.0)).is_empty());
    }
}
