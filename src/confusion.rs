//! Confusion table and derived rates at a chosen threshold.
//!
//! [`confusion_table`] combines the population index's threshold lookup
//! with the Positive class's fitted normal model to produce the 2×2 counts,
//! the four rates, accuracy, PPV, and the threshold's z-score. All
//! not-computable quantities are NaN (PPV with no predicted positives,
//! z-score without a usable normal fit), never a division-by-zero trap.

use crate::dist::NormalFit;
use crate::population::{Population, ThresholdCounts};

/// Round to 2 decimal places for display; NaN passes through.
fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Confusion counts and derived statistics at one threshold.
///
/// Rates are stored at full precision; use [`ConfusionTable::rounded`] for
/// the 2-decimal display form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfusionTable {
    /// The threshold the table was generated at.
    pub threshold: f64,
    /// Raw classification counts.
    pub counts: ThresholdCounts,
    /// True positive rate, TP / totalPositive (0 when no positives).
    pub tpr: f64,
    /// False positive rate, FP / totalNegative (0 when no negatives).
    pub fpr: f64,
    /// True negative rate, TN / totalNegative (0 when no negatives).
    pub tnr: f64,
    /// False negative rate, FN / totalPositive (0 when no positives).
    pub fnr: f64,
    /// (TP + TN) / (totalPositive + totalNegative); 0 when both are empty.
    pub accuracy: f64,
    /// Positive predictive value, TP / (TP + FP); NaN when nothing is
    /// classified positive among labeled samples.
    pub ppv: f64,
    /// Threshold's z-score against the Positive class's normal fit; NaN
    /// when that fit is absent or degenerate (scale 0).
    pub z_score: f64,
}

impl ConfusionTable {
    /// A copy with rates, accuracy, PPV, and z-score rounded to 2 decimal
    /// places for display.
    pub fn rounded(&self) -> ConfusionTable {
        ConfusionTable {
            tpr: round2(self.tpr),
            fpr: round2(self.fpr),
            tnr: round2(self.tnr),
            fnr: round2(self.fnr),
            accuracy: round2(self.accuracy),
            ppv: round2(self.ppv),
            z_score: round2(self.z_score),
            ..*self
        }
    }
}

/// Generate the confusion table for `population` at `threshold`.
///
/// `positive_normal` is the Positive class's fitted normal model (from
/// [`crate::fit::fit_column`]); pass `None` when the Positive class is
/// empty — the z-score is then NaN. Returns `None` when the population
/// itself is empty.
///
/// # Example
///
/// ```
/// use cutpoint::label::label_column;
/// use cutpoint::population::Population;
/// use cutpoint::confusion::confusion_table;
///
/// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
/// let refs = [-1.0, -1.0, 1.0, 1.0, 1.0];
/// let pop = Population::build(&label_column(&values, Some(&refs)).unwrap());
/// let table = confusion_table(&pop, 3.0, None).unwrap();
/// assert_eq!(table.counts.true_positive, 3);
/// assert_eq!(table.accuracy, 1.0);
/// ```
pub fn confusion_table(
    population: &Population,
    threshold: f64,
    positive_normal: Option<&NormalFit>,
) -> Option<ConfusionTable> {
    if population.is_empty() {
        return None;
    }

    let counts = population.counts_at(threshold);
    let total_pos = population.total_positive() as f64;
    let total_neg = population.total_negative() as f64;

    let ratio = |num: usize, denom: f64| if denom > 0.0 { num as f64 / denom } else { 0.0 };

    let tpr = ratio(counts.true_positive, total_pos);
    let fnr = ratio(counts.false_negative, total_pos);
    let fpr = ratio(counts.false_positive, total_neg);
    let tnr = ratio(counts.true_negative, total_neg);

    let labeled = total_pos + total_neg;
    let accuracy = ratio(counts.true_positive + counts.true_negative, labeled);

    let predicted_positive = counts.true_positive + counts.false_positive;
    let ppv = if predicted_positive > 0 {
        counts.true_positive as f64 / predicted_positive as f64
    } else {
        f64::NAN
    };

    let z_score = match positive_normal {
        Some(fit) if fit.scale > 0.0 => (threshold - fit.loc) / fit.scale,
        _ => f64::NAN,
    };

    Some(ConfusionTable {
        threshold,
        counts,
        tpr,
        fpr,
        tnr,
        fnr,
        accuracy,
        ppv,
        z_score,
    })
}

// ── Tests ──────────────────────────────────────────────────────────────────
