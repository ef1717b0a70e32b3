//! Merged sorted population with cumulative per-class counts.
//!
//! [`Population`] merges the three class sequences of a [`LabeledColumn`]
//! into one ascending (value, label) sequence and carries three inclusive
//! cumulative count arrays, so "how many Positive/Negative/Unknown samples
//! lie on either side of a threshold" resolves in O(log n) via
//! [`Population::threshold_index`].

use crate::label::{ClassLabel, LabeledColumn};

/// One sample in the merged population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationEntry {
    pub value: f64,
    pub label: ClassLabel,
}

/// Confusion counts at one threshold, under the "value >= threshold is
/// classified Positive" rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdCounts {
    /// Positive ground truth classified positive.
    pub true_positive: usize,
    /// Negative ground truth classified positive.
    pub false_positive: usize,
    /// Negative ground truth classified negative.
    pub true_negative: usize,
    /// Positive ground truth classified negative.
    pub false_negative: usize,
    /// Unknown ground truth classified positive.
    pub unknown_positive: usize,
    /// Unknown ground truth classified negative.
    pub unknown_negative: usize,
}

/// The merged, ascending-sorted population of one column.
///
/// `acc_pos[i]` / `acc_neg[i]` / `acc_unk[i]` count samples of that class
/// among the first `i + 1` sorted entries (inclusive prefix counts). Each
/// array is non-decreasing and ends at the class total. Immutable once
/// built; rebuild it whenever the column is re-labeled.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Population {
    entries: Vec<PopulationEntry>,
    acc_pos: Vec<usize>,
    acc_neg: Vec<usize>,
    acc_unk: Vec<usize>,
}

impl Population {
    /// Build the merged population and its cumulative counts from a
    /// labeled column.
    ///
    /// Sort key is the value only; same-value entries keep a deterministic
    /// relative order within a build (stable sort over positive, negative,
    /// then unknown).
    pub fn build(column: &LabeledColumn) -> Self {
        let n = column.len();
        let mut entries = Vec::with_capacity(n);
        for &v in &column.positive {
            entries.push(PopulationEntry {
                value: v,
                label: ClassLabel::Positive,
            });
        }
        for &v in &column.negative {
            entries.push(PopulationEntry {
                value: v,
                label: ClassLabel::Negative,
            });
        }
        for &v in &column.unknown {
            entries.push(PopulationEntry {
                value: v,
                label: ClassLabel::Unknown,
            });
        }
        entries.sort_by(|a, b| a.value.total_cmp(&b.value));

        let mut acc_pos = Vec::with_capacity(n);
        let mut acc_neg = Vec::with_capacity(n);
        let mut acc_unk = Vec::with_capacity(n);
        let (mut pos, mut neg, mut unk) = (0usize, 0usize, 0usize);
        for entry in &entries {
            match entry.label {
                ClassLabel::Positive => pos += 1,
                ClassLabel::Negative => neg += 1,
                ClassLabel::Unknown => unk += 1,
            }
            acc_pos.push(pos);
            acc_neg.push(neg);
            acc_unk.push(unk);
        }

        Self {
            entries,
            acc_pos,
            acc_neg,
            acc_unk,
        }
    }

    /// Sorted (value, label) entries.
    pub fn entries(&self) -> &[PopulationEntry] {
        &self.entries
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the population holds no samples.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inclusive cumulative Positive counts.
    pub fn acc_pos(&self) -> &[usize] {
        &self.acc_pos
    }

    /// Inclusive cumulative Negative counts.
    pub fn acc_neg(&self) -> &[usize] {
        &self.acc_neg
    }

    /// Inclusive cumulative Unknown counts.
    pub fn acc_unk(&self) -> &[usize] {
        &self.acc_unk
    }

    /// Total Positive samples.
    pub fn total_positive(&self) -> usize {
        self.acc_pos.last().copied().unwrap_or(0)
    }

    /// Total Negative samples.
    pub fn total_negative(&self) -> usize {
        self.acc_neg.last().copied().unwrap_or(0)
    }

    /// Total Unknown samples.
    pub fn total_unknown(&self) -> usize {
        self.acc_unk.last().copied().unwrap_or(0)
    }

    /// Count of entries with value strictly less than `threshold`
    /// (lower-bound binary search).
    ///
    /// The first `i` entries are classified Negative, the rest Positive —
    /// so a threshold exactly equal to a data value classifies that value
    /// as Positive.
    pub fn threshold_index(&self, threshold: f64) -> usize {
        self.entries.partition_point(|e| e.value < threshold)
    }

    /// Exclusive prefix counts (positive, negative, unknown) strictly
    /// before sorted position `index`.
    pub fn prefix_counts(&self, index: usize) -> (usize, usize, usize) {
        if index == 0 {
            (0, 0, 0)
        } else {
            let i = index.min(self.entries.len()) - 1;
            (self.acc_pos[i], self.acc_neg[i], self.acc_unk[i])
        }
    }

    /// Confusion counts at an arbitrary real threshold.
    ///
    /// Any real number is valid; thresholds outside the data range resolve
    /// to the all-Positive or all-Negative boundary classification.
    pub fn counts_at(&self, threshold: f64) -> ThresholdCounts {
        let i = self.threshold_index(threshold);
        let (false_negative, true_negative, unknown_negative) = self.prefix_counts(i);
        ThresholdCounts {
            true_positive: self.total_positive() - false_negative,
            false_positive: self.total_negative() - true_negative,
            true_negative,
            false_negative,
            unknown_positive: self.total_unknown() - unknown_negative,
            unknown_negative,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::label_column;

    fn population(values: &[f64], refs: &[f64]) -> Population {
        Population::build(&label_column(values, Some(refs)).unwrap())
    }

    #[test]
    fn merged_entries_are_sorted() {
        let pop = population(&[5.0, 1.0, 3.0, 2.0], &[1.0, -1.0, 0.0, 1.0]);
        let values: Vec<f64> = pop.entries().iter().map(|e| e.value).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0, 5.0]);
        assert_eq!(pop.total_positive(), 2);
        assert_eq!(pop.total_negative(), 1);
        assert_eq!(pop.total_unknown(), 1);
    }

    #[test]
    fn cumulative_counts_monotone_and_total() {
        let pop = population(
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            &[1.0, -1.0, 1.0, 0.0, -1.0, 1.0],
        );
        for acc in [pop.acc_pos(), pop.acc_neg(), pop.acc_unk()] {
            assert_eq!(acc.len(), 6);
            for w in acc.windows(2) {
                assert!(w[0] <= w[1]);
            }
        }
        assert_eq!(*pop.acc_pos().last().unwrap(), pop.total_positive());
        assert_eq!(*pop.acc_neg().last().unwrap(), pop.total_negative());
        assert_eq!(*pop.acc_unk().last().unwrap(), pop.total_unknown());
    }

    #[test]
    fn ties_accumulate_at_same_step() {
        // Two samples at value 2 with different labels.
        let pop = population(&[1.0, 2.0, 2.0, 3.0], &[-1.0, -1.0, 1.0, 1.0]);
        // Prefix counts after the tie group include both value-2 rows.
        let (p, n, _) = pop.prefix_counts(3);
        assert_eq!(p, 1);
        assert_eq!(n, 2);
    }

    #[test]
    fn threshold_index_is_lower_bound() {
        let pop = population(&[1.0, 2.0, 2.0, 3.0], &[1.0, 1.0, 1.0, 1.0]);
        assert_eq!(pop.threshold_index(0.5), 0);
        assert_eq!(pop.threshold_index(2.0), 1); // only 1.0 is < 2.0
        assert_eq!(pop.threshold_index(2.5), 3);
        assert_eq!(pop.threshold_index(9.0), 4);
    }

    #[test]
    fn counts_at_minimum_classifies_everything_positive() {
        let pop = population(&[1.0, 2.0, 3.0], &[1.0, -1.0, 0.0]);
        let c = pop.counts_at(1.0);
        assert_eq!(c.false_negative, 0);
        assert_eq!(c.true_negative, 0);
        assert_eq!(c.unknown_negative, 0);
        assert_eq!(
            c.true_positive + c.false_positive + c.unknown_positive,
            pop.len()
        );
    }

    #[test]
    fn counts_above_maximum_classifies_nothing_positive() {
        let pop = population(&[1.0, 2.0, 3.0], &[1.0, -1.0, 0.0]);
        let c = pop.counts_at(3.5);
        assert_eq!(c.true_positive, 0);
        assert_eq!(c.false_positive, 0);
        assert_eq!(c.unknown_positive, 0);
        assert_eq!(c.false_negative, 1);
        assert_eq!(c.true_negative, 1);
        assert_eq!(c.unknown_negative, 1);
    }

    #[test]
    fn scenario_a_threshold_on_data_value() {
        // [1,2,3,4,5] labeled [N,N,P,P,P], t = 3.
        let pop = population(
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[-1.0, -1.0, 1.0, 1.0, 1.0],
        );
        let c = pop.counts_at(3.0);
        assert_eq!(c.true_positive, 3);
        assert_eq!(c.false_positive, 0);
        assert_eq!(c.true_negative, 2);
        assert_eq!(c.false_negative, 0);
    }

    #[test]
    fn scenario_b_threshold_between_values() {
        let pop = population(
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            &[-1.0, -1.0, 1.0, 1.0, 1.0],
        );
        let c = pop.counts_at(2.5);
        assert_eq!(c.true_positive, 3);
        assert_eq!(c.false_positive, 0);
        assert_eq!(c.true_negative, 2);
        assert_eq!(c.false_negative, 0);
    }

    #[test]
    fn scenario_c_tie_with_mixed_labels() {
        // [1,2,2,3] labeled [N,N,P,P], t = 2: both value-2 rows are >= t,
        // so both classify Positive.
        let pop = population(&[1.0, 2.0, 2.0, 3.0], &[-1.0, -1.0, 1.0, 1.0]);
        let c = pop.counts_at(2.0);
        assert_eq!(c.false_negative, 0);
        assert_eq!(c.true_negative, 1); // only value 1
        assert_eq!(c.true_positive, 2);
        assert_eq!(c.false_positive, 1); // the negative-labeled 2
    }

    #[test]
    fn empty_population() {
        let pop = Population::build(&label_column(&[], None).unwrap());
        assert!(pop.is_empty());
        assert_eq!(pop.total_positive(), 0);
        let c = pop.counts_at(5.0);
        assert_eq!(c.true_positive, 0);
        assert_eq!(c.true_negative, 0);
    }
}
