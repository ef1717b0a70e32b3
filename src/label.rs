//! Ground-truth labeling and per-class partitioning of a measurement column.
//!
//! Provides [`ClassLabel`], the ternary ground-truth class, and
//! [`label_column`], which splits a raw column of measurements into three
//! ascending-sorted class sequences ([`LabeledColumn`]) plus the display
//! range used by downstream plotting.

use crate::error::{CutpointError, Result};

/// Ground-truth class of a sample.
///
/// `Unknown` means "no ground truth is available", not "missing value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassLabel {
    Positive,
    Negative,
    Unknown,
}

impl ClassLabel {
    /// Derive a label from a raw reference value.
    ///
    /// Positive for values > 0, Negative for values < 0, Unknown for 0,
    /// NaN, or an absent reference.
    pub fn from_reference(reference: Option<f64>) -> Self {
        match reference {
            Some(r) if r > 0.0 => ClassLabel::Positive,
            Some(r) if r < 0.0 => ClassLabel::Negative,
            // 0.0 and NaN both mean "no ground truth"
            _ => ClassLabel::Unknown,
        }
    }
}

/// A measurement column partitioned by ground-truth class.
///
/// Each class sequence is sorted ascending. `range_min`/`range_max` are
/// display bounds spanning all three classes; an empty column defaults to
/// `[0, 100]`. Immutable once built — a reprocessed source column replaces
/// the whole value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabeledColumn {
    /// Ascending values with Positive ground truth.
    pub positive: Vec<f64>,
    /// Ascending values with Negative ground truth.
    pub negative: Vec<f64>,
    /// Ascending values with no ground truth.
    pub unknown: Vec<f64>,
    /// Lower display bound: `floor(min − 1)` over all classes.
    pub range_min: f64,
    /// Upper display bound: `ceil(max + 1)` over all classes.
    pub range_max: f64,
}

impl LabeledColumn {
    /// Total number of samples across all three classes.
    pub fn len(&self) -> usize {
        self.positive.len() + self.negative.len() + self.unknown.len()
    }

    /// Whether the column holds no samples at all.
    pub fn is_empty(&self) -> bool {
        self.positive.is_empty() && self.negative.is_empty() && self.unknown.is_empty()
    }

    /// Values of one class, sorted ascending.
    pub fn class(&self, label: ClassLabel) -> &[f64] {
        match label {
            ClassLabel::Positive => &self.positive,
            ClassLabel::Negative => &self.negative,
            ClassLabel::Unknown => &self.unknown,
        }
    }
}

/// Partition `values` into per-class sorted sequences using the optional
/// ground-truth `reference` column.
///
/// Reference semantics: value > 0 → Positive, < 0 → Negative, 0 or NaN →
/// Unknown. `reference == None` routes every row to Unknown. A present
/// reference column must have the same length as `values`.
///
/// # Errors
///
/// Returns [`CutpointError::LengthMismatch`] if `reference` is present with
/// a different length than `values`.
///
/// # Example
///
/// ```
/// use cutpoint::label::label_column;
///
/// let values = [3.0, 1.0, 2.0];
/// let refs = [1.0, -1.0, 0.0];
/// let col = label_column(&values, Some(&refs)).unwrap();
/// assert_eq!(col.positive, vec![3.0]);
/// assert_eq!(col.negative, vec![1.0]);
/// assert_eq!(col.unknown, vec![2.0]);
/// ```
pub fn label_column(values: &[f64], reference: Option<&[f64]>) -> Result<LabeledColumn> {
    if let Some(refs) = reference {
        if refs.len() != values.len() {
            return Err(CutpointError::LengthMismatch {
                values: values.len(),
                labels: refs.len(),
            });
        }
    }

    let mut positive = Vec::new();
    let mut negative = Vec::new();
    let mut unknown = Vec::new();

    for (i, &v) in values.iter().enumerate() {
        let label = ClassLabel::from_reference(reference.map(|r| r[i]));
        match label {
            ClassLabel::Positive => positive.push(v),
            ClassLabel::Negative => negative.push(v),
            ClassLabel::Unknown => unknown.push(v),
        }
    }

    positive.sort_by(|a, b| a.total_cmp(b));
    negative.sort_by(|a, b| a.total_cmp(b));
    unknown.sort_by(|a, b| a.total_cmp(b));

    let (range_min, range_max) = display_range(values);

    Ok(LabeledColumn {
        positive,
        negative,
        unknown,
        range_min,
        range_max,
    })
}

/// Display bounds over the raw values: `floor(min − 1)` / `ceil(max + 1)`,
/// or `[0, 100]` when there are no finite values.
fn display_range(values: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in values {
        if v.is_nan() {
            continue;
        }
        if v < min {
            min = v;
        }
        if v > max {
            max = v;
        }
    }
    if min > max {
        (0.0, 100.0)
    } else {
        ((min - 1.0).floor(), (max + 1.0).ceil())
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_reference_ternary() {
        assert_eq!(ClassLabel::from_reference(Some(1.0)), ClassLabel::Positive);
        assert_eq!(ClassLabel::from_reference(Some(0.5)), ClassLabel::Positive);
        assert_eq!(ClassLabel::from_reference(Some(-1.0)), ClassLabel::Negative);
        assert_eq!(ClassLabel::from_reference(Some(0.0)), ClassLabel::Unknown);
        assert_eq!(
            ClassLabel::from_reference(Some(f64::NAN)),
            ClassLabel::Unknown
        );
        assert_eq!(ClassLabel::from_reference(None), ClassLabel::Unknown);
    }

    #[test]
    fn label_partitions_and_sorts() {
        let values = [5.0, 1.0, 3.0, 2.0, 4.0];
        let refs = [1.0, -1.0, 1.0, 0.0, -1.0];
        let col = label_column(&values, Some(&refs)).unwrap();
        assert_eq!(col.positive, vec![3.0, 5.0]);
        assert_eq!(col.negative, vec![1.0, 4.0]);
        assert_eq!(col.unknown, vec![2.0]);
        assert_eq!(col.len(), 5);
    }

    #[test]
    fn missing_reference_is_all_unknown() {
        let values = [2.0, 1.0];
        let col = label_column(&values, None).unwrap();
        assert!(col.positive.is_empty());
        assert!(col.negative.is_empty());
        assert_eq!(col.unknown, vec![1.0, 2.0]);
    }

    #[test]
    fn nan_reference_is_unknown_not_error() {
        let values = [1.0, 2.0, 3.0];
        let refs = [f64::NAN, 1.0, f64::NAN];
        let col = label_column(&values, Some(&refs)).unwrap();
        assert_eq!(col.positive, vec![2.0]);
        assert_eq!(col.unknown, vec![1.0, 3.0]);
    }

    #[test]
    fn display_range_padding() {
        let values = [1.5, 4.2];
        let col = label_column(&values, None).unwrap();
        assert_eq!(col.range_min, 0.0); // floor(1.5 - 1)
        assert_eq!(col.range_max, 6.0); // ceil(4.2 + 1)
    }

    #[test]
    fn empty_column_default_range() {
        let col = label_column(&[], None).unwrap();
        assert!(col.is_empty());
        assert_eq!(col.range_min, 0.0);
        assert_eq!(col.range_max, 100.0);
    }

    #[test]
    fn length_mismatch_fails_fast() {
        let err = label_column(&[1.0, 2.0], Some(&[1.0])).unwrap_err();
        assert!(matches!(
            err,
            CutpointError::LengthMismatch {
                values: 2,
                labels: 1
            }
        ));
    }
}
