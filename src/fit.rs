//! Per-population distribution fitting.
//!
//! [`fit_column`] fits every supported family to each of the three
//! ground-truth classes of a [`LabeledColumn`] independently. A class with
//! no samples yields `None` — never zeroed parameters, which would corrupt
//! downstream z-score and density computations.

use crate::dist::{ExponNormalFit, ExponentialFit, GompertzFit, NormalFit};
use crate::label::{ClassLabel, LabeledColumn};

/// All four family fits for one non-empty population.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PopulationFits {
    pub normal: NormalFit,
    pub exponential: ExponentialFit,
    pub expon_normal: ExponNormalFit,
    pub gompertz: GompertzFit,
}

impl PopulationFits {
    fn fit(data: &[f64]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        Some(Self {
            normal: NormalFit::fit(data),
            exponential: ExponentialFit::fit(data),
            expon_normal: ExponNormalFit::fit(data),
            gompertz: GompertzFit::fit(data),
        })
    }
}

/// Fitted parameters for each class of a column; `None` per empty class.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnFits {
    pub positive: Option<PopulationFits>,
    pub negative: Option<PopulationFits>,
    pub unknown: Option<PopulationFits>,
}

impl ColumnFits {
    /// Fits for one class.
    pub fn class(&self, label: ClassLabel) -> Option<&PopulationFits> {
        match label {
            ClassLabel::Positive => self.positive.as_ref(),
            ClassLabel::Negative => self.negative.as_ref(),
            ClassLabel::Unknown => self.unknown.as_ref(),
        }
    }
}

/// Fit every supported family to each class of `column` independently.
///
/// # Example
///
/// ```
/// use cutpoint::label::label_column;
/// use cutpoint::fit::fit_column;
///
/// let values = [1.0, 2.0, 3.0, 4.0];
/// let refs = [1.0, 1.0, 1.0, 1.0];
/// let fits = fit_column(&label_column(&values, Some(&refs)).unwrap());
/// assert!(fits.positive.is_some());
/// assert!(fits.negative.is_none()); // no negative samples
/// ```
pub fn fit_column(column: &LabeledColumn) -> ColumnFits {
    ColumnFits {
        positive: PopulationFits::fit(&column.positive),
        negative: PopulationFits::fit(&column.negative),
        unknown: PopulationFits::fit(&column.unknown),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
