//! Per-column analysis pipeline and the host-owned result cache.
//!
//! [`ColumnAnalysis::compute`] runs label → fit → index → curve as one
//! unit, so a column's derived structures are always built from the same
//! labeling and can never drift apart (a stale ROC curve against a
//! refreshed index is a correctness hazard). [`AnalysisStore`] is an
//! explicit cache keyed by (file, column) for hosts that analyze many
//! columns; inserting replaces the whole bundle wholesale.

use std::collections::HashMap;

use crate::confusion::{confusion_table, ConfusionTable};
use crate::error::Result;
use crate::fit::{fit_column, ColumnFits};
use crate::label::{label_column, LabeledColumn};
use crate::population::Population;
use crate::roc::{roc_curve, RocCurve};

/// Identity of one analyzed column: source file plus column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnKey {
    pub file: String,
    pub column: String,
}

impl ColumnKey {
    pub fn new(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            column: column.into(),
        }
    }
}

/// Everything the engine derives for one column, built atomically.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnAnalysis {
    pub column: LabeledColumn,
    pub fits: ColumnFits,
    pub population: Population,
    /// `None` for a pure-Unknown column (no curve exists).
    pub roc: Option<RocCurve>,
}

impl ColumnAnalysis {
    /// Run the full pipeline on one column of measurements.
    ///
    /// # Errors
    ///
    /// Returns an error only for the boundary contract violation of a
    /// mismatched `reference` length; absent classes and degenerate data
    /// are represented in the result, not raised.
    ///
    /// # Example
    ///
    /// ```
    /// use cutpoint::analysis::ColumnAnalysis;
    ///
    /// let values = [1.0, 2.0, 3.0, 4.0, 5.0];
    /// let refs = [-1.0, -1.0, 1.0, 1.0, 1.0];
    /// let analysis = ColumnAnalysis::compute(&values, Some(&refs)).unwrap();
    /// assert!(analysis.roc.is_some());
    /// let table = analysis.confusion_at(3.0).unwrap();
    /// assert_eq!(table.accuracy, 1.0);
    /// ```
    pub fn compute(values: &[f64], reference: Option<&[f64]>) -> Result<Self> {
        let column = label_column(values, reference)?;
        let fits = fit_column(&column);
        let population = Population::build(&column);
        let roc = roc_curve(&population);
        Ok(Self {
            column,
            fits,
            population,
            roc,
        })
    }

    /// Confusion table at `threshold`, wired to the Positive class's
    /// normal fit. `None` when the column is empty.
    pub fn confusion_at(&self, threshold: f64) -> Option<ConfusionTable> {
        let positive_normal = self.fits.positive.as_ref().map(|f| &f.normal);
        confusion_table(&self.population, threshold, positive_normal)
    }
}

/// Host-owned cache of per-column analyses.
///
/// The engine itself stays stateless; this store is plain data the host
/// can keep alongside its upload state. Columns are independent, so a
/// multi-file host may compute [`ColumnAnalysis`] values in parallel and
/// insert them here from a single owner.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnalysisStore {
    columns: HashMap<ColumnKey, ColumnAnalysis>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or wholesale-replace the analysis for `key`.
    pub fn insert(&mut self, key: ColumnKey, analysis: ColumnAnalysis) {
        self.columns.insert(key, analysis);
    }

    /// Look up a column's analysis.
    pub fn get(&self, key: &ColumnKey) -> Option<&ColumnAnalysis> {
        self.columns.get(key)
    }

    /// Drop a column's analysis (e.g. when its file is removed).
    pub fn remove(&mut self, key: &ColumnKey) -> Option<ColumnAnalysis> {
        self.columns.remove(key)
    }

    /// Number of cached columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the store is empty.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Keys of every cached column.
    pub fn keys(&self) -> impl Iterator<Item = &ColumnKey> {
        self.columns.keys()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
