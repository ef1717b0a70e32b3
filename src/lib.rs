//! Threshold analysis engine for labeled numeric measurements.
//!
//! `cutpoint` ingests a column of measurements where each sample carries a
//! ternary ground truth (Positive, Negative, or Unknown) and produces the
//! artifacts needed to pick and evaluate a classification threshold:
//!
//! - **Labeling** — per-class partitioning and display range ([`label`])
//! - **Distribution fits** — per-class maximum-likelihood fits for the
//!   normal, exponential, exponentially-modified-normal, and Gompertz
//!   families ([`dist`], [`fit`])
//! - **Population index** — merged sorted samples with cumulative per-class
//!   counts for O(log n) threshold queries ([`population`])
//! - **ROC curve** — TPR/specificity step curve, threshold marker, and AUC
//!   ([`roc`])
//! - **Confusion table** — 2×2 counts, rates, accuracy, PPV, and z-score at
//!   an arbitrary threshold ([`confusion`])
//! - **Analysis bundle** — the atomic label→fit→index→curve pipeline and a
//!   host-owned per-column cache ([`analysis`])
//!
//! The classification rule throughout: a sample with value **≥ threshold**
//! is classified Positive. Absent data is absent in the types — an empty
//! class fits to `None`, a pure-Unknown column has no ROC curve, a
//! degenerate fit evaluates to NaN. Nothing here panics on empty input.
//!
//! ```
//! use cutpoint::analysis::ColumnAnalysis;
//!
//! let values = [0.8, 1.2, 2.9, 3.5, 4.1];
//! let reference = [-1.0, -1.0, 1.0, 1.0, 1.0];
//! let analysis = ColumnAnalysis::compute(&values, Some(&reference)).unwrap();
//!
//! let table = analysis.confusion_at(2.0).unwrap();
//! assert_eq!(table.counts.true_positive, 3);
//! assert_eq!(table.counts.true_negative, 2);
//! assert!(analysis.roc.is_some());
//! ```

pub mod analysis;
pub mod confusion;
pub mod dist;
pub mod error;
pub mod fit;
pub mod histogram;
pub mod label;
pub mod population;
pub mod roc;

pub use analysis::{AnalysisStore, ColumnAnalysis, ColumnKey};
pub use confusion::{confusion_table, ConfusionTable};
pub use dist::{
    ContinuousDistribution, DistributionFamily, ExponNormalFit, ExponentialFit, FittedDistribution,
    GompertzFit, NormalFit,
};
pub use error::{CutpointError, Result};
pub use fit::{fit_column, ColumnFits, PopulationFits};
pub use label::{label_column, ClassLabel, LabeledColumn};
pub use population::{Population, PopulationEntry, ThresholdCounts};
pub use roc::{auc, roc_curve, RocCurve, RocPoint};
