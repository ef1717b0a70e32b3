//! Parametric distribution families and numerical helpers.
//!
//! Provides the [`ContinuousDistribution`] trait (pdf/cdf/ppf), the closed
//! [`DistributionFamily`] set supported by the fitter, one parameter struct
//! per family ([`NormalFit`], [`ExponentialFit`], [`ExponNormalFit`],
//! [`GompertzFit`]) with a deterministic maximum-likelihood `fit`, and
//! low-level functions ([`erf`], [`erfc`], [`norm_ppf`]) used throughout
//! the crate.
//!
//! Degenerate fits (zero-variance data give `scale == 0`) evaluate their
//! pdf/cdf/ppf to NaN rather than trapping on a division by zero.

use core::f64::consts::{PI, SQRT_2};

// ── Numerical helpers ──────────────────────────────────────────────────────

/// Error function via Abramowitz & Stegun 7.1.26 (max error ~1.5e-7).
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    sign * (1.0 - poly * (-x * x).exp())
}

/// Complementary error function `1 - erf(x)`.
pub fn erfc(x: f64) -> f64 {
    1.0 - erf(x)
}

/// Natural log of `erfc(x)`, stable for large positive `x` where `erfc`
/// underflows. Switches to the asymptotic expansion at `x >= 3`.
pub fn ln_erfc(x: f64) -> f64 {
    if x < 3.0 {
        erfc(x).ln()
    } else {
        let x2 = x * x;
        -x2 - (x * PI.sqrt()).ln() + (1.0 - 0.5 / x2 + 0.75 / (x2 * x2)).ln()
    }
}

/// Standard normal CDF.
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Natural log of the standard normal CDF, stable in the far left tail.
pub fn ln_norm_cdf(x: f64) -> f64 {
    ln_erfc(-x / SQRT_2) - core::f64::consts::LN_2
}

/// Standard normal quantile (inverse CDF) via Acklam's rational
/// approximation (relative error < 1.15e-9). NaN outside `(0, 1)`.
pub fn norm_ppf(p: f64) -> f64 {
    if !(0.0..=1.0).contains(&p) || p.is_nan() {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];

    const P_LOW: f64 = 0.02425;

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}

// ── Sample moments ─────────────────────────────────────────────────────────

/// Mean, population variance, and population skewness in one pass.
fn sample_moments(data: &[f64]) -> (f64, f64, f64) {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let mut m2 = 0.0;
    let mut m3 = 0.0;
    for &x in data {
        let d = x - mean;
        m2 += d * d;
        m3 += d * d * d;
    }
    let var = m2 / n;
    let std = var.sqrt();
    let skew = if std > 0.0 {
        (m3 / n) / (std * std * std)
    } else {
        0.0
    };
    (mean, var, skew)
}

// ── Nelder-Mead simplex minimizer ─────────────────────────────────────────

/// Minimize `f` from `x0` with a downhill simplex (reflection 1, expansion
/// 2, contraction 0.5, shrink 0.5). Fully deterministic: fixed initial
/// simplex from `steps`, fixed iteration cap, converges when the simplex's
/// function-value spread drops below `tol`.
fn nelder_mead<F>(f: F, x0: &[f64], steps: &[f64], max_iter: usize, tol: f64) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let dim = x0.len();
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(dim + 1);
    simplex.push(x0.to_vec());
    for i in 0..dim {
        let mut v = x0.to_vec();
        v[i] += steps[i];
        simplex.push(v);
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| f(v)).collect();

    for _ in 0..max_iter {
        // Order vertices best → worst.
        let mut order: Vec<usize> = (0..=dim).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        let best = order[0];
        let worst = order[dim];
        let second_worst = order[dim - 1];

        if (values[worst] - values[best]).abs() < tol {
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; dim];
        for (idx, v) in simplex.iter().enumerate() {
            if idx == worst {
                continue;
            }
            for j in 0..dim {
                centroid[j] += v[j] / dim as f64;
            }
        }

        let reflected: Vec<f64> = (0..dim)
            .map(|j| centroid[j] + (centroid[j] - simplex[worst][j]))
            .collect();
        let f_reflected = f(&reflected);

        if f_reflected < values[best] {
            let expanded: Vec<f64> = (0..dim)
                .map(|j| centroid[j] + 2.0 * (centroid[j] - simplex[worst][j]))
                .collect();
            let f_expanded = f(&expanded);
            if f_expanded < f_reflected {
                simplex[worst] = expanded;
                values[worst] = f_expanded;
            } else {
                simplex[worst] = reflected;
                values[worst] = f_reflected;
            }
        } else if f_reflected < values[second_worst] {
            simplex[worst] = reflected;
            values[worst] = f_reflected;
        } else {
            let contracted: Vec<f64> = (0..dim)
                .map(|j| centroid[j] + 0.5 * (simplex[worst][j] - centroid[j]))
                .collect();
            let f_contracted = f(&contracted);
            if f_contracted < values[worst] {
                simplex[worst] = contracted;
                values[worst] = f_contracted;
            } else {
                // Shrink toward the best vertex.
                let best_point = simplex[best].clone();
                for (idx, v) in simplex.iter_mut().enumerate() {
                    if idx == best {
                        continue;
                    }
                    for j in 0..dim {
                        v[j] = best_point[j] + 0.5 * (v[j] - best_point[j]);
                    }
                    values[idx] = f(v);
                }
            }
        }
    }

    let mut best = 0;
    for i in 1..=dim {
        if values[i] < values[best] {
            best = i;
        }
    }
    simplex.swap_remove(best)
}

/// Penalty value returned by likelihood functions for invalid parameters.
const NLL_PENALTY: f64 = 1e12;

// ── Distribution trait ─────────────────────────────────────────────────────

/// A fitted continuous distribution with density, cumulative, and quantile
/// evaluation.
///
/// Degenerate parameters (`scale <= 0`, invalid shapes) make every method
/// return NaN; a probability outside `[0, 1]` makes `ppf` return NaN.
pub trait ContinuousDistribution {
    /// Probability density function at `x`.
    fn pdf(&self, x: f64) -> f64;

    /// Cumulative distribution function at `x`.
    fn cdf(&self, x: f64) -> f64;

    /// Quantile function (inverse CDF) at probability `p`.
    fn ppf(&self, p: f64) -> f64;
}

/// The closed set of families the fitter supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DistributionFamily {
    Normal,
    Exponential,
    ExponNormal,
    Gompertz,
}

impl DistributionFamily {
    /// All supported families, in display order.
    pub const ALL: [DistributionFamily; 4] = [
        DistributionFamily::Normal,
        DistributionFamily::Exponential,
        DistributionFamily::ExponNormal,
        DistributionFamily::Gompertz,
    ];

    /// Short lowercase name for display and serialization keys.
    pub fn name(&self) -> &'static str {
        match self {
            DistributionFamily::Normal => "norm",
            DistributionFamily::Exponential => "expon",
            DistributionFamily::ExponNormal => "exponnorm",
            DistributionFamily::Gompertz => "gompertz",
        }
    }
}

// ── Normal ─────────────────────────────────────────────────────────────────

/// Normal distribution fitted by closed-form MLE: `loc` is the sample mean,
/// `scale` the population (ddof=0) standard deviation.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalFit {
    pub loc: f64,
    pub scale: f64,
}

impl NormalFit {
    /// Fit to `data`. Caller guarantees `data` is non-empty.
    pub fn fit(data: &[f64]) -> Self {
        let (mean, var, _) = sample_moments(data);
        Self {
            loc: mean,
            scale: var.sqrt(),
        }
    }
}

impl ContinuousDistribution for NormalFit {
    fn pdf(&self, x: f64) -> f64 {
        if self.scale <= 0.0 {
            return f64::NAN;
        }
        let z = (x - self.loc) / self.scale;
        (-0.5 * z * z).exp() / (self.scale * (2.0 * PI).sqrt())
    }

    fn cdf(&self, x: f64) -> f64 {
        if self.scale <= 0.0 {
            return f64::NAN;
        }
        norm_cdf((x - self.loc) / self.scale)
    }

    fn ppf(&self, p: f64) -> f64 {
        if self.scale <= 0.0 {
            return f64::NAN;
        }
        self.loc + self.scale * norm_ppf(p)
    }
}

// ── Exponential ────────────────────────────────────────────────────────────

/// Shifted exponential fitted by MLE: `loc` is the sample minimum, `scale`
/// the mean excess over it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExponentialFit {
    pub loc: f64,
    pub scale: f64,
}

impl ExponentialFit {
    /// Fit to `data`. Caller guarantees `data` is non-empty.
    pub fn fit(data: &[f64]) -> Self {
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = data.iter().sum::<f64>() / data.len() as f64;
        Self {
            loc: min,
            scale: mean - min,
        }
    }
}

impl ContinuousDistribution for ExponentialFit {
    fn pdf(&self, x: f64) -> f64 {
        if self.scale <= 0.0 {
            return f64::NAN;
        }
        if x < self.loc {
            return 0.0;
        }
        (-(x - self.loc) / self.scale).exp() / self.scale
    }

    fn cdf(&self, x: f64) -> f64 {
        if self.scale <= 0.0 {
            return f64::NAN;
        }
        if x < self.loc {
            return 0.0;
        }
        1.0 - (-(x - self.loc) / self.scale).exp()
    }

    fn ppf(&self, p: f64) -> f64 {
        if self.scale <= 0.0 || !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        self.loc - self.scale * (1.0 - p).ln()
    }
}

// ── Exponentially modified normal ──────────────────────────────────────────

/// Exponentially modified normal (EMG): a Normal(loc, scale) convolved with
/// an Exponential of mean `k * scale`.
///
/// Fitted by moment-based initialization (the skewness pins the
/// exponential/normal mix) refined with Nelder-Mead on the negative
/// log-likelihood.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExponNormalFit {
    /// Shape: ratio of the exponential mean to the normal scale.
    pub k: f64,
    pub loc: f64,
    pub scale: f64,
}

impl ExponNormalFit {
    /// Fit to `data`. Caller guarantees `data` is non-empty.
    pub fn fit(data: &[f64]) -> Self {
        let (mean, var, skew) = sample_moments(data);
        let std = var.sqrt();
        if std == 0.0 {
            return Self {
                k: 1.0,
                loc: mean,
                scale: 0.0,
            };
        }

        // Moment relations: mean = loc + τ, var = scale² + τ²,
        // skew = 2(τ/std)³. Clamp the skewness inside the family's valid
        // range (skew → 2 as the normal part vanishes).
        let g = skew.clamp(1e-3, 1.99);
        let r = (g / 2.0).powf(1.0 / 3.0);
        let tau = std * r;
        let sigma = (var * (1.0 - r * r)).max(1e-12 * var).sqrt();
        let k0 = (tau / sigma).max(1e-6);
        let x0 = [k0.ln(), mean - tau, sigma.ln()];
        let steps = [0.2, 0.2 * std, 0.2];

        let nll = |theta: &[f64]| -> f64 {
            let k = theta[0].exp();
            let loc = theta[1];
            let scale = theta[2].exp();
            if !k.is_finite() || !scale.is_finite() {
                return NLL_PENALTY;
            }
            let mut sum = 0.0;
            for &x in data {
                let lp = ln_pdf_exponnorm(x, k, loc, scale);
                if !lp.is_finite() {
                    return NLL_PENALTY;
                }
                sum -= lp;
            }
            sum
        };

        let theta = nelder_mead(nll, &x0, &steps, 400, 1e-10);
        Self {
            k: theta[0].exp(),
            loc: theta[1],
            scale: theta[2].exp(),
        }
    }
}

/// Log density of the EMG in the scipy `(K, loc, scale)` parameterization,
/// computed in log-space so small `K` does not overflow.
fn ln_pdf_exponnorm(x: f64, k: f64, loc: f64, scale: f64) -> f64 {
    let z = (x - loc) / scale;
    let a = 1.0 / (2.0 * k * k) - z / k;
    let b = -(z - 1.0 / k) / SQRT_2;
    -(2.0 * k * scale).ln() + a + ln_erfc(b)
}

impl ContinuousDistribution for ExponNormalFit {
    fn pdf(&self, x: f64) -> f64 {
        if self.scale <= 0.0 || self.k <= 0.0 {
            return f64::NAN;
        }
        ln_pdf_exponnorm(x, self.k, self.loc, self.scale).exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        if self.scale <= 0.0 || self.k <= 0.0 {
            return f64::NAN;
        }
        let z = (x - self.loc) / self.scale;
        let a = 1.0 / (2.0 * self.k * self.k) - z / self.k;
        let tail = (a + ln_norm_cdf(z - 1.0 / self.k)).exp();
        (norm_cdf(z) - tail).clamp(0.0, 1.0)
    }

    fn ppf(&self, p: f64) -> f64 {
        if self.scale <= 0.0 || self.k <= 0.0 || !(0.0..=1.0).contains(&p) || p.is_nan() {
            return f64::NAN;
        }
        if p == 0.0 {
            return f64::NEG_INFINITY;
        }
        if p == 1.0 {
            return f64::INFINITY;
        }

        // No closed form: bracket around the bulk of the mass, expand if
        // needed, then bisect on the monotone CDF.
        let spread = self.scale * (1.0 + self.k);
        let mut lo = self.loc - 10.0 * spread;
        let mut hi = self.loc + 10.0 * spread;
        for _ in 0..64 {
            if self.cdf(lo) <= p {
                break;
            }
            lo -= spread * 8.0;
        }
        for _ in 0..64 {
            if self.cdf(hi) >= p {
                break;
            }
            hi += spread * 8.0;
        }
        for _ in 0..200 {
            let mid = 0.5 * (lo + hi);
            if self.cdf(mid) < p {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        0.5 * (lo + hi)
    }
}

// ── Gompertz ───────────────────────────────────────────────────────────────

/// Gompertz distribution with shape `c`, support `x >= loc`.
///
/// Fitted by Nelder-Mead MLE from a fixed moment-derived start; the support
/// constraint is enforced by penalizing any `loc` above the sample minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GompertzFit {
    pub c: f64,
    pub loc: f64,
    pub scale: f64,
}

impl GompertzFit {
    /// Fit to `data`. Caller guarantees `data` is non-empty.
    pub fn fit(data: &[f64]) -> Self {
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let (_, var, _) = sample_moments(data);
        let std = var.sqrt();
        if std == 0.0 {
            return Self {
                c: 1.0,
                loc: min,
                scale: 0.0,
            };
        }

        let x0 = [0.5_f64.ln(), min - 0.5 * std, std.ln()];
        let steps = [0.3, 0.2 * std, 0.3];

        let nll = |theta: &[f64]| -> f64 {
            let c = theta[0].exp();
            let loc = theta[1];
            let scale = theta[2].exp();
            if !c.is_finite() || !scale.is_finite() {
                return NLL_PENALTY;
            }
            let mut sum = 0.0;
            for &x in data {
                let z = (x - loc) / scale;
                if z < 0.0 {
                    return NLL_PENALTY;
                }
                let lp = c.ln() + z - c * (z.exp() - 1.0) - scale.ln();
                if !lp.is_finite() {
                    return NLL_PENALTY;
                }
                sum -= lp;
            }
            sum
        };

        let theta = nelder_mead(nll, &x0, &steps, 800, 1e-10);
        Self {
            c: theta[0].exp(),
            loc: theta[1],
            scale: theta[2].exp(),
        }
    }
}

impl ContinuousDistribution for GompertzFit {
    fn pdf(&self, x: f64) -> f64 {
        if self.scale <= 0.0 || self.c <= 0.0 {
            return f64::NAN;
        }
        if x < self.loc {
            return 0.0;
        }
        let z = (x - self.loc) / self.scale;
        (self.c.ln() + z - self.c * (z.exp() - 1.0) - self.scale.ln()).exp()
    }

    fn cdf(&self, x: f64) -> f64 {
        if self.scale <= 0.0 || self.c <= 0.0 {
            return f64::NAN;
        }
        if x < self.loc {
            return 0.0;
        }
        let z = (x - self.loc) / self.scale;
        1.0 - (-self.c * (z.exp() - 1.0)).exp()
    }

    fn ppf(&self, p: f64) -> f64 {
        if self.scale <= 0.0 || self.c <= 0.0 || !(0.0..=1.0).contains(&p) {
            return f64::NAN;
        }
        self.loc + self.scale * (1.0 - (1.0 - p).ln() / self.c).ln()
    }
}

// ── Closed dispatch over families ──────────────────────────────────────────

/// A fitted distribution of any supported family.
///
/// Closed tagged dispatch: adding a family means adding a variant here,
/// not wiring up name-string lookup.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FittedDistribution {
    Normal(NormalFit),
    Exponential(ExponentialFit),
    ExponNormal(ExponNormalFit),
    Gompertz(GompertzFit),
}

impl FittedDistribution {
    /// Fit `family` to `data`; `None` when `data` is empty.
    pub fn fit(family: DistributionFamily, data: &[f64]) -> Option<Self> {
        if data.is_empty() {
            return None;
        }
        Some(match family {
            DistributionFamily::Normal => FittedDistribution::Normal(NormalFit::fit(data)),
            DistributionFamily::Exponential => {
                FittedDistribution::Exponential(ExponentialFit::fit(data))
            }
            DistributionFamily::ExponNormal => {
                FittedDistribution::ExponNormal(ExponNormalFit::fit(data))
            }
            DistributionFamily::Gompertz => FittedDistribution::Gompertz(GompertzFit::fit(data)),
        })
    }

    /// The family this fit belongs to.
    pub fn family(&self) -> DistributionFamily {
        match self {
            FittedDistribution::Normal(_) => DistributionFamily::Normal,
            FittedDistribution::Exponential(_) => DistributionFamily::Exponential,
            FittedDistribution::ExponNormal(_) => DistributionFamily::ExponNormal,
            FittedDistribution::Gompertz(_) => DistributionFamily::Gompertz,
        }
    }
}

impl ContinuousDistribution for FittedDistribution {
    fn pdf(&self, x: f64) -> f64 {
        match self {
            FittedDistribution::Normal(d) => d.pdf(x),
            FittedDistribution::Exponential(d) => d.pdf(x),
            FittedDistribution::ExponNormal(d) => d.pdf(x),
            FittedDistribution::Gompertz(d) => d.pdf(x),
        }
    }

    fn cdf(&self, x: f64) -> f64 {
        match self {
            FittedDistribution::Normal(d) => d.cdf(x),
            FittedDistribution::Exponential(d) => d.cdf(x),
            FittedDistribution::ExponNormal(d) => d.cdf(x),
            FittedDistribution::Gompertz(d) => d.cdf(x),
        }
    }

    fn ppf(&self, p: f64) -> f64 {
        match self {
            FittedDistribution::Normal(d) => d.ppf(p),
            FittedDistribution::Exponential(d) => d.ppf(p),
            FittedDistribution::ExponNormal(d) => d.ppf(p),
            FittedDistribution::Gompertz(d) => d.ppf(p),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────
