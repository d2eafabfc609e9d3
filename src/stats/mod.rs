//! Robust location/scale statistics used to derive run-pair scale factors.

use serde::Serialize;

/// Consistency constant turning a MAD into a normal-equivalent sigma.
pub const MAD_SCALE: f64 = 1.4826;
/// Half-width of the retention band, in scaled MADs.
pub const OUTLIER_MADS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleEstimator {
    /// `2^mean` of the filtered log ratios.
    MeanExp,
    /// `2^median` of the filtered log ratios.
    MedianExp,
}

impl ScaleEstimator {
    pub fn estimate(self, log_ratios: &[f64]) -> f64 {
        match self {
            ScaleEstimator::MeanExp => average_exp(log_ratios),
            ScaleEstimator::MedianExp => median_exp(log_ratios),
        }
    }
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut out = values.to_vec();
    out.sort_by(f64::total_cmp);
    out
}

/// Upper median: element `n / 2` of the ascending sort, no interpolation.
/// NaN for empty input.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let s = sorted(values);
    s[s.len() / 2]
}

pub fn mad(values: &[f64]) -> f64 {
    let m = median(values);
    let deviations = values.iter().map(|v| (v - m).abs()).collect::<Vec<_>>();
    median(&deviations)
}

pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn average_exp(values: &[f64]) -> f64 {
    average(values).exp2()
}

pub fn median_exp(values: &[f64]) -> f64 {
    median(values).exp2()
}

/// Iteratively keeps values within `median ± 3 * 1.4826 * MAD` until a pass
/// removes nothing. Non-finite values are discarded up front. A zero MAD
/// ends the iteration with the current set unchanged. Input order is kept.
pub fn outlier_filter(values: &[f64]) -> Vec<f64> {
    let mut current = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect::<Vec<_>>();

    loop {
        if current.is_empty() {
            return current;
        }
        let m = median(&current);
        let spread = mad(&current);
        if spread == 0.0 {
            return current;
        }
        let half_width = OUTLIER_MADS * MAD_SCALE * spread;
        let lo = m - half_width;
        let hi = m + half_width;

        let kept = current
            .iter()
            .copied()
            .filter(|&v| v >= lo && v <= hi)
            .collect::<Vec<_>>();
        if kept.len() == current.len() {
            return kept;
        }
        current = kept;
    }
}

pub fn scale(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|v| v * factor).collect()
}

/// Elementwise `log2(a / b)`.
pub fn log_ratio(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| (x / y).log2()).collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/mod.rs"]
mod tests;
